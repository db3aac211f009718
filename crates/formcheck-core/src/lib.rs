//! Formcheck Core - declarative field validation
//!
//! This crate validates a record of named fields against per-field rule
//! expressions such as `required|digits_between(3,8)`, and renders a
//! human-readable message for the first failing rule of each field.
//!
//! # Main Components
//!
//! - **Error Handling**: Configuration errors using `thiserror` and `anyhow`
//! - **Core Types**: Field descriptors, field specs, parsed calls and errors
//! - **Expression Parser**: The `name(p0,p1,...)` mini-language
//! - **Rule Registry**: Built-in and caller-supplied rules with messages
//! - **Validation Session**: Runs the specs and reports to a callback
//! - **Submit Guard**: Gates a submission on a successful run
//!
//! # Example
//!
//! ```
//! use formcheck_core::{
//!     FieldDescriptor, FieldError, FieldSet, FieldValidationSpec, Result, RuleRegistry,
//!     ValidationSession,
//! };
//!
//! fn example() -> Result<()> {
//!     let fields = FieldSet::new()
//!         .with(FieldDescriptor::text("name", "Ada"))
//!         .with(FieldDescriptor::text("age", ""));
//!     let registry = RuleRegistry::new();
//!
//!     let mut messages = Vec::new();
//!     let valid = ValidationSession::new(
//!         &fields,
//!         &registry,
//!         vec![
//!             FieldValidationSpec::new("name", "required|alpha"),
//!             FieldValidationSpec::new("age", "required|digits_between(1,3)"),
//!         ],
//!         |errors: &[FieldError]| messages.extend(errors.iter().map(|e| e.message.clone())),
//!     )
//!     .run()?;
//!
//!     assert!(!valid);
//!     assert_eq!(messages, vec!["The age is required."]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod executor;
pub mod expression;
pub mod guard;
pub mod message;
pub mod rules;
pub mod session;
pub mod source;
pub mod types;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use executor::execute;
pub use expression::{parse, split_expressions};
pub use guard::{SubmitAction, SubmitGuard};
pub use message::render;
pub use rules::{RuleDefinition, RuleEvaluator, RuleRegistry};
pub use session::{ResultCallback, ValidationSession, ValidationSessionBuilder};
pub use source::{FieldSet, FieldSource};
pub use types::{
    FieldDescriptor, FieldError, FieldKind, FieldValidationSpec, ParsedRuleCall, RuleParam,
    ValidationOutcome,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
