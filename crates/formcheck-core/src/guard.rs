//! Submit guard - gates a submission on a validation run
//!
//! The guard owns a [`ValidationSession`] and optionally a previously
//! installed submit action. Submitting runs the session first; the previous
//! action only runs when validation succeeds, and the submission proceeds
//! only if both agree.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::session::ValidationSession;
use crate::Result;
use tracing::debug;

/// A previously installed submit action; `false` cancels the submission
pub type SubmitAction<'a> = Box<dyn FnMut() -> bool + 'a>;

pub struct SubmitGuard<'a> {
    session: ValidationSession<'a>,
    previous: Option<SubmitAction<'a>>,
}

impl<'a> SubmitGuard<'a> {
    pub fn new(session: ValidationSession<'a>) -> Self {
        Self {
            session,
            previous: None,
        }
    }

    /// Chain an existing submit action behind validation
    pub fn with_previous<F>(mut self, action: F) -> Self
    where
        F: FnMut() -> bool + 'a,
    {
        self.previous = Some(Box::new(action));
        self
    }

    /// Decide whether the submission may proceed
    pub fn submit(&mut self) -> Result<bool> {
        if !self.session.run()? {
            debug!("Submission blocked by validation errors");
            return Ok(false);
        }

        let proceed = match self.previous.as_mut() {
            Some(previous) => previous(),
            None => true,
        };
        debug!(proceed, "Submission checked");
        Ok(proceed)
    }

    pub fn session(&self) -> &ValidationSession<'a> {
        &self.session
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn into_session(self) -> ValidationSession<'a> {
        self.session
    }
}
