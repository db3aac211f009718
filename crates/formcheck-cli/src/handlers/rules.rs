//! Rules command handler - browses the rule catalog

use super::utils::configured_registry;
use crate::cli::RulesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputWriter, RuleSummary};
use formcheck_core::{FieldSet, FieldValidationSpec, RuleRegistry, ValidationSession};

/// Handle the rules command
pub fn handle_rules(args: RulesArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let registry = configured_registry(config)?;
    let rules = select_rules(&registry, args.name.as_deref())?;
    output.rules(&rules)
}

fn select_rules(registry: &RuleRegistry, name: Option<&str>) -> Result<Vec<RuleSummary>> {
    let Some(name) = name else {
        return Ok(registry
            .definitions()
            .into_iter()
            .map(RuleSummary::from)
            .collect());
    };

    // Same resolution a validation run would perform for this name
    let fields = FieldSet::new();
    let session = ValidationSession::new(
        &fields,
        registry,
        Vec::<FieldValidationSpec>::new(),
        |_: &[formcheck_core::FieldError]| {},
    );
    let definition = session.lookup_rule(name)?;
    Ok(vec![RuleSummary::from(definition)])
}
