//! Parse command handler - shows how rule expressions are understood

use super::utils::configured_registry;
use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{OutputWriter, ParameterView, ParsedExpression};
use formcheck_core::{split_expressions, ParsedRuleCall, RuleRegistry};
use tracing::{debug, instrument};

/// Handle the parse command
#[instrument(skip_all, fields(expressions = args.expressions.len(), check = args.check))]
pub fn handle_parse(args: ParseArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let registry = if args.check {
        Some(configured_registry(config)?)
    } else {
        None
    };

    let parsed: Vec<ParsedExpression> = args
        .expressions
        .iter()
        .flat_map(|expression| split_expressions(expression))
        .map(|token| describe(token, registry.as_ref()))
        .collect();

    output.parsed_expressions(&parsed)?;

    let rejected = parsed.iter().filter(|entry| !entry.is_ok()).count();
    if rejected > 0 {
        return Err(Error::RejectedExpressions { count: rejected });
    }
    Ok(())
}

/// Parse one token and, with a registry, check it can be dispatched
fn describe(token: &str, registry: Option<&RuleRegistry>) -> ParsedExpression {
    let call = match token.parse::<ParsedRuleCall>() {
        Ok(call) => call,
        Err(e) => {
            debug!(token, error = %e, "Rejected rule expression");
            return ParsedExpression {
                expression: token.to_string(),
                rule_name: None,
                parameters: Vec::new(),
                canonical: None,
                error: Some(e.to_string()),
            };
        }
    };

    let error = registry.and_then(|registry| check_call(&call, registry).err());

    ParsedExpression {
        expression: token.to_string(),
        rule_name: Some(call.rule_name.clone()),
        parameters: call.raw_parameters.iter().map(ParameterView::from).collect(),
        canonical: Some(call.to_string()),
        error,
    }
}

fn check_call(call: &ParsedRuleCall, registry: &RuleRegistry) -> std::result::Result<(), String> {
    let rule = registry.lookup(&call.rule_name).map_err(|e| e.to_string())?;

    if rule.arity() != call.argument_count() {
        return Err(format!(
            "Rule \"{}\" expects {} extra parameters, \"{}\" passes {}.",
            rule.name(),
            rule.parameter_count(),
            call,
            call.raw_parameters.len()
        ));
    }
    Ok(())
}
