//! Validation command handler

use super::utils::{configured_registry, load_document};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::{OutputWriter, ValidationReport};
use formcheck_core::{FieldError, FieldSet, FieldValidationSpec, SubmitGuard, ValidationSession};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip_all, fields(record = %args.record.display(), rules = %args.rules.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details(
        "validate_command",
        &format!("record: {}", args.record.display()),
    );
    info!("Starting validation");
    output.info(&format!("Validating record: {}", args.record.display()))?;

    let fields: FieldSet = load_document(&args.record, "map of field names to values")?;
    let specs: Vec<FieldValidationSpec> =
        load_document(&args.rules, "list of {field, rules} entries")?;
    if specs.is_empty() {
        return Err(Error::invalid_args(format!(
            "{} defines no field specs, nothing would be validated",
            args.rules.display()
        )));
    }
    debug!(fields = fields.len(), specs = specs.len(), "Loaded record and specs");

    for field in &fields {
        debug!(
            field = %field.name,
            kind = %field.kind,
            value = %redaction::redact_field_value(&field.name, field.value_or_empty()),
            "Record field"
        );
    }

    let registry = configured_registry(config)?;
    let report = validate_record(
        &args.record.display().to_string(),
        &fields,
        specs,
        &registry,
        args.submit,
    )?;

    if report.valid {
        info!("Record is valid");
    } else {
        warn!(errors = report.errors.len(), "Record is invalid");
    }
    output.validation_report(&report)?;

    if report.valid {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            count: report.errors.len(),
        })
    }
}

/// Run the specs against a record and collect the report
fn validate_record(
    record: &str,
    fields: &FieldSet,
    specs: Vec<FieldValidationSpec>,
    registry: &formcheck_core::RuleRegistry,
    submit: bool,
) -> Result<ValidationReport> {
    let checked = specs.len();
    let mut errors: Vec<FieldError> = Vec::new();

    let submitted = {
        let mut session = ValidationSession::builder()
            .field_source(fields)
            .registry(registry)
            .specs(specs)
            .on_result(|reported: &[FieldError]| errors.extend_from_slice(reported))
            .build()?;

        if submit {
            Some(SubmitGuard::new(session).submit()?)
        } else {
            session.run()?;
            None
        }
    };

    Ok(ValidationReport {
        record: record.to_string(),
        valid: errors.is_empty(),
        checked,
        submitted,
        errors,
    })
}
