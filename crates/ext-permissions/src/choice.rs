//! Permission checks for `choice` options.

use ext_model::{ConfigDemand, OptionSpec, OptionValue};

use crate::engine::render_list;
use crate::verdict::{PermissionVerdict, SPEC_SOURCE};

/// The choice must be one of the spec's declared choices.
pub fn spec_violations(choice: &str, spec: &OptionSpec) -> Vec<PermissionVerdict> {
    let choices = spec.choices();
    if choices.iter().any(|c| c == choice) {
        return Vec::new();
    }
    vec![PermissionVerdict::illegal(
        format!(
            "choice ({choice}) not among the available options [{}]",
            choices.join(", ")
        ),
        SPEC_SOURCE,
    )]
}

/// Every term of `demand` that `choice` violates, in check order: required
/// value, required values, suggested value, suggested values.
pub fn config_violations(choice: &str, demand: &ConfigDemand, by: &str) -> Vec<PermissionVerdict> {
    let terms = &demand.value;
    let mut found = Vec::new();

    if let Some(required) = &terms.required_value {
        if required.as_str() != Some(choice) {
            found.push(PermissionVerdict::illegal(
                format!("choice ({choice}) does not match the choice ({required}) required by {by}"),
                by,
            ));
        }
    }
    if let Some(required) = &terms.required_values {
        if !contains(required, choice) {
            found.push(PermissionVerdict::illegal(
                format!(
                    "choice ({choice}) not a valid choice ({}) as required by {by}",
                    render_list(required)
                ),
                by,
            ));
        }
    }
    if let Some(suggested) = &terms.suggested_value {
        if suggested.as_str() != Some(choice) {
            found.push(PermissionVerdict::warning(
                format!("choice ({choice}) does not match the choice ({suggested}) suggested by {by}"),
                by,
            ));
        }
    }
    if let Some(suggested) = &terms.suggested_values {
        if !contains(suggested, choice) {
            found.push(PermissionVerdict::warning(
                format!(
                    "choice ({choice}) not a suggested choice ({}) as suggested by {by}",
                    render_list(suggested)
                ),
                by,
            ));
        }
    }

    found
}

fn contains(values: &[OptionValue], choice: &str) -> bool {
    values.iter().any(|v| v.as_str() == Some(choice))
}
