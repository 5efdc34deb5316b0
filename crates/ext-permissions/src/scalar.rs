//! Permission checks for `boolean`, `string` and `filepath` options.

use ext_model::{ConfigDemand, OptionValue};

use crate::verdict::PermissionVerdict;

/// Required value mismatch, then suggested value mismatch.
pub fn config_violations(value: &OptionValue, demand: &ConfigDemand, by: &str) -> Vec<PermissionVerdict> {
    let terms = &demand.value;
    let mut found = Vec::new();

    if let Some(required) = &terms.required_value {
        if required != value {
            found.push(PermissionVerdict::illegal(
                format!("value ({value}) does not match the value ({required}) required by {by}"),
                by,
            ));
        }
    }
    if let Some(suggested) = &terms.suggested_value {
        if suggested != value {
            found.push(PermissionVerdict::warning(
                format!("value ({value}) does not match the value ({suggested}) suggested by {by}"),
                by,
            ));
        }
    }

    found
}
