//! Permission checks for `set` options.
//!
//! The candidate list is compared as a set: duplicates collapse and order
//! does not matter. A qualifier flag that is present enables its check
//! whatever its value; violations are reported with status `error`.

use ext_model::{ConfigDemand, OptionValue};

use crate::engine::render_list;
use crate::verdict::PermissionVerdict;

/// Every term of `demand` that `values` violates, in check order: required
/// exclusive, required inclusive, suggested exclusive, suggested inclusive.
pub fn config_violations(
    values: &[OptionValue],
    demand: &ConfigDemand,
    by: &str,
) -> Vec<PermissionVerdict> {
    let terms = &demand.value;
    let candidate = distinct(values);
    let mut found = Vec::new();

    let required = terms.required_values.as_deref().unwrap_or_default();
    let suggested = terms.suggested_values.as_deref().unwrap_or_default();

    let checks = [
        (terms.required_exclusive, true, required, "required"),
        (terms.required_inclusive, false, required, "required"),
        (terms.suggested_exclusive, true, suggested, "suggested"),
        (terms.suggested_inclusive, false, suggested, "suggested"),
    ];

    for (flag, exclusive, expected, qualifier) in checks {
        if flag.is_none() {
            continue;
        }
        let expected_set = distinct(expected);
        let has_all = expected_set.iter().all(|v| candidate.contains(v));
        if exclusive && (!has_all || expected_set.len() != candidate.len()) {
            found.push(PermissionVerdict::error(
                format!(
                    "value ({}) does not match value ({}) as {qualifier} by {by}",
                    render_list(values),
                    render_list(expected)
                ),
                by,
            ));
        } else if !exclusive && !has_all {
            found.push(PermissionVerdict::error(
                format!(
                    "value ({}) is missing some elements ({}) as {qualifier} by {by}",
                    render_list(values),
                    render_list(expected)
                ),
                by,
            ));
        }
    }

    found
}

/// `values` without duplicates, first occurrence kept.
fn distinct(values: &[OptionValue]) -> Vec<&OptionValue> {
    let mut seen: Vec<&OptionValue> = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
