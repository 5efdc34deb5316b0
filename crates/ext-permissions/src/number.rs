//! Permission checks for `number` options.

use ext_model::{ConfigDemand, OptionSpec, RangeViolation, ValueRange};

use crate::verdict::{PermissionVerdict, SPEC_SOURCE};

/// Check `value` against the spec's own range.
pub fn spec_violations(value: f64, spec: &OptionSpec) -> Vec<PermissionVerdict> {
    spec.value
        .range
        .and_then(|range| range.check(value))
        .map(|violation| {
            let reason = match violation {
                RangeViolation::TooLow(min) => format!("value ({value}) too low ({min})"),
                RangeViolation::TooHigh(max) => format!("value ({value}) too high ({max})"),
            };
            PermissionVerdict::illegal(reason, SPEC_SOURCE)
        })
        .into_iter()
        .collect()
}

/// Every term of `demand` that `value` violates, in check order: required
/// value, required range, suggested value, suggested range.
pub fn config_violations(value: f64, demand: &ConfigDemand, by: &str) -> Vec<PermissionVerdict> {
    let terms = &demand.value;
    let mut found = Vec::new();

    if let Some(required) = &terms.required_value {
        if required.as_number() != Some(value) {
            found.push(PermissionVerdict::illegal(
                format!("value ({value}) does not match the value ({required}) required by {by}"),
                by,
            ));
        }
    }
    if let Some(verdict) = range_verdict(value, terms.required_range, by, false) {
        found.push(verdict);
    }
    if let Some(suggested) = &terms.suggested_value {
        if suggested.as_number() != Some(value) {
            found.push(PermissionVerdict::warning(
                format!("value ({value}) does not match value ({suggested}) suggested by {by}"),
                by,
            ));
        }
    }
    if let Some(verdict) = range_verdict(value, terms.suggested_range, by, true) {
        found.push(verdict);
    }

    found
}

fn range_verdict(
    value: f64,
    range: Option<ValueRange>,
    by: &str,
    suggested: bool,
) -> Option<PermissionVerdict> {
    let violation = range?.check(value)?;
    let verdict = match (violation, suggested) {
        (RangeViolation::TooLow(min), false) => PermissionVerdict::illegal(
            format!("value ({value}) too low ({min}) as required by {by}"),
            by,
        ),
        (RangeViolation::TooHigh(max), false) => PermissionVerdict::illegal(
            format!("value ({value}) too high ({max}) as required by {by}"),
            by,
        ),
        (RangeViolation::TooLow(min), true) => PermissionVerdict::warning(
            format!("value ({value}) might be too low ({min}) as suggested by {by}"),
            by,
        ),
        (RangeViolation::TooHigh(max), true) => PermissionVerdict::warning(
            format!("value ({value}) might be too high ({max}) as suggested by {by}"),
            by,
        ),
    };
    Some(verdict)
}
