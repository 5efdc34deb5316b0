//! Value permission engine.
//!
//! Decides whether a candidate value for one option is acceptable given the
//! option's spec and the demands of an ordered list of sources. Spec-level
//! checks come first, then each source in order. [`is_value_permitted`]
//! returns the first violation it meets; [`collect_violations`] reports all
//! of them.
//!
//! ```
//! use ext_model::{ConfigDemand, Extension, OptionSpec, OptionValue};
//! use ext_permissions::{PermissionStatus, is_value_permitted};
//!
//! let spec = OptionSpec::number("test.hello", 0.0);
//! let ext = Extension::new("test", "1.0.0")
//!     .with_demand("test.hello", ConfigDemand::suggested_value(10));
//!
//! let verdict = is_value_permitted(&OptionValue::from(1), &spec, &[ext]);
//! assert_eq!(verdict.status, PermissionStatus::Warning);
//! assert_eq!(verdict.by, "test");
//! ```

use ext_model::{OptionSpec, OptionType, OptionValue};

use crate::source::DemandSource;
use crate::verdict::{PermissionVerdict, SPEC_SOURCE};
use crate::{choice, number, scalar, set};

/// The candidate value, checked against the option type.
enum Candidate<'v> {
    Number(f64),
    Choice(&'v str),
    Set(&'v [OptionValue]),
    Scalar(&'v OptionValue),
}

impl<'v> Candidate<'v> {
    fn new(value: &'v OptionValue, spec: &OptionSpec) -> Option<Self> {
        match (spec.option_type, value) {
            (OptionType::Number, OptionValue::Number(n)) => Some(Self::Number(*n)),
            (OptionType::Choice, OptionValue::String(s)) => Some(Self::Choice(s)),
            (OptionType::Set, OptionValue::List(items)) => Some(Self::Set(items)),
            (OptionType::Boolean, OptionValue::Boolean(_))
            | (OptionType::String | OptionType::Filepath, OptionValue::String(_)) => {
                Some(Self::Scalar(value))
            }
            _ => None,
        }
    }

    fn spec_violations(&self, spec: &OptionSpec) -> Vec<PermissionVerdict> {
        match self {
            Self::Number(n) => number::spec_violations(*n, spec),
            Self::Choice(c) => choice::spec_violations(c, spec),
            Self::Set(_) | Self::Scalar(_) => Vec::new(),
        }
    }

    fn config_violations<S: DemandSource>(&self, url: &str, source: &S) -> Vec<PermissionVerdict> {
        let Some(demand) = source.demand_for(url) else {
            return Vec::new();
        };
        let by = source.source_name();
        match self {
            Self::Number(n) => number::config_violations(*n, demand, by),
            Self::Choice(c) => choice::config_violations(c, demand, by),
            Self::Set(items) => set::config_violations(items, demand, by),
            Self::Scalar(value) => scalar::config_violations(value, demand, by),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    FirstTrigger,
    CollectAll,
}

fn evaluate<S: DemandSource>(
    value: &OptionValue,
    spec: &OptionSpec,
    configs: &[S],
    mode: Mode,
) -> Vec<PermissionVerdict> {
    let Some(candidate) = Candidate::new(value, spec) else {
        return vec![PermissionVerdict::illegal(
            format!(
                "type of the value ({}) does not match spec type ({})",
                value.kind(),
                spec.option_type
            ),
            SPEC_SOURCE,
        )];
    };

    let mut found = candidate.spec_violations(spec);
    if mode == Mode::FirstTrigger && !found.is_empty() {
        found.truncate(1);
        return found;
    }

    for source in configs {
        let mut violations = candidate.config_violations(&spec.url, source);
        if mode == Mode::FirstTrigger && !violations.is_empty() {
            violations.truncate(1);
            return violations;
        }
        found.append(&mut violations);
    }

    found
}

/// Classify `value` for the option described by `spec`.
///
/// Sources are scanned in order and the first violated term decides the
/// verdict. `OK` when nothing is violated.
pub fn is_value_permitted<S: DemandSource>(
    value: &OptionValue,
    spec: &OptionSpec,
    configs: &[S],
) -> PermissionVerdict {
    let verdict = evaluate(value, spec, configs, Mode::FirstTrigger)
        .into_iter()
        .next()
        .unwrap_or_else(PermissionVerdict::ok);
    if !verdict.is_ok() {
        tracing::trace!(url = %spec.url, %value, status = %verdict.status, by = %verdict.by, "value not permitted");
    }
    verdict
}

/// Every violation of `value`: the spec's, then each source's in order,
/// without stopping at the first.
pub fn collect_violations<S: DemandSource>(
    value: &OptionValue,
    spec: &OptionSpec,
    configs: &[S],
) -> Vec<PermissionVerdict> {
    evaluate(value, spec, configs, Mode::CollectAll)
}

/// Render a value list as `[a, b]` for verdict reasons.
pub(crate) fn render_list(values: &[OptionValue]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
