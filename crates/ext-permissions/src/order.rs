//! Activation order validation.
//!
//! Activating an extension is safe when every value it requires is accepted
//! by the hard constraints of the extensions already active, and every value
//! they require is accepted by its own. Conflicts are reported; nothing is
//! reconciled.

use std::borrow::Borrow;

use ext_model::{ConfigDemand, Extension, OptionSpec, OptionType, OptionValue};

use crate::engine::is_value_permitted;
use crate::error::{Error, Result};
use crate::source::{DemandSource, NamedDemands};
use crate::verdict::{Conflict, OrderVerdict, PermissionVerdict};

/// A value an extension insists on for one option.
enum Demanded {
    /// Must be accepted as is.
    Exact(&'static str, OptionValue),
    /// At least one of the listed choices must be accepted.
    AnyOf(Vec<OptionValue>),
}

fn demanded_values(demand: &ConfigDemand, spec: &OptionSpec) -> Vec<Demanded> {
    let terms = &demand.value;
    let mut demanded = Vec::new();
    if let Some(value) = &terms.required_value {
        demanded.push(Demanded::Exact("required value", value.clone()));
    }
    if let Some(values) = &terms.required_values {
        match spec.option_type {
            OptionType::Set => {
                demanded.push(Demanded::Exact("required values", OptionValue::List(values.clone())))
            }
            OptionType::Choice => demanded.push(Demanded::AnyOf(values.clone())),
            _ => {}
        }
    }
    demanded
}

/// Check `demanded` against `sources`, returning the rejecting verdict.
fn rejection<S: DemandSource>(
    demanded: &Demanded,
    spec: &OptionSpec,
    sources: &[S],
) -> Option<PermissionVerdict> {
    match demanded {
        Demanded::Exact(_, value) => {
            Some(is_value_permitted(value, spec, sources)).filter(|v| !v.is_ok())
        }
        Demanded::AnyOf(choices) => {
            let mut first_rejection = None;
            for choice in choices {
                let verdict = is_value_permitted(choice, spec, sources);
                if verdict.is_ok() {
                    return None;
                }
                first_rejection.get_or_insert(verdict);
            }
            first_rejection
        }
    }
}

fn label(demanded: &Demanded) -> &'static str {
    match demanded {
        Demanded::Exact(label, _) => *label,
        Demanded::AnyOf(_) => "required values",
    }
}

/// The spec of `url` within `pool`: first the extension named by the url's
/// leading segment, then the first extension in `pool` that publishes it.
///
/// ```
/// use ext_model::{Extension, OptionSpec};
/// use ext_permissions::find_spec;
///
/// let provider = Extension::new("provider", "1.0.0").with_option(OptionSpec::number("shared.level", 1.0));
/// let pool = [provider];
/// assert!(find_spec("shared.level", &pool).is_some());
/// assert!(find_spec("shared.other", &pool).is_none());
/// ```
pub fn find_spec<'a, E: Borrow<Extension>>(url: &str, pool: &'a [E]) -> Option<&'a OptionSpec> {
    let owner = url.split('.').next().unwrap_or(url);
    pool.iter()
        .map(<E as Borrow<Extension>>::borrow)
        .find(|ext| ext.name == owner)
        .and_then(|ext| ext.option(url))
        .or_else(|| {
            pool.iter()
                .map(<E as Borrow<Extension>>::borrow)
                .find_map(|ext| ext.option(url))
        })
}

/// The verdict of `other`'s required range on `own`'s required range, when
/// no value satisfies both.
fn range_rejection(own: &ConfigDemand, other: &ConfigDemand, by: &str) -> Option<PermissionVerdict> {
    let own_range = own.value.required_range?;
    let other_range = other.value.required_range?;
    if own_range.overlaps(&other_range) {
        return None;
    }
    Some(PermissionVerdict::illegal(
        format!("range {own_range} does not overlap range {other_range} as required by {by}"),
        by,
    ))
}

fn check_candidate(
    active: &[&Extension],
    candidate: &Extension,
    pool: &[&Extension],
) -> Result<Vec<Conflict>> {
    let active_hard: Vec<NamedDemands> =
        active.iter().map(|ext| NamedDemands::required_only(ext)).collect();
    let candidate_hard = [NamedDemands::required_only(candidate)];

    let mut conflicts = Vec::new();
    for (url, demand) in &candidate.config_entries {
        let spec = find_spec(url, pool).ok_or_else(|| Error::SpecNotFound {
            url: url.to_string(),
        })?;
        let before = conflicts.len();

        for demanded in demanded_values(demand, spec) {
            if let Some(verdict) = rejection(&demanded, spec, &active_hard) {
                conflicts.push(Conflict {
                    extension: candidate.name.clone(),
                    url: url.clone(),
                    reason: format!(
                        "{} (for \"{url}\") by {} conflicts with specifications of {}",
                        label(&demanded),
                        candidate.name,
                        verdict.by
                    ),
                    verdict,
                });
            }
        }

        if spec.option_type == OptionType::Number {
            for ext in active {
                let Some(active_demand) = ext.demand(url) else {
                    continue;
                };
                if let Some(verdict) = range_rejection(demand, active_demand, &ext.name) {
                    conflicts.push(Conflict {
                        extension: candidate.name.clone(),
                        url: url.clone(),
                        reason: format!(
                            "required range (for \"{url}\") by {} conflicts with specifications of {}",
                            candidate.name, ext.name
                        ),
                        verdict,
                    });
                }
            }
        }

        if conflicts.len() > before {
            continue;
        }

        for ext in active {
            let Some(active_demand) = ext.demand(url) else {
                continue;
            };
            for demanded in demanded_values(active_demand, spec) {
                if let Some(verdict) = rejection(&demanded, spec, &candidate_hard) {
                    conflicts.push(Conflict {
                        extension: candidate.name.clone(),
                        url: url.clone(),
                        reason: format!(
                            "{} (for \"{url}\") by {} conflicts with specifications of {}",
                            label(&demanded),
                            ext.name,
                            verdict.by
                        ),
                        verdict,
                    });
                }
            }
        }
    }

    Ok(conflicts)
}

/// Whether `candidate` can be activated after the `active` extensions.
///
/// # Errors
///
/// Returns [`Error::SpecNotFound`] when a url the candidate demands is not
/// published by the candidate or any active extension.
pub fn is_valid_extension_config_order<E: Borrow<Extension>>(
    active: &[E],
    candidate: &Extension,
) -> Result<OrderVerdict> {
    let active: Vec<&Extension> = active.iter().map(<E as Borrow<Extension>>::borrow).collect();
    let mut pool = active.clone();
    pool.push(candidate);

    let conflicts = check_candidate(&active, candidate, &pool)?;
    if !conflicts.is_empty() {
        tracing::debug!(
            candidate = %candidate.name,
            conflicts = conflicts.len(),
            "candidate conflicts with active extensions"
        );
    }
    Ok(OrderVerdict::from_conflicts(conflicts))
}

/// Validate a whole activation order: each extension is checked as the
/// candidate against the ones before it.
///
/// Specs are looked up across the whole sequence.
pub fn is_all_valid_extension_config_order<E: Borrow<Extension>>(
    extensions: &[E],
) -> Result<OrderVerdict> {
    let pool: Vec<&Extension> = extensions
        .iter()
        .map(<E as Borrow<Extension>>::borrow)
        .collect();
    let mut conflicts = Vec::new();
    for i in 1..pool.len() {
        conflicts.extend(check_candidate(&pool[..i], pool[i], &pool)?);
    }
    Ok(OrderVerdict::from_conflicts(conflicts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::{OrderStatus, PermissionStatus};
    use ext_test_utils::extension;
    use pretty_assertions::assert_eq;

    fn base() -> Extension {
        extension("mod1")
            .option(OptionSpec::number("mod1.feature1", 20.0).with_range(0.0, 100.0))
            .option(OptionSpec::choice("mod1.feature2", ["A", "B", "C"]))
            .option(OptionSpec::set("mod1.folders"))
            .build()
    }

    #[test]
    fn test_conflicting_required_values() {
        let mod2 = extension("mod2").requires("mod1.feature1", 30).build();
        let mod3 = extension("mod3").requires("mod1.feature1", 50).build();
        let verdict = is_all_valid_extension_config_order(&[base(), mod2, mod3]).unwrap();

        assert_eq!(verdict.status, OrderStatus::Conflicts);
        assert_eq!(verdict.conflicts.len(), 1);
        let conflict = &verdict.conflicts[0];
        assert_eq!(conflict.extension, "mod3");
        assert_eq!(conflict.url, "mod1.feature1");
        assert_eq!(
            conflict.reason,
            "required value (for \"mod1.feature1\") by mod3 conflicts with specifications of mod2"
        );
        assert_eq!(conflict.verdict.status, PermissionStatus::Illegal);
    }

    #[test]
    fn test_agreeing_required_values() {
        let mod2 = extension("mod2").requires("mod1.feature1", 30).build();
        let mod3 = extension("mod3")
            .demand(
                "mod1.feature1",
                ConfigDemand::new().with_required_range(20.0, 40.0),
            )
            .build();
        let mod4 = extension("mod4").requires("mod1.feature1", 30).build();
        let verdict = is_all_valid_extension_config_order(&[base(), mod2, mod3, mod4]).unwrap();
        assert_eq!(verdict, OrderVerdict::ok());
    }

    #[test]
    fn test_suggestions_never_conflict() {
        let mod2 = extension("mod2").suggests("mod1.feature1", 10).build();
        let mod3 = extension("mod3").requires("mod1.feature1", 50).build();
        assert!(is_all_valid_extension_config_order(&[base(), mod2, mod3]).unwrap().is_ok());
    }

    #[test]
    fn test_reverse_direction_range() {
        let mod2 = extension("mod2").requires("mod1.feature1", 30).build();
        let mod3 = extension("mod3")
            .demand(
                "mod1.feature1",
                ConfigDemand::new().with_required_range(40.0, 60.0),
            )
            .build();
        let active = [base(), mod2];
        let verdict = is_valid_extension_config_order(&active, &mod3).unwrap();
        assert_eq!(verdict.status, OrderStatus::Conflicts);
        assert_eq!(
            verdict.conflicts[0].reason,
            "required value (for \"mod1.feature1\") by mod2 conflicts with specifications of mod3"
        );
    }

    #[test]
    fn test_disjoint_required_ranges_conflict() {
        let low = extension("low")
            .demand("mod1.feature1", ConfigDemand::new().with_required_range(0.0, 10.0))
            .build();
        let high = extension("high")
            .demand("mod1.feature1", ConfigDemand::new().with_required_range(20.0, 30.0))
            .build();
        let verdict = is_all_valid_extension_config_order(&[base(), low, high]).unwrap();

        assert_eq!(verdict.status, OrderStatus::Conflicts);
        assert_eq!(verdict.conflicts.len(), 1);
        let conflict = &verdict.conflicts[0];
        assert_eq!(conflict.extension, "high");
        assert_eq!(
            conflict.reason,
            "required range (for \"mod1.feature1\") by high conflicts with specifications of low"
        );
        assert_eq!(conflict.verdict.status, PermissionStatus::Illegal);
        assert_eq!(conflict.verdict.by, "low");
        assert_eq!(
            conflict.verdict.reason,
            "range [20, 30] does not overlap range [0, 10] as required by low"
        );
    }

    #[test]
    fn test_touching_required_ranges_agree() {
        let low = extension("low")
            .demand("mod1.feature1", ConfigDemand::new().with_required_range(0.0, 20.0))
            .build();
        let high = extension("high")
            .demand("mod1.feature1", ConfigDemand::new().with_required_range(20.0, 30.0))
            .build();
        assert!(is_all_valid_extension_config_order(&[base(), low, high]).unwrap().is_ok());
    }

    #[test]
    fn test_suggested_ranges_never_conflict() {
        let low = extension("low")
            .demand("mod1.feature1", ConfigDemand::new().with_suggested_range(0.0, 10.0))
            .build();
        let high = extension("high")
            .demand("mod1.feature1", ConfigDemand::new().with_required_range(20.0, 30.0))
            .build();
        assert!(is_all_valid_extension_config_order(&[base(), low, high]).unwrap().is_ok());
    }

    #[test]
    fn test_find_spec_prefers_owner() {
        let owner = extension("mod1")
            .option(OptionSpec::number("mod1.feature1", 20.0))
            .build();
        let shadow = extension("shadow")
            .option(OptionSpec::number("mod1.feature1", 99.0))
            .build();
        let pool = [&shadow, &owner];
        assert_eq!(find_spec("mod1.feature1", &pool), owner.option("mod1.feature1"));
        assert_eq!(find_spec("mod1.missing", &pool), None);
    }

    #[test]
    fn test_required_value_outside_spec_range() {
        let mod2 = extension("mod2").requires("mod1.feature1", 150).build();
        let verdict = is_valid_extension_config_order(&[base()], &mod2).unwrap();
        assert_eq!(verdict.conflicts[0].verdict.by, "spec");
    }

    #[test]
    fn test_choice_required_values_need_one_permitted() {
        let mod2 = extension("mod2").requires("mod1.feature2", "B").build();
        let overlapping = extension("mod3")
            .demand("mod1.feature2", ConfigDemand::new().with_required_values(["A", "B"]))
            .build();
        let disjoint = extension("mod4")
            .demand("mod1.feature2", ConfigDemand::new().with_required_values(["A", "C"]))
            .build();

        let active = [base(), mod2];
        assert!(is_valid_extension_config_order(&active, &overlapping).unwrap().is_ok());
        let verdict = is_valid_extension_config_order(&active, &disjoint).unwrap();
        assert_eq!(verdict.conflicts.len(), 1);
        assert!(verdict.conflicts[0].reason.starts_with("required values"));
    }

    #[test]
    fn test_set_required_values_checked_as_one_value() {
        let mod2 = extension("mod2")
            .demand(
                "mod1.folders",
                ConfigDemand::new()
                    .with_required_values(["maps/", "saves/"])
                    .with_required_exclusive(true),
            )
            .build();
        let mod3 = extension("mod3")
            .demand(
                "mod1.folders",
                ConfigDemand::new()
                    .with_required_values(["maps/"])
                    .with_required_inclusive(true),
            )
            .build();
        let verdict = is_all_valid_extension_config_order(&[base(), mod2, mod3]).unwrap();
        assert_eq!(verdict.status, OrderStatus::Conflicts);
        assert_eq!(verdict.conflicts[0].verdict.status, PermissionStatus::Error);
    }

    #[test]
    fn test_spec_found_on_candidate() {
        let own = extension("own")
            .option(OptionSpec::number("own.level", 1.0))
            .requires("own.level", 3)
            .build();
        assert!(is_valid_extension_config_order::<Extension>(&[], &own).unwrap().is_ok());
    }

    #[test]
    fn test_spec_found_on_other_active_extension() {
        let provider = extension("provider")
            .option(OptionSpec::number("shared.level", 1.0))
            .build();
        let user = extension("user").requires("shared.level", 3).build();
        assert!(is_valid_extension_config_order(&[&provider], &user).unwrap().is_ok());
    }

    #[test]
    fn test_spec_not_found() {
        let orphan = extension("orphan").requires("nobody.level", 3).build();
        assert!(matches!(
            is_valid_extension_config_order(&[base()], &orphan),
            Err(Error::SpecNotFound { url }) if url == "nobody.level"
        ));
    }

    #[test]
    fn test_single_extension_order_is_ok() {
        assert!(is_all_valid_extension_config_order(&[base()]).unwrap().is_ok());
        assert!(is_all_valid_extension_config_order::<Extension>(&[]).unwrap().is_ok());
    }
}
