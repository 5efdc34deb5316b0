//! Configuration demands: one extension's constraints on one option.
//!
//! A demand is declared under the option's url in an extension's `config`
//! table:
//!
//! ```toml
//! [extension.config."mod1.feature1".value]
//! suggested-value = 15
//! required-range = { min = 10, max = 20 }
//! ```
//!
//! `required-*` terms are hard constraints, `suggested-*` terms are advisory.
//! Which terms are meaningful depends on the option's type.

use serde::{Deserialize, Serialize};

use crate::option::{OptionType, ValueRange};
use crate::value::OptionValue;

/// The individual constraint terms of a demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DemandTerms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_value: Option<OptionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_value: Option<OptionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_values: Option<Vec<OptionValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_values: Option<Vec<OptionValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_exclusive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_inclusive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_exclusive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_inclusive: Option<bool>,
}

/// One extension's requirement on one option url.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDemand {
    pub value: DemandTerms,
}

impl ConfigDemand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required_value(value: impl Into<OptionValue>) -> Self {
        Self::new().with_required_value(value)
    }

    pub fn suggested_value(value: impl Into<OptionValue>) -> Self {
        Self::new().with_suggested_value(value)
    }

    pub fn with_required_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.value.required_value = Some(value.into());
        self
    }

    pub fn with_suggested_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.value.suggested_value = Some(value.into());
        self
    }

    pub fn with_required_range(mut self, min: f64, max: f64) -> Self {
        self.value.required_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn with_suggested_range(mut self, min: f64, max: f64) -> Self {
        self.value.suggested_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn with_required_values<T: Into<OptionValue>>(
        mut self,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.value.required_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_suggested_values<T: Into<OptionValue>>(
        mut self,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.value.suggested_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_required_exclusive(mut self, exclusive: bool) -> Self {
        self.value.required_exclusive = Some(exclusive);
        self
    }

    pub fn with_required_inclusive(mut self, inclusive: bool) -> Self {
        self.value.required_inclusive = Some(inclusive);
        self
    }

    pub fn with_suggested_exclusive(mut self, exclusive: bool) -> Self {
        self.value.suggested_exclusive = Some(exclusive);
        self
    }

    pub fn with_suggested_inclusive(mut self, inclusive: bool) -> Self {
        self.value.suggested_inclusive = Some(inclusive);
        self
    }

    /// A copy of this demand keeping only the hard (`required-*`) terms.
    pub fn required_only(&self) -> Self {
        let terms = &self.value;
        Self {
            value: DemandTerms {
                required_value: terms.required_value.clone(),
                required_range: terms.required_range,
                required_values: terms.required_values.clone(),
                required_exclusive: terms.required_exclusive,
                required_inclusive: terms.required_inclusive,
                ..DemandTerms::default()
            },
        }
    }

    /// Whether any hard term is declared.
    pub fn has_required_terms(&self) -> bool {
        let terms = &self.value;
        terms.required_value.is_some()
            || terms.required_range.is_some()
            || terms.required_values.is_some()
            || terms.required_exclusive.is_some()
            || terms.required_inclusive.is_some()
    }

    /// The value this demand would put into an option of `option_type`,
    /// strongest term first.
    ///
    /// A values list names one value for a `set` option and a pick of
    /// choices for a `choice` option, of which the first is taken. Ranges do
    /// not name a value, so a demand with only range terms yields `None`.
    pub fn preferred_value(&self, option_type: OptionType) -> Option<OptionValue> {
        let terms = &self.value;
        let from_list = |values: &Option<Vec<OptionValue>>| match option_type {
            OptionType::Choice => values.as_ref().and_then(|v| v.first().cloned()),
            _ => values.clone().map(OptionValue::List),
        };
        terms
            .required_value
            .clone()
            .or_else(|| from_list(&terms.required_values))
            .or_else(|| terms.suggested_value.clone())
            .or_else(|| from_list(&terms.suggested_values))
    }
}
