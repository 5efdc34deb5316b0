//! Option specs: the declared shape of one configuration key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::OptionValue;

/// The closed set of option types.
///
/// Parsing any other `type` string fails with
/// [`Error::UnrecognizedType`], so permission checks never see an unknown type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OptionType {
    Number,
    Choice,
    Set,
    Boolean,
    String,
    Filepath,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Choice => "choice",
            Self::Set => "set",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Filepath => "filepath",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "number" => Ok(Self::Number),
            "choice" => Ok(Self::Choice),
            "set" => Ok(Self::Set),
            "boolean" => Ok(Self::Boolean),
            "string" => Ok(Self::String),
            "filepath" => Ok(Self::Filepath),
            other => Err(Error::UnrecognizedType(other.to_string())),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// An inclusive numeric range. Either bound may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Which side of a [`ValueRange`] a value fell off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeViolation {
    TooLow(f64),
    TooHigh(f64),
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Check `value` against both bounds, lower bound first.
    pub fn check(&self, value: f64) -> Option<RangeViolation> {
        if let Some(min) = self.min {
            if value < min {
                return Some(RangeViolation::TooLow(min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(RangeViolation::TooHigh(max));
            }
        }
        None
    }

    pub fn contains(&self, value: f64) -> bool {
        self.check(value).is_none()
    }

    /// Whether some value lies in both ranges. Bounds are inclusive, so
    /// ranges that only touch still overlap.
    pub fn overlaps(&self, other: &ValueRange) -> bool {
        let low = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let high = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        match (low, high) {
            (Some(low), Some(high)) => low <= high,
            _ => true,
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min {
            Some(min) => write!(f, "[{min}, ")?,
            None => write!(f, "(.., ")?,
        }
        match self.max {
            Some(max) => write!(f, "{max}]"),
            None => write!(f, "..)"),
        }
    }
}

/// The `value` block of an option spec: default plus type-specific bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

/// The declared shape, type and bounds of one configuration option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Globally unique dotted key, e.g. `mod1.feature1`.
    pub url: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    #[serde(default)]
    pub value: ValueSpec,
}

impl OptionSpec {
    pub fn new(url: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            url: url.into(),
            option_type,
            value: ValueSpec::default(),
        }
    }

    pub fn number(url: impl Into<String>, default: f64) -> Self {
        Self::new(url, OptionType::Number).with_default(default)
    }

    pub fn choice<S: Into<String>>(
        url: impl Into<String>,
        choices: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut spec = Self::new(url, OptionType::Choice);
        spec.value.choices = Some(choices.into_iter().map(Into::into).collect());
        spec
    }

    pub fn set(url: impl Into<String>) -> Self {
        Self::new(url, OptionType::Set)
    }

    pub fn boolean(url: impl Into<String>, default: bool) -> Self {
        Self::new(url, OptionType::Boolean).with_default(default)
    }

    pub fn string(url: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(url, OptionType::String).with_default(OptionValue::String(default.into()))
    }

    pub fn filepath(url: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(url, OptionType::Filepath).with_default(OptionValue::String(default.into()))
    }

    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.value.default = Some(default.into());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.value.range = Some(ValueRange::new(min, max));
        self
    }

    /// The declared choices of a `choice` option (empty for other types).
    pub fn choices(&self) -> &[String] {
        self.value.choices.as_deref().unwrap_or_default()
    }

    /// The value the option holds when nothing else sets it.
    ///
    /// Falls back to a neutral value of the option's type when the spec
    /// declares no default.
    pub fn default_value(&self) -> OptionValue {
        if let Some(default) = &self.value.default {
            return default.clone();
        }
        match self.option_type {
            OptionType::Number => {
                OptionValue::Number(self.value.range.and_then(|r| r.min).unwrap_or(0.0))
            }
            OptionType::Choice => {
                OptionValue::String(self.choices().first().cloned().unwrap_or_default())
            }
            OptionType::Set => OptionValue::List(Vec::new()),
            OptionType::Boolean => OptionValue::Boolean(false),
            OptionType::String | OptionType::Filepath => OptionValue::String(String::new()),
        }
    }
}
