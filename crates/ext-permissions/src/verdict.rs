//! Verdict types returned by permission checks and order validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The `by` of verdicts raised by the option spec itself rather than by an
/// extension's demand.
pub const SPEC_SOURCE: &str = "spec";

/// Classification of a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionStatus {
    #[serde(rename = "OK")]
    Ok,
    /// Violates a suggestion only.
    #[serde(rename = "warning")]
    Warning,
    /// Violates a hard constraint of a spec or a demand.
    #[serde(rename = "illegal")]
    Illegal,
    /// Violates a set constraint.
    #[serde(rename = "error")]
    Error,
}

impl PermissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "warning",
            Self::Illegal => "illegal",
            Self::Error => "error",
        }
    }

    /// `illegal` and `error` both forbid the value.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Illegal | Self::Error)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one value.
///
/// `reason` and `by` are empty for `OK` verdicts. Otherwise `reason` mentions
/// the offending value and `by` names the extension whose demand was
/// violated, or [`SPEC_SOURCE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionVerdict {
    pub status: PermissionStatus,
    pub reason: String,
    pub by: String,
}

impl PermissionVerdict {
    pub fn ok() -> Self {
        Self {
            status: PermissionStatus::Ok,
            reason: String::new(),
            by: String::new(),
        }
    }

    pub fn warning(reason: impl Into<String>, by: impl Into<String>) -> Self {
        Self::new(PermissionStatus::Warning, reason, by)
    }

    pub fn illegal(reason: impl Into<String>, by: impl Into<String>) -> Self {
        Self::new(PermissionStatus::Illegal, reason, by)
    }

    pub fn error(reason: impl Into<String>, by: impl Into<String>) -> Self {
        Self::new(PermissionStatus::Error, reason, by)
    }

    fn new(status: PermissionStatus, reason: impl Into<String>, by: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            by: by.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == PermissionStatus::Ok
    }
}

impl fmt::Display for PermissionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            write!(f, "{}", self.status)
        } else {
            write!(f, "{}: {}", self.status, self.reason)
        }
    }
}

/// Aggregate status of an activation order check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "CONFLICTS")]
    Conflicts,
}

/// One demanded value that the other side's constraints reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The extension whose activation was being checked.
    pub extension: String,
    /// The option url the conflict is about.
    pub url: String,
    pub reason: String,
    /// The verdict that rejected the demanded value.
    pub verdict: PermissionVerdict,
}

/// Outcome of validating an activation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderVerdict {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Conflict>,
}

impl OrderVerdict {
    pub fn ok() -> Self {
        Self {
            status: OrderStatus::Ok,
            conflicts: Vec::new(),
        }
    }

    /// `OK` when `conflicts` is empty, `CONFLICTS` otherwise.
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        let status = if conflicts.is_empty() {
            OrderStatus::Ok
        } else {
            OrderStatus::Conflicts
        };
        Self { status, conflicts }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OrderStatus::Ok
    }
}
