//! Dependency statement parsing.
//!
//! A statement names the extension depended upon, optionally followed by a
//! comparison operator and a version:
//!
//! ```
//! use ext_resolver::statement::{DependencyStatement, Operator};
//!
//! let statement: DependencyStatement = "base >= 1.0.0".parse().unwrap();
//! assert_eq!(statement.extension, "base");
//! assert_eq!(statement.operator, Operator::Gte);
//! assert_eq!(statement.version, "1.0.0");
//!
//! let bare = DependencyStatement::parse("base").unwrap();
//! assert_eq!(bare.operator, Operator::Any);
//! assert_eq!(bare.version, "");
//! ```
//!
//! Operator and version are opaque here; they are not compared against any
//! installed version.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static FULL_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_-]+)\s*([<>=^~]+)\s*([0-9][0-9A-Za-z.+-]*)$").unwrap()
});

static BARE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

static NAME_HEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+").unwrap());

/// Comparison operator of a dependency statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// No operator: any version satisfies the dependency.
    Any,
    /// `==` (or `=`)
    Eq,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `^`
    Caret,
    /// `~`
    Tilde,
}

impl Operator {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "" => Some(Self::Any),
            "==" | "=" => Some(Self::Eq),
            ">=" => Some(Self::Gte),
            "<=" => Some(Self::Lte),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            "^" => Some(Self::Caret),
            "~" => Some(Self::Tilde),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Eq => "==",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Caret => "^",
            Self::Tilde => "~",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed entry of an extension's `dependencies` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyStatement {
    /// Name of the extension depended upon.
    pub extension: String,
    pub operator: Operator,
    /// Version text as written; empty when no operator was given.
    pub version: String,
}

impl DependencyStatement {
    /// Parse a dependency statement.
    ///
    /// A leading name followed by text that is not a recognized
    /// `<operator> <version>` suffix still yields the name; the suffix is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDependency`] when no extension name can be
    /// extracted.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if let Some(caps) = FULL_STATEMENT.captures(text) {
            if let Some(operator) = Operator::from_token(&caps[2]) {
                return Ok(Self {
                    extension: caps[1].to_string(),
                    operator,
                    version: caps[3].to_string(),
                });
            }
        }

        if BARE_NAME.is_match(text) {
            return Ok(Self::any(text));
        }

        match NAME_HEAD.find(text) {
            Some(head) => {
                tracing::debug!(
                    statement = text,
                    discarded = &text[head.end()..],
                    "ignoring unrecognized dependency suffix"
                );
                Ok(Self::any(head.as_str()))
            }
            None => Err(Error::MalformedDependency(text.to_string())),
        }
    }

    /// A statement accepting any version of `extension`.
    pub fn any(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            operator: Operator::Any,
            version: String::new(),
        }
    }
}

impl FromStr for DependencyStatement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DependencyStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == Operator::Any {
            write!(f, "{}", self.extension)
        } else {
            write!(f, "{} {} {}", self.extension, self.operator, self.version)
        }
    }
}
