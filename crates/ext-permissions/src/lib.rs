//! Configuration permission engine for extensions.
//!
//! Extensions publish options and place demands on each other's options.
//! This crate decides whether a candidate value is acceptable
//! ([`is_value_permitted`]), whether a set of extensions can be active
//! together ([`is_valid_extension_config_order`],
//! [`is_all_valid_extension_config_order`]), and keeps an in-memory
//! [`ConfigSession`] consistent while extensions are activated and values
//! assigned.
//!
//! # Example
//!
//! ```
//! use ext_model::{ConfigDemand, Extension, OptionSpec};
//! use ext_permissions::{OrderStatus, is_all_valid_extension_config_order};
//!
//! let base = Extension::new("mod1", "1.0.0").with_option(OptionSpec::number("mod1.feature1", 20.0));
//! let a = Extension::new("mod2", "1.0.0").with_demand("mod1.feature1", ConfigDemand::required_value(30));
//! let b = Extension::new("mod3", "1.0.0").with_demand("mod1.feature1", ConfigDemand::required_value(50));
//!
//! let verdict = is_all_valid_extension_config_order(&[base, a, b]).unwrap();
//! assert_eq!(verdict.status, OrderStatus::Conflicts);
//! ```

pub mod choice;
pub mod engine;
pub mod error;
pub mod number;
pub mod order;
pub mod scalar;
pub mod session;
pub mod set;
pub mod source;
pub mod verdict;

pub use engine::{collect_violations, is_value_permitted};
pub use error::{Error, Result};
pub use order::{find_spec, is_all_valid_extension_config_order, is_valid_extension_config_order};
pub use session::{ConfigSession, SessionSnapshot};
pub use source::{DemandSource, NamedDemands};
pub use verdict::{
    Conflict, OrderStatus, OrderVerdict, PermissionStatus, PermissionVerdict, SPEC_SOURCE,
};
