//! Rule-table configuration for webnorm
//!
//! The normalizers and predicates take their deny/allow tables as data
//! rather than hard-coded control flow, so deployments can extend them
//! without a rebuild. [`UrlRules::default`] provides the built-in tables;
//! [`UrlRules::load`] reads overrides from a TOML file.

mod rules;

pub use rules::{HostParams, UrlRules};
