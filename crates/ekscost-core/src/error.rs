//! Error types for ekscost-core.
//!
//! `ConfigurationError` is fatal: without a pricing table (or with an invalid
//! cluster configuration) nothing can be estimated. `PricingNotFound` is a
//! soft miss carried as data in category results so the aggregator can report
//! every gap in one pass.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("pricing file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read pricing file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pricing data{}: {source}", origin_suffix(.origin))]
    Parse {
        origin: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rate at {key_path}: {value} (rates must be non-negative)")]
    NegativeRate { key_path: String, value: f64 },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

fn origin_suffix(origin: &Option<PathBuf>) -> String {
    match origin {
        Some(p) => format!(" from {}", p.display()),
        None => String::new(),
    }
}

/// A price lookup that found no entry. `key` is the first missing key and
/// `path` the full dotted path down to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Pricing not found for '{key}' ({path})")]
pub struct PricingNotFound {
    pub key: String,
    pub path: String,
}

impl PricingNotFound {
    pub fn new(segments: &[&str]) -> Self {
        Self {
            key: segments.last().copied().unwrap_or_default().to_string(),
            path: segments.join("."),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Outcome of a single price lookup.
pub type Lookup<T> = std::result::Result<T, PricingNotFound>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_not_found_names_key_and_path() {
        let e = PricingNotFound::new(&["ec2_pricing", "us-west-2", "t3.nano"]);
        assert_eq!(e.key, "t3.nano");
        assert_eq!(e.path, "ec2_pricing.us-west-2.t3.nano");
        assert_eq!(
            e.to_string(),
            "Pricing not found for 't3.nano' (ec2_pricing.us-west-2.t3.nano)"
        );
    }

    #[test]
    fn parse_error_mentions_origin() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = ConfigurationError::Parse {
            origin: Some(PathBuf::from("/tmp/prices.json")),
            source,
        };
        assert!(e.to_string().contains("/tmp/prices.json"));
    }
}
