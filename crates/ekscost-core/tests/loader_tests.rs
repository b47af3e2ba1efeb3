//! Loading pricing tables from disk.

use ekscost_core::{ClusterConfig, ConfigurationError, CostEstimator, PricingTable, BUILTIN_PRICING_JSON};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_pricing(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("Failed to create temp file");
    f.write_all(content.as_bytes()).expect("Failed to write temp file");
    f
}

#[test]
fn loads_table_from_file() {
    let f = write_pricing(BUILTIN_PRICING_JSON);
    let table = PricingTable::load(f.path()).unwrap();
    assert_eq!(table, PricingTable::builtin().unwrap());
}

#[test]
fn missing_file_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cost-estimation.json");
    match CostEstimator::from_path(&path) {
        Err(ConfigurationError::NotFound { path: p }) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn invalid_json_is_configuration_error() {
    let f = write_pricing("{ \"ec2_pricing\": ");
    let err = PricingTable::load(f.path()).unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse { origin: Some(_), .. }));
    assert!(err.to_string().contains("failed to parse pricing data from"));
}

#[test]
fn directory_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = PricingTable::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigurationError::Read { .. }));
}

#[test]
fn sparse_table_soft_fails_missing_categories() {
    let f = write_pricing(
        r#"{
            "ec2_pricing": {"us-west-2": {"t3.medium": 0.0416}},
            "eks_pricing": {"us-west-2": 0.10},
            "default_assumptions": {"monthly_hours": 730}
        }"#,
    );
    let estimator = CostEstimator::from_path(f.path()).unwrap();
    let est = estimator.estimate(&ClusterConfig::default());

    assert!(!est.is_complete());
    let errors = est.errors();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].starts_with("NAT: "));
    assert!(errors[1].starts_with("EBS: "));
    assert!(errors[2].starts_with("Data: "));
    assert!(errors[0].contains("nat_gateway_pricing.us-west-2"));
}

fn load_estimator(content: &str) -> ekscost_core::Result<(NamedTempFile, CostEstimator)> {
    let f = write_pricing(content);
    let estimator = CostEstimator::from_path(f.path())?;
    Ok((f, estimator))
}

#[test]
fn crate_result_propagates_configuration_errors() {
    let (_f, estimator) = load_estimator(BUILTIN_PRICING_JSON).unwrap();
    assert!(estimator.estimate(&ClusterConfig::example()).is_complete());

    let err = load_estimator(r#"{"eks_pricing": {"us-west-2": -0.10}}"#).unwrap_err();
    assert!(matches!(err, ConfigurationError::NegativeRate { .. }));
}
