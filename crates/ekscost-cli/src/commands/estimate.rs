use anyhow::{Context, Result};
use clap::Args;
use ekscost_core::{ClusterConfig, CostEstimator, Estimate};
use ekscost_report::{html as html_report, json as jreport, terminal};
use std::path::PathBuf;
use tracing::info;

use super::{write_or_print, EXIT_INCOMPLETE};
use crate::config::load_cluster_config;

#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// Cluster config file (TOML, or JSON with a .json extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// AWS region [default: us-west-2]
    #[arg(long)]
    pub region: Option<String>,

    /// Worker node instance type [default: t3.medium]
    #[arg(long)]
    pub instance_type: Option<String>,

    /// Number of worker nodes [default: 2]
    #[arg(long)]
    pub nodes: Option<u32>,

    /// EBS volume size in GB [default: 50]
    #[arg(long)]
    pub volume_gb: Option<u32>,

    /// EBS volume type [default: gp3]
    #[arg(long)]
    pub volume_type: Option<String>,

    /// Internet egress per month in GB (defaults to the pricing table's assumption)
    #[arg(long)]
    pub data_transfer_gb: Option<f64>,

    /// Output format: table, json, html
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Output file (defaults to stdout for table/json, estimate.html for html)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Exit with status 2 when any price is missing
    #[arg(long)]
    pub strict: bool,
}

/// Defaults, then the config file, then individual flags.
pub fn resolve_config(args: &EstimateArgs) -> Result<ClusterConfig> {
    let mut config = match &args.config {
        Some(path) => load_cluster_config(path)?,
        None => ClusterConfig::default(),
    };

    if let Some(region) = &args.region {
        config.region = region.clone();
    }
    if let Some(instance_type) = &args.instance_type {
        config.node_instance_type = instance_type.clone();
    }
    if let Some(nodes) = args.nodes {
        config.desired_node_count = nodes;
    }
    if let Some(gb) = args.volume_gb {
        config.ebs_volume_size_gb = gb;
    }
    if let Some(volume_type) = &args.volume_type {
        config.ebs_volume_type = volume_type.clone();
    }
    if args.data_transfer_gb.is_some() {
        config.data_transfer_gb_per_month = args.data_transfer_gb;
    }

    config.validate().context("Invalid cluster configuration")?;
    Ok(config)
}

pub fn run(args: EstimateArgs, estimator: &CostEstimator) -> Result<i32> {
    let config = resolve_config(&args)?;
    let estimate = estimator.estimate(&config);

    match args.format.as_str() {
        "json" => {
            let content = jreport::render_estimate(&estimate)?;
            write_or_print(&content, args.out.as_ref(), "estimate.json")?;
        }
        "html" => {
            let content = html_report::render_estimate(&estimate)?;
            write_or_print(&content, args.out.as_ref(), "estimate.html")?;
        }
        _ => terminal::print_estimate(&estimate),
    }

    Ok(exit_code(&estimate, args.strict))
}

/// Prices the built-in example cluster; what `ekscost` does with no subcommand.
pub fn run_example(estimator: &CostEstimator) -> Result<i32> {
    let config = ClusterConfig::example();
    info!(region = %config.region, "no subcommand, pricing example cluster");
    terminal::print_estimate(&estimator.estimate(&config));
    Ok(0)
}

/// Missing prices are reported but only fail the process under `--strict`.
pub fn exit_code(estimate: &Estimate, strict: bool) -> i32 {
    if strict && !estimate.is_complete() {
        EXIT_INCOMPLETE
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = EstimateArgs {
            region: Some("eu-west-1".into()),
            nodes: Some(7),
            volume_type: Some("gp2".into()),
            ..EstimateArgs::default()
        };
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.region, "eu-west-1");
        assert_eq!(cfg.desired_node_count, 7);
        assert_eq!(cfg.ebs_volume_type, "gp2");
        assert_eq!(cfg.node_instance_type, "t3.medium");
        assert_eq!(cfg.ebs_volume_size_gb, 50);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.toml");
        std::fs::write(&path, "region = \"us-east-1\"\ndesired_node_count = 9\n").unwrap();
        let args = EstimateArgs {
            config: Some(path),
            nodes: Some(3),
            ..EstimateArgs::default()
        };
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.desired_node_count, 3);
    }

    #[test]
    fn zero_nodes_rejected_at_boundary() {
        let args = EstimateArgs {
            nodes: Some(0),
            ..EstimateArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn strict_only_affects_incomplete_estimates() {
        let estimator = CostEstimator::builtin().unwrap();
        let ok = estimator.estimate(&ClusterConfig::example());
        let bad = estimator.estimate(&ClusterConfig::new("us-west-2", "x9.huge", 1, 10));
        assert_eq!(exit_code(&ok, true), 0);
        assert_eq!(exit_code(&bad, false), 0);
        assert_eq!(exit_code(&bad, true), EXIT_INCOMPLETE);
    }
}
