use anyhow::{Context, Result};
use ekscost_core::{ClusterConfig, CostEstimator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Looked up in the working directory when no pricing file is given.
pub const LOCAL_PRICING_FILE: &str = "cost-estimation.json";

/// Where the pricing table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingSource {
    File(PathBuf),
    Builtin,
}

/// `--pricing` / `EKSCOST_PRICING` wins, then `./cost-estimation.json`, then
/// the table compiled into the binary.
pub fn resolve_pricing_source(explicit: Option<&Path>, cwd: &Path) -> PricingSource {
    if let Some(p) = explicit {
        return PricingSource::File(p.to_path_buf());
    }
    let local = cwd.join(LOCAL_PRICING_FILE);
    if local.is_file() {
        return PricingSource::File(local);
    }
    PricingSource::Builtin
}

pub fn load_estimator(explicit: Option<&Path>) -> Result<CostEstimator> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    match resolve_pricing_source(explicit, &cwd) {
        PricingSource::File(path) => {
            info!(path = %path.display(), "using pricing file");
            CostEstimator::from_path(&path)
                .with_context(|| format!("Failed to load pricing table: {}", path.display()))
        }
        PricingSource::Builtin => {
            debug!("using bundled pricing table");
            CostEstimator::builtin().context("Bundled pricing table is invalid")
        }
    }
}

/// Read a cluster description. `.json` files are parsed as JSON, anything
/// else as TOML. Missing keys take their documented defaults.
pub fn load_cluster_config(path: &Path) -> Result<ClusterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cluster config: {}", path.display()))?;

    let config: ClusterConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse cluster config: {}", path.display()))?,
        _ => toml::from_str(&content).with_context(|| {
            let mut err = format!("Failed to parse cluster config: {}", path.display());
            err.push_str("\n  Expected keys: region, node_instance_type, desired_node_count,");
            err.push_str("\n  ebs_volume_size_gb, ebs_volume_type, data_transfer_gb_per_month");
            err
        })?,
    };

    debug!(path = %path.display(), ?config, "loaded cluster config");
    Ok(config)
}
