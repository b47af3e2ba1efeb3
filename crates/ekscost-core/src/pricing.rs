//! EKS pricing table (USD, on-demand).
//! Compute, control plane and NAT rates are per hour; EBS is per GB-month;
//! data transfer and NAT data processing are per GB.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ConfigurationError, Lookup, PricingNotFound, Result};

/// Pricing document shipped with the crate.
pub const BUILTIN_PRICING_JSON: &str = include_str!("../data/cost-estimation.json");

/// `region -> key -> rate`
pub type RegionRates = BTreeMap<String, BTreeMap<String, f64>>;

const DEFAULT_MONTHLY_HOURS: f64 = 730.0;
const DEFAULT_GB_PER_MONTH: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAssumptions")]
pub struct DefaultAssumptions {
    pub monthly_hours: f64,
    pub nat_gateway_data_gb_per_month: f64,
    pub data_transfer_gb_per_month: f64,
    /// Keys the document left out and which took their fallback value.
    #[serde(skip)]
    pub defaulted: Vec<String>,
}

impl Default for DefaultAssumptions {
    fn default() -> Self {
        Self {
            monthly_hours: DEFAULT_MONTHLY_HOURS,
            nat_gateway_data_gb_per_month: DEFAULT_GB_PER_MONTH,
            data_transfer_gb_per_month: DEFAULT_GB_PER_MONTH,
            defaulted: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawAssumptions {
    monthly_hours: Option<f64>,
    nat_gateway_data_gb_per_month: Option<f64>,
    data_transfer_gb_per_month: Option<f64>,
}

impl From<RawAssumptions> for DefaultAssumptions {
    fn from(raw: RawAssumptions) -> Self {
        let mut defaulted = Vec::new();
        let mut take = |key: &str, value: Option<f64>, fallback: f64| {
            value.unwrap_or_else(|| {
                defaulted.push(key.to_string());
                fallback
            })
        };
        let monthly_hours = take("monthly_hours", raw.monthly_hours, DEFAULT_MONTHLY_HOURS);
        let nat_gateway_data_gb_per_month = take(
            "nat_gateway_data_gb_per_month",
            raw.nat_gateway_data_gb_per_month,
            DEFAULT_GB_PER_MONTH,
        );
        let data_transfer_gb_per_month = take(
            "data_transfer_gb_per_month",
            raw.data_transfer_gb_per_month,
            DEFAULT_GB_PER_MONTH,
        );
        Self {
            monthly_hours,
            nat_gateway_data_gb_per_month,
            data_transfer_gb_per_month,
            defaulted,
        }
    }
}

/// Used when the whole `default_assumptions` block is missing.
fn absent_assumptions() -> DefaultAssumptions {
    DefaultAssumptions::from(RawAssumptions {
        monthly_hours: None,
        nat_gateway_data_gb_per_month: None,
        data_transfer_gb_per_month: None,
    })
}

/// Static nested rate table. Read-only once loaded.
///
/// Sections absent from the document load empty, so every lookup into them
/// reports a `PricingNotFound` rather than failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub ec2_pricing: RegionRates,
    #[serde(default)]
    pub eks_pricing: BTreeMap<String, f64>,
    #[serde(default)]
    pub nat_gateway_pricing: RegionRates,
    #[serde(default)]
    pub ebs_pricing: RegionRates,
    #[serde(default)]
    pub data_transfer_pricing: RegionRates,
    #[serde(default = "absent_assumptions")]
    pub default_assumptions: DefaultAssumptions,
}

impl PricingTable {
    /// Load and validate a pricing document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigurationError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table: PricingTable =
            serde_json::from_str(&content).map_err(|source| ConfigurationError::Parse {
                origin: Some(path.to_path_buf()),
                source,
            })?;
        table.validate()?;
        table.warn_defaulted();
        debug!(path = %path.display(), regions = table.ec2_pricing.len(), "loaded pricing table");
        Ok(table)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let table: PricingTable = serde_json::from_str(content)
            .map_err(|source| ConfigurationError::Parse { origin: None, source })?;
        table.validate()?;
        table.warn_defaulted();
        Ok(table)
    }

    fn warn_defaulted(&self) {
        let a = &self.default_assumptions;
        for key in &a.defaulted {
            let value = match key.as_str() {
                "monthly_hours" => a.monthly_hours,
                "nat_gateway_data_gb_per_month" => a.nat_gateway_data_gb_per_month,
                _ => a.data_transfer_gb_per_month,
            };
            warn!(key = %format!("default_assumptions.{key}"), value, "assumption missing from pricing table, using default");
        }
    }

    /// The table bundled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PRICING_JSON)
    }

    /// Every rate and assumption must be non-negative.
    pub fn validate(&self) -> Result<()> {
        let nested = [
            ("ec2_pricing", &self.ec2_pricing),
            ("nat_gateway_pricing", &self.nat_gateway_pricing),
            ("ebs_pricing", &self.ebs_pricing),
            ("data_transfer_pricing", &self.data_transfer_pricing),
        ];
        for (category, regions) in nested {
            for (region, rates) in regions {
                for (key, &value) in rates {
                    check_rate(&[category, region.as_str(), key.as_str()], value)?;
                }
            }
        }
        for (region, &value) in &self.eks_pricing {
            check_rate(&["eks_pricing", region.as_str()], value)?;
        }

        let a = &self.default_assumptions;
        check_rate(&["default_assumptions", "monthly_hours"], a.monthly_hours)?;
        check_rate(
            &["default_assumptions", "nat_gateway_data_gb_per_month"],
            a.nat_gateway_data_gb_per_month,
        )?;
        check_rate(
            &["default_assumptions", "data_transfer_gb_per_month"],
            a.data_transfer_gb_per_month,
        )?;
        Ok(())
    }

    // ── lookups ───────────────────────────────────────────────────────────────

    pub fn ec2_hourly(&self, region: &str, instance_type: &str) -> Lookup<f64> {
        nested_rate(&self.ec2_pricing, "ec2_pricing", region, instance_type)
    }

    pub fn eks_hourly(&self, region: &str) -> Lookup<f64> {
        self.eks_pricing
            .get(region)
            .copied()
            .ok_or_else(|| miss(&["eks_pricing", region]))
    }

    pub fn nat_gateway_rate(&self, region: &str, key: &str) -> Lookup<f64> {
        nested_rate(&self.nat_gateway_pricing, "nat_gateway_pricing", region, key)
    }

    pub fn ebs_per_gb_month(&self, region: &str, volume_type: &str) -> Lookup<f64> {
        nested_rate(&self.ebs_pricing, "ebs_pricing", region, volume_type)
    }

    pub fn data_transfer_per_gb(&self, region: &str, destination: &str) -> Lookup<f64> {
        nested_rate(&self.data_transfer_pricing, "data_transfer_pricing", region, destination)
    }

    // ── introspection ─────────────────────────────────────────────────────────

    /// Regions with compute pricing, sorted.
    pub fn regions(&self) -> Vec<&str> {
        self.ec2_pricing.keys().map(String::as_str).collect()
    }

    /// Instance types priced in `region` with their hourly rate, sorted by name.
    pub fn instance_types(&self, region: &str) -> Vec<(&str, f64)> {
        self.ec2_pricing
            .get(region)
            .map(|rates| rates.iter().map(|(k, v)| (k.as_str(), *v)).collect())
            .unwrap_or_default()
    }

    pub fn volume_types(&self, region: &str) -> Vec<&str> {
        self.ebs_pricing
            .get(region)
            .map(|rates| rates.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

fn nested_rate(
    table: &RegionRates,
    category: &str,
    region: &str,
    key: &str,
) -> Lookup<f64> {
    let rates = table
        .get(region)
        .ok_or_else(|| miss(&[category, region]))?;
    rates
        .get(key)
        .copied()
        .ok_or_else(|| miss(&[category, region, key]))
}

fn miss(segments: &[&str]) -> PricingNotFound {
    let e = PricingNotFound::new(segments);
    debug!(path = %e.path, "price lookup miss");
    e
}

fn check_rate(segments: &[&str], value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NegativeRate {
            key_path: segments.join("."),
            value,
        })
    }
}
