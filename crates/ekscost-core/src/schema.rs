use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_INSTANCE_TYPE: &str = "t3.medium";
pub const DEFAULT_NODE_COUNT: u32 = 2;
pub const DEFAULT_VOLUME_SIZE_GB: u32 = 50;
/// General-purpose SSD tier.
pub const DEFAULT_VOLUME_TYPE: &str = "gp3";

/// Parameters of a hypothetical cluster to price.
///
/// Every field has a literal default, so an empty document (or
/// `ClusterConfig::default()`) describes a small two-node cluster in us-west-2.
/// File keys may be snake_case or camelCase (`nodeInstanceType`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub region: String,
    #[serde(alias = "nodeInstanceType")]
    pub node_instance_type: String,
    #[serde(alias = "desiredNodeCount")]
    pub desired_node_count: u32,
    #[serde(alias = "ebsVolumeSizeGb")]
    pub ebs_volume_size_gb: u32,
    #[serde(alias = "ebsVolumeType")]
    pub ebs_volume_type: String,
    /// Overrides `default_assumptions.data_transfer_gb_per_month`.
    #[serde(alias = "dataTransferGbPerMonth", skip_serializing_if = "Option::is_none")]
    pub data_transfer_gb_per_month: Option<f64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            node_instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
            desired_node_count: DEFAULT_NODE_COUNT,
            ebs_volume_size_gb: DEFAULT_VOLUME_SIZE_GB,
            ebs_volume_type: DEFAULT_VOLUME_TYPE.to_string(),
            data_transfer_gb_per_month: None,
        }
    }
}

impl ClusterConfig {
    pub fn new(region: &str, instance_type: &str, node_count: u32, volume_size_gb: u32) -> Self {
        Self {
            region: region.to_string(),
            node_instance_type: instance_type.to_string(),
            desired_node_count: node_count,
            ebs_volume_size_gb: volume_size_gb,
            ..Self::default()
        }
    }

    /// The configuration priced when the CLI runs without arguments.
    pub fn example() -> Self {
        Self::new("us-west-2", "t3.medium", 3, 50)
    }

    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(invalid("region", "must not be empty"));
        }
        if self.node_instance_type.trim().is_empty() {
            return Err(invalid("node_instance_type", "must not be empty"));
        }
        if self.desired_node_count == 0 {
            return Err(invalid("desired_node_count", "must be at least 1"));
        }
        if self.ebs_volume_type.trim().is_empty() {
            return Err(invalid("ebs_volume_type", "must not be empty"));
        }
        if let Some(gb) = self.data_transfer_gb_per_month {
            if !gb.is_finite() || gb < 0.0 {
                return Err(invalid(
                    "data_transfer_gb_per_month",
                    &format!("must be a non-negative number, got {}", gb),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ec2Instances,
    EksControlPlane,
    NatGateway,
    EbsVolumes,
    DataTransfer,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Ec2Instances,
        Category::EksControlPlane,
        Category::NatGateway,
        Category::EbsVolumes,
        Category::DataTransfer,
    ];

    /// Short label used to prefix error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ec2Instances => "EC2",
            Category::EksControlPlane => "EKS",
            Category::NatGateway => "NAT",
            Category::EbsVolumes => "EBS",
            Category::DataTransfer => "Data",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Ec2Instances => write!(f, "ec2_instances"),
            Category::EksControlPlane => write!(f, "eks_control_plane"),
            Category::NatGateway => write!(f, "nat_gateway"),
            Category::EbsVolumes => write!(f, "ebs_volumes"),
            Category::DataTransfer => write!(f, "data_transfer"),
        }
    }
}

/// Cost of one component. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<f64>,
    pub monthly: f64,
    pub yearly: f64,
    /// NAT gateway only: usage-based share of `monthly`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_processing_monthly: Option<f64>,
}

impl CategoryCost {
    /// From an hourly rate, projected over `monthly_hours`.
    pub fn from_hourly(hourly: f64, monthly_hours: f64) -> Self {
        let monthly = hourly * monthly_hours;
        Self {
            hourly: Some(hourly),
            monthly,
            yearly: monthly * 12.0,
            data_processing_monthly: None,
        }
    }

    /// For components billed per month only (storage, transfer).
    pub fn from_monthly(monthly: f64) -> Self {
        Self {
            hourly: None,
            monthly,
            yearly: monthly * 12.0,
            data_processing_monthly: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationEcho {
    pub instance_type: String,
    pub node_count: u32,
    pub volume_size_gb: u32,
    pub volume_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCosts {
    pub ec2_instances: CategoryCost,
    pub eks_control_plane: CategoryCost,
    pub nat_gateway: CategoryCost,
    pub ebs_volumes: CategoryCost,
    pub data_transfer: CategoryCost,
}

impl CategoryCosts {
    pub fn get(&self, category: Category) -> &CategoryCost {
        match category {
            Category::Ec2Instances => &self.ec2_instances,
            Category::EksControlPlane => &self.eks_control_plane,
            Category::NatGateway => &self.nat_gateway,
            Category::EbsVolumes => &self.ebs_volumes,
            Category::DataTransfer => &self.data_transfer,
        }
    }

    /// Categories in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryCost)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn monthly_sum(&self) -> f64 {
        self.iter().map(|(_, c)| c.monthly).sum()
    }
}

/// Totals, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalCost {
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub region: String,
    pub configuration: ConfigurationEcho,
    pub cost_breakdown: CategoryCosts,
    pub total_cost: TotalCost,
    pub currency: String,
}

/// Result of pricing one cluster: either every component priced, or the
/// full list of missing prices and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Estimate {
    Complete(CostBreakdown),
    Failed { errors: Vec<String> },
}

impl Estimate {
    pub fn is_complete(&self) -> bool {
        matches!(self, Estimate::Complete(_))
    }

    pub fn breakdown(&self) -> Option<&CostBreakdown> {
        match self {
            Estimate::Complete(b) => Some(b),
            Estimate::Failed { .. } => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Estimate::Complete(_) => &[],
            Estimate::Failed { errors } => errors,
        }
    }
}

/// Round to 2 decimal places, ties to even (0.125 -> 0.12, 0.375 -> 0.38).
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / 100.0
}
