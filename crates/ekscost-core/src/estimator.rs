use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Lookup, Result};
use crate::pricing::{DefaultAssumptions, PricingTable};
use crate::schema::*;

/// Prices clusters against one immutable pricing table.
///
/// Each category function returns `Err(PricingNotFound)` for a missing price
/// instead of failing the whole call; `estimate` collects those misses.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    pricing: PricingTable,
}

impl CostEstimator {
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(PricingTable::load(path)?))
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::new(PricingTable::builtin()?))
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    fn assumptions(&self) -> &DefaultAssumptions {
        &self.pricing.default_assumptions
    }

    /// Worker nodes: scales linearly with `node_count`.
    pub fn ec2_cost(&self, instance_type: &str, node_count: u32, region: &str) -> Lookup<CategoryCost> {
        let rate = self.pricing.ec2_hourly(region, instance_type)?;
        Ok(CategoryCost::from_hourly(
            rate * node_count as f64,
            self.assumptions().monthly_hours,
        ))
    }

    /// Control plane: a flat hourly fee per cluster.
    pub fn eks_cost(&self, region: &str) -> Lookup<CategoryCost> {
        let rate = self.pricing.eks_hourly(region)?;
        Ok(CategoryCost::from_hourly(rate, self.assumptions().monthly_hours))
    }

    /// NAT gateway: hourly fee plus data processing on the assumed monthly volume.
    pub fn nat_gateway_cost(&self, region: &str) -> Lookup<CategoryCost> {
        let hourly = self.pricing.nat_gateway_rate(region, "hourly")?;
        let per_gb = self.pricing.nat_gateway_rate(region, "data_processing_per_gb")?;
        let a = self.assumptions();

        let data_processing_monthly = per_gb * a.nat_gateway_data_gb_per_month;
        let monthly = hourly * a.monthly_hours + data_processing_monthly;
        Ok(CategoryCost {
            hourly: Some(hourly),
            monthly,
            yearly: monthly * 12.0,
            data_processing_monthly: Some(data_processing_monthly),
        })
    }

    /// Node volumes. `volume_type` falls back to gp3.
    pub fn ebs_cost(&self, volume_size_gb: u32, region: &str, volume_type: Option<&str>) -> Lookup<CategoryCost> {
        let volume_type = volume_type.unwrap_or(DEFAULT_VOLUME_TYPE);
        let per_gb_month = self.pricing.ebs_per_gb_month(region, volume_type)?;
        Ok(CategoryCost::from_monthly(per_gb_month * volume_size_gb as f64))
    }

    /// Egress to the internet. `data_gb` falls back to the table's assumption.
    pub fn data_transfer_cost(&self, region: &str, data_gb: Option<f64>) -> Lookup<CategoryCost> {
        let data_gb = data_gb.unwrap_or(self.assumptions().data_transfer_gb_per_month);
        let per_gb = self.pricing.data_transfer_per_gb(region, "internet")?;
        Ok(CategoryCost::from_monthly(per_gb * data_gb))
    }

    /// Price every component of `config`.
    ///
    /// All-or-nothing: if any component has no price the result carries every
    /// miss (prefixed with its category label) and no totals.
    pub fn estimate(&self, config: &ClusterConfig) -> Estimate {
        let region = config.region.as_str();
        debug!(
            region,
            instance_type = %config.node_instance_type,
            nodes = config.desired_node_count,
            volume_gb = config.ebs_volume_size_gb,
            "estimating cluster cost"
        );

        let ec2 = self.ec2_cost(&config.node_instance_type, config.desired_node_count, region);
        let eks = self.eks_cost(region);
        let nat = self.nat_gateway_cost(region);
        let ebs = self.ebs_cost(config.ebs_volume_size_gb, region, Some(config.ebs_volume_type.as_str()));
        let data = self.data_transfer_cost(region, config.data_transfer_gb_per_month);

        let errors: Vec<String> = [
            (Category::Ec2Instances, &ec2),
            (Category::EksControlPlane, &eks),
            (Category::NatGateway, &nat),
            (Category::EbsVolumes, &ebs),
            (Category::DataTransfer, &data),
        ]
        .iter()
        .filter_map(|(category, result)| match result {
            Ok(_) => None,
            Err(e) => Some(format!("{}: {}", category.label(), e)),
        })
        .collect();

        match (ec2, eks, nat, ebs, data) {
            (Ok(ec2), Ok(eks), Ok(nat), Ok(ebs), Ok(data)) => {
                let costs = CategoryCosts {
                    ec2_instances: ec2,
                    eks_control_plane: eks,
                    nat_gateway: nat,
                    ebs_volumes: ebs,
                    data_transfer: data,
                };
                let total_monthly = costs.monthly_sum();
                let total_yearly = total_monthly * 12.0;

                Estimate::Complete(CostBreakdown {
                    region: config.region.clone(),
                    configuration: ConfigurationEcho {
                        instance_type: config.node_instance_type.clone(),
                        node_count: config.desired_node_count,
                        volume_size_gb: config.ebs_volume_size_gb,
                        volume_type: config.ebs_volume_type.clone(),
                    },
                    cost_breakdown: costs,
                    total_cost: TotalCost {
                        monthly: round_cents(total_monthly),
                        yearly: round_cents(total_yearly),
                    },
                    currency: "USD".to_string(),
                })
            }
            _ => {
                warn!(count = errors.len(), region, "missing prices, no estimate produced");
                Estimate::Failed { errors }
            }
        }
    }
}
