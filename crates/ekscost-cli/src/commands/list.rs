use anyhow::Result;
use clap::{Args, Subcommand};
use ekscost_core::{CostEstimator, DEFAULT_REGION};
use ekscost_report::terminal;

#[derive(Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub subcommand: ListSubcommand,
}

#[derive(Subcommand)]
pub enum ListSubcommand {
    /// Regions with compute pricing
    Regions,

    /// Instance types and hourly rates for a region
    Instances {
        /// Region to list
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
    },
}

pub fn run(args: ListArgs, estimator: &CostEstimator) -> Result<i32> {
    match args.subcommand {
        ListSubcommand::Regions => terminal::print_regions(estimator.pricing()),
        ListSubcommand::Instances { region } => {
            terminal::print_instances(estimator.pricing(), &region)
        }
    }
    Ok(0)
}
