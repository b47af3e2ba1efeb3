use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
use commands::{estimate, list, scenarios};

#[derive(Parser)]
#[command(
    name = "ekscost",
    version = "0.1.0",
    author,
    about = "Estimate the monthly and yearly cost of an EKS cluster",
    long_about = r#"ekscost prices an EKS cluster (worker nodes, control plane, NAT gateway,
EBS volumes and internet egress) from a static on-demand pricing table.

Run without a subcommand to price the example cluster (3x t3.medium in us-west-2).

Quick start:
  ekscost                                              # example cluster report
  ekscost estimate --instance-type m5.large --nodes 4  # price a custom cluster
  ekscost estimate --config cluster.toml --format json
  ekscost scenarios                                    # compare dev/prod/perf/EU clusters
  ekscost list instances --region eu-west-1            # what is priced

Pricing table: --pricing <file>, $EKSCOST_PRICING, ./cost-estimation.json,
or the bundled table, in that order."#
)]
pub struct Cli {
    /// Pricing table (JSON)
    #[arg(long, global = true, env = "EKSCOST_PRICING")]
    pub pricing: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a single cluster configuration
    Estimate(estimate::EstimateArgs),

    /// Price and compare the example scenarios
    Scenarios(scenarios::ScenariosArgs),

    /// Inspect the pricing table
    List(list::ListArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

// Logs go to stderr so reports on stdout stay pipeable.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let estimator = config::load_estimator(cli.pricing.as_deref())?;

    match cli.command {
        None => estimate::run_example(&estimator),
        Some(Commands::Estimate(args)) => estimate::run(args, &estimator),
        Some(Commands::Scenarios(args)) => scenarios::run(args, &estimator),
        Some(Commands::List(args)) => list::run(args, &estimator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["ekscost"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn estimate_flags_parse() {
        let cli = Cli::try_parse_from([
            "ekscost", "estimate", "--region", "eu-west-1", "--nodes", "4", "--strict", "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Estimate(args)) => {
                assert_eq!(args.region.as_deref(), Some("eu-west-1"));
                assert_eq!(args.nodes, Some(4));
                assert!(args.strict);
                assert_eq!(args.format, "json");
            }
            _ => panic!("expected estimate subcommand"),
        }
    }

    #[test]
    fn global_pricing_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["ekscost", "scenarios", "--pricing", "/tmp/p.json"]).unwrap();
        assert_eq!(cli.pricing, Some(PathBuf::from("/tmp/p.json")));
    }
}
