use anyhow::Result;
use clap::Args;
use ekscost_core::{example_scenarios, CostEstimator, Estimate, Scenario};
use ekscost_report::{json as jreport, terminal};

#[derive(Args)]
pub struct ScenariosArgs {
    /// Output format: table, json
    #[arg(long, default_value = "table")]
    pub format: String,
}

pub fn price_scenarios(estimator: &CostEstimator) -> Vec<(Scenario, Estimate)> {
    example_scenarios()
        .into_iter()
        .map(|s| {
            let est = estimator.estimate(&s.config);
            (s, est)
        })
        .collect()
}

pub fn run(args: ScenariosArgs, estimator: &CostEstimator) -> Result<i32> {
    let results = price_scenarios(estimator);
    match args.format.as_str() {
        "json" => println!("{}", jreport::render_scenarios(&results)?),
        _ => terminal::print_scenarios(&results),
    }
    Ok(0)
}
