//! Prices a handful of cluster shapes and prints a comparison.
//!
//! cargo run -p ekscost-core --example compare_clusters

use ekscost_core::{example_scenarios, CostEstimator, Estimate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let estimator = CostEstimator::builtin()?;
    let rule = "=".repeat(60);
    let mut summary = Vec::new();

    println!("{}", rule);
    println!("EKS Cluster Cost Estimation Examples");
    println!("{}", rule);
    println!();

    for (i, s) in example_scenarios().into_iter().enumerate() {
        let c = &s.config;
        println!("Example {}: {}", i + 1, s.title);
        println!("{}", "-".repeat(60));
        println!("Configuration: {}x {} in {}", c.desired_node_count, c.node_instance_type, c.region);
        match estimator.estimate(c) {
            Estimate::Complete(b) => {
                println!("Monthly Cost: ${:.2}", b.total_cost.monthly);
                println!("Yearly Cost: ${:.2}", b.total_cost.yearly);
                summary.push((s.name, b.total_cost.monthly, b.total_cost.yearly));
            }
            Estimate::Failed { errors } => {
                for e in errors {
                    println!("  - {}", e);
                }
            }
        }
        println!();
    }

    println!("{}", rule);
    println!("Cost Comparison Summary");
    println!("{}", rule);
    for (name, monthly, yearly) in summary {
        println!("{:<15} ${:>8.2}/month  ${:>10.2}/year", name, monthly, yearly);
    }
    println!();
    println!("Note: Costs are estimates based on on-demand pricing.");
    println!("Actual costs may vary based on usage patterns and discounts.");
    Ok(())
}
