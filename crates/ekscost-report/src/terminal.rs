use colored::Colorize;
use ekscost_core::*;

// ── formatting helpers ────────────────────────────────────────────────────────

pub fn fmt_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Unit rates keep more precision: t3.small is $0.0208/hr.
pub fn fmt_rate(rate: f64) -> String {
    format!("${:.4}", rate)
}

pub fn fmt_hourly(hourly: Option<f64>) -> String {
    match hourly {
        Some(h) => format!("{}/hr", fmt_rate(h)),
        None => "-".to_string(),
    }
}

fn header(title: &str) -> String {
    let rule = 64usize.saturating_sub(title.chars().count() + 4);
    format!("── {} {}", title, "─".repeat(rule))
}

// ── single estimate ───────────────────────────────────────────────────────────

pub fn print_estimate(estimate: &Estimate) {
    match estimate {
        Estimate::Complete(b) => print_breakdown(b),
        Estimate::Failed { errors } => print_errors(errors),
    }
}

pub fn print_errors(errors: &[String]) {
    println!("{}", "Cost calculation errors:".red().bold());
    for e in errors {
        println!("  - {}", e);
    }
}

pub fn print_breakdown(b: &CostBreakdown) {
    let c = &b.configuration;

    println!("\n{}", header(&format!("Cluster Cost Estimate ({})", b.region)).bold());
    println!("  Instance Type : {}", c.instance_type.cyan());
    println!("  Node Count    : {}", c.node_count);
    println!("  Volume        : {} GB {}", c.volume_size_gb, c.volume_type);
    println!("  Monthly Total : {}", fmt_usd(b.total_cost.monthly).green().bold());
    println!("  Yearly Total  : {}", fmt_usd(b.total_cost.yearly).green().bold());

    println!("\n{}", header("Cost Breakdown").bold());
    println!(
        "  {:<20}  {:>14}  {:>12}  {:>12}",
        "COMPONENT".bold(),
        "HOURLY".bold(),
        "MONTHLY".bold(),
        "YEARLY".bold(),
    );
    for (category, cost) in b.cost_breakdown.iter() {
        println!(
            "  {:<20}  {:>14}  {:>12}  {:>12}",
            category.to_string(),
            fmt_hourly(cost.hourly),
            fmt_usd(cost.monthly).yellow(),
            fmt_usd(cost.yearly),
        );
        if let Some(dp) = cost.data_processing_monthly {
            println!("  {:<20}  {}", "", format!("incl. {} data processing", fmt_usd(dp)).dimmed());
        }
    }
    println!(
        "\n  {}",
        format!("Currency: {} · on-demand rates, no discounts applied", b.currency).dimmed()
    );
    println!();
}

// ── scenarios ─────────────────────────────────────────────────────────────────

pub fn print_scenarios(results: &[(Scenario, Estimate)]) {
    println!("{}", "=".repeat(60));
    println!("{}", "EKS Cluster Cost Estimation Examples".bold());
    println!("{}", "=".repeat(60));
    println!();

    for (i, (s, est)) in results.iter().enumerate() {
        let c = &s.config;
        println!("{}", format!("Example {}: {}", i + 1, s.title).bold());
        println!("{}", "-".repeat(60));
        println!(
            "Configuration: {}x {} in {}",
            c.desired_node_count, c.node_instance_type, c.region
        );
        match est {
            Estimate::Complete(b) => {
                println!("Monthly Cost: {}", fmt_usd(b.total_cost.monthly).green());
                println!("Yearly Cost: {}", fmt_usd(b.total_cost.yearly).green());
            }
            Estimate::Failed { errors } => print_errors(errors),
        }
        println!();
    }

    println!("{}", "=".repeat(60));
    println!("{}", "Cost Comparison Summary".bold());
    println!("{}", "=".repeat(60));
    for (s, est) in results {
        match est.breakdown() {
            Some(b) => println!(
                "{:<15} ${:>8.2}/month  ${:>10.2}/year",
                s.name, b.total_cost.monthly, b.total_cost.yearly
            ),
            None => println!("{:<15} {}", s.name, "pricing incomplete".red()),
        }
    }

    println!();
    println!("{}", "Note: Costs are estimates based on on-demand pricing.".dimmed());
    println!("{}", "Actual costs may vary based on usage patterns and discounts.".dimmed());
}

// ── pricing table ─────────────────────────────────────────────────────────────

pub fn print_regions(table: &PricingTable) {
    let regions = table.regions();
    if regions.is_empty() {
        println!("{}", "No regions priced.".yellow());
        return;
    }

    println!("{:<16}  {:>9}  {:>10}  {}", "REGION".bold(), "INSTANCES".bold(), "EKS".bold(), "VOLUMES".bold());
    println!("{}", "─".repeat(56));
    for region in regions {
        let eks = table
            .eks_hourly(region)
            .map(fmt_rate)
            .unwrap_or_else(|_| "-".to_string());
        println!(
            "{:<16}  {:>9}  {:>10}  {}",
            region.cyan(),
            table.instance_types(region).len(),
            eks,
            table.volume_types(region).join(", "),
        );
    }
}

pub fn print_instances(table: &PricingTable, region: &str) {
    let types = table.instance_types(region);
    if types.is_empty() {
        println!("{}", format!("No instance pricing for region '{}'.", region).yellow());
        return;
    }

    let hours = table.default_assumptions.monthly_hours;
    println!("\n{}", header(&format!("Instance Pricing ({})", region)).bold());
    println!("  {:<14}  {:>10}  {:>12}", "TYPE".bold(), "HOURLY".bold(), "MONTHLY".bold());
    for (name, rate) in types {
        println!(
            "  {:<14}  {:>10}  {:>12}",
            name,
            fmt_rate(rate),
            fmt_usd(rate * hours).yellow(),
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting() {
        assert_eq!(fmt_usd(214.454), "$214.45");
        assert_eq!(fmt_usd(0.0), "$0.00");
        assert_eq!(fmt_rate(0.0208), "$0.0208");
        assert_eq!(fmt_hourly(None), "-");
        assert_eq!(fmt_hourly(Some(0.1)), "$0.1000/hr");
    }

    #[test]
    fn header_is_padded_to_width() {
        let h = header("Cost Breakdown");
        assert!(h.starts_with("── Cost Breakdown "));
        assert_eq!(h.chars().count(), 64);
    }
}
