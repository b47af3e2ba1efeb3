//! Properties of the aggregate estimate.

use ekscost_core::{round_cents, ClusterConfig, CostEstimator, Estimate, PricingTable};
use proptest::prelude::*;

fn estimator() -> CostEstimator {
    CostEstimator::builtin().expect("builtin pricing table")
}

fn priced_pair() -> impl Strategy<Value = (String, String)> {
    let table = PricingTable::builtin().expect("builtin pricing table");
    let pairs: Vec<(String, String)> = table
        .regions()
        .into_iter()
        .flat_map(|r| {
            table
                .instance_types(r)
                .into_iter()
                .map(move |(i, _)| (r.to_string(), i.to_string()))
                .collect::<Vec<_>>()
        })
        .collect();
    proptest::sample::select(pairs)
}

proptest! {
    #[test]
    fn compute_cost_is_linear_in_nodes(
        (region, instance) in priced_pair(),
        nodes in 1u32..500,
    ) {
        let e = estimator();
        let rate = e.pricing().ec2_hourly(&region, &instance).unwrap();
        let hours = e.pricing().default_assumptions.monthly_hours;
        let c = e.ec2_cost(&instance, nodes, &region).unwrap();

        let expected = rate * nodes as f64 * hours;
        prop_assert!((c.monthly - expected).abs() <= 1e-9 * expected.max(1.0));
        prop_assert_eq!(c.yearly, c.monthly * 12.0);
    }

    #[test]
    fn estimate_is_idempotent(
        (region, instance) in priced_pair(),
        nodes in 1u32..100,
        volume in 0u32..4000,
    ) {
        let e = estimator();
        let cfg = ClusterConfig::new(&region, &instance, nodes, volume);
        let first = e.estimate(&cfg);
        let second = e.estimate(&cfg);
        prop_assert!(first.is_complete());
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn unknown_instance_type_yields_only_errors(
        region in prop_oneof![Just("us-west-2"), Just("us-east-1"), Just("eu-west-1")],
        suffix in "[a-z]{3,8}",
    ) {
        let instance = format!("zz.{}", suffix);
        let est = estimator().estimate(&ClusterConfig::new(region, &instance, 2, 50));
        match est {
            Estimate::Failed { errors } => {
                prop_assert_eq!(errors.len(), 1);
                prop_assert!(errors[0].contains(&instance));
            }
            Estimate::Complete(_) => prop_assert!(false, "expected failure"),
        }
    }

    #[test]
    fn totals_are_rounded_sum_of_categories(
        (region, instance) in priced_pair(),
        nodes in 1u32..50,
        volume in 0u32..1000,
    ) {
        let est = estimator().estimate(&ClusterConfig::new(&region, &instance, nodes, volume));
        let b = est.breakdown().unwrap();
        let sum = b.cost_breakdown.monthly_sum();
        prop_assert!((b.total_cost.monthly - sum).abs() <= 0.005 + 1e-9);
        prop_assert!((b.total_cost.yearly - sum * 12.0).abs() <= 0.005 + 1e-9);
    }
}

#[test]
fn defaults_produce_valid_breakdown() {
    let est = estimator().estimate(&ClusterConfig::default());
    let b = est.breakdown().expect("defaults are priced");
    assert_eq!(b.region, "us-west-2");
    assert_eq!(b.configuration.instance_type, "t3.medium");
    assert_eq!(b.configuration.node_count, 2);
    assert_eq!(b.configuration.volume_size_gb, 50);
}

#[test]
fn documented_example_compute_cost() {
    let est = estimator().estimate(&ClusterConfig::new("us-west-2", "t3.medium", 3, 50));
    let b = est.breakdown().unwrap();
    assert!((b.cost_breakdown.ec2_instances.monthly - 91.104).abs() < 1e-9);
    let expected_yearly = round_cents(b.cost_breakdown.monthly_sum() * 12.0);
    assert_eq!(b.total_cost.yearly, expected_yearly);
}
