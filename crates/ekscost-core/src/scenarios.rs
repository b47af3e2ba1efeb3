use crate::schema::ClusterConfig;

/// A named cluster shape used for side-by-side comparisons.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub title: &'static str,
    pub config: ClusterConfig,
}

/// Dev, production, compute-heavy and EU clusters.
pub fn example_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "Dev Cluster",
            title: "Small Development Cluster",
            config: ClusterConfig::new("us-west-2", "t3.small", 2, 30),
        },
        Scenario {
            name: "Production",
            title: "Production Cluster",
            config: ClusterConfig::new("us-west-2", "t3.medium", 5, 100),
        },
        Scenario {
            name: "High-Perf",
            title: "High-Performance Cluster",
            config: ClusterConfig::new("us-east-1", "c5.2xlarge", 3, 200),
        },
        Scenario {
            name: "EU Region",
            title: "EU Region Cluster",
            config: ClusterConfig::new("eu-west-1", "t3.medium", 3, 50),
        },
    ]
}
