use anyhow::Result;
use ekscost_core::*;

/// The estimate as-is: a breakdown record or `{"errors": [...]}`.
pub fn render_estimate(estimate: &Estimate) -> Result<String> {
    Ok(serde_json::to_string_pretty(estimate)?)
}

pub fn render_scenarios(results: &[(Scenario, Estimate)]) -> Result<String> {
    let scenarios: Vec<serde_json::Value> = results
        .iter()
        .map(|(s, est)| {
            serde_json::json!({
                "name": s.name,
                "title": s.title,
                "configuration": s.config,
                "estimate": est,
            })
        })
        .collect();

    let summary = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "currency": "USD",
        "scenarios": scenarios,
    });

    Ok(serde_json::to_string_pretty(&summary)?)
}
