use anyhow::Result;
use ekscost_core::*;

const STYLE: &str = r#"
  :root {
    --bg: #0f1117; --surface: #1a1d27; --border: #2a2d3a;
    --text: #e2e8f0; --muted: #64748b; --accent: #7c6af7;
    --green: #4ade80; --yellow: #facc15; --red: #f87171;
    --cyan: #22d3ee;
    font-family: 'JetBrains Mono', 'Fira Code', monospace;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); min-height: 100vh; }
  .header { background: var(--surface); border-bottom: 1px solid var(--border);
    padding: 1.5rem 2rem; display: flex; align-items: center; gap: 1rem; }
  .header h1 { font-size: 1.25rem; font-weight: 700; color: var(--accent); }
  .header .badge { background: var(--border); padding: 0.2rem 0.6rem;
    border-radius: 4px; font-size: 0.75rem; color: var(--cyan); }
  .container { max-width: 960px; margin: 0 auto; padding: 2rem; }
  .kpi-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
    gap: 1rem; margin-bottom: 2rem; }
  .kpi { background: var(--surface); border: 1px solid var(--border);
    border-radius: 8px; padding: 1.25rem; }
  .kpi .label { font-size: 0.7rem; text-transform: uppercase; letter-spacing: 0.1em;
    color: var(--muted); margin-bottom: 0.4rem; }
  .kpi .value { font-size: 1.5rem; font-weight: 700; }
  .kpi .value.green { color: var(--green); }
  .kpi .value.cyan { color: var(--cyan); }
  .section { background: var(--surface); border: 1px solid var(--border);
    border-radius: 8px; margin-bottom: 1.5rem; overflow: hidden; }
  .section-header { padding: 0.875rem 1.25rem; border-bottom: 1px solid var(--border);
    font-size: 0.8rem; font-weight: 600; text-transform: uppercase;
    letter-spacing: 0.08em; color: var(--muted); }
  table { width: 100%; border-collapse: collapse; }
  th, td { padding: 0.6rem 1.25rem; text-align: left; border-bottom: 1px solid var(--border);
    font-size: 0.85rem; }
  th { font-size: 0.7rem; text-transform: uppercase; letter-spacing: 0.08em;
    color: var(--muted); }
  td.num, th.num { text-align: right; }
  tr:last-child td { border-bottom: none; }
  .error { padding: 0.75rem 1.25rem; color: var(--red); font-size: 0.85rem;
    border-bottom: 1px solid var(--border); }
  footer { text-align: center; padding: 2rem; color: var(--muted); font-size: 0.75rem; }
"#;

pub fn render_estimate(estimate: &Estimate) -> Result<String> {
    let (badge, body) = match estimate {
        Estimate::Complete(b) => (html_escape(&b.region), render_breakdown(b)),
        Estimate::Failed { errors } => ("incomplete".to_string(), render_errors(errors)),
    };

    Ok(format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>ekscost · {badge}</title>
<style>{style}</style>
</head>
<body>
<div class="header">
  <h1>ekscost</h1>
  <span class="badge">{badge}</span>
</div>
<div class="container">
{body}
</div>
<footer>Generated by ekscost · {timestamp} · on-demand pricing estimate</footer>
</body>
</html>"#,
        badge = badge,
        style = STYLE,
        body = body,
        timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC"),
    ))
}

fn render_breakdown(b: &CostBreakdown) -> String {
    let c = &b.configuration;
    let rows = b
        .cost_breakdown
        .iter()
        .map(|(category, cost)| {
            format!(
                r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                category,
                cost.hourly.map(|h| format!("${:.4}", h)).unwrap_or_else(|| "-".to_string()),
                fmt_usd_html(cost.monthly),
                fmt_usd_html(cost.yearly),
            )
        })
        .collect::<String>();

    format!(r#"  <div class="kpi-grid">
    <div class="kpi"><div class="label">Monthly Total</div><div class="value green">{monthly}</div></div>
    <div class="kpi"><div class="label">Yearly Total</div><div class="value green">{yearly}</div></div>
    <div class="kpi"><div class="label">Nodes</div><div class="value cyan">{nodes} × {instance}</div></div>
    <div class="kpi"><div class="label">Volume</div><div class="value">{volume} GB {volume_type}</div></div>
  </div>
  <div class="section">
    <div class="section-header">Cost Breakdown ({currency})</div>
    <table>
      <tr><th>Component</th><th class="num">Hourly</th><th class="num">Monthly</th><th class="num">Yearly</th></tr>
      {rows}
    </table>
  </div>"#,
        monthly = fmt_usd_html(b.total_cost.monthly),
        yearly = fmt_usd_html(b.total_cost.yearly),
        nodes = c.node_count,
        instance = html_escape(&c.instance_type),
        volume = c.volume_size_gb,
        volume_type = html_escape(&c.volume_type),
        currency = html_escape(&b.currency),
        rows = rows,
    )
}

fn render_errors(errors: &[String]) -> String {
    let items = errors
        .iter()
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .collect::<String>();
    format!(
        r#"  <div class="section">
    <div class="section-header">Cost calculation errors</div>
    {}
  </div>"#,
        items
    )
}

fn fmt_usd_html(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_page_lists_every_component() {
        let estimator = CostEstimator::builtin().unwrap();
        let html = render_estimate(&estimator.estimate(&ClusterConfig::example())).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        for category in Category::ALL {
            assert!(html.contains(&category.to_string()));
        }
        assert!(html.contains("$214.45"));
    }

    #[test]
    fn error_page_escapes_messages() {
        let est = Estimate::Failed {
            errors: vec!["EC2: Pricing not found for '<script>'".to_string()],
        };
        let html = render_estimate(&est).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
