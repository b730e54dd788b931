use crate::dashboard::{chart, Dashboard};
use crate::models::{AuditCategory, HistoryStats, ScoreStats};
use crate::utils::escape_html;

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f8fafc; color: #0f172a; }
header { background: white; border-bottom: 1px solid #e2e8f0; }
header div, main { max-width: 1200px; margin: 0 auto; padding: 2rem 1rem; }
h1 { margin: 0; font-size: 2.25rem; color: #7c3aed; }
h2 { margin: 0 0 1.5rem; font-size: 1.25rem; color: #7c3aed; }
.subtitle { margin-top: .5rem; color: #475569; }
.panel { background: white; border: 1px solid #e2e8f0; border-radius: 1rem; padding: 1.5rem; margin-bottom: 2rem; }
form { display: flex; gap: 1rem; flex-wrap: wrap; }
form input[type=url] { flex: 1; min-width: 16rem; padding: .75rem 1rem; border: 1px solid #e2e8f0; border-radius: .75rem; background: #f8fafc; }
form button { padding: .75rem 1.5rem; border: 0; border-radius: .75rem; background: #8b5cf6; color: white; font-weight: 600; cursor: pointer; }
form button:disabled { opacity: .5; cursor: not-allowed; }
.error { margin-top: 1rem; padding: .75rem; border-radius: .75rem; background: #fff1f2; color: #f43f5e; }
.empty { color: #64748b; text-align: center; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1.5rem; margin-bottom: 2rem; }
.card { background: white; border: 1px solid #e2e8f0; border-radius: 1rem; padding: 1.5rem; }
.card .head { display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 1rem; }
.card .score { font-size: 1.5rem; font-weight: 700; }
.bar { height: .5rem; background: #f1f5f9; border-radius: 999px; overflow: hidden; }
.bar div { height: 100%; }
.good .score { color: #10b981; } .good .bar div { background: linear-gradient(to right, #34d399, #14b8a6); }
.needs-improvement .score { color: #f59e0b; } .needs-improvement .bar div { background: linear-gradient(to right, #fbbf24, #f97316); }
.poor .score { color: #f43f5e; } .poor .bar div { background: linear-gradient(to right, #fb7185, #ef4444); }
.tiles { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1.5rem; }
.tile { padding: 1rem; border-radius: .75rem; background: #f8fafc; border: 1px solid #e2e8f0; }
.tile .label { font-size: .875rem; color: #64748b; margin: 0; }
.tile .value { font-size: 1.125rem; font-weight: 600; margin: .25rem 0 0; }
.history-head { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; margin-bottom: 1.5rem; }
.history-head h2 { margin: 0; }
.metrics button { padding: .5rem 1rem; border: 0; border-radius: .75rem; background: #f1f5f9; color: #475569; cursor: pointer; }
.metrics button.active { background: #ede9fe; color: #6d28d9; }
.chart { width: 100%; height: 400px; }
.chart .axis { font-size: 12px; fill: #94a3b8; }
.chart .series[display=none] { display: none; }
table.stats { width: 100%; border-collapse: collapse; margin-top: 1.5rem; font-size: .875rem; }
table.stats th, table.stats td { text-align: right; padding: .5rem; border-top: 1px solid #f1f5f9; }
table.stats th:first-child, table.stats td:first-child { text-align: left; }
"#;

const SCRIPT: &str = r#"
document.querySelector('form.check').addEventListener('submit', function () {
  var button = this.querySelector('button');
  button.disabled = true;
  button.textContent = 'Analyzing...';
});
document.querySelectorAll('.metrics button').forEach(function (button) {
  button.addEventListener('click', function () {
    var metric = button.dataset.metric;
    document.querySelectorAll('.metrics button').forEach(function (b) {
      b.classList.toggle('active', b === button);
    });
    document.querySelectorAll('.chart .series').forEach(function (g) {
      if (g.dataset.metric === metric) {
        g.removeAttribute('display');
      } else {
        g.setAttribute('display', 'none');
      }
    });
    document.querySelector('form.check input[name=metric]').value = metric;
    history.replaceState(null, '', '?metric=' + metric);
  });
});
"#;

impl Dashboard {
    /// Full HTML page. `stats` adds the summary table under the chart.
    pub fn render(&self, stats: Option<&HistoryStats>) -> String {
        let body = if self.reports().is_empty() {
            r#"<div class="panel empty">No reports yet. Analyze a website to get started.</div>"#
                .to_string()
        } else {
            format!(
                "{}{}{}",
                self.render_scorecards(),
                self.render_metric_tiles(),
                self.render_history(stats)
            )
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Web Performance Checker</title>
<style>{style}</style>
</head>
<body>
<header><div>
<h1>Web Performance Checker</h1>
<p class="subtitle">Analyze and optimize your website's performance metrics</p>
</div></header>
<main>
{form}
{body}
</main>
<script>{script}</script>
</body>
</html>"#,
            style = STYLE,
            form = self.render_form(),
            body = body,
            script = SCRIPT,
        )
    }

    fn render_form(&self) -> String {
        let (disabled, label) = if self.is_busy() {
            (" disabled", "Analyzing...")
        } else {
            ("", "Analyze Website")
        };
        let error = self
            .error()
            .map(|message| format!(r#"<div class="error" role="alert">{}</div>"#, escape_html(message)))
            .unwrap_or_default();

        format!(
            r#"<section class="panel">
<form class="check" method="post" action="/">
<input type="url" name="url" value="{url}" placeholder="Enter website URL (e.g., https://example.com)" required>
<input type="hidden" name="metric" value="{metric}">
<button type="submit"{disabled}>{label}</button>
</form>
{error}
</section>"#,
            url = escape_html(self.url_input()),
            metric = self.active_metric().key(),
        )
    }

    fn render_scorecards(&self) -> String {
        let cards: String = self
            .scorecards()
            .iter()
            .map(|card| {
                format!(
                    r#"<div class="card {band}" data-metric="{key}">
<div class="head"><h3>{label}</h3><span class="score">{display}</span></div>
<div class="bar"><div style="width: {width:.1}%"></div></div>
</div>"#,
                    band = card.band.css_class(),
                    key = card.category.key(),
                    label = card.category.label(),
                    display = card.display,
                    width = card.bar_width,
                )
            })
            .collect();
        format!(r#"<section class="cards">{}</section>"#, cards)
    }

    fn render_metric_tiles(&self) -> String {
        let tiles: String = self
            .metric_tiles()
            .iter()
            .map(|tile| {
                format!(
                    r#"<div class="tile"><p class="label">{}</p><p class="value">{}</p></div>"#,
                    tile.label, tile.value
                )
            })
            .collect();
        format!(
            r#"<section class="panel"><h2>Performance Metrics</h2><div class="tiles">{}</div></section>"#,
            tiles
        )
    }

    fn render_history(&self, stats: Option<&HistoryStats>) -> String {
        let active = self.active_metric();
        let buttons: String = AuditCategory::ALL
            .iter()
            .map(|category| {
                format!(
                    r#"<button type="button" data-metric="{key}"{class}>{label}</button>"#,
                    key = category.key(),
                    class = if *category == active { r#" class="active""# } else { "" },
                    label = category.label(),
                )
            })
            .collect();

        format!(
            r#"<section class="panel">
<div class="history-head"><h2>Performance History</h2><div class="metrics">{buttons}</div></div>
{chart}
{stats}
</section>"#,
            chart = chart::render_chart(&self.history()),
            stats = stats.map(render_stats).unwrap_or_default(),
        )
    }
}

fn render_stats(stats: &HistoryStats) -> String {
    let rows = [
        (AuditCategory::Performance, &stats.category_stats.performance),
        (AuditCategory::Accessibility, &stats.category_stats.accessibility),
        (AuditCategory::BestPractices, &stats.category_stats.best_practices),
        (AuditCategory::Seo, &stats.category_stats.seo),
    ];
    let body: String = rows
        .iter()
        .filter_map(|&(category, s)| s.as_ref().map(|s| stats_row(category, s)))
        .collect();

    let best = stats
        .best_performance_url
        .as_deref()
        .map(|url| format!("<p>Best performance: {}</p>", escape_html(url)))
        .unwrap_or_default();
    let worst = stats
        .worst_performance_url
        .as_deref()
        .map(|url| format!("<p>Worst performance: {}</p>", escape_html(url)))
        .unwrap_or_default();

    format!(
        r#"<table class="stats"><thead><tr><th>{count} runs</th><th>Min</th><th>Median</th><th>Max</th><th>Std dev</th></tr></thead><tbody>{body}</tbody></table>{best}{worst}"#,
        count = stats.count,
    )
}

fn stats_row(category: AuditCategory, s: &ScoreStats) -> String {
    format!(
        "<tr><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>",
        category.label(),
        s.min,
        s.median,
        s.max,
        s.std_dev
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewReport, StoredReport};
    use crate::services::summarize;
    use chrono::Utc;
    use uuid::Uuid;

    fn stored(url: &str) -> StoredReport {
        StoredReport::new(
            Uuid::new_v4(),
            Utc::now(),
            NewReport {
                url: url.to_string(),
                performance: 87.5,
                accessibility: 100.0,
                best_practices: 91.0,
                seo: 45.0,
                load_time: 1234.0,
                resource_size: 2097152.0,
                request_count: 42,
            },
        )
    }

    #[test]
    fn empty_state_has_no_cards() {
        let html = Dashboard::loaded(Ok(Vec::new())).render(None);
        assert!(html.contains("No reports yet"));
        assert!(!html.contains(r#"class="card"#));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn renders_cards_tiles_and_chart() {
        let reports = vec![stored("https://example.com")];
        let stats = summarize(&reports);
        let html = Dashboard::loaded(Ok(reports)).render(Some(&stats));

        assert!(html.contains(r#"<div class="card needs-improvement" data-metric="performance">"#));
        assert!(html.contains(r#"<div class="card good" data-metric="accessibility">"#));
        assert!(html.contains(r#"<div class="card poor" data-metric="seo">"#));
        assert!(html.contains("87.5%"));
        assert!(html.contains("1.23s"));
        assert!(html.contains("2.00 MB"));
        assert!(html.contains(r#"<p class="value">42</p>"#));
        assert!(html.contains(r#"<g class="series" data-metric="performance">"#));
        assert!(html.contains(r#"<g class="series" data-metric="seo" display="none">"#));
        assert!(html.contains("1 runs"));
    }

    #[test]
    fn metric_switch_hides_every_other_series() {
        let reports = vec![stored("https://a.test"), stored("https://b.test")];
        let mut dashboard = Dashboard::loaded(Ok(reports));
        dashboard.select_metric(AuditCategory::Accessibility);
        let html = dashboard.render(None);

        assert_eq!(html.matches(r#"<g class="series""#).count(), 4);
        assert_eq!(
            html.matches(r#"<g class="series" data-metric="accessibility">"#)
                .count(),
            1
        );
        assert_eq!(html.matches(r#"display="none">"#).count(), 3);
        assert!(html.contains(".chart .series[display=none] { display: none; }"));
        assert!(html.contains("g.setAttribute('display', 'none')"));
        assert!(html.contains("g.removeAttribute('display')"));
        assert!(!html.contains("g.hidden"));
        assert!(html.contains(r#"<button type="button" data-metric="accessibility" class="active">"#));
    }

    #[test]
    fn error_and_input_are_escaped() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_submit(r#""><script>alert(1)</script>"#);
        dashboard.finish_submit(Err("<b>boom</b>".to_string()));
        let html = dashboard.render(None);

        assert!(html.contains("&lt;b&gt;boom&lt;/b&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn busy_page_disables_the_button() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_submit("https://example.com");
        let html = dashboard.render(None);
        assert!(html.contains(r#"<button type="submit" disabled>Analyzing...</button>"#));
    }
}
