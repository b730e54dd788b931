//! SVG line chart for the score history.

use crate::dashboard::HistorySeries;
use crate::utils::escape_html;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 400.0;
const LEFT: f64 = 50.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 20.0;
const BOTTOM: f64 = 40.0;
const MAX_X_LABELS: usize = 8;
const Y_TICKS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

/// Maps a series of scores onto plot coordinates, spaced evenly left to right.
pub fn chart_points(values: &[f64]) -> Vec<(f64, f64)> {
    let plot_width = WIDTH - LEFT - RIGHT;
    let step = if values.len() > 1 {
        plot_width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = if values.len() == 1 {
                LEFT + plot_width / 2.0
            } else {
                LEFT + step * i as f64
            };
            (x, y_for(value))
        })
        .collect()
}

fn y_for(value: f64) -> f64 {
    let plot_height = HEIGHT - TOP - BOTTOM;
    let clamped = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    };
    TOP + (1.0 - clamped / 100.0) * plot_height
}

/// Indices that get a date label; never more than `MAX_X_LABELS`.
fn label_indices(len: usize) -> Vec<usize> {
    if len <= MAX_X_LABELS {
        return (0..len).collect();
    }
    let stride = len.div_ceil(MAX_X_LABELS);
    let mut picked: Vec<usize> = (0..len).step_by(stride).collect();
    if picked.last() != Some(&(len - 1)) {
        picked.push(len - 1);
    }
    picked
}

/// Renders every series in `history` on shared axes. Series that are not
/// visible carry `display="none"` until the page switches to them.
pub fn render_chart(history: &[HistorySeries]) -> String {
    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {w} {h}" preserveAspectRatio="none" role="img" aria-label="Performance history">"#,
        w = WIDTH,
        h = HEIGHT
    );

    for tick in Y_TICKS {
        let y = y_for(tick);
        svg.push_str(&format!(
            r##"<line x1="{x1}" x2="{x2}" y1="{y:.1}" y2="{y:.1}" stroke="#f1f5f9" stroke-dasharray="3 3"/><text x="{tx}" y="{ty:.1}" class="axis" text-anchor="end">{tick}</text>"##,
            x1 = LEFT,
            x2 = WIDTH - RIGHT,
            tx = LEFT - 8.0,
            ty = y + 4.0,
        ));
    }

    // All series share the same timestamps; the first one labels the x axis.
    if let Some(first) = history.first() {
        let xs: Vec<f64> = chart_points(&vec![0.0; first.points.len()])
            .into_iter()
            .map(|(x, _)| x)
            .collect();
        for i in label_indices(first.points.len()) {
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{y}" class="axis" text-anchor="middle">{date}</text>"#,
                x = xs[i],
                y = HEIGHT - BOTTOM + 20.0,
                date = first.points[i].timestamp.format("%Y-%m-%d"),
            ));
        }
    }

    for series in history {
        svg.push_str(&render_series(series));
    }

    svg.push_str("</svg>");
    svg
}

fn render_series(series: &HistorySeries) -> String {
    let color = series.category.color();
    let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
    let points = chart_points(&values);

    let mut group = format!(
        r#"<g class="series" data-metric="{key}"{display}>"#,
        key = series.category.key(),
        display = if series.visible { "" } else { r#" display="none""# },
    );
    if points.len() > 1 {
        let path: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect();
        group.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{points}"/>"#,
            points = path.join(" "),
        ));
    }
    for ((x, y), point) in points.iter().zip(&series.points) {
        group.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"><title>{when} · {url} · {score:.1}</title></circle>"#,
            when = point.timestamp.format("%Y-%m-%d %H:%M"),
            url = escape_html(&point.url),
            score = point.value,
        ));
    }
    group.push_str("</g>");
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::HistoryPoint;
    use crate::models::AuditCategory;
    use chrono::DateTime;

    #[test]
    fn points_spread_across_the_plot() {
        let points = chart_points(&[0.0, 50.0, 100.0]);
        assert_eq!(points[0], (LEFT, HEIGHT - BOTTOM));
        assert_eq!(points[1].0, LEFT + (WIDTH - LEFT - RIGHT) / 2.0);
        assert_eq!(points[2], (WIDTH - RIGHT, TOP));
        assert!(points[1].1 > points[2].1);
    }

    #[test]
    fn single_point_is_centered() {
        let points = chart_points(&[75.0]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].0, LEFT + (WIDTH - LEFT - RIGHT) / 2.0);
    }

    #[test]
    fn label_count_is_bounded() {
        assert_eq!(label_indices(3), vec![0, 1, 2]);
        let picked = label_indices(30);
        assert!(picked.len() <= MAX_X_LABELS + 1);
        assert_eq!(picked.first(), Some(&0));
        assert_eq!(picked.last(), Some(&29));
    }

    fn series(category: AuditCategory, visible: bool, values: &[f64]) -> HistorySeries {
        HistorySeries {
            category,
            visible,
            points: values
                .iter()
                .enumerate()
                .map(|(i, &value)| HistoryPoint {
                    timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                    url: format!("https://site{}.test", i),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn only_the_visible_series_is_displayed() {
        let svg = render_chart(&[
            series(AuditCategory::Performance, false, &[10.0, 40.0]),
            series(AuditCategory::Seo, true, &[50.0, 95.0]),
        ]);

        assert!(svg.contains(r#"<g class="series" data-metric="performance" display="none">"#));
        assert!(svg.contains(r#"<g class="series" data-metric="seo">"#));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches(r#"display="none""#).count(), 1);
    }
}
