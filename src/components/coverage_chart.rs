//! Coverage and relevance rings plus a skill breakdown bar, drawn as SVG.

use std::f64::consts::PI;

use leptos::prelude::*;

use crate::api::{AnalysisResult, Percent};

const RING_RADIUS: f64 = 42.0;

/// `stroke-dasharray` lengths (filled, remainder) for a ring at `percent`.
pub fn ring_dash(percent: Percent) -> (f64, f64) {
    let circumference = 2.0 * PI * RING_RADIUS;
    let filled = circumference * percent.clamped() / 100.0;
    (filled, circumference - filled)
}

/// Each count as a share of the sum, in percent.
pub fn bar_shares(counts: &[u32]) -> Vec<f64> {
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|&c| c as f64 * 100.0 / total as f64)
        .collect()
}

#[component]
pub fn CoverageChart(result: AnalysisResult) -> impl IntoView {
    let segments = [
        ("Matched", result.matching_skills, "positive"),
        ("Missing", result.missing_skills, "negative"),
        ("Off-target", result.irrelevant_skills, "muted"),
    ];
    let shares = bar_shares(&segments.map(|(_, count, _)| count));

    view! {
        <div class="coverage-chart">
            <style>{include_str!("coverage_chart.css")}</style>
            <div class="rings">
                <Ring label="Coverage" percent=result.coverage tone="accent" />
                <Ring label="Relevance" percent=result.relevance tone="positive" />
            </div>
            <div class="breakdown">
                <div class="breakdown-bar">
                    {segments
                        .iter()
                        .zip(shares.iter())
                        .filter(|(_, share)| **share > 0.0)
                        .map(|((label, count, tone), share)| view! {
                            <div
                                class=format!("bar-segment bar-{}", tone)
                                style=format!("width: {:.2}%", share)
                                title=format!("{}: {}", label, count)
                            ></div>
                        })
                        .collect::<Vec<_>>()}
                </div>
                <ul class="breakdown-legend">
                    {segments
                        .iter()
                        .map(|(label, count, tone)| view! {
                            <li>
                                <span class=format!("legend-swatch bar-{}", tone)></span>
                                {format!("{} ({})", label, count)}
                            </li>
                        })
                        .collect::<Vec<_>>()}
                </ul>
            </div>
        </div>
    }
}

#[component]
fn Ring(label: &'static str, percent: Percent, tone: &'static str) -> impl IntoView {
    let (filled, rest) = ring_dash(percent);

    view! {
        <figure class="ring">
            <svg viewBox="0 0 100 100" width="120" height="120">
                <circle
                    class="ring-track"
                    cx="50"
                    cy="50"
                    r=RING_RADIUS.to_string()
                    fill="none"
                    stroke-width="10"
                ></circle>
                <circle
                    class=format!("ring-fill ring-{}", tone)
                    cx="50"
                    cy="50"
                    r=RING_RADIUS.to_string()
                    fill="none"
                    stroke-width="10"
                    stroke-linecap="round"
                    stroke-dasharray=format!("{:.2} {:.2}", filled, rest)
                    transform="rotate(-90 50 50)"
                ></circle>
                <text x="50" y="55" text-anchor="middle" class="ring-value">
                    {percent.to_string()}
                </text>
            </svg>
            <figcaption>{label}</figcaption>
        </figure>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_dash_covers_circumference() {
        let circumference = 2.0 * PI * RING_RADIUS;

        let (filled, rest) = ring_dash(Percent(75.0));
        assert!((filled - circumference * 0.75).abs() < 1e-9);
        assert!((filled + rest - circumference).abs() < 1e-9);

        assert_eq!(ring_dash(Percent(0.0)).0, 0.0);
        let (full, none) = ring_dash(Percent(120.0));
        assert!((full - circumference).abs() < 1e-9);
        assert!(none.abs() < 1e-9);
    }

    #[test]
    fn test_bar_shares() {
        let shares = bar_shares(&[12, 4, 4]);
        assert!((shares[0] - 60.0).abs() < 1e-9);
        assert!((shares[1] - 20.0).abs() < 1e-9);
        assert_eq!(bar_shares(&[0, 0, 0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bar_shares_with_huge_counts() {
        let shares = bar_shares(&[u32::MAX, u32::MAX]);
        assert!((shares[0] - 50.0).abs() < 1e-9);
        assert!((shares[1] - 50.0).abs() < 1e-9);
    }
}
