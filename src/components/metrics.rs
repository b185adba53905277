use leptos::prelude::*;

use crate::api::AnalysisResult;

/// One figure in the metrics grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
    pub tone: &'static str,
}

pub fn metric_tiles(result: &AnalysisResult) -> Vec<MetricTile> {
    vec![
        MetricTile {
            label: "Total Skills",
            value: result.total_skills().to_string(),
            tone: "neutral",
        },
        MetricTile {
            label: "Matches",
            value: result.matching_skills.to_string(),
            tone: "positive",
        },
        MetricTile {
            label: "Gaps",
            value: result.missing_skills.to_string(),
            tone: "negative",
        },
        MetricTile {
            label: "Coverage",
            value: result.coverage.to_string(),
            tone: "accent",
        },
    ]
}

#[component]
pub fn MetricsGrid(result: AnalysisResult) -> impl IntoView {
    view! {
        <div class="metrics-grid">
            <style>{include_str!("metrics.css")}</style>
            {metric_tiles(&result)
                .into_iter()
                .map(|tile| view! {
                    <div class=format!("metric-card metric-{}", tile.tone)>
                        <span class="metric-value">{tile.value}</span>
                        <span class="metric-label">{tile.label}</span>
                    </div>
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Percent;

    #[test]
    fn test_web_development_example() {
        let result = AnalysisResult {
            matching_skills: 12,
            missing_skills: 4,
            coverage: Percent(75.0),
            gaps: vec![
                "Docker".into(),
                "GraphQL".into(),
                "Kubernetes".into(),
                "Terraform".into(),
            ],
            ..Default::default()
        };

        let values: Vec<_> = metric_tiles(&result).into_iter().map(|t| t.value).collect();
        assert_eq!(values, vec!["16", "12", "4", "75%"]);
    }

    #[test]
    fn test_empty_result_shows_zeros() {
        let values: Vec<_> = metric_tiles(&AnalysisResult::default())
            .into_iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(values, vec!["0", "0", "0", "0%"]);
    }

    #[test]
    fn test_total_does_not_overflow_on_huge_counts() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"matchingSkills": 4294967295, "missingSkills": 1, "coverage": "100%"}"#,
        )
        .unwrap();

        let values: Vec<_> = metric_tiles(&result).into_iter().map(|t| t.value).collect();
        assert_eq!(values, vec!["4294967296", "4294967295", "1", "100%"]);
    }
}
