//! Skill-gap dashboard page.
//!
//! Pick a curriculum and a target career, run the analysis, then read the
//! metrics, charts, skill lists and the AI recommendation.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::analysis::{run_analysis, AnalysisState, SkillList, ViewEffect};
use crate::api::{AnalysisResult, HttpApi, OptionId};
use crate::components::coverage_chart::CoverageChart;
use crate::components::metrics::MetricsGrid;
use crate::components::option_select::OptionSelect;
use crate::components::recommendation_panel::RecommendationPanel;
use crate::components::skill_badges::SkillBadgeList;
use crate::config::AppConfig;
use crate::dom::{self, Deferred, ScrollAnimation};
use crate::options::{load_options, Dropdown, OptionsState};
use crate::skill_lists::{self, ToggleOutcome};

const RESULTS_ANCHOR: &str = "analysis-results";
const MATCHES_ANCHOR: &str = "matched-skills";
const GAPS_ANCHOR: &str = "skill-gaps";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let api = StoredValue::new_local(HttpApi::new(config));
    let options = RwSignal::new(OptionsState::default());
    let analysis = RwSignal::new(AnalysisState::default());
    let results_scroll = Deferred::new();
    let results_animation = ScrollAnimation::new();
    let list_scroll = Deferred::new();

    // Load curricula and careers on mount
    spawn_local(async move {
        if let Some(api) = api.try_get_value() {
            load_options(&api, &options).await;
        }
    });

    // Outstanding responses must not land after teardown
    on_cleanup(move || {
        analysis.try_update(AnalysisState::reset);
    });

    let on_run = move |_| {
        let selection = options.with_untracked(|o| o.selection());
        spawn_local(async move {
            let Some(api) = api.try_get_value() else {
                return;
            };
            let on_effect = move |effect: ViewEffect| match effect {
                ViewEffect::ScrollToResults {
                    delay_ms,
                    duration_ms,
                } => results_scroll.schedule(delay_ms, move || {
                    results_animation.to_anchor(RESULTS_ANCHOR, duration_ms)
                }),
            };
            if let Err(e) = run_analysis(&api, &analysis, selection, on_effect).await {
                tracing::debug!("Analysis not started: {}", e);
            }
        });
    };

    // Expanding keeps the list header where it was; collapsing just collapses
    let toggle_list = move |list: SkillList, anchor: &'static str| {
        let expanded = analysis.with_untracked(|a| a.show_all(list));
        match skill_lists::toggle(expanded) {
            ToggleOutcome::Collapse => analysis.update(|a| a.set_show_all(list, false)),
            ToggleOutcome::Expand { settle_delay_ms } => {
                let captured = dom::anchor_offset(anchor);
                analysis.update(|a| a.set_show_all(list, true));
                if let Some(top) = captured {
                    results_scroll.cancel();
                    results_animation.cancel();
                    list_scroll.schedule(settle_delay_ms, move || dom::smooth_scroll_to(top));
                }
            }
        }
    };

    let result = Memo::new(move |_| analysis.with(|a| a.result.clone()));
    let loading = Signal::derive(move || analysis.with(|a| a.loading()));
    let can_run = move || options.with(|o| o.selection().is_some()) && !loading.get();

    view! {
        <div class="page dashboard-page">
            <style>{include_str!("dashboard.css")}</style>

            <h2>"Skill Gap Analysis"</h2>
            <p class="page-description">
                "Compare what a curriculum teaches with what a target role asks for."
            </p>

            {move || options.with(|o| o.error.clone()).map(|e| view! {
                <div class="error-banner">{e}</div>
            })}
            {move || analysis.with(|a| a.error.clone()).map(|e| view! {
                <div class="error-banner">{e}</div>
            })}

            <div class="selectors">
                <OptionSelect
                    id="program-select"
                    label="Program"
                    placeholder="Select a program"
                    choices=Signal::derive(move || options.with(|o| o.programs.clone()))
                    selected=Signal::derive(move || options.with(|o| o.selected_program.clone()))
                    open=Signal::derive(move || options.with(|o| o.program_open))
                    disabled=Signal::derive(move || options.with(|o| o.loading))
                    on_toggle=Callback::new(move |_| {
                        options.update(|o| o.toggle_dropdown(Dropdown::Program))
                    })
                    on_select=Callback::new(move |id: OptionId| {
                        options.update(|o| {
                            o.select_program(&id);
                        })
                    })
                    on_dismiss=Callback::new(move |_| options.update(|o| o.close_dropdowns()))
                />
                <OptionSelect
                    id="career-select"
                    label="Career"
                    placeholder="Select a career"
                    choices=Signal::derive(move || options.with(|o| o.careers.clone()))
                    selected=Signal::derive(move || options.with(|o| o.selected_career.clone()))
                    open=Signal::derive(move || options.with(|o| o.career_open))
                    disabled=Signal::derive(move || options.with(|o| o.loading))
                    on_toggle=Callback::new(move |_| {
                        options.update(|o| o.toggle_dropdown(Dropdown::Career))
                    })
                    on_select=Callback::new(move |id: OptionId| {
                        options.update(|o| {
                            o.select_career(&id);
                        })
                    })
                    on_dismiss=Callback::new(move |_| options.update(|o| o.close_dropdowns()))
                />
                <button
                    class="btn btn-primary run-button"
                    on:click=on_run
                    disabled=move || !can_run()
                >
                    {move || if loading.get() { "Analyzing..." } else { "Run Analysis" }}
                </button>
            </div>

            {move || {
                match result.get() {
                    Some(result) => view! {
                        <ResultsSection
                            result=result
                            analysis=analysis
                            on_toggle_matches=Callback::new(move |_| {
                                toggle_list(SkillList::Matches, MATCHES_ANCHOR)
                            })
                            on_toggle_gaps=Callback::new(move |_| {
                                toggle_list(SkillList::Gaps, GAPS_ANCHOR)
                            })
                        />
                    }
                    .into_any(),
                    None if loading.get() => view! {
                        <div class="loading-indicator">
                            <div class="spinner"></div>
                            <p>"Analyzing curriculum against the role..."</p>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <p class="empty-state">
                            "Choose a program and a career, then run the analysis."
                        </p>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

/// Everything shown once an analysis result is available.
#[component]
fn ResultsSection(
    result: AnalysisResult,
    analysis: RwSignal<AnalysisState>,
    on_toggle_matches: Callback<()>,
    on_toggle_gaps: Callback<()>,
) -> impl IntoView {
    let matches = result.exact.clone();
    let gaps = result.gaps.clone();

    view! {
        <section id=RESULTS_ANCHOR class="analysis-results">
            <MetricsGrid result=result.clone() />
            <CoverageChart result=result />

            <div class="skill-columns">
                <SkillBadgeList
                    title="Matched Skills"
                    anchor_id=MATCHES_ANCHOR
                    tone="match"
                    skills=matches
                    expanded=Signal::derive(move || analysis.with(|a| a.show_all_matches))
                    on_toggle=on_toggle_matches
                />
                <SkillBadgeList
                    title="Skill Gaps"
                    anchor_id=GAPS_ANCHOR
                    tone="gap"
                    skills=gaps
                    expanded=Signal::derive(move || analysis.with(|a| a.show_all_gaps))
                    on_toggle=on_toggle_gaps
                />
            </div>

            <RecommendationPanel
                open=Signal::derive(move || analysis.with(|a| a.recommendation_open))
                loading=Signal::derive(move || analysis.with(|a| a.recommendation_loading()))
                text=Signal::derive(move || analysis.with(|a| a.recommendation.clone()))
                on_toggle=Callback::new(move |_| {
                    analysis.update(|a| a.toggle_recommendation_panel())
                })
            />
        </section>
    }
}
