//! Request lifecycle of one analysis run.
//!
//! A run goes `Idle -> AnalyzingPrimary -> AnalyzingRecommendation ->
//! Settled`. The recommendation call depends on the analysis result, so the
//! two requests are strictly sequential. Every run is tagged with a
//! [`RunId`]; a response is applied only while its run is still the latest
//! one, so a slow response from a superseded run can never overwrite newer
//! results.

use thiserror::Error;
use tracing::{info, warn};

use crate::api::{AnalysisResult, AnalyzeRequest, RecommendRequest, SkillGapApi};
use crate::error::ApiError;
use crate::options::Selection;
use crate::store::StateStore;

/// Shown in place of the narrative when the recommendation call fails.
pub const RECOMMENDATION_FALLBACK: &str = "Could not fetch AI insights.";

/// Delay before scrolling to the results, so layout can settle first.
pub const RESULTS_SCROLL_DELAY_MS: u32 = 100;
pub const RESULTS_SCROLL_DURATION_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RunId(u64);

impl RunId {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        RunId(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    AnalyzingPrimary,
    AnalyzingRecommendation,
    Settled(Outcome),
}

/// Why a run could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Select both a program and a career first")]
    MissingSelection,

    #[error("An analysis is already running")]
    Busy,
}

/// Handle identifying the run a response belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTicket {
    pub id: RunId,
    pub selection: Selection,
}

/// Side effects the view performs after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    /// Scroll to the results anchor once layout has settled.
    ScrollToResults { delay_ms: u32, duration_ms: u32 },
}

/// Result of applying the primary analysis response.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisStep {
    /// The response belonged to a superseded run and was dropped.
    Stale,
    Failed,
    Continue {
        request: RecommendRequest,
        effect: ViewEffect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillList {
    Matches,
    Gaps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisState {
    phase: RunPhase,
    run_id: RunId,
    pub result: Option<AnalysisResult>,
    pub recommendation: Option<String>,
    pub error: Option<String>,
    pub show_all_matches: bool,
    pub show_all_gaps: bool,
    pub recommendation_open: bool,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self {
            phase: RunPhase::Idle,
            run_id: RunId::default(),
            result: None,
            recommendation: None,
            error: None,
            show_all_matches: false,
            show_all_gaps: false,
            recommendation_open: true,
        }
    }
}

impl AnalysisState {
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn current_run(&self) -> RunId {
        self.run_id
    }

    /// Primary analysis in flight.
    pub fn loading(&self) -> bool {
        self.phase == RunPhase::AnalyzingPrimary
    }

    pub fn recommendation_loading(&self) -> bool {
        self.phase == RunPhase::AnalyzingRecommendation
    }

    fn is_current(&self, ticket: &RunTicket) -> bool {
        ticket.id == self.run_id
    }

    /// Start a new run, clearing everything the previous run produced.
    ///
    /// Only the primary analysis blocks a new run. A run may start while the
    /// recommendation is still loading; its late response is then stale.
    pub fn begin_run(&mut self, selection: Option<Selection>) -> Result<RunTicket, StartError> {
        let selection = selection.ok_or(StartError::MissingSelection)?;
        if self.loading() {
            return Err(StartError::Busy);
        }

        self.run_id = self.run_id.next();
        self.phase = RunPhase::AnalyzingPrimary;
        self.result = None;
        self.recommendation = None;
        self.error = None;
        self.show_all_matches = false;
        self.show_all_gaps = false;
        self.recommendation_open = true;

        Ok(RunTicket {
            id: self.run_id,
            selection,
        })
    }

    pub fn finish_analysis(
        &mut self,
        ticket: &RunTicket,
        outcome: Result<AnalysisResult, ApiError>,
    ) -> AnalysisStep {
        if !self.is_current(ticket) {
            info!("Dropping analysis response of superseded run {}", ticket.id.value());
            return AnalysisStep::Stale;
        }

        match outcome {
            Ok(result) => {
                let request = RecommendRequest {
                    job_title: ticket.selection.career.label.clone(),
                    curriculum_title: ticket.selection.program.label.clone(),
                    missing_skills: result.gaps.clone(),
                    coverage_score: result.coverage,
                };
                self.result = Some(result);
                self.phase = RunPhase::AnalyzingRecommendation;
                AnalysisStep::Continue {
                    request,
                    effect: ViewEffect::ScrollToResults {
                        delay_ms: RESULTS_SCROLL_DELAY_MS,
                        duration_ms: RESULTS_SCROLL_DURATION_MS,
                    },
                }
            }
            Err(e) => {
                warn!("Analysis run {} failed: {}", ticket.id.value(), e);
                self.error = Some(format!("Analysis failed: {}", e));
                self.phase = RunPhase::Settled(Outcome::Failed);
                AnalysisStep::Failed
            }
        }
    }

    /// Store the narrative, or the fallback text on failure.
    ///
    /// Returns `false` when the response belonged to a superseded run.
    pub fn finish_recommendation(
        &mut self,
        ticket: &RunTicket,
        outcome: Result<String, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            info!(
                "Dropping recommendation response of superseded run {}",
                ticket.id.value()
            );
            return false;
        }

        let text = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!("Recommendation for run {} failed: {}", ticket.id.value(), e);
                RECOMMENDATION_FALLBACK.to_string()
            }
        };
        self.recommendation = Some(text);
        self.phase = RunPhase::Settled(Outcome::Success);
        true
    }

    /// Forget the current run; any outstanding response becomes stale.
    pub fn reset(&mut self) {
        *self = AnalysisState {
            run_id: self.run_id.next(),
            ..AnalysisState::default()
        };
    }

    pub fn show_all(&self, list: SkillList) -> bool {
        match list {
            SkillList::Matches => self.show_all_matches,
            SkillList::Gaps => self.show_all_gaps,
        }
    }

    pub fn set_show_all(&mut self, list: SkillList, expanded: bool) {
        match list {
            SkillList::Matches => self.show_all_matches = expanded,
            SkillList::Gaps => self.show_all_gaps = expanded,
        }
    }

    pub fn toggle_recommendation_panel(&mut self) {
        self.recommendation_open = !self.recommendation_open;
    }
}

/// Drive one run end to end: analysis, then the dependent recommendation.
///
/// `on_effect` is invoked after the analysis result is stored and before the
/// recommendation request goes out. Returns early, without error, if the
/// store is disposed or the run is superseded along the way.
pub async fn run_analysis<A, S, F>(
    api: &A,
    store: &S,
    selection: Option<Selection>,
    mut on_effect: F,
) -> Result<(), StartError>
where
    A: SkillGapApi,
    S: StateStore<AnalysisState>,
    F: FnMut(ViewEffect),
{
    let Some(started) = store.modify(|s| s.begin_run(selection)) else {
        return Ok(());
    };
    let ticket = started?;
    info!(
        "Run {}: analyzing '{}' against '{}'",
        ticket.id.value(),
        ticket.selection.program.label,
        ticket.selection.career.label
    );

    let request = AnalyzeRequest {
        curriculum_id: ticket.selection.program.id.clone(),
        job_id: ticket.selection.career.id.clone(),
    };
    let outcome = api.analyze(&request).await;

    let step = store
        .modify(|s| s.finish_analysis(&ticket, outcome))
        .unwrap_or(AnalysisStep::Stale);
    let request = match step {
        AnalysisStep::Continue { request, effect } => {
            on_effect(effect);
            request
        }
        AnalysisStep::Failed | AnalysisStep::Stale => return Ok(()),
    };

    let outcome = api.recommend(&request).await;
    store.modify(|s| s.finish_recommendation(&ticket, outcome));
    Ok(())
}
