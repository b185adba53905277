//! Curriculum and job-role choices offered on the dashboard.
//!
//! The lists are fetched once on mount. The first entry of each list is
//! pre-selected, which is what makes the "Run Analysis" button usable
//! without any interaction.

use tracing::{info, warn};

use crate::api::{CatalogOptions, Choice, OptionId, SkillGapApi};
use crate::store::StateStore;

/// Which of the two selectors a dropdown flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Program,
    Career,
}

/// Both selections, resolved to their full choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub program: Choice,
    pub career: Choice,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsState {
    pub programs: Vec<Choice>,
    pub careers: Vec<Choice>,
    pub selected_program: Option<OptionId>,
    pub selected_career: Option<OptionId>,
    pub program_open: bool,
    pub career_open: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl OptionsState {
    fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace both lists and select the first entry of each.
    pub fn apply_loaded(&mut self, options: CatalogOptions) {
        self.selected_program = options.programs.first().map(|c| c.id.clone());
        self.selected_career = options.careers.first().map(|c| c.id.clone());
        self.programs = options.programs;
        self.careers = options.careers;
    }

    pub fn selected_program(&self) -> Option<&Choice> {
        find(&self.programs, self.selected_program.as_ref())
    }

    pub fn selected_career(&self) -> Option<&Choice> {
        find(&self.careers, self.selected_career.as_ref())
    }

    /// Both choices, or `None` while either one is missing.
    pub fn selection(&self) -> Option<Selection> {
        Some(Selection {
            program: self.selected_program()?.clone(),
            career: self.selected_career()?.clone(),
        })
    }

    /// Select a program by id. Unknown ids leave the selection unchanged.
    pub fn select_program(&mut self, id: &OptionId) -> bool {
        self.program_open = false;
        if self.programs.iter().any(|c| &c.id == id) {
            self.selected_program = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn select_career(&mut self, id: &OptionId) -> bool {
        self.career_open = false;
        if self.careers.iter().any(|c| &c.id == id) {
            self.selected_career = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        match dropdown {
            Dropdown::Program => self.program_open,
            Dropdown::Career => self.career_open,
        }
    }

    /// Flip one dropdown; opening it closes the other.
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) {
        let open = !self.is_open(dropdown);
        self.program_open = open && dropdown == Dropdown::Program;
        self.career_open = open && dropdown == Dropdown::Career;
    }

    pub fn close_dropdowns(&mut self) {
        self.program_open = false;
        self.career_open = false;
    }
}

fn find<'a>(choices: &'a [Choice], id: Option<&OptionId>) -> Option<&'a Choice> {
    let id = id?;
    choices.iter().find(|c| &c.id == id)
}

/// Fetch the option lists into `store`.
///
/// A rejected response (bad status or non-JSON body) yields empty lists.
/// Transport and decode failures additionally set the page-level error.
/// `loading` is cleared on every path.
pub async fn load_options<A, S>(api: &A, store: &S)
where
    A: SkillGapApi,
    S: StateStore<OptionsState>,
{
    if store.inspect(|s| s.loading).unwrap_or(true) {
        return;
    }
    if store.modify(OptionsState::begin_load).is_none() {
        return;
    }

    let outcome = api.fetch_options().await;

    store.modify(|state| {
        match outcome {
            Ok(options) => {
                info!(
                    "Loaded {} programs and {} careers",
                    options.programs.len(),
                    options.careers.len()
                );
                state.apply_loaded(options);
            }
            Err(e) if e.is_rejected_response() => {
                warn!("Options response rejected: {}", e);
                state.apply_loaded(CatalogOptions::default());
            }
            Err(e) => {
                warn!("Failed to load options: {}", e);
                state.apply_loaded(CatalogOptions::default());
                state.error = Some(format!("Failed to load options: {}", e));
            }
        }
        state.loading = false;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalysisResult, AnalyzeRequest, RecommendRequest};
    use crate::error::ApiError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct OptionsOnly {
        reply: RefCell<Option<Result<CatalogOptions, ApiError>>>,
        calls: Cell<usize>,
    }

    impl OptionsOnly {
        fn new(reply: Result<CatalogOptions, ApiError>) -> Self {
            Self {
                reply: RefCell::new(Some(reply)),
                calls: Cell::new(0),
            }
        }
    }

    impl SkillGapApi for OptionsOnly {
        async fn fetch_options(&self) -> Result<CatalogOptions, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.reply
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ApiError::Network("no reply scripted".into())))
        }

        async fn analyze(&self, _: &AnalyzeRequest) -> Result<AnalysisResult, ApiError> {
            panic!("analyze must not be called while loading options")
        }

        async fn recommend(&self, _: &RecommendRequest) -> Result<String, ApiError> {
            panic!("recommend must not be called while loading options")
        }
    }

    fn catalog() -> CatalogOptions {
        CatalogOptions {
            programs: vec![
                Choice::new(3, "IT-Web Development"),
                Choice::new(4, "CS Game Development"),
            ],
            careers: vec![Choice::new(7, "Web Developer"), Choice::new(8, "Game Designer")],
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_first_entries_selected_after_load() {
        let api = OptionsOnly::new(Ok(catalog()));
        let store = Rc::new(RefCell::new(OptionsState::default()));

        load_options(&api, &store).await;

        let state = store.borrow();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.selected_program, Some(OptionId::Number(3)));
        assert_eq!(state.selected_career, Some(OptionId::Number(7)));
        let selection = state.selection().expect("both selected");
        assert_eq!(selection.program.label, "IT-Web Development");
        assert_eq!(selection.career.label, "Web Developer");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_empty_career_list_leaves_run_disabled() {
        let mut options = catalog();
        options.careers.clear();
        let api = OptionsOnly::new(Ok(options));
        let store = Rc::new(RefCell::new(OptionsState::default()));

        load_options(&api, &store).await;

        let state = store.borrow();
        assert_eq!(state.selected_program, Some(OptionId::Number(3)));
        assert_eq!(state.selected_career, None);
        assert!(state.selection().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_rejected_response_yields_empty_lists() {
        let api = OptionsOnly::new(Err(ApiError::NotJson {
            content_type: "text/html".into(),
        }));
        let store = Rc::new(RefCell::new(OptionsState::default()));

        load_options(&api, &store).await;

        let state = store.borrow();
        assert!(state.programs.is_empty());
        assert!(state.careers.is_empty());
        assert!(state.selection().is_none());
        assert_eq!(state.error, None);
        assert!(!state.loading);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_network_failure_sets_error_and_clears_loading() {
        let api = OptionsOnly::new(Err(ApiError::Network("connection refused".into())));
        let store = Rc::new(RefCell::new(OptionsState::default()));

        load_options(&api, &store).await;

        let state = store.borrow();
        assert!(!state.loading);
        let error = state.error.as_deref().expect("error banner");
        assert!(error.starts_with("Failed to load options"));
        assert!(error.contains("connection refused"));
        assert!(state.selection().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_load_skipped_while_already_loading() {
        let api = OptionsOnly::new(Ok(catalog()));
        let store = Rc::new(RefCell::new(OptionsState {
            loading: true,
            ..Default::default()
        }));

        load_options(&api, &store).await;

        assert_eq!(api.calls.get(), 0);
        assert!(store.borrow().programs.is_empty());
    }

    #[test]
    fn test_select_closes_dropdown_and_ignores_unknown_ids() {
        let mut state = OptionsState::default();
        state.apply_loaded(catalog());
        state.toggle_dropdown(Dropdown::Program);
        assert!(state.program_open);

        assert!(!state.select_program(&OptionId::Number(99)));
        assert_eq!(state.selected_program, Some(OptionId::Number(3)));
        assert!(!state.program_open);

        assert!(state.select_program(&OptionId::Number(4)));
        assert_eq!(state.selected_program().unwrap().label, "CS Game Development");
    }

    #[test]
    fn test_opening_one_dropdown_closes_the_other() {
        let mut state = OptionsState::default();
        state.toggle_dropdown(Dropdown::Program);
        state.toggle_dropdown(Dropdown::Career);
        assert!(!state.program_open);
        assert!(state.career_open);

        state.toggle_dropdown(Dropdown::Career);
        assert!(!state.is_open(Dropdown::Career));

        state.toggle_dropdown(Dropdown::Program);
        state.close_dropdowns();
        assert!(!state.program_open && !state.career_open);
    }
}
