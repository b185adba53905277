//! Truncated skill lists with an expand/collapse affordance.

/// Badges shown before a list is expanded.
pub const PREVIEW_LIMIT: usize = 15;

/// Tick between expanding a list and scrolling back to its anchor.
pub const RELAYOUT_DELAY_MS: u32 = 50;

/// Height above which a text panel gets a "show more" control.
pub const OVERFLOW_CAP_PX: f64 = 320.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview<'a> {
    pub visible: &'a [String],
    /// Entries cut from the preview; drives the "+N" affordance.
    pub hidden: usize,
}

pub fn preview(skills: &[String], expanded: bool) -> Preview<'_> {
    if expanded || skills.len() <= PREVIEW_LIMIT {
        Preview {
            visible: skills,
            hidden: 0,
        }
    } else {
        Preview {
            visible: &skills[..PREVIEW_LIMIT],
            hidden: skills.len() - PREVIEW_LIMIT,
        }
    }
}

/// Whether the list is long enough to need the toggle at all.
pub fn is_truncatable(skills: &[String]) -> bool {
    skills.len() > PREVIEW_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Capture the anchor, expand, then scroll back after the delay.
    Expand { settle_delay_ms: u32 },
    /// Collapse immediately without scrolling.
    Collapse,
}

/// What flipping a list from its `expanded` state should do.
pub fn toggle(expanded: bool) -> ToggleOutcome {
    if expanded {
        ToggleOutcome::Collapse
    } else {
        ToggleOutcome::Expand {
            settle_delay_ms: RELAYOUT_DELAY_MS,
        }
    }
}

pub fn toggle_label(expanded: bool, hidden: usize) -> String {
    if expanded {
        "Show less".to_string()
    } else {
        format!("+{} more", hidden)
    }
}

pub fn overflows(content_height: f64, cap: f64) -> bool {
    content_height > cap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Skill {}", i)).collect()
    }

    #[test]
    fn test_long_list_truncates_and_expands() {
        let gaps = skills(20);

        let collapsed = preview(&gaps, false);
        assert_eq!(collapsed.visible.len(), 15);
        assert_eq!(collapsed.hidden, 5);
        assert_eq!(collapsed.visible[14], "Skill 15");

        let expanded = preview(&gaps, true);
        assert_eq!(expanded.visible.len(), 20);
        assert_eq!(expanded.hidden, 0);

        let collapsed_again = preview(&gaps, false);
        assert_eq!(collapsed_again.visible, &gaps[..15]);
    }

    #[test]
    fn test_short_list_has_no_affordance() {
        let gaps: Vec<String> = ["Docker", "GraphQL", "Kubernetes", "Terraform"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let view = preview(&gaps, false);
        assert_eq!(view.visible.len(), 4);
        assert_eq!(view.hidden, 0);
        assert!(!is_truncatable(&gaps));
    }

    #[test]
    fn test_exactly_limit_is_not_truncated() {
        let list = skills(PREVIEW_LIMIT);
        assert!(!is_truncatable(&list));
        assert_eq!(preview(&list, false).hidden, 0);
        assert!(is_truncatable(&skills(PREVIEW_LIMIT + 1)));
    }

    #[test]
    fn test_toggle_outcomes() {
        assert_eq!(
            toggle(false),
            ToggleOutcome::Expand {
                settle_delay_ms: RELAYOUT_DELAY_MS
            }
        );
        assert_eq!(toggle(true), ToggleOutcome::Collapse);
        assert_eq!(toggle_label(false, 5), "+5 more");
        assert_eq!(toggle_label(true, 0), "Show less");
    }

    #[test]
    fn test_overflow_predicate() {
        assert!(overflows(480.0, OVERFLOW_CAP_PX));
        assert!(!overflows(320.0, OVERFLOW_CAP_PX));
        assert!(!overflows(0.0, OVERFLOW_CAP_PX));
    }
}
