use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::{Choice, OptionId};

/// Choices whose label contains `query`, ignoring case.
pub fn filter_choices(choices: &[Choice], query: &str) -> Vec<Choice> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return choices.to_vec();
    }
    choices
        .iter()
        .filter(|c| c.label.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// A dropdown over curriculum or job-role choices.
///
/// The open flag lives with the caller so that opening one selector can
/// close the other. Typing in the open dropdown filters the list.
#[component]
pub fn OptionSelect(
    /// DOM id of the trigger button.
    id: &'static str,
    label: &'static str,
    /// Shown while nothing is selected.
    placeholder: &'static str,
    #[prop(into)] choices: Signal<Vec<Choice>>,
    #[prop(into)] selected: Signal<Option<OptionId>>,
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    on_toggle: Callback<()>,
    on_select: Callback<OptionId>,
    /// Invoked on a click outside the open dropdown.
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let (search_text, set_search_text) = signal(String::new());
    let container_ref = NodeRef::<leptos::html::Div>::new();

    let display_label = move || {
        let current = selected.get();
        choices.with(|all| {
            current
                .as_ref()
                .and_then(|id| all.iter().find(|c| &c.id == id))
                .map(|c| c.label.clone())
        })
    };

    // Fresh filter every time the dropdown opens
    Effect::new(move |_| {
        if open.get() {
            set_search_text.set(String::new());
        }
    });

    // Close dropdown when clicking outside
    let outside_click = window_event_listener(ev::mousedown, move |ev| {
        if !open.get_untracked() {
            return;
        }
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .map(|node| container.contains(Some(&node)))
            .unwrap_or(false);
        if !inside {
            on_dismiss.run(());
        }
    });
    on_cleanup(move || outside_click.remove());

    let dropdown_id = format!("{}-dropdown", id);

    view! {
        <div
            class="option-select"
            class:open=move || open.get()
            node_ref=container_ref
        >
            <style>{include_str!("option_select.css")}</style>

            <label class="os-label" for=id>{label}</label>
            <button
                id=id
                type="button"
                class="os-display"
                disabled=move || disabled.get()
                on:click=move |_| on_toggle.run(())
            >
                <span class="os-display-text">
                    {move || display_label().unwrap_or_else(|| placeholder.to_string())}
                </span>
                <span class="os-chevron">"\u{25BE}"</span>
            </button>

            <Show when=move || open.get()>
                <div class="os-dropdown" id=dropdown_id.clone()>
                    <input
                        type="text"
                        class="os-search input"
                        placeholder="Type to filter..."
                        prop:value=move || search_text.get()
                        on:input=move |ev| set_search_text.set(event_target_value(&ev))
                    />
                    {move || {
                        let matches = choices.with(|all| filter_choices(all, &search_text.get()));
                        if matches.is_empty() {
                            return view! { <div class="os-empty">"No matches"</div> }.into_any();
                        }

                        let current = selected.get();
                        matches
                            .into_iter()
                            .map(|choice| {
                                let option_class = if current.as_ref() == Some(&choice.id) {
                                    "os-option selected"
                                } else {
                                    "os-option"
                                };
                                let value = choice.id.clone();
                                view! {
                                    <div
                                        class=option_class
                                        on:mousedown=move |_| on_select.run(value.clone())
                                    >
                                        {choice.label}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programs() -> Vec<Choice> {
        vec![
            Choice::new(1, "CS Intelligent Systems"),
            Choice::new(2, "CS Game Development"),
            Choice::new(3, "IT-Web Development"),
        ]
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        assert_eq!(filter_choices(&programs(), "  ").len(), 3);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let matched = filter_choices(&programs(), "DEVELOPMENT");
        let labels: Vec<_> = matched.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["CS Game Development", "IT-Web Development"]);
    }

    #[test]
    fn test_filter_without_matches() {
        assert!(filter_choices(&programs(), "nursing").is_empty());
    }
}
