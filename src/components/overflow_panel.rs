use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use crate::skill_lists::{overflows, OVERFLOW_CAP_PX};

/// Caps its content at a fixed height and offers "Show more" only when the
/// content actually overflows.
///
/// The overflow check runs after the first render and again on every
/// window resize.
#[component]
pub fn OverflowPanel(
    #[prop(optional)] cap_px: Option<f64>,
    children: Children,
) -> impl IntoView {
    let cap = cap_px.unwrap_or(OVERFLOW_CAP_PX);
    let content_ref = NodeRef::<Div>::new();
    let (overflowing, set_overflowing) = signal(false);
    let (expanded, set_expanded) = signal(false);

    let measure = move || {
        if let Some(el) = content_ref.get_untracked() {
            set_overflowing.set(overflows(el.scroll_height() as f64, cap));
        }
    };

    Effect::new(move |_| {
        if content_ref.get().is_some() {
            request_animation_frame(measure);
        }
    });

    let resize = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || resize.remove());

    view! {
        <div class="overflow-panel" class:overflow-expanded=move || expanded.get()>
            <div
                node_ref=content_ref
                class="overflow-content"
                class:overflow-clipped=move || overflowing.get() && !expanded.get()
                style=move || {
                    if expanded.get() {
                        String::new()
                    } else {
                        format!("max-height: {}px; overflow: hidden;", cap)
                    }
                }
            >
                {children()}
            </div>
            <Show when=move || overflowing.get()>
                <button
                    class="btn btn-link overflow-toggle"
                    on:click=move |_| set_expanded.update(|e| *e = !*e)
                >
                    {move || if expanded.get() { "Show less" } else { "Show more" }}
                </button>
            </Show>
        </div>
    }
}
