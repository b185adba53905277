use leptos::prelude::*;

use crate::theme::ThemeContext;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="header-brand">
                <h1 class="header-title">"SkillGap"</h1>
                <p class="header-subtitle">"Curriculum vs. Career Analyzer"</p>
            </div>
            <ThemeToggle />
        </header>
    }
}

/// Light/dark switch backed by the app-wide theme controller.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ThemeContext { dark, toggle } = expect_context::<ThemeContext>();

    view! {
        <button
            class="btn btn-icon theme-toggle"
            title=move || if dark.get() { "Switch to light mode" } else { "Switch to dark mode" }
            on:click=move |_| toggle.run(())
        >
            {move || if dark.get() { "\u{2600}" } else { "\u{263D}" }}
        </button>
    }
}
