use leptos::prelude::*;

use crate::components::header::Header;
use crate::config::AppConfig;
use crate::dom::BrowserStorage;
use crate::pages::dashboard::DashboardPage;
use crate::theme::{apply_theme, ThemeContext, ThemeController, ThemeMode};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(config);

    // Saved preference wins; fall back to light
    let controller = StoredValue::new_local(ThemeController::load(BrowserStorage));
    let initial = controller.with_value(|c| c.mode().is_dark());
    let dark = RwSignal::new(initial);

    let toggle = Callback::new(move |_| {
        if let Some(mode) = controller.try_update_value(|c| c.toggle()) {
            dark.set(mode.is_dark());
        }
    });
    provide_context(ThemeContext {
        dark: dark.into(),
        toggle,
    });

    // Apply theme to DOM whenever the signal changes
    Effect::new(move |_| {
        apply_theme(ThemeMode::from_dark(dark.get()));
    });

    view! {
        <style>{include_str!("app.css")}</style>
        <div class="app-layout">
            <Header />
            <main class="content">
                <DashboardPage />
            </main>
        </div>
    }
}
