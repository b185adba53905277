mod analysis;
mod api;
mod app;
mod components;
mod config;
mod dom;
mod error;
mod logging;
mod options;
mod pages;
mod scroll;
mod skill_lists;
mod store;
mod theme;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    logging::init(&config::build_log_filter());
    let config = AppConfig::from_build_env();
    tracing::info!("SkillGap dashboard starting, API at {}", config.api_base);

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
