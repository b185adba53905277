use leptos::prelude::*;

use crate::skill_lists;

/// A titled list of skill badges, truncated until expanded.
#[component]
pub fn SkillBadgeList(
    title: &'static str,
    /// Section id; expanding scrolls back to it.
    anchor_id: &'static str,
    /// "match" or "gap".
    tone: &'static str,
    skills: Vec<String>,
    #[prop(into)] expanded: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let count = skills.len();
    let truncatable = skill_lists::is_truncatable(&skills);
    let skills = StoredValue::new(skills);

    view! {
        <section class=format!("skill-panel skill-panel-{}", tone) id=anchor_id>
            <style>{include_str!("skill_badges.css")}</style>
            <header class="skill-panel-header">
                <h3>{title}</h3>
                <span class="skill-count">{count}</span>
            </header>

            {move || {
                let is_expanded = expanded.get();
                skills.with_value(|all| {
                    let shown = skill_lists::preview(all, is_expanded);
                    let hidden = shown.hidden;
                    let badges = shown
                        .visible
                        .iter()
                        .map(|skill| view! {
                            <span class=format!("skill-badge badge-{}", tone)>{skill.clone()}</span>
                        })
                        .collect::<Vec<_>>();

                    view! {
                        <div class="skill-badges">
                            {badges}
                            {truncatable.then(|| view! {
                                <button
                                    class="btn btn-link skill-toggle"
                                    on:click=move |_| on_toggle.run(())
                                >
                                    {skill_lists::toggle_label(is_expanded, hidden)}
                                </button>
                            })}
                        </div>
                    }
                })
            }}

            {(count == 0).then(|| view! { <p class="skill-empty">"None"</p> })}
        </section>
    }
}
