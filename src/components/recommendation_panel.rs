//! Collapsible panel holding the AI-generated recommendation.

use leptos::prelude::*;

use crate::components::overflow_panel::OverflowPanel;

/// A displayable chunk of the recommendation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Bullet(String),
    Paragraph(String),
}

/// Split markdown-ish text into headings, bullets and paragraphs.
///
/// Consecutive plain lines join into one paragraph; blank lines end it.
pub fn blocks(text: &str) -> Vec<Block> {
    let mut out = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    fn flush(paragraph: &mut Vec<&str>, out: &mut Vec<Block>) {
        if !paragraph.is_empty() {
            out.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
    }

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut paragraph, &mut out);
        } else if line.starts_with('#') {
            flush(&mut paragraph, &mut out);
            out.push(Block::Heading(strip_emphasis(line.trim_start_matches('#').trim())));
        } else if let Some(item) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            flush(&mut paragraph, &mut out);
            out.push(Block::Bullet(strip_emphasis(item.trim())));
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut paragraph, &mut out);

    out.into_iter()
        .map(|b| match b {
            Block::Paragraph(p) => Block::Paragraph(strip_emphasis(&p)),
            other => other,
        })
        .collect()
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "")
}

#[component]
pub fn RecommendationPanel(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] text: Signal<Option<String>>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="recommendation-panel" class:open=move || open.get()>
            <style>{include_str!("recommendation_panel.css")}</style>
            <button
                class="accordion-header"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| on_toggle.run(())
            >
                <span class="accordion-title">"AI Recommendations"</span>
                <span class="accordion-chevron">
                    {move || if open.get() { "\u{25B4}" } else { "\u{25BE}" }}
                </span>
            </button>

            <Show when=move || open.get()>
                <div class="accordion-body">
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="loading-indicator">
                                    <div class="spinner"></div>
                                    <p>"Generating recommendations..."</p>
                                </div>
                            }
                            .into_any()
                        } else if let Some(text) = text.get() {
                            view! {
                                <OverflowPanel>
                                    <div class="recommendation-text">{render_blocks(&text)}</div>
                                </OverflowPanel>
                            }
                            .into_any()
                        } else {
                            view! { <p class="recommendation-empty">"No recommendation yet."</p> }
                                .into_any()
                        }
                    }}
                </div>
            </Show>
        </section>
    }
}

fn render_blocks(text: &str) -> Vec<AnyView> {
    blocks(text)
        .into_iter()
        .map(|block| match block {
            Block::Heading(h) => view! { <h4>{h}</h4> }.into_any(),
            Block::Bullet(b) => view! { <p class="rec-bullet">"\u{2022} " {b}</p> }.into_any(),
            Block::Paragraph(p) => view! { <p>{p}</p> }.into_any(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_from_markdown() {
        let text = "## Priorities\n\nFocus on **containers** first.\nThen orchestration.\n\n- Docker\n* Kubernetes\n\nCoverage is 75%.";
        assert_eq!(
            blocks(text),
            vec![
                Block::Heading("Priorities".into()),
                Block::Paragraph("Focus on containers first. Then orchestration.".into()),
                Block::Bullet("Docker".into()),
                Block::Bullet("Kubernetes".into()),
                Block::Paragraph("Coverage is 75%.".into()),
            ]
        );
    }

    #[test]
    fn test_fallback_text_is_single_paragraph() {
        assert_eq!(
            blocks("Could not fetch AI insights."),
            vec![Block::Paragraph("Could not fetch AI insights.".into())]
        );
        assert!(blocks("   \n\n").is_empty());
    }
}
