//! Maps panel view-models onto DOM.

use leptos::prelude::*;
use reconcile_lab::panels::{Block, PanelView, Row, Section};
use reconcile_lab::DemoAction;

use super::markdown::render_markdown;
use crate::ui_model::{stage_class, tone_class, width_style};

pub(super) fn panel_body(view: PanelView, on_action: Callback<DemoAction>) -> AnyView {
    let PanelView {
        title,
        tone,
        intro,
        step_label,
        progress,
        columns,
        footer,
        controls: _,
    } = view;

    view! {
        <section class=format!("panel {}", tone_class(tone))>
            <header class="panel-head">
                <h2>{title}</h2>
                {intro.map(|t| view! { <p class="panel-intro">{t}</p> })}
                <div class="step-label">{step_label}</div>
                {progress.map(|p| {
                    let pct = (p * 100.0).round().clamp(0.0, 100.0) as u8;
                    view! {
                        <div class="progress">
                            <div class="progress-fill" style=width_style(pct)></div>
                        </div>
                    }
                })}
            </header>
            <div class="panel-columns">
                {columns.into_iter().map(|s| section_view(s, on_action)).collect_view()}
            </div>
            <div class="panel-footer">
                {footer.into_iter().map(|s| section_view(s, on_action)).collect_view()}
            </div>
        </section>
    }
    .into_any()
}

fn section_view(section: Section, on_action: Callback<DemoAction>) -> impl IntoView {
    view! {
        <div class="section">
            {section.title.map(|t| view! { <h3>{t}</h3> })}
            {section.blocks.into_iter().map(|b| block_view(b, on_action)).collect_view()}
        </div>
    }
}

fn row_view(row: Row) -> impl IntoView {
    let class = match row.highlight {
        Some(tone) => format!("row highlight {}", tone_class(tone)),
        None => "row".to_string(),
    };
    view! {
        <li class=class>
            <span class="row-text">{row.text}</span>
            {row.detail.map(|d| view! { <span class="row-detail">{d}</span> })}
            {row
                .badges
                .into_iter()
                .map(|b| view! { <span class=format!("badge {}", tone_class(b.tone))>{b.text}</span> })
                .collect_view()}
        </li>
    }
}

fn block_view(block: Block, on_action: Callback<DemoAction>) -> AnyView {
    match block {
        Block::Indicator { label, value, tone } => view! {
            <div class=format!("indicator {}", tone_class(tone))>
                <span class="indicator-label">{label}": "</span>
                <strong>{value}</strong>
            </div>
        }
        .into_any(),
        Block::Stages { caption, stages } => view! {
            <div class="stages">
                <div class="stages-caption">{caption}</div>
                <ol>
                    {stages
                        .into_iter()
                        .map(|s| view! { <li class=stage_class(s.status)>{s.label}</li> })
                        .collect_view()}
                </ol>
            </div>
        }
        .into_any(),
        Block::List(rows) => view! {
            <ul class="rows">{rows.into_iter().map(row_view).collect_view()}</ul>
        }
        .into_any(),
        Block::Counter {
            label,
            value,
            action,
            pulse,
            overlay,
        } => view! {
            <div class="counter" class:pulse=pulse>
                <span class="counter-label">{label}</span>
                <span class="counter-value">{value}</span>
                <button class="btn" on:click=move |_| on_action.run(action)>"Increment"</button>
                {overlay.map(|o| view! { <div class="counter-overlay">{o}</div> })}
            </div>
        }
        .into_any(),
        Block::Meter(m) => view! {
            <div class=format!("meter {}", tone_class(m.tone))>
                <div class="meter-head">
                    <span>{m.label}</span>
                    <span>{m.value}</span>
                </div>
                <div class="meter-track">
                    <div class="meter-fill" style=width_style(m.percent)></div>
                </div>
            </div>
        }
        .into_any(),
        Block::Code(snippet) => view! {
            <figure class="code">
                <figcaption>{snippet.caption}</figcaption>
                <pre><code>{snippet.code}</code></pre>
            </figure>
        }
        .into_any(),
        Block::Callout { tone, title, body } => view! {
            <div class=format!("callout {}", tone_class(tone))>
                <h4>{title}</h4>
                <div class="md" inner_html=render_markdown(body)></div>
            </div>
        }
        .into_any(),
        Block::Pipeline { title, steps } => view! {
            <div class="pipeline">
                <span class="pipeline-title">{title}</span>
                {steps
                    .iter()
                    .map(|s| view! { <span class="pipeline-step">{*s}</span> })
                    .collect_view()}
            </div>
        }
        .into_any(),
        Block::Notes(notes) => view! {
            <div class="notes">
                <h4>{notes.heading}</h4>
                <div class="md" inner_html=render_markdown(notes.markdown)></div>
            </div>
        }
        .into_any(),
        Block::Actions(buttons) => view! {
            <div class="actions">
                {buttons
                    .into_iter()
                    .map(|b| {
                        let action = b.action;
                        view! {
                            <button
                                class="btn primary"
                                disabled={!b.enabled}
                                on:click=move |_| on_action.run(action)
                            >
                                {b.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        Block::Links(links) => view! {
            <ul class="links">
                {links
                    .iter()
                    .map(|l| view! {
                        <li><a href=l.url target="_blank" rel="noopener">{l.title}</a></li>
                    })
                    .collect_view()}
            </ul>
        }
        .into_any(),
    }
}
