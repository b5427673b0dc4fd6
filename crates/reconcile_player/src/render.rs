//! Plain-text rendering of panel views.

use std::fmt::Write;

use reconcile_lab::panels::{Block, PanelView, Row, Section, StageStatus, Tone};
use reconcile_lab::{BulkInsertDemo, DemoAction, Era, Explainer, Scheduler, Side};

const BAR_WIDTH: usize = 20;

fn mark(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => " ",
        Tone::Info => "*",
        Tone::Good => "+",
        Tone::Warn => "!",
        Tone::Bad => "x",
    }
}

fn bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn action_hint(action: DemoAction) -> &'static str {
    match action {
        DemoAction::Primary => "act",
        DemoAction::Increment(Side::Left) => "inc left",
        DemoAction::Increment(Side::Right) => "inc right",
        DemoAction::ToggleAdvanced => "toggle",
    }
}

pub fn era_tabs(current: Era) -> String {
    Era::all()
        .iter()
        .map(|e| {
            if *e == current {
                format!("[{}]", e.label())
            } else {
                e.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn scenario_tabs<S: Scheduler + Clone>(ex: &Explainer<S>) -> String {
    ex.era()
        .scenarios()
        .iter()
        .map(|s| {
            let label = format!("{} ({})", s.tab_label(ex.era()), s.key());
            if *s == ex.scenario() {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn panel<S: Scheduler + Clone>(ex: &Explainer<S>, view: &PanelView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", era_tabs(ex.era()));
    let _ = writeln!(out, "{}", scenario_tabs(ex));
    let _ = writeln!(out);
    let _ = writeln!(out, "{} {}", mark(view.tone), view.title);
    if let Some(intro) = view.intro {
        let _ = writeln!(out, "  {intro}");
    }
    let playing = if ex.is_playing() { "playing" } else { "paused" };
    match view.progress {
        Some(p) => {
            let pct = (p * 100.0).round().clamp(0.0, 100.0) as u8;
            let _ = writeln!(out, "  {} {} ({playing})", view.step_label, bar(pct));
        }
        None => {
            let _ = writeln!(out, "  {} ({playing})", view.step_label);
        }
    }
    for section in view.columns.iter().chain(&view.footer) {
        write_section(&mut out, section);
    }
    let c = view.controls;
    let _ = write!(
        out,
        "\ncontrols: {} (play/pause) | {} (step)",
        c.toggle_label, c.step_label
    );
    if c.show_reset {
        let _ = write!(out, " | Reset (reset)");
    }
    let _ = writeln!(out);
    out
}

fn write_section(out: &mut String, section: &Section) {
    let _ = writeln!(out);
    if let Some(title) = section.title {
        let _ = writeln!(out, "== {title}");
    }
    for block in &section.blocks {
        write_block(out, block);
    }
}

fn write_row(out: &mut String, row: &Row) {
    let lead = row.highlight.map_or(" ", mark);
    let _ = write!(out, "  {lead} {}", row.text);
    if let Some(detail) = &row.detail {
        let _ = write!(out, "  ({detail})");
    }
    for badge in &row.badges {
        let _ = write!(out, "  {}", badge.text);
    }
    let _ = writeln!(out);
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Indicator { label, value, tone } => {
            let _ = writeln!(out, "  {} {label}: {value}", mark(*tone));
        }
        Block::Stages { caption, stages } => {
            let _ = writeln!(out, "  {caption}");
            for stage in stages {
                let lead = match stage.status {
                    StageStatus::Done => "✓",
                    StageStatus::Active(tone) => mark(tone),
                    StageStatus::Pending => "·",
                };
                let _ = writeln!(out, "    {lead} {}", stage.label);
            }
        }
        Block::List(rows) => {
            for row in rows {
                write_row(out, row);
            }
        }
        Block::Counter {
            label,
            value,
            action,
            pulse,
            overlay,
        } => {
            let pulse = if *pulse { " <-" } else { "" };
            let _ = writeln!(out, "  {label}: {value}{pulse}   ({})", action_hint(*action));
            if let Some(overlay) = overlay {
                let _ = writeln!(out, "  ~ {overlay} ~");
            }
        }
        Block::Meter(m) => {
            let _ = writeln!(out, "  {} {:<22} {} {}", mark(m.tone), m.label, bar(m.percent), m.value);
        }
        Block::Code(snippet) => {
            let _ = writeln!(out, "  -- {} --", snippet.caption);
            for line in snippet.code.lines() {
                let _ = writeln!(out, "  | {line}");
            }
        }
        Block::Callout { tone, title, body } => {
            let _ = writeln!(out, "  {} {title}", mark(*tone));
            for line in body.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        Block::Pipeline { title, steps } => {
            let _ = writeln!(out, "  {title} {}", steps.join(" -> "));
        }
        Block::Notes(notes) => {
            let _ = writeln!(out, "  {}", notes.heading);
            for line in notes.markdown.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        Block::Actions(buttons) => {
            for b in buttons {
                let state = if b.enabled { "" } else { " (disabled)" };
                let _ = writeln!(out, "  [{}]{state}  ({})", b.label, action_hint(b.action));
            }
        }
        Block::Links(links) => {
            for link in links.iter() {
                let _ = writeln!(out, "  - {}: {}", link.title, link.url);
            }
        }
    }
}

pub fn bulk<S: Scheduler>(demo: &BulkInsertDemo<S>) -> String {
    let mode = if demo.legacy_mode() { "legacy (blocking)" } else { "modern (deferred)" };
    let mut out = format!("== Playground ({mode})\n");
    if demo.is_loading() {
        let _ = writeln!(out, "  Adding...");
    }
    if demo.total() == 0 {
        let _ = writeln!(out, "  No items. `bulk add` adds {} rows.", demo.batch());
    } else {
        let items = demo.items();
        let _ = writeln!(out, "  {} .. {}", items[0].text, items[items.len() - 1].text);
    }
    let _ = writeln!(out, "  Total items: {}", demo.total());
    out
}
