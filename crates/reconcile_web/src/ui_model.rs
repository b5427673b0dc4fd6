//! UI models and metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! navigation and styling tables on the host.

use reconcile_lab::panels::{StageStatus, Tone};
use reconcile_lab::Era;

/// Top-level page selector: one tab per era plus the bulk-insert playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTab {
    Era(Era),
    Playground,
}

impl Default for PageTab {
    fn default() -> Self {
        PageTab::Era(Era::default())
    }
}

impl PageTab {
    pub fn label(self) -> &'static str {
        match self {
            PageTab::Era(era) => era.label(),
            PageTab::Playground => "Playground",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PageTab::Era(era) => era.key(),
            PageTab::Playground => "playground",
        }
    }

    pub fn from_key(key: &str) -> Option<PageTab> {
        PageTab::all()
            .iter()
            .copied()
            .find(|t| t.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn heading(self) -> &'static str {
        match self {
            PageTab::Era(era) => era.heading(),
            PageTab::Playground => "Bulk Insert Playground",
        }
    }

    pub fn all() -> &'static [PageTab] {
        &[
            PageTab::Era(Era::Legacy),
            PageTab::Era(Era::Modern),
            PageTab::Era(Era::Future),
            PageTab::Playground,
        ]
    }
}

/// CSS modifier for a tone.
pub fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "tone-neutral",
        Tone::Info => "tone-info",
        Tone::Good => "tone-good",
        Tone::Warn => "tone-warn",
        Tone::Bad => "tone-bad",
    }
}

pub fn stage_class(status: StageStatus) -> String {
    match status {
        StageStatus::Pending => "stage pending".to_string(),
        StageStatus::Done => "stage done".to_string(),
        StageStatus::Active(tone) => format!("stage active {}", tone_class(tone)),
    }
}

/// Bar width style for a `0..=100` percentage.
pub fn width_style(percent: u8) -> String {
    format!("width: {}%;", percent.min(100))
}
