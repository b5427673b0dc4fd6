//! Eras (top-level narratives) and the scenarios each one offers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::{millis, Duration};
use crate::settings::Settings;
use crate::step::Autoplay;

/// Steps in every legacy/modern walkthrough.
pub const LOOP_MAX_STEP: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Era {
    /// Stack reconciler problems.
    #[default]
    Legacy,
    /// Fiber-era solutions.
    Modern,
    /// Challenges other frameworks already address.
    Future,
}

impl Era {
    pub fn key(self) -> &'static str {
        match self {
            Era::Legacy => "legacy",
            Era::Modern => "modern",
            Era::Future => "future",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Era::Legacy => "Early Problems",
            Era::Modern => "Modern Solutions",
            Era::Future => "Remaining Challenges",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Era::Legacy => "React Reconciliation Evolution",
            Era::Modern => "Modern React Reconciliation Solutions",
            Era::Future => "React Reconciliation Evolution",
        }
    }

    pub fn from_key(key: &str) -> Option<Era> {
        Era::all()
            .iter()
            .copied()
            .find(|e| e.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn all() -> &'static [Era] {
        &[Era::Legacy, Era::Modern, Era::Future]
    }

    pub fn scenarios(self) -> &'static [Scenario] {
        match self {
            Era::Legacy | Era::Modern => &[
                Scenario::Stack,
                Scenario::ComponentType,
                Scenario::DomUpdates,
            ],
            Era::Future => &[
                Scenario::FineGrained,
                Scenario::Hydration,
                Scenario::Compiler,
            ],
        }
    }

    pub fn default_scenario(self) -> Scenario {
        self.scenarios()[0]
    }

    pub fn offers(self, scenario: Scenario) -> bool {
        self.scenarios().contains(&scenario)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scenario {
    Stack,
    ComponentType,
    DomUpdates,
    FineGrained,
    Hydration,
    Compiler,
}

impl Scenario {
    pub fn key(self) -> &'static str {
        match self {
            Scenario::Stack => "stack",
            Scenario::ComponentType => "type",
            Scenario::DomUpdates => "dom",
            Scenario::FineGrained => "fine-grained",
            Scenario::Hydration => "hydration",
            Scenario::Compiler => "compiler",
        }
    }

    pub fn from_key(key: &str) -> Option<Scenario> {
        let key = key.trim();
        [
            Scenario::Stack,
            Scenario::ComponentType,
            Scenario::DomUpdates,
            Scenario::FineGrained,
            Scenario::Hydration,
            Scenario::Compiler,
        ]
        .into_iter()
        .find(|s| s.key().eq_ignore_ascii_case(key))
    }

    /// Tab label; the legacy and modern eras name the same scenario differently.
    pub fn tab_label(self, era: Era) -> &'static str {
        match (self, era) {
            (Scenario::Stack, Era::Modern) => "Fiber Reconciler",
            (Scenario::Stack, _) => "Stack Reconciler",
            (Scenario::ComponentType, Era::Modern) => "Component Reuse",
            (Scenario::ComponentType, _) => "Component Type",
            (Scenario::DomUpdates, Era::Modern) => "Efficient Updates",
            (Scenario::DomUpdates, _) => "DOM Updates",
            (Scenario::FineGrained, _) => "Fine-Grained Reactivity",
            (Scenario::Hydration, _) => "Partial Hydration",
            (Scenario::Compiler, _) => "Compiler Optimization",
        }
    }

    pub fn max_step(self) -> u8 {
        match self {
            Scenario::Stack | Scenario::ComponentType | Scenario::DomUpdates => LOOP_MAX_STEP,
            Scenario::FineGrained => 2,
            Scenario::Hydration | Scenario::Compiler => 3,
        }
    }

    pub fn autoplay(self) -> Autoplay {
        match self {
            Scenario::Stack | Scenario::ComponentType | Scenario::DomUpdates => Autoplay::Loop,
            Scenario::FineGrained | Scenario::Hydration | Scenario::Compiler => Autoplay::OneShot,
        }
    }

    pub fn period(self, settings: &Settings) -> Duration {
        match self.autoplay() {
            Autoplay::Loop => millis(settings.loop_period_ms),
            Autoplay::OneShot => millis(settings.one_shot_period_ms),
        }
    }
}
