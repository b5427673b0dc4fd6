//! Step → display-state mappings.
//!
//! Each walkthrough has a hand-tuned mapping from the current step to the flags
//! its panel needs. They are plain functions: the owner calls [`derive`] after
//! every transition and may call it as often as it likes.

use crate::scenario::{Era, Scenario};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFlags {
    /// Steps 2–3: reconciliation is running. Legacy freezes the main thread.
    pub busy: bool,
    pub main_thread_frozen: bool,
    /// The newest list row is highlighted once the DOM has been updated.
    pub highlight_head: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTag {
    Div,
    Span,
}

impl ContainerTag {
    pub fn name(self) -> &'static str {
        match self {
            ContainerTag::Div => "div",
            ContainerTag::Span => "span",
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            ContainerTag::Div => "<div>",
            ContainerTag::Span => "<span>",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            ContainerTag::Div => "</div>",
            ContainerTag::Span => "</span>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFlags {
    pub tag: ContainerTag,
    /// Value shown by the nested `<Counter />`.
    pub counter: u32,
    /// Legacy: the counter was torn down with its parent.
    pub remounted: bool,
    /// Modern: the counter survived the parent change.
    pub state_preserved: bool,
    /// Position within the three-stage reconciliation walk (0..=2).
    pub phase: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFlags {
    /// The narrated "New Item" sits at the head of the list(s).
    pub inserted: bool,
    /// Rows after the head carry their "Rebuilt"/"Reused" badge.
    pub tail_badges: bool,
    pub action_locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineGrainedFlags {
    pub rerendering: bool,
    pub solid_pulse: bool,
    pub base_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Islands {
    pub header: bool,
    pub hero: bool,
    pub content: bool,
    pub footer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub value: &'static str,
    /// Bar width, `0..=100`.
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrationFlags {
    pub islands: Islands,
    /// The server-components column hydrates everything at once, at step 3.
    pub all_at_once: bool,
    pub bundle: Metric,
    pub hydration_time: Metric,
    pub readiness: Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerFlags {
    pub svelte_base: u32,
    pub react_base: u32,
    pub show_pipelines: bool,
    pub svelte_pulse: bool,
    pub react_pulse: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derived {
    Stack(StackFlags),
    Container(ContainerFlags),
    Lists(ListFlags),
    FineGrained(FineGrainedFlags),
    Hydration(HydrationFlags),
    Compiler(CompilerFlags),
}

pub fn derive(era: Era, scenario: Scenario, step: u8) -> Derived {
    match scenario {
        Scenario::Stack => Derived::Stack(stack(era, step)),
        Scenario::ComponentType => Derived::Container(container(era, step)),
        Scenario::DomUpdates => Derived::Lists(lists(step)),
        Scenario::FineGrained => Derived::FineGrained(fine_grained(step)),
        Scenario::Hydration => Derived::Hydration(hydration(step)),
        Scenario::Compiler => Derived::Compiler(compiler(step)),
    }
}

pub fn stack(era: Era, step: u8) -> StackFlags {
    let busy = (2..=3).contains(&step);
    StackFlags {
        busy,
        main_thread_frozen: busy && era == Era::Legacy,
        highlight_head: step > 3,
    }
}

pub fn container(era: Era, step: u8) -> ContainerFlags {
    let swapped = step >= 3;
    let tag = if swapped {
        ContainerTag::Span
    } else {
        ContainerTag::Div
    };
    let legacy = era == Era::Legacy;
    ContainerFlags {
        tag,
        counter: if swapped && legacy {
            0
        } else {
            u32::from(step) + 1
        },
        remounted: swapped && legacy,
        state_preserved: swapped && !legacy,
        phase: if step > 2 { step - 3 } else { step },
    }
}

pub fn lists(step: u8) -> ListFlags {
    ListFlags {
        inserted: step >= 2,
        tail_badges: step >= 3,
        action_locked: step >= 2,
    }
}

pub fn fine_grained(step: u8) -> FineGrainedFlags {
    FineGrainedFlags {
        rerendering: step == 1,
        solid_pulse: step == 1,
        base_count: u32::from(step >= 1),
    }
}

pub fn hydration(step: u8) -> HydrationFlags {
    let islands = match step {
        0 => Islands::default(),
        1 => Islands {
            hero: true,
            ..Islands::default()
        },
        2 => Islands {
            hero: true,
            footer: true,
            ..Islands::default()
        },
        _ => Islands {
            header: true,
            hero: true,
            content: true,
            footer: true,
        },
    };
    let all_at_once = step >= 3;

    let pick = |full: Metric, both: Metric, hero: Metric, none: Metric| {
        if all_at_once {
            full
        } else if islands.hero && islands.footer {
            both
        } else if islands.hero {
            hero
        } else {
            none
        }
    };
    let m = |value, percent| Metric { value, percent };

    HydrationFlags {
        islands,
        all_at_once,
        bundle: pick(m("130KB", 70), m("50KB", 35), m("30KB", 20), m("0KB", 0)),
        hydration_time: pick(m("540ms", 65), m("180ms", 25), m("90ms", 10), m("0ms", 0)),
        readiness: pick(
            m("All at once (delayed)", 60),
            m("Progressive", 90),
            m("Progressive", 40),
            m("Progressive", 0),
        ),
    }
}

pub fn compiler(step: u8) -> CompilerFlags {
    CompilerFlags {
        svelte_base: u32::from(step >= 1),
        react_base: u32::from(step >= 2),
        show_pipelines: step == 1 || step == 2,
        svelte_pulse: step == 1,
        react_pulse: step == 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_pure() {
        for era in Era::all() {
            for scenario in era.scenarios() {
                for step in 0..=scenario.max_step() {
                    assert_eq!(
                        derive(*era, *scenario, step),
                        derive(*era, *scenario, step),
                        "{era:?}/{scenario:?}@{step}"
                    );
                }
            }
        }
    }

    #[test]
    fn blocking_window_is_steps_two_and_three() {
        let busy: Vec<bool> = (0..=5).map(|s| stack(Era::Legacy, s).busy).collect();
        assert_eq!(busy, vec![false, false, true, true, false, false]);
        assert!(stack(Era::Legacy, 3).main_thread_frozen);
        assert!(!stack(Era::Modern, 3).main_thread_frozen);
    }

    #[test]
    fn legacy_container_swap_loses_counter_state() {
        let before = container(Era::Legacy, 2);
        assert_eq!((before.tag, before.counter), (ContainerTag::Div, 3));

        let after = container(Era::Legacy, 3);
        assert_eq!((after.tag, after.counter), (ContainerTag::Span, 0));
        assert!(after.remounted);
        assert_eq!(after.phase, 0);
    }

    #[test]
    fn modern_container_swap_keeps_counting() {
        let counts: Vec<u32> = (0..=5).map(|s| container(Era::Modern, s).counter).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5, 6]);
        assert!(container(Era::Modern, 4).state_preserved);
        assert_eq!(container(Era::Modern, 5).phase, 2);
    }

    #[test]
    fn list_insert_happens_from_step_two() {
        assert!(!lists(1).inserted);
        assert!(lists(2).inserted && !lists(2).tail_badges);
        assert!(lists(3).tail_badges);
    }

    #[test]
    fn hydration_metrics_follow_islands() {
        assert_eq!(hydration(0).bundle.value, "0KB");
        assert_eq!(hydration(1).bundle.value, "30KB");
        assert_eq!(hydration(2).hydration_time.value, "180ms");
        let full = hydration(3);
        assert!(full.all_at_once);
        assert_eq!(full.readiness.value, "All at once (delayed)");
        assert_eq!(full.readiness.percent, 60);
    }

    #[test]
    fn compiler_pulses_alternate() {
        assert!(compiler(1).svelte_pulse && !compiler(1).react_pulse);
        assert!(compiler(2).react_pulse && compiler(2).show_pipelines);
        assert!(!compiler(3).show_pipelines);
        assert_eq!((compiler(3).svelte_base, compiler(3).react_base), (1, 1));
    }
}
