//! Panel view-models.
//!
//! [`render`] turns an [`Explainer`] into a host-neutral description of what the
//! panel shows. It reads state and picks pre-authored content; it never mutates
//! anything. Hosts map the blocks onto their own widgets.

use crate::content::{self, Link, Notes, Snippet, StageText};
use crate::demo::{DemoAction, Explainer, Side};
use crate::items::Item;
use crate::scenario::{Era, Scenario};
use crate::step::Autoplay;
use crate::sync::{
    CompilerFlags, ContainerFlags, ContainerTag, Derived, FineGrainedFlags, HydrationFlags,
    ListFlags, Metric, StackFlags,
};
use crate::timer::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Good,
    Warn,
    Bad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Pending,
    Active(Tone),
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub label: &'static str,
    pub status: StageStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub text: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub text: String,
    pub detail: Option<String>,
    pub highlight: Option<Tone>,
    pub badges: Vec<Badge>,
}

impl Row {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: None,
            highlight: None,
            badges: Vec::new(),
        }
    }

    fn badge(mut self, text: &'static str, tone: Tone) -> Self {
        self.badges.push(Badge { text, tone });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub label: &'static str,
    pub value: String,
    /// `0..=100`.
    pub percent: u8,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub action: DemoAction,
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub enum Block {
    Indicator {
        label: &'static str,
        value: String,
        tone: Tone,
    },
    Stages {
        caption: String,
        stages: Vec<Stage>,
    },
    List(Vec<Row>),
    /// A counter with its own increment button.
    Counter {
        label: &'static str,
        value: u32,
        action: DemoAction,
        pulse: bool,
        overlay: Option<&'static str>,
    },
    Meter(Meter),
    Code(Snippet),
    Callout {
        tone: Tone,
        title: &'static str,
        /// Markdown.
        body: &'static str,
    },
    Pipeline {
        title: &'static str,
        steps: &'static [&'static str],
    },
    Notes(Notes),
    Actions(Vec<ActionButton>),
    Links(&'static [Link]),
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: Option<&'static str>,
    pub blocks: Vec<Block>,
}

impl Section {
    fn titled(title: &'static str, blocks: Vec<Block>) -> Self {
        Self {
            title: Some(title),
            blocks,
        }
    }

    fn bare(blocks: Vec<Block>) -> Self {
        Self {
            title: None,
            blocks,
        }
    }
}

/// Labels for the shared control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub toggle_label: &'static str,
    pub step_label: &'static str,
    pub show_reset: bool,
}

#[derive(Debug, Clone)]
pub struct PanelView {
    pub title: &'static str,
    pub tone: Tone,
    pub intro: Option<&'static str>,
    pub step_label: String,
    /// One-shot walkthroughs show a progress bar, `0.0..=1.0`.
    pub progress: Option<f32>,
    pub columns: Vec<Section>,
    pub footer: Vec<Section>,
    pub controls: Controls,
}

pub fn controls(autoplay: Autoplay, running: bool) -> Controls {
    match autoplay {
        Autoplay::Loop => Controls {
            toggle_label: if running { "Pause" } else { "Play" },
            step_label: "Step",
            show_reset: true,
        },
        Autoplay::OneShot => Controls {
            toggle_label: if running {
                "Stop Animation"
            } else {
                "Start Animation"
            },
            step_label: "Next Step",
            show_reset: false,
        },
    }
}

fn era_tone(era: Era) -> Tone {
    match era {
        Era::Legacy => Tone::Bad,
        Era::Modern => Tone::Good,
        Era::Future => Tone::Warn,
    }
}

/// Stages before `position` are done, the one at `position` is active and the
/// rest are pending. A position past the end marks everything done.
fn walk(texts: &[StageText], position: usize, tone: Tone) -> Vec<Stage> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if i < position {
                Stage {
                    label: t.done,
                    status: StageStatus::Done,
                }
            } else if i == position {
                Stage {
                    label: t.active,
                    status: StageStatus::Active(tone),
                }
            } else {
                Stage {
                    label: t.pending,
                    status: StageStatus::Pending,
                }
            }
        })
        .collect()
}

pub fn render<S: Scheduler + Clone>(ex: &Explainer<S>) -> PanelView {
    let era = ex.era();
    let scenario = ex.scenario();
    let step = ex.step();
    let one_shot = ex.autoplay() == Autoplay::OneShot;

    let (columns, mut footer) = match *ex.derived() {
        Derived::Stack(f) => stack(ex, f),
        Derived::Container(f) => container(ex, f),
        Derived::Lists(f) => lists(ex, f),
        Derived::FineGrained(f) => fine_grained(ex, f),
        Derived::Hydration(f) => hydration(f),
        Derived::Compiler(f) => compiler(ex, f),
    };
    if era == Era::Future {
        footer.push(Section::titled(
            "Learn More",
            vec![Block::Links(&content::LEARN_MORE)],
        ));
    }

    PanelView {
        title: content::panel_title(era, scenario),
        tone: era_tone(era),
        intro: content::intro(scenario),
        step_label: if one_shot {
            format!("Step {step} of {}", ex.max_step())
        } else {
            format!("Step: {step}/{}", ex.max_step())
        },
        progress: one_shot.then(|| ex.progress()),
        columns,
        footer,
        controls: controls(ex.autoplay(), ex.is_playing()),
    }
}

fn primary<S: Scheduler + Clone>(ex: &Explainer<S>, label: &'static str) -> Block {
    Block::Actions(vec![ActionButton {
        action: DemoAction::Primary,
        label,
        enabled: ex.primary_enabled(),
    }])
}

fn notes_block(era: Era, scenario: Scenario) -> Option<Block> {
    content::notes(era, scenario).map(Block::Notes)
}

type Sections = (Vec<Section>, Vec<Section>);

fn stack<S: Scheduler + Clone>(ex: &Explainer<S>, f: StackFlags) -> Sections {
    let era = ex.era();
    let legacy = era == Era::Legacy;
    let step = ex.step();

    let (status, status_tone) = match (f.busy, legacy) {
        (true, true) => ("Blocked", Tone::Bad),
        (true, false) => ("Processing (Non-Blocking)", Tone::Good),
        (false, _) => ("Running", Tone::Good),
    };
    let meter = if f.main_thread_frozen {
        Meter {
            label: "UI Updates",
            value: "Frozen".into(),
            percent: 5,
            tone: Tone::Bad,
        }
    } else if legacy {
        Meter {
            label: "UI Updates",
            value: "Responsive".into(),
            percent: 100,
            tone: Tone::Good,
        }
    } else {
        Meter {
            label: "UI",
            value: "Remains Responsive".into(),
            percent: 100,
            tone: Tone::Good,
        }
    };
    let action_label = if ex.primary_enabled() {
        if legacy {
            "Add Item (Blocks UI)"
        } else {
            "Add Item (Non-Blocking)"
        }
    } else {
        "Processing..."
    };

    let main_thread = Section::titled(
        "Main Thread",
        vec![
            Block::Indicator {
                label: "Status",
                value: status.into(),
                tone: status_tone,
            },
            Block::Indicator {
                label: "Counter",
                value: ex.heartbeat().to_string(),
                tone: Tone::Neutral,
            },
            Block::Meter(meter),
            primary(ex, action_label),
        ],
    );

    let (title, texts, active_tone) = if legacy {
        let tone = if f.busy { Tone::Bad } else { Tone::Info };
        ("Reconciliation Process", &content::LEGACY_STACK_STAGES, tone)
    } else {
        ("Fiber Reconciliation Process", &content::FIBER_STAGES, Tone::Info)
    };
    let mut process = vec![Block::Stages {
        caption: format!("Step: {step}/{}", ex.max_step()),
        stages: walk(texts, usize::from(step), active_tone),
    }];
    process.extend(notes_block(era, Scenario::Stack));

    let mut list = Vec::new();
    if !legacy {
        list.push(Block::Code(content::CONCURRENT_MODE));
    }
    list.push(Block::List(component_rows(ex.stack_items(), f.highlight_head)));

    (
        vec![main_thread, Section::titled(title, process)],
        vec![Section::titled("Component List", list)],
    )
}

fn component_rows(items: &[Item], highlight_head: bool) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Row {
            text: item.text.clone(),
            detail: Some(format!("id: {}", item.id)),
            highlight: (i == 0 && highlight_head).then_some(Tone::Good),
            badges: Vec::new(),
        })
        .collect()
}

fn container<S: Scheduler + Clone>(ex: &Explainer<S>, f: ContainerFlags) -> Sections {
    let era = ex.era();
    let legacy = era == Era::Legacy;
    let tag_tone = match f.tag {
        ContainerTag::Div => Tone::Info,
        ContainerTag::Span => Tone::Warn,
    };

    let mut counter = Row {
        text: "<Counter />".into(),
        detail: Some(format!("Count: {}", f.counter)),
        highlight: Some(Tone::Good),
        badges: Vec::new(),
    };
    if f.remounted {
        counter = counter.badge("⚠️ Remounted", Tone::Bad);
    }
    if f.state_preserved {
        counter = counter.badge("✓ State Preserved", Tone::Good);
    }
    let label = match f.tag {
        ContainerTag::Div => "Change Container Type",
        ContainerTag::Span => "Revert Container Type",
    };
    let structure = Section::titled(
        "Component Structure",
        vec![
            Block::Indicator {
                label: "Container",
                value: f.tag.open().into(),
                tone: tag_tone,
            },
            Block::List(vec![counter]),
            Block::Indicator {
                label: "Container",
                value: f.tag.close().into(),
                tone: tag_tone,
            },
            primary(ex, label),
        ],
    );

    let tone = match (legacy, f.phase) {
        (_, 0) | (false, 1) => Tone::Info,
        (true, _) => Tone::Bad,
        (false, _) => Tone::Good,
    };
    let mut process = vec![Block::Stages {
        caption: format!("Step: {}/2", f.phase),
        stages: walk(stage_texts(legacy), usize::from(f.phase), tone),
    }];
    process.extend(notes_block(era, Scenario::ComponentType));
    if !legacy {
        process.push(Block::Code(content::PRESERVED_CONTAINER));
    }

    (
        vec![structure, Section::titled("Reconciliation Process", process)],
        Vec::new(),
    )
}

fn stage_texts(legacy: bool) -> &'static [StageText] {
    if legacy {
        &content::LEGACY_TYPE_STAGES
    } else {
        &content::MODERN_TYPE_STAGES
    }
}

/// Badges for one DOM-updates list: `head` on the inserted row, `tail` on the
/// rows after it once the reuse step is reached.
fn list_rows(items: &[Item], f: ListFlags, head: Badge, tail: Badge) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut row = Row::plain(item.text.clone());
            if i == 0 && f.inserted {
                row.highlight = Some(head.tone);
                row.badges.push(head);
            }
            if i > 0 && f.tail_badges {
                row.badges.push(tail);
            }
            row
        })
        .collect()
}

fn lists<S: Scheduler + Clone>(ex: &Explainer<S>, f: ListFlags) -> Sections {
    let era = ex.era();
    let badge = |text, tone| Badge { text, tone };
    let columns = if era == Era::Legacy {
        let mut keyless = vec![
            Block::Code(content::LIST_WITHOUT_KEYS),
            Block::List(list_rows(
                ex.keyless_items(),
                f,
                badge("⚠️ New", Tone::Bad),
                badge("⚠️ Rebuilt", Tone::Bad),
            )),
        ];
        let mut keyed = vec![
            Block::Code(content::LIST_WITH_KEYS),
            Block::List(list_rows(
                ex.keyed_items(),
                f,
                badge("✓ Only this node created", Tone::Good),
                badge("✓ Reused", Tone::Good),
            )),
        ];
        if f.inserted {
            keyless.push(Block::Callout {
                tone: Tone::Bad,
                title: "Problem:",
                body: "All DOM nodes recreated when adding to the beginning",
            });
            keyed.push(Block::Callout {
                tone: Tone::Good,
                title: "Solution:",
                body: "Only new node created, others moved efficiently",
            });
        }
        vec![
            Section::titled(content::LIST_WITHOUT_KEYS.caption, keyless),
            Section::titled(content::LIST_WITH_KEYS.caption, keyed),
        ]
    } else {
        let mut keyed = vec![
            Block::Code(content::LIST_WITH_KEYS_MODERN),
            Block::List(list_rows(
                ex.keyed_items(),
                f,
                badge("✓ Only new node created", Tone::Good),
                badge("✓ Efficiently reused", Tone::Good),
            )),
        ];
        let mut extra = vec![
            Block::Code(content::SERVER_COMPONENTS),
            Block::Code(content::AUTOMATIC_BATCHING),
        ];
        if f.inserted {
            keyed.push(Block::Callout {
                tone: Tone::Good,
                title: "Solution:",
                body: "Enhanced diffing algorithm with O(n) complexity",
            });
            extra.push(Block::Callout {
                tone: Tone::Good,
                title: "Modern Enhancements:",
                body: content::MODERN_ENHANCEMENTS,
            });
        }
        vec![
            Section::titled(content::LIST_WITH_KEYS_MODERN.caption, keyed),
            Section::titled("Additional Optimizations", extra),
        ]
    };

    let label = match (f.action_locked, era) {
        (true, _) => "Items Added",
        (false, Era::Legacy) => "Add Item to Both Lists",
        (false, _) => "Add Item to List",
    };
    let mut footer = vec![primary(ex, label)];
    footer.extend(notes_block(era, Scenario::DomUpdates));
    (columns, vec![Section::bare(footer)])
}

fn fine_grained<S: Scheduler + Clone>(ex: &Explainer<S>, f: FineGrainedFlags) -> Sections {
    let react = ex.counter(Side::Left);
    let solid = ex.counter(Side::Right);
    let columns = vec![
        Section::titled(
            "React Approach",
            vec![
                Block::Counter {
                    label: "Counter",
                    value: react,
                    action: DemoAction::Increment(Side::Left),
                    pulse: false,
                    overlay: f.rerendering.then_some("Re-rendering entire component"),
                },
                Block::Code(content::REACT_COUNTER),
                Block::Callout {
                    tone: Tone::Warn,
                    title: "Challenge:",
                    body: "React updates at component level, causing unnecessary re-renders of DOM nodes that haven't changed.",
                },
            ],
        ),
        Section::titled(
            "SolidJS/Svelte Approach",
            vec![
                Block::Counter {
                    label: "Counter",
                    value: solid,
                    action: DemoAction::Increment(Side::Right),
                    pulse: f.solid_pulse,
                    overlay: None,
                },
                Block::Code(content::SOLID_COUNTER),
                Block::Callout {
                    tone: Tone::Good,
                    title: "Advantage:",
                    body: "Only updates the exact DOM nodes that change, leading to better performance and less wasted rendering.",
                },
            ],
        ),
    ];
    let bar = |base: u32, per: u32, n: u32| base.saturating_add(per.saturating_mul(n)).min(100) as u8;
    let footer = vec![Section::titled(
        "Performance Comparison",
        vec![
            Block::Meter(Meter {
                label: "React: More work",
                value: format!("{}%", bar(20, 10, react)),
                percent: bar(20, 10, react),
                tone: Tone::Info,
            }),
            Block::Meter(Meter {
                label: "SolidJS: Less work",
                value: format!("{}%", bar(10, 5, solid)),
                percent: bar(10, 5, solid),
                tone: Tone::Good,
            }),
        ],
    )];
    (columns, footer)
}

fn hydration(f: HydrationFlags) -> Sections {
    let island = |text: &'static str, hydrated: bool, idle: Option<&'static str>, pulse: bool| {
        let mut row = Row::plain(text);
        if hydrated && pulse {
            row.highlight = Some(Tone::Good);
        }
        match (idle, hydrated) {
            (Some(_), true) => row.badge("Hydrated", Tone::Good),
            (Some(directive), false) => row.badge(directive, Tone::Warn),
            (None, _) => row,
        }
    };
    let islands = vec![
        island("Static Header", f.islands.header, None, false),
        island("Interactive Hero", f.islands.hero, Some("client:load"), true),
        island("Static Content", f.islands.content, None, false),
        island("Interactive Footer", f.islands.footer, Some("client:visible"), true),
    ];

    let server = |text: &'static str, idle: &'static str| {
        let row = Row::plain(text);
        if f.all_at_once {
            Row {
                highlight: Some(Tone::Info),
                ..row
            }
            .badge("Hydrated", Tone::Info)
        } else {
            row.badge(idle, Tone::Neutral)
        }
    };
    let rsc = vec![
        server("Header (Server Component)", "No Client JS"),
        server("Hero (Client Component)", "use client"),
        server("Content (Server Component)", "No Client JS"),
        server("Footer (Client Component)", "use client"),
    ];

    let columns = vec![
        Section::titled(
            content::ISLANDS_LAYOUT.caption,
            vec![
                Block::List(islands),
                Block::Code(content::ISLANDS_LAYOUT),
                Block::Callout {
                    tone: Tone::Good,
                    title: "Advantage:",
                    body: "Only hydrates interactive components, dramatically reducing JavaScript payload and execution time.",
                },
            ],
        ),
        Section::titled(
            content::SERVER_COMPONENT_SPLIT.caption,
            vec![
                Block::List(rsc),
                Block::Code(content::SERVER_COMPONENT_SPLIT),
                Block::Callout {
                    tone: Tone::Warn,
                    title: "Challenge:",
                    body: "While Server Components help, React still hydrates all client components at once, rather than truly on-demand.",
                },
            ],
        ),
    ];

    let tone = if f.all_at_once { Tone::Warn } else { Tone::Good };
    let meter = |label, m: Metric| {
        Block::Meter(Meter {
            label,
            value: m.value.to_string(),
            percent: m.percent,
            tone,
        })
    };
    let footer = vec![Section::titled(
        "Hydration Performance Metrics",
        vec![
            meter("JS Bundle Size", f.bundle),
            meter("Hydration Time", f.hydration_time),
            meter("Interaction Readiness", f.readiness),
        ],
    )];
    (columns, footer)
}

fn compiler<S: Scheduler + Clone>(ex: &Explainer<S>, f: CompilerFlags) -> Sections {
    let mut svelte = vec![
        Block::Counter {
            label: "Count",
            value: ex.counter(Side::Left),
            action: DemoAction::Increment(Side::Left),
            pulse: f.svelte_pulse,
            overlay: None,
        },
        Block::Code(content::SVELTE_SOURCE),
        Block::Code(content::SVELTE_COMPILED),
    ];
    let mut react = vec![
        Block::Counter {
            label: "Count",
            value: ex.counter(Side::Right),
            action: DemoAction::Increment(Side::Right),
            pulse: f.react_pulse,
            overlay: None,
        },
        Block::Code(content::REACT_SOURCE),
        Block::Code(content::REACT_RUNTIME),
    ];
    if f.show_pipelines {
        svelte.push(Block::Pipeline {
            title: "Compilation Process:",
            steps: &content::COMPILE_PIPELINE,
        });
        react.push(Block::Pipeline {
            title: "Runtime Process:",
            steps: &content::RUNTIME_PIPELINE,
        });
    }
    svelte.push(Block::Callout {
        tone: Tone::Good,
        title: "Advantage:",
        body: "Compiles to optimal JavaScript that directly manipulates exactly what needs to change.",
    });
    react.push(Block::Callout {
        tone: Tone::Warn,
        title: "Challenge:",
        body: "Runtime reconciliation introduces overhead. React Compiler (experimental) aims to bring compile-time optimizations.",
    });

    let mut footer = vec![Section::bare(vec![Block::Actions(vec![ActionButton {
        action: DemoAction::ToggleAdvanced,
        label: "Toggle Advanced Example",
        enabled: true,
    }])])];
    if ex.advanced_open() {
        footer.push(Section::titled(
            "Deep Dive: Compiler Optimizations",
            content::COMPILER_DEEP_DIVE
                .iter()
                .copied()
                .map(Block::Notes)
                .collect(),
        ));
    }
    (
        vec![
            Section::titled(content::SVELTE_SOURCE.caption, svelte),
            Section::titled(content::REACT_SOURCE.caption, react),
        ],
        footer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::timer::ManualScheduler;

    fn explainer(era: Era, scenario: Scenario) -> Explainer<ManualScheduler> {
        let mut ex = Explainer::new(era, ManualScheduler::new(), Settings::default());
        ex.select(scenario);
        ex
    }

    fn stages(view: &PanelView) -> Vec<StageStatus> {
        view.columns
            .iter()
            .flat_map(|c| &c.blocks)
            .find_map(|b| match b {
                Block::Stages { stages, .. } => Some(stages.iter().map(|s| s.status).collect()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn rows(view: &PanelView) -> Vec<Vec<Row>> {
        view.columns
            .iter()
            .chain(&view.footer)
            .flat_map(|c| &c.blocks)
            .filter_map(|b| match b {
                Block::List(rows) => Some(rows.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn stack_stages_walk_forward() {
        let mut ex = explainer(Era::Legacy, Scenario::Stack);
        ex.advance_once();
        ex.advance_once();
        let view = render(&ex);
        assert_eq!(view.step_label, "Step: 2/5");
        assert_eq!(
            stages(&view),
            vec![
                StageStatus::Done,
                StageStatus::Done,
                StageStatus::Active(Tone::Bad),
                StageStatus::Pending,
                StageStatus::Pending,
            ]
        );

        for _ in 0..3 {
            ex.advance_once();
        }
        assert!(stages(&render(&ex)).iter().all(|s| *s == StageStatus::Done));
    }

    #[test]
    fn busy_stack_disables_the_add_button() {
        let mut ex = explainer(Era::Legacy, Scenario::Stack);
        ex.advance_once();
        ex.advance_once();
        let view = render(&ex);
        let button = view
            .columns
            .iter()
            .flat_map(|c| &c.blocks)
            .find_map(|b| match b {
                Block::Actions(a) => a.first().copied(),
                _ => None,
            })
            .expect("action");
        assert!(!button.enabled);
        assert_eq!(button.label, "Processing...");
    }

    #[test]
    fn legacy_dom_lists_badge_rebuilt_rows() {
        let mut ex = explainer(Era::Legacy, Scenario::DomUpdates);
        for _ in 0..3 {
            ex.advance_once();
        }
        let lists = rows(&render(&ex));
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0][0].badges[0].text, "⚠️ New");
        assert_eq!(lists[0][1].badges[0].text, "⚠️ Rebuilt");
        assert_eq!(lists[1][2].badges[0].text, "✓ Reused");
    }

    #[test]
    fn future_panels_carry_progress_and_links() {
        let mut ex = explainer(Era::Future, Scenario::Hydration);
        ex.advance_once();
        let view = render(&ex);
        assert_eq!(view.step_label, "Step 1 of 3");
        assert!(view.progress.is_some_and(|p| (p - 1.0 / 3.0).abs() < 1e-6));
        assert_eq!(view.controls.toggle_label, "Start Animation");
        assert!(view
            .footer
            .iter()
            .any(|s| s.blocks.iter().any(|b| matches!(b, Block::Links(_)))));
    }

    #[test]
    fn deep_dive_appears_only_when_open() {
        let mut ex = explainer(Era::Future, Scenario::Compiler);
        let closed = render(&ex).footer.len();
        ex.toggle_advanced();
        assert_eq!(render(&ex).footer.len(), closed + 1);
    }

    #[test]
    fn every_scenario_renders_at_every_step() {
        for era in Era::all() {
            for scenario in era.scenarios() {
                let mut ex = explainer(*era, *scenario);
                for _ in 0..=scenario.max_step() {
                    let view = render(&ex);
                    assert!(!view.columns.is_empty(), "{era:?}/{scenario:?}");
                    ex.advance_once();
                }
            }
        }
    }
}
