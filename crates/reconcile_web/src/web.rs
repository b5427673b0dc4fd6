use leptos::ev::MouseEvent;
use leptos::prelude::*;
use reconcile_lab::panels::{render, PanelView};
use reconcile_lab::settings::{
    BLOCKING_SPIN_RANGE, BULK_BATCH_RANGE, HEARTBEAT_RANGE, LOOP_PERIOD_RANGE,
    ONE_SHOT_PERIOD_RANGE,
};
use reconcile_lab::{ActionOutcome, DemoAction, Era, Explainer, Scenario, Settings};

use crate::ui_model::PageTab;

mod markdown;
mod panel;
mod playground;
mod scheduler;
mod storage;

use panel::panel_body;
use playground::Playground;
use scheduler::WebScheduler;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let (tab, set_tab) = signal(storage::load_last_tab());
    let (settings, set_settings) = signal(storage::load_settings());
    let (status, set_status) = signal(String::new());
    let (show_settings, set_show_settings) = signal(false);

    let select_tab = move |t: PageTab| {
        set_tab.set(t);
        storage::save_last_tab(t);
        set_status.set(String::new());
    };

    view! {
        <main class="app">
            <header class="app-head">
                <h1>{move || tab.get().heading()}</h1>
                <nav class="tabs">
                    {PageTab::all()
                        .iter()
                        .copied()
                        .map(|t| {
                            view! {
                                <button
                                    class="tab"
                                    class:active=move || tab.get() == t
                                    on:click=move |_| select_tab(t)
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                    <button
                        class="tab settings-toggle"
                        class:active=move || show_settings.get()
                        on:click=move |_| set_show_settings.update(|v| *v = !*v)
                    >
                        "Settings"
                    </button>
                </nav>
            </header>

            <Show when=move || show_settings.get()>
                <SettingsPanel settings=settings set_settings=set_settings set_status=set_status />
            </Show>

            // Re-created on every tab change; the old page's timers die with it.
            {move || match tab.get() {
                PageTab::Era(era) => {
                    view! { <EraPage era=era settings=settings set_status=set_status /> }.into_any()
                }
                PageTab::Playground => {
                    view! { <Playground settings=settings set_status=set_status /> }.into_any()
                }
            }}

            <footer class="status">{move || status.get()}</footer>
        </main>
    }
}

/// Everything an era page needs to draw one frame.
struct Frame {
    scenario: Scenario,
    playing: bool,
    view: PanelView,
}

#[component]
fn EraPage(
    era: Era,
    settings: ReadSignal<Settings>,
    set_status: WriteSignal<String>,
) -> impl IntoView {
    let page = StoredValue::new_local(None::<Explainer<WebScheduler>>);
    let (version, set_version) = signal(0u64);
    let bump = move || set_version.update(|v| *v += 1);

    let scheduler = WebScheduler::new(move |id| {
        let mut changed = false;
        page.update_value(|p| {
            if let Some(ex) = p.as_mut() {
                changed = ex.on_timer(id).changed_panel();
            }
        });
        if changed {
            bump();
        }
    });
    page.set_value(Some(Explainer::new(
        era,
        scheduler,
        settings.get_untracked(),
    )));

    Effect::new(move |_| {
        let s = settings.get();
        page.update_value(|p| {
            if let Some(ex) = p.as_mut() {
                ex.apply_settings(s);
            }
        });
        bump();
    });

    on_cleanup(move || page.set_value(None));

    let with_page = move |f: &dyn Fn(&mut Explainer<WebScheduler>)| {
        page.update_value(|p| {
            if let Some(ex) = p.as_mut() {
                f(ex);
            }
        });
        bump();
    };

    let on_action = Callback::new(move |action: DemoAction| {
        let mut outcome = ActionOutcome::Ignored;
        page.update_value(|p| {
            if let Some(ex) = p.as_mut() {
                outcome = ex.perform(action);
            }
        });
        if outcome == ActionOutcome::Ignored {
            set_status.set("not available right now".to_string());
        }
        bump();
    });

    let frame = move || {
        version.get();
        page.with_value(|p| {
            p.as_ref().map(|ex| Frame {
                scenario: ex.scenario(),
                playing: ex.is_playing(),
                view: render(ex),
            })
        })
    };

    view! {
        {move || {
            let Some(Frame { scenario, playing, view }) = frame() else {
                return ().into_any();
            };
            let controls = view.controls;
            view! {
                <nav class="scenario-tabs">
                    {era
                        .scenarios()
                        .iter()
                        .copied()
                        .map(|s| {
                            view! {
                                <button
                                    class="tab"
                                    class:active={s == scenario}
                                    on:click=move |_: MouseEvent| with_page(&|ex| {
                                        ex.select(s);
                                    })
                                >
                                    {s.tab_label(era)}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="control-bar">
                    <button
                        class="btn"
                        class:active=playing
                        on:click=move |_: MouseEvent| with_page(&|ex| ex.toggle())
                    >
                        {controls.toggle_label}
                    </button>
                    <button
                        class="btn"
                        on:click=move |_: MouseEvent| with_page(&|ex| {
                            ex.advance_once();
                        })
                    >
                        {controls.step_label}
                    </button>
                    {controls.show_reset.then(|| view! {
                        <button class="btn" on:click=move |_: MouseEvent| with_page(&|ex| ex.reset())>
                            "Reset"
                        </button>
                    })}
                </div>
                {panel_body(view, on_action)}
            }
            .into_any()
        }}
    }
}

/// One editable timing knob.
struct Field {
    label: &'static str,
    range: (u32, u32),
    get: fn(&Settings) -> u32,
    set: fn(&mut Settings, u32),
}

const FIELDS: [Field; 5] = [
    Field {
        label: "Walkthrough step (ms)",
        range: LOOP_PERIOD_RANGE,
        get: |s| s.loop_period_ms,
        set: |s, v| s.loop_period_ms = v,
    },
    Field {
        label: "Comparison step (ms)",
        range: ONE_SHOT_PERIOD_RANGE,
        get: |s| s.one_shot_period_ms,
        set: |s, v| s.one_shot_period_ms = v,
    },
    Field {
        label: "Heartbeat (ms, 0 = off)",
        range: HEARTBEAT_RANGE,
        get: |s| s.heartbeat_ms,
        set: |s, v| s.heartbeat_ms = v,
    },
    Field {
        label: "Blocking add (ms)",
        range: BLOCKING_SPIN_RANGE,
        get: |s| s.blocking_spin_ms,
        set: |s, v| s.blocking_spin_ms = v,
    },
    Field {
        label: "Bulk batch size",
        range: BULK_BATCH_RANGE,
        get: |s| s.bulk_batch,
        set: |s, v| s.bulk_batch = v,
    },
];

#[component]
fn SettingsPanel(
    settings: ReadSignal<Settings>,
    set_settings: WriteSignal<Settings>,
    set_status: WriteSignal<String>,
) -> impl IntoView {
    let commit = move |idx: usize, raw: String| {
        let field = &FIELDS[idx];
        let Ok(v) = raw.trim().parse::<u32>() else {
            set_status.set(format!("{}: not a number", field.label));
            return;
        };
        let mut next = settings.get_untracked();
        (field.set)(&mut next, v);
        match next.validate() {
            Ok(()) => {
                set_settings.set(next);
                storage::save_settings(&next);
                set_status.set("settings saved".to_string());
            }
            Err(e) => set_status.set(e.to_string()),
        }
    };

    let restore_defaults = move |_: MouseEvent| {
        storage::clear_settings();
        set_settings.set(Settings::default());
        set_status.set("settings reset to defaults".to_string());
    };

    view! {
        <section class="panel settings">
            {FIELDS
                .iter()
                .enumerate()
                .map(|(idx, field)| {
                    let (min, max) = field.range;
                    let get = field.get;
                    view! {
                        <label class="param">
                            <span>{field.label}</span>
                            <input
                                class="input"
                                type="number"
                                min=min
                                max=max
                                prop:value=move || get(&settings.get()).to_string()
                                on:change=move |ev| commit(idx, event_target_value(&ev))
                            />
                        </label>
                    }
                })
                .collect_view()}
            <button class="btn link" on:click=restore_defaults>"Reset"</button>
        </section>
    }
}
