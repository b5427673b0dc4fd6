//! Bulk insert playground: appends a batch of rows either inline or on the
//! next turn of the event loop.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use reconcile_lab::{BulkInsertDemo, BulkOutcome, Settings};
use web_time::Instant;

use super::scheduler::WebScheduler;

/// Rows drawn from the head of the list; the rest are only counted.
const VISIBLE_ROWS: usize = 50;

#[component]
pub(super) fn Playground(
    settings: ReadSignal<Settings>,
    set_status: WriteSignal<String>,
) -> impl IntoView {
    let demo = StoredValue::new_local(None::<BulkInsertDemo<WebScheduler>>);
    let (version, set_version) = signal(0u64);
    let started = StoredValue::new_local(None::<Instant>);

    let scheduler = WebScheduler::new(move |id| {
        let mut landed = false;
        demo.update_value(|d| {
            if let Some(d) = d.as_mut() {
                landed = d.on_timer(id);
            }
        });
        if landed {
            if let Some(t0) = started.get_value() {
                set_status.set(format!("batch landed after {} ms", t0.elapsed().as_millis()));
            }
            set_version.update(|v| *v += 1);
        }
    });
    demo.set_value(Some(BulkInsertDemo::new(
        scheduler,
        settings.get_untracked().bulk_batch,
    )));

    Effect::new(move |_| {
        let batch = settings.get().bulk_batch;
        demo.update_value(|d| {
            if let Some(d) = d.as_mut() {
                d.set_batch(batch);
            }
        });
        set_version.update(|v| *v += 1);
    });

    on_cleanup(move || demo.set_value(None));

    let add = move |_: MouseEvent| {
        let t0 = Instant::now();
        started.set_value(Some(t0));
        let mut outcome = BulkOutcome::Busy;
        demo.update_value(|d| {
            if let Some(d) = d.as_mut() {
                outcome = d.add_batch();
            }
        });
        match outcome {
            BulkOutcome::Appended(n) => set_status.set(format!(
                "appended {n} rows in {} ms (UI was blocked)",
                t0.elapsed().as_millis()
            )),
            BulkOutcome::Deferred => set_status.set("batch deferred to the next turn".to_string()),
            BulkOutcome::Busy => set_status.set("a batch is already pending".to_string()),
        }
        set_version.update(|v| *v += 1);
    };

    let clear = move |_: MouseEvent| {
        demo.update_value(|d| {
            if let Some(d) = d.as_mut() {
                d.clear();
            }
        });
        set_version.update(|v| *v += 1);
    };

    let toggle_mode = move |_: MouseEvent| {
        demo.update_value(|d| {
            if let Some(d) = d.as_mut() {
                let on = !d.legacy_mode();
                d.set_legacy_mode(on);
            }
        });
        set_version.update(|v| *v += 1);
    };

    let snapshot = move || {
        version.get();
        demo.with_value(|d| {
            d.as_ref().map(|d| {
                (
                    d.legacy_mode(),
                    d.is_loading(),
                    d.total(),
                    d.batch(),
                    d.items()
                        .iter()
                        .take(VISIBLE_ROWS)
                        .map(|i| (i.id, i.text.clone()))
                        .collect::<Vec<_>>(),
                )
            })
        })
    };

    view! {
        <section class="panel playground">
            {move || {
                snapshot()
                    .map(|(legacy, loading, total, batch, rows)| {
                        view! {
                            <div class="actions">
                                <button class="btn" on:click=toggle_mode>
                                    {if legacy { "Mode: Legacy (blocking)" } else { "Mode: Modern (deferred)" }}
                                </button>
                                <button class="btn primary" disabled=loading on:click=add>
                                    {format!("Add {batch} Items")}
                                </button>
                                <button class="btn" on:click=clear>"Clear"</button>
                            </div>
                            {loading.then(|| view! { <div class="indicator tone-info">"Adding..."</div> })}
                            <div class="indicator">{format!("Total items: {total}")}</div>
                            <ul class="rows">
                                {rows
                                    .into_iter()
                                    .map(|(id, text)| view! { <li class="row" data-id=id.to_string()>{text}</li> })
                                    .collect_view()}
                            </ul>
                            {(total > VISIBLE_ROWS)
                                .then(|| view! { <div class="row-detail">{format!("... {} more", total - VISIBLE_ROWS)}</div> })}
                        }
                            .into_any()
                    })
                    .unwrap_or_else(|| ().into_any())
            }}
        </section>
    }
}
