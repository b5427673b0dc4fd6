//! Timers backed by `window.setInterval` / `window.setTimeout`.

use std::cell::Cell;
use std::rc::Rc;

use reconcile_lab::clock::Duration;
use reconcile_lab::timer::MIN_PERIOD;
use reconcile_lab::{Scheduler, TimerHandle, TimerId};
use wasm_bindgen::prelude::*;

type Sink = Rc<dyn Fn(TimerId)>;

/// Hands every fired [`TimerId`] to a sink. The sink routes it back to the
/// page that armed it.
#[derive(Clone)]
pub(super) struct WebScheduler {
    sink: Sink,
    next_id: Rc<Cell<u64>>,
}

impl WebScheduler {
    pub(super) fn new(sink: impl Fn(TimerId) + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
            next_id: Rc::new(Cell::new(1)),
        }
    }

    fn fresh_id(&self) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TimerId(id)
    }

    fn arm(&self, delay: Duration, repeat: bool) -> WebHandle {
        let id = self.fresh_id();
        let sink = Rc::clone(&self.sink);
        let cb = Closure::wrap(Box::new(move || sink(id)) as Box<dyn FnMut()>);
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        let raw = web_sys::window().and_then(|w| {
            let f = cb.as_ref().unchecked_ref();
            let res = if repeat {
                w.set_interval_with_callback_and_timeout_and_arguments_0(f, ms)
            } else {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(f, ms)
            };
            res.ok()
        });
        if raw.is_none() {
            web_sys::console::warn_1(&JsValue::from_str(&format!("failed to arm {id}")));
        }

        WebHandle {
            id,
            raw,
            repeat,
            _cb: cb,
        }
    }
}

/// Clears the browser timer on drop; the closure is released with it.
pub(super) struct WebHandle {
    id: TimerId,
    raw: Option<i32>,
    repeat: bool,
    _cb: Closure<dyn FnMut()>,
}

impl TimerHandle for WebHandle {
    fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for WebHandle {
    fn drop(&mut self) {
        let (Some(raw), Some(w)) = (self.raw, web_sys::window()) else {
            return;
        };
        if self.repeat {
            w.clear_interval_with_handle(raw);
        } else {
            w.clear_timeout_with_handle(raw);
        }
    }
}

impl Scheduler for WebScheduler {
    type Handle = WebHandle;

    fn every(&mut self, period: Duration) -> WebHandle {
        self.arm(period.max(MIN_PERIOD), true)
    }

    fn after(&mut self, delay: Duration) -> WebHandle {
        self.arm(delay, false)
    }
}
