//! Cancelable timers.
//!
//! Every timer the explainer uses (autoplay, heartbeat, scripted follow-ups)
//! is obtained from a [`Scheduler`] as a handle. Dropping the handle cancels the
//! timer; there is no separate `cancel` call to forget. Each handle carries a
//! [`TimerId`] so that a host which delivers timer events asynchronously (a
//! channel, a JS callback) can hand the id back and the owner can tell a live
//! timer from one it has already let go of.

use core::cell::RefCell;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;

use crate::clock::Duration;

/// Shortest repeating period a scheduler accepts.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl core::fmt::Display for TimerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// An armed timer. Dropping it must cancel the underlying timer.
pub trait TimerHandle {
    fn id(&self) -> TimerId;
}

pub trait Scheduler {
    type Handle: TimerHandle;

    /// Fires `id` every `period` until the handle is dropped.
    fn every(&mut self, period: Duration) -> Self::Handle;

    /// Fires `id` once after `delay`, unless the handle is dropped first.
    fn after(&mut self, delay: Duration) -> Self::Handle;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Every(Duration),
    Once,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    repeat: Repeat,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: HashMap<TimerId, Pending>,
}

impl ManualState {
    fn arm(&mut self, delay: Duration, repeat: Repeat) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert(
            id,
            Pending {
                due: self.now + delay,
                repeat,
            },
        );
        id
    }
}

/// Virtual-clock scheduler.
///
/// Nothing fires on its own: the owner advances time with [`run_for`] (or
/// [`pop_due`]) and routes each fired id back into whatever owns the handle.
/// Clones share the same clock and timer table.
///
/// [`run_for`]: ManualScheduler::run_for
/// [`pop_due`]: ManualScheduler::pop_due
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

#[derive(Debug)]
pub struct ManualHandle {
    id: TimerId,
    state: Weak<RefCell<ManualState>>,
}

impl TimerHandle for ManualHandle {
    fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().pending.remove(&self.id);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.state.borrow().pending.contains_key(&id)
    }

    /// Pops the earliest timer due at or before `deadline`, moving the clock to
    /// its due time. Repeating timers are re-armed; one-shots are disarmed.
    pub fn pop_due(&self, deadline: Duration) -> Option<TimerId> {
        let mut state = self.state.borrow_mut();
        let (id, pending) = state
            .pending
            .iter()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(id, p)| (p.due, **id))
            .map(|(id, p)| (*id, *p))?;

        state.now = state.now.max(pending.due);
        match pending.repeat {
            Repeat::Every(period) => {
                if let Some(p) = state.pending.get_mut(&id) {
                    p.due += period;
                }
            }
            Repeat::Once => {
                state.pending.remove(&id);
            }
        }
        Some(id)
    }

    /// Advances the clock by `by`, delivering every timer that falls due (in
    /// due order, including timers armed by `deliver` itself) to `deliver`.
    /// Returns how many deliveries were made.
    pub fn run_for(&self, by: Duration, mut deliver: impl FnMut(TimerId)) -> usize {
        let deadline = self.now() + by;
        let mut delivered = 0;
        while let Some(id) = self.pop_due(deadline) {
            deliver(id);
            delivered += 1;
        }
        let mut state = self.state.borrow_mut();
        state.now = state.now.max(deadline);
        delivered
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&mut self, period: Duration) -> ManualHandle {
        let period = period.max(MIN_PERIOD);
        let id = self.state.borrow_mut().arm(period, Repeat::Every(period));
        ManualHandle {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    fn after(&mut self, delay: Duration) -> ManualHandle {
        let id = self.state.borrow_mut().arm(delay, Repeat::Once);
        ManualHandle {
            id,
            state: Rc::downgrade(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_handle_disarms_it() {
        let mut sched = ManualScheduler::new();
        let h = sched.every(Duration::from_millis(10));
        let id = h.id();
        assert!(sched.is_pending(id));

        drop(h);
        assert!(!sched.is_pending(id));
        assert_eq!(sched.run_for(Duration::from_secs(1), |_| {}), 0);
    }

    #[test]
    fn repeating_timer_fires_once_per_period() {
        let mut sched = ManualScheduler::new();
        let h = sched.every(Duration::from_millis(100));

        let mut fired = Vec::new();
        sched.run_for(Duration::from_millis(350), |id| fired.push(id));
        assert_eq!(fired, vec![h.id(); 3]);
        assert_eq!(sched.now(), Duration::from_millis(350));
    }

    #[test]
    fn one_shot_fires_once_then_disarms() {
        let mut sched = ManualScheduler::new();
        let h = sched.after(Duration::from_millis(50));

        let mut count = 0;
        sched.run_for(Duration::from_secs(1), |_| count += 1);
        assert_eq!(count, 1);
        assert!(!sched.is_pending(h.id()));
    }

    #[test]
    fn deliveries_come_in_due_order() {
        let mut sched = ManualScheduler::new();
        let slow = sched.after(Duration::from_millis(30));
        let fast = sched.after(Duration::from_millis(10));

        let mut fired = Vec::new();
        sched.run_for(Duration::from_millis(40), |id| fired.push(id));
        assert_eq!(fired, vec![fast.id(), slow.id()]);
    }

    #[test]
    fn timers_armed_during_delivery_fire_within_the_same_window() {
        let sched = ManualScheduler::new();
        let mut arming = sched.clone();
        let first = arming.after(Duration::from_millis(10));
        let mut _chained: Option<ManualHandle> = None;

        let mut fired = Vec::new();
        sched.run_for(Duration::from_millis(100), |id| {
            fired.push(id);
            if id == first.id() {
                _chained = Some(arming.after(Duration::from_millis(20)));
            }
        });

        assert_eq!(fired.len(), 2);
        assert_eq!(sched.now(), Duration::from_millis(100));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut sched = ManualScheduler::new();
        let _h = sched.every(Duration::ZERO);
        let n = sched.run_for(Duration::from_millis(5), |_| {});
        assert_eq!(n, 5);
    }
}
