//! Timers backed by tokio tasks.
//!
//! Each armed timer is a spawned task that posts its [`TimerId`] to the
//! player's channel. The main loop hands those ids back to the explainer, which
//! ignores any it no longer owns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reconcile_lab::clock::Duration;
use reconcile_lab::timer::MIN_PERIOD;
use reconcile_lab::{Scheduler, TimerHandle, TimerId};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: UnboundedSender<TimerId>,
    next_id: Arc<AtomicU64>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<TimerId>) -> Self {
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    fn fresh_id(&self) -> TimerId {
        TimerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

/// Aborts its task on drop.
#[derive(Debug)]
pub struct TokioHandle {
    id: TimerId,
    task: JoinHandle<()>,
}

impl TimerHandle for TokioHandle {
    fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for TokioHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioHandle;

    fn every(&mut self, period: Duration) -> TokioHandle {
        let id = self.fresh_id();
        let period = period.max(MIN_PERIOD);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        });
        TokioHandle { id, task }
    }

    fn after(&mut self, delay: Duration) -> TokioHandle {
        let id = self.fresh_id();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(id);
        });
        TokioHandle { id, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn one_shot_delivers_its_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sched = TokioScheduler::new(tx);
        let handle = sched.after(Duration::from_millis(50));
        assert_eq!(rx.recv().await, Some(handle.id()));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_interval_stops_delivering() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sched = TokioScheduler::new(tx);
        let handle = sched.every(Duration::from_millis(10));
        let id = handle.id();
        assert_eq!(rx.recv().await, Some(id));
        drop(handle);
        drop(sched);
        // Only the scheduler and live tasks hold senders; once both are gone the
        // channel closes.
        while let Some(late) = rx.recv().await {
            assert_eq!(late, id);
        }
    }
}
