//! The step driver: a bounded animation counter with optional autoplay.

use tracing::{debug, trace};

use crate::clock::Duration;
use crate::timer::{Scheduler, TimerHandle, TimerId};

/// What autoplay does when it reaches the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoplay {
    /// Wrap to 0 and keep playing. Starting resumes from the current step.
    Loop,
    /// Stop and rewind to 0. Starting (and stopping) rewinds to 0.
    OneShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced(u8),
    Wrapped,
    /// A one-shot run passed its last step; playback stopped.
    Finished,
    /// The id does not belong to the live autoplay timer.
    Stale,
}

pub struct StepDriver<S: Scheduler> {
    step: u8,
    max: u8,
    autoplay: Autoplay,
    period: Duration,
    scheduler: S,
    timer: Option<S::Handle>,
}

impl<S: Scheduler> StepDriver<S> {
    pub fn new(scheduler: S, max: u8, autoplay: Autoplay, period: Duration) -> Self {
        Self {
            step: 0,
            max,
            autoplay,
            period,
            scheduler,
            timer: None,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Fraction of the run completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        f32::from(self.step) / f32::from(self.max)
    }

    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timer.as_ref().is_some_and(|t| t.id() == id)
    }

    /// Begins autoplay. No-op while already running.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }
        if self.autoplay == Autoplay::OneShot {
            self.step = 0;
        }
        let handle = self.scheduler.every(self.period);
        debug!(timer = %handle.id(), period_ms = self.period.as_millis() as u64, "autoplay started");
        self.timer = Some(handle);
    }

    /// Cancels autoplay. A one-shot driver also rewinds to 0.
    pub fn stop(&mut self) {
        if let Some(handle) = self.timer.take() {
            debug!(timer = %handle.id(), step = self.step, "autoplay stopped");
        }
        if self.autoplay == Autoplay::OneShot {
            self.step = 0;
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.step = 0;
    }

    /// Advances by one, wrapping past `max`, whether or not autoplay runs.
    pub fn advance_once(&mut self) -> u8 {
        self.step = if self.step >= self.max { 0 } else { self.step + 1 };
        self.step
    }

    /// Moves straight to `step` (clamped). Used by scripted demo actions.
    pub fn jump_to(&mut self, step: u8) {
        self.step = step.min(self.max);
    }

    /// Swaps in new bounds for another scenario. Always resets.
    pub fn rebound(&mut self, max: u8, autoplay: Autoplay, period: Duration) {
        self.reset();
        self.max = max;
        self.autoplay = autoplay;
        self.period = period;
    }

    /// Swaps the autoplay period. A running driver re-arms at the new period
    /// and keeps its step.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
        if self.timer.take().is_some() {
            let handle = self.scheduler.every(self.period);
            debug!(timer = %handle.id(), period_ms = self.period.as_millis() as u64, "autoplay re-armed");
            self.timer = Some(handle);
        }
    }

    /// Handles a fired timer.
    pub fn on_timer(&mut self, id: TimerId) -> TickOutcome {
        if !self.owns_timer(id) {
            trace!(timer = %id, "ignoring stale autoplay tick");
            return TickOutcome::Stale;
        }
        let outcome = match self.autoplay {
            Autoplay::Loop => {
                if self.advance_once() == 0 {
                    TickOutcome::Wrapped
                } else {
                    TickOutcome::Advanced(self.step)
                }
            }
            Autoplay::OneShot => {
                if self.step >= self.max {
                    self.stop();
                    TickOutcome::Finished
                } else {
                    self.step += 1;
                    TickOutcome::Advanced(self.step)
                }
            }
        };
        trace!(timer = %id, ?outcome, "autoplay tick");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    const PERIOD: Duration = Duration::from_millis(1500);

    fn looping(sched: &ManualScheduler) -> StepDriver<ManualScheduler> {
        StepDriver::new(sched.clone(), 5, Autoplay::Loop, PERIOD)
    }

    fn drive(sched: &ManualScheduler, driver: &mut StepDriver<ManualScheduler>, by: Duration) {
        sched.run_for(by, |id| {
            driver.on_timer(id);
        });
    }

    #[test]
    fn advance_once_wraps_at_max() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        for expected in [1, 2, 3, 4, 5, 0, 1] {
            assert_eq!(d.advance_once(), expected);
        }
        assert!(!d.is_running());
    }

    #[test]
    fn start_is_idempotent() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.start();
        d.start();
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn loop_autoplay_wraps_and_keeps_running() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.start();
        drive(&sched, &mut d, PERIOD * 6);
        assert_eq!(d.step(), 0);
        assert!(d.is_running());
        drive(&sched, &mut d, PERIOD * 2);
        assert_eq!(d.step(), 2);
    }

    #[test]
    fn loop_start_resumes_from_current_step() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.advance_once();
        d.advance_once();
        d.start();
        drive(&sched, &mut d, PERIOD);
        assert_eq!(d.step(), 3);
    }

    #[test]
    fn one_shot_finishes_and_rewinds() {
        let sched = ManualScheduler::new();
        let mut d = StepDriver::new(sched.clone(), 2, Autoplay::OneShot, PERIOD);
        d.start();
        drive(&sched, &mut d, PERIOD * 2);
        assert_eq!(d.step(), 2);
        assert!(d.is_running());

        drive(&sched, &mut d, PERIOD);
        assert_eq!(d.step(), 0);
        assert!(!d.is_running());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn one_shot_start_rewinds() {
        let sched = ManualScheduler::new();
        let mut d = StepDriver::new(sched.clone(), 3, Autoplay::OneShot, PERIOD);
        d.advance_once();
        d.advance_once();
        d.start();
        assert_eq!(d.step(), 0);
    }

    #[test]
    fn stop_cancels_and_ignores_late_ticks() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.start();
        drive(&sched, &mut d, PERIOD);
        let live = sched.pop_due(sched.now() + PERIOD).expect("armed");
        d.stop();

        assert_eq!(sched.pending(), 0);
        assert_eq!(d.on_timer(live), TickOutcome::Stale);
        assert_eq!(d.step(), 1);
    }

    #[test]
    fn reset_always_zeroes_and_stops() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.advance_once();
        d.start();
        d.reset();
        assert_eq!(d.step(), 0);
        assert!(!d.is_running());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn jump_is_clamped() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.jump_to(42);
        assert_eq!(d.step(), 5);
    }

    #[test]
    fn rebound_resets_and_applies_new_bounds() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.jump_to(4);
        d.start();
        d.rebound(3, Autoplay::OneShot, Duration::from_millis(2000));
        assert_eq!((d.step(), d.max()), (0, 3));
        assert!(!d.is_running());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn progress_tracks_step() {
        let sched = ManualScheduler::new();
        let mut d = StepDriver::new(sched, 2, Autoplay::OneShot, PERIOD);
        assert_eq!(d.progress(), 0.0);
        d.advance_once();
        assert_eq!(d.progress(), 0.5);
    }

    #[test]
    fn set_period_keeps_a_one_shot_run_in_place() {
        let sched = ManualScheduler::new();
        let mut d = StepDriver::new(sched.clone(), 3, Autoplay::OneShot, Duration::from_millis(2000));
        d.start();
        drive(&sched, &mut d, Duration::from_millis(4000));
        assert_eq!(d.step(), 2);

        d.set_period(Duration::from_millis(1000));
        assert_eq!(d.step(), 2);
        assert!(d.is_running());
        assert_eq!(sched.pending(), 1);

        drive(&sched, &mut d, Duration::from_millis(1000));
        assert_eq!(d.step(), 3);
    }

    #[test]
    fn set_period_while_stopped_arms_nothing() {
        let sched = ManualScheduler::new();
        let mut d = looping(&sched);
        d.set_period(Duration::from_millis(300));
        assert_eq!(d.period(), Duration::from_millis(300));
        assert_eq!(sched.pending(), 0);
    }
}
