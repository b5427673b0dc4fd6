//! The explainer: one era page with its scenario switcher, step driver,
//! synthetic data and timed demo actions.
//!
//! Every transition method ends in [`Explainer::resync`], which recomputes the
//! derived flags and applies the few list edits that depend on the step. Hosts
//! render from the accessors afterwards; they never patch state themselves.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::clock::{millis, spin_for, Duration};
use crate::items::{initial_items, Item, ItemIds};
use crate::scenario::{Era, Scenario};
use crate::settings::Settings;
use crate::step::{Autoplay, StepDriver, TickOutcome};
use crate::sync::{self, Derived};
use crate::timer::{Scheduler, TimerHandle, TimerId};

/// Text of the row the DOM-updates walkthrough inserts at step 2.
pub const NARRATED_ITEM: &str = "New Item";

const LEGACY_COMMIT_DELAY: Duration = Duration::from_millis(50);
const MODERN_COMMIT_DELAY: Duration = Duration::from_millis(100);
const SETTLE_DELAY: Duration = Duration::from_millis(500);
const REUSE_REVEAL_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// The era does not offer this scenario; nothing changed.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// The action is disabled in the current state.
    Ignored,
}

/// Which of the two side-by-side counters an increment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn from_key(key: &str) -> Option<Side> {
        match key.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "1" => Some(Side::Left),
            "right" | "r" | "2" => Some(Side::Right),
            _ => None,
        }
    }
}

/// User-triggered demo actions, as exposed by panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    /// The scenario's main button ("Add Item", "Change Container Type", ...).
    Primary,
    Increment(Side),
    ToggleAdvanced,
}

/// What a delivered timer turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(TickOutcome),
    Heartbeat(u64),
    Cue,
    Stale,
}

impl TimerEvent {
    /// Whether the host should re-render the panel.
    pub fn changed_panel(self) -> bool {
        !matches!(self, TimerEvent::Stale | TimerEvent::Tick(TickOutcome::Stale))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Jump(u8),
    /// Prepend `New Item {len+1}` to the stack list, optionally after blocking
    /// the thread, then jump.
    Commit { block: bool, then: u8 },
}

struct Script<H> {
    queue: VecDeque<(Duration, Cue)>,
    timer: Option<H>,
}

impl<H> Script<H> {
    fn idle() -> Self {
        Self {
            queue: VecDeque::new(),
            timer: None,
        }
    }

    fn cancel(&mut self) {
        self.queue.clear();
        self.timer = None;
    }

    fn in_flight(&self) -> bool {
        self.timer.is_some()
    }
}

struct Heartbeat<H> {
    count: u64,
    timer: Option<H>,
}

pub struct Explainer<S: Scheduler + Clone> {
    era: Era,
    scenario: Scenario,
    settings: Settings,
    scheduler: S,
    driver: StepDriver<S>,
    ids: ItemIds,
    narrated_id: u64,
    stack_items: Vec<Item>,
    keyless: Vec<Item>,
    keyed: Vec<Item>,
    offsets: [u32; 2],
    advanced_open: bool,
    heartbeat: Heartbeat<S::Handle>,
    script: Script<S::Handle>,
    derived: Derived,
}

impl<S: Scheduler + Clone> Explainer<S> {
    /// Opens `era` on its first scenario.
    pub fn new(era: Era, scheduler: S, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let scenario = era.default_scenario();
        let driver = StepDriver::new(
            scheduler.clone(),
            scenario.max_step(),
            scenario.autoplay(),
            scenario.period(&settings),
        );
        let mut ids = ItemIds::new();
        let narrated_id = ids.fresh();
        let mut explainer = Self {
            era,
            scenario,
            settings,
            scheduler,
            driver,
            ids,
            narrated_id,
            stack_items: initial_items(),
            keyless: initial_items(),
            keyed: initial_items(),
            offsets: [0; 2],
            advanced_open: false,
            heartbeat: Heartbeat {
                count: 0,
                timer: None,
            },
            script: Script::idle(),
            derived: sync::derive(era, scenario, 0),
        };
        explainer.resync();
        explainer
    }

    pub fn era(&self) -> Era {
        self.era
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn step(&self) -> u8 {
        self.driver.step()
    }

    pub fn max_step(&self) -> u8 {
        self.driver.max()
    }

    pub fn autoplay(&self) -> Autoplay {
        self.driver.autoplay()
    }

    pub fn is_playing(&self) -> bool {
        self.driver.is_running()
    }

    pub fn progress(&self) -> f32 {
        self.driver.progress()
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn stack_items(&self) -> &[Item] {
        &self.stack_items
    }

    /// The list rendered without keys (legacy DOM walkthrough).
    pub fn keyless_items(&self) -> &[Item] {
        &self.keyless
    }

    pub fn keyed_items(&self) -> &[Item] {
        &self.keyed
    }

    pub fn narrated_id(&self) -> u64 {
        self.narrated_id
    }

    pub fn heartbeat(&self) -> u64 {
        self.heartbeat.count
    }

    pub fn heartbeat_armed(&self) -> bool {
        self.heartbeat.timer.is_some()
    }

    pub fn script_in_flight(&self) -> bool {
        self.script.in_flight()
    }

    pub fn advanced_open(&self) -> bool {
        self.advanced_open
    }

    /// Counter shown on `side` of the future walkthroughs: the step-driven base
    /// plus the user's clicks.
    pub fn counter(&self, side: Side) -> u32 {
        let base = match (&self.derived, side) {
            (Derived::FineGrained(f), _) => f.base_count,
            (Derived::Compiler(c), Side::Left) => c.svelte_base,
            (Derived::Compiler(c), Side::Right) => c.react_base,
            _ => 0,
        };
        base + self.offsets[side.index()]
    }

    /// Switches to `scenario` and restores its initial state.
    pub fn select(&mut self, scenario: Scenario) -> SelectOutcome {
        if !self.era.offers(scenario) {
            debug!(era = self.era.key(), scenario = scenario.key(), "scenario not offered");
            return SelectOutcome::Unavailable;
        }
        debug!(era = self.era.key(), from = self.scenario.key(), to = scenario.key(), "select scenario");
        self.scenario = scenario;
        self.script.cancel();
        self.driver.rebound(
            scenario.max_step(),
            scenario.autoplay(),
            scenario.period(&self.settings),
        );
        self.restore_data();
        self.resync();
        SelectOutcome::Selected
    }

    pub fn start(&mut self) {
        self.driver.start();
        self.resync();
    }

    pub fn stop(&mut self) {
        self.driver.stop();
        self.offsets = [0; 2];
        self.resync();
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Step 0, not playing, no scripted follow-ups pending.
    pub fn reset(&mut self) {
        self.script.cancel();
        self.driver.reset();
        self.offsets = [0; 2];
        self.resync();
    }

    pub fn advance_once(&mut self) -> u8 {
        let step = self.driver.advance_once();
        self.resync();
        step
    }

    /// Replaces the settings. A running autoplay restarts at the same step with
    /// the new period.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        self.driver.set_period(self.scenario.period(&self.settings));
        // Re-arm with the new period.
        self.heartbeat.timer = None;
        self.resync();
    }

    pub fn perform(&mut self, action: DemoAction) -> ActionOutcome {
        match action {
            DemoAction::Primary => self.primary_action(),
            DemoAction::Increment(side) => self.increment(side),
            DemoAction::ToggleAdvanced => self.toggle_advanced(),
        }
    }

    /// Whether the scenario's main button is currently clickable.
    pub fn primary_enabled(&self) -> bool {
        let step = self.step();
        match (self.scenario, &self.derived) {
            (Scenario::Stack, Derived::Stack(f)) => match self.era {
                Era::Legacy => !f.busy,
                _ => !(f.busy && step < 4),
            },
            (Scenario::ComponentType, _) => true,
            (Scenario::DomUpdates, Derived::Lists(f)) => !f.action_locked,
            (Scenario::Compiler, _) => true,
            _ => false,
        }
    }

    pub fn primary_action(&mut self) -> ActionOutcome {
        if !self.primary_enabled() {
            trace!(scenario = self.scenario.key(), step = self.step(), "primary action ignored");
            return ActionOutcome::Ignored;
        }
        debug!(era = self.era.key(), scenario = self.scenario.key(), step = self.step(), "primary action");
        match self.scenario {
            Scenario::Stack => {
                let (delay, block) = match self.era {
                    Era::Legacy => (LEGACY_COMMIT_DELAY, true),
                    _ => (MODERN_COMMIT_DELAY, false),
                };
                self.driver.jump_to(2);
                self.run_script([
                    (delay, Cue::Commit { block, then: 4 }),
                    (SETTLE_DELAY, Cue::Jump(5)),
                ]);
            }
            Scenario::ComponentType => {
                self.script.cancel();
                let target = if self.step() < 3 { 3 } else { 0 };
                self.driver.jump_to(target);
            }
            Scenario::DomUpdates => {
                self.driver.jump_to(2);
                self.run_script([(REUSE_REVEAL_DELAY, Cue::Jump(3))]);
            }
            Scenario::Compiler => return self.toggle_advanced(),
            Scenario::FineGrained | Scenario::Hydration => return ActionOutcome::Ignored,
        }
        self.resync();
        ActionOutcome::Applied
    }

    pub fn increment(&mut self, side: Side) -> ActionOutcome {
        if !matches!(self.scenario, Scenario::FineGrained | Scenario::Compiler) {
            return ActionOutcome::Ignored;
        }
        let slot = &mut self.offsets[side.index()];
        *slot = slot.saturating_add(1);
        ActionOutcome::Applied
    }

    pub fn toggle_advanced(&mut self) -> ActionOutcome {
        if self.scenario != Scenario::Compiler {
            return ActionOutcome::Ignored;
        }
        self.advanced_open = !self.advanced_open;
        ActionOutcome::Applied
    }

    /// Routes a fired timer to whichever part of the explainer owns it.
    pub fn on_timer(&mut self, id: TimerId) -> TimerEvent {
        if self.driver.owns_timer(id) {
            let outcome = self.driver.on_timer(id);
            if outcome == TickOutcome::Finished {
                self.offsets = [0; 2];
            }
            self.resync();
            return TimerEvent::Tick(outcome);
        }
        if self.heartbeat.timer.as_ref().is_some_and(|t| t.id() == id) {
            let frozen = matches!(self.derived, Derived::Stack(f) if f.main_thread_frozen);
            if !frozen {
                self.heartbeat.count += 1;
            }
            return TimerEvent::Heartbeat(self.heartbeat.count);
        }
        if self.script.timer.as_ref().is_some_and(|t| t.id() == id) {
            self.fire_cue();
            return TimerEvent::Cue;
        }
        trace!(timer = %id, "stale timer");
        TimerEvent::Stale
    }

    /// Recomputes derived flags and applies the step-dependent list edits.
    /// Idempotent.
    pub fn resync(&mut self) {
        self.derived = sync::derive(self.era, self.scenario, self.step());
        if let Derived::Lists(flags) = self.derived {
            let narrated = self.narrated_id;
            for list in [&mut self.keyless, &mut self.keyed] {
                let present = list.first().is_some_and(|i| i.id == narrated);
                if flags.inserted && !present {
                    list.insert(0, Item::new(narrated, NARRATED_ITEM));
                } else if !flags.inserted && present {
                    list.remove(0);
                }
            }
        }
        self.sync_heartbeat();
    }

    fn sync_heartbeat(&mut self) {
        let wanted = self.scenario == Scenario::Stack && self.settings.heartbeat_ms > 0;
        match (wanted, self.heartbeat.timer.is_some()) {
            (true, false) => {
                let handle = self.scheduler.every(millis(self.settings.heartbeat_ms));
                trace!(timer = %handle.id(), "heartbeat armed");
                self.heartbeat.timer = Some(handle);
            }
            (false, true) => self.heartbeat.timer = None,
            _ => {}
        }
    }

    fn restore_data(&mut self) {
        self.stack_items = initial_items();
        self.keyless = initial_items();
        self.keyed = initial_items();
        self.offsets = [0; 2];
        self.advanced_open = false;
    }

    /// Replaces any in-flight script with `cues`, arming the first.
    fn run_script(&mut self, cues: impl IntoIterator<Item = (Duration, Cue)>) {
        self.script.cancel();
        self.script.queue.extend(cues);
        self.arm_next_cue();
    }

    fn arm_next_cue(&mut self) {
        let next = self.script.queue.front().map(|(delay, _)| *delay);
        self.script.timer = next.map(|delay| self.scheduler.after(delay));
    }

    fn fire_cue(&mut self) {
        self.script.timer = None;
        let Some((_, cue)) = self.script.queue.pop_front() else {
            return;
        };
        trace!(?cue, "script cue");
        match cue {
            Cue::Jump(step) => self.driver.jump_to(step),
            Cue::Commit { block, then } => {
                if block {
                    let spent = spin_for(millis(self.settings.blocking_spin_ms));
                    debug!(spent_ms = spent.as_millis() as u64, "main thread blocked");
                }
                let text = format!("New Item {}", self.stack_items.len() + 1);
                self.stack_items.insert(0, Item::new(self.ids.fresh(), text));
                self.driver.jump_to(then);
            }
        }
        self.arm_next_cue();
        self.resync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    fn quiet() -> Settings {
        Settings {
            blocking_spin_ms: 0,
            ..Settings::default()
        }
    }

    fn open(era: Era) -> (ManualScheduler, Explainer<ManualScheduler>) {
        let sched = ManualScheduler::new();
        let ex = Explainer::new(era, sched.clone(), quiet());
        (sched, ex)
    }

    fn run(sched: &ManualScheduler, ex: &mut Explainer<ManualScheduler>, ms: u64) {
        sched.run_for(Duration::from_millis(ms), |id| {
            ex.on_timer(id);
        });
    }

    #[test]
    fn three_steps_reach_the_blocking_window() {
        let (_s, mut ex) = open(Era::Legacy);
        for _ in 0..3 {
            ex.advance_once();
        }
        assert_eq!(ex.step(), 3);
        assert!(matches!(ex.derived(), Derived::Stack(f) if f.busy && f.main_thread_frozen));
    }

    #[test]
    fn legacy_add_item_blocks_then_commits() {
        let (sched, mut ex) = open(Era::Legacy);
        assert_eq!(ex.primary_action(), ActionOutcome::Applied);
        assert_eq!(ex.step(), 2);
        assert_eq!(ex.primary_action(), ActionOutcome::Ignored);

        run(&sched, &mut ex, 40);
        assert_eq!(ex.step(), 2);

        run(&sched, &mut ex, 20);
        assert_eq!(ex.step(), 4);
        assert_eq!(ex.stack_items()[0].text, "New Item 4");
        assert_eq!(ex.stack_items().len(), 4);

        run(&sched, &mut ex, 500);
        assert_eq!(ex.step(), 5);
        assert!(!ex.script_in_flight());
    }

    #[test]
    fn heartbeat_freezes_only_in_the_legacy_era() {
        for (era, expected) in [(Era::Legacy, 0), (Era::Modern, 3)] {
            let (sched, mut ex) = open(era);
            ex.advance_once();
            ex.advance_once();
            run(&sched, &mut ex, 300);
            assert_eq!(ex.heartbeat(), expected, "{era:?}");
        }
    }

    #[test]
    fn modern_add_item_commits_without_blocking() {
        let (sched, mut ex) = open(Era::Modern);
        ex.primary_action();
        run(&sched, &mut ex, 100);
        assert_eq!(ex.step(), 4);
        assert_eq!(ex.heartbeat(), 1);
        assert!(ex.primary_enabled());
        run(&sched, &mut ex, 500);
        assert_eq!(ex.step(), 5);
    }

    #[test]
    fn dom_walkthrough_inserts_the_narrated_item_once() {
        let (sched, mut ex) = open(Era::Legacy);
        ex.select(Scenario::DomUpdates);
        ex.advance_once();
        ex.advance_once();
        ex.resync();
        ex.resync();
        let narrated = ex.narrated_id();
        assert_eq!(ex.keyed_items().len(), 4);
        assert_eq!(ex.keyless_items()[0].id, narrated);
        assert_eq!(ex.primary_action(), ActionOutcome::Ignored);

        for _ in 0..4 {
            ex.advance_once();
        }
        assert_eq!(ex.step(), 0);
        assert_eq!(ex.keyed_items(), initial_items().as_slice());

        ex.primary_action();
        run(&sched, &mut ex, 1000);
        assert_eq!(ex.step(), 3);
        assert_eq!(ex.keyed_items().len(), 4);
    }

    #[test]
    fn container_toggle_jumps_between_zero_and_three() {
        let (_s, mut ex) = open(Era::Legacy);
        ex.select(Scenario::ComponentType);
        ex.primary_action();
        assert_eq!(ex.step(), 3);
        ex.primary_action();
        assert_eq!(ex.step(), 0);
    }

    #[test]
    fn switching_restores_initial_lists_and_cancels_scripts() {
        let (sched, mut ex) = open(Era::Modern);
        ex.primary_action();
        run(&sched, &mut ex, 100);
        assert_eq!(ex.stack_items().len(), 4);

        ex.select(Scenario::DomUpdates);
        ex.select(Scenario::Stack);
        assert_eq!(ex.stack_items(), initial_items().as_slice());
        assert_eq!(ex.step(), 0);
        assert!(!ex.script_in_flight());
        run(&sched, &mut ex, 1000);
        assert_eq!(ex.step(), 0);
    }

    #[test]
    fn unavailable_scenarios_are_rejected() {
        let (_s, mut ex) = open(Era::Future);
        assert_eq!(ex.select(Scenario::Stack), SelectOutcome::Unavailable);
        assert_eq!(ex.scenario(), Scenario::FineGrained);
    }

    #[test]
    fn future_counters_combine_base_and_clicks() {
        let (sched, mut ex) = open(Era::Future);
        ex.increment(Side::Left);
        ex.increment(Side::Left);
        assert_eq!(ex.counter(Side::Left), 2);

        ex.start();
        assert_eq!(ex.counter(Side::Left), 2, "clicks survive until playback stops");
        ex.stop();
        assert_eq!(ex.counter(Side::Left), 0);

        ex.start();
        run(&sched, &mut ex, 2000);
        assert_eq!(ex.step(), 1);
        assert_eq!(ex.counter(Side::Right), 1);
        run(&sched, &mut ex, 4000);
        assert_eq!(ex.step(), 0);
        assert!(!ex.is_playing());
    }

    #[test]
    fn heartbeat_only_runs_on_the_stack_scenario() {
        let (sched, mut ex) = open(Era::Legacy);
        assert!(ex.heartbeat_armed());
        ex.select(Scenario::ComponentType);
        assert!(!ex.heartbeat_armed());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn dropping_the_explainer_disarms_every_timer() {
        let (sched, mut ex) = open(Era::Legacy);
        ex.start();
        ex.primary_action();
        assert_eq!(sched.pending(), 3);
        drop(ex);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn compiler_primary_toggles_the_deep_dive() {
        let (_s, mut ex) = open(Era::Future);
        assert_eq!(ex.perform(DemoAction::ToggleAdvanced), ActionOutcome::Ignored);
        ex.select(Scenario::Compiler);
        ex.perform(DemoAction::Primary);
        assert!(ex.advanced_open());
        ex.select(Scenario::Compiler);
        assert!(!ex.advanced_open());
    }
}
