//! One player session: the open era page plus the playground.

use reconcile_lab::{
    render, ActionOutcome, BulkInsertDemo, BulkOutcome, DemoAction, Era, Explainer, Scheduler,
    SelectOutcome, Settings, TimerEvent, TimerId,
};
use tracing::{debug, info};

use crate::commands::{Command, SettingField, HELP};
use crate::render as text;

/// What the main loop should print after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    SaveSettings,
    Quit,
}

pub struct Session<S: Scheduler + Clone> {
    scheduler: S,
    settings: Settings,
    explainer: Explainer<S>,
    bulk: BulkInsertDemo<S>,
}

impl<S: Scheduler + Clone> Session<S> {
    pub fn new(scheduler: S, settings: Settings, era: Era) -> Self {
        Self {
            explainer: Explainer::new(era, scheduler.clone(), settings),
            bulk: BulkInsertDemo::new(scheduler.clone(), settings.bulk_batch),
            scheduler,
            settings,
        }
    }

    pub fn explainer(&self) -> &Explainer<S> {
        &self.explainer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn panel(&self) -> String {
        text::panel(&self.explainer, &render(&self.explainer))
    }

    pub fn apply(&mut self, cmd: Command) -> Reply {
        debug!(?cmd, "command");
        let ex = &mut self.explainer;
        match cmd {
            Command::Era(era) => {
                // Dropping the old page cancels its timers.
                self.explainer = Explainer::new(era, self.scheduler.clone(), self.settings);
                info!(era = era.key(), "era opened");
            }
            Command::Demo(scenario) => {
                if ex.select(scenario) == SelectOutcome::Unavailable {
                    return Reply::Text(format!(
                        "`{}` is not part of {}; try one of: {}",
                        scenario.key(),
                        ex.era().label(),
                        ex.era()
                            .scenarios()
                            .iter()
                            .map(|s| s.key())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ));
                }
            }
            Command::Play => ex.start(),
            Command::Pause => ex.stop(),
            Command::Step => {
                ex.advance_once();
            }
            Command::Reset => ex.reset(),
            Command::Act => return self.perform(DemoAction::Primary),
            Command::Inc(side) => return self.perform(DemoAction::Increment(side)),
            Command::Toggle => return self.perform(DemoAction::ToggleAdvanced),
            Command::Show => {}
            Command::BulkAdd => {
                let note = match self.bulk.add_batch() {
                    BulkOutcome::Appended(n) => format!("appended {n} rows"),
                    BulkOutcome::Deferred => "adding on the next turn...".to_string(),
                    BulkOutcome::Busy => "a batch is already pending".to_string(),
                };
                return Reply::Text(format!("{note}\n{}", text::bulk(&self.bulk)));
            }
            Command::BulkClear => {
                self.bulk.clear();
                return Reply::Text(text::bulk(&self.bulk));
            }
            Command::BulkMode(mode) => {
                let on = mode.unwrap_or(!self.bulk.legacy_mode());
                self.bulk.set_legacy_mode(on);
                return Reply::Text(text::bulk(&self.bulk));
            }
            Command::Settings => {
                return Reply::Text(match self.settings.to_json() {
                    Ok(json) => json,
                    Err(e) => format!("settings: {e}"),
                });
            }
            Command::SetSetting(field, value) => return self.set_setting(field, value),
            Command::SaveSettings => return Reply::SaveSettings,
            Command::Help => return Reply::Text(HELP.to_string()),
            Command::Quit => return Reply::Quit,
        }
        Reply::Text(self.panel())
    }

    /// Validates and applies one knob. A running walkthrough keeps its step.
    fn set_setting(&mut self, field: SettingField, value: u32) -> Reply {
        let mut next = self.settings;
        field.assign(&mut next, value);
        if let Err(e) = next.validate() {
            return Reply::Text(format!("{e}\n"));
        }
        info!(?field, value, "settings changed");
        self.settings = next;
        self.explainer.apply_settings(next);
        self.bulk.set_batch(next.bulk_batch);
        Reply::Text(self.panel())
    }

    fn perform(&mut self, action: DemoAction) -> Reply {
        match self.explainer.perform(action) {
            ActionOutcome::Applied => Reply::Text(self.panel()),
            ActionOutcome::Ignored => Reply::Text("(not available right now)".to_string()),
        }
    }

    /// Routes a fired timer. Returns text to print, if the change is visible.
    pub fn on_timer(&mut self, id: TimerId) -> Option<String> {
        if self.bulk.on_timer(id) {
            return Some(text::bulk(&self.bulk));
        }
        match self.explainer.on_timer(id) {
            // Heartbeats show up on the next redraw.
            TimerEvent::Heartbeat(_) => None,
            event if event.changed_panel() => Some(self.panel()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile_lab::clock::Duration;
    use reconcile_lab::{ManualScheduler, Scenario, Side};

    fn session() -> (ManualScheduler, Session<ManualScheduler>) {
        let sched = ManualScheduler::new();
        let settings = Settings {
            blocking_spin_ms: 0,
            bulk_batch: 5,
            ..Settings::default()
        };
        (sched.clone(), Session::new(sched, settings, Era::Legacy))
    }

    #[test]
    fn switching_era_drops_the_old_timers() {
        let (sched, mut s) = session();
        s.apply(Command::Play);
        assert_eq!(sched.pending(), 2);
        s.apply(Command::Era(Era::Future));
        assert_eq!(sched.pending(), 0);
        assert_eq!(s.explainer().scenario(), Scenario::FineGrained);
    }

    #[test]
    fn autoplay_ticks_redraw_the_panel() {
        let (sched, mut s) = session();
        s.apply(Command::Play);
        let mut redraws = 0;
        sched.run_for(Duration::from_millis(1500), |id| {
            if s.on_timer(id).is_some() {
                redraws += 1;
            }
        });
        assert_eq!(redraws, 1);
        assert_eq!(s.explainer().step(), 1);
    }

    #[test]
    fn unavailable_demo_explains_itself() {
        let (_sched, mut s) = session();
        match s.apply(Command::Demo(Scenario::Hydration)) {
            Reply::Text(t) => assert!(t.contains("stack, type, dom"), "{t}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn increments_outside_future_demos_are_refused() {
        let (_sched, mut s) = session();
        assert_eq!(
            s.apply(Command::Inc(Side::Left)),
            Reply::Text("(not available right now)".to_string())
        );
    }

    #[test]
    fn changing_a_period_mid_run_keeps_the_step() {
        let (sched, mut s) = session();
        s.apply(Command::Era(Era::Future));
        s.apply(Command::Play);
        sched.run_for(Duration::from_millis(4000), |id| {
            s.on_timer(id);
        });
        assert_eq!(s.explainer().step(), 2);

        s.apply(Command::SetSetting(SettingField::OneShotPeriod, 1000));
        assert_eq!(s.settings().one_shot_period_ms, 1000);
        assert_eq!(s.explainer().step(), 2);
        assert!(s.explainer().is_playing());
    }

    #[test]
    fn out_of_range_settings_are_refused() {
        let (_sched, mut s) = session();
        match s.apply(Command::SetSetting(SettingField::Heartbeat, 3)) {
            Reply::Text(t) => assert!(t.contains("heartbeat_ms"), "{t}"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.settings().heartbeat_ms, 100);
    }

    #[test]
    fn deferred_bulk_insert_reports_when_it_lands() {
        let (sched, mut s) = session();
        s.apply(Command::Demo(Scenario::ComponentType));
        s.apply(Command::BulkAdd);
        let mut printed = Vec::new();
        sched.run_for(Duration::ZERO, |id| printed.extend(s.on_timer(id)));
        assert_eq!(printed.len(), 1);
        assert!(printed[0].contains("Total items: 5"));
    }
}
