//! REPL command parsing.

use reconcile_lab::{Era, Scenario, Settings, Side};

use crate::error::PlayerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Era(Era),
    Demo(Scenario),
    Play,
    Pause,
    Step,
    Reset,
    Act,
    Inc(Side),
    Toggle,
    Show,
    BulkAdd,
    BulkClear,
    /// `None` flips the mode.
    BulkMode(Option<bool>),
    Settings,
    SetSetting(SettingField, u32),
    SaveSettings,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  era <legacy|modern|future>   open an era page
  demo <key>                   switch scenario (stack, type, dom, fine-grained, hydration, compiler)
  play | pause                 start or stop autoplay
  step                         advance one step
  reset                        back to step 0
  act                          the scenario's main button
  inc <left|right>             increment a counter (future demos)
  toggle                       show or hide the advanced example (compiler demo)
  show                         print the current panel
  bulk add|clear|mode [legacy|modern]
                               playground: append a batch of rows
  settings [save]              print (or save) the current settings
  settings set <field> <n>     change a knob (loop, one_shot, heartbeat, spin, batch)
  help                         this text
  quit                         exit";

/// A timing knob that `settings set` can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    LoopPeriod,
    OneShotPeriod,
    Heartbeat,
    BlockingSpin,
    BulkBatch,
}

impl SettingField {
    const KEYS: &'static str = "loop|one_shot|heartbeat|spin|batch";

    pub fn from_key(key: &str) -> Option<SettingField> {
        match key.to_ascii_lowercase().as_str() {
            "loop" | "loop_period_ms" => Some(SettingField::LoopPeriod),
            "one_shot" | "one_shot_period_ms" => Some(SettingField::OneShotPeriod),
            "heartbeat" | "heartbeat_ms" => Some(SettingField::Heartbeat),
            "spin" | "blocking_spin_ms" => Some(SettingField::BlockingSpin),
            "batch" | "bulk_batch" => Some(SettingField::BulkBatch),
            _ => None,
        }
    }

    /// Writes `value` into the matching field of `settings`.
    pub fn assign(self, settings: &mut Settings, value: u32) {
        let slot = match self {
            SettingField::LoopPeriod => &mut settings.loop_period_ms,
            SettingField::OneShotPeriod => &mut settings.one_shot_period_ms,
            SettingField::Heartbeat => &mut settings.heartbeat_ms,
            SettingField::BlockingSpin => &mut settings.blocking_spin_ms,
            SettingField::BulkBatch => &mut settings.bulk_batch,
        };
        *slot = value;
    }
}

/// Parses one input line. Blank lines parse as `None`.
pub fn parse(line: &str) -> Result<Option<Command>, PlayerError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let cmd = match head.to_ascii_lowercase().as_str() {
        "era" => {
            let key = require("era", arg, "legacy|modern|future")?;
            Command::Era(Era::from_key(key).ok_or_else(|| invalid("era", key, "legacy|modern|future"))?)
        }
        "demo" => {
            let key = require("demo", arg, "a scenario key")?;
            Command::Demo(Scenario::from_key(key).ok_or_else(|| {
                invalid("demo", key, "stack|type|dom|fine-grained|hydration|compiler")
            })?)
        }
        "play" | "start" => Command::Play,
        "pause" | "stop" => Command::Pause,
        "step" | "next" | "n" => Command::Step,
        "reset" => Command::Reset,
        "act" | "a" => Command::Act,
        "inc" => {
            let key = require("inc", arg, "left|right")?;
            Command::Inc(Side::from_key(key).ok_or_else(|| invalid("inc", key, "left|right"))?)
        }
        "toggle" => Command::Toggle,
        "show" | "s" => Command::Show,
        "bulk" => match require("bulk", arg, "add|clear|mode")? {
            "add" => Command::BulkAdd,
            "clear" => Command::BulkClear,
            "mode" => match words.next() {
                None => Command::BulkMode(None),
                Some("legacy") => Command::BulkMode(Some(true)),
                Some("modern") => Command::BulkMode(Some(false)),
                Some(other) => return Err(invalid("bulk mode", other, "legacy|modern")),
            },
            other => return Err(invalid("bulk", other, "add|clear|mode")),
        },
        "settings" => match arg {
            None => Command::Settings,
            Some("save") => Command::SaveSettings,
            Some("set") => {
                let key = require("settings set", words.next(), SettingField::KEYS)?;
                let field = SettingField::from_key(key)
                    .ok_or_else(|| invalid("settings set", key, SettingField::KEYS))?;
                let raw = require("settings set", words.next(), "a whole number")?;
                let value = raw
                    .parse::<u32>()
                    .map_err(|_| invalid("settings set", raw, "a whole number"))?;
                Command::SetSetting(field, value)
            }
            Some(other) => return Err(invalid("settings", other, "save|set")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(PlayerError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

fn require<'a>(
    command: &'static str,
    arg: Option<&'a str>,
    expected: &'static str,
) -> Result<&'a str, PlayerError> {
    arg.ok_or(PlayerError::MissingArgument { command, expected })
}

fn invalid(command: &'static str, value: &str, expected: &'static str) -> PlayerError {
    PlayerError::InvalidArgument {
        command,
        value: value.to_string(),
        expected,
    }
}
