//! User-tunable timing knobs shared by every host.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const LOOP_PERIOD_RANGE: (u32, u32) = (200, 10_000);
pub const ONE_SHOT_PERIOD_RANGE: (u32, u32) = (200, 10_000);
pub const HEARTBEAT_RANGE: (u32, u32) = (16, 1_000);
pub const BLOCKING_SPIN_RANGE: (u32, u32) = (0, 5_000);
pub const BULK_BATCH_RANGE: (u32, u32) = (1, 100_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Autoplay period of the legacy/modern walkthroughs.
    pub loop_period_ms: u32,
    /// Autoplay period of the future walkthroughs.
    pub one_shot_period_ms: u32,
    /// Main-thread heartbeat period on the stack demos; 0 disables it.
    pub heartbeat_ms: u32,
    /// How long the legacy "Add Item" busy-waits.
    pub blocking_spin_ms: u32,
    /// Items appended per bulk insert in the playground.
    pub bulk_batch: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loop_period_ms: 1500,
            one_shot_period_ms: 2000,
            heartbeat_ms: 100,
            blocking_spin_ms: 1000,
            bulk_batch: 1000,
        }
    }
}

fn check(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), SettingsError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn clamp(value: u32, (min, max): (u32, u32)) -> u32 {
    value.clamp(min, max)
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("loop_period_ms", self.loop_period_ms, LOOP_PERIOD_RANGE)?;
        check("one_shot_period_ms", self.one_shot_period_ms, ONE_SHOT_PERIOD_RANGE)?;
        if self.heartbeat_ms != 0 {
            check("heartbeat_ms", self.heartbeat_ms, HEARTBEAT_RANGE)?;
        }
        check("blocking_spin_ms", self.blocking_spin_ms, BLOCKING_SPIN_RANGE)?;
        check("bulk_batch", self.bulk_batch, BULK_BATCH_RANGE)?;
        Ok(())
    }

    /// Clamps every field into its accepted range.
    pub fn sanitized(self) -> Self {
        Self {
            loop_period_ms: clamp(self.loop_period_ms, LOOP_PERIOD_RANGE),
            one_shot_period_ms: clamp(self.one_shot_period_ms, ONE_SHOT_PERIOD_RANGE),
            heartbeat_ms: if self.heartbeat_ms == 0 {
                0
            } else {
                clamp(self.heartbeat_ms, HEARTBEAT_RANGE)
            },
            blocking_spin_ms: clamp(self.blocking_spin_ms, BLOCKING_SPIN_RANGE),
            bulk_batch: clamp(self.bulk_batch, BULK_BATCH_RANGE),
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert_eq!(Settings::default().sanitized(), Settings::default());
    }

    #[test]
    fn sanitized_clamps_but_keeps_heartbeat_off() {
        let s = Settings {
            loop_period_ms: 5,
            one_shot_period_ms: 1_000_000,
            heartbeat_ms: 0,
            blocking_spin_ms: 9_999,
            bulk_batch: 0,
        }
        .sanitized();
        assert_eq!(s.loop_period_ms, 200);
        assert_eq!(s.one_shot_period_ms, 10_000);
        assert_eq!(s.heartbeat_ms, 0);
        assert_eq!(s.blocking_spin_ms, 5_000);
        assert_eq!(s.bulk_batch, 1);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_names_the_offending_field() {
        let s = Settings {
            heartbeat_ms: 3,
            ..Settings::default()
        };
        match s.validate() {
            Err(SettingsError::OutOfRange { field, .. }) => assert_eq!(field, "heartbeat_ms"),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let s = Settings::from_json(r#"{ "loop_period_ms": 900 }"#).expect("valid");
        assert_eq!(s.loop_period_ms, 900);
        assert_eq!(s.one_shot_period_ms, 2000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "bulk_batch": 0 }"#),
            Err(SettingsError::OutOfRange { .. })
        ));
    }
}
