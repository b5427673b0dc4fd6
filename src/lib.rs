//! State model for an interactive explainer of how UI reconciliation evolved:
//! stack reconciler problems, fiber-era solutions, and the challenges other
//! frameworks already address.
//!
//! Hosts (the browser app, the terminal player) own an [`Explainer`] plus a
//! [`Scheduler`] implementation, feed it user input and fired timer ids, and
//! draw whatever [`panels::render`] returns.

#[path = "core/clock.rs"]
pub mod clock;

#[path = "core/timer.rs"]
pub mod timer;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/settings.rs"]
pub mod settings;

#[path = "core/scenario.rs"]
pub mod scenario;

#[path = "core/step.rs"]
pub mod step;

#[path = "core/items.rs"]
pub mod items;

#[path = "core/sync.rs"]
pub mod sync;

#[path = "core/content.rs"]
pub mod content;

#[path = "core/demo.rs"]
pub mod demo;

#[path = "core/panels.rs"]
pub mod panels;

#[path = "core/bulk.rs"]
pub mod bulk;

pub use bulk::{BulkInsertDemo, BulkOutcome};
pub use demo::{ActionOutcome, DemoAction, Explainer, SelectOutcome, Side, TimerEvent};
pub use error::SettingsError;
pub use panels::{render, PanelView};
pub use scenario::{Era, Scenario};
pub use settings::Settings;
pub use step::{Autoplay, StepDriver, TickOutcome};
pub use timer::{ManualScheduler, Scheduler, TimerHandle, TimerId};
