//! stepnav - controlled step navigation for terminal wizards
//!
//! The navigator is a controlled component: the host owns the active step
//! index and is the only code that moves it. Key handling returns proposed
//! [`NavigationRequest`]s; the host commits, delays, or drops them.

pub mod analytics;
pub mod app;
pub mod config;
pub mod logging;
pub mod navigator;
pub mod state;
pub mod strings;
pub mod ui;

pub use analytics::{FunnelCollector, FunnelEvent, RecordingCollector, TracingCollector};
pub use navigator::{can_select, WizardNavigator};
pub use state::{NavReason, NavigationRequest, Step, WizardError, WizardState};
pub use strings::WizardStrings;
