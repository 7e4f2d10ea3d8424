//! Application layer: dispatch, session routing, enablement and file configuration.

mod config;
mod dispatch;
mod orchestrator;
mod session;

pub use config::{AnalyticsSection, Config, LoggingConfig};
pub use dispatch::{DispatchMode, DispatchQueue};
pub use orchestrator::{AnalyticsAdapter, Enablement};
pub use session::AnalyticsSession;
