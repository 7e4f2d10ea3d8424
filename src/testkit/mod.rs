//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`sink`] - Recording and failing [`ReportSink`](crate::port::ReportSink)
//!   implementations.
//! - [`diagnostics`] - Recording [`DiagnosticSink`](crate::port::DiagnosticSink).
//! - [`events`] - Builders for auction lifecycle events.

pub mod diagnostics;
pub mod events;
pub mod sink;
