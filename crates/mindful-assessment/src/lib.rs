//! Digital wellness assessment core.
//!
//! Collects four lifestyle metrics through a step wizard, scores them with the
//! remote prediction service when it is reachable, and falls back to a
//! deterministic rule engine otherwise. Both paths fold into one
//! [`assessment::DisplayResult`].

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
