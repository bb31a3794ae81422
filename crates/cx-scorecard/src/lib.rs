//! Customer-experience scorecard engine.
//!
//! Rolls raw satisfaction ratings collected at booth, channel, service and
//! journey level up into the weighted scores shown on the executive
//! dashboard. The [`scoring`] module is pure; [`dataset`] and [`dashboard`]
//! are the thin I/O shell around it.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod scoring;
pub mod telemetry;
