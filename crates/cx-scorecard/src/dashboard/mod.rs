//! Read-only HTTP surface over the scoring engine.

pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use router::dashboard_router;
pub use service::{DashboardError, DashboardService, EntityScorecardView, EntityTrendView};
pub use source::{DatasetSource, DirectorySource, InMemorySource, SourceError};
