//! Monthly physical model: sun geometry, module thermals, losses and roll-ups.

/// Loss and efficiency stages.
pub mod efficiency;
/// Solar position and plane-of-array irradiance.
pub mod geometry;
pub mod monthly;
pub mod summary;
/// Module temperature and power output.
pub mod thermal;

pub use monthly::{MonthlyAggregator, MonthlyMetrics};
pub use summary::AnnualSummary;
