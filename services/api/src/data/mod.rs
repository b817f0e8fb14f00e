//! services/api/src/data/mod.rs
//!
//! Static fixture catalog backing the brand dashboard: ad campaigns,
//! creative sets, and performance analytics. Served read-only until a real
//! campaign backend exists.

pub mod campaigns;
pub mod creatives;
pub mod performance;

pub use campaigns::{campaigns, Campaign, CampaignStatus};
pub use creatives::{creatives, Creative, CreativeStatus};
pub use performance::{ab_test_results, performance_series, AbTestResult, PerformancePoint};
