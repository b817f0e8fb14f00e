//! services/api/src/analysis/mod.rs
//!
//! The website-analysis subsystem: the in-memory request store and the
//! lifecycle service that drives a submission from `Analyzing` to a
//! terminal state.

pub mod service;
pub mod store;

pub use service::{AnalysisError, AnalysisService};
pub use store::AnalysisStore;
