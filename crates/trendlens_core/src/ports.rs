//! crates/trendlens_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use crate::domain::{ProfileCredentials, ProfileUpdate, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The persistence boundary for accounts: the `profiles` table and the
/// cookie-backed login sessions layered on top of it.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    // --- Profile Management ---
    async fn create_profile(
        &self,
        profile: &UserProfile,
        hashed_password: &str,
    ) -> PortResult<UserProfile>;

    async fn get_profile(&self, id: Uuid) -> PortResult<UserProfile>;

    async fn get_credentials_by_email(&self, email: &str) -> PortResult<ProfileCredentials>;

    async fn update_profile(&self, id: Uuid, changes: &ProfileUpdate) -> PortResult<UserProfile>;

    // --- Auth Sessions ---
    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;
}
