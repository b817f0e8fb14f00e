//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ProfileStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use trendlens_core::domain::{ProfileCredentials, ProfileUpdate, Role, UserProfile};
use trendlens_core::ports::{PortError, PortResult, ProfileStore};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ProfileStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// The profile columns selected by every query that returns a full profile.
const PROFILE_COLUMNS: &str = "id, email, first_name, last_name, role, company_name, industry, \
     company_size, website_name, website_url, website_category, monthly_page_views, description, \
     created_at, updated_at";

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct ProfileRecord {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
    company_name: Option<String>,
    industry: Option<String>,
    company_size: Option<String>,
    website_name: Option<String>,
    website_url: Option<String>,
    website_category: Option<String>,
    monthly_page_views: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    fn to_domain(self) -> PortResult<UserProfile> {
        // The schema constrains the column, so a parse failure means the
        // database holds something this build cannot represent.
        let role = Role::from_str(&self.role).map_err(PortError::Unexpected)?;
        Ok(UserProfile {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            company_name: self.company_name,
            industry: self.industry,
            company_size: self.company_size,
            website_name: self.website_name,
            website_url: self.website_url,
            website_category: self.website_category,
            monthly_page_views: self.monthly_page_views,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: Uuid,
    email: String,
    hashed_password: String,
    role: String,
}

impl CredentialsRecord {
    fn to_domain(self) -> PortResult<ProfileCredentials> {
        let role = Role::from_str(&self.role).map_err(PortError::Unexpected)?;
        Ok(ProfileCredentials {
            id: self.id,
            email: self.email,
            hashed_password: self.hashed_password,
            role,
        })
    }
}

#[derive(FromRow)]
struct AuthSessionRecord {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

//=========================================================================================
// `ProfileStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ProfileStore for DbAdapter {
    async fn create_profile(
        &self,
        profile: &UserProfile,
        hashed_password: &str,
    ) -> PortResult<UserProfile> {
        let sql = format!(
            "INSERT INTO profiles (id, email, hashed_password, first_name, last_name, role, \
             company_name, industry, company_size, website_name, website_url, website_category, \
             monthly_page_views, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {}",
            PROFILE_COLUMNS
        );
        let record = sqlx::query_as::<_, ProfileRecord>(&sql)
            .bind(profile.id)
            .bind(&profile.email)
            .bind(hashed_password)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(profile.role.as_str())
            .bind(&profile.company_name)
            .bind(&profile.industry)
            .bind(&profile.company_size)
            .bind(&profile.website_name)
            .bind(&profile.website_url)
            .bind(&profile.website_category)
            .bind(&profile.monthly_page_views)
            .bind(&profile.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    PortError::Conflict(format!("profile for {} already exists", profile.email))
                }
                _ => unexpected(e),
            })?;

        record.to_domain()
    }

    async fn get_profile(&self, id: Uuid) -> PortResult<UserProfile> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        let record = sqlx::query_as::<_, ProfileRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    PortError::NotFound(format!("Profile {} not found", id))
                }
                _ => unexpected(e),
            })?;

        record.to_domain()
    }

    async fn get_credentials_by_email(&self, email: &str) -> PortResult<ProfileCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, email, hashed_password, role FROM profiles WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("No account for {}", email))
            }
            _ => unexpected(e),
        })?;

        record.to_domain()
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileUpdate) -> PortResult<UserProfile> {
        // COALESCE keeps every column whose update field is None.
        let sql = format!(
            "UPDATE profiles SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             company_name = COALESCE($4, company_name), \
             industry = COALESCE($5, industry), \
             company_size = COALESCE($6, company_size), \
             website_name = COALESCE($7, website_name), \
             website_url = COALESCE($8, website_url), \
             website_category = COALESCE($9, website_category), \
             monthly_page_views = COALESCE($10, monthly_page_views), \
             description = COALESCE($11, description), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        );
        let record = sqlx::query_as::<_, ProfileRecord>(&sql)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.company_name)
            .bind(&changes.industry)
            .bind(&changes.company_size)
            .bind(&changes.website_name)
            .bind(&changes.website_url)
            .bind(&changes.website_category)
            .bind(&changes.monthly_page_views)
            .bind(&changes.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    PortError::NotFound(format!("Profile {} not found", id))
                }
                _ => unexpected(e),
            })?;

        record.to_domain()
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let record = sqlx::query_as::<_, AuthSessionRecord>(
            "SELECT user_id, expires_at FROM auth_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::Unauthorized,
            _ => unexpected(e),
        })?;

        if record.expires_at < Utc::now() {
            // Expired sessions are removed eagerly so they cannot pile up.
            self.delete_auth_session(session_id).await?;
            return Err(PortError::Unauthorized);
        }
        Ok(record.user_id)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
