//! services/api/src/web/auth.rs
//!
//! Authentication and profile endpoints: signup, login, logout, session
//! restoration, and profile updates.
//!
//! Failures surface as the structured `{user, error}` payload instead of a
//! bare error, so the dashboard can render inline messages. Backend errors
//! are caught at the call site, logged, and converted; there are no retries.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use trendlens_core::domain::{ProfileUpdate, Role, UserProfile};
use trendlens_core::ports::{PortError, ProfileStore};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = String)]
    pub role: Role,

    // Brand-specific fields
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,

    // Publisher-specific fields
    pub website_name: Option<String>,
    pub website_url: Option<String>,
    pub website_category: Option<String>,
    pub monthly_page_views: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// The role the user signed in under; must match the stored role.
    #[schema(value_type = String)]
    pub role: Role,
}

/// The `{user, error}` payload every auth endpoint responds with.
#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(value_type = Option<Object>)]
    pub user: Option<UserProfile>,
    pub error: Option<String>,
}

impl AuthResponse {
    fn ok(user: UserProfile) -> Self {
        Self { user: Some(user), error: None }
    }

    fn err(message: String) -> Self {
        Self { user: None, error: Some(message) }
    }
}

//=========================================================================================
// Auth Flow (handler-independent, unit-testable)
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,
    #[error("This account is registered as a {stored}, not a {requested}")]
    RoleMismatch { stored: Role, requested: Role },
    #[error("An account with this email already exists")]
    EmailInUse,
    #[error("Failed to fetch user profile")]
    ProfileFetch,
    #[error("Something went wrong. Please try again.")]
    Backend,
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::RoleMismatch { .. } => StatusCode::FORBIDDEN,
            AuthError::EmailInUse => StatusCode::CONFLICT,
            AuthError::ProfileFetch | AuthError::Backend => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn response(self) -> (StatusCode, Json<AuthResponse>) {
        (self.status(), Json(AuthResponse::err(self.to_string())))
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            AuthError::Backend
        })
}

/// Creates the account: hashes the password and inserts the profile row.
pub(crate) async fn register(
    profiles: &dyn ProfileStore,
    req: SignupRequest,
) -> Result<UserProfile, AuthError> {
    let password_hash = hash_password(&req.password)?;
    let now = Utc::now();
    let profile = UserProfile {
        id: Uuid::new_v4(),
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        role: req.role,
        company_name: req.company_name,
        industry: req.industry,
        company_size: req.company_size,
        website_name: req.website_name,
        website_url: req.website_url,
        website_category: req.website_category,
        monthly_page_views: req.monthly_page_views,
        description: req.description,
        created_at: now,
        updated_at: now,
    };

    profiles
        .create_profile(&profile, &password_hash)
        .await
        .map_err(|e| match e {
            PortError::Conflict(_) => AuthError::EmailInUse,
            other => {
                error!("Failed to create profile: {:?}", other);
                AuthError::Backend
            }
        })
}

/// Verifies credentials and the declared role, then loads the full profile.
///
/// The role check is deliberate: signing in through the wrong dashboard gets
/// a descriptive message naming the stored role, not a generic auth failure.
pub(crate) async fn authenticate(
    profiles: &dyn ProfileStore,
    email: &str,
    password: &str,
    role: Role,
) -> Result<UserProfile, AuthError> {
    let creds = profiles
        .get_credentials_by_email(email)
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => AuthError::InvalidCredentials,
            other => {
                error!("Failed to load credentials: {:?}", other);
                AuthError::Backend
            }
        })?;

    let parsed_hash = PasswordHash::new(&creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        AuthError::Backend
    })?;
    let valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    if creds.role != role {
        return Err(AuthError::RoleMismatch { stored: creds.role, requested: role });
    }

    profiles.get_profile(creds.id).await.map_err(|e| {
        error!("Profile fetch error: {:?}", e);
        AuthError::ProfileFetch
    })
}

//=========================================================================================
// Session Cookie Helpers
//=========================================================================================

const SESSION_TTL_DAYS: i64 = 30;

fn session_cookie(session_id: &str) -> String {
    format!(
        "session={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        session_id,
        Duration::days(SESSION_TTL_DAYS).num_seconds()
    )
}

async fn open_session(
    profiles: &dyn ProfileStore,
    user_id: Uuid,
) -> Result<String, AuthError> {
    let session_id = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    profiles
        .create_auth_session(&session_id, user_id, expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create auth session: {:?}", e);
            AuthError::Backend
        })?;
    Ok(session_id)
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 409, description = "Email already registered", body = AuthResponse),
        (status = 500, description = "Internal server error", body = AuthResponse)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<AuthResponse>)> {
    let user = register(state.profiles.as_ref(), req)
        .await
        .map_err(AuthError::response)?;

    let session_id = open_session(state.profiles.as_ref(), user.id)
        .await
        .map_err(AuthError::response)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&session_id))],
        Json(AuthResponse::ok(user)),
    ))
}

/// POST /auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AuthResponse),
        (status = 403, description = "Account registered under the other role", body = AuthResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<AuthResponse>)> {
    let user = authenticate(state.profiles.as_ref(), &req.email, &req.password, req.role)
        .await
        .map_err(AuthError::response)?;

    let session_id = open_session(state.profiles.as_ref(), user.id)
        .await
        .map_err(AuthError::response)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&session_id))],
        Json(AuthResponse::ok(user)),
    ))
}

/// POST /auth/logout - Logout and invalidate session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Extract session cookie
    let cookie_header = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    // 2. Parse session ID from cookie
    let auth_session_id = cookie_header
        .split(';')
        .find_map(|c| {
            let c = c.trim();
            c.strip_prefix("session=")
        })
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    // 3. Delete auth session from database
    state
        .profiles
        .delete_auth_session(auth_session_id)
        .await
        .map_err(|e| {
            error!("Failed to delete auth session: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to logout".to_string())
        })?;

    // 4. Clear cookie
    let cookie = "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0";

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie.to_string())]))
}

/// GET /auth/me - Restore the session's profile on app load
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Profile for the active session", body = AuthResponse),
        (status = 401, description = "No active session")
    )
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<AuthResponse>)> {
    match state.profiles.get_profile(user_id).await {
        Ok(user) => Ok(Json(AuthResponse::ok(user))),
        Err(e) => {
            error!("Profile fetch error: {:?}", e);
            Err(AuthError::ProfileFetch.response())
        }
    }
}

/// PUT /auth/profile - Update the logged-in user's profile
#[utoipa::path(
    put,
    path = "/auth/profile",
    request_body = inline(Object),
    responses(
        (status = 200, description = "Updated profile", body = AuthResponse),
        (status = 401, description = "No active session")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(changes): Json<ProfileUpdate>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<AuthResponse>)> {
    match state.profiles.update_profile(user_id, &changes).await {
        Ok(user) => Ok(Json(AuthResponse::ok(user))),
        Err(e) => {
            error!("Update profile error: {:?}", e);
            Err(AuthError::Backend.response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashMap;
    use tokio::sync::Mutex;
    use trendlens_core::domain::ProfileCredentials;
    use trendlens_core::ports::PortResult;

    /// In-memory `ProfileStore` so the auth flow runs without Postgres.
    #[derive(Default)]
    struct MemoryProfileStore {
        profiles: Mutex<HashMap<Uuid, (UserProfile, String)>>,
        sessions: Mutex<HashMap<String, (Uuid, DateTime<Utc>)>>,
    }

    #[async_trait]
    impl ProfileStore for MemoryProfileStore {
        async fn create_profile(
            &self,
            profile: &UserProfile,
            hashed_password: &str,
        ) -> PortResult<UserProfile> {
            let mut profiles = self.profiles.lock().await;
            if profiles.values().any(|(p, _)| p.email == profile.email) {
                return Err(PortError::Conflict(profile.email.clone()));
            }
            profiles.insert(profile.id, (profile.clone(), hashed_password.to_string()));
            Ok(profile.clone())
        }

        async fn get_profile(&self, id: Uuid) -> PortResult<UserProfile> {
            let profiles = self.profiles.lock().await;
            profiles
                .get(&id)
                .map(|(p, _)| p.clone())
                .ok_or_else(|| PortError::NotFound(id.to_string()))
        }

        async fn get_credentials_by_email(&self, email: &str) -> PortResult<ProfileCredentials> {
            let profiles = self.profiles.lock().await;
            profiles
                .values()
                .find(|(p, _)| p.email == email)
                .map(|(p, hash)| ProfileCredentials {
                    id: p.id,
                    email: p.email.clone(),
                    hashed_password: hash.clone(),
                    role: p.role,
                })
                .ok_or_else(|| PortError::NotFound(email.to_string()))
        }

        async fn update_profile(
            &self,
            id: Uuid,
            changes: &ProfileUpdate,
        ) -> PortResult<UserProfile> {
            let mut profiles = self.profiles.lock().await;
            let (profile, _) = profiles
                .get_mut(&id)
                .ok_or_else(|| PortError::NotFound(id.to_string()))?;
            if let Some(first_name) = &changes.first_name {
                profile.first_name = first_name.clone();
            }
            if let Some(company_name) = &changes.company_name {
                profile.company_name = Some(company_name.clone());
            }
            profile.updated_at = Utc::now();
            Ok(profile.clone())
        }

        async fn create_auth_session(
            &self,
            session_id: &str,
            user_id: Uuid,
            expires_at: DateTime<Utc>,
        ) -> PortResult<()> {
            let mut sessions = self.sessions.lock().await;
            sessions.insert(session_id.to_string(), (user_id, expires_at));
            Ok(())
        }

        async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
            let sessions = self.sessions.lock().await;
            sessions
                .get(session_id)
                .filter(|(_, expires_at)| *expires_at > Utc::now())
                .map(|(user_id, _)| *user_id)
                .ok_or(PortError::Unauthorized)
        }

        async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
            let mut sessions = self.sessions.lock().await;
            sessions.remove(session_id);
            Ok(())
        }
    }

    fn signup(role: Role) -> SignupRequest {
        SignupRequest {
            email: "pat@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            first_name: "Pat".to_string(),
            last_name: "Reyes".to_string(),
            role,
            company_name: matches!(role, Role::Brand).then(|| "Globex".to_string()),
            industry: None,
            company_size: None,
            website_name: matches!(role, Role::Publisher).then(|| "Pat's Blog".to_string()),
            website_url: None,
            website_category: None,
            monthly_page_views: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn register_then_authenticate_round_trips() {
        let store = MemoryProfileStore::default();
        let created = register(&store, signup(Role::Brand)).await.unwrap();

        let user = authenticate(&store, "pat@example.com", "hunter2hunter2", Role::Brand)
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.role, Role::Brand);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryProfileStore::default();
        register(&store, signup(Role::Brand)).await.unwrap();

        let err = register(&store, signup(Role::Brand)).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailInUse));
    }

    #[tokio::test]
    async fn wrong_password_is_a_generic_credentials_error() {
        let store = MemoryProfileStore::default();
        register(&store, signup(Role::Brand)).await.unwrap();

        let err = authenticate(&store, "pat@example.com", "wrong-password", Role::Brand)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password. Please try again.");
    }

    #[tokio::test]
    async fn unknown_email_is_a_generic_credentials_error() {
        let store = MemoryProfileStore::default();
        let err = authenticate(&store, "nobody@example.com", "whatever", Role::Brand)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn role_mismatch_names_the_stored_role() {
        let store = MemoryProfileStore::default();
        register(&store, signup(Role::Brand)).await.unwrap();

        // Correct credentials, but signing in through the publisher dashboard.
        let err = authenticate(&store, "pat@example.com", "hunter2hunter2", Role::Publisher)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::RoleMismatch { stored: Role::Brand, requested: Role::Publisher }
        ));
        assert!(err.to_string().contains("registered as a brand"));
        assert_eq!(
            err.to_string(),
            "This account is registered as a brand, not a publisher"
        );
    }
}
