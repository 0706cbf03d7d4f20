use crate::error::PortalError;
use crate::models::{Identity, Profile};
use crate::repository::RepositoryState;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;

/// Cookie pair carrying the hosted session. The names follow the Supabase SSR
/// convention so sessions issued here stay readable by the collaborator's own tooling.
pub const ACCESS_COOKIE: &str = "sb-access-token";
pub const REFRESH_COOKIE: &str = "sb-refresh-token";

/// AuthSession
///
/// What a successful password sign-in yields: the token pair destined for the cookie
/// jar plus the identity it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Identity,
}

/// AuthService Trait
///
/// Abstract contract for the external identity collaborator (GoTrue). The first two
/// operations run with the caller's public credentials; the `admin_*` operations are
/// privilege-escalated one-shot calls using the service-role key, and never touch the
/// caller's cookie jar.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Password sign-in. A rejection carries the collaborator's message text
    /// (rendered inline on the login page).
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, PortalError>;

    /// Validates an access token against the collaborator. `Ok(None)` means the token
    /// is absent from its session store (expired, revoked, garbage), not an error.
    async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, PortalError>;

    /// Creates a confirmed identity on behalf of an operator (escalated).
    async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, PortalError>;

    /// Deletes an identity (escalated).
    async fn admin_delete_user(&self, id: Uuid) -> Result<(), PortalError>;

    /// Resets another user's password (escalated).
    async fn admin_set_password(&self, id: Uuid, password: &str) -> Result<(), PortalError>;
}

/// AuthState
///
/// The concrete type used to share the identity collaborator across the application state.
pub type AuthState = Arc<dyn AuthService>;

// --- GoTrue wire shapes ---

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: Identity,
}

#[derive(Deserialize)]
struct GoTrueError {
    #[serde(alias = "error_description", alias = "msg", alias = "message")]
    detail: Option<String>,
}

/// SupabaseAuth
///
/// Concrete `AuthService` over the hosted GoTrue API (`{url}/auth/v1`).
pub struct SupabaseAuth {
    http: reqwest::Client,
    base: String,
    anon_key: String,
    service_key: String,
}

impl SupabaseAuth {
    pub fn new(
        http: reqwest::Client,
        supabase_url: &str,
        anon_key: &str,
        service_key: &str,
    ) -> Self {
        Self {
            http,
            base: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            service_key: service_key.to_string(),
        }
    }

    async fn reject(endpoint: &str, response: reqwest::Response) -> PortalError {
        let status = response.status();
        let detail = response
            .json::<GoTrueError>()
            .await
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| format!("unexpected response ({status})"));
        tracing::error!(%endpoint, %status, %detail, "auth collaborator rejected the call");
        PortalError::Collaborator(detail)
    }
}

#[async_trait]
impl AuthService for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, PortalError> {
        let response = self
            .http
            .post(format!("{}/token?grant_type=password", self.base))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| unreachable_error("token", e))?;
        if !response.status().is_success() {
            return Err(Self::reject("token", response).await);
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| unreachable_error("token", e))?;
        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user: token.user,
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, PortalError> {
        let response = self
            .http
            .get(format!("{}/user", self.base))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| unreachable_error("user", e))?;
        // A stale or revoked token is a normal anonymous outcome, not a failure.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::reject("user", response).await);
        }
        let identity: Identity = response
            .json()
            .await
            .map_err(|e| unreachable_error("user", e))?;
        Ok(Some(identity))
    }

    async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, PortalError> {
        let response = self
            .http
            .post(format!("{}/admin/users", self.base))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(|e| unreachable_error("admin/users", e))?;
        if !response.status().is_success() {
            return Err(Self::reject("admin/users", response).await);
        }
        response
            .json::<Identity>()
            .await
            .map_err(|e| unreachable_error("admin/users", e))
    }

    async fn admin_delete_user(&self, id: Uuid) -> Result<(), PortalError> {
        let response = self
            .http
            .delete(format!("{}/admin/users/{id}", self.base))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| unreachable_error("admin/users", e))?;
        if !response.status().is_success() {
            return Err(Self::reject("admin/users", response).await);
        }
        Ok(())
    }

    async fn admin_set_password(&self, id: Uuid, password: &str) -> Result<(), PortalError> {
        let response = self
            .http
            .put(format!("{}/admin/users/{id}", self.base))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .map_err(|e| unreachable_error("admin/users", e))?;
        if !response.status().is_success() {
            return Err(Self::reject("admin/users", response).await);
        }
        Ok(())
    }
}

fn unreachable_error(endpoint: &str, err: reqwest::Error) -> PortalError {
    tracing::error!(%endpoint, error = %err, "auth collaborator unreachable");
    PortalError::Collaborator("servicio de identidad no disponible".to_string())
}

// --- Session resolution ---

/// resolve_session
///
/// Resolves the inbound request's cookies into the current `Profile`, or `None` for
/// anonymous. The contract (and its deliberate softness):
///
/// 1. No access cookie → anonymous.
/// 2. Token rejected by the collaborator, or the profile fetch fails for any reason
///    other than "no rows" → logged and resolved as anonymous, so internal errors
///    never leak to the user as anything but a login redirect.
/// 3. Profiles with a `business_id` get a second fetch for the business (style
///    flattened by the repository). That fetch failing is non-fatal: the profile is
///    returned with `business = None`.
pub async fn resolve_session(
    jar: &CookieJar,
    auth: &AuthState,
    repo: &RepositoryState,
) -> Option<Profile> {
    let token = jar.get(ACCESS_COOKIE)?.value().to_string();

    let identity = match auth.get_user(&token).await {
        Ok(Some(identity)) => identity,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "session token validation failed, treating as anonymous");
            return None;
        }
    };

    let mut profile = match repo.get_profile(identity.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(user_id = %identity.id, error = %e, "profile fetch failed, treating as anonymous");
            return None;
        }
    };

    if let Some(business_id) = profile.business_id {
        match repo.get_business_detail(business_id).await {
            Ok(business) => profile.business = business,
            Err(e) => {
                tracing::warn!(%business_id, error = %e, "business fetch failed, continuing without it");
            }
        }
    }

    Some(profile)
}

/// CurrentUser Extractor
///
/// Resolves the session on every request without ever rejecting: public handlers and
/// the authorization gate both need the "maybe anonymous" shape, and the gate, not
/// this extractor, decides where a denied request is redirected.
pub struct CurrentUser(pub Option<Profile>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AuthState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let auth = AuthState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(CurrentUser(resolve_session(&jar, &auth, &repo).await))
    }
}

// --- Cookie plumbing ---

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Adds the freshly issued token pair to the outgoing jar.
pub fn store_session(jar: CookieJar, session: &AuthSession) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, session.access_token.clone()))
        .add(session_cookie(REFRESH_COOKIE, session.refresh_token.clone()))
}

/// Clears the token pair (logout).
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(session_cookie(ACCESS_COOKIE, String::new()))
        .remove(session_cookie(REFRESH_COOKIE, String::new()))
}
