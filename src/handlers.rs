use crate::AppState;
use crate::actions::{self, FormFields};
use crate::auth::{CurrentUser, clear_session, store_session};
use crate::error::PortalError;
use crate::gate::{PageRoute, authorize, dashboard_for};
use crate::models::Profile;
use crate::pages::{self, ListQuery};
use crate::templates;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::collections::HashMap;

/// Liveness probe for load balancers.
pub async fn health() -> &'static str {
    "ok"
}

/// `/` is a pure router: signed-in callers land on their role's dashboard, everyone
/// else on the login page.
pub async fn root(CurrentUser(profile): CurrentUser) -> Redirect {
    match profile {
        Some(profile) => Redirect::to(dashboard_for(profile.role_name)),
        None => Redirect::to("/login"),
    }
}

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    error: Option<String>,
}

/// GET /login renders the sign-in form. An already-authenticated caller is sent
/// straight to their dashboard instead.
pub async fn login_form(
    CurrentUser(profile): CurrentUser,
    Query(query): Query<LoginQuery>,
) -> Response {
    if let Some(profile) = profile {
        return Redirect::to(dashboard_for(profile.role_name)).into_response();
    }
    let content = templates::login::login_page(query.error.as_deref());
    Html(templates::layout("Iniciar Sesión", &content, None)).into_response()
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// POST /login
///
/// Password sign-in against the identity collaborator. Success stores both session
/// cookies and 303s to the caller's dashboard; rejection re-renders the form with the
/// collaborator's message at 401.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    let session = match state.auth.sign_in(&form.email, &form.password).await {
        Ok(session) => session,
        Err(e) => {
            let content = templates::login::login_page(Some(&e.to_string()));
            return (
                StatusCode::UNAUTHORIZED,
                Html(templates::layout("Iniciar Sesión", &content, None)),
            )
                .into_response();
        }
    };

    // The dashboard depends on the role, which lives in the profile row.
    let target = match state.repo.get_profile(session.user.id).await {
        Ok(Some(profile)) => dashboard_for(profile.role_name),
        _ => "/",
    };
    (store_session(jar, &session), Redirect::to(target)).into_response()
}

/// POST /logout clears both cookies and returns to the login page.
pub async fn logout(jar: CookieJar) -> Response {
    (clear_session(jar), Redirect::to("/login")).into_response()
}

/// Fallback rendering when the assembler cannot reach the data collaborator: the page
/// shell with an error alert, never a bare 500 body.
fn error_page(route: PageRoute, profile: &Profile, error: &PortalError) -> Response {
    let content = format!(
        r#"<div class="alert alert-danger">No se pudieron cargar los datos: {}</div>"#,
        crate::util::escape_html(&error.to_string())
    );
    Html(templates::layout(route.title(), &content, Some(profile))).into_response()
}

fn render(route: PageRoute, profile: &Profile, content: &str) -> Response {
    Html(templates::layout(route.title(), content, Some(profile))).into_response()
}

// --- Superadmin pages ---

pub async fn superadmin_dashboard(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
) -> Response {
    let route = PageRoute::SuperadminDashboard;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    match pages::superadmin_dashboard(&state.repo).await {
        Ok(stats) => render(route, &profile, &templates::superadmin::dashboard_page(&stats)),
        Err(e) => error_page(route, &profile, &e),
    }
}

/// GET /superadmin/businesses
///
/// Two-tab page (businesses/companies). `?edit_business_id=` short-circuits to the
/// JSON detail used by the edit modal, before any page assembly.
pub async fn superadmin_businesses(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let route = PageRoute::SuperadminBusinesses;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };

    if let Some(id) = query.edit_business_id {
        // JSON-only surface: a fetch failure is a 404 here, never an HTML error page.
        return match state.repo.get_business_detail(id).await {
            Ok(Some(business)) => Json(business).into_response(),
            Ok(None) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Negocio no encontrado." })),
            )
                .into_response(),
            Err(e) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
        };
    }

    match pages::superadmin_businesses(&state.repo, &query).await {
        Ok(data) => render(
            route,
            &profile,
            &templates::superadmin::businesses_page(&data, query.message.as_deref()),
        ),
        Err(e) => error_page(route, &profile, &e),
    }
}

/// GET /superadmin/users: listing with search/role/company filters;
/// `?edit_user_id=` short-circuits to the JSON profile detail.
pub async fn superadmin_users(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let route = PageRoute::SuperadminUsers;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };

    if let Some(raw) = query.edit_user_id() {
        // A malformed id is the same not-found case as an unknown one, and a fetch
        // failure stays on the JSON surface as a 404.
        let detail = match raw.parse::<uuid::Uuid>() {
            Ok(id) => state.repo.get_profile_detail(id).await,
            Err(_) => Ok(None),
        };
        return match detail {
            Ok(Some(detail)) => Json(detail).into_response(),
            Ok(None) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Usuario no encontrado." })),
            )
                .into_response(),
            Err(e) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
        };
    }

    match pages::superadmin_users(&state.repo, &query).await {
        Ok(data) => render(
            route,
            &profile,
            &templates::superadmin::users_page(&data, query.message.as_deref()),
        ),
        Err(e) => error_page(route, &profile, &e),
    }
}

pub async fn superadmin_providers(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let route = PageRoute::SuperadminProviders;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    match pages::superadmin_providers(&state.repo, &query).await {
        Ok(data) => render(
            route,
            &profile,
            &templates::superadmin::providers_page(&data, query.message.as_deref()),
        ),
        Err(e) => error_page(route, &profile, &e),
    }
}

// --- Admin pages ---

pub async fn admin_dashboard(CurrentUser(profile): CurrentUser) -> Response {
    let route = PageRoute::AdminDashboard;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    render(route, &profile, &templates::admin::dashboard_page(&profile))
}

pub async fn admin_users(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Response {
    let route = PageRoute::AdminUsers;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    match pages::admin_users(&state.repo, profile.business_id).await {
        Ok(data) => render(
            route,
            &profile,
            &templates::admin::users_page(&data, query.message.as_deref()),
        ),
        Err(e) => error_page(route, &profile, &e),
    }
}

// --- Staff pages ---

pub async fn vendedor_proposals(CurrentUser(profile): CurrentUser) -> Response {
    let route = PageRoute::VendedorProposals;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    render(route, &profile, &templates::staff::proposals_page(&profile))
}

pub async fn tramitador_contracts(CurrentUser(profile): CurrentUser) -> Response {
    let route = PageRoute::TramitadorContracts;
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    render(route, &profile, &templates::staff::contracts_page(&profile))
}

// --- Form posts ---

#[derive(Deserialize)]
pub struct ActionQuery {
    #[serde(default)]
    action: Option<String>,
}

async fn handle_action(
    state: AppState,
    profile: Option<Profile>,
    route: PageRoute,
    action: Option<String>,
    form: HashMap<String, String>,
) -> Response {
    let profile = match authorize(route, profile) {
        Ok(profile) => profile,
        Err(deny) => return deny.into_response(),
    };
    let target = actions::dispatch(
        &state,
        &profile,
        route,
        action.as_deref(),
        FormFields::new(form),
    )
    .await;
    Redirect::to(&target).into_response()
}

pub async fn superadmin_businesses_post(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ActionQuery>,
    axum::Form(form): axum::Form<HashMap<String, String>>,
) -> Response {
    handle_action(state, profile, PageRoute::SuperadminBusinesses, query.action, form).await
}

pub async fn superadmin_users_post(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ActionQuery>,
    axum::Form(form): axum::Form<HashMap<String, String>>,
) -> Response {
    handle_action(state, profile, PageRoute::SuperadminUsers, query.action, form).await
}

pub async fn superadmin_providers_post(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ActionQuery>,
    axum::Form(form): axum::Form<HashMap<String, String>>,
) -> Response {
    handle_action(state, profile, PageRoute::SuperadminProviders, query.action, form).await
}

pub async fn admin_users_post(
    State(state): State<AppState>,
    CurrentUser(profile): CurrentUser,
    Query(query): Query<ActionQuery>,
    axum::Form(form): axum::Form<HashMap<String, String>>,
) -> Response {
    handle_action(state, profile, PageRoute::AdminUsers, query.action, form).await
}
