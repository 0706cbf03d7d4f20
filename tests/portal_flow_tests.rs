use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use canal_portal::{
    AppState, create_router,
    auth::{AuthService, AuthSession, AuthState},
    config::AppConfig,
    error::PortalError,
    models::{
        Business, BusinessInput, BusinessRef, BusinessStyle, Company, CompanyInput, CompanyRef,
        DashboardStats, Identity, Paginated, Profile, ProfileDetail, ProfileInput, ProfilePatch,
        Provider, ProviderInput, Role, RoleName, StyleInput, UserRow,
    },
    repository::{Repository, RepositoryState},
};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;
use uuid::Uuid;

// --- STUB REPOSITORY ---

// The central control point for router-level tests. Reads return pre-canned values,
// writes record their inputs for later assertions. `panic_on_write` turns any
// mutation into a test failure, which is how the closed-dispatch and
// validation-before-dispatch properties are verified.
struct StubRepo {
    profile: Option<Profile>,
    business_detail: Option<Business>,
    profile_detail: Option<ProfileDetail>,
    fail_details: bool,
    approved: Mutex<bool>,
    panic_on_write: bool,
    inserted_companies: Mutex<Vec<CompanyInput>>,
    inserted_profiles: Mutex<Vec<ProfileInput>>,
    upserted_styles: Mutex<Vec<StyleInput>>,
}

impl Default for StubRepo {
    fn default() -> Self {
        StubRepo {
            profile: None,
            business_detail: None,
            profile_detail: None,
            fail_details: false,
            approved: Mutex::new(false),
            panic_on_write: false,
            inserted_companies: Mutex::new(vec![]),
            inserted_profiles: Mutex::new(vec![]),
            upserted_styles: Mutex::new(vec![]),
        }
    }
}

impl StubRepo {
    fn guard_write(&self) {
        if self.panic_on_write {
            panic!("collaborator write reached a stub that expected none");
        }
    }
}

fn test_roles() -> Vec<Role> {
    vec![
        Role { id: 1, name: RoleName::Superadmin },
        Role { id: 2, name: RoleName::Admin },
        Role { id: 3, name: RoleName::Vendedor },
        Role { id: 4, name: RoleName::Tramitador },
    ]
}

#[async_trait]
impl Repository for StubRepo {
    async fn get_profile(&self, _id: Uuid) -> Result<Option<Profile>, PortalError> {
        Ok(self.profile.clone())
    }
    async fn get_business_detail(&self, _id: i64) -> Result<Option<Business>, PortalError> {
        if self.fail_details {
            return Err(PortalError::Collaborator(
                "servicio de datos no disponible".to_string(),
            ));
        }
        Ok(self.business_detail.clone())
    }
    async fn list_companies(
        &self,
        _page: i64,
        _search: &str,
    ) -> Result<Paginated<Company>, PortalError> {
        Ok(Paginated::default())
    }
    async fn list_businesses(
        &self,
        _page: i64,
        _search: &str,
    ) -> Result<Paginated<Business>, PortalError> {
        Ok(Paginated::default())
    }
    async fn list_users(
        &self,
        _page: i64,
        _search: &str,
        _role: Option<&str>,
        _company_id: Option<i64>,
    ) -> Result<Paginated<UserRow>, PortalError> {
        Ok(Paginated::default())
    }
    async fn list_providers(
        &self,
        _page: i64,
        _search: &str,
    ) -> Result<Paginated<Provider>, PortalError> {
        Ok(Paginated::default())
    }
    async fn list_users_by_business(&self, _business_id: i64) -> Result<Vec<UserRow>, PortalError> {
        Ok(vec![])
    }
    async fn list_all_companies(&self) -> Result<Vec<CompanyRef>, PortalError> {
        Ok(vec![])
    }
    async fn list_all_businesses(&self) -> Result<Vec<BusinessRef>, PortalError> {
        Ok(vec![])
    }
    async fn list_roles(&self) -> Result<Vec<Role>, PortalError> {
        Ok(test_roles())
    }
    async fn get_profile_detail(&self, _id: Uuid) -> Result<Option<ProfileDetail>, PortalError> {
        if self.fail_details {
            return Err(PortalError::Collaborator(
                "servicio de datos no disponible".to_string(),
            ));
        }
        Ok(self.profile_detail.clone())
    }
    async fn get_stats(&self) -> Result<DashboardStats, PortalError> {
        Ok(DashboardStats::default())
    }
    async fn insert_company(&self, input: CompanyInput) -> Result<(), PortalError> {
        self.guard_write();
        self.inserted_companies.lock().unwrap().push(input);
        Ok(())
    }
    async fn update_company(&self, _id: i64, _input: CompanyInput) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn delete_company(&self, _id: i64) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn toggle_company_approval(&self, _id: i64) -> Result<bool, PortalError> {
        self.guard_write();
        let mut approved = self.approved.lock().unwrap();
        *approved = !*approved;
        Ok(*approved)
    }
    async fn insert_business(&self, input: BusinessInput) -> Result<Business, PortalError> {
        self.guard_write();
        Ok(Business {
            id: 77,
            name: input.name,
            company_id: input.company_id,
            status: input.status,
            ..Business::default()
        })
    }
    async fn update_business(&self, _id: i64, _input: BusinessInput) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn delete_business(&self, _id: i64) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn upsert_business_style(&self, input: StyleInput) -> Result<(), PortalError> {
        self.guard_write();
        self.upserted_styles.lock().unwrap().push(input);
        Ok(())
    }
    async fn insert_profile(&self, input: ProfileInput) -> Result<(), PortalError> {
        self.guard_write();
        self.inserted_profiles.lock().unwrap().push(input);
        Ok(())
    }
    async fn update_profile(&self, _id: Uuid, _patch: ProfilePatch) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn delete_profile(&self, _id: Uuid) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn insert_provider(&self, _input: ProviderInput) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn update_provider(&self, _id: i64, _input: ProviderInput) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
    async fn delete_provider(&self, _id: i64) -> Result<(), PortalError> {
        self.guard_write();
        Ok(())
    }
}

// --- STUB AUTH SERVICE ---

const VALID_TOKEN: &str = "valid-token";

struct StubAuth {
    identity: Identity,
    accept_password: bool,
    created: Mutex<Vec<String>>,
    deleted: Mutex<Vec<Uuid>>,
}

impl StubAuth {
    fn new(identity: Identity) -> Self {
        StubAuth {
            identity,
            accept_password: true,
            created: Mutex::new(vec![]),
            deleted: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl AuthService for StubAuth {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthSession, PortalError> {
        if !self.accept_password {
            return Err(PortalError::Collaborator(
                "Invalid login credentials".to_string(),
            ));
        }
        Ok(AuthSession {
            access_token: VALID_TOKEN.to_string(),
            refresh_token: "refresh".to_string(),
            user: self.identity.clone(),
        })
    }
    async fn get_user(&self, access_token: &str) -> Result<Option<Identity>, PortalError> {
        if access_token == VALID_TOKEN {
            Ok(Some(self.identity.clone()))
        } else {
            Ok(None)
        }
    }
    async fn admin_create_user(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<Identity, PortalError> {
        self.created.lock().unwrap().push(email.to_string());
        Ok(Identity { id: Uuid::new_v4(), email: email.to_string() })
    }
    async fn admin_delete_user(&self, id: Uuid) -> Result<(), PortalError> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
    async fn admin_set_password(&self, _id: Uuid, _password: &str) -> Result<(), PortalError> {
        Ok(())
    }
}

// --- Helpers ---

fn profile(role: RoleName, business_id: Option<i64>) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        full_name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role_id: 1,
        role_name: role,
        business_id,
        is_active: true,
        business: None,
    }
}

fn app(repo: Arc<StubRepo>, auth: Arc<StubAuth>) -> axum::Router {
    let state = AppState {
        repo: repo as RepositoryState,
        auth: auth as AuthState,
        config: AppConfig::default(),
    };
    create_router(state)
}

fn signed_in_app(role: RoleName, business_id: Option<i64>) -> (axum::Router, Arc<StubRepo>, Arc<StubAuth>) {
    let p = profile(role, business_id);
    let auth = Arc::new(StubAuth::new(Identity { id: p.id, email: p.email.clone() }));
    let repo = Arc::new(StubRepo { profile: Some(p), ..StubRepo::default() });
    (app(repo.clone(), auth.clone()), repo, auth)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("Cookie", format!("sb-access-token={VALID_TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Cookie", format!("sb-access-token={VALID_TOKEN}"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &axum::http::Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("response carries no Location header")
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// --- Session & gate ---

#[tokio::test]
async fn test_health_check() {
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_anonymous_is_redirected_to_login() {
    let auth = Arc::new(StubAuth::new(Identity { id: Uuid::new_v4(), email: "x@x.com".to_string() }));
    let repo = Arc::new(StubRepo::default());
    let response = app(repo, auth)
        .oneshot(
            Request::builder()
                .uri("/superadmin/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?error="));
}

#[tokio::test]
async fn test_wrong_role_is_sent_to_its_own_dashboard() {
    let (app, _, _) = signed_in_app(RoleName::Vendedor, Some(5));
    let response = app.oneshot(get("/superadmin/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/vendedor/proposals");
}

#[tokio::test]
async fn test_root_routes_by_role() {
    let (app, _, _) = signed_in_app(RoleName::Tramitador, Some(5));
    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(location(&response), "/tramitador/contracts");

    let anon = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(anon).await.unwrap();
    assert_eq!(location(&response), "/login");
}

// --- Login flow ---

#[tokio::test]
async fn test_login_success_sets_cookies_and_redirects() {
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("email=test%40example.com&password=secret"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/superadmin/dashboard");
    let cookies: Vec<&str> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=valid-token")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=")));
}

#[tokio::test]
async fn test_login_rejection_rerenders_with_message() {
    let p = profile(RoleName::Superadmin, None);
    let mut auth = StubAuth::new(Identity { id: p.id, email: p.email.clone() });
    auth.accept_password = false;
    let repo = Arc::new(StubRepo::default());
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("email=test%40example.com&password=wrong"))
        .unwrap();
    let response = app(repo, Arc::new(auth)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(response).await.contains("Invalid login credentials"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app.oneshot(post_form("/logout", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// --- Form actions ---

#[tokio::test]
async fn test_create_company_redirects_with_exact_message() {
    let (app, repo, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(post_form(
            "/superadmin/businesses?action=create_company",
            "name=Acme&cif=B123&address=Calle+Mayor+1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/superadmin/businesses?entity=companies&message=Compa%C3%B1%C3%ADa%20creada%20con%20%C3%A9xito."
    );
    let inserted = repo.inserted_companies.lock().unwrap();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].name, "Acme");
    assert_eq!(inserted[0].cif, "B123");
}

#[tokio::test]
async fn test_unknown_action_never_reaches_a_collaborator() {
    let p = profile(RoleName::Superadmin, None);
    let auth = Arc::new(StubAuth::new(Identity { id: p.id, email: p.email.clone() }));
    let repo = Arc::new(StubRepo { profile: Some(p), panic_on_write: true, ..StubRepo::default() });
    let response = app(repo, auth)
        .oneshot(post_form(
            "/superadmin/businesses?action=drop_all_tables",
            "id=1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("acci%C3%B3n%20desconocida"));
}

#[tokio::test]
async fn test_missing_field_fails_before_any_write() {
    let p = profile(RoleName::Superadmin, None);
    let auth = Arc::new(StubAuth::new(Identity { id: p.id, email: p.email.clone() }));
    let repo = Arc::new(StubRepo { profile: Some(p), panic_on_write: true, ..StubRepo::default() });
    let response = app(repo, auth)
        .oneshot(post_form(
            "/superadmin/businesses?action=create_company",
            "name=Acme&address=Calle",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Falta%20el%20campo%20obligatorio%20'cif'"));
}

#[tokio::test]
async fn test_toggle_company_approval_alternates() {
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .clone()
        .oneshot(post_form("/superadmin/businesses?action=toggle_company_approval", "id=4"))
        .await
        .unwrap();
    assert!(location(&response).contains("Compa%C3%B1%C3%ADa%20aprobada."));

    let response = app
        .oneshot(post_form("/superadmin/businesses?action=toggle_company_approval", "id=4"))
        .await
        .unwrap();
    assert!(location(&response).contains("Aprobaci%C3%B3n%20retirada."));
}

#[tokio::test]
async fn test_create_business_with_style_upserts_generated_id() {
    let (app, repo, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(post_form(
            "/superadmin/businesses?action=create_business",
            "name=Canal+Sur&company_id=3&status=active&primary_color=%23112233",
        ))
        .await
        .unwrap();
    assert!(location(&response).contains("Negocio%20creado%20con%20%C3%A9xito."));
    let styles = repo.upserted_styles.lock().unwrap();
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].business_id, 77);
    assert_eq!(styles[0].primary_color, "#112233");
}

// --- User writes ---

#[tokio::test]
async fn test_admin_create_user_is_scoped_to_own_business() {
    let (app, repo, auth) = signed_in_app(RoleName::Admin, Some(42));
    // A forged business_id in the form body must be ignored.
    let response = app
        .oneshot(post_form(
            "/admin/users?action=create_user",
            "full_name=Ana&email=ana%40example.com&password=secret&role_id=3&business_id=999",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("Usuario%20creado%20con%20%C3%A9xito."));
    assert_eq!(auth.created.lock().unwrap().as_slice(), ["ana@example.com"]);
    let inserted = repo.inserted_profiles.lock().unwrap();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].business_id, Some(42));
    assert_eq!(inserted[0].role_id, 3);
}

#[tokio::test]
async fn test_admin_cannot_create_privileged_roles() {
    let (app, _, auth) = signed_in_app(RoleName::Admin, Some(42));
    let response = app
        .oneshot(post_form(
            "/admin/users?action=create_user",
            "full_name=Eve&email=eve%40example.com&password=secret&role_id=1",
        ))
        .await
        .unwrap();
    assert!(location(&response).contains("Error%20de%20validaci%C3%B3n"));
    assert!(auth.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unassigned_admin_create_user_is_rejected() {
    let (app, _, auth) = signed_in_app(RoleName::Admin, None);
    let response = app
        .oneshot(post_form(
            "/admin/users?action=create_user",
            "full_name=Ana&email=ana%40example.com&password=secret&role_id=3",
        ))
        .await
        .unwrap();
    assert!(location(&response).contains("No%20est%C3%A1s%20asignado%20a%20ning%C3%BAn%20negocio."));
    assert!(auth.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_superadmin_with_business_is_rejected() {
    let (app, repo, auth) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(post_form(
            "/superadmin/users?action=create_user",
            "full_name=Root&email=root%40example.com&password=secret&role_id=1&business_id=7",
        ))
        .await
        .unwrap();
    assert!(location(&response).contains("Error%20de%20validaci%C3%B3n"));
    assert!(auth.created.lock().unwrap().is_empty());
    assert!(repo.inserted_profiles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_user_removes_identity_then_profile() {
    let (app, _, auth) = signed_in_app(RoleName::Superadmin, None);
    let target = Uuid::new_v4();
    let response = app
        .oneshot(post_form(
            "/superadmin/users?action=delete_user",
            &format!("id={target}"),
        ))
        .await
        .unwrap();
    assert!(location(&response).contains("Usuario%20eliminado."));
    assert_eq!(auth.deleted.lock().unwrap().as_slice(), [target]);
}

// --- JSON edit endpoints ---

#[tokio::test]
async fn test_edit_business_returns_flattened_style() {
    let p = profile(RoleName::Superadmin, None);
    let auth = Arc::new(StubAuth::new(Identity { id: p.id, email: p.email.clone() }));
    let repo = Arc::new(StubRepo {
        profile: Some(p),
        business_detail: Some(Business {
            id: 9,
            name: "Canal Norte".to_string(),
            company_id: 2,
            style: Some(BusinessStyle {
                business_id: 9,
                logo_base64: None,
                primary_color: "#399f82".to_string(),
                secondary_color: "#4a4548".to_string(),
                background_color: None,
            }),
            ..Business::default()
        }),
        ..StubRepo::default()
    });
    let response = app(repo, auth)
        .oneshot(get("/superadmin/businesses?edit_business_id=9"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["name"], "Canal Norte");
    // Flattened: a single object, not the collection the join shape produces.
    assert_eq!(json["style"]["primary_color"], "#399f82");
}

#[tokio::test]
async fn test_edit_user_unknown_id_is_a_json_404() {
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(get(&format!("/superadmin/users?edit_user_id={}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["error"], "Usuario no encontrado.");
}

#[tokio::test]
async fn test_edit_user_malformed_id_is_a_json_404() {
    // A hand-typed `?edit_user_id=42` is not a UUID; it must get the same JSON 404 as
    // an unknown id, never a plain-text extractor rejection.
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(get("/superadmin/users?edit_user_id=42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["error"], "Usuario no encontrado.");
}

#[tokio::test]
async fn test_edit_detail_fetch_error_stays_on_the_json_surface() {
    let p = profile(RoleName::Superadmin, None);
    let auth = Arc::new(StubAuth::new(Identity { id: p.id, email: p.email.clone() }));
    let repo = Arc::new(StubRepo { profile: Some(p), fail_details: true, ..StubRepo::default() });
    let app = app(repo, auth);

    let response = app
        .clone()
        .oneshot(get("/superadmin/businesses?edit_business_id=9"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["error"].is_string());

    let response = app
        .oneshot(get(&format!("/superadmin/users?edit_user_id={}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["error"].is_string());
}

// --- Pages ---

#[tokio::test]
async fn test_unassigned_admin_sees_notice_without_fetch() {
    let (app, _, _) = signed_in_app(RoleName::Admin, None);
    let response = app.oneshot(get("/admin/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("No estás asignado a ningún negocio."));
}

#[tokio::test]
async fn test_garbage_query_params_still_render_the_page() {
    // Hand-edited URLs must not 400 a listing page; unparseable numeric filters read
    // as absent.
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .clone()
        .oneshot(get("/superadmin/providers?page=abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/superadmin/users?company=abc&page=-3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_message_from_redirect_is_echoed() {
    let (app, _, _) = signed_in_app(RoleName::Superadmin, None);
    let response = app
        .oneshot(get(
            "/superadmin/businesses?entity=companies&message=Compa%C3%B1%C3%ADa%20creada%20con%20%C3%A9xito.",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Compañía creada con éxito."));
}
