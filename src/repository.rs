use crate::error::PortalError;
use crate::models::{
    Business, BusinessInput, BusinessRef, BusinessStyle, Company, CompanyInput, CompanyRef,
    DashboardStats, Paginated, Profile, ProfileDetail, ProfileInput, ProfilePatch, Provider,
    ProviderInput, Role, RoleName, StyleInput, UserRow,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// Fixed page size for every paginated listing.
pub const PAGE_SIZE: i64 = 10;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations against the hosted
/// data collaborator. Handlers and the page assembler interact with this trait only,
/// so the concrete implementation can be swapped from the live PostgREST client
/// (SupabaseRepository) to in-memory stubs during testing.
///
/// Scoping rule: operations that must be confined to one tenant take the scope as an
/// explicit argument (`list_users_by_business`), never as an implicit filter the call
/// site has to remember.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Session resolution reads ---
    /// Profile + role name for the authenticated identity. `Ok(None)` covers both
    /// "no profile row" and a role name outside the closed set.
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, PortalError>;
    /// Business with its style flattened to a single optional object.
    async fn get_business_detail(&self, id: i64) -> Result<Option<Business>, PortalError>;

    // --- List pages ---
    async fn list_companies(
        &self,
        page: i64,
        search: &str,
    ) -> Result<Paginated<Company>, PortalError>;
    async fn list_businesses(
        &self,
        page: i64,
        search: &str,
    ) -> Result<Paginated<Business>, PortalError>;
    async fn list_users(
        &self,
        page: i64,
        search: &str,
        role: Option<&str>,
        company_id: Option<i64>,
    ) -> Result<Paginated<UserRow>, PortalError>;
    async fn list_providers(
        &self,
        page: i64,
        search: &str,
    ) -> Result<Paginated<Provider>, PortalError>;
    /// Team listing explicitly scoped to one business (admin pages).
    async fn list_users_by_business(&self, business_id: i64) -> Result<Vec<UserRow>, PortalError>;

    // --- Dropdown / reference reads ---
    async fn list_all_companies(&self) -> Result<Vec<CompanyRef>, PortalError>;
    async fn list_all_businesses(&self) -> Result<Vec<BusinessRef>, PortalError>;
    async fn list_roles(&self) -> Result<Vec<Role>, PortalError>;

    // --- Detail reads (edit modals) ---
    async fn get_profile_detail(&self, id: Uuid) -> Result<Option<ProfileDetail>, PortalError>;

    // --- Aggregates ---
    async fn get_stats(&self) -> Result<DashboardStats, PortalError>;

    // --- Company mutations ---
    async fn insert_company(&self, input: CompanyInput) -> Result<(), PortalError>;
    async fn update_company(&self, id: i64, input: CompanyInput) -> Result<(), PortalError>;
    async fn delete_company(&self, id: i64) -> Result<(), PortalError>;
    /// Flips `is_approved` and returns the new value. Calling twice restores the
    /// original state.
    async fn toggle_company_approval(&self, id: i64) -> Result<bool, PortalError>;

    // --- Business mutations ---
    /// Returns the created row so the style upsert can use the generated id.
    async fn insert_business(&self, input: BusinessInput) -> Result<Business, PortalError>;
    async fn update_business(&self, id: i64, input: BusinessInput) -> Result<(), PortalError>;
    async fn delete_business(&self, id: i64) -> Result<(), PortalError>;
    async fn upsert_business_style(&self, input: StyleInput) -> Result<(), PortalError>;

    // --- Profile mutations ---
    async fn insert_profile(&self, input: ProfileInput) -> Result<(), PortalError>;
    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<(), PortalError>;
    async fn delete_profile(&self, id: Uuid) -> Result<(), PortalError>;

    // --- Provider mutations ---
    async fn insert_provider(&self, input: ProviderInput) -> Result<(), PortalError>;
    async fn update_provider(&self, id: i64, input: ProviderInput) -> Result<(), PortalError>;
    async fn delete_provider(&self, id: i64) -> Result<(), PortalError>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

// --- Wire shapes (PostgREST join layouts, flattened before leaving this module) ---

#[derive(Deserialize)]
struct RoleRef {
    name: String,
}

#[derive(Deserialize)]
struct ProfileWire {
    id: Uuid,
    full_name: String,
    email: String,
    role_id: i64,
    business_id: Option<i64>,
    is_active: bool,
    role: Option<RoleRef>,
}

#[derive(Deserialize)]
struct BusinessWire {
    id: i64,
    name: String,
    company_id: i64,
    status: crate::models::BusinessStatus,
    #[serde(default)]
    website_url: Option<String>,
    #[serde(default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    company: Option<CompanyRef>,
    // The join shape yields a collection even though the relation is 1-to-0..1.
    #[serde(default)]
    style: Vec<BusinessStyle>,
}

impl BusinessWire {
    fn flatten(self) -> Business {
        Business {
            id: self.id,
            name: self.name,
            company_id: self.company_id,
            status: self.status,
            website_url: self.website_url,
            created_at: self.created_at,
            company: self.company,
            style: self.style.into_iter().next(),
        }
    }
}

#[derive(Deserialize)]
struct UserBusinessRef {
    name: Option<String>,
    #[serde(default)]
    company: Option<RoleRef>,
}

#[derive(Deserialize)]
struct UserWire {
    id: Uuid,
    full_name: String,
    email: String,
    is_active: bool,
    role: Option<RoleRef>,
    #[serde(default)]
    business: Option<UserBusinessRef>,
}

impl UserWire {
    fn flatten(self) -> UserRow {
        UserRow {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            role_name: self.role.map(|r| r.name).unwrap_or_default(),
            company_name: self
                .business
                .as_ref()
                .and_then(|b| b.company.as_ref().map(|c| c.name.clone())),
            business_name: self.business.and_then(|b| b.name),
            is_active: self.is_active,
        }
    }
}

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

/// SupabaseRepository
///
/// The concrete implementation of `Repository`, backed by the hosted PostgREST API.
///
/// Conventions used throughout:
/// - pagination via `Range`/`Range-Unit: items` headers with `Prefer: count=exact`,
///   reading the filtered total from the `Content-Range` response header;
/// - embedded joins via the `select=` resource embedding syntax;
/// - single-object reads via `Accept: application/vnd.pgrst.object+json`, where the
///   "no rows" rejection (406) maps to `Ok(None)` instead of an error.
pub struct SupabaseRepository {
    http: reqwest::Client,
    base: String,
    key: String,
}

impl SupabaseRepository {
    /// Builds the client against `{supabase_url}/rest/v1` using the given API key.
    pub fn new(http: reqwest::Client, supabase_url: &str, key: &str) -> Self {
        Self {
            http,
            base: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            key: key.to_string(),
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base, table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Converts a non-success PostgREST response into a collaborator error carrying
    /// the message text from the body (surfaced verbatim in redirect messages).
    async fn collaborator_error(table: &str, response: reqwest::Response) -> PortalError {
        let status = response.status();
        let message = match response.json::<PostgrestError>().await {
            Ok(body) => body.message,
            Err(_) => format!("unexpected response ({status})"),
        };
        tracing::error!(%table, %status, %message, "data collaborator rejected the call");
        PortalError::Collaborator(message)
    }

    /// One page of rows plus the exact filtered total.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        page: i64,
    ) -> Result<Paginated<T>, PortalError> {
        let page = page.max(1);
        let from = (page - 1) * PAGE_SIZE;
        let to = from + PAGE_SIZE - 1;

        let response = self
            .request(reqwest::Method::GET, table)
            .query(query)
            .header("Range-Unit", "items")
            .header("Range", format!("{from}-{to}"))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| transport_error(table, e))?;

        // A range past the end of the set is not an error; it is an empty page of a
        // still-countable set.
        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            let count = parse_content_range(&response);
            return Ok(Paginated { data: Vec::new(), count });
        }
        if !response.status().is_success() {
            return Err(Self::collaborator_error(table, response).await);
        }

        let count = parse_content_range(&response);
        let data = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| decode_error(table, e))?;
        Ok(Paginated { data, count })
    }

    /// All matching rows, no pagination (dropdown and reference reads).
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, PortalError> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(table, e))?;
        if !response.status().is_success() {
            return Err(Self::collaborator_error(table, response).await);
        }
        response.json::<Vec<T>>().await.map_err(|e| decode_error(table, e))
    }

    /// Exactly one row or `None`. Uses the single-object media type so "zero rows"
    /// arrives as a distinguishable rejection rather than an empty array.
    async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, PortalError> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(query)
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await
            .map_err(|e| transport_error(table, e))?;
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::collaborator_error(table, response).await);
        }
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| decode_error(table, e))
    }

    /// Fire-and-check write (insert / patch / delete) with no representation needed.
    async fn write(
        &self,
        method: reqwest::Method,
        table: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        prefer: Option<&str>,
    ) -> Result<(), PortalError> {
        let mut req = self.request(method, table).query(query);
        if let Some(prefer) = prefer {
            req = req.header("Prefer", prefer);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| transport_error(table, e))?;
        if !response.status().is_success() {
            return Err(Self::collaborator_error(table, response).await);
        }
        Ok(())
    }

    /// Exact count of a filtered set without fetching rows.
    async fn count(&self, table: &str, query: &[(&str, String)]) -> Result<i64, PortalError> {
        let mut full: Vec<(&str, String)> = vec![("select", "id".to_string())];
        full.extend_from_slice(query);
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&full)
            .header("Range-Unit", "items")
            .header("Range", "0-0")
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| transport_error(table, e))?;
        if !response.status().is_success()
            && response.status() != StatusCode::RANGE_NOT_SATISFIABLE
        {
            return Err(Self::collaborator_error(table, response).await);
        }
        Ok(parse_content_range(&response))
    }

}

/// Resolves a role id from the reference set by name, for the stats breakdown.
fn role_id(roles: &[Role], name: RoleName) -> Option<i64> {
    roles.iter().find(|r| r.name == name).map(|r| r.id)
}

fn transport_error(table: &str, err: reqwest::Error) -> PortalError {
    tracing::error!(%table, error = %err, "data collaborator unreachable");
    PortalError::Collaborator("servicio de datos no disponible".to_string())
}

fn decode_error(table: &str, err: reqwest::Error) -> PortalError {
    tracing::error!(%table, error = %err, "data collaborator returned an undecodable body");
    PortalError::Collaborator("respuesta inesperada del servicio de datos".to_string())
}

/// Parses the total out of `Content-Range: 0-9/57` (or `*/57` for empty pages).
fn parse_content_range(response: &reqwest::Response) -> i64 {
    response
        .headers()
        .get("content-range")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit('/').next())
        .and_then(|total| total.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Builds an `or=(a.ilike.*q*,b.ilike.*q*)` disjunction for free-text search.
fn ilike_any(columns: &[&str], term: &str) -> String {
    let clauses: Vec<String> = columns
        .iter()
        .map(|c| format!("{c}.ilike.*{term}*"))
        .collect();
    format!("({})", clauses.join(","))
}

#[async_trait]
impl Repository for SupabaseRepository {
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, PortalError> {
        let query = [
            ("select", "*,role:roles(name)".to_string()),
            ("id", format!("eq.{id}")),
        ];
        let Some(wire) = self.fetch_one::<ProfileWire>("user_profiles", &query).await? else {
            return Ok(None);
        };
        let role_name = wire.role.as_ref().and_then(|r| RoleName::parse(&r.name));
        let Some(role_name) = role_name else {
            // A profile whose role is outside the closed set cannot be routed anywhere;
            // resolving it as anonymous sends the request to /login.
            tracing::warn!(profile_id = %wire.id, "profile has an unroutable role, resolving as anonymous");
            return Ok(None);
        };
        Ok(Some(Profile {
            id: wire.id,
            full_name: wire.full_name,
            email: wire.email,
            role_id: wire.role_id,
            role_name,
            business_id: wire.business_id,
            is_active: wire.is_active,
            business: None,
        }))
    }

    async fn get_business_detail(&self, id: i64) -> Result<Option<Business>, PortalError> {
        let query = [
            (
                "select",
                "*,company:companies(id,name,cif,address),style:business_styles(*)".to_string(),
            ),
            ("id", format!("eq.{id}")),
        ];
        Ok(self
            .fetch_one::<BusinessWire>("businesses", &query)
            .await?
            .map(BusinessWire::flatten))
    }

    async fn list_companies(
        &self,
        page: i64,
        search: &str,
    ) -> Result<Paginated<Company>, PortalError> {
        let mut query = vec![
            ("select", "*,businesses(id,name)".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if !search.is_empty() {
            query.push(("or", ilike_any(&["name", "cif"], search)));
        }
        self.fetch_page("companies", &query, page).await
    }

    async fn list_businesses(
        &self,
        page: i64,
        search: &str,
    ) -> Result<Paginated<Business>, PortalError> {
        let mut query = vec![
            (
                "select",
                "*,company:companies(id,name,cif,address),style:business_styles(*)".to_string(),
            ),
            ("order", "created_at.desc".to_string()),
        ];
        if !search.is_empty() {
            query.push(("name", format!("ilike.*{search}*")));
        }
        let wires: Paginated<BusinessWire> = self.fetch_page("businesses", &query, page).await?;
        Ok(Paginated {
            data: wires.data.into_iter().map(BusinessWire::flatten).collect(),
            count: wires.count,
        })
    }

    async fn list_users(
        &self,
        page: i64,
        search: &str,
        role: Option<&str>,
        company_id: Option<i64>,
    ) -> Result<Paginated<UserRow>, PortalError> {
        // Embedded filters only constrain the parent when the embed is `!inner`, so
        // the select shape depends on which filters are present.
        let role_embed = if role.is_some() { "role:roles!inner(name)" } else { "role:roles(name)" };
        let business_embed = if company_id.is_some() {
            "business:businesses!inner(name,company:companies(name))"
        } else {
            "business:businesses(name,company:companies(name))"
        };
        let mut query = vec![
            ("select", format!("*,{role_embed},{business_embed}")),
            ("order", "full_name.asc".to_string()),
        ];
        if !search.is_empty() {
            query.push(("or", ilike_any(&["full_name", "email"], search)));
        }
        if let Some(role) = role {
            query.push(("role.name", format!("eq.{role}")));
        }
        if let Some(company_id) = company_id {
            query.push(("business.company_id", format!("eq.{company_id}")));
        }
        let wires: Paginated<UserWire> = self.fetch_page("user_profiles", &query, page).await?;
        Ok(Paginated {
            data: wires.data.into_iter().map(UserWire::flatten).collect(),
            count: wires.count,
        })
    }

    async fn list_providers(
        &self,
        page: i64,
        search: &str,
    ) -> Result<Paginated<Provider>, PortalError> {
        let mut query = vec![("select", "*".to_string()), ("order", "name.asc".to_string())];
        if !search.is_empty() {
            query.push(("name", format!("ilike.*{search}*")));
        }
        self.fetch_page("providers", &query, page).await
    }

    async fn list_users_by_business(&self, business_id: i64) -> Result<Vec<UserRow>, PortalError> {
        let query = [
            (
                "select",
                "*,role:roles(name),business:businesses(name,company:companies(name))".to_string(),
            ),
            ("business_id", format!("eq.{business_id}")),
            ("order", "full_name.asc".to_string()),
        ];
        let wires: Vec<UserWire> = self.fetch_rows("user_profiles", &query).await?;
        Ok(wires.into_iter().map(UserWire::flatten).collect())
    }

    async fn list_all_companies(&self) -> Result<Vec<CompanyRef>, PortalError> {
        self.fetch_rows(
            "companies",
            &[
                ("select", "id,name,cif,address".to_string()),
                ("order", "name.asc".to_string()),
            ],
        )
        .await
    }

    async fn list_all_businesses(&self) -> Result<Vec<BusinessRef>, PortalError> {
        self.fetch_rows(
            "businesses",
            &[("select", "id,name".to_string()), ("order", "name.asc".to_string())],
        )
        .await
    }

    async fn list_roles(&self) -> Result<Vec<Role>, PortalError> {
        #[derive(Deserialize)]
        struct RoleWire {
            id: i64,
            name: String,
        }
        let wires: Vec<RoleWire> = self
            .fetch_rows("roles", &[("select", "id,name".to_string())])
            .await?;
        // Rows outside the closed role set are dropped rather than surfaced.
        Ok(wires
            .into_iter()
            .filter_map(|w| RoleName::parse(&w.name).map(|name| Role { id: w.id, name }))
            .collect())
    }

    async fn get_profile_detail(&self, id: Uuid) -> Result<Option<ProfileDetail>, PortalError> {
        let query = [
            ("select", "id,full_name,email,role_id,business_id,is_active".to_string()),
            ("id", format!("eq.{id}")),
        ];
        self.fetch_one("user_profiles", &query).await
    }

    async fn get_stats(&self) -> Result<DashboardStats, PortalError> {
        let roles = self.list_roles().await?;
        let admin_role = role_id(&roles, RoleName::Admin);
        let seller_role = role_id(&roles, RoleName::Vendedor);

        let admin_filter = admin_role
            .map(|id| vec![("role_id", format!("eq.{id}"))])
            .unwrap_or_default();
        let seller_filter = seller_role
            .map(|id| vec![("role_id", format!("eq.{id}"))])
            .unwrap_or_default();
        let pending_filter = [("status", "eq.pending_verification".to_string())];

        // Independent counts, issued concurrently.
        let (companies, businesses, pending, users, admins, sellers, providers) = tokio::try_join!(
            self.count("companies", &[]),
            self.count("businesses", &[]),
            self.count("businesses", &pending_filter),
            self.count("user_profiles", &[]),
            self.count("user_profiles", &admin_filter),
            self.count("user_profiles", &seller_filter),
            self.count("providers", &[]),
        )?;

        Ok(DashboardStats {
            companies_count: companies,
            businesses_count: businesses,
            businesses_pending_count: pending,
            users_count: users,
            admins_count: if admin_role.is_some() { admins } else { 0 },
            sellers_count: if seller_role.is_some() { sellers } else { 0 },
            providers_count: providers,
        })
    }

    async fn insert_company(&self, input: CompanyInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::POST,
            "companies",
            &[],
            Some(serde_json::to_value(input).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn update_company(&self, id: i64, input: CompanyInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::PATCH,
            "companies",
            &[("id", format!("eq.{id}"))],
            Some(serde_json::to_value(input).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn delete_company(&self, id: i64) -> Result<(), PortalError> {
        self.write(reqwest::Method::DELETE, "companies", &[("id", format!("eq.{id}"))], None, None)
            .await
    }

    async fn toggle_company_approval(&self, id: i64) -> Result<bool, PortalError> {
        #[derive(Deserialize)]
        struct Approval {
            is_approved: bool,
        }
        let current: Option<Approval> = self
            .fetch_one(
                "companies",
                &[("select", "is_approved".to_string()), ("id", format!("eq.{id}"))],
            )
            .await?;
        let current = current.ok_or(PortalError::NotFound)?;
        let next = !current.is_approved;
        self.write(
            reqwest::Method::PATCH,
            "companies",
            &[("id", format!("eq.{id}"))],
            Some(serde_json::json!({ "is_approved": next })),
            None,
        )
        .await?;
        Ok(next)
    }

    async fn insert_business(&self, input: BusinessInput) -> Result<Business, PortalError> {
        let response = self
            .request(reqwest::Method::POST, "businesses")
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(&input)
            .send()
            .await
            .map_err(|e| transport_error("businesses", e))?;
        if !response.status().is_success() {
            return Err(Self::collaborator_error("businesses", response).await);
        }
        let wire: BusinessWire = response
            .json()
            .await
            .map_err(|e| decode_error("businesses", e))?;
        Ok(wire.flatten())
    }

    async fn update_business(&self, id: i64, input: BusinessInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::PATCH,
            "businesses",
            &[("id", format!("eq.{id}"))],
            Some(serde_json::to_value(input).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn delete_business(&self, id: i64) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::DELETE,
            "businesses",
            &[("id", format!("eq.{id}"))],
            None,
            None,
        )
        .await
    }

    async fn upsert_business_style(&self, input: StyleInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::POST,
            "business_styles",
            &[("on_conflict", "business_id".to_string())],
            Some(serde_json::to_value(input).unwrap_or_default()),
            Some("resolution=merge-duplicates"),
        )
        .await
    }

    async fn insert_profile(&self, input: ProfileInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::POST,
            "user_profiles",
            &[],
            Some(serde_json::to_value(input).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::PATCH,
            "user_profiles",
            &[("id", format!("eq.{id}"))],
            Some(serde_json::to_value(patch).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn delete_profile(&self, id: Uuid) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::DELETE,
            "user_profiles",
            &[("id", format!("eq.{id}"))],
            None,
            None,
        )
        .await
    }

    async fn insert_provider(&self, input: ProviderInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::POST,
            "providers",
            &[],
            Some(serde_json::to_value(input).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn update_provider(&self, id: i64, input: ProviderInput) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::PATCH,
            "providers",
            &[("id", format!("eq.{id}"))],
            Some(serde_json::to_value(input).unwrap_or_default()),
            None,
        )
        .await
    }

    async fn delete_provider(&self, id: i64) -> Result<(), PortalError> {
        self.write(
            reqwest::Method::DELETE,
            "providers",
            &[("id", format!("eq.{id}"))],
            None,
            None,
        )
        .await
    }
}
