use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Closed variant sets ---

/// RoleName
///
/// The closed set of role variants governing all authorization decisions.
/// Unknown names coming back from the reference table are treated at the resolver
/// boundary as an unroutable role (the gate sends them to /login), never invented
/// into a fifth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Superadmin,
    Admin,
    Vendedor,
    Tramitador,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Superadmin => "superadmin",
            RoleName::Admin => "admin",
            RoleName::Vendedor => "vendedor",
            RoleName::Tramitador => "tramitador",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "superadmin" => Some(RoleName::Superadmin),
            "admin" => Some(RoleName::Admin),
            "vendedor" => Some(RoleName::Vendedor),
            "tramitador" => Some(RoleName::Tramitador),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BusinessStatus
///
/// Lifecycle state of a sales channel. Serialized snake_case to match the
/// collaborator's enum column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BusinessStatus {
    Active,
    #[default]
    PendingVerification,
    Suspended,
    Archived,
}

impl BusinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessStatus::Active => "active",
            BusinessStatus::PendingVerification => "pending_verification",
            BusinessStatus::Suspended => "suspended",
            BusinessStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(BusinessStatus::Active),
            "pending_verification" => Some(BusinessStatus::PendingVerification),
            "suspended" => Some(BusinessStatus::Suspended),
            "archived" => Some(BusinessStatus::Archived),
            _ => None,
        }
    }
}

// --- Core entities (shapes as consumed from the collaborator) ---

/// Identity
///
/// The bare identity record owned by the external auth collaborator (GoTrue).
/// Distinct from `Profile`, which is the application-level user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

/// Profile
///
/// The application-level user record: name, role and business linkage. One per
/// Identity, keyed by the same UUID. Read once per request by the session resolver;
/// never cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role_id: i64,
    pub role_name: RoleName,
    pub business_id: Option<i64>,
    pub is_active: bool,
    /// Populated by the resolver's second fetch; `None` when the profile has no
    /// business or when that (non-fatal) fetch fails.
    #[serde(default)]
    pub business: Option<Business>,
}

/// Company: the legal/fiscal entity that owns one or more businesses.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub cif: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_approved: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Embedded refs for the companies tab ("Negocios Asociados" badges).
    #[serde(default)]
    pub businesses: Vec<BusinessRef>,
}

/// Minimal embedded reference to a business inside a company row.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BusinessRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Minimal embedded reference to the parent company inside a business row.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cif: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Business: a tenant-facing sales channel, scoped under exactly one company.
///
/// `style` is at most one row; the collaborator returns it as a 0/1-element array
/// because of the join shape, and the repository flattens it before anything else
/// sees it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub status: BusinessStatus,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
    #[serde(default)]
    pub style: Option<BusinessStyle>,
}

/// BusinessStyle: visual branding attached to one business, written via upsert
/// keyed on `business_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BusinessStyle {
    pub business_id: i64,
    #[serde(default)]
    pub logo_base64: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default)]
    pub background_color: Option<String>,
}

/// Provider: reference entity for energy providers; no tenancy relations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_b64: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Role: a row of the small static reference set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
}

/// UserRow
///
/// Flat, display-ready user listing row. The repository resolves the role name,
/// business name, parent company name and login email from the embedded joins so the
/// templates never walk nested objects.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role_name: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    pub is_active: bool,
}

/// ProfileDetail
///
/// Raw editable fields of a profile, returned by the `?edit_user_id=` JSON endpoint
/// to populate the edit modal.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileDetail {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role_id: i64,
    #[serde(default)]
    pub business_id: Option<i64>,
    pub is_active: bool,
}

// --- Envelopes & aggregates ---

/// Paginated
///
/// The envelope returned by every list fetch: one page of rows plus the total count
/// of the full filtered set (used to build the page-number links).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub count: i64,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self { data: Vec::new(), count: 0 }
    }
}

/// DashboardStats: the aggregate counters behind /superadmin/dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    pub companies_count: i64,
    pub businesses_count: i64,
    pub businesses_pending_count: i64,
    pub users_count: i64,
    pub admins_count: i64,
    pub sellers_count: i64,
    pub providers_count: i64,
}

// --- Write payloads (input schemas handed to the collaborator) ---

/// Insert/update payload for a company row.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyInput {
    pub name: String,
    pub cif: String,
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Insert/update payload for a business row (style travels separately).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BusinessInput {
    pub name: String,
    pub company_id: i64,
    pub status: BusinessStatus,
}

/// Upsert payload for `business_styles`, keyed on `business_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StyleInput {
    pub business_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_base64: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
}

/// Insert payload for a profile row (id comes from the auth collaborator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub id: Uuid,
    pub full_name: String,
    pub role_id: i64,
    pub business_id: Option<i64>,
    pub is_active: bool,
}

/// Update payload for a profile row (everything but the immutable id/email).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilePatch {
    pub full_name: String,
    pub role_id: i64,
    pub business_id: Option<i64>,
    pub is_active: bool,
}

/// Insert/update payload for a provider row.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_b64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
