use crate::error::PortalError;
use crate::models::{
    Business, BusinessRef, Company, CompanyRef, DashboardStats, Paginated, Provider, Role,
    RoleName, UserRow,
};
use crate::repository::{PAGE_SIZE, RepositoryState};
use serde::{Deserialize, Deserializer};

/// Filter dropdowns submit `company=` (empty) for "all", and hand-edited URLs can
/// carry anything. Empty or unparseable values read as an absent filter, never as a
/// rejection that 400s the whole page.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(s.parse::<T>().ok()),
    }
}

/// Query-string state shared by every listing page. Unparseable values fall back to
/// defaults rather than erroring; a hand-edited URL is not a failure mode.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub company: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub edit_business_id: Option<i64>,
    /// Kept as the raw string: a malformed id is the handler's not-found case, not a
    /// deserialization rejection.
    #[serde(default)]
    pub edit_user_id: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    /// Tab selector for /superadmin/businesses. Anything but "companies" means the
    /// default businesses tab.
    pub fn entity(&self) -> &str {
        match self.entity.as_deref() {
            Some("companies") => "companies",
            _ => "businesses",
        }
    }

    /// Raw edit-modal id for the users page; empty means no short-circuit.
    pub fn edit_user_id(&self) -> Option<&str> {
        self.edit_user_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Role filter, honored only when the value names a real role.
    pub fn role_filter(&self) -> Option<&str> {
        self.role
            .as_deref()
            .filter(|r| RoleName::parse(r).is_some())
    }
}

/// Number of pagination links for a filtered total. An empty set still renders one
/// (empty) page.
pub fn page_count(total: i64) -> i64 {
    ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

// --- Per-page view models ---

/// Everything /superadmin/businesses renders: both tabs' pages plus the dropdown
/// source for the create/edit forms.
pub struct BusinessesPage {
    pub entity: &'static str,
    pub page: i64,
    pub search: String,
    pub businesses: Paginated<Business>,
    pub companies: Paginated<Company>,
    pub all_companies: Vec<CompanyRef>,
}

pub struct UsersPage {
    pub page: i64,
    pub search: String,
    pub role_filter: Option<String>,
    pub company_filter: Option<i64>,
    pub users: Paginated<UserRow>,
    pub roles: Vec<Role>,
    pub companies: Vec<CompanyRef>,
    pub businesses: Vec<BusinessRef>,
}

pub struct ProvidersPage {
    pub page: i64,
    pub search: String,
    pub providers: Paginated<Provider>,
}

/// The admin team page has two shapes: an unassigned admin sees a notice and nothing
/// is fetched; an assigned one sees the scoped team plus the assignable roles.
pub enum AdminUsersPage {
    Unassigned,
    Team { team: Vec<UserRow>, roles: Vec<Role> },
}

// --- Assembly ---

pub async fn superadmin_dashboard(repo: &RepositoryState) -> Result<DashboardStats, PortalError> {
    repo.get_stats().await
}

/// Three independent fetches, issued concurrently. Both tabs are assembled on every
/// request so switching tabs client-side never shows a stale shell.
pub async fn superadmin_businesses(
    repo: &RepositoryState,
    query: &ListQuery,
) -> Result<BusinessesPage, PortalError> {
    let (businesses, companies, all_companies) = tokio::try_join!(
        repo.list_businesses(query.page(), query.search()),
        repo.list_companies(query.page(), query.search()),
        repo.list_all_companies(),
    )?;
    Ok(BusinessesPage {
        entity: if query.entity() == "companies" { "companies" } else { "businesses" },
        page: query.page(),
        search: query.search().to_string(),
        businesses,
        companies,
        all_companies,
    })
}

pub async fn superadmin_users(
    repo: &RepositoryState,
    query: &ListQuery,
) -> Result<UsersPage, PortalError> {
    let (users, roles, companies, businesses) = tokio::try_join!(
        repo.list_users(query.page(), query.search(), query.role_filter(), query.company),
        repo.list_roles(),
        repo.list_all_companies(),
        repo.list_all_businesses(),
    )?;
    Ok(UsersPage {
        page: query.page(),
        search: query.search().to_string(),
        role_filter: query.role_filter().map(str::to_string),
        company_filter: query.company,
        users,
        roles,
        companies,
        businesses,
    })
}

pub async fn superadmin_providers(
    repo: &RepositoryState,
    query: &ListQuery,
) -> Result<ProvidersPage, PortalError> {
    let providers = repo.list_providers(query.page(), query.search()).await?;
    Ok(ProvidersPage {
        page: query.page(),
        search: query.search().to_string(),
        providers,
    })
}

pub async fn admin_users(
    repo: &RepositoryState,
    business_id: Option<i64>,
) -> Result<AdminUsersPage, PortalError> {
    let Some(business_id) = business_id else {
        return Ok(AdminUsersPage::Unassigned);
    };
    let (team, roles) = tokio::try_join!(
        repo.list_users_by_business(business_id),
        repo.list_roles(),
    )?;
    // Only team roles are assignable from this page.
    let roles = roles
        .into_iter()
        .filter(|r| matches!(r.name, RoleName::Vendedor | RoleName::Tramitador))
        .collect();
    Ok(AdminUsersPage::Team { team, roles })
}
