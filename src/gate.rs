use crate::models::{Profile, RoleName};
use axum::response::{IntoResponse, Redirect, Response};

/// PageRoute
///
/// The closed set of protected pages. Every variant carries its exact path, its page
/// title and its allowed-role set, so an unhandled (path, role) combination is a
/// compile-time hole, not a silent fall-through. Public paths (/login, /logout, /)
/// never consult this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute {
    SuperadminDashboard,
    SuperadminBusinesses,
    SuperadminUsers,
    SuperadminProviders,
    AdminDashboard,
    AdminUsers,
    VendedorProposals,
    TramitadorContracts,
}

impl PageRoute {
    pub const ALL: [PageRoute; 8] = [
        PageRoute::SuperadminDashboard,
        PageRoute::SuperadminBusinesses,
        PageRoute::SuperadminUsers,
        PageRoute::SuperadminProviders,
        PageRoute::AdminDashboard,
        PageRoute::AdminUsers,
        PageRoute::VendedorProposals,
        PageRoute::TramitadorContracts,
    ];

    /// Exact request path. No patterns, no path parameters.
    pub fn path(&self) -> &'static str {
        match self {
            PageRoute::SuperadminDashboard => "/superadmin/dashboard",
            PageRoute::SuperadminBusinesses => "/superadmin/businesses",
            PageRoute::SuperadminUsers => "/superadmin/users",
            PageRoute::SuperadminProviders => "/superadmin/providers",
            PageRoute::AdminDashboard => "/admin/dashboard",
            PageRoute::AdminUsers => "/admin/users",
            PageRoute::VendedorProposals => "/vendedor/proposals",
            PageRoute::TramitadorContracts => "/tramitador/contracts",
        }
    }

    /// Rendered into the layout's <title> and header.
    pub fn title(&self) -> &'static str {
        match self {
            PageRoute::SuperadminDashboard => "Superadmin Dashboard",
            PageRoute::SuperadminBusinesses => "Gestión de Negocios",
            PageRoute::SuperadminUsers => "Gestión de Usuarios",
            PageRoute::SuperadminProviders => "Gestión de Proveedores",
            PageRoute::AdminDashboard => "Admin Dashboard",
            PageRoute::AdminUsers => "Gestión de Equipo",
            PageRoute::VendedorProposals => "Mis Propuestas",
            PageRoute::TramitadorContracts => "Gestión de Contratos",
        }
    }

    pub fn allowed_roles(&self) -> &'static [RoleName] {
        match self {
            PageRoute::SuperadminDashboard
            | PageRoute::SuperadminBusinesses
            | PageRoute::SuperadminUsers
            | PageRoute::SuperadminProviders => &[RoleName::Superadmin],
            PageRoute::AdminDashboard | PageRoute::AdminUsers => &[RoleName::Admin],
            PageRoute::VendedorProposals => &[RoleName::Vendedor],
            PageRoute::TramitadorContracts => &[RoleName::Tramitador],
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.path() == path)
    }
}

/// Fixed role → landing page mapping used for `/`, post-login redirects, and every
/// authorization denial.
pub fn dashboard_for(role: RoleName) -> &'static str {
    match role {
        RoleName::Superadmin => "/superadmin/dashboard",
        RoleName::Admin => "/admin/dashboard",
        RoleName::Vendedor => "/vendedor/proposals",
        RoleName::Tramitador => "/tramitador/contracts",
    }
}

/// Deny
///
/// The gate's negative verdict. Always a 303 redirect; an unauthorized request never
/// sees a 403 body, only its own dashboard (or the login page when anonymous).
#[derive(Debug, PartialEq, Eq)]
pub struct Deny {
    pub location: String,
}

impl IntoResponse for Deny {
    fn into_response(self) -> Response {
        // Redirect::to emits 303 See Other, matching the original's form-post flow.
        Redirect::to(&self.location).into_response()
    }
}

/// authorize
///
/// The authorization gate, purely role-based. Anonymous callers are sent to
/// the login page with an inline prompt; authenticated callers outside the route's
/// allowed-role set are bounced to their own dashboard.
pub fn authorize(route: PageRoute, profile: Option<Profile>) -> Result<Profile, Deny> {
    let Some(profile) = profile else {
        return Err(Deny {
            location: "/login?error=Debes+iniciar+sesi%C3%B3n.".to_string(),
        });
    };
    if !route.allowed_roles().contains(&profile.role_name) {
        return Err(Deny {
            location: dashboard_for(profile.role_name).to_string(),
        });
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use uuid::Uuid;

    fn profile(role: RoleName) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            full_name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role_id: 1,
            role_name: role,
            business_id: None,
            is_active: true,
            business: None,
        }
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        let deny = authorize(PageRoute::SuperadminDashboard, None).unwrap_err();
        assert!(deny.location.starts_with("/login?error="));
    }

    #[test]
    fn role_outside_the_set_is_sent_home() {
        let deny =
            authorize(PageRoute::SuperadminDashboard, Some(profile(RoleName::Vendedor)))
                .unwrap_err();
        assert_eq!(deny.location, "/vendedor/proposals");
    }

    #[test]
    fn access_is_granted_iff_role_is_allowed() {
        for route in PageRoute::ALL {
            for role in [
                RoleName::Superadmin,
                RoleName::Admin,
                RoleName::Vendedor,
                RoleName::Tramitador,
            ] {
                let verdict = authorize(route, Some(profile(role)));
                assert_eq!(verdict.is_ok(), route.allowed_roles().contains(&role));
            }
        }
    }

    #[test]
    fn paths_are_unique_and_resolvable() {
        for route in PageRoute::ALL {
            assert_eq!(PageRoute::from_path(route.path()), Some(route));
        }
        assert_eq!(PageRoute::from_path("/superadmin/unknown"), None);
    }
}
