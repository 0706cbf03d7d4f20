//! String-building HTML render layer. Each page function returns the inner content;
//! `layout` wraps it with the chrome (navbar, tenant branding, footer). Every dynamic
//! value passes through `escape_html` at the point of interpolation.

pub mod admin;
pub mod login;
pub mod staff;
pub mod superadmin;

use crate::models::{BusinessStyle, Profile, RoleName};
use crate::util::{encode_uri_component, escape_html};

const BOOTSTRAP_CSS_CDN: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS_CDN: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
const DEFAULT_APP_NAME: &str = "Canal Portal";

fn nav_links(role: RoleName) -> &'static str {
    match role {
        RoleName::Superadmin => {
            r#"<li class="nav-item"><a class="nav-link" href="/superadmin/dashboard">Dashboard</a></li>
               <li class="nav-item"><a class="nav-link" href="/superadmin/businesses">Negocios</a></li>
               <li class="nav-item"><a class="nav-link" href="/superadmin/users">Usuarios</a></li>
               <li class="nav-item"><a class="nav-link" href="/superadmin/providers">Proveedores</a></li>"#
        }
        RoleName::Admin => {
            r#"<li class="nav-item"><a class="nav-link" href="/admin/dashboard">Dashboard</a></li>
               <li class="nav-item"><a class="nav-link" href="/admin/users">Equipo</a></li>"#
        }
        RoleName::Vendedor => {
            r#"<li class="nav-item"><a class="nav-link" href="/vendedor/proposals">Mis Propuestas</a></li>"#
        }
        RoleName::Tramitador => {
            r#"<li class="nav-item"><a class="nav-link" href="/tramitador/contracts">Contratos</a></li>"#
        }
    }
}

/// Tenant branding injected as CSS custom properties when the caller's business
/// carries a style row.
fn custom_styles(style: &BusinessStyle) -> String {
    let background = style.background_color.as_deref().unwrap_or("#f8f9fa");
    format!(
        r#":root {{
            --bs-primary: {primary};
            --bs-secondary: {secondary};
        }}
        body {{ background-color: {background} !important; }}
        .app-navbar {{ background-color: {secondary} !important; }}
        .btn-primary {{ background-color: {primary}; border-color: {primary}; }}
        .page-title {{ color: {primary}; font-weight: 600; }}"#,
        primary = escape_html(&style.primary_color),
        secondary = escape_html(&style.secondary_color),
        background = escape_html(background),
    )
}

/// Wraps page content with the full document: head, navbar with role-specific links,
/// tenant branding, and footer.
pub fn layout(title: &str, content: &str, profile: Option<&Profile>) -> String {
    let business = profile.and_then(|p| p.business.as_ref());
    let style = business.and_then(|b| b.style.as_ref());

    let app_name = business.map(|b| b.name.as_str()).unwrap_or(DEFAULT_APP_NAME);
    // Tenant logos travel as base64 through the style row; without one the brand
    // falls back to plain text.
    let brand = match style.and_then(|s| s.logo_base64.as_deref()) {
        Some(logo) => format!(
            r#"<img src="{logo}" alt="Logo {}" class="app-logo">"#,
            escape_html(app_name)
        ),
        None => escape_html(app_name),
    };
    let styles = style.map(custom_styles).unwrap_or_default();

    let links = profile.map(|p| nav_links(p.role_name)).unwrap_or("");
    let user_nav = match profile {
        Some(p) => format!(
            r#"<span class="navbar-text me-3 text-white">{} ({})</span>
               <form action="/logout" method="POST" class="d-inline">
                   <button class="btn btn-outline-light btn-sm" type="submit">Salir</button>
               </form>"#,
            escape_html(&p.full_name),
            escape_html(p.role_name.as_str()),
        ),
        None => r#"<a class="btn btn-outline-light btn-sm" href="/login">Entrar</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title} | {app_name}</title>
  <link href="{BOOTSTRAP_CSS_CDN}" rel="stylesheet">
  <style>
    body {{ padding-top: 80px; background-color: #f8f9fa; display: flex; flex-direction: column; min-height: 100vh; }}
    main {{ flex: 1; }}
    .app-logo {{ height: 45px; max-width: 150px; object-fit: contain; }}
    .app-navbar {{ background-color: #212529; }}
    .footer {{ background-color: #212529; }}
    {styles}
  </style>
</head>
<body>
  <nav class="navbar navbar-expand-lg navbar-dark fixed-top app-navbar">
    <div class="container-fluid">
      <a class="navbar-brand" href="/">{brand}</a>
      <div class="collapse navbar-collapse show">
        <ul class="navbar-nav me-auto mb-2 mb-lg-0">{links}</ul>
        <div class="d-flex align-items-center">{user_nav}</div>
      </div>
    </div>
  </nav>
  <main class="container my-4">
    <h1 class="h3 mb-4 page-title">{title}</h1>
    {content}
  </main>
  <footer class="footer text-white text-center py-3 mt-auto">
    <small>&copy; {app_name}</small>
  </footer>
  <script src="{BOOTSTRAP_JS_CDN}"></script>
</body>
</html>"#,
        title = escape_html(title),
        app_name = escape_html(app_name),
    )
}

/// The single dismissible alert slot every page renders when a redirect carried a
/// `message=` parameter.
pub fn message_alert(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div class="alert alert-info alert-dismissible fade show" role="alert">{}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// Page-number links. Every link re-carries the search term (and any extra fixed
/// parameters) so paging never drops the active filters. Hidden entirely when the set
/// fits on one page.
pub fn pagination(current: i64, total: i64, base_params: &[(&str, &str)], search: &str) -> String {
    let pages = crate::pages::page_count(total);
    if pages <= 1 {
        return String::new();
    }
    let mut fixed = String::new();
    for (key, value) in base_params {
        fixed.push_str(&format!("{key}={}&", encode_uri_component(value)));
    }
    if !search.is_empty() {
        fixed.push_str(&format!("search={}&", encode_uri_component(search)));
    }
    let mut html = String::from(
        r#"<nav aria-label="Page navigation"><ul class="pagination pagination-sm justify-content-end">"#,
    );
    for i in 1..=pages {
        let active = if i == current { " active" } else { "" };
        html.push_str(&format!(
            r#"<li class="page-item{active}"><a class="page-link" href="?{fixed}page={i}">{i}</a></li>"#
        ));
    }
    html.push_str("</ul></nav>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_hidden_for_single_page() {
        assert_eq!(pagination(1, 10, &[], ""), "");
        assert_eq!(pagination(1, 0, &[], ""), "");
    }

    #[test]
    fn pagination_preserves_filters() {
        let html = pagination(2, 25, &[("entity", "companies")], "acme s.a.");
        assert!(html.contains("href=\"?entity=companies&search=acme%20s.a.&page=1\""));
        assert!(html.contains("href=\"?entity=companies&search=acme%20s.a.&page=3\""));
        assert!(html.contains(r#"<li class="page-item active"><a class="page-link" href="?entity=companies&search=acme%20s.a.&page=2">2</a></li>"#));
    }

    #[test]
    fn message_alert_escapes_html() {
        let html = message_alert(Some("<script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn layout_falls_back_to_default_branding() {
        let html = layout("Login", "<p>x</p>", None);
        assert!(html.contains("Canal Portal"));
        assert!(html.contains("/login"));
    }
}
