use super::{message_alert, pagination};
use crate::models::{Business, Company, DashboardStats};
use crate::pages::{BusinessesPage, ProvidersPage, UsersPage};
use crate::util::escape_html;
use chrono::{DateTime, Utc};

fn short_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn stat_card(title: &str, value: i64, color: &str, description: &str, link: &str) -> String {
    format!(
        r#"<div class="col-xl-3 col-md-6 mb-4">
  <div class="card h-100 py-2 border-start border-4 border-{color}">
    <div class="card-body">
      <div class="text-xs fw-bold text-{color} text-uppercase mb-1">{title}</div>
      <div class="h5 mb-0 fw-bold">{value}</div>
      <div class="text-muted small mt-1">{description}</div>
      <a href="{link}" class="stretched-link"></a>
    </div>
  </div>
</div>"#,
        title = escape_html(title),
        description = escape_html(description),
    )
}

pub fn dashboard_page(stats: &DashboardStats) -> String {
    format!(
        r#"<p class="lead mb-4">Vista general del estado de la plataforma.</p>
<div class="row">
{channels}
{users}
{companies}
{providers}
</div>"#,
        channels = stat_card(
            "Canales (Negocios)",
            stats.businesses_count,
            "primary",
            &format!("{} pend. de verificación", stats.businesses_pending_count),
            "/superadmin/businesses",
        ),
        users = stat_card(
            "Usuarios Totales",
            stats.users_count,
            "success",
            &format!("{} Admins, {} Vendedores", stats.admins_count, stats.sellers_count),
            "/superadmin/users",
        ),
        companies = stat_card(
            "Compañías",
            stats.companies_count,
            "info",
            "Entidades fiscales registradas",
            "/superadmin/businesses?entity=companies",
        ),
        providers = stat_card(
            "Proveedores",
            stats.providers_count,
            "warning",
            "Proveedores energéticos dados de alta",
            "/superadmin/providers",
        ),
    )
}

// --- /superadmin/businesses ---

fn business_row(b: &Business) -> String {
    let company_badge = match &b.company {
        Some(c) => format!(
            r#"<span class="badge bg-info text-white">{}</span>"#,
            escape_html(&c.name)
        ),
        None => "N/A".to_string(),
    };
    format!(
        r#"<tr>
  <td><strong>{name}</strong></td>
  <td>{company_badge}</td>
  <td><span class="badge bg-secondary text-capitalize">{status}</span></td>
  <td><small class="text-muted">{created}</small></td>
  <td>
    <button type="button" class="btn btn-sm btn-warning edit-business-btn" data-id="{id}">Editar</button>
    <form action="/superadmin/businesses?action=delete_business" method="POST" class="d-inline" onsubmit="return confirm('¿Estás seguro de que quieres eliminar este negocio?')">
      <input type="hidden" name="id" value="{id}">
      <button type="submit" class="btn btn-sm btn-danger">Eliminar</button>
    </form>
  </td>
</tr>"#,
        name = escape_html(&b.name),
        status = escape_html(&b.status.as_str().replace('_', " ")),
        created = short_date(b.created_at.as_ref()),
        id = b.id,
    )
}

fn company_row(c: &Company) -> String {
    let businesses = if c.businesses.is_empty() {
        r#"<span class="text-muted fst-italic">Sin negocios</span>"#.to_string()
    } else {
        c.businesses
            .iter()
            .map(|b| {
                format!(
                    r#"<span class="badge bg-primary text-white me-1 mb-1">{}</span>"#,
                    escape_html(b.name.as_deref().unwrap_or("Negocio sin nombre"))
                )
            })
            .collect::<Vec<_>>()
            .join("")
    };
    let (approval_badge, approval_label) = if c.is_approved {
        (r#"<span class="badge bg-success">Aprobada</span>"#, "Retirar aprobación")
    } else {
        (r#"<span class="badge bg-warning">Pendiente</span>"#, "Aprobar")
    };
    format!(
        r#"<tr>
  <td><strong>{name}</strong></td>
  <td>{cif}</td>
  <td>
    {approval_badge}
    <form action="/superadmin/businesses?action=toggle_company_approval" method="POST" class="d-inline ms-1">
      <input type="hidden" name="id" value="{id}">
      <button type="submit" class="btn btn-sm btn-outline-secondary">{approval_label}</button>
    </form>
  </td>
  <td><div class="d-flex align-items-center flex-wrap">{businesses}</div></td>
  <td><small class="text-muted">{created}</small></td>
  <td>
    <button type="button" class="btn btn-sm btn-warning edit-company-btn" data-id="{id}" data-name="{name}" data-cif="{cif}" data-address="{address}">Editar</button>
    <form action="/superadmin/businesses?action=delete_company" method="POST" class="d-inline" onsubmit="return confirm('¿Estás seguro de que quieres eliminar esta compañía? Se borrarán todos los negocios asociados.')">
      <input type="hidden" name="id" value="{id}">
      <button type="submit" class="btn btn-sm btn-danger">Eliminar</button>
    </form>
  </td>
</tr>"#,
        name = escape_html(&c.name),
        cif = escape_html(&c.cif),
        address = escape_html(c.address.as_deref().unwrap_or("")),
        created = short_date(c.created_at.as_ref()),
        id = c.id,
    )
}

fn status_options() -> &'static str {
    r#"<option value="pending_verification">Pendiente de verificación</option>
<option value="active">Activo</option>
<option value="suspended">Suspendido</option>
<option value="archived">Archivado</option>"#
}

pub fn businesses_page(data: &BusinessesPage, message: Option<&str>) -> String {
    let company_options: String = data
        .all_companies
        .iter()
        .map(|c| format!(r#"<option value="{}">{}</option>"#, c.id, escape_html(&c.name)))
        .collect();

    let business_rows: String = data.businesses.data.iter().map(business_row).collect();
    let company_rows: String = data.companies.data.iter().map(company_row).collect();

    let (biz_active, com_active) = if data.entity == "companies" { ("", " active") } else { (" active", "") };
    let (pag_entity, pag_total) = if data.entity == "companies" {
        ("companies", data.companies.count)
    } else {
        ("businesses", data.businesses.count)
    };

    // The color inputs carry `"#` in their default values, so this literal needs
    // the wider raw-string delimiter.
    format!(
        r##"{alert}
<ul class="nav nav-tabs mb-4" role="tablist">
  <li class="nav-item"><a class="nav-link{biz_active}" href="/superadmin/businesses?entity=businesses">Negocios (Canales)</a></li>
  <li class="nav-item"><a class="nav-link{com_active}" href="/superadmin/businesses?entity=companies">Compañías (Sociedades)</a></li>
</ul>

<form method="GET" action="/superadmin/businesses" class="row g-2 mb-3">
  <input type="hidden" name="entity" value="{entity}">
  <div class="col-auto"><input type="search" name="search" class="form-control form-control-sm" placeholder="Buscar..." value="{search}"></div>
  <div class="col-auto"><button type="submit" class="btn btn-sm btn-outline-primary">Buscar</button></div>
</form>

<div class="tab-content">
  <div class="tab-pane{biz_show}">
    <div class="card shadow-sm mb-4">
      <div class="card-header"><h5 class="mb-0">Crear Nuevo Negocio</h5></div>
      <div class="card-body">
        <form method="POST" action="/superadmin/businesses?action=create_business" class="row g-3">
          <div class="col-md-4"><label class="form-label">Nombre</label><input type="text" name="name" class="form-control" required></div>
          <div class="col-md-4"><label class="form-label">Compañía</label>
            <select name="company_id" class="form-select" required><option value="">Selecciona...</option>{company_options}</select>
          </div>
          <div class="col-md-4"><label class="form-label">Estado</label>
            <select name="status" class="form-select" required>{status_options}</select>
          </div>
          <div class="col-md-4"><label class="form-label">Color primario</label><input type="color" name="primary_color" class="form-control form-control-color" value="#399f82"></div>
          <div class="col-md-4"><label class="form-label">Color secundario</label><input type="color" name="secondary_color" class="form-control form-control-color" value="#4a4548"></div>
          <div class="col-md-4"><label class="form-label">Logo (base64)</label><input type="text" name="logo_base64" class="form-control"></div>
          <div class="col-12"><button type="submit" class="btn btn-primary">Crear Negocio</button></div>
        </form>
      </div>
    </div>
    <div class="table-responsive">
      <table class="table table-striped table-hover">
        <thead><tr><th>Nombre</th><th>Compañía</th><th>Estado</th><th>Creado</th><th>Acciones</th></tr></thead>
        <tbody>{business_rows}</tbody>
      </table>
    </div>
  </div>

  <div class="tab-pane{com_show}">
    <div class="card shadow-sm mb-4">
      <div class="card-header"><h5 class="mb-0">Crear Nueva Compañía</h5></div>
      <div class="card-body">
        <form method="POST" action="/superadmin/businesses?action=create_company" class="row g-3">
          <div class="col-md-4"><label class="form-label">Nombre</label><input type="text" name="name" class="form-control" required></div>
          <div class="col-md-4"><label class="form-label">CIF</label><input type="text" name="cif" class="form-control" required></div>
          <div class="col-md-4"><label class="form-label">Dirección</label><input type="text" name="address" class="form-control" required></div>
          <div class="col-12"><label class="form-label">Descripción</label><textarea name="description" class="form-control" rows="2"></textarea></div>
          <div class="col-12"><button type="submit" class="btn btn-primary">Crear Compañía</button></div>
        </form>
      </div>
    </div>
    <div class="table-responsive">
      <table class="table table-striped table-hover">
        <thead><tr><th>Nombre</th><th>CIF</th><th>Aprobación</th><th>Negocios Asociados</th><th>Creada</th><th>Acciones</th></tr></thead>
        <tbody>{company_rows}</tbody>
      </table>
    </div>
  </div>
</div>
{pagination}"##,
        alert = message_alert(message),
        entity = data.entity,
        search = escape_html(&data.search),
        biz_show = if data.entity == "companies" { " d-none" } else { "" },
        com_show = if data.entity == "companies" { "" } else { " d-none" },
        status_options = status_options(),
        pagination = pagination(data.page, pag_total, &[("entity", pag_entity)], &data.search),
    )
}

// --- /superadmin/users ---

pub fn users_page(data: &UsersPage, message: Option<&str>) -> String {
    let role_options: String = data
        .roles
        .iter()
        .map(|r| {
            let selected = if data.role_filter.as_deref() == Some(r.name.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(r.name.as_str()),
                escape_html(r.name.as_str())
            )
        })
        .collect();
    let role_id_options: String = data
        .roles
        .iter()
        .map(|r| format!(r#"<option value="{}">{}</option>"#, r.id, escape_html(r.name.as_str())))
        .collect();
    let company_options: String = data
        .companies
        .iter()
        .map(|c| {
            let selected = if data.company_filter == Some(c.id) { " selected" } else { "" };
            format!(r#"<option value="{}"{selected}>{}</option>"#, c.id, escape_html(&c.name))
        })
        .collect();
    let business_options: String = data
        .businesses
        .iter()
        .map(|b| {
            format!(
                r#"<option value="{}">{}</option>"#,
                b.id,
                escape_html(b.name.as_deref().unwrap_or("Negocio sin nombre"))
            )
        })
        .collect();

    let user_rows: String = data
        .users
        .data
        .iter()
        .map(|u| {
            let (state_color, state) = if u.is_active { ("success", "Activo") } else { ("danger", "Inactivo") };
            format!(
                r#"<tr>
  <td>{name}</td>
  <td>{email}</td>
  <td><span class="badge bg-primary">{role}</span></td>
  <td>{business}</td>
  <td>{company}</td>
  <td><span class="badge bg-{state_color}">{state}</span></td>
  <td>
    <button type="button" class="btn btn-sm btn-warning edit-user-btn" data-id="{id}">Editar</button>
    <form action="/superadmin/users?action=delete_user" method="POST" class="d-inline" onsubmit="return confirm('¿Eliminar este usuario?')">
      <input type="hidden" name="id" value="{id}">
      <button type="submit" class="btn btn-sm btn-danger">Eliminar</button>
    </form>
  </td>
</tr>"#,
                name = escape_html(&u.full_name),
                email = escape_html(&u.email),
                role = escape_html(&u.role_name),
                business = escape_html(u.business_name.as_deref().unwrap_or("N/A")),
                company = escape_html(u.company_name.as_deref().unwrap_or("N/A")),
                id = u.id,
            )
        })
        .collect();

    let mut filter_params: Vec<(&str, &str)> = Vec::new();
    if let Some(role) = data.role_filter.as_deref() {
        filter_params.push(("role", role));
    }
    let company_param;
    if let Some(company) = data.company_filter {
        company_param = company.to_string();
        filter_params.push(("company", &company_param));
    }

    format!(
        r#"{alert}
<form method="GET" action="/superadmin/users" class="row g-2 mb-3">
  <div class="col-auto"><input type="search" name="search" class="form-control form-control-sm" placeholder="Nombre o email..." value="{search}"></div>
  <div class="col-auto">
    <select name="role" class="form-select form-select-sm"><option value="">Todos los roles</option>{role_options}</select>
  </div>
  <div class="col-auto">
    <select name="company" class="form-select form-select-sm"><option value="">Todas las compañías</option>{company_options}</select>
  </div>
  <div class="col-auto"><button type="submit" class="btn btn-sm btn-outline-primary">Filtrar</button></div>
</form>

<div class="card shadow-sm mb-4">
  <div class="card-header"><h5 class="mb-0">Crear Nuevo Usuario</h5></div>
  <div class="card-body">
    <form method="POST" action="/superadmin/users?action=create_user" class="row g-3">
      <div class="col-md-3"><label class="form-label">Nombre Completo</label><input type="text" name="full_name" class="form-control" required></div>
      <div class="col-md-3"><label class="form-label">Email (Login)</label><input type="email" name="email" class="form-control" required></div>
      <div class="col-md-3"><label class="form-label">Contraseña Temporal</label><input type="password" name="password" class="form-control" required></div>
      <div class="col-md-3"><label class="form-label">Rol</label>
        <select name="role_id" class="form-select" required><option value="">Selecciona...</option>{role_id_options}</select>
      </div>
      <div class="col-md-3"><label class="form-label">Negocio</label>
        <select name="business_id" class="form-select"><option value="">Sin negocio (solo superadmin)</option>{business_options}</select>
      </div>
      <div class="col-12"><button type="submit" class="btn btn-primary">Crear Usuario</button></div>
    </form>
  </div>
</div>

<div class="table-responsive">
  <table class="table table-striped table-hover">
    <thead><tr><th>Nombre Completo</th><th>Email</th><th>Rol</th><th>Negocio</th><th>Compañía</th><th>Estado</th><th>Acciones</th></tr></thead>
    <tbody>{user_rows}</tbody>
  </table>
</div>
{pagination}"#,
        alert = message_alert(message),
        search = escape_html(&data.search),
        pagination = pagination(data.page, data.users.count, &filter_params, &data.search),
    )
}

// --- /superadmin/providers ---

pub fn providers_page(data: &ProvidersPage, message: Option<&str>) -> String {
    let provider_rows: String = data
        .providers
        .data
        .iter()
        .map(|p| {
            format!(
                r#"<tr>
  <td><strong>{name}</strong></td>
  <td><small class="text-muted">{notes}</small></td>
  <td>
    <button type="button" class="btn btn-sm btn-warning edit-provider-btn" data-id="{id}" data-name="{name}">Editar</button>
    <form action="/superadmin/providers?action=delete_provider" method="POST" class="d-inline" onsubmit="return confirm('¿Eliminar este proveedor?')">
      <input type="hidden" name="id" value="{id}">
      <button type="submit" class="btn btn-sm btn-danger">Eliminar</button>
    </form>
  </td>
</tr>"#,
                name = escape_html(&p.name),
                notes = escape_html(p.notes.as_deref().unwrap_or("")),
                id = p.id,
            )
        })
        .collect();

    format!(
        r#"{alert}
<form method="GET" action="/superadmin/providers" class="row g-2 mb-3">
  <div class="col-auto"><input type="search" name="search" class="form-control form-control-sm" placeholder="Buscar proveedor..." value="{search}"></div>
  <div class="col-auto"><button type="submit" class="btn btn-sm btn-outline-primary">Buscar</button></div>
</form>

<div class="card shadow-sm mb-4">
  <div class="card-header"><h5 class="mb-0">Crear Nuevo Proveedor</h5></div>
  <div class="card-body">
    <form method="POST" action="/superadmin/providers?action=create_provider" class="row g-3">
      <div class="col-md-4"><label class="form-label">Nombre</label><input type="text" name="name" class="form-control" required></div>
      <div class="col-md-4"><label class="form-label">Logo (base64)</label><input type="text" name="logo_b64" class="form-control"></div>
      <div class="col-md-4"><label class="form-label">Notas</label><input type="text" name="notes" class="form-control"></div>
      <div class="col-12"><button type="submit" class="btn btn-primary">Crear Proveedor</button></div>
    </form>
  </div>
</div>

<div class="table-responsive">
  <table class="table table-striped table-hover">
    <thead><tr><th>Nombre</th><th>Notas</th><th>Acciones</th></tr></thead>
    <tbody>{provider_rows}</tbody>
  </table>
</div>
{pagination}"#,
        alert = message_alert(message),
        search = escape_html(&data.search),
        pagination = pagination(data.page, data.providers.count, &[], &data.search),
    )
}
