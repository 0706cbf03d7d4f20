use super::message_alert;
use crate::models::Profile;
use crate::pages::AdminUsersPage;
use crate::util::escape_html;

/// The admin landing page renders from the resolved profile alone; no fetch happens
/// behind it.
pub fn dashboard_page(profile: &Profile) -> String {
    let business = match &profile.business {
        Some(business) => format!(
            r#"<p class="lead">Gestionas el negocio <strong>{}</strong>.</p>
<a href="/admin/users" class="btn btn-primary">Gestionar mi equipo</a>"#,
            escape_html(&business.name)
        ),
        None => {
            r#"<div class="alert alert-warning">No estás asignado a ningún negocio.</div>"#.to_string()
        }
    };
    format!(
        r#"<p>Bienvenido, {name}.</p>
{business}"#,
        name = escape_html(&profile.full_name),
    )
}

pub fn users_page(data: &AdminUsersPage, message: Option<&str>) -> String {
    let AdminUsersPage::Team { team, roles } = data else {
        return format!(
            r#"{}<div class="alert alert-warning">No estás asignado a ningún negocio.</div>"#,
            message_alert(message)
        );
    };

    let role_options: String = roles
        .iter()
        .map(|r| format!(r#"<option value="{}">{}</option>"#, r.id, escape_html(r.name.as_str())))
        .collect();

    let user_rows: String = team
        .iter()
        .map(|u| {
            let (state_color, state) = if u.is_active { ("success", "Activo") } else { ("danger", "Inactivo") };
            format!(
                r#"<tr>
  <td>{name}</td>
  <td>{email}</td>
  <td><span class="badge bg-primary">{role}</span></td>
  <td><span class="badge bg-{state_color}">{state}</span></td>
</tr>"#,
                name = escape_html(&u.full_name),
                email = escape_html(&u.email),
                role = escape_html(&u.role_name),
            )
        })
        .collect();
    let user_rows = if user_rows.is_empty() {
        r#"<tr><td colspan="4" class="text-center text-muted">No has creado ningún usuario para tu equipo.</td></tr>"#.to_string()
    } else {
        user_rows
    };

    format!(
        r#"{alert}
<div class="row">
  <div class="col-lg-4">
    <div class="card shadow-sm mb-4">
      <div class="card-header"><h5 class="mb-0">Crear Nuevo Usuario de Equipo</h5></div>
      <div class="card-body">
        <form method="POST" action="/admin/users?action=create_user">
          <div class="mb-3">
            <label for="role_id" class="form-label">Rol del Usuario</label>
            <select id="role_id" name="role_id" class="form-select" required>
              <option value="">Selecciona un rol...</option>
              {role_options}
            </select>
          </div>
          <div class="mb-3">
            <label for="full_name" class="form-label">Nombre Completo</label>
            <input type="text" id="full_name" name="full_name" class="form-control" required>
          </div>
          <div class="mb-3">
            <label for="email" class="form-label">Email (Login)</label>
            <input type="email" id="email" name="email" class="form-control" required>
          </div>
          <div class="mb-3">
            <label for="password" class="form-label">Contraseña Temporal</label>
            <input type="password" id="password" name="password" class="form-control" required>
          </div>
          <button type="submit" class="btn btn-primary w-100">Crear Usuario</button>
        </form>
      </div>
    </div>
  </div>
  <div class="col-lg-8">
    <div class="card shadow-sm">
      <div class="card-header"><h5 class="mb-0">Mi Equipo</h5></div>
      <div class="card-body">
        <div class="table-responsive">
          <table class="table table-striped table-hover">
            <thead><tr><th>Nombre Completo</th><th>Email</th><th>Rol</th><th>Estado</th></tr></thead>
            <tbody>{user_rows}</tbody>
          </table>
        </div>
      </div>
    </div>
  </div>
</div>"#,
        alert = message_alert(message),
    )
}
