use crate::util::escape_html;

/// The sign-in form, with the optional inline error slot (collaborator rejection or
/// the gate's "must sign in" prompt).
pub fn login_page(error: Option<&str>) -> String {
    let error_html = match error {
        Some(error) => format!(
            r#"<div class="alert alert-danger" role="alert">{}</div>"#,
            escape_html(error)
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="row justify-content-center">
  <div class="col-md-6 col-lg-4">
    <div class="card shadow-sm">
      <div class="card-body p-4">
        <h2 class="card-title text-center mb-4">Iniciar Sesión</h2>
        {error_html}
        <form method="POST" action="/login">
          <div class="mb-3">
            <label for="email" class="form-label">Correo Electrónico:</label>
            <input type="email" class="form-control" id="email" name="email" required>
          </div>
          <div class="mb-3">
            <label for="password" class="form-label">Contraseña:</label>
            <input type="password" class="form-control" id="password" name="password" required>
          </div>
          <button type="submit" class="btn btn-primary w-100">Acceder</button>
        </form>
      </div>
    </div>
  </div>
</div>"#
    )
}
