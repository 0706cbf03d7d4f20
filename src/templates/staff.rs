use crate::models::Profile;
use crate::util::escape_html;

/// Profile-driven staff views. No list state behind either page; they exist so every
/// role in the closed set has a landing page to be redirected to.
pub fn proposals_page(profile: &Profile) -> String {
    let business = profile
        .business
        .as_ref()
        .map(|b| b.name.as_str())
        .unwrap_or("tu negocio");
    format!(
        r#"<p class="lead">Hola, {name}.</p>
<p>Aquí aparecerán tus propuestas para <strong>{business}</strong>.</p>
<div class="alert alert-light border">Todavía no tienes propuestas.</div>"#,
        name = escape_html(&profile.full_name),
        business = escape_html(business),
    )
}

pub fn contracts_page(profile: &Profile) -> String {
    let business = profile
        .business
        .as_ref()
        .map(|b| b.name.as_str())
        .unwrap_or("tu negocio");
    format!(
        r#"<p class="lead">Hola, {name}.</p>
<p>Aquí aparecerán los contratos en tramitación de <strong>{business}</strong>.</p>
<div class="alert alert-light border">No hay contratos pendientes.</div>"#,
        name = escape_html(&profile.full_name),
        business = escape_html(business),
    )
}
