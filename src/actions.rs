use crate::AppState;
use crate::config::WriteConsistency;
use crate::error::PortalError;
use crate::gate::PageRoute;
use crate::models::{
    BusinessInput, BusinessStatus, CompanyInput, Profile, ProfileInput, ProfilePatch,
    ProviderInput, Role, RoleName, StyleInput,
};
use crate::util::encode_uri_component;
use std::collections::HashMap;
use uuid::Uuid;

/// FormFields
///
/// The raw form body, with one normalization rule: an empty string counts as an
/// absent field. Browsers submit optional inputs as empty strings ("leave blank to
/// keep the password"), and the declarative schemas below must treat those the same
/// as missing.
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn require(&self, name: &'static str) -> Result<&str, PortalError> {
        self.get(name).ok_or(PortalError::MissingField(name))
    }

    fn require_i64(&self, name: &'static str) -> Result<i64, PortalError> {
        self.require(name)?
            .parse()
            .map_err(|_| PortalError::Validation(format!("El campo '{name}' no es un número válido.")))
    }

    fn get_i64(&self, name: &str) -> Result<Option<i64>, PortalError> {
        match self.get(name) {
            None => Ok(None),
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| PortalError::Validation(format!("El campo '{name}' no es un número válido."))),
        }
    }

    fn require_uuid(&self, name: &'static str) -> Result<Uuid, PortalError> {
        Uuid::parse_str(self.require(name)?)
            .map_err(|_| PortalError::Validation(format!("El campo '{name}' no es un identificador válido.")))
    }

    fn checkbox(&self, name: &str) -> bool {
        matches!(self.get(name), Some("true") | Some("on"))
    }
}

/// FormAction
///
/// The closed set of mutation operations, one variant per reachable
/// (path, role, `?action=`) combination. Resolution happens after the gate, so the
/// role is already known to be allowed on the route; what this enum closes off is the
/// action vocabulary itself: a string outside the table never reaches a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    CreateCompany,
    UpdateCompany,
    DeleteCompany,
    ToggleCompanyApproval,
    CreateBusiness,
    AddBusinessToCompany,
    UpdateBusiness,
    DeleteBusiness,
    CreateUser,
    UpdateUser,
    DeleteUser,
    CreateProvider,
    UpdateProvider,
    DeleteProvider,
    AdminCreateUser,
}

impl FormAction {
    /// Maps (route, action name) to the operation. Returns `None` for any combination
    /// outside the table.
    pub fn resolve(route: PageRoute, action: &str) -> Option<Self> {
        match (route, action) {
            (PageRoute::SuperadminBusinesses, "create_company") => Some(Self::CreateCompany),
            (PageRoute::SuperadminBusinesses, "update_company") => Some(Self::UpdateCompany),
            (PageRoute::SuperadminBusinesses, "delete_company") => Some(Self::DeleteCompany),
            (PageRoute::SuperadminBusinesses, "toggle_company_approval") => {
                Some(Self::ToggleCompanyApproval)
            }
            (PageRoute::SuperadminBusinesses, "create_business") => Some(Self::CreateBusiness),
            (PageRoute::SuperadminBusinesses, "add_business_to_company") => {
                Some(Self::AddBusinessToCompany)
            }
            (PageRoute::SuperadminBusinesses, "update_business") => Some(Self::UpdateBusiness),
            (PageRoute::SuperadminBusinesses, "delete_business") => Some(Self::DeleteBusiness),
            (PageRoute::SuperadminUsers, "create_user") => Some(Self::CreateUser),
            (PageRoute::SuperadminUsers, "update_user") => Some(Self::UpdateUser),
            (PageRoute::SuperadminUsers, "delete_user") => Some(Self::DeleteUser),
            (PageRoute::SuperadminProviders, "create_provider") => Some(Self::CreateProvider),
            (PageRoute::SuperadminProviders, "update_provider") => Some(Self::UpdateProvider),
            (PageRoute::SuperadminProviders, "delete_provider") => Some(Self::DeleteProvider),
            (PageRoute::AdminUsers, "create_user") => Some(Self::AdminCreateUser),
            _ => None,
        }
    }

    /// Declarative required-field schema, validated before any collaborator call.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::CreateCompany => &["name", "cif", "address"],
            Self::UpdateCompany => &["id", "name", "cif", "address"],
            Self::DeleteCompany | Self::ToggleCompanyApproval => &["id"],
            Self::CreateBusiness | Self::AddBusinessToCompany => {
                &["name", "company_id", "status"]
            }
            Self::UpdateBusiness => &["id", "name", "company_id", "status"],
            Self::DeleteBusiness => &["id"],
            Self::CreateUser => &["full_name", "email", "password", "role_id"],
            Self::UpdateUser => &["id", "full_name", "role_id"],
            Self::DeleteUser => &["id"],
            Self::CreateProvider => &["name"],
            Self::UpdateProvider => &["id", "name"],
            Self::DeleteProvider => &["id"],
            Self::AdminCreateUser => &["full_name", "email", "password", "role_id"],
        }
    }

    /// Which tab of /superadmin/businesses the redirect should land on, when any.
    fn entity_tab(&self) -> Option<&'static str> {
        match self {
            Self::CreateCompany
            | Self::UpdateCompany
            | Self::DeleteCompany
            | Self::ToggleCompanyApproval
            | Self::AddBusinessToCompany => Some("companies"),
            Self::CreateBusiness | Self::UpdateBusiness | Self::DeleteBusiness => {
                Some("businesses")
            }
            _ => None,
        }
    }
}

/// Builds the redirect target: origin path, optional tab selector, and the single
/// human-readable message slot (percent-encoded the way the browser encodes it).
fn redirect_target(route: PageRoute, entity: Option<&str>, message: &str) -> String {
    match entity {
        Some(entity) => format!(
            "{}?entity={}&message={}",
            route.path(),
            entity,
            encode_uri_component(message)
        ),
        None => format!("{}?message={}", route.path(), encode_uri_component(message)),
    }
}

/// dispatch
///
/// The form action dispatcher. Resolves the `?action=` name against the closed table,
/// validates the declarative field schema, executes the operation, and always produces
/// a redirect target carrying the outcome message; errors and successes share that
/// one slot, per the original contract.
pub async fn dispatch(
    state: &AppState,
    profile: &Profile,
    route: PageRoute,
    action: Option<&str>,
    fields: FormFields,
) -> String {
    let Some(action) = action.and_then(|a| FormAction::resolve(route, a)) else {
        tracing::warn!(path = route.path(), "form post with unknown action");
        return redirect_target(route, None, "Error: acción desconocida.");
    };

    // Validation happens in full before the first collaborator call.
    for field in action.required_fields() {
        if fields.get(field).is_none() {
            let e = PortalError::MissingField(field);
            return redirect_target(route, action.entity_tab(), &format!("Error de validación: {e}"));
        }
    }

    let message = match execute(state, profile, action, &fields).await {
        Ok(message) => message,
        Err(e) if e.is_validation() => format!("Error de validación: {e}"),
        Err(e) => format!("Error: {e}"),
    };
    redirect_target(route, action.entity_tab(), &message)
}

async fn execute(
    state: &AppState,
    profile: &Profile,
    action: FormAction,
    fields: &FormFields,
) -> Result<String, PortalError> {
    match action {
        FormAction::CreateCompany => {
            state.repo.insert_company(company_input(fields)?).await?;
            Ok("Compañía creada con éxito.".to_string())
        }
        FormAction::UpdateCompany => {
            let id = fields.require_i64("id")?;
            state.repo.update_company(id, company_input(fields)?).await?;
            Ok("Compañía actualizada con éxito.".to_string())
        }
        FormAction::DeleteCompany => {
            state.repo.delete_company(fields.require_i64("id")?).await?;
            Ok("Compañía eliminada.".to_string())
        }
        FormAction::ToggleCompanyApproval => {
            let approved = state
                .repo
                .toggle_company_approval(fields.require_i64("id")?)
                .await?;
            Ok(if approved {
                "Compañía aprobada.".to_string()
            } else {
                "Aprobación retirada.".to_string()
            })
        }
        FormAction::CreateBusiness | FormAction::AddBusinessToCompany => {
            create_business(state, fields).await
        }
        FormAction::UpdateBusiness => update_business(state, fields).await,
        FormAction::DeleteBusiness => {
            state.repo.delete_business(fields.require_i64("id")?).await?;
            Ok("Negocio eliminado.".to_string())
        }
        FormAction::CreateUser => {
            let business_id = fields.get_i64("business_id")?;
            create_user(state, fields, business_id).await
        }
        FormAction::AdminCreateUser => {
            // Scoped by construction: the business comes from the caller's own
            // profile, never from the form.
            let Some(business_id) = profile.business_id else {
                return Err(PortalError::Validation(
                    "No estás asignado a ningún negocio.".to_string(),
                ));
            };
            let roles = state.repo.list_roles().await?;
            let role = role_by_id(&roles, fields.require_i64("role_id")?)?;
            if !matches!(role.name, RoleName::Vendedor | RoleName::Tramitador) {
                return Err(PortalError::Validation(
                    "Solo puedes crear usuarios de equipo (vendedor o tramitador).".to_string(),
                ));
            }
            create_user(state, fields, Some(business_id)).await
        }
        FormAction::UpdateUser => update_user(state, fields).await,
        FormAction::DeleteUser => delete_user(state, fields).await,
        FormAction::CreateProvider => {
            state.repo.insert_provider(provider_input(fields)?).await?;
            Ok("Proveedor creado con éxito.".to_string())
        }
        FormAction::UpdateProvider => {
            let id = fields.require_i64("id")?;
            state.repo.update_provider(id, provider_input(fields)?).await?;
            Ok("Proveedor actualizado con éxito.".to_string())
        }
        FormAction::DeleteProvider => {
            state.repo.delete_provider(fields.require_i64("id")?).await?;
            Ok("Proveedor eliminado.".to_string())
        }
    }
}

// --- Payload assembly ---

fn company_input(fields: &FormFields) -> Result<CompanyInput, PortalError> {
    Ok(CompanyInput {
        name: fields.require("name")?.to_string(),
        cif: fields.require("cif")?.to_string(),
        address: fields.get("address").map(str::to_string),
        description: fields.get("description").map(str::to_string),
    })
}

fn business_input(fields: &FormFields) -> Result<BusinessInput, PortalError> {
    let status = fields.require("status")?;
    let status = BusinessStatus::parse(status)
        .ok_or_else(|| PortalError::Validation(format!("Estado de negocio desconocido: '{status}'.")))?;
    Ok(BusinessInput {
        name: fields.require("name")?.to_string(),
        company_id: fields.require_i64("company_id")?,
        status,
    })
}

fn provider_input(fields: &FormFields) -> Result<ProviderInput, PortalError> {
    Ok(ProviderInput {
        name: fields.require("name")?.to_string(),
        logo_b64: fields.get("logo_b64").map(str::to_string),
        notes: fields.get("notes").map(str::to_string),
    })
}

/// The style sub-form is optional decoration; only submitted fields trigger the
/// second write of the composite operation.
fn style_input(fields: &FormFields, business_id: i64) -> Option<StyleInput> {
    let logo = fields.get("logo_base64");
    let primary = fields.get("primary_color");
    let secondary = fields.get("secondary_color");
    if logo.is_none() && primary.is_none() && secondary.is_none() {
        return None;
    }
    Some(StyleInput {
        business_id,
        logo_base64: logo.map(str::to_string),
        primary_color: primary.unwrap_or("#399f82").to_string(),
        secondary_color: secondary.unwrap_or("#4a4548").to_string(),
    })
}

fn role_by_id(roles: &[Role], role_id: i64) -> Result<&Role, PortalError> {
    roles
        .iter()
        .find(|r| r.id == role_id)
        .ok_or_else(|| PortalError::Validation("Rol desconocido.".to_string()))
}

/// Role/business coherence, enforced at write time: a superadmin carries no business,
/// every other role carries exactly one.
fn check_role_business(role: &Role, business_id: Option<i64>) -> Result<(), PortalError> {
    match (role.name, business_id) {
        (RoleName::Superadmin, Some(_)) => Err(PortalError::Validation(
            "Un superadmin no puede tener un negocio asignado.".to_string(),
        )),
        (RoleName::Superadmin, None) => Ok(()),
        (_, None) => Err(PortalError::Validation(
            "Este rol requiere un negocio asignado.".to_string(),
        )),
        (_, Some(_)) => Ok(()),
    }
}

// --- Composite operations ---

/// Create business, then upsert its style with the generated id. The two calls are
/// not transactional; see `WriteConsistency` for what happens when the second fails.
async fn create_business(state: &AppState, fields: &FormFields) -> Result<String, PortalError> {
    let input = business_input(fields)?;
    let business = state.repo.insert_business(input).await?;

    let Some(style) = style_input(fields, business.id) else {
        return Ok("Negocio creado con éxito.".to_string());
    };
    match state.repo.upsert_business_style(style).await {
        Ok(()) => Ok("Negocio creado con éxito.".to_string()),
        Err(e) => {
            tracing::warn!(
                business_id = business.id,
                error = %e,
                "inconsistency: business created but style upsert failed"
            );
            if state.config.write_consistency == WriteConsistency::Compensate {
                if let Err(del) = state.repo.delete_business(business.id).await {
                    tracing::error!(business_id = business.id, error = %del, "compensating delete failed");
                }
                return Ok(format!("Error guardando los estilos: {e}"));
            }
            Ok(format!("Negocio creado, pero no se pudieron guardar los estilos: {e}"))
        }
    }
}

async fn update_business(state: &AppState, fields: &FormFields) -> Result<String, PortalError> {
    let id = fields.require_i64("id")?;
    let input = business_input(fields)?;
    state.repo.update_business(id, input).await?;

    let Some(style) = style_input(fields, id) else {
        return Ok("Negocio actualizado con éxito.".to_string());
    };
    match state.repo.upsert_business_style(style).await {
        Ok(()) => Ok("Negocio actualizado con éxito.".to_string()),
        Err(e) => {
            // The business update stands in both consistency modes; there is no
            // previous-style snapshot to restore.
            tracing::warn!(business_id = id, error = %e, "inconsistency: business updated but style upsert failed");
            Ok(format!("Negocio actualizado, pero no se pudieron guardar los estilos: {e}"))
        }
    }
}

/// Create identity (escalated, cookie-free), then insert the mirroring profile row.
/// A profile failure leaves an orphaned identity unless compensation is enabled.
async fn create_user(
    state: &AppState,
    fields: &FormFields,
    business_id: Option<i64>,
) -> Result<String, PortalError> {
    let roles = state.repo.list_roles().await?;
    let role = role_by_id(&roles, fields.require_i64("role_id")?)?;
    check_role_business(role, business_id)?;

    let email = fields.require("email")?;
    let password = fields.require("password")?;
    let identity = match state.auth.admin_create_user(email, password).await {
        Ok(identity) => identity,
        Err(e) => return Ok(format!("Error creando usuario: {e}")),
    };

    let input = ProfileInput {
        id: identity.id,
        full_name: fields.require("full_name")?.to_string(),
        role_id: role.id,
        business_id,
        is_active: true,
    };
    match state.repo.insert_profile(input).await {
        Ok(()) => Ok("Usuario creado con éxito.".to_string()),
        Err(e) => {
            tracing::warn!(
                identity_id = %identity.id,
                error = %e,
                "inconsistency: identity created but profile insert failed"
            );
            if state.config.write_consistency == WriteConsistency::Compensate {
                if let Err(del) = state.auth.admin_delete_user(identity.id).await {
                    tracing::error!(identity_id = %identity.id, error = %del, "compensating identity delete failed");
                }
            }
            Ok(format!("Error creando perfil: {e}"))
        }
    }
}

async fn update_user(state: &AppState, fields: &FormFields) -> Result<String, PortalError> {
    let id = fields.require_uuid("id")?;
    let business_id = fields.get_i64("business_id")?;
    let roles = state.repo.list_roles().await?;
    let role = role_by_id(&roles, fields.require_i64("role_id")?)?;
    check_role_business(role, business_id)?;

    let patch = ProfilePatch {
        full_name: fields.require("full_name")?.to_string(),
        role_id: role.id,
        business_id,
        is_active: fields.checkbox("is_active"),
    };
    state.repo.update_profile(id, patch).await?;

    // Optional password reset rides along with the profile update, escalated.
    if let Some(password) = fields.get("password") {
        if let Err(e) = state.auth.admin_set_password(id, password).await {
            tracing::warn!(user_id = %id, error = %e, "profile updated but password reset failed");
            return Ok(format!(
                "Usuario actualizado, pero no se pudo cambiar la contraseña: {e}"
            ));
        }
    }
    Ok("Usuario actualizado con éxito.".to_string())
}

/// Delete the identity first (escalated), then the profile row. The reverse order
/// would leave a login-capable identity without a profile on failure, which is the
/// worse inconsistency.
async fn delete_user(state: &AppState, fields: &FormFields) -> Result<String, PortalError> {
    let id = fields.require_uuid("id")?;
    if let Err(e) = state.auth.admin_delete_user(id).await {
        return Ok(format!("Error eliminando usuario: {e}"));
    }
    match state.repo.delete_profile(id).await {
        Ok(()) => Ok("Usuario eliminado.".to_string()),
        Err(e) => {
            tracing::warn!(user_id = %id, error = %e, "inconsistency: identity deleted but profile remains");
            Ok(format!("Error eliminando perfil: {e}"))
        }
    }
}
