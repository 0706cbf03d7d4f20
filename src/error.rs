use thiserror::Error;

/// PortalError
///
/// The error vocabulary of the orchestration core. The distinction that matters for
/// the user-facing flow is *who* rejected the operation:
///
/// - `Validation`: this application refused the form before any collaborator call
///   (missing required field, closed-set violation, incoherent role/business pairing).
/// - `Collaborator`: the hosted backend rejected a call; the message text comes from
///   the collaborator's response body and is surfaced verbatim to the operator.
/// - `NotFound`: a detail fetch for a nonexistent id (JSON endpoints map this to 404).
///
/// None of these propagate to the transport layer as raw errors: handlers convert them
/// into redirect-carried messages, inline fragments, or JSON error bodies.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Falta el campo obligatorio '{0}'.")]
    MissingField(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Collaborator(String),

    #[error("No encontrado.")]
    NotFound,
}

impl PortalError {
    /// True for the two kinds produced before any collaborator call is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::Validation(_))
    }
}
