//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ClinikitError`] via `#[from]`.

use std::error::Error as StdError;

/// Base error for every fallible operation that crosses a port boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClinikitError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("forbidden")]
    Forbidden(#[from] ForbiddenError),

    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    EmptyId,
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The caller's roles do not allow the operation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenError {
    /// None of the roles grants access to the module.
    #[error("access to module {module_id} denied")]
    Module { module_id: String },

    /// Creating, reading or deleting roles needs an `"admin"` role.
    #[error("role administration requires an admin role")]
    RoleAdministration,
}
