//! JSON handlers for module manifests and permission checks.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{Map, Value};

use clinikit_app::ports::RoleRepository;
use clinikit_domain::error::{ClinikitError, ForbiddenError, NotFoundError};

use crate::error::ApiError;
use crate::extract::RoleIds;
use crate::state::AppState;

/// Body of the permission check endpoint.
#[derive(Debug, Serialize)]
pub struct PermittedResponse {
    pub module_id: String,
    pub permitted: bool,
}

fn not_found(id: String) -> ClinikitError {
    NotFoundError { entity: "Module", id }.into()
}

/// `GET /api/modules` — manifests of every module the caller may access.
pub async fn list<R>(
    State(state): State<AppState<R>>,
    roles: RoleIds,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    let modules = state.modules.permitted_modules(roles.as_deref()).await?;
    Ok(Json(
        modules
            .into_iter()
            .map(|module| module.get_properties().clone())
            .collect(),
    ))
}

/// `GET /api/modules/{id}` — the manifest verbatim, if the caller may access
/// the module.
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    roles: RoleIds,
) -> Result<Json<Map<String, Value>>, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    let module = state.modules.get(&id).ok_or_else(|| not_found(id.clone()))?;
    if !module.user_permitted(roles.as_deref()).await? {
        return Err(ClinikitError::from(ForbiddenError::Module { module_id: id }).into());
    }
    Ok(Json(module.get_properties().clone()))
}

/// `GET /api/modules/{id}/permitted` — whether the caller's roles grant access.
pub async fn permitted<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    roles: RoleIds,
) -> Result<Json<PermittedResponse>, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    let module = state.modules.get(&id).ok_or_else(|| not_found(id.clone()))?;
    let permitted = module.user_permitted(roles.as_deref()).await?;
    Ok(Json(PermittedResponse {
        module_id: id,
        permitted,
    }))
}
