//! JSON REST handlers for roles.
//!
//! Every endpoint requires one of the caller's roles to be an `"admin"` role.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use clinikit_app::ports::RoleRepository;
use clinikit_domain::error::ClinikitError;
use clinikit_domain::id::RoleId;
use clinikit_domain::role::{Permissions, Role};

use crate::error::ApiError;
use crate::extract::RoleIds;
use crate::state::AppState;

/// Request body for creating a role. A missing `_id` mints a fresh one.
#[derive(Deserialize)]
pub struct CreateRoleRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Role>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<RoleId, ApiError> {
    RoleId::from_str(raw).map_err(|err| ApiError::from(ClinikitError::from(err)))
}

/// `GET /api/roles`
pub async fn list<R>(
    State(state): State<AppState<R>>,
    caller: RoleIds,
) -> Result<Json<Vec<Role>>, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    state.role_service.require_admin(caller.as_deref()).await?;
    let roles = state.role_service.list_roles().await?;
    Ok(Json(roles))
}

/// `GET /api/roles/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    caller: RoleIds,
    Path(id): Path<String>,
) -> Result<Json<Role>, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    state.role_service.require_admin(caller.as_deref()).await?;
    let id = parse_id(&id)?;
    let role = state.role_service.get_role(id).await?;
    Ok(Json(role))
}

/// `POST /api/roles`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    caller: RoleIds,
    Json(req): Json<CreateRoleRequest>,
) -> Result<CreateResponse, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    state.role_service.require_admin(caller.as_deref()).await?;
    let id = match req.id {
        Some(raw) => parse_id(&raw)?,
        None => RoleId::generate(),
    };
    let role = Role {
        id,
        name: req.name,
        permissions: req.permissions,
    };
    let created = state.role_service.create_role(role).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/roles/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    caller: RoleIds,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    state.role_service.require_admin(caller.as_deref()).await?;
    let id = parse_id(&id)?;
    state.role_service.delete_role(id).await?;
    Ok(DeleteResponse::NoContent)
}
