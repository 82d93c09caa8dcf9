//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod modules;
#[allow(clippy::missing_errors_doc)]
pub mod roles;

use axum::Router;
use axum::routing::get;

use clinikit_app::ports::RoleRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: RoleRepository + Send + Sync + 'static,
{
    Router::new()
        // Modules
        .route("/modules", get(modules::list::<R>))
        .route("/modules/{id}", get(modules::get::<R>))
        .route("/modules/{id}/permitted", get(modules::permitted::<R>))
        // Roles
        .route("/roles", get(roles::list::<R>).post(roles::create::<R>))
        .route("/roles/{id}", get(roles::get::<R>).delete(roles::delete::<R>))
}
