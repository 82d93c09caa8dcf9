//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use clinikit_app::ports::RoleRepository;

use crate::route_table::{ModuleRouteTable, RouteTableError};
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Every installed module registers its pages into a fresh
/// [`ModuleRouteTable`], which is merged next to the API routes under `/api`
/// and the dashboard at `/`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
///
/// # Errors
///
/// Returns a [`RouteTableError`] when module routes collide with each other
/// or with host routes.
pub fn build<R>(state: AppState<R>) -> Result<Router, RouteTableError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    let mut table = ModuleRouteTable::new();
    state.modules.register_all_routes(&mut table);
    let module_routes = table.into_router::<R>()?;

    Ok(Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .merge(module_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health_check() -> &'static str {
    "OK"
}
