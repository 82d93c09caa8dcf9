//! Server-side rendered HTML pages.
//!
//! - `GET /`        — dashboard with one card per permitted module
//! - module pages   — mounted from the route table, see [`crate::route_table`]

pub mod home;
pub mod pages;

use axum::Router;
use axum::routing::get;

use clinikit_app::ports::RoleRepository;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: RoleRepository + Send + Sync + 'static,
{
    Router::new().route("/", get(home::index::<R>))
}
