//! Route table handed to modules during startup.
//!
//! Modules register `(path, route)` pairs through [`RouteRegistrar`]; the
//! table is then turned into an axum router whose handlers render the
//! registered page.

use std::collections::HashSet;

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use clinikit_app::ports::{ModuleRoute, RoleRepository, RouteRegistrar};

use crate::dashboard::pages;
use crate::extract::RoleIds;
use crate::state::AppState;

/// First path segments owned by the host.
pub const RESERVED_SEGMENTS: [&str; 2] = ["api", "health"];

/// Why the collected routes cannot be mounted.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("path `{0}` is registered twice")]
    Duplicate(String),

    #[error("path `{0}` collides with a host route")]
    Reserved(String),

    #[error("path `{0}` must start with '/' and name a module")]
    Malformed(String),
}

/// Collects module routes in registration order.
#[derive(Debug, Default)]
pub struct ModuleRouteTable {
    routes: Vec<(String, ModuleRoute)>,
}

impl RouteRegistrar for ModuleRouteTable {
    fn register(&mut self, path: String, route: ModuleRoute) {
        self.routes.push((path, route));
    }
}

impl ModuleRouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn routes(&self) -> &[(String, ModuleRoute)] {
        &self.routes
    }

    /// Check that every path is well formed, unique and clear of host routes.
    ///
    /// # Errors
    ///
    /// Returns the first offending path as a [`RouteTableError`].
    pub fn validate(&self) -> Result<(), RouteTableError> {
        let mut seen = HashSet::new();
        for (path, _) in &self.routes {
            let Some(first) = path
                .strip_prefix('/')
                .and_then(|rest| rest.split('/').next())
                .filter(|segment| !segment.is_empty())
            else {
                return Err(RouteTableError::Malformed(path.clone()));
            };
            if RESERVED_SEGMENTS.contains(&first) {
                return Err(RouteTableError::Reserved(path.clone()));
            }
            if !seen.insert(path.as_str()) {
                return Err(RouteTableError::Duplicate(path.clone()));
            }
        }
        Ok(())
    }

    /// Mount every registered route as a `GET` handler.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteTableError`] when [`validate`](Self::validate) fails.
    pub fn into_router<R>(self) -> Result<Router<AppState<R>>, RouteTableError>
    where
        R: RoleRepository + Send + Sync + 'static,
    {
        self.validate()?;

        let mut router = Router::new();
        for (path, route) in self.routes {
            let handler = move |State(state): State<AppState<R>>, roles: RoleIds| {
                let route = route.clone();
                async move { pages::render(state, roles, route).await }
            };
            router = router.route(&path, get(handler));
        }
        Ok(router)
    }
}
