//! Shared application state for axum handlers.

use std::sync::Arc;

use clinikit_app::ports::RoleRepository;
use clinikit_app::registry::ModuleRegistry;
use clinikit_app::services::role_service::RoleService;

/// Application state shared across all axum handlers.
///
/// Generic over the role repository to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<R> {
    /// Installed modules.
    pub modules: Arc<ModuleRegistry<R>>,
    /// Role administration service.
    pub role_service: Arc<RoleService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            modules: Arc::clone(&self.modules),
            role_service: Arc::clone(&self.role_service),
        }
    }
}

impl<R> AppState<R>
where
    R: RoleRepository + Send + Sync + 'static,
{
    /// Create a new application state.
    pub fn new(modules: ModuleRegistry<R>, role_service: RoleService<R>) -> Self {
        Self {
            modules: Arc::new(modules),
            role_service: Arc::new(role_service),
        }
    }
}
