//! # clinikitd — clinikit daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Load every configured module manifest and build the module registry
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the role repository and application services
//! - Seed the bootstrap admin role when one is configured
//! - Build the axum router, injecting application state
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod loader;

use clinikit_adapter_http_axum::route_table::RouteTableError;
use clinikit_adapter_http_axum::state::AppState;
use clinikit_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqliteRoleRepository, StorageError};
use clinikit_app::module::TemplateModule;
use clinikit_app::registry::{ModuleRegistry, RegistryError};
use clinikit_app::services::role_service::RoleService;
use clinikit_domain::error::ClinikitError;

use crate::config::Config;
use crate::loader::{ManifestLoadError, load_manifest};

/// Anything that prevents the daemon from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load module manifest")]
    Manifest(#[from] ManifestLoadError),

    #[error("failed to register module")]
    Registry(#[from] RegistryError),

    #[error("failed to mount module routes")]
    Routes(#[from] RouteTableError),

    #[error("failed to initialise storage")]
    Storage(#[from] StorageError),

    #[error("failed to seed bootstrap admin role")]
    Bootstrap(#[source] ClinikitError),
}

/// Build the fully wired router described by `config`.
///
/// # Errors
///
/// Returns a [`StartupError`] when a manifest is missing or invalid, two
/// modules share an id, module routes collide, storage cannot be opened, or
/// the bootstrap admin role cannot be written.
pub async fn build_app(config: &Config) -> Result<axum::Router, StartupError> {
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let roles = SqliteRoleRepository::new(db.pool().clone());

    let mut modules = ModuleRegistry::new();
    for path in &config.modules.manifests {
        let manifest = load_manifest(path)?;
        modules.register(TemplateModule::new(manifest, roles.clone()))?;
    }
    if modules.is_empty() {
        tracing::warn!("no modules configured");
    }

    let role_service = RoleService::new(roles);
    if let Some(id) = config.bootstrap_admin() {
        role_service
            .ensure_admin(id)
            .await
            .map_err(StartupError::Bootstrap)?;
    }

    let state = AppState::new(modules, role_service);
    Ok(clinikit_adapter_http_axum::router::build(state)?)
}
