//! Module registry — the host's collection of installed modules.

use clinikit_domain::error::ClinikitError;
use clinikit_domain::id::RoleId;

use crate::module::TemplateModule;
use crate::page::Card;
use crate::ports::{RoleRepository, RouteRegistrar};

/// Errors raised while assembling the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("module id `{0}` is already registered")]
    DuplicateModule(String),
}

/// Installed modules, kept in registration order.
pub struct ModuleRegistry<R> {
    modules: Vec<TemplateModule<R>>,
}

impl<R> Default for ModuleRegistry<R> {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
        }
    }
}

impl<R> ModuleRegistry<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateModule`] when a module with the same
    /// id is already registered.
    pub fn register(&mut self, module: TemplateModule<R>) -> Result<(), RegistryError> {
        if self.get(module.id()).is_some() {
            return Err(RegistryError::DuplicateModule(module.id().to_string()));
        }
        tracing::info!(module_id = %module.id(), module_name = %module.name(), "module registered");
        self.modules.push(module);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, module_id: &str) -> Option<&TemplateModule<R>> {
        self.modules.iter().find(|module| module.id() == module_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateModule<R>> {
        self.modules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Let every module register its pages.
    pub fn register_all_routes(&self, registrar: &mut impl RouteRegistrar) {
        for module in &self.modules {
            module.register_routes(registrar);
        }
    }
}

impl<R: RoleRepository> ModuleRegistry<R> {
    /// Modules the given roles may access, in registration order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the role repository.
    pub async fn permitted_modules(
        &self,
        role_ids: Option<&[RoleId]>,
    ) -> Result<Vec<&TemplateModule<R>>, ClinikitError> {
        let mut permitted = Vec::new();
        for module in &self.modules {
            if module.user_permitted(role_ids).await? {
                permitted.push(module);
            }
        }
        Ok(permitted)
    }

    /// Dashboard cards of every module the given roles may access.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the role repository.
    pub async fn permitted_cards(
        &self,
        role_ids: Option<&[RoleId]>,
    ) -> Result<Vec<Card>, ClinikitError> {
        Ok(self
            .permitted_modules(role_ids)
            .await?
            .into_iter()
            .map(TemplateModule::draw_card)
            .collect())
    }
}
