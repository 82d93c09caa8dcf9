//! Role service — use-cases for administering roles.

use clinikit_domain::error::{ClinikitError, ForbiddenError, NotFoundError};
use clinikit_domain::id::RoleId;
use clinikit_domain::role::{Permissions, Role};

use crate::ports::RoleRepository;

/// Application service for role CRUD operations.
pub struct RoleService<R> {
    repo: R,
}

impl<R: RoleRepository> RoleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a role after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ClinikitError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, role), fields(role_id = %role.id))]
    pub async fn create_role(&self, role: Role) -> Result<Role, ClinikitError> {
        role.validate()?;
        self.repo.create(role).await
    }

    /// Look up a role by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ClinikitError::NotFound`] when no role with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_role(&self, id: RoleId) -> Result<Role, ClinikitError> {
        let key = id.to_string();
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Role",
                id: key,
            }
            .into()
        })
    }

    /// List all roles.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_roles(&self) -> Result<Vec<Role>, ClinikitError> {
        self.repo.get_all().await
    }

    /// Delete a role by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_role(&self, id: RoleId) -> Result<(), ClinikitError> {
        self.repo.delete(id).await
    }

    /// Succeed only when one of `role_ids` names a stored `"admin"` role.
    ///
    /// # Errors
    ///
    /// Returns [`ForbiddenError::RoleAdministration`] when no admin role is
    /// among `role_ids`, or a storage error from the repository.
    #[tracing::instrument(skip(self, role_ids))]
    pub async fn require_admin(&self, role_ids: Option<&[RoleId]>) -> Result<(), ClinikitError> {
        for role_id in role_ids.unwrap_or_default() {
            let role = self.repo.get_by_id(role_id.clone()).await?;
            if role.is_some_and(|role| role.is_admin()) {
                return Ok(());
            }
        }
        tracing::debug!("role administration denied");
        Err(ForbiddenError::RoleAdministration.into())
    }

    /// Make sure an `"admin"` role exists under `id`, creating it if absent.
    ///
    /// An existing role is left untouched, even when it is not an admin.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_admin(&self, id: RoleId) -> Result<Role, ClinikitError> {
        if let Some(existing) = self.repo.get_by_id(id.clone()).await? {
            if !existing.is_admin() {
                tracing::warn!(role_id = %existing.id, "bootstrap role exists without admin permissions");
            }
            return Ok(existing);
        }
        tracing::info!(role_id = %id, "creating bootstrap admin role");
        self.create_role(Role {
            id,
            name: Some("Administrators".to_string()),
            permissions: Permissions::Admin,
        })
        .await
    }
}
