//! Storage port — repository trait for role documents.

use std::future::Future;
use std::sync::Arc;

use clinikit_domain::error::ClinikitError;
use clinikit_domain::id::RoleId;
use clinikit_domain::role::Role;

/// Repository for persisting and querying [`Role`]s.
///
/// `get_by_id` is the only capability module permission checks rely on; the
/// rest serve role administration and seeding.
pub trait RoleRepository {
    /// Persist a new role, replacing any role stored under the same id.
    fn create(&self, role: Role) -> impl Future<Output = Result<Role, ClinikitError>> + Send;

    /// Get a role by id. Returns `Ok(None)` when no document matches.
    fn get_by_id(
        &self,
        id: RoleId,
    ) -> impl Future<Output = Result<Option<Role>, ClinikitError>> + Send;

    /// List every stored role, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Role>, ClinikitError>> + Send;

    /// Delete a role by id. Deleting an unknown id is not an error.
    fn delete(&self, id: RoleId) -> impl Future<Output = Result<(), ClinikitError>> + Send;
}

impl<T> RoleRepository for Arc<T>
where
    T: RoleRepository + Send + Sync,
{
    fn create(&self, role: Role) -> impl Future<Output = Result<Role, ClinikitError>> + Send {
        (**self).create(role)
    }

    fn get_by_id(
        &self,
        id: RoleId,
    ) -> impl Future<Output = Result<Option<Role>, ClinikitError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Role>, ClinikitError>> + Send {
        (**self).get_all()
    }

    fn delete(&self, id: RoleId) -> impl Future<Output = Result<(), ClinikitError>> + Send {
        (**self).delete(id)
    }
}
