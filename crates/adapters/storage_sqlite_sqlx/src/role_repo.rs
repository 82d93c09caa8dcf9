//! `SQLite` implementation of [`RoleRepository`].
//!
//! Permissions are stored as JSON text exactly as they appear in a role
//! document: either `"admin"` or a list of `{"moduleID": …}` entries.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use clinikit_app::ports::RoleRepository;
use clinikit_domain::error::ClinikitError;
use clinikit_domain::id::RoleId;
use clinikit_domain::role::{Permissions, Role};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Role`].
struct Wrapper(Role);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Role> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: Option<String> = row.try_get("name")?;
        let permissions: String = row.try_get("permissions")?;

        let id = RoleId::new(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let permissions: Permissions = serde_json::from_str(&permissions)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Role {
            id,
            name,
            permissions,
        }))
    }
}

const UPSERT: &str = "INSERT INTO roles (id, name, permissions) VALUES (?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, permissions = excluded.permissions";
const SELECT_BY_ID: &str = "SELECT * FROM roles WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM roles ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM roles WHERE id = ?";

/// `SQLite`-backed role repository.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone)]
pub struct SqliteRoleRepository {
    pool: SqlitePool,
}

impl SqliteRoleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RoleRepository for SqliteRoleRepository {
    fn create(&self, role: Role) -> impl Future<Output = Result<Role, ClinikitError>> + Send {
        let pool = self.pool.clone();
        async move {
            let permissions =
                serde_json::to_string(&role.permissions).map_err(StorageError::from)?;

            sqlx::query(UPSERT)
                .bind(role.id.as_str())
                .bind(role.name.as_deref())
                .bind(permissions)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(role)
        }
    }

    fn get_by_id(
        &self,
        id: RoleId,
    ) -> impl Future<Output = Result<Option<Role>, ClinikitError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Role>, ClinikitError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: RoleId) -> impl Future<Output = Result<(), ClinikitError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
