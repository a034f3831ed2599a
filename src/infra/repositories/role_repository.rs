//! Role repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};

use super::entities::role::{ActiveModel, Entity as RoleEntity};
use crate::domain::Role;
use crate::errors::{AppError, AppResult};

#[cfg(feature = "test-utils")]
use mockall::automock;

/// Role repository trait for dependency injection.
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// List all roles in storage order
    async fn find_all(&self) -> AppResult<Vec<Role>>;

    /// Find role by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Role>>;

    /// Insert a new role; the store assigns the identity
    async fn create(&self, role: Role) -> AppResult<Role>;

    /// Persist a mutated role
    async fn update(&self, role: Role) -> AppResult<Role>;

    /// Delete role by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of RoleRepository over SeaORM
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let models = RoleEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Role::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Role>> {
        let result = RoleEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Role::from))
    }

    async fn create(&self, role: Role) -> AppResult<Role> {
        let active = ActiveModel {
            id: NotSet,
            name: Set(role.name),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Role::from(model))
    }

    async fn update(&self, role: Role) -> AppResult<Role> {
        let active = ActiveModel {
            id: Set(role.id),
            name: Set(role.name),
        };

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Role::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        RoleEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}
