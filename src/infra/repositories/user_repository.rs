//! User repository: the storage seam for user records.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserDetails, UserId};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Check whether a user with this ID is stored
    async fn exists_by_id(&self, id: UserId) -> AppResult<bool>;

    /// Insert when `id` is `None` (assigning a fresh ID), otherwise overwrite
    /// every field of the stored row.
    async fn save(&self, id: Option<UserId>, details: UserDetails) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_by_id(&self, id: UserId) -> AppResult<()>;

    /// Users born within `[from, to]`, in storage order
    async fn find_by_birth_date_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<User>>;
}

/// PostgreSQL-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(id: Option<UserId>, details: UserDetails) -> ActiveModel {
    ActiveModel {
        id: id.map_or(NotSet, Set),
        email: Set(details.email),
        first_name: Set(details.first_name),
        last_name: Set(details.last_name),
        birth_date: Set(details.birth_date),
        address: Set(details.address),
        phone_number: Set(details.phone_number),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn exists_by_id(&self, id: UserId) -> AppResult<bool> {
        let count = UserEntity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn save(&self, id: Option<UserId>, details: UserDetails) -> AppResult<User> {
        let active_model = to_active_model(id, details);

        let model = match id {
            None => active_model.insert(&self.db).await,
            Some(_) => active_model.update(&self.db).await,
        }
        .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(id, rows = result.rows_affected, "Deleted user row");
        Ok(())
    }

    async fn find_by_birth_date_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::BirthDate.between(from, to))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
