//! User service - Handles user-related business logic.
//!
//! Owns the age eligibility rule for new users and the merge rule for
//! partial updates. Payloads reaching this layer are already validated.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

use crate::domain::eligibility;
use crate::domain::{Lookup, User, UserDetails, UserId, UserPatch};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<Lookup<User>>;

    /// Register a new user if they meet the age requirement
    async fn create_user(&self, details: UserDetails) -> AppResult<User>;

    /// Replace every field of an existing user
    async fn update_user(&self, id: UserId, details: UserDetails) -> AppResult<Lookup<User>>;

    /// Overwrite only the fields present in the patch
    async fn update_partial_user(&self, id: UserId, patch: UserPatch) -> AppResult<Lookup<User>>;

    /// Delete user, failing with `NotFound` when absent
    async fn delete_user(&self, id: UserId) -> AppResult<()>;

    /// Users born within `[from, to]`
    async fn search_users_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService over a UserRepository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    age_requirement: u32,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>, age_requirement: u32) -> Self {
        Self {
            repo,
            clock,
            age_requirement,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: UserId) -> AppResult<Lookup<User>> {
        Ok(self.repo.find_by_id(id).await?.into())
    }

    async fn create_user(&self, details: UserDetails) -> AppResult<User> {
        let now = self.clock.utc();
        if !eligibility::is_eligible(details.birth_date, now, self.age_requirement) {
            tracing::info!(
                birth_date = %details.birth_date,
                required = self.age_requirement,
                "Rejected registration below age requirement"
            );
            return Err(AppError::IneligibleAge {
                required: self.age_requirement,
            });
        }

        let user = self.repo.save(None, details).await?;
        tracing::info!(id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, details: UserDetails) -> AppResult<Lookup<User>> {
        if self.repo.find_by_id(id).await?.is_none() {
            tracing::debug!(id, "Update skipped, user not found");
            return Ok(Lookup::NotFound);
        }

        let user = self.repo.save(Some(id), details).await?;
        tracing::info!(id, "User replaced");
        Ok(Lookup::Found(user))
    }

    async fn update_partial_user(&self, id: UserId, patch: UserPatch) -> AppResult<Lookup<User>> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            tracing::debug!(id, "Patch skipped, user not found");
            return Ok(Lookup::NotFound);
        };

        let mut details = existing.details;
        details.merge(patch);

        let user = self.repo.save(Some(id), details).await?;
        tracing::info!(id, "User patched");
        Ok(Lookup::Found(user))
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(id));
        }

        self.repo.delete_by_id(id).await?;
        tracing::info!(id, "User deleted");
        Ok(())
    }

    async fn search_users_by_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<User>> {
        if from > to {
            return Err(AppError::InvalidRange);
        }

        let users = self.repo.find_by_birth_date_between(from, to).await?;
        tracing::debug!(%from, %to, count = users.len(), "Birth date search");
        Ok(users)
    }
}
