//! In-process user storage.
//!
//! Keeps rows in an ordered map keyed by ID, so iteration order is insertion
//! order just like an identity column.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::user_repository::UserRepository;
use crate::domain::{User, UserDetails, UserId};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
struct Rows {
    users: BTreeMap<UserId, UserDetails>,
    last_id: UserId,
}

/// UserRepository kept entirely in memory. Contents are lost on shutdown.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Rows>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let rows = self.rows.read().await;
        Ok(rows
            .users
            .get(&id)
            .map(|details| User::new(id, details.clone())))
    }

    async fn exists_by_id(&self, id: UserId) -> AppResult<bool> {
        Ok(self.rows.read().await.users.contains_key(&id))
    }

    async fn save(&self, id: Option<UserId>, details: UserDetails) -> AppResult<User> {
        let mut rows = self.rows.write().await;

        let id = match id {
            Some(id) if rows.users.contains_key(&id) => id,
            // Same outcome as updating a row that is not there
            Some(_) => return Err(AppError::Database(DbErr::RecordNotUpdated)),
            None => {
                rows.last_id += 1;
                rows.last_id
            }
        };

        rows.users.insert(id, details.clone());
        Ok(User::new(id, details))
    }

    async fn delete_by_id(&self, id: UserId) -> AppResult<()> {
        self.rows.write().await.users.remove(&id);
        Ok(())
    }

    async fn find_by_birth_date_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<User>> {
        let rows = self.rows.read().await;
        Ok(rows
            .users
            .iter()
            .filter(|(_, details)| (from..=to).contains(&details.birth_date))
            .map(|(id, details)| User::new(*id, details.clone()))
            .collect())
    }
}
