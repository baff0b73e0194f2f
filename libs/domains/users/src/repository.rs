use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::models::{NewUser, User};

/// Storage contract for user records.
///
/// Implementations enforce email uniqueness themselves and report a violation
/// as [`StorageError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a record and assigns its id.
    async fn create(&self, user: NewUser) -> StorageResult<User>;

    async fn get_by_id(&self, id: u32) -> StorageResult<Option<User>>;

    /// Exact, case-sensitive match on the stored email.
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    async fn get_all(&self) -> StorageResult<Vec<User>>;

    /// Overwrites every field of the record with `user.id`.
    /// A missing record is a [`StorageError::Backend`] failure.
    async fn update(&self, user: User) -> StorageResult<User>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: u32) -> StorageResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<u32, User>,
    last_id: u32,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> StorageResult<User> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.email == user.email) {
            return Err(StorageError::Duplicate(user.email));
        }

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| StorageError::Backend("user id space exhausted".to_string()))?;
        store.last_id = id;

        let created = User {
            id,
            name: user.name,
            email: user.email,
            age: user.age,
        };
        store.users.insert(id, created.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(created)
    }

    async fn get_by_id(&self, id: u32) -> StorageResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn get_all(&self) -> StorageResult<Vec<User>> {
        let store = self.store.read().await;
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update(&self, user: User) -> StorageResult<User> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&user.id) {
            return Err(StorageError::Backend(format!("user {} does not exist", user.id)));
        }

        if store
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StorageError::Duplicate(user.email));
        }

        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: u32) -> StorageResult<bool> {
        let mut store = self.store.write().await;

        if store.users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
