use std::sync::Arc;
use tracing::instrument;

use crate::error::{
    CREATE_FAILED, EMAIL_IN_USE, EMAIL_REGISTERED, EMAIL_REQUIRED, FETCH_FAILED,
    INVALID_USER_ID, NAME_REQUIRED, StorageError, UPDATE_FAILED, USER_NOT_FOUND, UserError,
    UserResult,
};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Service layer for user business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Registers a user after trimming `name` and `email`.
    ///
    /// `age` is stored as given; range checks happen at the HTTP boundary.
    #[instrument(skip(self, name, email))]
    pub async fn register_user(&self, name: &str, email: &str, age: i32) -> UserResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserError::Validation(NAME_REQUIRED));
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(UserError::Validation(EMAIL_REQUIRED));
        }

        if self.find_by_email(email).await.is_some() {
            return Err(UserError::Conflict(EMAIL_REGISTERED));
        }

        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            age,
        };

        self.repository.create(new_user).await.map_err(|e| match e {
            StorageError::Duplicate(_) => UserError::Conflict(EMAIL_REGISTERED),
            StorageError::Backend(cause) => {
                tracing::error!(error = %cause, "failed to insert user");
                UserError::Internal(CREATE_FAILED)
            }
        })
    }

    /// Any lookup failure, including a storage error, reads as "user not found".
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: u32) -> UserResult<User> {
        if id == 0 {
            return Err(UserError::Validation(INVALID_USER_ID));
        }

        self.find_existing(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> UserResult<Vec<User>> {
        self.repository.get_all().await.map_err(|e| {
            tracing::error!(error = %e, "failed to list users");
            UserError::Internal(FETCH_FAILED)
        })
    }

    /// Applies a partial update.
    ///
    /// A blank `name` or `email` keeps the stored value. `age` is always
    /// overwritten, zero included.
    #[instrument(skip(self, name, email))]
    pub async fn update_user_info(
        &self,
        id: u32,
        name: &str,
        email: &str,
        age: i32,
    ) -> UserResult<User> {
        if id == 0 {
            return Err(UserError::Validation(INVALID_USER_ID));
        }

        let mut user = self.find_existing(id).await?;

        let name = name.trim();
        if !name.is_empty() {
            user.name = name.to_string();
        }

        let email = email.trim();
        if !email.is_empty() && email != user.email {
            if self.find_by_email(email).await.is_some() {
                return Err(UserError::Conflict(EMAIL_IN_USE));
            }
            user.email = email.to_string();
        }

        user.age = age;

        self.repository.update(user).await.map_err(|e| match e {
            StorageError::Duplicate(_) => UserError::Conflict(EMAIL_IN_USE),
            StorageError::Backend(cause) => {
                tracing::error!(error = %cause, "failed to persist user update");
                UserError::Internal(UPDATE_FAILED)
            }
        })
    }

    /// Deletes an existing user. A storage failure during the delete itself
    /// is also reported as "user not found".
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: u32) -> UserResult<()> {
        if id == 0 {
            return Err(UserError::Validation(INVALID_USER_ID));
        }

        self.find_existing(id).await?;

        match self.repository.delete(id).await {
            Ok(deleted) => {
                if !deleted {
                    tracing::debug!(user_id = id, "user vanished before delete");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to delete user");
                Err(UserError::NotFound(USER_NOT_FOUND))
            }
        }
    }

    async fn find_existing(&self, id: u32) -> UserResult<User> {
        match self.repository.get_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(UserError::NotFound(USER_NOT_FOUND)),
            Err(e) => {
                tracing::error!(error = %e, user_id = id, "user lookup failed");
                Err(UserError::NotFound(USER_NOT_FOUND))
            }
        }
    }

    /// Uniqueness pre-check. A failed lookup counts as "no match"; the
    /// storage constraint still guards the write.
    async fn find_by_email(&self, email: &str) -> Option<User> {
        match self.repository.get_by_email(email).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "email pre-check failed");
                None
            }
        }
    }
}
