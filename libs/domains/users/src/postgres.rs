use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    entity::{self, column_id},
    error::{StorageError, StorageResult},
    models::{NewUser, User},
    repository::UserRepository,
};

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR NOT NULL,
    email VARCHAR NOT NULL,
    age INTEGER NOT NULL,
    CONSTRAINT users_email_key UNIQUE (email)
)
"#;

/// Creates the `users` table when it does not exist yet.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(CREATE_USERS_TABLE).await?;
    tracing::info!("users schema ready");
    Ok(())
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> StorageResult<User> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(user.name),
            email: Set(user.email),
            age: Set(user.age),
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = model.id, "Created user");
        model.try_into()
    }

    async fn get_by_id(&self, id: u32) -> StorageResult<Option<User>> {
        let Some(id) = column_id(id) else {
            return Ok(None);
        };

        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn get_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn get_all(&self) -> StorageResult<Vec<User>> {
        entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn update(&self, user: User) -> StorageResult<User> {
        let id = column_id(user.id)
            .ok_or_else(|| StorageError::Backend(format!("user {} does not exist", user.id)))?;

        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(user.name),
            email: Set(user.email),
            age: Set(user.age),
        };

        let model = active_model.update(&self.db).await?;

        tracing::info!(user_id = id, "Updated user");
        model.try_into()
    }

    async fn delete(&self, id: u32) -> StorageResult<bool> {
        let Some(id) = column_id(id) else {
            return Ok(false);
        };

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
