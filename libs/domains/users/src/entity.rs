use sea_orm::entity::prelude::*;

use crate::error::StorageError;
use crate::models::User;

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = StorageError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = u32::try_from(model.id)
            .map_err(|_| StorageError::Backend(format!("negative user id {}", model.id)))?;

        Ok(Self {
            id,
            name: model.name,
            email: model.email,
            age: model.age,
        })
    }
}

/// Maps a public id onto the SERIAL column. Ids past `i32::MAX` cannot exist.
pub fn column_id(id: u32) -> Option<i32> {
    i32::try_from(id).ok()
}
