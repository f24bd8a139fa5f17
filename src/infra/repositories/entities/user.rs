//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserDetails};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            details: UserDetails {
                email: model.email,
                first_name: model.first_name,
                last_name: model.last_name,
                birth_date: model.birth_date,
                address: model.address,
                phone_number: model.phone_number,
            },
        }
    }
}
