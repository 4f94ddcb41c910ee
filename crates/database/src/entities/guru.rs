use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guru")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::absensi_guru::Entity")]
    AbsensiGuru,
}

impl Related<super::absensi_guru::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AbsensiGuru.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
