use models::status::StatusGuru;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One attendance row per teacher per day, enforced by a composite unique
/// index on (`guru_id`, `tanggal`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "absensi_guru")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guru_id: i32,
    pub tanggal: Date,
    pub status: StatusGuru,
    pub keterangan: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guru::Entity",
        from = "Column::GuruId",
        to = "super::guru::Column::Id"
    )]
    Guru,
}

impl Related<super::guru::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guru.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
