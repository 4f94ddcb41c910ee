use models::status::StatusSiswa;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One attendance row per student per day, enforced by a composite unique
/// index on (`siswa_id`, `tanggal`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "absensi")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub siswa_id: i32,
    pub tanggal: Date,
    pub status: StatusSiswa,
    pub keterangan: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::siswa::Entity",
        from = "Column::SiswaId",
        to = "super::siswa::Column::Id"
    )]
    Siswa,
}

impl Related<super::siswa::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Siswa.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
