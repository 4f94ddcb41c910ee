use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "siswa")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nama: String,
    pub kelas_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kelas::Entity",
        from = "Column::KelasId",
        to = "super::kelas::Column::Id"
    )]
    Kelas,
    #[sea_orm(has_many = "super::absensi::Entity")]
    Absensi,
}

impl Related<super::kelas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kelas.def()
    }
}

impl Related<super::absensi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Absensi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
