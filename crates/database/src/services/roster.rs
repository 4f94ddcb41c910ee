use crate::entities::{guru, kelas, siswa};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::{HashMap, HashSet};

pub struct RosterService;

impl RosterService {
    /// All classes, name ascending, each with its student count.
    pub async fn get_all_kelas(
        db: &DatabaseConnection,
    ) -> Result<Vec<(kelas::Model, i64)>, DbErr> {
        let all_kelas = kelas::Entity::find()
            .order_by_asc(kelas::Column::NamaKelas)
            .all(db)
            .await?;

        let counts: Vec<(i32, i64)> = siswa::Entity::find()
            .select_only()
            .column(siswa::Column::KelasId)
            .column_as(siswa::Column::Id.count(), "jumlah")
            .group_by(siswa::Column::KelasId)
            .into_tuple()
            .all(db)
            .await?;
        let counts: HashMap<i32, i64> = counts.into_iter().collect();

        Ok(all_kelas
            .into_iter()
            .map(|k| {
                let jumlah = counts.get(&k.id).copied().unwrap_or(0);
                (k, jumlah)
            })
            .collect())
    }

    pub async fn get_kelas(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<kelas::Model>, DbErr> {
        kelas::Entity::find_by_id(id).one(db).await
    }

    /// Class names keyed by id, for export sheets.
    pub async fn kelas_name_map(db: &DatabaseConnection) -> Result<HashMap<i32, String>, DbErr> {
        let rows: Vec<(i32, String)> = kelas::Entity::find()
            .select_only()
            .column(kelas::Column::Id)
            .column(kelas::Column::NamaKelas)
            .into_tuple()
            .all(db)
            .await?;
        Ok(rows.into_iter().collect())
    }

    pub async fn create_kelas(
        db: &DatabaseConnection,
        nama_kelas: String,
    ) -> Result<kelas::Model, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        kelas::ActiveModel {
            nama_kelas: Set(nama_kelas),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn update_kelas(
        db: &DatabaseConnection,
        model: kelas::Model,
        nama_kelas: String,
    ) -> Result<kelas::Model, DbErr> {
        let mut active: kelas::ActiveModel = model.into();
        active.nama_kelas = Set(nama_kelas);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(db).await
    }

    pub async fn delete_kelas(db: &DatabaseConnection, model: kelas::Model) -> Result<(), DbErr> {
        kelas::Entity::delete_by_id(model.id).exec(db).await?;
        Ok(())
    }

    /// All students, name ascending, each with its class.
    pub async fn get_all_siswa(
        db: &DatabaseConnection,
    ) -> Result<Vec<(siswa::Model, Option<kelas::Model>)>, DbErr> {
        siswa::Entity::find()
            .find_also_related(kelas::Entity)
            .order_by_asc(siswa::Column::Nama)
            .all(db)
            .await
    }

    pub async fn get_siswa_by_kelas(
        db: &DatabaseConnection,
        kelas_id: i32,
    ) -> Result<Vec<(siswa::Model, Option<kelas::Model>)>, DbErr> {
        siswa::Entity::find()
            .find_also_related(kelas::Entity)
            .filter(siswa::Column::KelasId.eq(kelas_id))
            .order_by_asc(siswa::Column::Nama)
            .all(db)
            .await
    }

    pub async fn get_siswa(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<(siswa::Model, Option<kelas::Model>)>, DbErr> {
        siswa::Entity::find_by_id(id)
            .find_also_related(kelas::Entity)
            .one(db)
            .await
    }

    pub async fn create_siswa(
        db: &DatabaseConnection,
        nama: String,
        kelas_id: i32,
    ) -> Result<siswa::Model, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        siswa::ActiveModel {
            nama: Set(nama),
            kelas_id: Set(kelas_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Batch insert. Every referenced `kelas_id` is validated up front;
    /// one bad reference rejects the whole batch before anything is written.
    pub async fn create_siswa_batch(
        db: &DatabaseConnection,
        items: Vec<(String, i32)>,
    ) -> Result<Vec<siswa::Model>, DbErr> {
        let kelas_ids: HashSet<i32> = items.iter().map(|(_, id)| *id).collect();
        let found = kelas::Entity::find()
            .filter(kelas::Column::Id.is_in(kelas_ids.iter().copied()))
            .count(db)
            .await?;
        if found as usize != kelas_ids.len() {
            return Err(DbErr::Custom("Ada kelas_id yang tidak valid!".to_string()));
        }

        let now = chrono::Utc::now().naive_utc();
        let mut created = Vec::with_capacity(items.len());
        for (nama, kelas_id) in items {
            let model = siswa::ActiveModel {
                nama: Set(nama),
                kelas_id: Set(kelas_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
            created.push(model);
        }
        Ok(created)
    }

    pub async fn update_siswa(
        db: &DatabaseConnection,
        model: siswa::Model,
        nama: Option<String>,
        kelas_id: Option<i32>,
    ) -> Result<siswa::Model, DbErr> {
        let mut active: siswa::ActiveModel = model.into();
        if let Some(nama) = nama {
            active.nama = Set(nama);
        }
        if let Some(kelas_id) = kelas_id {
            active.kelas_id = Set(kelas_id);
        }
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(db).await
    }

    pub async fn delete_siswa(db: &DatabaseConnection, model: siswa::Model) -> Result<(), DbErr> {
        siswa::Entity::delete_by_id(model.id).exec(db).await?;
        Ok(())
    }

    pub async fn get_all_guru(db: &DatabaseConnection) -> Result<Vec<guru::Model>, DbErr> {
        guru::Entity::find()
            .order_by_asc(guru::Column::Nama)
            .all(db)
            .await
    }

    pub async fn get_guru(db: &DatabaseConnection, id: i32) -> Result<Option<guru::Model>, DbErr> {
        guru::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_guru_by_nama(
        db: &DatabaseConnection,
        nama: &str,
    ) -> Result<Option<guru::Model>, DbErr> {
        guru::Entity::find()
            .filter(guru::Column::Nama.eq(nama))
            .one(db)
            .await
    }

    pub async fn create_guru(db: &DatabaseConnection, nama: String) -> Result<guru::Model, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        guru::ActiveModel {
            nama: Set(nama),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn update_guru(
        db: &DatabaseConnection,
        model: guru::Model,
        nama: String,
    ) -> Result<guru::Model, DbErr> {
        let mut active: guru::ActiveModel = model.into();
        active.nama = Set(nama);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(db).await
    }

    pub async fn delete_guru(db: &DatabaseConnection, model: guru::Model) -> Result<(), DbErr> {
        guru::Entity::delete_by_id(model.id).exec(db).await?;
        Ok(())
    }
}
