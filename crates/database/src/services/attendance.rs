use crate::entities::{absensi, absensi_guru, guru, siswa};
use chrono::NaiveDate;
use models::status::{StatusGuru, StatusSiswa};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, sea_query::OnConflict,
};

/// Attendance recording and report queries for both rosters.
///
/// The write path is an atomic insert-or-update on the composite unique key
/// (subject, tanggal), so concurrent submissions for the same day cannot
/// produce duplicates or a duplicate-key error. The pre-read only decides
/// whether the caller should say "disimpan" or "diupdate".
pub struct AttendanceService;

impl AttendanceService {
    pub async fn siswa_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        Ok(siswa::Entity::find_by_id(id).one(db).await?.is_some())
    }

    pub async fn guru_exists(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        Ok(guru::Entity::find_by_id(id).one(db).await?.is_some())
    }

    pub async fn upsert_absensi(
        db: &DatabaseConnection,
        siswa_id: i32,
        tanggal: NaiveDate,
        status: StatusSiswa,
        keterangan: Option<String>,
    ) -> Result<(absensi::Model, bool), DbErr> {
        let existing = absensi::Entity::find()
            .filter(absensi::Column::SiswaId.eq(siswa_id))
            .filter(absensi::Column::Tanggal.eq(tanggal))
            .one(db)
            .await?;
        let created = existing.is_none();

        let now = chrono::Utc::now().naive_utc();
        let row = absensi::ActiveModel {
            siswa_id: Set(siswa_id),
            tanggal: Set(tanggal),
            status: Set(status),
            keterangan: Set(keterangan),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        absensi::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([absensi::Column::SiswaId, absensi::Column::Tanggal])
                    .update_columns([
                        absensi::Column::Status,
                        absensi::Column::Keterangan,
                        absensi::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(db)
            .await?;

        let stored = absensi::Entity::find()
            .filter(absensi::Column::SiswaId.eq(siswa_id))
            .filter(absensi::Column::Tanggal.eq(tanggal))
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("absensi hilang setelah upsert".to_string()))?;

        Ok((stored, created))
    }

    pub async fn upsert_absensi_guru(
        db: &DatabaseConnection,
        guru_id: i32,
        tanggal: NaiveDate,
        status: StatusGuru,
        keterangan: Option<String>,
    ) -> Result<(absensi_guru::Model, bool), DbErr> {
        let existing = absensi_guru::Entity::find()
            .filter(absensi_guru::Column::GuruId.eq(guru_id))
            .filter(absensi_guru::Column::Tanggal.eq(tanggal))
            .one(db)
            .await?;
        let created = existing.is_none();

        let now = chrono::Utc::now().naive_utc();
        let row = absensi_guru::ActiveModel {
            guru_id: Set(guru_id),
            tanggal: Set(tanggal),
            status: Set(status),
            keterangan: Set(keterangan),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        absensi_guru::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    absensi_guru::Column::GuruId,
                    absensi_guru::Column::Tanggal,
                ])
                .update_columns([
                    absensi_guru::Column::Status,
                    absensi_guru::Column::Keterangan,
                    absensi_guru::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(db)
            .await?;

        let stored = absensi_guru::Entity::find()
            .filter(absensi_guru::Column::GuruId.eq(guru_id))
            .filter(absensi_guru::Column::Tanggal.eq(tanggal))
            .one(db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound("absensi guru hilang setelah upsert".to_string())
            })?;

        Ok((stored, created))
    }

    /// One day of one class, student name ascending.
    pub async fn absensi_by_tanggal_kelas(
        db: &DatabaseConnection,
        tanggal: NaiveDate,
        kelas_id: i32,
    ) -> Result<Vec<(absensi::Model, Option<siswa::Model>)>, DbErr> {
        absensi::Entity::find()
            .find_also_related(siswa::Entity)
            .filter(absensi::Column::Tanggal.eq(tanggal))
            .filter(siswa::Column::KelasId.eq(kelas_id))
            .order_by_asc(siswa::Column::Nama)
            .all(db)
            .await
    }

    /// Recap rows, newest first. Filters are all optional; `kelas_id`
    /// filters through the joined student.
    pub async fn rekap_absensi(
        db: &DatabaseConnection,
        siswa_id: Option<i32>,
        kelas_id: Option<i32>,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<(absensi::Model, Option<siswa::Model>)>, DbErr> {
        let mut condition = Condition::all();
        if let Some(id) = siswa_id {
            condition = condition.add(absensi::Column::SiswaId.eq(id));
        }
        if let Some(id) = kelas_id {
            condition = condition.add(siswa::Column::KelasId.eq(id));
        }
        if let Some((start, end)) = range {
            condition = condition.add(absensi::Column::Tanggal.between(start, end));
        }

        absensi::Entity::find()
            .find_also_related(siswa::Entity)
            .filter(condition)
            .order_by_desc(absensi::Column::Tanggal)
            .all(db)
            .await
    }

    /// Rows for the export sheets: date ascending, then student name.
    pub async fn export_rows(
        db: &DatabaseConnection,
        kelas_id: Option<i32>,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<(absensi::Model, Option<siswa::Model>)>, DbErr> {
        let mut condition = Condition::all();
        if let Some(id) = kelas_id {
            condition = condition.add(siswa::Column::KelasId.eq(id));
        }
        if let Some((start, end)) = range {
            condition = condition.add(absensi::Column::Tanggal.between(start, end));
        }

        absensi::Entity::find()
            .find_also_related(siswa::Entity)
            .filter(condition)
            .order_by_asc(absensi::Column::Tanggal)
            .order_by_asc(siswa::Column::Nama)
            .all(db)
            .await
    }

    /// One day of the teacher roster, teacher name ascending.
    pub async fn absensi_guru_by_tanggal(
        db: &DatabaseConnection,
        tanggal: NaiveDate,
    ) -> Result<Vec<(absensi_guru::Model, Option<guru::Model>)>, DbErr> {
        absensi_guru::Entity::find()
            .find_also_related(guru::Entity)
            .filter(absensi_guru::Column::Tanggal.eq(tanggal))
            .order_by_asc(guru::Column::Nama)
            .all(db)
            .await
    }

    /// Teacher recap rows, newest first. Also feeds the teacher export.
    pub async fn rekap_absensi_guru(
        db: &DatabaseConnection,
        guru_id: Option<i32>,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<(absensi_guru::Model, Option<guru::Model>)>, DbErr> {
        let mut condition = Condition::all();
        if let Some(id) = guru_id {
            condition = condition.add(absensi_guru::Column::GuruId.eq(id));
        }
        if let Some((start, end)) = range {
            condition = condition.add(absensi_guru::Column::Tanggal.between(start, end));
        }

        absensi_guru::Entity::find()
            .find_also_related(guru::Entity)
            .filter(condition)
            .order_by_desc(absensi_guru::Column::Tanggal)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn stored_row(siswa_id: i32, tanggal: NaiveDate, status: StatusSiswa) -> absensi::Model {
        let now = chrono::Utc::now().naive_utc();
        absensi::Model {
            id: 1,
            siswa_id,
            tanggal,
            status,
            keterangan: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_first_submission_reports_created() {
        let tanggal = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let stored = stored_row(7, tanggal, StatusSiswa::Sakit);
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<absensi::Model>::new(), vec![stored.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection();

        let (row, created) =
            AttendanceService::upsert_absensi(&db, 7, tanggal, StatusSiswa::Sakit, None)
                .await
                .unwrap();
        assert!(created);
        assert_eq!(row, stored);
    }

    #[tokio::test]
    async fn test_resubmission_overwrites_in_place() {
        let tanggal = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let old = stored_row(7, tanggal, StatusSiswa::Sakit);
        let updated = stored_row(7, tanggal, StatusSiswa::Izin);
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![old], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 2,
            }])
            .into_connection();

        let (row, created) =
            AttendanceService::upsert_absensi(&db, 7, tanggal, StatusSiswa::Izin, None)
                .await
                .unwrap();
        assert!(!created);
        assert_eq!(row.status, StatusSiswa::Izin);

        // pre-read, conditional insert, re-fetch; the write itself carries
        // the duplicate-key clause instead of a second UPDATE statement
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 3);
        assert!(format!("{:?}", log[1]).contains("ON DUPLICATE KEY UPDATE"));
    }
}
