use crate::m20250812_create_all_tables::{Absensi, AbsensiGuru};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One attendance row per student per day. The storage engine, not
        // application locking, enforces this under concurrent submissions.
        manager
            .create_index(
                Index::create()
                    .name("uq_absensi_siswa_tanggal")
                    .table(Absensi::Table)
                    .col(Absensi::SiswaId)
                    .col(Absensi::Tanggal)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_absensi_guru_guru_tanggal")
                    .table(AbsensiGuru::Table)
                    .col(AbsensiGuru::GuruId)
                    .col(AbsensiGuru::Tanggal)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_absensi_siswa_tanggal")
                    .table(Absensi::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_absensi_guru_guru_tanggal")
                    .table(AbsensiGuru::Table)
                    .to_owned(),
            )
            .await
    }
}
