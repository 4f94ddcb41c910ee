use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create kelas table
        manager
            .create_table(
                Table::create()
                    .table(Kelas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Kelas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Kelas::NamaKelas)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Kelas::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Kelas::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create siswa table
        manager
            .create_table(
                Table::create()
                    .table(Siswa::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Siswa::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Siswa::Nama).string_len(100).not_null())
                    .col(ColumnDef::new(Siswa::KelasId).integer().not_null())
                    .col(ColumnDef::new(Siswa::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Siswa::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-siswa-kelas_id")
                            .from(Siswa::Table, Siswa::KelasId)
                            .to(Kelas::Table, Kelas::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create guru table
        manager
            .create_table(
                Table::create()
                    .table(Guru::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guru::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guru::Nama).string_len(100).not_null())
                    .col(ColumnDef::new(Guru::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Guru::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create absensi table
        manager
            .create_table(
                Table::create()
                    .table(Absensi::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Absensi::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Absensi::SiswaId).integer().not_null())
                    .col(ColumnDef::new(Absensi::Tanggal).date().not_null())
                    .col(ColumnDef::new(Absensi::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Absensi::Keterangan).string_len(255))
                    .col(ColumnDef::new(Absensi::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Absensi::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-absensi-siswa_id")
                            .from(Absensi::Table, Absensi::SiswaId)
                            .to(Siswa::Table, Siswa::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create absensi_guru table
        manager
            .create_table(
                Table::create()
                    .table(AbsensiGuru::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AbsensiGuru::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AbsensiGuru::GuruId).integer().not_null())
                    .col(ColumnDef::new(AbsensiGuru::Tanggal).date().not_null())
                    .col(
                        ColumnDef::new(AbsensiGuru::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AbsensiGuru::Keterangan).string_len(255))
                    .col(ColumnDef::new(AbsensiGuru::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(AbsensiGuru::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-absensi_guru-guru_id")
                            .from(AbsensiGuru::Table, AbsensiGuru::GuruId)
                            .to(Guru::Table, Guru::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AbsensiGuru::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Absensi::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Guru::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Siswa::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Kelas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Kelas {
    Table,
    Id,
    NamaKelas,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Siswa {
    Table,
    Id,
    Nama,
    KelasId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Guru {
    Table,
    Id,
    Nama,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Absensi {
    Table,
    Id,
    SiswaId,
    Tanggal,
    Status,
    Keterangan,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum AbsensiGuru {
    Table,
    Id,
    GuruId,
    Tanggal,
    Status,
    Keterangan,
    CreatedAt,
    UpdatedAt,
}
