use crate::routes::{absensi, absensi_guru, guru, health, kelas, root, siswa};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        kelas::get_all_kelas,
        kelas::get_kelas_by_id,
        kelas::create_kelas,
        kelas::update_kelas,
        kelas::delete_kelas,
        siswa::get_all_siswa,
        siswa::get_siswa_by_kelas,
        siswa::get_siswa_by_id,
        siswa::create_siswa,
        siswa::create_siswa_batch,
        siswa::update_siswa,
        siswa::delete_siswa,
        guru::get_all_guru,
        guru::get_guru_by_id,
        guru::create_guru,
        guru::create_guru_batch,
        guru::update_guru,
        guru::delete_guru,
        absensi::input_absensi,
        absensi::input_absensi_batch,
        absensi::get_absensi_by_tanggal_kelas,
        absensi::get_rekap_absensi,
        absensi::get_rekap_absensi_kelas,
        absensi::download_rekap_excel,
        absensi::download_rekap_excel_all,
        absensi_guru::input_absensi_guru,
        absensi_guru::input_absensi_guru_batch,
        absensi_guru::get_absensi_guru_by_tanggal,
        absensi_guru::get_rekap_absensi_guru,
        absensi_guru::download_rekap_excel,
    ),
    tags(
        (name = "Kelas", description = "Class roster endpoints"),
        (name = "Siswa", description = "Student roster endpoints"),
        (name = "Guru", description = "Teacher roster endpoints"),
        (name = "Absensi", description = "Student attendance endpoints"),
        (name = "Absensi Guru", description = "Teacher attendance endpoints"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "API Absensi Sekolah",
        version = "1.0.0",
        description = "School attendance API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
