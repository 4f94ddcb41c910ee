pub mod absensi;
pub mod absensi_guru;
pub mod guru;
pub mod kelas;
pub mod response;
pub mod siswa;
