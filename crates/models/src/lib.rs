pub mod date;
pub mod rekap;
pub mod status;
