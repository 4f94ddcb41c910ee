use crate::status::{StatusGuru, StatusSiswa};
use serde::Serialize;

/// Per-status tallies for a recap. Totals are counts of rows that exist,
/// not calendar days in the range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub hadir: u32,
    pub sakit: u32,
    pub izin: u32,
    pub alpa: u32,
    pub terlambat: u32,
}

impl StatusCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_siswa(&mut self, status: StatusSiswa) {
        match status {
            StatusSiswa::Sakit => self.sakit += 1,
            StatusSiswa::Izin => self.izin += 1,
            StatusSiswa::Alpa => self.alpa += 1,
            StatusSiswa::Terlambat => self.terlambat += 1,
        }
    }

    pub fn add_guru(&mut self, status: StatusGuru) {
        match status {
            StatusGuru::Hadir => self.hadir += 1,
            StatusGuru::Sakit => self.sakit += 1,
            StatusGuru::Izin => self.izin += 1,
            StatusGuru::Alpa => self.alpa += 1,
            StatusGuru::Terlambat => self.terlambat += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.hadir + self.sakit + self.izin + self.alpa + self.terlambat
    }

    /// Attendance percentage, rounded to the nearest integer. An empty
    /// recap is 0%, never NaN.
    pub fn persentase_kehadiran(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.hadir) * 100.0 / f64::from(total)).round() as u32
    }
}

pub fn tally_siswa<I>(statuses: I) -> StatusCounts
where
    I: IntoIterator<Item = StatusSiswa>,
{
    let mut counts = StatusCounts::new();
    for status in statuses {
        counts.add_siswa(status);
    }
    counts
}

pub fn tally_guru<I>(statuses: I) -> StatusCounts
where
    I: IntoIterator<Item = StatusGuru>,
{
    let mut counts = StatusCounts::new();
    for status in statuses {
        counts.add_guru(status);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_recap_is_zero_percent() {
        let counts = StatusCounts::new();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.persentase_kehadiran(), 0);
    }

    #[test]
    fn test_tally_guru() {
        let counts = tally_guru([
            StatusGuru::Hadir,
            StatusGuru::Hadir,
            StatusGuru::Sakit,
            StatusGuru::Terlambat,
        ]);
        assert_eq!(counts.hadir, 2);
        assert_eq!(counts.sakit, 1);
        assert_eq!(counts.terlambat, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.persentase_kehadiran(), 50);
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        let counts = tally_guru([StatusGuru::Hadir, StatusGuru::Hadir, StatusGuru::Sakit]);
        // 2/3 = 66.67 -> 67
        assert_eq!(counts.persentase_kehadiran(), 67);
    }

    #[test]
    fn test_student_tally_has_no_presence() {
        let counts = tally_siswa([StatusSiswa::Sakit, StatusSiswa::Alpa]);
        assert_eq!(counts.hadir, 0);
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.persentase_kehadiran(), 0);
    }
}
