use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Attendance status for a student. Presence is the implicit default: a
/// student only gets a row when something other than plain presence happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum StatusSiswa {
    #[sea_orm(string_value = "sakit")]
    Sakit,
    #[sea_orm(string_value = "izin")]
    Izin,
    #[sea_orm(string_value = "alpa")]
    Alpa,
    #[sea_orm(string_value = "terlambat")]
    Terlambat,
}

/// Attendance status for a teacher. Unlike students, teachers are marked
/// every day, so `hadir` is an explicit value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum StatusGuru {
    #[sea_orm(string_value = "hadir")]
    Hadir,
    #[sea_orm(string_value = "sakit")]
    Sakit,
    #[sea_orm(string_value = "izin")]
    Izin,
    #[sea_orm(string_value = "alpa")]
    Alpa,
    #[sea_orm(string_value = "terlambat")]
    Terlambat,
}

impl StatusSiswa {
    /// Human-readable label for reports and exports.
    pub fn label(self) -> &'static str {
        match self {
            StatusSiswa::Sakit => "Sakit",
            StatusSiswa::Izin => "Izin",
            StatusSiswa::Alpa => "Alpa",
            StatusSiswa::Terlambat => "Terlambat",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusSiswa::Sakit => "sakit",
            StatusSiswa::Izin => "izin",
            StatusSiswa::Alpa => "alpa",
            StatusSiswa::Terlambat => "terlambat",
        }
    }
}

impl StatusGuru {
    pub fn label(self) -> &'static str {
        match self {
            StatusGuru::Hadir => "Hadir",
            StatusGuru::Sakit => "Sakit",
            StatusGuru::Izin => "Izin",
            StatusGuru::Alpa => "Alpa",
            StatusGuru::Terlambat => "Terlambat",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusGuru::Hadir => "hadir",
            StatusGuru::Sakit => "sakit",
            StatusGuru::Izin => "izin",
            StatusGuru::Alpa => "alpa",
            StatusGuru::Terlambat => "terlambat",
        }
    }
}

impl FromStr for StatusSiswa {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sakit" => Ok(StatusSiswa::Sakit),
            "izin" => Ok(StatusSiswa::Izin),
            "alpa" => Ok(StatusSiswa::Alpa),
            "terlambat" => Ok(StatusSiswa::Terlambat),
            _ => Err(()),
        }
    }
}

impl FromStr for StatusGuru {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hadir" => Ok(StatusGuru::Hadir),
            "sakit" => Ok(StatusGuru::Sakit),
            "izin" => Ok(StatusGuru::Izin),
            "alpa" => Ok(StatusGuru::Alpa),
            "terlambat" => Ok(StatusGuru::Terlambat),
            _ => Err(()),
        }
    }
}

impl Display for StatusSiswa {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl Display for StatusGuru {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_siswa() {
        assert_eq!(StatusSiswa::from_str("sakit"), Ok(StatusSiswa::Sakit));
        assert_eq!(StatusSiswa::from_str("terlambat"), Ok(StatusSiswa::Terlambat));
    }

    #[test]
    fn test_hadir_is_not_a_student_status() {
        // Students have no explicit presence value
        assert!(StatusSiswa::from_str("hadir").is_err());
        assert_eq!(StatusGuru::from_str("hadir"), Ok(StatusGuru::Hadir));
    }

    #[test]
    fn test_parse_rejects_unknown_and_cased_values() {
        assert!(StatusSiswa::from_str("Sakit").is_err());
        assert!(StatusSiswa::from_str("").is_err());
        assert!(StatusGuru::from_str("absent").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(StatusSiswa::Alpa.label(), "Alpa");
        assert_eq!(StatusGuru::Hadir.label(), "Hadir");
        assert_eq!(StatusGuru::Izin.to_string(), "izin");
    }
}
