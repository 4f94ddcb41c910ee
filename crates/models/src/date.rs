use chrono::{Datelike, NaiveDate};

/// Month names used for localized report dates
const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Strict `YYYY-MM-DD` check. Date-range filters are only honored when both
/// bounds pass this; anything else (partial range, `01-02-2024`, garbage) is
/// silently ignored by the report queries rather than rejected.
pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Parses a strict `YYYY-MM-DD` string. Chrono alone is too lenient here
/// (it accepts unpadded components), so the shape is checked first.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        if i != 4 && i != 7 && !b.is_ascii_digit() {
            return None;
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Both bounds valid -> inclusive range, otherwise `None`.
pub fn parse_range(start: Option<&str>, end: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    match (start, end) {
        (Some(s), Some(e)) => Some((parse_date(s)?, parse_date(e)?)),
        _ => None,
    }
}

/// "2024-03-01" -> "1 Maret 2024"
pub fn format_tanggal_indo(tanggal: NaiveDate) -> String {
    format!(
        "{} {} {}",
        tanggal.day(),
        BULAN[tanggal.month0() as usize],
        tanggal.year()
    )
}

/// Number of calendar days covered by an inclusive range.
pub fn total_hari(range: Option<(NaiveDate, NaiveDate)>) -> i64 {
    match range {
        Some((start, end)) => (end - start).num_days().abs() + 1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_strict() {
        assert_eq!(
            parse_date("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        // unpadded forms chrono would otherwise accept
        assert_eq!(parse_date("2024-3-1"), None);
        assert_eq!(parse_date("2024-03-1"), None);
        assert_eq!(parse_date("01-03-2024"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-03-01T00:00"), None);
    }

    #[test]
    fn test_partial_range_is_ignored() {
        assert!(parse_range(Some("2024-03-01"), None).is_none());
        assert!(parse_range(None, Some("2024-03-31")).is_none());
        assert!(parse_range(Some("2024-03-01"), Some("not-a-date")).is_none());
        assert!(parse_range(Some("2024-03-01"), Some("2024-03-31")).is_some());
    }

    #[test]
    fn test_format_tanggal_indo() {
        let tanggal = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_tanggal_indo(tanggal), "1 Maret 2024");

        let tanggal = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_tanggal_indo(tanggal), "31 Desember 2025");
    }

    #[test]
    fn test_total_hari() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(total_hari(Some((start, end))), 7);
        assert_eq!(total_hari(Some((start, start))), 1);
        assert_eq!(total_hari(None), 0);
    }
}
