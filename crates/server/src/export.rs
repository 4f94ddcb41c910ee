use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use models::{date::format_tanggal_indo, rekap::StatusCounts};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One data row of the student recap sheet
pub struct SiswaSheetRow {
    pub tanggal: NaiveDate,
    pub kelas: String,
    pub nama: String,
    pub status: String,
}

/// One data row of the teacher recap sheet
pub struct GuruSheetRow {
    pub tanggal: NaiveDate,
    pub nama_guru: String,
    pub status: String,
    pub keterangan: String,
}

/// Student recap: header plus one row per attendance entry. An empty row
/// set still yields a valid workbook with just the header.
pub fn rekap_siswa_sheet(rows: &[SiswaSheetRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Rekap Absensi")?;

    let bold = Format::new().set_bold();
    let headers = ["No", "Tanggal", "Kelas", "Nama", "Status"];
    for (col, title) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }
    worksheet.set_column_width(1, 18)?;
    worksheet.set_column_width(3, 30)?;

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, (i + 1) as f64)?;
        worksheet.write_string(r, 1, format_tanggal_indo(row.tanggal))?;
        worksheet.write_string(r, 2, row.kelas.as_str())?;
        worksheet.write_string(r, 3, row.nama.as_str())?;
        worksheet.write_string(r, 4, row.status.as_str())?;
    }

    workbook.save_to_buffer()
}

/// Teacher recap: data rows followed by a RINGKASAN block with the day
/// count of the requested range and per-status totals.
pub fn rekap_guru_sheet(
    rows: &[GuruSheetRow],
    counts: StatusCounts,
    total_hari: i64,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Rekap Absensi Guru")?;

    let bold = Format::new().set_bold();
    let headers = ["No", "Tanggal", "Nama Guru", "Status", "Keterangan"];
    for (col, title) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }
    worksheet.set_column_width(0, 5)?;
    worksheet.set_column_width(1, 15)?;
    worksheet.set_column_width(2, 30)?;
    worksheet.set_column_width(3, 15)?;
    worksheet.set_column_width(4, 30)?;

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, (i + 1) as f64)?;
        worksheet.write_string(r, 1, row.tanggal.to_string())?;
        worksheet.write_string(r, 2, row.nama_guru.as_str())?;
        worksheet.write_string(r, 3, row.status.as_str())?;
        worksheet.write_string(r, 4, row.keterangan.as_str())?;
    }

    // summary block, one blank row below the data
    let mut r = rows.len() as u32 + 2;
    worksheet.write_string_with_format(r, 1, "RINGKASAN:", &bold)?;
    let summary = [
        ("Total Hari:", total_hari as f64),
        ("Total Hadir:", f64::from(counts.hadir)),
        ("Total Sakit:", f64::from(counts.sakit)),
        ("Total Izin:", f64::from(counts.izin)),
        ("Total Alpa:", f64::from(counts.alpa)),
        ("Total Terlambat:", f64::from(counts.terlambat)),
    ];
    for (label, value) in summary {
        r += 1;
        worksheet.write_string_with_format(r, 1, label, &bold)?;
        worksheet.write_number_with_format(r, 2, value, &bold)?;
    }

    workbook.save_to_buffer()
}

/// Wraps workbook bytes in an attachment response.
pub fn xlsx_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_row_set_still_yields_a_workbook() {
        let bytes = rekap_siswa_sheet(&[]).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_siswa_sheet_with_rows() {
        let rows = vec![SiswaSheetRow {
            tanggal: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            kelas: "VII A".to_string(),
            nama: "Budi".to_string(),
            status: "Sakit".to_string(),
        }];
        let bytes = rekap_siswa_sheet(&rows).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_guru_sheet_summary_block() {
        let rows = vec![GuruSheetRow {
            tanggal: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            nama_guru: "Pak Ahmad".to_string(),
            status: "Hadir".to_string(),
            keterangan: "-".to_string(),
        }];
        let mut counts = StatusCounts::new();
        counts.hadir = 1;
        let bytes = rekap_guru_sheet(&rows, counts, 5).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
