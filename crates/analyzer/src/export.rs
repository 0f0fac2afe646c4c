use crate::error::AnalyzerError;
use analytics::ResultRow;
use std::io;
use std::path::Path;

/// Column headings of the results export, in order.
pub const CSV_HEADER: [&str; 4] = ["Roll No", "Name", "Class", "GPA"];

/// Writes `rows` as CSV to `path`, replacing whatever was there.
///
/// Missing parent directories are created. Values containing commas or quotes are
/// quoted; everything else is written bare. Returns the number of data rows written.
pub fn write_csv(rows: &[ResultRow], path: &Path) -> Result<usize, AnalyzerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    write_rows(&mut writer, rows)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Results exported.");
    Ok(rows.len())
}

/// Writes the header and one record per row to any CSV sink.
pub fn write_rows<W: io::Write>(
    writer: &mut csv::Writer<W>,
    rows: &[ResultRow],
) -> Result<(), csv::Error> {
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        let gpa = row.gpa.to_string();
        writer.write_record([row.roll_no.as_str(), row.name.as_str(), row.class_label(), gpa.as_str()])?;
    }
    Ok(())
}
