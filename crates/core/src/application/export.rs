// CSV Export - pure transformation of a list into spreadsheet text

use crate::domain::Application;
use crate::error::{AppError, Result};
use chrono::DateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Suggested download name for the exported file
pub const EXPORT_FILENAME: &str = "internship_applications.csv";

pub const EXPORT_HEADERS: [&str; 5] = ["Company", "Role", "Status", "Date Applied", "Notes"];

/// Render `applications` as CSV, one line per record in the given order.
///
/// Every field is quote-wrapped (embedded quotes doubled), `date_applied` is
/// written as a UTC `YYYY-MM-DD` date and absent notes as an empty field.
pub fn export_csv(applications: &[Application]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS).map_err(csv_error)?;

    for app in applications {
        let date = format_date(app.date_applied)?;
        writer
            .write_record([
                app.company.as_str(),
                app.role.as_str(),
                app.status.as_str(),
                date.as_str(),
                app.notes.as_deref().unwrap_or(""),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

fn format_date(epoch_millis: i64) -> Result<String> {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| AppError::Export(format!("date_applied out of range: {}", epoch_millis)))
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::Export(err.to_string())
}
