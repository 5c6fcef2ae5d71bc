use std::fs::File;
use std::io::{self, Write};

use super::types::ProfileRecord;

const CSV_HEADERS: [&str; 4] = ["title", "url", "subtitle", "connection_status"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataFormat {
    Text,
    Json,
    Csv,
}

/// Output file extension wins over the configured format.
pub fn detect_data_format(path: &str, fallback: DataFormat) -> DataFormat {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".json") {
        DataFormat::Json
    } else if lower.ends_with(".csv") {
        DataFormat::Csv
    } else {
        fallback
    }
}

pub fn write_record<W: Write>(
    mut writer: W,
    record: &ProfileRecord,
    format: DataFormat,
) -> io::Result<()> {
    match format {
        DataFormat::Text => write!(writer, "{record}")?,
        DataFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, record).map_err(io::Error::other)?;
            writer.write_all(b"\n")?;
        }
        DataFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            csv_writer.write_record(CSV_HEADERS)?;
            for link in &record.links {
                csv_writer.write_record([
                    link.title.as_str(),
                    link.url.as_str(),
                    link.subtitle.as_deref().unwrap_or_default(),
                    link.connection_status.as_deref().unwrap_or_default(),
                ])?;
            }
            csv_writer.flush()?;
        }
    }
    writer.flush()
}

/// Writes to the given file, or stdout when no path is set.
pub fn emit_record(
    output_path: Option<&str>,
    record: &ProfileRecord,
    format: DataFormat,
) -> io::Result<()> {
    match output_path {
        Some(path) => {
            let format = detect_data_format(path, format);
            write_record(File::create(path)?, record, format)
        }
        None => write_record(io::stdout().lock(), record, format),
    }
}
