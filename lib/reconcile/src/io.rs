use crate::record::JsonRecord;
use crate::ReconcileError;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a JSON array of objects.
pub fn read_records(path: &Path) -> Result<Vec<JsonRecord>, ReconcileError> {
    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    let Value::Array(values) = value else {
        return Err(malformed(path, "expected a JSON array"));
    };
    let records = values
        .into_iter()
        .enumerate()
        .map(|(position, value)| match value {
            Value::Object(record) => Ok(record),
            _ => Err(malformed(path, format!("element {position} is not an object"))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), records = records.len(), "Read records");
    Ok(records)
}

/// Writes records as a pretty-printed JSON array.
///
/// The array is first written to a temporary file next to `path` which then replaces `path`, so
/// an interrupted run never leaves a truncated file behind.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ReconcileError> {
    let temporary = temporary_path(path);
    let result = write_to(&temporary, records)
        .and_then(|()| fs::rename(&temporary, path).map_err(ReconcileError::from));
    if result.is_err() && temporary.exists() {
        if let Err(error) = fs::remove_file(&temporary) {
            debug!(path = %temporary.display(), %error, "Could not remove temporary file");
        }
    }
    result?;
    debug!(path = %path.display(), records = records.len(), "Wrote records");
    Ok(())
}

fn write_to<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ReconcileError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn malformed(path: &Path, reason: impl Into<String>) -> ReconcileError {
    ReconcileError::MalformedInput {
        path: path.to_owned(),
        reason: reason.into(),
    }
}
