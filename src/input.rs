//! Common routines for reading tabular input data.
use anyhow::{Context, Result, ensure};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read a series of type Ts from a CSV file into a Vec<T>.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let reader = csv::Reader::from_path(file_path)
        .with_context(|| format!("Error reading {}", file_path.display()))?;
    read_csv_records(reader, &file_path.display().to_string())
}

/// Read a series of type Ts from an in-memory CSV document.
///
/// # Arguments
///
/// * `contents` - The raw CSV document
/// * `origin` - Where the document came from, for error messages
pub fn read_csv_from_slice<T: DeserializeOwned>(contents: &[u8], origin: &str) -> Result<Vec<T>> {
    read_csv_records(csv::Reader::from_reader(contents), origin)
}

fn read_csv_records<T: DeserializeOwned, R: Read>(
    mut reader: csv::Reader<R>,
    origin: &str,
) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.with_context(|| format!("Error reading {origin}"))?;
        records.push(record);
    }

    ensure!(!records.is_empty(), "{origin} contains no data rows");

    Ok(records)
}

/// Parse a TOML file into the specified type.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = fs::read_to_string(file_path)
        .with_context(|| format!("Error reading {}", file_path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Error parsing {}", file_path.display()))
}
