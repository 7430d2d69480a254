//! Metadata record encodings
//!
//! Two wire forms exist for the same record:
//!
//! - **Sidecar CSV**: a header row `file_name,departments,semesters,tags` and one data row.
//!   List fields are joined with `,` inside their cell. Values themselves are not escaped,
//!   so a value that contains a comma does not survive a round trip.
//! - **Attributes**: a flat map with the same four keys, lists joined the same way.

use std::collections::BTreeMap;

use crate::error::{CatalogError, Result};
use crate::types::MetadataRecord;

/// Flat string attributes attached to a stored object
pub type Attributes = BTreeMap<String, String>;

pub const FILE_NAME_KEY: &str = "file_name";
pub const DEPARTMENTS_KEY: &str = "departments";
pub const SEMESTERS_KEY: &str = "semesters";
pub const TAGS_KEY: &str = "tags";

/// Field order of both encodings
pub const RECORD_FIELDS: [&str; 4] = [FILE_NAME_KEY, DEPARTMENTS_KEY, SEMESTERS_KEY, TAGS_KEY];

const LIST_DELIMITER: char = ',';

/// Serialize a record as a sidecar CSV document
pub fn encode_csv(record: &MetadataRecord) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(RECORD_FIELDS)
        .map_err(|e| CatalogError::Encoding(e.to_string()))?;
    writer
        .write_record(record_cells(record))
        .map_err(|e| CatalogError::Encoding(e.to_string()))?;

    writer
        .into_inner()
        .map_err(|e| CatalogError::Encoding(e.to_string()))
}

/// Parse a sidecar CSV document
pub fn decode_csv(bytes: &[u8]) -> Result<MetadataRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut rows = reader.records();

    let header = rows
        .next()
        .ok_or_else(|| CatalogError::MalformedRecord("record is empty".to_string()))??;
    if header.len() != RECORD_FIELDS.len() || header.iter().ne(RECORD_FIELDS) {
        return Err(CatalogError::MalformedRecord(format!(
            "unexpected header row: {}",
            header.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let row = rows
        .next()
        .ok_or_else(|| CatalogError::MalformedRecord("missing data row".to_string()))??;
    if row.len() != RECORD_FIELDS.len() {
        return Err(CatalogError::MalformedRecord(format!(
            "expected {} fields, found {}",
            RECORD_FIELDS.len(),
            row.len()
        )));
    }

    if rows.next().is_some() {
        return Err(CatalogError::MalformedRecord(
            "more than one data row".to_string(),
        ));
    }

    Ok(MetadataRecord::new(
        &row[0],
        split_list(&row[1]),
        split_list(&row[2]),
        split_list(&row[3]),
    ))
}

/// Serialize a record as object attributes
pub fn encode_attributes(record: &MetadataRecord) -> Attributes {
    RECORD_FIELDS
        .iter()
        .zip(record_cells(record))
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Parse object attributes; exactly the four record keys must be present
pub fn decode_attributes(attributes: &Attributes) -> Result<MetadataRecord> {
    if attributes.len() != RECORD_FIELDS.len() {
        return Err(CatalogError::MalformedRecord(format!(
            "expected {} attributes, found {}",
            RECORD_FIELDS.len(),
            attributes.len()
        )));
    }

    let field = |key: &str| {
        attributes
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::MalformedRecord(format!("missing attribute '{key}'")))
    };

    Ok(MetadataRecord::new(
        field(FILE_NAME_KEY)?,
        split_list(field(DEPARTMENTS_KEY)?),
        split_list(field(SEMESTERS_KEY)?),
        split_list(field(TAGS_KEY)?),
    ))
}

fn record_cells(record: &MetadataRecord) -> [String; 4] {
    [
        record.display_name.clone(),
        join_list(&record.departments),
        join_list(&record.semesters),
        join_list(&record.tags),
    ]
}

fn join_list(values: &[String]) -> String {
    values.join(&LIST_DELIMITER.to_string())
}

fn split_list(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(LIST_DELIMITER).map(str::to_string).collect()
}
