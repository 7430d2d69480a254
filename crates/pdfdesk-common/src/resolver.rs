//! Selection resolution
//!
//! Form selections arrive as free strings. Before anything is persisted they are checked
//! against the field's enumeration, and the "All" selector is replaced by the complete
//! enumeration so that a stored record never contains it.

use crate::error::{CatalogError, Result};
use crate::types::{dedup, Field, MetadataInput, MetadataRecord, CATCH_ALL};

/// Resolve a selection for one field.
///
/// "All" wins over any other token for fields that accept it and yields the members in
/// canonical order. Otherwise every token must be a member; duplicates collapse.
pub fn resolve(field: Field, selection: &[String]) -> Result<Vec<String>> {
    if field.accepts_catch_all() && selection.iter().any(|token| token == CATCH_ALL) {
        return Ok(field.members().iter().map(|m| m.to_string()).collect());
    }

    let members = field.members();
    if let Some(token) = selection.iter().find(|token| !members.contains(&token.as_str())) {
        return Err(CatalogError::InvalidSelection {
            field,
            token: token.clone(),
        });
    }

    Ok(dedup(selection.to_vec()))
}

/// Build a storable record from form input.
///
/// A blank display name falls back to `default_name`.
pub fn resolve_input(input: &MetadataInput, default_name: &str) -> Result<MetadataRecord> {
    let display_name = input
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(default_name);

    Ok(MetadataRecord::new(
        display_name,
        resolve(Field::Departments, &input.departments)?,
        resolve(Field::Semesters, &input.semesters)?,
        resolve(Field::Tags, &input.tags)?,
    ))
}
