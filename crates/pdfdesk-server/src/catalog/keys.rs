//! Object key layout
//!
//! ```text
//! <prefix><name>.pdf   document content
//! <prefix><name>.csv   sidecar metadata (sidecar mode only)
//! ```

use pdfdesk_common::{CatalogError, Result};

pub const DOCUMENT_EXTENSION: &str = ".pdf";
pub const SIDECAR_EXTENSION: &str = ".csv";

/// Default key prefix for documents
pub const DEFAULT_PREFIX: &str = "documents/";

/// Longest name accepted for the `<name>` part of a key
pub const MAX_NAME_LENGTH: usize = 255;

pub fn document_key(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}{DOCUMENT_EXTENSION}")
}

pub fn is_document_key(prefix: &str, key: &str) -> bool {
    key.starts_with(prefix) && key.len() > prefix.len() + DOCUMENT_EXTENSION.len() && key.ends_with(DOCUMENT_EXTENSION)
}

/// Route name of a document key: the key without the prefix and the trailing `.pdf`
///
/// Inverse of [`document_key`], so nested keys keep their directory segments.
pub fn document_name<'a>(prefix: &str, key: &'a str) -> &'a str {
    let name = key.strip_prefix(prefix).unwrap_or(key);
    name.strip_suffix(DOCUMENT_EXTENSION).unwrap_or(name)
}

/// Sidecar key for a document: the trailing `.pdf` becomes `.csv`
pub fn sidecar_key(document_key: &str) -> String {
    let stem = document_key
        .strip_suffix(DOCUMENT_EXTENSION)
        .unwrap_or(document_key);
    format!("{stem}{SIDECAR_EXTENSION}")
}

/// File name without directories or the `.pdf` extension
///
/// Used as the default display name. Accepts both keys and uploaded file names, which
/// some browsers send with a client-side path.
pub fn file_stem(path: &str) -> &str {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    strip_pdf_extension(base)
}

/// Whether an uploaded file name carries the PDF extension, in any case
pub fn has_pdf_extension(file_name: &str) -> bool {
    file_name.len() > DOCUMENT_EXTENSION.len()
        && file_name
            .get(file_name.len() - DOCUMENT_EXTENSION.len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// Turn a display name into the `<name>` part of a key.
///
/// Path separators become `-`, control characters are dropped and a trailing `.pdf`
/// is removed so the key never ends in `.pdf.pdf`.
pub fn safe_name(display_name: &str) -> Result<String> {
    let cleaned: String = strip_pdf_extension(display_name.trim())
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    let cleaned = cleaned.trim().to_string();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(CatalogError::InvalidName(format!(
            "'{display_name}' does not yield a usable document name"
        )));
    }
    if cleaned.len() > MAX_NAME_LENGTH {
        return Err(CatalogError::InvalidName(format!(
            "document name must not exceed {MAX_NAME_LENGTH} bytes"
        )));
    }
    Ok(cleaned)
}

fn strip_pdf_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(DOCUMENT_EXTENSION.len());
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION) => &name[..split],
        _ => name,
    }
}
