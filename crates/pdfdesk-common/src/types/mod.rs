//! Common types used across pdfdesk

use serde::{Deserialize, Serialize};

/// UI-only selector meaning "every member of this field's enumeration"
pub const CATCH_ALL: &str = "All";

/// Topic tags, in display order
pub const TAGS: [&str; 8] = [
    "Textbook",
    "Lecture Notes",
    "Research Paper",
    "Policy",
    "Announcement",
    "Notice",
    "Rulebook",
    "Other",
];

/// Departments, in display order
pub const DEPARTMENTS: [&str; 8] = [
    "Department of Computer Science",
    "Department of Mechanical Engineering",
    "Department of Electrical Engineering",
    "Department of Civil Engineering",
    "Department of Mathematics",
    "Department of Physics",
    "Department of Chemistry",
    "Department of Humanities",
];

/// Semesters, in display order
pub const SEMESTERS: [&str; 9] = ["S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8", "Supply"];

/// A multi-valued metadata field backed by a fixed enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Departments,
    Semesters,
    Tags,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Departments, Field::Semesters, Field::Tags];

    /// Canonical members of the field, in display order
    pub fn members(self) -> &'static [&'static str] {
        match self {
            Field::Departments => &DEPARTMENTS,
            Field::Semesters => &SEMESTERS,
            Field::Tags => &TAGS,
        }
    }

    /// Whether the "All" selector is offered for this field
    pub fn accepts_catch_all(self) -> bool {
        !matches!(self, Field::Tags)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Departments => "departments",
            Field::Semesters => "semesters",
            Field::Tags => "tags",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata persisted alongside every stored document
///
/// List fields behave as sets: duplicates collapse on construction while the order of
/// first appearance is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub display_name: String,
    pub departments: Vec<String>,
    pub semesters: Vec<String>,
    pub tags: Vec<String>,
}

impl MetadataRecord {
    pub fn new(
        display_name: impl Into<String>,
        departments: Vec<String>,
        semesters: Vec<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            departments: dedup(departments),
            semesters: dedup(semesters),
            tags: dedup(tags),
        }
    }

    /// Record with only a display name, as shown for a document without metadata
    pub fn with_name(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }
}

/// Raw form input for a document's metadata, before "All" expansion and validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataInput {
    pub display_name: Option<String>,
    pub departments: Vec<String>,
    pub semesters: Vec<String>,
    pub tags: Vec<String>,
}

pub(crate) fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
