pub mod content;
pub mod get;
pub mod list;

pub use content::{DocumentContent, GetContentError, GetContentQuery};
pub use get::{GetMetadataError, GetMetadataQuery};
pub use list::{DocumentEntry, ListDocumentsError, ListDocumentsQuery, ListDocumentsResponse};
