//! Record catalog abstraction
//!
//! The sweep never looks at records directly. It asks a [`Catalog`] which
//! record types belong to a domain, which of their fields hold file
//! references, and for the raw values of those fields.

use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Semantic type of a record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    File,
    Image,
    Other(String),
}

impl FieldKind {
    /// Parse a kind tag as stored in the catalog
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "image" => Self::Image,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// Whether values of this field name files under the media base
    pub fn is_file_reference(&self) -> bool {
        matches!(self, Self::File | Self::Image)
    }
}

/// A registered record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordType {
    pub domain: String,
    pub name: String,
}

impl RecordType {
    pub fn new(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.name)
    }
}

/// A field of a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

/// Metadata collaborator consumed by the reference collector
pub trait Catalog {
    /// Record types registered for a domain
    fn record_types(&self, domain: &str) -> Result<Vec<RecordType>>;

    /// Fields of a record type.
    ///
    /// Fails with `MetadataResolution` when the type is registered but has
    /// no live backing store.
    fn fields(&self, record_type: &RecordType) -> Result<Vec<FieldDescriptor>>;

    /// Raw values of `fields` across every live record of `record_type`,
    /// flattened row by row
    fn project(&self, record_type: &RecordType, fields: &[String]) -> Result<Vec<Option<String>>>;
}
