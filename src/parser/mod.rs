//! Ingestion engines and leaf-value parsers.
//!
//! Two entry points exist: [`tagvalue::TagValueParser`] consumes the
//! tag-value format, and [`relationships::parse_all_relationships`] runs
//! relationship inference over a mapping-shaped (YAML/JSON) document. Both
//! collect every defect they find and fail with the complete list, never
//! just the first.

pub mod actor;
pub mod checksum;
pub mod datetime;
pub mod error;
pub mod logger;
pub mod relationships;
pub mod tagvalue;

// Re-export key types
pub use error::ParseError;
pub use logger::ErrorLog;
pub use relationships::{load_mapping_document, parse_all_relationships};
pub use tagvalue::TagValueParser;
