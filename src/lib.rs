//! # sbomnom: SPDX Document Ingestion Library
//!
//! sbomnom turns software-composition documents into a validated, typed
//! in-memory graph. It reads the SPDX 2.3 tag-value format with an
//! error-tolerant grammar engine, infers structural relationships from
//! mapping-shaped (YAML/JSON) documents, and reports every defect an input
//! contains instead of stopping at the first.
//!
//! ## Features
//!
//! - **Error-tolerant parsing**: each element and each relationship
//!   candidate is processed to completion regardless of sibling failures;
//!   a failed parse exposes the complete ordered defect list
//! - **Typed document graph**: creation info, packages, files, snippets,
//!   annotations, relationships and extracted licensing info as immutable
//!   serde-ready values
//! - **Relationship inference**: `documentDescribes`, `hasFiles` and legacy
//!   `fileDependencies` fields become real edges, with duplicate and
//!   inverse-aware suppression against explicitly declared ones
//! - **Implicit containment**: files parsed after a package automatically
//!   gain a `CONTAINS` edge from that package
//!
//! ## Example: tag-value parsing
//!
//! ```ignore
//! use sbomnom::TagValueParser;
//!
//! let document = TagValueParser::parse(
//!     "SPDXVersion: SPDX-2.3\n\
//!      DataLicense: CC0-1.0\n\
//!      DocumentName: demo\n\
//!      SPDXID: SPDXRef-DOCUMENT\n\
//!      DocumentNamespace: https://example.com/demo\n\
//!      Creator: Tool: generator-1.0\n\
//!      Created: 2024-01-01T00:00:00Z\n",
//! )?;
//! println!("{} packages", document.packages.len());
//! ```
//!
//! ## Example: relationship inference
//!
//! ```ignore
//! use sbomnom::parser::{load_mapping_document, parse_all_relationships};
//!
//! let doc = load_mapping_document("document.spdx.yaml")?;
//! let relationships = parse_all_relationships(&doc)?;
//! ```

// Core modules
pub mod model;
pub mod parser;

// Re-export key types
pub use model::{
    Actor, ActorType, Annotation, AnnotationType, Checksum, ChecksumAlgorithm, CreationInfo,
    Document, ExternalDocumentRef, ExternalPackageRef, ExternalPackageRefCategory,
    ExtractedLicensingInfo, File, FileType, LicenseExpression, Package, PackagePurpose,
    PackageVerificationCode, Relationship, RelationshipType, Snippet, SpdxValue, Version,
};
pub use parser::{
    load_mapping_document, parse_all_relationships, ErrorLog, ParseError, TagValueParser,
};
