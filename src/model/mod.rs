//! Typed SPDX 2.3 document model.
//!
//! This module provides the immutable, strongly-typed document graph that
//! ingestion produces: the document itself, its creation info, the six
//! element kinds, and the leaf value types they share.

use convert_case::{Case, Casing};

pub mod actor;
pub mod annotation;
pub mod checksum;
pub mod document;
pub mod extracted_licensing_info;
pub mod file;
pub mod license;
pub mod package;
pub mod relationship;
pub mod snippet;
pub mod value;

// Re-export key types
pub use actor::{Actor, ActorType};
pub use annotation::{Annotation, AnnotationType};
pub use checksum::{Checksum, ChecksumAlgorithm};
pub use document::{CreationInfo, Document, ExternalDocumentRef, Version};
pub use extracted_licensing_info::ExtractedLicensingInfo;
pub use file::{File, FileType};
pub use license::LicenseExpression;
pub use package::{
    ExternalPackageRef, ExternalPackageRefCategory, Package, PackagePurpose,
    PackageVerificationCode,
};
pub use relationship::{Relationship, RelationshipKey, RelationshipType};
pub use snippet::Snippet;
pub use value::SpdxValue;

/// Normalize an enumerated-value token for lookup.
///
/// Input documents spell enumerated values with varying case and either
/// hyphens or underscores (`OPERATING-SYSTEM`, `operating_system`). Lookup
/// happens on the SCREAMING_SNAKE_CASE form.
pub(crate) fn normalize_enum_token(token: &str) -> String {
    token.to_case(Case::ScreamingSnake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_enum_token() {
        assert_eq!(normalize_enum_token("OPERATING-SYSTEM"), "OPERATING_SYSTEM");
        assert_eq!(normalize_enum_token("operating_system"), "OPERATING_SYSTEM");
        assert_eq!(normalize_enum_token("SOURCE"), "SOURCE");
        assert_eq!(normalize_enum_token("DescribedBy"), "DESCRIBED_BY");
    }
}
