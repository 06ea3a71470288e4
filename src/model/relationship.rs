//! Relationship elements: typed edges between document elements.

use serde::{Deserialize, Serialize};

use crate::model::normalize_enum_token;
use crate::model::value::SpdxValue;

/// The SPDX 2.3 relationship vocabulary.
///
/// Two pairs are semantic inverses of each other — `DESCRIBES`/`DESCRIBED_BY`
/// and `CONTAINS`/`CONTAINED_BY`; every other type stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Amends,
    AncestorOf,
    BuildDependencyOf,
    BuildToolOf,
    ContainedBy,
    Contains,
    CopyOf,
    DataFileOf,
    DependencyManifestOf,
    DependencyOf,
    DependsOn,
    DescendantOf,
    DescribedBy,
    Describes,
    DevDependencyOf,
    DevToolOf,
    DistributionArtifact,
    DocumentationOf,
    DynamicLink,
    ExampleOf,
    ExpandedFromArchive,
    FileAdded,
    FileDeleted,
    FileModified,
    GeneratedFrom,
    Generates,
    HasPrerequisite,
    MetafileOf,
    OptionalComponentOf,
    OptionalDependencyOf,
    Other,
    PackageOf,
    PatchApplied,
    PatchFor,
    PrerequisiteFor,
    ProvidedDependencyOf,
    RequirementDescriptionOf,
    RuntimeDependencyOf,
    SpecificationFor,
    StaticLink,
    TestCaseOf,
    TestDependencyOf,
    TestOf,
    TestToolOf,
    VariantOf,
}

impl RelationshipType {
    pub fn from_token(token: &str) -> Option<Self> {
        match normalize_enum_token(token).as_str() {
            "AMENDS" => Some(RelationshipType::Amends),
            "ANCESTOR_OF" => Some(RelationshipType::AncestorOf),
            "BUILD_DEPENDENCY_OF" => Some(RelationshipType::BuildDependencyOf),
            "BUILD_TOOL_OF" => Some(RelationshipType::BuildToolOf),
            "CONTAINED_BY" => Some(RelationshipType::ContainedBy),
            "CONTAINS" => Some(RelationshipType::Contains),
            "COPY_OF" => Some(RelationshipType::CopyOf),
            "DATA_FILE_OF" => Some(RelationshipType::DataFileOf),
            "DEPENDENCY_MANIFEST_OF" => Some(RelationshipType::DependencyManifestOf),
            "DEPENDENCY_OF" => Some(RelationshipType::DependencyOf),
            "DEPENDS_ON" => Some(RelationshipType::DependsOn),
            "DESCENDANT_OF" => Some(RelationshipType::DescendantOf),
            "DESCRIBED_BY" => Some(RelationshipType::DescribedBy),
            "DESCRIBES" => Some(RelationshipType::Describes),
            "DEV_DEPENDENCY_OF" => Some(RelationshipType::DevDependencyOf),
            "DEV_TOOL_OF" => Some(RelationshipType::DevToolOf),
            "DISTRIBUTION_ARTIFACT" => Some(RelationshipType::DistributionArtifact),
            "DOCUMENTATION_OF" => Some(RelationshipType::DocumentationOf),
            "DYNAMIC_LINK" => Some(RelationshipType::DynamicLink),
            "EXAMPLE_OF" => Some(RelationshipType::ExampleOf),
            "EXPANDED_FROM_ARCHIVE" => Some(RelationshipType::ExpandedFromArchive),
            "FILE_ADDED" => Some(RelationshipType::FileAdded),
            "FILE_DELETED" => Some(RelationshipType::FileDeleted),
            "FILE_MODIFIED" => Some(RelationshipType::FileModified),
            "GENERATED_FROM" => Some(RelationshipType::GeneratedFrom),
            "GENERATES" => Some(RelationshipType::Generates),
            "HAS_PREREQUISITE" => Some(RelationshipType::HasPrerequisite),
            "METAFILE_OF" => Some(RelationshipType::MetafileOf),
            "OPTIONAL_COMPONENT_OF" => Some(RelationshipType::OptionalComponentOf),
            "OPTIONAL_DEPENDENCY_OF" => Some(RelationshipType::OptionalDependencyOf),
            "OTHER" => Some(RelationshipType::Other),
            "PACKAGE_OF" => Some(RelationshipType::PackageOf),
            "PATCH_APPLIED" => Some(RelationshipType::PatchApplied),
            "PATCH_FOR" => Some(RelationshipType::PatchFor),
            "PREREQUISITE_FOR" => Some(RelationshipType::PrerequisiteFor),
            "PROVIDED_DEPENDENCY_OF" => Some(RelationshipType::ProvidedDependencyOf),
            "REQUIREMENT_DESCRIPTION_OF" => Some(RelationshipType::RequirementDescriptionOf),
            "RUNTIME_DEPENDENCY_OF" => Some(RelationshipType::RuntimeDependencyOf),
            "SPECIFICATION_FOR" => Some(RelationshipType::SpecificationFor),
            "STATIC_LINK" => Some(RelationshipType::StaticLink),
            "TEST_CASE_OF" => Some(RelationshipType::TestCaseOf),
            "TEST_DEPENDENCY_OF" => Some(RelationshipType::TestDependencyOf),
            "TEST_OF" => Some(RelationshipType::TestOf),
            "TEST_TOOL_OF" => Some(RelationshipType::TestToolOf),
            "VARIANT_OF" => Some(RelationshipType::VariantOf),
            _ => None,
        }
    }

    /// The paired type whose edge states the same fact with the endpoints
    /// swapped, for the two pairs that have one.
    pub fn inverse(self) -> Option<Self> {
        match self {
            RelationshipType::Describes => Some(RelationshipType::DescribedBy),
            RelationshipType::DescribedBy => Some(RelationshipType::Describes),
            RelationshipType::Contains => Some(RelationshipType::ContainedBy),
            RelationshipType::ContainedBy => Some(RelationshipType::Contains),
            _ => None,
        }
    }
}

/// A typed edge between two elements. The target slot may hold the `NONE`
/// or `NOASSERTION` sentinel instead of an element id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub spdx_element_id: String,
    pub relationship_type: RelationshipType,
    pub related_spdx_element_id: SpdxValue<String>,
    pub comment: Option<String>,
}

impl Relationship {
    pub fn new(
        spdx_element_id: impl Into<String>,
        relationship_type: RelationshipType,
        related_spdx_element_id: SpdxValue<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            spdx_element_id: spdx_element_id.into(),
            relationship_type,
            related_spdx_element_id,
            comment,
        }
    }

    /// Edge identity: source, type and target. The comment never
    /// participates in identity.
    pub fn key(&self) -> RelationshipKey {
        RelationshipKey {
            spdx_element_id: self.spdx_element_id.clone(),
            relationship_type: self.relationship_type,
            related_spdx_element_id: self.related_spdx_element_id.clone(),
        }
    }

    /// The same edge expressed from the other endpoint, when the type has a
    /// paired inverse and the target is a concrete id.
    pub fn inverse(&self) -> Option<Relationship> {
        let inverse_type = self.relationship_type.inverse()?;
        let related = self.related_spdx_element_id.value()?;
        Some(Relationship {
            spdx_element_id: related.clone(),
            relationship_type: inverse_type,
            related_spdx_element_id: SpdxValue::Value(self.spdx_element_id.clone()),
            comment: self.comment.clone(),
        })
    }
}

/// Comment-insensitive identity of a relationship edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipKey {
    pub spdx_element_id: String,
    pub relationship_type: RelationshipType,
    pub related_spdx_element_id: SpdxValue<String>,
}
