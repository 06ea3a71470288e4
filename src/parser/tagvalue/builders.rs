//! Field-by-field accumulators for in-progress elements.
//!
//! One builder per element kind, each owning its own local [`ErrorLog`].
//! `build()` performs typed construction: it yields the immutable model
//! value, or one message per missing required field. Builders never reject
//! mid-accumulation; defects pile up in the local log and decide the
//! element's fate at finalization.

use chrono::{DateTime, Utc};

use crate::model::{
    Actor, Annotation, AnnotationType, Checksum, CreationInfo, ExtractedLicensingInfo,
    ExternalDocumentRef, ExternalPackageRef, File, FileType, LicenseExpression, Package,
    PackagePurpose, PackageVerificationCode, Relationship, RelationshipType, Snippet, SpdxValue,
    Version,
};
use crate::parser::logger::ErrorLog;

/// The element kinds the grammar can accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    File,
    Package,
    Snippet,
    Annotation,
    Relationship,
    ExtractedLicensingInfo,
}

impl ElementKind {
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::File => "File",
            ElementKind::Package => "Package",
            ElementKind::Snippet => "Snippet",
            ElementKind::Annotation => "Annotation",
            ElementKind::Relationship => "Relationship",
            ElementKind::ExtractedLicensingInfo => "ExtractedLicensingInfo",
        }
    }

    /// The tag that opens an element of this kind.
    pub fn start_tag(self) -> &'static str {
        match self {
            ElementKind::File => "FileName",
            ElementKind::Package => "PackageName",
            ElementKind::Snippet => "SnippetSPDXID",
            ElementKind::Annotation => "Annotator",
            ElementKind::Relationship => "Relationship",
            ElementKind::ExtractedLicensingInfo => "LicenseID",
        }
    }
}

/// Slot for the repeatable license-info fields, which accept either concrete
/// expressions or a whole-field sentinel. A sentinel arriving after concrete
/// entries (or the other way round) replaces the slot wholesale; last write
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LicenseInfoField {
    #[default]
    Unset,
    NoAssertion,
    None,
    Expressions(Vec<LicenseExpression>),
}

impl LicenseInfoField {
    pub fn push(&mut self, expression: LicenseExpression) {
        match self {
            LicenseInfoField::Expressions(list) => list.push(expression),
            _ => *self = LicenseInfoField::Expressions(vec![expression]),
        }
    }

    pub fn set_no_assertion(&mut self) {
        *self = LicenseInfoField::NoAssertion;
    }

    pub fn set_none(&mut self) {
        *self = LicenseInfoField::None;
    }

    pub fn into_value(self) -> SpdxValue<Vec<LicenseExpression>> {
        match self {
            LicenseInfoField::Unset => SpdxValue::Value(Vec::new()),
            LicenseInfoField::NoAssertion => SpdxValue::NoAssertion,
            LicenseInfoField::None => SpdxValue::None,
            LicenseInfoField::Expressions(list) => SpdxValue::Value(list),
        }
    }
}

fn missing_field(kind: &str, field: &str) -> String {
    format!(
        "Error while constructing {}: missing required field {}",
        kind, field
    )
}

/// Accumulator for document-level creation info. Unlike element builders it
/// lives for the whole parse and is only constructed once, at the end.
#[derive(Debug, Default)]
pub struct CreationInfoBuilder {
    pub errors: ErrorLog,
    pub spdx_version: Option<String>,
    pub spdx_id: Option<String>,
    pub name: Option<String>,
    pub document_namespace: Option<String>,
    pub data_license: Option<String>,
    pub creators: Vec<Actor>,
    pub created: Option<DateTime<Utc>>,
    pub creator_comment: Option<String>,
    pub license_list_version: Option<Version>,
    pub external_document_refs: Vec<ExternalDocumentRef>,
    pub document_comment: Option<String>,
}

impl CreationInfoBuilder {
    pub fn build(self) -> Result<CreationInfo, Vec<String>> {
        let kind = "CreationInfo";
        let mut missing = Vec::new();
        if self.spdx_version.is_none() {
            missing.push(missing_field(kind, "spdx_version"));
        }
        if self.spdx_id.is_none() {
            missing.push(missing_field(kind, "spdx_id"));
        }
        if self.name.is_none() {
            missing.push(missing_field(kind, "name"));
        }
        if self.document_namespace.is_none() {
            missing.push(missing_field(kind, "document_namespace"));
        }
        if self.creators.is_empty() {
            missing.push(missing_field(kind, "creators"));
        }
        if self.created.is_none() {
            missing.push(missing_field(kind, "created"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(CreationInfo {
            spdx_version: self.spdx_version.unwrap(),
            spdx_id: self.spdx_id.unwrap(),
            name: self.name.unwrap(),
            document_namespace: self.document_namespace.unwrap(),
            creators: self.creators,
            created: self.created.unwrap(),
            creator_comment: self.creator_comment,
            data_license: self.data_license.unwrap_or_else(|| "CC0-1.0".to_string()),
            external_document_refs: self.external_document_refs,
            license_list_version: self.license_list_version,
            document_comment: self.document_comment,
        })
    }
}

#[derive(Debug, Default)]
pub struct FileBuilder {
    pub errors: ErrorLog,
    pub name: Option<String>,
    pub spdx_id: Option<String>,
    pub checksums: Vec<Checksum>,
    pub file_types: Vec<FileType>,
    pub license_concluded: Option<SpdxValue<LicenseExpression>>,
    pub license_info_in_file: LicenseInfoField,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub comment: Option<String>,
    pub notice: Option<String>,
    pub contributors: Vec<String>,
    pub attribution_texts: Vec<String>,
}

impl FileBuilder {
    pub fn build(self) -> Result<File, Vec<String>> {
        let kind = "File";
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(missing_field(kind, "name"));
        }
        if self.spdx_id.is_none() {
            missing.push(missing_field(kind, "spdx_id"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(File {
            name: self.name.unwrap(),
            spdx_id: self.spdx_id.unwrap(),
            checksums: self.checksums,
            file_types: self.file_types,
            license_concluded: self.license_concluded,
            license_info_in_file: self.license_info_in_file.into_value(),
            license_comment: self.license_comment,
            copyright_text: self.copyright_text,
            comment: self.comment,
            notice: self.notice,
            contributors: self.contributors,
            attribution_texts: self.attribution_texts,
        })
    }
}

#[derive(Debug, Default)]
pub struct PackageBuilder {
    pub errors: ErrorLog,
    pub name: Option<String>,
    pub spdx_id: Option<String>,
    pub download_location: Option<SpdxValue<String>>,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub supplier: Option<SpdxValue<Actor>>,
    pub originator: Option<SpdxValue<Actor>>,
    pub files_analyzed: Option<bool>,
    pub verification_code: Option<PackageVerificationCode>,
    pub checksums: Vec<Checksum>,
    pub homepage: Option<SpdxValue<String>>,
    pub source_info: Option<String>,
    pub license_concluded: Option<SpdxValue<LicenseExpression>>,
    pub license_info_from_files: LicenseInfoField,
    pub license_declared: Option<SpdxValue<LicenseExpression>>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_references: Vec<ExternalPackageRef>,
    pub attribution_texts: Vec<String>,
    pub primary_package_purpose: Option<PackagePurpose>,
    pub release_date: Option<DateTime<Utc>>,
    pub built_date: Option<DateTime<Utc>>,
    pub valid_until_date: Option<DateTime<Utc>>,
}

impl PackageBuilder {
    pub fn build(self) -> Result<Package, Vec<String>> {
        let kind = "Package";
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(missing_field(kind, "name"));
        }
        if self.spdx_id.is_none() {
            missing.push(missing_field(kind, "spdx_id"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Package {
            name: self.name.unwrap(),
            spdx_id: self.spdx_id.unwrap(),
            download_location: self.download_location,
            version: self.version,
            file_name: self.file_name,
            supplier: self.supplier,
            originator: self.originator,
            files_analyzed: self.files_analyzed.unwrap_or(true),
            verification_code: self.verification_code,
            checksums: self.checksums,
            homepage: self.homepage,
            source_info: self.source_info,
            license_concluded: self.license_concluded,
            license_info_from_files: self.license_info_from_files.into_value(),
            license_declared: self.license_declared,
            license_comment: self.license_comment,
            copyright_text: self.copyright_text,
            summary: self.summary,
            description: self.description,
            comment: self.comment,
            external_references: self.external_references,
            attribution_texts: self.attribution_texts,
            primary_package_purpose: self.primary_package_purpose,
            release_date: self.release_date,
            built_date: self.built_date,
            valid_until_date: self.valid_until_date,
        })
    }
}

#[derive(Debug, Default)]
pub struct SnippetBuilder {
    pub errors: ErrorLog,
    pub spdx_id: Option<String>,
    pub file_spdx_id: Option<String>,
    pub byte_range: Option<(u64, u64)>,
    pub line_range: Option<(u64, u64)>,
    pub license_concluded: Option<SpdxValue<LicenseExpression>>,
    pub license_info_in_snippet: LicenseInfoField,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub comment: Option<String>,
    pub name: Option<String>,
    pub attribution_texts: Vec<String>,
}

impl SnippetBuilder {
    pub fn build(self) -> Result<Snippet, Vec<String>> {
        let kind = "Snippet";
        let mut missing = Vec::new();
        if self.spdx_id.is_none() {
            missing.push(missing_field(kind, "spdx_id"));
        }
        if self.file_spdx_id.is_none() {
            missing.push(missing_field(kind, "file_spdx_id"));
        }
        if self.byte_range.is_none() {
            missing.push(missing_field(kind, "byte_range"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Snippet {
            spdx_id: self.spdx_id.unwrap(),
            file_spdx_id: self.file_spdx_id.unwrap(),
            byte_range: self.byte_range.unwrap(),
            line_range: self.line_range,
            license_concluded: self.license_concluded,
            license_info_in_snippet: self.license_info_in_snippet.into_value(),
            license_comment: self.license_comment,
            copyright_text: self.copyright_text,
            comment: self.comment,
            name: self.name,
            attribution_texts: self.attribution_texts,
        })
    }
}

#[derive(Debug, Default)]
pub struct AnnotationBuilder {
    pub errors: ErrorLog,
    pub spdx_id: Option<String>,
    pub annotation_type: Option<AnnotationType>,
    pub annotator: Option<Actor>,
    pub annotation_date: Option<DateTime<Utc>>,
    pub annotation_comment: Option<String>,
}

impl AnnotationBuilder {
    pub fn build(self) -> Result<Annotation, Vec<String>> {
        let kind = "Annotation";
        let mut missing = Vec::new();
        if self.spdx_id.is_none() {
            missing.push(missing_field(kind, "spdx_id"));
        }
        if self.annotation_type.is_none() {
            missing.push(missing_field(kind, "annotation_type"));
        }
        if self.annotator.is_none() {
            missing.push(missing_field(kind, "annotator"));
        }
        if self.annotation_date.is_none() {
            missing.push(missing_field(kind, "annotation_date"));
        }
        if self.annotation_comment.is_none() {
            missing.push(missing_field(kind, "annotation_comment"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Annotation {
            spdx_id: self.spdx_id.unwrap(),
            annotation_type: self.annotation_type.unwrap(),
            annotator: self.annotator.unwrap(),
            annotation_date: self.annotation_date.unwrap(),
            annotation_comment: self.annotation_comment.unwrap(),
        })
    }
}

#[derive(Debug, Default)]
pub struct RelationshipBuilder {
    pub errors: ErrorLog,
    pub spdx_element_id: Option<String>,
    pub relationship_type: Option<RelationshipType>,
    pub related_spdx_element_id: Option<SpdxValue<String>>,
    pub comment: Option<String>,
}

impl RelationshipBuilder {
    pub fn build(self) -> Result<Relationship, Vec<String>> {
        let kind = "Relationship";
        let mut missing = Vec::new();
        if self.spdx_element_id.is_none() {
            missing.push(missing_field(kind, "spdx_element_id"));
        }
        if self.relationship_type.is_none() {
            missing.push(missing_field(kind, "relationship_type"));
        }
        if self.related_spdx_element_id.is_none() {
            missing.push(missing_field(kind, "related_spdx_element_id"));
        }
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Relationship {
            spdx_element_id: self.spdx_element_id.unwrap(),
            relationship_type: self.relationship_type.unwrap(),
            related_spdx_element_id: self.related_spdx_element_id.unwrap(),
            comment: self.comment,
        })
    }
}

#[derive(Debug, Default)]
pub struct ExtractedLicensingInfoBuilder {
    pub errors: ErrorLog,
    pub license_id: Option<String>,
    pub extracted_text: Option<String>,
    pub license_name: Option<SpdxValue<String>>,
    pub cross_references: Vec<String>,
    pub comment: Option<String>,
}

impl ExtractedLicensingInfoBuilder {
    pub fn build(self) -> Result<ExtractedLicensingInfo, Vec<String>> {
        Ok(ExtractedLicensingInfo {
            license_id: self.license_id,
            extracted_text: self.extracted_text,
            license_name: self.license_name,
            cross_references: self.cross_references,
            comment: self.comment,
        })
    }
}

/// The single element currently being accumulated by the grammar engine.
#[derive(Debug)]
pub enum ElementInProgress {
    File(FileBuilder),
    Package(PackageBuilder),
    Snippet(SnippetBuilder),
    Annotation(AnnotationBuilder),
    Relationship(RelationshipBuilder),
    ExtractedLicensingInfo(ExtractedLicensingInfoBuilder),
}

impl ElementInProgress {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementInProgress::File(_) => ElementKind::File,
            ElementInProgress::Package(_) => ElementKind::Package,
            ElementInProgress::Snippet(_) => ElementKind::Snippet,
            ElementInProgress::Annotation(_) => ElementKind::Annotation,
            ElementInProgress::Relationship(_) => ElementKind::Relationship,
            ElementInProgress::ExtractedLicensingInfo(_) => ElementKind::ExtractedLicensingInfo,
        }
    }

    pub fn errors_mut(&mut self) -> &mut ErrorLog {
        match self {
            ElementInProgress::File(builder) => &mut builder.errors,
            ElementInProgress::Package(builder) => &mut builder.errors,
            ElementInProgress::Snippet(builder) => &mut builder.errors,
            ElementInProgress::Annotation(builder) => &mut builder.errors,
            ElementInProgress::Relationship(builder) => &mut builder.errors,
            ElementInProgress::ExtractedLicensingInfo(builder) => &mut builder.errors,
        }
    }

    /// Route an id token to the element. Kinds without an id field record a
    /// local defect instead of silently accepting one.
    pub fn set_spdx_id(&mut self, value: &str) {
        match self {
            ElementInProgress::File(builder) => builder.spdx_id = Some(value.to_string()),
            ElementInProgress::Package(builder) => builder.spdx_id = Some(value.to_string()),
            ElementInProgress::Snippet(builder) => builder.spdx_id = Some(value.to_string()),
            ElementInProgress::Annotation(builder) => builder.spdx_id = Some(value.to_string()),
            ElementInProgress::Relationship(builder) => builder
                .errors
                .append("SPDXID is not a valid field for Relationship"),
            ElementInProgress::ExtractedLicensingInfo(builder) => builder
                .errors
                .append("SPDXID is not a valid field for ExtractedLicensingInfo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChecksumAlgorithm;

    #[test]
    fn test_license_info_field_last_write_wins() {
        let mut field = LicenseInfoField::default();
        field.push(LicenseExpression::parse("MIT").unwrap());
        field.push(LicenseExpression::parse("Apache-2.0").unwrap());
        field.set_no_assertion();
        assert_eq!(field, LicenseInfoField::NoAssertion);

        field.push(LicenseExpression::parse("MIT").unwrap());
        assert_eq!(
            field.clone().into_value(),
            SpdxValue::Value(vec![LicenseExpression::parse("MIT").unwrap()])
        );
    }

    #[test]
    fn test_license_info_field_unset_becomes_empty_list() {
        assert_eq!(
            LicenseInfoField::default().into_value(),
            SpdxValue::Value(Vec::new())
        );
    }

    #[test]
    fn test_file_builder_reports_each_missing_field() {
        let messages = FileBuilder::default().build().unwrap_err();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("missing required field name"));
        assert!(messages[1].contains("missing required field spdx_id"));
    }

    #[test]
    fn test_file_builder_builds_complete_file() {
        let builder = FileBuilder {
            name: Some("src/main.c".to_string()),
            spdx_id: Some("SPDXRef-File".to_string()),
            checksums: vec![Checksum::new(ChecksumAlgorithm::Sha1, "abc123")],
            ..FileBuilder::default()
        };
        let file = builder.build().unwrap();
        assert_eq!(file.name, "src/main.c");
        assert_eq!(file.license_info_in_file, SpdxValue::Value(Vec::new()));
    }

    #[test]
    fn test_annotation_builder_requires_every_field() {
        let messages = AnnotationBuilder::default().build().unwrap_err();
        assert_eq!(messages.len(), 5);
    }

    #[test]
    fn test_extracted_licensing_info_builder_never_fails() {
        let info = ExtractedLicensingInfoBuilder::default().build().unwrap();
        assert_eq!(info, ExtractedLicensingInfo::default());
    }

    #[test]
    fn test_set_spdx_id_on_relationship_is_a_defect() {
        let mut element = ElementInProgress::Relationship(RelationshipBuilder::default());
        element.set_spdx_id("SPDXRef-X");
        assert!(element.errors_mut().has_messages());
    }

    #[test]
    fn test_creation_info_defaults_data_license() {
        let builder = CreationInfoBuilder {
            spdx_version: Some("SPDX-2.3".to_string()),
            spdx_id: Some("SPDXRef-DOCUMENT".to_string()),
            name: Some("demo".to_string()),
            document_namespace: Some("https://example.com/demo".to_string()),
            creators: vec![Actor::new(crate::model::ActorType::Tool, "sbomnom", None)],
            created: Some(crate::parser::datetime::datetime_from_str("2024-01-01T00:00:00Z").unwrap()),
            ..CreationInfoBuilder::default()
        };
        let info = builder.build().unwrap();
        assert_eq!(info.data_license, "CC0-1.0");
    }
}
