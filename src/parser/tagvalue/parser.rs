//! Stateful grammar engine for tag-value ingestion.
//!
//! Consumes the terminal stream in one linear pass, drives exactly one
//! element accumulator at a time, and finishes with either a complete
//! [`Document`] or the full ordered defect list — never just the first
//! defect. The engine starts out building creation info; the first start
//! tag switches it to element accumulation and it never goes back.

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::model::{
    Actor, Annotation, AnnotationType, Document, ExternalDocumentRef, ExternalPackageRef,
    ExternalPackageRefCategory, ExtractedLicensingInfo, File, FileType, LicenseExpression,
    Package, PackagePurpose, PackageVerificationCode, Relationship, RelationshipType, Snippet,
    SpdxValue, Version,
};
use crate::parser::actor::{has_actor_prefix, parse_actor};
use crate::parser::checksum::parse_checksum;
use crate::parser::datetime::datetime_from_str;
use crate::parser::error::ParseError;
use crate::parser::logger::ErrorLog;
use crate::parser::tagvalue::builders::{
    AnnotationBuilder, CreationInfoBuilder, ElementInProgress, ElementKind,
    ExtractedLicensingInfoBuilder, FileBuilder, PackageBuilder, RelationshipBuilder,
    SnippetBuilder,
};
use crate::parser::tagvalue::lexer::{lex, RawValue, TagToken};

/// The tag-value grammar engine.
///
/// One instance owns all mutable parse state: the creation-info accumulator,
/// the single open element accumulator, the document-level error log, the
/// finalized element collections and the last-finalized-package pointer used
/// for implicit containment.
#[derive(Debug, Default)]
pub struct TagValueParser {
    creation_info: CreationInfoBuilder,
    current: Option<ElementInProgress>,
    errors: ErrorLog,
    files: Vec<File>,
    packages: Vec<Package>,
    snippets: Vec<Snippet>,
    annotations: Vec<Annotation>,
    relationships: Vec<Relationship>,
    extracted_licensing_info: Vec<ExtractedLicensingInfo>,
    last_package_id: Option<String>,
}

impl TagValueParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete tag-value document.
    ///
    /// Every independently recoverable unit is attempted in full regardless
    /// of sibling failures; any defect anywhere means no document at all.
    pub fn parse(text: &str) -> Result<Document, ParseError> {
        let mut parser = TagValueParser::new();
        let (tokens, lex_errors) = lex(text);
        parser.errors.extend(lex_errors);
        for token in &tokens {
            parser.handle_token(token);
        }
        parser.finish()
    }

    fn handle_token(&mut self, token: &TagToken) {
        match token.tag.as_str() {
            // document / creation info
            "SPDXVersion" => self.set_document_line(token, |b, v| b.spdx_version = Some(v)),
            "DataLicense" => self.set_document_line(token, |b, v| b.data_license = Some(v)),
            "DocumentName" => self.set_document_line(token, |b, v| b.name = Some(v)),
            "DocumentNamespace" => {
                self.set_document_line(token, |b, v| b.document_namespace = Some(v))
            }
            "DocumentComment" => self.set_document_text(token, |b, v| b.document_comment = Some(v)),
            "CreatorComment" => self.set_document_text(token, |b, v| b.creator_comment = Some(v)),
            "LicenseListVersion" => self.handle_license_list_version(token),
            "Creator" => self.handle_creator(token),
            "Created" => self.handle_created(token),
            "ExternalDocumentRef" => self.handle_external_document_ref(token),
            "SPDXID" => self.handle_spdx_id(token),

            // element start tags
            "FileName" => self.start_file(token),
            "PackageName" => self.start_package(token),
            "SnippetSPDXID" => self.start_snippet(token),
            "Annotator" => self.start_annotation(token),
            "Relationship" => self.start_relationship(token),
            "LicenseID" => self.start_extracted_licensing_info(token),

            // file value tags
            "FileType" | "FileChecksum" | "LicenseConcluded" | "LicenseInfoInFile"
            | "LicenseComments" | "FileCopyrightText" | "FileComment" | "FileNotice"
            | "FileContributor" | "FileAttributionText" => self.handle_file_tag(token),

            // package value tags
            "PackageVersion" | "PackageFileName" | "PackageSupplier" | "PackageOriginator"
            | "PackageDownloadLocation" | "FilesAnalyzed" | "PackageVerificationCode"
            | "PackageChecksum" | "PackageHomePage" | "PackageSourceInfo"
            | "PackageLicenseConcluded" | "PackageLicenseInfoFromFiles"
            | "PackageLicenseDeclared" | "PackageLicenseComments" | "PackageCopyrightText"
            | "PackageSummary" | "PackageDescription" | "PackageComment" | "ExternalRef"
            | "ExternalRefComment" | "PackageAttributionText" | "PrimaryPackagePurpose"
            | "ReleaseDate" | "BuiltDate" | "ValidUntilDate" => self.handle_package_tag(token),

            // snippet value tags
            "SnippetFromFileSPDXID" | "SnippetByteRange" | "SnippetLineRange"
            | "SnippetLicenseConcluded" | "LicenseInfoInSnippet" | "SnippetLicenseComments"
            | "SnippetCopyrightText" | "SnippetComment" | "SnippetName"
            | "SnippetAttributionText" => self.handle_snippet_tag(token),

            // annotation value tags
            "AnnotationDate" | "AnnotationType" | "AnnotationComment" => {
                self.handle_annotation_tag(token)
            }
            "SPDXREF" => self.handle_spdx_ref(token),

            // relationship value tags
            "RelationshipComment" => self.handle_relationship_tag(token),

            // extracted licensing info value tags
            "ExtractedText" | "LicenseName" | "LicenseCrossReference" | "LicenseComment" => {
                self.handle_extracted_tag(token)
            }

            _ => self
                .errors
                .append(format!("Unknown tag provided in line {}", token.line)),
        }
    }

    // -- creation info ------------------------------------------------------

    fn set_document_line(
        &mut self,
        token: &TagToken,
        set: impl FnOnce(&mut CreationInfoBuilder, String),
    ) {
        match line_value(token) {
            Some(value) => set(&mut self.creation_info, value.to_string()),
            None => self
                .creation_info
                .errors
                .append(grammar_error(&token.tag, token.line)),
        }
    }

    fn set_document_text(
        &mut self,
        token: &TagToken,
        set: impl FnOnce(&mut CreationInfoBuilder, String),
    ) {
        match text_or_line(token) {
            Some(value) => set(&mut self.creation_info, value.to_string()),
            None => self
                .creation_info
                .errors
                .append(grammar_error(&token.tag, token.line)),
        }
    }

    fn handle_license_list_version(&mut self, token: &TagToken) {
        match line_value(token) {
            Some(value) => match Version::from_string(value) {
                Ok(version) => self.creation_info.license_list_version = Some(version),
                Err(message) => self.creation_info.errors.append(message),
            },
            None => self
                .creation_info
                .errors
                .append(grammar_error("LicenseListVersion", token.line)),
        }
    }

    fn handle_creator(&mut self, token: &TagToken) {
        match line_value(token) {
            Some(value) if has_actor_prefix(value) => match parse_actor(value) {
                Ok(actor) => self.creation_info.creators.push(actor),
                Err(messages) => self.creation_info.errors.extend(messages),
            },
            _ => self
                .creation_info
                .errors
                .append(grammar_error("Creator", token.line)),
        }
    }

    fn handle_created(&mut self, token: &TagToken) {
        match line_value(token).and_then(|value| datetime_from_str(value).ok()) {
            Some(created) => self.creation_info.created = Some(created),
            None => self
                .creation_info
                .errors
                .append(grammar_error("Created", token.line)),
        }
    }

    fn handle_external_document_ref(&mut self, token: &TagToken) {
        let pattern =
            Regex::new(r"^(?P<ref>DocumentRef-\S+)\s+(?P<uri>\S+)\s+(?P<checksum>\S+:\s*\S+)$")
                .unwrap();
        let captures = match line_value(token).and_then(|value| pattern.captures(value)) {
            Some(captures) => captures,
            None => {
                self.creation_info
                    .errors
                    .append(grammar_error("ExternalDocumentRef", token.line));
                return;
            }
        };
        match parse_checksum(&captures["checksum"]) {
            Ok(checksum) => self
                .creation_info
                .external_document_refs
                .push(ExternalDocumentRef {
                    document_ref_id: captures["ref"].to_string(),
                    document_uri: captures["uri"].to_string(),
                    checksum,
                }),
            Err(message) => self.creation_info.errors.append(message),
        }
    }

    /// An id token targets creation info until the document id is set;
    /// afterwards it targets the current element. With no element open the
    /// value is dropped. Out-of-order input therefore mis-assigns ids; that
    /// order dependence is part of the accepted grammar.
    fn handle_spdx_id(&mut self, token: &TagToken) {
        let Some(value) = line_value(token) else {
            return;
        };
        if self.creation_info.spdx_id.is_none() {
            self.creation_info.spdx_id = Some(value.to_string());
        } else if let Some(element) = self.current.as_mut() {
            element.set_spdx_id(value);
        }
    }

    fn handle_spdx_ref(&mut self, token: &TagToken) {
        let Some(element) = self.current.as_mut() else {
            return;
        };
        match line_value(token) {
            Some(value) => element.set_spdx_id(value),
            None => element
                .errors_mut()
                .append(grammar_error("SPDXREF", token.line)),
        }
    }

    // -- element start tags -------------------------------------------------

    fn start_file(&mut self, token: &TagToken) {
        self.finalize_current();
        let mut builder = FileBuilder::default();
        match line_value(token) {
            Some(name) => builder.name = Some(name.to_string()),
            None => builder.errors.append(grammar_error("FileName", token.line)),
        }
        self.current = Some(ElementInProgress::File(builder));
    }

    fn start_package(&mut self, token: &TagToken) {
        self.finalize_current();
        let mut builder = PackageBuilder::default();
        match line_value(token) {
            Some(name) => builder.name = Some(name.to_string()),
            None => builder
                .errors
                .append(grammar_error("PackageName", token.line)),
        }
        self.current = Some(ElementInProgress::Package(builder));
    }

    fn start_snippet(&mut self, token: &TagToken) {
        self.finalize_current();
        let mut builder = SnippetBuilder::default();
        match line_value(token) {
            Some(spdx_id) => builder.spdx_id = Some(spdx_id.to_string()),
            None => builder
                .errors
                .append(grammar_error("SnippetSPDXID", token.line)),
        }
        self.current = Some(ElementInProgress::Snippet(builder));
    }

    fn start_annotation(&mut self, token: &TagToken) {
        self.finalize_current();
        let mut builder = AnnotationBuilder::default();
        match line_value(token) {
            Some(value) if has_actor_prefix(value) => match parse_actor(value) {
                Ok(actor) => builder.annotator = Some(actor),
                Err(messages) => builder.errors.extend(messages),
            },
            _ => builder
                .errors
                .append(grammar_error("Annotator", token.line)),
        }
        self.current = Some(ElementInProgress::Annotation(builder));
    }

    fn start_relationship(&mut self, token: &TagToken) {
        self.finalize_current();
        let mut builder = RelationshipBuilder::default();
        match line_value(token) {
            Some(value) => {
                let parts: Vec<&str> = value.split_whitespace().collect();
                if parts.len() == 3 {
                    builder.spdx_element_id = Some(parts[0].to_string());
                    match RelationshipType::from_token(parts[1]) {
                        Some(relationship_type) => {
                            builder.relationship_type = Some(relationship_type)
                        }
                        None => builder.errors.append(format!(
                            "Invalid RelationshipType {}. Line: {}",
                            parts[1], token.line
                        )),
                    }
                    builder.related_spdx_element_id = Some(SpdxValue::from_token(parts[2]));
                } else {
                    builder.errors.append(format!(
                        "Relationship couldn't be split in spdx_element_id, relationship_type \
                         and related_spdx_element. Line: {}",
                        token.line
                    ));
                }
            }
            None => builder
                .errors
                .append(grammar_error("Relationship", token.line)),
        }
        self.current = Some(ElementInProgress::Relationship(builder));
    }

    fn start_extracted_licensing_info(&mut self, token: &TagToken) {
        self.finalize_current();
        let mut builder = ExtractedLicensingInfoBuilder::default();
        match line_value(token) {
            Some(license_id) => builder.license_id = Some(license_id.to_string()),
            None => builder
                .errors
                .append(grammar_error("LicenseID", token.line)),
        }
        self.current = Some(ElementInProgress::ExtractedLicensingInfo(builder));
    }

    // -- element value tags -------------------------------------------------

    fn handle_file_tag(&mut self, token: &TagToken) {
        if !matches!(self.current, Some(ElementInProgress::File(_))) {
            self.errors.append(scope_error(ElementKind::File, token.line));
            return;
        }
        let Some(ElementInProgress::File(builder)) = self.current.as_mut() else {
            return;
        };
        match token.tag.as_str() {
            "FileType" => match line_value(token).and_then(FileType::from_token) {
                Some(file_type) => builder.file_types.push(file_type),
                None => builder.errors.append(format!(
                    "Error while parsing FileType: Token did not match any of the valid values. \
                     Line: {}",
                    token.line
                )),
            },
            "FileChecksum" => match line_value(token) {
                Some(value) => match parse_checksum(value) {
                    Ok(checksum) => builder.checksums.push(checksum),
                    Err(message) => builder.errors.append(message),
                },
                None => builder
                    .errors
                    .append(grammar_error("FileChecksum", token.line)),
            },
            "LicenseConcluded" => match license_value(token) {
                Ok(value) => builder.license_concluded = Some(value),
                Err(message) => builder.errors.append(message),
            },
            "LicenseInfoInFile" => match license_value(token) {
                Ok(SpdxValue::None) => builder.license_info_in_file.set_none(),
                Ok(SpdxValue::NoAssertion) => builder.license_info_in_file.set_no_assertion(),
                Ok(SpdxValue::Value(expression)) => builder.license_info_in_file.push(expression),
                Err(message) => builder.errors.append(message),
            },
            "LicenseComments" => match text_or_line(token) {
                Some(value) => builder.license_comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("LicenseComments", token.line)),
            },
            "FileCopyrightText" => match line_or_sentinel(token) {
                Some(value) => builder.copyright_text = Some(value),
                None => builder
                    .errors
                    .append(grammar_error("FileCopyrightText", token.line)),
            },
            "FileComment" => match text_or_line(token) {
                Some(value) => builder.comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("FileComment", token.line)),
            },
            "FileNotice" => match text_or_line(token) {
                Some(value) => builder.notice = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("FileNotice", token.line)),
            },
            "FileContributor" => match line_value(token) {
                Some(value) => builder.contributors.push(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("FileContributor", token.line)),
            },
            "FileAttributionText" => match text_or_line(token) {
                Some(value) => builder.attribution_texts.push(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("FileAttributionText", token.line)),
            },
            _ => {}
        }
    }

    fn handle_package_tag(&mut self, token: &TagToken) {
        if !matches!(self.current, Some(ElementInProgress::Package(_))) {
            self.errors
                .append(scope_error(ElementKind::Package, token.line));
            return;
        }
        let Some(ElementInProgress::Package(builder)) = self.current.as_mut() else {
            return;
        };
        match token.tag.as_str() {
            "PackageVersion" => match line_value(token) {
                Some(value) => builder.version = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageVersion", token.line)),
            },
            "PackageFileName" => match line_value(token) {
                Some(value) => builder.file_name = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageFileName", token.line)),
            },
            "PackageSupplier" => match actor_or_no_assertion(token) {
                Ok(value) => builder.supplier = Some(value),
                Err(message) => builder.errors.append(message),
            },
            "PackageOriginator" => match actor_or_no_assertion(token) {
                Ok(value) => builder.originator = Some(value),
                Err(message) => builder.errors.append(message),
            },
            "PackageDownloadLocation" => match line_or_sentinel(token) {
                Some(value) => builder.download_location = Some(value),
                None => builder
                    .errors
                    .append(grammar_error("PackageDownloadLocation", token.line)),
            },
            "FilesAnalyzed" => match line_value(token) {
                // only the two boolean spellings take effect; anything else
                // leaves the field unset
                Some("true") | Some("True") => builder.files_analyzed = Some(true),
                Some("false") | Some("False") => builder.files_analyzed = Some(false),
                Some(_) => {}
                None => builder
                    .errors
                    .append(grammar_error("FilesAnalyzed", token.line)),
            },
            "PackageVerificationCode" => match line_value(token) {
                Some(value) => match parse_verification_code(value) {
                    Some(code) => builder.verification_code = Some(code),
                    None => builder
                        .errors
                        .append(grammar_error("PackageVerificationCode", token.line)),
                },
                None => builder
                    .errors
                    .append(grammar_error("PackageVerificationCode", token.line)),
            },
            "PackageChecksum" => match line_value(token) {
                Some(value) => match parse_checksum(value) {
                    Ok(checksum) => builder.checksums.push(checksum),
                    Err(message) => builder.errors.append(message),
                },
                None => builder
                    .errors
                    .append(grammar_error("PackageChecksum", token.line)),
            },
            "PackageHomePage" => match line_or_sentinel(token) {
                Some(value) => builder.homepage = Some(value),
                None => builder
                    .errors
                    .append(grammar_error("PackageHomePage", token.line)),
            },
            "PackageSourceInfo" => match text_or_line(token) {
                Some(value) => builder.source_info = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageSourceInfo", token.line)),
            },
            "PackageLicenseConcluded" => match license_value(token) {
                Ok(value) => builder.license_concluded = Some(value),
                Err(message) => builder.errors.append(message),
            },
            "PackageLicenseInfoFromFiles" => match license_value(token) {
                Ok(SpdxValue::None) => builder.license_info_from_files.set_none(),
                Ok(SpdxValue::NoAssertion) => builder.license_info_from_files.set_no_assertion(),
                Ok(SpdxValue::Value(expression)) => {
                    builder.license_info_from_files.push(expression)
                }
                Err(message) => builder.errors.append(message),
            },
            "PackageLicenseDeclared" => match license_value(token) {
                Ok(value) => builder.license_declared = Some(value),
                Err(message) => builder.errors.append(message),
            },
            "PackageLicenseComments" => match text_or_line(token) {
                Some(value) => builder.license_comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageLicenseComments", token.line)),
            },
            "PackageCopyrightText" => match line_or_sentinel(token) {
                Some(value) => builder.copyright_text = Some(value),
                None => builder
                    .errors
                    .append(grammar_error("PackageCopyrightText", token.line)),
            },
            "PackageSummary" => match text_or_line(token) {
                Some(value) => builder.summary = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageSummary", token.line)),
            },
            "PackageDescription" => match text_or_line(token) {
                Some(value) => builder.description = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageDescription", token.line)),
            },
            "PackageComment" => match text_or_line(token) {
                Some(value) => builder.comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageComment", token.line)),
            },
            "ExternalRef" => match line_value(token) {
                Some(value) => {
                    let parts: Vec<&str> = value.split_whitespace().collect();
                    if parts.len() == 3 {
                        match ExternalPackageRefCategory::from_token(parts[0]) {
                            Some(category) => {
                                builder.external_references.push(ExternalPackageRef {
                                    category,
                                    reference_type: parts[1].to_string(),
                                    locator: parts[2].to_string(),
                                    comment: None,
                                })
                            }
                            None => builder.errors.append(format!(
                                "Invalid ExternalPackageRefCategory: {}",
                                parts[0]
                            )),
                        }
                    } else {
                        builder
                            .errors
                            .append(grammar_error("ExternalRef", token.line));
                    }
                }
                None => builder
                    .errors
                    .append(grammar_error("ExternalRef", token.line)),
            },
            "ExternalRefComment" => match text_or_line(token) {
                Some(value) => match builder.external_references.last_mut() {
                    Some(reference) => reference.comment = Some(value.to_string()),
                    None => builder
                        .errors
                        .append(grammar_error("ExternalRefComment", token.line)),
                },
                None => builder
                    .errors
                    .append(grammar_error("ExternalRefComment", token.line)),
            },
            "PackageAttributionText" => match text_or_line(token) {
                Some(value) => builder.attribution_texts.push(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("PackageAttributionText", token.line)),
            },
            "PrimaryPackagePurpose" => {
                match line_value(token).and_then(PackagePurpose::from_token) {
                    Some(purpose) => builder.primary_package_purpose = Some(purpose),
                    None => builder
                        .errors
                        .append(grammar_error("PrimaryPackagePurpose", token.line)),
                }
            }
            "ReleaseDate" => match date_value(token) {
                Some(date) => builder.release_date = Some(date),
                None => builder
                    .errors
                    .append(grammar_error("ReleaseDate", token.line)),
            },
            "BuiltDate" => match date_value(token) {
                Some(date) => builder.built_date = Some(date),
                None => builder
                    .errors
                    .append(grammar_error("BuiltDate", token.line)),
            },
            "ValidUntilDate" => match date_value(token) {
                Some(date) => builder.valid_until_date = Some(date),
                None => builder
                    .errors
                    .append(grammar_error("ValidUntilDate", token.line)),
            },
            _ => {}
        }
    }

    fn handle_snippet_tag(&mut self, token: &TagToken) {
        if !matches!(self.current, Some(ElementInProgress::Snippet(_))) {
            self.errors
                .append(scope_error(ElementKind::Snippet, token.line));
            return;
        }
        let Some(ElementInProgress::Snippet(builder)) = self.current.as_mut() else {
            return;
        };
        match token.tag.as_str() {
            "SnippetFromFileSPDXID" => match line_value(token) {
                Some(value) => builder.file_spdx_id = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("SnippetFromFileSPDXID", token.line)),
            },
            "SnippetByteRange" => match line_value(token) {
                Some(value) => match parse_range(value) {
                    Some(range) => builder.byte_range = Some(range),
                    None => builder.errors.append(
                        "Value for SnippetByteRange doesn't match valid range pattern."
                            .to_string(),
                    ),
                },
                None => builder
                    .errors
                    .append(grammar_error("SnippetByteRange", token.line)),
            },
            "SnippetLineRange" => match line_value(token) {
                Some(value) => match parse_range(value) {
                    Some(range) => builder.line_range = Some(range),
                    None => builder.errors.append(
                        "Value for SnippetLineRange doesn't match valid range pattern."
                            .to_string(),
                    ),
                },
                None => builder
                    .errors
                    .append(grammar_error("SnippetLineRange", token.line)),
            },
            "SnippetLicenseConcluded" => match license_value(token) {
                Ok(value) => builder.license_concluded = Some(value),
                Err(message) => builder.errors.append(message),
            },
            "LicenseInfoInSnippet" => match license_value(token) {
                Ok(SpdxValue::None) => builder.license_info_in_snippet.set_none(),
                Ok(SpdxValue::NoAssertion) => builder.license_info_in_snippet.set_no_assertion(),
                Ok(SpdxValue::Value(expression)) => {
                    builder.license_info_in_snippet.push(expression)
                }
                Err(message) => builder.errors.append(message),
            },
            "SnippetLicenseComments" => match text_or_line(token) {
                Some(value) => builder.license_comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("SnippetLicenseComments", token.line)),
            },
            "SnippetCopyrightText" => match line_or_sentinel(token) {
                Some(value) => builder.copyright_text = Some(value),
                None => builder
                    .errors
                    .append(grammar_error("SnippetCopyrightText", token.line)),
            },
            "SnippetComment" => match text_or_line(token) {
                Some(value) => builder.comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("SnippetComment", token.line)),
            },
            "SnippetName" => match line_value(token) {
                Some(value) => builder.name = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("SnippetName", token.line)),
            },
            "SnippetAttributionText" => match text_or_line(token) {
                Some(value) => builder.attribution_texts.push(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("SnippetAttributionText", token.line)),
            },
            _ => {}
        }
    }

    fn handle_annotation_tag(&mut self, token: &TagToken) {
        if !matches!(self.current, Some(ElementInProgress::Annotation(_))) {
            self.errors
                .append(scope_error(ElementKind::Annotation, token.line));
            return;
        }
        let Some(ElementInProgress::Annotation(builder)) = self.current.as_mut() else {
            return;
        };
        match token.tag.as_str() {
            "AnnotationDate" => match date_value(token) {
                Some(date) => builder.annotation_date = Some(date),
                None => builder
                    .errors
                    .append(grammar_error("AnnotationDate", token.line)),
            },
            "AnnotationType" => match line_value(token).and_then(AnnotationType::from_token) {
                Some(annotation_type) => builder.annotation_type = Some(annotation_type),
                None => builder
                    .errors
                    .append(grammar_error("AnnotationType", token.line)),
            },
            "AnnotationComment" => match text_or_line(token) {
                Some(value) => builder.annotation_comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("AnnotationComment", token.line)),
            },
            _ => {}
        }
    }

    fn handle_relationship_tag(&mut self, token: &TagToken) {
        if !matches!(self.current, Some(ElementInProgress::Relationship(_))) {
            self.errors
                .append(scope_error(ElementKind::Relationship, token.line));
            return;
        }
        let Some(ElementInProgress::Relationship(builder)) = self.current.as_mut() else {
            return;
        };
        match text_or_line(token) {
            Some(value) => builder.comment = Some(value.to_string()),
            None => builder
                .errors
                .append(grammar_error("RelationshipComment", token.line)),
        }
    }

    fn handle_extracted_tag(&mut self, token: &TagToken) {
        if !matches!(
            self.current,
            Some(ElementInProgress::ExtractedLicensingInfo(_))
        ) {
            self.errors
                .append(scope_error(ElementKind::ExtractedLicensingInfo, token.line));
            return;
        }
        let Some(ElementInProgress::ExtractedLicensingInfo(builder)) = self.current.as_mut()
        else {
            return;
        };
        match token.tag.as_str() {
            "ExtractedText" => match text_or_line(token) {
                Some(value) => builder.extracted_text = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("ExtractedText", token.line)),
            },
            "LicenseName" => match line_value(token) {
                Some("NOASSERTION") => builder.license_name = Some(SpdxValue::NoAssertion),
                Some(value) => builder.license_name = Some(SpdxValue::Value(value.to_string())),
                None => builder
                    .errors
                    .append(grammar_error("LicenseName", token.line)),
            },
            "LicenseCrossReference" => match line_value(token) {
                Some(value) => builder.cross_references.push(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("LicenseCrossReference", token.line)),
            },
            "LicenseComment" => match text_or_line(token) {
                Some(value) => builder.comment = Some(value.to_string()),
                None => builder
                    .errors
                    .append(grammar_error("LicenseComment", token.line)),
            },
            _ => {}
        }
    }

    // -- finalization and assembly ------------------------------------------

    /// Close the open accumulator, if any. Elements with local defects fold
    /// those defects upward and are discarded; clean ones go through typed
    /// construction into their collection.
    fn finalize_current(&mut self) {
        let Some(element) = self.current.take() else {
            return;
        };
        let kind = element.kind();
        match element {
            ElementInProgress::File(builder) => {
                if builder.errors.has_messages() {
                    self.fold_element_errors(kind, builder.errors);
                    return;
                }
                match builder.build() {
                    Ok(file) => {
                        tracing::debug!("finalized file {}", file.spdx_id);
                        self.synthesize_containment(&file);
                        self.files.push(file);
                    }
                    Err(messages) => self.errors.extend(messages),
                }
            }
            ElementInProgress::Package(builder) => {
                if builder.errors.has_messages() {
                    self.fold_element_errors(kind, builder.errors);
                    return;
                }
                match builder.build() {
                    Ok(package) => {
                        tracing::debug!("finalized package {}", package.spdx_id);
                        self.last_package_id = Some(package.spdx_id.clone());
                        self.packages.push(package);
                    }
                    Err(messages) => self.errors.extend(messages),
                }
            }
            ElementInProgress::Snippet(builder) => {
                if builder.errors.has_messages() {
                    self.fold_element_errors(kind, builder.errors);
                    return;
                }
                match builder.build() {
                    Ok(snippet) => self.snippets.push(snippet),
                    Err(messages) => self.errors.extend(messages),
                }
            }
            ElementInProgress::Annotation(builder) => {
                if builder.errors.has_messages() {
                    self.fold_element_errors(kind, builder.errors);
                    return;
                }
                match builder.build() {
                    Ok(annotation) => self.annotations.push(annotation),
                    Err(messages) => self.errors.extend(messages),
                }
            }
            ElementInProgress::Relationship(builder) => {
                if builder.errors.has_messages() {
                    self.fold_element_errors(kind, builder.errors);
                    return;
                }
                match builder.build() {
                    Ok(relationship) => self.relationships.push(relationship),
                    Err(messages) => self.errors.extend(messages),
                }
            }
            ElementInProgress::ExtractedLicensingInfo(builder) => {
                if builder.errors.has_messages() {
                    self.fold_element_errors(kind, builder.errors);
                    return;
                }
                match builder.build() {
                    Ok(info) => self.extracted_licensing_info.push(info),
                    Err(messages) => self.errors.extend(messages),
                }
            }
        }
    }

    fn fold_element_errors(&mut self, kind: ElementKind, errors: ErrorLog) {
        self.errors.append(format!(
            "Error while parsing {}: [{}]",
            kind.label(),
            errors.messages().join(", ")
        ));
    }

    /// A freshly finalized file is contained by the most recently finalized
    /// package, when there is one. The duplicate check here is direct
    /// equality, comments included.
    fn synthesize_containment(&mut self, file: &File) {
        let Some(package_id) = &self.last_package_id else {
            return;
        };
        let relationship = Relationship::new(
            package_id.clone(),
            RelationshipType::Contains,
            SpdxValue::Value(file.spdx_id.clone()),
            None,
        );
        if !self.relationships.contains(&relationship) {
            tracing::debug!("synthesized containment {} -> {}", package_id, file.spdx_id);
            self.relationships.push(relationship);
        }
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        self.finalize_current();
        let creation_errors = std::mem::take(&mut self.creation_info.errors);
        if creation_errors.has_messages() {
            self.errors.append(format!(
                "Error while parsing CreationInfo: [{}]",
                creation_errors.messages().join(", ")
            ));
        }
        if self.errors.has_messages() {
            return Err(ParseError::new(self.errors.into_messages()));
        }
        let creation_info = match self.creation_info.build() {
            Ok(creation_info) => creation_info,
            Err(messages) => return Err(ParseError::new(messages)),
        };
        tracing::debug!(
            "assembled document with {} packages, {} files, {} relationships",
            self.packages.len(),
            self.files.len(),
            self.relationships.len()
        );
        Ok(Document {
            creation_info,
            packages: self.packages,
            files: self.files,
            snippets: self.snippets,
            annotations: self.annotations,
            relationships: self.relationships,
            extracted_licensing_info: self.extracted_licensing_info,
        })
    }
}

// -- value-shape helpers ----------------------------------------------------

fn grammar_error(tag: &str, line: usize) -> String {
    format!(
        "Error while parsing {}: Token did not match specified grammar rule. Line: {}",
        tag, line
    )
}

fn scope_error(kind: ElementKind, line: usize) -> String {
    format!(
        "Element {} is not the current element in scope, probably the expected tag to start the \
         element ({}) is missing. Line: {}",
        kind.label(),
        kind.start_tag(),
        line
    )
}

/// A non-empty single-line value; `<text>` blocks do not qualify.
fn line_value(token: &TagToken) -> Option<&str> {
    match &token.value {
        RawValue::Line(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

/// A non-empty value of either shape.
fn text_or_line(token: &TagToken) -> Option<&str> {
    match &token.value {
        RawValue::Line(value) | RawValue::Text(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

/// A free-text slot that also accepts the two sentinels. Sentinels are only
/// recognized on single-line values; inside a `<text>` block they are
/// ordinary text.
fn line_or_sentinel(token: &TagToken) -> Option<SpdxValue<String>> {
    match &token.value {
        RawValue::Line(value) if value == "NONE" => Some(SpdxValue::None),
        RawValue::Line(value) if value == "NOASSERTION" => Some(SpdxValue::NoAssertion),
        RawValue::Line(value) | RawValue::Text(value) if !value.is_empty() => {
            Some(SpdxValue::Value(value.clone()))
        }
        _ => None,
    }
}

/// A license-expression slot that also accepts the two sentinels.
fn license_value(token: &TagToken) -> Result<SpdxValue<LicenseExpression>, String> {
    let Some(value) = line_value(token) else {
        return Err(grammar_error(&token.tag, token.line));
    };
    match value {
        "NONE" => Ok(SpdxValue::None),
        "NOASSERTION" => Ok(SpdxValue::NoAssertion),
        other => LicenseExpression::parse(other).map(SpdxValue::Value),
    }
}

/// An actor slot that also accepts `NOASSERTION` (but not `NONE`).
fn actor_or_no_assertion(token: &TagToken) -> Result<SpdxValue<Actor>, String> {
    let Some(value) = line_value(token) else {
        return Err(grammar_error(&token.tag, token.line));
    };
    if value == "NOASSERTION" {
        return Ok(SpdxValue::NoAssertion);
    }
    if !has_actor_prefix(value) {
        return Err(grammar_error(&token.tag, token.line));
    }
    parse_actor(value)
        .map(SpdxValue::Value)
        .map_err(|messages| messages.join(", "))
}

fn date_value(token: &TagToken) -> Option<DateTime<Utc>> {
    line_value(token).and_then(|value| datetime_from_str(value).ok())
}

fn parse_range(value: &str) -> Option<(u64, u64)> {
    let pattern = Regex::new(r"^(\d+):(\d+)$").unwrap();
    let captures = pattern.captures(value.trim())?;
    let start = captures[1].parse().ok()?;
    let end = captures[2].parse().ok()?;
    Some((start, end))
}

fn parse_verification_code(value: &str) -> Option<PackageVerificationCode> {
    let pattern = Regex::new(r"^(?P<code>[0-9a-f]+)\s*(\(excludes:\s*(?P<excluded>.+)\))?$").unwrap();
    let captures = pattern.captures(value.trim())?;
    let excluded_files = captures
        .name("excluded")
        .map(|m| {
            m.as_str()
                .split(',')
                .map(|name| name.trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    Some(PackageVerificationCode {
        value: captures["code"].to_string(),
        excluded_files,
    })
}
