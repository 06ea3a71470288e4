//! Integration tests for tag-value document ingestion.

use sbomnom::{
    AnnotationType, ChecksumAlgorithm, FileType, RelationshipType, SpdxValue, TagValueParser,
};

const DOCUMENT_HEADER: &str = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
DocumentName: integration-sample
SPDXID: SPDXRef-DOCUMENT
DocumentNamespace: https://example.com/integration-sample
LicenseListVersion: 3.20
Creator: Organization: Example Corp (contact@example.com)
Creator: Tool: generator-1.0
Created: 2022-12-01T00:00:00Z
CreatorComment: <text>generated for integration testing</text>
";

#[test]
fn test_parse_full_document() {
    let input = format!(
        "{}{}",
        DOCUMENT_HEADER,
        "PackageName: example-package\n\
         SPDXID: SPDXRef-Package\n\
         PackageVersion: 1.2.3\n\
         PackageDownloadLocation: https://example.com/example-1.2.3.tar.gz\n\
         PackageSupplier: Organization: Example Corp (contact@example.com)\n\
         PackageChecksum: SHA256: 11b6d3ee554eedf79299905a98f9b9a04e498210b59f15094c916c91d150efcd\n\
         PackageLicenseConcluded: MIT\n\
         PackageLicenseInfoFromFiles: MIT\n\
         PackageCopyrightText: <text>Copyright Example Corp</text>\n\
         PrimaryPackagePurpose: LIBRARY\n\
         ReleaseDate: 2022-11-30T12:00:00Z\n\
         FileName: src/lib.rs\n\
         SPDXID: SPDXRef-File-Lib\n\
         FileType: SOURCE\n\
         FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n\
         LicenseConcluded: MIT\n\
         LicenseInfoInFile: MIT\n\
         FileCopyrightText: NOASSERTION\n\
         SnippetSPDXID: SPDXRef-Snippet\n\
         SnippetFromFileSPDXID: SPDXRef-File-Lib\n\
         SnippetByteRange: 310:420\n\
         SnippetLineRange: 5:23\n\
         SnippetLicenseConcluded: Apache-2.0\n\
         Annotator: Person: Jane Doe (jane@example.com)\n\
         AnnotationDate: 2022-12-02T08:30:00Z\n\
         AnnotationType: REVIEW\n\
         SPDXREF: SPDXRef-Package\n\
         AnnotationComment: <text>reviewed for release</text>\n\
         Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package\n\
         RelationshipComment: primary artifact\n\
         LicenseID: LicenseRef-Custom\n\
         ExtractedText: <text>Custom license text.</text>\n\
         LicenseName: Custom License\n",
    );

    let document = TagValueParser::parse(&input).unwrap();

    let info = &document.creation_info;
    assert_eq!(info.name, "integration-sample");
    assert_eq!(info.creators.len(), 2);
    assert_eq!(info.license_list_version.map(|v| v.to_string()), Some("3.20".to_string()));
    assert_eq!(
        info.creator_comment.as_deref(),
        Some("generated for integration testing")
    );

    assert_eq!(document.packages.len(), 1);
    let package = &document.packages[0];
    assert_eq!(package.name, "example-package");
    assert_eq!(package.version.as_deref(), Some("1.2.3"));
    assert_eq!(package.checksums[0].algorithm, ChecksumAlgorithm::Sha256);
    assert!(package.release_date.is_some());

    assert_eq!(document.files.len(), 1);
    let file = &document.files[0];
    assert_eq!(file.file_types, vec![FileType::Source]);
    assert_eq!(file.copyright_text, Some(SpdxValue::NoAssertion));

    assert_eq!(document.snippets.len(), 1);
    assert_eq!(document.snippets[0].byte_range, (310, 420));

    assert_eq!(document.annotations.len(), 1);
    assert_eq!(document.annotations[0].annotation_type, AnnotationType::Review);
    assert_eq!(document.annotations[0].spdx_id, "SPDXRef-Package");

    assert_eq!(document.extracted_licensing_info.len(), 1);

    // the explicit DESCRIBES edge plus the synthesized containment edge
    assert_eq!(document.relationships.len(), 2);
    assert_eq!(
        document.relationships[1].relationship_type,
        RelationshipType::Describes
    );
    let containment = &document.relationships[0];
    assert_eq!(containment.relationship_type, RelationshipType::Contains);
    assert_eq!(containment.spdx_element_id, "SPDXRef-Package");
    assert_eq!(
        containment.related_spdx_element_id,
        SpdxValue::Value("SPDXRef-File-Lib".to_string())
    );
}

#[test]
fn test_all_defects_reported_not_just_the_first() {
    let input = format!(
        "{}{}",
        DOCUMENT_HEADER,
        "FileName: one.c\n\
         UnknownTagHere: whatever\n\
         FileName: two.c\n\
         Relationship: SPDXRef-A FRIEND_OF SPDXRef-B\n\
         SnippetSPDXID: SPDXRef-Snippet\n",
    );
    let error = TagValueParser::parse(&input).unwrap_err();
    let messages = error.messages();
    // one.c and two.c are missing ids, the unknown tag is document-level,
    // the relationship type is invalid, and the snippet is missing two
    // required fields
    assert_eq!(messages.len(), 6);
    assert!(messages.iter().any(|m| m.contains("Unknown tag")));
    assert!(messages.iter().any(|m| m.contains("FRIEND_OF")));
    assert_eq!(
        messages
            .iter()
            .filter(|m| m.contains("Error while constructing File"))
            .count(),
        2
    );
    assert_eq!(
        messages
            .iter()
            .filter(|m| m.contains("Error while constructing Snippet"))
            .count(),
        2
    );
}

#[test]
fn test_two_files_after_one_package_share_containment_source() {
    let input = format!(
        "{}{}",
        DOCUMENT_HEADER,
        "PackageName: pkg\n\
         SPDXID: SPDXRef-P\n\
         FileName: a.c\n\
         SPDXID: SPDXRef-A\n\
         FileName: b.c\n\
         SPDXID: SPDXRef-B\n",
    );
    let document = TagValueParser::parse(&input).unwrap();
    let sources: Vec<&str> = document
        .relationships
        .iter()
        .map(|r| r.spdx_element_id.as_str())
        .collect();
    assert_eq!(sources, vec!["SPDXRef-P", "SPDXRef-P"]);
}

#[test]
fn test_value_tag_for_closed_kind_is_scope_error() {
    let input = format!(
        "{}{}",
        DOCUMENT_HEADER,
        "FileName: a.c\n\
         SPDXID: SPDXRef-A\n\
         FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n\
         Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-A\n\
         FileType: SOURCE\n",
    );
    let error = TagValueParser::parse(&input).unwrap_err();
    let messages = error.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Element File is not the current element in scope"));
}

#[test]
fn test_failed_element_does_not_poison_the_next() {
    // the annotation fails typed construction, the file after it still
    // requires only its own fields
    let input = format!(
        "{}{}",
        DOCUMENT_HEADER,
        "Annotator: Person: Jane Doe()\n\
         FileName: fine.c\n\
         SPDXID: SPDXRef-Fine\n",
    );
    let error = TagValueParser::parse(&input).unwrap_err();
    assert!(error
        .messages()
        .iter()
        .all(|m| m.contains("Error while constructing Annotation")));
    assert_eq!(error.messages().len(), 4);
}
