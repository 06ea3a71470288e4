//! Integration tests for mapping-shaped relationship inference.

use std::io::Write;

use sbomnom::parser::{load_mapping_document, parse_all_relationships};
use sbomnom::{RelationshipType, SpdxValue};

#[test]
fn test_infer_from_yaml_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    let yaml = r#"SPDXID: SPDXRef-DOCUMENT
documentDescribes:
  - SPDXRef-Package
packages:
  - SPDXID: SPDXRef-Package
    hasFiles:
      - SPDXRef-File
relationships:
  - spdxElementId: SPDXRef-Package
    relationshipType: DEPENDS_ON
    relatedSpdxElement: SPDXRef-Other
"#;
    write!(file, "{}", yaml).unwrap();

    let doc = load_mapping_document(file.path()).unwrap();
    let relationships = parse_all_relationships(&doc).unwrap();

    assert_eq!(relationships.len(), 3);
    assert_eq!(relationships[0].relationship_type, RelationshipType::DependsOn);
    assert_eq!(relationships[1].relationship_type, RelationshipType::Describes);
    assert_eq!(relationships[2].relationship_type, RelationshipType::Contains);
}

#[test]
fn test_infer_from_json_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        file,
        "{}",
        r#"{
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-Package"],
            "relationships": [{
                "spdxElementId": "SPDXRef-Package",
                "relationshipType": "DESCRIBED_BY",
                "relatedSpdxElement": "SPDXRef-DOCUMENT",
                "comment": "already stated the other way round"
            }]
        }"#
    )
    .unwrap();

    let doc = load_mapping_document(file.path()).unwrap();
    let relationships = parse_all_relationships(&doc).unwrap();

    // the implied DESCRIBES edge is the inverse of the declared one
    assert_eq!(relationships.len(), 1);
    assert_eq!(
        relationships[0].relationship_type,
        RelationshipType::DescribedBy
    );
}

#[test]
fn test_load_mapping_document_missing_file() {
    let error = load_mapping_document("/nonexistent/document.yaml").unwrap_err();
    assert!(error.contains("Failed to read"));
}

#[test]
fn test_repeated_file_dependencies_produce_distinct_edges() {
    let doc = serde_json::json!({
        "SPDXID": "SPDXRef-DOCUMENT",
        "files": [
            {"SPDXID": "SPDXRef-A", "fileDependencies": ["SPDXRef-Dep"]},
            {"SPDXID": "SPDXRef-B", "fileDependencies": ["SPDXRef-Dep"]}
        ]
    });
    let relationships = parse_all_relationships(&doc).unwrap();
    assert_eq!(relationships.len(), 2);
    assert!(relationships
        .iter()
        .all(|r| r.relationship_type == RelationshipType::DependencyOf
            && r.spdx_element_id == "SPDXRef-Dep"));
}

#[test]
fn test_failed_phase_does_not_stop_later_phases() {
    // describes fails (no document id), hasFiles still infers its edge, and
    // the whole call reports the describes failure
    let doc = serde_json::json!({
        "documentDescribes": ["SPDXRef-Package"],
        "packages": [{"SPDXID": "SPDXRef-Package", "hasFiles": ["SPDXRef-File"]}]
    });
    let error = parse_all_relationships(&doc).unwrap_err();
    assert_eq!(error.messages().len(), 1);
    assert!(error.messages()[0].contains("describes relationships"));
}

#[test]
fn test_related_element_sentinels() {
    let doc = serde_json::json!({
        "relationships": [
            {"spdxElementId": "SPDXRef-A", "relationshipType": "CONTAINS",
             "relatedSpdxElement": "NONE"},
            {"spdxElementId": "SPDXRef-B", "relationshipType": "DEPENDS_ON",
             "relatedSpdxElement": "NOASSERTION"}
        ]
    });
    let relationships = parse_all_relationships(&doc).unwrap();
    assert_eq!(relationships[0].related_spdx_element_id, SpdxValue::None);
    assert_eq!(
        relationships[1].related_spdx_element_id,
        SpdxValue::NoAssertion
    );
}
