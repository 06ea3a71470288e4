//! Structural relationship inference for mapping-shaped documents.
//!
//! Besides explicitly declared relationships, a mapping-shaped document
//! implies edges through three structural fields: the document-level
//! `documentDescribes` list, each package's `hasFiles` list and each file's
//! deprecated `fileDependencies` list. This module materializes those edges
//! while suppressing duplicates of already-present ones. An edge and its
//! paired inverse count as the same fact, and comments never participate in
//! edge identity.

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use serde_json::Value as JsonValue;

use crate::model::{Relationship, RelationshipKey, RelationshipType, SpdxValue};
use crate::parser::error::ParseError;
use crate::parser::logger::ErrorLog;

/// Load a mapping-shaped document from a YAML or JSON file into a JSON
/// value. YAML input is transcoded so both formats share one working type.
pub fn load_mapping_document<P: AsRef<Path>>(path: P) -> Result<JsonValue, String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("yaml") | Some("yml") => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML: {}", e))?;
            serde_json::to_value(yaml).map_err(|e| format!("Failed to convert YAML document: {}", e))
        }
        _ => serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e)),
    }
}

/// Parse the explicit relationships of a mapping-shaped document and infer
/// the structural ones.
///
/// The three inference phases (describes, contains, dependencies) run
/// independently: a failed candidate never stops its siblings, each phase
/// batches its own failures into one message, and every phase runs even
/// when an earlier one failed. The result is either the complete
/// relationship list or every defect collected across all phases.
pub fn parse_all_relationships(doc: &JsonValue) -> Result<Vec<Relationship>, ParseError> {
    let mut logger = ErrorLog::new();
    let mut relationships = Vec::new();

    if let Some(dicts) = doc.get("relationships").and_then(JsonValue::as_array) {
        match parse_relationships(dicts) {
            Ok(mut explicit) => relationships.append(&mut explicit),
            Err(messages) => logger.extend(messages),
        }
    }

    let mut seen = edge_keys(&relationships);

    let doc_spdx_id = doc.get("SPDXID").and_then(JsonValue::as_str);
    if let Some(described) = doc.get("documentDescribes").and_then(JsonValue::as_array) {
        if let Err(message) = append_describes(doc_spdx_id, described, &mut relationships, &mut seen)
        {
            logger.append(message);
        }
    }

    if let Some(packages) = doc.get("packages").and_then(JsonValue::as_array) {
        if let Err(message) = append_contains(packages, &mut relationships, &mut seen) {
            logger.append(message);
        }
    }

    if let Some(files) = doc.get("files").and_then(JsonValue::as_array) {
        if let Err(message) = append_file_dependencies(files, &mut relationships) {
            logger.append(message);
        }
        relationships.extend(artifact_of_relationships(files));
    }

    if logger.has_messages() {
        return Err(ParseError::new(logger.into_messages()));
    }
    tracing::debug!("normalized {} relationships", relationships.len());
    Ok(relationships)
}

fn parse_relationships(dicts: &[JsonValue]) -> Result<Vec<Relationship>, Vec<String>> {
    let mut messages = Vec::new();
    let mut relationships = Vec::new();
    for dict in dicts {
        match parse_relationship(dict) {
            Ok(relationship) => relationships.push(relationship),
            Err(message) => messages.push(message),
        }
    }
    if messages.is_empty() {
        Ok(relationships)
    } else {
        Err(messages)
    }
}

fn parse_relationship(dict: &JsonValue) -> Result<Relationship, String> {
    let mut failures = Vec::new();
    let spdx_element_id = dict.get("spdxElementId").and_then(JsonValue::as_str);
    if spdx_element_id.is_none() {
        failures.push("missing spdxElementId".to_string());
    }
    let related_spdx_element = dict.get("relatedSpdxElement").and_then(JsonValue::as_str);
    if related_spdx_element.is_none() {
        failures.push("missing relatedSpdxElement".to_string());
    }
    let relationship_type = match dict.get("relationshipType").and_then(JsonValue::as_str) {
        Some(token) => match RelationshipType::from_token(token) {
            Some(relationship_type) => Some(relationship_type),
            None => {
                failures.push(format!("RelationshipType {} is not valid", token));
                None
            }
        },
        None => {
            failures.push("missing relationshipType".to_string());
            None
        }
    };
    let comment = dict
        .get("comment")
        .and_then(JsonValue::as_str)
        .map(str::to_string);
    if !failures.is_empty() {
        return Err(format!(
            "Error while parsing relationship: [{}]",
            failures.join(", ")
        ));
    }
    Ok(Relationship::new(
        spdx_element_id.unwrap(),
        relationship_type.unwrap(),
        SpdxValue::from_token(related_spdx_element.unwrap()),
        comment,
    ))
}

fn edge_keys(relationships: &[Relationship]) -> IndexSet<RelationshipKey> {
    relationships.iter().map(Relationship::key).collect()
}

/// Comment-insensitive membership, counting an edge's paired inverse as the
/// edge itself.
fn relationship_exists(relationship: &Relationship, seen: &IndexSet<RelationshipKey>) -> bool {
    if seen.contains(&relationship.key()) {
        return true;
    }
    relationship
        .inverse()
        .is_some_and(|inverse| seen.contains(&inverse.key()))
}

fn accept(
    candidate: Relationship,
    relationships: &mut Vec<Relationship>,
    seen: &mut IndexSet<RelationshipKey>,
) {
    if !relationship_exists(&candidate, seen) {
        seen.insert(candidate.key());
        relationships.push(candidate);
    }
}

/// One DESCRIBES edge per described id, from the document's own id.
fn append_describes(
    doc_spdx_id: Option<&str>,
    described: &[JsonValue],
    relationships: &mut Vec<Relationship>,
    seen: &mut IndexSet<RelationshipKey>,
) -> Result<(), String> {
    let mut failures = Vec::new();
    for entry in described {
        let candidate = match (doc_spdx_id, entry.as_str()) {
            (Some(doc_id), Some(spdx_id)) => Relationship::new(
                doc_id,
                RelationshipType::Describes,
                SpdxValue::Value(spdx_id.to_string()),
                None,
            ),
            (None, _) => {
                failures.push("documentDescribes requires the document SPDXID".to_string());
                continue;
            }
            (_, None) => {
                failures.push(format!("Invalid documentDescribes entry: {}", entry));
                continue;
            }
        };
        accept(candidate, relationships, seen);
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Error while creating describes relationships: [{}]",
            failures.join(", ")
        ))
    }
}

/// One CONTAINS edge per package/contained-file pair.
fn append_contains(
    packages: &[JsonValue],
    relationships: &mut Vec<Relationship>,
    seen: &mut IndexSet<RelationshipKey>,
) -> Result<(), String> {
    let mut failures = Vec::new();
    for package in packages {
        let package_spdx_id = package.get("SPDXID").and_then(JsonValue::as_str);
        let Some(contained) = package.get("hasFiles").and_then(JsonValue::as_array) else {
            continue;
        };
        for entry in contained {
            let candidate = match (package_spdx_id, entry.as_str()) {
                (Some(package_id), Some(file_id)) => Relationship::new(
                    package_id,
                    RelationshipType::Contains,
                    SpdxValue::Value(file_id.to_string()),
                    None,
                ),
                (None, _) => {
                    failures.push("hasFiles requires the package SPDXID".to_string());
                    continue;
                }
                (_, None) => {
                    failures.push(format!("Invalid hasFiles entry: {}", entry));
                    continue;
                }
            };
            accept(candidate, relationships, seen);
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Error while creating contains relationships: [{}]",
            failures.join(", ")
        ))
    }
}

/// One DEPENDENCY_OF edge per legacy file dependency, oriented from the
/// dependency to the dependent file. This field is one-directional by
/// convention; duplicates are kept as-is, with no suppression of any kind.
fn append_file_dependencies(
    files: &[JsonValue],
    relationships: &mut Vec<Relationship>,
) -> Result<(), String> {
    let mut failures = Vec::new();
    for file in files {
        let file_spdx_id = file.get("SPDXID").and_then(JsonValue::as_str);
        let Some(dependencies) = file.get("fileDependencies").and_then(JsonValue::as_array) else {
            continue;
        };
        for entry in dependencies {
            match (file_spdx_id, entry.as_str()) {
                (Some(file_id), Some(dependency_id)) => relationships.push(Relationship::new(
                    dependency_id,
                    RelationshipType::DependencyOf,
                    SpdxValue::Value(file_id.to_string()),
                    None,
                )),
                (None, _) => {
                    failures.push("fileDependencies requires the file SPDXID".to_string());
                }
                (_, None) => {
                    failures.push(format!("Invalid fileDependencies entry: {}", entry));
                }
            }
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Error while creating dependency relationships: [{}]",
            failures.join(", ")
        ))
    }
}

/// The deprecated `artifactOf` field is recognized but never yields
/// relationships.
fn artifact_of_relationships(_files: &[JsonValue]) -> Vec<Relationship> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edge(source: &str, relationship_type: RelationshipType, target: &str) -> Relationship {
        Relationship::new(
            source,
            relationship_type,
            SpdxValue::Value(target.to_string()),
            None,
        )
    }

    #[test]
    fn test_parse_explicit_relationships() {
        let doc = json!({
            "relationships": [
                {
                    "spdxElementId": "SPDXRef-DOCUMENT",
                    "relationshipType": "DESCRIBES",
                    "relatedSpdxElement": "SPDXRef-Package",
                    "comment": "top level"
                },
                {
                    "spdxElementId": "SPDXRef-Package",
                    "relationshipType": "DEPENDS_ON",
                    "relatedSpdxElement": "NOASSERTION"
                }
            ]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 2);
        assert_eq!(relationships[0].comment.as_deref(), Some("top level"));
        assert_eq!(
            relationships[1].related_spdx_element_id,
            SpdxValue::NoAssertion
        );
    }

    #[test]
    fn test_document_describes_inference() {
        let doc = json!({
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-Package", "SPDXRef-File"]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(
            relationships,
            vec![
                edge("SPDXRef-DOCUMENT", RelationshipType::Describes, "SPDXRef-Package"),
                edge("SPDXRef-DOCUMENT", RelationshipType::Describes, "SPDXRef-File"),
            ]
        );
    }

    #[test]
    fn test_describes_duplicate_suppression() {
        let doc = json!({
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-Package"],
            "relationships": [{
                "spdxElementId": "SPDXRef-DOCUMENT",
                "relationshipType": "DESCRIBES",
                "relatedSpdxElement": "SPDXRef-Package"
            }]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 1);
    }

    #[test]
    fn test_describes_inverse_suppression() {
        let doc = json!({
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-Package"],
            "relationships": [{
                "spdxElementId": "SPDXRef-Package",
                "relationshipType": "DESCRIBED_BY",
                "relatedSpdxElement": "SPDXRef-DOCUMENT"
            }]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 1);
        assert_eq!(
            relationships[0].relationship_type,
            RelationshipType::DescribedBy
        );
    }

    #[test]
    fn test_comment_insensitive_suppression() {
        let doc = json!({
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-Package"],
            "relationships": [{
                "spdxElementId": "SPDXRef-DOCUMENT",
                "relationshipType": "DESCRIBES",
                "relatedSpdxElement": "SPDXRef-Package",
                "comment": "only difference"
            }]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 1);
    }

    #[test]
    fn test_repeated_describes_entries_are_suppressed() {
        let doc = json!({
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-Package", "SPDXRef-Package"]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 1);
    }

    #[test]
    fn test_has_files_inference_and_inverse_suppression() {
        let doc = json!({
            "SPDXID": "SPDXRef-DOCUMENT",
            "packages": [
                {
                    "SPDXID": "SPDXRef-Package",
                    "hasFiles": ["SPDXRef-FileA", "SPDXRef-FileB", "SPDXRef-FileA"]
                }
            ],
            "relationships": [{
                "spdxElementId": "SPDXRef-FileB",
                "relationshipType": "CONTAINED_BY",
                "relatedSpdxElement": "SPDXRef-Package"
            }]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 2);
        assert_eq!(
            relationships[1],
            edge("SPDXRef-Package", RelationshipType::Contains, "SPDXRef-FileA")
        );
    }

    #[test]
    fn test_file_dependencies_are_never_suppressed() {
        let doc = json!({
            "files": [
                {"SPDXID": "SPDXRef-FileA", "fileDependencies": ["SPDXRef-Dep"]},
                {"SPDXID": "SPDXRef-FileA", "fileDependencies": ["SPDXRef-Dep"]}
            ]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert_eq!(relationships.len(), 2);
        assert_eq!(relationships[0], relationships[1]);
        assert_eq!(
            relationships[0],
            edge("SPDXRef-Dep", RelationshipType::DependencyOf, "SPDXRef-FileA")
        );
    }

    #[test]
    fn test_artifact_of_yields_nothing() {
        let doc = json!({
            "files": [
                {"SPDXID": "SPDXRef-File", "artifactOf": [{"name": "upstream"}]}
            ]
        });
        let relationships = parse_all_relationships(&doc).unwrap();
        assert!(relationships.is_empty());
    }

    #[test]
    fn test_every_defective_relationship_is_reported() {
        let doc = json!({
            "relationships": [
                {"relationshipType": "DESCRIBES", "relatedSpdxElement": "SPDXRef-A"},
                {"spdxElementId": "SPDXRef-B", "relationshipType": "FRIEND_OF",
                 "relatedSpdxElement": "SPDXRef-C"}
            ]
        });
        let error = parse_all_relationships(&doc).unwrap_err();
        let messages = error.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("missing spdxElementId"));
        assert!(messages[1].contains("RelationshipType FRIEND_OF is not valid"));
    }

    #[test]
    fn test_phase_failures_are_batched_and_independent() {
        let doc = json!({
            "documentDescribes": ["SPDXRef-Package"],
            "packages": [{"hasFiles": ["SPDXRef-File", "SPDXRef-Other"]}],
            "files": [{"fileDependencies": ["SPDXRef-Dep"]}]
        });
        let error = parse_all_relationships(&doc).unwrap_err();
        let messages = error.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("describes relationships"));
        assert!(messages[1].contains("contains relationships"));
        assert!(messages[1].matches("package SPDXID").count() == 2);
        assert!(messages[2].contains("dependency relationships"));
    }
}
