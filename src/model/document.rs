//! Document-level types: creation info and the assembled document graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::actor::Actor;
use crate::model::annotation::Annotation;
use crate::model::checksum::Checksum;
use crate::model::extracted_licensing_info::ExtractedLicensingInfo;
use crate::model::file::File;
use crate::model::package::Package;
use crate::model::relationship::Relationship;
use crate::model::snippet::Snippet;

/// A `major.minor` version, used for the license list version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn from_string(value: &str) -> Result<Self, String> {
        let err = || format!("{} is not a valid version, M.N format expected", value);
        let (major, minor) = value.trim().split_once('.').ok_or_else(err)?;
        Ok(Version {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A reference to an element living in another SPDX document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocumentRef {
    pub document_ref_id: String,
    pub document_uri: String,
    pub checksum: Checksum,
}

/// Document-level metadata, built before any element accumulator opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationInfo {
    pub spdx_version: String,
    pub spdx_id: String,
    pub name: String,
    pub document_namespace: String,
    pub creators: Vec<Actor>,
    pub created: DateTime<Utc>,
    pub creator_comment: Option<String>,
    pub data_license: String,
    pub external_document_refs: Vec<ExternalDocumentRef>,
    pub license_list_version: Option<Version>,
    pub document_comment: Option<String>,
}

/// The fully assembled document graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub creation_info: CreationInfo,
    pub packages: Vec<Package>,
    pub files: Vec<File>,
    pub snippets: Vec<Snippet>,
    pub annotations: Vec<Annotation>,
    pub relationships: Vec<Relationship>,
    pub extracted_licensing_info: Vec<ExtractedLicensingInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_string() {
        assert_eq!(Version::from_string("3.20"), Ok(Version::new(3, 20)));
        assert_eq!(Version::from_string(" 1.0 "), Ok(Version::new(1, 0)));
    }

    #[test]
    fn test_version_from_invalid_string() {
        assert!(Version::from_string("3").is_err());
        assert!(Version::from_string("3.x").is_err());
        assert!(Version::from_string("version 3.20").is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(3, 20).to_string(), "3.20");
    }
}
