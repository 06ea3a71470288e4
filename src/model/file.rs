//! File elements.

use serde::{Deserialize, Serialize};

use crate::model::checksum::Checksum;
use crate::model::license::LicenseExpression;
use crate::model::normalize_enum_token;
use crate::model::value::SpdxValue;

/// What a file is, as far as the document claims. A file may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
}

impl FileType {
    pub fn from_token(token: &str) -> Option<Self> {
        match normalize_enum_token(token).as_str() {
            "SOURCE" => Some(FileType::Source),
            "BINARY" => Some(FileType::Binary),
            "ARCHIVE" => Some(FileType::Archive),
            "APPLICATION" => Some(FileType::Application),
            "AUDIO" => Some(FileType::Audio),
            "IMAGE" => Some(FileType::Image),
            "TEXT" => Some(FileType::Text),
            "VIDEO" => Some(FileType::Video),
            "DOCUMENTATION" => Some(FileType::Documentation),
            "SPDX" => Some(FileType::Spdx),
            "OTHER" => Some(FileType::Other),
            _ => None,
        }
    }
}

/// A single file covered by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub spdx_id: String,
    pub checksums: Vec<Checksum>,
    pub file_types: Vec<FileType>,
    pub license_concluded: Option<SpdxValue<LicenseExpression>>,
    pub license_info_in_file: SpdxValue<Vec<LicenseExpression>>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub comment: Option<String>,
    pub notice: Option<String>,
    pub contributors: Vec<String>,
    pub attribution_texts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_token() {
        assert_eq!(FileType::from_token("SOURCE"), Some(FileType::Source));
        assert_eq!(FileType::from_token("documentation"), Some(FileType::Documentation));
        assert_eq!(FileType::from_token("EXECUTABLE"), None);
    }
}
