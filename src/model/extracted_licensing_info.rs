//! Licensing info extracted from files but absent from the license list.

use serde::{Deserialize, Serialize};

use crate::model::value::SpdxValue;

/// A custom license discovered in the analyzed material. Every field is
/// optional; an entry with nothing but an id is still a valid element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLicensingInfo {
    pub license_id: Option<String>,
    pub extracted_text: Option<String>,
    pub license_name: Option<SpdxValue<String>>,
    pub cross_references: Vec<String>,
    pub comment: Option<String>,
}
