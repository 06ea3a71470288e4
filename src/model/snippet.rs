//! Snippet elements: byte/line regions of a file with their own licensing.

use serde::{Deserialize, Serialize};

use crate::model::license::LicenseExpression;
use crate::model::value::SpdxValue;

/// A region of a file carrying licensing claims of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub spdx_id: String,
    pub file_spdx_id: String,
    pub byte_range: (u64, u64),
    pub line_range: Option<(u64, u64)>,
    pub license_concluded: Option<SpdxValue<LicenseExpression>>,
    pub license_info_in_snippet: SpdxValue<Vec<LicenseExpression>>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub comment: Option<String>,
    pub name: Option<String>,
    pub attribution_texts: Vec<String>,
}
