//! Annotation elements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::actor::Actor;
use crate::model::normalize_enum_token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationType {
    Review,
    Other,
}

impl AnnotationType {
    pub fn from_token(token: &str) -> Option<Self> {
        match normalize_enum_token(token).as_str() {
            "REVIEW" => Some(AnnotationType::Review),
            "OTHER" => Some(AnnotationType::Other),
            _ => None,
        }
    }
}

/// A dated remark attached to some element of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub spdx_id: String,
    pub annotation_type: AnnotationType,
    pub annotator: Actor,
    pub annotation_date: DateTime<Utc>,
    pub annotation_comment: String,
}
