//! Package elements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::actor::Actor;
use crate::model::checksum::Checksum;
use crate::model::license::LicenseExpression;
use crate::model::normalize_enum_token;
use crate::model::value::SpdxValue;

/// Verification code computed over a package's files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVerificationCode {
    pub value: String,
    pub excluded_files: Vec<String>,
}

/// The role a package plays, as declared by `PrimaryPackagePurpose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagePurpose {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    Source,
    Archive,
    File,
    Install,
    Other,
}

impl PackagePurpose {
    pub fn from_token(token: &str) -> Option<Self> {
        match normalize_enum_token(token).as_str() {
            "APPLICATION" => Some(PackagePurpose::Application),
            "FRAMEWORK" => Some(PackagePurpose::Framework),
            "LIBRARY" => Some(PackagePurpose::Library),
            "CONTAINER" => Some(PackagePurpose::Container),
            "OPERATING_SYSTEM" => Some(PackagePurpose::OperatingSystem),
            "DEVICE" => Some(PackagePurpose::Device),
            "FIRMWARE" => Some(PackagePurpose::Firmware),
            "SOURCE" => Some(PackagePurpose::Source),
            "ARCHIVE" => Some(PackagePurpose::Archive),
            "FILE" => Some(PackagePurpose::File),
            "INSTALL" => Some(PackagePurpose::Install),
            "OTHER" => Some(PackagePurpose::Other),
            _ => None,
        }
    }
}

/// Category of an external package reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalPackageRefCategory {
    Security,
    PackageManager,
    PersistentId,
    Other,
}

impl ExternalPackageRefCategory {
    pub fn from_token(token: &str) -> Option<Self> {
        match normalize_enum_token(token).as_str() {
            "SECURITY" => Some(ExternalPackageRefCategory::Security),
            "PACKAGE_MANAGER" => Some(ExternalPackageRefCategory::PackageManager),
            "PERSISTENT_ID" => Some(ExternalPackageRefCategory::PersistentId),
            "OTHER" => Some(ExternalPackageRefCategory::Other),
            _ => None,
        }
    }
}

/// A pointer from a package into an external naming scheme (CPE, purl, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPackageRef {
    pub category: ExternalPackageRefCategory,
    pub reference_type: String,
    pub locator: String,
    pub comment: Option<String>,
}

/// A package (distribution unit) covered by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub spdx_id: String,
    pub download_location: Option<SpdxValue<String>>,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub supplier: Option<SpdxValue<Actor>>,
    pub originator: Option<SpdxValue<Actor>>,
    pub files_analyzed: bool,
    pub verification_code: Option<PackageVerificationCode>,
    pub checksums: Vec<Checksum>,
    pub homepage: Option<SpdxValue<String>>,
    pub source_info: Option<String>,
    pub license_concluded: Option<SpdxValue<LicenseExpression>>,
    pub license_info_from_files: SpdxValue<Vec<LicenseExpression>>,
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
