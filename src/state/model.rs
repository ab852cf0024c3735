//! Evidence submission domain types shared by the client and the server

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Multipart field carrying the spreadsheet upload
pub const SPREADSHEET_FIELD: &str = "excel";

/// Multipart field carrying the evidence images
pub const IMAGES_FIELD: &str = "images";

/// Maximum number of images accepted by a single upload
pub const MAX_IMAGES: usize = 20;

/// Application names offered by the form
pub const APPLICATION_NAMES: &[&str] = &["CPLAT", "APP1", "APP2"];

/// Evidence categories offered by the form
pub const EVIDENCE_CATEGORIES: &[&str] = &[
    "BoKS Entitlements (AIMS)",
    "Access Review (Quarterly)",
    "User Provisioning Evidence",
];

/// Reference to a file on local disk. Bytes are only read at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Original file name (last path component)
    pub name: String,
    pub path: PathBuf,
}

impl FileRef {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// Application metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub name: String,
    pub area: String,
    pub center_id: String,
}

impl Default for ApplicationInfo {
    fn default() -> Self {
        Self {
            name: APPLICATION_NAMES[0].to_string(),
            area: "COMMONS PLATFORM".to_string(),
            center_id: "C-306701".to_string(),
        }
    }
}

/// Addressable field of [`ApplicationInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationField {
    Name,
    Area,
    CenterId,
}

impl ApplicationInfo {
    pub fn get(&self, field: ApplicationField) -> &str {
        match field {
            ApplicationField::Name => &self.name,
            ApplicationField::Area => &self.area,
            ApplicationField::CenterId => &self.center_id,
        }
    }

    /// Returns a copy with one field replaced
    pub fn with_field(self, field: ApplicationField, value: String) -> Self {
        match field {
            ApplicationField::Name => Self { name: value, ..self },
            ApplicationField::Area => Self { area: value, ..self },
            ApplicationField::CenterId => Self {
                center_id: value,
                ..self
            },
        }
    }
}

/// Addressable text field of [`EvidenceEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceField {
    Category,
    ScreenshotSource,
    AttachmentType,
}

/// One compliance artifact: category, screenshot source, optional type and images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceEntry {
    pub category: String,
    pub screenshot_source: String,
    /// Empty means no attachment type was given
    pub attachment_type: String,
    pub images: Vec<FileRef>,
}

impl Default for EvidenceEntry {
    fn default() -> Self {
        Self {
            category: EVIDENCE_CATEGORIES[0].to_string(),
            screenshot_source: String::new(),
            attachment_type: String::new(),
            images: Vec::new(),
        }
    }
}

impl EvidenceEntry {
    /// Category, source and at least one image are present
    pub fn is_complete(&self) -> bool {
        !self.category.is_empty() && !self.screenshot_source.is_empty() && !self.images.is_empty()
    }

    pub fn get(&self, field: EvidenceField) -> &str {
        match field {
            EvidenceField::Category => &self.category,
            EvidenceField::ScreenshotSource => &self.screenshot_source,
            EvidenceField::AttachmentType => &self.attachment_type,
        }
    }

    /// Returns a copy with one text field replaced
    pub fn with_field(self, field: EvidenceField, value: String) -> Self {
        match field {
            EvidenceField::Category => Self {
                category: value,
                ..self
            },
            EvidenceField::ScreenshotSource => Self {
                screenshot_source: value,
                ..self
            },
            EvidenceField::AttachmentType => Self {
                attachment_type: value,
                ..self
            },
        }
    }

    pub fn summary(&self) -> EvidenceSummary {
        EvidenceSummary {
            category: self.category.clone(),
            screenshot_source: self.screenshot_source.clone(),
            attachment_type: self.attachment_type.clone(),
            images_count: self.images.len(),
        }
    }
}

/// Projection of an evidence entry sent with the submission (no image bytes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceSummary {
    pub category: String,
    pub screenshot_source: String,
    /// Empty when no attachment type was given
    #[serde(default)]
    pub attachment_type: String,
    pub images_count: usize,
}

/// JSON body of `POST /api/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub application: ApplicationInfo,
    pub evidence: Vec<EvidenceSummary>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}

/// Response of `POST /api/upload-excel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetReceipt {
    pub bytes: u64,
    pub filename: String,
}

/// Response of `POST /api/upload-images`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesReceipt {
    pub count: usize,
    pub total_bytes: u64,
}

/// Response of `POST /api/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub status: String,
    pub id: String,
}
