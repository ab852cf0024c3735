//! Request schema of `POST /api/submit`
//!
//! Both sections must be present and non-null. Their contents are not
//! validated; the typed views below are only read for logging.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Section absent from a submission
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    #[error("application section missing")]
    Application,

    #[error("evidence section missing")]
    Evidence,
}

/// Body as received; either section may be missing or null
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitRequest {
    pub application: Option<Value>,
    pub evidence: Option<Value>,
}

/// A submission with both sections present, in whatever shape they came
#[derive(Debug)]
pub struct Submission {
    pub application: Value,
    pub evidence: Value,
}

/// Best-effort typed view of the application section
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationSection {
    pub name: Option<String>,
    pub area: Option<String>,
    pub center_id: Option<String>,
}

/// Best-effort typed view of one evidence entry
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvidenceSection {
    pub category: Option<String>,
    pub screenshot_source: Option<String>,
    pub attachment_type: Option<String>,
    pub images_count: Option<u64>,
}

impl SubmitRequest {
    pub fn validate(self) -> Result<Submission, MissingField> {
        let application = self.application.ok_or(MissingField::Application)?;
        let evidence = self.evidence.ok_or(MissingField::Evidence)?;
        Ok(Submission {
            application,
            evidence,
        })
    }
}

impl Submission {
    /// Application fields that decode; anything else reads as unset
    pub fn application_section(&self) -> ApplicationSection {
        ApplicationSection::deserialize(&self.application).unwrap_or_default()
    }

    /// Entries of an evidence array; a non-array section has none
    pub fn evidence_sections(&self) -> Vec<EvidenceSection> {
        self.evidence
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| EvidenceSection::deserialize(e).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}
