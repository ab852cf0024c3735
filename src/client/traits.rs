//! Trait abstraction for the backend client to enable mocking in tests

use crate::state::{ImagesReceipt, SpreadsheetReceipt, SubmissionPayload, SubmissionReceipt};
use anyhow::Result;
use async_trait::async_trait;

/// A file read into memory, ready to be sent as one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Name sent as the part's file name
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Operations offered by the evidence backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvidenceApi: Send + Sync {
    /// Check if the backend is reachable
    async fn health(&self) -> Result<bool>;

    /// Fetch the sample spreadsheet template (CSV text)
    async fn download_template(&self) -> Result<String>;

    /// Upload the spreadsheet as a single-file multipart request
    async fn upload_spreadsheet(&self, file: UploadFile) -> Result<SpreadsheetReceipt>;

    /// Upload all evidence images in one multipart request
    async fn upload_images(&self, files: Vec<UploadFile>) -> Result<ImagesReceipt>;

    /// Submit the evidence summary
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt>;
}
