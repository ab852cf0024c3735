//! Submission workflow
//!
//! Runs the three backend calls strictly one after another: spreadsheet,
//! images, then the JSON summary. The first failure aborts the rest; earlier
//! steps are not rolled back.

use crate::client::{EvidenceApi, UploadFile};
use crate::state::{EvidenceForm, FileRef, SubmissionReceipt};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Which step of a submission failed
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Spreadsheet upload failed: {0:#}")]
    Spreadsheet(anyhow::Error),

    #[error("Image upload failed: {0:#}")]
    Images(anyhow::Error),

    #[error("Submission failed: {0:#}")]
    Submission(anyhow::Error),
}

/// Multipart file name of an image: owning entry, position, original name
pub fn image_part_name(entry: usize, position: usize, name: &str) -> String {
    format!("evidence_{entry}_{position}_{name}")
}

/// Every image of every entry, flattened in display order with its part name
pub fn image_parts(form: &EvidenceForm) -> Vec<(String, &FileRef)> {
    form.evidence()
        .iter()
        .enumerate()
        .flat_map(|(entry, e)| {
            e.images
                .iter()
                .enumerate()
                .map(move |(position, image)| (image_part_name(entry, position, &image.name), image))
        })
        .collect()
}

async fn read_upload(file: &FileRef, file_name: String) -> Result<UploadFile, SubmitError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|source| SubmitError::ReadFile {
            path: file.path.clone(),
            source,
        })?;
    Ok(UploadFile { file_name, bytes })
}

/// Drives one submission against an [`EvidenceApi`]
pub struct SubmissionOrchestrator<'a, A: EvidenceApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: EvidenceApi + ?Sized> SubmissionOrchestrator<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Upload everything and submit the summary.
    ///
    /// The caller gates this on `required_missing()`; the form is not
    /// validated again here.
    pub async fn submit(&self, form: &EvidenceForm) -> Result<SubmissionReceipt, SubmitError> {
        if let Some(spreadsheet) = form.spreadsheet() {
            let upload = read_upload(spreadsheet, spreadsheet.name.clone()).await?;
            let receipt = self
                .api
                .upload_spreadsheet(upload)
                .await
                .map_err(SubmitError::Spreadsheet)?;
            info!(
                bytes = receipt.bytes,
                filename = %receipt.filename,
                "Spreadsheet uploaded"
            );
        } else {
            debug!("No spreadsheet selected, skipping upload");
        }

        let mut images = Vec::new();
        for (part_name, image) in image_parts(form) {
            images.push(read_upload(image, part_name).await?);
        }
        let receipt = self
            .api
            .upload_images(images)
            .await
            .map_err(SubmitError::Images)?;
        info!(
            count = receipt.count,
            total_bytes = receipt.total_bytes,
            "Images uploaded"
        );

        let receipt = self
            .api
            .submit(&form.payload())
            .await
            .map_err(SubmitError::Submission)?;
        info!(id = %receipt.id, status = %receipt.status, "Evidence submitted");

        Ok(receipt)
    }
}
