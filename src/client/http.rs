//! reqwest client for communicating with the evidence backend

use super::traits::{EvidenceApi, UploadFile};
use crate::state::{
    Health, ImagesReceipt, SpreadsheetReceipt, SubmissionPayload, SubmissionReceipt, IMAGES_FIELD,
    SPREADSHEET_FIELD,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

/// Client for the evidence backend's HTTP API
pub struct HttpEvidenceClient {
    client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl HttpEvidenceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("evidence-center/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Fail on non-2xx statuses, then decode the JSON body
async fn decode<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
    let response = response
        .error_for_status()
        .map_err(|e| anyhow!("Failed to {}: {}", what, e))?;
    response
        .json::<T>()
        .await
        .map_err(|e| anyhow!("Failed to decode {} response: {}", what, e))
}

fn file_part(file: UploadFile) -> Part {
    Part::bytes(file.bytes).file_name(file.file_name)
}

#[async_trait]
impl EvidenceApi for HttpEvidenceClient {
    async fn health(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach backend: {}", e))?;
        let health: Health = decode(response, "check health").await?;
        Ok(health.ok)
    }

    async fn download_template(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url("/api/template"))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| anyhow!("Failed to download template: {}", e))?;
        response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read template: {}", e))
    }

    async fn upload_spreadsheet(&self, file: UploadFile) -> Result<SpreadsheetReceipt> {
        let form = Form::new().part(SPREADSHEET_FIELD, file_part(file));
        let response = self
            .client
            .post(self.url("/api/upload-excel"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to upload spreadsheet: {}", e))?;
        decode(response, "upload spreadsheet").await
    }

    async fn upload_images(&self, files: Vec<UploadFile>) -> Result<ImagesReceipt> {
        let form = files
            .into_iter()
            .fold(Form::new(), |form, file| form.part(IMAGES_FIELD, file_part(file)));
        let response = self
            .client
            .post(self.url("/api/upload-images"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to upload images: {}", e))?;
        decode(response, "upload images").await
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        let response = self
            .client
            .post(self.url("/api/submit"))
            .json(payload)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to submit evidence: {}", e))?;
        decode(response, "submit evidence").await
    }
}
