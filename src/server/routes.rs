use axum::{
    body::Bytes,
    extract::Multipart,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use super::{error::ApiError, schema::SubmitRequest};
use crate::state::{
    Health, ImagesReceipt, SpreadsheetReceipt, SubmissionReceipt, IMAGES_FIELD, MAX_IMAGES,
    SPREADSHEET_FIELD,
};

/// Sample spreadsheet served by `GET /api/template`
pub const TEMPLATE_CSV: &str = "User,Role,Repository,Permission,Notes\n\
                                alice,Developer,repo-a,write,\n\
                                bob,Admin,repo-b,admin,\n";

pub async fn health_handler() -> Json<Health> {
    Json(Health { ok: true })
}

pub async fn template_handler() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/csv"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"evidence_template.csv\"",
            ),
        ],
        TEMPLATE_CSV,
    )
}

pub async fn upload_excel_handler(
    mut multipart: Multipart,
) -> Result<Json<SpreadsheetReceipt>, ApiError> {
    let mut received: Option<SpreadsheetReceipt> = None;

    while let Some(field) = multipart.next_field().await? {
        // Plain text parts are ignored; only file parts are checked
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if field.name() != Some(SPREADSHEET_FIELD) || received.is_some() {
            warn!(field = ?field.name(), "Rejecting unexpected file field");
            return Err(ApiError::UnexpectedField);
        }

        let bytes = field.bytes().await?;
        received = Some(SpreadsheetReceipt {
            bytes: bytes.len() as u64,
            filename,
        });
    }

    let receipt = received.ok_or(ApiError::NoFileUploaded)?;
    info!(bytes = receipt.bytes, filename = %receipt.filename, "Spreadsheet received");
    Ok(Json(receipt))
}

pub async fn upload_images_handler(
    mut multipart: Multipart,
) -> Result<Json<ImagesReceipt>, ApiError> {
    let mut count = 0usize;
    let mut total_bytes = 0u64;

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() {
            continue;
        }
        if field.name() != Some(IMAGES_FIELD) {
            warn!(field = ?field.name(), "Rejecting unexpected file field");
            return Err(ApiError::UnexpectedField);
        }
        if count == MAX_IMAGES {
            return Err(ApiError::TooManyFiles);
        }

        let bytes = field.bytes().await?;
        count += 1;
        total_bytes += bytes.len() as u64;
    }

    info!(count, total_bytes, "Images received");
    Ok(Json(ImagesReceipt { count, total_bytes }))
}

pub async fn submit_handler(body: Bytes) -> Result<Json<SubmissionReceipt>, ApiError> {
    let request: SubmitRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Undecodable submission: {e}");
        ApiError::from(e)
    })?;
    let submission = request.validate().map_err(|missing| {
        warn!("Rejecting submission: {missing}");
        ApiError::from(missing)
    })?;

    let id = format!("EV-{}", Utc::now().timestamp_millis());
    let application = submission.application_section();
    let evidence = submission.evidence_sections();
    let images: u64 = evidence.iter().filter_map(|e| e.images_count).sum();
    info!(
        %id,
        name = ?application.name,
        area = ?application.area,
        center_id = ?application.center_id,
        entries = evidence.len(),
        images,
        "Submission accepted"
    );
    for (index, entry) in evidence.iter().enumerate() {
        debug!(
            %id,
            index,
            category = ?entry.category,
            screenshot_source = ?entry.screenshot_source,
            attachment_type = ?entry.attachment_type,
            "Evidence entry"
        );
    }

    Ok(Json(SubmissionReceipt {
        status: "accepted".to_string(),
        id,
    }))
}
