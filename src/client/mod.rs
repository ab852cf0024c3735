//! HTTP client module for the evidence backend

mod http;
mod traits;

pub use http::HttpEvidenceClient;
pub use traits::{EvidenceApi, UploadFile};

#[cfg(test)]
pub use traits::MockEvidenceApi;
