//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `evidence_form`: The evidence submission form

mod evidence_form;
mod field_renderer;

pub use evidence_form::draw as draw_evidence_form;
