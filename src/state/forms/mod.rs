//! Form domain layer
//!
//! The evidence form is a plain value updated through a reducer; the field
//! descriptors tell the UI how each focusable position takes input.

mod field;
mod form_state;

pub use field::{cycle_choice, focus_order, FieldKind, FormField};
pub use form_state::{EvidenceForm, FormAction};
