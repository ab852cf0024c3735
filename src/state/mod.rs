//! Application state module

mod app_state;
mod forms;
mod model;

pub use app_state::*;
pub use forms::*;
pub use model::*;
