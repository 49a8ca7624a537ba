//! Rendering of extraction results.

mod json;

pub use json::{error_to_json, render_result, to_json, JsonFormat};
