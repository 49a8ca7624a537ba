//! JSON rendering for layer manifests.
//!
//! Success renders as `{"totalLayers", "totalElements", "layers"}`; failure
//! renders as `{"error", "layers": []}` so callers can always read `layers`.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{LayerManifest, LayerReport};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Single-line JSON without extra whitespace
    #[default]
    Compact,
    /// Pretty-printed JSON with indentation
    Pretty,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: String,
    layers: &'a [LayerReport],
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a manifest to JSON.
pub fn to_json(manifest: &LayerManifest, format: JsonFormat) -> Result<String> {
    serialize(manifest, format)
}

/// Convert an error to the failure payload.
pub fn error_to_json(err: &Error, format: JsonFormat) -> Result<String> {
    serialize(
        &ErrorReport {
            error: err.to_string(),
            layers: &[],
        },
        format,
    )
}

/// Render either outcome of an extraction.
pub fn render_result(result: &Result<LayerManifest>, format: JsonFormat) -> String {
    let rendered = match result {
        Ok(manifest) => to_json(manifest, format),
        Err(err) => error_to_json(err, format),
    };
    rendered.unwrap_or_else(|e| {
        serde_json::json!({ "error": e.to_string(), "layers": [] }).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> LayerManifest {
        LayerManifest::from_reports(vec![LayerReport::new("Background", "MC0", 1, 0)])
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&manifest(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"totalLayers":1,"totalElements":1,"layers":[{"name":"Background","mcName":"MC0","elementCount":1,"fillCount":1,"strokeCount":0}]}"#
        );
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&manifest(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"totalLayers\": 1"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_error_payload() {
        let json = error_to_json(&Error::NoLayersDeclared, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"error":"No OCG layers found","layers":[]}"#);
    }

    #[test]
    fn test_render_result() {
        assert_eq!(
            render_result(&Err(Error::NoPages), JsonFormat::Compact),
            r#"{"error":"No pages","layers":[]}"#
        );
        assert!(render_result(&Ok(manifest()), JsonFormat::Compact).starts_with("{\"totalLayers\""));
    }

    #[test]
    fn test_non_ascii_names_unescaped() {
        let manifest =
            LayerManifest::from_reports(vec![LayerReport::new("Ebene 1 – Hintergrund", "MC0", 0, 0)]);
        let json = to_json(&manifest, JsonFormat::Compact).unwrap();
        assert!(json.contains("Ebene 1 – Hintergrund"));
    }
}
