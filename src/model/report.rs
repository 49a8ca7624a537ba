//! Per-layer report types.

use serde::{Deserialize, Serialize};

/// One `/OC /<id> BDC ... EMC` region found in a content stream.
///
/// Borrowed from the decoded content text; lives for a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedContentSection<'a> {
    /// Identifier following `/OC`
    pub identifier: &'a str,

    /// Text between `BDC` and the matching `EMC`
    pub inner: &'a str,

    /// Position among the regions of the stream (0-indexed)
    pub index: usize,
}

/// Drawing operation counts for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerReport {
    /// Resolved layer name, or the raw identifier when unresolved
    pub name: String,

    /// Identifier as written in the content stream
    pub mc_name: String,

    /// Fill and stroke operations combined
    pub element_count: usize,

    /// Fill operations (`f`, `F`, `f*`, `B`, `B*`, `b`, `b*`)
    pub fill_count: usize,

    /// Stroke operations (`S`, `s`)
    pub stroke_count: usize,
}

impl LayerReport {
    /// Create a report; the element count is derived from the other two.
    pub fn new(
        name: impl Into<String>,
        mc_name: impl Into<String>,
        fill_count: usize,
        stroke_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            mc_name: mc_name.into(),
            element_count: fill_count + stroke_count,
            fill_count,
            stroke_count,
        }
    }
}

/// The ordered layer list for one page.
///
/// `layers[i]` describes the i-th marked region of the content stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerManifest {
    /// Number of regions
    pub total_layers: usize,

    /// Sum of element counts over all regions
    pub total_elements: usize,

    /// Reports in stream order
    pub layers: Vec<LayerReport>,
}

impl LayerManifest {
    /// Build a manifest and its totals from reports in stream order.
    pub fn from_reports(layers: Vec<LayerReport>) -> Self {
        Self {
            total_layers: layers.len(),
            total_elements: layers.iter().map(|l| l.element_count).sum(),
            layers,
        }
    }

    /// Check if no regions were found.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
