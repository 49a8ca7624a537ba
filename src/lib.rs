//! # ocglayers
//!
//! Recovers the layer structure of PDF and PDF-compatible Illustrator files
//! for tools that flatten them.
//!
//! Optional content groups (OCGs) are tagged in a page's content stream as
//! `/OC /MC0 BDC ... EMC` regions. This crate lists those regions in stream
//! order, names each after its layer, and counts the fill and stroke
//! operations inside. A converter that discards layers can then split its
//! flat output back into layers by walking the same operations in order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocglayers::{extract_file, render, JsonFormat};
//!
//! fn main() -> ocglayers::Result<()> {
//!     let manifest = extract_file("drawing.ai")?;
//!     for layer in &manifest.layers {
//!         println!("{}: {} elements", layer.name, layer.element_count);
//!     }
//!     println!("{}", render::to_json(&manifest, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use detect::{detect_format_from_bytes, detect_format_from_path, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    IdentifierMap, LayerDefinition, LayerManifest, LayerReport, LayerTable, MarkedContentSection,
    PropertyBinding,
};
pub use parser::{
    ExtractOptions, IdentifierResolver, LayerExtractor, LopdfBackend, PdfBackend,
    ResolutionStrategy, Segmenter,
};
pub use render::{render_result, JsonFormat};

use std::io::Read;
use std::path::Path;

/// Extract the layer manifest of the first page of a file.
///
/// # Example
///
/// ```no_run
/// let manifest = ocglayers::extract_file("drawing.ai").unwrap();
/// println!("{} layers", manifest.total_layers);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<LayerManifest> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract the layer manifest of a file with custom options.
///
/// # Example
///
/// ```no_run
/// use ocglayers::{extract_file_with_options, ExtractOptions};
///
/// let manifest = extract_file_with_options("poster.pdf", ExtractOptions::new().with_page(2));
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<LayerManifest> {
    LayerExtractor::open_with_options(path, options)?.extract()
}

/// Extract the layer manifest of the first page of an in-memory document.
pub fn extract_bytes(data: &[u8]) -> Result<LayerManifest> {
    extract_bytes_with_options(data, ExtractOptions::default())
}

/// Extract the layer manifest of an in-memory document with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<LayerManifest> {
    LayerExtractor::from_bytes_with_options(data, options)?.extract()
}

/// Extract the layer manifest of the first page of a document read from `reader`.
pub fn extract_reader<R: Read>(reader: R) -> Result<LayerManifest> {
    LayerExtractor::from_reader(reader)?.extract()
}

/// Segment raw content stream bytes with a known identifier map.
///
/// This skips the document entirely; useful when the content stream and the
/// property bindings come from elsewhere.
///
/// # Example
///
/// ```
/// use ocglayers::{segment_content, IdentifierMap};
///
/// let mut names = IdentifierMap::new();
/// names.insert("MC0", "Background");
///
/// let manifest = segment_content(b"/OC /MC0 BDC 10 20 m 30 40 l f EMC", &names);
/// assert_eq!(manifest.layers[0].name, "Background");
/// assert_eq!(manifest.layers[0].fill_count, 1);
/// ```
pub fn segment_content(content: &[u8], names: &IdentifierMap) -> LayerManifest {
    Segmenter::new().segment_bytes(content, names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_content_two_layers() {
        let mut names = IdentifierMap::new();
        names.insert("MC0", "Background");
        names.insert("MC1", "Lines");

        let manifest = segment_content(
            b"/OC /MC0 BDC 0 0 m 1 0 l 1 1 l f 0 0 m 2 2 l b EMC /OC /MC1 BDC 0 0 m 3 3 l S EMC",
            &names,
        );
        assert_eq!(manifest.total_layers, 2);
        assert_eq!(manifest.total_elements, 3);
        assert_eq!(manifest.layers[0].fill_count, 2);
        assert_eq!(manifest.layers[1].stroke_count, 1);
    }

    #[test]
    fn test_extract_bytes_garbage() {
        assert!(matches!(
            extract_bytes(b"not a document"),
            Err(Error::OpenFailure(_))
        ));
    }
}
