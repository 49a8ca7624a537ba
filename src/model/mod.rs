//! Layer model types.
//!
//! Definitions and bindings come out of the document; sections are the
//! transient view of a content stream; reports and the manifest are what
//! gets rendered.

mod layer;
mod report;

pub use layer::{layer_table, IdentifierMap, LayerDefinition, LayerTable, PropertyBinding};
pub use report::{LayerManifest, LayerReport, MarkedContentSection};
