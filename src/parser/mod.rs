//! Layer extraction pipeline.
//!
//! [`IdentifierResolver`] maps content stream names to layer names,
//! [`Segmenter`] splits the content stream into counted regions, and
//! [`LayerExtractor`] runs both against a [`PdfBackend`].

mod backend;
mod extractor;
mod options;
mod resolver;
mod segmenter;

pub use backend::{decode_text_simple, Fragment, LopdfBackend, PageId, PdfBackend};
pub use extractor::LayerExtractor;
pub use options::ExtractOptions;
pub use resolver::{IdentifierResolver, ResolutionStrategy};
pub use segmenter::{
    count_operators, decode_content, Segmenter, FILL_OPERATORS, STROKE_OPERATORS,
};
