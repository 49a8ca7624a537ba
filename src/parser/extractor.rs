//! Layer extraction for one page of a document.

use std::io::Read;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::{layer_table, LayerManifest};

use super::backend::{LopdfBackend, PdfBackend};
use super::options::ExtractOptions;
use super::resolver::IdentifierResolver;
use super::segmenter::{decode_content, Segmenter};

/// Extracts the ordered layer manifest of a page.
///
/// Every failure from the backend is reported as one of the boundary errors
/// ([`Error::OpenFailure`], [`Error::NoPages`], [`Error::NoLayersDeclared`],
/// [`Error::BindingResolutionFailure`], [`Error::ContentReadFailure`],
/// [`Error::PageOutOfRange`]).
pub struct LayerExtractor<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ExtractOptions,
    resolver: IdentifierResolver,
    segmenter: Segmenter,
}

impl LayerExtractor<LopdfBackend> {
    /// Open a PDF or PDF-compatible `.ai` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        let backend = Self::load_file(path, &options)
            .map_err(|e| Error::OpenFailure(open_message(path, e)))?;
        Ok(Self::with_backend(backend, options))
    }

    /// Load a document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load a document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        if options.check_header {
            detect_format_from_bytes(data).map_err(|e| Error::OpenFailure(e.to_string()))?;
        }
        let backend =
            LopdfBackend::load_bytes(data).map_err(|e| Error::OpenFailure(e.to_string()))?;
        Ok(Self::with_backend(backend, options))
    }

    /// Load a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ExtractOptions::default())
    }

    /// Load a document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ExtractOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::OpenFailure(e.to_string()))?;
        Self::from_bytes_with_options(&data, options)
    }

    fn load_file(path: &Path, options: &ExtractOptions) -> Result<LopdfBackend> {
        if options.check_header {
            let format = detect_format_from_path(path)?;
            log::debug!("{}: {}", path.display(), format);
        }
        LopdfBackend::load_file(path)
    }
}

impl<B: PdfBackend> LayerExtractor<B> {
    /// Wrap any backend.
    pub fn with_backend(backend: B, options: ExtractOptions) -> Self {
        Self {
            backend,
            options,
            resolver: IdentifierResolver::new(),
            segmenter: Segmenter::new(),
        }
    }

    /// Segment the selected page into its ordered layer manifest.
    pub fn extract(&self) -> Result<LayerManifest> {
        let page_count = self.backend.page_count();
        if page_count == 0 {
            return Err(Error::NoPages);
        }
        let page_number = self.options.page;
        let page = self
            .backend
            .page(page_number)
            .ok_or(Error::PageOutOfRange(page_number, page_count as u32))?;

        let definitions = self.backend.layer_definitions().unwrap_or_else(|e| {
            log::warn!("failed to read optional content groups: {}", e);
            Vec::new()
        });
        let layers = layer_table(definitions);
        if layers.is_empty() {
            return Err(Error::NoLayersDeclared);
        }
        log::debug!("{} layers declared", layers.len());

        let names = self.resolver.resolve(&self.backend, page, &layers)?;

        let content = self
            .backend
            .page_content(page)
            .map_err(|e| Error::ContentReadFailure(e.to_string()))?;
        let manifest = self.segmenter.segment(&decode_content(&content), &names);
        log::info!(
            "page {}: {} layer regions, {} elements",
            page_number,
            manifest.total_layers,
            manifest.total_elements
        );
        Ok(manifest)
    }
}

fn open_message(path: &Path, err: Error) -> String {
    format!("cannot open '{}': {}", path.display(), err)
}
