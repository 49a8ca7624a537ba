//! Extraction options.

/// Options for extracting layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Page to segment (1-indexed)
    pub page: u32,

    /// Whether to check the `%PDF-` header before loading a file
    pub check_header: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the page to segment.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Skip the header check and let the PDF loader decide.
    pub fn without_header_check(mut self) -> Self {
        self.check_header = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            page: 1,
            check_header: true,
        }
    }
}
