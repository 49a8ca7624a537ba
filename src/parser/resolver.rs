//! Identifier resolution.
//!
//! Content streams tag layer regions with short names (`/OC /MC0 BDC`). The
//! page's `/Resources/Properties` dictionary binds each name to an OCG
//! object, and the catalog gives each OCG a display name. Two strategies
//! recover the bindings; the first one whose bindings hit a declared layer
//! wins.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{IdentifierMap, LayerTable, PropertyBinding};

use super::backend::{Fragment, PageId, PdfBackend};

const PROPERTIES_PATH: &[&str] = &["Resources", "Properties"];

/// A way of recovering property bindings for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Ask the backend for the resolved `/Resources/Properties` dictionary.
    PropertyQuery,
    /// Search the page object's raw text for an inline `/Properties << >>`.
    RawObjectScan,
}

impl ResolutionStrategy {
    /// Default attempt order.
    pub const ALL: [ResolutionStrategy; 2] = [Self::PropertyQuery, Self::RawObjectScan];

    fn name(self) -> &'static str {
        match self {
            Self::PropertyQuery => "property query",
            Self::RawObjectScan => "raw object scan",
        }
    }
}

/// Builds an [`IdentifierMap`] for one page.
pub struct IdentifierResolver {
    strategies: Vec<ResolutionStrategy>,
    binding_regex: Regex,
    properties_regex: Regex,
}

impl IdentifierResolver {
    /// Create a resolver trying every strategy in default order.
    pub fn new() -> Self {
        Self::with_strategies(ResolutionStrategy::ALL.to_vec())
    }

    /// Create a resolver with an explicit strategy order.
    pub fn with_strategies(strategies: Vec<ResolutionStrategy>) -> Self {
        Self {
            strategies,
            binding_regex: Regex::new(r"/(\w+)\s+(\d+)\s+0\s+R").unwrap(),
            properties_regex: Regex::new(r"(?s)/Properties\s*<<(.*?)>>").unwrap(),
        }
    }

    /// Resolve identifiers for `page` against the declared layers.
    ///
    /// Strategy failures are logged and skipped. Fails with
    /// [`Error::BindingResolutionFailure`] only when no strategy produced a
    /// binding to a declared layer.
    pub fn resolve<B: PdfBackend + ?Sized>(
        &self,
        backend: &B,
        page: PageId,
        layers: &LayerTable,
    ) -> Result<IdentifierMap> {
        for &strategy in &self.strategies {
            let Some(bindings) = self.attempt(strategy, backend, page) else {
                continue;
            };
            let map = IdentifierMap::from_bindings(&bindings, layers);
            log::debug!(
                "{}: {} bindings, {} resolved to layers",
                strategy.name(),
                bindings.len(),
                map.len()
            );
            if !map.is_empty() {
                return Ok(map);
            }
        }
        Err(Error::BindingResolutionFailure)
    }

    /// Run one strategy; `None` means it had nothing to offer.
    fn attempt<B: PdfBackend + ?Sized>(
        &self,
        strategy: ResolutionStrategy,
        backend: &B,
        page: PageId,
    ) -> Option<Vec<PropertyBinding>> {
        match strategy {
            ResolutionStrategy::PropertyQuery => {
                match backend.query_fragment(page, PROPERTIES_PATH) {
                    Ok(Fragment::Dictionary(text)) => Some(self.extract_bindings(&text)),
                    Ok(Fragment::Other(kind)) => {
                        log::warn!("/Resources/Properties is {}, not a dictionary", kind);
                        None
                    }
                    Err(e) => {
                        log::warn!("property query failed: {}", e);
                        None
                    }
                }
            }
            ResolutionStrategy::RawObjectScan => match backend.raw_object_text(page) {
                Ok(raw) => self.scan_raw_object(&raw),
                Err(e) => {
                    log::warn!("raw object scan failed: {}", e);
                    None
                }
            },
        }
    }

    /// Find the inline `/Properties` dictionary in raw object text and
    /// extract its bindings.
    pub fn scan_raw_object(&self, raw: &str) -> Option<Vec<PropertyBinding>> {
        let captures = self.properties_regex.captures(raw)?;
        Some(self.extract_bindings(captures.get(1)?.as_str()))
    }

    /// Extract every `/<name> <num> 0 R` entry from dictionary text.
    ///
    /// Only generation-zero references qualify.
    pub fn extract_bindings(&self, text: &str) -> Vec<PropertyBinding> {
        self.binding_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let reference = caps[2].parse::<u32>().ok()?;
                Some(PropertyBinding::new(&caps[1], reference))
            })
            .collect()
    }
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self::new()
    }
}
