//! Layer definitions and identifier bindings.

use std::collections::{BTreeMap, HashMap};

/// Declared optional content groups, keyed by object number.
pub type LayerTable = BTreeMap<u32, String>;

/// Collect layer definitions into a lookup table.
///
/// A reference declared twice keeps its first name.
pub fn layer_table(definitions: Vec<LayerDefinition>) -> LayerTable {
    let mut table = LayerTable::new();
    for definition in definitions {
        table.entry(definition.reference).or_insert(definition.name);
    }
    table
}

/// One optional content group declared by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDefinition {
    /// Object number of the OCG dictionary
    pub reference: u32,

    /// Display name from the OCG's `/Name` entry
    pub name: String,
}

impl LayerDefinition {
    /// Create a new layer definition.
    pub fn new(reference: u32, name: impl Into<String>) -> Self {
        Self {
            reference,
            name: name.into(),
        }
    }
}

/// An entry of a page's `/Properties` dictionary, e.g. `/MC0 12 0 R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    /// Short name used by `BDC` operators in the content stream
    pub identifier: String,

    /// Object number the identifier points at
    pub reference: u32,
}

impl PropertyBinding {
    /// Create a new binding.
    pub fn new(identifier: impl Into<String>, reference: u32) -> Self {
        Self {
            identifier: identifier.into(),
            reference,
        }
    }
}

/// Mapping from in-stream identifiers to layer display names.
///
/// Only bindings whose reference matched a declared layer are ever inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierMap {
    names: HashMap<String, String>,
}

impl IdentifierMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Join bindings against the layer table, dropping unmatched references.
    pub fn from_bindings<'a, I>(bindings: I, layers: &LayerTable) -> Self
    where
        I: IntoIterator<Item = &'a PropertyBinding>,
    {
        let mut map = Self::new();
        for binding in bindings {
            match layers.get(&binding.reference) {
                Some(name) => map.insert(binding.identifier.clone(), name.clone()),
                None => log::debug!(
                    "property /{} -> {} 0 R is not a declared layer",
                    binding.identifier,
                    binding.reference
                ),
            }
        }
        map
    }

    /// Bind an identifier to a layer name.
    pub fn insert(&mut self, identifier: impl Into<String>, name: impl Into<String>) {
        self.names.insert(identifier.into(), name.into());
    }

    /// Look up the layer name bound to an identifier.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.names.get(identifier).map(String::as_str)
    }

    /// Resolve an identifier, falling back to the identifier itself.
    pub fn resolve<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.get(identifier).unwrap_or(identifier)
    }

    /// Number of bound identifiers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for IdentifierMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
