//! PDF backend abstraction layer.
//!
//! The extractor only needs a handful of questions answered by the
//! document: how many pages, which layers are declared, what a page's
//! property dictionary looks like, and the page's decoded content bytes.
//! [`PdfBackend`] names exactly those; [`LopdfBackend`] answers them with
//! `lopdf`.

use crate::error::{Error, Result};
use crate::model::LayerDefinition;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Parent links followed before giving up on inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Reference hops followed when dereferencing an object.
const MAX_REFERENCE_HOPS: usize = 8;

/// A typed fragment of a page's object tree, rendered as PDF syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// The path ended on a dictionary; holds its text, e.g. `<< /MC0 12 0 R >>`
    Dictionary(String),
    /// The path ended on something else; holds the object type name
    Other(String),
}

/// Abstract interface for document access.
pub trait PdfBackend {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Look up a page by 1-based number.
    fn page(&self, number: u32) -> Option<PageId>;

    /// Optional content groups declared in the catalog's `/OCProperties`.
    ///
    /// A document without optional content returns an empty list.
    fn layer_definitions(&self) -> Result<Vec<LayerDefinition>>;

    /// Follow a key path from the page dictionary, e.g.
    /// `["Resources", "Properties"]`, resolving references on the way.
    fn query_fragment(&self, page: PageId, path: &[&str]) -> Result<Fragment>;

    /// Textual dump of the page object itself (references are not followed).
    fn raw_object_text(&self, page: PageId) -> Result<String>;

    /// Decoded content stream bytes of a page; multiple streams are joined.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;
}

/// Decode a PDF text string.
///
/// Handles UTF-16BE with a byte order mark, then UTF-8, and falls back to
/// Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend — concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
///
/// The document is released when the backend is dropped.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        log::debug!(
            "opened PDF {} with {} objects",
            doc.version,
            doc.objects.len()
        );
        Self { doc }
    }

    /// Follow references until a direct object is reached.
    fn resolve<'a>(&'a self, mut obj: &'a Object) -> Result<&'a Object> {
        for _ in 0..MAX_REFERENCE_HOPS {
            match obj {
                Object::Reference(id) => obj = self.doc.get_object(*id)?,
                direct => return Ok(direct),
            }
        }
        Err(Error::PdfParse("reference chain too long".to_string()))
    }

    /// Look up a page attribute, walking `/Parent` for inheritable keys.
    fn page_entry(&self, page: PageId, key: &[u8]) -> Result<&Object> {
        let mut dict = self.doc.get_dictionary(page)?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Ok(value);
            }
            match dict.get(b"Parent") {
                Ok(parent) => dict = self.resolve(parent)?.as_dict()?,
                Err(_) => break,
            }
        }
        Err(Error::MissingObject(format!(
            "/{}",
            String::from_utf8_lossy(key)
        )))
    }

    fn stream_bytes(&self, stream: &Stream) -> Result<Vec<u8>> {
        if stream.dict.has(b"Filter") {
            stream
                .decompressed_content()
                .map_err(|e| Error::PdfParse(e.to_string()))
        } else {
            Ok(stream.content.clone())
        }
    }
}

impl Drop for LopdfBackend {
    fn drop(&mut self) {
        log::debug!("closing PDF document");
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn page(&self, number: u32) -> Option<PageId> {
        self.doc.get_pages().get(&number).copied()
    }

    fn layer_definitions(&self) -> Result<Vec<LayerDefinition>> {
        let root = self.doc.trailer.get(b"Root")?;
        let catalog = self.resolve(root)?.as_dict()?;

        let Ok(oc_properties) = catalog.get(b"OCProperties") else {
            return Ok(Vec::new());
        };
        let oc_properties = self.resolve(oc_properties)?.as_dict()?;
        let Ok(groups) = oc_properties.get(b"OCGs") else {
            return Ok(Vec::new());
        };

        let mut definitions = Vec::new();
        for entry in self.resolve(groups)?.as_array()? {
            let Ok(id) = entry.as_reference() else {
                log::debug!("skipping direct OCG entry");
                continue;
            };
            let name = self
                .doc
                .get_dictionary(id)
                .and_then(|group| group.get(b"Name"))
                .ok()
                .and_then(|name| self.resolve(name).ok())
                .and_then(|name| name.as_str().ok())
                .map(decode_text_simple)
                .unwrap_or_default();
            definitions.push(LayerDefinition::new(id.0, name));
        }
        Ok(definitions)
    }

    fn query_fragment(&self, page: PageId, path: &[&str]) -> Result<Fragment> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(Fragment::Dictionary(dictionary_text(
                self.doc.get_dictionary(page)?,
            )));
        };

        let mut current = self.resolve(self.page_entry(page, first.as_bytes())?)?;
        for key in rest {
            let value = current
                .as_dict()?
                .get(key.as_bytes())
                .map_err(|_| Error::MissingObject(format!("/{}", key)))?;
            current = self.resolve(value)?;
        }

        Ok(match current {
            Object::Dictionary(dict) => Fragment::Dictionary(dictionary_text(dict)),
            other => Fragment::Other(object_kind(other).to_string()),
        })
    }

    fn raw_object_text(&self, page: PageId) -> Result<String> {
        let mut out = String::new();
        write_object(&mut out, self.doc.get_object(page)?);
        Ok(out)
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let contents = self
            .doc
            .get_dictionary(page)?
            .get(b"Contents")
            .map_err(|_| Error::MissingObject("/Contents".to_string()))?;

        match self.resolve(contents)? {
            Object::Stream(stream) => self.stream_bytes(stream),
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    match self.resolve(part)? {
                        Object::Stream(stream) => {
                            content.extend_from_slice(&self.stream_bytes(stream)?);
                            content.push(b' ');
                        }
                        other => log::warn!(
                            "ignoring {} in page /Contents array",
                            object_kind(other)
                        ),
                    }
                }
                Ok(content)
            }
            other => Err(Error::PdfParse(format!(
                "page /Contents is {}, not a stream",
                object_kind(other)
            ))),
        }
    }
}

fn object_kind(obj: &Object) -> &'static str {
    match obj {
        Object::Null => "null",
        Object::Boolean(_) => "bool",
        Object::Integer(_) => "int",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dict",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "xref",
    }
}

fn dictionary_text(dict: &Dictionary) -> String {
    let mut out = String::new();
    write_dictionary(&mut out, dict);
    out
}

fn write_dictionary(out: &mut String, dict: &Dictionary) {
    out.push_str("<<");
    for (key, value) in dict.iter() {
        out.push_str(" /");
        out.push_str(&String::from_utf8_lossy(key));
        out.push(' ');
        write_object(out, value);
    }
    out.push_str(" >>");
}

/// Write an object in PDF syntax. Strings are written lossily and are
/// only meant for pattern matching, not for round-tripping.
fn write_object(out: &mut String, obj: &Object) {
    match obj {
        Object::Null => out.push_str("null"),
        Object::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Object::Integer(i) => out.push_str(&i.to_string()),
        Object::Real(r) => out.push_str(&r.to_string()),
        Object::Name(name) => {
            out.push('/');
            out.push_str(&String::from_utf8_lossy(name));
        }
        Object::String(bytes, _) => {
            out.push('(');
            out.push_str(&String::from_utf8_lossy(bytes));
            out.push(')');
        }
        Object::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_object(out, item);
            }
            out.push(']');
        }
        Object::Dictionary(dict) => write_dictionary(out, dict),
        Object::Stream(stream) => {
            write_dictionary(out, &stream.dict);
            out.push_str(" stream");
        }
        Object::Reference((number, generation)) => {
            out.push_str(&format!("{} {} R", number, generation));
        }
    }
}
