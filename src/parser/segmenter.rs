//! Content stream segmentation.
//!
//! Splits a decoded content stream into its `/OC /<id> BDC ... EMC` regions,
//! in stream order, and counts the fill and stroke operators inside each.
//!
//! Regions are matched flat and non-greedily: a region nested inside another
//! ends the outer match at its own `EMC`, so nesting is not reconstructed.
//! Consumers match the result positionally against an equally flat
//! rendering of the same page.

use regex::Regex;

use crate::model::{IdentifierMap, LayerManifest, LayerReport, MarkedContentSection};

/// Path painting operators that fill (with or without stroking).
pub const FILL_OPERATORS: &[&str] = &["f", "F", "f*", "B", "B*", "b", "b*"];

/// Path painting operators that only stroke.
pub const STROKE_OPERATORS: &[&str] = &["S", "s"];

/// Decode content bytes as Latin-1. Every byte maps to exactly one `char`,
/// so decoding never fails and byte order is preserved.
pub fn decode_content(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Token delimiters: Unicode whitespace, the PDF NUL, and the
/// information separators `\x1c`..=`\x1f`.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\0' | '\x1c'..='\x1f')
}

/// Count standalone occurrences of `operators` in `text`.
///
/// A token counts when it is preceded by a delimiter (or starts the text)
/// and followed by one. Operator-like fragments of longer tokens (`5f`,
/// `Xf`, `f**`) never count.
pub fn count_operators(text: &str, operators: &[&str]) -> usize {
    // Only tokens with a trailing delimiter are candidates.
    let terminated = match text.rfind(is_delimiter) {
        Some(end) => &text[..end],
        None => return 0,
    };
    terminated
        .split(is_delimiter)
        .filter(|token| operators.contains(token))
        .count()
}

/// Splits content streams into marked layer regions.
pub struct Segmenter {
    region_regex: Regex,
}

impl Segmenter {
    /// Create a new segmenter.
    pub fn new() -> Self {
        Self {
            region_regex: Regex::new(
                r"(?s)/OC[\s\x00\x1C-\x1F]+/(\w+)[\s\x00\x1C-\x1F]+BDC(.*?)EMC",
            )
            .unwrap(),
        }
    }

    /// Find every marked region, left to right.
    pub fn sections<'a>(&self, content: &'a str) -> Vec<MarkedContentSection<'a>> {
        self.region_regex
            .captures_iter(content)
            .enumerate()
            .filter_map(|(index, caps)| {
                Some(MarkedContentSection {
                    identifier: caps.get(1)?.as_str(),
                    inner: caps.get(2)?.as_str(),
                    index,
                })
            })
            .collect()
    }

    /// Count the drawing operators of one region.
    pub fn report(
        &self,
        section: &MarkedContentSection<'_>,
        names: &IdentifierMap,
    ) -> LayerReport {
        LayerReport::new(
            names.resolve(section.identifier),
            section.identifier,
            count_operators(section.inner, FILL_OPERATORS),
            count_operators(section.inner, STROKE_OPERATORS),
        )
    }

    /// Segment decoded content text into an ordered manifest.
    pub fn segment(&self, content: &str, names: &IdentifierMap) -> LayerManifest {
        let reports: Vec<LayerReport> = self
            .sections(content)
            .iter()
            .map(|section| {
                let report = self.report(section, names);
                log::trace!(
                    "region {} /{} -> {:?}: {} fills, {} strokes",
                    section.index,
                    section.identifier,
                    report.name,
                    report.fill_count,
                    report.stroke_count
                );
                report
            })
            .collect();
        LayerManifest::from_reports(reports)
    }

    /// Segment raw content stream bytes.
    pub fn segment_bytes(&self, content: &[u8], names: &IdentifierMap) -> LayerManifest {
        self.segment(&decode_content(content), names)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> IdentifierMap {
        let mut names = IdentifierMap::new();
        names.insert("MC0", "Background");
        names.insert("MC1", "Artwork");
        names
    }

    #[test]
    fn test_single_region() {
        let manifest =
            Segmenter::new().segment("/OC /MC0 BDC 10 20 m 30 40 l f EMC", &names());

        assert_eq!(manifest.total_layers, 1);
        assert_eq!(manifest.total_elements, 1);
        assert_eq!(
            manifest.layers,
            vec![LayerReport::new("Background", "MC0", 1, 0)]
        );
    }

    #[test]
    fn test_regions_keep_stream_order() {
        let content = "q\n/OC /MC0 BDC\n0 0 m 1 1 l f\n2 2 m 3 3 l h f*\nEMC\n\
                       /OC /MC1 BDC\n0 0 m 5 5 l S\nEMC\nQ\n";
        let manifest = Segmenter::new().segment(content, &names());

        assert_eq!(manifest.total_layers, 2);
        assert_eq!(manifest.layers[0].mc_name, "MC0");
        assert_eq!(
            (manifest.layers[0].fill_count, manifest.layers[0].stroke_count),
            (2, 0)
        );
        assert_eq!(manifest.layers[1].mc_name, "MC1");
        assert_eq!(
            (manifest.layers[1].fill_count, manifest.layers[1].stroke_count),
            (0, 1)
        );
        assert_eq!(manifest.total_elements, 3);
    }

    #[test]
    fn test_repeated_identifier_not_merged() {
        let content = "/OC /MC0 BDC f EMC /OC /MC1 BDC S EMC /OC /MC0 BDC f f EMC";
        let manifest = Segmenter::new().segment(content, &names());

        let order: Vec<(&str, usize)> = manifest
            .layers
            .iter()
            .map(|l| (l.name.as_str(), l.element_count))
            .collect();
        assert_eq!(
            order,
            vec![("Background", 1), ("Artwork", 1), ("Background", 2)]
        );
    }

    #[test]
    fn test_unresolved_identifier_uses_raw_name() {
        let manifest = Segmenter::new().segment("/OC /MC7 BDC 0 0 m 1 1 l S EMC", &names());
        assert_eq!(manifest.layers[0].name, "MC7");
        assert_eq!(manifest.layers[0].mc_name, "MC7");
        assert_eq!(manifest.layers[0].stroke_count, 1);
    }

    #[test]
    fn test_empty_region_is_emitted() {
        let manifest = Segmenter::new().segment("/OC /MC0 BDC EMC", &names());
        assert_eq!(manifest.total_layers, 1);
        assert_eq!(manifest.layers[0].element_count, 0);
    }

    #[test]
    fn test_no_regions() {
        let manifest = Segmenter::new().segment("0 0 m 10 10 l S f", &names());
        assert!(manifest.is_empty());
        assert_eq!(manifest.total_elements, 0);
    }

    #[test]
    fn test_non_oc_marked_content_ignored() {
        let content = "/Artifact BMC f EMC /Span <</MCID 0>> BDC S EMC /OC /MC0 BDC f EMC";
        let manifest = Segmenter::new().segment(content, &names());
        assert_eq!(manifest.total_layers, 1);
        assert_eq!(manifest.layers[0].fill_count, 1);
        assert_eq!(manifest.layers[0].stroke_count, 0);
    }

    #[test]
    fn test_nested_regions_flatten() {
        let content = "/OC /MC0 BDC f /OC /MC1 BDC S EMC f EMC";
        let manifest = Segmenter::new().segment(content, &names());

        // The outer match stops at the first EMC and swallows the inner tag.
        assert_eq!(manifest.total_layers, 1);
        assert_eq!(manifest.layers[0].mc_name, "MC0");
        assert_eq!(manifest.layers[0].fill_count, 1);
        assert_eq!(manifest.layers[0].stroke_count, 1);
    }

    #[test]
    fn test_unterminated_region_ignored() {
        let manifest = Segmenter::new().segment("/OC /MC0 BDC 0 0 m f", &names());
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_count_operators_token_boundaries() {
        assert_eq!(count_operators(" Xf 5f f** ff ", FILL_OPERATORS), 0);
        assert_eq!(count_operators(" 1 0 0 rg 5f 0 0 m f ", FILL_OPERATORS), 1);
        assert_eq!(count_operators(" /Xf Do ", FILL_OPERATORS), 0);
        assert_eq!(count_operators(" SC S scn s ", STROKE_OPERATORS), 2);
    }

    #[test]
    fn test_count_operators_every_variant() {
        let text = " f F f* B B* b b* S s ";
        assert_eq!(count_operators(text, FILL_OPERATORS), 7);
        assert_eq!(count_operators(text, STROKE_OPERATORS), 2);
    }

    #[test]
    fn test_count_operators_adjacent_tokens() {
        assert_eq!(count_operators("f\nf\nf\n", FILL_OPERATORS), 3);
        assert_eq!(count_operators("S\r\nS\tS ", STROKE_OPERATORS), 3);
    }

    #[test]
    fn test_count_operators_needs_trailing_whitespace() {
        assert_eq!(count_operators("f", FILL_OPERATORS), 0);
        assert_eq!(count_operators(" 0 0 m f", FILL_OPERATORS), 0);
        assert_eq!(count_operators("f ", FILL_OPERATORS), 1);
    }

    #[test]
    fn test_count_operators_control_delimiters() {
        let text = decode_content(b" f\x1cf\x00S\x1f\xa0s\x85");
        assert_eq!(count_operators(&text, FILL_OPERATORS), 2);
        assert_eq!(count_operators(&text, STROKE_OPERATORS), 2);
        assert_eq!(count_operators(&decode_content(b" f\x1cf "), FILL_OPERATORS), 2);
    }

    #[test]
    fn test_region_tag_control_delimiters() {
        let content = decode_content(b"/OC\x00/MC0\x1dBDC f\x00EMC");
        let manifest = Segmenter::new().segment(&content, &names());
        assert_eq!(manifest.total_layers, 1);
        assert_eq!(manifest.layers[0].fill_count, 1);
    }

    #[test]
    fn test_decode_content_latin1() {
        let text = decode_content(b"/OC /MC0 BDC \xff\x00 f EMC");
        assert_eq!(text.chars().count(), 21);
        assert!(text.contains('\u{ff}'));
    }

    #[test]
    fn test_segment_bytes_with_binary_noise() {
        let content = b"/OC /MC0 BDC BI /W 2 ID \x80\x81 f\xfe EI 0 0 m f EMC";
        let manifest = Segmenter::new().segment_bytes(content, &names());
        assert_eq!(manifest.layers[0].fill_count, 1);
    }

    #[test]
    fn test_segment_is_deterministic() {
        let content = "/OC /MC0 BDC f EMC /OC /MC1 BDC S s EMC";
        let segmenter = Segmenter::new();
        assert_eq!(
            segmenter.segment(content, &names()),
            segmenter.segment(content, &names())
        );
    }
}
