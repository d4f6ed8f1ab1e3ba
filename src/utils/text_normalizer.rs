//! Entity and tag normalization for archive markup.
//!
//! The archive escapes quotation marks and accented vowels with `&xxx.`
//! sequences and wraps cross references, emphasis and notes in inline tags.
//! [`normalize`] rewrites a fixed table of those into readable text. The
//! tag strippers here are used by the renderers, which also need the four
//! generic XML escapes decoded.
//!
//! # Examples
//!
//! ```
//! use oed::utils::text_normalizer::normalize;
//!
//! assert_eq!(normalize("&oq.quote&cq. and &emac.macron&emac."), "'quote' and ēmacronē");
//! assert_eq!(normalize("multiple  <n>  spaces  </n>  here"), "multiple spaces here");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Structural inline tags. Their markers are removed and the content kept;
/// `<n>` becomes a space so the words on either side do not fuse.
const STRUCTURAL_TAGS: &[(&str, &str)] = &[
    ("<cf>", ""),
    ("</cf>", ""),
    ("<xr>", ""),
    ("</xr>", ""),
    ("<x>", ""),
    ("</x>", ""),
    ("<n>", " "),
    ("</n>", ""),
    ("<xs>", ""),
    ("</xs>", ""),
];

/// Archive-specific character escapes.
const ARCHIVE_ENTITIES: &[(&str, &str)] = &[
    ("&oq.", "'"),
    ("&cq.", "'"),
    ("&emac.", "ē"),
    ("&amac.", "ā"),
    ("&imac.", "ī"),
    ("&omac.", "ō"),
    ("&umac.", "ū"),
    ("&eacu.", "é"),
    ("&aacu.", "á"),
    ("&iacu.", "í"),
    ("&oacu.", "ó"),
    ("&uacu.", "ú"),
];

/// Generic XML escapes; `&amp;` goes last so `&amp;lt;` decodes to `&lt;`.
const XML_ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&amp;", "&"),
];

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static HORIZONTAL_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\f\v]+").expect("valid space regex"));
static LINE_EDGE_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\n *").expect("valid line edge regex"));
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("valid blank run regex"));

fn replace_all_pairs(text: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (old, new)| acc.replace(old, new))
}

/// Replaces the archive-specific escapes only.
pub fn decode_archive_entities(text: &str) -> String {
    replace_all_pairs(text, ARCHIVE_ENTITIES)
}

/// Decodes `&lt;`, `&gt;`, `&quot;` and `&amp;`.
pub fn decode_xml_entities(text: &str) -> String {
    replace_all_pairs(text, XML_ENTITIES)
}

/// Rewrites archive escapes and structural tags into readable text.
///
/// The result has no runs of two or more spaces and no surrounding
/// whitespace. Calling it again on its own output changes nothing.
pub fn normalize(text: &str) -> String {
    let mut result = text.to_string();
    // A replacement can splice a new marker out of its neighbours
    // ("<<cf>n>"), so repeat until the table no longer applies. Every
    // replacement shortens the text, which bounds the loop.
    loop {
        let next = decode_archive_entities(&replace_all_pairs(&result, STRUCTURAL_TAGS));
        if next == result {
            break;
        }
        result = next;
    }

    while result.contains("  ") {
        result = result.replace("  ", " ");
    }

    result.trim().to_string()
}

/// Removes every tag, collapses all whitespace to single spaces, and decodes
/// archive and XML escapes.
pub fn strip_all_tags(text: &str) -> String {
    let text = TAG_RE.replace_all(text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    decode_xml_entities(&decode_archive_entities(text.trim()))
}

/// Removes every tag but keeps line structure: spaces are collapsed within
/// lines, and runs of three or more line breaks become one blank line.
pub fn strip_tags_preserving_lines(text: &str) -> String {
    let text = TAG_RE.replace_all(text, "");
    let text = text.replace('\r', "");
    let text = HORIZONTAL_SPACE_RE.replace_all(&text, " ");
    let text = LINE_EDGE_SPACE_RE.replace_all(&text, "\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    decode_xml_entities(&decode_archive_entities(text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let test_cases = [
            ("&oq.quote&cq. and &emac.macron&emac.", "'quote' and ēmacronē"),
            ("multiple  <n>  spaces  </n>  here", "multiple spaces here"),
            ("<cf>Latin</cf> <xr>see</xr> <x>this</x>", "Latin see this"),
            ("a<n>b</n>c", "a bc"),
            ("&aacu.&eacu.&iacu.&oacu.&uacu.", "áéíóú"),
            ("&amac.&imac.&omac.&umac.", "āīōū"),
            ("<xs>small caps</xs>", "small caps"),
            ("  padded\t", "padded"),
            ("<i>unknown tags stay</i>", "<i>unknown tags stay</i>"),
            ("", ""),
        ];

        for (input, expected) in test_cases {
            assert_eq!(normalize(input), expected, "normalize({:?})", input);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "&oq.quote&cq. and &emac.macron&emac.",
            "multiple  <n>  spaces  </n>  here",
            "<<cf>n>spliced</n>",
            "<<cf>cf>nested</cf>",
            "&&oq.emac.",
            "&amp;oq. escaped",
            "   lots     of      space   ",
            "tab\t\tseparated  <n>x</n>",
            "<n><n><n>",
        ];

        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "normalize not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_strip_all_tags() {
        let test_cases = [
            ("<s4>A <i>procedure</i></s4>", "A procedure"),
            ("a\n\n  b\tc", "a b c"),
            ("&lt;tag&gt; &quot;q&quot; &amp; more", "<tag> \"q\" & more"),
            ("&amp;lt;", "&lt;"),
            ("&oq.hi&cq.", "'hi'"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(strip_all_tags(input), expected, "strip_all_tags({:?})", input);
        }
    }

    #[test]
    fn test_strip_tags_preserving_lines() {
        let input = "<e>\n1. first  <b>sense</b>\n\n\n\n2. second   sense </e>";
        assert_eq!(strip_tags_preserving_lines(input), "1. first sense\n\n2. second sense");
        assert_eq!(strip_tags_preserving_lines("a\n\nb"), "a\n\nb");
    }
}
