//! Headword and etymology extraction from decoded record text.
//!
//! Matching is first opening tag, then the first closing tag after it. Tag
//! pairs are not validated; a missing closing tag yields an empty field.

use crate::utils::text_normalizer::normalize;

pub const HEADWORD_OPEN: &str = "<hw>";
pub const HEADWORD_CLOSE: &str = "</hw>";
pub const ETYMOLOGY_OPEN: &str = "<etym>";
pub const ETYMOLOGY_CLOSE: &str = "</etym>";

/// Characters stripped from the end of a bare first line used as headword.
const FALLBACK_TRAILING_NOISE: &[char] = &['.', ',', ';', ':', ' ', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Fields pulled out of a decoded record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub headword: String,
    pub etymology: String,
}

/// Returns the text between the first `open` tag and the first `close` tag after it.
pub fn tag_content<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

/// Extracts the headword and normalized etymology from decoded record text.
pub fn extract(decoded: &str) -> ExtractedFields {
    let mut headword = tag_content(decoded, HEADWORD_OPEN, HEADWORD_CLOSE)
        .map(|hw| hw.trim().to_string())
        .unwrap_or_default();

    if headword.is_empty() {
        headword = fallback_headword(decoded);
    }

    let etymology = tag_content(decoded, ETYMOLOGY_OPEN, ETYMOLOGY_CLOSE)
        .map(normalize)
        .unwrap_or_default();

    ExtractedFields { headword, etymology }
}

fn fallback_headword(decoded: &str) -> String {
    let first_line = decoded.split('\n').next().unwrap_or_default();
    first_line
        .trim()
        .trim_end_matches(FALLBACK_TRAILING_NOISE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_record() {
        let text = "<e><hg><hw>test</hw> <pr><ph>tEst</ph></pr></hg>. <etym>f. Latin testum earthen pot</etym> <s4>A procedure</s4></e>";
        let fields = extract(text);
        assert_eq!(fields.headword, "test");
        assert_eq!(fields.etymology, "f. Latin testum earthen pot");
    }

    #[test]
    fn test_headword_is_trimmed() {
        assert_eq!(extract("<hw>  spaced  </hw>").headword, "spaced");
    }

    #[test]
    fn test_headword_fallback() {
        let test_cases = [
            ("abacus 1.", "abacus"),
            ("zebra, 2: ", "zebra"),
            ("  plain  ", "plain"),
            ("first\nsecond", "first"),
            ("<hw>unclosed first line 3.", "<hw>unclosed first line"),
            ("<hw></hw>rest.", "<hw></hw>rest"),
            ("", ""),
        ];

        for (input, expected) in test_cases {
            assert_eq!(extract(input).headword, expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_etymology_normalized() {
        let text = "<hw>q</hw><etym>f. <cf>Latin</cf>  &oq.quid&cq.</etym>";
        assert_eq!(extract(text).etymology, "f. Latin 'quid'");
    }

    #[test]
    fn test_missing_etymology_is_empty() {
        assert_eq!(extract("<hw>a</hw> no etymology").etymology, "");
        assert_eq!(extract("<hw>a</hw> <etym>never closed").etymology, "");
    }

    #[test]
    fn test_tag_content_first_pair() {
        let text = "<x>one</x><x>two</x>";
        assert_eq!(tag_content(text, "<x>", "</x>"), Some("one"));
        // Closing tag before the opening one is ignored.
        assert_eq!(tag_content("</x>a<x>b</x>", "<x>", "</x>"), Some("b"));
        assert_eq!(tag_content("no tags", "<x>", "</x>"), None);
    }
}
