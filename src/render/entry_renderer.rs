//! Renderers for the four entry presentations.
//!
//! The structural passes rewrite a handful of known tags into text markers
//! (sense numbers, quotation dates and texts, work titles, authors, cross
//! references) before every remaining tag is stripped:
//!
//! | Tag            | Clean          | Full              |
//! |----------------|----------------|-------------------|
//! | `<s4 num=N>`   | `\nN. `        | `\n\n### N. `     |
//! | `<qd>d</qd>`   | `[d] `         | `\n**[d]** `      |
//! | `<qt>t</qt>`   | `"t" `         | `"t" `            |
//! | `<w>t</w>`     | `t`            | `*t* `            |
//! | `<a>n</a>`     | `n`            | `n `              |
//! | `<xr>x</xr>`   | `x`            | `[See: x] `       |
//!
//! # Examples
//!
//! ```
//! use oed::render::brief_summary;
//!
//! let summary = brief_summary("<etym>f. L.</etym> <s4 num=1>A trial. <qd>1600</qd></s4>");
//! assert_eq!(summary, "A trial.");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::storage::entry::Entry;
use crate::utils::text_normalizer::{strip_all_tags, strip_tags_preserving_lines};

/// Maximum characters kept by the brief summary before truncation markers.
pub const BRIEF_MAX_CHARS: usize = 200;
const ELLIPSIS: &str = "...";
const CLEAN_RULE_WIDTH: usize = 40;

static FIRST_SENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<s4[^>]*>([^<]+)").expect("valid sense regex"));
static ETYMOLOGY_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<etym>.*?</etym>").expect("valid etym regex"));
static PRONUNCIATION_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<pr>.*?</pr>").expect("valid pr regex"));
static PHONETIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<ph>([^<]+)</ph>").expect("valid ph regex"));

static SENSE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<s4 num=(\d+)>").expect("valid sense number regex"));
static QUOTE_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<qd>([^<]+)</qd>").expect("valid qd regex"));
static QUOTE_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<qt>([^<]+)</qt>").expect("valid qt regex"));
static WORK_TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w>([^<]+)</w>").expect("valid w regex"));
static AUTHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a>([^<]+)</a>").expect("valid a regex"));
static CROSS_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<xr>([^<]+)</xr>").expect("valid xr regex"));

/// Returns the first `<ph>` pronunciation in a definition.
pub fn extract_pronunciation(definition: &str) -> Option<&str> {
    PHONETIC_RE
        .captures(definition)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the first sense's plain text, truncated for the brief format.
///
/// Without a sense marker the etymology and pronunciation blocks are removed
/// and the whole remaining definition is used.
pub fn brief_summary(definition: &str) -> String {
    let text = match FIRST_SENSE_RE.captures(definition).and_then(|caps| caps.get(1)) {
        Some(sense) => sense.as_str().to_string(),
        None => {
            let text = ETYMOLOGY_BLOCK_RE.replace_all(definition, "");
            PRONUNCIATION_BLOCK_RE.replace_all(&text, "").into_owned()
        }
    };
    truncate_summary(&strip_all_tags(&text))
}

/// Cuts text longer than [`BRIEF_MAX_CHARS`] at the first sentence boundary
/// within the limit, or hard-cuts and appends an ellipsis.
fn truncate_summary(text: &str) -> String {
    let Some((limit, _)) = text.char_indices().nth(BRIEF_MAX_CHARS) else {
        return text.to_string();
    };
    let head = &text[..limit];
    match head.find(". ") {
        Some(idx) => text[..idx + 1].to_string(),
        None => format!("{}{}", head, ELLIPSIS),
    }
}

fn clean_definition(definition: &str) -> String {
    let text = SENSE_NUMBER_RE.replace_all(definition, "\n${1}. ");
    let text = QUOTE_DATE_RE.replace_all(&text, "[${1}] ");
    let text = QUOTE_TEXT_RE.replace_all(&text, "\"${1}\" ");
    strip_tags_preserving_lines(&text)
}

fn detailed_definition(definition: &str) -> String {
    let text = SENSE_NUMBER_RE.replace_all(definition, "\n\n### ${1}. ");
    let text = QUOTE_DATE_RE.replace_all(&text, "\n**[${1}]** ");
    let text = QUOTE_TEXT_RE.replace_all(&text, "\"${1}\" ");
    let text = WORK_TITLE_RE.replace_all(&text, "*${1}* ");
    let text = AUTHOR_RE.replace_all(&text, "${1} ");
    let text = CROSS_REF_RE.replace_all(&text, "[See: ${1}] ");
    strip_tags_preserving_lines(&text)
}

pub fn render_raw(entry: &Entry, include_etymology: bool) -> String {
    let mut result = format!("OED Entry for '{}':\n\nDefinition:\n{}\n", entry.word, entry.definition);
    if include_etymology && !entry.etymology.is_empty() {
        result.push_str(&format!("\nEtymology:\n{}\n", entry.etymology));
    }
    result
}

/// Renders `<word>: <summary>`, plus an `Etymology:` line when requested.
///
/// Only the summary is bounded by [`BRIEF_MAX_CHARS`] (plus a three character
/// ellipsis). The headword prefix and the etymology line add to that, so the
/// whole output can be longer than 203 characters.
pub fn render_brief(entry: &Entry, include_etymology: bool) -> String {
    let mut result = format!("{}: {}", entry.word, brief_summary(&entry.definition));
    if include_etymology && !entry.etymology.is_empty() {
        result.push_str(&format!("\nEtymology: {}", strip_all_tags(&entry.etymology)));
    }
    result
}

pub fn render_clean(entry: &Entry, include_etymology: bool) -> String {
    let mut result = format!("OED Entry: {}\n{}\n\n", entry.word, "-".repeat(CLEAN_RULE_WIDTH));

    if let Some(pronunciation) = extract_pronunciation(&entry.definition) {
        result.push_str(&format!("Pronunciation: {}\n\n", pronunciation));
    }
    if include_etymology && !entry.etymology.is_empty() {
        result.push_str(&format!("Etymology: {}\n\n", strip_all_tags(&entry.etymology)));
    }

    result.push_str("Definition:\n");
    result.push_str(&clean_definition(&entry.definition));
    result.push('\n');
    result
}

pub fn render_full(entry: &Entry, include_etymology: bool) -> String {
    let mut result = format!("# Complete OED Entry: {}\n\n", entry.word);

    if let Some(pronunciation) = extract_pronunciation(&entry.definition) {
        result.push_str(&format!("**Pronunciation:** {}\n\n", pronunciation));
    }
    if include_etymology && !entry.etymology.is_empty() {
        result.push_str("## Etymology\n");
        result.push_str(&format!("{}\n\n", strip_all_tags(&entry.etymology)));
    }

    result.push_str("## Definition\n\n");
    result.push_str(&detailed_definition(&entry.definition));
    result.push('\n');
    result
}
