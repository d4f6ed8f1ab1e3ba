// Presentation of decoded entries
//
// This module turns an `Entry` into one of four text presentations. Format
// names are parsed only at the outer boundary; everything inside works with
// the `RenderFormat` variant.

pub mod entry_renderer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::entry::Entry;
use crate::OedError;

pub use entry_renderer::{brief_summary, extract_pronunciation, BRIEF_MAX_CHARS};

/// Output presentation for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Markdown-flavoured, with quotations, titles and cross references kept.
    Full,
    /// Readable text with sense numbers and quotations, no markup.
    #[default]
    Clean,
    /// Headword and a short first-sense summary.
    Brief,
    /// Tags intact, for debugging.
    Raw,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 4] = [RenderFormat::Full, RenderFormat::Clean, RenderFormat::Brief, RenderFormat::Raw];

    pub fn name(&self) -> &'static str {
        match self {
            RenderFormat::Full => "full",
            RenderFormat::Clean => "clean",
            RenderFormat::Brief => "brief",
            RenderFormat::Raw => "raw",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderFormat {
    type Err = OedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RenderFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OedError::invalid_parameter(format!("Unknown format: {}", s)))
    }
}

/// Renders an entry in the given format.
pub fn render(entry: &Entry, format: RenderFormat, include_etymology: bool) -> String {
    match format {
        RenderFormat::Full => entry_renderer::render_full(entry, include_etymology),
        RenderFormat::Clean => entry_renderer::render_clean(entry, include_etymology),
        RenderFormat::Brief => entry_renderer::render_brief(entry, include_etymology),
        RenderFormat::Raw => entry_renderer::render_raw(entry, include_etymology),
    }
}
