use std::sync::LazyLock;

use regex::Regex;

pub const BRAND_WORD: &str = "Atera";

static TRAILING_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<lead>.*?\S)\s+atera\s*$").expect("brand regex")
});

/// How the headline is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Headline {
    /// Rendered verbatim on a single line.
    Plain(String),
    /// `lead` on the first line, the brand word styled on its own line.
    Branded { lead: String, brand: String },
}

impl Headline {
    /// Splits a title ending in the brand word onto two lines.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        match TRAILING_BRAND.captures(title) {
            Some(captures) => {
                let lead = captures
                    .name("lead")
                    .map(|m| m.as_str().trim())
                    .unwrap_or_default();
                if lead.is_empty() {
                    Self::Plain(title.to_owned())
                } else {
                    Self::Branded {
                        lead: lead.to_owned(),
                        brand: BRAND_WORD.to_owned(),
                    }
                }
            }
            None => Self::Plain(title.to_owned()),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        match self {
            Self::Plain(_) => 1,
            Self::Branded { .. } => 2,
        }
    }
}
