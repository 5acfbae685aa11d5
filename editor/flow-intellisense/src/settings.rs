//! Snippet settings passed into each completion request.

use serde::{Deserialize, Serialize};

/// Quote character used in generated attribute snippets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    #[default]
    Double,
}

impl QuoteStyle {
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Formatting of generated snippets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Spaces per nesting level in tag skeletons
    #[serde(alias = "indentSize", alias = "indent_size")]
    pub indent_size: usize,

    /// Quote style for attribute placeholders
    pub quotes: QuoteStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent_size: 2,
            quotes: QuoteStyle::Double,
        }
    }
}

impl Settings {
    pub fn quote(&self) -> char {
        self.quotes.as_char()
    }
}
