//! HTML format implementation
//!
//! This module implements bidirectional conversion between the document tree
//! and HTML fragments.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for both directions:
//! - export builds an `RcDom` tree and lets `html5ever` serialize it, so text
//!   escaping is handled by the serializer
//! - import runs the browser-grade parser and walks the resulting `<body>`
//!
//! # Element Mapping Table
//!
//! | Tree node        | HTML export                                  | HTML import                              |
//! |------------------|----------------------------------------------|------------------------------------------|
//! | paragraph        | `<p>`                                        | `<p>`                                    |
//! | heading-one/two  | `<h1>` / `<h2>`                              | `<h1>` / `<h2>`                          |
//! | block-quote      | `<blockquote><p>…</p></blockquote>`          | `<blockquote>` (see [`QuoteType`])       |
//! | numbered-list    | `<ol>`                                       | `<ol>`                                   |
//! | bulleted-list    | `<ul>`                                       | `<ul>`                                   |
//! | list-item        | `<li>`                                       | `<li>`                                   |
//! | mention          | `<span style="color: darkblue">character</span>` | any `<span>` (see [`MentionText`])   |
//! | other types      | bare children                                | n/a                                      |
//! | Text marks:      |                                              |                                          |
//! |   bold           | `<strong>`                                   | `<strong>`                               |
//! |   underline      | `<u>`                                        | `<u>`                                    |
//! |   code           | `<code>`                                     | `<code>`                                 |
//! |   italic         | `<em>`                                       | `<em>`                                   |
//! | line break       | n/a                                          | `<br>` → `"\n"`                          |
//! | anything else    | n/a                                          | flattened text content                   |
//!
//! Marks nest in the order bold, underline, code, italic: bold is innermost.
//!
//! # Lossy Conversions
//!
//! - A style tag imports as a text leaf carrying only that tag's mark, built
//!   from the first child. `<em><strong>x</strong></em>` comes back italic only.
//! - A block-quote exports with an inner `<p>`, so it imports as a quote
//!   holding a paragraph.
//! - Mention import ignores the span's structure and keeps only its text.
//! - Unknown tags collapse to their text content.

mod parser;
mod serializer;

pub use parser::{deserialize_node, parse_html, parse_html_with_options, Deserialized};
pub use serializer::{serialize_document, serialize_node};

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Document, ElementKind};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Element type produced for `<blockquote>` on import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteType {
    /// `block-quote`, the same tag the serializer consumes.
    #[default]
    BlockQuote,
    /// `quote`, an element type no exporter recognises. Such quotes export as
    /// their bare children, so a round trip drops the quote.
    Legacy,
}

/// How a `<span>`'s children become the mention `character`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MentionText {
    /// Concatenate the text of every child.
    #[default]
    Concat,
    /// Join the text of every child with commas.
    CommaJoined,
}

/// Knobs for HTML import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub quote_type: QuoteType,
    pub mention_text: MentionText,
}

impl ParseOptions {
    pub fn new(quote_type: QuoteType, mention_text: MentionText) -> Self {
        Self {
            quote_type,
            mention_text,
        }
    }

    /// Legacy import: `quote` elements and comma-joined mention text.
    pub fn legacy() -> Self {
        Self::new(QuoteType::Legacy, MentionText::CommaJoined)
    }

    /// Apply `quote-type` and `mention-text` entries from a format option map.
    pub fn with_overrides(
        mut self,
        options: &HashMap<String, String>,
    ) -> Result<Self, FormatError> {
        for (key, value) in options {
            match key.as_str() {
                "quote-type" => self.quote_type = value.parse()?,
                "mention-text" => self.mention_text = value.parse()?,
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown html option '{other}'"
                    )))
                }
            }
        }
        Ok(self)
    }

    pub(crate) fn quote_kind(&self) -> ElementKind {
        match self.quote_type {
            QuoteType::BlockQuote => ElementKind::BlockQuote,
            QuoteType::Legacy => ElementKind::Other("quote".to_string()),
        }
    }
}

impl QuoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteType::BlockQuote => "block-quote",
            QuoteType::Legacy => "quote",
        }
    }
}

impl FromStr for QuoteType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block-quote" => Ok(QuoteType::BlockQuote),
            "quote" | "legacy" => Ok(QuoteType::Legacy),
            other => Err(FormatError::NotSupported(format!(
                "Unknown quote type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for QuoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MentionText {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionText::Concat => "concat",
            MentionText::CommaJoined => "comma-joined",
        }
    }
}

impl FromStr for MentionText {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concat" => Ok(MentionText::Concat),
            "comma-joined" => Ok(MentionText::CommaJoined),
            other => Err(FormatError::NotSupported(format!(
                "Unknown mention text mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for MentionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: ParseOptions,
}

impl HtmlFormat {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment as produced by the editor"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_html_with_options(source, &self.options))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_document(doc)
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<Document, FormatError> {
        let options = self.options.with_overrides(options)?;
        Ok(parse_html_with_options(source, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_parse_from_strings() {
        assert_eq!("quote".parse::<QuoteType>().unwrap(), QuoteType::Legacy);
        assert_eq!(
            "block-quote".parse::<QuoteType>().unwrap(),
            QuoteType::BlockQuote
        );
        assert_eq!(
            "comma-joined".parse::<MentionText>().unwrap(),
            MentionText::CommaJoined
        );
        assert!("nope".parse::<MentionText>().is_err());
    }

    #[test]
    fn overrides_apply_and_reject_unknown_keys() {
        let mut map = HashMap::new();
        map.insert("quote-type".to_string(), "quote".to_string());
        let options = ParseOptions::default().with_overrides(&map).unwrap();
        assert_eq!(options.quote_type, QuoteType::Legacy);
        assert_eq!(options.mention_text, MentionText::Concat);

        map.insert("theme".to_string(), "dark".to_string());
        assert!(ParseOptions::default().with_overrides(&map).is_err());
    }

    #[test]
    fn legacy_options() {
        let options = ParseOptions::legacy();
        assert_eq!(
            options.quote_kind(),
            ElementKind::Other("quote".to_string())
        );
        assert_eq!(options.mention_text, MentionText::CommaJoined);
    }
}
