//! Highlighted-code payload.
//!
//! Syntax highlighting happens outside this workspace; its result travels to
//! the translator inside a single attribute as base64-encoded JSON.

use crate::errors::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub show_line_numbers: bool,
    /// Text shown instead of the body while there are no lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_markup: Option<String>,
}

impl HighlightedCode {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, markup: impl Into<String>) -> Self {
        self.placeholder_markup = Some(markup.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::payload(format!("highlighted code is not base64: {e}")))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_every_field() {
        let original = HighlightedCode::new(["fn main() {", "    println!(\"hi\");", "}"])
            .with_language("rust")
            .with_line_numbers(true)
            .with_placeholder("[grey]loading…[/]");
        let decoded = HighlightedCode::decode(&original.encode().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            HighlightedCode::decode("not base64!"),
            Err(Error::Payload { .. })
        ));
        let not_json = STANDARD.encode("plain text");
        assert!(matches!(
            HighlightedCode::decode(&not_json),
            Err(Error::Payload { .. })
        ));
    }
}
