//! Token representation.
//!
//! A Token is one element of a segmentation: a dictionary word, an unknown
//! Thai cluster, or a run of non-Thai text.

use serde::{Deserialize, Serialize};

use crate::tcc::ClusterKind;

/// The kind of a token (and of the boundary-graph edge that produced it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenKind {
    /// Dictionary word
    #[default]
    Word,
    /// Thai cluster not covered by any dictionary word
    Unknown,
    /// Number
    Number,
    /// Latin text
    Latin,
    /// Punctuation or symbols
    Punct,
    /// Whitespace
    Space,
    /// Text in another script
    Foreign,
}

impl TokenKind {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Word => "WORD",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Number => "NUM",
            TokenKind::Latin => "LATIN",
            TokenKind::Punct => "PUNCT",
            TokenKind::Space => "SPACE",
            TokenKind::Foreign => "FOREIGN",
        }
    }

    /// Kind of the single token a non-Thai cluster turns into
    pub fn for_cluster(kind: ClusterKind) -> Self {
        match kind {
            ClusterKind::Thai => TokenKind::Unknown,
            ClusterKind::Number => TokenKind::Number,
            ClusterKind::Latin => TokenKind::Latin,
            ClusterKind::Whitespace => TokenKind::Space,
            ClusterKind::Punct => TokenKind::Punct,
            ClusterKind::Foreign => TokenKind::Foreign,
        }
    }
}

/// A single token from the segmentation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    /// The raw text of the token
    pub text: String,

    /// Starting byte offset in the original string
    pub start: usize,

    /// Length in bytes
    pub len: usize,

    /// The kind of this token
    pub kind: TokenKind,
}

impl Token {
    /// Create a token with text and position
    pub fn with_text(text: String, start: usize, len: usize, kind: TokenKind) -> Self {
        Token {
            text,
            start,
            len,
            kind,
        }
    }

    /// Byte offset one past the end of the token
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Check if this token came from the dictionary
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// Check if this is whitespace
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.text, self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::with_text("แรงงาน".to_string(), 3, 18, TokenKind::Word);
        assert_eq!(token.text, "แรงงาน");
        assert_eq!(token.end(), 21);
        assert!(token.is_word());
        assert!(!token.is_space());
    }

    #[test]
    fn test_token_display() {
        let token = Token::with_text("2021".to_string(), 0, 4, TokenKind::Number);
        assert_eq!(format!("{}", token), "2021/NUM");
    }

    #[test]
    fn test_token_json() {
        let token = Token::with_text(" ".to_string(), 9, 1, TokenKind::Space);
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"text":" ","start":9,"len":1,"kind":"Space"}"#);
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn test_kind_for_cluster() {
        assert_eq!(TokenKind::for_cluster(ClusterKind::Whitespace), TokenKind::Space);
        assert_eq!(TokenKind::for_cluster(ClusterKind::Thai), TokenKind::Unknown);
    }
}
