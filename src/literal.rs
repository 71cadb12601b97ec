//! Quoted string literals
//!
//! XKB strings use the same escaping rules as JSON string literals: a backslash
//! escapes a quote, a backslash or a control character, and nothing else is
//! special. The lexer decodes every string token through [`decode`]; anything
//! that writes literal text back out should go through [`encode`] so that the
//! two stay inverse to each other.

use thiserror::Error;

/// A quoted literal that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed string literal {literal}: {message}")]
pub struct LiteralError {
    /// The literal text as it appeared in the source, quotes included
    pub literal: String,
    pub message: String,
}

impl LiteralError {
    fn new(literal: &str, message: impl Into<String>) -> Self {
        Self {
            literal: literal.to_string(),
            message: message.into(),
        }
    }
}

/// Escape a string and surround it with double quotes
pub fn encode(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Remove the surrounding quotes from a literal and resolve its escapes
pub fn decode(literal: &str) -> Result<String, LiteralError> {
    if literal.len() < 2 || !literal.starts_with('"') || !literal.ends_with('"') {
        return Err(LiteralError::new(literal, "expected a quoted string"));
    }

    serde_json::from_str::<String>(literal).map_err(|e| LiteralError::new(literal, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain() {
        assert_eq!(encode("us"), "\"us\"");
    }

    #[test]
    fn test_encode_escapes() {
        assert_eq!(encode("a\"b"), r#""a\"b""#);
        assert_eq!(encode("a\\b"), r#""a\\b""#);
        assert_eq!(encode("line\nbreak"), r#""line\nbreak""#);
    }

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode("\"pc+us(intl)\""), Ok("pc+us(intl)".to_string()));
    }

    #[test]
    fn test_decode_embedded_quote() {
        assert_eq!(decode(r#""say \"hi\"""#), Ok("say \"hi\"".to_string()));
    }

    #[test]
    fn test_decode_unicode_escape() {
        assert_eq!(decode(r#""\u00e9""#), Ok("é".to_string()));
    }

    #[test]
    fn test_decode_unterminated() {
        assert!(decode("\"abc").is_err());
    }

    #[test]
    fn test_decode_invalid_escape() {
        let err = decode(r#""\q""#).unwrap_err();
        assert_eq!(err.literal, r#""\q""#);
    }

    #[test]
    fn test_decode_rejects_surrounding_content() {
        assert!(decode(" \"a\"").is_err());
        assert!(decode("\"a\" \"b\"").is_err());
        assert!(decode("").is_err());
    }
}
