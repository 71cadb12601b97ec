//! Implementation of the XKB lexer
//!
//! [`Lexer`] drives the logos matcher and turns its failures into
//! [`LexDiagnostic`]s instead of aborting. An unrecognized character is skipped
//! on its own: logos may report a failed partial match spanning several
//! characters, so the lexer restarts the matcher one character past the start
//! of the failure.

use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

use super::tokens::{LexError, LineCounter, RawToken, Token};
use crate::literal::LiteralError;

/// A token with its source text, line and byte range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lexeme<'source> {
    pub token: Token,
    pub text: &'source str,
    pub line: usize,
    pub span: Range<usize>,
}

/// A non-fatal problem found while lexing
#[derive(Debug, Clone, PartialEq)]
pub enum LexDiagnostic {
    /// A character that starts no token; it was skipped
    IllegalCharacter { character: char, line: usize },
    /// A literal whose value could not be produced; the token was dropped
    MalformedLiteral {
        text: String,
        line: usize,
        error: Option<LiteralError>,
    },
}

impl LexDiagnostic {
    pub fn line(&self) -> usize {
        match self {
            LexDiagnostic::IllegalCharacter { line, .. }
            | LexDiagnostic::MalformedLiteral { line, .. } => *line,
        }
    }
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexDiagnostic::IllegalCharacter { character, line } => {
                write!(f, "line {}: illegal character {:?}", line, character)
            }
            LexDiagnostic::MalformedLiteral {
                text,
                line,
                error: Some(error),
            } => write!(f, "line {}: {} ({})", line, error.message, text),
            LexDiagnostic::MalformedLiteral {
                text,
                line,
                error: None,
            } => write!(f, "line {}: malformed literal {}", line, text),
        }
    }
}

/// Stateful XKB lexer
///
/// The lexer owns a line counter and the diagnostics gathered so far; build a
/// new one, or call [`Lexer::reset`], for every independent input.
pub struct Lexer<'source> {
    source: &'source str,
    inner: logos::Lexer<'source, RawToken>,
    offset: usize,
    diagnostics: Vec<LexDiagnostic>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            inner: RawToken::lexer_with_extras(source, LineCounter::default()),
            offset: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Rewind to the start of the source, clearing the line counter and diagnostics
    pub fn reset(&mut self) {
        *self = Lexer::new(self.source);
    }

    /// Current line, starting at 1
    pub fn line(&self) -> usize {
        self.inner.extras.line
    }

    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<LexDiagnostic> {
        self.diagnostics
    }

    fn absolute_span(&self) -> Range<usize> {
        let span = self.inner.span();
        self.offset + span.start..self.offset + span.end
    }

    /// Skip the single character at `start` and resume matching after it
    fn skip_character(&mut self, start: usize) {
        let line = self.line();
        let character = self.source[start..].chars().next().unwrap_or('\u{fffd}');
        self.diagnostics
            .push(LexDiagnostic::IllegalCharacter { character, line });

        let source = self.source;
        let resume = (start + character.len_utf8()).min(source.len());
        let extras = self.inner.extras;
        self.inner = RawToken::lexer_with_extras(&source[resume..], extras);
        self.offset = resume;
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Lexeme<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        loop {
            let result = self.inner.next()?;
            let span = self.absolute_span();
            match result {
                Ok(raw) => {
                    if let Some(token) = raw.classify() {
                        return Some(Lexeme {
                            token,
                            text: &source[span.clone()],
                            line: self.line(),
                            span,
                        });
                    }
                }
                Err(LexError::Unrecognized) => self.skip_character(span.start),
                Err(LexError::Literal(error)) => {
                    self.diagnostics.push(LexDiagnostic::MalformedLiteral {
                        text: source[span].to_string(),
                        line: self.line(),
                        error: Some(error),
                    });
                }
                Err(LexError::Number(text)) => {
                    self.diagnostics.push(LexDiagnostic::MalformedLiteral {
                        text,
                        line: self.line(),
                        error: None,
                    });
                }
            }
        }
    }
}

/// Convenience function to tokenize a string and collect all tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).map(|lexeme| lexeme.token).collect()
}

/// Lex a string into lexemes, returning the diagnostics alongside
pub fn lex(source: &str) -> (Vec<Lexeme<'_>>, Vec<LexDiagnostic>) {
    let mut lexer = Lexer::new(source);
    let lexemes = lexer.by_ref().collect();
    (lexemes, lexer.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize("key <AE01> { [ 1, exclam ] };");
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Key, "key".into()),
                Token::KeyName("AE01".into()),
                Token::LBrace,
                Token::LBracket,
                Token::Integer(1),
                Token::Comma,
                Token::Ident("exclam".into()),
                Token::RBracket,
                Token::RBrace,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(tokenize("  \t \n\n "), vec![]);
    }

    #[test]
    fn test_lexemes_carry_text_and_line() {
        let (lexemes, diagnostics) = lex("XKB_Symbols\n  \"us\"");
        assert!(diagnostics.is_empty());
        assert_eq!(lexemes.len(), 2);
        assert_eq!(lexemes[0].text, "XKB_Symbols");
        assert_eq!(lexemes[0].line, 1);
        assert_eq!(lexemes[0].span, 0..11);
        assert_eq!(lexemes[1].text, "\"us\"");
        assert_eq!(lexemes[1].token, Token::String("us".into()));
        assert_eq!(lexemes[1].line, 2);
    }

    #[test]
    fn test_illegal_character_is_skipped() {
        let (lexemes, diagnostics) = lex("a @ b");
        let tokens: Vec<Token> = lexemes.into_iter().map(|l| l.token).collect();
        assert_eq!(
            tokens,
            vec![Token::Ident("a".into()), Token::Ident("b".into())]
        );
        assert_eq!(
            diagnostics,
            vec![LexDiagnostic::IllegalCharacter {
                character: '@',
                line: 1
            }]
        );
    }

    #[test]
    fn test_string_does_not_span_lines() {
        let (lexemes, diagnostics) = lex("a \"b\nc");
        let lines: Vec<(&str, usize)> = lexemes.iter().map(|l| (l.text, l.line)).collect();
        assert_eq!(lines, vec![("a", 1), ("b", 1), ("c", 2)]);
        assert_eq!(
            diagnostics,
            vec![LexDiagnostic::IllegalCharacter {
                character: '"',
                line: 1
            }]
        );
    }

    #[test]
    fn test_partial_key_name_skips_one_character() {
        // "<A B>" is not a key-name; only the '<' is dropped
        let (lexemes, diagnostics) = lex("<A B>");
        let tokens: Vec<Token> = lexemes.into_iter().map(|l| l.token).collect();
        assert_eq!(tokens[0], Token::Ident("A".into()));
        assert_eq!(tokens[1], Token::Ident("B".into()));
        assert_eq!(diagnostics[0].line(), 1);
        assert!(matches!(
            diagnostics[0],
            LexDiagnostic::IllegalCharacter { character: '<', .. }
        ));
    }

    #[test]
    fn test_spans_stay_absolute_after_restart() {
        let (lexemes, _) = lex("$\nkey");
        assert_eq!(lexemes[0].text, "key");
        assert_eq!(lexemes[0].span, 2..5);
        assert_eq!(lexemes[0].line, 2);
    }

    #[test]
    fn test_malformed_string_is_dropped() {
        let (lexemes, diagnostics) = lex(r#"a "\q" b"#);
        assert_eq!(lexemes.len(), 2);
        assert!(matches!(
            &diagnostics[..],
            [LexDiagnostic::MalformedLiteral { error: Some(_), .. }]
        ));
    }

    #[test]
    fn test_integer_overflow_is_a_diagnostic() {
        let (lexemes, diagnostics) = lex("99999999999999999999999");
        assert!(lexemes.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_reset_restarts_line_count() {
        let mut lexer = Lexer::new("a\nb\n@");
        assert_eq!(lexer.by_ref().count(), 2);
        assert_eq!(lexer.line(), 3);
        assert_eq!(lexer.diagnostics().len(), 1);

        lexer.reset();
        assert_eq!(lexer.line(), 1);
        assert!(lexer.diagnostics().is_empty());
        assert_eq!(lexer.map(|l| l.token).collect::<Vec<_>>().len(), 2);
    }
}
