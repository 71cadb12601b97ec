//! Error types for parsing
//!
//! Chumsky reports failures against token indices. [`SyntaxError::from_errors`]
//! maps the furthest failure back onto the lexeme it points at, or onto the end
//! of input when the token stream ran out first.

use chumsky::error::{Simple, SimpleReason};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

use crate::lexer::{Lexeme, Token};

/// The token a parse failed on
#[derive(Debug, Clone, PartialEq)]
pub struct OffendingToken {
    pub token: Token,
    /// Short name of the token kind, e.g. `keyword` or `'}'`
    pub kind: &'static str,
    /// The token as it appeared in the source
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// The input ended before the current construct was closed; more text may fix it
    #[error("unexpected end of input{}", describe_expected(.expected))]
    Incomplete { expected: Vec<String> },

    /// A token that no grammar rule accepts at this position
    #[error(
        "line {}: unexpected {} {:?}{}",
        .token.line,
        .token.kind,
        .token.text,
        describe_expected(.expected)
    )]
    Invalid {
        token: OffendingToken,
        expected: Vec<String>,
    },
}

fn describe_expected(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected {}", expected.join(" or "))
    }
}

fn describe_token(token: &Option<Token>) -> String {
    match token {
        None => "end of input".to_string(),
        Some(Token::Keyword(keyword, _)) => format!("'{}'", keyword),
        Some(token) => token.kind_name().to_string(),
    }
}

impl SyntaxError {
    /// Build an error from chumsky's failures, keeping the one that got furthest
    pub(crate) fn from_errors(errors: Vec<Simple<Token>>, lexemes: &[Lexeme<'_>]) -> Self {
        let furthest = errors
            .into_iter()
            .reduce(|best, error| {
                if error.span().start > best.span().start {
                    error
                } else {
                    best
                }
            });

        let Some(error) = furthest else {
            return SyntaxError::Incomplete {
                expected: Vec::new(),
            };
        };

        let mut expected: BTreeSet<String> = error.expected().map(describe_token).collect();
        if let SimpleReason::Unclosed { delimiter, .. } = error.reason() {
            expected.insert(format!("closing delimiter for {}", delimiter.kind_name()));
        }
        if let Some(label) = error.label() {
            expected.insert(label.to_string());
        }
        let expected = expected.into_iter().collect();

        match lexemes.get(error.span().start) {
            Some(lexeme) => SyntaxError::Invalid {
                token: OffendingToken {
                    token: lexeme.token.clone(),
                    kind: lexeme.token.kind_name(),
                    text: lexeme.text.to_string(),
                    line: lexeme.line,
                },
                expected,
            },
            None => SyntaxError::Incomplete { expected },
        }
    }

    /// `None` when the input ended early, the rejected token otherwise
    pub fn offending_token(&self) -> Option<&OffendingToken> {
        match self {
            SyntaxError::Incomplete { .. } => None,
            SyntaxError::Invalid { token, .. } => Some(token),
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, SyntaxError::Incomplete { .. })
    }

    pub fn expected(&self) -> &[String] {
        match self {
            SyntaxError::Incomplete { expected } | SyntaxError::Invalid { expected, .. } => {
                expected
            }
        }
    }
}

/// Which grammar rule a parse starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartRule {
    /// A whole file: zero or more sections
    #[default]
    Keymap,
    /// A single statement, as typed into a diagnostic tool
    Statement,
    /// A single expression
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown start rule '{0}', expected one of: keymap, statement, expression")]
pub struct UnknownStartRule(pub String);

impl FromStr for StartRule {
    type Err = UnknownStartRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keymap" | "file" => Ok(StartRule::Keymap),
            "statement" | "decl" => Ok(StartRule::Statement),
            "expression" | "expr" => Ok(StartRule::Expression),
            _ => Err(UnknownStartRule(s.to_string())),
        }
    }
}

impl StartRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartRule::Keymap => "keymap",
            StartRule::Statement => "statement",
            StartRule::Expression => "expression",
        }
    }
}
