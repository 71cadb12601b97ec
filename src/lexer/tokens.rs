//! Token definitions for the XKB language
//!
//! The matching rules live on [`RawToken`], a logos enum. Logos resolves
//! overlapping rules by longest match and then by priority, which gives the
//! order the language needs: key-names, floats before integers, hex before
//! decimal, and identifiers last. Identifiers are reclassified into keywords
//! afterwards, producing the public [`Token`].

use logos::{Logos, Skip};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::keywords::Keyword;
use crate::literal::{self, LiteralError};

/// Running line state carried by the logos lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCounter {
    pub line: usize,
}

impl Default for LineCounter {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Reasons a token could not be produced
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// No rule matched at this position
    #[default]
    Unrecognized,
    /// A string matched but could not be unescaped
    Literal(LiteralError),
    /// A number matched but does not fit an integer
    Number(String),
}

fn newlines(lex: &mut logos::Lexer<RawToken>) -> Skip {
    lex.extras.line += lex.slice().len();
    Skip
}

fn key_name(lex: &mut logos::Lexer<RawToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

fn hex_integer(lex: &mut logos::Lexer<RawToken>) -> Result<i64, LexError> {
    i64::from_str_radix(&lex.slice()[2..], 16).map_err(|_| LexError::Number(lex.slice().into()))
}

fn decimal_integer(lex: &mut logos::Lexer<RawToken>) -> Result<i64, LexError> {
    lex.slice()
        .parse()
        .map_err(|_| LexError::Number(lex.slice().into()))
}

fn float(lex: &mut logos::Lexer<RawToken>) -> Result<f64, LexError> {
    lex.slice()
        .parse()
        .map_err(|_| LexError::Number(lex.slice().into()))
}

fn string(lex: &mut logos::Lexer<RawToken>) -> Result<String, LexError> {
    literal::decode(lex.slice()).map_err(LexError::Literal)
}

/// Tokens as matched by logos, before keyword classification
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LineCounter)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r]+")]
pub enum RawToken {
    #[regex(r"(#|//)[^\n]*", logos::skip)]
    Comment,

    #[regex(r"\n+", newlines)]
    Newline,

    #[regex(r"<[^\s>]+>", key_name)]
    KeyName(String),

    #[regex(r"[0-9]+\.[0-9]+", float)]
    Float(f64),

    #[regex(r"0[xX][0-9a-fA-F]+", hex_integer)]
    HexInteger(i64),

    #[regex(r"[0-9]+", decimal_integer)]
    Integer(i64),

    #[regex(r#""(\\[^\n]|[^"\\\n])*""#, string)]
    String(String),

    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equals,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
}

/// A classified XKB token together with its literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Dot,
    Comma,
    Semicolon,
    Equals,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    Tilde,
    Integer(i64),
    Float(f64),
    String(String),
    KeyName(String),
    Ident(String),
    /// A reserved word, with the spelling used in the source
    Keyword(Keyword, String),
}

impl RawToken {
    /// Classify a raw match into a token, resolving reserved words.
    ///
    /// Returns `None` for the variants logos always skips.
    pub fn classify(self) -> Option<Token> {
        let token = match self {
            RawToken::KeyName(name) => Token::KeyName(name),
            RawToken::Float(value) => Token::Float(value),
            RawToken::HexInteger(value) | RawToken::Integer(value) => Token::Integer(value),
            RawToken::String(value) => Token::String(value),
            RawToken::Ident(text) => match Keyword::lookup(&text) {
                Some(keyword) => Token::Keyword(keyword, text),
                None => Token::Ident(text),
            },
            RawToken::LBrace => Token::LBrace,
            RawToken::RBrace => Token::RBrace,
            RawToken::LBracket => Token::LBracket,
            RawToken::RBracket => Token::RBracket,
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Dot => Token::Dot,
            RawToken::Comma => Token::Comma,
            RawToken::Semicolon => Token::Semicolon,
            RawToken::Equals => Token::Equals,
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Star => Token::Star,
            RawToken::Slash => Token::Slash,
            RawToken::Bang => Token::Bang,
            RawToken::Tilde => Token::Tilde,
            RawToken::Comment | RawToken::Newline => return None,
        };
        Some(token)
    }
}

// Floats produced by the lexer are never NaN, so bitwise equality agrees with `PartialEq`.
impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Token::Integer(value) => value.hash(state),
            Token::Float(value) => value.to_bits().hash(state),
            Token::String(value) | Token::KeyName(value) | Token::Ident(value) => {
                value.hash(state)
            }
            Token::Keyword(keyword, text) => {
                keyword.hash(state);
                text.hash(state);
            }
            _ => {}
        }
    }
}

impl Token {
    /// Short name of the token kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::Dot => "'.'",
            Token::Comma => "','",
            Token::Semicolon => "';'",
            Token::Equals => "'='",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::Bang => "'!'",
            Token::Tilde => "'~'",
            Token::Integer(_) => "integer",
            Token::Float(_) => "float",
            Token::String(_) => "string",
            Token::KeyName(_) => "key name",
            Token::Ident(_) => "identifier",
            Token::Keyword(..) => "keyword",
        }
    }

    /// Check if this token is the given reserved word
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(k, _) if *k == keyword)
    }

    /// Check if this token carries a literal value
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::Integer(_) | Token::Float(_) | Token::String(_) | Token::KeyName(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(value) => write!(f, "{}", value),
            Token::Float(value) => write!(f, "{}", value),
            Token::String(value) => f.write_str(&literal::encode(value)),
            Token::KeyName(name) => write!(f, "<{}>", name),
            Token::Ident(text) | Token::Keyword(_, text) => f.write_str(text),
            other => f.write_str(other.kind_name().trim_matches('\'')),
        }
    }
}
