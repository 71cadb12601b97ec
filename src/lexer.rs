//! Lexer module for the XKB language
//!
//! Tokenization happens in one pass over the source:
//!
//! - Runs of spaces and tabs, and `#` or `//` comments, produce nothing.
//! - Newlines produce nothing but advance the line counter, so every
//!   [`Lexeme`] knows the line it started on.
//! - Literals carry their parsed value: hex and decimal integers both become
//!   [`Token::Integer`], strings are unescaped, key-names lose their brackets.
//! - Identifiers whose lowercase spelling is reserved become
//!   [`Token::Keyword`], keeping the original spelling for diagnostics and for
//!   the grammar positions that accept reserved words as field names.
//!
//! Characters that start no token are reported as [`LexDiagnostic`]s and
//! skipped; lexing never stops early.

pub mod keywords;
pub mod lexer_impl;
pub mod tokens;

pub use keywords::Keyword;
pub use lexer_impl::{lex, tokenize, LexDiagnostic, Lexeme, Lexer};
pub use tokens::Token;
