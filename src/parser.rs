//! Parser for the XKB keyboard description language
//!
//! The parser runs over the token stream produced by [`crate::lexer`] and
//! builds the tree defined in [`crate::ast`]. Grammar rules are chumsky
//! combinators, split by level:
//!
//! - `combinators` - single-token parsers and the `{ ... };` block shapes
//! - `expressions` - field paths and the operator precedence ladder
//! - `statements` - everything that can appear inside a section
//! - `sections` - sections and the file as a whole
//! - `include` - splitting of include path strings into fragments
//!
//! A parse is all-or-nothing. On failure the furthest error is reported as a
//! [`SyntaxError`], which tells apart input that stopped too early from input
//! containing a token no rule accepts.

pub mod api;
mod combinators;
pub mod error;
mod expressions;
pub mod include;
mod sections;
mod statements;
#[cfg(test)]
mod tests;

pub use api::{parse, parse_expression, parse_keymap, parse_statement, Parsed, XkbParser};
pub use error::{OffendingToken, StartRule, SyntaxError, UnknownStartRule};
pub use include::{parse_include_path, IncludeError};
