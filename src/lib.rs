//! # xkbdata
//!
//! A lexer and parser for XKB keyboard description files, the format used by
//! xkbcomp and libxkbcommon for keycodes, types, compatibility maps, symbols
//! and geometry.
//!
//! ```rust,ignore
//! use xkbdata::parse_keymap;
//!
//! let keymap = parse_keymap(r#"xkb_symbols "basic" { key <AC01> { [a, A] }; };"#)?;
//! assert_eq!(keymap.sections.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`literal`] - string literal escaping shared by the lexer and printers
//! - [`lexer`] - tokens, reserved words and lexical diagnostics
//! - [`ast`] - the parsed tree
//! - [`parser`] - the grammar and syntax errors
//! - [`formats`] / [`processor`] - rendering parsed input for the command line
//! - [`config`] / [`logging`] - command-line settings and tracing setup

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexer;
pub mod literal;
pub mod logging;
pub mod parser;
pub mod processor;

pub use ast::Keymap;
pub use lexer::{lex, tokenize, Lexer, Token};
pub use parser::{parse, parse_keymap, Parsed, StartRule, SyntaxError, XkbParser};
