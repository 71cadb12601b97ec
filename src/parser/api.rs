//! Public API for the parser.

use chumsky::prelude::*;
use chumsky::Stream;
use serde::Serialize;
use std::ops::Range;
use tracing::{debug, warn};

use super::combinators::ParserError;
use super::error::{StartRule, SyntaxError};
use super::expressions::expression;
use super::sections::keymap;
use super::statements::statement;
use crate::ast::{Expression, Keymap, Statement};
use crate::lexer::{lex, LexDiagnostic, Lexeme, Token};

/// The result of a parse, shaped by the start rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parsed {
    Keymap(Keymap),
    Statement(Statement),
    Expression(Expression),
}

impl Parsed {
    pub fn into_keymap(self) -> Option<Keymap> {
        match self {
            Parsed::Keymap(keymap) => Some(keymap),
            _ => None,
        }
    }

    pub fn as_keymap(&self) -> Option<&Keymap> {
        match self {
            Parsed::Keymap(keymap) => Some(keymap),
            _ => None,
        }
    }
}

/// A reusable parser with a fixed start rule
///
/// Each call to [`XkbParser::parse`] lexes and parses from scratch; the only
/// state carried between calls is the lexical diagnostics of the last input.
#[derive(Debug, Clone, Default)]
pub struct XkbParser {
    start: StartRule,
    diagnostics: Vec<LexDiagnostic>,
}

impl XkbParser {
    pub fn new(start: StartRule) -> Self {
        Self {
            start,
            diagnostics: Vec::new(),
        }
    }

    pub fn start(&self) -> StartRule {
        self.start
    }

    /// Characters the lexer skipped while reading the last input
    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    pub fn parse(&mut self, source: &str) -> Result<Parsed, SyntaxError> {
        match self.start {
            StartRule::Keymap => self.parse_keymap(source).map(Parsed::Keymap),
            StartRule::Statement => self.parse_statement(source).map(Parsed::Statement),
            StartRule::Expression => self.parse_expression(source).map(Parsed::Expression),
        }
    }

    pub fn parse_keymap(&mut self, source: &str) -> Result<Keymap, SyntaxError> {
        let keymap = self.run(source, keymap())?;
        debug!(sections = keymap.sections.len(), "parsed keymap");
        Ok(keymap)
    }

    pub fn parse_statement(&mut self, source: &str) -> Result<Statement, SyntaxError> {
        self.run(source, statement().then_ignore(end()))
    }

    pub fn parse_expression(&mut self, source: &str) -> Result<Expression, SyntaxError> {
        self.run(source, expression().then_ignore(end()))
    }

    fn run<O, P>(&mut self, source: &str, parser: P) -> Result<O, SyntaxError>
    where
        P: Parser<Token, O, Error = ParserError>,
    {
        let (lexemes, diagnostics) = lex(source);
        for diagnostic in &diagnostics {
            warn!(line = diagnostic.line(), "{}", diagnostic);
        }
        self.diagnostics = diagnostics;

        let result = parser.parse(token_stream(&lexemes));
        result.map_err(|errors| {
            let error = SyntaxError::from_errors(errors, &lexemes);
            debug!(%error, "parse failed");
            error
        })
    }
}

type Tokens = std::vec::IntoIter<(Token, Range<usize>)>;

// Spans are lexeme indices so errors can be mapped back to the lexeme they name
fn token_stream(
    lexemes: &[Lexeme<'_>],
) -> Stream<'static, Token, Range<usize>, Tokens> {
    let tokens: Vec<_> = lexemes
        .iter()
        .enumerate()
        .map(|(index, lexeme)| (lexeme.token.clone(), index..index + 1))
        .collect();
    Stream::from_iter(lexemes.len()..lexemes.len() + 1, tokens.into_iter())
}

/// Parse `source` from the given rule, or as a whole keymap file
pub fn parse(source: &str, start: Option<StartRule>) -> Result<Parsed, SyntaxError> {
    XkbParser::new(start.unwrap_or_default()).parse(source)
}

pub fn parse_keymap(source: &str) -> Result<Keymap, SyntaxError> {
    XkbParser::default().parse_keymap(source)
}

pub fn parse_statement(source: &str) -> Result<Statement, SyntaxError> {
    XkbParser::new(StartRule::Statement).parse_statement(source)
}

pub fn parse_expression(source: &str) -> Result<Expression, SyntaxError> {
    XkbParser::new(StartRule::Expression).parse_expression(source)
}
