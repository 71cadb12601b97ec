//! Section and file level grammar

use chumsky::prelude::*;

use super::combinators::{block, section_flags, section_kind, string, ParserError};
use super::statements::statement;
use crate::ast::{Keymap, Section, SectionBody};
use crate::lexer::Token;

/// `flags* xkb_symbols "name"? { statement* };`
pub(crate) fn map_section() -> impl Parser<Token, Section, Error = ParserError> + Clone {
    section_flags()
        .then(section_kind(false))
        .then(string().or_not())
        .then(block(statement()))
        .map(|(((flags, kind), name), statements)| Section {
            kind,
            flags,
            name,
            body: SectionBody::Statements(statements),
        })
        .boxed()
}

/// `flags* xkb_keymap "name"? { map_section* };`
pub(crate) fn composite_section() -> impl Parser<Token, Section, Error = ParserError> + Clone {
    section_flags()
        .then(section_kind(true))
        .then(string().or_not())
        .then(block(map_section()))
        .map(|(((flags, kind), name), sections)| Section {
            kind,
            flags,
            name,
            body: SectionBody::Sections(sections),
        })
}

/// A whole file: any number of sections, then end of input
pub(crate) fn keymap() -> impl Parser<Token, Keymap, Error = ParserError> + Clone {
    composite_section()
        .or(map_section())
        .repeated()
        .then_ignore(end())
        .map(Keymap::new)
}
