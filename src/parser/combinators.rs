//! Small parsers shared by the expression, statement and section grammars.

use chumsky::error::Error as _;
use chumsky::prelude::*;

use crate::ast::{MergeMode, SectionFlags, SectionKind};
use crate::lexer::{Keyword, Token};

/// Type alias for parser error
pub(crate) type ParserError = Simple<Token>;

fn expected_keyword(keyword: Keyword) -> Option<Token> {
    Some(Token::Keyword(keyword, keyword.as_str().to_string()))
}

/// Helper: match a punctuation token, discarding it
pub(crate) fn token(t: Token) -> impl Parser<Token, (), Error = ParserError> + Clone {
    just(t).ignored()
}

/// Match a reserved word regardless of case, yielding the text as written
pub(crate) fn keyword(keyword: Keyword) -> impl Parser<Token, String, Error = ParserError> + Clone {
    filter_map(move |span, found: Token| match found {
        Token::Keyword(k, text) if k == keyword => Ok(text),
        other => Err(ParserError::expected_input_found(
            span,
            [expected_keyword(keyword)],
            Some(other),
        )),
    })
}

pub(crate) fn string() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! { Token::String(value) => value }.labelled("string")
}

pub(crate) fn key_name() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! { Token::KeyName(name) => name }.labelled("key name")
}

pub(crate) fn integer() -> impl Parser<Token, i64, Error = ParserError> + Clone {
    select! { Token::Integer(value) => value }.labelled("integer")
}

/// The head of a field path: an identifier, or a reserved word that names an
/// element such as `key` or `action`
pub(crate) fn element_name() -> impl Parser<Token, String, Error = ParserError> + Clone {
    filter_map(|span, found: Token| match found {
        Token::Ident(name) => Ok(name),
        Token::Keyword(keyword, text) if keyword.is_element() => Ok(text),
        other => Err(ParserError::expected_input_found(span, None, Some(other))),
    })
    .labelled("identifier")
}

/// A field after a `.`; any word is accepted here, reserved or not
pub(crate) fn field_name() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! {
        Token::Ident(name) => name,
        Token::Keyword(_, text) => text,
    }
    .labelled("field name")
}

/// The keysym of an interpret statement
pub(crate) fn keysym() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! {
        Token::Ident(name) => name,
        Token::Integer(value) => value.to_string(),
        Token::Keyword(Keyword::Section, text) => text,
    }
    .labelled("keysym")
}

/// A merge keyword written before a statement or include path
pub(crate) fn merge_mode() -> impl Parser<Token, MergeMode, Error = ParserError> + Clone {
    filter_map(|span, found: Token| match found {
        Token::Keyword(Keyword::Include | Keyword::Alternate, _) => Ok(MergeMode::Default),
        Token::Keyword(Keyword::Augment, _) => Ok(MergeMode::Augment),
        Token::Keyword(Keyword::Override, _) => Ok(MergeMode::Override),
        Token::Keyword(Keyword::Replace, _) => Ok(MergeMode::Replace),
        other => Err(ParserError::expected_input_found(
            span,
            [Keyword::Include, Keyword::Augment, Keyword::Override, Keyword::Replace]
                .map(expected_keyword),
            Some(other),
        )),
    })
}

/// Zero or more flag keywords before a section kind
pub(crate) fn section_flags() -> impl Parser<Token, SectionFlags, Error = ParserError> + Clone {
    filter_map(|span, found: Token| {
        let flag = match &found {
            Token::Keyword(keyword, _) => SectionFlags::from_keyword(*keyword),
            _ => None,
        };
        flag.ok_or_else(|| ParserError::expected_input_found(span, None, Some(found)))
    })
    .repeated()
    .map(|flags| flags.into_iter().fold(SectionFlags::empty(), |acc, flag| acc | flag))
}

/// A section kind keyword; `composite` selects between keymap-like sections
/// and the map sections they contain
pub(crate) fn section_kind(
    composite: bool,
) -> impl Parser<Token, SectionKind, Error = ParserError> + Clone {
    filter_map(move |span, found: Token| {
        let kind = match &found {
            Token::Keyword(keyword, _) => SectionKind::from_keyword(*keyword)
                .filter(|kind| kind.is_composite() == composite),
            _ => None,
        };
        kind.ok_or_else(|| ParserError::expected_input_found(span, None, Some(found)))
    })
    .labelled("section keyword")
}

/// `{ item* };`
pub(crate) fn block<P, O>(item: P) -> impl Parser<Token, Vec<O>, Error = ParserError> + Clone
where
    P: Parser<Token, O, Error = ParserError> + Clone,
{
    item.repeated()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .then_ignore(just(Token::Semicolon))
}

/// `{ item, item, ... };`
pub(crate) fn braced_list<P, O>(item: P) -> impl Parser<Token, Vec<O>, Error = ParserError> + Clone
where
    P: Parser<Token, O, Error = ParserError> + Clone,
{
    item.separated_by(just(Token::Comma))
        .allow_trailing()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .then_ignore(just(Token::Semicolon))
}
