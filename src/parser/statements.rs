//! Statement grammar
//!
//! Statements are accepted in any section; the kind of the enclosing section
//! does not narrow the choice. Alternatives that share a prefix (`key <A> {`
//! against `key.repeat = ...`, `shape "NORM" {` against `shape.cornerRadius`)
//! rely on chumsky backtracking to the next alternative.

use chumsky::error::Error as _;
use chumsky::prelude::*;

use super::combinators::{
    block, braced_list, element_name, integer, key_name, keysym, keyword, merge_mode, string,
    token, ParserError,
};
use super::expressions::{expression, field_path};
use super::include::{parse_include_path, IncludeError};
use crate::ast::{
    Alias, DoodadKind, Expression, Include, Indicator, IndicatorName, Interpret, InterpretMatch,
    KeyType, ModifierMap, Statement, VirtualModifier,
};
use crate::lexer::{Keyword, Token};

/// `path = expr;`, `path;` or `!path;`, the body of types, interprets and
/// indicators
pub(crate) fn var_decl() -> impl Parser<Token, Statement, Error = ParserError> + Clone {
    let expr = expression();
    let path = field_path(expr.clone());

    let assignment_or_set = path
        .clone()
        .then(token(Token::Equals).ignore_then(expr).or_not())
        .then_ignore(token(Token::Semicolon))
        .map(|(target, value)| match value {
            Some(value) => Statement::assignment(target, value),
            None => Statement::Flag {
                target,
                enabled: true,
            },
        });

    let clear = token(Token::Bang)
        .ignore_then(path)
        .then_ignore(token(Token::Semicolon))
        .map(|target| Statement::Flag {
            target,
            enabled: false,
        });

    assignment_or_set.or(clear).boxed()
}

/// `include "path"`, or the path after another merge keyword
fn include() -> impl Parser<Token, Statement, Error = ParserError> + Clone {
    merge_mode()
        .then(string())
        .try_map(|(merge, path), span: std::ops::Range<usize>| {
            // spans are token indices; the path string is the last token
            let path_span = span.end - 1..span.end;
            match parse_include_path(&path, merge) {
                Ok(fragments) => Ok(Statement::Include(Include {
                    merge,
                    path,
                    fragments,
                })),
                Err(error) => Err(ParserError::expected_input_found(
                    path_span,
                    None,
                    Some(Token::String(path)),
                )
                .with_label(include_label(&error))),
            }
        })
        .then_ignore(token(Token::Semicolon).or_not())
}

fn include_label(error: &IncludeError) -> &'static str {
    match error {
        IncludeError::Empty => "non-empty include path",
        IncludeError::MissingFile(_) => "file name in include path",
        IncludeError::Unbalanced(_) => "balanced parentheses in include path",
    }
}

pub(crate) fn statement() -> impl Parser<Token, Statement, Error = ParserError> + Clone {
    recursive(|statement| {
        let expr = expression();
        let fields = var_decl();
        let semicolon = || token(Token::Semicolon);

        let key_code = key_name()
            .then_ignore(token(Token::Equals))
            .then(expr.clone())
            .then_ignore(semicolon())
            .map(|(keyname, value)| Statement::key(keyname, value));

        let alias = keyword(Keyword::Alias)
            .ignore_then(key_name())
            .then_ignore(token(Token::Equals))
            .then(key_name())
            .then_ignore(semicolon())
            .map(|(from, to)| Statement::Alias(Alias { from, to }));

        let virtual_modifier = element_name()
            .then(token(Token::Equals).ignore_then(expr.clone()).or_not())
            .map(|(name, value)| VirtualModifier { name, value });
        let virtual_modifiers = keyword(Keyword::VirtualModifiers)
            .ignore_then(
                virtual_modifier
                    .separated_by(token(Token::Comma))
                    .at_least(1),
            )
            .then_ignore(semicolon())
            .map(Statement::VirtualModifiers);

        let key_type = keyword(Keyword::Type)
            .ignore_then(string())
            .then(block(fields.clone()))
            .map(|(name, body)| Statement::KeyType(KeyType { name, body }));

        let interpret = keyword(Keyword::Interpret)
            .ignore_then(keysym())
            .then(token(Token::Plus).ignore_then(expr.clone()).or_not())
            .then(block(fields.clone()))
            .map(|((keysym, condition), actions)| {
                Statement::Interpret(Interpret {
                    pattern: InterpretMatch { keysym, condition },
                    actions,
                })
            });

        // one item is the value itself; several make a braced list
        let symbols_key = keyword(Keyword::Key)
            .ignore_then(key_name())
            .then(braced_list(expr.clone()))
            .map(|(keyname, mut items)| {
                let value = if items.len() == 1 {
                    items.remove(0)
                } else {
                    Expression::Braced(items)
                };
                Statement::key(keyname, value)
            });

        let modifier_map = keyword(Keyword::ModifierMap)
            .ignore_then(element_name())
            .then(braced_list(expr.clone()))
            .map(|(modifier, keys)| Statement::ModifierMap(ModifierMap { modifier, keys }));

        let group_compat = keyword(Keyword::Group)
            .ignore_then(integer())
            .then_ignore(token(Token::Equals))
            .then(expr.clone())
            .then_ignore(semicolon())
            .map(|(group, value)| Statement::GroupCompat { group, value });

        let indicator = keyword(Keyword::Indicator)
            .ignore_then(string())
            .then(block(fields.clone()))
            .map(|(name, body)| Statement::Indicator(Indicator { name, body }));

        let indicator_name = keyword(Keyword::Virtual)
            .or_not()
            .then_ignore(keyword(Keyword::Indicator))
            .then(integer())
            .then_ignore(token(Token::Equals))
            .then(expr.clone())
            .then_ignore(semicolon())
            .map(|((is_virtual, index), value)| {
                Statement::IndicatorName(IndicatorName {
                    index,
                    value,
                    is_virtual: is_virtual.is_some(),
                })
            });

        let shape = keyword(Keyword::Shape)
            .ignore_then(string())
            .then(braced_list(expr.clone()))
            .map(|(name, attributes)| Statement::Shape { name, attributes });

        let geometry_section = keyword(Keyword::Section)
            .ignore_then(string())
            .then(block(statement.clone()))
            .map(|(name, body)| Statement::GeometrySection { name, body });

        let row = keyword(Keyword::Row)
            .ignore_then(block(statement.clone()))
            .map(|body| Statement::Row { body });

        let keys = keyword(Keyword::Keys)
            .ignore_then(braced_list(expr))
            .map(|keys| Statement::Keys { keys });

        let overlay = keyword(Keyword::Overlay)
            .ignore_then(string())
            .then(braced_list(
                key_name()
                    .then_ignore(token(Token::Equals))
                    .then(key_name()),
            ))
            .map(|(name, keys)| Statement::Overlay { name, keys });

        let doodad_kind = choice((
            keyword(Keyword::Outline).to(DoodadKind::Outline),
            keyword(Keyword::Text).to(DoodadKind::Text),
            keyword(Keyword::Solid).to(DoodadKind::Solid),
        ));
        let doodad = doodad_kind
            .then(string())
            .then(block(fields.clone()))
            .map(|((kind, name), attributes)| Statement::Doodad {
                kind,
                name,
                attributes,
            });

        let core = choice((
            key_code,
            alias,
            virtual_modifiers,
            key_type,
            interpret,
            symbols_key,
            modifier_map,
            group_compat,
            indicator,
            indicator_name,
            shape,
            geometry_section,
            row,
            keys,
            overlay,
            doodad,
            fields,
        ))
        .boxed();

        let merged = merge_mode()
            .then(core.clone())
            .map(|(mode, statement)| Statement::Merged {
                mode,
                statement: Box::new(statement),
            });

        choice((include(), merged, core)).labelled("statement")
    })
    .boxed()
}
