//! Expression grammar
//!
//! Binding from loosest to tightest:
//!
//! ```text
//! assignment   path = expr          (right associative)
//! sum          expr + expr, expr - expr
//! product      expr * expr, expr / expr
//! unary        ! ~ - + prefixes
//! atom         literal, call, reference, (expr), [list], { list }
//! ```

use chumsky::error::Error as _;
use chumsky::prelude::*;
use std::ops::Range;

use super::combinators::{element_name, field_name, ParserError};
use crate::ast::{BinaryOp, Expression, FieldPath, UnaryOp};
use crate::lexer::Token;

/// The `.field` segments and optional `[index]` that follow an element name
fn path_tail<P>(
    index: P,
) -> impl Parser<Token, (Vec<String>, Option<Expression>), Error = ParserError> + Clone
where
    P: Parser<Token, Expression, Error = ParserError> + Clone,
{
    just(Token::Dot)
        .ignore_then(field_name())
        .repeated()
        .then(
            index
                .delimited_by(just(Token::LBracket), just(Token::RBracket))
                .or_not(),
        )
}

fn build_path(head: String, tail: Vec<String>, index: Option<Expression>) -> FieldPath {
    let mut segments = Vec::with_capacity(tail.len() + 1);
    segments.push(head);
    segments.extend(tail);
    FieldPath {
        segments,
        index: index.map(Box::new),
    }
}

/// A dotted field reference with an optional `[index]`
pub(crate) fn field_path<P>(index: P) -> impl Parser<Token, FieldPath, Error = ParserError> + Clone
where
    P: Parser<Token, Expression, Error = ParserError> + Clone,
{
    element_name()
        .then(path_tail(index))
        .map(|(head, (tail, index))| build_path(head, tail, index))
}

/// What follows an element name inside an expression
enum NameTail {
    Call(Vec<Expression>),
    Path(Vec<String>, Option<Expression>),
}

pub(crate) fn expression() -> impl Parser<Token, Expression, Error = ParserError> + Clone {
    recursive(|expr| {
        let list = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing();

        let literal = select! {
            Token::Integer(value) => Expression::integer(value),
            Token::Float(value) => Expression::float(value),
            Token::String(value) => Expression::string(value),
            Token::KeyName(name) => Expression::key_name(name),
        };

        // a call and a reference share their head; it is read once
        let named = element_name()
            .then(
                list.clone()
                    .delimited_by(just(Token::LParen), just(Token::RParen))
                    .map(NameTail::Call)
                    .or(path_tail(expr.clone()).map(|(tail, index)| NameTail::Path(tail, index))),
            )
            .map(|(head, tail)| match tail {
                NameTail::Call(args) => Expression::action(head, args),
                NameTail::Path(tail, index) => Expression::Reference(build_path(head, tail, index)),
            });

        let group = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(|inner| Expression::Group(Box::new(inner)));

        let array = list
            .clone()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(Expression::Array);

        let braced = list
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map(Expression::Braced);

        let atom = choice((literal, named, group, array, braced)).labelled("expression");

        let prefix = choice((
            just(Token::Bang).to(UnaryOp::Not),
            just(Token::Tilde).to(UnaryOp::Invert),
            just(Token::Minus).to(UnaryOp::Negate),
            just(Token::Plus).to(UnaryOp::Identity),
        ));
        let unary = prefix.repeated().then(atom).foldr(Expression::unary);

        let product_op = choice((
            just(Token::Star).to(BinaryOp::Multiply),
            just(Token::Slash).to(BinaryOp::Divide),
        ));
        let product = unary
            .clone()
            .then(product_op.then(unary).repeated())
            .foldl(|lhs, (op, rhs)| Expression::binary(op, lhs, rhs));

        let sum_op = choice((
            just(Token::Plus).to(BinaryOp::Add),
            just(Token::Minus).to(BinaryOp::Subtract),
        ));
        let sum = product
            .clone()
            .then(sum_op.then(product).repeated())
            .foldl(|lhs, (op, rhs)| Expression::binary(op, lhs, rhs));

        // only a bare reference may stand left of `=`
        let assigned = just(Token::Equals)
            .map_with_span(|_, span: Range<usize>| span)
            .then(expr)
            .or_not();

        sum.then(assigned).try_map(|(lhs, assigned), _| match (lhs, assigned) {
            (lhs, None) => Ok(lhs),
            (Expression::Reference(target), Some((_, value))) => {
                Ok(Expression::assign(target, value))
            }
            (_, Some((equals, _))) => Err(ParserError::expected_input_found(
                equals,
                None,
                Some(Token::Equals),
            )
            .with_label("assignment target")),
        })
    })
    .boxed()
}
