//! Expression nodes

use serde::Serialize;
use std::fmt;

use crate::literal;

/// A literal value as written in the source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    KeyName(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{}", value),
            Literal::String(value) => f.write_str(&literal::encode(value)),
            Literal::KeyName(name) => write!(f, "<{}>", name),
        }
    }
}

/// A dotted field reference with an optional index: `key.type[Group1]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPath {
    pub segments: Vec<String>,
    pub index: Option<Box<Expression>>,
}

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: Expression) -> Self {
        self.index = Some(Box::new(index));
        self
    }

    /// The last segment, which names the field itself
    pub fn field(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))?;
        if let Some(index) = &self.index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `~`
    Invert,
    /// `-`
    Negate,
    /// `+`
    Identity,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Invert => "~",
            UnaryOp::Negate => "-",
            UnaryOp::Identity => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Literal(Literal),
    /// An identifier or field reference
    Reference(FieldPath),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Assign {
        target: FieldPath,
        value: Box<Expression>,
    },
    /// A parenthesized expression
    Group(Box<Expression>),
    /// `[a, b, c]`
    Array(Vec<Expression>),
    /// `{ a, b, c }`
    Braced(Vec<Expression>),
    /// A call such as `SetMods(modifiers=Shift)`
    Action {
        name: String,
        args: Vec<Expression>,
    },
}

impl Expression {
    pub fn integer(value: i64) -> Self {
        Expression::Literal(Literal::Integer(value))
    }

    pub fn float(value: f64) -> Self {
        Expression::Literal(Literal::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn key_name(name: impl Into<String>) -> Self {
        Expression::Literal(Literal::KeyName(name.into()))
    }

    /// A reference to a single identifier
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Reference(FieldPath::new([name.into()]))
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn assign(target: FieldPath, value: Expression) -> Self {
        Expression::Assign {
            target,
            value: Box::new(value),
        }
    }

    pub fn action(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Action {
            name: name.into(),
            args,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// Compact single-line rendering, used for labels and diagnostics
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Reference(path) => write!(f, "{}", path),
            Expression::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expression::Binary { op, lhs, rhs } => {
                write!(f, "{} {} {}", lhs, op.symbol(), rhs)
            }
            Expression::Assign { target, value } => write!(f, "{} = {}", target, value),
            Expression::Group(inner) => write!(f, "({})", inner),
            Expression::Array(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Expression::Braced(items) => {
                f.write_str("{ ")?;
                write_list(f, items)?;
                f.write_str(" }")
            }
            Expression::Action { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display() {
        let path = FieldPath::new(["key", "type"]).with_index(Expression::ident("Group1"));
        assert_eq!(path.to_string(), "key.type[Group1]");
        assert_eq!(path.field(), "type");
    }

    #[test]
    fn test_expression_display() {
        let expr = Expression::action(
            "SetMods",
            vec![
                Expression::assign(FieldPath::new(["modifiers"]), Expression::ident("Shift")),
                Expression::ident("clearLocks"),
            ],
        );
        assert_eq!(expr.to_string(), "SetMods(modifiers = Shift, clearLocks)");

        let array = Expression::Array(vec![Expression::ident("a"), Expression::ident("A")]);
        assert_eq!(array.to_string(), "[a, A]");
    }

    #[test]
    fn test_literal_display_reescapes_strings() {
        assert_eq!(Literal::String("a\"b".into()).to_string(), r#""a\"b""#);
        assert_eq!(Literal::KeyName("ESC".into()).to_string(), "<ESC>");
    }
}
