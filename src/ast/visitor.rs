//! Read-only traversal of the AST
//!
//! Implement [`Visitor`] and override the `visit_*` methods for the nodes of
//! interest. Each default method calls the matching `walk_*` function, which
//! visits the node's children in source order; an override that still wants
//! the children visited calls the `walk_*` function itself.

use super::expression::{Expression, FieldPath};
use super::keymap::{Keymap, Section, SectionBody};
use super::statement::{Statement, VirtualModifier};

pub trait Visitor {
    fn visit_keymap(&mut self, keymap: &Keymap) {
        walk_keymap(self, keymap);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    fn visit_field_path(&mut self, path: &FieldPath) {
        walk_field_path(self, path);
    }
}

pub fn walk_keymap<V: Visitor + ?Sized>(visitor: &mut V, keymap: &Keymap) {
    for section in &keymap.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor + ?Sized>(visitor: &mut V, section: &Section) {
    match &section.body {
        SectionBody::Statements(statements) => {
            for statement in statements {
                visitor.visit_statement(statement);
            }
        }
        SectionBody::Sections(sections) => {
            for nested in sections {
                visitor.visit_section(nested);
            }
        }
    }
}

fn visit_all<V: Visitor + ?Sized>(visitor: &mut V, expressions: &[Expression]) {
    for expression in expressions {
        visitor.visit_expression(expression);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Include(_) | Statement::Alias(_) | Statement::Overlay { .. } => {}
        Statement::Assignment { target, value } => {
            visitor.visit_field_path(target);
            visitor.visit_expression(value);
        }
        Statement::Flag { target, .. } => visitor.visit_field_path(target),
        Statement::KeyDefinition(key) => visitor.visit_expression(&key.value),
        Statement::VirtualModifiers(modifiers) => {
            for VirtualModifier { value, .. } in modifiers {
                if let Some(value) = value {
                    visitor.visit_expression(value);
                }
            }
        }
        Statement::Interpret(interpret) => {
            if let Some(condition) = &interpret.pattern.condition {
                visitor.visit_expression(condition);
            }
        }
        Statement::ModifierMap(map) => visit_all(visitor, &map.keys),
        Statement::GroupCompat { value, .. } => visitor.visit_expression(value),
        Statement::IndicatorName(name) => visitor.visit_expression(&name.value),
        Statement::Shape { attributes, .. } => visit_all(visitor, attributes),
        Statement::Keys { keys } => visit_all(visitor, keys),
        Statement::Merged { .. }
        | Statement::KeyType(_)
        | Statement::Indicator(_)
        | Statement::GeometrySection { .. }
        | Statement::Row { .. }
        | Statement::Doodad { .. } => {}
    }

    for child in statement.children() {
        visitor.visit_statement(child);
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    match expression {
        Expression::Literal(_) => {}
        Expression::Reference(path) => visitor.visit_field_path(path),
        Expression::Unary { operand, .. } => visitor.visit_expression(operand),
        Expression::Binary { lhs, rhs, .. } => {
            visitor.visit_expression(lhs);
            visitor.visit_expression(rhs);
        }
        Expression::Assign { target, value } => {
            visitor.visit_field_path(target);
            visitor.visit_expression(value);
        }
        Expression::Group(inner) => visitor.visit_expression(inner),
        Expression::Array(items) | Expression::Braced(items) => visit_all(visitor, items),
        Expression::Action { args, .. } => visit_all(visitor, args),
    }
}

pub fn walk_field_path<V: Visitor + ?Sized>(visitor: &mut V, path: &FieldPath) {
    if let Some(index) = &path.index {
        visitor.visit_expression(index);
    }
}
