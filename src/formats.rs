//! Treeviz formatter for parsed keymaps
//!
//! One line per node, nesting shown with box-drawing connectors:
//!
//! ```text
//! └─ CompositeSection: xkb_keymap
//!   ├─ Section: xkb_keycodes "evdev"
//!   │ └─ KeyDefinition: <ESC> 9
//!   └─ Section: xkb_symbols
//!     └─ KeyDefinition: <ESC> [Escape]
//! ```
//!
//! Labels are truncated to 30 characters. Expressions are shown inside the
//! label of the statement that holds them rather than as nodes of their own.
//!
//! [`summarize`] counts the nodes of a keymap for log output.

use crate::ast::visitor::{walk_expression, walk_section, walk_statement};
use crate::ast::{AstNode, Expression, Keymap, Section, SectionBody, Statement, Visitor};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(keymap: &Keymap) -> String {
    let mut result = String::new();
    for (i, section) in keymap.sections.iter().enumerate() {
        let is_last = i == keymap.sections.len() - 1;
        append_section(&mut result, section, "", is_last);
    }
    result
}

/// Render a single statement and its nested statements
pub fn statement_to_treeviz_str(statement: &Statement) -> String {
    let mut result = String::new();
    append_statement(&mut result, statement, "", true);
    result
}

fn append_line(result: &mut String, node: &dyn AstNode, prefix: &str, is_last: bool) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let display_label = truncate(&node.display_label(), LABEL_WIDTH);
    result.push_str(&format!(
        "{}{} {}: {}\n",
        prefix,
        connector,
        node.node_type(),
        display_label
    ));
    format!("{}{}", prefix, if is_last { "  " } else { "│ " })
}

fn append_section(result: &mut String, section: &Section, prefix: &str, is_last: bool) {
    let new_prefix = append_line(result, section, prefix, is_last);
    match &section.body {
        SectionBody::Statements(statements) => {
            for (i, statement) in statements.iter().enumerate() {
                append_statement(result, statement, &new_prefix, i == statements.len() - 1);
            }
        }
        SectionBody::Sections(sections) => {
            for (i, nested) in sections.iter().enumerate() {
                append_section(result, nested, &new_prefix, i == sections.len() - 1);
            }
        }
    }
}

fn append_statement(result: &mut String, statement: &Statement, prefix: &str, is_last: bool) {
    let new_prefix = append_line(result, statement, prefix, is_last);
    let children = statement.children();
    for (i, child) in children.iter().enumerate() {
        append_statement(result, child, &new_prefix, i == children.len() - 1);
    }
}

/// Node counts of a parsed keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub sections: usize,
    pub statements: usize,
    pub expressions: usize,
}

impl Visitor for Summary {
    fn visit_section(&mut self, section: &Section) {
        self.sections += 1;
        walk_section(self, section);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        self.statements += 1;
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        self.expressions += 1;
        walk_expression(self, expression);
    }
}

pub fn summarize(keymap: &Keymap) -> Summary {
    let mut summary = Summary::default();
    summary.visit_keymap(keymap);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_keymap, parse_statement};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_empty_keymap_renders_nothing() {
        assert_eq!(to_treeviz_str(&Keymap::default()), "");
    }

    #[test]
    fn test_nested_keymap() {
        let keymap = parse_keymap(
            r#"xkb_keymap {
                xkb_keycodes "evdev" { <ESC> = 9; <TAB> = 23; };
                xkb_types { type "ONE_LEVEL" { modifiers = none; }; };
            };"#,
        )
        .expect("keymap should parse");
        insta::assert_snapshot!(to_treeviz_str(&keymap), @r###"
        └─ CompositeSection: xkb_keymap
          ├─ Section: xkb_keycodes "evdev"
          │ ├─ KeyDefinition: <ESC> 9
          │ └─ KeyDefinition: <TAB> 23
          └─ Section: xkb_types
            └─ KeyType: ONE_LEVEL
              └─ Assignment: modifiers = none
        "###);
    }

    #[test]
    fn test_summary_counts_nested_nodes() {
        let keymap = parse_keymap(
            r#"xkb_keymap {
                xkb_keycodes { <ESC> = 9; };
                xkb_symbols { override key <ESC> { [Escape] }; };
            };"#,
        )
        .expect("keymap should parse");
        assert_eq!(
            summarize(&keymap),
            Summary {
                sections: 3,
                statements: 3,
                expressions: 3,
            }
        );
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let statement =
            parse_statement(r#"name[Group1] = "English (US, international with dead keys)";"#)
                .expect("statement should parse");
        let rendered = statement_to_treeviz_str(&statement);
        assert_eq!(rendered, "└─ Assignment: name[Group1] = \"English (US, i...\n");
    }
}
