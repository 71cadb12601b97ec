//! AST traits - Common interfaces for uniform node access

use super::keymap::{Section, SectionBody};
use super::statement::Statement;

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
}

impl AstNode for Section {
    fn node_type(&self) -> &'static str {
        match self.body {
            SectionBody::Statements(_) => "Section",
            SectionBody::Sections(_) => "CompositeSection",
        }
    }

    fn display_label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {:?}", self.kind, name),
            None => self.kind.to_string(),
        }
    }
}

impl AstNode for Statement {
    fn node_type(&self) -> &'static str {
        match self {
            Statement::Include(_) => "Include",
            Statement::Merged { .. } => "Merged",
            Statement::Assignment { .. } => "Assignment",
            Statement::Flag { .. } => "Flag",
            Statement::KeyDefinition(_) => "KeyDefinition",
            Statement::Alias(_) => "Alias",
            Statement::VirtualModifiers(_) => "VirtualModifiers",
            Statement::KeyType(_) => "KeyType",
            Statement::Interpret(_) => "Interpret",
            Statement::ModifierMap(_) => "ModifierMap",
            Statement::GroupCompat { .. } => "GroupCompat",
            Statement::Indicator(_) => "Indicator",
            Statement::IndicatorName(_) => "IndicatorName",
            Statement::Shape { .. } => "Shape",
            Statement::GeometrySection { .. } => "GeometrySection",
            Statement::Row { .. } => "Row",
            Statement::Keys { .. } => "Keys",
            Statement::Overlay { .. } => "Overlay",
            Statement::Doodad { .. } => "Doodad",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Statement::Include(include) => format!("{} {:?}", include.merge, include.path),
            Statement::Merged { mode, .. } => mode.to_string(),
            Statement::Assignment { target, value } => format!("{} = {}", target, value),
            Statement::Flag { target, enabled } => {
                if *enabled {
                    target.to_string()
                } else {
                    format!("!{}", target)
                }
            }
            Statement::KeyDefinition(key) => format!("<{}> {}", key.keyname, key.value),
            Statement::Alias(alias) => format!("<{}> = <{}>", alias.from, alias.to),
            Statement::VirtualModifiers(modifiers) => modifiers
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Statement::KeyType(key_type) => key_type.name.clone(),
            Statement::Interpret(interpret) => match &interpret.pattern.condition {
                Some(condition) => format!("{} + {}", interpret.pattern.keysym, condition),
                None => interpret.pattern.keysym.clone(),
            },
            Statement::ModifierMap(map) => map.modifier.clone(),
            Statement::GroupCompat { group, value } => format!("{} = {}", group, value),
            Statement::Indicator(indicator) => indicator.name.clone(),
            Statement::IndicatorName(name) => format!("{} = {}", name.index, name.value),
            Statement::Shape { name, .. }
            | Statement::GeometrySection { name, .. }
            | Statement::Overlay { name, .. } => name.clone(),
            Statement::Row { body } => format!("{} items", body.len()),
            Statement::Keys { keys } => format!("{} keys", keys.len()),
            Statement::Doodad { kind, name, .. } => format!("{} {}", kind.as_str(), name),
        }
    }
}
