//! Statement nodes
//!
//! One enum covers every statement the language allows inside a section. The
//! grammar does not restrict statements by section kind, so a geometry
//! statement inside `xkb_symbols` parses; deciding whether it makes sense is
//! left to whoever consumes the tree.

use serde::Serialize;
use std::fmt;

use super::expression::{Expression, FieldPath};

/// How statements from an included or prefixed declaration combine with
/// bindings already present in the section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// `include`: the declaration's own rules apply
    #[default]
    Default,
    /// `augment` or `|`: existing bindings are kept
    Augment,
    /// `override` or `+`: the new binding wins
    Override,
    /// `replace`: the new declaration supersedes the old one entirely
    Replace,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeMode::Default => "include",
            MergeMode::Augment => "augment",
            MergeMode::Override => "override",
            MergeMode::Replace => "replace",
        })
    }
}

/// One `file(map):modifier` component of an include path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeFragment {
    pub file: String,
    pub map: Option<String>,
    pub modifier: Option<String>,
    pub merge: MergeMode,
}

/// `include "pc+us(intl)"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Include {
    pub merge: MergeMode,
    /// The path string as written
    pub path: String,
    pub fragments: Vec<IncludeFragment>,
}

/// `<ESC> = 9;` in keycodes, `key <AC01> { [a, A] };` in symbols
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyDefinition {
    pub keyname: String,
    pub value: Expression,
}

/// `alias <LatQ> = <AD01>;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    pub from: String,
    pub to: String,
}

/// One entry of `virtual_modifiers NumLock, AltGr = Mod5;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualModifier {
    pub name: String,
    pub value: Option<Expression>,
}

/// `type "TWO_LEVEL" { ... };`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyType {
    pub name: String,
    pub body: Vec<Statement>,
}

/// The `Num_Lock + AnyOf(all)` part of an interpret statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretMatch {
    pub keysym: String,
    pub condition: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpret {
    pub pattern: InterpretMatch,
    pub actions: Vec<Statement>,
}

/// `modifier_map Mod1 { <LALT>, Meta_L };`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierMap {
    pub modifier: String,
    pub keys: Vec<Expression>,
}

/// `indicator "Caps Lock" { ... };`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub name: String,
    pub body: Vec<Statement>,
}

/// `indicator 1 = "Caps Lock";`, optionally prefixed by `virtual`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorName {
    pub index: i64,
    pub value: Expression,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoodadKind {
    Outline,
    Text,
    Solid,
}

impl DoodadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoodadKind::Outline => "outline",
            DoodadKind::Text => "text",
            DoodadKind::Solid => "solid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Include(Include),
    /// A statement preceded by a merge keyword
    Merged {
        mode: MergeMode,
        statement: Box<Statement>,
    },
    Assignment {
        target: FieldPath,
        value: Expression,
    },
    /// `name;` sets a boolean field, `!name;` clears it
    Flag {
        target: FieldPath,
        enabled: bool,
    },
    KeyDefinition(KeyDefinition),
    Alias(Alias),
    VirtualModifiers(Vec<VirtualModifier>),
    KeyType(KeyType),
    Interpret(Interpret),
    ModifierMap(ModifierMap),
    /// `group 2 = AltGr;`
    GroupCompat {
        group: i64,
        value: Expression,
    },
    Indicator(Indicator),
    IndicatorName(IndicatorName),
    Shape {
        name: String,
        attributes: Vec<Expression>,
    },
    /// A geometry `section "Function" { ... };`
    GeometrySection {
        name: String,
        body: Vec<Statement>,
    },
    Row {
        body: Vec<Statement>,
    },
    Keys {
        keys: Vec<Expression>,
    },
    Overlay {
        name: String,
        keys: Vec<(String, String)>,
    },
    Doodad {
        kind: DoodadKind,
        name: String,
        attributes: Vec<Statement>,
    },
}

impl Statement {
    pub fn assignment(target: FieldPath, value: Expression) -> Self {
        Statement::Assignment { target, value }
    }

    pub fn key(keyname: impl Into<String>, value: Expression) -> Self {
        Statement::KeyDefinition(KeyDefinition {
            keyname: keyname.into(),
            value,
        })
    }

    /// Statements nested directly inside this one
    pub fn children(&self) -> &[Statement] {
        match self {
            Statement::Merged { statement, .. } => std::slice::from_ref(statement.as_ref()),
            Statement::KeyType(KeyType { body, .. })
            | Statement::Indicator(Indicator { body, .. })
            | Statement::GeometrySection { body, .. }
            | Statement::Row { body } => body,
            Statement::Interpret(interpret) => &interpret.actions,
            Statement::Doodad { attributes, .. } => attributes,
            _ => &[],
        }
    }
}
