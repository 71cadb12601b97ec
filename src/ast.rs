//! AST definitions for the XKB language
//!
//! The tree is plain data: the parser builds it once and nothing mutates it
//! afterwards. Every node supports structural equality, serializes through
//! serde, and can be traversed with a [`Visitor`].
//!
//! ## Modules
//!
//! - `keymap` - the root, sections and section flags
//! - `statement` - statements found inside sections
//! - `expression` - expressions, literals and field paths
//! - `traits` - uniform node names and labels
//! - `visitor` - read-only traversal

pub mod expression;
pub mod keymap;
pub mod statement;
pub mod traits;
pub mod visitor;

pub use expression::{BinaryOp, Expression, FieldPath, Literal, UnaryOp};
pub use keymap::{Keymap, Section, SectionBody, SectionFlags, SectionKind};
pub use statement::{
    Alias, DoodadKind, Include, IncludeFragment, Indicator, IndicatorName, Interpret,
    InterpretMatch, KeyDefinition, KeyType, MergeMode, ModifierMap, Statement, VirtualModifier,
};
pub use traits::AstNode;
pub use visitor::Visitor;
