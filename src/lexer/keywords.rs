//! Reserved words of the XKB language
//!
//! Reserved words are lexed as identifiers first and then looked up here by
//! their lowercase spelling. The table is fixed at compile time and several
//! historical spellings map to the same keyword.

use serde::Serialize;
use std::fmt;

/// A case-insensitive reserved word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    // Section kinds
    XkbKeycodes,
    XkbTypes,
    XkbCompatMap,
    XkbSymbols,
    XkbGeometry,
    XkbKeymap,
    XkbLayout,
    XkbSemantics,

    // Section flags and merge modes
    Partial,
    Hidden,
    Augment,
    Override,
    Replace,
    Default,
    Alternate,
    Include,

    // Statements
    Key,
    Keys,
    Type,
    Interpret,
    Indicator,
    ModifierMap,
    Alias,
    Virtual,
    VirtualModifiers,
    Group,
    Action,
    Outline,
    Overlay,
    Row,
    Section,
    Shape,
    Solid,
    Text,

    // Key class flags
    AlphanumericKeys,
    FunctionKeys,
    KeypadKeys,
    ModifierKeys,
    AlternateGroup,
}

/// Reserved word spellings, sorted for binary search
const RESERVED_WORDS: &[(&str, Keyword)] = &[
    ("action", Keyword::Action),
    ("alias", Keyword::Alias),
    ("alphanumeric_keys", Keyword::AlphanumericKeys),
    ("alternate", Keyword::Alternate),
    ("alternate_group", Keyword::AlternateGroup),
    ("augment", Keyword::Augment),
    ("default", Keyword::Default),
    ("function_keys", Keyword::FunctionKeys),
    ("group", Keyword::Group),
    ("hidden", Keyword::Hidden),
    ("include", Keyword::Include),
    ("indicator", Keyword::Indicator),
    ("interpret", Keyword::Interpret),
    ("key", Keyword::Key),
    ("keypad_keys", Keyword::KeypadKeys),
    ("keys", Keyword::Keys),
    ("mod_map", Keyword::ModifierMap),
    ("modifier_keys", Keyword::ModifierKeys),
    ("modifier_map", Keyword::ModifierMap),
    ("modmap", Keyword::ModifierMap),
    ("outline", Keyword::Outline),
    ("overlay", Keyword::Overlay),
    ("override", Keyword::Override),
    ("partial", Keyword::Partial),
    ("replace", Keyword::Replace),
    ("row", Keyword::Row),
    ("section", Keyword::Section),
    ("shape", Keyword::Shape),
    ("solid", Keyword::Solid),
    ("text", Keyword::Text),
    ("type", Keyword::Type),
    ("virtual", Keyword::Virtual),
    ("virtual_modifiers", Keyword::VirtualModifiers),
    ("xkb_compat", Keyword::XkbCompatMap),
    ("xkb_compat_map", Keyword::XkbCompatMap),
    ("xkb_compatibility", Keyword::XkbCompatMap),
    ("xkb_compatibility_map", Keyword::XkbCompatMap),
    ("xkb_compatmap", Keyword::XkbCompatMap),
    ("xkb_geometry", Keyword::XkbGeometry),
    ("xkb_keycodes", Keyword::XkbKeycodes),
    ("xkb_keymap", Keyword::XkbKeymap),
    ("xkb_layout", Keyword::XkbLayout),
    ("xkb_semantics", Keyword::XkbSemantics),
    ("xkb_symbols", Keyword::XkbSymbols),
    ("xkb_types", Keyword::XkbTypes),
];

impl Keyword {
    /// Look up an identifier in the reserved word table, ignoring case
    pub fn lookup(ident: &str) -> Option<Keyword> {
        let lower = ident.to_ascii_lowercase();
        RESERVED_WORDS
            .binary_search_by(|(word, _)| (*word).cmp(lower.as_str()))
            .ok()
            .map(|index| RESERVED_WORDS[index].1)
    }

    /// The canonical lowercase spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::XkbKeycodes => "xkb_keycodes",
            Keyword::XkbTypes => "xkb_types",
            Keyword::XkbCompatMap => "xkb_compatibility",
            Keyword::XkbSymbols => "xkb_symbols",
            Keyword::XkbGeometry => "xkb_geometry",
            Keyword::XkbKeymap => "xkb_keymap",
            Keyword::XkbLayout => "xkb_layout",
            Keyword::XkbSemantics => "xkb_semantics",
            Keyword::Partial => "partial",
            Keyword::Hidden => "hidden",
            Keyword::Augment => "augment",
            Keyword::Override => "override",
            Keyword::Replace => "replace",
            Keyword::Default => "default",
            Keyword::Alternate => "alternate",
            Keyword::Include => "include",
            Keyword::Key => "key",
            Keyword::Keys => "keys",
            Keyword::Type => "type",
            Keyword::Interpret => "interpret",
            Keyword::Indicator => "indicator",
            Keyword::ModifierMap => "modifier_map",
            Keyword::Alias => "alias",
            Keyword::Virtual => "virtual",
            Keyword::VirtualModifiers => "virtual_modifiers",
            Keyword::Group => "group",
            Keyword::Action => "action",
            Keyword::Outline => "outline",
            Keyword::Overlay => "overlay",
            Keyword::Row => "row",
            Keyword::Section => "section",
            Keyword::Shape => "shape",
            Keyword::Solid => "solid",
            Keyword::Text => "text",
            Keyword::AlphanumericKeys => "alphanumeric_keys",
            Keyword::FunctionKeys => "function_keys",
            Keyword::KeypadKeys => "keypad_keys",
            Keyword::ModifierKeys => "modifier_keys",
            Keyword::AlternateGroup => "alternate_group",
        }
    }

    /// Keywords that may start a field reference (`action = ...`, `key.type = ...`)
    pub fn is_element(&self) -> bool {
        matches!(
            self,
            Keyword::Action
                | Keyword::Interpret
                | Keyword::Type
                | Keyword::Key
                | Keyword::Group
                | Keyword::ModifierMap
                | Keyword::Indicator
                | Keyword::Shape
                | Keyword::Row
                | Keyword::Section
                | Keyword::Text
                | Keyword::Outline
                | Keyword::Solid
                | Keyword::Overlay
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(RESERVED_WORDS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_table_spellings_are_lowercase() {
        for (word, _) in RESERVED_WORDS {
            assert_eq!(*word, word.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(Keyword::lookup("key"), Some(Keyword::Key));
        assert_eq!(Keyword::lookup("Key"), Some(Keyword::Key));
        assert_eq!(Keyword::lookup("KEY"), Some(Keyword::Key));
        assert_eq!(Keyword::lookup("keyx"), None);
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(Keyword::lookup("xkb_compat"), Some(Keyword::XkbCompatMap));
        assert_eq!(
            Keyword::lookup("xkb_compatibility_map"),
            Some(Keyword::XkbCompatMap)
        );
        assert_eq!(Keyword::lookup("modmap"), Some(Keyword::ModifierMap));
    }

    #[test]
    fn test_canonical_spelling_round_trips() {
        for (_, keyword) in RESERVED_WORDS {
            assert_eq!(Keyword::lookup(keyword.as_str()), Some(*keyword));
        }
    }
}
