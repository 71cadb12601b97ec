//! Keymap root and sections

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

use super::statement::Statement;
use crate::lexer::Keyword;

/// The kind keyword that opens a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Keycodes,
    Types,
    CompatMap,
    Symbols,
    Geometry,
    Keymap,
    Layout,
    Semantics,
}

impl SectionKind {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::XkbKeycodes => Some(SectionKind::Keycodes),
            Keyword::XkbTypes => Some(SectionKind::Types),
            Keyword::XkbCompatMap => Some(SectionKind::CompatMap),
            Keyword::XkbSymbols => Some(SectionKind::Symbols),
            Keyword::XkbGeometry => Some(SectionKind::Geometry),
            Keyword::XkbKeymap => Some(SectionKind::Keymap),
            Keyword::XkbLayout => Some(SectionKind::Layout),
            Keyword::XkbSemantics => Some(SectionKind::Semantics),
            _ => None,
        }
    }

    /// Composite sections contain other sections rather than statements
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            SectionKind::Keymap | SectionKind::Layout | SectionKind::Semantics
        )
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            SectionKind::Keycodes => Keyword::XkbKeycodes,
            SectionKind::Types => Keyword::XkbTypes,
            SectionKind::CompatMap => Keyword::XkbCompatMap,
            SectionKind::Symbols => Keyword::XkbSymbols,
            SectionKind::Geometry => Keyword::XkbGeometry,
            SectionKind::Keymap => Keyword::XkbKeymap,
            SectionKind::Layout => Keyword::XkbLayout,
            SectionKind::Semantics => Keyword::XkbSemantics,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().as_str())
    }
}

bitflags! {
    /// Flags written before the section keyword
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct SectionFlags: u16 {
        const PARTIAL = 1 << 0;
        const DEFAULT = 1 << 1;
        const HIDDEN = 1 << 2;
        const AUGMENT = 1 << 3;
        const OVERRIDE = 1 << 4;
        const REPLACE = 1 << 5;
        const ALPHANUMERIC_KEYS = 1 << 6;
        const MODIFIER_KEYS = 1 << 7;
        const KEYPAD_KEYS = 1 << 8;
        const FUNCTION_KEYS = 1 << 9;
        const ALTERNATE_GROUP = 1 << 10;
    }
}

impl SectionFlags {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Partial => Some(SectionFlags::PARTIAL),
            Keyword::Default => Some(SectionFlags::DEFAULT),
            Keyword::Hidden => Some(SectionFlags::HIDDEN),
            Keyword::Augment => Some(SectionFlags::AUGMENT),
            Keyword::Override => Some(SectionFlags::OVERRIDE),
            Keyword::Replace => Some(SectionFlags::REPLACE),
            Keyword::AlphanumericKeys => Some(SectionFlags::ALPHANUMERIC_KEYS),
            Keyword::ModifierKeys => Some(SectionFlags::MODIFIER_KEYS),
            Keyword::KeypadKeys => Some(SectionFlags::KEYPAD_KEYS),
            Keyword::FunctionKeys => Some(SectionFlags::FUNCTION_KEYS),
            Keyword::AlternateGroup => Some(SectionFlags::ALTERNATE_GROUP),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionBody {
    Statements(Vec<Statement>),
    Sections(Vec<Section>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub flags: SectionFlags,
    pub name: Option<String>,
    pub body: SectionBody,
}

impl Section {
    /// The statements of a map section; empty for composite sections
    pub fn statements(&self) -> &[Statement] {
        match &self.body {
            SectionBody::Statements(statements) => statements,
            SectionBody::Sections(_) => &[],
        }
    }

    /// The nested sections of a composite section; empty for map sections
    pub fn sections(&self) -> &[Section] {
        match &self.body {
            SectionBody::Sections(sections) => sections,
            SectionBody::Statements(_) => &[],
        }
    }
}

/// The root of a parsed XKB file
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Keymap {
    pub sections: Vec<Section>,
}

impl Keymap {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Find a top-level section by kind and name
    pub fn section(&self, kind: SectionKind, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.kind == kind && section.name.as_deref() == Some(name))
    }

    /// The first section flagged `default`, if any
    pub fn default_section(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.flags.contains(SectionFlags::DEFAULT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: SectionKind, name: &str, flags: SectionFlags) -> Section {
        Section {
            kind,
            flags,
            name: Some(name.to_string()),
            body: SectionBody::Statements(Vec::new()),
        }
    }

    #[test]
    fn test_section_kind_keywords_round_trip() {
        for kind in [
            SectionKind::Keycodes,
            SectionKind::Types,
            SectionKind::CompatMap,
            SectionKind::Symbols,
            SectionKind::Geometry,
            SectionKind::Keymap,
            SectionKind::Layout,
            SectionKind::Semantics,
        ] {
            assert_eq!(SectionKind::from_keyword(kind.keyword()), Some(kind));
        }
    }

    #[test]
    fn test_flag_keywords() {
        assert_eq!(
            SectionFlags::from_keyword(Keyword::AlphanumericKeys),
            Some(SectionFlags::ALPHANUMERIC_KEYS)
        );
        assert_eq!(SectionFlags::from_keyword(Keyword::Key), None);
    }

    #[test]
    fn test_keymap_lookup() {
        let keymap = Keymap::new(vec![
            section(SectionKind::Symbols, "basic", SectionFlags::DEFAULT),
            section(SectionKind::Symbols, "intl", SectionFlags::PARTIAL),
        ]);
        assert_eq!(
            keymap.section(SectionKind::Symbols, "intl").map(|s| s.flags),
            Some(SectionFlags::PARTIAL)
        );
        assert!(keymap.section(SectionKind::Types, "intl").is_none());
        assert_eq!(
            keymap.default_section().and_then(|s| s.name.as_deref()),
            Some("basic")
        );
    }
}
