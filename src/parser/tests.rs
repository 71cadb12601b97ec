//! Parser tests over complete inputs

use super::*;
use crate::ast::{Expression, FieldPath, MergeMode, SectionFlags, SectionKind, Statement};
use crate::lexer::{Keyword, Token};
use rstest::rstest;

#[test]
fn test_default_keycodes_section() {
    let keymap = parse_keymap(r#"default xkb_keycodes "basic" { <ESC> = 9; };"#)
        .expect("keycodes should parse");
    assert_eq!(keymap.sections.len(), 1);
    let section = &keymap.sections[0];
    assert_eq!(section.kind, SectionKind::Keycodes);
    assert_eq!(section.name.as_deref(), Some("basic"));
    assert_eq!(section.flags, SectionFlags::DEFAULT);
    assert_eq!(
        section.statements(),
        [Statement::key("ESC", Expression::integer(9))]
    );
}

#[test]
fn test_symbols_key_array() {
    let keymap = parse_keymap(r#"xkb_symbols "basic" { key <AC01> { [a, A] }; };"#)
        .expect("symbols should parse");
    let section = &keymap.sections[0];
    assert_eq!(section.kind, SectionKind::Symbols);
    assert_eq!(
        section.statements(),
        [Statement::key(
            "AC01",
            Expression::Array(vec![Expression::ident("a"), Expression::ident("A")])
        )]
    );
}

#[test]
fn test_unclosed_section_is_incomplete() {
    let error = parse_keymap(r#"xkb_keycodes "t" {"#).unwrap_err();
    assert!(error.is_incomplete());
    assert_eq!(error.offending_token(), None);
}

#[test]
fn test_stray_closer_is_invalid() {
    let error = parse_keymap("} key <A> {1};").unwrap_err();
    let token = error.offending_token().expect("invalid error carries a token");
    assert_eq!(token.token, Token::RBrace);
    assert_eq!(token.text, "}");
    assert_eq!(token.line, 1);
}

#[test]
fn test_invalid_token_reports_its_line() {
    let error = parse_keymap("xkb_keycodes {\n  <ESC> = 9;\n  <TAB> = ;\n};").unwrap_err();
    let token = error.offending_token().expect("invalid error carries a token");
    assert_eq!(token.token, Token::Semicolon);
    assert_eq!(token.line, 3);
    assert!(error.to_string().starts_with("line 3: unexpected ';'"));
}

#[rstest]
#[case("xkb_symbols {")]
#[case("xkb_symbols { key <A> { [a,")]
#[case("xkb_keymap { xkb_types { type \"X\" {")]
#[case("xkb_compat { interpret Any +")]
fn test_truncated_input_is_incomplete(#[case] source: &str) {
    assert!(parse_keymap(source).unwrap_err().is_incomplete());
}

#[test]
fn test_reserved_word_as_field() {
    let parsed = parse("type.action", Some(StartRule::Expression)).expect("expression should parse");
    assert_eq!(
        parsed,
        Parsed::Expression(Expression::Reference(FieldPath::new(["type", "action"])))
    );
    assert!(parse_statement("interpret.repeat = False;").is_ok());
}

#[test]
fn test_comments_do_not_change_the_tree() {
    let with_comment = "xkb_symbols {\nkey <TAB> {a}; // c\nkey <X> {b};\n};";
    let without = "xkb_symbols {\nkey <TAB> {a}; \nkey <X> {b};\n};";
    assert_eq!(parse_keymap(with_comment), parse_keymap(without));

    let keymap = parse_keymap(with_comment).expect("symbols should parse");
    assert_eq!(
        keymap.sections[0].statements()[0],
        Statement::key("TAB", Expression::ident("a"))
    );
}

#[test]
fn test_keywords_are_case_insensitive_in_grammar() {
    let keymap = parse_keymap("XKB_SYMBOLS { KEY <A> { [a] }; };").expect("should parse");
    assert_eq!(keymap.sections[0].kind, SectionKind::Symbols);
}

#[test]
fn test_statement_start_rule() {
    let parsed = parse("override key <A> { [b] };", Some(StartRule::Statement))
        .expect("statement should parse");
    let Parsed::Statement(Statement::Merged { mode, statement }) = parsed else {
        panic!("expected a merged statement");
    };
    assert_eq!(mode, MergeMode::Override);
    assert!(matches!(*statement, Statement::KeyDefinition(_)));

    // a whole section is not a statement
    assert!(parse("xkb_types { };", Some(StartRule::Statement)).is_err());
}

#[test]
fn test_malformed_include_path_points_at_string() {
    let error = parse_keymap("xkb_symbols { include \"us(intl\" };").unwrap_err();
    let token = error.offending_token().expect("invalid error carries a token");
    assert_eq!(token.token, Token::String("us(intl".into()));
}

#[test]
fn test_parser_keeps_lexical_diagnostics() {
    let mut parser = XkbParser::new(StartRule::Keymap);
    let keymap = parser
        .parse_keymap("xkb_keycodes { <ESC> = 9; $ };")
        .expect("illegal characters are skipped");
    assert_eq!(keymap.sections[0].statements().len(), 1);
    assert_eq!(parser.diagnostics().len(), 1);
    assert_eq!(parser.diagnostics()[0].line(), 1);

    parser.parse_keymap("").expect("empty input parses");
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn test_full_keymap() {
    let source = r#"
xkb_keymap {
    xkb_keycodes "evdev+aliases(qwerty)" {
        minimum = 8;
        maximum = 255;
        <ESC> = 9;
        <AE01> = 10;
        alias <LatQ> = <AD01>;
        indicator 1 = "Caps Lock";
        virtual indicator 4 = "Scroll Lock";
    };
    xkb_types "complete" {
        virtual_modifiers NumLock, LevelThree;
        type "TWO_LEVEL" {
            modifiers = Shift;
            map[Shift] = Level2;
            level_name[Level1] = "Base";
            level_name[Level2] = "Shift";
        };
    };
    xkb_compatibility_map "complete" {
        interpret.useModMapMods = AnyLevel;
        interpret Num_Lock + AnyOf(all) {
            virtualModifier = NumLock;
            action = LockMods(modifiers = NumLock);
        };
        indicator "Caps Lock" {
            !allowExplicit;
            whichModState = Locked;
            modifiers = Lock;
        };
        group 2 = AltGr;
    };
    xkb_symbols "pc+us+inet(evdev)" {
        name[Group1] = "English (US)";
        key <ESC> { [ Escape ] };
        key <AE01> { [ 1, exclam ] };
        key <LFSH> { type = "TWO_LEVEL", symbols[Group1] = [ Shift_L ] };
        modifier_map Shift { <LFSH>, <RTSH> };
        include "level3(ralt_switch)"
    };
    xkb_geometry "pc(pc105)" {
        width = 470;
        shape "NORM" { cornerRadius = 1, { [18, 18] }, { [2, 1], [16, 17] } };
        section "Function" {
            top = 22;
            row { top = 1; keys { <ESC>, { <FK01>, 20 } }; };
        };
    };
};
"#;
    let keymap = parse_keymap(source).expect("full keymap should parse");
    let root = &keymap.sections[0];
    assert_eq!(root.kind, SectionKind::Keymap);
    let kinds: Vec<_> = root.sections().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Keycodes,
            SectionKind::Types,
            SectionKind::CompatMap,
            SectionKind::Symbols,
            SectionKind::Geometry,
        ]
    );
    assert_eq!(root.sections()[0].statements().len(), 7);
    assert_eq!(root.sections()[3].statements().len(), 6);
    assert!(matches!(
        root.sections()[3].statements()[5],
        Statement::Include(_)
    ));
}

#[test]
fn test_keyword_token_text_is_preserved() {
    let error = parse_keymap("xkb_keycodes { <A> = Alias; };").unwrap_err();
    let token = error.offending_token().expect("invalid error carries a token");
    assert_eq!(
        token.token,
        Token::Keyword(Keyword::Alias, "Alias".to_string())
    );
    assert_eq!(token.text, "Alias");
}

fn nested_index(depth: usize) -> String {
    let mut source = String::new();
    for level in 0..depth {
        source.push_str(&format!("a{}[", level));
    }
    source.push('x');
    source.push_str(&"]".repeat(depth));
    source
}

#[test]
fn test_nested_index_in_section_parses_quickly() {
    let source = format!("xkb_types {{ {} = 1; {}; }};", nested_index(24), nested_index(24));
    let started = std::time::Instant::now();
    let keymap = parse_keymap(&source).expect("nested indexes should parse");
    assert!(started.elapsed() < std::time::Duration::from_secs(2));

    let statements = keymap.sections[0].statements();
    assert!(matches!(&statements[0], Statement::Assignment { target, .. }
        if target.segments == ["a0"]));
    assert!(matches!(&statements[1], Statement::Flag { enabled: true, .. }));
}

#[test]
fn test_assignment_to_a_non_reference_is_invalid() {
    let error = parse_expression("SetMods(x) = 1").unwrap_err();
    let token = error.offending_token().expect("invalid error carries a token");
    assert_eq!(token.token, Token::Equals);
    assert!(error.expected().contains(&"assignment target".to_string()));
}
