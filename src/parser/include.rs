//! Include path splitting
//!
//! An include path such as `"pc+us(intl):2|inet(evdev)"` names several files to
//! merge in order. Each component is `file`, optionally followed by `(map)` and
//! `:modifier`. The first component takes the merge mode of the statement it
//! appears in; a component after `+` overrides and one after `|` augments.

use thiserror::Error;

use crate::ast::{IncludeFragment, MergeMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncludeError {
    #[error("empty include path")]
    Empty,
    #[error("missing file name in include path {0:?}")]
    MissingFile(String),
    #[error("unbalanced parentheses in include path {0:?}")]
    Unbalanced(String),
}

/// Split an include path into its fragments
pub fn parse_include_path(
    path: &str,
    merge: MergeMode,
) -> Result<Vec<IncludeFragment>, IncludeError> {
    if path.is_empty() {
        return Err(IncludeError::Empty);
    }

    let mut fragments = Vec::new();
    let mut merge = merge;
    let mut rest = path;
    loop {
        let end = separator_position(rest, path)?;
        fragments.push(parse_component(&rest[..end], merge, path)?);

        let Some(separator) = rest[end..].chars().next() else {
            break;
        };
        merge = if separator == '+' {
            MergeMode::Override
        } else {
            MergeMode::Augment
        };
        rest = &rest[end + 1..];
    }
    Ok(fragments)
}

// Byte offset of the next top-level `+` or `|`, or the length of `s`
fn separator_position(s: &str, path: &str) -> Result<usize, IncludeError> {
    let mut open = false;
    for (i, c) in s.char_indices() {
        match c {
            '(' if !open => open = true,
            ')' if open => open = false,
            '(' | ')' => return Err(IncludeError::Unbalanced(path.to_string())),
            '+' | '|' if !open => return Ok(i),
            _ => {}
        }
    }
    if open {
        return Err(IncludeError::Unbalanced(path.to_string()));
    }
    Ok(s.len())
}

fn parse_component(
    component: &str,
    merge: MergeMode,
    path: &str,
) -> Result<IncludeFragment, IncludeError> {
    let (body, modifier) = match component.split_once(':') {
        Some((body, modifier)) => (body, Some(modifier.to_string())),
        None => (component, None),
    };
    let (file, map) = match body.split_once('(') {
        Some((file, rest)) => {
            let map = rest
                .strip_suffix(')')
                .ok_or_else(|| IncludeError::Unbalanced(path.to_string()))?;
            (file, Some(map.to_string()))
        }
        None => (body, None),
    };
    if file.is_empty() {
        return Err(IncludeError::MissingFile(path.to_string()));
    }
    Ok(IncludeFragment {
        file: file.to_string(),
        map,
        modifier,
        merge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fragment(file: &str, map: Option<&str>, merge: MergeMode) -> IncludeFragment {
        IncludeFragment {
            file: file.to_string(),
            map: map.map(str::to_string),
            modifier: None,
            merge,
        }
    }

    #[test]
    fn test_single_file() {
        assert_eq!(
            parse_include_path("pc", MergeMode::Default),
            Ok(vec![fragment("pc", None, MergeMode::Default)])
        );
    }

    #[test]
    fn test_separators_set_merge_mode() {
        assert_eq!(
            parse_include_path("pc+us(intl)|inet(evdev)", MergeMode::Augment),
            Ok(vec![
                fragment("pc", None, MergeMode::Augment),
                fragment("us", Some("intl"), MergeMode::Override),
                fragment("inet", Some("evdev"), MergeMode::Augment),
            ])
        );
    }

    #[test]
    fn test_modifier_suffix() {
        let fragments = parse_include_path("us(intl):2", MergeMode::Default).unwrap();
        assert_eq!(fragments[0].map.as_deref(), Some("intl"));
        assert_eq!(fragments[0].modifier.as_deref(), Some("2"));
    }

    #[rstest]
    #[case("", IncludeError::Empty)]
    #[case("pc+", IncludeError::MissingFile("pc+".into()))]
    #[case("(intl)", IncludeError::MissingFile("(intl)".into()))]
    #[case("us(intl", IncludeError::Unbalanced("us(intl".into()))]
    #[case("us)intl(", IncludeError::Unbalanced("us)intl(".into()))]
    #[case("us((intl))", IncludeError::Unbalanced("us((intl))".into()))]
    fn test_malformed_paths(#[case] path: &str, #[case] expected: IncludeError) {
        assert_eq!(parse_include_path(path, MergeMode::Default), Err(expected));
    }
}
