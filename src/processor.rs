//! File processing API
//!
//! A [`ProcessingSpec`] names what to extract from an XKB source and how to
//! print it. Specs are written `<stage>-<format>`, for example `token-simple`
//! or `ast-treeviz`:
//!
//! | spec          | output                                        |
//! |---------------|-----------------------------------------------|
//! | token-simple  | one token per line: line, kind, source text   |
//! | token-json    | the lexemes as a JSON array                   |
//! | ast-debug     | the tree in Rust debug notation               |
//! | ast-json      | the tree as JSON                              |
//! | ast-yaml      | the tree as YAML                              |
//! | ast-treeviz   | the section/statement outline                 |

use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::formats::{statement_to_treeviz_str, summarize, to_treeviz_str};
use crate::lexer::{lex, Lexeme};
use crate::parser::{Parsed, StartRule, SyntaxError, XkbParser};

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Debug,
    Yaml,
    Treeviz,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("invalid format: {0} (expected <stage>-<format>)")]
    InvalidFormat(String),
    #[error("invalid stage: {0}")]
    InvalidStage(String),
    #[error("invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl ProcessingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Debug => "debug",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "debug" => OutputFormat::Debug,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "'{}' is not supported for the {} stage",
                format.as_str(),
                stage.as_str()
            )));
        }
        Ok(spec)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat::*;
        use ProcessingStage::*;
        [
            (Token, Simple),
            (Token, Json),
            (Ast, Debug),
            (Ast, Json),
            (Ast, Yaml),
            (Ast, Treeviz),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stage.as_str(), self.format.as_str())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::to_string)
        .collect()
}

/// Process an XKB file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    start: StartRule,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|source| ProcessingError::Io {
        path: file_path.display().to_string(),
        source,
    })?;
    debug!(path = %file_path.display(), %spec, "processing file");
    process_source(&content, spec, start)
}

/// Process XKB source text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    start: StartRule,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let (lexemes, diagnostics) = lex(source);
            for diagnostic in &diagnostics {
                warn!(line = diagnostic.line(), "{}", diagnostic);
            }
            format_tokens(&lexemes, spec.format)
        }
        ProcessingStage::Ast => {
            let parsed = XkbParser::new(start).parse(source)?;
            if let Some(keymap) = parsed.as_keymap() {
                let summary = summarize(keymap);
                debug!(
                    sections = summary.sections,
                    statements = summary.statements,
                    expressions = summary.expressions,
                    "parsed keymap"
                );
            }
            format_ast(&parsed, spec.format)
        }
    }
}

/// Format lexemes according to the specified output format.
pub fn format_tokens(
    lexemes: &[Lexeme<'_>],
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for lexeme in lexemes {
                result.push_str(&format!(
                    "{}\t{}\t{}\n",
                    lexeme.line,
                    lexeme.token.kind_name(),
                    lexeme.text
                ));
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(lexemes)
            .map_err(|e| ProcessingError::Serialize(e.to_string())),
        other => Err(ProcessingError::InvalidFormatType(format!(
            "'{}' only works with the ast stage",
            other.as_str()
        ))),
    }
}

/// Format a parse result according to the specified output format.
pub fn format_ast(parsed: &Parsed, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Debug => Ok(format!("{:#?}\n", parsed)),
        OutputFormat::Json => serde_json::to_string_pretty(parsed)
            .map_err(|e| ProcessingError::Serialize(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(parsed).map_err(|e| ProcessingError::Serialize(e.to_string()))
        }
        OutputFormat::Treeviz => Ok(match parsed {
            Parsed::Keymap(keymap) => to_treeviz_str(keymap),
            Parsed::Statement(statement) => statement_to_treeviz_str(statement),
            Parsed::Expression(expression) => format!("└─ Expression: {}\n", expression),
        }),
        OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
            "'simple' only works with the token stage".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_processing_spec_parsing() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Simple);

        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Ast);
        assert_eq!(spec.format, OutputFormat::Treeviz);
    }

    #[rstest]
    #[case("invalid")]
    #[case("token-invalid")]
    #[case("invalid-simple")]
    #[case("token-treeviz")]
    #[case("ast-simple")]
    fn test_invalid_specs(#[case] format: &str) {
        assert!(ProcessingSpec::from_string(format).is_err());
    }

    #[test]
    fn test_available_formats_round_trip() {
        let formats = available_formats();
        assert_eq!(
            formats,
            vec![
                "token-simple",
                "token-json",
                "ast-debug",
                "ast-json",
                "ast-yaml",
                "ast-treeviz"
            ]
        );
        for format in formats {
            assert_eq!(ProcessingSpec::from_string(&format).unwrap().to_string(), format);
        }
    }

    #[test]
    fn test_token_simple() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_source("<ESC> = 9;\nkey", &spec, StartRule::Keymap).unwrap();
        insta::assert_snapshot!(output, @r###"
        1	key name	<ESC>
        1	'='	=
        1	integer	9
        1	';'	;
        2	keyword	key
        "###);
    }

    #[test]
    fn test_ast_json_uses_start_rule() {
        let spec = ProcessingSpec::from_string("ast-json").unwrap();
        let output = process_source("<ESC> = 9;", &spec, StartRule::Statement).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["key_definition"]["keyname"], "ESC");
        assert_eq!(value["key_definition"]["value"]["literal"]["integer"], 9);
    }

    #[test]
    fn test_ast_yaml() {
        let spec = ProcessingSpec::from_string("ast-yaml").unwrap();
        let output = process_source("xkb_types \"basic\" { };", &spec, StartRule::Keymap).unwrap();
        assert!(output.contains("kind: types"));
        assert!(output.contains("name: basic"));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        let error = process_source("xkb_types {", &spec, StartRule::Keymap).unwrap_err();
        assert!(matches!(error, ProcessingError::Syntax(ref e) if e.is_incomplete()));
    }

    #[test]
    fn test_missing_file() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let error = process_file("/nonexistent/file.xkb", &spec, StartRule::Keymap).unwrap_err();
        assert!(matches!(error, ProcessingError::Io { .. }));
    }
}
