// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment reports what went wrong but not where. This module maps each
//! extraction error onto a miette diagnostic, pointing at the offending key in
//! the TOML file it came from and suggesting the nearest known key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a known key must beat to be offered as a fix.
/// `base_ulr` scores ~0.97 against `base_url`; unrelated keys sit well below.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A TOML document that took part in a load, kept for span lookup.
#[derive(Debug, Clone)]
pub struct TomlSource {
    pub name: String,
    pub content: String,
}

impl TomlSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not an orrery setting")]
    #[diagnostic(code(orrery::config::unknown_key), help("{}", unknown_key_help(suggestion.as_deref(), known)))]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys accepted by the section, comma separated.
        known: String,
        #[label("unknown key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(orrery::config::wrong_type), help("`{key}` takes {expected}"))]
    WrongType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("`{key}` is required")]
    #[diagnostic(code(orrery::config::missing_key), help("set `{key}` in orrery.toml or via ORRERY_* env vars"))]
    Missing { key: String },

    /// Deserialized fine but fails a semantic check.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(orrery::config::validation))]
    Validation { key: String, message: String },

    #[error("could not load configuration: {0}")]
    #[diagnostic(code(orrery::config::load))]
    Load(String),
}

impl ConfigError {
    pub(crate) fn validation(key: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Split a Figment error (one per failed key) into diagnostics.
    pub fn from_figment(err: figment::Error, sources: &[TomlSource]) -> Vec<Self> {
        use figment::error::Kind;

        err.into_iter()
            .map(|error| {
                let key = error.path.join(".");
                match &error.kind {
                    Kind::UnknownField(field, expected) => {
                        let source = origin(&error, sources);
                        let span = source.and_then(|s| locate_key(&s.content, &error.path, field));
                        ConfigError::UnknownKey {
                            key: field.clone(),
                            suggestion: suggest_key(field, expected),
                            known: expected.join(", "),
                            span: span.map(|offset| SourceSpan::new(offset.into(), field.len())),
                            src: span
                                .and(source)
                                .map(|s| NamedSource::new(&s.name, s.content.clone())),
                        }
                    }
                    Kind::MissingField(field) => ConfigError::Missing {
                        key: if key.is_empty() {
                            field.to_string()
                        } else {
                            format!("{key}.{field}")
                        },
                    },
                    Kind::InvalidType(found, expected) => ConfigError::WrongType {
                        key,
                        found: found.to_string(),
                        expected: expected.clone(),
                    },
                    _ => ConfigError::Load(error.to_string()),
                }
            })
            .collect()
    }
}

fn unknown_key_help(suggestion: Option<&str>, known: &str) -> String {
    match suggestion {
        Some(key) => format!("did you mean `{key}`? (known keys: {known})"),
        None => format!("known keys: {known}"),
    }
}

/// The source the error came from. Inline strings carry no file metadata, so
/// a lone source is assumed to be the one.
fn origin<'a>(error: &figment::error::Error, sources: &'a [TomlSource]) -> Option<&'a TomlSource> {
    let file = error.metadata.as_ref().and_then(|m| match m.source.as_ref()? {
        figment::Source::File(path) => Some(path.display().to_string()),
        _ => None,
    });
    match file {
        Some(file) => sources.iter().find(|s| s.name == file),
        None if sources.len() == 1 => sources.first(),
        None => None,
    }
}

/// Byte offset of `key = ...` inside the table named by `table[0]`, or the
/// root table when `table` is empty.
pub fn locate_key(content: &str, table: &[String], key: &str) -> Option<usize> {
    let wanted = table.first().map(String::as_str);
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let body = line.trim_start();
        let indent = line.len() - body.len();
        offset += line.len();

        if let Some(header) = body.strip_prefix('[') {
            current = header.split(']').next().map(str::trim);
            continue;
        }
        if current != wanted || body.starts_with('#') {
            continue;
        }
        let is_assignment = body
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start_matches([' ', '\t']).starts_with('='));
        if is_assignment {
            return Some(offset - line.len() + indent);
        }
    }
    None
}

/// Closest known key, if it is close enough to be a plausible typo.
pub fn suggest_key(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_owned())
}

/// Print every error to stderr as a miette report.
pub fn render_errors(errors: Vec<ConfigError>) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error));
    }
}
