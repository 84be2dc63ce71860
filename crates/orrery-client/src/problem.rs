// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable rendering of API error answers.
//!
//! The catalogue API reports request validation failures as
//! `{"detail": [{"loc": ["body", "field"], "msg": "..."}]}`. These helpers
//! turn that into one line per problem, labelled with the planet field name.

use orrery_core::fields::field_label;
use orrery_core::OrreryError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ValidationBody {
    detail: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationItem {
    #[serde(default)]
    loc: Vec<Value>,
    #[serde(default)]
    msg: Option<String>,
}

/// Readable lines for a validation error body, or `None` if the body is not
/// a validation error (or lists nothing useful).
pub fn validation_messages(body: &str) -> Option<Vec<String>> {
    let start = body.find('{')?;
    let parsed: ValidationBody = serde_json::from_str(&body[start..]).ok()?;

    let lines: Vec<String> = parsed
        .detail
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ValidationItem>(entry).ok())
        .filter_map(|item| {
            let field = item
                .loc
                .iter()
                .filter(|seg| seg.as_str() != Some("body"))
                .last()
                .map(|seg| match seg {
                    Value::String(s) => field_label(s),
                    other => other.to_string(),
                });
            match (field, item.msg) {
                (Some(label), Some(msg)) => Some(format!("{label}: {msg}")),
                (None, Some(msg)) => Some(msg),
                (Some(label), None) => Some(label),
                (None, None) => None,
            }
        })
        .collect();

    if lines.is_empty() { None } else { Some(lines) }
}

/// Short explanation for admin-key failures.
pub fn friendly_admin_error(err: &OrreryError) -> Option<&'static str> {
    match err {
        OrreryError::MissingCredential { .. } => Some("Admin API key is not configured."),
        OrreryError::Api { status: 401, body, .. }
            if body.to_lowercase().contains("invalid api key") =>
        {
            Some("Admin API key rejected.")
        }
        OrreryError::Api { status: 403, .. } => {
            Some("Admin API key is missing required permissions.")
        }
        _ => None,
    }
}

/// Multi-line description of an error suitable for a terminal.
pub fn describe_error(err: &OrreryError) -> String {
    if let Some(friendly) = friendly_admin_error(err) {
        return friendly.to_string();
    }
    if let Some(lines) = err.body().and_then(validation_messages) {
        return lines.join("\n");
    }
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_renders_labels() {
        let body = r#"{"detail":[
            {"loc":["body","disc_year"],"msg":"Input should be a valid integer","type":"int_parsing"},
            {"loc":["body","pl_eqt"],"msg":"Field required"}
        ]}"#;
        let lines = validation_messages(body).unwrap();
        assert_eq!(
            lines,
            vec![
                "Discovery Year: Input should be a valid integer".to_string(),
                "Pl Eqt: Field required".to_string(),
            ]
        );
    }

    #[test]
    fn body_only_location_yields_message_alone() {
        let body = r#"{"detail":[{"loc":["body"],"msg":"Invalid JSON"}]}"#;
        assert_eq!(validation_messages(body).unwrap(), vec!["Invalid JSON"]);
    }

    #[test]
    fn string_detail_is_not_a_validation_error() {
        assert!(validation_messages(r#"{"detail":"Not Found"}"#).is_none());
        assert!(validation_messages("plain text").is_none());
        assert!(validation_messages(r#"{"detail":[]}"#).is_none());
    }

    #[test]
    fn forbidden_is_explained() {
        let err = OrreryError::Api {
            status: 403,
            url: "http://x/planets/1".into(),
            body: String::new(),
        };
        assert_eq!(
            describe_error(&err),
            "Admin API key is missing required permissions."
        );
    }

    #[test]
    fn invalid_key_is_explained() {
        let err = OrreryError::Api {
            status: 401,
            url: "http://x/planets/1".into(),
            body: r#"{"detail":"Invalid API key"}"#.into(),
        };
        assert_eq!(friendly_admin_error(&err), Some("Admin API key rejected."));
    }

    #[test]
    fn other_errors_fall_back_to_display() {
        let err = OrreryError::Api {
            status: 500,
            url: "http://x/planets/".into(),
            body: "boom".into(),
        };
        assert!(describe_error(&err).starts_with("HTTP 500 @ http://x/planets/"));
    }
}
