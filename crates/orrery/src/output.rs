// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal output helpers shared by all commands.
//!
//! `--json` prints pretty JSON for scripting. Otherwise output is a plain
//! table, colored only when stdout is a TTY and `--plain` is absent.

use std::io::IsTerminal;

use colored::Colorize;
use orrery_core::OrreryError;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

impl Output {
    pub fn new(json: bool, plain: bool) -> Self {
        Self {
            json,
            color: !plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<(), OrreryError> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| OrreryError::Internal(format!("failed to render JSON: {e}")))?;
        println!("{rendered}");
        Ok(())
    }

    pub fn heading(&self, title: &str) {
        println!();
        if self.color {
            println!("  {}", title.bold());
        } else {
            println!("  {title}");
        }
        println!("  {}", "-".repeat(35));
    }

    pub fn ok(&self, text: &str) -> String {
        if self.color {
            format!("{} {}", "✓".green(), text.green())
        } else {
            format!("[OK] {text}")
        }
    }

    pub fn fail(&self, text: &str) -> String {
        if self.color {
            format!("{} {}", "✗".red(), text.red())
        } else {
            format!("[FAIL] {text}")
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Prints a one-line confirmation for mutating commands.
    pub fn done(&self, text: &str) {
        println!("  {}", self.ok(text));
    }
}

/// `2.5` stays `2.5`, `3.0` prints as `3`, missing prints as an em dash.
pub fn number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = (v * 1000.0).round() / 1000.0;
            format!("{rounded}")
        }
        _ => "—".to_string(),
    }
}

pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(number(Some(3.0)), "3");
        assert_eq!(number(Some(2.34567)), "2.346");
        assert_eq!(number(None), "—");
        assert_eq!(number(Some(f64::NAN)), "—");
    }

    #[test]
    fn plain_markers_without_color() {
        let out = Output {
            json: false,
            color: false,
        };
        assert_eq!(out.ok("ready"), "[OK] ready");
        assert_eq!(out.fail("down"), "[FAIL] down");
        assert_eq!(out.dim("x"), "x");
    }

    #[test]
    fn opt_renders_missing() {
        assert_eq!(opt(Some(2015)), "2015");
        assert_eq!(opt::<i32>(None), "—");
    }
}
