// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal rendering of query results.

use std::io::Write;

use clap::ValueEnum;
use jr_adapters::{OutputError, OutputSink};
use serde_json::Value;

use crate::color::Palette;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

const NESTED_INDENT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented key/value tree
    #[default]
    Nested,
    /// Alias of nested
    Yaml,
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    Raw,
    /// One `key: value` line per top-level entry
    Txt,
}

impl OutputFormat {
    /// Look up a format by name, as written in config files and result hints.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Writes rendered results to stdout.
///
/// The format for each emission is, in order: the format forced on the
/// command line, the hint attached to the result, the configured default.
/// Unknown hints fall back to the default.
#[derive(Debug, Clone)]
pub struct TerminalSink {
    default: OutputFormat,
    forced: Option<OutputFormat>,
    palette: Palette,
}

impl TerminalSink {
    /// Uncolored sink; see [`TerminalSink::with_palette`].
    pub fn new(default: OutputFormat, forced: Option<OutputFormat>) -> Self {
        Self { default, forced, palette: Palette::plain() }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn resolve(&self, hint: Option<&str>) -> OutputFormat {
        if let Some(forced) = self.forced {
            return forced;
        }
        match hint {
            Some(name) => OutputFormat::from_name(name).unwrap_or_else(|| {
                tracing::debug!(format = name, "unknown output format, using default");
                self.default
            }),
            None => self.default,
        }
    }

    /// Render `data` to text, newline-terminated.
    pub fn render(&self, data: &Value, hint: Option<&str>) -> Result<String, OutputError> {
        let mut out = String::new();
        match self.resolve(hint) {
            OutputFormat::Nested | OutputFormat::Yaml => self.nested(data, 0, &mut out),
            OutputFormat::Json => {
                out.push_str(&serde_json::to_string_pretty(data)?);
                out.push('\n');
            }
            OutputFormat::Raw => {
                out.push_str(&serde_json::to_string(data)?);
                out.push('\n');
            }
            OutputFormat::Txt => txt(data, &mut out)?,
        }
        Ok(out)
    }

    fn nested(&self, value: &Value, indent: usize, out: &mut String) {
        let pad = " ".repeat(indent);
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, child) in map {
                    out.push_str(&format!("{pad}{}:\n", self.palette.header(key)));
                    self.nested(child, indent + NESTED_INDENT, out);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                let dash = self.palette.context("-");
                for item in items {
                    if is_container(item) {
                        out.push_str(&format!("{pad}{dash}\n"));
                        self.nested(item, indent + NESTED_INDENT, out);
                    } else {
                        out.push_str(&format!("{pad}{dash} {}\n", self.palette.literal(&scalar(item))));
                    }
                }
            }
            _ => out.push_str(&format!("{pad}{}\n", self.palette.literal(&scalar(value)))),
        }
    }
}

impl OutputSink for TerminalSink {
    fn display(&self, data: &Value, format: Option<&str>) -> Result<(), OutputError> {
        let text = self.render(data, format)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

fn txt(data: &Value, out: &mut String) -> Result<(), OutputError> {
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                out.push_str(&format!("{key}: {}\n", compact(value)?));
            }
        }
        other => {
            out.push_str(&compact(other)?);
            out.push('\n');
        }
    }
    Ok(())
}

fn is_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Strings unquoted, everything else as JSON.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compact(value: &Value) -> Result<String, OutputError> {
    Ok(match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other)?,
    })
}
