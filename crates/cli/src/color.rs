// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers and result keys: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and scalar values: light grey
    pub const LITERAL: u8 = 250;
    /// Placeholders and list markers: medium grey
    pub const CONTEXT: u8 = 245;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables, `COLOR=1` forces, otherwise TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

const RESET: &str = "\x1b[0m";

/// Wrap `text` in a 256-color foreground escape.
pub fn paint(code: u8, text: &str) -> String {
    format!("\x1b[38;5;{code}m{text}{RESET}")
}

/// Palette used by a renderer; `plain` leaves text untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_env() -> Self {
        Self::new(should_colorize())
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn header(&self, text: &str) -> String {
        self.apply(codes::HEADER, text)
    }

    pub fn literal(&self, text: &str) -> String {
        self.apply(codes::LITERAL, text)
    }

    pub fn context(&self, text: &str) -> String {
        self.apply(codes::CONTEXT, text)
    }

    fn apply(&self, code: u8, text: &str) -> String {
        if self.enabled {
            paint(code, text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
