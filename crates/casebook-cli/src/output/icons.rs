//! Unicode icons for CLI output.

use std::env;

use casebook_history_timeline::Icon;

/// Status and timeline icons
pub struct Icons;

impl Icons {
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const ALERT: &'static str = "⚠";
    pub const EDIT: &'static str = "✎";
    pub const EYE: &'static str = "◉";
    pub const DOCUMENT: &'static str = "▤";

    /// Fallback ASCII versions
    pub const CHECK_ASCII: &'static str = "[ok]";
    pub const CROSS_ASCII: &'static str = "[no]";
    pub const ALERT_ASCII: &'static str = "[!]";
    pub const EDIT_ASCII: &'static str = "[e]";
    pub const EYE_ASCII: &'static str = "[v]";
    pub const DOCUMENT_ASCII: &'static str = "[d]";
}

/// Icon context that handles unicode support detection
#[derive(Debug, Clone, Copy)]
pub struct IconContext {
    unicode: bool,
}

impl IconContext {
    pub fn new() -> Self {
        Self {
            unicode: detect_unicode_support(),
        }
    }

    pub fn unicode() -> Self {
        Self { unicode: true }
    }

    pub fn ascii() -> Self {
        Self { unicode: false }
    }

    pub fn check(&self) -> &'static str {
        if self.unicode { Icons::CHECK } else { Icons::CHECK_ASCII }
    }

    pub fn cross(&self) -> &'static str {
        if self.unicode { Icons::CROSS } else { Icons::CROSS_ASCII }
    }

    /// Glyph for a timeline entry icon.
    pub fn timeline(&self, icon: Icon) -> &'static str {
        match (icon, self.unicode) {
            (Icon::Alert, true) => Icons::ALERT,
            (Icon::Alert, false) => Icons::ALERT_ASCII,
            (Icon::Edit, true) => Icons::EDIT,
            (Icon::Edit, false) => Icons::EDIT_ASCII,
            (Icon::Eye, true) => Icons::EYE,
            (Icon::Eye, false) => Icons::EYE_ASCII,
            (Icon::Document, true) => Icons::DOCUMENT,
            (Icon::Document, false) => Icons::DOCUMENT_ASCII,
        }
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_unicode_support() -> bool {
    env::var("TERM")
        .map(|t| !t.contains("linux"))
        .unwrap_or(true)
        && env::var("LANG")
            .map(|l| l.to_uppercase().contains("UTF"))
            .unwrap_or(true)
}
