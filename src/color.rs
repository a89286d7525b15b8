//! Hex color parsing for the color pickers.
//!
//! The pickers pair a native color input with a free-text hex box. Anything
//! typed into the text box goes through [`HexColorInput`], which only lets
//! complete `#RRGGBB` values through to the preview.

use regex::Regex;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("static hex pattern"));

static HEX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9a-fA-F]{0,5}$").expect("static hex prefix pattern"));

/// Normalize user input to `#RRGGBB` (uppercase).
///
/// Accepts six hex digits with or without the leading `#`. Surrounding
/// whitespace is ignored. Returns `None` for anything else.
pub fn normalize_hex(input: &str) -> Option<String> {
    HEX_COLOR
        .captures(input.trim())
        .map(|caps| format!("#{}", caps[1].to_ascii_uppercase()))
}

/// Outcome of feeding one keystroke's worth of text to a [`HexColorInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexInput {
    /// A complete color; it is now the current value.
    Applied(String),
    /// A strict prefix of a valid color (e.g. `#FF`). Nothing is applied yet.
    Pending,
    /// Not a color and cannot become one by typing more.
    Rejected,
}

/// Tracks the last valid value of a single color picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColorInput {
    value: String,
}

impl HexColorInput {
    /// `initial` must already be a valid color; invalid input falls back to white.
    pub fn new(initial: &str) -> Self {
        Self {
            value: normalize_hex(initial).unwrap_or_else(|| "#FFFFFF".to_string()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn input(&mut self, text: &str) -> HexInput {
        if let Some(color) = normalize_hex(text) {
            self.value = color.clone();
            return HexInput::Applied(color);
        }
        if HEX_PREFIX.is_match(text.trim()) {
            HexInput::Pending
        } else {
            HexInput::Rejected
        }
    }

    /// Leaving the text box discards whatever partial text it holds.
    pub fn blur(&self) -> String {
        self.value.clone()
    }
}
