/// Parser configuration
use crate::error::OptionsError;
use serde::{Deserialize, Serialize};

/// Options accepted by [`crate::parser::Parser`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Emit `tracing` events for every matching decision. Never changes output.
    pub debug: bool,
    pub limits: Limits,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Loads options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Resource ceilings for untrusted input.
///
/// Inline rollback rescans overlapping suffixes of a line, so the work for a
/// single line is not linear in its length. These bounds turn pathological
/// input into a [`crate::ParseError`] instead of a hang or a stack overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Total input size in bytes.
    pub max_input_bytes: usize,
    /// Length of one paragraph line in code points.
    pub max_line_chars: usize,
    /// Open inline frames at once, the root frame excluded.
    pub max_nesting_depth: usize,
    /// Scanner steps spent on one paragraph line.
    pub max_inline_steps: usize,
}

impl Limits {
    pub const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
    pub const DEFAULT_MAX_LINE_CHARS: usize = 16 * 1024;
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;
    pub const DEFAULT_MAX_INLINE_STEPS: usize = 1_000_000;

    /// No ceilings at all. Only for trusted input.
    pub fn unbounded() -> Self {
        Limits {
            max_input_bytes: usize::MAX,
            max_line_chars: usize::MAX,
            max_nesting_depth: usize::MAX,
            max_inline_steps: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_input_bytes: Self::DEFAULT_MAX_INPUT_BYTES,
            max_line_chars: Self::DEFAULT_MAX_LINE_CHARS,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
            max_inline_steps: Self::DEFAULT_MAX_INLINE_STEPS,
        }
    }
}
