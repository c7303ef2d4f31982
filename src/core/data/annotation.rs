use std::fmt;

/// Glyph placed between the call expression and the previewed value.
pub const ANNOTATION_GLYPH: &str = "\u{279C}"; // ➜

/// A translation key found in buffer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOccurrence {
    /// The dotted key (e.g., "greeting.hello").
    pub key: String,
    /// Byte offset immediately after the closing `)` of the call.
    pub end: usize,
}

impl KeyOccurrence {
    pub fn new(key: impl Into<String>, end: usize) -> Self {
        Self {
            key: key.into(),
            end,
        }
    }
}

/// Point position in a buffer.
///
/// Both fields are 0-indexed; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A resolved preview to render right after a `t('...')` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// The key the value was resolved from.
    pub key: String,
    /// Byte offset the overlay is anchored at (end of the call expression).
    pub offset: usize,
    /// `offset` converted to a line/column position.
    pub position: Position,
    /// Display value, already truncated.
    pub value: String,
}

impl Annotation {
    /// Overlay text as the rendering surface shows it: `  ➜  value`.
    pub fn label(&self) -> String {
        format!("  {}  {}", ANNOTATION_GLYPH, self.value)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
