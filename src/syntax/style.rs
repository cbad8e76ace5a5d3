//! Style types for highlighted text
//!
//! A `Style` is the resolved handle the engine attaches to every span:
//! a visual `TextFormat` plus the single-character text type tag that
//! indenters and other consumers use to ask "is this a comment/string?".

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Visual text attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFormat {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl TextFormat {
    /// Create a format with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolved style handle attached to highlighted spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// How the text looks
    pub format: TextFormat,
    /// Text type: 'c' comment, 'b' block comment, 's' string, 'h' here-doc, ' ' code
    pub text_type: char,
}

impl Style {
    pub fn new(format: TextFormat, text_type: char) -> Self {
        Self { format, text_type }
    }

    /// Check whether the styled text is code (not a comment or string)
    pub fn is_code(&self) -> bool {
        self.text_type == ' '
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            format: TextFormat::default(),
            text_type: ' ',
        }
    }
}

/// A styled span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_default() {
        let format = TextFormat::default();
        assert!(format.is_default());
        assert_eq!(format.fg, Color::Default);
        assert!(!format.bold);
    }

    #[test]
    fn test_format_builders() {
        let format = TextFormat::fg(Color::Red).with_bold().with_bg(Color::Blue);
        assert_eq!(format.fg, Color::Red);
        assert_eq!(format.bg, Color::Blue);
        assert!(format.bold);
        assert!(!format.is_default());
    }

    #[test]
    fn test_default_style_is_code() {
        assert!(Style::default().is_code());
        assert!(!Style::new(TextFormat::default(), 'c').is_code());
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 10, Style::default());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
    }
}
