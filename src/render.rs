//! Terminal rendering of highlighted lines
//!
//! Writes spans as ANSI-styled text through crossterm. Tabs are expanded
//! to the next tab stop, counting columns by display width.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::config::Config;
use crate::syntax::{Color, Span, TextFormat};

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub tab_width: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tab_width: 8,
            color: true,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            tab_width: config.tab_width,
            color: config.color,
        }
    }
}

/// Map a palette color to the terminal's
fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

/// Expand tabs in `text`, starting at display column `col`
///
/// Returns the expanded text and the column after it.
pub fn expand_tabs(text: &str, mut col: usize, tab_width: usize) -> (String, usize) {
    let tab_width = tab_width.max(1);
    let mut expanded = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\t' {
            let next = (col / tab_width + 1) * tab_width;
            expanded.extend(std::iter::repeat(' ').take(next - col));
            col = next;
        } else {
            expanded.push(ch);
            col += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    (expanded, col)
}

fn write_styled<W: Write>(out: &mut W, text: &str, format: &TextFormat) -> io::Result<()> {
    if format.is_default() {
        return queue!(out, Print(text));
    }
    if format.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(format.fg)))?;
    }
    if format.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(format.bg)))?;
    }
    if format.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if format.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if format.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
}

/// Render one line with its spans, followed by a newline
///
/// Text not covered by any span is written unstyled.
pub fn render_line<W: Write>(
    out: &mut W,
    text: &str,
    spans: &[Span],
    options: &RenderOptions,
) -> io::Result<()> {
    let mut col = 0;
    let mut pos = 0;
    let default = TextFormat::default();

    for span in spans {
        let start = span.start.clamp(pos, text.len());
        let end = span.end.clamp(start, text.len());
        let (Some(gap), Some(body)) = (text.get(pos..start), text.get(start..end)) else {
            continue;
        };

        let (gap, next) = expand_tabs(gap, col, options.tab_width);
        write_styled(out, &gap, &default)?;
        let (body, next) = expand_tabs(body, next, options.tab_width);
        let format = if options.color { &span.style.format } else { &default };
        write_styled(out, &body, format)?;

        col = next;
        pos = end;
    }

    if let Some(rest) = text.get(pos..) {
        let (rest, _) = expand_tabs(rest, col, options.tab_width);
        write_styled(out, &rest, &default)?;
    }
    queue!(out, Print('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Style;

    fn plain() -> RenderOptions {
        RenderOptions {
            tab_width: 4,
            color: false,
        }
    }

    fn render(text: &str, spans: &[Span], options: &RenderOptions) -> String {
        let mut out = Vec::new();
        render_line(&mut out, text, spans, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("a\tb", 0, 4), ("a   b".to_string(), 5));
        assert_eq!(expand_tabs("\t", 2, 4), ("  ".to_string(), 4));
        assert_eq!(expand_tabs("日\t", 0, 4), ("日  ".to_string(), 4));
    }

    #[test]
    fn test_render_without_color() {
        let style = Style::new(TextFormat::fg(Color::Red), ' ');
        let spans = [Span::new(0, 3, style), Span::new(3, 7, Style::default())];
        assert_eq!(render("let\tx=1", &spans, &plain()), "let x=1\n");
    }

    #[test]
    fn test_render_uncovered_text() {
        let spans = [Span::new(2, 4, Style::default())];
        assert_eq!(render("abcdef", &spans, &plain()), "abcdef\n");
    }

    #[test]
    fn test_render_with_color() {
        let style = Style::new(TextFormat::fg(Color::Red).with_bold(), ' ');
        let spans = [Span::new(0, 2, style)];
        let options = RenderOptions {
            tab_width: 4,
            color: true,
        };
        let output = render("if x", &spans, &options);
        assert!(output.contains("\x1b["));
        assert!(output.contains("if"));
        assert!(output.ends_with(" x\n"));
    }
}
