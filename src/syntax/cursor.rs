//! Matching cursor
//!
//! A `TextToMatch` is the view a rule gets of the line: the remaining
//! text plus the positional facts that cannot be recovered from the
//! remaining text alone (column, word start, first non-space).

use super::stack::Captures;

/// Kate's default word delimiters
pub const DEFAULT_DELIMITERS: &str = " \t.():!+,-<=>%&*/;?[]^{|}~\\";

/// Characters that end a word for keyword and word-boundary checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    chars: String,
}

impl Delimiters {
    /// Build a delimiter set from Kate's defaults with grammar adjustments
    pub fn new(weak: &str, additional: &str) -> Self {
        let mut chars: String = DEFAULT_DELIMITERS
            .chars()
            .filter(|c| !weak.contains(*c))
            .collect();
        for c in additional.chars() {
            if !chars.contains(c) {
                chars.push(c);
            }
        }
        Self { chars }
    }

    /// Check whether a character delimits words
    pub fn contains(&self, c: char) -> bool {
        c.is_whitespace() || self.chars.contains(c)
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// The cursor a rule matches against
#[derive(Debug, Clone, Copy)]
pub struct TextToMatch<'a> {
    /// The whole line
    pub line: &'a str,
    /// Byte offset of the cursor in the line
    pub offset: usize,
    /// Character column of the cursor
    pub column: usize,
    /// Remaining text, starting at the cursor
    pub text: &'a str,
    /// Only whitespace precedes the cursor
    pub first_non_space: bool,
    /// The cursor is at the start of a word
    pub word_start: bool,
    /// Captured data of the current context
    pub data: Option<&'a Captures>,
    delimiters: &'a Delimiters,
}

impl<'a> TextToMatch<'a> {
    /// Create a cursor at `offset`
    ///
    /// `leading_ws` is the byte length of the line's leading whitespace.
    pub fn new(
        line: &'a str,
        offset: usize,
        column: usize,
        leading_ws: usize,
        data: Option<&'a Captures>,
        delimiters: &'a Delimiters,
    ) -> Self {
        let word_start = line[..offset]
            .chars()
            .next_back()
            .map_or(true, |c| delimiters.contains(c));
        Self {
            line,
            offset,
            column,
            text: &line[offset..],
            first_non_space: offset <= leading_ws,
            word_start,
            data,
            delimiters,
        }
    }

    /// Cursor moved forward by `len` bytes of the remaining text
    pub fn advanced(&self, len: usize) -> Self {
        let skipped = self.text[..len].chars().count();
        let leading_ws = if self.first_non_space && self.text[..len].trim().is_empty() {
            self.offset + len
        } else {
            0
        };
        Self::new(
            self.line,
            self.offset + len,
            self.column + skipped,
            leading_ws,
            self.data,
            self.delimiters,
        )
    }

    /// The word starting at the cursor, if any
    pub fn word(&self) -> Option<&'a str> {
        let end = self
            .text
            .char_indices()
            .find(|&(_, c)| self.delimiters.contains(c))
            .map_or(self.text.len(), |(i, _)| i);
        if end == 0 {
            None
        } else {
            Some(&self.text[..end])
        }
    }

    /// Check whether the text at `len` bytes ahead ends a word
    pub fn is_word_end(&self, len: usize) -> bool {
        self.text[len..]
            .chars()
            .next()
            .map_or(true, |c| self.delimiters.contains(c))
    }

    /// Captured group `index` of the current context, empty if absent
    pub fn capture(&self, index: usize) -> &'a str {
        self.data
            .and_then(|data| data.get(index))
            .map_or("", |s| s.as_str())
    }
}
