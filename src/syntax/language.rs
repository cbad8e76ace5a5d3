//! Languages and the per-line highlighting driver
//!
//! `highlight_line` is a pure function of the grammar, the line text and
//! the stack carried over from the previous line. It never fails and
//! never blocks, so callers may run it on any thread and throw away its
//! output at any time.

use std::fmt;
use std::sync::Arc;

use log::debug;

use super::cursor::TextToMatch;
use super::grammar::Grammar;
use super::stack::ContextStack;
use super::style::{Span, Style};

/// Zero-width transitions allowed at one offset before the driver advances
pub const MAX_ZERO_WIDTH_SWITCHES: usize = 64;

/// Line-end switches applied in one cascade at most
pub const MAX_LINE_END_SWITCHES: usize = 1024;

/// Result of highlighting a single line
#[derive(Debug, Clone)]
pub struct HighlightResult {
    /// Spans covering the line, in order, without gaps
    pub spans: Vec<Span>,
    /// Stack to carry into the next line
    pub end_stack: ContextStack,
    /// The line ended with a LineContinue match
    pub line_continue: bool,
}

/// A highlightable language
#[derive(Debug, Clone)]
pub struct Language {
    grammar: Arc<Grammar>,
}

impl Language {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar: Arc::new(grammar),
        }
    }

    pub fn name(&self) -> &str {
        self.grammar.name()
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    /// Stack for the first line of a document
    pub fn initial_stack(&self) -> ContextStack {
        self.grammar.initial_stack()
    }

    /// Highlight a single line
    pub fn highlight_line(&self, text: &str, stack: &ContextStack) -> HighlightResult {
        highlight_line(&self.grammar, text, stack)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grammar)
    }
}

/// Emit the not yet styled run `[*start, end)` and move `start` up
fn flush_pending(spans: &mut Vec<Span>, start: &mut usize, end: usize, style: Style) {
    if end > *start {
        spans.push(Span::new(*start, end, style));
    }
    *start = end;
}

/// Highlight one line starting from `stack`
///
/// Unless the line ends on a line continuation, the line-end switches run
/// and then the lineBegin switch of the resulting top context, so the end
/// stack is ready for the next line.
pub fn highlight_line(grammar: &Grammar, text: &str, stack: &ContextStack) -> HighlightResult {
    let mut stack = stack.clone();
    let leading_ws = text.len() - text.trim_start().len();
    let mut spans = Vec::new();
    let mut offset = 0;
    let mut column = 0;
    let mut pending = 0;
    let mut line_continue = false;
    let mut zero_width = 0;

    while offset < text.len() {
        let context = grammar.context(stack.current());
        let cursor = TextToMatch::new(
            text,
            offset,
            column,
            leading_ws,
            stack.current_data(),
            grammar.delimiters(),
        );

        if let Some(matched) = context.try_match(grammar, &cursor) {
            let next = matched
                .switcher
                .map(|switcher| switcher.apply(&stack, matched.captures.as_ref()));

            if matched.length > 0 {
                flush_pending(&mut spans, &mut pending, offset, context.style());
                let end = offset + matched.length;
                spans.push(Span::new(offset, end, matched.style.unwrap_or(context.style())));
                column += text[offset..end].chars().count();
                offset = end;
                pending = offset;
                zero_width = 0;
                line_continue = matched.line_continue;
                if let Some(next) = next {
                    stack = next;
                }
                continue;
            }

            if let Some(next) = next {
                if next != stack && zero_width < MAX_ZERO_WIDTH_SWITCHES {
                    flush_pending(&mut spans, &mut pending, offset, context.style());
                    stack = next;
                    zero_width += 1;
                    continue;
                }
            }
        }

        let fallthrough = context.fallthrough();
        if !fallthrough.is_stay() && zero_width < MAX_ZERO_WIDTH_SWITCHES {
            let next = fallthrough.apply(&stack, None);
            if next != stack {
                flush_pending(&mut spans, &mut pending, offset, context.style());
                stack = next;
                zero_width += 1;
                continue;
            }
        }

        if zero_width >= MAX_ZERO_WIDTH_SWITCHES {
            debug!(
                "Too many zero-width context switches at offset {} in context '{}'",
                offset,
                context.name()
            );
        }

        let step = text[offset..].chars().next().map_or(1, char::len_utf8);
        offset += step;
        column += 1;
        zero_width = 0;
        line_continue = false;
    }

    let context = grammar.context(stack.current());
    flush_pending(&mut spans, &mut pending, text.len(), context.style());

    if !line_continue {
        stack = apply_line_end(grammar, stack);
        let line_begin = grammar.context(stack.current()).line_begin();
        if !line_begin.is_stay() {
            stack = line_begin.apply(&stack, None);
        }
    }

    HighlightResult {
        spans,
        end_stack: stack,
        line_continue,
    }
}

/// Apply line-end switches until the top context stays put
fn apply_line_end(grammar: &Grammar, mut stack: ContextStack) -> ContextStack {
    for _ in 0..MAX_LINE_END_SWITCHES {
        let line_end = grammar.context(stack.current()).line_end();
        if line_end.is_stay() {
            return stack;
        }
        let next = line_end.apply(&stack, None);
        if next == stack {
            return stack;
        }
        stack = next;
    }
    debug!("Line end switches did not settle in context '{}'", grammar.context(stack.current()).name());
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::{ContextDef, GrammarBuilder, ItemData, RuleDef};

    fn create_test_language() -> Language {
        let grammar = GrammarBuilder::new("Test")
            .item_data(ItemData::new("Normal Text", "dsNormal"))
            .item_data(ItemData::new("Comment", "dsComment"))
            .item_data(ItemData::new("Number", "dsDecVal"))
            .context(
                ContextDef::new("Normal")
                    .attribute("Normal Text")
                    .rule(RuleDef::string("//").attribute("Comment").context("LineComment"))
                    .rule(RuleDef::detect_2chars('/', '*').attribute("Comment").context("BlockComment"))
                    .rule(RuleDef::int().attribute("Number")),
            )
            .context(ContextDef::new("LineComment").attribute("Comment").line_end("#pop"))
            .context(
                ContextDef::new("BlockComment")
                    .attribute("Comment")
                    .rule(RuleDef::detect_2chars('*', '/').attribute("Comment").context("#pop")),
            )
            .build()
            .unwrap();
        Language::new(grammar)
    }

    fn ranges(result: &HighlightResult) -> Vec<(usize, usize)> {
        result.spans.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_simple_highlighting() {
        let lang = create_test_language();
        let result = lang.highlight_line("let x = 42;", &lang.initial_stack());

        assert_eq!(result.end_stack, lang.initial_stack());
        assert_eq!(ranges(&result), vec![(0, 8), (8, 10), (10, 11)]);
        assert_eq!(result.spans[1].style.format.fg, crate::syntax::Color::Cyan);
    }

    #[test]
    fn test_line_comment_pops_at_line_end() {
        let lang = create_test_language();
        let result = lang.highlight_line("code // comment", &lang.initial_stack());

        assert_eq!(ranges(&result), vec![(0, 5), (5, 7), (7, 15)]);
        assert_eq!(result.spans[2].style.text_type, 'c');
        assert_eq!(result.end_stack, lang.initial_stack());
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let lang = create_test_language();
        let first = lang.highlight_line("code /* comment", &lang.initial_stack());
        assert_eq!(first.end_stack.depth(), 2);

        let second = lang.highlight_line("still in comment", &first.end_stack);
        assert_eq!(ranges(&second), vec![(0, 16)]);
        assert_eq!(second.end_stack, first.end_stack);

        let third = lang.highlight_line("end */ 7", &second.end_stack);
        assert_eq!(ranges(&third), vec![(0, 4), (4, 6), (6, 7), (7, 8)]);
        assert_eq!(third.end_stack, lang.initial_stack());
    }

    #[test]
    fn test_empty_line() {
        let lang = create_test_language();
        let result = lang.highlight_line("", &lang.initial_stack());
        assert!(result.spans.is_empty());
        assert!(!result.line_continue);
    }

    #[test]
    fn test_multibyte_text_advances_by_char() {
        let lang = create_test_language();
        let line = "héllo 1";
        let result = lang.highlight_line(line, &lang.initial_stack());
        assert_eq!(ranges(&result), vec![(0, 7), (7, 8)]);
    }
}
