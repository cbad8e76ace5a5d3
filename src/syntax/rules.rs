//! Matching rules
//!
//! One `Rule` per grammar rule element. The kinds are fixed by the
//! grammar format, so they form a closed enum and `try_match` dispatches
//! on it. Every rule either matches at the cursor or does not; there is
//! no error path here.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;
use regex::Regex;

use super::context::ContextId;
use super::cursor::TextToMatch;
use super::grammar::Grammar;
use super::stack::Captures;
use super::style::Style;
use super::switcher::ContextSwitcher;

/// Outcome of one successful rule application
#[derive(Debug, Clone)]
pub struct MatchResult<'g> {
    /// Bytes consumed, zero for look-ahead rules
    pub length: usize,
    /// Style of the consumed text, `None` to use the context's style
    pub style: Option<Style>,
    /// Transition to take, `None` for `#stay`
    pub switcher: Option<&'g ContextSwitcher>,
    /// The match was a line continuation marker
    pub line_continue: bool,
    /// Capture groups for a dynamic context push
    pub captures: Option<Captures>,
}

/// Value of a DetectChar rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharValue {
    Literal(char),
    /// First character of capture group N of the current context
    Capture(usize),
}

/// A compiled RegExpr rule
#[derive(Debug, Clone)]
pub struct RegexRule {
    /// Pattern as written, minus a leading `^` or `\b`
    pub(crate) pattern: String,
    /// Compiled anchored pattern; `None` for dynamic rules
    pub(crate) regex: Option<Regex>,
    pub(crate) insensitive: bool,
    pub(crate) minimal: bool,
    pub(crate) word_start: bool,
    pub(crate) line_start: bool,
}

impl RegexRule {
    /// Split a leading `^` / `\b` off a pattern into flags
    pub fn split_anchors(pattern: &str) -> (String, bool, bool) {
        let mut rest = pattern;
        let mut word_start = false;
        let mut line_start = false;
        loop {
            if let Some(tail) = rest.strip_prefix('^') {
                line_start = true;
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix("\\b") {
                word_start = true;
                rest = tail;
            } else {
                break;
            }
        }
        (rest.to_string(), word_start, line_start)
    }

    /// Compile a pattern so it only matches at the start of the haystack
    pub fn compile(pattern: &str, insensitive: bool, minimal: bool) -> Result<Regex, regex::Error> {
        let mut flags = String::new();
        if insensitive {
            flags.push('i');
        }
        if minimal {
            flags.push('U');
        }
        let source = if flags.is_empty() {
            format!("^(?:{})", pattern)
        } else {
            format!("(?{})^(?:{})", flags, pattern)
        };
        Regex::new(&source)
    }

    fn find(&self, text: &TextToMatch<'_>, want_captures: bool) -> Option<(usize, Option<Captures>)> {
        if self.word_start && !text.word_start {
            return None;
        }
        if self.line_start && text.offset > 0 {
            return None;
        }

        let dynamic;
        let regex = match &self.regex {
            Some(regex) => regex,
            None => {
                let pattern = substitute(&self.pattern, text, true);
                dynamic = match Self::compile(&pattern, self.insensitive, self.minimal) {
                    Ok(regex) => regex,
                    Err(err) => {
                        debug!("Dynamic regex '{}' failed to compile: {}", pattern, err);
                        return None;
                    }
                };
                &dynamic
            }
        };

        if want_captures {
            let caps = regex.captures(text.text)?;
            let length = caps.get(0)?.end();
            if length == 0 {
                return None;
            }
            let groups: Captures = caps
                .iter()
                .map(|m| m.map_or(String::new(), |m| m.as_str().to_string()))
                .collect();
            Some((length, Some(groups)))
        } else {
            let length = regex.find(text.text)?.end();
            (length > 0).then_some((length, None))
        }
    }
}

/// A keyword list lookup
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub(crate) list: String,
    pub(crate) words: Arc<HashSet<String>>,
    pub(crate) case_sensitive: bool,
}

/// An IncludeRules reference
#[derive(Debug, Clone)]
pub struct IncludeRule {
    pub(crate) name: String,
    pub(crate) target: ContextId,
    pub(crate) include_attrib: bool,
}

/// The matcher kinds
#[derive(Debug, Clone)]
pub enum RuleKind {
    DetectChar(CharValue),
    Detect2Chars(char, char),
    AnyChar(String),
    StringDetect { value: String, insensitive: bool },
    WordDetect { value: String, insensitive: bool },
    RegExpr(RegexRule),
    Keyword(KeywordRule),
    Int(Vec<Rule>),
    Float(Vec<Rule>),
    HlCOct,
    HlCHex,
    HlCStringChar,
    HlCChar,
    RangeDetect(char, char),
    LineContinue(char),
    DetectSpaces,
    DetectIdentifier,
    IncludeRules(IncludeRule),
}

/// A single matching rule with its common parameters
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) kind: RuleKind,
    pub(crate) attribute: Option<String>,
    pub(crate) style: Option<Style>,
    pub(crate) switcher: ContextSwitcher,
    pub(crate) look_ahead: bool,
    pub(crate) first_non_space: bool,
    pub(crate) column: Option<usize>,
    pub(crate) dynamic: bool,
}

impl Rule {
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn switcher(&self) -> &ContextSwitcher {
        &self.switcher
    }

    /// Child rules of Int and Float
    pub fn children(&self) -> &[Rule] {
        match &self.kind {
            RuleKind::Int(children) | RuleKind::Float(children) => children,
            _ => &[],
        }
    }

    /// Try to match at the cursor
    pub fn try_match<'g>(
        &'g self,
        grammar: &'g Grammar,
        text: &TextToMatch<'_>,
    ) -> Option<MatchResult<'g>> {
        if let Some(column) = self.column {
            if column != text.column {
                return None;
            }
        }
        if self.first_non_space && !text.first_non_space {
            return None;
        }

        if let RuleKind::IncludeRules(include) = &self.kind {
            let context = grammar.context(include.target);
            let mut result = context.try_match(grammar, text)?;
            if include.include_attrib && result.style.is_none() {
                result.style = Some(context.style());
            }
            return Some(result);
        }

        let (length, captures) = self.match_kind(grammar, text)?;
        Some(MatchResult {
            length: if self.look_ahead { 0 } else { length },
            style: self.style,
            switcher: (!self.switcher.is_stay()).then_some(&self.switcher),
            line_continue: matches!(self.kind, RuleKind::LineContinue(_)),
            captures,
        })
    }

    /// Natural match length, before look-ahead is applied
    fn match_kind(&self, grammar: &Grammar, text: &TextToMatch<'_>) -> Option<(usize, Option<Captures>)> {
        let s = text.text;
        let first = s.chars().next()?;

        let length = match &self.kind {
            RuleKind::DetectChar(value) => {
                let expected = match value {
                    CharValue::Literal(c) => *c,
                    CharValue::Capture(index) => text.capture(*index).chars().next()?,
                };
                (first == expected).then_some(first.len_utf8())?
            }
            RuleKind::Detect2Chars(a, b) => {
                let mut chars = s.chars();
                if chars.next() == Some(*a) && chars.next() == Some(*b) {
                    a.len_utf8() + b.len_utf8()
                } else {
                    return None;
                }
            }
            RuleKind::AnyChar(set) => set.contains(first).then_some(first.len_utf8())?,
            RuleKind::StringDetect { value, insensitive } => {
                if self.dynamic {
                    let value = substitute(value, text, false);
                    match_prefix(s, &value, *insensitive)?
                } else {
                    match_prefix(s, value, *insensitive)?
                }
            }
            RuleKind::WordDetect { value, insensitive } => {
                if !text.word_start {
                    return None;
                }
                let length = match_prefix(s, value, *insensitive)?;
                text.is_word_end(length).then_some(length)?
            }
            RuleKind::RegExpr(regex) => {
                return regex.find(text, self.switcher.pushes_dynamic());
            }
            RuleKind::Keyword(keyword) => {
                if !text.word_start {
                    return None;
                }
                let word = text.word()?;
                let found = if keyword.case_sensitive {
                    keyword.words.contains(word)
                } else {
                    keyword.words.contains(&word.to_lowercase())
                };
                found.then_some(word.len())?
            }
            RuleKind::Int(children) => {
                if !text.word_start {
                    return None;
                }
                let digits = count_digits(s);
                if digits == 0 {
                    return None;
                }
                digits + match_children(children, grammar, text, digits)
            }
            RuleKind::Float(children) => {
                if !text.word_start {
                    return None;
                }
                let length = match_float(s)?;
                length + match_children(children, grammar, text, length)
            }
            RuleKind::HlCOct => {
                if !text.word_start {
                    return None;
                }
                match_c_oct(s)?
            }
            RuleKind::HlCHex => {
                if !text.word_start {
                    return None;
                }
                match_c_hex(s)?
            }
            RuleKind::HlCStringChar => match_c_string_char(s)?,
            RuleKind::HlCChar => match_c_char(s)?,
            RuleKind::RangeDetect(open, close) => {
                if first != *open {
                    return None;
                }
                let body = &s[open.len_utf8()..];
                let end = body.find(*close)?;
                open.len_utf8() + end + close.len_utf8()
            }
            RuleKind::LineContinue(c) => {
                let mut chars = s.chars();
                (chars.next() == Some(*c) && chars.next().is_none()).then_some(c.len_utf8())?
            }
            RuleKind::DetectSpaces => {
                let length = s.len() - s.trim_start().len();
                (length > 0).then_some(length)?
            }
            RuleKind::DetectIdentifier => {
                if !(first.is_ascii_alphabetic() || first == '_') {
                    return None;
                }
                s.char_indices()
                    .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
                    .map_or(s.len(), |(i, _)| i)
            }
            RuleKind::IncludeRules(_) => return None,
        };

        Some((length, None))
    }

    fn name(&self) -> &'static str {
        match &self.kind {
            RuleKind::DetectChar(_) => "DetectChar",
            RuleKind::Detect2Chars(..) => "Detect2Chars",
            RuleKind::AnyChar(_) => "AnyChar",
            RuleKind::StringDetect { .. } => "StringDetect",
            RuleKind::WordDetect { .. } => "WordDetect",
            RuleKind::RegExpr(_) => "RegExpr",
            RuleKind::Keyword(_) => "keyword",
            RuleKind::Int(_) => "Int",
            RuleKind::Float(_) => "Float",
            RuleKind::HlCOct => "HlCOct",
            RuleKind::HlCHex => "HlCHex",
            RuleKind::HlCStringChar => "HlCStringChar",
            RuleKind::HlCChar => "HlCChar",
            RuleKind::RangeDetect(..) => "RangeDetect",
            RuleKind::LineContinue(_) => "LineContinue",
            RuleKind::DetectSpaces => "DetectSpaces",
            RuleKind::DetectIdentifier => "DetectIdentifier",
            RuleKind::IncludeRules(_) => "IncludeRules",
        }
    }

    fn args(&self) -> String {
        let with_case = |value: &str, insensitive: bool| {
            if insensitive {
                format!("{} insensitive", value)
            } else {
                value.to_string()
            }
        };
        match &self.kind {
            RuleKind::DetectChar(CharValue::Literal(c)) => c.to_string(),
            RuleKind::DetectChar(CharValue::Capture(index)) => format!("index: {}", index),
            RuleKind::Detect2Chars(a, b) => format!("{}{}", a, b),
            RuleKind::AnyChar(set) => set.clone(),
            RuleKind::StringDetect { value, insensitive }
            | RuleKind::WordDetect { value, insensitive } => with_case(value, *insensitive),
            RuleKind::RegExpr(regex) => {
                let mut args = regex.pattern.clone();
                for (flag, name) in [
                    (regex.insensitive, " insensitive"),
                    (regex.minimal, " minimal"),
                    (regex.word_start, " wordStart"),
                    (regex.line_start, " lineStart"),
                ] {
                    if flag {
                        args.push_str(name);
                    }
                }
                args
            }
            RuleKind::Keyword(keyword) => keyword.list.clone(),
            RuleKind::RangeDetect(open, close) => format!("{} - {}", open, close),
            RuleKind::LineContinue(c) => c.to_string(),
            RuleKind::IncludeRules(include) => include.name.clone(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.args())?;
        if let Some(attribute) = &self.attribute {
            write!(f, " attribute={}", attribute)?;
        }
        if !self.switcher.is_stay() {
            write!(f, " context={}", self.switcher)?;
        }
        if self.look_ahead {
            write!(f, " lookAhead")?;
        }
        Ok(())
    }
}

/// Replace `%N` placeholders with captured groups of the current context
fn substitute(value: &str, text: &TextToMatch<'_>, escape: bool) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(index) = chars.peek().and_then(|d| d.to_digit(10)) {
                chars.next();
                let group = text.capture(index as usize);
                if escape {
                    result.push_str(&regex::escape(group));
                } else {
                    result.push_str(group);
                }
                continue;
            }
        }
        result.push(c);
    }
    result
}

/// Byte length of `value` if `text` starts with it
fn match_prefix(text: &str, value: &str, insensitive: bool) -> Option<usize> {
    if value.is_empty() {
        return None;
    }
    if !insensitive {
        return text.starts_with(value).then_some(value.len());
    }
    let mut text_chars = text.char_indices();
    for expected in value.chars() {
        let (_, actual) = text_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(i, _)| i))
}

fn count_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

/// Run child rules right after a number, first match extends it
///
/// Only the child's length counts; its style and switch are dropped.
fn match_children(children: &[Rule], grammar: &Grammar, text: &TextToMatch<'_>, length: usize) -> usize {
    if length >= text.text.len() {
        return 0;
    }
    let rest = text.advanced(length);
    children
        .iter()
        .find_map(|child| child.try_match(grammar, &rest))
        .map_or(0, |result| result.length)
}

fn match_float(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut length = count_digits(text);
    let mut have_digit = length > 0;
    let mut have_point = false;

    if bytes.get(length) == Some(&b'.') {
        have_point = true;
        length += 1;
        let digits = count_digits(&text[length..]);
        have_digit |= digits > 0;
        length += digits;
    }

    if !have_digit {
        return None;
    }

    if matches!(bytes.get(length).copied(), Some(b'e' | b'E')) {
        let mut exponent = length + 1;
        if matches!(bytes.get(exponent).copied(), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits = count_digits(&text[exponent..]);
        if digits > 0 {
            return Some(exponent + digits);
        }
        if !have_point {
            return None;
        }
        return Some(length);
    }

    have_point.then_some(length)
}

fn c_int_suffix(text: &str, length: usize) -> usize {
    match text.as_bytes().get(length).copied() {
        Some(b'l' | b'L' | b'u' | b'U') => length + 1,
        _ => length,
    }
}

fn match_c_oct(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('0')?;
    let digits = rest.bytes().take_while(|b| (b'0'..=b'7').contains(b)).count();
    if digits == 0 {
        return None;
    }
    Some(c_int_suffix(text, 1 + digits))
}

fn match_c_hex(text: &str) -> Option<usize> {
    let rest = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?;
    let digits = rest.bytes().take_while(u8::is_ascii_hexdigit).count();
    if digits == 0 {
        return None;
    }
    Some(c_int_suffix(text, 2 + digits))
}

fn match_c_string_char(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('\\')?;
    let next = rest.chars().next()?;
    if "abefnrtv\"'?\\".contains(next) {
        return Some(2);
    }
    if next == 'x' {
        let digits = rest[1..].bytes().take_while(u8::is_ascii_hexdigit).count();
        return (digits > 0).then_some(2 + digits);
    }
    let digits = rest.bytes().take(3).take_while(|b| (b'0'..=b'7').contains(b)).count();
    (digits > 0).then_some(1 + digits)
}

fn match_c_char(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('\'')?;
    let body = match match_c_string_char(rest) {
        Some(length) => length,
        None => {
            let c = rest.chars().next()?;
            if c == '\'' || c == '\\' {
                return None;
            }
            c.len_utf8()
        }
    };
    rest[body..].starts_with('\'').then_some(body + 2)
}
