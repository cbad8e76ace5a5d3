//! Highlighting contexts

use std::fmt;

use super::cursor::TextToMatch;
use super::grammar::Grammar;
use super::rules::{MatchResult, Rule};
use super::style::Style;
use super::switcher::ContextSwitcher;

/// Handle of a context inside its grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub(crate) usize);

impl ContextId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named lexer state
#[derive(Debug)]
pub struct Context {
    pub(crate) name: String,
    pub(crate) attribute: Option<String>,
    pub(crate) style: Style,
    pub(crate) dynamic: bool,
    pub(crate) rules: Vec<Rule>,
    pub(crate) line_end: ContextSwitcher,
    pub(crate) line_begin: ContextSwitcher,
    pub(crate) fallthrough: ContextSwitcher,
}

impl Context {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Style of text no rule claims
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn line_end(&self) -> &ContextSwitcher {
        &self.line_end
    }

    pub fn line_begin(&self) -> &ContextSwitcher {
        &self.line_begin
    }

    pub fn fallthrough(&self) -> &ContextSwitcher {
        &self.fallthrough
    }

    /// First rule, in declared order, that matches at the cursor
    pub fn try_match<'g>(
        &'g self,
        grammar: &'g Grammar,
        text: &TextToMatch<'_>,
    ) -> Option<MatchResult<'g>> {
        self.rules
            .iter()
            .find_map(|rule| rule.try_match(grammar, text))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tContext {}", self.name)?;
        writeln!(
            f,
            "\t\tattribute: {}",
            self.attribute.as_deref().unwrap_or("<not set>")
        )?;
        if !self.line_end.is_stay() {
            writeln!(f, "\t\tlineEndContext: {}", self.line_end)?;
        }
        if !self.line_begin.is_stay() {
            writeln!(f, "\t\tlineBeginContext: {}", self.line_begin)?;
        }
        if !self.fallthrough.is_stay() {
            writeln!(f, "\t\tfallthroughContext: {}", self.fallthrough)?;
        }
        if self.dynamic {
            writeln!(f, "\t\tdynamic")?;
        }
        for rule in &self.rules {
            writeln!(f, "\t\t{}", rule)?;
            for child in rule.children() {
                writeln!(f, "\t\t\t{}", child)?;
            }
        }
        Ok(())
    }
}
