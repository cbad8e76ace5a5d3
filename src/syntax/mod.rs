//! Syntax highlighting module
//!
//! This module provides context-stack based line highlighting:
//! - Styles and default styles
//! - Matching rules and contexts
//! - The persistent context stack carried between lines
//! - The per-line driver and a per-buffer highlight cache

mod style;
mod tokens;
mod cursor;
mod stack;
mod switcher;
mod rules;
mod context;
mod grammar;
mod language;
mod manager;
mod builtin;

pub use style::{Color, Span, Style, TextFormat};
pub use tokens::DefaultStyle;
pub use cursor::{Delimiters, TextToMatch, DEFAULT_DELIMITERS};
pub use stack::{Captures, ContextStack};
pub use switcher::{ContextSwitcher, SwitchOp};
pub use rules::{CharValue, MatchResult, Rule, RuleKind};
pub use context::{Context, ContextId};
pub use grammar::{ContextDef, Grammar, GrammarBuilder, ItemData, RuleDef};
pub use language::{
    highlight_line, HighlightResult, Language, MAX_LINE_END_SWITCHES, MAX_ZERO_WIDTH_SWITCHES,
};
pub use manager::{HighlightCache, LineEntry, SyntaxManager};
