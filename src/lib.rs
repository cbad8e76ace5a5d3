//! ctxhl - context-stack syntax highlighting
//!
//! Lines are highlighted one at a time. Each line starts from the context
//! stack the previous line ended with, so a document can be highlighted
//! incrementally and any line re-run from its cached starting stack.

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use config::Config;
pub use error::{Error, GrammarError, Result};
pub use syntax::{ContextStack, Grammar, GrammarBuilder, HighlightResult, Language, Span, Style, SyntaxManager};
