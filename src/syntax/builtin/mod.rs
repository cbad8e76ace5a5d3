//! Built-in grammars
//!
//! This module provides highlighting grammars for a few common
//! languages, written with the grammar builder.

mod bash;
mod c;
mod python;

use super::grammar::GrammarBuilder;
use super::language::Language;
use crate::error::GrammarError;

/// Get all built-in languages
pub fn all_languages(strict_attributes: bool) -> Result<Vec<Language>, GrammarError> {
    let builders = [c::c_grammar(), python::python_grammar(), bash::bash_grammar()];
    builders
        .into_iter()
        .map(|builder| build(builder, strict_attributes))
        .collect()
}

fn build(builder: GrammarBuilder, strict_attributes: bool) -> Result<Language, GrammarError> {
    let grammar = builder.strict_attributes(strict_attributes).build()?;
    Ok(Language::new(grammar))
}
