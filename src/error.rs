//! Error types for ctxhl

use thiserror::Error;

/// Result type alias for ctxhl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("No such language: {0}")]
    UnknownLanguage(String),

    #[error("{0}")]
    Message(String),
}

/// Errors raised while resolving a grammar
///
/// All of these are load-time errors. A grammar that builds successfully
/// never produces an error while highlighting.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Context '{context}' refers to unknown context '{reference}'")]
    UnresolvedContextReference { context: String, reference: String },

    #[error("{owner} refers to unknown attribute '{attribute}'")]
    UnresolvedAttribute { owner: String, attribute: String },

    #[error("Context '{context}' refers to unknown keyword list '{list}'")]
    UnknownKeywordList { context: String, list: String },

    #[error("Invalid regular expression '{pattern}' in context '{context}': {source}")]
    InvalidRegex {
        context: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid context operation '{operation}'")]
    InvalidContextOperation { operation: String },

    #[error("Attribute '{attribute}' uses unknown default style '{style}'")]
    UnknownDefaultStyle { attribute: String, style: String },

    #[error("Language '{language}' has no contexts")]
    EmptyGrammar { language: String },

    #[error("Context '{context}' includes its own rules")]
    RecursiveInclude { context: String },

    #[error("Context '{name}' is defined twice")]
    DuplicateContext { name: String },
}
