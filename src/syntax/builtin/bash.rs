//! Bash language grammar

use crate::syntax::grammar::{ContextDef, GrammarBuilder, ItemData, RuleDef};

const KEYWORDS: &[&str] = &[
    "case", "do", "done", "elif", "else", "esac", "fi", "for", "function", "if", "in", "select",
    "then", "until", "while",
];

const BUILTINS: &[&str] = &[
    "alias", "bg", "cd", "command", "declare", "echo", "eval", "exec", "exit", "export", "fg",
    "getopts", "hash", "local", "printf", "pwd", "read", "readonly", "return", "set", "shift",
    "source", "test", "trap", "type", "ulimit", "umask", "unalias", "unset", "wait",
];

const ALERTS: &[&str] = &["TODO", "FIXME", "XXX", "BUG", "NOTE", "HACK"];

/// Rules that expand variables, shared by code, double quotes and here documents
fn variable_rules(context: ContextDef) -> ContextDef {
    context
        .rule(RuleDef::detect_2chars('$', '{').attribute("Variable").context("Variable Brace"))
        .rule(RuleDef::detect_char('$').attribute("Variable").context("Variable Name"))
}

/// Create the Bash grammar
pub fn bash_grammar() -> GrammarBuilder {
    GrammarBuilder::new("Bash")
        .item_data(ItemData::new("Normal Text", "dsNormal"))
        .item_data(ItemData::new("Keyword", "dsKeyword"))
        .item_data(ItemData::new("Builtin", "dsBuiltIn"))
        .item_data(ItemData::new("Comment", "dsComment"))
        .item_data(ItemData::new("Alert", "dsAlert"))
        .item_data(ItemData::new("Variable", "dsVariable"))
        .item_data(ItemData::new("String SingleQ", "dsString"))
        .item_data(ItemData::new("String DoubleQ", "dsString"))
        .item_data(ItemData::new("Escape", "dsSpecialChar"))
        .item_data(ItemData::new("Here Doc", "dsOthers"))
        .item_data(ItemData::new("Redirection", "dsOperator"))
        .item_data(ItemData::new("Decimal", "dsDecVal"))
        .item_data(ItemData::new("Operator", "dsOperator"))
        .list("keywords", KEYWORDS)
        .list("builtins", BUILTINS)
        .list("alerts", ALERTS)
        .weak_delimiters("-")
        .context(variable_rules(
            ContextDef::new("Start")
                .attribute("Normal Text")
                .rule(RuleDef::detect_spaces())
                .rule(RuleDef::regex(r"\b#").attribute("Comment").context("Comment"))
                .rule(
                    RuleDef::regex(r#"<<-?\s*['"]?([A-Za-z_][A-Za-z0-9_]*)['"]?"#)
                        .attribute("Redirection")
                        .context("Here Doc"),
                )
                .rule(RuleDef::keyword("keywords").attribute("Keyword"))
                .rule(RuleDef::keyword("builtins").attribute("Builtin"))
                .rule(RuleDef::detect_char('\'').attribute("String SingleQ").context("String SingleQ"))
                .rule(RuleDef::detect_char('"').attribute("String DoubleQ").context("String DoubleQ"))
                .rule(RuleDef::int().attribute("Decimal"))
                .rule(RuleDef::detect_identifier())
                .rule(RuleDef::line_continue().attribute("Escape"))
                .rule(RuleDef::regex(r"\\.").attribute("Escape"))
                .rule(RuleDef::any_char("<>").attribute("Redirection"))
                .rule(RuleDef::any_char("|&;()").attribute("Operator")),
        ))
        .context(
            ContextDef::new("Comment")
                .attribute("Comment")
                .line_end("#pop")
                .rule(RuleDef::keyword("alerts").attribute("Alert")),
        )
        .context(
            ContextDef::new("String SingleQ")
                .attribute("String SingleQ")
                .rule(RuleDef::detect_char('\'').attribute("String SingleQ").context("#pop")),
        )
        .context(variable_rules(
            ContextDef::new("String DoubleQ")
                .attribute("String DoubleQ")
                .rule(RuleDef::regex(r#"\\[\\"$`]"#).attribute("Escape"))
                .rule(RuleDef::detect_char('"').attribute("String DoubleQ").context("#pop")),
        ))
        .context(
            ContextDef::new("Variable Name")
                .attribute("Variable")
                .fallthrough("#pop")
                .line_end("#pop")
                .rule(RuleDef::detect_identifier().attribute("Variable").context("#pop"))
                .rule(RuleDef::any_char("#?$!@*-0123456789").attribute("Variable").context("#pop")),
        )
        .context(
            ContextDef::new("Variable Brace")
                .attribute("Variable")
                .line_end("#pop")
                .rule(RuleDef::detect_char('}').attribute("Variable").context("#pop")),
        )
        .context(variable_rules(
            ContextDef::new("Here Doc")
                .attribute("Here Doc")
                .dynamic()
                .rule(
                    RuleDef::regex("^%1$")
                        .dynamic()
                        .attribute("Redirection")
                        .context("#pop"),
                ),
        ))
}
