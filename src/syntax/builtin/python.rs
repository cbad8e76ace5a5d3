//! Python language grammar

use crate::syntax::grammar::{ContextDef, GrammarBuilder, ItemData, RuleDef};

const DEFINITIONS: &[&str] = &[
    "as", "async", "await", "del", "global", "import", "from", "lambda", "nonlocal", "and", "in",
    "is", "not", "or",
];

const FLOW: &[&str] = &[
    "assert", "break", "continue", "elif", "else", "except", "finally", "for", "if", "pass",
    "raise", "return", "try", "while", "with", "yield",
];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bool", "bytes", "callable", "chr", "dict", "dir", "enumerate", "filter",
    "float", "format", "getattr", "hasattr", "hash", "int", "isinstance", "issubclass", "iter",
    "len", "list", "map", "max", "min", "next", "object", "open", "ord", "print", "range", "repr",
    "reversed", "round", "set", "setattr", "sorted", "str", "sum", "super", "tuple", "type", "zip",
];

const SPECIALS: &[&str] = &["self", "cls", "None", "True", "False", "NotImplemented", "Ellipsis"];

const ALERTS: &[&str] = &["TODO", "FIXME", "XXX", "BUG", "NOTE", "HACK"];

/// String contexts: (name, closing quote, single line)
const STRINGS: &[(&str, &str, bool)] = &[
    ("Triple A-string", "'''", false),
    ("Triple Q-string", "\"\"\"", false),
    ("Single A-string", "'", true),
    ("Single Q-string", "\"", true),
];

fn string_context(name: &str, quote: &str, single_line: bool) -> ContextDef {
    let mut context = ContextDef::new(name).attribute("String");
    if single_line {
        context = context
            .line_end("#pop")
            .rule(RuleDef::line_continue().attribute("String Char"));
    }
    context
        .rule(RuleDef::hl_c_string_char().attribute("String Char"))
        .rule(RuleDef::string(quote).attribute("String").context("#pop"))
}

/// Create the Python grammar
pub fn python_grammar() -> GrammarBuilder {
    let mut builder = GrammarBuilder::new("Python")
        .item_data(ItemData::new("Normal Text", "dsNormal"))
        .item_data(ItemData::new("Definition Keyword", "dsKeyword"))
        .item_data(ItemData::new("Flow Control Keyword", "dsControlFlow"))
        .item_data(ItemData::new("Builtin Function", "dsBuiltIn"))
        .item_data(ItemData::new("Special Variable", "dsVariable"))
        .item_data(ItemData::new("Function Name", "dsFunction"))
        .item_data(ItemData::new("Decorator", "dsAttribute"))
        .item_data(ItemData::new("Operator", "dsOperator"))
        .item_data(ItemData::new("Int", "dsDecVal"))
        .item_data(ItemData::new("Hex", "dsBaseN"))
        .item_data(ItemData::new("Float", "dsFloat"))
        .item_data(ItemData::new("Complex", "dsOthers"))
        .item_data(ItemData::new("String", "dsString"))
        .item_data(ItemData::new("String Char", "dsSpecialChar"))
        .item_data(ItemData::new("Comment", "dsComment"))
        .item_data(ItemData::new("Alert", "dsAlert"))
        .list("definitions", DEFINITIONS)
        .list("flow", FLOW)
        .list("builtins", BUILTINS)
        .list("specials", SPECIALS)
        .list("alerts", ALERTS)
        .context(
            ContextDef::new("Normal")
                .attribute("Normal Text")
                .rule(RuleDef::detect_spaces())
                .rule(RuleDef::word("def").attribute("Definition Keyword").context("Definition"))
                .rule(RuleDef::word("class").attribute("Definition Keyword").context("Definition"))
                .rule(RuleDef::keyword("definitions").attribute("Definition Keyword"))
                .rule(RuleDef::keyword("flow").attribute("Flow Control Keyword"))
                .rule(RuleDef::keyword("builtins").attribute("Builtin Function"))
                .rule(RuleDef::keyword("specials").attribute("Special Variable"))
                .rule(
                    RuleDef::regex(r"\b[rRbBfFuU]{1,2}'''")
                        .attribute("String")
                        .context("Triple A-string"),
                )
                .rule(
                    RuleDef::regex(r#"\b[rRbBfFuU]{1,2}""""#)
                        .attribute("String")
                        .context("Triple Q-string"),
                )
                .rule(
                    RuleDef::regex(r"\b[rRbBfFuU]{1,2}'")
                        .attribute("String")
                        .context("Single A-string"),
                )
                .rule(
                    RuleDef::regex(r#"\b[rRbBfFuU]{1,2}""#)
                        .attribute("String")
                        .context("Single Q-string"),
                )
                .rule(RuleDef::detect_identifier())
                .rule(
                    RuleDef::regex(r"@[_a-zA-Z][_a-zA-Z0-9.]*")
                        .first_non_space()
                        .attribute("Decorator"),
                )
                .rule(RuleDef::hl_c_hex().attribute("Hex"))
                .rule(RuleDef::regex(r"\b[0-9]+(\.[0-9]*)?[jJ]").attribute("Complex"))
                .rule(RuleDef::float().attribute("Float"))
                .rule(RuleDef::int().attribute("Int").child(RuleDef::any_char("lL")))
                .rule(RuleDef::string("'''").attribute("String").context("Triple A-string"))
                .rule(RuleDef::string("\"\"\"").attribute("String").context("Triple Q-string"))
                .rule(RuleDef::detect_char('\'').attribute("String").context("Single A-string"))
                .rule(RuleDef::detect_char('"').attribute("String").context("Single Q-string"))
                .rule(RuleDef::detect_char('#').attribute("Comment").context("Comment"))
                .rule(RuleDef::any_char("+*/%|=;<>!^&~-@:,.()[]{}").attribute("Operator")),
        )
        .context(
            ContextDef::new("Definition")
                .attribute("Normal Text")
                .fallthrough("#pop")
                .line_end("#pop")
                .rule(RuleDef::detect_spaces())
                .rule(RuleDef::detect_identifier().attribute("Function Name").context("#pop")),
        )
        .context(
            ContextDef::new("Comment")
                .attribute("Comment")
                .line_end("#pop")
                .rule(RuleDef::keyword("alerts").attribute("Alert")),
        );

    for (name, quote, single_line) in STRINGS {
        builder = builder.context(string_context(name, quote, *single_line));
    }
    builder
}
