//! C language grammar

use crate::syntax::grammar::{ContextDef, GrammarBuilder, ItemData, RuleDef};

const KEYWORDS: &[&str] = &[
    "break", "case", "continue", "default", "do", "else", "enum", "extern", "for", "goto", "if",
    "inline", "return", "sizeof", "struct", "switch", "typedef", "union", "while", "_Alignas",
    "_Alignof", "_Atomic", "_Generic", "_Noreturn", "_Static_assert", "_Thread_local",
];

const TYPES: &[&str] = &[
    "auto", "char", "const", "double", "float", "int", "long", "register", "restrict", "short",
    "signed", "static", "unsigned", "void", "volatile", "_Bool", "_Complex", "_Imaginary",
    "size_t", "ptrdiff_t", "intptr_t", "uintptr_t", "int8_t", "int16_t", "int32_t", "int64_t",
    "uint8_t", "uint16_t", "uint32_t", "uint64_t", "FILE",
];

const ALERTS: &[&str] = &["TODO", "FIXME", "XXX", "BUG", "NOTE", "HACK"];

/// Integer suffixes, longest first
const INT_SUFFIXES: &[&str] = &["ULL", "LUL", "LLU", "UL", "LU", "LL", "U", "L"];

/// Create the C grammar
pub fn c_grammar() -> GrammarBuilder {
    let mut int = RuleDef::int().attribute("Decimal");
    for suffix in INT_SUFFIXES {
        int = int.child(RuleDef::string(suffix).insensitive());
    }

    GrammarBuilder::new("C")
        .item_data(ItemData::new("Normal Text", "dsNormal"))
        .item_data(ItemData::new("Keyword", "dsKeyword"))
        .item_data(ItemData::new("Data Type", "dsDataType"))
        .item_data(ItemData::new("Decimal", "dsDecVal"))
        .item_data(ItemData::new("Octal", "dsBaseN"))
        .item_data(ItemData::new("Hex", "dsBaseN"))
        .item_data(ItemData::new("Float", "dsFloat"))
        .item_data(ItemData::new("Char", "dsChar"))
        .item_data(ItemData::new("String", "dsString"))
        .item_data(ItemData::new("String Char", "dsSpecialChar"))
        .item_data(ItemData::new("Comment", "dsComment"))
        .item_data(ItemData::new("Symbol", "dsNormal"))
        .item_data(ItemData::new("Preprocessor", "dsOthers"))
        .item_data(ItemData::new("Prep. Lib", "dsOthers"))
        .item_data(ItemData::new("Alert", "dsAlert"))
        .list("keywords", KEYWORDS)
        .list("types", TYPES)
        .list("alerts", ALERTS)
        .context(
            ContextDef::new("Normal")
                .attribute("Normal Text")
                .rule(RuleDef::detect_spaces())
                .rule(
                    RuleDef::regex(r"#\s*if\s+0\s*$")
                        .first_non_space()
                        .attribute("Preprocessor")
                        .context("Outscoped"),
                )
                .rule(
                    RuleDef::detect_char('#')
                        .first_non_space()
                        .attribute("Preprocessor")
                        .context("Preprocessor"),
                )
                .rule(RuleDef::keyword("keywords").attribute("Keyword"))
                .rule(RuleDef::keyword("types").attribute("Data Type"))
                .rule(RuleDef::detect_identifier())
                .rule(RuleDef::hl_c_char().attribute("Char"))
                .rule(RuleDef::float().attribute("Float").child(RuleDef::any_char("fFlL")))
                .rule(RuleDef::hl_c_oct().attribute("Octal"))
                .rule(RuleDef::hl_c_hex().attribute("Hex"))
                .rule(int)
                .rule(RuleDef::detect_char('"').attribute("String").context("String"))
                .rule(RuleDef::detect_2chars('/', '/').attribute("Comment").context("Line Comment"))
                .rule(RuleDef::detect_2chars('/', '*').attribute("Comment").context("Block Comment"))
                .rule(RuleDef::any_char(":!%&()+,-/.*<=>?[]|~^;{}").attribute("Symbol")),
        )
        .context(
            ContextDef::new("String")
                .attribute("String")
                .line_end("#pop")
                .rule(RuleDef::line_continue().attribute("String"))
                .rule(RuleDef::hl_c_string_char().attribute("String Char"))
                .rule(RuleDef::detect_char('"').attribute("String").context("#pop")),
        )
        .context(
            ContextDef::new("Alerts")
                .attribute("Comment")
                .rule(RuleDef::keyword("alerts").attribute("Alert")),
        )
        .context(
            ContextDef::new("Line Comment")
                .attribute("Comment")
                .line_end("#pop")
                .rule(RuleDef::line_continue().attribute("Comment"))
                .rule(RuleDef::include("Alerts")),
        )
        .context(
            ContextDef::new("Block Comment")
                .attribute("Comment")
                .rule(RuleDef::detect_2chars('*', '/').attribute("Comment").context("#pop"))
                .rule(RuleDef::include("Alerts")),
        )
        .context(
            ContextDef::new("Preprocessor")
                .attribute("Preprocessor")
                .line_end("#pop")
                .rule(RuleDef::line_continue().attribute("Preprocessor"))
                .rule(RuleDef::range('"', '"').attribute("Prep. Lib"))
                .rule(RuleDef::range('<', '>').attribute("Prep. Lib"))
                .rule(RuleDef::detect_2chars('/', '/').attribute("Comment").context("Line Comment"))
                .rule(
                    RuleDef::detect_2chars('/', '*')
                        .attribute("Comment")
                        .context("Preprocessor Comment"),
                ),
        )
        .context(
            ContextDef::new("Preprocessor Comment")
                .attribute("Comment")
                .line_end("#pop")
                .rule(RuleDef::detect_2chars('*', '/').attribute("Comment").context("#pop")),
        )
        .context(
            ContextDef::new("Outscoped")
                .attribute("Comment")
                .rule(RuleDef::include("Alerts"))
                .rule(
                    RuleDef::regex(r"#\s*if")
                        .first_non_space()
                        .attribute("Comment")
                        .context("Outscoped Nested"),
                )
                .rule(
                    RuleDef::regex(r"#\s*(endif|else|elif)")
                        .first_non_space()
                        .attribute("Preprocessor")
                        .context("#pop"),
                ),
        )
        .context(
            ContextDef::new("Outscoped Nested")
                .attribute("Comment")
                .rule(RuleDef::include("Alerts"))
                .rule(
                    RuleDef::regex(r"#\s*if")
                        .first_non_space()
                        .attribute("Comment")
                        .context("Outscoped Nested"),
                )
                .rule(
                    RuleDef::regex(r"#\s*endif")
                        .first_non_space()
                        .attribute("Comment")
                        .context("#pop"),
                ),
        )
}
