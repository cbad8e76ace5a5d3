//! Grammars
//!
//! A grammar is described with `GrammarBuilder`: contexts, rules and
//! attributes referenced by name, the way a grammar file spells them.
//! `GrammarBuilder::build` runs the resolution pass and freezes the
//! result into an immutable `Grammar` arena where every reference is a
//! plain `ContextId`, every attribute a `Style` and every keyword list a
//! shared set. Nothing is resolved or validated at match time.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::warn;

use super::context::{Context, ContextId};
use super::cursor::Delimiters;
use super::rules::{CharValue, IncludeRule, KeywordRule, RegexRule, Rule, RuleKind};
use super::stack::ContextStack;
use super::style::{Color, Style};
use super::switcher::{ContextSwitcher, SwitchOp};
use super::tokens::DefaultStyle;
use crate::error::GrammarError;

/// An attribute definition ("itemData")
#[derive(Debug, Clone)]
pub struct ItemData {
    name: String,
    default_style: String,
    color: Option<Color>,
    bold: Option<bool>,
    italic: Option<bool>,
}

impl ItemData {
    /// Attribute `name` rendered with Kate default style `default_style`
    pub fn new(name: &str, default_style: &str) -> Self {
        Self {
            name: name.to_string(),
            default_style: default_style.to_string(),
            color: None,
            bold: None,
            italic: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    fn resolve(&self) -> Result<Style, GrammarError> {
        let default = DefaultStyle::from_name(&self.default_style).ok_or_else(|| {
            GrammarError::UnknownDefaultStyle {
                attribute: self.name.clone(),
                style: self.default_style.clone(),
            }
        })?;
        let mut style = default.style_for(&self.name);
        if let Some(color) = self.color {
            style.format.fg = color;
        }
        if let Some(bold) = self.bold {
            style.format.bold = bold;
        }
        if let Some(italic) = self.italic {
            style.format.italic = italic;
        }
        Ok(style)
    }
}

/// Unresolved rule kinds, referring to lists and contexts by name
#[derive(Debug, Clone)]
enum RuleDefKind {
    DetectChar(char),
    DetectCharCapture(usize),
    Detect2Chars(char, char),
    AnyChar(String),
    StringDetect(String),
    WordDetect(String),
    RegExpr(String),
    Keyword(String),
    Int,
    Float,
    HlCOct,
    HlCHex,
    HlCStringChar,
    HlCChar,
    RangeDetect(char, char),
    LineContinue(char),
    DetectSpaces,
    DetectIdentifier,
    IncludeRules(String),
}

/// A rule as written in a grammar description
#[derive(Debug, Clone)]
pub struct RuleDef {
    kind: RuleDefKind,
    attribute: Option<String>,
    context: String,
    look_ahead: bool,
    first_non_space: bool,
    column: Option<usize>,
    dynamic: bool,
    insensitive: bool,
    minimal: bool,
    include_attrib: bool,
    children: Vec<RuleDef>,
}

impl RuleDef {
    fn new(kind: RuleDefKind) -> Self {
        Self {
            kind,
            attribute: None,
            context: "#stay".to_string(),
            look_ahead: false,
            first_non_space: false,
            column: None,
            dynamic: false,
            insensitive: false,
            minimal: false,
            include_attrib: false,
            children: Vec::new(),
        }
    }

    pub fn detect_char(c: char) -> Self {
        Self::new(RuleDefKind::DetectChar(c))
    }

    /// DetectChar matching the first character of capture group `index`
    pub fn detect_char_capture(index: usize) -> Self {
        Self::new(RuleDefKind::DetectCharCapture(index)).dynamic()
    }

    pub fn detect_2chars(a: char, b: char) -> Self {
        Self::new(RuleDefKind::Detect2Chars(a, b))
    }

    pub fn any_char(set: &str) -> Self {
        Self::new(RuleDefKind::AnyChar(set.to_string()))
    }

    pub fn string(value: &str) -> Self {
        Self::new(RuleDefKind::StringDetect(value.to_string()))
    }

    pub fn word(value: &str) -> Self {
        Self::new(RuleDefKind::WordDetect(value.to_string()))
    }

    pub fn regex(pattern: &str) -> Self {
        Self::new(RuleDefKind::RegExpr(pattern.to_string()))
    }

    pub fn keyword(list: &str) -> Self {
        Self::new(RuleDefKind::Keyword(list.to_string()))
    }

    pub fn int() -> Self {
        Self::new(RuleDefKind::Int)
    }

    pub fn float() -> Self {
        Self::new(RuleDefKind::Float)
    }

    pub fn hl_c_oct() -> Self {
        Self::new(RuleDefKind::HlCOct)
    }

    pub fn hl_c_hex() -> Self {
        Self::new(RuleDefKind::HlCHex)
    }

    pub fn hl_c_string_char() -> Self {
        Self::new(RuleDefKind::HlCStringChar)
    }

    pub fn hl_c_char() -> Self {
        Self::new(RuleDefKind::HlCChar)
    }

    pub fn range(open: char, close: char) -> Self {
        Self::new(RuleDefKind::RangeDetect(open, close))
    }

    /// LineContinue on a backslash
    pub fn line_continue() -> Self {
        Self::line_continue_on('\\')
    }

    pub fn line_continue_on(c: char) -> Self {
        Self::new(RuleDefKind::LineContinue(c))
    }

    pub fn detect_spaces() -> Self {
        Self::new(RuleDefKind::DetectSpaces)
    }

    pub fn detect_identifier() -> Self {
        Self::new(RuleDefKind::DetectIdentifier)
    }

    pub fn include(context: &str) -> Self {
        Self::new(RuleDefKind::IncludeRules(context.to_string()))
    }

    pub fn attribute(mut self, attribute: &str) -> Self {
        self.attribute = Some(attribute.to_string());
        self
    }

    /// Context operation taken on match
    pub fn context(mut self, operation: &str) -> Self {
        self.context = operation.to_string();
        self
    }

    pub fn look_ahead(mut self) -> Self {
        self.look_ahead = true;
        self
    }

    pub fn first_non_space(mut self) -> Self {
        self.first_non_space = true;
        self
    }

    pub fn column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Value holds `%N` placeholders for captured groups
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    pub fn insensitive(mut self) -> Self {
        self.insensitive = true;
        self
    }

    pub fn minimal(mut self) -> Self {
        self.minimal = true;
        self
    }

    /// Included rules without an attribute use the included context's style
    pub fn include_attrib(mut self) -> Self {
        self.include_attrib = true;
        self
    }

    /// Child rule of Int or Float
    pub fn child(mut self, rule: RuleDef) -> Self {
        self.children.push(rule);
        self
    }
}

/// A context as written in a grammar description
#[derive(Debug, Clone)]
pub struct ContextDef {
    name: String,
    attribute: Option<String>,
    line_end: String,
    line_begin: String,
    fallthrough: Option<String>,
    dynamic: bool,
    rules: Vec<RuleDef>,
}

impl ContextDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attribute: None,
            line_end: "#stay".to_string(),
            line_begin: "#stay".to_string(),
            fallthrough: None,
            dynamic: false,
            rules: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: &str) -> Self {
        self.attribute = Some(attribute.to_string());
        self
    }

    pub fn line_end(mut self, operation: &str) -> Self {
        self.line_end = operation.to_string();
        self
    }

    pub fn line_begin(mut self, operation: &str) -> Self {
        self.line_begin = operation.to_string();
        self
    }

    /// Switch taken when no rule matches
    pub fn fallthrough(mut self, operation: &str) -> Self {
        self.fallthrough = Some(operation.to_string());
        self
    }

    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    pub fn rule(mut self, rule: RuleDef) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Name-based grammar description, frozen by `build`
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    name: String,
    contexts: Vec<ContextDef>,
    item_data: Vec<ItemData>,
    lists: HashMap<String, Vec<String>>,
    case_sensitive: bool,
    weak_delimiters: String,
    additional_delimiters: String,
    strict_attributes: bool,
}

impl GrammarBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            contexts: Vec::new(),
            item_data: Vec::new(),
            lists: HashMap::new(),
            case_sensitive: true,
            weak_delimiters: String::new(),
            additional_delimiters: String::new(),
            strict_attributes: false,
        }
    }

    /// Add a context; the first one added is the default context
    pub fn context(mut self, context: ContextDef) -> Self {
        self.contexts.push(context);
        self
    }

    pub fn item_data(mut self, item: ItemData) -> Self {
        self.item_data.push(item);
        self
    }

    /// Add a keyword list
    pub fn list(mut self, name: &str, words: &[&str]) -> Self {
        self.lists
            .insert(name.to_string(), words.iter().map(|w| w.to_string()).collect());
        self
    }

    /// Whether keyword lookups are case sensitive
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Characters removed from the default word delimiters
    pub fn weak_delimiters(mut self, chars: &str) -> Self {
        self.weak_delimiters = chars.to_string();
        self
    }

    /// Characters added to the default word delimiters
    pub fn additional_delimiters(mut self, chars: &str) -> Self {
        self.additional_delimiters = chars.to_string();
        self
    }

    /// Reject unknown attributes instead of falling back with a warning
    pub fn strict_attributes(mut self, strict: bool) -> Self {
        self.strict_attributes = strict;
        self
    }

    /// Resolve every reference and freeze the grammar
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.contexts.is_empty() {
            return Err(GrammarError::EmptyGrammar {
                language: self.name,
            });
        }

        let mut table = HashMap::new();
        for (index, context) in self.contexts.iter().enumerate() {
            if table.insert(context.name.clone(), ContextId(index)).is_some() {
                return Err(GrammarError::DuplicateContext {
                    name: context.name.clone(),
                });
            }
        }
        let dynamic: Vec<bool> = self.contexts.iter().map(|c| c.dynamic).collect();

        let mut styles = HashMap::new();
        for item in &self.item_data {
            styles.insert(item.name.to_lowercase(), item.resolve()?);
        }

        let mut lists = HashMap::new();
        for (name, words) in &self.lists {
            let words: HashSet<String> = if self.case_sensitive {
                words.iter().cloned().collect()
            } else {
                words.iter().map(|w| w.to_lowercase()).collect()
            };
            lists.insert(name.clone(), Arc::new(words));
        }

        let resolver = Resolver {
            table: &table,
            dynamic: &dynamic,
            styles: &styles,
            lists: &lists,
            case_sensitive: self.case_sensitive,
            strict: self.strict_attributes,
        };

        let mut contexts = Vec::with_capacity(self.contexts.len());
        for def in &self.contexts {
            contexts.push(resolver.context(def)?);
        }

        check_include_cycles(&contexts)?;

        Ok(Grammar {
            name: self.name,
            contexts,
            table,
            delimiters: Delimiters::new(&self.weak_delimiters, &self.additional_delimiters),
            case_sensitive: self.case_sensitive,
        })
    }
}

/// Lookup tables for the resolution pass
struct Resolver<'a> {
    table: &'a HashMap<String, ContextId>,
    dynamic: &'a [bool],
    styles: &'a HashMap<String, Style>,
    lists: &'a HashMap<String, Arc<HashSet<String>>>,
    case_sensitive: bool,
    strict: bool,
}

impl Resolver<'_> {
    /// Resolve an attribute, or fall back when not strict
    fn style(&self, owner: &str, attribute: &str, fallback: Style) -> Result<Style, GrammarError> {
        match self.styles.get(&attribute.to_lowercase()) {
            Some(style) => Ok(*style),
            None if self.strict => Err(GrammarError::UnresolvedAttribute {
                owner: owner.to_string(),
                attribute: attribute.to_string(),
            }),
            None => {
                warn!("{} refers to unknown attribute '{}'", owner, attribute);
                Ok(fallback)
            }
        }
    }

    fn switcher(&self, owner: &str, operation: &str) -> Result<ContextSwitcher, GrammarError> {
        SwitchOp::parse(operation)?.resolve(owner, self.table, self.dynamic)
    }

    fn context(&self, def: &ContextDef) -> Result<Context, GrammarError> {
        let style = match &def.attribute {
            Some(attribute) => self.style(
                &format!("Context '{}'", def.name),
                attribute,
                DefaultStyle::Normal.style_for(attribute),
            )?,
            None => Style::default(),
        };

        let fallthrough = match &def.fallthrough {
            Some(operation) => self.switcher(&def.name, operation)?,
            None => ContextSwitcher::stay(),
        };

        let mut rules = Vec::with_capacity(def.rules.len());
        for rule in &def.rules {
            rules.push(self.rule(&def.name, style, rule)?);
        }

        Ok(Context {
            name: def.name.clone(),
            attribute: def.attribute.clone(),
            style,
            dynamic: def.dynamic,
            rules,
            line_end: self.switcher(&def.name, &def.line_end)?,
            line_begin: self.switcher(&def.name, &def.line_begin)?,
            fallthrough,
        })
    }

    fn rule(&self, context: &str, context_style: Style, def: &RuleDef) -> Result<Rule, GrammarError> {
        let kind = match &def.kind {
            RuleDefKind::DetectChar(c) => RuleKind::DetectChar(CharValue::Literal(*c)),
            RuleDefKind::DetectCharCapture(index) => RuleKind::DetectChar(CharValue::Capture(*index)),
            RuleDefKind::Detect2Chars(a, b) => RuleKind::Detect2Chars(*a, *b),
            RuleDefKind::AnyChar(set) => RuleKind::AnyChar(set.clone()),
            RuleDefKind::StringDetect(value) => RuleKind::StringDetect {
                value: value.clone(),
                insensitive: def.insensitive,
            },
            RuleDefKind::WordDetect(value) => RuleKind::WordDetect {
                value: value.clone(),
                insensitive: def.insensitive,
            },
            RuleDefKind::RegExpr(source) => {
                let (pattern, word_start, line_start) = RegexRule::split_anchors(source);
                let regex = if def.dynamic {
                    None
                } else {
                    let compiled = RegexRule::compile(&pattern, def.insensitive, def.minimal)
                        .map_err(|source| GrammarError::InvalidRegex {
                            context: context.to_string(),
                            pattern: pattern.clone(),
                            source,
                        })?;
                    Some(compiled)
                };
                RuleKind::RegExpr(RegexRule {
                    pattern,
                    regex,
                    insensitive: def.insensitive,
                    minimal: def.minimal,
                    word_start,
                    line_start,
                })
            }
            RuleDefKind::Keyword(list) => {
                let words = self.lists.get(list).ok_or_else(|| GrammarError::UnknownKeywordList {
                    context: context.to_string(),
                    list: list.clone(),
                })?;
                RuleKind::Keyword(KeywordRule {
                    list: list.clone(),
                    words: Arc::clone(words),
                    case_sensitive: self.case_sensitive,
                })
            }
            RuleDefKind::Int => RuleKind::Int(self.children(context, context_style, def)?),
            RuleDefKind::Float => RuleKind::Float(self.children(context, context_style, def)?),
            RuleDefKind::HlCOct => RuleKind::HlCOct,
            RuleDefKind::HlCHex => RuleKind::HlCHex,
            RuleDefKind::HlCStringChar => RuleKind::HlCStringChar,
            RuleDefKind::HlCChar => RuleKind::HlCChar,
            RuleDefKind::RangeDetect(open, close) => RuleKind::RangeDetect(*open, *close),
            RuleDefKind::LineContinue(c) => RuleKind::LineContinue(*c),
            RuleDefKind::DetectSpaces => RuleKind::DetectSpaces,
            RuleDefKind::DetectIdentifier => RuleKind::DetectIdentifier,
            RuleDefKind::IncludeRules(name) => {
                let target = self.table.get(name).copied().ok_or_else(|| {
                    GrammarError::UnresolvedContextReference {
                        context: context.to_string(),
                        reference: name.clone(),
                    }
                })?;
                RuleKind::IncludeRules(IncludeRule {
                    name: name.clone(),
                    target,
                    include_attrib: def.include_attrib,
                })
            }
        };

        let style = match &def.attribute {
            Some(attribute) => Some(self.style(
                &format!("Rule in context '{}'", context),
                attribute,
                context_style,
            )?),
            None => None,
        };

        Ok(Rule {
            kind,
            attribute: def.attribute.clone(),
            style,
            switcher: self.switcher(context, &def.context)?,
            look_ahead: def.look_ahead,
            first_non_space: def.first_non_space,
            column: def.column,
            dynamic: def.dynamic,
        })
    }

    fn children(&self, context: &str, context_style: Style, def: &RuleDef) -> Result<Vec<Rule>, GrammarError> {
        def.children
            .iter()
            .map(|child| self.rule(context, context_style, child))
            .collect()
    }
}

/// Reject IncludeRules chains that lead back to where they started
fn check_include_cycles(contexts: &[Context]) -> Result<(), GrammarError> {
    fn includes(context: &Context) -> impl Iterator<Item = ContextId> + '_ {
        context.rules.iter().filter_map(|rule| match rule.kind() {
            RuleKind::IncludeRules(include) => Some(include.target),
            _ => None,
        })
    }

    for (index, context) in contexts.iter().enumerate() {
        let start = ContextId(index);
        let mut seen = HashSet::new();
        let mut pending: Vec<ContextId> = includes(context).collect();
        while let Some(id) = pending.pop() {
            if id == start {
                return Err(GrammarError::RecursiveInclude {
                    context: context.name.clone(),
                });
            }
            if seen.insert(id) {
                pending.extend(includes(&contexts[id.index()]));
            }
        }
    }
    Ok(())
}

/// An immutable, fully resolved grammar
///
/// Shared freely between threads; highlighting never mutates it.
#[derive(Debug)]
pub struct Grammar {
    name: String,
    contexts: Vec<Context>,
    table: HashMap<String, ContextId>,
    delimiters: Delimiters,
    case_sensitive: bool,
}

impl Grammar {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The first declared context
    pub fn default_context(&self) -> ContextId {
        ContextId(0)
    }

    /// Stack to start a document with
    pub fn initial_stack(&self) -> ContextStack {
        ContextStack::new(self.default_context())
    }

    /// Look up a context by handle
    ///
    /// Handles only come from this grammar, so the lookup cannot fail.
    pub fn context(&self, id: ContextId) -> &Context {
        &self.contexts[id.index()]
    }

    /// Look up a context handle by name
    pub fn context_id(&self, name: &str) -> Option<ContextId> {
        self.table.get(name).copied()
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Language {}", self.name)?;
        writeln!(f, "\tdelimiters: {:?}", self.delimiters.as_str())?;
        if !self.case_sensitive {
            writeln!(f, "\tcase insensitive keywords")?;
        }
        for context in &self.contexts {
            write!(f, "{}", context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GrammarBuilder {
        GrammarBuilder::new("Test")
            .item_data(ItemData::new("Normal Text", "dsNormal"))
            .item_data(ItemData::new("Comment", "dsComment"))
            .item_data(ItemData::new("Keyword", "dsKeyword"))
    }

    #[test]
    fn test_build_resolves_references() {
        let grammar = base()
            .context(
                ContextDef::new("Normal")
                    .attribute("Normal Text")
                    .rule(RuleDef::detect_2chars('/', '/').attribute("Comment").context("Comment")),
            )
            .context(ContextDef::new("Comment").attribute("Comment").line_end("#pop"))
            .build()
            .unwrap();

        assert_eq!(grammar.default_context(), ContextId(0));
        let comment = grammar.context_id("Comment").unwrap();
        let normal = grammar.context(grammar.default_context());
        assert_eq!(normal.rules()[0].switcher().target(), Some(comment));
        assert_eq!(grammar.context(comment).line_end().pops(), 1);
        assert_eq!(grammar.context(comment).style().text_type, 'c');
    }

    #[test]
    fn test_unknown_context_is_rejected() {
        let err = base()
            .context(ContextDef::new("Normal").rule(RuleDef::detect_char('"').context("String")))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UnresolvedContextReference { ref reference, .. } if reference == "String"
        ));
    }

    #[test]
    fn test_unknown_include_is_rejected() {
        let err = base()
            .context(ContextDef::new("Normal").rule(RuleDef::include("##C++")))
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::UnresolvedContextReference { .. }));
    }

    #[test]
    fn test_unknown_keyword_list_names_the_list() {
        let err = base()
            .context(ContextDef::new("Normal").rule(RuleDef::keyword("types")))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Context 'Normal' refers to unknown keyword list 'types'"
        );
    }

    #[test]
    fn test_unknown_attribute_falls_back() {
        let grammar = base()
            .context(
                ContextDef::new("Normal")
                    .attribute("Comment")
                    .rule(RuleDef::detect_char('x').attribute("Nope")),
            )
            .build()
            .unwrap();
        let context = grammar.context(grammar.default_context());
        assert_eq!(context.rules()[0].style, Some(context.style()));
    }

    #[test]
    fn test_unknown_attribute_strict() {
        let err = base()
            .strict_attributes(true)
            .context(ContextDef::new("Normal").attribute("Nope"))
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::UnresolvedAttribute { .. }));
    }

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let grammar = base()
            .strict_attributes(true)
            .context(ContextDef::new("Normal").attribute("keyword"))
            .build()
            .unwrap();
        assert!(grammar.context(ContextId(0)).style().format.bold);
    }

    #[test]
    fn test_item_data_overrides() {
        let grammar = GrammarBuilder::new("Test")
            .item_data(ItemData::new("Alert", "dsNormal").color(Color::Red).bold(true))
            .context(ContextDef::new("Normal").attribute("Alert"))
            .build()
            .unwrap();
        let style = grammar.context(ContextId(0)).style();
        assert_eq!(style.format.fg, Color::Red);
        assert!(style.format.bold);
    }

    #[test]
    fn test_unknown_default_style() {
        let err = GrammarBuilder::new("Test")
            .item_data(ItemData::new("Odd", "dsPurple"))
            .context(ContextDef::new("Normal"))
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::UnknownDefaultStyle { .. }));
    }

    #[test]
    fn test_invalid_regex() {
        let err = base()
            .context(ContextDef::new("Normal").rule(RuleDef::regex("(unclosed")))
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::InvalidRegex { .. }));
    }

    #[test]
    fn test_dynamic_regex_is_not_compiled() {
        let grammar = base()
            .context(ContextDef::new("Normal").rule(RuleDef::regex("%1(").dynamic()))
            .build()
            .unwrap();
        match grammar.context(ContextId(0)).rules()[0].kind() {
            RuleKind::RegExpr(regex) => assert!(regex.regex.is_none()),
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_duplicate() {
        assert!(matches!(
            GrammarBuilder::new("Empty").build().unwrap_err(),
            GrammarError::EmptyGrammar { .. }
        ));
        assert!(matches!(
            base()
                .context(ContextDef::new("A"))
                .context(ContextDef::new("A"))
                .build()
                .unwrap_err(),
            GrammarError::DuplicateContext { .. }
        ));
    }

    #[test]
    fn test_include_cycle_is_rejected() {
        let err = base()
            .context(ContextDef::new("A").rule(RuleDef::include("B")))
            .context(ContextDef::new("B").rule(RuleDef::include("A")))
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::RecursiveInclude { .. }));
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let grammar = base()
            .case_sensitive(false)
            .list("kw", &["SELECT"])
            .context(ContextDef::new("Normal").rule(RuleDef::keyword("kw")))
            .build()
            .unwrap();
        match grammar.context(ContextId(0)).rules()[0].kind() {
            RuleKind::Keyword(keyword) => assert!(keyword.words.contains("select")),
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn test_description() {
        let grammar = base()
            .context(
                ContextDef::new("Normal")
                    .attribute("Normal Text")
                    .rule(RuleDef::int().attribute("Keyword").child(RuleDef::any_char("uU"))),
            )
            .context(ContextDef::new("Comment").line_end("#pop").dynamic())
            .build()
            .unwrap();
        let dump = grammar.to_string();
        assert!(dump.starts_with("Language Test\n"));
        assert!(dump.contains("\tContext Normal\n"));
        assert!(dump.contains("\t\tInt() attribute=Keyword\n"));
        assert!(dump.contains("\t\t\tAnyChar(uU)\n"));
        assert!(dump.contains("\t\tlineEndContext: #pop\n"));
        assert!(dump.contains("\t\tdynamic\n"));
    }
}
