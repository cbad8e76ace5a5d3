//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that owns the languages and
//! the per-buffer caches of highlighted lines.

use std::collections::HashMap;
use std::sync::Arc;

use super::builtin;
use super::language::{HighlightResult, Language};
use super::stack::ContextStack;
use super::style::Span;
use crate::error::{Error, Result};

/// Highlighting of one line, kept until the line goes stale
#[derive(Debug, Clone)]
pub struct LineEntry {
    pub spans: Vec<Span>,
    /// Stack the next line starts from
    pub end_stack: ContextStack,
    pub line_continue: bool,
}

impl From<HighlightResult> for LineEntry {
    fn from(result: HighlightResult) -> Self {
        Self {
            spans: result.spans,
            end_stack: result.end_stack,
            line_continue: result.line_continue,
        }
    }
}

/// Per-buffer highlighting cache
pub struct HighlightCache {
    /// Language for this buffer (None if no highlighting)
    pub language: Option<String>,
    /// Highlighting per line (None = never computed)
    lines: Vec<Option<LineEntry>>,
    /// Lines whose text changed since they were highlighted
    dirty: Vec<bool>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            language: None,
            lines: Vec::new(),
            dirty: Vec::new(),
        }
    }

    /// Set the language for this buffer
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
        self.invalidate_all();
    }

    /// Mark a single edited line as stale
    pub fn invalidate_line(&mut self, line: usize) {
        if let Some(dirty) = self.dirty.get_mut(line) {
            *dirty = true;
        }
    }

    /// Mark lines from `line` onwards as stale
    pub fn invalidate_from(&mut self, line: usize) {
        for dirty in self.dirty.iter_mut().skip(line) {
            *dirty = true;
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.lines.clear();
        self.dirty.clear();
    }

    /// Ensure cache vectors match the buffer's line count
    pub fn ensure_size(&mut self, line_count: usize) {
        self.lines.resize(line_count, None);
        self.dirty.resize(line_count, true);
    }

    /// First line that needs highlighting, if any
    pub fn first_stale(&self) -> Option<usize> {
        self.dirty.iter().position(|&dirty| dirty)
    }

    /// Cached spans of a line
    pub fn spans(&self, line: usize) -> Option<&[Span]> {
        self.lines.get(line)?.as_ref().map(|e| e.spans.as_slice())
    }

    /// Cached end stack of a line
    pub fn end_stack(&self, line: usize) -> Option<&ContextStack> {
        self.lines.get(line)?.as_ref().map(|e| &e.end_stack)
    }

    /// Rehighlight stale lines
    ///
    /// Starts at the first stale line and keeps going while either the
    /// line itself is stale or the stack it starts from changed. Lines
    /// after a rehighlighted line whose end stack came out unchanged are
    /// left alone. Returns the number of lines highlighted.
    pub fn update(&mut self, language: &Language, lines: &[&str]) -> usize {
        self.ensure_size(lines.len());
        let first = match self.first_stale() {
            Some(first) => first,
            None => return 0,
        };

        let mut highlighted = 0;
        let mut carry_changed = false;
        for index in first..lines.len() {
            if !self.dirty[index] && !carry_changed {
                continue;
            }

            let start = match index.checked_sub(1).and_then(|prev| self.end_stack(prev)) {
                Some(stack) => stack.clone(),
                None => language.initial_stack(),
            };
            let entry = LineEntry::from(language.highlight_line(lines[index], &start));
            highlighted += 1;

            carry_changed = self.lines[index]
                .as_ref()
                .map_or(true, |old| old.end_stack != entry.end_stack);
            self.lines[index] = Some(entry);
            self.dirty[index] = false;
        }
        highlighted
    }
}

impl Default for HighlightCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Loaded languages by name
    languages: HashMap<String, Arc<Language>>,
    /// Per-buffer caches (buffer index -> cache)
    caches: HashMap<usize, HighlightCache>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a manager without any languages
    pub fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            caches: HashMap::new(),
            enabled: true,
        }
    }

    /// Create a new syntax manager with built-in languages
    pub fn new(strict_attributes: bool) -> Result<Self> {
        let mut manager = Self::empty();
        for lang in builtin::all_languages(strict_attributes)? {
            manager.add_language(lang);
        }
        Ok(manager)
    }

    /// Add a language
    pub fn add_language(&mut self, lang: Language) {
        self.languages.insert(lang.name().to_string(), Arc::new(lang));
    }

    /// Get a language by name
    pub fn get_language(&self, name: &str) -> Option<&Arc<Language>> {
        self.languages.get(name)
    }

    /// Get or create a cache for a buffer
    pub fn get_cache(&mut self, buffer_idx: usize) -> &mut HighlightCache {
        self.caches.entry(buffer_idx).or_default()
    }

    /// Remove cache for a buffer (when buffer is closed)
    pub fn remove_cache(&mut self, buffer_idx: usize) {
        self.caches.remove(&buffer_idx);
    }

    /// Set language for a buffer by name
    pub fn set_buffer_language(&mut self, buffer_idx: usize, language: Option<&str>) -> Result<()> {
        if let Some(name) = language {
            if !self.languages.contains_key(name) {
                return Err(Error::UnknownLanguage(name.to_string()));
            }
        }
        let cache = self.get_cache(buffer_idx);
        cache.set_language(language.map(|s| s.to_string()));
        Ok(())
    }

    /// Invalidate cache from a line onwards
    pub fn invalidate_from(&mut self, buffer_idx: usize, line: usize) {
        if let Some(cache) = self.caches.get_mut(&buffer_idx) {
            cache.invalidate_from(line);
        }
    }

    /// Invalidate one edited line
    pub fn invalidate_line(&mut self, buffer_idx: usize, line: usize) {
        if let Some(cache) = self.caches.get_mut(&buffer_idx) {
            cache.invalidate_line(line);
        }
    }

    /// Bring a buffer's cache up to date with its lines
    ///
    /// Returns the number of lines highlighted.
    pub fn update_buffer(&mut self, buffer_idx: usize, lines: &[&str]) -> usize {
        if !self.enabled {
            return 0;
        }
        let cache = self.caches.entry(buffer_idx).or_default();
        let lang = match cache.language.as_ref().and_then(|name| self.languages.get(name)) {
            Some(lang) => Arc::clone(lang),
            None => return 0,
        };
        cache.update(&lang, lines)
    }

    /// Spans for a line of a buffer, empty if not highlighted
    pub fn line_spans(&self, buffer_idx: usize, line_idx: usize) -> Vec<Span> {
        if !self.enabled {
            return Vec::new();
        }
        self.caches
            .get(&buffer_idx)
            .and_then(|cache| cache.spans(line_idx))
            .map(|spans| spans.to_vec())
            .unwrap_or_default()
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::{ContextDef, GrammarBuilder, ItemData, RuleDef};

    fn block_comment_language() -> Language {
        let grammar = GrammarBuilder::new("Block")
            .item_data(ItemData::new("Normal Text", "dsNormal"))
            .item_data(ItemData::new("Comment", "dsComment"))
            .context(
                ContextDef::new("Normal")
                    .attribute("Normal Text")
                    .rule(RuleDef::detect_2chars('/', '*').attribute("Comment").context("Comment")),
            )
            .context(
                ContextDef::new("Comment")
                    .attribute("Comment")
                    .rule(RuleDef::detect_2chars('*', '/').attribute("Comment").context("#pop")),
            )
            .build()
            .unwrap();
        Language::new(grammar)
    }

    #[test]
    fn test_builtin_languages() {
        let manager = SyntaxManager::new(true).unwrap();
        assert_eq!(manager.list_languages(), vec!["Bash", "C", "Python"]);
    }

    #[test]
    fn test_unknown_language() {
        let mut manager = SyntaxManager::new(false).unwrap();
        assert!(matches!(
            manager.set_buffer_language(0, Some("Cobol")),
            Err(Error::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_update_buffer() {
        let mut manager = SyntaxManager::empty();
        manager.add_language(block_comment_language());
        manager.set_buffer_language(0, Some("Block")).unwrap();

        let lines = ["a /* b", "c", "d */ e"];
        assert_eq!(manager.update_buffer(0, &lines), 3);
        assert_eq!(manager.update_buffer(0, &lines), 0);
        assert_eq!(manager.line_spans(0, 1).len(), 1);
        assert_eq!(manager.line_spans(0, 1)[0].style.text_type, 'c');
    }

    #[test]
    fn test_edit_with_unchanged_state_stops_early() {
        let lang = block_comment_language();
        let mut cache = HighlightCache::new();
        let lines = ["x", "y", "z", "w"];
        assert_eq!(cache.update(&lang, &lines), 4);

        cache.invalidate_line(1);
        let edited = ["x", "yy", "z", "w"];
        assert_eq!(cache.update(&lang, &edited), 1);
    }

    #[test]
    fn test_edit_with_changed_state_propagates() {
        let lang = block_comment_language();
        let mut cache = HighlightCache::new();
        let lines = ["x", "y", "z", "w"];
        cache.update(&lang, &lines);

        cache.invalidate_line(1);
        let edited = ["x", "/* y", "z", "w"];
        assert_eq!(cache.update(&lang, &edited), 3);
        assert_eq!(cache.end_stack(3).map(|s| s.depth()), Some(2));
        assert_eq!(cache.spans(2).map(|s| s[0].style.text_type), Some('c'));
    }

    #[test]
    fn test_invalidate_from_rehighlights_tail() {
        let lang = block_comment_language();
        let mut cache = HighlightCache::new();
        let lines = ["x", "y", "z"];
        cache.update(&lang, &lines);
        cache.invalidate_from(1);
        assert_eq!(cache.first_stale(), Some(1));
        assert_eq!(cache.update(&lang, &lines), 2);
    }

    #[test]
    fn test_disabled_manager() {
        let mut manager = SyntaxManager::empty();
        manager.add_language(block_comment_language());
        manager.set_buffer_language(0, Some("Block")).unwrap();
        manager.toggle();
        assert_eq!(manager.update_buffer(0, &["/* x"]), 0);
        assert!(manager.line_spans(0, 0).is_empty());
    }
}
