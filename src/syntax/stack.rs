//! Context stack
//!
//! The highlighting state carried from one line to the next. Stacks are
//! persistent: every switch builds a new stack that shares its tail with
//! the old one, so a document can keep one snapshot per line for free.

use std::fmt;
use std::sync::Arc;

use super::context::ContextId;
use super::switcher::ContextSwitcher;

/// Regex capture groups stored with a dynamic context activation
///
/// Index 0 is the whole match, index N is group N.
pub type Captures = Arc<[String]>;

#[derive(Debug)]
struct Frame {
    context: ContextId,
    data: Option<Captures>,
    depth: usize,
    parent: Option<Arc<Frame>>,
}

impl Drop for Frame {
    /// Unlink the tail one frame at a time so deep stacks drop without recursion
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(mut frame) = parent.and_then(Arc::into_inner) {
            parent = frame.parent.take();
        }
    }
}

/// Immutable stack of active contexts
///
/// Never empty: the base entry is never popped.
#[derive(Clone)]
pub struct ContextStack {
    top: Arc<Frame>,
}

impl ContextStack {
    /// Create a stack holding only `base`
    pub fn new(base: ContextId) -> Self {
        Self {
            top: Arc::new(Frame {
                context: base,
                data: None,
                depth: 1,
                parent: None,
            }),
        }
    }

    /// Current (top) context
    pub fn current(&self) -> ContextId {
        self.top.context
    }

    /// Captured data of the current context
    pub fn current_data(&self) -> Option<&Captures> {
        self.top.data.as_ref()
    }

    /// Number of entries, always at least 1
    pub fn depth(&self) -> usize {
        self.top.depth
    }

    /// Push a context with optional captured data
    pub fn push(&self, context: ContextId, data: Option<Captures>) -> Self {
        Self {
            top: Arc::new(Frame {
                context,
                data,
                depth: self.top.depth + 1,
                parent: Some(Arc::clone(&self.top)),
            }),
        }
    }

    /// Pop up to `count` entries, keeping the base
    ///
    /// Returns the new stack and whether the count had to be clamped.
    pub fn pop(&self, count: usize) -> (Self, bool) {
        let mut top = &self.top;
        let mut remaining = count;
        while remaining > 0 {
            match &top.parent {
                Some(parent) => top = parent,
                None => break,
            }
            remaining -= 1;
        }
        (
            Self {
                top: Arc::clone(top),
            },
            remaining > 0,
        )
    }

    /// Apply a context switch
    pub fn switch(&self, switcher: &ContextSwitcher, data: Option<&Captures>) -> Self {
        switcher.apply(self, data)
    }

    /// Contexts from the base to the top
    pub fn contexts(&self) -> Vec<ContextId> {
        let mut contexts = Vec::with_capacity(self.depth());
        let mut frame = Some(&self.top);
        while let Some(f) = frame {
            contexts.push(f.context);
            frame = f.parent.as_ref();
        }
        contexts.reverse();
        contexts
    }
}

impl PartialEq for ContextStack {
    fn eq(&self, other: &Self) -> bool {
        let mut a = &self.top;
        let mut b = &other.top;
        loop {
            if Arc::ptr_eq(a, b) {
                return true;
            }
            if a.depth != b.depth || a.context != b.context || a.data != b.data {
                return false;
            }
            match (&a.parent, &b.parent) {
                (Some(pa), Some(pb)) => {
                    a = pa;
                    b = pb;
                }
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl Eq for ContextStack {}

impl fmt::Debug for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.contexts()).finish()
    }
}
