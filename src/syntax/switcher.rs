//! Context switch operations
//!
//! Grammars describe transitions as text: `#stay`, `#pop#pop`,
//! `#pop!Comment` or a bare context name. The text is parsed once into a
//! `SwitchOp` and resolved once against the grammar's context table into
//! a `ContextSwitcher`, which is all the driver ever touches.

use std::collections::HashMap;
use std::fmt;

use log::warn;

use super::context::ContextId;
use super::stack::{Captures, ContextStack};
use crate::error::GrammarError;

/// A parsed, not yet resolved, context operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwitchOp {
    pub pops: usize,
    pub target: Option<String>,
}

impl SwitchOp {
    /// Parse an operation string
    pub fn parse(operation: &str) -> Result<Self, GrammarError> {
        let invalid = || GrammarError::InvalidContextOperation {
            operation: operation.to_string(),
        };

        let mut rest = operation.trim();
        let mut pops = 0;
        while let Some(tail) = rest.strip_prefix("#pop") {
            pops += 1;
            rest = tail;
        }

        let target = if rest.is_empty() {
            None
        } else if rest == "#stay" {
            if pops > 0 {
                warn!("Invalid context operation '{}', #stay after #pop", operation);
            }
            None
        } else if let Some(name) = rest.strip_prefix('!') {
            if pops == 0 || name.is_empty() {
                return Err(invalid());
            }
            Some(name.to_string())
        } else if pops > 0 || rest.starts_with("#stay") || rest.starts_with("#pop") {
            return Err(invalid());
        } else {
            Some(rest.to_string())
        };

        Ok(Self { pops, target })
    }

    /// Resolve the target name against the grammar's context table
    ///
    /// `owner` names the context the operation belongs to, for diagnostics.
    pub fn resolve(
        &self,
        owner: &str,
        table: &HashMap<String, ContextId>,
        dynamic: &[bool],
    ) -> Result<ContextSwitcher, GrammarError> {
        let target = match &self.target {
            None => None,
            Some(name) => {
                let id = table.get(name).copied().ok_or_else(|| {
                    GrammarError::UnresolvedContextReference {
                        context: owner.to_string(),
                        reference: name.clone(),
                    }
                })?;
                Some(Target {
                    id,
                    name: name.clone(),
                    dynamic: dynamic.get(id.index()).copied().unwrap_or(false),
                })
            }
        };
        Ok(ContextSwitcher {
            pops: self.pops,
            target,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    id: ContextId,
    name: String,
    dynamic: bool,
}

/// A resolved context transition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextSwitcher {
    pops: usize,
    target: Option<Target>,
}

impl ContextSwitcher {
    /// The `#stay` operation
    pub fn stay() -> Self {
        Self::default()
    }

    /// Check whether this switcher never changes the stack
    pub fn is_stay(&self) -> bool {
        self.pops == 0 && self.target.is_none()
    }

    pub fn pops(&self) -> usize {
        self.pops
    }

    /// Context pushed after popping, if any
    pub fn target(&self) -> Option<ContextId> {
        self.target.as_ref().map(|t| t.id)
    }

    /// Check whether the pushed context keeps captured data
    pub fn pushes_dynamic(&self) -> bool {
        self.target.as_ref().map_or(false, |t| t.dynamic)
    }

    /// Apply to a stack, producing the next stack
    ///
    /// Captured data is only kept when the pushed context is dynamic.
    pub fn apply(&self, stack: &ContextStack, data: Option<&Captures>) -> ContextStack {
        if self.is_stay() {
            return stack.clone();
        }

        let mut next = stack.clone();
        if self.pops > 0 {
            let (popped, clamped) = stack.pop(self.pops);
            if clamped {
                warn!(
                    "#pop value is too big: stack depth {}, pops {}",
                    stack.depth(),
                    self.pops
                );
            }
            next = popped;
        }

        if let Some(target) = &self.target {
            let data = if target.dynamic { data.cloned() } else { None };
            next = next.push(target.id, data);
        }

        next
    }
}

impl fmt::Display for ContextSwitcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stay() {
            return write!(f, "#stay");
        }
        for _ in 0..self.pops {
            write!(f, "#pop")?;
        }
        match &self.target {
            Some(target) if self.pops > 0 => write!(f, "!{}", target.name),
            Some(target) => write!(f, "{}", target.name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> (HashMap<String, ContextId>, Vec<bool>) {
        let mut table = HashMap::new();
        table.insert("Normal".to_string(), ContextId(0));
        table.insert("Comment".to_string(), ContextId(1));
        table.insert("HereDoc".to_string(), ContextId(2));
        (table, vec![false, false, true])
    }

    fn resolve(operation: &str) -> ContextSwitcher {
        let (table, dynamic) = table();
        SwitchOp::parse(operation)
            .unwrap()
            .resolve("Test", &table, &dynamic)
            .unwrap()
    }

    #[test]
    fn test_parse_operations() {
        assert_eq!(SwitchOp::parse("#stay").unwrap(), SwitchOp::default());
        assert_eq!(SwitchOp::parse("").unwrap(), SwitchOp::default());
        assert_eq!(
            SwitchOp::parse("#pop#pop").unwrap(),
            SwitchOp { pops: 2, target: None }
        );
        assert_eq!(
            SwitchOp::parse("#pop!Comment").unwrap(),
            SwitchOp { pops: 1, target: Some("Comment".to_string()) }
        );
        assert_eq!(
            SwitchOp::parse("Comment").unwrap(),
            SwitchOp { pops: 0, target: Some("Comment".to_string()) }
        );
    }

    #[test]
    fn test_pop_stay_keeps_pops() {
        assert_eq!(
            SwitchOp::parse("#pop#pop#stay").unwrap(),
            SwitchOp { pops: 2, target: None }
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(SwitchOp::parse("#pop!").is_err());
        assert!(SwitchOp::parse("!Comment").is_err());
        assert!(SwitchOp::parse("#popComment").is_err());
    }

    #[test]
    fn test_resolve_unknown_context() {
        let (table, dynamic) = table();
        let err = SwitchOp::parse("#pop!Missing")
            .unwrap()
            .resolve("Normal", &table, &dynamic)
            .unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UnresolvedContextReference { ref context, ref reference }
                if context == "Normal" && reference == "Missing"
        ));
    }

    #[test]
    fn test_apply_push_and_pop() {
        let stack = ContextStack::new(ContextId(0));
        let pushed = resolve("Comment").apply(&stack, None);
        assert_eq!(pushed.contexts(), vec![ContextId(0), ContextId(1)]);

        let swapped = resolve("#pop!HereDoc").apply(&pushed, None);
        assert_eq!(swapped.contexts(), vec![ContextId(0), ContextId(2)]);
    }

    #[test]
    fn test_apply_clamps_pops() {
        let stack = ContextStack::new(ContextId(0)).push(ContextId(1), None);
        let popped = resolve("#pop#pop#pop").apply(&stack, None);
        assert_eq!(popped.depth(), 1);
        assert_eq!(popped.current(), ContextId(0));
    }

    #[test]
    fn test_apply_stay_is_identity() {
        let stack = ContextStack::new(ContextId(0)).push(ContextId(1), None);
        assert_eq!(resolve("#stay").apply(&stack, None), stack);
    }

    #[test]
    fn test_captures_only_kept_for_dynamic_target() {
        let data: Captures = vec!["<<EOF".to_string(), "EOF".to_string()].into();
        let stack = ContextStack::new(ContextId(0));

        let comment = resolve("Comment").apply(&stack, Some(&data));
        assert!(comment.current_data().is_none());

        let heredoc = resolve("HereDoc").apply(&stack, Some(&data));
        assert_eq!(heredoc.current_data(), Some(&data));
    }

    #[test]
    fn test_display() {
        assert_eq!(resolve("#stay").to_string(), "#stay");
        assert_eq!(resolve("#pop#pop").to_string(), "#pop#pop");
        assert_eq!(resolve("#pop!Comment").to_string(), "#pop!Comment");
        assert_eq!(resolve("Comment").to_string(), "Comment");
    }
}
