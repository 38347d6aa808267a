//! Lifecycle of a pipeline run.

use std::fmt;

/// State of a single pipeline run.
///
/// Runs move forward through `Init → Loaded → Merged → Validated →
/// Persisted → Done`. Any non-terminal state may move to `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Init,
    Loaded,
    Merged,
    Validated,
    Persisted,
    Done,
    Failed,
}

impl PipelineState {
    /// The state a successful stage advances to, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            PipelineState::Init => Some(PipelineState::Loaded),
            PipelineState::Loaded => Some(PipelineState::Merged),
            PipelineState::Merged => Some(PipelineState::Validated),
            PipelineState::Validated => Some(PipelineState::Persisted),
            PipelineState::Persisted => Some(PipelineState::Done),
            PipelineState::Done | PipelineState::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Whether moving from `self` to `target` is a legal transition.
    pub fn can_transition_to(self, target: Self) -> bool {
        if target == PipelineState::Failed {
            return !self.is_terminal();
        }
        self.next() == Some(target)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Loaded => "loaded",
            PipelineState::Merged => "merged",
            PipelineState::Validated => "validated",
            PipelineState::Persisted => "persisted",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_ends_in_done() {
        let mut state = PipelineState::Init;
        let mut visited = vec![state];
        while let Some(next) = state.next() {
            state = next;
            visited.push(state);
        }
        assert_eq!(state, PipelineState::Done);
        assert_eq!(visited.len(), 6);
    }

    #[test]
    fn failed_reachable_only_from_non_terminal() {
        assert!(PipelineState::Merged.can_transition_to(PipelineState::Failed));
        assert!(!PipelineState::Done.can_transition_to(PipelineState::Failed));
        assert!(!PipelineState::Failed.can_transition_to(PipelineState::Failed));
    }

    #[test]
    fn stages_cannot_be_skipped() {
        assert!(!PipelineState::Loaded.can_transition_to(PipelineState::Validated));
        assert!(PipelineState::Loaded.can_transition_to(PipelineState::Merged));
    }
}
