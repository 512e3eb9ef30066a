// In crates/engine/src/state.rs

/// Progress of a single pipeline run.
///
/// `Start → NewsFetched → NoNews → Done` when no headline survives filtering,
/// otherwise `Start → NewsFetched → SentimentsComputed → PriceFetched → Decided → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Start,
    NewsFetched,
    NoNews,
    SentimentsComputed,
    PriceFetched,
    Decided,
    Done,
}

impl PipelineState {
    /// Whether `next` directly follows `self`. There is no backtracking.
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Start, NewsFetched)
                | (NewsFetched, NoNews)
                | (NewsFetched, SentimentsComputed)
                | (SentimentsComputed, PriceFetched)
                | (PriceFetched, Decided)
                | (NoNews, Done)
                | (Decided, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == PipelineState::Done
    }
}

/// Records the states a run passes through.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateTracker {
    history: Vec<PipelineState>,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self { history: vec![PipelineState::Start] }
    }

    pub(crate) fn current(&self) -> PipelineState {
        self.history.last().copied().unwrap_or_default()
    }

    pub(crate) fn advance(&mut self, next: PipelineState) {
        let from = self.current();
        debug_assert!(from.can_advance_to(next), "illegal transition {from:?} -> {next:?}");
        tracing::debug!(?from, to = ?next, "Pipeline state changed.");
        self.history.push(next);
    }

    pub(crate) fn into_history(self) -> Vec<PipelineState> {
        self.history
    }
}
