use hokm_core::game::phase::GamePhase;
use std::collections::VecDeque;
use std::time::Duration;

/// The automatic transitions the orchestrator paces between player inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    DealInitial,
    ChooseHokm,
    DealRemaining,
    AutoPlay,
    EvaluateTrick,
    DecideBaam,
    ResolveRoundEnd,
    StartNextRound,
}

/// A transition queued for later. It carries the phase it was issued for and
/// the generation of the game it belongs to; both are re-checked when it
/// fires, so anything superseded by a new game or a human action dies as a
/// silent no-op.
#[derive(Debug, Clone, Copy)]
pub struct Scheduled {
    pub kind: TransitionKind,
    pub phase: GamePhase,
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Default)]
pub struct TransitionQueue {
    items: VecDeque<Scheduled>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, item: Scheduled) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<Scheduled> {
        self.items.pop_front()
    }

    /// Advisory delay of the next pending transition, for callers that pace
    /// gameplay. A simulation ignores it entirely.
    pub fn next_delay(&self) -> Option<Duration> {
        self.items.front().map(|item| item.delay)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop everything pending. Called when a new game supersedes the old
    /// one.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Per-transition pacing. `Interactive` mirrors a table being watched;
/// `Instant` collapses every pause for headless simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Interactive,
    Instant,
}

impl Pacing {
    pub fn delay_for(self, kind: TransitionKind) -> Duration {
        match self {
            Pacing::Instant => Duration::ZERO,
            Pacing::Interactive => {
                let millis = match kind {
                    TransitionKind::DealInitial => 1_000,
                    TransitionKind::ChooseHokm => 2_000,
                    TransitionKind::DealRemaining => 1_500,
                    TransitionKind::AutoPlay => 1_500,
                    TransitionKind::EvaluateTrick => 2_000,
                    TransitionKind::DecideBaam => 2_000,
                    TransitionKind::ResolveRoundEnd => 3_000,
                    TransitionKind::StartNextRound => 500,
                };
                Duration::from_millis(millis)
            }
        }
    }
}
