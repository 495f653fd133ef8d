use core::fmt;
use serde::{Deserialize, Serialize};

/// The phase state machine driving a game. Every reachable phase has a
/// defined successor; `GameOver` is terminal until a new game is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Five cards to each seat, then hokm selection.
    DealingInitial,
    /// The ruler picks the trump configuration.
    HokmSelection,
    /// The rest of the deck goes out and hands are sorted.
    DealingRemaining,
    /// The current player owes a card.
    TrickPlay,
    /// Four cards are down; resolve the trick and score it.
    TrickEvaluation,
    /// A Kot round ended; the winning team may attempt a Baam.
    BaamPrompt,
    /// Round scored; check whether the game is decided.
    RoundEnd,
    /// Compute the next dealer and start a fresh round.
    RoundTransition,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GamePhase::DealingInitial => "dealing-initial",
            GamePhase::HokmSelection => "hokm-selection",
            GamePhase::DealingRemaining => "dealing-remaining",
            GamePhase::TrickPlay => "trick-play",
            GamePhase::TrickEvaluation => "trick-evaluation",
            GamePhase::BaamPrompt => "baam-prompt",
            GamePhase::RoundEnd => "round-end",
            GamePhase::RoundTransition => "round-transition",
            GamePhase::GameOver => "game-over",
        };
        f.write_str(label)
    }
}
