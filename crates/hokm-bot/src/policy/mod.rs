mod heuristic;

pub use heuristic::HeuristicPolicy;

use hokm_core::game::state::GameState;
use hokm_core::model::card::Card;
use hokm_core::model::hokm::Hokm;
use hokm_core::model::player::Seat;

/// Context handed to a policy for one decision: the acting seat plus a
/// read-only view of the authoritative state.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub state: &'a GameState,
}

/// The three decisions a non-human seat has to make.
pub trait Policy: Send {
    /// Choose the trump configuration (the acting seat is the ruler).
    fn choose_hokm(&mut self, ctx: &PolicyContext<'_>) -> Hokm;

    /// Choose a card to play. `None` means the policy could not produce a
    /// card; the orchestrator treats that as an internal defect and stalls
    /// rather than guessing.
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Option<Card>;

    /// Answer the Baam prompt for the acting seat's team.
    fn decide_baam(&mut self, ctx: &PolicyContext<'_>) -> bool;
}
