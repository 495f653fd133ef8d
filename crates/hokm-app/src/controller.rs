use crate::scheduler::{Pacing, Scheduled, TransitionKind, TransitionQueue};
use hokm_bot::policy::{HeuristicPolicy, Policy, PolicyContext};
use hokm_core::game::phase::GamePhase;
use hokm_core::game::state::GameState;
use hokm_core::model::card::Card;
use hokm_core::model::hokm::{Hokm, HokmMode};
use hokm_core::model::player::Seat;
use hokm_core::model::suit::Suit;
use hokm_core::model::team::TeamScores;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// The orchestrator. Owns the single authoritative `GameState`, answers the
/// presentation layer's actions, and paces the automatic transitions
/// (dealing, AI turns, trick resolution) through a stale-guarded queue.
///
/// Rejected actions never propagate: anything submitted for the wrong phase,
/// the wrong actor or an illegal card is logged and leaves the state
/// untouched.
pub struct GameController {
    state: GameState,
    policy: Box<dyn Policy>,
    queue: TransitionQueue,
    pacing: Pacing,
    generation: u64,
    humans: [bool; 4],
    rng: StdRng,
}

impl GameController {
    /// A controller with the default heuristic policy. `seed` pins both the
    /// deck shuffles and the AI dice for reproducible games.
    pub fn new(humans: [bool; 4], pacing: Pacing, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let policy = Box::new(HeuristicPolicy::with_seed(seed.wrapping_add(0x9e37_79b9)));
        Self::with_policy(policy, humans, pacing, StdRng::seed_from_u64(seed))
    }

    pub fn with_policy(
        policy: Box<dyn Policy>,
        humans: [bool; 4],
        pacing: Pacing,
        mut rng: StdRng,
    ) -> Self {
        let state = GameState::new_game(&mut rng, None, None, humans);
        let mut controller = Self {
            state,
            policy,
            queue: TransitionQueue::new(),
            pacing,
            generation: 0,
            humans,
            rng,
        };
        controller.schedule_next();
        controller
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Start a new game. Everything still pending from the old one is
    /// invalidated: the queue is cleared and the generation bumped, so a
    /// stale transition can never touch the new state.
    pub fn initialize_game(&mut self, carry_over: Option<TeamScores>, forced_dealer: Option<Seat>) {
        self.generation += 1;
        self.queue.clear();
        self.state = GameState::new_game(&mut self.rng, carry_over, forced_dealer, self.humans);
        info!(
            target: "hokm_app::controller",
            generation = self.generation,
            dealer = %self.state.dealer(),
            "new game"
        );
        self.schedule_next();
    }

    /// Valid only during hokm selection; ignored otherwise.
    pub fn submit_trump_choice(&mut self, suit: Option<Suit>, mode: HokmMode) {
        let hokm = match Hokm::new(suit, mode) {
            Ok(hokm) => hokm,
            Err(err) => {
                warn!(target: "hokm_app::controller", %err, "rejected trump choice");
                return;
            }
        };
        match self.state.select_hokm(hokm) {
            Ok(()) => {
                self.queue.clear();
                self.schedule_next();
            }
            Err(err) => warn!(target: "hokm_app::controller", %err, "rejected trump choice"),
        }
    }

    /// Valid only when `seat` is the current player and `card` is legal;
    /// ignored otherwise.
    pub fn submit_play(&mut self, seat: Seat, card: Card) {
        match self.state.play_card(seat, card) {
            Ok(_) => {
                self.queue.clear();
                self.schedule_next();
            }
            Err(err) => {
                warn!(target: "hokm_app::controller", seat = %seat, card = %card, %err, "rejected play");
            }
        }
    }

    /// Valid only while the Baam prompt is open; ignored otherwise.
    pub fn submit_baam_response(&mut self, accept: bool) {
        match self.state.respond_baam(accept) {
            Ok(()) => {
                self.queue.clear();
                self.schedule_next();
            }
            Err(err) => warn!(target: "hokm_app::controller", %err, "rejected baam response"),
        }
    }

    /// Read-only query for highlighting playable cards.
    pub fn legal_moves(&self, seat: Seat) -> Vec<Card> {
        self.state
            .hand(seat)
            .legal_moves(self.state.current_trick().lead_suit())
    }

    /// Advisory pause before the next automatic transition; a presentation
    /// layer sleeps for it, a simulation ignores it.
    pub fn next_delay(&self) -> Option<Duration> {
        self.queue.next_delay()
    }

    /// True when the engine is idle waiting for a human action.
    pub fn awaiting_input(&self) -> bool {
        self.queue.is_empty() && !matches!(self.state.phase(), GamePhase::GameOver)
    }

    /// Fire the next scheduled transition, if any. A transition scheduled
    /// for a superseded game or an already-left phase is dropped silently.
    pub fn tick(&mut self) -> bool {
        let Some(item) = self.queue.pop() else {
            return false;
        };
        if item.generation != self.generation || item.phase != self.state.phase() {
            debug!(
                target: "hokm_app::controller",
                kind = ?item.kind,
                scheduled_phase = %item.phase,
                actual_phase = %self.state.phase(),
                "dropping stale transition"
            );
            return true;
        }
        self.fire(item.kind);
        true
    }

    /// Pump transitions until the engine needs a human or the game is over.
    pub fn run_until_blocked(&mut self) {
        while self.tick() {}
    }

    fn fire(&mut self, kind: TransitionKind) {
        let result = match kind {
            TransitionKind::DealInitial => self.state.deal_initial(),
            TransitionKind::ChooseHokm => {
                let ctx = PolicyContext {
                    seat: self.state.ruler(),
                    state: &self.state,
                };
                let hokm = self.policy.choose_hokm(&ctx);
                self.state.select_hokm(hokm)
            }
            TransitionKind::DealRemaining => self.state.deal_remaining(),
            TransitionKind::AutoPlay => {
                let seat = self.state.current_player();
                let ctx = PolicyContext {
                    seat,
                    state: &self.state,
                };
                match self.policy.choose_play(&ctx) {
                    Some(card) => self.state.play_card(seat, card).map(|_| ()),
                    None => {
                        // Should not happen while legal moves exist; stall
                        // the phase instead of guessing a card.
                        error!(target: "hokm_app::controller", seat = %seat, "policy produced no card, stalling");
                        return;
                    }
                }
            }
            TransitionKind::EvaluateTrick => self.state.evaluate_trick().map(|verdict| {
                info!(target: "hokm_app::controller", verdict = ?verdict, "trick resolved");
            }),
            TransitionKind::DecideBaam => {
                let Some(team) = self.state.round_winner() else {
                    error!(target: "hokm_app::controller", "baam prompt without a round winner, stalling");
                    return;
                };
                let seat = Seat::ALL
                    .iter()
                    .copied()
                    .find(|seat| seat.team() == team)
                    .unwrap_or(Seat::One);
                let ctx = PolicyContext {
                    seat,
                    state: &self.state,
                };
                let accept = self.policy.decide_baam(&ctx);
                self.state.respond_baam(accept)
            }
            TransitionKind::ResolveRoundEnd => self.state.resolve_round_end().map(|_| ()),
            TransitionKind::StartNextRound => {
                let dealer = self.state.next_round_dealer();
                let carry = *self.state.scores();
                self.initialize_game(Some(carry), Some(dealer));
                return;
            }
        };

        match result {
            Ok(()) => self.schedule_next(),
            Err(err) => {
                error!(target: "hokm_app::controller", kind = ?kind, %err, "transition failed, stalling phase");
            }
        }
    }

    /// Queue the automatic follow-up for the current phase, if it has one.
    /// Phases waiting on a human schedule nothing.
    fn schedule_next(&mut self) {
        if !self.queue.is_empty() {
            return;
        }
        let phase = self.state.phase();
        let kind = match phase {
            GamePhase::DealingInitial => Some(TransitionKind::DealInitial),
            GamePhase::HokmSelection => {
                (!self.state.is_human(self.state.ruler())).then_some(TransitionKind::ChooseHokm)
            }
            GamePhase::DealingRemaining => Some(TransitionKind::DealRemaining),
            GamePhase::TrickPlay => (!self.state.is_human(self.state.current_player()))
                .then_some(TransitionKind::AutoPlay),
            GamePhase::TrickEvaluation => Some(TransitionKind::EvaluateTrick),
            GamePhase::BaamPrompt => {
                let winning_team_has_human = self
                    .state
                    .round_winner()
                    .map(|team| {
                        Seat::ALL
                            .iter()
                            .any(|seat| seat.team() == team && self.state.is_human(*seat))
                    })
                    .unwrap_or(false);
                (!winning_team_has_human).then_some(TransitionKind::DecideBaam)
            }
            GamePhase::RoundEnd => Some(TransitionKind::ResolveRoundEnd),
            GamePhase::RoundTransition => Some(TransitionKind::StartNextRound),
            GamePhase::GameOver => None,
        };
        if let Some(kind) = kind {
            self.queue.push(Scheduled {
                kind,
                phase,
                generation: self.generation,
                delay: self.pacing.delay_for(kind),
            });
        }
    }
}
