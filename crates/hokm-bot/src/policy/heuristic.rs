use super::{Policy, PolicyContext};
use crate::bot::{BaamPlanner, PlayPlanner, TableView, TrumpPlanner};
use hokm_core::model::card::Card;
use hokm_core::model::hokm::Hokm;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{Level, event};

/// The rule-based policy driving the three non-human seats. Owns its own
/// small RNG so the trump-mode dice roll stays reproducible under a seed.
pub struct HeuristicPolicy {
    rng: SmallRng,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    fn choose_hokm(&mut self, ctx: &PolicyContext<'_>) -> Hokm {
        let hand = ctx.state.hand(ctx.seat);
        let hokm = TrumpPlanner::choose(hand, &mut self.rng);
        event!(
            target: "hokm_bot::hokm",
            Level::INFO,
            seat = %ctx.seat,
            hand_size = hand.len(),
            chosen = %hokm,
        );
        hokm
    }

    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> Option<Card> {
        let Some(view) = TableView::from_state(ctx.seat, ctx.state) else {
            event!(
                target: "hokm_bot::play",
                Level::ERROR,
                seat = %ctx.seat,
                "asked to play before hokm was chosen"
            );
            return None;
        };
        let legal = ctx.state.hand(ctx.seat).legal_moves(view.lead_suit);
        match PlayPlanner::choose(&legal, &view) {
            Some((card, reason)) => {
                log_play(ctx, &legal, card, reason);
                Some(card)
            }
            None => {
                event!(
                    target: "hokm_bot::play",
                    Level::ERROR,
                    seat = %ctx.seat,
                    legal_count = legal.len(),
                    "no playable card"
                );
                None
            }
        }
    }

    fn decide_baam(&mut self, ctx: &PolicyContext<'_>) -> bool {
        let Some(hokm) = ctx.state.hokm() else {
            return false;
        };
        let hand = ctx.state.hand(ctx.seat);
        let accept = BaamPlanner::accept(hand, &hokm);
        event!(
            target: "hokm_bot::baam",
            Level::INFO,
            seat = %ctx.seat,
            hand_size = hand.len(),
            accept,
        );
        accept
    }
}

fn log_play(ctx: &PolicyContext<'_>, legal: &[Card], chosen: Card, reason: &str) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };

    event!(
        target: "hokm_bot::play",
        Level::DEBUG,
        seat = %ctx.seat,
        phase = %ctx.state.phase(),
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        reason,
    );
}
