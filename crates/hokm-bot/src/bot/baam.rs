use hokm_core::model::hand::Hand;
use hokm_core::model::hokm::Hokm;
use hokm_core::model::rank::Rank;

/// Minimum count of controlling cards before an attempt looks safe.
const HIGH_CARD_THRESHOLD: usize = 4;

pub struct BaamPlanner;

impl BaamPlanner {
    /// Accept the attempt only with enough controlling cards in hand: trump
    /// honours (Q, K, A) plus side-suit Aces.
    pub fn accept(hand: &Hand, hokm: &Hokm) -> bool {
        let mut high_cards = 0usize;
        for card in hand.iter() {
            if hokm.is_trump(card.suit) && card.rank.natural_value() >= 12 {
                high_cards += 1;
            }
            if card.rank == Rank::Ace && !hokm.is_trump(card.suit) {
                high_cards += 1;
            }
        }
        high_cards >= HIGH_CARD_THRESHOLD
    }
}
