use hokm_core::model::hand::Hand;
use hokm_core::model::hokm::Hokm;
use hokm_core::model::suit::Suit;

/// Probability that the ruler picks one of the no-trump modes instead of a
/// trump suit.
pub const SPECIAL_MODE_CHANCE: f64 = 0.08;

pub struct TrumpPlanner;

impl TrumpPlanner {
    pub fn choose<R: rand::Rng + ?Sized>(hand: &Hand, rng: &mut R) -> Hokm {
        Self::choose_with_chance(hand, rng, SPECIAL_MODE_CHANCE)
    }

    /// `special_chance` is exposed so tests can pin the dice roll: 0.0 never
    /// picks a special mode, 1.0 always does.
    pub fn choose_with_chance<R: rand::Rng + ?Sized>(
        hand: &Hand,
        rng: &mut R,
        special_chance: f64,
    ) -> Hokm {
        if rng.gen_range(0.0..1.0) < special_chance {
            return match rng.gen_range(0..3) {
                0 => Hokm::nars(),
                1 => Hokm::ace_nars(),
                _ => Hokm::sar(),
            };
        }

        // Suit length is weighted over raw strength; ties keep the earlier
        // suit in the fixed enumeration order.
        let mut best_suit = Suit::Spades;
        let mut best_score = 0u32;
        for suit in Suit::ALL.iter().copied() {
            let count = hand.count_suit(suit) as u32;
            let strength: u32 = hand
                .iter()
                .filter(|card| card.suit == suit)
                .map(|card| u32::from(card.rank.natural_value()))
                .sum();
            let score = count * 3 + strength;
            if score > best_score {
                best_score = score;
                best_suit = suit;
            }
        }
        Hokm::normal(best_suit)
    }
}

#[cfg(test)]
mod tests {
    use super::TrumpPlanner;
    use hokm_core::model::card::Card;
    use hokm_core::model::hand::Hand;
    use hokm_core::model::hokm::HokmMode;
    use hokm_core::model::rank::Rank;
    use hokm_core::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn forced_dice_picks_a_special_mode_without_a_suit() {
        let hand = Hand::with_cards(vec![card(Rank::Ace, Suit::Spades)]);
        let mut rng = SmallRng::seed_from_u64(0);
        let hokm = TrumpPlanner::choose_with_chance(&hand, &mut rng, 1.0);
        assert_ne!(hokm.mode(), HokmMode::Normal);
        assert_eq!(hokm.suit(), None);
    }

    #[test]
    fn suit_length_outweighs_high_cards() {
        // Five small spades (5*3 + 20 = 35) against two top hearts
        // (2*3 + 27 = 33): the long suit wins.
        let hand = Hand::with_cards(vec![
            card(Rank::Two, Suit::Spades),
            card(Rank::Three, Suit::Spades),
            card(Rank::Four, Suit::Spades),
            card(Rank::Five, Suit::Spades),
            card(Rank::Six, Suit::Spades),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::King, Suit::Hearts),
        ]);
        let mut rng = SmallRng::seed_from_u64(0);
        let hokm = TrumpPlanner::choose_with_chance(&hand, &mut rng, 0.0);
        assert_eq!(hokm.mode(), HokmMode::Normal);
        assert_eq!(hokm.suit(), Some(Suit::Spades));
    }

    #[test]
    fn stronger_suit_wins_at_equal_length() {
        let hand = Hand::with_cards(vec![
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Clubs),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::King, Suit::Diamonds),
        ]);
        let mut rng = SmallRng::seed_from_u64(0);
        let hokm = TrumpPlanner::choose_with_chance(&hand, &mut rng, 0.0);
        assert_eq!(hokm.suit(), Some(Suit::Diamonds));
    }

    #[test]
    fn ties_keep_the_earlier_suit_in_fixed_order() {
        // Identical holdings in hearts and clubs; hearts enumerates first.
        let hand = Hand::with_cards(vec![
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Jack, Suit::Hearts),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Jack, Suit::Clubs),
        ]);
        let mut rng = SmallRng::seed_from_u64(0);
        let hokm = TrumpPlanner::choose_with_chance(&hand, &mut rng, 0.0);
        assert_eq!(hokm.suit(), Some(Suit::Hearts));
    }
}
