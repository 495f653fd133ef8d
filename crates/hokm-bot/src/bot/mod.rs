mod baam;
mod hokm;
mod play;

pub use baam::BaamPlanner;
pub use hokm::{SPECIAL_MODE_CHANCE, TrumpPlanner};
pub use play::PlayPlanner;

use hokm_core::game::state::GameState;
use hokm_core::model::hokm::Hokm;
use hokm_core::model::player::Seat;
use hokm_core::model::rank::Rank;
use hokm_core::model::suit::Suit;

/// Everything a seat may legitimately see when deciding a card: its own
/// position relative to the ruler, the trick on the table and the public
/// played-card history. Never another seat's hand.
#[derive(Debug, Clone, Copy)]
pub struct TableView {
    pub hokm: Hokm,
    pub lead_suit: Option<Suit>,
    pub on_ruler_team: bool,
    /// Trump cards seen in the played-card history this round.
    pub trumps_played: usize,
    /// Per suit index: has that suit's Ace been played already?
    pub ace_played: [bool; 4],
    /// Cards already down in the current trick.
    pub trick_size: usize,
    pub partner_winning: bool,
    /// Value of the play currently holding the trick (0 when leading).
    pub best_value: u16,
}

impl TableView {
    /// Returns `None` before hokm has been chosen.
    pub fn from_state(seat: Seat, state: &GameState) -> Option<Self> {
        let hokm = state.hokm()?;
        let trick = state.current_trick();
        let lead_suit = trick.lead_suit();
        let best = trick.winning_play(&hokm);

        let mut ace_played = [false; 4];
        let mut trumps_played = 0usize;
        for card in state.played_cards() {
            if card.rank == Rank::Ace {
                ace_played[card.suit.index()] = true;
            }
            if hokm.is_trump(card.suit) {
                trumps_played += 1;
            }
        }

        Some(Self {
            hokm,
            lead_suit,
            on_ruler_team: seat.team() == state.ruler().team(),
            trumps_played,
            ace_played,
            trick_size: trick.plays().len(),
            partner_winning: best.map(|play| play.seat == seat.partner()).unwrap_or(false),
            best_value: best
                .map(|play| hokm.card_value(play.card, lead_suit))
                .unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TableView;
    use hokm_core::game::state::GameState;
    use hokm_core::model::card::Card;
    use hokm_core::model::hokm::Hokm;
    use hokm_core::model::player::Seat;
    use hokm_core::model::rank::Rank;
    use hokm_core::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn view_tracks_played_aces_and_trumps() {
        let mut state = GameState::from_hands(
            [
                vec![card(Rank::Ace, Suit::Hearts), card(Rank::Two, Suit::Clubs)],
                vec![card(Rank::Three, Suit::Hearts), card(Rank::Three, Suit::Clubs)],
                vec![card(Rank::Four, Suit::Hearts), card(Rank::Four, Suit::Clubs)],
                vec![card(Rank::Two, Suit::Spades), card(Rank::Five, Suit::Clubs)],
            ],
            Hokm::normal(Suit::Spades),
            Seat::Two,
            Seat::One,
        );

        state.play_card(Seat::One, card(Rank::Ace, Suit::Hearts)).unwrap();
        state.play_card(Seat::Four, card(Rank::Two, Suit::Spades)).unwrap();
        state.play_card(Seat::Three, card(Rank::Four, Suit::Hearts)).unwrap();
        state.play_card(Seat::Two, card(Rank::Three, Suit::Hearts)).unwrap();
        state.evaluate_trick().unwrap();

        let view = TableView::from_state(Seat::One, &state).unwrap();
        assert!(view.ace_played[Suit::Hearts.index()]);
        assert!(!view.ace_played[Suit::Spades.index()]);
        assert_eq!(view.trumps_played, 1);
        assert_eq!(view.trick_size, 0);
        assert_eq!(view.best_value, 0);
    }

    #[test]
    fn view_sees_partner_holding_the_trick() {
        let mut state = GameState::from_hands(
            [
                vec![card(Rank::Ace, Suit::Hearts)],
                vec![card(Rank::Three, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Hearts)],
                vec![card(Rank::Two, Suit::Hearts)],
            ],
            Hokm::normal(Suit::Spades),
            Seat::Two,
            Seat::One,
        );

        state.play_card(Seat::One, card(Rank::Ace, Suit::Hearts)).unwrap();
        state.play_card(Seat::Four, card(Rank::Two, Suit::Hearts)).unwrap();

        // Seat Three is seat One's partner; One is winning the trick.
        let view = TableView::from_state(Seat::Three, &state).unwrap();
        assert!(view.partner_winning);
        assert_eq!(view.best_value, 14);
        assert_eq!(view.trick_size, 2);

        // Seat Two sees an opponent winning.
        let view = TableView::from_state(Seat::Two, &state).unwrap();
        assert!(!view.partner_winning);
    }

    #[test]
    fn view_requires_a_chosen_hokm() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::new_game(&mut rng, None, Some(Seat::One), [false; 4]);
        assert!(TableView::from_state(Seat::One, &state).is_none());
    }
}
