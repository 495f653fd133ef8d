use crate::model::card::Card;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HokmMode {
    /// A trump suit beats everything else; natural rank order.
    Normal,
    /// No trump; rank order fully inverted, Ace lowest.
    Nars,
    /// No trump; rank order inverted except the Ace stays highest.
    AceNars,
    /// No trump; only lead-suit cards count, natural rank order.
    Sar,
}

/// The trump configuration chosen by the ruler, immutable for the round.
/// `suit` is present exactly when the mode is `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hokm {
    suit: Option<Suit>,
    mode: HokmMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HokmError {
    SuitRequired,
    SuitForbidden(HokmMode),
}

impl fmt::Display for HokmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HokmError::SuitRequired => write!(f, "normal hokm requires a trump suit"),
            HokmError::SuitForbidden(mode) => {
                write!(f, "{mode:?} hokm does not take a trump suit")
            }
        }
    }
}

impl std::error::Error for HokmError {}

impl Hokm {
    pub const fn normal(suit: Suit) -> Self {
        Self {
            suit: Some(suit),
            mode: HokmMode::Normal,
        }
    }

    pub const fn nars() -> Self {
        Self {
            suit: None,
            mode: HokmMode::Nars,
        }
    }

    pub const fn ace_nars() -> Self {
        Self {
            suit: None,
            mode: HokmMode::AceNars,
        }
    }

    pub const fn sar() -> Self {
        Self {
            suit: None,
            mode: HokmMode::Sar,
        }
    }

    pub fn new(suit: Option<Suit>, mode: HokmMode) -> Result<Self, HokmError> {
        match (mode, suit) {
            (HokmMode::Normal, Some(suit)) => Ok(Self::normal(suit)),
            (HokmMode::Normal, None) => Err(HokmError::SuitRequired),
            (mode, None) => Ok(Self { suit: None, mode }),
            (mode, Some(_)) => Err(HokmError::SuitForbidden(mode)),
        }
    }

    pub const fn suit(&self) -> Option<Suit> {
        self.suit
    }

    pub const fn mode(&self) -> HokmMode {
        self.mode
    }

    pub fn is_trump(&self, suit: Suit) -> bool {
        matches!(self.mode, HokmMode::Normal) && self.suit == Some(suit)
    }

    /// A card's strength inside one trick. Trump cards (Normal mode only)
    /// score rank + 100 and therefore beat every lead-suit card; lead-suit
    /// cards score their rank number under the mode's rank order; everything
    /// else scores 0. In Sar mode only lead-suit cards ever count.
    pub fn card_value(&self, card: Card, lead_suit: Option<Suit>) -> u16 {
        let rank_value = u16::from(match self.mode {
            HokmMode::Normal | HokmMode::Sar => card.rank.natural_value(),
            HokmMode::Nars => card.rank.inverted_value(),
            HokmMode::AceNars => card.rank.inverted_ace_high_value(),
        });
        let is_lead = lead_suit == Some(card.suit);

        if matches!(self.mode, HokmMode::Sar) {
            return if is_lead { rank_value } else { 0 };
        }
        if self.is_trump(card.suit) {
            rank_value + 100
        } else if is_lead {
            rank_value
        } else {
            0
        }
    }
}

impl fmt::Display for Hokm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mode, self.suit) {
            (HokmMode::Normal, Some(suit)) => write!(f, "{suit}"),
            (HokmMode::Normal, None) => f.write_str("Normal"),
            (HokmMode::Nars, _) => f.write_str("Nars"),
            (HokmMode::AceNars, _) => f.write_str("AceNars"),
            (HokmMode::Sar, _) => f.write_str("Sar"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Hokm, HokmError, HokmMode};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn new_validates_suit_presence() {
        assert!(Hokm::new(Some(Suit::Spades), HokmMode::Normal).is_ok());
        assert_eq!(
            Hokm::new(None, HokmMode::Normal),
            Err(HokmError::SuitRequired)
        );
        assert!(Hokm::new(None, HokmMode::Sar).is_ok());
        assert_eq!(
            Hokm::new(Some(Suit::Hearts), HokmMode::Nars),
            Err(HokmError::SuitForbidden(HokmMode::Nars))
        );
    }

    #[test]
    fn normal_mode_trump_beats_lead_beats_offsuit() {
        let hokm = Hokm::normal(Suit::Spades);
        let lead = Some(Suit::Hearts);
        assert_eq!(hokm.card_value(card(Rank::Ace, Suit::Hearts), lead), 14);
        assert_eq!(hokm.card_value(card(Rank::Ace, Suit::Spades), lead), 114);
        assert_eq!(hokm.card_value(card(Rank::Two, Suit::Spades), lead), 102);
        assert_eq!(hokm.card_value(card(Rank::Ace, Suit::Clubs), lead), 0);
    }

    #[test]
    fn sar_mode_only_lead_suit_counts() {
        let hokm = Hokm::sar();
        let lead = Some(Suit::Clubs);
        assert_eq!(hokm.card_value(card(Rank::King, Suit::Clubs), lead), 13);
        assert_eq!(hokm.card_value(card(Rank::Ace, Suit::Spades), lead), 0);
        assert_eq!(hokm.card_value(card(Rank::Ace, Suit::Hearts), lead), 0);
    }

    #[test]
    fn nars_mode_inverts_rank_order() {
        let hokm = Hokm::nars();
        let lead = Some(Suit::Diamonds);
        let ace = hokm.card_value(card(Rank::Ace, Suit::Diamonds), lead);
        let two = hokm.card_value(card(Rank::Two, Suit::Diamonds), lead);
        assert_eq!(ace, 1);
        assert_eq!(two, 13);
        assert!(two > ace);
    }

    #[test]
    fn ace_nars_king_loses_to_queen_but_ace_wins() {
        let hokm = Hokm::ace_nars();
        let lead = Some(Suit::Hearts);
        let king = hokm.card_value(card(Rank::King, Suit::Hearts), lead);
        let queen = hokm.card_value(card(Rank::Queen, Suit::Hearts), lead);
        let ace = hokm.card_value(card(Rank::Ace, Suit::Hearts), lead);
        assert_eq!(king, 1);
        assert_eq!(queen, 2);
        assert_eq!(ace, 13);
        assert!(king < queen && queen < ace);
    }

    #[test]
    fn no_trump_exists_outside_normal_mode() {
        assert!(!Hokm::sar().is_trump(Suit::Spades));
        assert!(!Hokm::nars().is_trump(Suit::Spades));
        assert!(Hokm::normal(Suit::Spades).is_trump(Suit::Spades));
        assert!(!Hokm::normal(Suit::Spades).is_trump(Suit::Hearts));
    }
}
