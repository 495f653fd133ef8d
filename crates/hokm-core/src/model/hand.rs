use crate::model::card::Card;
use crate::model::suit::Suit;

#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit == suit).count()
    }

    /// The subset of this hand that may legally be played. With no lead suit
    /// the whole hand is legal; otherwise the lead-suit cards if any exist,
    /// else the whole hand.
    pub fn legal_moves(&self, lead_suit: Option<Suit>) -> Vec<Card> {
        let Some(lead) = lead_suit else {
            return self.cards.clone();
        };
        let following: Vec<Card> = self
            .cards
            .iter()
            .copied()
            .filter(|card| card.suit == lead)
            .collect();
        if following.is_empty() {
            self.cards.clone()
        } else {
            following
        }
    }

    /// Sort by position in `suit_order`, then descending natural rank.
    pub fn sort_by_suit_order(&mut self, suit_order: [Suit; 4]) {
        let slot = |suit: Suit| {
            suit_order
                .iter()
                .position(|&s| s == suit)
                .unwrap_or(suit_order.len())
        };
        self.cards.sort_by(|a, b| {
            slot(a.suit)
                .cmp(&slot(b.suit))
                .then(b.rank.natural_value().cmp(&a.rank.natural_value()))
        });
    }
}
