use crate::bot::TableView;
use hokm_core::model::card::Card;
use hokm_core::model::rank::Rank;
use hokm_core::model::suit::Suit;

/// Card selection as an ordered rule list. Each rule checks its own
/// precondition and either produces a card or passes; the dispatcher tries
/// them in order and tags the choice with the rule that fired.
pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(legal: &[Card], view: &TableView) -> Option<(Card, &'static str)> {
        if legal.is_empty() {
            return None;
        }
        if legal.len() == 1 {
            return Some((legal[0], "forced"));
        }
        if view.trick_size == 0 {
            Self::choose_lead(legal, view)
        } else {
            Self::choose_follow(legal, view)
        }
    }

    fn choose_lead(legal: &[Card], view: &TableView) -> Option<(Card, &'static str)> {
        if let Some(card) = lead_trump_draw(legal, view) {
            return Some((card, "lead_trump_draw"));
        }
        if let Some(card) = lead_offsuit_ace(legal, view) {
            return Some((card, "lead_offsuit_ace"));
        }
        if let Some(card) = lead_guarded_king(legal, view) {
            return Some((card, "lead_guarded_king"));
        }
        if let Some(card) = lead_short_suit(legal, view) {
            return Some((card, "lead_short_suit"));
        }
        lowest_value(legal, view).map(|card| (card, "lead_lowest"))
    }

    fn choose_follow(legal: &[Card], view: &TableView) -> Option<(Card, &'static str)> {
        if view.partner_winning {
            return follow_partner_low(legal, view).map(|card| (card, "partner_winning_low"));
        }
        if view.trick_size == 2 {
            if let Some(card) = third_seat_pressure(legal, view) {
                return Some((card, "third_seat_pressure"));
            }
        }
        if let Some(card) = cheapest_winner(legal, view) {
            return Some((card, "cheapest_winner"));
        }
        lowest_value(legal, view).map(|card| (card, "concede_low"))
    }
}

/// On the ruler's team, pull trumps while plenty are still out, but keep the
/// trump Ace back as a concealed signal.
pub(crate) fn lead_trump_draw(legal: &[Card], view: &TableView) -> Option<Card> {
    let trump = view.hokm.suit()?;
    if !view.on_ruler_team || view.trumps_played >= 5 {
        return None;
    }
    let highest = legal
        .iter()
        .copied()
        .filter(|card| card.suit == trump)
        .max_by_key(|card| card.rank.natural_value())?;
    if highest.rank == Rank::Ace {
        return None;
    }
    Some(highest)
}

/// A side Ace is a safe lead and signals strength to the partner.
pub(crate) fn lead_offsuit_ace(legal: &[Card], view: &TableView) -> Option<Card> {
    legal
        .iter()
        .copied()
        .find(|card| card.rank == Rank::Ace && !view.hokm.is_trump(card.suit))
}

/// A King whose Ace is already gone is now the highest card of its suit.
pub(crate) fn lead_guarded_king(legal: &[Card], view: &TableView) -> Option<Card> {
    legal.iter().copied().find(|card| {
        card.rank == Rank::King
            && !view.hokm.is_trump(card.suit)
            && view.ace_played[card.suit.index()]
    })
}

/// Lead low from the shortest non-trump suit to work toward a void.
pub(crate) fn lead_short_suit(legal: &[Card], view: &TableView) -> Option<Card> {
    let mut shortest: Option<(Suit, usize)> = None;
    for suit in Suit::ALL.iter().copied() {
        if view.hokm.is_trump(suit) {
            continue;
        }
        let count = legal.iter().filter(|card| card.suit == suit).count();
        if count == 0 {
            continue;
        }
        match shortest {
            Some((_, best)) if count >= best => {}
            _ => shortest = Some((suit, count)),
        }
    }
    let (suit, _) = shortest?;
    legal
        .iter()
        .copied()
        .filter(|card| card.suit == suit)
        .min_by_key(|card| card.rank.natural_value())
}

/// Support a winning partner at the lowest possible cost.
pub(crate) fn follow_partner_low(legal: &[Card], view: &TableView) -> Option<Card> {
    if let Some(lead) = view.lead_suit {
        let lowest_of_lead = legal
            .iter()
            .copied()
            .filter(|card| card.suit == lead)
            .min_by_key(|card| card.rank.natural_value());
        if lowest_of_lead.is_some() {
            return lowest_of_lead;
        }
    }
    let lowest_plain = legal
        .iter()
        .copied()
        .filter(|card| !view.hokm.is_trump(card.suit))
        .min_by_key(|card| card.rank.natural_value());
    if lowest_plain.is_some() {
        return lowest_plain;
    }
    lowest_value(legal, view)
}

/// Third to act with the partner not winning: pressure with the highest
/// lead-suit card.
pub(crate) fn third_seat_pressure(legal: &[Card], view: &TableView) -> Option<Card> {
    let lead = view.lead_suit?;
    legal
        .iter()
        .copied()
        .filter(|card| card.suit == lead)
        .max_by_key(|card| card.rank.natural_value())
}

/// Take the trick with the least valuable card that still beats it.
pub(crate) fn cheapest_winner(legal: &[Card], view: &TableView) -> Option<Card> {
    legal
        .iter()
        .copied()
        .filter(|card| view.hokm.card_value(*card, view.lead_suit) > view.best_value)
        .min_by_key(|card| {
            (
                view.hokm.card_value(*card, view.lead_suit),
                card.rank.natural_value(),
            )
        })
}

pub(crate) fn lowest_value(legal: &[Card], view: &TableView) -> Option<Card> {
    legal.iter().copied().min_by_key(|card| {
        (
            view.hokm.card_value(*card, view.lead_suit),
            card.rank.natural_value(),
        )
    })
}
