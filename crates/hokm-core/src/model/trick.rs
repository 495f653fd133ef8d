use crate::model::card::Card;
use crate::model::hokm::Hokm;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Trick {
    starter: Seat,
    plays: Vec<Play>,
    winner: Option<Seat>,
}

#[derive(Debug, Clone, Copy)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyPlayed(Seat),
    Incomplete,
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
            TrickError::Incomplete => write!(f, "trick is not complete"),
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(starter: Seat) -> Self {
        Self {
            starter,
            plays: Vec::with_capacity(4),
            winner: None,
        }
    }

    pub fn starter(&self) -> Seat {
        self.starter
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.starter)
    }

    pub fn push(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }
        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// The play currently holding the trick. The first card is always of the
    /// lead suit and therefore has positive value, so the maximum is unique.
    pub fn winning_play(&self, hokm: &Hokm) -> Option<&Play> {
        let lead = self.lead_suit();
        let mut best: Option<(&Play, u16)> = None;
        for play in &self.plays {
            let value = hokm.card_value(play.card, lead);
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((play, value)),
            }
        }
        best.map(|(play, _)| play)
    }

    /// Determine and record the winner of a complete trick.
    pub fn resolve(&mut self, hokm: &Hokm) -> Result<Seat, TrickError> {
        if !self.is_complete() {
            return Err(TrickError::Incomplete);
        }
        let winner = self
            .winning_play(hokm)
            .ok_or(TrickError::Incomplete)?
            .seat;
        self.winner = Some(winner);
        Ok(winner)
    }
}
