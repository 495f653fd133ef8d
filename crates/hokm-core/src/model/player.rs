use crate::model::hand::Hand;
use crate::model::team::Team;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the four seats. Seats 1 and 3 are partners (Team 1), seats 2 and 4
/// are partners (Team 2). Turn order rotates 1 -> 4 -> 3 -> 2 -> 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::One, Seat::Two, Seat::Three, Seat::Four];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::One),
            1 => Some(Seat::Two),
            2 => Some(Seat::Three),
            3 => Some(Seat::Four),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// The seat that acts after this one.
    pub const fn next(self) -> Seat {
        match self {
            Seat::One => Seat::Four,
            Seat::Four => Seat::Three,
            Seat::Three => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::One => Seat::Three,
            Seat::Three => Seat::One,
            Seat::Two => Seat::Four,
            Seat::Four => Seat::Two,
        }
    }

    pub const fn team(self) -> Team {
        match self {
            Seat::One | Seat::Three => Team::One,
            Seat::Two | Seat::Four => Team::Two,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    seat: Seat,
    hand: Hand,
    is_human: bool,
}

impl Player {
    pub fn new(seat: Seat, is_human: bool) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            is_human,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub(crate) fn set_human(&mut self, is_human: bool) {
        self.is_human = is_human;
    }

    pub fn team(&self) -> Team {
        self.seat.team()
    }
}
