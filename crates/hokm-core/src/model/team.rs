use core::fmt;
use serde::{Deserialize, Serialize};

/// A team's game score must reach this target to win...
pub const GAME_TARGET: u32 = 7;
/// ...with at least this lead over the opponents.
pub const WIN_MARGIN: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    One = 0,
    Two = 1,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::One, Team::Two];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::One => f.write_str("Team 1"),
            Team::Two => f.write_str("Team 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub game_score: u32,
    pub round_tricks_won: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScores {
    sides: [TeamScore; 2],
}

impl TeamScores {
    pub const fn new() -> Self {
        Self {
            sides: [
                TeamScore {
                    game_score: 0,
                    round_tricks_won: 0,
                },
                TeamScore {
                    game_score: 0,
                    round_tricks_won: 0,
                },
            ],
        }
    }

    pub const fn get(&self, team: Team) -> TeamScore {
        self.sides[team.index()]
    }

    pub const fn game_score(&self, team: Team) -> u32 {
        self.sides[team.index()].game_score
    }

    pub const fn round_tricks(&self, team: Team) -> u8 {
        self.sides[team.index()].round_tricks_won
    }

    pub fn record_trick(&mut self, team: Team) {
        self.sides[team.index()].round_tricks_won += 1;
    }

    pub fn add_game_points(&mut self, team: Team, points: u32) {
        self.sides[team.index()].game_score += points;
    }

    pub fn set_round_tricks(&mut self, team: Team, tricks: u8) {
        self.sides[team.index()].round_tricks_won = tricks;
    }

    /// Same game scores, trick counters back to zero (start of a round).
    pub fn reset_round_counts(mut self) -> Self {
        for side in &mut self.sides {
            side.round_tricks_won = 0;
        }
        self
    }

    /// The game is decided once a team reaches the target score with the
    /// required lead over the other.
    pub fn winner_if_decided(&self) -> Option<Team> {
        let one = self.game_score(Team::One);
        let two = self.game_score(Team::Two);
        let gap = one.abs_diff(two);
        if (one >= GAME_TARGET || two >= GAME_TARGET) && gap >= WIN_MARGIN {
            Some(if one > two { Team::One } else { Team::Two })
        } else {
            None
        }
    }
}
