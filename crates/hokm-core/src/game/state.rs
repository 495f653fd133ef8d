use crate::game::phase::GamePhase;
use crate::game::voids::VoidMemory;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::hokm::Hokm;
use crate::model::player::{Player, Seat};
use crate::model::suit::{Suit, display_order};
use crate::model::team::{Team, TeamScores};
use crate::model::trick::{Trick, TrickError};
use std::fmt;

/// Cards dealt before hokm selection: five per seat.
pub const INITIAL_DEAL: usize = 20;
/// Tricks in a full round.
pub const TRICKS_PER_ROUND: u8 = 13;
/// Tricks a team needs to take the round.
pub const ROUND_TARGET: u8 = 7;

const KOT_POINTS_RULER: u32 = 2;
const KOT_POINTS_DEFENDER: u32 = 3;
const PLAIN_ROUND_POINTS: u32 = 1;

/// The single authoritative game state. Owned exclusively by the
/// orchestrator; every mutation goes through a phase-guarded transition
/// method that either applies fully or leaves the state untouched.
#[derive(Debug, Clone)]
pub struct GameState {
    deck: Deck,
    players: [Player; 4],
    phase: GamePhase,
    dealer: Seat,
    ruler: Seat,
    current_player: Seat,
    hokm: Option<Hokm>,
    current_trick: Trick,
    trick_history: Vec<Trick>,
    scores: TeamScores,
    voids: VoidMemory,
    played_cards: Vec<Card>,
    message: String,
    round_winner: Option<Team>,
    round_points: u32,
    game_winner: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Phase {
        expected: GamePhase,
        actual: GamePhase,
    },
    OutOfTurn {
        expected: Seat,
        actual: Seat,
    },
    CardNotInHand(Card),
    MustFollowSuit(Suit),
    HokmNotChosen,
    DeckExhausted,
    NoPendingBaam,
    Trick(TrickError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Phase { expected, actual } => {
                write!(f, "action requires phase {expected} but state is {actual}")
            }
            ActionError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to act but got {actual}")
            }
            ActionError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            ActionError::MustFollowSuit(suit) => write!(f, "must follow the {suit} lead"),
            ActionError::HokmNotChosen => write!(f, "hokm has not been chosen"),
            ActionError::DeckExhausted => write!(f, "deck ran out of cards while dealing"),
            ActionError::NoPendingBaam => write!(f, "no baam negotiation is pending"),
            ActionError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<TrickError> for ActionError {
    fn from(value: TrickError) -> Self {
        ActionError::Trick(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { next: Seat },
    TrickComplete,
}

/// What a resolved trick meant for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickVerdict {
    /// Play continues; the winner leads the next trick.
    Continued { winner: Seat },
    /// Plain round win, one point applied.
    RoundWon { team: Team, points: u32 },
    /// Kot detected; points are pending the Baam negotiation.
    KotPending { team: Team, points: u32 },
    /// The attempting team swept all thirteen tricks; game over.
    BaamSucceeded { team: Team },
    /// The other team took a trick during the attempt; the original Kot
    /// points still go to the attempting team.
    BaamFailed { team: Team, points: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    GameOver(Team),
    NextRound { dealer: Seat },
}

impl GameState {
    /// Start a fresh game: shuffled deck, random dealer unless forced, game
    /// scores carried over if given (trick counters always reset).
    pub fn new_game<R: rand::Rng + ?Sized>(
        rng: &mut R,
        carry_over: Option<TeamScores>,
        forced_dealer: Option<Seat>,
        humans: [bool; 4],
    ) -> Self {
        let dealer = forced_dealer.unwrap_or_else(|| {
            Seat::from_index(rng.gen_range(0..4)).unwrap_or(Seat::One)
        });
        let ruler = dealer.next();
        let players = [
            Player::new(Seat::One, humans[0]),
            Player::new(Seat::Two, humans[1]),
            Player::new(Seat::Three, humans[2]),
            Player::new(Seat::Four, humans[3]),
        ];

        Self {
            deck: Deck::shuffled(rng),
            players,
            phase: GamePhase::DealingInitial,
            dealer,
            ruler,
            current_player: ruler,
            hokm: None,
            current_trick: Trick::new(ruler),
            trick_history: Vec::new(),
            scores: carry_over
                .map(TeamScores::reset_round_counts)
                .unwrap_or_default(),
            voids: VoidMemory::new(),
            played_cards: Vec::new(),
            message: "Dealing cards...".to_string(),
            round_winner: None,
            round_points: 0,
            game_winner: None,
        }
    }

    /// Scripted mid-round state for tests and tooling: given hands, hokm
    /// already chosen, play in progress with `leader` to act. All seats are
    /// non-human.
    pub fn from_hands(hands: [Vec<Card>; 4], hokm: Hokm, dealer: Seat, leader: Seat) -> Self {
        let mut players = [
            Player::new(Seat::One, false),
            Player::new(Seat::Two, false),
            Player::new(Seat::Three, false),
            Player::new(Seat::Four, false),
        ];
        for (player, cards) in players.iter_mut().zip(hands) {
            *player.hand_mut() = Hand::with_cards(cards);
        }

        Self {
            deck: Deck::empty(),
            players,
            phase: GamePhase::TrickPlay,
            dealer,
            ruler: dealer.next(),
            current_player: leader,
            hokm: Some(hokm),
            current_trick: Trick::new(leader),
            trick_history: Vec::new(),
            scores: TeamScores::new(),
            voids: VoidMemory::new(),
            played_cards: Vec::new(),
            message: String::new(),
            round_winner: None,
            round_points: 0,
            game_winner: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn ruler(&self) -> Seat {
        self.ruler
    }

    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    pub fn hokm(&self) -> Option<Hokm> {
        self.hokm
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn scores(&self) -> &TeamScores {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut TeamScores {
        &mut self.scores
    }

    pub fn voids(&self) -> &VoidMemory {
        &self.voids
    }

    pub fn played_cards(&self) -> &[Card] {
        &self.played_cards
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn round_winner(&self) -> Option<Team> {
        self.round_winner
    }

    pub fn round_points(&self) -> u32 {
        self.round_points
    }

    pub fn game_winner(&self) -> Option<Team> {
        self.game_winner
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        self.players[seat.index()].hand()
    }

    pub fn is_human(&self, seat: Seat) -> bool {
        self.players[seat.index()].is_human()
    }

    pub fn set_human(&mut self, seat: Seat, is_human: bool) {
        self.players[seat.index()].set_human(is_human);
    }

    /// A Baam attempt is running once the prompt was accepted and play has
    /// resumed with the round winner already recorded.
    pub fn baam_attempt_active(&self) -> bool {
        self.round_winner.is_some() && matches!(self.phase, GamePhase::TrickPlay)
    }

    /// Every card the engine tracks: deck remainder, hands, the trick on the
    /// table and the trick history. Must equal 52 at every phase boundary of
    /// a fully dealt game.
    pub fn card_census(&self) -> usize {
        let in_hands: usize = self.players.iter().map(|p| p.hand().len()).sum();
        let in_history: usize = self.trick_history.iter().map(|t| t.plays().len()).sum();
        self.deck.len() + in_hands + self.current_trick.plays().len() + in_history
    }

    fn require_phase(&self, expected: GamePhase) -> Result<(), ActionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ActionError::Phase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Deal five cards to each seat, one at a time, starting at the seat
    /// after the dealer.
    pub fn deal_initial(&mut self) -> Result<(), ActionError> {
        self.require_phase(GamePhase::DealingInitial)?;

        let mut seat = self.dealer;
        for _ in 0..INITIAL_DEAL {
            seat = seat.next();
            let card = self.deck.draw().ok_or(ActionError::DeckExhausted)?;
            self.players[seat.index()].hand_mut().add(card);
        }
        for player in &mut self.players {
            player.hand_mut().sort_by_suit_order(Suit::ALL);
        }

        self.phase = GamePhase::HokmSelection;
        self.message = format!("{} to choose hokm.", self.ruler);
        Ok(())
    }

    pub fn select_hokm(&mut self, hokm: Hokm) -> Result<(), ActionError> {
        self.require_phase(GamePhase::HokmSelection)?;
        self.hokm = Some(hokm);
        self.phase = GamePhase::DealingRemaining;
        self.message = format!("Hokm is {hokm}. Dealing the rest...");
        Ok(())
    }

    /// Deal the rest of the deck, sort every hand around the trump suit and
    /// hand the lead to the ruler.
    pub fn deal_remaining(&mut self) -> Result<(), ActionError> {
        self.require_phase(GamePhase::DealingRemaining)?;
        let hokm = self.hokm.ok_or(ActionError::HokmNotChosen)?;

        let mut seat = self.dealer;
        while let Some(card) = self.deck.draw() {
            seat = seat.next();
            self.players[seat.index()].hand_mut().add(card);
        }
        let order = display_order(hokm.suit());
        for player in &mut self.players {
            player.hand_mut().sort_by_suit_order(order);
        }

        self.phase = GamePhase::TrickPlay;
        self.current_player = self.ruler;
        self.current_trick = Trick::new(self.ruler);
        self.message = format!("Play begins. {} leads.", self.ruler);
        Ok(())
    }

    /// Play one card for the current player. The card moves from the hand
    /// into the trick; a failure to follow the lead marks the seat void.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, ActionError> {
        self.require_phase(GamePhase::TrickPlay)?;
        if seat != self.current_player {
            return Err(ActionError::OutOfTurn {
                expected: self.current_player,
                actual: seat,
            });
        }
        if !self.players[seat.index()].hand().contains(card) {
            return Err(ActionError::CardNotInHand(card));
        }
        let lead = self.current_trick.lead_suit();
        if !self.players[seat.index()].hand().legal_moves(lead).contains(&card) {
            // legal_moves only shrinks when the lead suit is held.
            let lead = lead.ok_or(ActionError::CardNotInHand(card))?;
            return Err(ActionError::MustFollowSuit(lead));
        }

        self.current_trick.push(seat, card)?;
        self.players[seat.index()].hand_mut().remove(card);
        if let Some(lead) = lead {
            if card.suit != lead {
                self.voids.mark(seat, lead);
            }
        }
        self.played_cards.push(card);

        if self.current_trick.is_complete() {
            self.phase = GamePhase::TrickEvaluation;
            self.message = "Resolving the trick...".to_string();
            Ok(PlayOutcome::TrickComplete)
        } else {
            self.current_player = seat.next();
            self.message = format!("{} to play.", self.current_player);
            Ok(PlayOutcome::Played {
                next: self.current_player,
            })
        }
    }

    /// Resolve the completed trick and apply the round/game scoring rules.
    pub fn evaluate_trick(&mut self) -> Result<TrickVerdict, ActionError> {
        self.require_phase(GamePhase::TrickEvaluation)?;
        let hokm = self.hokm.ok_or(ActionError::HokmNotChosen)?;

        let winner = self.current_trick.resolve(&hokm)?;
        let winning_team = winner.team();
        self.scores.record_trick(winning_team);

        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        self.trick_history.push(finished);
        self.current_player = winner;

        // An active Baam attempt suspends normal round scoring: the attempt
        // either sweeps all thirteen tricks or dies with the first trick the
        // defenders take, and the original Kot points stand either way.
        if let Some(attacker) = self.round_winner {
            if winning_team != attacker {
                self.scores.add_game_points(attacker, self.round_points);
                self.phase = GamePhase::RoundEnd;
                self.message = format!("The Baam attempt failed. {attacker} keeps the Kot.");
                return Ok(TrickVerdict::BaamFailed {
                    team: attacker,
                    points: self.round_points,
                });
            }
            if self.scores.round_tricks(attacker) == TRICKS_PER_ROUND {
                self.game_winner = Some(attacker);
                self.phase = GamePhase::GameOver;
                self.message = format!("Baam! {attacker} wins the game outright.");
                return Ok(TrickVerdict::BaamSucceeded { team: attacker });
            }
            self.phase = GamePhase::TrickPlay;
            self.message = format!("{winner} takes the trick and leads.");
            return Ok(TrickVerdict::Continued { winner });
        }

        if self.scores.round_tricks(winning_team) >= ROUND_TARGET {
            let loser = winning_team.opponent();
            if self.scores.round_tricks(loser) == 0 {
                let points = if self.ruler.team() == winning_team {
                    KOT_POINTS_RULER
                } else {
                    KOT_POINTS_DEFENDER
                };
                self.round_winner = Some(winning_team);
                self.round_points = points;
                self.phase = GamePhase::BaamPrompt;
                self.message = format!("Kot! Does {winning_team} go for the Baam?");
                return Ok(TrickVerdict::KotPending {
                    team: winning_team,
                    points,
                });
            }
            self.round_winner = Some(winning_team);
            self.round_points = PLAIN_ROUND_POINTS;
            self.scores.add_game_points(winning_team, PLAIN_ROUND_POINTS);
            self.phase = GamePhase::RoundEnd;
            self.message = format!("{winning_team} takes the round.");
            return Ok(TrickVerdict::RoundWon {
                team: winning_team,
                points: PLAIN_ROUND_POINTS,
            });
        }

        self.phase = GamePhase::TrickPlay;
        self.message = format!("{winner} takes the trick and leads.");
        Ok(TrickVerdict::Continued { winner })
    }

    /// Answer the Baam prompt for the round-winning team.
    pub fn respond_baam(&mut self, accept: bool) -> Result<(), ActionError> {
        self.require_phase(GamePhase::BaamPrompt)?;
        let team = self.round_winner.ok_or(ActionError::NoPendingBaam)?;

        if accept {
            self.phase = GamePhase::TrickPlay;
            self.message = format!("{team} goes for the Baam! They must take every trick.");
        } else {
            self.scores.add_game_points(team, self.round_points);
            self.phase = GamePhase::RoundEnd;
            self.message = format!(
                "{team} settles for the Kot: {} points.",
                self.round_points
            );
        }
        Ok(())
    }

    /// Decide whether the game is over or another round begins.
    pub fn resolve_round_end(&mut self) -> Result<RoundOutcome, ActionError> {
        self.require_phase(GamePhase::RoundEnd)?;

        if let Some(team) = self.scores.winner_if_decided() {
            self.game_winner = Some(team);
            self.phase = GamePhase::GameOver;
            self.message = format!("{team} wins the game!");
            Ok(RoundOutcome::GameOver(team))
        } else {
            self.phase = GamePhase::RoundTransition;
            self.message = "Next round...".to_string();
            Ok(RoundOutcome::NextRound {
                dealer: self.next_round_dealer(),
            })
        }
    }

    /// The deal rotates to the previous ruler only when the ruling side
    /// lost the round.
    pub fn next_round_dealer(&self) -> Seat {
        match self.round_winner {
            Some(team) if self.ruler.team() == team => self.dealer,
            _ => self.ruler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionError, GamePhase, GameState, PlayOutcome};
    use crate::model::card::Card;
    use crate::model::hokm::Hokm;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn fresh_game(seed: u64) -> GameState {
        let mut rng = StdRng::seed_from_u64(seed);
        GameState::new_game(&mut rng, None, Some(Seat::One), [false; 4])
    }

    #[test]
    fn new_game_starts_dealing_with_ruler_after_dealer() {
        let state = fresh_game(7);
        assert_eq!(state.phase(), GamePhase::DealingInitial);
        assert_eq!(state.dealer(), Seat::One);
        assert_eq!(state.ruler(), Seat::Four);
        assert_eq!(state.card_census(), 52);
    }

    #[test]
    fn initial_deal_gives_five_cards_each() {
        let mut state = fresh_game(7);
        state.deal_initial().unwrap();
        for seat in Seat::ALL.iter().copied() {
            assert_eq!(state.hand(seat).len(), 5, "{seat} should hold 5 cards");
        }
        assert_eq!(state.phase(), GamePhase::HokmSelection);
        assert_eq!(state.card_census(), 52);
    }

    #[test]
    fn remaining_deal_fills_hands_to_thirteen() {
        let mut state = fresh_game(7);
        state.deal_initial().unwrap();
        state.select_hokm(Hokm::normal(Suit::Hearts)).unwrap();
        state.deal_remaining().unwrap();
        for seat in Seat::ALL.iter().copied() {
            assert_eq!(state.hand(seat).len(), 13);
        }
        assert_eq!(state.phase(), GamePhase::TrickPlay);
        assert_eq!(state.current_player(), state.ruler());
        assert_eq!(state.card_census(), 52);
    }

    #[test]
    fn actions_outside_their_phase_are_rejected() {
        let mut state = fresh_game(7);
        assert!(matches!(
            state.select_hokm(Hokm::sar()),
            Err(ActionError::Phase { .. })
        ));
        assert!(matches!(
            state.deal_remaining(),
            Err(ActionError::Phase { .. })
        ));
        assert!(matches!(
            state.respond_baam(true),
            Err(ActionError::Phase { .. })
        ));
        // State untouched.
        assert_eq!(state.phase(), GamePhase::DealingInitial);
        assert_eq!(state.hokm(), None);
    }

    #[test]
    fn play_rejects_wrong_seat_and_foreign_cards() {
        let mut state = GameState::from_hands(
            [
                vec![card(Rank::Ace, Suit::Spades)],
                vec![card(Rank::Two, Suit::Hearts)],
                vec![card(Rank::Three, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Hearts)],
            ],
            Hokm::normal(Suit::Spades),
            Seat::Two,
            Seat::One,
        );

        assert!(matches!(
            state.play_card(Seat::Four, card(Rank::Four, Suit::Hearts)),
            Err(ActionError::OutOfTurn { .. })
        ));
        assert!(matches!(
            state.play_card(Seat::One, card(Rank::Two, Suit::Hearts)),
            Err(ActionError::CardNotInHand(_))
        ));
        assert_eq!(state.hand(Seat::One).len(), 1);
    }

    #[test]
    fn play_enforces_follow_suit() {
        let mut state = GameState::from_hands(
            [
                vec![card(Rank::Two, Suit::Hearts)],
                vec![card(Rank::Ace, Suit::Spades)],
                vec![card(Rank::Three, Suit::Hearts)],
                vec![
                    card(Rank::Four, Suit::Hearts),
                    card(Rank::Five, Suit::Clubs),
                ],
            ],
            Hokm::normal(Suit::Spades),
            Seat::Two,
            Seat::One,
        );

        state.play_card(Seat::One, card(Rank::Two, Suit::Hearts)).unwrap();
        assert!(matches!(
            state.play_card(Seat::Four, card(Rank::Five, Suit::Clubs)),
            Err(ActionError::MustFollowSuit(Suit::Hearts))
        ));
        assert_eq!(
            state.play_card(Seat::Four, card(Rank::Four, Suit::Hearts)),
            Ok(PlayOutcome::Played { next: Seat::Three })
        );
    }

    #[test]
    fn off_lead_play_marks_void() {
        let mut state = GameState::from_hands(
            [
                vec![card(Rank::Two, Suit::Hearts)],
                vec![card(Rank::Six, Suit::Hearts)],
                vec![card(Rank::Three, Suit::Hearts)],
                vec![card(Rank::Five, Suit::Clubs)],
            ],
            Hokm::normal(Suit::Spades),
            Seat::Two,
            Seat::One,
        );

        state.play_card(Seat::One, card(Rank::Two, Suit::Hearts)).unwrap();
        state.play_card(Seat::Four, card(Rank::Five, Suit::Clubs)).unwrap();
        assert!(state.voids().is_void(Seat::Four, Suit::Hearts));
        assert!(!state.voids().is_void(Seat::One, Suit::Hearts));
    }
}
