use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blinds;
use crate::cards::Card;
use crate::deck::Deck;
use crate::hand::HandRank;
use crate::player::Player;

/// The six stages of a hand, in order. Showdown and Ended are terminal for
/// betting; only the first four accept player actions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Ended,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River => Phase::Showdown,
            Phase::Showdown | Phase::Ended => Phase::Ended,
        }
    }

    /// Community cards a state in this phase must hold.
    pub fn community_count(self) -> usize {
        match self {
            Phase::Preflop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River | Phase::Showdown | Phase::Ended => 5,
        }
    }

    pub fn accepts_actions(self) -> bool {
        matches!(
            self,
            Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Preflop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
            Phase::Ended => "ended",
        };
        f.write_str(s)
    }
}

/// Outcome of a hand (or, after game over, of the session).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Seat(usize),
    Tie,
}

/// Why the session ended. A seat is short when its chips cannot cover the
/// next big blind plus ante.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameOverReason {
    BothSeatsShort,
    SeatShort(usize),
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::BothSeatsShort => {
                write!(f, "neither seat can cover the blinds")
            }
            GameOverReason::SeatShort(seat) => {
                write!(f, "seat {} cannot cover the blinds", seat)
            }
        }
    }
}

/// Session parameters. Defaults mirror the stakes the game ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub initial_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub bb_ante: u32,
    pub player_name: String,
    pub cpu_name: String,
    /// Hands between blind escalations
    pub blind_increase_interval: u32,
    pub blind_increase_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_chips: 1000,
            small_blind: 10,
            big_blind: 20,
            bb_ante: 5,
            player_name: "Player".into(),
            cpu_name: "CPU".into(),
            blind_increase_interval: 10,
            blind_increase_multiplier: 1.5,
        }
    }
}

/// The authoritative state of one heads-up session. Owns both seats, the
/// deck and every derived field; transitions in [`crate::engine`] consume a
/// reference and hand back a fresh state, never editing in place.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seat 0 is the human-controlled seat, seat 1 the AI seat.
    pub players: [Player; 2],
    pub community_cards: Vec<Card>,
    pub pot: u32,
    /// The table's outstanding bet for the current round
    pub current_bet: u32,
    pub phase: Phase,
    pub active_player_index: usize,
    pub dealer_index: usize,
    pub deck: Deck,
    pub winner: Option<Winner>,
    pub winning_hand: Option<HandRank>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub bb_ante: u32,
    pub hand_number: u32,
    pub blind_level: u32,
    pub hands_until_blind_increase: u32,
    pub is_game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub can_start_new_hand: bool,
    pub can_start_new_game: bool,
    pub config: GameConfig,
}

impl GameState {
    /// Fresh session state: full stacks, shuffled deck, no hand dealt yet.
    /// Seat 1 starts on the button.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let players = [
            Player::new(0, &config.player_name, config.initial_chips, false),
            Player::new(1, &config.cpu_name, config.initial_chips, true),
        ];
        let info = blinds::blind_info(&config, 1);
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        Self {
            players,
            community_cards: Vec::new(),
            pot: 0,
            current_bet: 0,
            phase: Phase::Preflop,
            active_player_index: 0,
            dealer_index: 1,
            deck,
            winner: None,
            winning_hand: None,
            small_blind: info.small_blind,
            big_blind: info.big_blind,
            bb_ante: info.bb_ante,
            hand_number: 0,
            blind_level: 1,
            hands_until_blind_increase: config.blind_increase_interval,
            is_game_over: false,
            game_over_reason: None,
            can_start_new_hand: true,
            can_start_new_game: true,
            config,
        }
    }

    /// Seats still contesting the pot, in seat order.
    pub fn contenders(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|p| p.is_contending())
            .map(|p| p.id)
            .collect()
    }

    pub fn seat_after(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    /// Chips the given seat still owes to match the table bet.
    pub fn amount_to_call(&self, seat: usize) -> u32 {
        self.current_bet
            .saturating_sub(self.players[seat].current_bet)
    }
}
