use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandRank;

/// A betting-round action. Bet and Raise carry the chips committed by the
/// action, so an amount can never be attached to the wrong verb.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only legal when nothing is owed)
    Check,
    /// Match the outstanding bet
    Call,
    /// Open the betting for the given amount
    Bet(u32),
    /// Increase the outstanding bet by committing the given amount
    Raise(u32),
    /// Commit the whole remaining stack
    AllIn,
}

impl Action {
    /// Bets, raises and shoves; everything the opponent model counts as
    /// aggression.
    pub fn is_aggressive(self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_) | Action::AllIn)
    }
}

/// One of the two seats. All fields are plain data; the engine alone
/// mutates them, and only through whole-state transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Seat index (0 = human seat, 1 = AI seat)
    pub id: usize,
    pub name: String,
    pub chips: u32,
    /// Private cards; 0 before the deal, 2 afterwards
    pub hole_cards: Vec<Card>,
    /// Chips committed in the current betting round
    pub current_bet: u32,
    pub has_acted: bool,
    pub has_folded: bool,
    pub is_all_in: bool,
    pub is_dealer: bool,
    /// Best 7-card evaluation, set at showdown and cleared per hand
    pub best_hand: Option<HandRank>,
}

impl Player {
    pub fn new(id: usize, name: &str, chips: u32, is_dealer: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            chips,
            hole_cards: Vec::new(),
            current_bet: 0,
            has_acted: false,
            has_folded: false,
            is_all_in: false,
            is_dealer,
            best_hand: None,
        }
    }

    /// True while the player still contests the pot.
    pub fn is_contending(&self) -> bool {
        !self.has_folded
    }

    /// True when the player may still be asked to act this round.
    pub fn can_act(&self) -> bool {
        !self.has_folded && !self.is_all_in && !self.has_acted
    }

    /// Per-hand reset, keeping chips and identity.
    pub fn reset_for_hand(&mut self, is_dealer: bool) {
        self.hole_cards.clear();
        self.current_bet = 0;
        self.has_acted = false;
        self.has_folded = false;
        self.is_all_in = false;
        self.is_dealer = is_dealer;
        self.best_hand = None;
    }
}
