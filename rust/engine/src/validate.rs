//! Defensive validation and repair for externally supplied states.
//!
//! The engine never produces an invalid state through its own transitions;
//! these checks exist for states that arrive corrupted from outside it.
//! Player count and negative chip quantities are unrepresentable here by
//! construction (`[Player; 2]`, unsigned amounts), so only the remaining
//! invariants are checked at runtime.

use std::collections::HashSet;

use serde::Serialize;

use crate::cards::Card;
use crate::game::GameState;

/// Classification of a structural violation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum StateErrorKind {
    InvalidGameState,
    InvalidCardDistribution,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One invariant violation: what broke, where, and whether [`repair`] can
/// fix it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateError {
    pub kind: StateErrorKind,
    pub message: String,
    pub recoverable: bool,
}

impl StateError {
    fn new(kind: StateErrorKind, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            recoverable,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            StateErrorKind::InvalidGameState => Severity::High,
            StateErrorKind::InvalidCardDistribution => Severity::High,
        }
    }
}

/// Result of a full-state audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<StateError>,
    pub warnings: Vec<String>,
}

/// Checks every structural invariant and reports one error per violation.
/// Never mutates the state.
pub fn validate(state: &GameState) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for player in state.players.iter() {
        if player.hole_cards.len() > 2 {
            errors.push(StateError::new(
                StateErrorKind::InvalidCardDistribution,
                format!(
                    "seat {} holds {} hole cards (maximum 2)",
                    player.id,
                    player.hole_cards.len()
                ),
                true,
            ));
        }
        if player.has_folded && player.is_all_in {
            errors.push(StateError::new(
                StateErrorKind::InvalidGameState,
                format!("seat {} is both folded and all-in", player.id),
                true,
            ));
        }
    }

    let expected = state.phase.community_count();
    if state.community_cards.len() != expected {
        errors.push(StateError::new(
            StateErrorKind::InvalidCardDistribution,
            format!(
                "phase {} expects {} community cards, found {}",
                state.phase,
                expected,
                state.community_cards.len()
            ),
            true,
        ));
    }

    // The pot carries antes and prior streets on top of the live bets, so
    // the live bets may only ever fall short of it, never exceed it.
    let total_bets: u32 = state.players.iter().map(|p| p.current_bet).sum();
    if total_bets > state.pot {
        errors.push(StateError::new(
            StateErrorKind::InvalidGameState,
            format!(
                "live bets ({}) exceed the pot ({})",
                total_bets, state.pot
            ),
            false,
        ));
    }

    let seats = state.players.len();
    if state.active_player_index >= seats {
        errors.push(StateError::new(
            StateErrorKind::InvalidGameState,
            format!(
                "active player index {} out of bounds",
                state.active_player_index
            ),
            true,
        ));
    }
    if state.dealer_index >= seats {
        errors.push(StateError::new(
            StateErrorKind::InvalidGameState,
            format!("dealer index {} out of bounds", state.dealer_index),
            true,
        ));
    }

    if state.deck.remaining() + state.deck.dealt_cards().len() > 52 {
        errors.push(StateError::new(
            StateErrorKind::InvalidCardDistribution,
            "deck holds more than 52 cards".to_string(),
            true,
        ));
    }
    if let Some(card) = find_duplicate_card(state) {
        errors.push(StateError::new(
            StateErrorKind::InvalidCardDistribution,
            format!("card {} appears more than once in play", card),
            false,
        ));
    }

    if state.pot > 0 && state.phase == crate::game::Phase::Ended {
        warnings.push("the hand has ended with chips still in the pot".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Best-effort, idempotent repair of a corrupted state.
///
/// Truncates over-long card collections (keeping the original order),
/// clamps seat indices into bounds, and resolves the fold+all-in
/// contradiction in favor of all-in. Missing data is never invented and
/// pot bookkeeping is never rewritten.
pub fn repair(state: &GameState) -> GameState {
    let mut repaired = state.clone();

    for player in repaired.players.iter_mut() {
        player.hole_cards.truncate(2);
        if player.has_folded && player.is_all_in {
            player.has_folded = false;
        }
    }

    repaired
        .community_cards
        .truncate(repaired.phase.community_count());

    let last_seat = repaired.players.len() - 1;
    repaired.active_player_index = repaired.active_player_index.min(last_seat);
    repaired.dealer_index = repaired.dealer_index.min(last_seat);

    repaired
}

/// First card seen twice across the undealt deck, hole cards, and board.
fn find_duplicate_card(state: &GameState) -> Option<Card> {
    let mut seen: HashSet<Card> = HashSet::new();
    let in_play = state
        .deck
        .remaining_cards()
        .iter()
        .chain(state.players.iter().flat_map(|p| p.hole_cards.iter()))
        .chain(state.community_cards.iter());
    for &card in in_play {
        if !seen.insert(card) {
            return Some(card);
        }
    }
    None
}
