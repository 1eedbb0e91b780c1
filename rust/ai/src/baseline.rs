//! Baseline policy: deterministic thresholds over hand strength, pot odds,
//! position and stack depth. The advanced layers build on the same reads.

use holdem_engine::engine::{legal_actions, LegalAction};
use holdem_engine::game::GameState;
use holdem_engine::player::Action;
use rand::Rng;

use crate::strength::hand_strength;
use crate::AiAction;

/// Approximate table position. Heads-up the button closes the action
/// postflop, so it counts as late and the other seat as early.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Position {
    Early,
    Late,
}

/// Situational reads feeding the decision thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRead {
    /// Pot divided by the amount to call; 0 when nothing is owed
    pub pot_odds: f64,
    pub position: Position,
    pub stack_to_pot_ratio: f64,
    /// Sampled per decision, in [0.3, 0.7)
    pub aggression: f64,
}

pub fn position_of(state: &GameState, seat: usize) -> Position {
    if seat == state.dealer_index {
        Position::Late
    } else {
        Position::Early
    }
}

/// Pot odds as pot / call. Zero when the call is free.
pub fn pot_odds(call_amount: u32, pot: u32) -> f64 {
    if call_amount == 0 {
        return 0.0;
    }
    pot as f64 / call_amount as f64
}

/// Reads the table for one seat. The aggression component is sampled from
/// the passed source, keeping replays deterministic under a fixed seed.
pub fn read_table(state: &GameState, seat: usize, rng: &mut impl Rng) -> TableRead {
    let player = &state.players[seat];
    let stack_to_pot_ratio = if state.pot == 0 {
        f64::INFINITY
    } else {
        player.chips as f64 / state.pot as f64
    };
    TableRead {
        pot_odds: pot_odds(state.amount_to_call(seat), state.pot),
        position: position_of(state, seat),
        stack_to_pot_ratio,
        aggression: rng.random::<f64>() * 0.4 + 0.3,
    }
}

/// Baseline decision for a seat: estimate strength, read the table, and run
/// the threshold policy over the currently legal actions.
pub fn decide(state: &GameState, seat: usize, rng: &mut impl Rng) -> AiAction {
    let player = &state.players[seat];
    let options = legal_actions(state, seat);
    let strength = hand_strength(&player.hole_cards, &state.community_cards);
    let read = read_table(state, seat, rng);
    choose(strength, &read, &options)
}

pub(crate) fn choose(strength: f64, read: &TableRead, options: &[LegalAction]) -> AiAction {
    if should_fold(strength, read) {
        return AiAction {
            action: Action::Fold,
            confidence: 0.8,
            reasoning: format!(
                "weak hand ({:.2}) with unfavorable pot odds ({:.2})",
                strength, read.pot_odds
            ),
        };
    }

    if should_all_in(strength, read) {
        if options
            .iter()
            .any(|o| matches!(o, LegalAction::AllIn { .. }))
        {
            return AiAction {
                action: Action::AllIn,
                confidence: 0.9,
                reasoning: format!("strong hand ({:.2}), shoving for the pot", strength),
            };
        }
    }

    if should_bet_or_raise(strength, read) {
        if let Some(action) = sized_wager(strength, read, options) {
            return AiAction {
                action,
                confidence: 0.7,
                reasoning: format!("betting on hand strength ({:.2})", strength),
            };
        }
    }

    if let Some(action) = call_or_check(options) {
        return AiAction {
            action,
            confidence: 0.6,
            reasoning: format!("calling with hand strength ({:.2})", strength),
        };
    }

    // Fold is always legal; reduced confidence flags the dead end.
    AiAction {
        action: Action::Fold,
        confidence: 0.5,
        reasoning: "no other action available".into(),
    }
}

fn should_fold(strength: f64, read: &TableRead) -> bool {
    if strength < 0.2 {
        return true;
    }
    if read.pot_odds < 0.1 && strength < 0.4 {
        return true;
    }
    if read.position == Position::Early && strength < 0.3 {
        return true;
    }
    if read.stack_to_pot_ratio < 0.5 && strength < 0.5 {
        return true;
    }
    false
}

fn should_all_in(strength: f64, read: &TableRead) -> bool {
    if strength > 0.9 {
        return true;
    }
    if read.stack_to_pot_ratio < 0.3 && strength > 0.6 {
        return true;
    }
    if read.aggression > 0.6 && strength > 0.7 {
        return true;
    }
    false
}

fn should_bet_or_raise(strength: f64, read: &TableRead) -> bool {
    if strength > 0.7 {
        return true;
    }
    if read.position == Position::Late && strength > 0.4 && read.aggression > 0.5 {
        return true;
    }
    if read.aggression > 0.6 && strength > 0.5 {
        return true;
    }
    false
}

/// Scales a wager into the legal bounds: stronger hands and later position
/// push toward the maximum.
fn sized_wager(strength: f64, read: &TableRead, options: &[LegalAction]) -> Option<Action> {
    for option in options {
        match *option {
            LegalAction::Bet { min, max } => {
                return Some(Action::Bet(scaled_amount(strength, read, min, max)));
            }
            LegalAction::Raise { min, max } => {
                return Some(Action::Raise(scaled_amount(strength, read, min, max)));
            }
            _ => {}
        }
    }
    None
}

fn scaled_amount(strength: f64, read: &TableRead, min: u32, max: u32) -> u32 {
    if max == 0 {
        return min;
    }
    let mut ratio = strength * 0.8 + 0.2;
    ratio *= read.aggression;
    ratio *= match read.position {
        Position::Late => 1.1,
        Position::Early => 0.9,
    };
    let amount = ((max - min) as f64 * ratio).floor() as u32 + min;
    amount.clamp(min, max)
}

pub(crate) fn call_or_check(options: &[LegalAction]) -> Option<Action> {
    for option in options {
        match option {
            LegalAction::Call { .. } => return Some(Action::Call),
            LegalAction::Check => return Some(Action::Check),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(pot_odds: f64, position: Position, spr: f64, aggression: f64) -> TableRead {
        TableRead {
            pot_odds,
            position,
            stack_to_pot_ratio: spr,
            aggression,
        }
    }

    #[test]
    fn very_weak_hands_fold() {
        assert!(should_fold(0.1, &read(4.0, Position::Late, 5.0, 0.5)));
    }

    #[test]
    fn short_stack_folds_mediocre_hands() {
        assert!(should_fold(0.45, &read(4.0, Position::Late, 0.4, 0.5)));
        assert!(!should_fold(0.55, &read(4.0, Position::Late, 0.4, 0.5)));
    }

    #[test]
    fn monsters_shove() {
        assert!(should_all_in(0.95, &read(4.0, Position::Early, 5.0, 0.3)));
    }

    #[test]
    fn late_position_with_aggression_bets_medium_hands() {
        assert!(should_bet_or_raise(0.45, &read(4.0, Position::Late, 5.0, 0.6)));
        assert!(!should_bet_or_raise(0.45, &read(4.0, Position::Early, 5.0, 0.4)));
    }

    #[test]
    fn wager_stays_inside_legal_bounds() {
        let r = read(4.0, Position::Late, 5.0, 0.69);
        for strength in [0.0, 0.4, 0.7, 1.0] {
            let amount = scaled_amount(strength, &r, 40, 980);
            assert!((40..=980).contains(&amount));
        }
    }

    #[test]
    fn pot_odds_handles_free_actions() {
        assert_eq!(pot_odds(0, 100), 0.0);
        assert!((pot_odds(50, 100) - 2.0).abs() < f64::EPSILON);
    }
}
