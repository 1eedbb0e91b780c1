//! Personality-driven layers on top of the baseline policy: bluffing,
//! adaptation to the opponent's recent behavior, and post-hoc
//! randomization modeling impulsiveness.

use holdem_engine::cards::Card;
use holdem_engine::engine::{legal_actions, LegalAction};
use holdem_engine::game::GameState;
use holdem_engine::player::Action;
use rand::Rng;

use crate::baseline::{call_or_check, position_of, pot_odds, Position};
use crate::strength::hand_strength;
use crate::{AiAction, Personality};

/// Reads derived from the opponent's recent actions and the pot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentRead {
    /// Share of aggressive actions (bet/raise/all-in) in the history;
    /// 0.5 with no history
    pub aggression: f64,
    /// Share of consecutive repeats in the history; 0 below 3 actions
    pub consistency: f64,
    /// Estimated chance a wager folds the opponent out
    pub fold_equity: f64,
    /// Coarse advisory value-to-come signal; not a true probability
    pub implied_odds: f64,
}

/// Full advanced decision: bluff layer, then adaptation, then the strategic
/// thresholds, with impulsive randomization applied last. Every produced
/// amount is clamped to the legal bounds for the seat.
pub fn decide(
    state: &GameState,
    seat: usize,
    personality: &Personality,
    opponent_history: &[Action],
    rng: &mut impl Rng,
) -> AiAction {
    let player = &state.players[seat];
    let options = legal_actions(state, seat);
    let strength = hand_strength(&player.hole_cards, &state.community_cards);
    let position = position_of(state, seat);
    let read = opponent_read(state, seat, opponent_history);

    let decision = if should_bluff(strength, &read, position, personality, rng) {
        bluff_action(personality, &read, &options)
    } else if should_adapt(personality, opponent_history, rng) {
        adaptive_action(state, &read, &options)
    } else {
        strategic_action(state, seat, strength, position, personality, &options)
    };

    add_randomness(decision, personality, &options, rng)
}

pub fn opponent_read(state: &GameState, seat: usize, history: &[Action]) -> OpponentRead {
    let aggression = opponent_aggression(history);
    let player = &state.players[seat];
    OpponentRead {
        aggression,
        consistency: pattern_consistency(history),
        fold_equity: fold_equity(aggression, state.pot),
        implied_odds: implied_odds(&player.hole_cards, &state.community_cards, state.pot),
    }
}

/// Share of aggressive actions in the opponent's history. An empty history
/// reads as neutral (0.5).
pub fn opponent_aggression(history: &[Action]) -> f64 {
    if history.is_empty() {
        return 0.5;
    }
    let aggressive = history.iter().filter(|a| a.is_aggressive()).count();
    aggressive as f64 / history.len() as f64
}

/// How often the opponent repeats the previous action. Needs at least three
/// actions to mean anything.
pub fn pattern_consistency(history: &[Action]) -> f64 {
    if history.len() < 3 {
        return 0.0;
    }
    let repeats = history.windows(2).filter(|w| w[0] == w[1]).count();
    repeats as f64 / (history.len() - 1) as f64
}

/// A passive opponent folds more; a bigger pot makes the threat credible,
/// capped once the pot reaches 100 chips.
pub fn fold_equity(opponent_aggression: f64, pot: u32) -> f64 {
    let base = 1.0 - opponent_aggression;
    let pot_factor = (pot as f64 / 100.0).min(1.0);
    base * pot_factor
}

/// Coarse outs estimate from the current strength bracket. Advisory only;
/// deliberately not a combinatorial count.
pub fn estimate_outs(hole: &[Card], community: &[Card]) -> u32 {
    if community.is_empty() {
        return 0;
    }
    let strength = hand_strength(hole, community);
    if strength > 0.8 {
        0
    } else if strength > 0.6 {
        2
    } else if strength > 0.4 {
        4
    } else {
        8
    }
}

/// Advisory implied-odds signal: draw probability times the pot.
pub fn implied_odds(hole: &[Card], community: &[Card], pot: u32) -> f64 {
    let remaining = 52usize.saturating_sub(community.len() + hole.len());
    let outs = estimate_outs(hole, community);
    if outs == 0 || remaining == 0 {
        return 0.0;
    }
    outs as f64 / remaining as f64 * pot as f64
}

/// Bluffs fire probabilistically by `bluff_frequency`, only with mid-range
/// strength (a real hand bets for value, hopeless ones fold), only when
/// the fold equity clears the floor, and never into an opponent who has
/// been hammering the pot.
fn should_bluff(
    strength: f64,
    read: &OpponentRead,
    position: Position,
    personality: &Personality,
    rng: &mut impl Rng,
) -> bool {
    if rng.random::<f64>() > personality.bluff_frequency {
        return false;
    }
    if !(0.3..=0.7).contains(&strength) {
        return false;
    }
    if read.fold_equity < 0.3 {
        return false;
    }
    if read.aggression > 0.7 {
        return false;
    }
    if position == Position::Late {
        return true;
    }
    rng.random::<f64>() < personality.risk_tolerance
}

fn bluff_action(
    personality: &Personality,
    read: &OpponentRead,
    options: &[LegalAction],
) -> AiAction {
    let size = (50.0 * personality.risk_tolerance * read.fold_equity).floor() as u32;
    let reasoning = format!("bluffing into fold equity ({:.2})", read.fold_equity);
    for option in options {
        match *option {
            LegalAction::Bet { min, max } => {
                return AiAction {
                    action: Action::Bet(size.clamp(min, max)),
                    confidence: 0.6,
                    reasoning,
                };
            }
            LegalAction::Raise { min, max } => {
                return AiAction {
                    action: Action::Raise(size.clamp(min, max)),
                    confidence: 0.6,
                    reasoning,
                };
            }
            _ => {}
        }
    }
    // No wager is legal; the bluff degrades to a call/check.
    match call_or_check(options) {
        Some(action) => AiAction {
            action,
            confidence: 0.5,
            reasoning,
        },
        None => fallback_fold(),
    }
}

/// Adapts once the opponent's pattern is consistent enough, or sometimes
/// just because the profile is adaptable. Needs enough history to read a
/// pattern at all.
fn should_adapt(
    personality: &Personality,
    opponent_history: &[Action],
    rng: &mut impl Rng,
) -> bool {
    if opponent_history.len() < 3 || personality.adaptability < 0.3 {
        return false;
    }
    if pattern_consistency(opponent_history) > 0.7 {
        return true;
    }
    rng.random::<f64>() < personality.adaptability
}

/// Inverts posture: passive against an aggressive opponent, aggressive
/// against a passive one.
fn adaptive_action(state: &GameState, read: &OpponentRead, options: &[LegalAction]) -> AiAction {
    if read.aggression > 0.7 {
        return match call_or_check(options) {
            Some(action) => AiAction {
                action,
                confidence: 0.7,
                reasoning: "playing passive against an aggressive opponent".into(),
            },
            None => fallback_fold(),
        };
    }
    let size = state.pot / 2;
    for option in options {
        match *option {
            LegalAction::Bet { min, max } => {
                return AiAction {
                    action: Action::Bet(size.clamp(min, max)),
                    confidence: 0.6,
                    reasoning: "attacking a passive opponent".into(),
                };
            }
            LegalAction::Raise { min, max } => {
                return AiAction {
                    action: Action::Raise(size.clamp(min, max)),
                    confidence: 0.6,
                    reasoning: "attacking a passive opponent".into(),
                };
            }
            _ => {}
        }
    }
    match call_or_check(options) {
        Some(action) => AiAction {
            action,
            confidence: 0.6,
            reasoning: "attacking a passive opponent".into(),
        },
        None => fallback_fold(),
    }
}

/// The strategic core: the baseline thresholds with the personality's
/// aggression trait in place of the sampled one, and pot-fraction bet
/// buckets (~30% medium, ~50% strong, ~80% very strong).
fn strategic_action(
    state: &GameState,
    seat: usize,
    strength: f64,
    position: Position,
    personality: &Personality,
    options: &[LegalAction],
) -> AiAction {
    let player = &state.players[seat];
    let spr = if state.pot == 0 {
        f64::INFINITY
    } else {
        player.chips as f64 / state.pot as f64
    };
    let odds = pot_odds(state.amount_to_call(seat), state.pot);
    let aggression = personality.aggression_level;

    if strength < 0.2
        || (odds > 0.0 && odds < 0.2 && strength < 0.5)
        || (position == Position::Early && strength < 0.4)
        || (spr < 0.5 && strength < 0.5)
    {
        return AiAction {
            action: Action::Fold,
            confidence: 0.8,
            reasoning: format!("weak hand ({:.2}) and poor odds", strength),
        };
    }

    let shove = strength > 0.9
        || (spr < 0.3 && strength > 0.7)
        || (aggression > 0.8 && strength > 0.6);
    if shove
        && options
            .iter()
            .any(|o| matches!(o, LegalAction::AllIn { .. }))
    {
        return AiAction {
            action: Action::AllIn,
            confidence: 0.9,
            reasoning: format!("shoving a strong hand ({:.2})", strength),
        };
    }

    let wager = strength > 0.7
        || (position == Position::Late && strength > 0.5)
        || (aggression > 0.7 && strength > 0.4);
    if wager {
        let size = bucketed_bet(strength, state.pot);
        for option in options {
            match *option {
                LegalAction::Bet { min, max } => {
                    return AiAction {
                        action: Action::Bet(size.clamp(min, max)),
                        confidence: 0.7,
                        reasoning: format!("value betting ({:.2})", strength),
                    };
                }
                LegalAction::Raise { min, max } => {
                    return AiAction {
                        action: Action::Raise(size.clamp(min, max)),
                        confidence: 0.7,
                        reasoning: format!("value raising ({:.2})", strength),
                    };
                }
                _ => {}
            }
        }
    }

    match call_or_check(options) {
        Some(action) => AiAction {
            action,
            confidence: 0.6,
            reasoning: format!("calling with a medium hand ({:.2})", strength),
        },
        None => fallback_fold(),
    }
}

fn bucketed_bet(strength: f64, pot: u32) -> u32 {
    let fraction = if strength > 0.8 {
        0.8
    } else if strength > 0.6 {
        0.5
    } else {
        0.3
    };
    (pot as f64 * fraction).floor() as u32
}

/// Impulsiveness: with probability `(1 - patience) * 0.3` the decision is
/// swapped for another currently legal action at discounted confidence.
pub fn add_randomness(
    decision: AiAction,
    personality: &Personality,
    options: &[LegalAction],
    rng: &mut impl Rng,
) -> AiAction {
    let impulse = (1.0 - personality.patience_level) * 0.3;
    if options.is_empty() || rng.random::<f64>() >= impulse {
        return decision;
    }
    // Impulse swaps stay between continuing actions; a swap never turns a
    // made decision into a fold.
    let alternatives: Vec<Action> = options
        .iter()
        .filter_map(|o| match *o {
            LegalAction::Check => Some(Action::Check),
            LegalAction::Call { .. } => Some(Action::Call),
            LegalAction::Bet { min, .. } => Some(Action::Bet(min)),
            _ => None,
        })
        .filter(|a| *a != decision.action)
        .collect();
    if alternatives.is_empty() {
        return decision;
    }
    let swapped = alternatives[rng.random_range(0..alternatives.len())];
    AiAction {
        action: swapped,
        confidence: decision.confidence * 0.8,
        reasoning: format!("{} (impulsively switched to {:?})", decision.reasoning, swapped),
    }
}

/// Dynamic profile adjustment between hands: losing pulls toward patience,
/// winning and late-game progress pull toward aggression. Outputs stay in
/// [0, 1].
pub fn adjust_personality(base: &Personality, game_progress: f64, win_rate: f64) -> Personality {
    let mut aggression = 0.0;
    let mut bluff = 0.0;
    let mut patience = 0.0;
    let mut risk = 0.0;

    if game_progress > 0.7 {
        aggression += 0.2;
        risk += 0.1;
    }
    if win_rate < 0.3 {
        aggression -= 0.2;
        bluff -= 0.1;
        patience += 0.2;
    } else if win_rate > 0.7 {
        aggression += 0.2;
        bluff += 0.1;
        risk += 0.1;
    }

    Personality {
        aggression_level: (base.aggression_level + aggression).clamp(0.0, 1.0),
        bluff_frequency: (base.bluff_frequency + bluff).clamp(0.0, 1.0),
        patience_level: (base.patience_level + patience).clamp(0.0, 1.0),
        risk_tolerance: (base.risk_tolerance + risk).clamp(0.0, 1.0),
        adaptability: base.adaptability,
    }
}

fn fallback_fold() -> AiAction {
    AiAction {
        action: Action::Fold,
        confidence: 0.5,
        reasoning: "no legal action enabled, folding".into(),
    }
}
