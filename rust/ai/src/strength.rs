//! Hand-strength estimation on a [0, 1] scale.
//!
//! Preflop uses a closed-form table over the two hole cards; once five or
//! more cards are known, the real evaluator runs and its packed score is
//! normalized against the maximum attainable score.

use holdem_engine::cards::Card;
use holdem_engine::hand::{evaluate, MAX_SCORE};

/// Estimated strength of the known cards. Falls back to the preflop table
/// whenever fewer than five cards are visible.
pub fn hand_strength(hole: &[Card], community: &[Card]) -> f64 {
    let mut all: Vec<Card> = hole.to_vec();
    all.extend_from_slice(community);
    if all.len() < 5 {
        return preflop_strength(hole);
    }
    match evaluate(&all) {
        Ok(rank) => (rank.score as f64 / MAX_SCORE as f64).min(1.0),
        Err(_) => preflop_strength(hole),
    }
}

/// Closed-form preflop heuristic: pairs ranked by height, then high-card
/// combinations with suited and connected bonuses. Bottoms out at 0.2, so
/// even junk clears the baseline policy's very-low threshold before the
/// flop.
pub fn preflop_strength(hole: &[Card]) -> f64 {
    if hole.len() != 2 {
        return 0.0;
    }
    let r1 = hole[0].rank.value();
    let r2 = hole[1].rank.value();
    let suited = hole[0].suit == hole[1].suit;

    if r1 == r2 {
        return match r1 {
            14 => 0.95,      // AA
            12..=13 => 0.85, // KK, QQ
            10..=11 => 0.75, // JJ, TT
            8..=9 => 0.65,   // 99, 88
            6..=7 => 0.55,   // 77, 66
            _ => 0.45,
        };
    }

    let high = r1.max(r2);
    let low = r1.min(r2);

    if high >= 14 {
        return if low >= 10 {
            pick(suited, 0.8, 0.7) // AK .. AT
        } else if low >= 8 {
            pick(suited, 0.7, 0.6)
        } else {
            pick(suited, 0.6, 0.5)
        };
    }
    if high >= 12 {
        return if low >= 10 {
            pick(suited, 0.7, 0.6) // KQ, KJ
        } else if low >= 8 {
            pick(suited, 0.6, 0.5)
        } else {
            pick(suited, 0.5, 0.4)
        };
    }
    if high >= 10 {
        return if low >= 8 {
            pick(suited, 0.6, 0.5)
        } else {
            pick(suited, 0.5, 0.4)
        };
    }

    if high - low <= 2 {
        pick(suited, 0.4, 0.3) // connected or one-gapped
    } else {
        pick(suited, 0.3, 0.2)
    }
}

fn pick(suited: bool, if_suited: f64, if_not: f64) -> f64 {
    if suited {
        if_suited
    } else {
        if_not
    }
}
