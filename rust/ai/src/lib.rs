//! # holdem-ai: Heuristic Opponent for Heads-Up Hold'em
//!
//! Turns a [`GameState`] and a behavioral [`Personality`] into a legal
//! action with a confidence and a short diagnostic string. Two policies are
//! provided: a deterministic threshold [`baseline`], and an [`advanced`]
//! layer that adds bluffing, adaptation to the opponent's history, and
//! impulsive randomization on top of it.
//!
//! All probabilistic branches draw from an explicitly passed random source,
//! so a fixed seed replays the same decisions.
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_opponent, Opponent, Personality};
//! use holdem_engine::engine::start_hand;
//! use holdem_engine::game::{GameConfig, GameState};
//!
//! let state = GameState::new(GameConfig::default(), 42);
//! let state = start_hand(&state).expect("deal");
//!
//! let mut ai = create_opponent("heuristic", 7, Personality::default());
//! let decision = ai.decide(&state, state.active_player_index);
//! println!("{:?} ({})", decision.action, decision.reasoning);
//! ```

use holdem_engine::game::GameState;
use holdem_engine::player::Action;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod advanced;
pub mod baseline;
pub mod strength;

/// A proposed action. `confidence` is in (0, 1]; `reasoning` is a short
/// diagnostic for logs and UI, never used for control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct AiAction {
    pub action: Action,
    pub confidence: f64,
    pub reasoning: String,
}

/// Behavioral profile. Every trait lives in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    pub aggression_level: f64,
    pub bluff_frequency: f64,
    pub patience_level: f64,
    pub risk_tolerance: f64,
    pub adaptability: f64,
}

impl Default for Personality {
    /// Midpoint profile: neither timid nor maniacal.
    fn default() -> Self {
        Self {
            aggression_level: 0.5,
            bluff_frequency: 0.3,
            patience_level: 0.55,
            risk_tolerance: 0.5,
            adaptability: 0.5,
        }
    }
}

impl Personality {
    /// Samples a profile with moderate aggression and bluffing but a wide
    /// spread of risk tolerance and adaptability.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            aggression_level: rng.random::<f64>() * 0.6 + 0.2,
            bluff_frequency: rng.random::<f64>() * 0.4 + 0.1,
            patience_level: rng.random::<f64>() * 0.5 + 0.3,
            risk_tolerance: rng.random::<f64>(),
            adaptability: rng.random::<f64>(),
        }
    }

    fn clamped(self) -> Self {
        Self {
            aggression_level: self.aggression_level.clamp(0.0, 1.0),
            bluff_frequency: self.bluff_frequency.clamp(0.0, 1.0),
            patience_level: self.patience_level.clamp(0.0, 1.0),
            risk_tolerance: self.risk_tolerance.clamp(0.0, 1.0),
            adaptability: self.adaptability.clamp(0.0, 1.0),
        }
    }
}

/// Interface for opponent implementations: observe the table, propose an
/// action for the given seat.
pub trait Opponent: Send + Sync {
    /// Propose the next action for `seat` in `state`.
    fn decide(&mut self, state: &GameState, seat: usize) -> AiAction;

    /// Identifier of this opponent implementation.
    fn name(&self) -> &str;
}

/// Deterministic threshold policy without personality layers.
pub struct BaselineOpponent {
    rng: StdRng,
}

impl BaselineOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for BaselineOpponent {
    fn decide(&mut self, state: &GameState, seat: usize) -> AiAction {
        baseline::decide(state, seat, &mut self.rng)
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

/// Full opponent: baseline policy plus bluffing, adaptation and
/// randomization, steered by a [`Personality`]. Feed it the opponent's
/// actions through [`observe`](HeuristicOpponent::observe) so the adaptive
/// layer has a history to read.
pub struct HeuristicOpponent {
    personality: Personality,
    opponent_history: Vec<Action>,
    rng: StdRng,
}

impl HeuristicOpponent {
    pub fn new(seed: u64, personality: Personality) -> Self {
        Self {
            personality: personality.clamped(),
            opponent_history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Records an action the opponent took.
    pub fn observe(&mut self, action: Action) {
        self.opponent_history.push(action);
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Replaces the profile, e.g. after
    /// [`advanced::adjust_personality`].
    pub fn set_personality(&mut self, personality: Personality) {
        self.personality = personality.clamped();
    }
}

impl Opponent for HeuristicOpponent {
    fn decide(&mut self, state: &GameState, seat: usize) -> AiAction {
        advanced::decide(
            state,
            seat,
            &self.personality,
            &self.opponent_history,
            &mut self.rng,
        )
    }

    fn name(&self) -> &str {
        "HeuristicAI"
    }
}

/// Factory for opponents by type string.
///
/// # Panics
///
/// Panics on an unknown type. Supported: `"baseline"`, `"heuristic"`.
pub fn create_opponent(kind: &str, seed: u64, personality: Personality) -> Box<dyn Opponent> {
    match kind {
        "baseline" => Box::new(BaselineOpponent::new(seed)),
        "heuristic" => Box::new(HeuristicOpponent::new(seed, personality)),
        _ => panic!("Unknown opponent type: {}", kind),
    }
}
