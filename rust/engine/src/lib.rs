//! # holdem-engine: Heads-Up Texas Hold'em Core
//!
//! The game-logic core of a two-player (human vs. computer) Texas Hold'em
//! table: a turn-based betting state machine, a combinatorial hand
//! evaluator, and a defensive state validator. The engine holds the
//! authoritative [`game::GameState`]; callers submit actions and receive a
//! new, internally consistent state back.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Poker hand evaluation with a totally-ordered packed score
//! - [`player`] - Seat state and the action vocabulary
//! - [`game`] - Game state, phases, configuration and outcome types
//! - [`engine`] - Betting rounds, phase transitions, showdown and payout
//! - [`blinds`] - Blind and ante escalation schedule
//! - [`validate`] - Invariant checks and best-effort state repair
//! - [`log`] - Hand-record serialization (JSONL)
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::engine::{apply_action, start_hand};
//! use holdem_engine::game::{GameConfig, GameState};
//! use holdem_engine::player::Action;
//!
//! let state = GameState::new(GameConfig::default(), 42);
//! let state = start_hand(&state).expect("fresh deck covers the deal");
//!
//! // The small blind acts first preflop.
//! let seat = state.active_player_index;
//! let state = apply_action(&state, seat, Action::Call).unwrap();
//! assert_eq!(state.active_player_index, 1 - seat);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All randomness flows through the seed given to [`game::GameState::new`]:
//!
//! ```rust
//! use holdem_engine::game::{GameConfig, GameState};
//!
//! // Same seed, same shuffle, same hands.
//! let a = GameState::new(GameConfig::default(), 7);
//! let b = GameState::new(GameConfig::default(), 7);
//! assert_eq!(a.deck.remaining_cards(), b.deck.remaining_cards());
//! ```

pub mod blinds;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod log;
pub mod player;
pub mod validate;
