use holdem_ai::{advanced, baseline, create_opponent, Opponent, Personality};
use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::engine::{legal_actions, start_hand};
use holdem_engine::game::{GameConfig, GameState};
use holdem_engine::player::Action;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn c(suit: Suit, rank: Rank) -> Card {
    Card { suit, rank }
}

fn fresh_hand(seed: u64) -> GameState {
    let state = GameState::new(GameConfig::default(), seed);
    start_hand(&state).expect("deal")
}

#[test]
fn pocket_aces_preflop_never_fold_and_decide_confidently() {
    for seed in 0..50 {
        let mut state = fresh_hand(seed);
        state.players[0].hole_cards = vec![c(Suit::Spades, Rank::Ace), c(Suit::Hearts, Rank::Ace)];

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let decision = baseline::decide(&state, 0, &mut rng);
        assert_ne!(decision.action, Action::Fold, "seed {}", seed);
        assert!(decision.confidence > 0.6, "seed {}", seed);

        let mut ai = create_opponent("heuristic", seed, Personality::default());
        let decision = ai.decide(&state, 0);
        assert_ne!(decision.action, Action::Fold, "seed {}", seed);
        assert!(decision.confidence > 0.6, "seed {}", seed);
    }
}

#[test]
fn decisions_are_always_legal() {
    for seed in 0..100 {
        let state = fresh_hand(seed);
        let options = legal_actions(&state, 0);

        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let decision = baseline::decide(&state, 0, &mut rng);
        assert!(
            options.iter().any(|o| o.matches(decision.action)),
            "baseline picked illegal {:?} (seed {})",
            decision.action,
            seed
        );

        let mut ai = create_opponent("heuristic", seed, Personality::random(&mut rng));
        let decision = ai.decide(&state, 0);
        assert!(
            options.iter().any(|o| o.matches(decision.action)),
            "heuristic picked illegal {:?} (seed {})",
            decision.action,
            seed
        );
    }
}

#[test]
fn mid_strength_hands_bluff_into_passive_opponents() {
    let personality = Personality {
        aggression_level: 0.0,
        bluff_frequency: 1.0,
        patience_level: 1.0,
        risk_tolerance: 1.0,
        adaptability: 0.0,
    };
    let mut state = fresh_hand(8);
    state.players[0].hole_cards = vec![c(Suit::Clubs, Rank::King), c(Suit::Diamonds, Rank::Nine)];
    let history = [Action::Call, Action::Call, Action::Call];

    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let decision = advanced::decide(&state, 0, &personality, &history, &mut rng);
        assert!(decision.action.is_aggressive(), "seed {}", seed);
        assert!(decision.reasoning.contains("bluffing"), "seed {}", seed);
    }
}

#[test]
fn bluffs_are_suppressed_against_an_aggressive_opponent() {
    let personality = Personality {
        aggression_level: 0.0,
        bluff_frequency: 1.0,
        patience_level: 1.0,
        risk_tolerance: 1.0,
        adaptability: 0.0,
    };
    let mut state = fresh_hand(8);
    state.players[0].hole_cards = vec![c(Suit::Clubs, Rank::King), c(Suit::Diamonds, Rank::Nine)];
    let history = [
        Action::Raise(40),
        Action::Raise(60),
        Action::Raise(80),
        Action::AllIn,
    ];

    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let decision = advanced::decide(&state, 0, &personality, &history, &mut rng);
        assert!(!decision.action.is_aggressive(), "seed {}", seed);
    }
}

#[test]
fn consistent_passive_opponents_get_attacked() {
    let personality = Personality {
        aggression_level: 0.0,
        bluff_frequency: 0.0,
        patience_level: 1.0,
        risk_tolerance: 0.0,
        adaptability: 1.0,
    };
    let mut state = fresh_hand(8);
    state.players[0].hole_cards = vec![c(Suit::Clubs, Rank::King), c(Suit::Diamonds, Rank::Nine)];
    let history = [Action::Check, Action::Check, Action::Check];

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let decision = advanced::decide(&state, 0, &personality, &history, &mut rng);
    assert!(decision.action.is_aggressive());
    assert!(decision.reasoning.contains("attacking"));
}

#[test]
fn consistent_aggressive_opponents_get_passive_responses() {
    let personality = Personality {
        aggression_level: 0.0,
        bluff_frequency: 0.0,
        patience_level: 1.0,
        risk_tolerance: 0.0,
        adaptability: 1.0,
    };
    let mut state = fresh_hand(8);
    state.players[0].hole_cards = vec![c(Suit::Clubs, Rank::King), c(Suit::Diamonds, Rank::Nine)];
    let history = [Action::AllIn, Action::AllIn, Action::AllIn];

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let decision = advanced::decide(&state, 0, &personality, &history, &mut rng);
    assert_eq!(decision.action, Action::Call);
    assert!(!decision.action.is_aggressive());
}

#[test]
fn same_seed_same_decision() {
    let state = fresh_hand(21);
    let mut a = create_opponent("heuristic", 5, Personality::default());
    let mut b = create_opponent("heuristic", 5, Personality::default());
    assert_eq!(a.decide(&state, 0), b.decide(&state, 0));
}

#[test]
fn factory_exposes_both_opponents() {
    assert_eq!(
        create_opponent("baseline", 1, Personality::default()).name(),
        "BaselineAI"
    );
    assert_eq!(
        create_opponent("heuristic", 1, Personality::default()).name(),
        "HeuristicAI"
    );
}

#[test]
#[should_panic]
fn unknown_opponent_type_panics() {
    let _ = create_opponent("gto-wizard", 1, Personality::default());
}
