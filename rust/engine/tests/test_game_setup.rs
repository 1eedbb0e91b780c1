use holdem_engine::engine::start_hand;
use holdem_engine::game::{GameConfig, GameState, Phase};

#[test]
fn fresh_session_starts_with_full_stacks_and_button_on_seat_one() {
    let state = GameState::new(GameConfig::default(), 42);
    assert_eq!(state.players[0].chips, 1000);
    assert_eq!(state.players[1].chips, 1000);
    assert_eq!(state.dealer_index, 1);
    assert!(state.players[1].is_dealer);
    assert!(!state.players[0].is_dealer);
    assert_eq!(state.phase, Phase::Preflop);
    assert_eq!(state.pot, 0);
    assert_eq!(state.hand_number, 0);
    assert_eq!(state.blind_level, 1);
    assert!(state.can_start_new_hand);
    assert!(!state.is_game_over);
}

#[test]
fn start_hand_posts_blinds_and_antes() {
    // smallBlind=10, bigBlind=20, bbAnte=5, stacks 1000/1000
    let state = GameState::new(GameConfig::default(), 42);
    let state = start_hand(&state).expect("deal");

    // dealer is seat 1, so seat 0 posts the small blind, seat 1 the big blind
    assert_eq!(state.pot, 10 + 20 + 5 + 5);
    assert_eq!(state.current_bet, 20);
    assert_eq!(state.players[0].chips, 985);
    assert_eq!(state.players[0].current_bet, 10);
    assert_eq!(state.players[1].chips, 975);
    assert_eq!(state.players[1].current_bet, 20);
    assert_eq!(state.hand_number, 1);
}

#[test]
fn start_hand_deals_two_hole_cards_per_seat_and_opens_after_the_blind() {
    let state = GameState::new(GameConfig::default(), 42);
    let state = start_hand(&state).expect("deal");
    assert!(state.players.iter().all(|p| p.hole_cards.len() == 2));
    assert!(state.community_cards.is_empty());
    // first actor is the seat after the big blind
    assert_eq!(state.active_player_index, 0);
    assert_eq!(state.phase, Phase::Preflop);
    assert!(state.winner.is_none());
}

#[test]
fn same_seed_deals_the_same_hand() {
    let a = start_hand(&GameState::new(GameConfig::default(), 7)).expect("deal");
    let b = start_hand(&GameState::new(GameConfig::default(), 7)).expect("deal");
    assert_eq!(a.players[0].hole_cards, b.players[0].hole_cards);
    assert_eq!(a.players[1].hole_cards, b.players[1].hole_cards);
}

#[test]
fn custom_stakes_flow_through() {
    let config = GameConfig {
        initial_chips: 500,
        small_blind: 5,
        big_blind: 10,
        bb_ante: 0,
        ..Default::default()
    };
    let state = GameState::new(config, 1);
    let state = start_hand(&state).expect("deal");
    assert_eq!(state.pot, 15);
    assert_eq!(state.current_bet, 10);
    assert_eq!(state.players[0].chips, 495);
    assert_eq!(state.players[1].chips, 490);
}
