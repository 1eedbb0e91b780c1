use holdem_engine::cards::{Card, Rank as R, Suit as S};
use holdem_engine::engine::{apply_action, new_hand, next_phase, start_hand};
use holdem_engine::game::{GameConfig, GameState, Phase, Winner};
use holdem_engine::player::Action;

fn c(s: S, r: R) -> Card {
    Card { suit: s, rank: r }
}

fn fresh_hand(seed: u64) -> GameState {
    let state = GameState::new(GameConfig::default(), seed);
    start_hand(&state).expect("deal")
}

#[test]
fn fold_ends_the_hand_immediately() {
    let state = fresh_hand(42);
    let state = apply_action(&state, 0, Action::Fold).expect("legal");
    assert_eq!(state.phase, Phase::Showdown);
    assert_eq!(state.winner, Some(Winner::Seat(1)));
    assert!(state.winning_hand.is_none());

    // settling the showdown pays the pot to the surviving seat
    let state = next_phase(&state).expect("settle");
    assert_eq!(state.phase, Phase::Ended);
    assert_eq!(state.pot, 0);
    assert_eq!(state.players[1].chips, 975 + 40);
    assert_eq!(state.players[0].chips, 985);
}

#[test]
fn calling_and_checking_walk_through_every_street() {
    let mut state = fresh_hand(42);
    // preflop: small blind completes, big blind checks
    state = apply_action(&state, 0, Action::Call).expect("call");
    state = apply_action(&state, 1, Action::Check).expect("check");
    assert_eq!(state.phase, Phase::Flop);
    assert_eq!(state.community_cards.len(), 3);
    assert_eq!(state.current_bet, 0);
    assert!(state.players.iter().all(|p| p.current_bet == 0));
    // postflop action starts after the dealer
    assert_eq!(state.active_player_index, 0);

    for (expected_phase, expected_cards) in [(Phase::Turn, 4), (Phase::River, 5)] {
        state = apply_action(&state, 0, Action::Check).expect("check");
        state = apply_action(&state, 1, Action::Check).expect("check");
        assert_eq!(state.phase, expected_phase);
        assert_eq!(state.community_cards.len(), expected_cards);
    }

    // river checks run the showdown
    state = apply_action(&state, 0, Action::Check).expect("check");
    state = apply_action(&state, 1, Action::Check).expect("check");
    assert_eq!(state.phase, Phase::Showdown);
    assert!(state.winner.is_some());
    assert!(state
        .players
        .iter()
        .all(|p| p.best_hand.is_some()));
}

#[test]
fn raise_reopens_the_action() {
    let mut state = fresh_hand(42);
    state = apply_action(&state, 0, Action::Call).expect("call");
    // big blind raises; the caller must get another turn
    state = apply_action(&state, 1, Action::Raise(40)).expect("raise");
    assert_eq!(state.phase, Phase::Preflop);
    assert_eq!(state.active_player_index, 0);
    assert_eq!(state.current_bet, 60);
    assert!(!state.players[0].has_acted);

    state = apply_action(&state, 0, Action::Call).expect("call");
    assert_eq!(state.phase, Phase::Flop);
    assert_eq!(state.pot, 40 + 10 + 40 + 40);
}

#[test]
fn short_all_in_call_completes_the_round() {
    let mut state = fresh_hand(42);
    state.players[1].chips = 300; // big blind is short this hand
    state = apply_action(&state, 0, Action::Raise(500)).expect("raise");
    state = apply_action(&state, 1, Action::AllIn).expect("shove");
    assert!(state.players[1].is_all_in);
    // the round must not stall even though the bets stay unequal
    assert_eq!(state.phase, Phase::Flop);
    assert_eq!(state.community_cards.len(), 3);
}

#[test]
fn all_in_preflop_runs_out_the_board() {
    let mut state = fresh_hand(42);
    state = apply_action(&state, 0, Action::AllIn).expect("shove");
    // the shove raised the bet, so the big blind gets its turn back
    assert_eq!(state.active_player_index, 1);
    state = apply_action(&state, 1, Action::Call).expect("call");

    assert!(state.players.iter().all(|p| p.is_all_in));
    assert_eq!(state.community_cards.len(), 5);
    assert_eq!(state.phase, Phase::Showdown);
    assert!(state.winner.is_some());
    assert_eq!(state.pot, 2000);
}

#[test]
fn board_tie_splits_the_pot_with_remainder_to_the_first_seat() {
    let mut state = GameState::new(GameConfig::default(), 1);
    // both seats play a royal flush on the board
    state.phase = Phase::River;
    state.community_cards = vec![
        c(S::Spades, R::Ten),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Queen),
        c(S::Spades, R::King),
        c(S::Spades, R::Ace),
    ];
    state.players[0].hole_cards = vec![c(S::Hearts, R::Two), c(S::Diamonds, R::Three)];
    state.players[1].hole_cards = vec![c(S::Clubs, R::Four), c(S::Diamonds, R::Seven)];
    state.players[0].chips = 950;
    state.players[1].chips = 949;
    state.pot = 101;
    state.active_player_index = 0;

    let state = apply_action(&state, 0, Action::Check).expect("check");
    let state = apply_action(&state, 1, Action::Check).expect("check");
    assert_eq!(state.phase, Phase::Showdown);
    assert_eq!(state.winner, Some(Winner::Tie));
    assert!(state.winning_hand.is_some());

    let state = next_phase(&state).expect("settle");
    assert_eq!(state.phase, Phase::Ended);
    assert_eq!(state.pot, 0);
    // 101 chips: 50 each, the odd chip goes to the first contending seat
    assert_eq!(state.players[0].chips, 950 + 51);
    assert_eq!(state.players[1].chips, 949 + 50);
}

#[test]
fn next_phase_is_inert_while_the_round_is_open() {
    let state = fresh_hand(42);
    let unchanged = next_phase(&state).expect("no-op");
    assert_eq!(unchanged.phase, Phase::Preflop);
    assert_eq!(unchanged.community_cards.len(), 0);
}

#[test]
fn new_hand_rotates_the_button_and_reshuffles() {
    let mut state = fresh_hand(42);
    state = apply_action(&state, 0, Action::Fold).expect("fold");
    state = next_phase(&state).expect("settle");

    let next = new_hand(&state);
    assert_eq!(next.dealer_index, 0);
    assert!(next.players[0].is_dealer);
    assert_eq!(next.phase, Phase::Preflop);
    assert_eq!(next.pot, 0);
    assert!(next.community_cards.is_empty());
    assert!(next.winner.is_none());
    assert!(next.players.iter().all(|p| p.hole_cards.is_empty()));
    assert_eq!(
        next.hands_until_blind_increase,
        state.hands_until_blind_increase - 1
    );
}

#[test]
fn blinds_escalate_every_ten_hands() {
    let mut state = fresh_hand(42);
    state = apply_action(&state, 0, Action::Fold).expect("fold");
    state = next_phase(&state).expect("settle");
    state.hand_number = 10;

    let next = new_hand(&state);
    assert_eq!(next.small_blind, 15);
    assert_eq!(next.big_blind, 30);
    assert_eq!(next.bb_ante, 7);
    assert_eq!(next.blind_level, 2);
    assert_eq!(next.hands_until_blind_increase, 10);
}
