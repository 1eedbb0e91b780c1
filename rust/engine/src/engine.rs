//! The betting state machine: hand lifecycle, action application, phase
//! transitions, showdown and payout.
//!
//! Every transition takes `&GameState` and returns a fresh state. An `Err`
//! means the input state was left untouched, so illegal requests can never
//! half-apply.

use crate::blinds;
use crate::errors::EngineError;
use crate::game::{GameOverReason, GameState, Phase, Winner};
use crate::hand::{self, HandRank};
use crate::player::{Action, Player};

/// An action currently available to a seat, with its legal amount bounds.
/// Computed on demand from the state; there is no stored option list to
/// fall out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalAction {
    Fold,
    Check,
    Call { amount: u32 },
    Bet { min: u32, max: u32 },
    Raise { min: u32, max: u32 },
    AllIn { amount: u32 },
}

impl LegalAction {
    pub fn matches(&self, action: Action) -> bool {
        match (self, action) {
            (LegalAction::Fold, Action::Fold) => true,
            (LegalAction::Check, Action::Check) => true,
            (LegalAction::Call { .. }, Action::Call) => true,
            (LegalAction::Bet { min, max }, Action::Bet(a)) => a >= *min && a <= *max,
            (LegalAction::Raise { min, max }, Action::Raise(a)) => a >= *min && a <= *max,
            (LegalAction::AllIn { .. }, Action::AllIn) => true,
            _ => false,
        }
    }
}

/// Actions the seat may take right now. Empty when the seat is folded,
/// all-in, or the hand is past the betting phases.
pub fn legal_actions(state: &GameState, seat: usize) -> Vec<LegalAction> {
    let player = &state.players[seat];
    if !state.phase.accepts_actions() || player.has_folded || player.is_all_in {
        return Vec::new();
    }
    let mut out = vec![LegalAction::Fold];
    let to_call = state.amount_to_call(seat);
    if to_call == 0 {
        out.push(LegalAction::Check);
    } else if to_call <= player.chips {
        out.push(LegalAction::Call { amount: to_call });
    }
    if state.current_bet == 0 {
        if player.chips > 0 {
            out.push(LegalAction::Bet {
                min: 1,
                max: player.chips,
            });
        }
    } else {
        let min_raise = state.current_bet * 2;
        if player.chips >= min_raise {
            out.push(LegalAction::Raise {
                min: min_raise,
                max: player.chips,
            });
        }
    }
    if player.chips > 0 {
        out.push(LegalAction::AllIn {
            amount: player.chips,
        });
    }
    out
}

/// Resets the table for the next hand: dealer button rotates, stacks keep
/// their chips, the deck reshuffles, and the blind schedule ticks (every
/// `blind_increase_interval` completed hands the amounts step up by the
/// configured multiplier, floor-rounded).
pub fn new_hand(state: &GameState) -> GameState {
    let mut next = state.clone();
    let interval = next.config.blind_increase_interval;
    if blinds::should_increase_blinds(next.hand_number, interval) {
        let (sb, bb, ante) = blinds::increase_blinds(
            next.small_blind,
            next.big_blind,
            next.bb_ante,
            next.config.blind_increase_multiplier,
        );
        next.small_blind = sb;
        next.big_blind = bb;
        next.bb_ante = ante;
        next.blind_level += 1;
        next.hands_until_blind_increase = interval;
    } else {
        next.hands_until_blind_increase = next.hands_until_blind_increase.saturating_sub(1);
    }
    next.dealer_index = next.seat_after(next.dealer_index);
    let dealer = next.dealer_index;
    for (i, p) in next.players.iter_mut().enumerate() {
        p.reset_for_hand(i == dealer);
    }
    next.community_cards.clear();
    next.pot = 0;
    next.current_bet = 0;
    next.phase = Phase::Preflop;
    next.active_player_index = 0;
    next.deck.shuffle();
    next.winner = None;
    next.winning_hand = None;
    next
}

/// Posts blinds and antes, deals hole cards, and opens the preflop round.
///
/// The two seats after the dealer post small and big blind (each plus the
/// per-player ante); the table bet becomes the big blind and the seat after
/// the big blind acts first.
pub fn start_hand(state: &GameState) -> Result<GameState, EngineError> {
    let mut next = state.clone();
    let sb_seat = next.seat_after(next.dealer_index);
    let bb_seat = next.seat_after(sb_seat);

    for p in next.players.iter_mut() {
        p.hole_cards.clear();
        p.current_bet = 0;
        p.has_acted = false;
        p.has_folded = false;
        p.is_all_in = false;
        p.best_hand = None;
    }

    let (small_blind, big_blind, ante) = (next.small_blind, next.big_blind, next.bb_ante);
    let mut pot = 0;
    pot += post(&mut next.players[sb_seat], ante);
    let sb_posted = post(&mut next.players[sb_seat], small_blind);
    next.players[sb_seat].current_bet = sb_posted;
    pot += sb_posted;
    pot += post(&mut next.players[bb_seat], ante);
    let bb_posted = post(&mut next.players[bb_seat], big_blind);
    next.players[bb_seat].current_bet = bb_posted;
    pot += bb_posted;

    next.pot = pot;
    next.current_bet = big_blind;
    next.active_player_index = next.seat_after(bb_seat);
    next.phase = Phase::Preflop;
    next.winner = None;
    next.winning_hand = None;
    next.hand_number += 1;

    for i in 0..next.players.len() {
        let cards = next.deck.deal(2)?;
        next.players[i].hole_cards = cards;
    }
    Ok(next)
}

/// A fresh session at base stakes, keeping the seat names.
pub fn start_new_game(state: &GameState, seed: u64) -> GameState {
    let config = crate::game::GameConfig {
        player_name: state.players[0].name.clone(),
        cpu_name: state.players[1].name.clone(),
        ..Default::default()
    };
    GameState::new(config, seed)
}

/// Applies one player action and advances the turn.
///
/// Rejects out-of-turn and illegal requests at the boundary without
/// touching the state. After a legal action the active seat moves on, and
/// when the betting round is complete the phase machinery runs: deal the
/// next street, or evaluate the showdown, or settle a fold-out.
pub fn apply_action(
    state: &GameState,
    seat: usize,
    action: Action,
) -> Result<GameState, EngineError> {
    validate_action(state, seat, action)?;

    let mut next = state.clone();
    let prior_bet = next.current_bet;
    {
        let player = &mut next.players[seat];
        match action {
            Action::Fold => {
                player.has_folded = true;
                player.has_acted = true;
            }
            Action::Check => {
                player.has_acted = true;
            }
            Action::Call => {
                let owed = prior_bet.saturating_sub(player.current_bet);
                let paid = owed.min(player.chips);
                player.chips -= paid;
                player.current_bet += paid;
                player.has_acted = true;
                next.pot += paid;
                if player.chips == 0 {
                    player.is_all_in = true;
                }
            }
            Action::Bet(amount) | Action::Raise(amount) => {
                player.chips -= amount;
                player.current_bet += amount;
                player.has_acted = true;
                next.pot += amount;
                next.current_bet = next.current_bet.max(player.current_bet);
                if player.chips == 0 {
                    player.is_all_in = true;
                }
            }
            Action::AllIn => {
                let shove = player.chips;
                player.chips = 0;
                player.current_bet += shove;
                player.is_all_in = true;
                player.has_acted = true;
                next.pot += shove;
                next.current_bet = next.current_bet.max(player.current_bet);
            }
        }
    }

    // A wager that raised the table bet re-opens the action for every seat
    // that has not folded or shoved. Plain opening bets do not: nobody has
    // acted behind them yet.
    let reopened = matches!(action, Action::Raise(_))
        || (matches!(action, Action::AllIn) && next.current_bet > prior_bet);
    if reopened {
        for p in next.players.iter_mut() {
            if p.id != seat {
                p.has_acted = p.has_folded || p.is_all_in;
            }
        }
    }

    advance_turn(next)
}

/// Advances a completed round to the next street; on showdown, settles the
/// pot. A call while the round is still open returns the state unchanged.
pub fn next_phase(state: &GameState) -> Result<GameState, EngineError> {
    match state.phase {
        Phase::Showdown => Ok(distribute_pot(state.clone())),
        Phase::Ended => Ok(state.clone()),
        _ => {
            if !round_complete(state) {
                return Ok(state.clone());
            }
            advance_street(state.clone())
        }
    }
}

/// Re-runs the continuation checks (used by callers after external
/// adjustments; the engine runs the same checks itself after each payout).
pub fn check_game_over(state: &GameState) -> GameState {
    let mut next = apply_game_over_flags(state.clone());
    if next.is_game_over {
        next.phase = Phase::Ended;
    }
    next
}

fn validate_action(state: &GameState, seat: usize, action: Action) -> Result<(), EngineError> {
    if !state.phase.accepts_actions() {
        return Err(EngineError::HandNotInProgress {
            phase: state.phase.to_string(),
        });
    }
    if seat >= state.players.len() || state.active_player_index != seat {
        return Err(EngineError::NotPlayersTurn {
            expected: state.active_player_index,
            actual: seat,
        });
    }
    let player = &state.players[seat];
    if player.has_folded {
        return Err(EngineError::InvalidPlayerAction {
            action,
            reason: "player has already folded".into(),
        });
    }
    if player.is_all_in {
        return Err(EngineError::InvalidPlayerAction {
            action,
            reason: "player is all-in".into(),
        });
    }
    match action {
        Action::Fold | Action::Call | Action::AllIn => Ok(()),
        Action::Check => {
            if state.amount_to_call(seat) == 0 {
                Ok(())
            } else {
                Err(EngineError::InvalidPlayerAction {
                    action,
                    reason: "cannot check while facing a bet".into(),
                })
            }
        }
        Action::Bet(amount) => {
            if state.current_bet > 0 {
                return Err(EngineError::InvalidPlayerAction {
                    action,
                    reason: "the round already has a bet; raise instead".into(),
                });
            }
            if amount == 0 {
                return Err(EngineError::InvalidBetAmount { amount, minimum: 1 });
            }
            if amount > player.chips {
                return Err(EngineError::InsufficientChips);
            }
            Ok(())
        }
        Action::Raise(amount) => {
            if state.current_bet == 0 {
                return Err(EngineError::InvalidPlayerAction {
                    action,
                    reason: "nothing to raise; bet instead".into(),
                });
            }
            if amount > player.chips {
                return Err(EngineError::InsufficientChips);
            }
            let minimum = state.current_bet * 2;
            if amount < minimum {
                return Err(EngineError::InvalidBetAmount { amount, minimum });
            }
            Ok(())
        }
    }
}

/// A betting round is complete when at most one contender remains, when
/// nobody can still act, or when every seat that can act has acted and
/// matched the highest live bet. The last clause deliberately exempts
/// all-in seats from the matching requirement: a short shove must not stall
/// the round.
fn round_complete(state: &GameState) -> bool {
    let contenders: Vec<&Player> = state.players.iter().filter(|p| !p.has_folded).collect();
    if contenders.len() <= 1 {
        return true;
    }
    let actors: Vec<&&Player> = contenders.iter().filter(|p| !p.is_all_in).collect();
    if actors.is_empty() {
        return true;
    }
    let highest = contenders.iter().map(|p| p.current_bet).max().unwrap_or(0);
    actors.iter().all(|p| p.has_acted && p.current_bet == highest)
}

fn next_eligible_seat(state: &GameState) -> Option<usize> {
    let n = state.players.len();
    let mut idx = (state.active_player_index + 1) % n;
    for _ in 0..n {
        if state.players[idx].can_act() {
            return Some(idx);
        }
        idx = (idx + 1) % n;
    }
    None
}

fn advance_turn(state: GameState) -> Result<GameState, EngineError> {
    if round_complete(&state) {
        if state.contenders().len() <= 1 {
            return Ok(determine_winner(state));
        }
        return advance_street(state);
    }
    match next_eligible_seat(&state) {
        Some(seat) => {
            let mut next = state;
            next.active_player_index = seat;
            Ok(next)
        }
        None => advance_street(state),
    }
}

/// Moves a finished round to the next street: community cards dealt per
/// phase (3, then 1, then 1), table and per-seat bets reset, first action
/// to the seat after the dealer. Folded seats keep `has_acted` so the turn
/// order skips them for the rest of the hand. Completing the river street
/// goes straight to showdown evaluation.
fn advance_street(state: GameState) -> Result<GameState, EngineError> {
    let prior = state.phase;
    if !prior.accepts_actions() {
        return Ok(state);
    }
    let mut next = state;
    next.phase = prior.next();
    next.current_bet = 0;
    for p in next.players.iter_mut() {
        p.current_bet = 0;
        p.has_acted = p.has_folded;
    }
    match prior {
        Phase::Preflop => {
            let cards = next.deck.deal(3)?;
            next.community_cards.extend(cards);
        }
        Phase::Flop | Phase::Turn => {
            let cards = next.deck.deal(1)?;
            next.community_cards.extend(cards);
        }
        Phase::River => {
            return evaluate_showdown(next);
        }
        Phase::Showdown | Phase::Ended => {}
    }
    next.active_player_index = next.seat_after(next.dealer_index);
    // Everyone already all-in: no betting is possible on this street either,
    // run it out.
    if round_complete(&next) && next.contenders().len() > 1 {
        return advance_street(next);
    }
    Ok(next)
}

/// Ranks every contender's best 7-card hand, then decides the winner.
fn evaluate_showdown(mut state: GameState) -> Result<GameState, EngineError> {
    for p in state.players.iter_mut() {
        if p.has_folded {
            continue;
        }
        let mut pool = p.hole_cards.clone();
        pool.extend_from_slice(&state.community_cards);
        p.best_hand = Some(hand::evaluate(&pool)?);
    }
    Ok(determine_winner(state))
}

/// A lone contender wins without evaluation (`winning_hand` stays empty);
/// otherwise scores decide, with every max-score seat sharing a tie.
fn determine_winner(mut state: GameState) -> GameState {
    let contenders = state.contenders();
    state.phase = Phase::Showdown;
    if contenders.len() == 1 {
        state.winner = Some(Winner::Seat(contenders[0]));
        state.winning_hand = None;
        return state;
    }
    let ranked: Vec<(usize, HandRank)> = contenders
        .iter()
        .filter_map(|&s| state.players[s].best_hand.clone().map(|h| (s, h)))
        .collect();
    if ranked.is_empty() {
        state.winner = None;
        state.winning_hand = None;
        return state;
    }
    let hands: Vec<HandRank> = ranked.iter().map(|(_, h)| h.clone()).collect();
    let winners = hand::determine_winners(&hands);
    if winners.len() == 1 {
        let (seat, ref best) = ranked[winners[0]];
        state.winner = Some(Winner::Seat(seat));
        state.winning_hand = Some(best.clone());
    } else {
        state.winner = Some(Winner::Tie);
        state.winning_hand = Some(hands[winners[0]].clone());
    }
    state
}

/// Pays the pot out and ends the hand. A tie splits by floor division with
/// the remainder going to the first contending seat, so no chip is lost.
fn distribute_pot(mut state: GameState) -> GameState {
    match state.winner {
        Some(Winner::Seat(seat)) => {
            state.players[seat].chips += state.pot;
        }
        Some(Winner::Tie) => {
            let contenders = state.contenders();
            let share = state.pot / contenders.len() as u32;
            let remainder = state.pot % contenders.len() as u32;
            for (i, &seat) in contenders.iter().enumerate() {
                state.players[seat].chips += share + if i == 0 { remainder } else { 0 };
            }
        }
        None => {}
    }
    state.pot = 0;
    state.phase = Phase::Ended;
    apply_game_over_flags(state)
}

/// The session ends when a seat can no longer cover big blind + ante. The
/// surviving seat becomes the session winner; if neither can continue the
/// hand's result stands and no session winner is declared.
fn apply_game_over_flags(mut state: GameState) -> GameState {
    let min_required = state.big_blind + state.bb_ante;
    let short: Vec<usize> = state
        .players
        .iter()
        .filter(|p| p.chips < min_required)
        .map(|p| p.id)
        .collect();
    match short.len() {
        2 => {
            state.is_game_over = true;
            state.game_over_reason = Some(GameOverReason::BothSeatsShort);
        }
        1 => {
            state.is_game_over = true;
            state.game_over_reason = Some(GameOverReason::SeatShort(short[0]));
            state.winner = Some(Winner::Seat(1 - short[0]));
        }
        _ => {
            state.is_game_over = false;
            state.game_over_reason = None;
        }
    }
    state.can_start_new_hand = !state.is_game_over;
    state.can_start_new_game = true;
    state
}

fn post(player: &mut Player, amount: u32) -> u32 {
    let posted = amount.min(player.chips);
    player.chips -= posted;
    if player.chips == 0 && posted > 0 {
        player.is_all_in = true;
    }
    posted
}
