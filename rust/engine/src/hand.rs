use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;

/// The ten poker hand categories, weakest to strongest. The discriminant is
/// the leading base-15 digit of [`HandRank::score`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn rank(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Highest packable score: a royal flush digit followed by five aces.
/// Used by the AI to normalize scores into [0, 1].
pub const MAX_SCORE: u32 =
    10 * 15u32.pow(5) + 14 * (15u32.pow(4) + 15u32.pow(3) + 15u32.pow(2) + 15 + 1);

/// A ranked 5-card hand.
///
/// `score` packs the category and up to five rank values as base-15 digits,
/// so one integer comparison resolves any pair of hands, kickers included.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    /// The cards forming the category (the pair, the quads, the flush, ...)
    pub cards: Vec<Card>,
    /// Remaining cards, ordered by descending rank
    pub kickers: Vec<Card>,
    pub score: u32,
}

impl HandRank {
    /// Short human-readable summary, e.g. `Full House (Ks over 8s)`.
    pub fn describe(&self) -> String {
        match self.category {
            Category::RoyalFlush => self.category.name().to_string(),
            Category::StraightFlush | Category::Straight => format!(
                "{} ({} high)",
                self.category.name(),
                self.cards[0].rank.value()
            ),
            Category::FullHouse => format!(
                "{} ({}s over {}s)",
                self.category.name(),
                self.cards[0].rank.value(),
                self.cards[3].rank.value()
            ),
            Category::TwoPair => format!(
                "{} ({}s and {}s)",
                self.category.name(),
                self.cards[0].rank.value(),
                self.cards[2].rank.value()
            ),
            _ => format!("{} ({})", self.category.name(), self.cards[0]),
        }
    }
}

/// Ranks the best 5-card hand available in a 5..7 card pool.
///
/// Five cards classify directly; six or seven enumerate every 5-card subset
/// (at most C(7,5) = 21) and keep the highest score. Pure: the input slice
/// is never reordered or mutated.
///
/// # Errors
///
/// [`EngineError::InsufficientCards`] when fewer than 5 cards are given.
pub fn evaluate(cards: &[Card]) -> Result<HandRank, EngineError> {
    if cards.len() < 5 {
        return Err(EngineError::InsufficientCards {
            actual: cards.len(),
        });
    }
    if cards.len() == 5 {
        return Ok(evaluate_five(cards));
    }
    let mut best = evaluate_five(&cards[..5]);
    for combo in combinations(cards, 5) {
        let ranked = evaluate_five(&combo);
        if ranked.score > best.score {
            best = ranked;
        }
    }
    Ok(best)
}

/// Classifies exactly 5 cards, strongest category first.
fn evaluate_five(cards: &[Card]) -> HandRank {
    let sorted = sort_desc(cards);
    check_royal_flush(&sorted)
        .or_else(|| check_straight_flush(&sorted))
        .or_else(|| check_four_of_a_kind(&sorted))
        .or_else(|| check_full_house(&sorted))
        .or_else(|| check_flush(&sorted))
        .or_else(|| check_straight(&sorted))
        .or_else(|| check_three_of_a_kind(&sorted))
        .or_else(|| check_two_pair(&sorted))
        .or_else(|| check_one_pair(&sorted))
        .unwrap_or_else(|| high_card(&sorted))
}

/// Total order over two ranked hands via the packed score.
pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.score.cmp(&b.score)
}

/// All indices sharing the maximum score; more than one entry means a tie.
pub fn determine_winners(hands: &[HandRank]) -> Vec<usize> {
    let Some(best) = hands.iter().map(|h| h.score).max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, h)| h.score == best)
        .map(|(i, _)| i)
        .collect()
}

// Score packing: category * 15^5 plus positional rank digits, high first.
fn pack_score(category: Category, values: &[u8]) -> u32 {
    let mut score = category.rank() * 15u32.pow(5);
    for (i, &v) in values.iter().take(5).enumerate() {
        score += v as u32 * 15u32.pow(4 - i as u32);
    }
    score
}

fn sort_desc(cards: &[Card]) -> Vec<Card> {
    let mut v = cards.to_vec();
    v.sort_by(|a, b| b.rank.value().cmp(&a.rank.value()));
    v
}

fn values_desc(cards: &[Card]) -> Vec<u8> {
    cards.iter().map(|c| c.rank.value()).collect()
}

/// Rank groups as (rank value, cards), largest group first, ties by rank.
fn rank_groups(cards: &[Card]) -> Vec<(u8, Vec<Card>)> {
    let mut groups: Vec<(u8, Vec<Card>)> = Vec::new();
    for &c in cards {
        let v = c.rank.value();
        match groups.iter_mut().find(|(r, _)| *r == v) {
            Some((_, g)) => g.push(c),
            None => groups.push((v, vec![c])),
        }
    }
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(b.0.cmp(&a.0)));
    groups
}

fn is_flush(cards: &[Card]) -> bool {
    cards.iter().all(|c| c.suit == cards[0].suit)
}

/// High card value of a 5-card straight, with the wheel (A-2-3-4-5)
/// reported as 5-high. `None` when the cards do not form a straight.
/// Expects the cards sorted descending by rank.
fn straight_high(cards: &[Card]) -> Option<u8> {
    let values = values_desc(cards);
    if values.windows(2).all(|w| w[0] - w[1] == 1) {
        return Some(values[0]);
    }
    if values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn check_royal_flush(cards: &[Card]) -> Option<HandRank> {
    if is_flush(cards) && straight_high(cards) == Some(14) {
        return Some(HandRank {
            category: Category::RoyalFlush,
            cards: cards.to_vec(),
            kickers: Vec::new(),
            score: pack_score(Category::RoyalFlush, &[]),
        });
    }
    None
}

fn check_straight_flush(cards: &[Card]) -> Option<HandRank> {
    if !is_flush(cards) {
        return None;
    }
    let high = straight_high(cards)?;
    Some(HandRank {
        category: Category::StraightFlush,
        cards: cards.to_vec(),
        kickers: Vec::new(),
        score: pack_score(Category::StraightFlush, &[high]),
    })
}

fn check_four_of_a_kind(cards: &[Card]) -> Option<HandRank> {
    let groups = rank_groups(cards);
    if groups[0].1.len() != 4 {
        return None;
    }
    let quad_value = groups[0].0;
    let kicker = groups[1].1[0];
    Some(HandRank {
        category: Category::FourOfAKind,
        cards: groups[0].1.clone(),
        kickers: vec![kicker],
        score: pack_score(Category::FourOfAKind, &[quad_value, kicker.rank.value()]),
    })
}

fn check_full_house(cards: &[Card]) -> Option<HandRank> {
    let groups = rank_groups(cards);
    if groups.len() != 2 || groups[0].1.len() != 3 {
        return None;
    }
    let (trip_value, pair_value) = (groups[0].0, groups[1].0);
    let mut formed = groups[0].1.clone();
    formed.extend_from_slice(&groups[1].1);
    Some(HandRank {
        category: Category::FullHouse,
        cards: formed,
        kickers: Vec::new(),
        score: pack_score(Category::FullHouse, &[trip_value, pair_value]),
    })
}

fn check_flush(cards: &[Card]) -> Option<HandRank> {
    if !is_flush(cards) {
        return None;
    }
    Some(HandRank {
        category: Category::Flush,
        cards: cards.to_vec(),
        kickers: Vec::new(),
        score: pack_score(Category::Flush, &values_desc(cards)),
    })
}

fn check_straight(cards: &[Card]) -> Option<HandRank> {
    let high = straight_high(cards)?;
    Some(HandRank {
        category: Category::Straight,
        cards: cards.to_vec(),
        kickers: Vec::new(),
        score: pack_score(Category::Straight, &[high]),
    })
}

fn check_three_of_a_kind(cards: &[Card]) -> Option<HandRank> {
    let groups = rank_groups(cards);
    if groups[0].1.len() != 3 || groups.len() != 3 {
        return None;
    }
    let trip_value = groups[0].0;
    let kickers: Vec<Card> = vec![groups[1].1[0], groups[2].1[0]];
    Some(HandRank {
        category: Category::ThreeOfAKind,
        cards: groups[0].1.clone(),
        kickers: kickers.clone(),
        score: pack_score(
            Category::ThreeOfAKind,
            &[trip_value, kickers[0].rank.value(), kickers[1].rank.value()],
        ),
    })
}

fn check_two_pair(cards: &[Card]) -> Option<HandRank> {
    let groups = rank_groups(cards);
    if groups.len() != 3 || groups[0].1.len() != 2 || groups[1].1.len() != 2 {
        return None;
    }
    let (high_pair, low_pair) = (groups[0].0, groups[1].0);
    let kicker = groups[2].1[0];
    let mut formed = groups[0].1.clone();
    formed.extend_from_slice(&groups[1].1);
    Some(HandRank {
        category: Category::TwoPair,
        cards: formed,
        kickers: vec![kicker],
        score: pack_score(
            Category::TwoPair,
            &[high_pair, low_pair, kicker.rank.value()],
        ),
    })
}

fn check_one_pair(cards: &[Card]) -> Option<HandRank> {
    let groups = rank_groups(cards);
    if groups[0].1.len() != 2 {
        return None;
    }
    let pair_value = groups[0].0;
    let kickers: Vec<Card> = groups[1..].iter().map(|(_, g)| g[0]).collect();
    let mut digits = vec![pair_value];
    digits.extend(kickers.iter().map(|c| c.rank.value()));
    Some(HandRank {
        category: Category::OnePair,
        cards: groups[0].1.clone(),
        kickers,
        score: pack_score(Category::OnePair, &digits),
    })
}

fn high_card(cards: &[Card]) -> HandRank {
    HandRank {
        category: Category::HighCard,
        cards: vec![cards[0]],
        kickers: cards[1..].to_vec(),
        score: pack_score(Category::HighCard, &values_desc(cards)),
    }
}

/// All `size`-card subsets of `cards`, in index order.
fn combinations(cards: &[Card], size: usize) -> Vec<Vec<Card>> {
    fn backtrack(
        cards: &[Card],
        size: usize,
        start: usize,
        current: &mut Vec<Card>,
        out: &mut Vec<Vec<Card>>,
    ) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..cards.len() {
            current.push(cards[i]);
            backtrack(cards, size, i + 1, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    backtrack(cards, size, 0, &mut Vec::new(), &mut out);
    out
}
