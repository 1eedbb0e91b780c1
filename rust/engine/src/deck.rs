use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// An ordered deck of the 52 unique cards plus the RNG that shuffles it.
/// Dealing advances a cursor instead of removing elements, so the cards
/// already handed out stay reachable for duplicate auditing.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Keeps the initial card order until [`shuffle`](Deck::shuffle) is
    /// called explicitly.
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Rebuilds the full 52-card deck and Fisher-Yates shuffles it.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Deals `n` cards off the top, failing without side effects if the
    /// deck cannot cover the request.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.remaining() < n {
            return Err(EngineError::DeckExhausted {
                requested: n,
                remaining: self.remaining(),
            });
        }
        Ok((0..n).filter_map(|_| self.deal_card()).collect())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards not yet dealt, in order.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.position..]
    }

    /// Cards already dealt this hand, in deal order.
    pub fn dealt_cards(&self) -> &[Card] {
        &self.cards[..self.position]
    }
}
