//! Players, cards and deck rotation.
//!
//! Players are not ECS entities; the engine keeps one per side and
//! indexes them with `Side::index`.

use hecs::Entity;

use clash_core::constants::{DECK_SIZE, ELIXIR_MAX, HAND_SIZE};
use clash_core::enums::{CardKind, Side};
use clash_core::state::PlayerView;
use clash_core::stats::{card_def, CardDef};

/// A card in a player's deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub kind: CardKind,
    pub owner: Side,
}

impl Card {
    pub fn def(&self) -> CardDef {
        card_def(self.kind)
    }

    pub fn cost(&self) -> f64 {
        self.def().cost
    }
}

/// Seven cards stored contiguously; the first four are the hand and the
/// rest are the draw queue, next card first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(owner: Side, kinds: [CardKind; DECK_SIZE]) -> Self {
        Self {
            cards: kinds.iter().map(|&kind| Card { kind, owner }).collect(),
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.cards[..HAND_SIZE]
    }

    pub fn queue(&self) -> &[Card] {
        &self.cards[HAND_SIZE..]
    }

    /// Card in a hand slot. Queue slots are not playable.
    pub fn hand_card(&self, hand_index: usize) -> Option<&Card> {
        self.hand().get(hand_index)
    }

    /// Cycle after playing `hand_index`: the next queued card takes the
    /// vacated slot and the played card goes to the back of the queue.
    /// Out-of-range indices are ignored.
    pub fn cycle(&mut self, hand_index: usize) {
        if hand_index >= HAND_SIZE {
            return;
        }
        let used = self.cards.remove(hand_index);
        // With the used card removed, the first queued card sits at HAND_SIZE - 1.
        let next = self.cards.remove(HAND_SIZE - 1);
        self.cards.insert(hand_index, next);
        self.cards.push(used);
    }

    pub fn kinds(&self) -> Vec<CardKind> {
        self.cards.iter().map(|c| c.kind).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub side: Side,
    /// Always in [0, ELIXIR_MAX].
    pub elixir: f64,
    pub deck: Deck,
    /// Not owned; the tower lives in the world.
    pub king_tower: Option<Entity>,
}

impl Player {
    pub fn new(side: Side, elixir: f64, deck: [CardKind; DECK_SIZE]) -> Self {
        Self {
            side,
            elixir: elixir.clamp(0.0, ELIXIR_MAX),
            deck: Deck::new(side, deck),
            king_tower: None,
        }
    }

    pub fn can_afford(&self, hand_index: usize) -> bool {
        self.deck
            .hand_card(hand_index)
            .is_some_and(|card| self.elixir >= card.cost())
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            side: self.side,
            elixir: self.elixir,
            hand: self.deck.hand().iter().map(|c| c.kind).collect(),
            queue: self.deck.queue().iter().map(|c| c.kind).collect(),
        }
    }
}
