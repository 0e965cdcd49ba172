use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Face, Rank, Suit};
use crate::domain::CardId;

/// Колода раунда. `cards[id].id == id` – позиция в колоде и есть id карты.
///
/// Перемешивание делает engine (через RandomSource), НЕ здесь:
/// сюда приходят уже перемешанные лица, и после `from_faces`
/// соответствие id ↔ (масть, ранг) больше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Набор лиц до перемешивания:
    /// Spade A..K, Heart A..K, Club A..K, Diamond A..K – `copies` раз,
    /// затем `wildcards` джокеров в хвосте.
    pub fn standard_faces(copies: u8, wildcards: u8) -> Vec<Face> {
        let mut base = Vec::with_capacity(52);
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                base.push(Face::new(rank, suit));
            }
        }

        let mut faces = Vec::with_capacity(base.len() * copies as usize + wildcards as usize);
        for _ in 0..copies {
            faces.extend_from_slice(&base);
        }
        faces.extend(std::iter::repeat(Face::JOKER).take(wildcards as usize));
        faces
    }

    /// Зафиксировать колоду: позиция i получает id i.
    pub fn from_faces(faces: Vec<Face>) -> Self {
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(i, face)| Card::from_face(i as CardId, face))
            .collect();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Все карты в порядке колоды (= порядок id).
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.cards.get(id as usize).copied()
    }

    pub fn contains(&self, id: CardId) -> bool {
        (id as usize) < self.cards.len()
    }

    pub fn rank_of(&self, id: CardId) -> Option<Rank> {
        self.card(id).map(|c| c.rank)
    }

    pub fn suit_of(&self, id: CardId) -> Option<Suit> {
        self.card(id).map(|c| c.suit)
    }

    /// Неизвестный id – не джокер.
    pub fn is_wildcard(&self, id: CardId) -> bool {
        self.card(id).map_or(false, |c| c.is_wildcard())
    }

    /// Карты по списку id (неизвестные id пропускаются).
    pub fn lookup(&self, ids: &[CardId]) -> Vec<Card> {
        ids.iter().filter_map(|&id| self.card(id)).collect()
    }
}
