use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::CardId;

/// Минимальный размер группы.
pub const MIN_GROUP_SIZE: usize = 3;

/// Длиннее 13 ранговых слотов (A..K) run быть не может.
pub const MAX_RUN_LEN: usize = Rank::STANDARD.len();

/// Тип комбинации.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MeldKind {
    /// Одинаковый ранг, масти любые.
    Set,
    /// Одна масть, ранги подряд (джокеры закрывают дырки).
    Run,
}

/// Найденная комбинация: тип + id карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meld {
    pub kind: MeldKind,
    pub cards: Vec<CardId>,
}

/// Set: все не-джокеры одного ранга.
pub fn is_valid_set(cards: &[Card]) -> bool {
    cards.len() >= MIN_GROUP_SIZE && could_be_set(cards)
}

/// Run: одна масть, ранги попарно различны, сумма дырок ≤ числа джокеров.
///
/// Туз только младший, перехода K-A нет.
pub fn is_valid_run(cards: &[Card]) -> bool {
    if cards.len() < MIN_GROUP_SIZE || cards.len() > MAX_RUN_LEN {
        return false;
    }

    let wildcards = cards.iter().filter(|c| c.is_wildcard()).count();
    let mut ranks: Vec<u8> = Vec::with_capacity(cards.len());
    let mut suit = None;

    for c in cards.iter().filter(|c| !c.is_wildcard()) {
        match suit {
            None => suit = Some(c.suit),
            Some(s) if s != c.suit => return false,
            Some(_) => {}
        }
        ranks.push(c.rank.value());
    }

    ranks.sort_unstable();
    let mut gaps = 0usize;
    for pair in ranks.windows(2) {
        if pair[0] == pair[1] {
            return false;
        }
        gaps += (pair[1] - pair[0] - 1) as usize;
    }

    gaps <= wildcards
}

/// Определить тип группы. Группа из одних джокеров считается Set.
pub fn classify_group(cards: &[Card]) -> Option<MeldKind> {
    if is_valid_set(cards) {
        Some(MeldKind::Set)
    } else if is_valid_run(cards) {
        Some(MeldKind::Run)
    } else {
        None
    }
}

/// Можно ли, добавляя карты, ещё получить валидную группу.
///
/// Если не-джокеры уже разного ранга И (разной масти или с повтором ранга),
/// никакое надмножество не станет ни set, ни run.
pub fn can_grow_into_group(cards: &[Card]) -> bool {
    if cards.len() > MAX_RUN_LEN && !could_be_set(cards) {
        return false;
    }
    could_be_set(cards) || could_be_run(cards)
}

fn could_be_set(cards: &[Card]) -> bool {
    let mut naturals = cards.iter().filter(|c| !c.is_wildcard());
    match naturals.next() {
        None => true,
        Some(first) => naturals.all(|c| c.rank == first.rank),
    }
}

fn could_be_run(cards: &[Card]) -> bool {
    let mut seen = 0u16;
    let mut suit = None;
    for c in cards.iter().filter(|c| !c.is_wildcard()) {
        if suit.map_or(false, |s| s != c.suit) {
            return false;
        }
        suit = Some(c.suit);
        let bit = 1u16 << c.rank.value();
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}
