use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerIndex;

/// Зона владения картой. Каждая карта в каждый момент лежит ровно в одной зоне.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Колода добора.
    Stock,
    /// Рука игрока (индекс места 0..player_count).
    Hand(PlayerIndex),
    /// Сброс. Доступна только верхняя карта.
    Discard,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Stock => write!(f, "stock"),
            Zone::Hand(p) => write!(f, "hand[{p}]"),
            Zone::Discard => write!(f, "discard"),
        }
    }
}
