use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::CardId;

/// Масть карты. `Joker` – только у джокеров (wildcard).
///
/// Порядок вариантов = порядок сортировки по масти.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Suit {
    Spade,   // ♠
    Heart,   // ♥
    Club,    // ♣
    Diamond, // ♦
    Joker,
}

impl Suit {
    /// Четыре "настоящие" масти, без джокерной.
    pub const STANDARD: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];
}

/// Ранг карты. Туз младший (1), король старший (13).
/// `Joker` – служебный ранг, встречается только в паре с `Suit::Joker`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Rank {
    /// Ранги Ace..King по возрастанию.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Числовое значение ранга (Ace = 1 ... King = 13, Joker = 14).
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// "Лицо" карты – масть и ранг без идентичности.
/// Из лиц строится колода до раздачи id.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Face {
    pub rank: Rank,
    pub suit: Suit,
}

impl Face {
    pub const JOKER: Face = Face {
        rank: Rank::Joker,
        suit: Suit::Joker,
    };

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_wildcard(&self) -> bool {
        self.suit == Suit::Joker
    }
}

/// Карта раунда: стабильный id + неизменяемые масть/ранг.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self { id, suit, rank }
    }

    pub const fn joker(id: CardId) -> Self {
        Self {
            id,
            suit: Suit::Joker,
            rank: Rank::Joker,
        }
    }

    pub fn from_face(id: CardId, face: Face) -> Self {
        Self {
            id,
            suit: face.suit,
            rank: face.rank,
        }
    }

    pub fn face(&self) -> Face {
        Face::new(self.rank, self.suit)
    }

    /// Джокер может заменить любую карту в группе.
    pub fn is_wildcard(&self) -> bool {
        self.suit == Suit::Joker
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Joker => '*',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Ace => 'A',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Joker => '*',
            r => char::from(b'0' + r.value()),
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Face {
    /// Формат вида `As`, `Th`, `7d`; джокер – `JK`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return write!(f, "JK");
        }
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.face(), self.id)
    }
}

/// Парсинг строки вида "As", "Th", "7d" или "JK".
impl FromStr for Face {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("JK") {
            return Ok(Face::JOKER);
        }

        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err("Face string must have length 2".into()),
        };

        let rank = match r_ch {
            'A' | 'a' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            _ => return Err(format!("Invalid rank: {r_ch}")),
        };

        let suit = match s_ch {
            's' | 'S' => Suit::Spade,
            'h' | 'H' => Suit::Heart,
            'c' | 'C' => Suit::Club,
            'd' | 'D' => Suit::Diamond,
            _ => return Err(format!("Invalid suit: {s_ch}")),
        };

        Ok(Face { rank, suit })
    }
}

/// Утилита для тестов и CLI: список строк → карты с id 0..n.
pub fn cards_from_faces(faces: &[&str]) -> Result<Vec<Card>, String> {
    faces
        .iter()
        .enumerate()
        .map(|(i, s)| s.parse::<Face>().map(|f| Card::from_face(i as CardId, f)))
        .collect()
}
