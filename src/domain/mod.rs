//! Доменная модель: карты, колода, зоны владения, настройки раунда.

pub mod card;
pub mod config;
pub mod deck;
pub mod zone;

// Базовые идентификаторы.
pub type CardId = u32;
pub type PlayerIndex = u8;
pub type RoundId = u64;
pub type TableId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use config::*;
pub use deck::*;
pub use zone::*;
