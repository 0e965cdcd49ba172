//! Проверка руки на раскладываемость (Meld Validator).
//!
//! Основная функция:
//!   `is_fully_meldable(hand) -> bool`
//!
//! Рука раскладывается, если её можно целиком разбить на непересекающиеся
//! группы от 3 карт, каждая из которых – set или run (с джокерами).

pub mod group;
pub mod partition;

pub use group::{classify_group, is_valid_run, is_valid_set, Meld, MeldKind};
pub use partition::{is_fully_meldable, MeldValidator, SearchOutcome};
