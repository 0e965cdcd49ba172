//! Движок раунда: зоны, фазы хода, порядок руки, сигналы.
//!
//! Высокоуровневый объект: `Round`
//! Основные операции:
//!   - `start_round` – собрать, перемешать и раздать колоду
//!   - `Round::apply` – применить намерение текущего игрока
//!   - `TableManager::start_next_round` – следующий раунд за тем же столом

pub mod actions;
pub mod errors;
pub mod ledger;
pub mod ordering;
pub mod phase;
pub mod round;
pub mod round_history;
pub mod table_manager;

pub use actions::{Intent, IntentKind};
pub use errors::{EngineError, IntentRejection, LedgerError};
pub use ledger::ZoneLedger;
pub use ordering::{index_for_position, move_to_index, sort_hand, DragSession, SortMode};
pub use phase::{transition, Phase, Step};
pub use round::{start_round, IntentOutcome, Round, RoundState, RoundSummary};
pub use round_history::{RoundEvent, RoundHistory, RoundSignal};
pub use table_manager::TableManager;

/// RNG интерфейс для engine.
///
/// Реализации – в infra (обёртки над `rand`). Нужен только равномерный
/// индекс в `0..=upper`; перемешивание общее для всех реализаций.
pub trait RandomSource {
    /// Равномерное число в `0..=upper`.
    fn index_inclusive(&mut self, upper: usize) -> usize;

    /// Fisher–Yates: для i от n-1 вниз до 1 меняем `slice[i]`
    /// с `slice[j]`, `j` равномерно из `0..=i`.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.index_inclusive(i);
            slice.swap(i, j);
        }
    }
}
