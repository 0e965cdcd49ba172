use serde::{Deserialize, Serialize};

use crate::domain::{Card, PlayerIndex, RoundId};
use crate::engine::{Phase, RoundSignal, SortMode};

/// DTO игрока в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerHandDto {
    pub player: PlayerIndex,
    pub card_count: usize,
    /// Карты – только для смотрящего игрока.
    pub cards: Option<Vec<Card>>,
    /// Центры карт по раскладке (для смотрящего игрока).
    pub positions: Option<Vec<f32>>,
}

/// DTO раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundViewDto {
    pub round_id: RoundId,
    pub phase: Phase,
    pub current_player: PlayerIndex,
    pub players: Vec<PlayerHandDto>,
    pub stock_count: usize,
    pub discard_count: usize,
    /// Верхняя карта сброса (единственная, которую можно взять).
    pub discard_top: Option<Card>,
    pub declare_enabled: bool,
    pub dragging_enabled: bool,
    pub sort_enabled: bool,
    pub sort_mode: SortMode,
    /// Номер последнего сигнала в истории – для догоняющего клиента.
    pub history_len: usize,
    pub finished: bool,
    pub winner: Option<PlayerIndex>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Команда применена: сигналы + обновлённое состояние.
    Applied {
        signals: Vec<RoundSignal>,
        view: RoundViewDto,
    },

    /// Команда проигнорирована (не та фаза, не та карта и т.п.).
    Ignored { reason: String },
}
