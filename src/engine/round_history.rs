use serde::{Deserialize, Serialize};

use crate::domain::{CardId, PlayerIndex, RoundId, Zone};
use crate::engine::phase::Phase;

/// Сигнал ядра для слоя представления (push, без ответа).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundSignal {
    /// Раунд создан, колода собрана и перемешана.
    RoundStarted { round_id: RoundId, card_count: usize },

    PhaseChanged { phase: Phase },

    /// Ход перешёл к другому игроку.
    CurrentPlayerChanged { player: PlayerIndex },

    /// Карта сменила зону.
    ZoneChanged { card: CardId, from: Zone, to: Zone },

    /// Зафиксирован новый порядок руки.
    HandReordered {
        player: PlayerIndex,
        order: Vec<CardId>,
    },

    /// Предпросмотр перестановки (ничего не зафиксировано).
    ReorderPreviewed {
        player: PlayerIndex,
        order: Vec<CardId>,
    },

    /// Перетаскивание отменено, рука вернулась к прежнему порядку.
    ReorderCancelled {
        player: PlayerIndex,
        order: Vec<CardId>,
    },

    DeclareEnabled { enabled: bool },

    /// Видимость перетаскивания и кнопки сортировки.
    AffordancesChanged { dragging: bool, sort: bool },

    /// Раунд закончен. `None` – колода кончилась, победителя нет.
    RoundEnded { winner: Option<PlayerIndex> },
}

/// Сигнал с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEvent {
    pub index: u32,
    pub signal: RoundSignal,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, signal: RoundSignal) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, signal });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Сигналы начиная с номера `from` (для догоняющего клиента).
    pub fn since(&self, from: u32) -> impl Iterator<Item = &RoundSignal> {
        self.events
            .iter()
            .skip(from as usize)
            .map(|e| &e.signal)
    }
}
