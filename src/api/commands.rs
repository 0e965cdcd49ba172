use serde::{Deserialize, Serialize};

use crate::domain::CardId;
use crate::engine::Intent;

/// Команда от слоя представления (то, что меняет состояние).
///
/// Внешнее JSON-представление намерений движка:
/// `{"type": "Draw", "card_id": 56}` и т.п.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Command {
    /// Анимация раздачи закончилась.
    DealComplete,

    /// Клик по колоде или по верхней карте сброса.
    Draw { card_id: CardId },

    /// Карта отпущена над сбросом.
    Discard { card_id: CardId },

    /// Карта тащится внутри руки.
    ReorderPreview {
        card_id: CardId,
        pointer_x: f32,
        pointer_y: f32,
    },

    /// Карта отпущена внутри руки.
    ReorderCommit { card_id: CardId },

    /// Перетаскивание прервано.
    ReorderCancel,

    /// Кнопка сортировки.
    Sort,

    /// Кнопка "объявить".
    Declare,

    /// Передать ход, не объявляя.
    EndTurn,
}

impl From<Command> for Intent {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::DealComplete => Intent::DealComplete,
            Command::Draw { card_id } => Intent::Draw(card_id),
            Command::Discard { card_id } => Intent::Discard(card_id),
            Command::ReorderPreview {
                card_id,
                pointer_x,
                pointer_y,
            } => Intent::ReorderPreview {
                card: card_id,
                x: pointer_x,
                y: pointer_y,
            },
            Command::ReorderCommit { card_id } => Intent::ReorderCommit(card_id),
            Command::ReorderCancel => Intent::ReorderCancel,
            Command::Sort => Intent::Sort,
            Command::Declare => Intent::Declare,
            Command::EndTurn => Intent::EndTurn,
        }
    }
}
