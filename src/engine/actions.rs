use serde::{Deserialize, Serialize};

use crate::domain::CardId;

/// Намерение, пришедшее от слоя представления.
///
/// Все намерения относятся к текущему игроку раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Intent {
    /// Анимация раздачи закончилась, можно начинать ходы.
    DealComplete,
    /// Клик по карте колоды или по верхней карте сброса.
    Draw(CardId),
    /// Карта из руки отпущена над сбросом.
    Discard(CardId),
    /// Карта руки тащится указателем – показать, куда она встанет.
    ReorderPreview { card: CardId, x: f32, y: f32 },
    /// Карту отпустили внутри руки – зафиксировать новый порядок.
    ReorderCommit(CardId),
    /// Отменить перетаскивание, вернуть прежний порядок.
    ReorderCancel,
    /// Сортировка руки (Rank ↔ Suit по очереди).
    Sort,
    /// Объявить собранную руку и закончить раунд.
    Declare,
    /// Не объявлять сейчас, передать ход.
    EndTurn,
}

/// Вид намерения без данных – для таблицы переходов и отказов.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IntentKind {
    DealComplete,
    Draw,
    Discard,
    ReorderPreview,
    ReorderCommit,
    ReorderCancel,
    Sort,
    Declare,
    EndTurn,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::DealComplete => IntentKind::DealComplete,
            Intent::Draw(_) => IntentKind::Draw,
            Intent::Discard(_) => IntentKind::Discard,
            Intent::ReorderPreview { .. } => IntentKind::ReorderPreview,
            Intent::ReorderCommit(_) => IntentKind::ReorderCommit,
            Intent::ReorderCancel => IntentKind::ReorderCancel,
            Intent::Sort => IntentKind::Sort,
            Intent::Declare => IntentKind::Declare,
            Intent::EndTurn => IntentKind::EndTurn,
        }
    }
}
