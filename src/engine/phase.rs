use serde::{Deserialize, Serialize};

use crate::engine::actions::IntentKind;

/// Фаза хода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Раздача ещё идёт (ждём DealComplete).
    Waiting,
    /// Текущий игрок должен взять карту.
    Draw,
    /// Текущий игрок должен сбросить карту.
    Discard,
    /// Рука проверена и раскладывается – можно объявить или передать ход.
    CheckingWin,
    /// Раунд закончен.
    EndGame,
}

/// Что делает намерение с фазой.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Намерение разрешено, фаза не меняется.
    Stay,
    /// Намерение разрешено и переводит в новую фазу.
    Enter(Phase),
}

/// Таблица переходов `(фаза, намерение) → шаг`.
///
/// `None` – переход не определён, намерение игнорируется.
pub fn transition(phase: Phase, intent: IntentKind) -> Option<Step> {
    use IntentKind as I;
    use Phase as P;

    match (phase, intent) {
        (P::Waiting, I::DealComplete) => Some(Step::Enter(P::Draw)),

        (P::Draw, I::Draw) => Some(Step::Enter(P::Discard)),
        (P::Draw, I::Sort) => Some(Step::Stay),

        (P::Discard, I::Discard) => Some(Step::Enter(P::CheckingWin)),
        (P::Discard, I::Sort) => Some(Step::Stay),
        (P::Discard, I::ReorderPreview | I::ReorderCommit | I::ReorderCancel) => {
            Some(Step::Stay)
        }

        (P::CheckingWin, I::Declare) => Some(Step::Enter(P::EndGame)),
        (P::CheckingWin, I::EndTurn) => Some(Step::Enter(P::Draw)),

        _ => None,
    }
}

impl Phase {
    /// Руку можно перетаскивать только в фазе сброса.
    pub fn dragging_enabled(self) -> bool {
        self == Phase::Discard
    }

    /// Кнопка сортировки видна в Draw и Discard.
    pub fn sort_enabled(self) -> bool {
        matches!(self, Phase::Draw | Phase::Discard)
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::EndGame
    }
}
