use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CardId, ConfigError, PlayerIndex, Zone};
use crate::engine::actions::IntentKind;
use crate::engine::phase::Phase;

/// Нарушение владения картами (OwnershipError).
///
/// В корректной последовательной игре не возникает никогда:
/// это баг вызывающего кода, и раунд после этого останавливается.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Карта {card} ожидалась в зоне {expected}, а лежит в {actual}")]
    CardNotInZone {
        card: CardId,
        expected: Zone,
        actual: Zone,
    },

    #[error("Карта {0} не существует в этом раунде")]
    UnknownCard(CardId),

    #[error("Зона {0} не существует в этом раунде")]
    UnknownZone(Zone),

    #[error("Новый порядок руки игрока {player} не является перестановкой её карт")]
    NotAPermutation { player: PlayerIndex },

    #[error("Нарушен инвариант зон: {0}")]
    InvariantBroken(String),
}

/// Ошибки движка раунда.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Ownership(#[from] LedgerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Раунд остановлен после нарушения владения картами")]
    RoundHalted,

    #[error("Нет активного раунда")]
    NoActiveRound,

    #[error("Раунд ещё не завершён")]
    RoundStillRunning,
}

/// Мягкий отказ (IllegalIntent): намерение корректно по форме,
/// но сейчас не разрешено. Состояние не меняется, ошибки нет.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentRejection {
    #[error("Намерение {intent:?} недопустимо в фазе {phase:?}")]
    WrongPhase { phase: Phase, intent: IntentKind },

    #[error("Карту {0} сейчас нельзя взять")]
    NotDrawable(CardId),

    #[error("Карты {0} нет в руке текущего игрока")]
    NotInHand(CardId),

    #[error("Неизвестная карта {0}")]
    UnknownCard(CardId),

    #[error("Нет предпросмотра перестановки для карты {0}")]
    NoPreview(CardId),

    #[error("Перетаскивание не начато")]
    NoDragInProgress,

    #[error("Рука не раскладывается – объявить нельзя")]
    NotMeldable,
}
