// src/engine/table_manager.rs

use tracing::info;

use crate::domain::{GameConfig, RoundId, TableId};
use crate::engine::round::{start_round, IntentOutcome, Round, RoundSummary};
use crate::engine::{EngineError, Intent};
use crate::infra::RngSeed;

/// Менеджер стола:
/// - хранит конфиг и базовый seed стола;
/// - для каждого раунда выводит свой детерминированный RNG;
/// - держит текущий раунд и итоги завершённых.
pub struct TableManager {
    table_id: TableId,
    config: GameConfig,
    seed: RngSeed,
    next_round_id: RoundId,
    current: Option<Round>,
    finished: Vec<RoundSummary>,
}

impl TableManager {
    /// Создать стол. Конфиг проверяется сразу.
    pub fn new(table_id: TableId, config: GameConfig, seed: RngSeed) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            table_id,
            config,
            seed,
            next_round_id: 1,
            current: None,
            finished: Vec::new(),
        })
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Текущий раунд (read-only).
    pub fn round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// Идёт ли раунд (не закончен и не остановлен).
    pub fn has_running_round(&self) -> bool {
        self.current
            .as_ref()
            .map_or(false, |r| !r.is_finished() && !r.state().halted)
    }

    /// Итоги уже закрытых раундов, по порядку.
    pub fn finished_rounds(&self) -> &[RoundSummary] {
        &self.finished
    }

    /// Запустить следующий раунд.
    ///
    /// Пока текущий раунд идёт – `RoundStillRunning`. Закрытый (или
    /// остановленный) раунд уходит в `finished_rounds`.
    pub fn start_next_round(&mut self) -> Result<&Round, EngineError> {
        self.close_round()?;

        let round_id = self.next_round_id;
        let round_index = self.finished.len() as u64;
        let mut rng = self
            .seed
            .derive(self.table_id, round_id, round_index)
            .to_rng();

        let round = start_round(&self.config, &mut rng, round_id)?;
        self.next_round_id += 1;

        info!(table_id = self.table_id, round_id, "next round started");
        Ok(self.current.insert(round))
    }

    /// Закрыть текущий раунд и сохранить его итог.
    ///
    /// Пока раунд идёт – `RoundStillRunning`.
    pub fn close_round(&mut self) -> Result<Option<RoundSummary>, EngineError> {
        if self.has_running_round() {
            return Err(EngineError::RoundStillRunning);
        }

        let summary = self.current.take().map(|prev| prev.summary());
        if let Some(s) = &summary {
            self.finished.push(s.clone());
        }
        Ok(summary)
    }

    /// Применить намерение в текущем раунде.
    pub fn apply(&mut self, intent: Intent) -> Result<IntentOutcome, EngineError> {
        self.current
            .as_mut()
            .ok_or(EngineError::NoActiveRound)?
            .apply(intent)
    }
}
