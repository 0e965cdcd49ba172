use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки конфигурации раунда.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),

    #[error("Не удалось разобрать конфигурацию: {0}")]
    Parse(String),
}

/// Геометрия руки на экране.
///
/// Ядро не рисует, но по этим числам отвечает на вопрос
/// "в какой слот руки упадёт карта, если отпустить её в точке (x, y)".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandLayout {
    /// Центр первой (левой) карты.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Шаг между центрами соседних карт.
    pub spacing: f32,
    pub card_width: f32,
    pub card_height: f32,
}

impl HandLayout {
    /// Раскладка "веером" с шагом 0.6 ширины карты.
    pub fn horizontal(origin_x: f32, origin_y: f32, card_width: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            spacing: card_width * 0.6,
            card_width,
            card_height: card_width * 1.5,
        }
    }

    /// Центры `n` карт слева направо.
    pub fn positions(&self, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| self.origin_x + self.spacing * i as f32)
            .collect()
    }

    /// Вертикальная полоса руки `[min_y, max_y]`.
    pub fn band(&self) -> (f32, f32) {
        let half = self.card_height / 2.0;
        (self.origin_y - half, self.origin_y + half)
    }
}

impl Default for HandLayout {
    fn default() -> Self {
        // Доска 1920x1080, ширина карты = ширина доски / 20.
        HandLayout::horizontal(960.0, 756.0, 96.0)
    }
}

/// Настройки раунда. Фиксируются при создании раунда и дальше не меняются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub player_count: u8,
    /// Сколько карт у каждого игрока после раздачи.
    pub initial_hold_count: u8,
    /// Сколько раз дублируется 52-карточный набор.
    pub deck_copies: u8,
    /// Сколько джокеров добавляется к колоде.
    pub wildcard_count: u8,
    /// Бюджет шагов перебора при проверке руки.
    pub max_search_steps: u64,
    pub hand_layout: HandLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            initial_hold_count: 14,
            deck_copies: 2,
            wildcard_count: 4,
            max_search_steps: 1_000_000,
            hand_layout: HandLayout::default(),
        }
    }
}

impl GameConfig {
    /// Разобрать конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Всего карт в колоде.
    pub fn deck_size(&self) -> usize {
        52 * self.deck_copies as usize + self.wildcard_count as usize
    }

    /// Сколько карт уходит в руки при раздаче.
    pub fn dealt_count(&self) -> usize {
        self.player_count as usize * self.initial_hold_count as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count < 2 || self.player_count > 8 {
            return Err(ConfigError::InvalidConfig(
                "GameConfig: player_count must be in [2, 8]".into(),
            ));
        }

        // Рука + одна добранная карта должны влезать в маску u64 перебора.
        if self.initial_hold_count < 3 || self.initial_hold_count > 62 {
            return Err(ConfigError::InvalidConfig(
                "GameConfig: initial_hold_count must be in [3, 62]".into(),
            ));
        }

        if self.deck_copies == 0 {
            return Err(ConfigError::InvalidConfig(
                "GameConfig: deck_copies = 0".into(),
            ));
        }

        if self.deck_size() <= self.dealt_count() {
            return Err(ConfigError::InvalidConfig(format!(
                "GameConfig: deck of {} cards cannot deal {} and keep a stock",
                self.deck_size(),
                self.dealt_count()
            )));
        }

        if self.max_search_steps == 0 {
            return Err(ConfigError::InvalidConfig(
                "GameConfig: max_search_steps = 0".into(),
            ));
        }

        if !(self.hand_layout.spacing > 0.0) {
            return Err(ConfigError::InvalidConfig(
                "GameConfig: hand_layout.spacing must be positive".into(),
            ));
        }

        Ok(())
    }
}
