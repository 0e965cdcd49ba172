use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Раунд остановлен после внутренней ошибки – нужен новый раунд.
    RoundHalted,

    /// Ошибка движка.
    EngineError(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::RoundHalted => ApiError::RoundHalted,
            other => ApiError::EngineError(other.to_string()),
        }
    }
}
