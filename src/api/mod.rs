//! Внешний API движка.
//!
//! Здесь описываются:
//! - команды (commands.rs): намерения, которые меняют состояние;
//! - запросы (queries.rs): только чтение;
//! - DTO (dto.rs): удобные структуры для фронта;
//! - ошибки (errors.rs): то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;

use crate::domain::PlayerIndex;
use crate::engine::{IntentOutcome, Round};

/// Разобрать команду из JSON.
pub fn parse_command(raw: &str) -> Result<Command, ApiError> {
    serde_json::from_str(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Применить команду к раунду и вернуть ответ для `viewer`.
pub fn handle_command(
    round: &mut Round,
    command: Command,
    viewer: PlayerIndex,
) -> Result<CommandResponse, ApiError> {
    match round.apply(command.into())? {
        IntentOutcome::Applied(signals) => Ok(CommandResponse::Applied {
            signals,
            view: build_round_view(round, viewer),
        }),
        IntentOutcome::Ignored(rejection) => Ok(CommandResponse::Ignored {
            reason: rejection.to_string(),
        }),
    }
}
