use serde::{Deserialize, Serialize};

use crate::domain::{PlayerIndex, Zone};
use crate::engine::{Round, RoundSignal};
use crate::eval::Meld;

use super::dto::{PlayerHandDto, RoundViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние раунда глазами игрока `viewer`.
    GetRound { viewer: PlayerIndex },

    /// Сигналы истории начиная с номера `since`.
    GetHistory { since: u32 },

    /// Разбиение руки текущего игрока (для подсветки комбинаций).
    GetMelds,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Round(RoundViewDto),
    History(Vec<RoundSignal>),
    Melds(Option<Vec<Meld>>),
}

pub fn run_query(round: &Round, query: Query) -> QueryResponse {
    match query {
        Query::GetRound { viewer } => QueryResponse::Round(build_round_view(round, viewer)),
        Query::GetHistory { since } => {
            QueryResponse::History(round.history().since(since).cloned().collect())
        }
        Query::GetMelds => QueryResponse::Melds(round.declarable_melds()),
    }
}

/// Сформировать DTO раунда. Чужие руки скрыты – видно только количество.
pub fn build_round_view(round: &Round, viewer: PlayerIndex) -> RoundViewDto {
    let ledger = round.ledger();
    let phase = round.phase();

    let players = (0..ledger.player_count())
        .map(|p| {
            let is_viewer = p == viewer;
            PlayerHandDto {
                player: p,
                card_count: ledger.count_in_zone(Zone::Hand(p)),
                cards: is_viewer.then(|| round.hand_cards(p)),
                positions: is_viewer.then(|| round.hand_positions(p)),
            }
        })
        .collect();

    RoundViewDto {
        round_id: round.round_id,
        phase,
        current_player: round.current_player(),
        players,
        stock_count: ledger.count_in_zone(Zone::Stock),
        discard_count: ledger.count_in_zone(Zone::Discard),
        discard_top: ledger.top_of_discard().and_then(|id| round.deck().card(id)),
        declare_enabled: round.declare_enabled(),
        dragging_enabled: phase.dragging_enabled(),
        sort_enabled: phase.sort_enabled(),
        sort_mode: round.state().sort_mode,
        history_len: round.history().len(),
        finished: round.is_finished(),
        winner: round.winner(),
    }
}
