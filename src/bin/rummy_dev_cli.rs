// src/bin/rummy_dev_cli.rs
//
// Dev-CLI: стол из 4 ботов играет несколько раундов подряд.
//
//   rummy_dev_cli [rounds] [seed] [config.json]
//
// Уровень логов – через RUST_LOG (по умолчанию info).

use rummy_engine::api::build_round_view;
use rummy_engine::domain::{Card, CardId, GameConfig};
use rummy_engine::engine::{EngineError, Intent, IntentOutcome, Phase, Round, TableManager};
use rummy_engine::eval::MeldValidator;
use rummy_engine::infra::RngSeed;
use tracing_subscriber::EnvFilter;

/// Страховка от бесконечной партии при сломанной логике.
const MAX_INTENTS_PER_ROUND: usize = 10_000;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let rounds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("Не удалось загрузить конфиг {path}: {err}");
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    println!("rummy_dev_cli: {rounds} раунд(ов), seed={seed}");

    let mut manager = match TableManager::new(1, config, RngSeed::from_u64(seed)) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("Некорректная конфигурация: {err}");
            std::process::exit(2);
        }
    };

    for _ in 0..rounds {
        if let Err(err) = play_round(&mut manager) {
            eprintln!("Раунд прерван: {err}");
            std::process::exit(1);
        }
    }

    println!();
    println!("================ ИТОГИ =================");
    if let Err(err) = manager.close_round() {
        eprintln!("Не удалось закрыть последний раунд: {err}");
    }
    for summary in manager.finished_rounds() {
        match summary.winner {
            Some(p) => println!(
                "  раунд {}: победил игрок {} за {} ходов",
                summary.round_id, p, summary.turns_played
            ),
            None => println!(
                "  раунд {}: колода кончилась, победителя нет ({} ходов)",
                summary.round_id, summary.turns_played
            ),
        }
    }
}

fn load_config(path: &str) -> Result<GameConfig, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    GameConfig::from_json(&raw).map_err(|e| e.to_string())
}

fn play_round(manager: &mut TableManager) -> Result<(), EngineError> {
    let round = manager.start_next_round()?;
    let validator = MeldValidator::new(round.config().max_search_steps);
    println!();
    println!("------ Раунд {} ------", round.round_id);

    manager.apply(Intent::DealComplete)?;

    for _ in 0..MAX_INTENTS_PER_ROUND {
        let round = manager.round().ok_or(EngineError::NoActiveRound)?;
        if round.is_finished() {
            break;
        }

        let intent = choose_intent(round, &validator);
        if let IntentOutcome::Ignored(reason) = manager.apply(intent.clone())? {
            // Бот не должен предлагать недопустимые ходы.
            println!("  намерение {intent:?} проигнорировано: {reason}");
            break;
        }
    }

    if let Some(round) = manager.round() {
        let view = build_round_view(round, 0);
        println!(
            "  фаза {:?}, ход игрока {}, в колоде {}, в сбросе {}, победитель {:?}",
            view.phase, view.current_player, view.stock_count, view.discard_count, view.winner
        );
    }
    Ok(())
}

/// Простая стратегия бота.
fn choose_intent(round: &Round, validator: &MeldValidator) -> Intent {
    match round.phase() {
        Phase::Waiting => Intent::DealComplete,
        Phase::Draw => {
            let ledger = round.ledger();
            match ledger.next_stock_card().or_else(|| ledger.top_of_discard()) {
                Some(card) => Intent::Draw(card),
                None => Intent::EndTurn,
            }
        }
        Phase::Discard => Intent::Discard(pick_discard(
            &round.hand_cards(round.current_player()),
            validator,
        )),
        Phase::CheckingWin => {
            if round.declare_enabled() {
                Intent::Declare
            } else {
                Intent::EndTurn
            }
        }
        Phase::EndGame => Intent::EndTurn,
    }
}

/// Сбрасываем карту, без которой рука раскладывается; иначе – самую
/// "одинокую" (меньше всего соседей по рангу и масти).
fn pick_discard(hand: &[Card], validator: &MeldValidator) -> CardId {
    for (i, card) in hand.iter().enumerate() {
        let rest: Vec<Card> = hand
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, c)| *c)
            .collect();
        if validator.is_fully_meldable(&rest) {
            return card.id;
        }
    }

    hand.iter()
        .filter(|c| !c.is_wildcard())
        .min_by_key(|c| neighbours(c, hand))
        .or_else(|| hand.first())
        .map_or(0, |c| c.id)
}

fn neighbours(card: &Card, hand: &[Card]) -> usize {
    hand.iter()
        .filter(|o| o.id != card.id && !o.is_wildcard())
        .filter(|o| {
            o.rank == card.rank
                || (o.suit == card.suit && o.rank.value().abs_diff(card.rank.value()) <= 2)
        })
        .count()
}
