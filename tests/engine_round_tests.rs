//! Раунд целиком: раздача, фазы хода, добор, сброс, объявление.
//!
//! Для сценариев колода собирается вручную (`Round::from_deck`):
//! позиция i раздаётся игроку i % player_count, поэтому у игрока 0
//! id 0, 2, 4, у игрока 1 – id 1, 3, 5, колода начинается с id 6.

use rummy_engine::domain::{Deck, Face, GameConfig, Zone};
use rummy_engine::engine::{
    start_round, EngineError, Intent, IntentKind, IntentOutcome, IntentRejection, Phase, Round,
    RoundSignal,
};
use rummy_engine::infra::DeterministicRng;

//
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
//

fn two_player_config() -> GameConfig {
    GameConfig {
        player_count: 2,
        initial_hold_count: 3,
        ..GameConfig::default()
    }
}

/// Колода, в которой игрок p получает `hands[p]`, а дальше идёт `stock`.
fn rigged_round(hands: [&[&str]; 2], stock: &[&str]) -> Round {
    let mut faces: Vec<Face> = Vec::new();
    for k in 0..3 {
        for hand in hands {
            faces.push(hand[k].parse().unwrap());
        }
    }
    faces.extend(stock.iter().map(|s| s.parse::<Face>().unwrap()));

    Round::from_deck(&two_player_config(), Deck::from_faces(faces), 1).unwrap()
}

/// Руки, которые не раскладываются ни с одной картой из колоды ниже.
fn dry_round(stock: &[&str]) -> Round {
    rigged_round([&["As", "5h", "9c"], &["2d", "6s", "Tc"]], stock)
}

fn apply_ok(round: &mut Round, intent: Intent) -> Vec<RoundSignal> {
    match round.apply(intent.clone()).unwrap() {
        IntentOutcome::Applied(signals) => signals,
        IntentOutcome::Ignored(reason) => panic!("{intent:?} ignored: {reason}"),
    }
}

fn rejection(round: &mut Round, intent: Intent) -> IntentRejection {
    match round.apply(intent.clone()).unwrap() {
        IntentOutcome::Ignored(reason) => reason,
        IntentOutcome::Applied(_) => panic!("{intent:?} must be ignored"),
    }
}

//
// РАЗДАЧА
//

#[test]
fn default_round_deals_fourteen_each_and_keeps_52_in_stock() {
    let config = GameConfig::default();
    let mut rng = DeterministicRng::from_u64(7);
    let round = start_round(&config, &mut rng, 1).unwrap();

    assert_eq!(round.deck().len(), 108);
    assert_eq!(round.ledger().count_in_zone(Zone::Stock), 52);
    for p in 0..4 {
        assert_eq!(round.hand(p).len(), 14);
    }
    assert_eq!(round.phase(), Phase::Waiting);
    assert!(round.ledger().check_invariants().is_ok());

    // RoundStarted + по сигналу на каждую розданную карту
    assert_eq!(round.history().len(), 1 + 56);
}

#[test]
fn same_seed_deals_same_hands() {
    let config = GameConfig::default();
    let a = start_round(&config, &mut DeterministicRng::from_u64(99), 1).unwrap();
    let b = start_round(&config, &mut DeterministicRng::from_u64(99), 1).unwrap();

    assert_eq!(a.deck(), b.deck());
    assert_eq!(a.hand_cards(2), b.hand_cards(2));
}

#[test]
fn deck_without_stock_is_rejected() {
    let faces: Vec<Face> = ["As", "2s", "3s", "4s", "5s", "6s"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let err = Round::from_deck(&two_player_config(), Deck::from_faces(faces), 1).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn deal_goes_round_robin() {
    let round = dry_round(&["Kh", "3c"]);
    assert_eq!(round.hand(0), &[0, 2, 4]);
    assert_eq!(round.hand(1), &[1, 3, 5]);
    assert_eq!(round.ledger().next_stock_card(), Some(6));
}

//
// ФАЗЫ
//

#[test]
fn draw_is_ignored_while_waiting() {
    let mut round = dry_round(&["Kh", "3c"]);
    let history_before = round.history().len();

    assert_eq!(
        rejection(&mut round, Intent::Draw(6)),
        IntentRejection::WrongPhase {
            phase: Phase::Waiting,
            intent: IntentKind::Draw,
        }
    );
    assert_eq!(round.phase(), Phase::Waiting);
    assert_eq!(round.history().len(), history_before);
}

#[test]
fn deal_complete_opens_first_draw() {
    let mut round = dry_round(&["Kh", "3c"]);
    let signals = apply_ok(&mut round, Intent::DealComplete);

    assert_eq!(round.phase(), Phase::Draw);
    assert_eq!(round.current_player(), 0);
    assert!(signals.contains(&RoundSignal::PhaseChanged { phase: Phase::Draw }));
    assert!(signals.contains(&RoundSignal::AffordancesChanged {
        dragging: false,
        sort: true,
    }));
}

#[test]
fn only_next_stock_card_or_discard_top_can_be_drawn() {
    let mut round = dry_round(&["Kh", "3c", "Jd"]);
    apply_ok(&mut round, Intent::DealComplete);
    let before = round.state().clone();

    // не следующая карта колоды
    assert_eq!(
        rejection(&mut round, Intent::Draw(7)),
        IntentRejection::NotDrawable(7)
    );
    // карта из чужой руки
    assert_eq!(
        rejection(&mut round, Intent::Draw(1)),
        IntentRejection::NotDrawable(1)
    );
    assert_eq!(
        rejection(&mut round, Intent::Draw(500)),
        IntentRejection::UnknownCard(500)
    );
    assert_eq!(round.state(), &before);

    let signals = apply_ok(&mut round, Intent::Draw(6));
    assert_eq!(round.phase(), Phase::Discard);
    assert_eq!(round.hand(0), &[0, 2, 4, 6]);
    assert!(signals.contains(&RoundSignal::ZoneChanged {
        card: 6,
        from: Zone::Stock,
        to: Zone::Hand(0),
    }));
    assert!(signals.contains(&RoundSignal::AffordancesChanged {
        dragging: true,
        sort: true,
    }));
}

#[test]
fn discard_must_come_from_own_hand() {
    let mut round = dry_round(&["Kh", "3c"]);
    apply_ok(&mut round, Intent::DealComplete);
    apply_ok(&mut round, Intent::Draw(6));

    assert_eq!(
        rejection(&mut round, Intent::Discard(1)),
        IntentRejection::NotInHand(1)
    );
    assert_eq!(
        rejection(&mut round, Intent::Discard(7)),
        IntentRejection::NotInHand(7)
    );
    assert_eq!(
        rejection(&mut round, Intent::Discard(300)),
        IntentRejection::UnknownCard(300)
    );
    assert_eq!(round.phase(), Phase::Discard);
}

#[test]
fn unmeldable_discard_passes_the_turn() {
    let mut round = dry_round(&["Kh", "3c"]);
    apply_ok(&mut round, Intent::DealComplete);
    apply_ok(&mut round, Intent::Draw(6));

    let signals = apply_ok(&mut round, Intent::Discard(6));

    assert_eq!(round.phase(), Phase::Draw);
    assert_eq!(round.current_player(), 1);
    assert!(!round.declare_enabled());
    assert_eq!(round.ledger().top_of_discard(), Some(6));
    assert!(signals.contains(&RoundSignal::CurrentPlayerChanged { player: 1 }));

    // следующий игрок может взять только что сброшенную карту
    apply_ok(&mut round, Intent::Draw(6));
    assert_eq!(round.ledger().zone_of(6), Some(Zone::Hand(1)));
    assert_eq!(round.ledger().top_of_discard(), None);
}

#[test]
fn discard_top_is_last_discard_and_reverts_after_draw() {
    let mut round = dry_round(&["Kh", "3c", "Jd", "7s"]);
    apply_ok(&mut round, Intent::DealComplete);

    // каждый игрок берёт карту колоды и сразу её сбрасывает
    for card in [6, 7, 8] {
        apply_ok(&mut round, Intent::Draw(card));
        apply_ok(&mut round, Intent::Discard(card));
    }
    assert_eq!(round.ledger().top_of_discard(), Some(8));
    assert_eq!(round.current_player(), 1);

    apply_ok(&mut round, Intent::Draw(8));
    assert_eq!(round.ledger().top_of_discard(), Some(7));
    assert_eq!(round.ledger().cards_in(Zone::Discard).unwrap(), &[6, 7]);
}

#[test]
fn meldable_discard_enables_declare_and_declare_wins() {
    // у игрока 0: ♠A ♠2 ♠4, из колоды приходит джокер
    let mut round = rigged_round([&["As", "2s", "4s"], &["7h", "8c", "9d"]], &["JK", "Qh"]);
    apply_ok(&mut round, Intent::DealComplete);
    apply_ok(&mut round, Intent::Draw(6));

    // сброс ♠4 оставляет ♠A ♠2 JK
    let signals = apply_ok(&mut round, Intent::Discard(4));
    assert_eq!(round.phase(), Phase::CheckingWin);
    assert_eq!(round.current_player(), 0);
    assert!(round.declare_enabled());
    assert!(signals.contains(&RoundSignal::DeclareEnabled { enabled: true }));
    assert!(round.declarable_melds().is_some());

    let signals = apply_ok(&mut round, Intent::Declare);
    assert_eq!(round.phase(), Phase::EndGame);
    assert!(round.is_finished());
    assert_eq!(round.winner(), Some(0));
    assert!(signals.contains(&RoundSignal::RoundEnded { winner: Some(0) }));

    // после конца раунда всё игнорируется
    assert!(matches!(
        rejection(&mut round, Intent::Draw(7)),
        IntentRejection::WrongPhase {
            phase: Phase::EndGame,
            ..
        }
    ));
    assert_eq!(round.summary().winner, Some(0));
}

#[test]
fn end_turn_skips_the_declaration() {
    let mut round = rigged_round([&["As", "2s", "4s"], &["7h", "8c", "9d"]], &["JK", "Qh"]);
    apply_ok(&mut round, Intent::DealComplete);
    apply_ok(&mut round, Intent::Draw(6));
    apply_ok(&mut round, Intent::Discard(4));

    let signals = apply_ok(&mut round, Intent::EndTurn);

    assert_eq!(round.phase(), Phase::Draw);
    assert_eq!(round.current_player(), 1);
    assert!(!round.declare_enabled());
    assert!(signals.contains(&RoundSignal::DeclareEnabled { enabled: false }));
    assert_eq!(round.winner(), None);
}

#[test]
fn declare_outside_checking_win_is_ignored() {
    let mut round = dry_round(&["Kh", "3c"]);
    apply_ok(&mut round, Intent::DealComplete);

    assert_eq!(
        rejection(&mut round, Intent::Declare),
        IntentRejection::WrongPhase {
            phase: Phase::Draw,
            intent: IntentKind::Declare,
        }
    );
    assert_eq!(
        rejection(&mut round, Intent::EndTurn),
        IntentRejection::WrongPhase {
            phase: Phase::Draw,
            intent: IntentKind::EndTurn,
        }
    );
}

#[test]
fn empty_stock_ends_round_without_winner() {
    let mut round = dry_round(&["Kh"]);
    apply_ok(&mut round, Intent::DealComplete);
    apply_ok(&mut round, Intent::Draw(6));

    let signals = apply_ok(&mut round, Intent::Discard(6));

    assert_eq!(round.phase(), Phase::EndGame);
    assert_eq!(round.winner(), None);
    assert!(signals.contains(&RoundSignal::RoundEnded { winner: None }));
    assert_eq!(round.summary().turns_played, 1);
}

#[test]
fn ignored_intents_leave_no_history() {
    let mut round = dry_round(&["Kh", "3c"]);
    apply_ok(&mut round, Intent::DealComplete);
    let len = round.history().len();

    let _ = rejection(&mut round, Intent::Discard(0));
    let _ = rejection(&mut round, Intent::ReorderCancel);
    assert_eq!(round.history().len(), len);

    let signals = apply_ok(&mut round, Intent::Draw(6));
    assert_eq!(round.history().len(), len + signals.len());
}
