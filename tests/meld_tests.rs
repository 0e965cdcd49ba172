//! Проверка руки на раскладываемость (eval::partition).
//!
//! Эти тесты проверяют:
//! - простые сеты и раны, в том числе с джокерами;
//! - руку из нескольких групп, где жадный выбор ошибается;
//! - отказ, если хоть одна карта не входит ни в одну группу;
//! - исчерпание бюджета шагов как "нельзя объявить";
//! - что найденное разбиение покрывает руку ровно один раз;
//! - случайные руки из трёх групп и сверку с полным перебором.

use proptest::prelude::*;

use rummy_engine::domain::{cards_from_faces, Card, CardId, Face, GameConfig, Rank, Suit};
use rummy_engine::eval::group::can_grow_into_group;
use rummy_engine::eval::{
    classify_group, is_fully_meldable, is_valid_run, is_valid_set, MeldKind, MeldValidator,
    SearchOutcome,
};

fn hand(faces: &[&str]) -> Vec<Card> {
    cards_from_faces(faces).expect("valid faces")
}

//
// ВСПОМОГАТЕЛЬНОЕ: разбиение должно покрывать руку без повторов
//
fn assert_exact_cover(cards: &[Card]) {
    let melds = MeldValidator::default()
        .find_partition(cards)
        .expect("hand must be meldable");

    let mut used: Vec<CardId> = melds.iter().flat_map(|m| m.cards.iter().copied()).collect();
    used.sort_unstable();
    let mut all: Vec<CardId> = cards.iter().map(|c| c.id).collect();
    all.sort_unstable();
    assert_eq!(used, all, "partition must use every card exactly once");

    for meld in &melds {
        let members: Vec<Card> = cards
            .iter()
            .filter(|c| meld.cards.contains(&c.id))
            .copied()
            .collect();
        assert_eq!(classify_group(&members), Some(meld.kind));
    }
}

//
// ОТДЕЛЬНЫЕ ГРУППЫ
//

#[test]
fn set_allows_mixed_and_repeated_suits() {
    assert!(is_valid_set(&hand(&["7h", "7h", "7s"])));
    assert!(is_valid_set(&hand(&["Kd", "Kd", "JK"])));
    assert!(!is_valid_set(&hand(&["7h", "8h", "7s"])));
    assert!(!is_valid_set(&hand(&["7h", "7s"])));
}

#[test]
fn run_counts_gaps_against_wildcards() {
    assert!(is_valid_run(&hand(&["As", "2s", "3s"])));
    assert!(is_valid_run(&hand(&["As", "2s", "4s", "JK"])));
    assert!(is_valid_run(&hand(&["Qs", "Ks", "JK"])));

    assert!(!is_valid_run(&hand(&["As", "2s", "4s"])));
    assert!(!is_valid_run(&hand(&["As", "2s", "2s"])));
    assert!(!is_valid_run(&hand(&["As", "2h", "3s"])));
    // перехода K-A нет
    assert!(!is_valid_run(&hand(&["Qs", "Ks", "As"])));
}

#[test]
fn all_wildcard_group_is_valid() {
    let jokers = hand(&["JK", "JK", "JK"]);
    assert_eq!(classify_group(&jokers), Some(MeldKind::Set));
    assert!(is_valid_run(&jokers));
}

#[test]
fn growth_pruning_rejects_dead_partials() {
    assert!(can_grow_into_group(&hand(&["7h", "7s"])));
    assert!(can_grow_into_group(&hand(&["7h", "9h"])));
    assert!(!can_grow_into_group(&hand(&["7h", "9s"])));
    assert!(!can_grow_into_group(&hand(&["7h", "7h", "8h"])));
}

//
// РУКИ ЦЕЛИКОМ
//

#[test]
fn run_set_and_wildcard_pair_is_meldable() {
    // ♠A ♠2 ♠3 | ♥7 ♥7 ♥7 | ♦K ♦K + JK
    let cards = hand(&["As", "2s", "3s", "7h", "7h", "7h", "Kd", "Kd", "JK"]);
    assert!(is_fully_meldable(&cards));
    assert_exact_cover(&cards);
}

#[test]
fn run_with_gap_needs_a_wildcard() {
    assert!(!is_fully_meldable(&hand(&["As", "2s", "4s"])));
    assert!(is_fully_meldable(&hand(&["As", "2s", "4s", "JK"])));
}

#[test]
fn fourteen_cards_of_three_groups() {
    let cards = hand(&[
        "As", "2s", "3s", "4s", "5s", // ран из 5
        "7h", "7c", "7d", "7s", // сет из 4
        "9d", "Td", "Jd", "Qd", "Kd", // ран из 5
    ]);
    assert_eq!(cards.len(), 14);
    assert!(is_fully_meldable(&cards));
    assert_exact_cover(&cards);
}

#[test]
fn one_stray_card_spoils_the_hand() {
    assert!(!is_fully_meldable(&hand(&["As", "2s", "3s", "9c"])));
    assert!(!is_fully_meldable(&hand(&[
        "7h", "7c", "7d", "9d", "Td", "Jd", "2c"
    ])));
}

#[test]
fn seven_shared_between_set_and_run() {
    // Жадный "сет из четырёх семёрок" оставляет ♥8 ♥9 без пары.
    let cards = hand(&["7h", "7s", "7d", "7c", "8h", "9h"]);
    assert!(is_fully_meldable(&cards));
    assert_exact_cover(&cards);
}

#[test]
fn two_identical_runs_from_a_double_deck() {
    let cards = hand(&["As", "2s", "3s", "As", "2s", "3s"]);
    assert!(is_fully_meldable(&cards));
    assert_exact_cover(&cards);
}

#[test]
fn wildcards_extend_run_at_the_top() {
    // ♠Q ♠K + два джокера: J и T (туз только младший).
    assert!(is_fully_meldable(&hand(&["Qs", "Ks", "JK", "JK"])));
}

#[test]
fn wildcard_only_groups() {
    assert!(is_fully_meldable(&hand(&["JK", "JK", "JK"])));
    assert!(!is_fully_meldable(&hand(&["JK", "JK"])));
}

#[test]
fn empty_hand_is_not_meldable() {
    assert!(!is_fully_meldable(&[]));
    assert_eq!(MeldValidator::default().search(&[]), SearchOutcome::NotMeldable);
}

#[test]
fn duplicate_ids_are_counted_once() {
    let cards = hand(&["7h", "7c", "7d"]);
    let mut doubled = cards.clone();
    doubled.push(cards[0]);
    assert!(is_fully_meldable(&doubled));
}

#[test]
fn exhausted_budget_means_not_meldable() {
    let cards = hand(&["As", "2s", "3s", "7h", "7h", "7h", "Kd", "Kd", "JK"]);
    let tiny = MeldValidator::new(1);

    assert_eq!(tiny.search(&cards), SearchOutcome::BudgetExhausted);
    assert!(!tiny.is_fully_meldable(&cards));
    assert!(tiny.find_partition(&cards).is_none());
}

#[test]
fn many_wildcards_finish_within_default_budget() {
    // Почти раскладываемая рука: четыре джокера и "рваные" карты.
    let cards = hand(&[
        "JK", "JK", "JK", "JK", "As", "3h", "5c", "7d", "9s", "Jh", "Kc", "2d", "4s", "6h",
    ]);
    let outcome = MeldValidator::default().search(&cards);
    assert_ne!(outcome, SearchOutcome::BudgetExhausted);
}

#[test]
fn meld_kinds_are_reported() {
    let melds = MeldValidator::default()
        .find_partition(&hand(&["7h", "7c", "7d", "9d", "Td", "Jd"]))
        .expect("meldable");
    assert_eq!(melds.len(), 2);
    assert!(melds.iter().any(|m| m.kind == MeldKind::Set));
    assert!(melds.iter().any(|m| m.kind == MeldKind::Run));
}

//
// Свойство: результат не зависит от порядка карт в руке
//
const FACES: [&str; 16] = [
    "As", "2s", "3s", "4s", "5s", "7h", "7c", "7d", "7s", "9d", "Td", "Jd", "Qd", "Kd", "JK", "2c",
];

proptest! {
    #[test]
    fn verdict_ignores_hand_order(picks in proptest::collection::vec(0usize..FACES.len(), 3..10), seed in any::<u64>()) {
        let faces: Vec<&str> = picks.iter().map(|&i| FACES[i]).collect();
        let cards = hand(&faces);

        let mut shuffled = cards.clone();
        let n = shuffled.len();
        // детерминированная перестановка из seed
        for i in (1..n).rev() {
            let j = (seed.rotate_left(i as u32) % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }

        prop_assert_eq!(is_fully_meldable(&cards), is_fully_meldable(&shuffled));
    }
}

//
// Случайные руки из трёх валидных групп
//

/// Валидная группа из `n` карт: сет или ран, часть карт заменена джокерами.
fn group(n: usize, joker_odds: f64, suits: &'static [Suit]) -> BoxedStrategy<Vec<Face>> {
    let jokers = prop::collection::vec(prop::bool::weighted(joker_odds), n);
    let set = (
        prop::sample::select(Rank::STANDARD.to_vec()),
        prop::collection::vec(prop::sample::select(suits), n),
        jokers.clone(),
    )
        .prop_map(|(rank, suits, jokers)| {
            suits
                .into_iter()
                .zip(jokers)
                .map(|(suit, j)| if j { Face::JOKER } else { Face::new(rank, suit) })
                .collect::<Vec<_>>()
        });
    let run = (
        0..=(Rank::STANDARD.len() - n),
        prop::sample::select(suits),
        jokers,
    )
        .prop_map(move |(start, suit, jokers)| {
            Rank::STANDARD[start..start + n]
                .iter()
                .zip(jokers)
                .map(|(&rank, j)| if j { Face::JOKER } else { Face::new(rank, suit) })
                .collect::<Vec<_>>()
        });
    prop_oneof![set, run].boxed()
}

/// 14 карт из трёх групп по 3..=8 карт, перемешанные.
fn three_group_hand(joker_odds: f64, suits: &'static [Suit]) -> impl Strategy<Value = Vec<Face>> {
    (3usize..=8, 3usize..=8)
        .prop_filter("third group needs at least 3 cards", |(a, b)| a + b <= 11)
        .prop_flat_map(move |(a, b)| {
            (
                group(a, joker_odds, suits),
                group(b, joker_odds, suits),
                group(14 - a - b, joker_odds, suits),
            )
        })
        .prop_map(|(x, y, z)| [x, y, z].concat())
        .prop_shuffle()
}

fn to_cards(faces: &[Face]) -> Vec<Card> {
    faces
        .iter()
        .enumerate()
        .map(|(i, &face)| Card::from_face(i as CardId, face))
        .collect()
}

/// Полный перебор: первая карта обязана войти в какую-то группу.
fn brute_force_meldable(cards: &[Card]) -> bool {
    let Some((first, rest)) = cards.split_first() else {
        return true;
    };
    for mask in 0u32..(1 << rest.len()) {
        if mask.count_ones() < 2 {
            continue;
        }
        let mut group = vec![*first];
        let mut remaining = Vec::with_capacity(rest.len());
        for (i, c) in rest.iter().enumerate() {
            if mask & (1 << i) != 0 {
                group.push(*c);
            } else {
                remaining.push(*c);
            }
        }
        if classify_group(&group).is_some() && brute_force_meldable(&remaining) {
            return true;
        }
    }
    false
}

fn small_face() -> impl Strategy<Value = Face> {
    let natural = (
        prop::sample::select(Rank::STANDARD[..5].to_vec()),
        prop::sample::select(vec![Suit::Spade, Suit::Heart]),
    )
        .prop_map(|(rank, suit)| Face::new(rank, suit));
    prop_oneof![9 => natural, 1 => Just(Face::JOKER)]
}

const ALL_SUITS: &[Suit] = &Suit::STANDARD;
const NO_DIAMONDS: &[Suit] = &[Suit::Spade, Suit::Heart, Suit::Club];

proptest! {
    #[test]
    fn three_valid_groups_are_meldable(faces in three_group_hand(0.15, ALL_SUITS)) {
        let cards = to_cards(&faces);
        prop_assert_eq!(cards.len(), GameConfig::default().initial_hold_count as usize);
        prop_assert!(is_fully_meldable(&cards), "hand {:?}", faces);
    }

    #[test]
    fn unabsorbable_card_spoils_a_meldable_hand(
        faces in three_group_hand(0.0, NO_DIAMONDS),
        slot in any::<prop::sample::Index>(),
    ) {
        // бубна ранга, которого нет в руке: ни сет, ни ран её не примут
        let stray_rank = Rank::STANDARD
            .iter()
            .copied()
            .find(|r| faces.iter().all(|f| f.rank != *r));
        prop_assume!(stray_rank.is_some());

        let mut with_stray = faces.clone();
        if let Some(rank) = stray_rank {
            with_stray.insert(slot.index(faces.len() + 1), Face::new(rank, Suit::Diamond));
        }

        prop_assert!(is_fully_meldable(&to_cards(&faces)));
        prop_assert!(!is_fully_meldable(&to_cards(&with_stray)), "hand {:?}", with_stray);
    }

    #[test]
    fn agrees_with_brute_force_on_small_hands(faces in prop::collection::vec(small_face(), 3..=9)) {
        let cards = to_cards(&faces);
        prop_assert_eq!(is_fully_meldable(&cards), brute_force_meldable(&cards), "hand {:?}", faces);
    }
}
