use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::card::Card;
use crate::eval::group::{can_grow_into_group, classify_group, Meld, MIN_GROUP_SIZE};

/// Бюджет шагов перебора по умолчанию.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Маска позиций руки: рука проверяется как множество до 64 карт.
type HandMask = u64;

/// Результат перебора.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Найдено разбиение всей руки на группы.
    Meldable(Vec<Meld>),
    /// Разбиения нет.
    NotMeldable,
    /// Перебор упёрся в бюджет шагов. Считается "пока нельзя объявить".
    BudgetExhausted,
}

/// Проверка "рука целиком раскладывается на комбинации".
///
/// Полный перебор с возвратом: берём младшую оставшуюся карту, строим
/// все группы, которые её содержат, и рекурсивно разбираем остаток.
/// Остатки, которые уже не удалось разобрать, запоминаются по маске.
#[derive(Clone, Copy, Debug)]
pub struct MeldValidator {
    max_steps: u64,
}

impl Default for MeldValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl MeldValidator {
    pub fn new(max_steps: u64) -> Self {
        Self { max_steps }
    }

    pub fn search(&self, hand: &[Card]) -> SearchOutcome {
        let mut cards = dedup_by_id(hand);
        // Одинаковые лица должны стоять рядом: на этом держится отсечение симметрий.
        cards.sort_by_key(|c| (c.rank, c.suit));

        if cards.is_empty() {
            return SearchOutcome::NotMeldable;
        }
        if cards.len() > HandMask::BITS as usize {
            warn!(size = cards.len(), "hand too large for meld search");
            return SearchOutcome::NotMeldable;
        }

        let full = low_bits(cards.len());

        let mut search = Search {
            cards: &cards,
            block_start: face_blocks(&cards),
            steps: 0,
            max_steps: self.max_steps,
            exhausted: false,
            dead: HashSet::new(),
        };
        let mut groups = Vec::new();

        let found = search.solve(full, &mut groups);
        debug!(
            size = cards.len(),
            steps = search.steps,
            found,
            "meld search finished"
        );

        if found {
            let melds = groups
                .into_iter()
                .filter_map(|mask| {
                    let members = members_of(&cards, mask);
                    classify_group(&members).map(|kind| Meld {
                        kind,
                        cards: members.iter().map(|c| c.id).collect(),
                    })
                })
                .collect();
            SearchOutcome::Meldable(melds)
        } else if search.exhausted {
            warn!(
                size = cards.len(),
                max_steps = self.max_steps,
                "meld search budget exhausted, treating hand as not meldable"
            );
            SearchOutcome::BudgetExhausted
        } else {
            SearchOutcome::NotMeldable
        }
    }

    /// Разбиение (если есть).
    pub fn find_partition(&self, hand: &[Card]) -> Option<Vec<Meld>> {
        match self.search(hand) {
            SearchOutcome::Meldable(melds) => Some(melds),
            SearchOutcome::NotMeldable | SearchOutcome::BudgetExhausted => None,
        }
    }

    pub fn is_fully_meldable(&self, hand: &[Card]) -> bool {
        matches!(self.search(hand), SearchOutcome::Meldable(_))
    }
}

/// Проверка с бюджетом по умолчанию.
pub fn is_fully_meldable(hand: &[Card]) -> bool {
    MeldValidator::default().is_fully_meldable(hand)
}

/// Рука – множество: повторный id учитывается один раз.
fn dedup_by_id(hand: &[Card]) -> Vec<Card> {
    let mut seen = HashSet::with_capacity(hand.len());
    hand.iter().copied().filter(|c| seen.insert(c.id)).collect()
}

/// Для каждой позиции – начало её блока одинаковых лиц.
fn face_blocks(cards: &[Card]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(cards.len());
    for i in 0..cards.len() {
        if i > 0 && cards[i].face() == cards[i - 1].face() {
            starts.push(starts[i - 1]);
        } else {
            starts.push(i);
        }
    }
    starts
}

fn low_bits(n: usize) -> HandMask {
    if n >= HandMask::BITS as usize {
        HandMask::MAX
    } else {
        (1 << n) - 1
    }
}

fn members_of(cards: &[Card], mask: HandMask) -> Vec<Card> {
    cards
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| *c)
        .collect()
}

struct Search<'a> {
    cards: &'a [Card],
    /// Начало блока одинаковых лиц для каждой позиции.
    block_start: Vec<usize>,
    steps: u64,
    max_steps: u64,
    exhausted: bool,
    /// Остатки, для которых разбиения точно нет.
    dead: HashSet<HandMask>,
}

impl Search<'_> {
    fn solve(&mut self, remaining: HandMask, groups: &mut Vec<HandMask>) -> bool {
        if remaining == 0 {
            return true;
        }
        if (remaining.count_ones() as usize) < MIN_GROUP_SIZE {
            return false;
        }
        let key = self.multiset_key(remaining);
        if self.dead.contains(&key) {
            return false;
        }

        let anchor = remaining.trailing_zeros() as usize;
        let mut group = vec![self.cards[anchor]];

        if self.grow(remaining, &mut group, 1 << anchor, anchor + 1, groups) {
            return true;
        }

        // При исчерпании бюджета остаток не доказан пустым – не запоминаем.
        if !self.exhausted {
            self.dead.insert(key);
        }
        false
    }

    /// Разрешимость остатка зависит только от multiset лиц: в каждом блоке
    /// одинаковых карт оставляем младшие биты в том же количестве.
    fn multiset_key(&self, remaining: HandMask) -> HandMask {
        let mut key = 0;
        let mut i = 0;
        while i < self.cards.len() {
            let start = i;
            while i < self.cards.len() && self.block_start[i] == start {
                i += 1;
            }
            let block = low_bits(i - start) << start;
            let count = (remaining & block).count_ones() as usize;
            key |= low_bits(count) << start;
        }
        key
    }

    fn grow(
        &mut self,
        remaining: HandMask,
        group: &mut Vec<Card>,
        group_mask: HandMask,
        next_from: usize,
        groups: &mut Vec<HandMask>,
    ) -> bool {
        self.steps += 1;
        if self.steps > self.max_steps {
            self.exhausted = true;
            return false;
        }

        if group.len() >= MIN_GROUP_SIZE && classify_group(group).is_some() {
            groups.push(group_mask);
            if self.solve(remaining & !group_mask, groups) {
                return true;
            }
            groups.pop();
            if self.exhausted {
                return false;
            }
        }

        for idx in next_from..self.cards.len() {
            if remaining & (1 << idx) == 0 {
                continue;
            }
            // Такую же карту на этом уровне уже пробовали: группа была бы той же.
            if idx > next_from
                && self.block_start[idx] != idx
                && remaining & (1 << (idx - 1)) != 0
                && group_mask & (1 << (idx - 1)) == 0
            {
                continue;
            }

            group.push(self.cards[idx]);
            if can_grow_into_group(group)
                && self.grow(remaining, group, group_mask | (1 << idx), idx + 1, groups)
            {
                return true;
            }
            group.pop();

            if self.exhausted {
                return false;
            }
        }

        false
    }
}
