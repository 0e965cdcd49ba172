//! Порядок карт в руке: сортировка, перестановка, слот под указателем.
//!
//! Порядок руки – состояние отображения. Проверка руки его не учитывает,
//! но сортировка даёт детерминированный вход для перебора.

use serde::{Deserialize, Serialize};

use crate::domain::{CardId, Deck, HandLayout, PlayerIndex};

/// Режим сортировки руки.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortMode {
    /// Рука ещё не сортировалась.
    #[default]
    None,
    /// По (ранг, масть).
    Rank,
    /// По (масть, ранг).
    Suit,
}

impl SortMode {
    /// Следующий режим при повторном нажатии: Rank ↔ Suit, начиная с Rank.
    pub fn toggled(self) -> SortMode {
        match self {
            SortMode::None | SortMode::Suit => SortMode::Rank,
            SortMode::Rank => SortMode::Suit,
        }
    }
}

/// Стабильная сортировка id руки по ключу режима.
///
/// `SortMode::None` оставляет порядок как есть. Неизвестные колоде id
/// уходят в конец в исходном порядке.
pub fn sort_hand(deck: &Deck, order: &[CardId], mode: SortMode) -> Vec<CardId> {
    let mut sorted = order.to_vec();
    match mode {
        SortMode::None => {}
        SortMode::Rank => sorted.sort_by_key(|&id| deck.card(id).map(|c| (c.rank, c.suit))),
        SortMode::Suit => sorted.sort_by_key(|&id| deck.card(id).map(|c| (c.suit, c.rank))),
    }
    // Option: None < Some, а неизвестные id нужны в хвосте.
    let (known, unknown): (Vec<CardId>, Vec<CardId>) =
        sorted.into_iter().partition(|&id| deck.contains(id));
    known.into_iter().chain(unknown).collect()
}

/// Убрать карту с позиции `from` и вставить на позицию `to`.
///
/// Остальные карты сохраняют относительный порядок. `None`, если
/// одна из позиций вне руки.
pub fn move_to_index(order: &[CardId], from: usize, to: usize) -> Option<Vec<CardId>> {
    if from >= order.len() || to >= order.len() {
        return None;
    }
    let mut out = order.to_vec();
    let card = out.remove(from);
    out.insert(to, card);
    Some(out)
}

/// Слот руки под координатой указателя.
///
/// `positions` – текущие центры карт слева направо. Граница между слотами
/// `i` и `i + 1` – середина между их центрами. `None` ("нет слота"),
/// если точка вне полосы руки по вертикали или дальше крайних карт.
pub fn index_for_position(
    x: f32,
    y: f32,
    positions: &[f32],
    layout: &HandLayout,
) -> Option<usize> {
    let (first, last) = match (positions.first(), positions.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return None,
    };

    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let (min_y, max_y) = layout.band();
    let half_w = layout.card_width / 2.0;
    if y < min_y || y > max_y || x < first - half_w || x > last + half_w {
        return None;
    }

    let slot = positions
        .windows(2)
        .filter(|pair| x > (pair[0] + pair[1]) / 2.0)
        .count();
    Some(slot)
}

/// Незафиксированное перетаскивание карты внутри руки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DragSession {
    pub player: PlayerIndex,
    pub card: CardId,
    /// Порядок руки до начала перетаскивания.
    pub original: Vec<CardId>,
    /// Позиция карты в `original`.
    pub from: usize,
    /// Последний показанный порядок.
    pub preview: Option<Vec<CardId>>,
}

impl DragSession {
    /// Начать перетаскивание. `None`, если карты нет в руке.
    pub fn start(player: PlayerIndex, card: CardId, hand: &[CardId]) -> Option<Self> {
        let from = hand.iter().position(|&c| c == card)?;
        Some(Self {
            player,
            card,
            original: hand.to_vec(),
            from,
            preview: None,
        })
    }

    /// Пересчитать предпросмотр для точки указателя.
    ///
    /// Слоты считаются по раскладке исходного порядка.
    pub fn preview_at(&mut self, x: f32, y: f32, layout: &HandLayout) -> Option<&[CardId]> {
        let positions = layout.positions(self.original.len());
        let to = index_for_position(x, y, &positions, layout)?;
        self.preview = move_to_index(&self.original, self.from, to);
        self.preview.as_deref()
    }
}
