use serde::{Deserialize, Serialize};

use crate::domain::{CardId, PlayerIndex, Zone};
use crate::engine::errors::LedgerError;

/// Учёт зон: кто владеет каждой картой.
///
/// Инвариант: объединение всех зон = все id колоды, зоны попарно
/// не пересекаются, `owner[id]` совпадает с зоной, где id реально лежит.
/// Единственный способ сменить зону – `transfer`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneLedger {
    /// Колода в порядке добора: первый элемент – следующая карта.
    stock: Vec<CardId>,
    /// Руки игроков в порядке отображения.
    hands: Vec<Vec<CardId>>,
    /// Сброс: последний элемент – верхняя карта.
    discard: Vec<CardId>,
    /// Текущая зона каждой карты, индекс = id.
    owner: Vec<Zone>,
}

impl ZoneLedger {
    /// Все `card_count` карт в колоде, в порядке id.
    pub fn new(card_count: usize, player_count: u8) -> Self {
        Self {
            stock: (0..card_count as CardId).collect(),
            hands: vec![Vec::new(); player_count as usize],
            discard: Vec::new(),
            owner: vec![Zone::Stock; card_count],
        }
    }

    pub fn total_cards(&self) -> usize {
        self.owner.len()
    }

    pub fn player_count(&self) -> u8 {
        self.hands.len() as u8
    }

    /// Зона карты.
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.owner.get(card as usize).copied()
    }

    /// Содержимое зоны в её порядке.
    pub fn cards_in(&self, zone: Zone) -> Result<&[CardId], LedgerError> {
        match zone {
            Zone::Stock => Ok(&self.stock),
            Zone::Discard => Ok(&self.discard),
            Zone::Hand(p) => self
                .hands
                .get(p as usize)
                .map(Vec::as_slice)
                .ok_or(LedgerError::UnknownZone(zone)),
        }
    }

    pub fn hand(&self, player: PlayerIndex) -> &[CardId] {
        self.hands
            .get(player as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count_in_zone(&self, zone: Zone) -> usize {
        self.cards_in(zone).map_or(0, <[CardId]>::len)
    }

    /// Верхняя (последняя положенная) карта сброса.
    pub fn top_of_discard(&self) -> Option<CardId> {
        self.discard.last().copied()
    }

    /// Следующая карта колоды.
    pub fn next_stock_card(&self) -> Option<CardId> {
        self.stock.first().copied()
    }

    /// Переложить карту из `from` в `to`.
    ///
    /// `at = None` – в конец зоны; индекс больше длины прижимается к концу.
    /// Все проверки делаются до первой мутации: либо перенос целиком, либо ничего.
    pub fn transfer(
        &mut self,
        card: CardId,
        from: Zone,
        to: Zone,
        at: Option<usize>,
    ) -> Result<(), LedgerError> {
        let actual = self.zone_of(card).ok_or(LedgerError::UnknownCard(card))?;
        self.check_zone(from)?;
        self.check_zone(to)?;

        if actual != from {
            return Err(LedgerError::CardNotInZone {
                card,
                expected: from,
                actual,
            });
        }

        let src = self.zone_vec(from)?;
        let pos = src
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| LedgerError::InvariantBroken(format!("card {card} missing from {from}")))?;
        src.remove(pos);

        let dst = self.zone_vec(to)?;
        let idx = at.map_or(dst.len(), |i| i.min(dst.len()));
        dst.insert(idx, card);

        self.owner[card as usize] = to;
        Ok(())
    }

    /// Заменить порядок руки. Новый порядок обязан быть перестановкой старого.
    pub fn reorder_hand(
        &mut self,
        player: PlayerIndex,
        new_order: Vec<CardId>,
    ) -> Result<(), LedgerError> {
        let hand = self
            .hands
            .get_mut(player as usize)
            .ok_or(LedgerError::UnknownZone(Zone::Hand(player)))?;

        let mut old_sorted = hand.clone();
        let mut new_sorted = new_order.clone();
        old_sorted.sort_unstable();
        new_sorted.sort_unstable();
        if old_sorted != new_sorted {
            return Err(LedgerError::NotAPermutation { player });
        }

        *hand = new_order;
        Ok(())
    }

    /// Полная проверка инварианта зон.
    pub fn check_invariants(&self) -> Result<(), LedgerError> {
        let mut seen = vec![false; self.owner.len()];
        let mut total = 0usize;

        let zones = std::iter::once((Zone::Stock, &self.stock))
            .chain(
                self.hands
                    .iter()
                    .enumerate()
                    .map(|(p, h)| (Zone::Hand(p as PlayerIndex), h)),
            )
            .chain(std::iter::once((Zone::Discard, &self.discard)));

        for (zone, cards) in zones {
            for &card in cards {
                let slot = seen
                    .get_mut(card as usize)
                    .ok_or(LedgerError::UnknownCard(card))?;
                if *slot {
                    return Err(LedgerError::InvariantBroken(format!(
                        "card {card} appears in more than one place"
                    )));
                }
                *slot = true;
                total += 1;

                if self.owner[card as usize] != zone {
                    return Err(LedgerError::CardNotInZone {
                        card,
                        expected: self.owner[card as usize],
                        actual: zone,
                    });
                }
            }
        }

        if total != self.owner.len() {
            return Err(LedgerError::InvariantBroken(format!(
                "{total} cards in zones, {} expected",
                self.owner.len()
            )));
        }
        Ok(())
    }

    fn check_zone(&self, zone: Zone) -> Result<(), LedgerError> {
        match zone {
            Zone::Hand(p) if p as usize >= self.hands.len() => Err(LedgerError::UnknownZone(zone)),
            _ => Ok(()),
        }
    }

    fn zone_vec(&mut self, zone: Zone) -> Result<&mut Vec<CardId>, LedgerError> {
        match zone {
            Zone::Stock => Ok(&mut self.stock),
            Zone::Discard => Ok(&mut self.discard),
            Zone::Hand(p) => self
                .hands
                .get_mut(p as usize)
                .ok_or(LedgerError::UnknownZone(zone)),
        }
    }
}

#[cfg(test)]
impl ZoneLedger {
    /// Сменить зону карты в обход `transfer`.
    pub(crate) fn force_owner(&mut self, card: CardId, zone: Zone) {
        self.owner[card as usize] = zone;
    }
}
