use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::domain::{Card, CardId, ConfigError, Deck, GameConfig, PlayerIndex, RoundId, Zone};
use crate::engine::actions::Intent;
use crate::engine::errors::{EngineError, IntentRejection, LedgerError};
use crate::engine::ledger::ZoneLedger;
use crate::engine::ordering::{sort_hand, DragSession, SortMode};
use crate::engine::phase::{transition, Phase, Step};
use crate::engine::round_history::{RoundHistory, RoundSignal};
use crate::engine::RandomSource;
use crate::eval::{Meld, MeldValidator};

/// Изменяемое состояние раунда. Меняет его только `Round::apply`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundState {
    pub phase: Phase,
    pub current_player: PlayerIndex,
    pub ledger: ZoneLedger,
    pub sort_mode: SortMode,
    pub declare_enabled: bool,
    /// Незафиксированное перетаскивание (если есть).
    pub drag: Option<DragSession>,
    /// Раунд остановлен после нарушения владения.
    pub halted: bool,
    /// Сколько ходов завершено.
    pub turns_played: u32,
    pub winner: Option<PlayerIndex>,
}

/// Итог обработки намерения.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Намерение применено, вот что изменилось.
    Applied(Vec<RoundSignal>),
    /// Намерение проигнорировано, состояние не изменилось.
    Ignored(IntentRejection),
}

impl IntentOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, IntentOutcome::Applied(_))
    }

    pub fn signals(&self) -> &[RoundSignal] {
        match self {
            IntentOutcome::Applied(s) => s,
            IntentOutcome::Ignored(_) => &[],
        }
    }
}

/// Краткий итог завершённого раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub winner: Option<PlayerIndex>,
    pub turns_played: u32,
}

/// Почему обработчик не довёл намерение до конца.
enum Fault {
    /// Мягкий отказ: проверено до любых мутаций.
    Soft(IntentRejection),
    /// Нарушение владения: раунд останавливается.
    Hard(LedgerError),
}

impl From<LedgerError> for Fault {
    fn from(e: LedgerError) -> Self {
        Fault::Hard(e)
    }
}

impl From<IntentRejection> for Fault {
    fn from(r: IntentRejection) -> Self {
        Fault::Soft(r)
    }
}

/// Один раунд: колода, зоны, фаза, история.
#[derive(Clone, Debug)]
pub struct Round {
    pub round_id: RoundId,
    config: GameConfig,
    deck: Deck,
    state: RoundState,
    validator: MeldValidator,
    history: RoundHistory,
}

/// Старт нового раунда:
/// - собирает колоду и перемешивает её;
/// - фиксирует id карт;
/// - раздаёт руки по кругу.
///
/// Раунд остаётся в `Waiting` до `Intent::DealComplete`.
pub fn start_round<R: RandomSource>(
    config: &GameConfig,
    rng: &mut R,
    round_id: RoundId,
) -> Result<Round, EngineError> {
    config.validate()?;

    let mut faces = Deck::standard_faces(config.deck_copies, config.wildcard_count);
    rng.shuffle(&mut faces);

    Round::from_deck(config, Deck::from_faces(faces), round_id)
}

impl Round {
    /// Раунд поверх готовой колоды (тесты, реплеи).
    pub fn from_deck(config: &GameConfig, deck: Deck, round_id: RoundId) -> Result<Self, EngineError> {
        config.validate()?;
        if deck.len() <= config.dealt_count() {
            return Err(ConfigError::InvalidConfig(format!(
                "deck of {} cards cannot deal {} and keep a stock",
                deck.len(),
                config.dealt_count()
            ))
            .into());
        }

        let ledger = ZoneLedger::new(deck.len(), config.player_count);
        let mut round = Round {
            round_id,
            config: config.clone(),
            validator: MeldValidator::new(config.max_search_steps),
            state: RoundState {
                phase: Phase::Waiting,
                current_player: 0,
                ledger,
                sort_mode: SortMode::None,
                declare_enabled: false,
                drag: None,
                halted: false,
                turns_played: 0,
                winner: None,
            },
            deck,
            history: RoundHistory::new(),
        };

        round.history.push(RoundSignal::RoundStarted {
            round_id,
            card_count: round.deck.len(),
        });
        round.deal()?;

        info!(
            round_id,
            players = config.player_count,
            stock = round.state.ledger.count_in_zone(Zone::Stock),
            "round dealt"
        );
        Ok(round)
    }

    /// Раздача: позиция колоды i уходит игроку i % player_count.
    fn deal(&mut self) -> Result<(), LedgerError> {
        let players = self.config.player_count as usize;
        for i in 0..self.config.dealt_count() {
            let card = self
                .state
                .ledger
                .next_stock_card()
                .ok_or_else(|| LedgerError::InvariantBroken("stock ran out while dealing".into()))?;
            let to = Zone::Hand((i % players) as PlayerIndex);
            self.state.ledger.transfer(card, Zone::Stock, to, None)?;
            self.history.push(RoundSignal::ZoneChanged {
                card,
                from: Zone::Stock,
                to,
            });
        }
        self.state.ledger.check_invariants()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_player(&self) -> PlayerIndex {
        self.state.current_player
    }

    pub fn declare_enabled(&self) -> bool {
        self.state.declare_enabled
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase.is_terminal()
    }

    pub fn winner(&self) -> Option<PlayerIndex> {
        self.state.winner
    }

    pub fn ledger(&self) -> &ZoneLedger {
        &self.state.ledger
    }

    /// Порядок руки игрока (id).
    pub fn hand(&self, player: PlayerIndex) -> &[CardId] {
        self.state.ledger.hand(player)
    }

    /// Карты руки игрока в порядке отображения.
    pub fn hand_cards(&self, player: PlayerIndex) -> Vec<Card> {
        self.deck.lookup(self.hand(player))
    }

    /// Центры карт руки по раскладке конфига.
    pub fn hand_positions(&self, player: PlayerIndex) -> Vec<f32> {
        self.config.hand_layout.positions(self.hand(player).len())
    }

    /// Разбиение руки текущего игрока на комбинации (если есть).
    pub fn declarable_melds(&self) -> Option<Vec<Meld>> {
        self.validator.find_partition(&self.canonical_hand(self.state.current_player))
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round_id: self.round_id,
            winner: self.state.winner,
            turns_played: self.state.turns_played,
        }
    }

    /// Применить намерение текущего игрока.
    ///
    /// Недопустимое намерение – `Ok(IntentOutcome::Ignored(..))` без изменений.
    /// Нарушение владения – `Err`, раунд останавливается.
    pub fn apply(&mut self, intent: Intent) -> Result<IntentOutcome, EngineError> {
        if self.state.halted {
            return Err(EngineError::RoundHalted);
        }

        let kind = intent.kind();
        let target = match transition(self.state.phase, kind) {
            Some(Step::Enter(phase)) => phase,
            Some(Step::Stay) => self.state.phase,
            None => {
                let rejection = IntentRejection::WrongPhase {
                    phase: self.state.phase,
                    intent: kind,
                };
                debug!(round_id = self.round_id, %rejection, "intent ignored");
                return Ok(IntentOutcome::Ignored(rejection));
            }
        };

        let mut signals = Vec::new();
        let result = match intent {
            Intent::DealComplete => self.on_deal_complete(target, &mut signals),
            Intent::Draw(card) => self.on_draw(card, target, &mut signals),
            Intent::Discard(card) => self.on_discard(card, target, &mut signals),
            Intent::ReorderPreview { card, x, y } => self.on_reorder_preview(card, x, y, &mut signals),
            Intent::ReorderCommit(card) => self.on_reorder_commit(card, &mut signals),
            Intent::ReorderCancel => self.on_reorder_cancel(&mut signals),
            Intent::Sort => self.on_sort(&mut signals),
            Intent::Declare => self.on_declare(target, &mut signals),
            Intent::EndTurn => self.advance_turn(&mut signals),
        }
        .and_then(|()| self.state.ledger.check_invariants().map_err(Fault::Hard));

        match result {
            Ok(()) => {
                for s in &signals {
                    self.history.push(s.clone());
                }
                Ok(IntentOutcome::Applied(signals))
            }
            Err(Fault::Soft(rejection)) => {
                debug!(round_id = self.round_id, %rejection, "intent ignored");
                Ok(IntentOutcome::Ignored(rejection))
            }
            Err(Fault::Hard(err)) => {
                error!(round_id = self.round_id, %err, "ownership breach, round halted");
                self.state.halted = true;
                Err(EngineError::Ownership(err))
            }
        }
    }

    fn on_deal_complete(&mut self, target: Phase, signals: &mut Vec<RoundSignal>) -> Result<(), Fault> {
        signals.push(RoundSignal::CurrentPlayerChanged {
            player: self.state.current_player,
        });
        self.enter(target, signals);
        Ok(())
    }

    /// Взять можно только следующую карту колоды или верх сброса.
    fn on_draw(
        &mut self,
        card: CardId,
        target: Phase,
        signals: &mut Vec<RoundSignal>,
    ) -> Result<(), Fault> {
        if !self.deck.contains(card) {
            return Err(IntentRejection::UnknownCard(card).into());
        }

        let from = if self.state.ledger.next_stock_card() == Some(card) {
            Zone::Stock
        } else if self.state.ledger.top_of_discard() == Some(card) {
            Zone::Discard
        } else {
            return Err(IntentRejection::NotDrawable(card).into());
        };

        let to = Zone::Hand(self.state.current_player);
        self.state.ledger.transfer(card, from, to, None)?;
        signals.push(RoundSignal::ZoneChanged { card, from, to });

        self.set_declare_enabled(false, signals);
        self.enter(target, signals);
        Ok(())
    }

    /// Сброс карты и автоматическая проверка руки.
    ///
    /// Раскладываемая рука оставляет раунд в `CheckingWin`: `EndTurn` – явный отказ от объявления.
    fn on_discard(
        &mut self,
        card: CardId,
        target: Phase,
        signals: &mut Vec<RoundSignal>,
    ) -> Result<(), Fault> {
        let player = self.state.current_player;
        match self.state.ledger.zone_of(card) {
            None => return Err(IntentRejection::UnknownCard(card).into()),
            Some(zone) if zone != Zone::Hand(player) => {
                return Err(IntentRejection::NotInHand(card).into())
            }
            Some(_) => {}
        }

        self.state.drag = None;
        self.state
            .ledger
            .transfer(card, Zone::Hand(player), Zone::Discard, None)?;
        signals.push(RoundSignal::ZoneChanged {
            card,
            from: Zone::Hand(player),
            to: Zone::Discard,
        });

        self.enter(target, signals);

        let meldable = self
            .validator
            .is_fully_meldable(&self.canonical_hand(player));
        self.set_declare_enabled(meldable, signals);

        if meldable {
            info!(round_id = self.round_id, player, "hand is meldable, declare enabled");
            Ok(())
        } else {
            self.advance_turn(signals)
        }
    }

    fn on_declare(&mut self, target: Phase, signals: &mut Vec<RoundSignal>) -> Result<(), Fault> {
        if !self.state.declare_enabled {
            return Err(IntentRejection::NotMeldable.into());
        }

        let winner = self.state.current_player;
        self.state.winner = Some(winner);
        self.state.turns_played += 1;
        self.set_declare_enabled(false, signals);
        self.enter(target, signals);
        signals.push(RoundSignal::RoundEnded {
            winner: Some(winner),
        });

        info!(round_id = self.round_id, winner, "round won by declaration");
        Ok(())
    }

    /// Передать ход следующему игроку. Пустая колода заканчивает раунд.
    fn advance_turn(&mut self, signals: &mut Vec<RoundSignal>) -> Result<(), Fault> {
        self.state.turns_played += 1;
        self.set_declare_enabled(false, signals);

        if self.state.ledger.count_in_zone(Zone::Stock) == 0 {
            self.enter(Phase::EndGame, signals);
            signals.push(RoundSignal::RoundEnded { winner: None });
            info!(round_id = self.round_id, "stock exhausted, round ends without winner");
            return Ok(());
        }

        let next = (self.state.current_player + 1) % self.config.player_count;
        self.state.current_player = next;
        signals.push(RoundSignal::CurrentPlayerChanged { player: next });
        self.enter(Phase::Draw, signals);
        Ok(())
    }

    fn on_sort(&mut self, signals: &mut Vec<RoundSignal>) -> Result<(), Fault> {
        let player = self.state.current_player;
        let mode = self.state.sort_mode.toggled();
        let order = sort_hand(&self.deck, self.hand(player), mode);

        self.state.ledger.reorder_hand(player, order.clone())?;
        self.state.sort_mode = mode;
        self.state.drag = None;

        debug!(round_id = self.round_id, player, ?mode, "hand sorted");
        signals.push(RoundSignal::HandReordered { player, order });
        Ok(())
    }

    fn on_reorder_preview(
        &mut self,
        card: CardId,
        x: f32,
        y: f32,
        signals: &mut Vec<RoundSignal>,
    ) -> Result<(), Fault> {
        let player = self.state.current_player;

        let (mut session, continuing) = match &self.state.drag {
            Some(s) if s.card == card && s.player == player => (s.clone(), true),
            _ => (
                DragSession::start(player, card, self.hand(player))
                    .ok_or(IntentRejection::NotInHand(card))?,
                false,
            ),
        };

        let layout = self.config.hand_layout;
        let preview = session.preview_at(x, y, &layout).map(<[CardId]>::to_vec);
        match preview {
            Some(order) => {
                signals.push(RoundSignal::ReorderPreviewed { player, order });
                self.state.drag = Some(session);
            }
            // Перетаскивание не началось: отменять нечего.
            None if !continuing => return Err(IntentRejection::NoDragInProgress.into()),
            None => {
                // Указатель вне полосы руки – откат к порядку до перетаскивания.
                self.state.drag = None;
                signals.push(RoundSignal::ReorderCancelled {
                    player,
                    order: session.original,
                });
            }
        }
        Ok(())
    }

    fn on_reorder_commit(&mut self, card: CardId, signals: &mut Vec<RoundSignal>) -> Result<(), Fault> {
        let (player, order) = match &self.state.drag {
            Some(DragSession {
                card: c,
                player,
                preview: Some(order),
                ..
            }) if *c == card => (*player, order.clone()),
            _ => return Err(IntentRejection::NoPreview(card).into()),
        };

        self.state.ledger.reorder_hand(player, order.clone())?;
        self.state.drag = None;
        signals.push(RoundSignal::HandReordered { player, order });
        Ok(())
    }

    fn on_reorder_cancel(&mut self, signals: &mut Vec<RoundSignal>) -> Result<(), Fault> {
        let session = self
            .state
            .drag
            .take()
            .ok_or(IntentRejection::NoDragInProgress)?;
        signals.push(RoundSignal::ReorderCancelled {
            player: session.player,
            order: session.original,
        });
        Ok(())
    }

    fn enter(&mut self, phase: Phase, signals: &mut Vec<RoundSignal>) {
        debug!(round_id = self.round_id, from = ?self.state.phase, to = ?phase, "phase change");
        self.state.phase = phase;
        if !phase.dragging_enabled() {
            self.state.drag = None;
        }
        signals.push(RoundSignal::PhaseChanged { phase });
        signals.push(RoundSignal::AffordancesChanged {
            dragging: phase.dragging_enabled(),
            sort: phase.sort_enabled(),
        });
    }

    fn set_declare_enabled(&mut self, enabled: bool, signals: &mut Vec<RoundSignal>) {
        if self.state.declare_enabled != enabled {
            self.state.declare_enabled = enabled;
            signals.push(RoundSignal::DeclareEnabled { enabled });
        }
    }

    /// Рука для проверки: отсортирована по рангу, чтобы вход перебора
    /// не зависел от порядка отображения.
    fn canonical_hand(&self, player: PlayerIndex) -> Vec<Card> {
        let order = sort_hand(&self.deck, self.hand(player), SortMode::Rank);
        self.deck.lookup(&order)
    }
}
