//! 遊戲狀態管理
//!
//! `GameState` 是唯一的可變狀態：牌組、雙方手牌、分數、發牌階段與上局結果。
//! 只有 `try_deal()`、`fire()`、`reset()` 會修改它。

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::game::{
    draw, evaluate, fresh_deck, Card, Draw, Outcome, Player, Stage, HAND_SIZE, MIN_DECK_FOR_DEAL,
};

use super::sequencer::{Scheduled, Step, Timer};
use super::snapshot::GameEvent;
use super::timing::DealTiming;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("a deal is already in progress (generation {generation})")]
    AlreadyDealing { generation: u64 },
}

/// 遊戲狀態
#[derive(Debug)]
pub struct GameState {
    rng: StdRng,

    // 牌組與手牌
    deck: Vec<Card>,
    hand1: Vec<Card>,
    hand2: Vec<Card>,

    // 分數（reset 前跨局累計）
    score1: u32,
    score2: u32,

    // 發牌進度
    stage: Stage,
    generation: u64,
    last_result: Option<Outcome>,
    timing: DealTiming,

    // 統計
    deals_completed: u64,

    // 尚未發布的事件
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_timing(seed, DealTiming::default())
    }

    pub fn with_timing(seed: u64, timing: DealTiming) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = fresh_deck(&mut rng);

        Self {
            rng,
            deck,
            hand1: Vec::new(),
            hand2: Vec::new(),
            score1: 0,
            score2: 0,
            stage: Stage::Idle,
            generation: 0,
            last_result: None,
            timing,
            deals_completed: 0,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // 讀取
    // ========================================================================

    pub fn hand(&self, seat: Player) -> &[Card] {
        match seat {
            Player::One => &self.hand1,
            Player::Two => &self.hand2,
        }
    }

    pub fn hand1(&self) -> &[Card] {
        &self.hand1
    }

    pub fn hand2(&self) -> &[Card] {
        &self.hand2
    }

    pub fn score(&self, seat: Player) -> u32 {
        match seat {
            Player::One => self.score1,
            Player::Two => self.score2,
        }
    }

    pub fn score1(&self) -> u32 {
        self.score1
    }

    pub fn score2(&self) -> u32 {
        self.score2
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_dealing(&self) -> bool {
        self.stage.is_dealing()
    }

    pub fn last_result(&self) -> Option<Outcome> {
        self.last_result
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn deals_completed(&self) -> u64 {
        self.deals_completed
    }

    pub fn timing(&self) -> DealTiming {
        self.timing
    }

    /// 取出尚未發布的事件
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // 操作
    // ========================================================================

    /// 開始一局，回傳第一個排程步驟
    ///
    /// 牌組不足兩手時先換成新洗好的完整牌組，之後才抽牌。
    pub fn try_deal(&mut self) -> Result<Scheduled, DealError> {
        if self.stage.is_dealing() {
            return Err(DealError::AlreadyDealing {
                generation: self.generation,
            });
        }

        if self.deck.len() < MIN_DECK_FOR_DEAL {
            let left = self.deck.len();
            self.deck = fresh_deck(&mut self.rng);
            info!(left = left, "deck low, reshuffled a full deck");
            self.events.push(GameEvent::Reshuffled {
                remaining: self.deck.len(),
            });
        }

        self.hand1.clear();
        self.hand2.clear();
        self.last_result = None;
        self.stage = Stage::DealingFirst;
        self.generation += 1;

        debug!(generation = self.generation, deck = self.deck.len(), "deal started");
        self.events.push(GameEvent::DealStarted {
            generation: self.generation,
        });

        Ok(Scheduled::new(
            self.timing.draw_interval,
            self.generation,
            Step::Draw {
                seat: Player::One,
                slot: 0,
            },
        ))
    }

    /// 執行一個到期步驟，回傳後續步驟；舊 generation 的步驟直接丟棄
    pub fn fire(&mut self, timer: Timer) -> Vec<Scheduled> {
        if timer.generation != self.generation {
            debug!(
                stale = timer.generation,
                current = self.generation,
                step = ?timer.step,
                "dropping stale deal step"
            );
            return Vec::new();
        }

        match timer.step {
            Step::Draw { seat, slot } => self.draw_card(seat, slot),
            Step::Reveal { seat, slot } => {
                self.reveal_card(seat, slot);
                Vec::new()
            }
            Step::Evaluate => {
                self.resolve();
                Vec::new()
            }
        }
    }

    /// 重置為新的一場：新牌組、清空手牌與分數
    ///
    /// 進行中的發牌步驟因 generation 改變而失效。
    pub fn reset(&mut self) {
        self.deck = fresh_deck(&mut self.rng);
        self.hand1.clear();
        self.hand2.clear();
        self.score1 = 0;
        self.score2 = 0;
        self.stage = Stage::Idle;
        self.last_result = None;
        self.generation += 1;

        info!(generation = self.generation, "session reset");
        self.events.push(GameEvent::Reset);
    }

    // ========================================================================
    // 發牌步驟
    // ========================================================================

    fn hand_mut(&mut self, seat: Player) -> &mut Vec<Card> {
        match seat {
            Player::One => &mut self.hand1,
            Player::Two => &mut self.hand2,
        }
    }

    fn draw_card(&mut self, seat: Player, slot: usize) -> Vec<Scheduled> {
        let Draw { drawn, remaining } = draw(&self.deck, 1);
        let Some(card) = drawn.into_iter().next() else {
            error!(%seat, slot, "deck exhausted mid-deal, aborting deal");
            self.stage = Stage::Idle;
            return Vec::new();
        };
        self.deck = remaining;

        let card = Card {
            revealed: false,
            ..card
        };
        self.hand_mut(seat).push(card);
        debug!(%seat, slot, %card, "card dealt");
        self.events.push(GameEvent::CardDealt { seat, slot, card });

        let generation = self.generation;
        let mut next = vec![Scheduled::new(
            self.timing.reveal_delay,
            generation,
            Step::Reveal { seat, slot },
        )];

        if slot + 1 < HAND_SIZE {
            next.push(Scheduled::new(
                self.timing.draw_interval,
                generation,
                Step::Draw {
                    seat,
                    slot: slot + 1,
                },
            ));
        } else {
            self.stage = Stage::after_hand(seat);
            match seat {
                Player::One => next.push(Scheduled::new(
                    self.timing.draw_interval,
                    generation,
                    Step::Draw {
                        seat: Player::Two,
                        slot: 0,
                    },
                )),
                Player::Two => next.push(Scheduled::new(
                    self.timing.settle_delay,
                    generation,
                    Step::Evaluate,
                )),
            }
        }

        next
    }

    fn reveal_card(&mut self, seat: Player, slot: usize) {
        let Some(card) = self.hand_mut(seat).get_mut(slot) else {
            return;
        };
        card.revealed = true;
        let card = *card;
        debug!(%seat, slot, %card, "card revealed");
        self.events.push(GameEvent::CardRevealed { seat, slot, card });
    }

    fn resolve(&mut self) {
        debug_assert_eq!(self.hand1.len(), HAND_SIZE);
        debug_assert_eq!(self.hand2.len(), HAND_SIZE);

        let outcome = evaluate(&self.hand1, &self.hand2);
        match outcome.winner {
            Some(Player::One) => self.score1 += 1,
            Some(Player::Two) => self.score2 += 1,
            None => {}
        }
        self.last_result = Some(outcome);
        self.stage = Stage::Idle;
        self.deals_completed += 1;

        info!(
            generation = self.generation,
            reason = %outcome.reason,
            winner = ?outcome.winner.map(|p| p.number()),
            score1 = self.score1,
            score2 = self.score2,
            "deal resolved"
        );
        self.events.push(GameEvent::Resolved {
            outcome,
            score1: self.score1,
            score2: self.score2,
        });
    }

    #[cfg(test)]
    pub(crate) fn set_deck(&mut self, deck: Vec<Card>) {
        self.deck = deck;
    }
}

// ============================================================================
// 單元測試
// ============================================================================
