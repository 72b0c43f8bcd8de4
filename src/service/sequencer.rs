//! 發牌排程
//!
//! 一次 deal() 拆成一連串帶延遲的步驟（抽牌、翻牌、結算）。每個步驟標記
//! 所屬的 generation；`GameState` 在 deal()/reset() 時遞增 generation，
//! 舊排程觸發時即被丟棄。
//!
//! `TimerQueue` 使用虛擬時鐘，不依賴實際時間：測試與模擬直接推進時鐘，
//! `Table` 則以 tokio 計時器對齊真實時間。

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::game::Player;

use super::state::GameState;

/// 發牌步驟
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// 抽一張牌給 `seat` 的第 `slot` 張
    Draw { seat: Player, slot: usize },
    /// 翻開 `seat` 的第 `slot` 張
    Reveal { seat: Player, slot: usize },
    /// 雙方各三張後結算
    Evaluate,
}

/// 屬於某次發牌的步驟
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub generation: u64,
    pub step: Step,
}

/// 相對延遲後觸發的步驟
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub timer: Timer,
}

impl Scheduled {
    pub fn new(delay: Duration, generation: u64, step: Step) -> Self {
        Self {
            delay,
            timer: Timer { generation, step },
        }
    }
}

#[derive(Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    timer: Timer,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // 同一時間依排入順序
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// 虛擬時鐘計時佇列
#[derive(Debug, Default)]
pub struct TimerQueue {
    clock: Duration,
    seq: u64,
    heap: BinaryHeap<Reverse<Entry>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目前虛擬時間
    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// 最早到期時間
    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// 時鐘對齊到 `now`，不觸發任何步驟；已到期的留待下次 `tick`
    pub fn sync(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
    }

    /// 以目前時間為基準排入
    pub fn schedule(&mut self, scheduled: Scheduled) {
        self.push_at(self.clock + scheduled.delay, scheduled.timer);
    }

    fn push_at(&mut self, due: Duration, timer: Timer) {
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            due,
            seq: self.seq,
            timer,
        }));
    }

    fn pop_due(&mut self) -> Option<(Duration, Timer)> {
        match self.heap.peek() {
            Some(Reverse(entry)) if entry.due <= self.clock => {}
            _ => return None,
        }
        self.heap.pop().map(|Reverse(entry)| (entry.due, entry.timer))
    }

    /// 時鐘前進到 `now`，依序觸發所有到期步驟，回傳觸發數
    ///
    /// 後續步驟以觸發步驟的到期時間為基準排入，節奏不受喚醒延遲影響。
    pub fn tick(&mut self, now: Duration, state: &mut GameState) -> usize {
        self.sync(now);
        let mut fired = 0;
        while let Some((due, timer)) = self.pop_due() {
            for next in state.fire(timer) {
                self.push_at(due + next.delay, next.timer);
            }
            fired += 1;
        }
        fired
    }

    /// 時鐘前進 `elapsed`
    pub fn advance(&mut self, elapsed: Duration, state: &mut GameState) -> usize {
        let now = self.clock + elapsed;
        self.tick(now, state)
    }

    /// 觸發所有排程直到佇列清空
    pub fn run_until_idle(&mut self, state: &mut GameState) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            fired += self.tick(due, state);
        }
        fired
    }

    /// 清空排程（時鐘不倒退）
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
