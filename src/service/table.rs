//! 牌桌：對顯示層公開的非同步介面
//!
//! `Table` 持有 `GameState` 與 `TimerQueue`，背景驅動任務以 tokio 計時器
//! 在到期時觸發發牌步驟。顯示層呼叫 `deal()` / `reset()`，並透過
//! `subscribe()`（快照）或 `events()`（事件串流）得知變化。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use crate::game::EVENT_CHANNEL_CAPACITY;

use super::sequencer::TimerQueue;
use super::snapshot::{snapshot_from_state, GameEvent, Snapshot};
use super::state::{DealError, GameState};

struct Core {
    state: GameState,
    timers: TimerQueue,
}

struct Shared {
    core: Mutex<Core>,
    origin: Instant,
    wake: Notify,
    closed: AtomicBool,
    events: broadcast::Sender<GameEvent>,
    snapshots: watch::Sender<Snapshot>,
}

/// 牌桌句柄（可複製，共享同一場遊戲）
#[derive(Clone)]
pub struct Table {
    shared: Arc<Shared>,
}

impl Table {
    pub fn new(state: GameState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (snapshots, _) = watch::channel(snapshot_from_state(&state));

        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    state,
                    timers: TimerQueue::new(),
                }),
                origin: Instant::now(),
                wake: Notify::new(),
                closed: AtomicBool::new(false),
                events,
                snapshots,
            }),
        }
    }

    /// 建立牌桌並啟動計時驅動任務
    pub fn spawn(state: GameState) -> (Self, JoinHandle<()>) {
        let table = Self::new(state);
        let driver = tokio::spawn(table.clone().run());
        (table, driver)
    }

    /// 開始一局；發牌中呼叫則忽略
    pub fn deal(&self) {
        if let Err(err) = self.try_deal() {
            debug!(%err, "deal ignored");
        }
    }

    /// 開始一局；發牌中回傳 `DealError::AlreadyDealing`
    pub fn try_deal(&self) -> Result<(), DealError> {
        let now = self.shared.origin.elapsed();
        self.with_core(|core| {
            core.timers.sync(now);
            let first = core.state.try_deal()?;
            core.timers.schedule(first);
            Ok(())
        })?;
        self.shared.wake.notify_one();
        Ok(())
    }

    /// 同步重置；進行中的發牌步驟之後觸發時會被丟棄
    pub fn reset(&self) {
        self.with_core(|core| core.state.reset());
    }

    /// 目前快照
    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// 快照變化通知
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.snapshots.subscribe()
    }

    /// 事件串流（只收到訂閱之後的事件）
    pub fn events(&self) -> BroadcastStream<GameEvent> {
        BroadcastStream::new(self.shared.events.subscribe())
    }

    /// 停止驅動任務；尚未觸發的步驟不再執行
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
        self.shared.wake.notify_one();
    }

    fn lock(&self) -> MutexGuard<'_, Core> {
        self.shared
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// 在鎖內修改狀態，並依序發布產生的事件與新快照
    fn with_core<T>(&self, f: impl FnOnce(&mut Core) -> T) -> T {
        let mut core = self.lock();
        let out = f(&mut *core);

        let events = core.state.drain_events();
        if !events.is_empty() {
            for event in events {
                // 沒有訂閱者時發送失敗，可忽略
                let _ = self.shared.events.send(event);
            }
            self.shared
                .snapshots
                .send_replace(snapshot_from_state(&core.state));
        }
        out
    }

    fn tick(&self) {
        let now = self.shared.origin.elapsed();
        let fired = self.with_core(|core| core.timers.tick(now, &mut core.state));
        debug!(fired, "timers fired");
    }

    async fn run(self) {
        while !self.shared.closed.load(Ordering::Acquire) {
            let next = self.lock().timers.next_due();
            match next {
                Some(due) => {
                    tokio::select! {
                        _ = time::sleep_until(self.shared.origin + due) => self.tick(),
                        _ = self.shared.wake.notified() => {}
                    }
                }
                None => self.shared.wake.notified().await,
            }
        }
        debug!("table driver stopped");
    }
}
