//! 服務層模組
//!
//! 提供遊戲狀態管理、計時發牌排程、快照構建、按鈕狀態與批次模擬功能

pub mod controls;
pub mod sequencer;
pub mod simulation;
pub mod snapshot;
pub mod state;
pub mod table;
pub mod timing;

pub use controls::{controls_from_state, Controls};
pub use sequencer::{Scheduled, Step, Timer, TimerQueue};
pub use simulation::{simulate, SimulationReport};
pub use snapshot::{snapshot_from_state, GameEvent, Snapshot};
pub use state::{DealError, GameState};
pub use table::Table;
pub use timing::{DealTiming, TimingError};
