//! 遊戲常量定義

use std::time::Duration;

// ============================================================================
// 遊戲規則常量
// ============================================================================

pub const DECK_SIZE: usize = 52;         // 標準牌組張數
pub const SUIT_COUNT: usize = 4;         // 花色數
pub const RANK_COUNT: usize = 13;        // 點數數
pub const HAND_SIZE: usize = 3;          // 每位玩家手牌數
pub const PLAYER_COUNT: usize = 2;       // 玩家數
pub const MIN_DECK_FOR_DEAL: usize = HAND_SIZE * PLAYER_COUNT;  // 不足則重洗

// ============================================================================
// 發牌節奏常量（UX 參數，非正確性契約）
// ============================================================================

pub const DRAW_INTERVAL_MS: u64 = 800;   // 兩次抽牌間隔
pub const REVEAL_DELAY_MS: u64 = 400;    // 抽牌到翻牌
pub const SETTLE_DELAY_MS: u64 = 1000;   // 最後一張牌到結算

pub const DRAW_INTERVAL: Duration = Duration::from_millis(DRAW_INTERVAL_MS);
pub const REVEAL_DELAY: Duration = Duration::from_millis(REVEAL_DELAY_MS);
pub const SETTLE_DELAY: Duration = Duration::from_millis(SETTLE_DELAY_MS);

// ============================================================================
// 服務層常量
// ============================================================================

pub const EVENT_CHANNEL_CAPACITY: usize = 64;  // 事件廣播緩衝
pub const BACK_IMAGE: &str = "back.png";       // 牌背圖片
