//! 發牌節奏設定

use std::time::Duration;

use thiserror::Error;

use crate::game::{DRAW_INTERVAL, HAND_SIZE, PLAYER_COUNT, REVEAL_DELAY, SETTLE_DELAY};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingError {
    #[error("{field} must be a positive delay")]
    NonPositive { field: &'static str },
}

/// 三個延遲都必須大於零；實際數值只影響觀感
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DealTiming {
    /// 兩次抽牌之間
    pub draw_interval: Duration,
    /// 抽牌到翻牌
    pub reveal_delay: Duration,
    /// 最後一張牌到結算
    pub settle_delay: Duration,
}

impl Default for DealTiming {
    fn default() -> Self {
        Self {
            draw_interval: DRAW_INTERVAL,
            reveal_delay: REVEAL_DELAY,
            settle_delay: SETTLE_DELAY,
        }
    }
}

impl DealTiming {
    pub fn from_millis(draw_ms: u64, reveal_ms: u64, settle_ms: u64) -> Result<Self, TimingError> {
        for (field, value) in [
            ("draw_interval", draw_ms),
            ("reveal_delay", reveal_ms),
            ("settle_delay", settle_ms),
        ] {
            if value == 0 {
                return Err(TimingError::NonPositive { field });
            }
        }
        Ok(Self {
            draw_interval: Duration::from_millis(draw_ms),
            reveal_delay: Duration::from_millis(reveal_ms),
            settle_delay: Duration::from_millis(settle_ms),
        })
    }

    /// 一局從 deal() 到結算的總時長
    pub fn deal_duration(&self) -> Duration {
        self.draw_interval * (HAND_SIZE * PLAYER_COUNT) as u32 + self.settle_delay
    }
}
