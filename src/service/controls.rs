//! 顯示層按鈕狀態
//!
//! 發牌期間兩個按鈕都停用。`reset()` 本身隨時可呼叫，這裡只反映介面狀態。

use serde::Serialize;

use super::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_deal: bool,
    pub can_reset: bool,
}

/// 從遊戲狀態構建按鈕狀態
pub fn controls_from_state(state: &GameState) -> Controls {
    let idle = !state.is_dealing();
    Controls {
        can_deal: idle,
        can_reset: idle,
    }
}
