//! 對外狀態快照與事件
//!
//! 顯示層只讀取這裡的結構，自行決定如何呈現（圖片、文字、JSON）。

use serde::Serialize;

use super::controls::{controls_from_state, Controls};
use super::state::GameState;
use crate::game::{Card, Outcome, Player, Stage};

/// 某一時刻的完整可見狀態
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub hand1: Vec<Card>,
    pub hand2: Vec<Card>,
    pub score1: u32,
    pub score2: u32,
    pub is_dealing: bool,
    pub stage: Stage,
    pub last_result: Option<Outcome>,
    pub deck_remaining: usize,
    pub deals_completed: u64,
    pub controls: Controls,
}

/// 狀態變化事件
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Reset,
    Reshuffled {
        remaining: usize,
    },
    DealStarted {
        generation: u64,
    },
    CardDealt {
        seat: Player,
        slot: usize,
        card: Card,
    },
    CardRevealed {
        seat: Player,
        slot: usize,
        card: Card,
    },
    Resolved {
        outcome: Outcome,
        score1: u32,
        score2: u32,
    },
}

/// 從遊戲狀態構建快照
pub fn snapshot_from_state(state: &GameState) -> Snapshot {
    Snapshot {
        hand1: state.hand1().to_vec(),
        hand2: state.hand2().to_vec(),
        score1: state.score1(),
        score2: state.score2(),
        is_dealing: state.is_dealing(),
        stage: state.stage(),
        last_result: state.last_result(),
        deck_remaining: state.deck_remaining(),
        deals_completed: state.deals_completed(),
        controls: controls_from_state(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Rank, Reason, Suit};

    #[test]
    fn test_snapshot_of_fresh_state() {
        let snapshot = snapshot_from_state(&GameState::new(2));
        assert!(snapshot.hand1.is_empty());
        assert!(snapshot.hand2.is_empty());
        assert_eq!((snapshot.score1, snapshot.score2), (0, 0));
        assert!(!snapshot.is_dealing);
        assert_eq!(snapshot.stage, Stage::Idle);
        assert_eq!(snapshot.last_result, None);
        assert_eq!(snapshot.deck_remaining, 52);
        assert!(snapshot.controls.can_deal);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(snapshot_from_state(&GameState::new(2))).unwrap();
        assert_eq!(json["is_dealing"], false);
        assert_eq!(json["stage"], "idle");
        assert!(json["last_result"].is_null());
        assert_eq!(json["hand1"], serde_json::json!([]));
        assert_eq!(json["controls"]["can_reset"], true);
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::CardDealt {
            seat: Player::Two,
            slot: 1,
            card: Card::new(Suit::Hearts, Rank::Ace),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({
                "event": "card_dealt",
                "seat": 2,
                "slot": 1,
                "card": { "suit": "hearts", "rank": "A", "value": 13, "revealed": false }
            })
        );

        let resolved = GameEvent::Resolved {
            outcome: Outcome::win(Player::One, Reason::CardOne),
            score1: 3,
            score2: 1,
        };
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["event"], "resolved");
        assert_eq!(json["outcome"]["reason"], "card-1");

        assert_eq!(
            serde_json::to_value(&GameEvent::Reset).unwrap(),
            serde_json::json!({ "event": "reset" })
        );
    }
}
