//! 對局結果定義

use std::fmt;

use serde::{Serialize, Serializer};

/// 玩家座位
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// 1 或 2
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn other(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl Serialize for Player {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// 勝負判定依據
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reason {
    Pair,      // 只有一方有對子
    PairHigh,  // 雙方有對子，對子大者勝
    ThirdCard, // 對子相同，比第三張
    CardOne,   // 無對子，第 1 張決勝
    CardTwo,   // 無對子，第 2 張決勝
    CardThree, // 無對子，第 3 張決勝
    Tie,
}

impl Reason {
    /// 逐張比較時各位置對應的判定依據
    pub const POSITIONAL: [Reason; 3] = [Reason::CardOne, Reason::CardTwo, Reason::CardThree];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Pair => "pair",
            Reason::PairHigh => "pair-high",
            Reason::ThirdCard => "third-card",
            Reason::CardOne => "card-1",
            Reason::CardTwo => "card-2",
            Reason::CardThree => "card-3",
            Reason::Tie => "tie",
        }
    }

    /// 橫幅顯示用的勝負類別；平手沒有類別
    pub fn kind(&self) -> Option<ResultKind> {
        match self {
            Reason::Pair | Reason::PairHigh => Some(ResultKind::Pair),
            Reason::ThirdCard => Some(ResultKind::ThirdCard),
            Reason::CardOne | Reason::CardTwo | Reason::CardThree => Some(ResultKind::Cards),
            Reason::Tie => None,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 勝負類別
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Pair,
    ThirdCard,
    Cards,
}

/// 一局的結果；`winner` 為 None 時 `reason` 必為 Tie
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub winner: Option<Player>,
    pub reason: Reason,
}

impl Outcome {
    pub fn win(winner: Player, reason: Reason) -> Self {
        debug_assert!(reason != Reason::Tie);
        Self {
            winner: Some(winner),
            reason,
        }
    }

    pub fn tie() -> Self {
        Self {
            winner: None,
            reason: Reason::Tie,
        }
    }

    /// 交換座位後的同一結果
    pub fn swapped(&self) -> Self {
        Self {
            winner: self.winner.map(|p| p.other()),
            reason: self.reason,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(player) => write!(f, "{} wins! ({})", player, self.reason),
            None => f.write_str("Tie!"),
        }
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(Reason::Pair.as_str(), "pair");
        assert_eq!(Reason::PairHigh.as_str(), "pair-high");
        assert_eq!(Reason::ThirdCard.as_str(), "third-card");
        assert_eq!(Reason::POSITIONAL.map(|r| r.as_str()), ["card-1", "card-2", "card-3"]);
        assert_eq!(Reason::Tie.to_string(), "tie");
    }

    #[test]
    fn test_reason_kind() {
        assert_eq!(Reason::PairHigh.kind(), Some(ResultKind::Pair));
        assert_eq!(Reason::ThirdCard.kind(), Some(ResultKind::ThirdCard));
        assert_eq!(Reason::CardTwo.kind(), Some(ResultKind::Cards));
        assert_eq!(Reason::Tie.kind(), None);
    }

    #[test]
    fn test_outcome_swapped() {
        let outcome = Outcome::win(Player::One, Reason::CardOne);
        assert_eq!(outcome.swapped(), Outcome::win(Player::Two, Reason::CardOne));
        assert_eq!(Outcome::tie().swapped(), Outcome::tie());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::win(Player::Two, Reason::ThirdCard)).unwrap();
        assert_eq!(json, serde_json::json!({ "winner": 2, "reason": "third-card" }));

        let json = serde_json::to_value(Outcome::tie()).unwrap();
        assert_eq!(json, serde_json::json!({ "winner": null, "reason": "tie" }));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            Outcome::win(Player::One, Reason::Pair).to_string(),
            "Player 1 wins! (pair)"
        );
        assert_eq!(Outcome::tie().to_string(), "Tie!");
    }
}
