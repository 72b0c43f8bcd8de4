//! 發牌階段

use serde::Serialize;

use super::hand_types::Player;

/// 發牌狀態機：Idle -> DealingFirst -> DealingSecond -> Evaluating -> Idle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    DealingFirst,
    DealingSecond,
    Evaluating,
}

impl Stage {
    /// 發牌中（含結算等待）
    pub fn is_dealing(&self) -> bool {
        *self != Stage::Idle
    }

    /// 正在發牌給哪位玩家
    pub fn dealing_to(&self) -> Option<Player> {
        match self {
            Stage::DealingFirst => Some(Player::One),
            Stage::DealingSecond => Some(Player::Two),
            Stage::Idle | Stage::Evaluating => None,
        }
    }

    /// 某位玩家發完後的下一階段
    pub fn after_hand(player: Player) -> Stage {
        match player {
            Player::One => Stage::DealingSecond,
            Player::Two => Stage::Evaluating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_flags() {
        assert!(!Stage::Idle.is_dealing());
        assert!(Stage::DealingFirst.is_dealing());
        assert!(Stage::Evaluating.is_dealing());
        assert_eq!(Stage::default(), Stage::Idle);
    }

    #[test]
    fn test_stage_transitions() {
        assert_eq!(Stage::DealingFirst.dealing_to(), Some(Player::One));
        assert_eq!(Stage::DealingSecond.dealing_to(), Some(Player::Two));
        assert_eq!(Stage::Evaluating.dealing_to(), None);
        assert_eq!(Stage::after_hand(Player::One), Stage::DealingSecond);
        assert_eq!(Stage::after_hand(Player::Two), Stage::Evaluating);
    }
}
