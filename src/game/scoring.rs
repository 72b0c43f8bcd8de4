//! 勝負判定
//!
//! 依序套用：
//! 1. 只有一方有對子 -> 對子勝 (`pair`)
//! 2. 雙方有對子且大小不同 -> 大者勝 (`pair-high`)
//! 3. 對子相同 -> 比第三張 (`third-card`)
//! 4. 雙方皆無對子 -> 逐張比較 (`card-1` / `card-2` / `card-3`)
//!
//! 純函數，無狀態、無 I/O。

use std::cmp::Ordering;

use super::cards::{Card, Rank};
use super::constants::RANK_COUNT;
use super::hand_types::{Outcome, Player, Reason};

/// 依發牌順序掃描，回傳第一個出現第二次的點數
///
/// 三條也在第二張出現時回報，不另外處理。
pub fn pair_rank(hand: &[Card]) -> Option<Rank> {
    let mut counts = [0u8; RANK_COUNT];
    for card in hand {
        let count = &mut counts[(card.value() - 1) as usize];
        *count += 1;
        if *count == 2 {
            return Some(card.rank);
        }
    }
    None
}

/// 對子的比較值
pub fn pair_value(hand: &[Card]) -> Option<u8> {
    pair_rank(hand).map(|rank| rank.value())
}

/// 第三張（非對子點數的那張）的比較值；三條時不存在
pub fn kicker_value(hand: &[Card], pair: Rank) -> Option<u8> {
    hand.iter()
        .find(|card| card.rank != pair)
        .map(|card| card.value())
}

/// 比較兩手牌
pub fn evaluate(hand1: &[Card], hand2: &[Card]) -> Outcome {
    match (pair_rank(hand1), pair_rank(hand2)) {
        (Some(_), None) => Outcome::win(Player::One, Reason::Pair),
        (None, Some(_)) => Outcome::win(Player::Two, Reason::Pair),
        (Some(pair1), Some(pair2)) => decide(pair1.value(), pair2.value(), Reason::PairHigh)
            .or_else(|| {
                // 缺少的第三張視為最小
                decide(
                    kicker_value(hand1, pair1),
                    kicker_value(hand2, pair2),
                    Reason::ThirdCard,
                )
            })
            .unwrap_or_else(Outcome::tie),
        (None, None) => compare_positions(hand1, hand2),
    }
}

/// 逐張比較，第一個不同的位置決勝
fn compare_positions(hand1: &[Card], hand2: &[Card]) -> Outcome {
    Reason::POSITIONAL
        .iter()
        .enumerate()
        .find_map(|(i, &reason)| {
            decide(
                hand1.get(i).map(Card::value),
                hand2.get(i).map(Card::value),
                reason,
            )
        })
        .unwrap_or_else(Outcome::tie)
}

fn decide<T: Ord>(left: T, right: T, reason: Reason) -> Option<Outcome> {
    match left.cmp(&right) {
        Ordering::Greater => Some(Outcome::win(Player::One, reason)),
        Ordering::Less => Some(Outcome::win(Player::Two, reason)),
        Ordering::Equal => None,
    }
}

// ============================================================================
// 單元測試
// ============================================================================
