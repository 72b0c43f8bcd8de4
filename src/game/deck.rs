//! 牌組：建牌、洗牌、抽牌
//!
//! 三個函數都不修改輸入，回傳新的序列。

use rand::Rng;

use super::cards::{Card, Rank, Suit};
use super::constants::DECK_SIZE;

/// 抽牌結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draw {
    pub drawn: Vec<Card>,
    pub remaining: Vec<Card>,
}

/// 創建標準 52 張牌組（依花色、再依點數由小到大，全部面朝下）
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Fisher–Yates 洗牌，回傳新序列
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// 新洗好的完整牌組
pub fn fresh_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    shuffle(&standard_deck(), rng)
}

/// 從牌頂抽 `n` 張；不足時抽出全部
pub fn draw(deck: &[Card], n: usize) -> Draw {
    let split = n.min(deck.len());
    let (drawn, remaining) = deck.split_at(split);
    Draw {
        drawn: drawn.to_vec(),
        remaining: remaining.to_vec(),
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::card_index;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn sorted_indices(cards: &[Card]) -> Vec<usize> {
        let mut indices: Vec<usize> = cards.iter().map(|c| card_index(*c)).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn test_standard_deck_is_complete() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: HashSet<(Suit, Rank)> = deck.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| !c.revealed));
    }

    #[test]
    fn test_standard_deck_order() {
        let deck = standard_deck();
        assert_eq!(deck[0], Card::new(Suit::Spades, Rank::Two));
        assert_eq!(deck[12], Card::new(Suit::Spades, Rank::Ace));
        assert_eq!(deck[13], Card::new(Suit::Hearts, Rank::Two));
        assert_eq!(deck[51], Card::new(Suit::Clubs, Rank::Ace));
        assert_eq!(deck, standard_deck());
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let deck = standard_deck();
        let mut rng = StdRng::seed_from_u64(11);
        let shuffled = shuffle(&deck, &mut rng);

        assert_eq!(deck, standard_deck());
        assert_eq!(shuffled.len(), deck.len());
        assert_eq!(sorted_indices(&shuffled), sorted_indices(&deck));
    }

    #[test]
    fn test_shuffle_reorders() {
        let deck = standard_deck();
        let mut rng = StdRng::seed_from_u64(5);
        let reordered = (0..20)
            .filter(|_| shuffle(&deck, &mut rng) != deck)
            .count();
        assert_eq!(reordered, 20);
    }

    #[test]
    fn test_shuffle_small_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle(&[], &mut rng).is_empty());

        let one = [Card::new(Suit::Hearts, Rank::Five)];
        assert_eq!(shuffle(&one, &mut rng), one.to_vec());
    }

    #[test]
    fn test_draw_more_than_available() {
        let deck = standard_deck();
        let Draw { drawn, remaining } = draw(&deck[..4], 6);
        assert_eq!(drawn.len(), 4);
        assert!(remaining.is_empty());
    }

    proptest! {
        #[test]
        fn prop_shuffle_preserves_multiset(seed in any::<u64>()) {
            let deck = standard_deck();
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = shuffle(&deck, &mut rng);
            prop_assert_eq!(sorted_indices(&shuffled), sorted_indices(&deck));
        }

        #[test]
        fn prop_draw_splits_prefix(seed in any::<u64>(), n in 0usize..=60) {
            let mut rng = StdRng::seed_from_u64(seed);
            let deck = fresh_deck(&mut rng);
            let Draw { drawn, remaining } = draw(&deck, n);

            prop_assert_eq!(drawn.len() + remaining.len(), deck.len());
            prop_assert_eq!(&drawn[..], &deck[..n.min(deck.len())]);
            prop_assert_eq!(&remaining[..], &deck[drawn.len()..]);
        }
    }
}
