//! 卡牌圖片名稱
//!
//! 圖片檔名為 `{rank}_of_{suit}.png`，未翻開的牌一律使用牌背。

use super::cards::{Card, Rank, Suit};
use super::constants::BACK_IMAGE;

impl Rank {
    pub fn asset_name(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }
}

impl Suit {
    pub fn asset_name(&self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }
}

/// 牌面圖片（不論是否翻開）
pub fn face_image(card: &Card) -> String {
    format!("{}_of_{}.png", card.rank.asset_name(), card.suit.asset_name())
}

/// 目前應顯示的圖片
pub fn image_name(card: &Card) -> String {
    if card.revealed {
        face_image(card)
    } else {
        BACK_IMAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::deck::standard_deck;
    use std::collections::HashSet;

    #[test]
    fn test_face_images() {
        let ace = Card::new(Suit::Spades, Rank::Ace).face_up();
        assert_eq!(image_name(&ace), "ace_of_spades.png");

        let ten = Card::new(Suit::Diamonds, Rank::Ten).face_up();
        assert_eq!(image_name(&ten), "10_of_diamonds.png");
    }

    #[test]
    fn test_unrevealed_uses_back() {
        let card = Card::new(Suit::Hearts, Rank::Jack);
        assert_eq!(image_name(&card), BACK_IMAGE);
        assert_eq!(face_image(&card), "jack_of_hearts.png");
    }

    #[test]
    fn test_every_card_has_distinct_image() {
        let names: HashSet<String> = standard_deck().iter().map(face_image).collect();
        assert_eq!(names.len(), 52);
    }
}
