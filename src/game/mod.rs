//! 遊戲核心模組
//!
//! 包含三張牌比大小的核心定義：
//! - `constants`: 遊戲常量
//! - `cards`: 花色、點數、卡牌
//! - `deck`: 建牌、洗牌、抽牌
//! - `hand_types`: 玩家與結果定義
//! - `scoring`: 勝負判定
//! - `stage`: 發牌階段
//! - `assets`: 卡牌圖片名稱（供顯示層使用）

pub mod assets;
pub mod cards;
pub mod constants;
pub mod deck;
pub mod hand_types;
pub mod scoring;
pub mod stage;

pub use constants::*;
pub use cards::{card_index, Card, Rank, Suit};
pub use deck::{draw, fresh_deck, shuffle, standard_deck, Draw};
pub use hand_types::{Outcome, Player, Reason, ResultKind};
pub use scoring::{evaluate, kicker_value, pair_rank, pair_value};
pub use stage::Stage;
