//! 三張牌比大小引擎
//!
//! - `game`: 卡牌、牌組與勝負判定（純函式，無狀態）
//! - `service`: 遊戲狀態、計時發牌流程、牌桌與批次模擬

pub mod game;
pub mod service;
