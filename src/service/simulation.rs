//! 無介面批次模擬
//!
//! 每個批次是一場獨立的 `GameState`，以虛擬時鐘跑完整個發牌流程，
//! 批次之間以 rayon 平行執行，結果彙總到共享計數表。

use std::collections::BTreeMap;

use dashmap::DashMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::game::{Player, Reason};

use super::sequencer::TimerQueue;
use super::snapshot::GameEvent;
use super::state::GameState;

/// 模擬統計
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub rounds: u64,
    pub player1_wins: u64,
    pub player2_wins: u64,
    pub ties: u64,
    pub reshuffles: u64,
    pub by_reason: BTreeMap<&'static str, u64>,
}

impl SimulationReport {
    /// 玩家一勝率（不含平手）
    pub fn player1_share(&self) -> f64 {
        let decided = self.player1_wins + self.player2_wins;
        if decided == 0 {
            0.0
        } else {
            self.player1_wins as f64 / decided as f64
        }
    }
}

#[derive(Default)]
struct Tally {
    reasons: DashMap<Reason, u64>,
    winners: DashMap<Option<Player>, u64>,
    reshuffles: DashMap<u64, u64>,
}

/// 以 `batches` 場平行模擬共 `rounds` 局
///
/// 同一組參數結果固定（每批次種子為 `seed + 批次序號`）。
pub fn simulate(rounds: u64, batches: u64, seed: u64) -> SimulationReport {
    let batches = batches.clamp(1, rounds.max(1));
    let tally = Tally::default();

    (0..batches).into_par_iter().for_each(|batch| {
        let share = rounds / batches + u64::from(batch < rounds % batches);
        let mut state = GameState::new(seed.wrapping_add(batch));
        let mut timers = TimerQueue::new();
        let mut reshuffles = 0;

        for _ in 0..share {
            let Ok(first) = state.try_deal() else {
                break;
            };
            timers.schedule(first);
            timers.run_until_idle(&mut state);

            for event in state.drain_events() {
                if matches!(event, GameEvent::Reshuffled { .. }) {
                    reshuffles += 1;
                }
            }
            if let Some(outcome) = state.last_result() {
                *tally.reasons.entry(outcome.reason).or_insert(0) += 1;
                *tally.winners.entry(outcome.winner).or_insert(0) += 1;
            }
        }

        debug!(batch, share, score1 = state.score1(), score2 = state.score2(), "batch finished");
        tally.reshuffles.insert(batch, reshuffles);
    });

    let wins = |winner: Option<Player>| tally.winners.get(&winner).map_or(0, |count| *count);
    let by_reason = tally
        .reasons
        .iter()
        .map(|entry| (entry.key().as_str(), *entry.value()))
        .collect();

    SimulationReport {
        rounds,
        player1_wins: wins(Some(Player::One)),
        player2_wins: wins(Some(Player::Two)),
        ties: wins(None),
        reshuffles: tally.reshuffles.iter().map(|entry| *entry.value()).sum(),
        by_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_add_up() {
        let report = simulate(500, 4, 17);
        assert_eq!(report.rounds, 500);
        assert_eq!(report.player1_wins + report.player2_wins + report.ties, 500);
        assert_eq!(report.by_reason.values().sum::<u64>(), 500);
    }

    #[test]
    fn test_same_seed_same_report() {
        assert_eq!(simulate(300, 3, 5), simulate(300, 3, 5));
    }

    #[test]
    fn test_uneven_batches() {
        let report = simulate(10, 3, 1);
        assert_eq!(report.player1_wins + report.player2_wins + report.ties, 10);

        let report = simulate(2, 8, 1);
        assert_eq!(report.by_reason.values().sum::<u64>(), 2);
    }

    #[test]
    fn test_reshuffles_happen_on_long_runs() {
        // 每局用 6 張，52 張牌組第 9 局前必須重洗
        let report = simulate(9, 1, 3);
        assert_eq!(report.reshuffles, 1);
    }

    #[test]
    fn test_reasons_use_wire_names() {
        let report = simulate(2000, 4, 11);
        assert!(report.by_reason.contains_key("pair"));
        assert!(report.by_reason.contains_key("card-1"));
        assert!(report
            .by_reason
            .keys()
            .all(|k| ["pair", "pair-high", "third-card", "card-1", "card-2", "card-3", "tie"]
                .contains(k)));
    }

    #[test]
    fn test_zero_rounds() {
        let report = simulate(0, 4, 1);
        assert_eq!(report.player1_wins + report.player2_wins + report.ties, 0);
        assert_eq!(report.player1_share(), 0.0);
    }
}
