use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::StreamExt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use three_cards::game::assets::{face_image, image_name};
use three_cards::game::{DRAW_INTERVAL_MS, REVEAL_DELAY_MS, SETTLE_DELAY_MS};
use three_cards::service::{simulate, DealTiming, GameEvent, GameState, SimulationReport, Table};

// ============================================================================
// 命令列參數
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-player three-card showdown", long_about = None)]
struct Args {
    /// Shuffle seed (random when omitted).
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deal rounds in real time and print every step.
    Play(PlayArgs),
    /// Run many rounds headless and report outcome counts.
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    #[arg(short, long, default_value_t = 1)]
    rounds: u32,

    /// Print events as JSON lines.
    #[arg(long)]
    json: bool,

    /// Delay between two draws in milliseconds.
    #[arg(long, default_value_t = DRAW_INTERVAL_MS)]
    draw_ms: u64,

    /// Delay between a draw and its reveal in milliseconds.
    #[arg(long, default_value_t = REVEAL_DELAY_MS)]
    reveal_ms: u64,

    /// Delay between the last draw and the result in milliseconds.
    #[arg(long, default_value_t = SETTLE_DELAY_MS)]
    settle_ms: u64,
}

#[derive(clap::Args, Debug)]
struct SimulateArgs {
    #[arg(short, long, default_value_t = 10_000)]
    rounds: u64,

    /// Number of independent sessions run in parallel.
    #[arg(short, long, default_value_t = 8)]
    batches: u64,

    #[arg(long)]
    json: bool,
}

fn build_timing(args: &PlayArgs) -> Result<DealTiming> {
    DealTiming::from_millis(args.draw_ms, args.reveal_ms, args.settle_ms)
        .context("invalid deal timing")
}

// ============================================================================
// 輸出
// ============================================================================

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Reset => "session reset".to_string(),
        GameEvent::Reshuffled { remaining } => format!("deck reshuffled ({remaining} cards)"),
        GameEvent::DealStarted { generation } => format!("--- deal #{generation} ---"),
        GameEvent::CardDealt { seat, slot, card } => {
            format!("{seat} card {}: {}", slot + 1, image_name(card))
        }
        GameEvent::CardRevealed { seat, slot, card } => {
            format!("{seat} card {}: {card} ({})", slot + 1, face_image(card))
        }
        GameEvent::Resolved {
            outcome,
            score1,
            score2,
        } => format!("{outcome}  [{score1} : {score2}]"),
    }
}

fn emit(event: &GameEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event).context("encode event")?);
    } else {
        println!("{}", describe(event));
    }
    Ok(())
}

fn print_report(report: &SimulationReport, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("encode report")?
        );
        return Ok(());
    }

    println!("rounds:       {}", report.rounds);
    println!("player 1 won: {}", report.player1_wins);
    println!("player 2 won: {}", report.player2_wins);
    println!("ties:         {}", report.ties);
    println!("reshuffles:   {}", report.reshuffles);
    println!("player 1 share of decided rounds: {:.4}", report.player1_share());
    for (reason, count) in &report.by_reason {
        println!("  {reason:<10} {count}");
    }
    Ok(())
}

// ============================================================================
// 子命令
// ============================================================================

async fn play(args: &PlayArgs, seed: u64) -> Result<()> {
    let timing = build_timing(args)?;
    // 一局的完整時長加上翻牌延遲，再留一點餘裕
    let round_limit = timing.deal_duration() + timing.reveal_delay + Duration::from_secs(1);

    let (table, driver) = Table::spawn(GameState::with_timing(seed, timing));
    let mut events = table.events();

    for round in 1..=args.rounds {
        table
            .try_deal()
            .with_context(|| format!("start round {round}"))?;

        let finished = tokio::time::timeout(round_limit, async {
            while let Some(item) = events.next().await {
                match item {
                    Ok(event) => {
                        emit(&event, args.json)?;
                        if matches!(event, GameEvent::Resolved { .. }) {
                            return Ok(true);
                        }
                    }
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        warn!(skipped, "event consumer lagged");
                    }
                }
            }
            Ok::<_, anyhow::Error>(false)
        })
        .await
        .with_context(|| format!("round {round} did not finish in {round_limit:?}"))??;

        if !finished {
            bail!("event stream closed during round {round}");
        }
    }

    let snapshot = table.snapshot();
    info!(
        score1 = snapshot.score1,
        score2 = snapshot.score2,
        deals = snapshot.deals_completed,
        "play finished"
    );
    if !args.json {
        println!(
            "final score  Player 1: {}  Player 2: {}",
            snapshot.score1, snapshot.score2
        );
    }

    table.close();
    driver.await.context("table driver task failed")?;
    Ok(())
}

fn run_simulation(args: &SimulateArgs, seed: u64) -> Result<()> {
    let report = simulate(args.rounds, args.batches, seed);
    info!(rounds = report.rounds, ties = report.ties, "simulation finished");
    print_report(&report, args.json)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");

    match &args.command {
        Command::Play(play_args) => play(play_args, seed).await,
        Command::Simulate(sim_args) => run_simulation(sim_args, seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use three_cards::game::{Card, Outcome, Player, Rank, Reason, Suit};

    #[test]
    fn parses_play_defaults() {
        let args = Args::parse_from(["three_cards", "play"]);
        let Command::Play(play) = args.command else {
            panic!("expected play");
        };
        assert_eq!(play.rounds, 1);
        assert!(!play.json);
        assert_eq!(build_timing(&play).unwrap(), DealTiming::default());
        assert_eq!(args.seed, None);
    }

    #[test]
    fn parses_global_seed_after_subcommand() {
        let args = Args::parse_from([
            "three_cards",
            "simulate",
            "--rounds",
            "50",
            "--batches",
            "2",
            "--seed",
            "9",
        ]);
        assert_eq!(args.seed, Some(9));
        let Command::Simulate(sim) = args.command else {
            panic!("expected simulate");
        };
        assert_eq!((sim.rounds, sim.batches), (50, 2));
    }

    #[test]
    fn rejects_zero_delay() {
        let args = Args::parse_from(["three_cards", "play", "--reveal-ms", "0"]);
        let Command::Play(play) = args.command else {
            panic!("expected play");
        };
        let err = build_timing(&play).unwrap_err();
        assert!(
            format!("{err:#}").contains("reveal_delay"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn describes_events_for_terminal() {
        let card = Card::new(Suit::Spades, Rank::Queen);
        let dealt = GameEvent::CardDealt {
            seat: Player::One,
            slot: 0,
            card,
        };
        assert_eq!(describe(&dealt), "Player 1 card 1: back.png");

        let revealed = GameEvent::CardRevealed {
            seat: Player::Two,
            slot: 2,
            card: card.face_up(),
        };
        assert_eq!(
            describe(&revealed),
            "Player 2 card 3: Q♠ (queen_of_spades.png)"
        );

        let resolved = GameEvent::Resolved {
            outcome: Outcome::win(Player::Two, Reason::ThirdCard),
            score1: 0,
            score2: 4,
        };
        assert_eq!(describe(&resolved), "Player 2 wins! (third-card)  [0 : 4]");
    }

    #[tokio::test(start_paused = true)]
    async fn play_runs_to_completion_on_paused_clock() {
        let args = Args::parse_from(["three_cards", "play", "--rounds", "3", "--json"]);
        let Command::Play(play_args) = args.command else {
            panic!("expected play");
        };
        play(&play_args, 21).await.unwrap();
    }
}
