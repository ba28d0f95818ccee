use clap::Parser;
use color_eyre::Result;
use gridsnake::{
    cli::ConfigArgs,
    engine::Engine,
    grid::{GameState, GameStatus},
    host::{GameLoop, Intent},
    stats::SessionStats,
};
use log::{info, warn};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const HELP: &str = "w/a/s/d steer, p pause, enter start/restart, r restart, \
                    q quit";

/// Play snake in the terminal, one command per line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    /// Best score from earlier sessions
    #[arg(long, default_value_t = 0)]
    high_score: u32,

    /// Fix the food sequence for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

fn status_line(state: &GameState, best: u32) -> String {
    let status = match state.status {
        GameStatus::Ready => "Ready",
        GameStatus::Playing => "Playing",
        GameStatus::Paused => "Paused",
        GameStatus::GameOver => "Game Over",
    };
    format!(
        "score {}  best {}  {}  ({} ms/tick)",
        state.score,
        best.max(state.score),
        status,
        state.game_speed
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let args = Args::parse();
    let config = args.config.resolve()?;

    let engine = match args.seed {
        Some(seed) => Engine::seeded(config.clone(), args.high_score, seed)?,
        None => Engine::from_os_rng(config.clone(), args.high_score)?,
    };

    let mut game = GameLoop::new(engine);
    let mut updates = game.subscribe();
    let mut lines = BufReader::new(io::stdin()).lines();

    let mut stats = SessionStats::default();
    let mut best = args.high_score;
    let mut last_status = GameStatus::Ready;

    let state = game.snapshot();
    println!("{}{}", state.render(&config), status_line(&state, best));
    println!("{HELP}");

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                println!(
                    "{}{}",
                    state.render(&config),
                    status_line(&state, best)
                );

                if state.status == GameStatus::GameOver
                    && last_status != GameStatus::GameOver
                {
                    stats.record(state.score);
                    if state.score > best {
                        info!("new high score {}", state.score);
                        println!("new high score!");
                        best = state.score;
                    }
                    println!("{stats}. press enter to play again.");
                }
                last_status = state.status;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                match line.parse::<Intent>() {
                    Ok(intent) => game.apply(intent),
                    Err(e) => {
                        warn!("{e}");
                        println!("{HELP}");
                    }
                }
            }
        }
    }

    println!("{stats}");
    Ok(())
}
