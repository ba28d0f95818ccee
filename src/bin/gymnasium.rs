use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use gridsnake::{
    cli::ConfigArgs,
    engine::{rules::check_invariants, Engine},
    pilots::{Greedy, Pilot},
    stats::SessionStats,
};
use log::info;

/// Let the greedy pilot play seeded games headlessly, checking every state
/// along the way.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long, default_value_t = 10)]
    games: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Give up on a game after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let args = Args::parse();
    let config = args.config.resolve()?;
    let mut engine = Engine::seeded(config, 0, args.seed)?;
    let mut stats = SessionStats::default();

    for game in 1..=args.games {
        engine.start();

        let mut ticks = 0;
        while engine.state().is_playing() && ticks < args.max_ticks {
            if let Some(direction) =
                Greedy.get_movement(engine.state(), engine.config())
            {
                engine.set_pending_direction(direction);
            }
            engine.advance();
            check_invariants(engine.state(), engine.config()).wrap_err_with(|| {
                format!("game {game} broke on tick {ticks}")
            })?;
            ticks += 1;
        }

        let state = engine.state();
        if stats.record(state.score) {
            info!("game {game} set a new best of {}", state.score);
        }
        println!(
            "game {game}: score {} length {} after {ticks} ticks",
            state.score,
            state.snake.len()
        );

        engine.restart();
    }

    println!("{stats}");
    Ok(())
}
