use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use log::{debug, trace};
use rand::{rngs::StdRng, Rng};
use tokio::{sync::watch, task::JoinHandle, time::sleep};

use super::Intent;
use crate::{
    engine::Engine,
    grid::{GameState, GameStatus},
};

type Shared<R> = Arc<Mutex<Engine<R>>>;

fn lock<R>(engine: &Shared<R>) -> MutexGuard<'_, Engine<R>> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives an `Engine` in real time.
///
/// A single tick task sleeps for the engine's current interval, advances,
/// publishes the new state and goes round again, so a speed change applies
/// from the next tick on. Pausing or restarting aborts the task outright.
/// Every intent and every tick takes the engine lock once, publishes while
/// still holding it and releases it before awaiting anything, so watchers
/// see snapshots in the order the engine produced them.
pub struct GameLoop<R = StdRng> {
    engine:    Shared<R>,
    snapshots: Arc<watch::Sender<GameState>>,
    ticker:    Option<JoinHandle<()>>,
}

impl<R: Rng + Send + 'static> GameLoop<R> {
    pub fn new(engine: Engine<R>) -> Self {
        let (snapshots, _) = watch::channel(engine.snapshot());
        Self {
            engine:    Arc::new(Mutex::new(engine)),
            snapshots: Arc::new(snapshots),
            ticker:    None,
        }
    }

    /// Receives a fresh snapshot after every tick and every intent.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> GameState {
        lock(&self.engine).snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Applies `intent` and arms or cancels the tick task to match the
    /// resulting status. An engine handed over already PLAYING starts ticking
    /// on its first intent. Must be called from within a tokio runtime.
    pub fn apply(&mut self, intent: Intent) {
        debug!("applying {intent:?}");

        let (before, after) = {
            let mut engine = lock(&self.engine);
            let before = engine.status();
            match intent {
                Intent::Steer(direction) => {
                    engine.start();
                    engine.set_pending_direction(direction);
                }
                Intent::Start => {
                    engine.start();
                }
                Intent::Pause => {
                    engine.pause();
                }
                Intent::Resume => {
                    engine.resume();
                }
                Intent::Restart => engine.restart(),
                Intent::TogglePause => match before {
                    GameStatus::Playing => {
                        engine.pause();
                    }
                    GameStatus::Paused => {
                        engine.resume();
                    }
                    GameStatus::Ready | GameStatus::GameOver => {}
                },
                Intent::Confirm => match before {
                    GameStatus::Ready => {
                        engine.start();
                    }
                    GameStatus::GameOver => engine.restart(),
                    GameStatus::Playing | GameStatus::Paused => {}
                },
            }
            self.snapshots.send_replace(engine.snapshot());
            (before, engine.status())
        };

        if matches!(intent, Intent::Restart) || after != GameStatus::Playing {
            self.cancel();
        } else if before != GameStatus::Playing || !self.is_ticking() {
            self.arm();
        }
    }

    fn arm(&mut self) {
        self.cancel();
        trace!("arming tick task");
        self.ticker = Some(tokio::spawn(run_ticks(
            Arc::clone(&self.engine),
            Arc::clone(&self.snapshots),
        )));
    }

    fn cancel(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            trace!("cancelling tick task");
            ticker.abort();
        }
    }
}

impl<R> Drop for GameLoop<R> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

async fn run_ticks<R: Rng>(
    engine: Shared<R>,
    snapshots: Arc<watch::Sender<GameState>>,
) {
    loop {
        let interval = {
            let engine = lock(&engine);
            if !engine.state().is_playing() {
                return;
            }
            engine.state().game_speed
        };

        sleep(Duration::from_millis(interval)).await;

        let playing = {
            let mut engine = lock(&engine);
            let state = engine.advance();
            snapshots.send_replace(state.clone());
            state.is_playing()
        };

        if !playing {
            debug!("tick task stopping, game no longer running");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::{rngs::StdRng, SeedableRng};
    use tokio::time::sleep;

    use super::{lock, GameLoop};
    use crate::{
        engine::Engine,
        grid::{
            types::{Coord, Direction},
            GameConfig,
            GameState,
            GameStatus,
        },
        host::Intent,
    };

    fn ready(head_x: i64, game_speed: u64) -> GameLoop {
        at(head_x, game_speed, GameStatus::Ready)
    }

    fn at(head_x: i64, game_speed: u64, status: GameStatus) -> GameLoop {
        let state = GameState {
            snake: (0..3).map(|i| Coord::new(head_x - i, 10)).collect(),
            food: Coord::new(0, 0),
            direction: Direction::Right,
            next_direction: Direction::Right,
            score: 0,
            high_score: 0,
            status,
            game_speed,
        };
        let engine = Engine::with_state(
            GameConfig::default(),
            state,
            StdRng::seed_from_u64(9),
        )
        .unwrap();
        GameLoop::new(engine)
    }

    fn head_x(game: &GameLoop) -> i64 {
        game.snapshot().head().unwrap().x
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_at_the_current_interval() {
        let mut game = ready(5, 100);
        game.apply(Intent::Start);
        assert!(game.is_ticking());

        sleep(Duration::from_millis(50)).await;
        assert_eq!(head_x(&game), 5);

        sleep(Duration::from_millis(60)).await;
        assert_eq!(head_x(&game), 6);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(head_x(&game), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_ticks_and_resume_restarts_them() {
        let mut game = ready(5, 100);
        game.apply(Intent::Start);
        sleep(Duration::from_millis(150)).await;
        assert_eq!(head_x(&game), 6);

        game.apply(Intent::TogglePause);
        assert_eq!(game.snapshot().status, GameStatus::Paused);
        assert!(!game.is_ticking());
        sleep(Duration::from_millis(1000)).await;
        assert_eq!(head_x(&game), 6);

        game.apply(Intent::TogglePause);
        sleep(Duration::from_millis(110)).await;
        assert_eq!(head_x(&game), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn steering_from_ready_starts_the_game() {
        let mut game = ready(5, 100);
        game.apply(Intent::Steer(Direction::Down));
        assert_eq!(game.snapshot().status, GameStatus::Playing);
        sleep(Duration::from_millis(110)).await;
        assert_eq!(game.snapshot().head(), Some(Coord::new(5, 11)));
    }

    #[tokio::test(start_paused = true)]
    async fn game_over_ends_the_tick_task() {
        let mut game = ready(18, 100);
        let mut updates = game.subscribe();
        game.apply(Intent::Start);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(game.snapshot().status, GameStatus::GameOver);
        assert_eq!(head_x(&game), 19);
        assert!(!game.is_ticking());
        assert_eq!(updates.borrow_and_update().status, GameStatus::GameOver);

        game.apply(Intent::Confirm);
        let state = game.snapshot();
        assert_eq!(state.status, GameStatus::Ready);
        assert_eq!(state.snake.len(), 3);
        assert!(!game.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_a_running_game() {
        let mut game = ready(5, 100);
        game.apply(Intent::Start);
        game.apply(Intent::Restart);
        assert!(!game.is_ticking());
        sleep(Duration::from_millis(500)).await;
        assert_eq!(game.snapshot().status, GameStatus::Ready);
        assert_eq!(head_x(&game), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn handed_over_playing_engine_ticks_after_first_intent() {
        let mut game = at(5, 100, GameStatus::Playing);
        assert!(!game.is_ticking());

        game.apply(Intent::Steer(Direction::Down));
        assert!(game.is_ticking());
        sleep(Duration::from_millis(110)).await;
        assert_eq!(game.snapshot().head(), Some(Coord::new(5, 11)));

        game.apply(Intent::Start);
        sleep(Duration::from_millis(100)).await;
        assert_eq!(game.snapshot().head(), Some(Coord::new(5, 12)));
    }

    #[tokio::test(start_paused = true)]
    async fn every_intent_publishes_the_engine_state() {
        let mut game = ready(5, 100);
        let mut updates = game.subscribe();

        for intent in [
            Intent::Start,
            Intent::Steer(Direction::Up),
            Intent::TogglePause,
            Intent::TogglePause,
            Intent::Restart,
        ] {
            game.apply(intent);
            assert!(updates.has_changed().unwrap());
            assert_eq!(*updates.borrow_and_update(), game.snapshot());
            sleep(Duration::from_millis(40)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn published_snapshot_never_lags_the_engine() {
        let mut game = at(2, 1, GameStatus::Ready);
        let updates = game.subscribe();
        game.apply(Intent::Start);

        for i in 0..200 {
            if i % 7 == 0 {
                let turn = if i % 14 == 0 {
                    Direction::Down
                } else {
                    Direction::Right
                };
                game.apply(Intent::Steer(turn));
            }
            {
                let engine = lock(&game.engine);
                assert_eq!(*updates.borrow(), *engine.state());
            }
            sleep(Duration::from_millis(1)).await;
        }
    }
}
