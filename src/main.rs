//! Terminal runner (default binary).
//!
//! Wires the game loop to crossterm input, the terminal surface and the
//! leaderboard reporter. Logging goes to `BLOCKFALL_LOG_PATH` when set, since
//! the terminal itself is in raw mode.

use std::env;
use std::fs::File;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::engine::{
    GameLoop, LoopConfig, MonotonicClock, NullSink, RepeatHandle, ResultSink, SleepFrameHost,
};
use blockfall::input::{should_quit, InputCommand, InputHandler};
use blockfall::report::{read_leaderboard, LeaderboardReporter, ReportConfig};
use blockfall::term::{BoardView, TerminalSurface};
use blockfall::types::GameAction;

/// Input wait while no frame is scheduled (paused, game over).
const IDLE_POLL: Duration = Duration::from_millis(50);

const LEADERBOARD_SIZE: usize = 10;

type TerminalLoop = GameLoop<MonotonicClock, SleepFrameHost, Box<dyn ResultSink>>;

fn main() -> Result<()> {
    init_logging();

    let config = LoopConfig::from_env();
    info!("starting with seed {}", config.seed);

    let sink: Box<dyn ResultSink> = match LeaderboardReporter::start_from_env() {
        Some(reporter) => Box::new(reporter),
        None => Box::new(NullSink),
    };
    let mut game = GameLoop::from_config(
        &config,
        MonotonicClock::new(),
        SleepFrameHost::new(config.frame_ms),
        sink,
    );

    let mut surface = TerminalSurface::new(BoardView::default());
    surface.enter()?;

    let result = run(&mut game, &mut surface);

    // Always try to restore terminal state.
    let _ = surface.exit();
    game.stop();
    // Dropping the loop drops the reporter, which flushes pending writes.
    drop(game);

    result?;
    print_leaderboard();
    Ok(())
}

fn init_logging() {
    let Some(path) = env::var_os("BLOCKFALL_LOG_PATH") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init(),
        Err(e) => eprintln!("cannot open log file {}: {}", path.to_string_lossy(), e),
    }
}

fn run(game: &mut TerminalLoop, surface: &mut TerminalSurface) -> Result<()> {
    let mut input = InputHandler::new();
    let mut held: Option<(GameAction, RepeatHandle)> = None;

    game.start();

    loop {
        game.render(surface)?;

        let timeout = game.host().time_until_tick().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    match input.handle_key_event(key) {
                        Some(InputCommand::Action(action)) => {
                            game.submit(action);
                        }
                        Some(InputCommand::Hold(action)) => {
                            held = game.hold(action).map(|handle| (action, handle));
                        }
                        Some(InputCommand::Release(action)) => release(game, &mut held, action),
                        None => {}
                    }
                }
                Event::Resize(..) => surface.invalidate(),
                _ => {}
            }
        }

        if let Some(InputCommand::Release(action)) = input.update() {
            release(game, &mut held, action);
        }

        if game.host_mut().take_due() {
            game.frame();
        }

        // Pause and game over drop the loop's repeat; forget the key too so
        // the next press starts a fresh hold.
        if !game.status().is_running() && (held.is_some() || input.held().is_some()) {
            game.release_all();
            input.reset();
            held = None;
        }
    }
}

fn release(game: &mut TerminalLoop, held: &mut Option<(GameAction, RepeatHandle)>, action: GameAction) {
    if let Some((held_action, handle)) = *held {
        if held_action == action {
            game.release(handle);
            *held = None;
        }
    }
}

fn print_leaderboard() {
    let config = ReportConfig::from_env();
    if config.disabled {
        return;
    }
    match read_leaderboard(&config.path, LEADERBOARD_SIZE) {
        Ok(records) if !records.is_empty() => {
            let best = &records[0];
            println!(
                "Personal best: {} (level {}, {} lines)",
                best.score, best.level, best.lines_cleared
            );
            println!("Top scores ({}):", config.path.display());
            for (rank, record) in records.iter().enumerate() {
                println!(
                    "{:>2}. {:>7}  level {:>2}  lines {:>3}  {}",
                    rank + 1,
                    record.score,
                    record.level,
                    record.lines_cleared,
                    record.played_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Ok(_) => {}
        Err(e) => eprintln!("cannot read leaderboard: {}", e),
    }
}
