mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use retro_shooter::config::GameConfig;
use retro_shooter::entities::GameState;
use retro_shooter::highscore::HighScoreStore;
use retro_shooter::snapshot::snapshot;
use retro_shooter::state::{advance, apply_command, Command, Controls, Flow};

#[derive(Parser, Debug)]
#[command(name = "retro_shooter", about = "Retro arcade space shooter for the terminal")]
struct Args {
    /// TOML configuration file; missing file means defaults.
    #[arg(long, default_value = "retro_shooter.toml")]
    config: PathBuf,

    /// Seed the game RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Start every game with the autopilot engaged.
    #[arg(long)]
    autopilot: bool,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
}

fn held_controls(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Controls {
    Controls {
        rotate_left: is_held(key_frame, &KeyCode::Left, frame),
        rotate_right: is_held(key_frame, &KeyCode::Right, frame),
        thrust_up: is_held(key_frame, &KeyCode::Up, frame),
        thrust_down: is_held(key_frame, &KeyCode::Down, frame),
    }
}

/// One-shot bindings. Arrow keys are held controls and never map here.
fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::ToggleAutopilot),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(Command::TriggerLoop),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::TriggerBomb),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::Help),
        KeyCode::Esc => Some(Command::Pause),
        KeyCode::Enter => Some(Command::Confirm),
        _ => None,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file: stdout belongs to the renderer.
fn init_logging(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.log_path)
        .with_context(|| format!("creating log file {}", config.log_path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each arrow-key event individually, we
/// maintain a `key_frame` map that records the frame number of the last
/// press/repeat event for every key. Each frame the arrows still "fresh"
/// (within `HOLD_WINDOW` frames) become that tick's [`Controls`], so
/// turning and thrusting can be held together. Every other key is a
/// one-shot [`Command`] applied on press.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    store: &HighScoreStore,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_time: Duration,
) -> std::io::Result<()> {
    let started = Instant::now();
    let mut stored_high_score = state.high_score;
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now = started.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if let Some(command) = command_for(code, modifiers) {
                        if apply_command(state, command, now, rng) == Flow::Quit {
                            return Ok(());
                        }
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let controls = held_controls(&key_frame, frame);
        let report = advance(state, &controls, now, rng);

        // Persist new high score if beaten
        if report.game_over && state.score > stored_high_score {
            match store.save(state.score) {
                Ok(()) => {
                    stored_high_score = state.score;
                    tracing::info!(
                        high_score = state.score,
                        path = %store.path().display(),
                        "new high score saved"
                    );
                }
                Err(err) => tracing::warn!("could not save high score: {err}"),
            }
        }

        display::render(out, &snapshot(state, now))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = GameConfig::load(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    config.autopilot |= args.autopilot;
    init_logging(&config)?;

    let store = HighScoreStore::new(&config.high_score_path);
    let high_score = store.load();
    tracing::info!(high_score, path = %store.path().display(), "loaded high score");
    let mut state = GameState::new(config.width, config.height, high_score);
    state.autopilot_default = config.autopilot;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, high_score = state.high_score, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let frame_time = Duration::from_millis(config.frame_millis());
    let result = game_loop(&mut out, &mut state, &store, &rx, &mut rng, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(score = state.score, high_score = state.high_score, "exiting");
    result.context("running game loop")
}
