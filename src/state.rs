//! Top-level game flow: MENU → PLAYING ⇄ PAUSED → GAME_OVER → MENU, with
//! HELP reachable from the menu and from pause.
//!
//! Discrete key presses arrive as [`Command`]s through [`apply_command`];
//! held flight keys arrive once per frame as [`Controls`] through
//! [`advance`].

use rand::Rng;

use crate::compute::{self, TickReport};
use crate::constants::RESTART_DELAY;
use crate::entities::{GameState, GameStatus};

pub use crate::compute::Controls;

/// One-shot inputs. Held flight controls travel in [`Controls`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    ToggleAutopilot,
    TriggerLoop,
    TriggerBomb,
    Pause,
    Confirm,
    Quit,
    Help,
}

/// Whether the driver should keep running after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one discrete command. Commands that mean nothing in the current
/// state are ignored.
pub fn apply_command(
    state: &mut GameState,
    command: Command,
    now: u64,
    rng: &mut impl Rng,
) -> Flow {
    if command == Command::Quit {
        tracing::info!(score = state.score, "quit requested");
        return Flow::Quit;
    }

    match (state.status, command) {
        (GameStatus::Menu, Command::Pause) => return Flow::Quit,
        (GameStatus::Menu, Command::Confirm) => start_game(state, now),
        (GameStatus::Menu | GameStatus::Paused, Command::Help) => {
            state.help_origin = state.status;
            state.status = GameStatus::Help;
        }

        (GameStatus::Help, Command::Pause | Command::Help) => {
            state.status = state.help_origin;
        }

        (GameStatus::Playing, Command::Pause) => state.status = GameStatus::Paused,
        (GameStatus::Playing, Command::ToggleAutopilot) => {
            state.autopilot = !state.autopilot;
            tracing::info!(enabled = state.autopilot, "autopilot toggled");
        }
        (GameStatus::Playing, Command::TriggerLoop) => {
            compute::trigger_loop(state, now);
        }
        (GameStatus::Playing, Command::TriggerBomb) => {
            compute::trigger_bomb(state, now, rng);
        }

        (GameStatus::Paused, Command::Pause) => state.status = GameStatus::Playing,

        (GameStatus::GameOver, Command::Confirm) if restart_delay_elapsed(state, now) => {
            state.status = GameStatus::Menu;
        }

        _ => {}
    }
    Flow::Continue
}

fn start_game(state: &mut GameState, now: u64) {
    state.reset(now);
    tracing::info!(
        high_score = state.high_score,
        autopilot = state.autopilot,
        "new game started"
    );
}

fn restart_delay_elapsed(state: &GameState, now: u64) -> bool {
    state
        .game_over_at
        .is_some_and(|at| now.saturating_sub(at) > RESTART_DELAY)
}

/// Runs one frame of whatever the current state does on its own: the full
/// simulation while PLAYING, the return-to-menu timer on GAME_OVER, and
/// nothing anywhere else.
pub fn advance(
    state: &mut GameState,
    controls: &Controls,
    now: u64,
    rng: &mut impl Rng,
) -> TickReport {
    match state.status {
        GameStatus::Playing => compute::tick(state, controls, now, rng),
        GameStatus::GameOver => {
            if restart_delay_elapsed(state, now) {
                state.status = GameStatus::Menu;
            }
            TickReport::default()
        }
        GameStatus::Menu | GameStatus::Help | GameStatus::Paused => TickReport::default(),
    }
}
