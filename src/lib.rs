//! Simulation core for a retro arcade space shooter.
//!
//! Everything in this crate is terminal-agnostic: the binary in `main.rs`
//! polls input, feeds commands into [`state`], and renders a
//! [`snapshot::RenderSnapshot`] each frame.

pub mod autopilot;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod highscore;
pub mod snapshot;
pub mod spawner;
pub mod state;
