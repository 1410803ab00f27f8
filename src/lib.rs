//! Kiosk-style terminal Tetris.
//!
//! `core` holds the deterministic simulation, `engine` the placement search
//! driving the attract-mode autoplayer, and `input`/`term` the crossterm
//! front end. The binary wires them together in a fixed 60 Hz loop.

pub mod core;
pub mod engine;
pub mod input;
pub mod term;
pub mod types;
