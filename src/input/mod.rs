//! Keyboard input translation.

pub mod handler;

pub use handler::InputHandler;
