//! Terminal front end: a pure view that draws into a glyph frame, and a
//! screen that owns the raw-mode terminal and flushes frames to it.

pub mod frame;
pub mod game_view;
pub mod screen;

pub use frame::{Frame, Glyph};
pub use game_view::{minimum_viewport, GameView, Viewport};
pub use screen::Screen;
