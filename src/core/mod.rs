//! Pure game model: board, pieces, rules, and scoring. No I/O and no
//! timing; everything here is deterministic given a seed and a command
//! sequence.

pub mod board;
pub mod game;
pub mod pieces;
pub mod ranking;
pub mod rng;
pub mod scoring;

pub use board::Board;
pub use game::{Game, GameObserver};
pub use pieces::{CustomShape, Piece};
pub use ranking::{RankEntry, Ranking};
pub use rng::{PieceFactory, ShapeSuggester};
