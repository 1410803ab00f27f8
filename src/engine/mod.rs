//! Placement search and autoplay on top of the pure core.

pub mod eval;
pub mod planner;

pub use eval::{evaluate, BoardFeatures};
pub use planner::{find_best_placement, plan_move, AutoPlayer, Plan};
