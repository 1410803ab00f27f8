//! Board evaluation for the placement planner.
//!
//! Features are measured on the post-lock, pre-clear board so that a
//! placement is credited for the lines it completes as well as penalized
//! for the surface it leaves behind.

use crate::core::Board;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const LINE_WEIGHT: f32 = 1000.0;
const HOLE_WEIGHT: f32 = 8.0;
const AGGREGATE_HEIGHT_WEIGHT: f32 = 1.5;
const BUMPINESS_WEIGHT: f32 = 2.0;
const MAX_HEIGHT_WEIGHT: f32 = 0.5;

/// Aggregate surface features of a candidate board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardFeatures {
    /// Full rows present (not yet cleared).
    pub lines: u32,
    /// Sum of per-column heights.
    pub aggregate_height: u32,
    /// Empty cells with at least one filled cell above in the same column.
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
    /// Tallest column.
    pub max_height: u32,
}

impl BoardFeatures {
    /// Linear score; higher is better.
    pub fn score(&self) -> f32 {
        LINE_WEIGHT * self.lines as f32
            - HOLE_WEIGHT * self.holes as f32
            - AGGREGATE_HEIGHT_WEIGHT * self.aggregate_height as f32
            - BUMPINESS_WEIGHT * self.bumpiness as f32
            - MAX_HEIGHT_WEIGHT * self.max_height as f32
    }
}

/// Measure a board in one column-wise pass.
pub fn evaluate(board: &Board) -> BoardFeatures {
    let mut heights = [0u32; BOARD_WIDTH as usize];
    let mut holes = 0u32;

    for x in 0..BOARD_WIDTH as i8 {
        let mut column_height = 0u32;
        for y in 0..BOARD_HEIGHT as i8 {
            if !board.is_open(x, y) {
                if column_height == 0 {
                    column_height = (BOARD_HEIGHT as i8 - y) as u32;
                }
            } else if column_height > 0 {
                holes += 1;
            }
        }
        heights[x as usize] = column_height;
    }

    let aggregate_height = heights.iter().sum();
    let max_height = heights.iter().copied().max().unwrap_or(0);
    let bumpiness = heights
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum();

    BoardFeatures {
        lines: board.count_full_rows(),
        aggregate_height,
        holes,
        bumpiness,
        max_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceId, PieceKind};

    fn filled() -> Option<PieceId> {
        Some(PieceId::Standard(PieceKind::S))
    }

    #[test]
    fn empty_board_measures_zero() {
        let features = evaluate(&Board::new());
        assert_eq!(
            features,
            BoardFeatures {
                lines: 0,
                aggregate_height: 0,
                holes: 0,
                bumpiness: 0,
                max_height: 0,
            }
        );
        assert_eq!(features.score(), 0.0);
    }

    #[test]
    fn covered_gap_counts_as_hole() {
        let mut board = Board::new();
        board.set(4, 19, filled());
        board.set(4, 17, filled());

        let features = evaluate(&board);
        assert_eq!(features.holes, 1);
        assert_eq!(features.max_height, 3);
        assert_eq!(features.aggregate_height, 3);
    }

    #[test]
    fn uncovered_gap_is_not_a_hole() {
        let mut board = Board::new();
        board.set(4, 19, filled());

        let features = evaluate(&board);
        assert_eq!(features.holes, 0);
        assert_eq!(features.max_height, 1);
    }

    #[test]
    fn bumpiness_sums_adjacent_differences() {
        let mut board = Board::new();
        // Heights: 2, 0, 1, rest 0.
        board.set(0, 18, filled());
        board.set(0, 19, filled());
        board.set(2, 19, filled());

        let features = evaluate(&board);
        assert_eq!(features.bumpiness, 2 + 1 + 1);
        assert_eq!(features.aggregate_height, 3);
    }

    #[test]
    fn full_row_count_feeds_the_line_feature() {
        let mut board = Board::new();
        for y in [18i8, 19] {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y, filled());
            }
        }
        assert_eq!(board.count_full_rows(), 2);
        assert_eq!(evaluate(&board).lines, 2);
    }

    #[test]
    fn full_rows_dominate_the_score() {
        let mut full = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            full.set(x, 19, filled());
        }

        let mut tall = Board::new();
        for y in 10..20 {
            tall.set(0, y, filled());
        }

        assert!(evaluate(&full).score() > evaluate(&tall).score());
    }
}
