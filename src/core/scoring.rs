//! Scoring tables and the level/gravity curve.
//!
//! Points scale with the current level. T-spin clears use their own table
//! instead of the base line-clear points, and a combo chain adds a flat bonus
//! per consecutive clearing lock.

/// Base points for 0..=4 cleared lines.
const LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// T-spin points for 0..=3 cleared lines.
const T_SPIN_POINTS: [u32; 4] = [400, 800, 1200, 1600];

/// Flat bonus per combo step, scaled by level.
const COMBO_POINTS: u32 = 50;

/// Outcome of scoring one lock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    /// Display label, e.g. "T-SPIN DOUBLE" or "DOUBLE 2 COMBO". Empty locks
    /// produce none.
    pub label: Option<String>,
}

/// Points for the clear itself, before any combo bonus.
pub fn clear_points(lines: usize, is_t_spin: bool, level: u32) -> u32 {
    if is_t_spin {
        match lines {
            0..=3 => T_SPIN_POINTS[lines] * level,
            _ => 0,
        }
    } else {
        match lines {
            1..=4 => LINE_POINTS[lines] * level,
            _ => 0,
        }
    }
}

/// Combo bonus: `combo` is the number of consecutive clearing locks minus
/// one; -1 and 0 award nothing.
pub fn combo_bonus(combo: i32, level: u32) -> u32 {
    if combo > 0 {
        COMBO_POINTS * combo as u32 * level
    } else {
        0
    }
}

fn clear_label(lines: usize, is_t_spin: bool) -> Option<&'static str> {
    match (is_t_spin, lines) {
        (true, 0) => Some("T-SPIN"),
        (true, 1) => Some("T-SPIN SINGLE"),
        (true, 2) => Some("T-SPIN DOUBLE"),
        (true, 3) => Some("T-SPIN TRIPLE"),
        (false, 1) => Some("SINGLE"),
        (false, 2) => Some("DOUBLE"),
        (false, 3) => Some("TRIPLE"),
        (false, 4) => Some("TETRIS"),
        _ => None,
    }
}

/// Score a completed lock: clear points plus combo bonus, with the label the
/// view displays.
pub fn score_lock(lines: usize, is_t_spin: bool, combo: i32, level: u32) -> ScoreResult {
    let points = clear_points(lines, is_t_spin, level) + combo_bonus(combo, level);

    let label = clear_label(lines, is_t_spin).map(|base| {
        if combo > 0 {
            format!("{base} {combo} COMBO")
        } else {
            base.to_string()
        }
    });

    ScoreResult { points, label }
}

/// Hard drop awards 2 points per cell fallen.
pub fn drop_bonus(cells: u32) -> u32 {
    cells * 2
}

/// Level grows every 10 cleared lines, starting at 1.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / 10 + 1
}

/// Gravity period in ticks: faster at higher levels, floored at 5.
pub fn gravity_interval(level: u32) -> u32 {
    60u32.saturating_sub(level.saturating_mul(5)).max(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_clear_points_scale_with_level() {
        assert_eq!(clear_points(1, false, 1), 100);
        assert_eq!(clear_points(2, false, 1), 300);
        assert_eq!(clear_points(3, false, 1), 500);
        assert_eq!(clear_points(4, false, 1), 800);
        assert_eq!(clear_points(4, false, 3), 2400);
        assert_eq!(clear_points(0, false, 5), 0);
    }

    #[test]
    fn t_spin_points_use_their_own_table() {
        assert_eq!(clear_points(0, true, 1), 400);
        assert_eq!(clear_points(1, true, 1), 800);
        assert_eq!(clear_points(2, true, 1), 1200);
        assert_eq!(clear_points(3, true, 1), 1600);
        assert_eq!(clear_points(1, true, 2), 1600);
    }

    #[test]
    fn combo_bonus_needs_positive_combo() {
        assert_eq!(combo_bonus(-1, 1), 0);
        assert_eq!(combo_bonus(0, 1), 0);
        assert_eq!(combo_bonus(1, 1), 50);
        assert_eq!(combo_bonus(3, 2), 300);
    }

    #[test]
    fn labels_name_the_clear() {
        assert_eq!(score_lock(4, false, 0, 1).label.as_deref(), Some("TETRIS"));
        assert_eq!(score_lock(0, true, -1, 1).label.as_deref(), Some("T-SPIN"));
        assert_eq!(
            score_lock(2, false, 2, 1).label.as_deref(),
            Some("DOUBLE 2 COMBO")
        );
        assert_eq!(score_lock(0, false, -1, 1).label, None);
    }

    #[test]
    fn level_progression() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(35), 4);
    }

    #[test]
    fn gravity_speeds_up_and_floors() {
        assert_eq!(gravity_interval(1), 55);
        assert_eq!(gravity_interval(5), 35);
        assert_eq!(gravity_interval(11), 5);
        assert_eq!(gravity_interval(100), 5);
    }
}
