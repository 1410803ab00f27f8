//! Shared types and constants.
//!
//! Pure data with no external dependencies; everything here is consumed by
//! both the simulation core and the peripheral collaborators (view, input,
//! autoplay).

/// Board dimensions.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// The simulation advances once per frame at 60 Hz.
pub const TICKS_PER_SECOND: u32 = 60;

/// Countdown shown before a round starts, in ticks.
pub const COUNTDOWN_TICKS: u32 = 60;

/// Ticks a score label stays on screen.
pub const EFFECT_TICKS: u32 = 60;

/// Grace window after a blocked spawn before the game becomes terminal.
/// Any successful action resets the clock.
pub const INACTIVITY_LIMIT_TICKS: u32 = 600;

/// Autoplay pacing, in ticks between consecutive planned actions.
pub const AUTO_MOVE_DELAY: u32 = 10;
pub const AUTO_DROP_DELAY: u32 = 10;
pub const AUTO_SPAWN_DELAY: u32 = 10;

/// Score margin a hold-path plan must beat the direct plan by.
pub const HOLD_SCORE_MARGIN: f32 = 100.0;

/// Idle time on the game-over screen before demo play restarts, in ticks.
pub const DEMO_IDLE_TICKS: u32 = 120 * TICKS_PER_SECOND;

/// Human input pacing, in ticks.
pub const DAS_TICKS: u32 = 10;
pub const ARR_TICKS: u32 = 2;
pub const ROTATE_DELAY_TICKS: u32 = 10;
pub const HOLD_DELAY_TICKS: u32 = 10;
pub const SOFT_DROP_PERIOD_TICKS: u32 = 4;

/// The seven standard tetromino kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::J,
    PieceKind::L,
    PieceKind::O,
    PieceKind::S,
    PieceKind::T,
    PieceKind::Z,
];

impl PieceKind {
    /// Catalog index, 0..=6.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ALL_KINDS.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Identity of a locked cell's source piece.
///
/// `Standard` covers the seven catalog kinds; `Custom` carries the tag of an
/// externally suggested shape so its cells stay distinguishable on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceId {
    Standard(PieceKind),
    Custom(u8),
}

impl PieceId {
    /// Encoded cell value: 0 is reserved for empty, standard kinds map to
    /// 1..=7, custom tags to 8 and up.
    pub fn cell_value(self) -> u8 {
        match self {
            PieceId::Standard(kind) => kind.index() as u8 + 1,
            PieceId::Custom(tag) => 8 + tag,
        }
    }
}

/// A board cell: empty or filled by a piece.
pub type Cell = Option<PieceId>;

/// Rotation states, in clockwise order from spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R1,
    R2,
    R3,
}

pub const ALL_ROTATIONS: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

impl Rotation {
    pub fn index(self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    pub fn cw(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R3,
            Rotation::R3 => Rotation::R2,
            Rotation::R2 => Rotation::R1,
            Rotation::R1 => Rotation::R0,
        }
    }
}

/// Discrete commands the game accepts, from either a human input collaborator
/// or the autoplay planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Reset,
}

impl GameAction {
    pub fn as_str(self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_index_roundtrip() {
        for kind in ALL_KINDS {
            assert_eq!(PieceKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn cell_values_reserve_zero_for_empty() {
        for kind in ALL_KINDS {
            let v = PieceId::Standard(kind).cell_value();
            assert!((1..=7).contains(&v));
        }
        assert_eq!(PieceId::Custom(0).cell_value(), 8);
        assert_eq!(PieceId::Custom(6).cell_value(), 14);
    }

    #[test]
    fn rotation_cycles() {
        for r in ALL_ROTATIONS {
            assert_eq!(r.cw().ccw(), r);
            assert_eq!(r.cw().cw().cw().cw(), r);
        }
    }
}
