//! Piece catalog and rotation data.
//!
//! Shapes are stored as mino offsets from the piece's top-left anchor, one
//! entry per rotation state. Wall-kick offsets live here too; the transition
//! lookup is enumerated explicitly per `(from, direction)` pair rather than
//! derived with index arithmetic.

use arrayvec::ArrayVec;

use crate::types::{PieceId, PieceKind, Rotation};

/// Offset of a single filled cell relative to the piece anchor.
pub type MinoOffset = (i8, i8);

/// A standard piece's filled cells for one rotation state.
pub type StandardShape = [MinoOffset; 4];

/// Up to 16 filled cells; standard pieces always have 4, custom 4x4 shapes
/// may have any occupancy.
pub type CellList = ArrayVec<MinoOffset, 16>;

/// Shape catalog indexed by `PieceKind::index()` then `Rotation::index()`.
/// Offsets are (x, y) with y growing downward, matching board coordinates.
const SHAPES: [[StandardShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // O (rotation invariant)
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
];

/// Get the filled-cell offsets for a standard kind and rotation.
pub fn standard_shape(kind: PieceKind, rotation: Rotation) -> &'static StandardShape {
    &SHAPES[kind.index()][rotation.index()]
}

/// A 4x4 occupancy grid, indexed `[row][col]`.
pub type OccupancyGrid = [[bool; 4]; 4];

/// An externally supplied shape with its four rotations precomputed.
///
/// The tag distinguishes custom cells on the board (encoded as `8 + tag`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomShape {
    tag: u8,
    rotations: [OccupancyGrid; 4],
}

impl CustomShape {
    /// Build from a base grid, precomputing successive clockwise rotations.
    pub fn from_grid(tag: u8, grid: OccupancyGrid) -> Self {
        let mut rotations = [grid; 4];
        for i in 1..4 {
            rotations[i] = rotate_grid_cw(&rotations[i - 1]);
        }
        Self { tag, rotations }
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn grid(&self, rotation: Rotation) -> &OccupancyGrid {
        &self.rotations[rotation.index()]
    }
}

/// Rotate a 4x4 grid 90 degrees clockwise.
fn rotate_grid_cw(grid: &OccupancyGrid) -> OccupancyGrid {
    let mut out = [[false; 4]; 4];
    for (y, row) in grid.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            out[x][3 - y] = filled;
        }
    }
    out
}

/// Shape data behind a piece: catalog lookup or a custom occupancy set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSet {
    Standard(PieceKind),
    Custom(CustomShape),
}

/// An active or queued piece: shape source, rotation, and top-left anchor in
/// board coordinates. A `Copy` value type; search and hold always work on
/// copies, never on aliases of the live piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    shape: ShapeSet,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn standard(kind: PieceKind) -> Self {
        Self {
            shape: ShapeSet::Standard(kind),
            rotation: Rotation::R0,
            x: 0,
            y: 0,
        }
    }

    pub fn custom(shape: CustomShape) -> Self {
        Self {
            shape: ShapeSet::Custom(shape),
            rotation: Rotation::R0,
            x: 0,
            y: 0,
        }
    }

    pub fn id(&self) -> PieceId {
        match self.shape {
            ShapeSet::Standard(kind) => PieceId::Standard(kind),
            ShapeSet::Custom(shape) => PieceId::Custom(shape.tag()),
        }
    }

    pub fn is_kind(&self, kind: PieceKind) -> bool {
        matches!(self.shape, ShapeSet::Standard(k) if k == kind)
    }

    /// Filled-cell offsets for an arbitrary rotation state.
    pub fn cells_at(&self, rotation: Rotation) -> CellList {
        let mut cells = CellList::new();
        match &self.shape {
            ShapeSet::Standard(kind) => {
                cells.extend(standard_shape(*kind, rotation).iter().copied());
            }
            ShapeSet::Custom(shape) => {
                for (y, row) in shape.grid(rotation).iter().enumerate() {
                    for (x, &filled) in row.iter().enumerate() {
                        if filled {
                            cells.push((x as i8, y as i8));
                        }
                    }
                }
            }
        }
        cells
    }

    /// Filled-cell offsets for the current rotation state.
    pub fn cells(&self) -> CellList {
        self.cells_at(self.rotation)
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.ccw();
    }

    /// Whether rotation kicks use the I-piece offset table.
    pub fn uses_i_kicks(&self) -> bool {
        matches!(self.shape, ShapeSet::Standard(PieceKind::I))
    }
}

/// Candidate kick offsets tried in order during a rotation attempt.
pub type KickRow = [(i8, i8); 5];

/// I-piece kick rows, one per clockwise transition starting at R0->R1.
const I_KICKS: [KickRow; 4] = [
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Kick rows shared by J, L, S, T, Z and custom shapes.
const JLSTZ_KICKS: [KickRow; 4] = [
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// Look up the ordered kick candidates for a rotation transition.
///
/// Rows are keyed by the clockwise transition they belong to, so a
/// counter-clockwise turn out of state `r` reuses the row of the clockwise
/// turn that would have entered `r`. Enumerated per pair to keep the mapping
/// visible at rotation 0.
pub fn kick_offsets(use_i_table: bool, from: Rotation, clockwise: bool) -> &'static KickRow {
    let table = if use_i_table { &I_KICKS } else { &JLSTZ_KICKS };
    let row = match (from, clockwise) {
        (Rotation::R0, true) => 0,  // R0 -> R1
        (Rotation::R1, true) => 1,  // R1 -> R2
        (Rotation::R2, true) => 2,  // R2 -> R3
        (Rotation::R3, true) => 3,  // R3 -> R0
        (Rotation::R0, false) => 3, // R0 -> R3
        (Rotation::R1, false) => 0, // R1 -> R0
        (Rotation::R2, false) => 1, // R2 -> R1
        (Rotation::R3, false) => 2, // R3 -> R2
    };
    &table[row]
}
