//! Game state machine.
//!
//! Owns the board and the active/queued/held pieces, and advances the fixed
//! per-tick simulation: countdown, gravity, lock resolution, scoring, and the
//! pending-game-over grace window. All mutation of board state goes through
//! this type; collaborators (input, autoplay, view) only read state and
//! submit discrete commands.

use arrayvec::ArrayVec;

use crate::core::pieces::{kick_offsets, Piece};
use crate::core::rng::{PieceFactory, ShapeSuggester};
use crate::core::scoring;
use crate::core::Board;
use crate::types::{
    GameAction, PieceKind, BOARD_WIDTH, COUNTDOWN_TICKS, EFFECT_TICKS, INACTIVITY_LIMIT_TICKS,
};

/// Spawn anchor for a fresh piece.
const SPAWN_X: i8 = BOARD_WIDTH as i8 / 2 - 2;

/// Presentation hooks raised by the simulation. All methods default to
/// no-ops; a frontend registers an observer to drive audio or effects
/// without the core knowing about either.
pub trait GameObserver {
    fn lines_cleared(&mut self, _rows: &[usize]) {}
    fn piece_locked(&mut self) {}
    fn score_awarded(&mut self, _points: u32, _label: &str) {}
    fn countdown_finished(&mut self) {}
    fn game_over_pending(&mut self) {}
    fn game_over(&mut self) {}
}

pub struct Game {
    board: Board,
    current: Option<Piece>,
    /// FIFO lookahead; holds 3 during countdown, 2 once play starts.
    next: ArrayVec<Piece, 3>,
    hold: Option<Piece>,
    hold_used: bool,
    factory: PieceFactory,
    score: u32,
    level: u32,
    lines_cleared: u32,
    /// -1 means no active combo chain.
    combo_count: i32,
    last_move_was_rotation: bool,
    last_rotation_x: i8,
    last_rotation_y: i8,
    effect_text: Option<String>,
    effect_timer: u32,
    countdown_active: bool,
    countdown_timer: u32,
    inactivity_timer: u32,
    game_over_triggered: bool,
    is_game_over: bool,
    auto_play: bool,
    started: bool,
    ticks: u32,
    /// Increments whenever the active piece changes identity (spawn or hold
    /// swap); the autoplay planner keys its re-planning off this.
    piece_serial: u32,
    observer: Option<Box<dyn GameObserver>>,
}

impl Game {
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: ArrayVec::new(),
            hold: None,
            hold_used: false,
            factory: PieceFactory::new(seed),
            score: 0,
            level: 1,
            lines_cleared: 0,
            combo_count: -1,
            last_move_was_rotation: false,
            last_rotation_x: 0,
            last_rotation_y: 0,
            effect_text: None,
            effect_timer: 0,
            countdown_active: false,
            countdown_timer: 0,
            inactivity_timer: 0,
            game_over_triggered: false,
            is_game_over: false,
            auto_play: false,
            started: false,
            ticks: 0,
            piece_serial: 0,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    pub fn set_suggester(&mut self, suggester: Box<dyn ShapeSuggester>) {
        self.factory.set_suggester(suggester);
    }

    fn observe(&mut self, f: impl FnOnce(&mut dyn GameObserver)) {
        if let Some(observer) = self.observer.as_mut() {
            f(observer.as_mut());
        }
    }

    /// Return every field to its construction-time default. The piece
    /// factory keeps its RNG state and suggester; the observer stays
    /// registered.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = None;
        self.next.clear();
        self.hold = None;
        self.hold_used = false;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.combo_count = -1;
        self.last_move_was_rotation = false;
        self.last_rotation_x = 0;
        self.last_rotation_y = 0;
        self.effect_text = None;
        self.effect_timer = 0;
        self.countdown_active = false;
        self.countdown_timer = 0;
        self.inactivity_timer = 0;
        self.game_over_triggered = false;
        self.is_game_over = false;
        self.auto_play = false;
        self.started = false;
        self.ticks = 0;
        self.piece_serial = 0;
    }

    /// Begin a round: fill the three-slot lookahead (current plus two) and
    /// enter the countdown. The opening pieces are always standard draws;
    /// suggested shapes only join the queue during play.
    pub fn start(&mut self, auto_play: bool) {
        self.auto_play = auto_play;
        self.started = true;
        for _ in 0..3 {
            let piece = self.factory.standard();
            self.next.push(piece);
        }
        self.countdown_active = true;
        self.countdown_timer = COUNTDOWN_TICKS;
    }

    /// Pop the queue head into play and top the lookahead back up.
    fn spawn(&mut self) {
        let mut piece = if self.next.is_empty() {
            self.factory.next()
        } else {
            self.next.remove(0)
        };
        while self.next.len() < 2 {
            let refill = self.factory.next();
            self.next.push(refill);
        }

        piece.x = SPAWN_X;
        piece.y = 0;
        self.current = Some(piece);
        self.piece_serial = self.piece_serial.wrapping_add(1);
        self.hold_used = false;
        self.last_move_was_rotation = false;

        // A blocked spawn opens the grace window instead of ending the game
        // outright.
        if !self.board.is_valid(&piece) && !self.game_over_triggered {
            self.game_over_triggered = true;
            self.inactivity_timer = 0;
            self.observe(|o| o.game_over_pending());
        }
    }

    /// Advance one fixed tick: countdown, gravity, and effect timers.
    pub fn update(&mut self) {
        if self.countdown_active {
            self.countdown_timer = self.countdown_timer.saturating_sub(1);
            if self.countdown_timer == 0 {
                self.countdown_active = false;
                self.observe(|o| o.countdown_finished());
                self.spawn();
            }
            return;
        }

        if self.is_game_over {
            return;
        }

        if self.game_over_triggered {
            self.inactivity_timer += 1;
            if self.inactivity_timer >= INACTIVITY_LIMIT_TICKS {
                self.is_game_over = true;
                self.observe(|o| o.game_over());
            }
            return;
        }

        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % scoring::gravity_interval(self.level) == 0 {
            self.move_down();
        }

        if self.effect_timer > 0 {
            self.effect_timer -= 1;
            if self.effect_timer == 0 {
                self.effect_text = None;
            }
        }
    }

    fn movable(&self) -> bool {
        !self.countdown_active && !self.is_game_over
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        if !self.movable() {
            return false;
        }
        let Some(mut piece) = self.current else {
            return false;
        };
        piece.x += dx;
        if self.board.is_valid(&piece) {
            self.current = Some(piece);
            self.last_move_was_rotation = false;
            self.inactivity_timer = 0;
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    /// Move the active piece down one cell. A blocked downward move is the
    /// lock trigger, not a plain failure.
    pub fn move_down(&mut self) -> bool {
        if !self.movable() {
            return false;
        }
        let Some(mut piece) = self.current else {
            return false;
        };
        piece.y += 1;
        if self.board.is_valid(&piece) {
            self.current = Some(piece);
            self.last_move_was_rotation = false;
            self.inactivity_timer = 0;
            return true;
        }
        self.lock_current();
        false
    }

    /// Drop until blocked, then lock. Awards 2 points per cell fallen.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.movable() || self.current.is_none() {
            return 0;
        }
        let mut distance = 0;
        while self.move_down() {
            distance += 1;
        }
        self.score += scoring::drop_bonus(distance);
        distance
    }

    /// Rotate with wall kicks. O never rotates. On success the post-kick
    /// anchor is remembered for the T-spin corner test; on failure rotation
    /// and position are left untouched.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.movable() {
            return false;
        }
        let Some(original) = self.current else {
            return false;
        };
        if original.is_kind(PieceKind::O) {
            return false;
        }

        let mut piece = original;
        if clockwise {
            piece.rotate_cw();
        } else {
            piece.rotate_ccw();
        }

        for &(dx, dy) in kick_offsets(piece.uses_i_kicks(), original.rotation, clockwise) {
            piece.x = original.x + dx;
            piece.y = original.y + dy;
            if self.board.is_valid(&piece) {
                self.current = Some(piece);
                self.last_move_was_rotation = true;
                self.last_rotation_x = piece.x;
                self.last_rotation_y = piece.y;
                self.inactivity_timer = 0;
                return true;
            }
        }

        // No kick validated; `current` still holds the pre-attempt piece.
        false
    }

    /// Stash the active piece. First use stores and spawns; later uses swap
    /// with the held piece, repositioned to the spawn cell. Once per piece.
    pub fn hold(&mut self) -> bool {
        if self.hold_used || !self.movable() {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        match self.hold {
            None => {
                self.hold = Some(current);
                self.spawn();
            }
            Some(mut held) => {
                held.x = SPAWN_X;
                held.y = 0;
                self.current = Some(held);
                self.hold = Some(current);
                self.piece_serial = self.piece_serial.wrapping_add(1);
            }
        }

        self.hold_used = true;
        self.last_move_was_rotation = false;
        self.inactivity_timer = 0;
        true
    }

    /// Simplified T-spin corner test: the four corners of the 3x3 box at the
    /// post-kick anchor, regardless of rotation state. A corner counts when
    /// off the board or occupied; three or more confirm the spin.
    fn check_t_spin(&self, piece: &Piece) -> bool {
        if !piece.is_kind(PieceKind::T) || !self.last_move_was_rotation {
            return false;
        }

        let (ax, ay) = (self.last_rotation_x, self.last_rotation_y);
        let corners = [(ax, ay), (ax + 2, ay), (ax, ay + 2), (ax + 2, ay + 2)];
        let blocked = corners
            .iter()
            .filter(|&&(x, y)| !self.board.is_open(x, y))
            .count();
        blocked >= 3
    }

    /// Lock resolution: write the piece, evaluate the T-spin, clear lines,
    /// advance the combo chain, score, then spawn the successor.
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.observe(|o| o.piece_locked());
        self.board.lock(&piece);

        let is_t_spin = self.check_t_spin(&piece);
        let rows = self.board.clear_lines();
        let lines = rows.len();

        if lines > 0 {
            self.combo_count += 1;
            self.observe(|o| o.lines_cleared(&rows));
        } else {
            self.combo_count = -1;
        }

        let result = scoring::score_lock(lines, is_t_spin, self.combo_count, self.level);
        self.score += result.points;
        if let Some(label) = result.label {
            let points = result.points;
            self.observe(|o| o.score_awarded(points, &label));
            self.effect_text = Some(label);
            self.effect_timer = EFFECT_TICKS;
        }

        self.lines_cleared += lines as u32;
        self.level = scoring::level_for_lines(self.lines_cleared);

        self.spawn();
    }

    /// Apply a discrete command from a collaborator.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    // --- Read-only state for collaborators ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The visible lookahead, at most two pieces.
    pub fn next_preview(&self) -> &[Piece] {
        let n = self.next.len().min(2);
        &self.next[..n]
    }

    pub fn hold_piece(&self) -> Option<&Piece> {
        self.hold.as_ref()
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines_cleared
    }

    pub fn combo(&self) -> i32 {
        self.combo_count
    }

    pub fn effect_text(&self) -> Option<&str> {
        self.effect_text.as_deref()
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown_active
    }

    pub fn countdown_ticks_left(&self) -> u32 {
        self.countdown_timer
    }

    pub fn game_over_triggered(&self) -> bool {
        self.game_over_triggered
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn piece_serial(&self) -> u32 {
        self.piece_serial
    }
}
