//! Maps [`Game`] state into a terminal frame.
//!
//! Pure layout code, no I/O, so the whole thing is unit-testable.

use crossterm::style::Color;

use crate::core::{Board, Game, Piece, Ranking};
use crate::term::frame::{Frame, Glyph};
use crate::types::{PieceId, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TICKS_PER_SECOND};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board cell width in terminal columns; 2x1 compensates for the typical
/// glyph aspect ratio.
const CELL_W: u16 = 2;

const FRAME_W: u16 = BOARD_WIDTH as u16 * CELL_W + 2;
const FRAME_H: u16 = BOARD_HEIGHT as u16 + 2;
const PANEL_X: u16 = FRAME_W + 2;

const BORDER_COLOR: Color = Color::Grey;
const LABEL_COLOR: Color = Color::White;
const GRID_COLOR: Color = Color::DarkGrey;
const GHOST_COLOR: Color = Color::DarkGrey;

fn piece_color(id: PieceId) -> Color {
    match id {
        PieceId::Standard(PieceKind::I) => Color::Cyan,
        PieceId::Standard(PieceKind::J) => Color::Blue,
        PieceId::Standard(PieceKind::L) => Color::Rgb {
            r: 255,
            g: 160,
            b: 0,
        },
        PieceId::Standard(PieceKind::O) => Color::Yellow,
        PieceId::Standard(PieceKind::S) => Color::Green,
        PieceId::Standard(PieceKind::T) => Color::Magenta,
        PieceId::Standard(PieceKind::Z) => Color::Red,
        // Suggested shapes get neutral shades so they read as guests.
        PieceId::Custom(tag) => match tag % 3 {
            0 => Color::White,
            1 => Color::Grey,
            _ => Color::DarkCyan,
        },
    }
}

#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, game: &Game, ranking: &Ranking, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);

        self.draw_border(&mut frame);
        self.draw_board(&mut frame, game.board());

        if let Some(piece) = game.current() {
            if let Some(ghost_y) = ghost_y(game.board(), piece) {
                self.draw_piece_cells(&mut frame, piece, ghost_y, Glyph::new('░', GHOST_COLOR));
            }
            let glyph = Glyph::new('█', piece_color(piece.id()));
            self.draw_piece_cells(&mut frame, piece, piece.y, glyph);
        }

        self.draw_panel(&mut frame, game);

        if game.is_auto_play() {
            frame.put_str_bold(FRAME_W / 2 - 3, 0, " DEMO ", Color::Yellow);
        }

        if game.countdown_active() {
            let seconds = game.countdown_ticks_left() / TICKS_PER_SECOND + 1;
            self.overlay_line(&mut frame, FRAME_H / 2, &seconds.to_string());
        } else if game.is_game_over() {
            self.draw_game_over(&mut frame, game, ranking);
        } else if let Some(text) = game.effect_text() {
            self.overlay_line(&mut frame, FRAME_H / 2, text);
        }

        frame
    }

    fn draw_border(&self, frame: &mut Frame) {
        let style = Glyph::new('─', BORDER_COLOR);
        for x in 1..FRAME_W - 1 {
            frame.put(x, 0, style);
            frame.put(x, FRAME_H - 1, style);
        }
        let style = Glyph::new('│', BORDER_COLOR);
        for y in 1..FRAME_H - 1 {
            frame.put(0, y, style);
            frame.put(FRAME_W - 1, y, style);
        }
        frame.put(0, 0, Glyph::new('┌', BORDER_COLOR));
        frame.put(FRAME_W - 1, 0, Glyph::new('┐', BORDER_COLOR));
        frame.put(0, FRAME_H - 1, Glyph::new('└', BORDER_COLOR));
        frame.put(FRAME_W - 1, FRAME_H - 1, Glyph::new('┘', BORDER_COLOR));
    }

    fn draw_board(&self, frame: &mut Frame, board: &Board) {
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match board.get(x, y).flatten() {
                    Some(id) => {
                        self.fill_cell(frame, x, y, Glyph::new('█', piece_color(id)));
                    }
                    None => {
                        let (fx, fy) = cell_origin(x, y);
                        frame.put(fx + 1, fy, Glyph::new('·', GRID_COLOR));
                    }
                }
            }
        }
    }

    fn fill_cell(&self, frame: &mut Frame, x: i8, y: i8, glyph: Glyph) {
        let (fx, fy) = cell_origin(x, y);
        for dx in 0..CELL_W {
            frame.put(fx + dx, fy, glyph);
        }
    }

    fn draw_piece_cells(&self, frame: &mut Frame, piece: &Piece, at_y: i8, glyph: Glyph) {
        for &(dx, dy) in piece.cells().iter() {
            let x = piece.x + dx;
            let y = at_y + dy;
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                self.fill_cell(frame, x, y, glyph);
            }
        }
    }

    fn draw_panel(&self, frame: &mut Frame, game: &Game) {
        frame.put_str(PANEL_X, 1, "HOLD", LABEL_COLOR);
        if let Some(held) = game.hold_piece() {
            let color = if game.hold_used() {
                GRID_COLOR
            } else {
                piece_color(held.id())
            };
            self.draw_mini_piece(frame, held, PANEL_X, 2, color);
        }

        frame.put_str(PANEL_X, 7, "NEXT", LABEL_COLOR);
        for (i, piece) in game.next_preview().iter().enumerate() {
            let y = 8 + i as u16 * 5;
            self.draw_mini_piece(frame, piece, PANEL_X, y, piece_color(piece.id()));
        }

        frame.put_str(PANEL_X, 18, &format!("SCORE {:>7}", game.score()), LABEL_COLOR);
        frame.put_str(PANEL_X, 19, &format!("LEVEL {:>7}", game.level()), LABEL_COLOR);
        frame.put_str(PANEL_X, 20, &format!("LINES {:>7}", game.lines()), LABEL_COLOR);
    }

    fn draw_mini_piece(&self, frame: &mut Frame, piece: &Piece, x: u16, y: u16, color: Color) {
        let glyph = Glyph::new('█', color);
        for &(dx, dy) in piece.cells().iter() {
            let fx = x + dx as u16 * CELL_W;
            let fy = y + dy as u16;
            frame.put(fx, fy, glyph);
            frame.put(fx + 1, fy, glyph);
        }
    }

    fn draw_game_over(&self, frame: &mut Frame, game: &Game, ranking: &Ranking) {
        let mut y = 4;
        self.overlay_line_bold(frame, y, "GAME OVER");
        y += 2;

        if let Some(rank) = ranking.rank_of(game.score()) {
            self.overlay_line(frame, y, &format!("RANK {rank}"));
            y += 2;
        }

        for (i, entry) in ranking.entries().iter().take(5).enumerate() {
            let line = format!("{:>2} {:<3} {:>6}", i + 1, entry.name, entry.score);
            self.overlay_line(frame, y + i as u16, &line);
        }
        y += 6;

        self.overlay_line(frame, y, "R RESTART");
        self.overlay_line(frame, y + 1, "ESC QUIT");
    }

    fn overlay_line(&self, frame: &mut Frame, y: u16, text: &str) {
        let x = (FRAME_W.saturating_sub(text.chars().count() as u16)) / 2;
        frame.put_str(x, y, text, LABEL_COLOR);
    }

    fn overlay_line_bold(&self, frame: &mut Frame, y: u16, text: &str) {
        let x = (FRAME_W.saturating_sub(text.chars().count() as u16)) / 2;
        frame.put_str_bold(x, y, text, Color::Red);
    }
}

/// Minimum frame the view needs to draw without clipping.
pub fn minimum_viewport() -> Viewport {
    Viewport::new(PANEL_X + 14, FRAME_H)
}

fn cell_origin(x: i8, y: i8) -> (u16, u16) {
    (1 + x as u16 * CELL_W, 1 + y as u16)
}

/// Resting row for the active piece, for the ghost outline.
fn ghost_y(board: &Board, piece: &Piece) -> Option<i8> {
    if !board.is_valid(piece) {
        return None;
    }
    let mut probe = *piece;
    loop {
        let mut below = probe;
        below.y += 1;
        if !board.is_valid(&below) {
            break;
        }
        probe = below;
    }
    if probe.y == piece.y {
        None
    } else {
        Some(probe.y)
    }
}
