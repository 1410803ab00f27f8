//! Tick-based key handling for terminal environments.
//!
//! Horizontal movement and soft drop use DAS/ARR repeat; rotate and hold are
//! throttled so terminal autorepeat cannot spin a held key. Terminals that
//! never emit key release events are handled with a short auto-release
//! timeout.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{
    GameAction, ARR_TICKS, DAS_TICKS, HOLD_DELAY_TICKS, ROTATE_DELAY_TICKS,
    SOFT_DROP_PERIOD_TICKS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Ticks without a fresh key event before a held direction is considered
/// released. Covers terminals with no key-release reporting.
const RELEASE_TIMEOUT_TICKS: u32 = 9;

/// Tracks held keys and repeat timers; all timing is in simulation ticks.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    ticks_since_key: u32,
    horizontal_das_timer: u32,
    down_timer: u32,
    rotate_cooldown: u32,
    hold_cooldown: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            ticks_since_key: 0,
            horizontal_das_timer: 0,
            down_timer: 0,
            rotate_cooldown: 0,
            hold_cooldown: 0,
        }
    }

    /// Translate a key event into at most one immediate action, updating
    /// held-key state for later repeats.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.ticks_since_key = 0;
                if self.horizontal == HorizontalDirection::Left {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Left;
                    self.horizontal_das_timer = 0;
                    Some(GameAction::MoveLeft)
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.ticks_since_key = 0;
                if self.horizontal == HorizontalDirection::Right {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Right;
                    self.horizontal_das_timer = 0;
                    Some(GameAction::MoveRight)
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.ticks_since_key = 0;
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_timer = 0;
                    Some(GameAction::SoftDrop)
                }
            }
            KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => {
                self.throttled(GameAction::RotateCw)
            }
            KeyCode::Char('z') | KeyCode::Char('Z') => self.throttled(GameAction::RotateCcw),
            KeyCode::Char('c') | KeyCode::Char('C') => self.throttled(GameAction::Hold),
            KeyCode::Char(' ') => Some(GameAction::HardDrop),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),
            _ => None,
        }
    }

    fn throttled(&mut self, action: GameAction) -> Option<GameAction> {
        let cooldown = match action {
            GameAction::Hold => &mut self.hold_cooldown,
            _ => &mut self.rotate_cooldown,
        };
        if *cooldown > 0 {
            return None;
        }
        *cooldown = match action {
            GameAction::Hold => HOLD_DELAY_TICKS,
            _ => ROTATE_DELAY_TICKS,
        };
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                if self.horizontal == HorizontalDirection::Left {
                    self.horizontal = HorizontalDirection::None;
                    self.horizontal_das_timer = 0;
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.horizontal == HorizontalDirection::Right {
                    self.horizontal = HorizontalDirection::None;
                    self.horizontal_das_timer = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.down_held = false;
                self.down_timer = 0;
            }
            _ => {}
        }
    }

    /// Advance one tick and emit any repeat actions due.
    pub fn update(&mut self) -> ArrayVec<GameAction, 4> {
        let mut actions = ArrayVec::new();

        self.rotate_cooldown = self.rotate_cooldown.saturating_sub(1);
        self.hold_cooldown = self.hold_cooldown.saturating_sub(1);

        // Auto-release when the terminal does not emit release events.
        self.ticks_since_key += 1;
        if self.ticks_since_key > RELEASE_TIMEOUT_TICKS {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_das_timer = 0;
            self.down_held = false;
            self.down_timer = 0;
        }

        match self.horizontal {
            HorizontalDirection::Left | HorizontalDirection::Right => {
                self.horizontal_das_timer += 1;
                if self.horizontal_das_timer >= DAS_TICKS
                    && (self.horizontal_das_timer - DAS_TICKS) % ARR_TICKS == 0
                {
                    let action = if self.horizontal == HorizontalDirection::Left {
                        GameAction::MoveLeft
                    } else {
                        GameAction::MoveRight
                    };
                    let _ = actions.try_push(action);
                }
            }
            HorizontalDirection::None => {}
        }

        if self.down_held {
            self.down_timer += 1;
            if self.down_timer % SOFT_DROP_PERIOD_TICKS == 0 {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
