//! Full game lifecycle through the public API.

use kiosk_tetris::core::Game;
use kiosk_tetris::types::{GameAction, COUNTDOWN_TICKS, INACTIVITY_LIMIT_TICKS};

fn started_game(seed: u32) -> Game {
    let mut game = Game::new(seed);
    game.start(false);
    for _ in 0..COUNTDOWN_TICKS {
        game.update();
    }
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(12345);
    assert!(!game.started());
    assert!(game.current().is_none());

    game.start(false);
    assert!(game.started());
    assert!(game.countdown_active());

    for _ in 0..COUNTDOWN_TICKS {
        game.update();
    }
    assert!(!game.countdown_active());
    assert!(game.current().is_some());
    assert_eq!(game.next_preview().len(), 2);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
}

#[test]
fn test_actions_move_the_active_piece() {
    let mut game = started_game(12345);
    let initial_x = game.current().unwrap().x;

    if game.apply(GameAction::MoveLeft) {
        assert_eq!(game.current().unwrap().x, initial_x - 1);
    }

    let y_before = game.current().unwrap().y;
    assert!(game.apply(GameAction::SoftDrop));
    assert_eq!(game.current().unwrap().y, y_before + 1);
}

#[test]
fn test_hard_drop_locks_and_spawns_the_next_piece() {
    let mut game = started_game(7);
    let serial = game.piece_serial();
    let score = game.score();

    assert!(game.apply(GameAction::HardDrop));
    assert!(game.piece_serial() > serial);
    assert!(game.score() > score, "hard drop should award fall points");
}

#[test]
fn test_hold_is_single_use_per_piece() {
    let mut game = started_game(9);
    assert!(game.hold_piece().is_none());

    assert!(game.apply(GameAction::Hold));
    assert!(game.hold_piece().is_some());
    assert!(!game.apply(GameAction::Hold));

    // The next lock re-arms the hold.
    game.apply(GameAction::HardDrop);
    assert!(game.apply(GameAction::Hold));
}

#[test]
fn test_stacking_out_ends_the_game_after_the_grace_window() {
    let mut game = started_game(3);

    for _ in 0..300 {
        game.apply(GameAction::HardDrop);
        if game.game_over_triggered() {
            break;
        }
    }
    assert!(game.game_over_triggered(), "stack never topped out");
    assert!(!game.is_game_over());

    for _ in 0..INACTIVITY_LIMIT_TICKS {
        game.update();
    }
    assert!(game.is_game_over());
}

#[test]
fn test_reset_starts_a_fresh_game() {
    let mut game = started_game(4);
    game.apply(GameAction::HardDrop);
    assert!(game.score() > 0);

    assert!(game.apply(GameAction::Reset));
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert!(!game.started());

    game.start(false);
    for _ in 0..COUNTDOWN_TICKS {
        game.update();
    }
    assert!(game.current().is_some());
}

#[test]
fn test_same_seed_replays_identically() {
    let mut a = started_game(42);
    let mut b = started_game(42);

    for _ in 0..10 {
        a.apply(GameAction::HardDrop);
        b.apply(GameAction::HardDrop);
    }

    assert_eq!(a.score(), b.score());
    assert_eq!(a.lines(), b.lines());
    assert_eq!(a.current().map(|p| p.id()), b.current().map(|p| p.id()));
}
