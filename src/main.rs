//! Terminal Tetris runner.
//!
//! Fixed 60 Hz loop: drain input until the tick boundary, advance the
//! simulation once, redraw. `--demo` starts in attract mode; any key hands
//! the board to the player, and an idle game-over screen drifts back into
//! demo play.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use kiosk_tetris::core::{Game, Ranking};
use kiosk_tetris::engine::AutoPlayer;
use kiosk_tetris::input::InputHandler;
use kiosk_tetris::term::{GameView, Screen, Viewport};
use kiosk_tetris::types::{GameAction, DEMO_IDLE_TICKS, TICKS_PER_SECOND};

fn main() -> Result<()> {
    let demo = std::env::args().any(|arg| arg == "--demo");

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, demo);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x5eed)
}

fn restart(game: &mut Game, auto: &mut AutoPlayer, input: &mut InputHandler, demo: bool) {
    game.reset();
    auto.clear();
    input.reset();
    game.start(demo);
}

fn run(screen: &mut Screen, demo: bool) -> Result<()> {
    let mut game = Game::new(seed_from_clock());
    let mut ranking = Ranking::default();
    let mut auto = AutoPlayer::new();
    let mut input = InputHandler::new();
    let view = GameView::new();

    game.start(demo);

    let tick = Duration::from_micros(1_000_000 / TICKS_PER_SECOND as u64);
    let mut next_tick = Instant::now() + tick;
    let mut idle_ticks: u32 = 0;
    let mut score_recorded = false;

    loop {
        // Drain input until the next tick boundary.
        while event::poll(next_tick.saturating_duration_since(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        idle_ticks = 0;
                        if key.code == KeyCode::Esc {
                            return Ok(());
                        }

                        if game.is_game_over() {
                            if let KeyCode::Char('r' | 'R') = key.code {
                                restart(&mut game, &mut auto, &mut input, false);
                                score_recorded = false;
                            }
                            continue;
                        }

                        if game.is_auto_play() {
                            // Any key takes the board back from the demo.
                            restart(&mut game, &mut auto, &mut input, false);
                            score_recorded = false;
                            continue;
                        }

                        if let Some(action) = input.handle_key_press(key.code) {
                            if action == GameAction::Reset {
                                restart(&mut game, &mut auto, &mut input, false);
                                score_recorded = false;
                            } else {
                                game.apply(action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; DAS/ARR repeats
                        // internally.
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(..) => {}
                _ => {}
            }
        }
        next_tick += tick;

        game.update();
        if game.is_auto_play() {
            auto.update(&mut game);
        } else {
            for action in input.update() {
                game.apply(action);
            }
        }

        if game.is_game_over() {
            if !score_recorded {
                score_recorded = true;
                if !game.is_auto_play() && ranking.would_rank(game.score()) {
                    ranking.add_entry("YOU", game.score(), game.lines());
                }
            }
            idle_ticks += 1;
            if idle_ticks >= DEMO_IDLE_TICKS {
                restart(&mut game, &mut auto, &mut input, true);
                score_recorded = false;
                idle_ticks = 0;
            }
        }

        let (width, height) = Screen::size().unwrap_or((80, 24));
        let frame = view.render(&game, &ranking, Viewport::new(width, height));
        screen.draw(&frame)?;
    }
}
