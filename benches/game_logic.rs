use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiosk_tetris::core::{Board, Game, Piece};
use kiosk_tetris::engine::{evaluate, find_best_placement};
use kiosk_tetris::types::{PieceId, PieceKind, COUNTDOWN_TICKS};

fn started_game() -> Game {
    let mut game = Game::new(12345);
    game.start(false);
    for _ in 0..COUNTDOWN_TICKS {
        game.update();
    }
    game
}

fn bench_update(c: &mut Criterion) {
    let mut game = started_game();

    c.bench_function("game_update", |b| {
        b.iter(|| {
            game.update();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceId::Standard(PieceKind::I)));
                }
            }
            black_box(board.clear_lines());
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..9 {
        for y in 14..20 {
            if (x + y) % 3 != 0 {
                board.set(x, y, Some(PieceId::Standard(PieceKind::L)));
            }
        }
    }

    c.bench_function("evaluate_board", |b| {
        b.iter(|| {
            black_box(evaluate(black_box(&board)));
        })
    });
}

fn bench_placement_search(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..7 {
        board.set(x, 19, Some(PieceId::Standard(PieceKind::J)));
    }
    let mut piece = Piece::standard(PieceKind::T);
    piece.x = 3;
    piece.y = 0;

    c.bench_function("find_best_placement", |b| {
        b.iter(|| {
            black_box(find_best_placement(black_box(&board), black_box(&piece)));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = started_game();

    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            game.rotate(black_box(true));
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_line_clear,
    bench_evaluate,
    bench_placement_search,
    bench_rotate
);
criterion_main!(benches);
