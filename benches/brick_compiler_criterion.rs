use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chess_audio_cards::audio::brick_compiler::{board_narration, move_narration};
use chess_audio_cards::audio::brick_library::InMemoryBricks;
use chess_audio_cards::audio::compositor::compose;
use chess_audio_cards::puzzles::memory_puzzle::generate_memory_board;
use chess_audio_cards::puzzles::puzzle_types::MemorySpec;

const SAN_CASES: &[&str] = &["Nxd5", "fxg6+", "Qxh7#", "exd8=Q+", "Rae1", "e4"];

fn bench_move_narration(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_narration");
    group.throughput(Throughput::Elements(SAN_CASES.len() as u64));
    group.bench_function("san_mix", |b| {
        b.iter(|| {
            for san in SAN_CASES {
                let seq = move_narration(black_box(san)).expect("SAN should compile");
                black_box(seq);
            }
        });
    });
    group.finish();
}

fn bench_board_narration_and_compose(c: &mut Criterion) {
    let board = generate_memory_board(&MemorySpec { piece_count: 32 }, &mut StdRng::seed_from_u64(7))
        .expect("memory sampling should succeed");
    let bricks = InMemoryBricks::silent_catalog(0.25, 22_050);
    let seq = board_narration(&board);

    c.bench_function("board_narration_32", |b| {
        b.iter(|| black_box(board_narration(black_box(&board))))
    });

    c.bench_function("compose_32_piece_board", |b| {
        b.iter(|| {
            let clip = compose(black_box(&seq), &bricks).expect("all bricks present");
            black_box(clip.frames())
        })
    });
}

criterion_group!(
    compiler_benches,
    bench_move_narration,
    bench_board_narration_and_compose
);
criterion_main!(compiler_benches);
