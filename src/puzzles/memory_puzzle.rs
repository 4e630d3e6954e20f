//! Random boards for memorization cards and the question asked about them.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::errors::{CardError, CardResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::puzzles::puzzle_types::{MemorySpec, Puzzle, PuzzleFact};
use crate::utils::algebraic::ALL_SQUARES;

pub const MAX_PIECES_PER_COLOR: u32 = 16;

/// Places `spec.piece_count` random pieces with at least one king per color.
///
/// Squares are consumed from a shuffled deck. A draw is dropped (and its
/// square burned) when it would push its color past
/// [`MAX_PIECES_PER_COLOR`]; a color still missing its king keeps one slot in
/// reserve. The last two placements are forced to the missing kings.
pub fn generate_memory_board<R: Rng + ?Sized>(spec: &MemorySpec, rng: &mut R) -> CardResult<Board> {
    spec.validate()?;

    let target = u32::from(spec.piece_count);
    let palette = Piece::all();

    let mut squares = ALL_SQUARES.to_vec();
    squares.shuffle(rng);

    let mut board = Board::empty();
    let mut placed = 0u32;

    while placed < target {
        let Some(square) = squares.pop() else {
            break;
        };

        let mut piece = palette[rng.random_range(0..palette.len())];
        if placed + 2 == target && !board.has_king(Color::White) {
            piece = Piece::new(PieceKind::King, Color::White);
        }
        if placed + 1 == target && !board.has_king(Color::Black) {
            piece = Piece::new(PieceKind::King, Color::Black);
        }

        if !fits_color_cap(&board, piece) || board.is_occupied(square) {
            continue;
        }

        board = board.with_piece(square, piece);
        placed += 1;
    }

    for color in Color::ALL {
        if !board.has_king(color) {
            board = place_missing_king(board, color, &mut squares, rng)?;
        }
    }

    log::debug!("memory board ({} pieces): {}", board.total_pieces(), board.fen());
    Ok(board)
}

/// Picks one occupied square and asks either what stands on it or where all
/// pieces of the same kind and color stand.
pub fn choose_memory_query<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> CardResult<PuzzleFact> {
    let ask_for_piece = rng.random_bool(0.5);
    let occupied = board.occupied();
    let &(square, piece) = occupied
        .choose(rng)
        .ok_or_else(|| CardError::Board("memory board is empty".to_owned()))?;

    if ask_for_piece {
        return Ok(PuzzleFact::PieceOnSquare { square, piece });
    }

    let shade = (piece.kind == PieceKind::Bishop).then(|| SquareShade::of(square));
    let squares = board
        .squares_of_kind(piece.color, piece.kind)
        .into_iter()
        .filter(|sq| shade.map_or(true, |shade| SquareShade::of(*sq) == shade))
        .collect();

    Ok(PuzzleFact::PieceLocations {
        color: piece.color,
        kind: piece.kind,
        shade,
        squares,
    })
}

pub fn sample_memory_puzzle<R: Rng + ?Sized>(spec: &MemorySpec, rng: &mut R) -> CardResult<Puzzle> {
    let board = generate_memory_board(spec, rng)?;
    let fact = choose_memory_query(&board, rng)?;
    Ok(Puzzle { board, fact })
}

fn fits_color_cap(board: &Board, piece: Piece) -> bool {
    let reserved = u32::from(piece.kind != PieceKind::King && !board.has_king(piece.color));
    board.count(piece.color) + reserved < MAX_PIECES_PER_COLOR
}

fn place_missing_king<R: Rng + ?Sized>(
    board: Board,
    color: Color,
    squares: &mut Vec<Square>,
    rng: &mut R,
) -> CardResult<Board> {
    let king = Piece::new(PieceKind::King, color);

    if let Some(square) = squares.pop() {
        return Ok(board.with_piece(square, king));
    }

    // Deck exhausted: evict a random non-king piece.
    let victims: Vec<Square> = board
        .occupied()
        .into_iter()
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .map(|(sq, _)| sq)
        .collect();
    let &square = victims
        .choose(rng)
        .ok_or(CardError::SamplingExhaustion { attempts: 1 })?;
    log::debug!("no free square left for the {} king, replacing a piece", color.name());
    Ok(board.with_piece(square, king))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{
        choose_memory_query, generate_memory_board, place_missing_king, sample_memory_puzzle,
        MAX_PIECES_PER_COLOR,
    };
    use crate::errors::CardError;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, SquareShade};
    use crate::puzzles::puzzle_types::{MemorySpec, PuzzleFact};
    use crate::utils::fen::parse_fen;

    #[test]
    fn two_pieces_are_exactly_the_kings() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = generate_memory_board(&MemorySpec { piece_count: 2 }, &mut rng)
                .expect("two-piece boards always sample");
            assert_eq!(board.total_pieces(), 2);
            assert!(board.has_king(Color::White));
            assert!(board.has_king(Color::Black));
        }
    }

    #[test]
    fn missing_king_replaces_a_piece_when_no_square_is_free() {
        let board = parse_fen("8/8/8/8/8/8/8/rnb1K3 w - - 0 1").expect("FEN should parse");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placed = place_missing_king(board, Color::Black, &mut Vec::new(), &mut rng)
                .expect("a non-king piece can be replaced");

            assert_eq!(placed.total_pieces(), board.total_pieces());
            assert!(placed.has_king(Color::Black));
            assert_eq!(placed.king_square(Color::White), Some(4));
            let king = placed.king_square(Color::Black).expect("black king placed");
            assert!(king < 3, "king landed on {king}");
        }

        let kings_only = parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let err = place_missing_king(
            kings_only,
            Color::Black,
            &mut Vec::new(),
            &mut StdRng::seed_from_u64(0),
        )
        .expect_err("nothing to replace");
        assert!(matches!(err, CardError::SamplingExhaustion { .. }));
    }

    #[test]
    fn every_piece_count_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..=32u8 {
            for _ in 0..10 {
                let board = generate_memory_board(&MemorySpec { piece_count: n }, &mut rng)
                    .expect("valid piece counts always sample");
                assert!(board.total_pieces() <= u32::from(n), "n={n} fen={}", board.fen());
                for color in Color::ALL {
                    assert!(board.count(color) <= MAX_PIECES_PER_COLOR);
                    assert!(board.has_king(color), "n={n} fen={}", board.fen());
                }
            }
        }
    }

    #[test]
    fn out_of_range_counts_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [0u8, 1, 33, 64] {
            let err = generate_memory_board(&MemorySpec { piece_count: n }, &mut rng)
                .expect_err("count outside [2, 32]");
            assert!(matches!(err, CardError::InvalidSpec(_)));
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        let spec = MemorySpec { piece_count: 12 };
        let first = generate_memory_board(&spec, &mut StdRng::seed_from_u64(99)).expect("samples");
        let second = generate_memory_board(&spec, &mut StdRng::seed_from_u64(99)).expect("samples");
        assert_eq!(first, second);
    }

    #[test]
    fn location_queries_list_matching_pieces() {
        // Two white knights, two white bishops on opposite shades.
        let board = parse_fen("4k3/8/8/8/8/8/8/1NB1KBN1 w - - 0 1").expect("FEN should parse");

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            match choose_memory_query(&board, &mut rng).expect("board is not empty") {
                PuzzleFact::PieceOnSquare { square, piece } => {
                    assert_eq!(board.piece_at(square), Some(piece));
                }
                PuzzleFact::PieceLocations {
                    color,
                    kind,
                    shade,
                    squares,
                } => match kind {
                    PieceKind::Knight => {
                        assert_eq!(color, Color::White);
                        assert_eq!(squares, vec![1, 6]);
                        assert!(shade.is_none());
                    }
                    PieceKind::Bishop => {
                        let shade = shade.expect("bishop queries carry a shade");
                        assert_eq!(squares.len(), 1);
                        assert_eq!(SquareShade::of(squares[0]), shade);
                    }
                    PieceKind::King => assert_eq!(squares.len(), 1),
                    other => panic!("no {other:?} on this board"),
                },
                other => panic!("unexpected fact {other:?}"),
            }
        }
    }

    #[test]
    fn sampled_puzzle_fact_matches_board() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..40 {
            let puzzle = sample_memory_puzzle(&MemorySpec { piece_count: 8 }, &mut rng)
                .expect("puzzle should sample");
            match puzzle.fact {
                PuzzleFact::PieceOnSquare { square, piece } => {
                    assert_eq!(puzzle.board.piece_at(square), Some(piece));
                }
                PuzzleFact::PieceLocations { color, kind, squares, .. } => {
                    assert!(!squares.is_empty());
                    for sq in squares {
                        assert_eq!(puzzle.board.piece_at(sq), Some(Piece::new(kind, color)));
                    }
                }
                other => panic!("unexpected fact {other:?}"),
            }
        }
    }
}
