//! Rejection sampler for "find the capture" puzzles.
//!
//! A position holds both kings, one defender and one attacker. Kings and the
//! defender are drawn first; attacker squares are then probed in random order
//! until one yields a legal position with a legal capture. If none does, the
//! whole position is thrown away and redrawn, up to `max_attempts` times.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::errors::{CardError, CardResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_checks::{is_check, king_distance};
use crate::move_generation::legal_move_generator::find_legal_move;
use crate::puzzles::puzzle_types::{CaptureSpec, Puzzle, PuzzleFact};
use crate::utils::algebraic::ALL_SQUARES;
use crate::utils::san::move_to_san;

/// Samples a board and capture for `spec`. The returned board has the
/// attacker to move.
pub fn generate_capture_position<R: Rng + ?Sized>(
    spec: &CaptureSpec,
    rng: &mut R,
    max_attempts: u32,
) -> CardResult<(Board, ChessMove)> {
    spec.validate()?;

    let attacker = Piece::new(spec.attacker, spec.attacker_color);
    let defender = Piece::new(spec.defender, spec.defender_color());

    for attempt in 1..=max_attempts {
        let kings = place_kings(rng);

        let defender_square = *free_squares(&kings)
            .choose(rng)
            .ok_or_else(|| CardError::Board("no free square for the defender".to_owned()))?;
        let base = kings.with_piece(defender_square, defender);

        let mut candidates = free_squares(&base);
        candidates.shuffle(rng);

        for attacker_square in candidates {
            let probe = base.with_piece(attacker_square, attacker);

            // The side that is not moving may never stand in check.
            if is_check(&probe.with_side_to_move(defender.color)) {
                continue;
            }

            let position = probe.with_side_to_move(attacker.color);
            if let Some(capture) = find_legal_move(&position, attacker_square, defender_square, None)
            {
                log::trace!("capture position found on attempt {attempt}");
                return Ok((position, capture));
            }
        }
    }

    Err(CardError::SamplingExhaustion {
        attempts: max_attempts,
    })
}

/// Samples a capture position and wraps it as a [`Puzzle`] carrying the SAN
/// of the capture.
pub fn sample_capture_puzzle<R: Rng + ?Sized>(
    spec: &CaptureSpec,
    rng: &mut R,
    max_attempts: u32,
) -> CardResult<Puzzle> {
    let (board, mv) = generate_capture_position(spec, rng, max_attempts)?;
    let san = move_to_san(&board, &mv).map_err(CardError::Board)?;
    Ok(Puzzle {
        board,
        fact: PuzzleFact::Capture { mv, san },
    })
}

/// Draws king squares uniformly until they are not adjacent.
fn place_kings<R: Rng + ?Sized>(rng: &mut R) -> Board {
    loop {
        let white_king = rng.random_range(0..64u8);
        let mut black_king = rng.random_range(0..63u8);
        if black_king >= white_king {
            black_king += 1;
        }

        if king_distance(white_king, black_king) > 1 {
            return Board::empty()
                .with_piece(white_king, Piece::new(PieceKind::King, Color::White))
                .with_piece(black_king, Piece::new(PieceKind::King, Color::Black));
        }
    }
}

fn free_squares(board: &Board) -> Vec<Square> {
    ALL_SQUARES
        .into_iter()
        .filter(|sq| !board.is_occupied(*sq))
        .collect()
}
