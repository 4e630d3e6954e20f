//! Symbolic chess facts to brick sequences.
//!
//! Everything here is pure: the same board or move always compiles to the
//! same sequence, and nothing touches the filesystem or the RNG.

use crate::audio::brick_catalog::{Action, BrickId, BrickSequence, Phrase, Silence};
use crate::errors::{CardError, CardResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::puzzles::puzzle_types::{Puzzle, PuzzleFact};
use crate::utils::algebraic::algebraic_to_square;

/// White then Black: the color, a pause, then every piece of that color in
/// ascending square order, each followed by a short pause.
pub fn board_narration(board: &Board) -> BrickSequence {
    let mut seq = BrickSequence::new();
    for color in Color::ALL {
        seq.push(BrickId::color(color));
        seq.push(BrickId::silence(Silence::Medium));
        for square in board.squares_of(color) {
            let Some(piece) = board.piece_at(square) else {
                continue;
            };
            seq.push(BrickId::piece(piece.kind));
            seq.push(BrickId::square(square));
            seq.push(BrickId::silence(Silence::Short));
        }
    }
    seq
}

#[inline]
pub fn turn_indicator(side_to_move: Color) -> BrickId {
    BrickId::phrase(Phrase::to_move(side_to_move))
}

/// Compiles a SAN string.
///
/// Check and mate markers are dropped. Pawn moves open with `piece_pawn`,
/// piece moves with the plural piece brick. Captures add
/// `action_captures`, then the destination square follows. A promotion
/// suffix is narrated after the square as `action_promotes piece_<name>`.
/// Castling has no narration.
pub fn move_narration(san: &str) -> CardResult<BrickSequence> {
    let unsupported = || CardError::UnsupportedMove(san.to_owned());

    let trimmed = san.trim().trim_end_matches(['+', '#']);
    if !trimmed.is_ascii() || trimmed.starts_with('O') || trimmed.starts_with('0') {
        return Err(unsupported());
    }

    let (body, promotion) = match trimmed.split_once('=') {
        Some((body, promo)) => (body, Some(promo)),
        None => (trimmed, None),
    };

    let first = body.chars().next().ok_or_else(unsupported)?;
    let mut seq = BrickSequence::new();

    if first.is_ascii_lowercase() {
        seq.push(BrickId::piece(PieceKind::Pawn));
    } else {
        let kind = PieceKind::from_san_letter(first).ok_or_else(unsupported)?;
        seq.push(BrickId::piece_plural(kind));
    }

    if body.contains('x') {
        seq.push(BrickId::action(Action::Captures));
    }

    let destination = body
        .get(body.len().saturating_sub(2)..)
        .filter(|dest| dest.len() == 2)
        .ok_or_else(unsupported)?;
    let square = algebraic_to_square(destination).map_err(|_| unsupported())?;
    seq.push(BrickId::square(square));

    if let Some(promo) = promotion {
        let kind = promo
            .chars()
            .next()
            .and_then(PieceKind::from_san_letter)
            .filter(|kind| *kind != PieceKind::King)
            .ok_or_else(unsupported)?;
        seq.push(BrickId::action(Action::Promotes));
        seq.push(BrickId::piece(kind));
    }

    Ok(seq)
}

/// `phrase_light_squared` or `phrase_dark_squared` for a bishop on `square`.
#[inline]
pub fn bishop_shade_phrase(square: Square) -> BrickId {
    BrickId::phrase(Phrase::squared(SquareShade::of(square)))
}

/// Each square followed by a short pause, ascending.
pub fn square_list(squares: &[Square]) -> BrickSequence {
    let mut sorted = squares.to_vec();
    sorted.sort_unstable();

    let mut seq = BrickSequence::with_capacity(sorted.len() * 2);
    for square in sorted {
        seq.push(BrickId::square(square));
        seq.push(BrickId::silence(Silence::Short));
    }
    seq
}

/// "[light squared] white bishop" style identification of the piece on
/// `square`.
pub fn piece_identity(square: Square, piece: Piece) -> BrickSequence {
    let mut seq = BrickSequence::with_capacity(3);
    if piece.kind == PieceKind::Bishop {
        seq.push(bishop_shade_phrase(square));
    }
    seq.push(BrickId::color(piece.color));
    seq.push(BrickId::piece(piece.kind));
    seq
}

/// Narration of the question a [`PuzzleFact`] asks, without the board.
pub fn query_narration(fact: &PuzzleFact) -> BrickSequence {
    match fact {
        PuzzleFact::Capture { .. } => BrickSequence::new(),
        PuzzleFact::PieceOnSquare { square, .. } => vec![
            BrickId::phrase(Phrase::WhatPieceIsOn),
            BrickId::square(*square),
        ],
        PuzzleFact::PieceLocations {
            color,
            kind,
            shade,
            squares,
        } => {
            let several = squares.len() > 1;
            let mut seq = vec![
                BrickId::phrase(if several {
                    Phrase::WhereAreThe
                } else {
                    Phrase::WhereIsThe
                }),
                BrickId::color(*color),
            ];
            if let Some(shade) = shade {
                seq.push(BrickId::phrase(Phrase::squared(*shade)));
            }
            seq.push(if several {
                BrickId::piece_plural(*kind)
            } else {
                BrickId::piece(*kind)
            });
            seq
        }
        PuzzleFact::SquareColor { square, .. } => vec![
            BrickId::phrase(Phrase::WhatColorIs),
            BrickId::square(*square),
        ],
    }
}

/// Full question audio for a puzzle.
pub fn compile_question(puzzle: &Puzzle) -> BrickSequence {
    match &puzzle.fact {
        PuzzleFact::Capture { .. } => {
            let mut seq = board_narration(&puzzle.board);
            seq.push(turn_indicator(puzzle.board.side_to_move));
            seq
        }
        PuzzleFact::PieceOnSquare { .. } | PuzzleFact::PieceLocations { .. } => {
            let mut seq = board_narration(&puzzle.board);
            seq.extend(query_narration(&puzzle.fact));
            seq
        }
        PuzzleFact::SquareColor { .. } => query_narration(&puzzle.fact),
    }
}

/// Full answer audio for a puzzle.
pub fn compile_answer(puzzle: &Puzzle) -> CardResult<BrickSequence> {
    Ok(match &puzzle.fact {
        PuzzleFact::Capture { san, .. } => move_narration(san)?,
        PuzzleFact::PieceOnSquare { square, piece } => piece_identity(*square, *piece),
        PuzzleFact::PieceLocations { squares, .. } if squares.len() == 1 => {
            vec![BrickId::square(squares[0])]
        }
        PuzzleFact::PieceLocations { squares, .. } => square_list(squares),
        PuzzleFact::SquareColor { shade, .. } => vec![BrickId::shade(*shade)],
    })
}
