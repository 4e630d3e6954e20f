//! Written side of each card.

use crate::game_state::{board::Board, chess_types::*};
use crate::puzzles::puzzle_types::{Puzzle, PuzzleFact};
use crate::utils::algebraic::square_name;

/// "White: King on e1 Knight on c3 Black: Pawn on d5 King on e8". With
/// `with_on` unset the word "on" is left out.
pub fn board_text(board: &Board, with_on: bool) -> String {
    let mut parts = Vec::new();
    for color in Color::ALL {
        parts.push(format!("{}:", color.title()));
        for (square, piece) in board
            .occupied()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
        {
            if with_on {
                parts.push(format!("{} on {}", piece.kind.title(), square_name(square)));
            } else {
                parts.push(format!("{} {}", piece.kind.title(), square_name(square)));
            }
        }
    }
    parts.join(" ")
}

pub fn to_move_text(color: Color) -> String {
    format!("{} to move", color.title())
}

/// The question asked about the fact, without the board.
pub fn query_text(fact: &PuzzleFact) -> String {
    match fact {
        PuzzleFact::Capture { .. } => String::new(),
        PuzzleFact::PieceOnSquare { square, .. } => {
            format!("What piece is on {}?", square_name(*square))
        }
        PuzzleFact::PieceLocations {
            color,
            kind,
            shade,
            squares,
        } => {
            let several = squares.len() > 1;
            let verb = if several { "are" } else { "is" };
            let noun = if several { kind.plural_name() } else { kind.name() };
            match shade {
                Some(shade) => format!(
                    "Where {verb} the {} {} squared {noun}?",
                    color.title(),
                    shade.name()
                ),
                None => format!("Where {verb} the {} {noun}?", color.title()),
            }
        }
        PuzzleFact::SquareColor { square, .. } => {
            format!("What color is {}?", square_name(*square))
        }
    }
}

pub fn question_text(puzzle: &Puzzle) -> String {
    match &puzzle.fact {
        PuzzleFact::Capture { .. } => format!(
            "{} {}",
            board_text(&puzzle.board, true),
            to_move_text(puzzle.board.side_to_move)
        ),
        PuzzleFact::PieceOnSquare { .. } | PuzzleFact::PieceLocations { .. } => format!(
            "{} --- {}",
            board_text(&puzzle.board, false),
            query_text(&puzzle.fact)
        ),
        PuzzleFact::SquareColor { .. } => query_text(&puzzle.fact),
    }
}

pub fn answer_text(fact: &PuzzleFact) -> String {
    match fact {
        PuzzleFact::Capture { san, .. } => san.clone(),
        PuzzleFact::PieceOnSquare { square, piece } if piece.kind == PieceKind::Bishop => format!(
            "{} {}-squared bishop",
            piece.color.title(),
            SquareShade::of(*square).title()
        ),
        PuzzleFact::PieceOnSquare { piece, .. } => {
            format!("{} {}", piece.color.title(), piece.kind.title())
        }
        PuzzleFact::PieceLocations { squares, .. } => {
            let mut sorted = squares.clone();
            sorted.sort_unstable();
            sorted
                .into_iter()
                .map(square_name)
                .collect::<Vec<_>>()
                .join(", ")
        }
        PuzzleFact::SquareColor { shade, .. } => shade.title().to_owned(),
    }
}
