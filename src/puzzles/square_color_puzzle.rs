//! "What color is e4?" cards. The board is empty; only the square matters.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_state::{board::Board, chess_types::*};
use crate::puzzles::puzzle_types::{Puzzle, PuzzleFact, SquareColorSpec};
use crate::utils::algebraic::ALL_SQUARES;

pub fn square_color_puzzle(spec: &SquareColorSpec) -> Puzzle {
    Puzzle {
        board: Board::empty(),
        fact: PuzzleFact::SquareColor {
            square: spec.square,
            shade: SquareShade::of(spec.square),
        },
    }
}

/// Every square once, in random order.
pub fn shuffled_squares<R: Rng + ?Sized>(rng: &mut R) -> Vec<Square> {
    let mut squares = ALL_SQUARES.to_vec();
    squares.shuffle(rng);
    squares
}
