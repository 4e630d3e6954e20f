//! Inputs and outputs of the position samplers.

use crate::errors::{CardError, CardResult};
use crate::game_state::{board::Board, chess_types::*};

pub const MIN_MEMORY_PIECES: u8 = 2;
pub const MAX_MEMORY_PIECES: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSpec {
    pub attacker_color: Color,
    pub attacker: PieceKind,
    pub defender: PieceKind,
}

impl CaptureSpec {
    pub fn validate(&self) -> CardResult<()> {
        if self.attacker == PieceKind::King || self.defender == PieceKind::King {
            return Err(CardError::InvalidSpec(format!(
                "capture puzzles need non-king pieces, got {} takes {}",
                self.attacker.name(),
                self.defender.name()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn defender_color(&self) -> Color {
        self.attacker_color.opposite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySpec {
    pub piece_count: u8,
}

impl MemorySpec {
    pub fn validate(&self) -> CardResult<()> {
        if !(MIN_MEMORY_PIECES..=MAX_MEMORY_PIECES).contains(&self.piece_count) {
            return Err(CardError::InvalidSpec(format!(
                "number of pieces must be between {MIN_MEMORY_PIECES} and {MAX_MEMORY_PIECES}, got {}",
                self.piece_count
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareColorSpec {
    pub square: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleSpec {
    Capture(CaptureSpec),
    Memory(MemorySpec),
    SquareColor(SquareColorSpec),
}

impl PuzzleSpec {
    pub fn validate(&self) -> CardResult<()> {
        match self {
            PuzzleSpec::Capture(spec) => spec.validate(),
            PuzzleSpec::Memory(spec) => spec.validate(),
            PuzzleSpec::SquareColor(spec) if spec.square > 63 => Err(CardError::InvalidSpec(
                format!("square index {} is off the board", spec.square),
            )),
            PuzzleSpec::SquareColor(_) => Ok(()),
        }
    }
}

/// The fact a card asks about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleFact {
    /// Find the capture `mv` (formatted as `san`).
    Capture { mv: ChessMove, san: String },
    /// Name the piece standing on `square`.
    PieceOnSquare { square: Square, piece: Piece },
    /// List where `color`'s pieces of `kind` stand. Bishops carry the shade
    /// that singles them out; `squares` is ascending.
    PieceLocations {
        color: Color,
        kind: PieceKind,
        shade: Option<SquareShade>,
        squares: Vec<Square>,
    },
    /// Name the shade of `square`.
    SquareColor { square: Square, shade: SquareShade },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub board: Board,
    pub fact: PuzzleFact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_spec_bounds_are_inclusive() {
        assert!(MemorySpec { piece_count: 2 }.validate().is_ok());
        assert!(MemorySpec { piece_count: 32 }.validate().is_ok());
        assert!(matches!(
            MemorySpec { piece_count: 1 }.validate(),
            Err(CardError::InvalidSpec(_))
        ));
        assert!(matches!(
            MemorySpec { piece_count: 33 }.validate(),
            Err(CardError::InvalidSpec(_))
        ));
    }

    #[test]
    fn capture_spec_rejects_kings() {
        let spec = CaptureSpec {
            attacker_color: Color::White,
            attacker: PieceKind::King,
            defender: PieceKind::Pawn,
        };
        assert!(matches!(spec.validate(), Err(CardError::InvalidSpec(_))));
        assert!(PuzzleSpec::Capture(spec).validate().is_err());
    }

    #[test]
    fn square_color_spec_checks_range() {
        assert!(PuzzleSpec::SquareColor(SquareColorSpec { square: 63 }).validate().is_ok());
        assert!(PuzzleSpec::SquareColor(SquareColorSpec { square: 64 }).validate().is_err());
    }
}
