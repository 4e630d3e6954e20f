//! Value-semantics board used by every puzzle sampler.
//!
//! `Board` is `Copy`: placing a piece or flipping the side to move returns a
//! new board, so candidate probes during rejection sampling never leak state
//! into the next attempt.

use crate::game_state::chess_types::*;
use crate::utils::fen::generate_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy with `piece` on `square`, replacing whatever stood there.
    #[must_use]
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.clear_square(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << square;
        self.recalc_occupancy();
        self
    }

    #[must_use]
    pub fn without_piece(mut self, square: Square) -> Self {
        self.clear_square(square);
        self.recalc_occupancy();
        self
    }

    #[must_use]
    pub fn with_side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupancy_all & (1u64 << square) != 0
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(kind, color));
                }
            }
        }
        None
    }

    /// Occupied squares of `color`, ascending.
    pub fn squares_of(&self, color: Color) -> Vec<Square> {
        bitboard_squares(self.occupancy_by_color[color.index()])
    }

    /// Squares holding `color`'s pieces of `kind`, ascending.
    pub fn squares_of_kind(&self, color: Color, kind: PieceKind) -> Vec<Square> {
        bitboard_squares(self.pieces[color.index()][kind.index()])
    }

    /// All occupied squares with their pieces, ascending by square.
    pub fn occupied(&self) -> Vec<(Square, Piece)> {
        bitboard_squares(self.occupancy_all)
            .into_iter()
            .filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
            .collect()
    }

    #[inline]
    pub fn count(&self, color: Color) -> u32 {
        self.occupancy_by_color[color.index()].count_ones()
    }

    #[inline]
    pub fn total_pieces(&self) -> u32 {
        self.occupancy_all.count_ones()
    }

    /// Lowest-indexed king of `color`, if any.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][PieceKind::King.index()];
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    #[inline]
    pub fn has_king(&self, color: Color) -> bool {
        self.pieces[color.index()][PieceKind::King.index()] != 0
    }

    pub fn fen(&self) -> String {
        generate_fen(self)
    }

    fn clear_square(&mut self, square: Square) {
        let keep = !(1u64 << square);
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                self.pieces[color.index()][kind.index()] &= keep;
            }
        }
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

/// Expands a bitboard into its set squares, ascending.
pub fn bitboard_squares(mut bitboard: u64) -> Vec<Square> {
    let mut out = Vec::with_capacity(bitboard.count_ones() as usize);
    while bitboard != 0 {
        out.push(bitboard.trailing_zeros() as Square);
        bitboard &= bitboard - 1;
    }
    out
}
