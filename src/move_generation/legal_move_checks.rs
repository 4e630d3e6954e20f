use crate::game_state::{board::Board, chess_types::*};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

/// True when any of `color`'s kings is attacked. Boards without a king of
/// `color` are never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let mut kings = board.pieces[color.index()][PieceKind::King.index()];
    while kings != 0 {
        let king_sq = kings.trailing_zeros() as Square;
        if is_square_attacked(board, king_sq, color.opposite()) {
            return true;
        }
        kings &= kings - 1;
    }
    false
}

/// Whether the side to move is in check.
#[inline]
pub fn is_check(board: &Board) -> bool {
    is_king_in_check(board, board.side_to_move)
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let attackers = &board.pieces[attacker_color.index()];

    // A pawn of the attacking color attacks `square` exactly when a pawn of the
    // defending color on `square` would attack the pawn's square.
    if pawn_attacks(attacker_color.opposite(), square) & attackers[PieceKind::Pawn.index()] != 0 {
        return true;
    }

    if knight_attacks(square) & attackers[PieceKind::Knight.index()] != 0 {
        return true;
    }

    if king_attacks(square) & attackers[PieceKind::King.index()] != 0 {
        return true;
    }

    let bishops_queens =
        attackers[PieceKind::Bishop.index()] | attackers[PieceKind::Queen.index()];
    if bishop_attacks(square, board.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = attackers[PieceKind::Rook.index()] | attackers[PieceKind::Queen.index()];
    rook_attacks(square, board.occupancy_all) & rooks_queens != 0
}

/// Chebyshev distance between two squares.
#[inline]
pub fn king_distance(a: Square, b: Square) -> u8 {
    let df = (a % 8).abs_diff(b % 8);
    let dr = (a / 8).abs_diff(b / 8);
    df.max(dr)
}
