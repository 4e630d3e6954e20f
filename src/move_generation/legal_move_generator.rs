//! Legal move generation for puzzle boards.
//!
//! Generates pseudo-legal moves per piece, applies each candidate to a copy of
//! the board and drops those that leave the mover's own king in check.
//! Puzzle boards never carry castling rights or an en-passant square, so
//! neither rule is modelled.

use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::attack_tables::{pawn_attacks, piece_attacks};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

pub fn legal_moves(board: &Board) -> Vec<ChessMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(64);
    generate_pawn_moves(board, &mut pseudo);
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        generate_piece_moves(board, kind, &mut pseudo);
    }

    let mover = board.side_to_move;
    pseudo
        .into_iter()
        .filter(|mv| !is_king_in_check(&apply_move(board, mv), mover))
        .collect()
}

/// Membership test for a move given only its squares and promotion choice.
pub fn find_legal_move(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Option<ChessMove> {
    legal_moves(board)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
}

#[inline]
pub fn is_legal_move(board: &Board, mv: &ChessMove) -> bool {
    legal_moves(board).contains(mv)
}

/// Plays `mv` for the side to move and returns the resulting board.
pub fn apply_move(board: &Board, mv: &ChessMove) -> Board {
    let mover = board.side_to_move;
    let placed = Piece::new(mv.promotion.unwrap_or(mv.piece), mover);
    board
        .without_piece(mv.from)
        .with_piece(mv.to, placed)
        .with_side_to_move(mover.opposite())
}

fn generate_piece_moves(board: &Board, kind: PieceKind, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let own_occ = board.occupancy_by_color[side.index()];

    let mut pieces = board.pieces[side.index()][kind.index()];
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        let mut targets = piece_attacks(kind, from, board.occupancy_all) & !own_occ;

        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            out.push(ChessMove {
                from,
                to,
                piece: kind,
                captured: enemy_kind_on(board, to),
                promotion: None,
            });
            targets &= targets - 1;
        }

        pieces &= pieces - 1;
    }
}

fn generate_pawn_moves(board: &Board, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let enemy_occ = board.occupancy_by_color[side.opposite().index()];
    let (forward, start_rank, promotion_rank): (i8, u8, u8) = match side {
        Color::White => (8, 1, 7),
        Color::Black => (-8, 6, 0),
    };

    let mut pawns = board.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let Some(one_step) = offset_square(from, forward) else {
            continue;
        };

        if !board.is_occupied(one_step) {
            push_pawn_move(out, from, one_step, None, promotion_rank);

            if from / 8 == start_rank {
                if let Some(two_step) = offset_square(one_step, forward) {
                    if !board.is_occupied(two_step) {
                        push_pawn_move(out, from, two_step, None, promotion_rank);
                    }
                }
            }
        }

        let mut captures = pawn_attacks(side, from) & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            push_pawn_move(out, from, to, enemy_kind_on(board, to), promotion_rank);
            captures &= captures - 1;
        }
    }
}

fn push_pawn_move(
    out: &mut Vec<ChessMove>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    promotion_rank: u8,
) {
    if to / 8 == promotion_rank {
        for promo in PROMOTION_KINDS {
            out.push(ChessMove {
                from,
                to,
                piece: PieceKind::Pawn,
                captured,
                promotion: Some(promo),
            });
        }
    } else {
        out.push(ChessMove {
            from,
            to,
            piece: PieceKind::Pawn,
            captured,
            promotion: None,
        });
    }
}

fn offset_square(square: Square, delta: i8) -> Option<Square> {
    let target = square as i16 + delta as i16;
    (0..64).contains(&target).then_some(target as Square)
}

fn enemy_kind_on(board: &Board, square: Square) -> Option<PieceKind> {
    board
        .piece_at(square)
        .filter(|piece| piece.color != board.side_to_move)
        .map(|piece| piece.kind)
}

#[cfg(test)]
mod tests {
    use super::{apply_move, find_legal_move, is_legal_move, legal_moves};
    use crate::game_state::chess_types::{ChessMove, Color, PieceKind};
    use crate::utils::fen::parse_fen;

    #[test]
    fn lone_kings_have_expected_move_counts() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(legal_moves(&board).len(), 5);
    }

    #[test]
    fn knight_captures_pawn_from_c3() {
        let board = parse_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 0 1").expect("FEN should parse");
        // c3 = 18, d5 = 35
        let capture = find_legal_move(&board, 18, 35, None).expect("Nxd5 should be legal");
        assert_eq!(capture.piece, PieceKind::Knight);
        assert_eq!(capture.captured, Some(PieceKind::Pawn));
    }

    #[test]
    fn pinned_piece_cannot_capture() {
        // White knight on e2 is pinned by the black rook on e8 against the king on e1.
        let board = parse_fen("4r2k/8/8/8/8/2p5/4N3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(find_legal_move(&board, 12, 18, None).is_none());
    }

    #[test]
    fn king_cannot_capture_defended_piece() {
        let board = parse_fen("7k/8/8/8/8/2q5/3r4/4K3 w - - 0 1").expect("FEN should parse");
        // d2 rook defended by queen on c3.
        assert!(find_legal_move(&board, 4, 11, None).is_none());
    }

    #[test]
    fn pawn_capture_onto_last_rank_requires_promotion() {
        let board = parse_fen("3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        // e7 = 52, d8 = 59
        assert!(find_legal_move(&board, 52, 59, None).is_none());
        assert!(find_legal_move(&board, 52, 59, Some(PieceKind::Queen)).is_some());
    }

    #[test]
    fn apply_move_flips_side_and_replaces_target() {
        let board = parse_fen("4k3/8/8/3p4/8/2N5/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = ChessMove {
            from: 18,
            to: 35,
            piece: PieceKind::Knight,
            captured: Some(PieceKind::Pawn),
            promotion: None,
        };
        assert!(is_legal_move(&board, &mv));
        let next = apply_move(&board, &mv);
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.count(Color::Black), 1);
        assert_eq!(next.piece_at(35).map(|p| p.kind), Some(PieceKind::Knight));
        assert!(!next.is_occupied(18));
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let board = parse_fen("4k3/8/8/8/4p3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        // e2 -> e3 legal, e2 -> e4 blocked (occupied by black pawn).
        assert!(find_legal_move(&board, 12, 20, None).is_some());
        assert!(find_legal_move(&board, 12, 28, None).is_none());
    }
}
