//! Standard algebraic notation (SAN) for legal moves.

use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::{apply_move, legal_moves};
use crate::utils::algebraic::{file_char, rank_char, square_file, square_name, square_rank};

/// Formats `mv` in SAN for the side to move on `board`, including piece
/// disambiguation and the `+`/`#` suffix.
pub fn move_to_san(board: &Board, mv: &ChessMove) -> Result<String, String> {
    let legal = legal_moves(board);
    if !legal.contains(mv) {
        return Err(format!(
            "Move {}{} is not legal in {}",
            square_name(mv.from),
            square_name(mv.to),
            board.fen()
        ));
    }

    let mut out = String::new();
    match mv.piece.san_letter() {
        None => {
            if mv.is_capture() {
                out.push(file_char(mv.from));
            }
        }
        Some(letter) => {
            out.push(letter);
            out.push_str(&disambiguation(mv, &legal));
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_name(mv.to));

    if let Some(promo) = mv.promotion.and_then(PieceKind::san_letter) {
        out.push('=');
        out.push(promo);
    }

    let next = apply_move(board, mv);
    if is_check(&next) {
        out.push(if legal_moves(&next).is_empty() { '#' } else { '+' });
    }

    Ok(out)
}

fn disambiguation(mv: &ChessMove, legal: &[ChessMove]) -> String {
    let rivals: Vec<&ChessMove> = legal
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals
        .iter()
        .any(|other| square_file(other.from) == square_file(mv.from));
    let shares_rank = rivals
        .iter()
        .any(|other| square_rank(other.from) == square_rank(mv.from));

    if !shares_file {
        file_char(mv.from).to_string()
    } else if !shares_rank {
        rank_char(mv.from).to_string()
    } else {
        square_name(mv.from)
    }
}

#[cfg(test)]
mod tests {
    use super::move_to_san;
    use crate::game_state::chess_types::PieceKind;
    use crate::move_generation::legal_move_generator::find_legal_move;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen::parse_fen;

    fn san_for(fen: &str, from: &str, to: &str, promotion: Option<PieceKind>) -> String {
        let board = parse_fen(fen).expect("FEN should parse");
        let from = algebraic_to_square(from).expect("from square should parse");
        let to = algebraic_to_square(to).expect("to square should parse");
        let mv = find_legal_move(&board, from, to, promotion).expect("move should be legal");
        move_to_san(&board, &mv).expect("SAN should format")
    }

    #[test]
    fn knight_capture() {
        assert_eq!(
            san_for("4k3/8/8/3p4/8/2N5/8/4K3 w - - 0 1", "c3", "d5", None),
            "Nxd5"
        );
    }

    #[test]
    fn pawn_capture_with_check() {
        // f5xg6 attacks the black king on h7.
        assert_eq!(
            san_for("8/7k/6p1/5P2/8/8/8/4K3 w - - 0 1", "f5", "g6", None),
            "fxg6+"
        );
    }

    #[test]
    fn rook_mate_on_back_rank() {
        assert_eq!(
            san_for("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", "a1", "a8", None),
            "Ra8#"
        );
    }

    #[test]
    fn file_disambiguation_between_two_knights() {
        assert_eq!(
            san_for("4k3/8/8/3p4/8/2N1N3/8/4K3 w - - 0 1", "c3", "d5", None),
            "Ncxd5"
        );
    }

    #[test]
    fn rank_disambiguation_between_stacked_rooks() {
        assert_eq!(
            san_for("4k3/8/8/R7/8/8/R7/4K3 w - - 0 1", "a2", "a3", None),
            "R2a3"
        );
    }

    #[test]
    fn promotion_suffix() {
        assert_eq!(
            san_for("3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1", "e7", "d8", Some(PieceKind::Queen)),
            "exd8=Q+"
        );
    }

    #[test]
    fn illegal_move_is_rejected() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = crate::game_state::chess_types::ChessMove {
            from: 4,
            to: 20,
            piece: PieceKind::King,
            captured: None,
            promotion: None,
        };
        assert!(move_to_san(&board, &mv).is_err());
    }
}
