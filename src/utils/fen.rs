//! FEN placement parsing and generation for puzzle boards.
//!
//! Puzzle boards have no castling rights, en-passant square or meaningful
//! clocks, so generated FEN always carries `- - 0 1` and parsing only checks
//! that those fields are well formed.

use crate::game_state::{board::Board, chess_types::*};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Board, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");

    if !castling_part.chars().all(|c| matches!(c, 'K' | 'Q' | 'k' | 'q' | '-')) {
        return Err(format!("Invalid castling rights field: {castling_part}"));
    }
    if en_passant_part != "-" {
        algebraic_to_square(en_passant_part)?;
    }

    let mut board = parse_placement(board_part)?;
    board.side_to_move = match side_part {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(format!("Invalid side-to-move field: {side_part}")),
    };

    Ok(board)
}

fn parse_placement(board_part: &str) -> Result<Board, String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                file += empty_count as u8;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;
            if file >= 8 {
                return Err("Board rank has too many files".to_owned());
            }

            board = board.with_piece(board_rank * 8 + file, piece);
            file += 1;
        }

        if file != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(board)
}

pub fn generate_fen(board: &Board) -> String {
    let mut placement = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match board.piece_at(rank * 8 + file) {
                Some(piece) => {
                    if empty_count > 0 {
                        placement.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    placement.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            placement.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let side = match board.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{placement} {side} - - 0 1")
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some(Piece::new(kind, color))
}

fn piece_to_fen_char(piece: Piece) -> char {
    let base = piece.kind.san_letter().unwrap_or('P');
    match piece.color {
        Color::White => base,
        Color::Black => base.to_ascii_lowercase(),
    }
}
