//! Primitive chess vocabulary shared by the board model, the puzzle samplers
//! and the audio compiler.

/// Board square index (`0..=63`, `a1 == 0`, `h8 == 63`).
pub type Square = u8;

/// Side color. Ordering matters: narration always walks White before Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Lowercase token used in brick ids (`color_white`).
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Capitalized form used in card text.
    pub const fn title(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Piece kind (color is carried separately so bitboards stay `[color][kind]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds that may appear as attacker or defender in a capture puzzle.
    pub const CAPTURE_KINDS: [PieceKind; 5] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    pub const fn plural_name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawns",
            PieceKind::Knight => "knights",
            PieceKind::Bishop => "bishops",
            PieceKind::Rook => "rooks",
            PieceKind::Queen => "queens",
            PieceKind::King => "kings",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Uppercase SAN letter; pawns have none.
    pub const fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub fn from_san_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// All twelve kind/color combinations, White first.
    pub fn all() -> [Piece; 12] {
        let mut out = [Piece::new(PieceKind::Pawn, Color::White); 12];
        for (i, color) in Color::ALL.into_iter().enumerate() {
            for (j, kind) in PieceKind::ALL.into_iter().enumerate() {
                out[i * 6 + j] = Piece::new(kind, color);
            }
        }
        out
    }
}

/// A fully described move. Captures and promotions are recorded so SAN and
/// narration never have to look back at the board that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Light or dark square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareShade {
    Light,
    Dark,
}

impl SquareShade {
    /// A square is light when `file + rank` is odd (`a1` is dark).
    #[inline]
    pub const fn of(square: Square) -> Self {
        if ((square % 8) + (square / 8)) % 2 == 1 {
            SquareShade::Light
        } else {
            SquareShade::Dark
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SquareShade::Light => "light",
            SquareShade::Dark => "dark",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            SquareShade::Light => "Light",
            SquareShade::Dark => "Dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Piece, PieceKind, SquareShade};

    #[test]
    fn square_shade_follows_file_plus_rank_parity() {
        // a1: 0 + 0 even -> dark; b1: 1 + 0 odd -> light; h1: 7 + 0 odd -> light
        assert_eq!(SquareShade::of(0), SquareShade::Dark);
        assert_eq!(SquareShade::of(1), SquareShade::Light);
        assert_eq!(SquareShade::of(7), SquareShade::Light);
        assert_eq!(SquareShade::of(63), SquareShade::Dark);
    }

    #[test]
    fn all_pieces_covers_twelve_combinations() {
        let all = Piece::all();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], Piece::new(PieceKind::Pawn, Color::White));
        assert_eq!(all[11], Piece::new(PieceKind::King, Color::Black));
    }

    #[test]
    fn san_letters_round_trip() {
        for kind in PieceKind::ALL {
            if let Some(letter) = kind.san_letter() {
                assert_eq!(PieceKind::from_san_letter(letter), Some(kind));
            }
        }
    }
}
