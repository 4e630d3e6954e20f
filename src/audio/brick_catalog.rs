//! The closed set of audio bricks.
//!
//! Every clip the compiler may ask for is enumerated here together with the
//! text it speaks. Ids are `<category>_<token>`; the library stores each one
//! as `<id>.<extension>`.

use std::fmt;

use crate::errors::{CardError, CardResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, square_name, ALL_SQUARES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BrickCategory {
    Piece,
    Color,
    Square,
    Action,
    Phrase,
    Silence,
}

impl BrickCategory {
    pub const ALL: [BrickCategory; 6] = [
        BrickCategory::Piece,
        BrickCategory::Color,
        BrickCategory::Square,
        BrickCategory::Action,
        BrickCategory::Phrase,
        BrickCategory::Silence,
    ];

    pub const fn prefix(self) -> &'static str {
        match self {
            BrickCategory::Piece => "piece",
            BrickCategory::Color => "color",
            BrickCategory::Square => "square",
            BrickCategory::Action => "action",
            BrickCategory::Phrase => "phrase",
            BrickCategory::Silence => "silence",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        BrickCategory::ALL.into_iter().find(|c| c.prefix() == prefix)
    }
}

/// Action words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Captures,
    Takes,
    To,
    On,
    And,
    Check,
    Checkmate,
    Promotes,
    Promote,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Captures,
        Action::Takes,
        Action::To,
        Action::On,
        Action::And,
        Action::Check,
        Action::Checkmate,
        Action::Promotes,
        Action::Promote,
    ];

    /// Token and spoken text coincide for action words.
    pub const fn token(self) -> &'static str {
        match self {
            Action::Captures => "captures",
            Action::Takes => "takes",
            Action::To => "to",
            Action::On => "on",
            Action::And => "and",
            Action::Check => "check",
            Action::Checkmate => "checkmate",
            Action::Promotes => "promotes",
            Action::Promote => "promote",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    WhiteToMove,
    BlackToMove,
    NoPieces,
    WhatColorIs,
    WhatPieceIsOn,
    WhereIsThe,
    WhereAreThe,
    LightSquared,
    DarkSquared,
}

impl Phrase {
    pub const ALL: [Phrase; 9] = [
        Phrase::WhiteToMove,
        Phrase::BlackToMove,
        Phrase::NoPieces,
        Phrase::WhatColorIs,
        Phrase::WhatPieceIsOn,
        Phrase::WhereIsThe,
        Phrase::WhereAreThe,
        Phrase::LightSquared,
        Phrase::DarkSquared,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Phrase::WhiteToMove => "white_to_move",
            Phrase::BlackToMove => "black_to_move",
            Phrase::NoPieces => "no_pieces",
            Phrase::WhatColorIs => "what_color_is",
            Phrase::WhatPieceIsOn => "what_piece_is_on",
            Phrase::WhereIsThe => "where_is_the",
            Phrase::WhereAreThe => "where_are_the",
            Phrase::LightSquared => "light_squared",
            Phrase::DarkSquared => "dark_squared",
        }
    }

    pub const fn spoken(self) -> &'static str {
        match self {
            Phrase::WhiteToMove => "White to move",
            Phrase::BlackToMove => "Black to move",
            Phrase::NoPieces => "no pieces",
            Phrase::WhatColorIs => "What color is",
            Phrase::WhatPieceIsOn => "What piece is on",
            Phrase::WhereIsThe => "Where is the",
            Phrase::WhereAreThe => "Where are the",
            Phrase::LightSquared => "light squared",
            Phrase::DarkSquared => "dark squared",
        }
    }

    pub const fn to_move(color: Color) -> Self {
        match color {
            Color::White => Phrase::WhiteToMove,
            Color::Black => Phrase::BlackToMove,
        }
    }

    pub const fn squared(shade: SquareShade) -> Self {
        match shade {
            SquareShade::Light => Phrase::LightSquared,
            SquareShade::Dark => Phrase::DarkSquared,
        }
    }
}

/// The two pause lengths the narration uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Silence {
    Short,
    Medium,
}

impl Silence {
    pub const ALL: [Silence; 2] = [Silence::Short, Silence::Medium];

    pub const fn token(self) -> &'static str {
        match self {
            Silence::Short => "0.2s",
            Silence::Medium => "0.5s",
        }
    }

    pub const fn seconds(self) -> f32 {
        match self {
            Silence::Short => 0.2,
            Silence::Medium => 0.5,
        }
    }
}

/// NATO word for a file letter; squares are spoken as "Echo 4".
pub const fn nato_file_word(file: u8) -> &'static str {
    match file {
        0 => "Alpha",
        1 => "Bravo",
        2 => "Charlie",
        3 => "Delta",
        4 => "Echo",
        5 => "Foxtrot",
        6 => "Golf",
        _ => "Hotel",
    }
}

/// A catalog key. Only ids present in the catalog can be constructed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BrickId {
    category: BrickCategory,
    key: String,
}

impl BrickId {
    fn from_parts(category: BrickCategory, token: &str) -> Self {
        Self {
            category,
            key: format!("{}_{}", category.prefix(), token),
        }
    }

    /// Parses `category_token`, rejecting anything outside the catalog.
    pub fn parse(text: &str) -> CardResult<Self> {
        let invalid = || CardError::InvalidBrickId(text.to_owned());

        let (prefix, token) = text.split_once('_').ok_or_else(invalid)?;
        let category = BrickCategory::from_prefix(prefix).ok_or_else(invalid)?;

        let known = match category {
            BrickCategory::Piece => PieceKind::ALL
                .iter()
                .any(|k| k.name() == token || k.plural_name() == token),
            BrickCategory::Color => matches!(token, "white" | "black" | "light" | "dark"),
            BrickCategory::Square => {
                token.len() == 2
                    && token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                    && algebraic_to_square(token).is_ok()
            }
            BrickCategory::Action => Action::ALL.iter().any(|a| a.token() == token),
            BrickCategory::Phrase => Phrase::ALL.iter().any(|p| p.token() == token),
            BrickCategory::Silence => Silence::ALL.iter().any(|s| s.token() == token),
        };

        if known {
            Ok(Self::from_parts(category, token))
        } else {
            Err(invalid())
        }
    }

    pub fn piece(kind: PieceKind) -> Self {
        Self::from_parts(BrickCategory::Piece, kind.name())
    }

    pub fn piece_plural(kind: PieceKind) -> Self {
        Self::from_parts(BrickCategory::Piece, kind.plural_name())
    }

    pub fn color(color: Color) -> Self {
        Self::from_parts(BrickCategory::Color, color.name())
    }

    /// `color_light` / `color_dark`.
    pub fn shade(shade: SquareShade) -> Self {
        Self::from_parts(BrickCategory::Color, shade.name())
    }

    pub fn square(square: Square) -> Self {
        Self::from_parts(BrickCategory::Square, &square_name(square))
    }

    pub fn action(action: Action) -> Self {
        Self::from_parts(BrickCategory::Action, action.token())
    }

    pub fn phrase(phrase: Phrase) -> Self {
        Self::from_parts(BrickCategory::Phrase, phrase.token())
    }

    pub fn silence(silence: Silence) -> Self {
        Self::from_parts(BrickCategory::Silence, silence.token())
    }

    #[inline]
    pub fn category(&self) -> BrickCategory {
        self.category
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// File name inside the brick library.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.key, extension)
    }
}

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Bricks in narration order.
pub type BrickSequence = Vec<BrickId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickEntry {
    pub id: BrickId,
    /// Text handed to speech synthesis. Silences carry none.
    pub spoken: Option<String>,
}

/// Every brick, grouped by category.
pub fn catalog() -> Vec<BrickEntry> {
    let mut out = Vec::with_capacity(100);
    let mut push = |id: BrickId, spoken: Option<String>| out.push(BrickEntry { id, spoken });

    for kind in PieceKind::ALL {
        push(BrickId::piece(kind), Some(kind.title().to_owned()));
    }
    for kind in PieceKind::ALL {
        let mut plural = kind.title().to_owned();
        plural.push('s');
        push(BrickId::piece_plural(kind), Some(plural));
    }

    for color in Color::ALL {
        push(BrickId::color(color), Some(color.title().to_owned()));
    }
    // Respelled for the synthesizer.
    push(BrickId::shade(SquareShade::Light), Some("lite".to_owned()));
    push(BrickId::shade(SquareShade::Dark), Some("dark".to_owned()));

    for square in ALL_SQUARES {
        let spoken = format!("{} {}", nato_file_word(square % 8), square / 8 + 1);
        push(BrickId::square(square), Some(spoken));
    }

    for action in Action::ALL {
        push(BrickId::action(action), Some(action.token().to_owned()));
    }
    for phrase in Phrase::ALL {
        push(BrickId::phrase(phrase), Some(phrase.spoken().to_owned()));
    }
    for silence in Silence::ALL {
        push(BrickId::silence(silence), None);
    }

    out
}
