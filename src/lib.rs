//! Crate root module declarations for the chess audio flashcard generator.
//!
//! The chess layer (game state, attack tables, legal move generation and
//! notation helpers) feeds the puzzle samplers; the audio layer turns
//! puzzles into brick sequences and rendered clips; the cards layer binds
//! both into decks.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_types;
}

pub mod moves {
    pub mod attack_tables;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
}

pub mod puzzles {
    pub mod capture_puzzle;
    pub mod memory_puzzle;
    pub mod puzzle_types;
    pub mod square_color_puzzle;
}

pub mod audio {
    pub mod audio_clip;
    pub mod brick_catalog;
    pub mod brick_compiler;
    pub mod brick_library;
    pub mod compositor;
}

pub mod cards {
    pub mod card_text;
    pub mod deck_builder;
    pub mod deck_writer;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen;
    pub mod render_board;
    pub mod san;
}
