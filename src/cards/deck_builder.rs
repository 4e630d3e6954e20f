//! Batch driver: plans a deck, then samples, narrates and renders each card
//! in turn and hands it to a [`CardSink`].
//!
//! Card-local failures (a missing brick, an exhausted sampler, an
//! unnarratable move) skip the card. Anything else aborts the deck.

use std::fs;
use std::path::PathBuf;

use rand::Rng;

use crate::audio::brick_catalog::BrickSequence;
use crate::audio::brick_compiler::{compile_answer, compile_question};
use crate::audio::brick_library::BrickResolver;
use crate::audio::compositor::render_sequence;
use crate::cards::card_text::{answer_text, question_text};
use crate::cards::deck_writer::{sound_ref, CardNote, CardSink, DeckKind};
use crate::config::GeneratorConfig;
use crate::errors::CardResult;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::puzzles::capture_puzzle::sample_capture_puzzle;
use crate::puzzles::memory_puzzle::sample_memory_puzzle;
use crate::puzzles::puzzle_types::{CaptureSpec, MemorySpec, Puzzle, PuzzleSpec, SquareColorSpec};
use crate::puzzles::square_color_puzzle::{shuffled_squares, square_color_puzzle};
use crate::utils::render_board::render_board;

/// Everything needed to turn one puzzle into a note, before any audio is
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCard {
    pub puzzle: Puzzle,
    pub question: BrickSequence,
    pub answer: BrickSequence,
    pub question_text: String,
    pub answer_text: String,
}

/// Samples a puzzle for `spec` and compiles both sides of the card.
pub fn generate_card<R: Rng + ?Sized>(
    spec: &PuzzleSpec,
    rng: &mut R,
    config: &GeneratorConfig,
) -> CardResult<GeneratedCard> {
    spec.validate()?;

    let puzzle = match spec {
        PuzzleSpec::Capture(capture) => {
            sample_capture_puzzle(capture, rng, config.max_sampling_attempts)?
        }
        PuzzleSpec::Memory(memory) => sample_memory_puzzle(memory, rng)?,
        PuzzleSpec::SquareColor(square) => square_color_puzzle(square),
    };

    let question = compile_question(&puzzle);
    let answer = compile_answer(&puzzle)?;

    Ok(GeneratedCard {
        question_text: question_text(&puzzle),
        answer_text: answer_text(&puzzle.fact),
        puzzle,
        question,
        answer,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckPlan {
    pub kind: DeckKind,
    pub specs: Vec<PuzzleSpec>,
}

impl DeckPlan {
    /// Every attacker/defender pairing of non-king pieces, `per_combination`
    /// times each. The attacker alternates White/Black within a pairing.
    pub fn captures(per_combination: u32) -> Self {
        let mut specs = Vec::new();
        for attacker in PieceKind::CAPTURE_KINDS {
            for defender in PieceKind::CAPTURE_KINDS {
                for i in 0..per_combination {
                    let attacker_color = if i % 2 == 0 { Color::White } else { Color::Black };
                    specs.push(PuzzleSpec::Capture(CaptureSpec {
                        attacker_color,
                        attacker,
                        defender,
                    }));
                }
            }
        }
        Self {
            kind: DeckKind::Captures,
            specs,
        }
    }

    pub fn memory(piece_count: u8, cards: u32) -> CardResult<Self> {
        let spec = MemorySpec { piece_count };
        spec.validate()?;
        Ok(Self {
            kind: DeckKind::Memory(piece_count),
            specs: (0..cards).map(|_| PuzzleSpec::Memory(spec)).collect(),
        })
    }

    /// One card per square, shuffled.
    pub fn square_colors<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            kind: DeckKind::SquareColors,
            specs: shuffled_squares(rng)
                .into_iter()
                .map(|square| PuzzleSpec::SquareColor(SquareColorSpec { square }))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckReport {
    pub written: usize,
    pub skipped: usize,
    pub deck_path: PathBuf,
}

/// Runs `plan` card by card and finishes the sink.
pub fn build_deck<R, B, S>(
    plan: &DeckPlan,
    rng: &mut R,
    resolver: &B,
    sink: &mut S,
    config: &GeneratorConfig,
) -> CardResult<DeckReport>
where
    R: Rng + ?Sized,
    B: BrickResolver + ?Sized,
    S: CardSink + ?Sized,
{
    log::info!(
        "generating '{}': {} cards planned",
        plan.kind.deck_name(),
        plan.specs.len()
    );
    fs::create_dir_all(&config.output_audio_dir)?;

    let mut written = 0;
    let mut skipped = 0;

    for (index, spec) in plan.specs.iter().enumerate() {
        let number = index + 1;
        match build_card(plan.kind, number, spec, rng, resolver, sink, config) {
            Ok(()) => written += 1,
            Err(err) if err.is_card_local() => {
                log::warn!("skipping card #{number}: {err}");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    let deck_path = sink.finish()?;
    log::info!("{written} cards written, {skipped} skipped");

    Ok(DeckReport {
        written,
        skipped,
        deck_path,
    })
}

fn build_card<R, B, S>(
    kind: DeckKind,
    number: usize,
    spec: &PuzzleSpec,
    rng: &mut R,
    resolver: &B,
    sink: &mut S,
    config: &GeneratorConfig,
) -> CardResult<()>
where
    R: Rng + ?Sized,
    B: BrickResolver + ?Sized,
    S: CardSink + ?Sized,
{
    let card = generate_card(spec, rng, config)?;

    log::debug!("card #{number} FEN: {}", card.puzzle.board.fen());
    log::debug!("\n{}", render_board(&card.puzzle.board));

    let stem = audio_stem(kind, number);
    let question_path = render_sequence(
        &card.question,
        resolver,
        &config.output_audio_dir.join(format!("{stem}_q.wav")),
    )?;
    let answer_path = match render_sequence(
        &card.answer,
        resolver,
        &config.output_audio_dir.join(format!("{stem}_a.wav")),
    ) {
        Ok(path) => path,
        Err(err) => {
            fs::remove_file(&question_path).ok();
            return Err(err);
        }
    };

    log::info!(
        "card #{number}: {} -> {}",
        card.question_text,
        card.answer_text
    );

    sink.add_note(CardNote {
        question_text: card.question_text,
        answer_text: card.answer_text,
        question_audio: sound_ref(&question_path),
        answer_audio: sound_ref(&answer_path),
        tags: vec![kind.tag()],
    })?;
    sink.add_media(&question_path);
    sink.add_media(&answer_path);
    Ok(())
}

fn audio_stem(kind: DeckKind, number: usize) -> String {
    match kind {
        DeckKind::Captures => format!("capture_puzzle_{number}"),
        DeckKind::Memory(pieces) => format!("memory_puzzle_{pieces}_{number}"),
        DeckKind::SquareColors => format!("square_color_{number}"),
    }
}
