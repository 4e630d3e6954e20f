//! Card sinks.
//!
//! Packaging decks into a flashcard application's binary format is left to
//! external tooling. [`JsonDeckWriter`] writes a manifest with every note and
//! the media files the notes reference.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CardResult;

/// Note type shared by every deck: question text, answer text, question
/// audio, answer audio.
pub const MODEL_ID: u64 = 1_376_944_192;
pub const MODEL_NAME: &str = "Audio And Text Model";

const CAPTURE_DECK_ID: u64 = 2_059_400_110;
const MEMORY_DECK_ID_BASE: u64 = 2_059_400_111;
const SQUARE_COLOR_DECK_ID: u64 = 1_633_354_192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckKind {
    Captures,
    Memory(u8),
    SquareColors,
}

impl DeckKind {
    pub fn deck_id(self) -> u64 {
        match self {
            DeckKind::Captures => CAPTURE_DECK_ID,
            DeckKind::Memory(pieces) => MEMORY_DECK_ID_BASE + u64::from(pieces),
            DeckKind::SquareColors => SQUARE_COLOR_DECK_ID,
        }
    }

    pub fn deck_name(self) -> String {
        match self {
            DeckKind::Captures => "Chess Simple Capture Puzzles".to_owned(),
            DeckKind::Memory(pieces) => format!("Chess Memory Puzzles - {pieces} Pieces"),
            DeckKind::SquareColors => "Chess Square Colors".to_owned(),
        }
    }

    pub fn file_stem(self) -> String {
        match self {
            DeckKind::Captures => "chess_capture_puzzles".to_owned(),
            DeckKind::Memory(pieces) => format!("chess_memory_puzzles_{pieces}_pieces"),
            DeckKind::SquareColors => "chess_square_colors".to_owned(),
        }
    }

    pub fn tag(self) -> String {
        match self {
            DeckKind::Captures => "simple_captures".to_owned(),
            DeckKind::Memory(pieces) => format!("memory_{pieces}_pieces"),
            DeckKind::SquareColors => "square_color".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardNote {
    pub question_text: String,
    pub answer_text: String,
    /// `[sound:<file>]` reference.
    pub question_audio: String,
    pub answer_audio: String,
    pub tags: Vec<String>,
}

pub fn sound_ref(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("[sound:{name}]")
}

pub trait CardSink {
    fn add_note(&mut self, note: CardNote) -> CardResult<()>;

    fn add_media(&mut self, path: &Path);

    /// Flushes the deck; returns where it was written.
    fn finish(&mut self) -> CardResult<PathBuf>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManifest {
    pub deck_id: u64,
    pub deck_name: String,
    pub model_id: u64,
    pub model_name: String,
    pub generated_at: String,
    pub notes: Vec<CardNote>,
    pub media: BTreeSet<PathBuf>,
}

/// Writes `<deck_dir>/<file_stem>.json`.
#[derive(Debug)]
pub struct JsonDeckWriter {
    path: PathBuf,
    manifest: DeckManifest,
}

impl JsonDeckWriter {
    pub fn new(deck_dir: &Path, kind: DeckKind) -> Self {
        Self {
            path: deck_dir.join(format!("{}.json", kind.file_stem())),
            manifest: DeckManifest {
                deck_id: kind.deck_id(),
                deck_name: kind.deck_name(),
                model_id: MODEL_ID,
                model_name: MODEL_NAME.to_owned(),
                generated_at: String::new(),
                notes: Vec::new(),
                media: BTreeSet::new(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &DeckManifest {
        &self.manifest
    }
}

impl CardSink for JsonDeckWriter {
    fn add_note(&mut self, note: CardNote) -> CardResult<()> {
        self.manifest.notes.push(note);
        Ok(())
    }

    fn add_media(&mut self, path: &Path) {
        self.manifest.media.insert(path.to_path_buf());
    }

    fn finish(&mut self) -> CardResult<PathBuf> {
        self.manifest.generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.manifest)?;
        fs::write(&self.path, json)?;

        log::info!(
            "wrote deck '{}' ({} notes, {} media files) to {}",
            self.manifest.deck_name,
            self.manifest.notes.len(),
            self.manifest.media.len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }
}
