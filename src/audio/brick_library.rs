//! Where brick audio comes from.
//!
//! [`BrickLibrary`] is a directory of `<brick_id>.<extension>` files indexed
//! once at open time. [`InMemoryBricks`] serves pre-built clips and backs the
//! tests and benches.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::audio_clip::AudioClip;
use crate::audio::brick_catalog::{catalog, BrickId, Silence};
use crate::errors::{CardError, CardResult};

/// The only brick format [`AudioClip::read_wav`] decodes.
pub const BRICK_EXTENSION: &str = "wav";

pub trait BrickResolver {
    /// Decoded audio for `id`, or [`CardError::MissingBrick`].
    fn resolve(&self, id: &BrickId) -> CardResult<AudioClip>;

    fn contains(&self, id: &BrickId) -> bool;
}

#[derive(Debug, Clone)]
pub struct BrickLibrary {
    dir: PathBuf,
    extension: String,
    available: BTreeSet<BrickId>,
}

impl BrickLibrary {
    /// Indexes `dir`. Files whose stem is not a catalog id are ignored.
    pub fn open(dir: &Path, extension: &str) -> CardResult<Self> {
        check_extension(extension)?;
        let entries =
            fs::read_dir(dir).map_err(|_| CardError::BrickLibraryUnavailable(dir.to_path_buf()))?;

        let mut available = BTreeSet::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match BrickId::parse(stem) {
                Ok(id) => {
                    available.insert(id);
                }
                Err(_) => log::debug!("ignoring non-catalog file {}", path.display()),
            }
        }

        log::info!(
            "brick library {}: {} of {} bricks present",
            dir.display(),
            available.len(),
            catalog().len()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            extension: extension.to_owned(),
            available,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, id: &BrickId) -> PathBuf {
        self.dir.join(id.file_name(&self.extension))
    }

    /// Catalog entries with no file in the directory, in catalog order.
    pub fn missing_bricks(&self) -> Vec<BrickId> {
        catalog()
            .into_iter()
            .map(|entry| entry.id)
            .filter(|id| !self.available.contains(id))
            .collect()
    }
}

impl BrickResolver for BrickLibrary {
    fn resolve(&self, id: &BrickId) -> CardResult<AudioClip> {
        if !self.available.contains(id) {
            return Err(CardError::MissingBrick(id.clone()));
        }
        AudioClip::read_wav(&self.path_of(id)).map_err(|err| match err {
            CardError::Audio(source) => CardError::UnreadableBrick {
                id: id.clone(),
                source,
            },
            other => other,
        })
    }

    fn contains(&self, id: &BrickId) -> bool {
        self.available.contains(id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryBricks {
    clips: HashMap<BrickId, AudioClip>,
}

impl InMemoryBricks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: BrickId, clip: AudioClip) {
        self.clips.insert(id, clip);
    }

    #[must_use]
    pub fn with_clip(mut self, id: BrickId, clip: AudioClip) -> Self {
        self.insert(id, clip);
        self
    }

    /// Every catalog brick as `seconds` of silence.
    pub fn silent_catalog(seconds: f32, sample_rate: u32) -> Self {
        let mut bricks = Self::new();
        for entry in catalog() {
            bricks.insert(entry.id, AudioClip::silence(seconds, sample_rate, 1));
        }
        bricks
    }
}

impl BrickResolver for InMemoryBricks {
    fn resolve(&self, id: &BrickId) -> CardResult<AudioClip> {
        self.clips
            .get(id)
            .cloned()
            .ok_or_else(|| CardError::MissingBrick(id.clone()))
    }

    fn contains(&self, id: &BrickId) -> bool {
        self.clips.contains_key(id)
    }
}

/// Rejects brick extensions other than [`BRICK_EXTENSION`].
pub fn check_extension(extension: &str) -> CardResult<()> {
    if extension.eq_ignore_ascii_case(BRICK_EXTENSION) {
        Ok(())
    } else {
        Err(CardError::Config(format!(
            "audio_extension '{extension}' is not supported, bricks must be '{BRICK_EXTENSION}' files"
        )))
    }
}

/// Writes the silence bricks as mono WAV files into `dir`.
pub fn write_silence_bricks(dir: &Path, sample_rate: u32) -> CardResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(Silence::ALL.len());
    for silence in Silence::ALL {
        let path = dir.join(BrickId::silence(silence).file_name(BRICK_EXTENSION));
        AudioClip::silence(silence.seconds(), sample_rate, 1).write_wav(&path)?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::{write_silence_bricks, BrickLibrary, BrickResolver, InMemoryBricks};
    use crate::audio::audio_clip::AudioClip;
    use crate::audio::brick_catalog::{catalog, BrickId, Silence};
    use crate::errors::CardError;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("cac_library_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = std::env::temp_dir().join("cac_library_does_not_exist");
        let err = BrickLibrary::open(&dir, "wav").expect_err("directory is absent");
        assert!(matches!(err, CardError::BrickLibraryUnavailable(_)));
    }

    #[test]
    fn library_indexes_catalog_files_only() {
        let dir = temp_dir("index");
        write_silence_bricks(&dir, 8_000).expect("silence bricks should write");
        std::fs::write(dir.join("notes.wav"), b"not audio").expect("stray file should write");
        std::fs::write(dir.join("square_e4.mp3"), b"other extension").expect("stray file should write");

        let library = BrickLibrary::open(&dir, "wav").expect("library should open");
        let short = BrickId::silence(Silence::Short);
        assert!(library.contains(&short));
        assert!(!library.contains(&BrickId::square(28)));
        assert_eq!(library.missing_bricks().len(), catalog().len() - 2);

        let clip = library.resolve(&short).expect("silence brick should decode");
        assert_eq!(clip.frames(), 1_600);

        let err = library
            .resolve(&BrickId::square(28))
            .expect_err("square_e4 was never written");
        assert!(matches!(err, CardError::MissingBrick(id) if id.as_str() == "square_e4"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn non_wav_extension_is_rejected() {
        let dir = temp_dir("mp3");
        std::fs::write(dir.join("square_e4.mp3"), b"mp3 bytes").expect("brick should write");

        let err = BrickLibrary::open(&dir, "mp3").expect_err("only WAV bricks decode");
        assert!(matches!(err, CardError::Config(ref msg) if msg.contains("mp3")));
        assert!(!err.is_card_local());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn undecodable_brick_is_reported_per_brick() {
        let dir = temp_dir("garbage");
        std::fs::write(dir.join("square_a1.wav"), b"garbage").expect("brick should write");

        let library = BrickLibrary::open(&dir, "wav").expect("library should open");
        assert!(library.contains(&BrickId::square(0)));

        let err = library
            .resolve(&BrickId::square(0))
            .expect_err("file is not a WAV");
        assert!(matches!(err, CardError::UnreadableBrick { ref id, .. } if id.as_str() == "square_a1"));
        assert!(err.is_card_local());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn in_memory_resolver() {
        let id = BrickId::square(0);
        let bricks = InMemoryBricks::new().with_clip(id.clone(), AudioClip::silence(0.1, 1_000, 1));
        assert_eq!(bricks.resolve(&id).expect("brick present").frames(), 100);
        assert!(bricks.resolve(&BrickId::square(1)).is_err());
        assert!(InMemoryBricks::silent_catalog(0.01, 1_000).contains(&BrickId::square(63)));
    }
}
