//! Generator configuration.
//!
//! Defaults match the directory layout the brick library is produced with
//! (`audio_bricks/` next to an `output_audio/` scratch folder). A JSON file
//! may override any subset of fields; command-line flags are applied last.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::brick_library::check_extension;
use crate::errors::CardResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub brick_dir: PathBuf,
    /// Extension of brick files, without the dot. Only "wav" is accepted.
    pub audio_extension: String,
    pub output_audio_dir: PathBuf,
    pub deck_dir: PathBuf,
    /// Outer retry bound for rejection sampling.
    pub max_sampling_attempts: u32,
    pub cards_per_combination: u32,
    pub memory_cards: u32,
    pub silence_sample_rate: u32,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            brick_dir: PathBuf::from("audio_bricks"),
            audio_extension: "wav".to_owned(),
            output_audio_dir: PathBuf::from("output_audio"),
            deck_dir: PathBuf::from("."),
            max_sampling_attempts: 5000,
            cards_per_combination: 5,
            memory_cards: 50,
            silence_sample_rate: 22_050,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> CardResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        check_extension(&config.audio_extension)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::GeneratorConfig;
    use crate::errors::CardError;

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "max_sampling_attempts": 10, "seed": 7 }"#)
                .expect("partial config should parse");

        assert_eq!(config.max_sampling_attempts, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.audio_extension, "wav");
        assert_eq!(config.memory_cards, 50);
    }

    #[test]
    fn load_without_path_returns_defaults() {
        let config = GeneratorConfig::load(None).expect("defaults should load");
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn load_reads_json_file() {
        let dir = std::env::temp_dir().join(format!("cac_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{ "cards_per_combination": 2 }"#).expect("config should write");

        let config = GeneratorConfig::load(Some(&path)).expect("config should load");
        assert_eq!(config.cards_per_combination, 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_rejects_non_wav_bricks() {
        let dir = std::env::temp_dir().join(format!("cac_config_mp3_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{ "audio_extension": "mp3" }"#).expect("config should write");

        let err = GeneratorConfig::load(Some(&path)).expect_err("mp3 bricks cannot be decoded");
        assert!(matches!(err, CardError::Config(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
