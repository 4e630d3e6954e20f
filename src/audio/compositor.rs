//! Brick sequences to a single audio file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::audio_clip::AudioClip;
use crate::audio::brick_catalog::BrickId;
use crate::audio::brick_library::BrickResolver;
use crate::errors::{CardError, CardResult};

/// Resolves every brick, then joins them back to back.
pub fn compose<B: BrickResolver + ?Sized>(seq: &[BrickId], resolver: &B) -> CardResult<AudioClip> {
    let bricks = seq
        .iter()
        .map(|id| resolver.resolve(id))
        .collect::<CardResult<Vec<_>>>()?;

    let mut iter = bricks.into_iter();
    let mut out = iter
        .next()
        .ok_or_else(|| CardError::AudioFormat("empty brick sequence".to_owned()))?;
    for brick in iter {
        out.append(&brick)?;
    }
    Ok(out)
}

/// Composes `seq` and writes it to `path`.
///
/// The clip is encoded to `<path>.part` and renamed into place, so `path`
/// either holds a complete file or does not exist.
pub fn render_sequence<B: BrickResolver + ?Sized>(
    seq: &[BrickId],
    resolver: &B,
    path: &Path,
) -> CardResult<PathBuf> {
    let clip = compose(seq, resolver)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    if let Err(err) = clip.write_wav(&partial) {
        fs::remove_file(&partial).ok();
        return Err(err);
    }
    fs::rename(&partial, path)?;

    log::debug!(
        "rendered {} bricks ({:.2}s) to {}",
        seq.len(),
        clip.duration_secs(),
        path.display()
    );
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{compose, render_sequence};
    use crate::audio::audio_clip::AudioClip;
    use crate::audio::brick_catalog::{BrickId, Silence};
    use crate::audio::brick_library::InMemoryBricks;
    use crate::errors::CardError;

    fn bricks() -> (InMemoryBricks, Vec<BrickId>) {
        let a = BrickId::square(0);
        let b = BrickId::silence(Silence::Short);
        let c = BrickId::square(63);
        let library = InMemoryBricks::new()
            .with_clip(a.clone(), AudioClip::silence(0.3, 8_000, 1))
            .with_clip(b.clone(), AudioClip::silence(0.2, 8_000, 1))
            .with_clip(c.clone(), AudioClip::silence(0.45, 8_000, 1));
        (library, vec![a, b, c])
    }

    #[test]
    fn duration_is_sum_of_bricks() {
        let (library, seq) = bricks();
        let clip = compose(&seq, &library).expect("all bricks present");
        assert_eq!(clip.frames(), 2_400 + 1_600 + 3_600);
        assert!((clip.duration_secs() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn missing_brick_aborts_without_output() {
        let (library, mut seq) = bricks();
        seq.insert(1, BrickId::square(28));

        let dir = std::env::temp_dir().join(format!("cac_compose_missing_{}", std::process::id()));
        let path = dir.join("card.wav");
        let err = render_sequence(&seq, &library, &path).expect_err("square_e4 is absent");

        assert!(matches!(err, CardError::MissingBrick(ref id) if id.as_str() == "square_e4"));
        assert!(!path.exists());
        assert!(!dir.join("card.wav.part").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn mismatched_formats_are_rejected() {
        let a = BrickId::square(0);
        let b = BrickId::square(1);
        let library = InMemoryBricks::new()
            .with_clip(a.clone(), AudioClip::silence(0.1, 8_000, 1))
            .with_clip(b.clone(), AudioClip::silence(0.1, 8_000, 2));
        let err = compose(&[a, b], &library).expect_err("channel counts differ");
        assert!(matches!(err, CardError::AudioFormat(_)));
    }

    #[test]
    fn render_writes_final_file_only() {
        let (library, seq) = bricks();
        let dir = std::env::temp_dir().join(format!("cac_compose_ok_{}", std::process::id()));
        let path = dir.join("nested").join("card.wav");

        let written = render_sequence(&seq, &library, &path).expect("render should succeed");
        assert_eq!(written, path);
        assert!(path.exists());
        assert!(!dir.join("nested").join("card.wav.part").exists());

        let back = AudioClip::read_wav(&path).expect("output should decode");
        assert_eq!(back.frames(), 7_600);

        std::fs::remove_dir_all(&dir).ok();
    }
}
