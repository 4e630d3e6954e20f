//! Command-line front end.
//!
//! Run with:
//! `cargo run --release -- captures`
//! `cargo run --release -- memory 8 --seed 42`
//! `RUST_LOG=debug cargo run -- square-colors --bricks audio_bricks`

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chess_audio_cards::audio::brick_catalog::catalog;
use chess_audio_cards::audio::brick_library::{write_silence_bricks, BrickLibrary};
use chess_audio_cards::cards::deck_builder::{build_deck, DeckPlan};
use chess_audio_cards::cards::deck_writer::JsonDeckWriter;
use chess_audio_cards::config::GeneratorConfig;
use chess_audio_cards::errors::CardResult;

#[derive(Parser, Debug)]
#[command(
    name = "chess_audio_cards",
    version,
    about = "Generate narrated chess flashcard decks from pre-recorded audio bricks"
)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the audio bricks
    #[arg(long, global = true)]
    bricks: Option<PathBuf>,

    /// Output directory for decks (rendered audio goes to <out>/output_audio)
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// RNG seed for reproducible decks
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Retry bound for the capture sampler
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// "Find the capture" deck over every attacker/defender pairing
    Captures,
    /// Board memorization deck with the given number of pieces (2-32)
    Memory { pieces: u8 },
    /// One card per square asking for its color
    SquareColors,
    /// Print every catalog brick with the text it should speak
    Bricks,
    /// List catalog bricks missing from the brick directory
    CheckBricks,
    /// Write the silence bricks into the brick directory
    Silence,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(cli).map_err(|err| {
        log::error!("{err}");
        err.to_string()
    })
}

fn run(cli: Cli) -> CardResult<()> {
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.bricks {
        config.brick_dir = dir;
    }
    if let Some(out) = cli.out {
        config.output_audio_dir = out.join("output_audio");
        config.deck_dir = out;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(attempts) = cli.max_attempts {
        config.max_sampling_attempts = attempts;
    }

    match cli.command {
        Command::Captures => {
            run_deck(&config, |_| Ok(DeckPlan::captures(config.cards_per_combination)))
        }
        Command::Memory { pieces } => {
            run_deck(&config, |_| DeckPlan::memory(pieces, config.memory_cards))
        }
        Command::SquareColors => run_deck(&config, |rng| Ok(DeckPlan::square_colors(rng))),
        Command::Bricks => {
            for entry in catalog() {
                let spoken = entry.spoken.as_deref().unwrap_or("<silence>");
                println!("{}\t{}", entry.id.file_name(&config.audio_extension), spoken);
            }
            Ok(())
        }
        Command::CheckBricks => {
            let library = BrickLibrary::open(&config.brick_dir, &config.audio_extension)?;
            let missing = library.missing_bricks();
            for id in &missing {
                println!("{}", library.path_of(id).display());
            }
            log::info!("{} of {} bricks missing", missing.len(), catalog().len());
            Ok(())
        }
        Command::Silence => {
            write_silence_bricks(&config.brick_dir, config.silence_sample_rate)?;
            Ok(())
        }
    }
}

fn run_deck<F>(config: &GeneratorConfig, plan: F) -> CardResult<()>
where
    F: FnOnce(&mut StdRng) -> CardResult<DeckPlan>,
{
    let library = BrickLibrary::open(&config.brick_dir, &config.audio_extension)?;
    let missing = library.missing_bricks();
    if !missing.is_empty() {
        log::warn!(
            "{} catalog bricks are missing from {}; cards that need them will be skipped",
            missing.len(),
            library.dir().display()
        );
    }

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("using seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let plan = plan(&mut rng)?;
    let mut sink = JsonDeckWriter::new(&config.deck_dir, plan.kind);
    let report = build_deck(&plan, &mut rng, &library, &mut sink, config)?;

    println!(
        "{}: {} cards written, {} skipped",
        report.deck_path.display(),
        report.written,
        report.skipped
    );
    Ok(())
}
