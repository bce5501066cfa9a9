// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use moodseq::config::SettingsFile;
use moodseq::export::{MidiArtifact, SmfWriter};
use moodseq::playback::{self, play_guarded, Player};
use moodseq::{MelodyGenerator, Mood};

fn print_usage() {
    println!("MOODSEQ - Mood Melody Generator");
    println!();
    println!("Usage: moodseq [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --mood <MOOD>       Happy, Sad, Calm, Energetic or Mysterious (default Happy)");
    println!("  --tempo <BPM>       Tempo, clamped to 60-180 (default 120)");
    println!("  --cycles <N>        Cycles of four notes (default 12)");
    println!("  --seed <N>          Seed the shuffle for a reproducible melody");
    println!("  --config <PATH>     Load settings from a YAML or TOML file");
    println!("  --out <DIR>         Directory to save the melody in");
    println!("  --play <PORT>       Play through MIDI output PORT (index or name)");
    println!("  --list-midi         List available MIDI outputs");
    println!("  -v, --verbose       Debug logging");
    println!("  --help              Show this help message");
}

/// Command line options; unset values fall back to the settings file
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    mood: Option<String>,
    tempo: Option<u32>,
    cycles: Option<u32>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    play: Option<String>,
    list_midi: bool,
    verbose: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} requires a value", name))
        };

        match arg.as_str() {
            "--mood" => options.mood = Some(value("--mood")?),
            "--tempo" => {
                let raw = value("--tempo")?;
                options.tempo = Some(raw.parse().map_err(|_| anyhow!("Invalid tempo: {}", raw))?);
            }
            "--cycles" => {
                let raw = value("--cycles")?;
                let cycles = raw
                    .parse()
                    .map_err(|_| anyhow!("Invalid cycle count: {}", raw))?;
                options.cycles = Some(cycles);
            }
            "--seed" => {
                let raw = value("--seed")?;
                options.seed = Some(raw.parse().map_err(|_| anyhow!("Invalid seed: {}", raw))?);
            }
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--out" => options.out = Some(PathBuf::from(value("--out")?)),
            "--play" => options.play = Some(value("--play")?),
            "--list-midi" => options.list_midi = true,
            "-v" | "--verbose" => options.verbose = true,
            "--help" | "-h" => options.help = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn list_midi() -> Result<()> {
    let ports = playback::list_output_ports()?;
    if ports.is_empty() {
        println!("No MIDI outputs found");
    }
    for (index, name) in ports.iter().enumerate() {
        println!("{}: {}", index, name);
    }
    Ok(())
}

/// Generate, play and save a melody, using a private temporary directory
/// for the intermediate file
fn run(options: &CliOptions, settings: &SettingsFile) -> Result<()> {
    let work_dir = tempfile::Builder::new()
        .prefix("moodseq-")
        .tempdir()
        .context("Failed to create temporary directory")?;
    run_in(options, settings, work_dir.path())
}

fn run_in(options: &CliOptions, settings: &SettingsFile, work_dir: &Path) -> Result<()> {
    let gen_settings = &settings.generator;

    // Unknown moods fail here, before anything is generated
    let mood = match &options.mood {
        Some(label) => label.parse::<Mood>()?,
        None => gen_settings.mood,
    };

    let requested = options.tempo.unwrap_or(gen_settings.tempo);
    let tempo = gen_settings.clamp_tempo(requested);
    if tempo != requested {
        warn!(requested, tempo, "tempo clamped to supported range");
    }

    let cycles = options.cycles.unwrap_or(gen_settings.cycles);
    let mut generator = match options.seed.or(gen_settings.seed) {
        Some(seed) => MelodyGenerator::with_seed(seed),
        None => MelodyGenerator::new(),
    }
    .with_cycles(cycles);

    let track = generator.generate(mood, tempo)?;

    let mut writer = SmfWriter::new();
    writer.set_ppqn(gen_settings.ppqn);
    writer.set_channel(gen_settings.channel);
    let bytes = writer.to_bytes(&track)?;
    info!(%mood, tempo, cycles, bytes = bytes.len(), "generated melody");

    let artifact =
        MidiArtifact::write(work_dir, &bytes).context("Failed to write temporary MIDI file")?;

    let delivered = deliver(options, settings, &artifact);

    if let Err(e) = artifact.cleanup() {
        warn!(error = %e, "failed to remove temporary MIDI file");
    }

    let saved = delivered?;
    println!("Your {} melody is ready: {}", mood, saved.display());
    Ok(())
}

/// Play the temporary file if a port is configured, then save a copy
fn deliver(
    options: &CliOptions,
    settings: &SettingsFile,
    artifact: &MidiArtifact,
) -> Result<PathBuf> {
    if let Some(port) = options.play.as_ref().or(settings.playback.port.as_ref()) {
        match playback::open_output(port) {
            Ok(output) => {
                let bytes = artifact.read().context("Failed to read temporary MIDI file")?;
                let mut player = Player::new(output);
                if play_guarded(&mut player, &bytes) {
                    println!("Music played on MIDI output {}", port);
                }
            }
            Err(e) => warn!(error = %e, "playback unavailable"),
        }
    }

    let directory = options
        .out
        .clone()
        .unwrap_or_else(|| settings.output.directory.clone());
    fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create output directory: {:?}", directory))?;
    artifact
        .export_to(&directory, &settings.output.file_name)
        .context("Failed to save melody")
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return Ok(());
    }

    init_logging(options.verbose);

    if options.list_midi {
        return list_midi();
    }

    let settings = match &options.config {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };

    run(&options, &settings)
}
