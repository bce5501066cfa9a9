// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for MOODSEQ.
//!
//! Settings are read from a YAML file (or TOML, when the file name ends in
//! `.toml`). Every field has a default, so an empty file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::export::DOWNLOAD_FILE_NAME;
use crate::generators::DEFAULT_CYCLES;
use crate::music::Mood;
use crate::timing::PPQN;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SettingsFile {
    /// Generation defaults and limits
    #[serde(default)]
    pub generator: GeneratorSettings,
    /// Output files
    #[serde(default)]
    pub output: OutputSettings,
    /// Playback
    #[serde(default)]
    pub playback: PlaybackSettings,
}

impl SettingsFile {
    /// Load settings from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
        let settings = if is_toml {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse settings from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let gen = &self.generator;
        if gen.cycles == 0 {
            bail!("generator.cycles must be at least 1");
        }
        if gen.min_tempo == 0 || gen.min_tempo > gen.max_tempo {
            bail!(
                "invalid tempo range [{}, {}]",
                gen.min_tempo,
                gen.max_tempo
            );
        }
        if gen.ppqn == 0 || gen.ppqn > 0x7FFF {
            bail!("generator.ppqn must be between 1 and 32767");
        }
        if gen.channel > 15 {
            bail!("generator.channel must be between 0 and 15");
        }
        if self.output.file_name.trim().is_empty() {
            bail!("output.file_name must not be empty");
        }
        Ok(())
    }
}

/// Generation defaults and limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorSettings {
    /// Mood used when none is given
    #[serde(default = "default_mood")]
    pub mood: Mood,
    /// Tempo in BPM used when none is given
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    /// Lowest tempo accepted from the user
    #[serde(default = "default_min_tempo")]
    pub min_tempo: u32,
    /// Highest tempo accepted from the user
    #[serde(default = "default_max_tempo")]
    pub max_tempo: u32,
    /// Cycles of four notes per melody
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    /// Ticks per quarter note
    #[serde(default = "default_ppqn")]
    pub ppqn: u16,
    /// MIDI channel (0-15)
    #[serde(default)]
    pub channel: u8,
    /// Fixed RNG seed (None = fresh entropy per run)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_mood() -> Mood {
    Mood::Happy
}
fn default_tempo() -> u32 {
    120
}
fn default_min_tempo() -> u32 {
    60
}
fn default_max_tempo() -> u32 {
    180
}
fn default_cycles() -> u32 {
    DEFAULT_CYCLES
}
fn default_ppqn() -> u16 {
    PPQN
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            mood: default_mood(),
            tempo: default_tempo(),
            min_tempo: default_min_tempo(),
            max_tempo: default_max_tempo(),
            cycles: default_cycles(),
            ppqn: default_ppqn(),
            channel: 0,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// Clamp a user tempo into the accepted range
    pub fn clamp_tempo(&self, bpm: u32) -> u32 {
        bpm.clamp(self.min_tempo, self.max_tempo)
    }
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    /// Directory the downloadable file is saved to
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// Name of the downloadable file
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_name() -> String {
    DOWNLOAD_FILE_NAME.to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            file_name: default_file_name(),
        }
    }
}

/// Playback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlaybackSettings {
    /// MIDI output port (index or partial name); None disables playback
    #[serde(default)]
    pub port: Option<String>,
}
