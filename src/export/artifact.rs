// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! On-disk artifacts for generated melodies.
//!
//! A generated file is written to a temporary artifact for playback,
//! copied out under a fixed download name, and removed afterwards.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// File name of the temporary artifact
pub const TEMP_FILE_NAME: &str = "generated_music.mid";

/// Suggested file name for the downloadable copy
pub const DOWNLOAD_FILE_NAME: &str = "my_melody.mid";

/// A MIDI file written to disk
#[derive(Debug)]
pub struct MidiArtifact {
    path: PathBuf,
}

impl MidiArtifact {
    /// Write bytes to the temporary artifact in `dir`
    pub fn write<P: AsRef<Path>>(dir: P, bytes: &[u8]) -> io::Result<Self> {
        Self::write_as(dir.as_ref().join(TEMP_FILE_NAME), bytes)
    }

    /// Write bytes to an explicit path
    pub fn write_as<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote MIDI artifact");
        Ok(Self { path })
    }

    /// Artifact location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the artifact back
    pub fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    /// Copy the artifact into `dir` under `file_name`
    pub fn export_to<P: AsRef<Path>>(&self, dir: P, file_name: &str) -> io::Result<PathBuf> {
        let target = dir.as_ref().join(file_name);
        fs::copy(&self.path, &target)?;
        info!(path = %target.display(), "saved melody");
        Ok(target)
    }

    /// Remove the artifact. Returns whether a file was actually removed.
    pub fn cleanup(self) -> io::Result<bool> {
        remove_artifact(&self.path)
    }
}

/// Remove a file, treating an already absent file as success.
///
/// Returns `true` if a file was removed.
pub fn remove_artifact<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => {
            debug!(path = %path.as_ref().display(), "removed artifact");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
