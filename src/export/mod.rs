// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Export system.
//!
//! This module provides:
//! - Standard MIDI file serialization
//! - Temporary and downloadable file artifacts

pub mod artifact;
pub mod smf;

pub use artifact::{remove_artifact, MidiArtifact, DOWNLOAD_FILE_NAME, TEMP_FILE_NAME};
pub use smf::SmfWriter;
