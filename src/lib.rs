// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MOODSEQ - mood-driven melody generator.
//!
//! Picks a scale, dynamics and rhythm from a mood, shuffles the scale into
//! a short melody and encodes it as a Standard MIDI File.
//!
//! ```no_run
//! let bytes = moodseq::generate_midi("Calm", 96).unwrap();
//! assert_eq!(&bytes[0..4], b"MThd");
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod music;
pub mod playback;
pub mod timing;

pub use error::{GenerateError, Result};
pub use export::SmfWriter;
pub use generators::{generate, GeneratedTrack, MelodyGenerator, NoteEvent, DEFAULT_CYCLES};
pub use music::{Mood, MoodProfile};

/// Generate a melody for a mood label and tempo and encode it as a MIDI file.
///
/// Uses the default cycle count, PPQN and channel, and a thread-local
/// random source.
pub fn generate_midi(mood: &str, tempo_bpm: u32) -> Result<Vec<u8>> {
    let mut rng = rand::thread_rng();
    let track = generators::generate_for_label(mood, tempo_bpm, DEFAULT_CYCLES, &mut rng)?;
    SmfWriter::new().to_bytes(&track)
}
