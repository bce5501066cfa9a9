// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Errors raised while generating or serializing a melody.

use thiserror::Error;

/// Generation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Mood label is not one of the known moods
    #[error("Unknown mood: {0:?}")]
    InvalidMood(String),

    /// Cycle count must be at least 1
    #[error("Invalid duration: {0} cycles (must be at least 1)")]
    InvalidDuration(u32),

    /// Tempo must be a positive BPM value
    #[error("Invalid tempo: {0} BPM (must be positive)")]
    InvalidTempo(u32),

    /// Track could not be encoded as a MIDI file
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Result alias for generation operations
pub type Result<T> = std::result::Result<T, GenerateError>;
