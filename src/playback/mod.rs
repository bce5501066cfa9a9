// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback of generated melodies.
//!
//! This module provides a trait-based abstraction for MIDI output, so a
//! track can be rendered through any backend (midir, a test mock, ...),
//! and a player that sends a track's events, or the events of an encoded
//! MIDI file, in real time.
//!
//! Playback failures are reported as [`PlaybackError`] and never abort
//! the caller; see [`play_guarded`].

#[cfg(feature = "midi-out")]
pub mod midir_backend;
pub mod player;
pub mod schedule;

use thiserror::Error;

#[cfg(feature = "midi-out")]
pub use midir_backend::{list_output_ports, MidirOutput};
pub use player::{play_guarded, Player};
pub use schedule::{build_schedule, schedule_from_smf, track_duration, ScheduledMessage};

/// Playback error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// MIDI output support was not compiled in
    #[error("MIDI output is not available (build with the `midi-out` feature)")]
    Unavailable,
    /// Failed to initialize the MIDI client
    #[error("MIDI initialization failed: {0}")]
    InitFailed(String),
    /// No output port matched the request
    #[error("MIDI output port not found: {0}")]
    PortNotFound(String),
    /// Failed to connect to the port
    #[error("Failed to connect to MIDI output: {0}")]
    ConnectFailed(String),
    /// Failed to send a message
    #[error("Failed to send MIDI message: {0}")]
    SendFailed(String),
    /// MIDI file could not be read back for playback
    #[error("Failed to decode MIDI file: {0}")]
    Decode(String),
}

/// Trait for MIDI output implementations.
pub trait MidiOutput {
    /// Send a MIDI message immediately.
    ///
    /// # Arguments
    /// * `message` - Raw MIDI bytes (e.g., `[0x90, 60, 127]` for Note On)
    fn send(&mut self, message: &[u8]) -> Result<(), PlaybackError>;
}

impl<T: MidiOutput + ?Sized> MidiOutput for Box<T> {
    fn send(&mut self, message: &[u8]) -> Result<(), PlaybackError> {
        (**self).send(message)
    }
}

/// Open a MIDI output port by index or (partial) name
#[cfg(feature = "midi-out")]
pub fn open_output(port: &str) -> Result<Box<dyn MidiOutput>, PlaybackError> {
    Ok(Box::new(MidirOutput::connect(port)?))
}

/// Open a MIDI output port by index or (partial) name
#[cfg(not(feature = "midi-out"))]
pub fn open_output(_port: &str) -> Result<Box<dyn MidiOutput>, PlaybackError> {
    Err(PlaybackError::Unavailable)
}

/// Names of the available MIDI output ports
#[cfg(not(feature = "midi-out"))]
pub fn list_output_ports() -> Result<Vec<String>, PlaybackError> {
    Err(PlaybackError::Unavailable)
}

/// MIDI message constants
pub mod messages {
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const CONTROL_CHANGE: u8 = 0xB0;

    /// Controller number for All Notes Off
    pub const ALL_NOTES_OFF: u8 = 123;
}
