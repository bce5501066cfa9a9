// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative engine for mood-driven melodies.
//!
//! This module provides the note event types produced by the generator
//! and the track that carries them to serialization and playback.

pub mod melody;

pub use melody::{generate, generate_for_label, MelodyGenerator, DEFAULT_CYCLES};

use crate::music::{MidiNote, Mood};
use crate::playback::messages::{NOTE_OFF, NOTE_ON};

/// A timed note event. Deltas are in ticks since the previous event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    NoteOn {
        note: MidiNote,
        velocity: u8,
        delta: u32,
    },
    NoteOff {
        note: MidiNote,
        velocity: u8,
        delta: u32,
    },
}

impl NoteEvent {
    /// Note number
    pub fn note(&self) -> MidiNote {
        match *self {
            NoteEvent::NoteOn { note, .. } | NoteEvent::NoteOff { note, .. } => note,
        }
    }

    /// Velocity
    pub fn velocity(&self) -> u8 {
        match *self {
            NoteEvent::NoteOn { velocity, .. } | NoteEvent::NoteOff { velocity, .. } => velocity,
        }
    }

    /// Ticks since the previous event
    pub fn delta(&self) -> u32 {
        match *self {
            NoteEvent::NoteOn { delta, .. } | NoteEvent::NoteOff { delta, .. } => delta,
        }
    }

    pub fn is_note_on(&self) -> bool {
        matches!(self, NoteEvent::NoteOn { .. })
    }

    /// Raw channel message bytes
    pub fn to_midi_bytes(&self, channel: u8) -> [u8; 3] {
        match *self {
            NoteEvent::NoteOn { note, velocity, .. } => {
                [NOTE_ON | (channel & 0x0F), note & 0x7F, velocity & 0x7F]
            }
            NoteEvent::NoteOff { note, velocity, .. } => {
                [NOTE_OFF | (channel & 0x0F), note & 0x7F, velocity & 0x7F]
            }
        }
    }
}

/// A generated single-voice track: one leading tempo event followed by
/// note events in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTrack {
    /// Mood the track was generated for
    pub mood: Mood,
    /// Tempo in microseconds per quarter note, set at tick 0
    pub tempo_micros: u32,
    /// Note events after the tempo event
    pub events: Vec<NoteEvent>,
}

impl GeneratedTrack {
    /// Number of events including the leading tempo event
    pub fn len(&self) -> usize {
        1 + self.events.len()
    }

    /// A track always holds its tempo event
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Total length in ticks
    pub fn total_ticks(&self) -> u64 {
        self.events.iter().map(|e| e.delta() as u64).sum()
    }

    /// Pitches of the note-on events, in order
    pub fn notes(&self) -> Vec<MidiNote> {
        self.events
            .iter()
            .filter(|e| e.is_note_on())
            .map(|e| e.note())
            .collect()
    }
}
