// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mood melody generator.
//!
//! Each cycle shuffles the mood's scale and plays the first four pitches.
//! Rhythm and dynamics are fixed per mood, so the only variation between
//! runs is the note order within each cycle. Every note sounds for the
//! mood's note-on length, followed by its gap before the next note-on.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{GeneratedTrack, NoteEvent};
use crate::error::{GenerateError, Result};
use crate::music::{Mood, NOTES_PER_CYCLE};
use crate::timing::bpm_to_micros;

/// Default number of cycles per melody
pub const DEFAULT_CYCLES: u32 = 12;

/// Generate a melody for `mood` at `tempo_bpm` using the given random source.
///
/// Fails with `InvalidTempo` for a zero tempo and `InvalidDuration` for a
/// zero cycle count. A tempo-only track is never returned.
pub fn generate<R: Rng + ?Sized>(
    mood: Mood,
    tempo_bpm: u32,
    cycles: u32,
    rng: &mut R,
) -> Result<GeneratedTrack> {
    if cycles == 0 {
        return Err(GenerateError::InvalidDuration(cycles));
    }
    let tempo_micros = bpm_to_micros(tempo_bpm)?;
    let profile = mood.profile();

    let mut scale = profile.scale.to_vec();
    let mut events = Vec::with_capacity(cycles as usize * NOTES_PER_CYCLE * 2);
    let mut delta = 0;

    for _ in 0..cycles {
        scale.shuffle(rng);
        for &note in &scale[..NOTES_PER_CYCLE] {
            events.push(NoteEvent::NoteOn {
                note,
                velocity: profile.velocity,
                delta,
            });
            events.push(NoteEvent::NoteOff {
                note,
                velocity: 0,
                delta: profile.note_on_ticks,
            });
            delta = profile.note_off_ticks;
        }
    }

    debug!(
        mood = %mood,
        tempo_bpm,
        cycles,
        events = events.len(),
        "generated melody"
    );

    Ok(GeneratedTrack {
        mood,
        tempo_micros,
        events,
    })
}

/// Generate a melody from a mood label, failing fast on unknown labels
pub fn generate_for_label<R: Rng + ?Sized>(
    label: &str,
    tempo_bpm: u32,
    cycles: u32,
    rng: &mut R,
) -> Result<GeneratedTrack> {
    let mood: Mood = label.parse()?;
    generate(mood, tempo_bpm, cycles, rng)
}

/// Melody generator owning its own random source.
///
/// Each instance shuffles with a private RNG, so separate instances can be
/// used from separate threads without sharing state.
pub struct MelodyGenerator {
    cycles: u32,
    rng: StdRng,
}

impl MelodyGenerator {
    /// Create a new generator seeded from system entropy
    pub fn new() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed for reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Set the number of cycles per melody
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    /// Get cycles per melody
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Generate a melody
    pub fn generate(&mut self, mood: Mood, tempo_bpm: u32) -> Result<GeneratedTrack> {
        generate(mood, tempo_bpm, self.cycles, &mut self.rng)
    }

    /// Generate a melody from a mood label
    pub fn generate_for_label(&mut self, label: &str, tempo_bpm: u32) -> Result<GeneratedTrack> {
        generate_for_label(label, tempo_bpm, self.cycles, &mut self.rng)
    }
}

impl Default for MelodyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
