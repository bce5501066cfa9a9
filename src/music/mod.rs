// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music definitions for MOODSEQ.
//!
//! This module provides the fixed mood table that drives melody
//! generation.

pub mod mood;

pub use mood::{MidiNote, Mood, MoodProfile, NOTES_PER_CYCLE};
