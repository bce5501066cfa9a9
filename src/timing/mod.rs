// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides tempo conversion and tick timing utilities.

pub mod tempo;

pub use tempo::{bpm_to_micros, ticks_to_duration, MAX_TEMPO_MICROS, PPQN};
