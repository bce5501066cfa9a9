// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo conversion.
//!
//! MIDI files store tempo as microseconds per quarter note rather than
//! BPM. Delta times are in ticks, and the file header says how many ticks
//! make up a quarter note (PPQN).

use std::time::Duration;

use crate::error::{GenerateError, Result};

/// Default ticks per quarter note for generated files
pub const PPQN: u16 = 480;

/// Microseconds in one minute
const MICROS_PER_MINUTE: u64 = 60_000_000;

/// Largest tempo value the 3-byte set_tempo payload can hold
pub const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// Convert BPM to microseconds per quarter note, rounded to nearest
pub fn bpm_to_micros(bpm: u32) -> Result<u32> {
    if bpm == 0 {
        return Err(GenerateError::InvalidTempo(bpm));
    }
    let bpm = bpm as u64;
    Ok(((MICROS_PER_MINUTE + bpm / 2) / bpm) as u32)
}

/// Wall-clock length of a tick span at the given tempo and PPQN
pub fn ticks_to_duration(ticks: u64, tempo_micros: u32, ppqn: u16) -> Duration {
    let ppqn = ppqn.max(1) as u128;
    let micros = ticks as u128 * tempo_micros as u128 / ppqn;
    Duration::from_micros(micros.min(u64::MAX as u128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpm_to_micros() {
        assert_eq!(bpm_to_micros(120).unwrap(), 500_000);
        assert_eq!(bpm_to_micros(60).unwrap(), 1_000_000);
        assert_eq!(bpm_to_micros(180).unwrap(), 333_333);
        assert_eq!(bpm_to_micros(1).unwrap(), 60_000_000);
    }

    #[test]
    fn test_bpm_to_micros_rounds() {
        // 60_000_000 / 7 = 8_571_428.57
        assert_eq!(bpm_to_micros(7).unwrap(), 8_571_429);
        // 60_000_000 / 512 = 117_187.5
        assert_eq!(bpm_to_micros(512).unwrap(), 117_188);
        // 60_000_000 / 999 = 60_060.06
        assert_eq!(bpm_to_micros(999).unwrap(), 60_060);
    }

    #[test]
    fn test_zero_bpm_rejected() {
        assert_eq!(bpm_to_micros(0), Err(GenerateError::InvalidTempo(0)));
    }

    #[test]
    fn test_ticks_to_duration() {
        // 120 BPM, 480 PPQN: a quarter note is 500ms
        assert_eq!(ticks_to_duration(480, 500_000, 480), Duration::from_millis(500));
        assert_eq!(ticks_to_duration(400, 500_000, 480), Duration::from_micros(416_666));
        assert_eq!(ticks_to_duration(0, 500_000, 480), Duration::ZERO);
    }
}
