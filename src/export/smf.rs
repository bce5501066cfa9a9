// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file export.
//!
//! Writes a generated track as a Type 0 (single track) MIDI file: a header
//! chunk followed by one track chunk holding the tempo meta event, the note
//! events and the end-of-track marker, each prefixed by its delta time.

use std::io::Write;

use crate::error::{GenerateError, Result};
use crate::generators::GeneratedTrack;
use crate::timing::{MAX_TEMPO_MICROS, PPQN};

/// Largest delta a variable-length quantity may encode
const MAX_DELTA: u32 = 0x0FFF_FFFF;

/// Largest metrical division (bit 15 selects SMPTE timing)
const MAX_PPQN: u16 = 0x7FFF;

/// Event in a track chunk
#[derive(Debug, Clone)]
struct ChunkEvent {
    /// Ticks since the previous event
    delta: u32,
    /// Event data
    data: Vec<u8>,
}

impl ChunkEvent {
    fn tempo(delta: u32, micros: u32) -> Result<Self> {
        if micros > MAX_TEMPO_MICROS {
            return Err(GenerateError::Serialization(format!(
                "tempo of {} us per quarter note does not fit in 24 bits",
                micros
            )));
        }
        Ok(Self {
            delta,
            data: vec![
                0xFF, 0x51, 0x03,
                ((micros >> 16) & 0xFF) as u8,
                ((micros >> 8) & 0xFF) as u8,
                (micros & 0xFF) as u8,
            ],
        })
    }

    fn end_of_track() -> Self {
        Self {
            delta: 0,
            data: vec![0xFF, 0x2F, 0x00],
        }
    }
}

/// MIDI file writer
#[derive(Debug, Clone)]
pub struct SmfWriter {
    /// PPQN (ticks per quarter note)
    ppqn: u16,
    /// MIDI channel (0-15)
    channel: u8,
}

impl SmfWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self {
            ppqn: PPQN,
            channel: 0,
        }
    }

    /// Set PPQN
    pub fn set_ppqn(&mut self, ppqn: u16) {
        self.ppqn = ppqn.clamp(1, MAX_PPQN);
    }

    /// Get PPQN
    pub fn ppqn(&self) -> u16 {
        self.ppqn
    }

    /// Set channel
    pub fn set_channel(&mut self, channel: u8) {
        self.channel = channel.min(15);
    }

    /// Get channel
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Export to bytes
    pub fn to_bytes(&self, track: &GeneratedTrack) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(track, &mut buffer)?;
        Ok(buffer)
    }

    /// Write MIDI data to writer
    pub fn write<W: Write>(&self, track: &GeneratedTrack, writer: &mut W) -> Result<()> {
        let mut events = Vec::with_capacity(track.events.len() + 2);
        events.push(ChunkEvent::tempo(0, track.tempo_micros)?);

        for event in &track.events {
            events.push(ChunkEvent {
                delta: event.delta(),
                data: event.to_midi_bytes(self.channel).to_vec(),
            });
        }
        events.push(ChunkEvent::end_of_track());

        let mut file = Vec::new();
        self.write_header(&mut file);
        self.write_track(&mut file, &events)?;

        writer
            .write_all(&file)
            .map_err(|e| GenerateError::Serialization(e.to_string()))
    }

    /// Write MIDI file header chunk
    fn write_header(&self, out: &mut Vec<u8>) {
        // MThd
        out.extend_from_slice(b"MThd");
        // Chunk length (always 6)
        out.extend_from_slice(&[0, 0, 0, 6]);
        // Format 0
        out.extend_from_slice(&0u16.to_be_bytes());
        // One track
        out.extend_from_slice(&1u16.to_be_bytes());
        // PPQN
        out.extend_from_slice(&self.ppqn.to_be_bytes());
    }

    /// Write a track chunk
    fn write_track(&self, out: &mut Vec<u8>, events: &[ChunkEvent]) -> Result<()> {
        let mut track_data = Vec::new();

        for event in events {
            write_variable_length(&mut track_data, event.delta)?;
            track_data.extend_from_slice(&event.data);
        }

        // MTrk
        out.extend_from_slice(b"MTrk");
        // Track length
        let length = u32::try_from(track_data.len()).map_err(|_| {
            GenerateError::Serialization("track chunk exceeds 4 GiB".to_string())
        })?;
        out.extend_from_slice(&length.to_be_bytes());
        // Track data
        out.extend_from_slice(&track_data);

        Ok(())
    }
}

impl Default for SmfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write variable-length quantity
fn write_variable_length(out: &mut Vec<u8>, mut value: u32) -> Result<()> {
    if value > MAX_DELTA {
        return Err(GenerateError::Serialization(format!(
            "delta time {} exceeds 28 bits",
            value
        )));
    }

    let mut bytes = Vec::with_capacity(4);

    bytes.push((value & 0x7F) as u8);
    value >>= 7;

    while value > 0 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }

    bytes.reverse();
    out.extend_from_slice(&bytes);
    Ok(())
}
