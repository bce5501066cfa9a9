// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Conversion of a generated track, or of an encoded MIDI file, into
//! timed MIDI messages.

use std::time::Duration;

use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use super::messages::{NOTE_OFF, NOTE_ON};
use super::PlaybackError;
use crate::generators::GeneratedTrack;
use crate::timing::ticks_to_duration;

/// Tempo a MIDI file plays at until its first set_tempo event (120 BPM)
const DEFAULT_TEMPO_MICROS: u32 = 500_000;

/// A MIDI message with its offset from the start of playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMessage {
    /// Offset from playback start
    pub at: Duration,
    /// Absolute tick position
    pub tick: u64,
    /// Raw channel message
    pub bytes: [u8; 3],
}

/// Build the playback schedule for a track.
///
/// Ticks accumulate first and are converted once per message, so rounding
/// never drifts over long tracks.
pub fn build_schedule(track: &GeneratedTrack, ppqn: u16, channel: u8) -> Vec<ScheduledMessage> {
    let mut tick = 0u64;
    track
        .events
        .iter()
        .map(|event| {
            tick += event.delta() as u64;
            ScheduledMessage {
                at: ticks_to_duration(tick, track.tempo_micros, ppqn),
                tick,
                bytes: event.to_midi_bytes(channel),
            }
        })
        .collect()
}

/// Total wall-clock length of a track
pub fn track_duration(track: &GeneratedTrack, ppqn: u16) -> Duration {
    ticks_to_duration(track.total_ticks(), track.tempo_micros, ppqn)
}

/// Build the playback schedule from an encoded format 0 MIDI file.
///
/// A tempo event applies from its own tick onward. Only note messages
/// are scheduled; other events just advance time.
pub fn schedule_from_smf(bytes: &[u8]) -> Result<Vec<ScheduledMessage>, PlaybackError> {
    let smf = Smf::parse(bytes).map_err(|e| PlaybackError::Decode(e.to_string()))?;

    let ppqn = match smf.header.timing {
        Timing::Metrical(ppqn) => ppqn.as_int(),
        Timing::Timecode(..) => {
            return Err(PlaybackError::Decode("SMPTE timing is not supported".to_string()))
        }
    };
    if smf.header.format != Format::SingleTrack || smf.tracks.len() != 1 {
        return Err(PlaybackError::Decode("expected a single-track file".to_string()));
    }

    let mut tempo = DEFAULT_TEMPO_MICROS;
    let mut tick = 0u64;
    let mut segment_tick = 0u64;
    let mut segment_at = Duration::ZERO;
    let mut schedule = Vec::new();

    for event in &smf.tracks[0] {
        tick += event.delta.as_int() as u64;
        let at = segment_at + ticks_to_duration(tick - segment_tick, tempo, ppqn);

        match event.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(micros)) => {
                segment_at = at;
                segment_tick = tick;
                tempo = micros.as_int();
            }
            TrackEventKind::Midi { channel, message } => {
                let channel = channel.as_int();
                let bytes = match message {
                    MidiMessage::NoteOn { key, vel } => {
                        [NOTE_ON | channel, key.as_int(), vel.as_int()]
                    }
                    MidiMessage::NoteOff { key, vel } => {
                        [NOTE_OFF | channel, key.as_int(), vel.as_int()]
                    }
                    _ => continue,
                };
                schedule.push(ScheduledMessage { at, tick, bytes });
            }
            _ => {}
        }
    }

    Ok(schedule)
}
