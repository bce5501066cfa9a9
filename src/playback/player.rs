// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Real-time track player.

use std::thread;
use std::time::Instant;

use tracing::{info, warn};

use super::schedule::{build_schedule, schedule_from_smf, track_duration, ScheduledMessage};
use super::{messages, MidiOutput, PlaybackError};
use crate::generators::GeneratedTrack;
use crate::timing::PPQN;

/// Sends a generated track to a MIDI output, honoring its timing
pub struct Player<O: MidiOutput> {
    output: O,
    /// Ticks per quarter note the track was written with
    ppqn: u16,
    /// MIDI channel (0-15)
    channel: u8,
    /// Sleep between messages (disabled in tests)
    realtime: bool,
}

impl<O: MidiOutput> Player<O> {
    /// Create a new player
    pub fn new(output: O) -> Self {
        Self {
            output,
            ppqn: PPQN,
            channel: 0,
            realtime: true,
        }
    }

    /// Set PPQN
    pub fn with_ppqn(mut self, ppqn: u16) -> Self {
        self.ppqn = ppqn.max(1);
        self
    }

    /// Set channel
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel.min(15);
        self
    }

    /// Send every message immediately instead of waiting for its time
    pub fn without_delays(mut self) -> Self {
        self.realtime = false;
        self
    }

    /// Get output reference
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Consume the player and return its output
    pub fn into_inner(self) -> O {
        self.output
    }

    /// Play a track to completion.
    ///
    /// On a send failure the channel is silenced before the error is
    /// returned, so no note is left hanging.
    pub fn play(&mut self, track: &GeneratedTrack) -> Result<(), PlaybackError> {
        let schedule = build_schedule(track, self.ppqn, self.channel);
        info!(
            mood = %track.mood,
            events = schedule.len(),
            seconds = track_duration(track, self.ppqn).as_secs_f64(),
            "playing melody"
        );
        self.send_schedule(&schedule)
    }

    /// Play an encoded MIDI file to completion.
    ///
    /// Timing and channels come from the file itself; the player's PPQN
    /// and channel settings are not used.
    pub fn play_smf(&mut self, bytes: &[u8]) -> Result<(), PlaybackError> {
        let schedule = schedule_from_smf(bytes)?;
        info!(
            events = schedule.len(),
            seconds = schedule.last().map_or(0.0, |m| m.at.as_secs_f64()),
            "playing MIDI file"
        );
        self.send_schedule(&schedule)
    }

    fn send_schedule(&mut self, schedule: &[ScheduledMessage]) -> Result<(), PlaybackError> {
        let start = Instant::now();
        for message in schedule {
            if self.realtime {
                let elapsed = start.elapsed();
                if message.at > elapsed {
                    thread::sleep(message.at - elapsed);
                }
            }

            if let Err(e) = self.output.send(&message.bytes) {
                self.silence();
                return Err(e);
            }
        }

        Ok(())
    }

    /// Send All Notes Off on the player's channel, ignoring failures
    pub fn silence(&mut self) {
        let message = [
            messages::CONTROL_CHANGE | self.channel,
            messages::ALL_NOTES_OFF,
            0,
        ];
        let _ = self.output.send(&message);
    }
}

/// Play an encoded MIDI file, logging any failure instead of propagating it.
///
/// Returns whether playback completed.
pub fn play_guarded<O: MidiOutput>(player: &mut Player<O>, bytes: &[u8]) -> bool {
    match player.play_smf(bytes) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "playback failed");
            false
        }
    }
}
