// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! midir backend.
//!
//! This module provides a cross-platform implementation of the
//! `MidiOutput` trait, sending to any port the system exposes (a software
//! synth such as FluidSynth or TiMidity, or a hardware device).

use midir::{MidiOutputConnection, MidiOutputPort};

use super::{MidiOutput, PlaybackError};

const CLIENT_NAME: &str = "MOODSEQ";

/// midir output connection
pub struct MidirOutput {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidirOutput {
    /// Connect to an output port.
    ///
    /// # Arguments
    /// * `port` - Port index, or a partial, case-insensitive port name
    pub fn connect(port: &str) -> Result<Self, PlaybackError> {
        let output = midir::MidiOutput::new(CLIENT_NAME)
            .map_err(|e| PlaybackError::InitFailed(e.to_string()))?;

        let ports = output.ports();
        if ports.is_empty() {
            return Err(PlaybackError::PortNotFound("no MIDI outputs available".to_string()));
        }

        let (target, port_name) = find_port(&output, &ports, port)
            .ok_or_else(|| PlaybackError::PortNotFound(port.to_string()))?;

        let connection = output
            .connect(&target, "MOODSEQ Output")
            .map_err(|e| PlaybackError::ConnectFailed(e.to_string()))?;

        Ok(Self {
            connection,
            port_name,
        })
    }

    /// Name of the connected port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiOutput for MidirOutput {
    fn send(&mut self, message: &[u8]) -> Result<(), PlaybackError> {
        self.connection
            .send(message)
            .map_err(|e| PlaybackError::SendFailed(e.to_string()))
    }
}

fn find_port(
    output: &midir::MidiOutput,
    ports: &[MidiOutputPort],
    query: &str,
) -> Option<(MidiOutputPort, String)> {
    if let Ok(index) = query.trim().parse::<usize>() {
        let port = ports.get(index)?;
        let name = output.port_name(port).unwrap_or_else(|_| format!("port {}", index));
        return Some((port.clone(), name));
    }

    let query = query.to_lowercase();
    ports.iter().find_map(|port| {
        let name = output.port_name(port).ok()?;
        name.to_lowercase()
            .contains(&query)
            .then(|| (port.clone(), name))
    })
}

/// Names of the available MIDI output ports
pub fn list_output_ports() -> Result<Vec<String>, PlaybackError> {
    let output = midir::MidiOutput::new(CLIENT_NAME)
        .map_err(|e| PlaybackError::InitFailed(e.to_string()))?;

    Ok(output
        .ports()
        .iter()
        .map(|port| output.port_name(port).unwrap_or_else(|_| "<unknown>".to_string()))
        .collect())
}
