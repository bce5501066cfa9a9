// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for MOODSEQ
//!
//! These tests exercise the public API end to end: generation, MIDI file
//! encoding, parsing the result back with an independent MIDI parser, and
//! the file artifact lifecycle.

use std::collections::{HashMap, HashSet};

use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

use moodseq::export::{MidiArtifact, DOWNLOAD_FILE_NAME};
use moodseq::generators::generate_for_label;
use moodseq::{generate, generate_midi, GenerateError, Mood, NoteEvent, SmfWriter, DEFAULT_CYCLES};

/// (is_note_on, key, velocity, delta) decoded from a parsed file
type Decoded = (bool, u8, u8, u32);

fn decode(bytes: &[u8]) -> (u32, Vec<Decoded>) {
    let smf = Smf::parse(bytes).expect("generated file should parse");
    assert_eq!(smf.header.format, Format::SingleTrack);
    match smf.header.timing {
        Timing::Metrical(ppqn) => assert_eq!(ppqn.as_int(), 480),
        other => panic!("unexpected timing {:?}", other),
    }
    assert_eq!(smf.tracks.len(), 1);

    let track = &smf.tracks[0];
    let tempo = match track[0].kind {
        TrackEventKind::Meta(MetaMessage::Tempo(t)) => {
            assert_eq!(track[0].delta.as_int(), 0);
            t.as_int()
        }
        other => panic!("first event should be tempo, got {:?}", other),
    };
    assert!(matches!(
        track.last().map(|e| e.kind),
        Some(TrackEventKind::Meta(MetaMessage::EndOfTrack))
    ));

    let notes = track[1..track.len() - 1]
        .iter()
        .map(|event| match event.kind {
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, vel },
            } => {
                assert_eq!(channel.as_int(), 0);
                (true, key.as_int(), vel.as_int(), event.delta.as_int())
            }
            TrackEventKind::Midi {
                message: MidiMessage::NoteOff { key, vel },
                ..
            } => (false, key.as_int(), vel.as_int(), event.delta.as_int()),
            other => panic!("unexpected event {:?}", other),
        })
        .collect();

    (tempo, notes)
}

#[test]
fn test_event_count_for_all_moods_and_tempos() {
    let mut rng = StdRng::seed_from_u64(2024);

    for mood in Mood::ALL {
        for tempo in 1..=1000 {
            let track = generate(mood, tempo, DEFAULT_CYCLES, &mut rng).unwrap();
            assert_eq!(track.len(), 1 + 8 * DEFAULT_CYCLES as usize);
        }
        for cycles in [1, 5, 30] {
            let track = generate(mood, 120, cycles, &mut rng).unwrap();
            assert_eq!(track.len(), 1 + 8 * cycles as usize);
        }
    }
}

#[test]
fn test_tempo_value_matches_formula() {
    let mut rng = StdRng::seed_from_u64(1);

    for tempo in 1..=1000u32 {
        let track = generate(Mood::Calm, tempo, 1, &mut rng).unwrap();
        let expected = (60_000_000.0 / tempo as f64).round() as u32;
        assert_eq!(track.tempo_micros, expected, "tempo {}", tempo);
    }
}

#[test]
fn test_notes_match_profile() {
    let mut rng = StdRng::seed_from_u64(77);

    for mood in Mood::ALL {
        let profile = mood.profile();
        let track = generate(mood, 110, DEFAULT_CYCLES, &mut rng).unwrap();

        for event in &track.events {
            match *event {
                NoteEvent::NoteOn { note, velocity, .. } => {
                    assert!(profile.contains(note), "{} not in {} scale", note, mood);
                    assert_eq!(velocity, profile.velocity);
                }
                NoteEvent::NoteOff { velocity, .. } => assert_eq!(velocity, 0),
            }
        }
    }
}

#[test]
fn test_cycles_draw_four_distinct_notes() {
    let mut rng = StdRng::seed_from_u64(5);

    for mood in Mood::ALL {
        let scale: HashSet<u8> = mood.profile().scale.iter().copied().collect();
        for _ in 0..50 {
            let track = generate(mood, 120, DEFAULT_CYCLES, &mut rng).unwrap();
            for cycle in track.notes().chunks(4) {
                let drawn: HashSet<u8> = cycle.iter().copied().collect();
                assert_eq!(drawn.len(), 4);
                assert!(drawn.is_subset(&scale));
            }
        }
    }
}

/// Chi-square statistic of observed counts against a uniform expectation
fn chi_square(counts: &HashMap<u8, u64>, categories: usize, total: u64) -> f64 {
    let expected = total as f64 / categories as f64;
    let mut statistic = 0.0;
    for value in counts.values() {
        let diff = *value as f64 - expected;
        statistic += diff * diff / expected;
    }
    // Categories never observed contribute their full expectation
    statistic + (categories - counts.len()) as f64 * expected
}

#[test]
fn test_no_positional_bias() {
    let mut rng = StdRng::seed_from_u64(31337);

    // Critical values at p = 0.0001
    let cases = [(Mood::Happy, 27.856), (Mood::Calm, 23.513)];

    for (mood, critical) in cases {
        let categories = mood.profile().scale.len();
        let mut positions: Vec<HashMap<u8, u64>> = vec![HashMap::new(); 4];
        let mut cycles_seen = 0u64;

        for _ in 0..2000 {
            let track = generate(mood, 120, DEFAULT_CYCLES, &mut rng).unwrap();
            for cycle in track.notes().chunks(4) {
                for (position, note) in cycle.iter().enumerate() {
                    *positions[position].entry(*note).or_insert(0) += 1;
                }
                cycles_seen += 1;
            }
        }

        for (position, counts) in positions.iter().enumerate() {
            assert_eq!(counts.len(), categories);
            let statistic = chi_square(counts, categories, cycles_seen);
            assert!(
                statistic < critical,
                "{} position {} biased: chi-square {:.2}",
                mood,
                position,
                statistic
            );
        }
    }
}

#[test]
fn test_order_varies_across_calls() {
    let mut rng = StdRng::seed_from_u64(8);
    let runs: HashSet<Vec<u8>> = (0..20)
        .map(|_| generate(Mood::Sad, 120, DEFAULT_CYCLES, &mut rng).unwrap().notes())
        .collect();
    assert!(runs.len() > 1);
}

#[test]
fn test_unknown_mood_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = generate_for_label("Atlantean", 120, DEFAULT_CYCLES, &mut rng).unwrap_err();
    assert_eq!(err, GenerateError::InvalidMood("Atlantean".to_string()));

    assert!(matches!(
        generate_midi("Atlantean", 120),
        Err(GenerateError::InvalidMood(_))
    ));
}

#[test]
fn test_zero_duration_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = generate_for_label("Happy", 120, 0, &mut rng).unwrap_err();
    assert_eq!(err, GenerateError::InvalidDuration(0));
}

#[test]
fn test_round_trip_through_midi_parser() {
    let mut rng = StdRng::seed_from_u64(404);

    for mood in Mood::ALL {
        for tempo in [4, 60, 120, 180, 1000] {
            let track = generate(mood, tempo, DEFAULT_CYCLES, &mut rng).unwrap();
            let bytes = SmfWriter::new().to_bytes(&track).unwrap();

            let (parsed_tempo, parsed_notes) = decode(&bytes);
            assert_eq!(parsed_tempo, track.tempo_micros);

            let expected: Vec<Decoded> = track
                .events
                .iter()
                .map(|e| (e.is_note_on(), e.note(), e.velocity(), e.delta()))
                .collect();
            assert_eq!(parsed_notes, expected);
        }
    }
}

#[test]
fn test_slow_tempo_cannot_be_encoded() {
    let mut rng = StdRng::seed_from_u64(3);
    let track = generate(Mood::Calm, 3, 1, &mut rng).unwrap();
    assert!(matches!(
        SmfWriter::new().to_bytes(&track),
        Err(GenerateError::Serialization(_))
    ));
}

#[test]
fn test_generate_midi_convenience() {
    let bytes = generate_midi("Mysterious", 100).unwrap();
    let (tempo, notes) = decode(&bytes);

    assert_eq!(tempo, 600_000);
    assert_eq!(notes.len(), 8 * DEFAULT_CYCLES as usize);
    assert_eq!(notes[0].3, 0);
    assert!(notes.iter().skip(1).step_by(2).all(|n| n.3 == 500));
    assert!(notes.iter().skip(2).step_by(2).all(|n| n.3 == 300));
}

#[test]
fn test_artifact_lifecycle() {
    let temp = tempfile::tempdir().unwrap();
    let downloads = tempfile::tempdir().unwrap();

    let bytes = generate_midi("Happy", 120).unwrap();
    let artifact = MidiArtifact::write(temp.path(), &bytes).unwrap();
    let saved = artifact.export_to(downloads.path(), DOWNLOAD_FILE_NAME).unwrap();

    assert_eq!(std::fs::read(&saved).unwrap(), bytes);

    let temp_path = artifact.path().to_path_buf();
    assert!(artifact.cleanup().unwrap());
    assert!(!temp_path.exists());
    assert!(saved.exists());
}
