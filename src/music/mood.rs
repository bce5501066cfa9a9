// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mood definitions and their fixed musical profiles.
//!
//! Each mood maps to a scale, a fixed velocity and a rhythmic pattern
//! (how long a note sounds and how long the gap before the next note is).
//! The table is static and read-only; lookup is an exhaustive match, so
//! adding a mood without a profile does not compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Number of pitches drawn from the scale per cycle
pub const NOTES_PER_CYCLE: usize = 4;

/// Moods a melody can be generated for.
///
/// Deserializes through [`FromStr`], so config files accept the same labels
/// as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Mood {
    Happy,
    Sad,
    Calm,
    Energetic,
    Mysterious,
}

impl Mood {
    /// All moods in presentation order
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Calm,
        Mood::Energetic,
        Mood::Mysterious,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Calm => "Calm",
            Mood::Energetic => "Energetic",
            Mood::Mysterious => "Mysterious",
        }
    }

    /// Get the fixed profile for this mood
    pub fn profile(self) -> &'static MoodProfile {
        match self {
            Mood::Happy => &HAPPY,
            Mood::Sad => &SAD,
            Mood::Calm => &CALM,
            Mood::Energetic => &ENERGETIC,
            Mood::Mysterious => &MYSTERIOUS,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = GenerateError;

    /// Parse a mood label, ignoring ASCII case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GenerateError::InvalidMood(s.to_string()))
    }
}

impl TryFrom<String> for Mood {
    type Error = GenerateError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

/// Fixed musical profile of a mood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodProfile {
    /// Pitches to draw from, lowest first
    pub scale: &'static [MidiNote],
    /// Note-on velocity (1-127)
    pub velocity: u8,
    /// Ticks each note sounds for
    pub note_on_ticks: u32,
    /// Ticks of silence before the next note
    pub note_off_ticks: u32,
}

impl MoodProfile {
    /// Check if a pitch belongs to this profile's scale
    pub fn contains(&self, note: MidiNote) -> bool {
        self.scale.contains(&note)
    }
}

// C major, C4 to C5
static HAPPY: MoodProfile = MoodProfile {
    scale: &[60, 62, 64, 67, 69, 71, 72],
    velocity: 100,
    note_on_ticks: 400,
    note_off_ticks: 100,
};

// A minor, A3 to G4
static SAD: MoodProfile = MoodProfile {
    scale: &[57, 59, 60, 62, 64, 65, 67],
    velocity: 60,
    note_on_ticks: 800,
    note_off_ticks: 200,
};

// C major pentatonic, C4 to D5
static CALM: MoodProfile = MoodProfile {
    scale: &[60, 64, 67, 71, 74],
    velocity: 80,
    note_on_ticks: 600,
    note_off_ticks: 150,
};

static ENERGETIC: MoodProfile = MoodProfile {
    scale: &[62, 65, 67, 69, 72, 74, 77],
    velocity: 110,
    note_on_ticks: 300,
    note_off_ticks: 50,
};

static MYSTERIOUS: MoodProfile = MoodProfile {
    scale: &[58, 61, 63, 66, 68, 70, 73],
    velocity: 70,
    note_on_ticks: 500,
    note_off_ticks: 300,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_labels() {
        for mood in Mood::ALL {
            assert_eq!(mood.label().parse::<Mood>().unwrap(), mood);
            assert_eq!(mood.to_string(), mood.label());
        }

        assert_eq!("calm".parse::<Mood>().unwrap(), Mood::Calm);
        assert_eq!("  MYSTERIOUS ".parse::<Mood>().unwrap(), Mood::Mysterious);
    }

    #[test]
    fn test_unknown_mood() {
        let err = "Atlantean".parse::<Mood>().unwrap_err();
        assert_eq!(err, GenerateError::InvalidMood("Atlantean".to_string()));

        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn test_profiles_have_enough_distinct_notes() {
        for mood in Mood::ALL {
            let profile = mood.profile();
            let distinct: HashSet<_> = profile.scale.iter().collect();
            assert!(
                distinct.len() >= NOTES_PER_CYCLE,
                "{} has only {} distinct notes",
                mood,
                distinct.len()
            );
            assert!(profile.scale.iter().all(|&n| n <= 127));
            assert!(profile.velocity >= 1 && profile.velocity <= 127);
        }
    }

    #[test]
    fn test_profile_values() {
        let happy = Mood::Happy.profile();
        assert_eq!(happy.velocity, 100);
        assert_eq!(happy.note_on_ticks, 400);
        assert_eq!(happy.note_off_ticks, 100);
        assert!(happy.contains(72));
        assert!(!happy.contains(61));

        let calm = Mood::Calm.profile();
        assert_eq!(calm.scale.len(), 5);
        assert_eq!(calm.velocity, 80);

        assert_eq!(Mood::Sad.profile().note_on_ticks, 800);
        assert_eq!(Mood::Energetic.profile().note_off_ticks, 50);
        assert_eq!(Mood::Mysterious.profile().velocity, 70);
    }

    #[test]
    fn test_serde_labels() {
        let yaml = serde_yaml::to_string(&Mood::Energetic).unwrap();
        assert_eq!(yaml.trim(), "Energetic");

        let mood: Mood = serde_yaml::from_str("Sad").unwrap();
        assert_eq!(mood, Mood::Sad);

        let mood: Mood = serde_yaml::from_str("mysterious").unwrap();
        assert_eq!(mood, Mood::Mysterious);

        let err = serde_yaml::from_str::<Mood>("Atlantean").unwrap_err();
        assert!(err.to_string().contains("Atlantean"));
    }
}
