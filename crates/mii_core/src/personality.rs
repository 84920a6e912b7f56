use std::fmt;

use serde::{Deserialize, Serialize};

pub const MOVEMENT_MAX: i32 = 7;
pub const EXPRESSIVENESS_MAX: i32 = 7;
/// Speech and attitude run 0..=8 but never take the value 4.
pub const GAPPED_MAX: i32 = 8;
pub const AXIS_MAX: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PersonalityType {
    EasygoingSoftie,
    EasygoingOptimist,
    OutgoingTrendsetter,
    OutgoingEntertainer,
    EasygoingBuddy,
    EasygoingDreamer,
    OutgoingCharmer,
    OutgoingLeader,
    IndependentFreeSpirit,
    IndependentArtist,
    ConfidentDesigner,
    ConfidentAdventurer,
    IndependentLoneWolf,
    IndependentThinker,
    ConfidentBrainiac,
    ConfidentGoGetter,
}

/// Row-major: rows run from most to least expressive, columns from least to
/// most outgoing.
const GRID: [[PersonalityType; 4]; 4] = [
    [
        PersonalityType::EasygoingSoftie,
        PersonalityType::EasygoingOptimist,
        PersonalityType::OutgoingTrendsetter,
        PersonalityType::OutgoingEntertainer,
    ],
    [
        PersonalityType::EasygoingBuddy,
        PersonalityType::EasygoingDreamer,
        PersonalityType::OutgoingCharmer,
        PersonalityType::OutgoingLeader,
    ],
    [
        PersonalityType::IndependentFreeSpirit,
        PersonalityType::IndependentArtist,
        PersonalityType::ConfidentDesigner,
        PersonalityType::ConfidentAdventurer,
    ],
    [
        PersonalityType::IndependentLoneWolf,
        PersonalityType::IndependentThinker,
        PersonalityType::ConfidentBrainiac,
        PersonalityType::ConfidentGoGetter,
    ],
];

impl PersonalityType {
    pub const ALL: [PersonalityType; 16] = [
        GRID[0][0], GRID[0][1], GRID[0][2], GRID[0][3],
        GRID[1][0], GRID[1][1], GRID[1][2], GRID[1][3],
        GRID[2][0], GRID[2][1], GRID[2][2], GRID[2][3],
        GRID[3][0], GRID[3][1], GRID[3][2], GRID[3][3],
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EasygoingSoftie => "Easygoing Softie",
            Self::EasygoingOptimist => "Easygoing Optimist",
            Self::OutgoingTrendsetter => "Outgoing Trendsetter",
            Self::OutgoingEntertainer => "Outgoing Entertainer",
            Self::EasygoingBuddy => "Easygoing Buddy",
            Self::EasygoingDreamer => "Easygoing Dreamer",
            Self::OutgoingCharmer => "Outgoing Charmer",
            Self::OutgoingLeader => "Outgoing Leader",
            Self::IndependentFreeSpirit => "Independent Free Spirit",
            Self::IndependentArtist => "Independent Artist",
            Self::ConfidentDesigner => "Confident Designer",
            Self::ConfidentAdventurer => "Confident Adventurer",
            Self::IndependentLoneWolf => "Independent Lone Wolf",
            Self::IndependentThinker => "Independent Thinker",
            Self::ConfidentBrainiac => "Confident Brainiac",
            Self::ConfidentGoGetter => "Confident Go-getter",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_gapped(value: i32) -> i32 {
    let value = if value == 4 { 5 } else { value };
    value.clamp(0, GAPPED_MAX)
}

/// Vertical bands: >11, 8..=11, 4..=7, <4.
fn row_for(vertical: i32) -> usize {
    if vertical > 11 {
        0
    } else if vertical > 7 {
        1
    } else if vertical > 3 {
        2
    } else {
        3
    }
}

/// Horizontal bands: <4, 4..=7, 8..=11, >11.
fn column_for(horizontal: i32) -> usize {
    if horizontal < 4 {
        0
    } else if horizontal < 8 {
        1
    } else if horizontal < 12 {
        2
    } else {
        3
    }
}

/// Maps the four chart traits onto the 4x4 personality grid. Total: every
/// input, in or out of range, yields a label.
pub fn classify(movement: i32, speech: i32, expressiveness: i32, attitude: i32) -> PersonalityType {
    let movement = movement.clamp(0, MOVEMENT_MAX);
    let expressiveness = expressiveness.clamp(0, EXPRESSIVENESS_MAX);
    let speech = normalize_gapped(speech);
    let attitude = normalize_gapped(attitude);

    let horizontal = (movement + speech).clamp(0, AXIS_MAX);
    let vertical = (expressiveness + attitude).clamp(0, AXIS_MAX);

    GRID[row_for(vertical)][column_for(horizontal)]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceTraits {
    pub pitch: u8,
    pub speed: u8,
    pub quality: u8,
    pub tone: u8,
    pub accent: u8,
    pub intonation: u8,
}

/// Decoded personality sliders. Values can be -1 when the stored byte is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub energy: i16,
    pub speech: i16,
    pub facial_expressions: i16,
    pub mood: i16,
    pub overall: u8,
    pub voice: VoiceTraits,
}

impl PersonalityTraits {
    /// `raw` holds energy, speech, facial expressions, mood and overall in
    /// save-file order.
    pub fn from_raw(raw: [u8; 5], voice: VoiceTraits) -> Self {
        let [energy, speech, facial, mood, overall] = raw;
        Self {
            energy: energy as i16 - 1,
            speech: gapped_from_raw(speech),
            facial_expressions: facial as i16 - 1,
            mood: gapped_from_raw(mood),
            overall,
            voice,
        }
    }

    pub fn personality_type(&self) -> PersonalityType {
        classify(
            self.energy as i32,
            self.speech as i32,
            self.facial_expressions as i32,
            self.mood as i32,
        )
    }
}

fn gapped_from_raw(raw: u8) -> i16 {
    if raw < 5 { raw as i16 - 1 } else { raw as i16 }
}
