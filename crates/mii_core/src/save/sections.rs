use serde::{Deserialize, Serialize};

use super::fields::FieldReader;
use super::layout::SlotOffsets;
use super::types::{FoodPreference, Gesture};
use crate::mii::{FavoriteColor, Sex};
use crate::personality::{PersonalityTraits, VoiceTraits};

// Profile deltas, relative to the slot's profile base.
const NICKNAME: isize = 0x00;
const NICKNAME_UNITS: usize = 10;
const CREATOR: isize = 0x2E;
const CREATOR_UNITS: usize = 10;
const FIRST_NAME: isize = 0x46;
const LAST_NAME: isize = 0x66;
const GIVEN_NAME_UNITS: usize = 15;
const NICKNAME_PRONUNCIATION: isize = 0x1C6;
const NICKNAME_PRONUNCIATION_UNITS: usize = 20;
const FIRST_NAME_PRONUNCIATION: isize = 0x208;
const LAST_NAME_PRONUNCIATION: isize = 0x24A;
const NAME_PRONUNCIATION_UNITS: usize = 30;
const SEX_BYTE: isize = -0x02;
const COLOR_BYTE: isize = -0x01;
const SHARING: isize = 0x16;
const COPYING: isize = -0x19;
const RELATION_TO_PLAYER: isize = 0x2A3;
const GROW_KID: isize = 0x624;
const MII_SYSTEM_ID: isize = -0x16;
const LOCAL_SYSTEM_ID: isize = 0xDE;
const SYSTEM_ID_LEN: usize = 4;
const ORIGIN_ISLAND: isize = 0xCE;
const CURRENT_ISLAND: isize = 0xBE;

// Status deltas, also profile-relative.
const LEVEL: isize = 0x299;
const EXPERIENCE: isize = 0x298;
const HAIR_COLOR: isize = 0x89;
const PAMPERED_RANKING: isize = 0x29A;
const SPLURGE_RANKING: isize = 0x626;
const CATCHPHRASE_UNITS: usize = 16;
const CATCHPHRASES: [isize; 5] = [0x96, 0x13A, 0x15C, 0x17E, 0x1A0];
const GESTURES: isize = 0x28C;
const GESTURE_COUNT: usize = 5;

// Food deltas, relative to the slot's food base.
const ALL_TIME_FAVORITE_1: isize = 0x0;
const WORST_2: isize = 0x2;
const ALL_TIME_FAVORITE_2: isize = 0x4;
const WORST_1: isize = 0x6;
const FAVORITES: [isize; 3] = [0x8, 0xA, 0xC];
const CHECK_TUMMY: isize = -0x26;
const FULLNESS: isize = -0x05;

const VOICE_BEFORE_PERSONALITY: isize = -6;

/// One past the furthest profile-relative byte read for a slot.
pub const PROFILE_SPAN_END: usize = SPLURGE_RANKING as usize + 4;
pub const FOOD_SPAN_END: usize = 0xE;
pub const PERSONALITY_SPAN_END: usize = 5;

/// Names the slot table uses for its lookup pre-pass.
pub fn read_nickname(reader: &FieldReader<'_>, offsets: &SlotOffsets) -> String {
    reader.utf16_string_at(offsets.profile_field(NICKNAME), NICKNAME_UNITS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub nickname: String,
    pub creator: String,
    pub first_name: String,
    pub last_name: String,
    pub pronunciation: Pronunciation,
    pub sex: Sex,
    pub favorite_color: FavoriteColor,
    pub sharing: u8,
    pub copying: u8,
    pub relation_to_player: u8,
    pub grow_kid: u8,
    /// Console Mii system id, uppercase hex.
    pub mii_system_id: String,
    /// In-game system id, uppercase hex.
    pub local_system_id: String,
    pub origin_island: u8,
    pub current_island: u8,
}

impl Profile {
    pub fn read(reader: &FieldReader<'_>, offsets: &SlotOffsets) -> Self {
        let at = |delta| offsets.profile_field(delta);
        Self {
            nickname: read_nickname(reader, offsets),
            creator: reader.utf16_string_at(at(CREATOR), CREATOR_UNITS),
            first_name: reader.utf16_string_at(at(FIRST_NAME), GIVEN_NAME_UNITS),
            last_name: reader.utf16_string_at(at(LAST_NAME), GIVEN_NAME_UNITS),
            pronunciation: Pronunciation {
                nickname: reader
                    .utf16_string_at(at(NICKNAME_PRONUNCIATION), NICKNAME_PRONUNCIATION_UNITS),
                first_name: reader
                    .utf16_string_at(at(FIRST_NAME_PRONUNCIATION), NAME_PRONUNCIATION_UNITS),
                last_name: reader
                    .utf16_string_at(at(LAST_NAME_PRONUNCIATION), NAME_PRONUNCIATION_UNITS),
            },
            sex: Sex::from_raw(reader.byte_at(at(SEX_BYTE)) & 0x01),
            favorite_color: FavoriteColor::from_raw((reader.byte_at(at(COLOR_BYTE)) >> 2) & 0x0F),
            sharing: reader.byte_at(at(SHARING)),
            copying: reader.byte_at(at(COPYING)),
            relation_to_player: reader.byte_at(at(RELATION_TO_PLAYER)),
            grow_kid: reader.byte_at(at(GROW_KID)),
            mii_system_id: reader.hex_at(at(MII_SYSTEM_ID), SYSTEM_ID_LEN),
            local_system_id: reader.hex_at(at(LOCAL_SYSTEM_ID), SYSTEM_ID_LEN),
            origin_island: reader.byte_at(at(ORIGIN_ISLAND)),
            current_island: reader.byte_at(at(CURRENT_ISLAND)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catchphrases {
    pub regular: String,
    pub happy: String,
    pub sad: String,
    pub mad: String,
    pub worried: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub level: u8,
    pub experience: u8,
    pub hair_color: u8,
    pub pampered_ranking: u32,
    pub splurge_ranking: u32,
    pub catchphrases: Catchphrases,
    pub gestures: [Gesture; GESTURE_COUNT],
}

impl Status {
    pub fn read(reader: &FieldReader<'_>, offsets: &SlotOffsets) -> Self {
        let at = |delta| offsets.profile_field(delta);
        let [regular, happy, sad, mad, worried] = CATCHPHRASES
            .map(|delta| reader.utf16_string_at(at(delta), CATCHPHRASE_UNITS));
        let gestures = std::array::from_fn(|i| {
            Gesture::from_raw(reader.byte_at(at(GESTURES + i as isize)))
        });
        Self {
            level: reader.byte_at(at(LEVEL)),
            experience: reader.byte_at(at(EXPERIENCE)),
            hair_color: reader.byte_at(at(HAIR_COLOR)),
            pampered_ranking: reader.u32_le_at(at(PAMPERED_RANKING)),
            splurge_ranking: reader.u32_le_at(at(SPLURGE_RANKING)),
            catchphrases: Catchphrases {
                regular,
                happy,
                sad,
                mad,
                worried,
            },
            gestures,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPreferences {
    pub all_time_favorites: [FoodPreference; 2],
    pub favorites: [FoodPreference; 3],
    pub worst: [FoodPreference; 2],
    pub check_tummy: u8,
    pub fullness: u8,
}

impl FoodPreferences {
    pub fn read(reader: &FieldReader<'_>, offsets: &SlotOffsets) -> Self {
        let food = |delta| FoodPreference::from_id(reader.u16_le_at(offsets.food_field(delta)));
        Self {
            all_time_favorites: [food(ALL_TIME_FAVORITE_1), food(ALL_TIME_FAVORITE_2)],
            favorites: FAVORITES.map(food),
            worst: [food(WORST_1), food(WORST_2)],
            check_tummy: reader.byte_at(offsets.food_field(CHECK_TUMMY)),
            fullness: reader.byte_at(offsets.food_field(FULLNESS)),
        }
    }
}

/// First personality byte; zero marks an unused slot when the name is empty.
pub fn read_energy_raw(reader: &FieldReader<'_>, offsets: &SlotOffsets) -> u8 {
    reader.byte(offsets.personality)
}

pub fn read_personality(reader: &FieldReader<'_>, offsets: &SlotOffsets) -> PersonalityTraits {
    let raw = std::array::from_fn(|i| reader.byte_at(offsets.personality_field(i as isize)));
    let [pitch, speed, quality, tone, accent, intonation] = std::array::from_fn(|i| {
        reader.byte_at(offsets.personality_field(VOICE_BEFORE_PERSONALITY + i as isize))
    });
    PersonalityTraits::from_raw(
        raw,
        VoiceTraits {
            pitch,
            speed,
            quality,
            tone,
            accent,
            intonation,
        },
    )
}
