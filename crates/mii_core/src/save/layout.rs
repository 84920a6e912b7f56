use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of slots in a save's Mii table, and columns in a relationship row.
pub const MAX_SLOTS: usize = 100;

const EU_PROFILE_BASE: usize = 0x1C8A;
const EU_SLOT_STRIDE: usize = 0x590 + 0xD0;
const JP_PROFILE_BASE: usize = 0x1C5A;
const JP_SLOT_STRIDE: usize = 0x590;

const PERSONALITY_FROM_PROFILE: usize = 0xF6;
const MII_BLOCK_BEFORE_PROFILE: usize = 0x1A;
// Pattern-matched against one EU save, not confirmed.
const EU_FOOD_FROM_PROFILE: usize = 0x5D0;
const JP_FOOD_FROM_PROFILE: usize = 0x53E;

const RELATIONSHIP_BASE: usize = 0x299F0;
const RELATIONSHIP_STRIDE: usize = 0x100;
/// Offset of the type column within a relationship row.
pub const RELATIONSHIP_TYPE_COLUMN: usize = 0x64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Eu,
    Us,
    Kr,
    Jp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutFamily {
    /// EU, US and KR saves.
    Western,
    Japanese,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Eu, Region::Us, Region::Kr, Region::Jp];

    pub fn family(&self) -> LayoutFamily {
        match self {
            Self::Jp => LayoutFamily::Japanese,
            Self::Eu | Self::Us | Self::Kr => LayoutFamily::Western,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eu => "EU",
            Self::Us => "US",
            Self::Kr => "KR",
            Self::Jp => "JP",
        }
    }

    /// Parses a region code, falling back to EU for anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or(Self::Eu)
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EU" => Ok(Self::Eu),
            "US" => Ok(Self::Us),
            "KR" => Ok(Self::Kr),
            "JP" => Ok(Self::Jp),
            other => Err(format!("unknown region '{other}', expected EU|US|KR|JP")),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute slot-0 section offsets plus per-slot strides for one layout
/// family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveLayout {
    pub family: LayoutFamily,
    pub profile_base: usize,
    pub personality_base: usize,
    pub food_base: usize,
    pub mii_block_base: usize,
    pub slot_stride: usize,
    pub relationship_base: usize,
    pub relationship_stride: usize,
    /// Set when any of the offsets above are estimates.
    pub estimated: bool,
}

/// Partial layout document; every present field replaces the built-in value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutOverrides {
    pub profile_base: Option<usize>,
    pub personality_base: Option<usize>,
    pub food_base: Option<usize>,
    pub mii_block_base: Option<usize>,
    pub slot_stride: Option<usize>,
    pub relationship_base: Option<usize>,
    pub relationship_stride: Option<usize>,
}

impl LayoutOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Byte offsets of every section belonging to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOffsets {
    pub slot: usize,
    pub profile: usize,
    pub personality: usize,
    pub food: usize,
    pub mii_block: usize,
    pub relationship: usize,
}

impl SlotOffsets {
    /// Profile-relative field offset. Negative deltas address bytes just
    /// before the profile; `None` only if the result would underflow.
    pub fn profile_field(&self, delta: isize) -> Option<usize> {
        self.profile.checked_add_signed(delta)
    }

    pub fn personality_field(&self, delta: isize) -> Option<usize> {
        self.personality.checked_add_signed(delta)
    }

    pub fn food_field(&self, delta: isize) -> Option<usize> {
        self.food.checked_add_signed(delta)
    }
}

impl SaveLayout {
    pub fn for_family(family: LayoutFamily) -> Self {
        match family {
            LayoutFamily::Western => Self {
                family,
                profile_base: EU_PROFILE_BASE,
                personality_base: EU_PROFILE_BASE + PERSONALITY_FROM_PROFILE,
                food_base: EU_PROFILE_BASE + EU_FOOD_FROM_PROFILE,
                mii_block_base: EU_PROFILE_BASE - MII_BLOCK_BEFORE_PROFILE,
                slot_stride: EU_SLOT_STRIDE,
                relationship_base: RELATIONSHIP_BASE,
                relationship_stride: RELATIONSHIP_STRIDE,
                estimated: true,
            },
            LayoutFamily::Japanese => Self {
                family,
                profile_base: JP_PROFILE_BASE,
                personality_base: JP_PROFILE_BASE + PERSONALITY_FROM_PROFILE,
                food_base: JP_PROFILE_BASE + JP_FOOD_FROM_PROFILE,
                mii_block_base: JP_PROFILE_BASE - MII_BLOCK_BEFORE_PROFILE,
                slot_stride: JP_SLOT_STRIDE,
                relationship_base: RELATIONSHIP_BASE,
                relationship_stride: RELATIONSHIP_STRIDE,
                estimated: false,
            },
        }
    }

    pub fn for_region(region: Region) -> Self {
        Self::for_family(region.family())
    }

    pub fn with_overrides(mut self, overrides: &LayoutOverrides) -> Self {
        if overrides.is_empty() {
            return self;
        }
        self.profile_base = overrides.profile_base.unwrap_or(self.profile_base);
        self.personality_base = overrides.personality_base.unwrap_or(self.personality_base);
        self.food_base = overrides.food_base.unwrap_or(self.food_base);
        self.mii_block_base = overrides.mii_block_base.unwrap_or(self.mii_block_base);
        self.slot_stride = overrides.slot_stride.unwrap_or(self.slot_stride);
        self.relationship_base = overrides.relationship_base.unwrap_or(self.relationship_base);
        self.relationship_stride = overrides
            .relationship_stride
            .unwrap_or(self.relationship_stride);
        // Caller-supplied food/relationship offsets are treated as confirmed.
        if overrides.food_base.is_some() && overrides.relationship_base.is_some() {
            self.estimated = false;
        }
        self
    }

    /// Section offsets for `slot`. Saturates instead of wrapping, so an
    /// oversized layout only yields out-of-range (defaulted) reads.
    pub fn offsets_for(&self, slot: usize) -> SlotOffsets {
        let step = slot.saturating_mul(self.slot_stride);
        SlotOffsets {
            slot,
            profile: self.profile_base.saturating_add(step),
            personality: self.personality_base.saturating_add(step),
            food: self.food_base.saturating_add(step),
            mii_block: self.mii_block_base.saturating_add(step),
            relationship: self
                .relationship_base
                .saturating_add(slot.saturating_mul(self.relationship_stride)),
        }
    }

    /// Smallest buffer length that covers every section of the first
    /// `slot_count` slots, or `None` if it does not fit in `usize`.
    pub fn checked_required_len(&self, slot_count: usize) -> Option<usize> {
        let Some(last) = slot_count.checked_sub(1) else {
            return Some(0);
        };
        let step = last.checked_mul(self.slot_stride)?;
        let row = self
            .relationship_base
            .checked_add(last.checked_mul(self.relationship_stride)?)?;
        let ends = [
            self.profile_base
                .checked_add(step)?
                .checked_add(super::sections::PROFILE_SPAN_END)?,
            self.food_base
                .checked_add(step)?
                .checked_add(super::sections::FOOD_SPAN_END)?,
            self.personality_base
                .checked_add(step)?
                .checked_add(super::sections::PERSONALITY_SPAN_END)?,
            self.mii_block_base
                .checked_add(step)?
                .checked_add(crate::mii::modern::RECORD_LEN)?,
            row.checked_add(RELATIONSHIP_TYPE_COLUMN + MAX_SLOTS)?,
        ];
        ends.into_iter().max()
    }

    /// [`checked_required_len`](Self::checked_required_len), saturating at
    /// `usize::MAX`.
    pub fn required_len(&self, slot_count: usize) -> usize {
        self.checked_required_len(slot_count).unwrap_or(usize::MAX)
    }
}

/// Convenience for the common case of built-in offsets.
pub fn offsets_for(region: Region, slot: usize) -> SlotOffsets {
    SaveLayout::for_region(region).offsets_for(slot)
}
