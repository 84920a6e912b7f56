pub mod fields;
pub mod layout;
pub mod relationships;
pub mod sections;
pub mod types;

use std::collections::BTreeMap;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mii::modern::{self, ModernMii};
use crate::personality::{PersonalityTraits, PersonalityType};
pub use fields::FieldReader;
pub use layout::{
    LayoutFamily, LayoutOverrides, MAX_SLOTS, Region, SaveLayout, SlotOffsets, offsets_for,
};
pub use relationships::{NameTable, RelationshipEdge, placeholder_name, read_edges};
pub use sections::{Catchphrases, FoodPreferences, Profile, Pronunciation, Status};
pub use types::{FOOD_NAMES, FoodPreference, Gesture, RelationshipKind, food_name};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("slot {slot} is outside the slot table (0..{limit})")]
    SlotOutOfRange { slot: usize, limit: usize },
}

/// Everything extracted for one occupied slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub slot: usize,
    /// Nickname, or a `Mii {slot}` placeholder when the slot has none.
    pub display_name: String,
    pub offsets: SlotOffsets,
    pub profile: Profile,
    pub status: Status,
    pub food: FoodPreferences,
    pub personality: PersonalityTraits,
    pub personality_type: PersonalityType,
    /// Appearance block stored ahead of the profile, if it decoded.
    pub mii: Option<ModernMii>,
    /// Result of checking the appearance block's stored CRC.
    pub mii_checksum_valid: Option<bool>,
    pub relationships: Vec<RelationshipEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub region: Region,
    pub buffer_len: usize,
    pub slots_scanned: usize,
    pub slot_count: usize,
    pub edge_count: usize,
    pub personality_distribution: BTreeMap<PersonalityType, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveExtraction {
    pub summary: ExtractionSummary,
    pub slots: BTreeMap<usize, SlotRecord>,
    /// Every slot's edges, in slot then target order.
    pub edges: Vec<RelationshipEdge>,
}

/// Read-only view over a save-file buffer for one region layout.
#[derive(Debug, Clone, Copy)]
pub struct SaveFile<'a> {
    reader: FieldReader<'a>,
    region: Region,
    layout: SaveLayout,
}

impl<'a> SaveFile<'a> {
    pub fn new(bytes: &'a [u8], region: Region) -> Self {
        Self::with_layout(bytes, region, SaveLayout::for_region(region))
    }

    pub fn with_layout(bytes: &'a [u8], region: Region, layout: SaveLayout) -> Self {
        Self {
            reader: FieldReader::new(bytes),
            region,
            layout,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn layout(&self) -> &SaveLayout {
        &self.layout
    }

    pub fn reader(&self) -> &FieldReader<'a> {
        &self.reader
    }

    pub fn name_table(&self) -> NameTable {
        NameTable::build(&self.reader, &self.layout, MAX_SLOTS)
    }

    /// A slot counts as occupied if it has a name or a non-zero energy byte.
    pub fn is_occupied(&self, names: &NameTable, slot: usize) -> bool {
        names.get(slot).is_some()
            || sections::read_energy_raw(&self.reader, &self.layout.offsets_for(slot)) != 0
    }

    /// Extracts one slot regardless of occupancy.
    pub fn extract_slot(&self, slot: usize) -> Result<SlotRecord, SaveError> {
        if slot >= MAX_SLOTS {
            return Err(SaveError::SlotOutOfRange {
                slot,
                limit: MAX_SLOTS,
            });
        }
        Ok(self.read_slot(&self.name_table(), slot))
    }

    /// Extracts every occupied slot among the first `max_slots` (at most
    /// [`MAX_SLOTS`]).
    pub fn extract_all(&self, max_slots: usize) -> SaveExtraction {
        let slots_scanned = max_slots.min(MAX_SLOTS);
        let names = self.name_table();

        let occupied: Vec<usize> = (0..slots_scanned)
            .filter(|&slot| {
                let keep = self.is_occupied(&names, slot);
                if !keep {
                    debug!("slot {slot}: no name and zero energy, skipping");
                }
                keep
            })
            .collect();

        let slots: BTreeMap<usize, SlotRecord> = occupied
            .into_par_iter()
            .map(|slot| (slot, self.read_slot(&names, slot)))
            .collect();

        let edges: Vec<RelationshipEdge> = slots
            .values()
            .flat_map(|record| record.relationships.iter().cloned())
            .collect();

        let mut personality_distribution = BTreeMap::new();
        for record in slots.values() {
            *personality_distribution
                .entry(record.personality_type)
                .or_insert(0) += 1;
        }

        let summary = ExtractionSummary {
            region: self.region,
            buffer_len: self.reader.len(),
            slots_scanned,
            slot_count: slots.len(),
            edge_count: edges.len(),
            personality_distribution,
        };
        info!(
            "extracted {} of {} slots ({} relationship edges) from {}-byte {} save",
            summary.slot_count, summary.slots_scanned, summary.edge_count, summary.buffer_len,
            summary.region
        );

        SaveExtraction {
            summary,
            slots,
            edges,
        }
    }

    fn read_slot(&self, names: &NameTable, slot: usize) -> SlotRecord {
        let offsets = self.layout.offsets_for(slot);
        let personality = sections::read_personality(&self.reader, &offsets);
        let block = self.reader.span(offsets.mii_block, modern::RECORD_LEN);
        let mii = block.and_then(|bytes| match modern::decode_modern(bytes) {
            Ok(mii) => Some(mii),
            Err(err) => {
                debug!("slot {slot}: embedded Mii block did not decode: {err}");
                None
            }
        });
        let mii_checksum_valid = block.and_then(|bytes| modern::verify_checksum(bytes).ok());

        SlotRecord {
            slot,
            display_name: names.display_name(slot),
            offsets,
            profile: Profile::read(&self.reader, &offsets),
            status: Status::read(&self.reader, &offsets),
            food: FoodPreferences::read(&self.reader, &offsets),
            personality_type: personality.personality_type(),
            personality,
            mii,
            mii_checksum_valid,
            relationships: read_edges(&self.reader, &self.layout, names, slot),
        }
    }
}
