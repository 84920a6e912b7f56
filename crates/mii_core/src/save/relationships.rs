use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fields::FieldReader;
use super::layout::{MAX_SLOTS, RELATIONSHIP_TYPE_COLUMN, SaveLayout};
use super::sections::read_nickname;
use super::types::RelationshipKind;

/// Directed edge from one slot's relationship row to a target column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source: usize,
    pub target: usize,
    pub value: u8,
    pub kind: RelationshipKind,
    pub target_name: String,
}

/// Slot index to nickname, for slots whose nickname is not blank.
///
/// Built once per extraction and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: BTreeMap<usize, String>,
}

impl NameTable {
    pub fn build(reader: &FieldReader<'_>, layout: &SaveLayout, slot_count: usize) -> Self {
        let names = (0..slot_count.min(MAX_SLOTS))
            .filter_map(|slot| {
                let name = read_nickname(reader, &layout.offsets_for(slot));
                (!name.trim().is_empty()).then_some((slot, name))
            })
            .collect();
        Self { names }
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.names.get(&slot).map(String::as_str)
    }

    /// Name for display; unnamed slots get a numbered placeholder.
    pub fn display_name(&self, slot: usize) -> String {
        match self.get(slot) {
            Some(name) => name.to_string(),
            None => placeholder_name(slot),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn placeholder_name(slot: usize) -> String {
    format!("Mii {slot}")
}

/// Scans `source`'s relationship row against every target column, self
/// included. Columns whose value and type bytes are both zero, or that lie
/// outside the buffer, produce no edge.
pub fn read_edges(
    reader: &FieldReader<'_>,
    layout: &SaveLayout,
    names: &NameTable,
    source: usize,
) -> Vec<RelationshipEdge> {
    let row = layout.offsets_for(source).relationship;
    (0..MAX_SLOTS)
        .filter_map(|target| {
            let value = reader.byte(row.saturating_add(target));
            let kind = reader.byte(row.saturating_add(RELATIONSHIP_TYPE_COLUMN + target));
            (value > 0 || kind > 0).then(|| RelationshipEdge {
                source,
                target,
                value,
                kind: RelationshipKind::from_raw(kind),
                target_name: names.display_name(target),
            })
        })
        .collect()
}
