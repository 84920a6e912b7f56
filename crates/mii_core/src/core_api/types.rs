use serde::{Deserialize, Serialize};

use crate::save::{LayoutFamily, Region, SaveLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityIssue {
    EditingNotImplemented,
    /// Some section offsets for this layout are estimates.
    LowConfidenceLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Capabilities {
    pub can_query: bool,
    pub can_apply_edits: bool,
    pub issues: Vec<CapabilityIssue>,
}

impl Capabilities {
    pub fn read_only(mut issues: Vec<CapabilityIssue>) -> Self {
        if !issues.contains(&CapabilityIssue::EditingNotImplemented) {
            issues.push(CapabilityIssue::EditingNotImplemented);
        }

        Self {
            can_query: true,
            can_apply_edits: false,
            issues,
        }
    }

    pub fn has_issue(&self, issue: CapabilityIssue) -> bool {
        self.issues.contains(&issue)
    }
}

/// Facts about an opened save that do not require walking the slot table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveInfo {
    pub region: Region,
    pub family: LayoutFamily,
    pub buffer_len: usize,
    pub layout: SaveLayout,
    /// Length a buffer needs for every section of every slot.
    pub full_len: usize,
}

impl SaveInfo {
    pub fn is_truncated(&self) -> bool {
        self.buffer_len < self.full_len
    }
}
