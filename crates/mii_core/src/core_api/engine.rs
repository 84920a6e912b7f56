use log::warn;

use crate::mii::{self, MiiFormat, MiiRecord};
use crate::save::{
    LayoutOverrides, MAX_SLOTS, RelationshipEdge, Region, SaveExtraction, SaveFile, SaveLayout,
    SlotRecord,
};

use super::error::{CoreError, CoreErrorCode};
use super::types::{Capabilities, CapabilityIssue, SaveInfo};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// An opened save buffer bound to one region layout.
#[derive(Debug)]
pub struct Session {
    bytes: Vec<u8>,
    info: SaveInfo,
    capabilities: Capabilities,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Strictly decodes a standalone record in the caller-chosen format.
    pub fn decode_mii<B: AsRef<[u8]>>(
        &self,
        bytes: B,
        format: MiiFormat,
    ) -> Result<MiiRecord, CoreError> {
        mii::decode(format, bytes.as_ref()).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Decode,
                format!("failed to decode {format} Mii: {e}"),
            )
        })
    }

    /// Checks the stored CRC of a modern record.
    pub fn verify_mii_checksum<B: AsRef<[u8]>>(
        &self,
        bytes: B,
        format: MiiFormat,
    ) -> Result<bool, CoreError> {
        match format {
            MiiFormat::Modern => Ok(mii::verify_checksum(bytes.as_ref())?),
            MiiFormat::Legacy => Err(CoreError::new(
                CoreErrorCode::UnsupportedOperation,
                "legacy records carry no checksum",
            )),
        }
    }

    pub fn open_save<B: Into<Vec<u8>>>(
        &self,
        bytes: B,
        region: Region,
        overrides: Option<&LayoutOverrides>,
    ) -> Result<Session, CoreError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CoreError::new(
                CoreErrorCode::InvalidInput,
                "save buffer is empty",
            ));
        }

        let mut layout = SaveLayout::for_region(region);
        if let Some(overrides) = overrides {
            layout = layout.with_overrides(overrides);
        }
        if layout.slot_stride == 0 || layout.relationship_stride == 0 {
            return Err(CoreError::new(
                CoreErrorCode::InvalidInput,
                "layout strides must be non-zero",
            ));
        }

        let Some(full_len) = layout.checked_required_len(MAX_SLOTS) else {
            return Err(CoreError::new(
                CoreErrorCode::InvalidInput,
                "layout offsets overflow the address space",
            ));
        };

        let mut issues = Vec::new();
        if layout.estimated {
            warn!(
                "{region} save layout uses estimated food and relationship offsets; \
                 treat those sections as low confidence"
            );
            issues.push(CapabilityIssue::LowConfidenceLayout);
        }

        let info = SaveInfo {
            region,
            family: layout.family,
            buffer_len: bytes.len(),
            layout,
            full_len,
        };

        Ok(Session {
            bytes,
            info,
            capabilities: Capabilities::read_only(issues),
        })
    }
}

impl Session {
    fn save(&self) -> SaveFile<'_> {
        SaveFile::with_layout(&self.bytes, self.info.region, self.info.layout)
    }

    pub fn info(&self) -> &SaveInfo {
        &self.info
    }

    pub fn region(&self) -> Region {
        self.info.region
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn slot(&self, slot: usize) -> Result<SlotRecord, CoreError> {
        Ok(self.save().extract_slot(slot)?)
    }

    pub fn relationships(&self, slot: usize) -> Result<Vec<RelationshipEdge>, CoreError> {
        self.slot(slot).map(|record| record.relationships)
    }

    pub fn extract_all(&self, max_slots: usize) -> SaveExtraction {
        self.save().extract_all(max_slots)
    }
}
