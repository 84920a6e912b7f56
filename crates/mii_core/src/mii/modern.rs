//! Modern cross-platform record: 96 bytes, bit fields packed least
//! significant bit first, text in UTF-16LE, trailing 16-bit checksum.

use serde::{Deserialize, Serialize};

use crate::bits::{BitReader, BitWriter, DecodeError, Endian};

use super::types::{BirthMonth, CreationDevice, FavoriteColor, FontRegion, RegionLock, Sex};

pub const RECORD_LEN: usize = 96;
pub const NAME_UNITS: usize = 10;
/// Bytes covered by the checksum; the checksum itself follows.
pub const CHECKSUM_SPAN: usize = 0x5E;

const E: Endian = Endian::Little;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernMii {
    pub metadata: ModernMetadata,
    pub identity: ModernIdentity,
    pub appearance: ModernAppearance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernMetadata {
    pub format_version: u8,
    pub copying: bool,
    pub profanity: bool,
    pub region_lock: RegionLock,
    pub font_region: FontRegion,
    pub unused_00: u8,
    pub position_page: u8,
    pub position_slot: u8,
    pub unknown_0: u8,
    pub birth_platform: CreationDevice,
    pub unused_01: bool,
    pub unused_02: u16,
    pub unused_12: u16,
    /// Stored value, read little-endian. Not verified during decoding.
    pub checksum: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernIdentity {
    pub console_id: u64,
    pub mii_id: MiiId,
    pub console_mac: [u8; 6],
    pub sex: Sex,
    pub birthday_month: BirthMonth,
    pub birthday_day: u8,
    pub favorite_color: FavoriteColor,
    pub is_favorite: bool,
    pub unknown_2: bool,
    pub name: String,
    pub creator_name: String,
}

/// Creation id. Unlike the rest of the record this word is big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiiId {
    pub is_normal: bool,
    pub is_ds: bool,
    pub is_developer: bool,
    pub is_valid: bool,
    pub creation_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernAppearance {
    pub height: u8,
    pub build: u8,
    pub head: Head,
    pub hair: Hair,
    pub eyes: Eyes,
    pub eyebrows: Eyebrows,
    pub nose: Nose,
    pub mouth: Mouth,
    pub facial_hair: FacialHair,
    pub glasses: Glasses,
    pub mole: Mole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    pub not_sharing: bool,
    pub face_type: u8,
    pub skin_tone: u8,
    pub wrinkles: u8,
    pub makeup: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hair {
    pub hair_type: u8,
    pub color: u8,
    pub flip: bool,
    pub unused_03: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyes {
    pub eye_type: u8,
    pub color: u8,
    pub size: u8,
    pub stretch: u8,
    pub rotation: u8,
    pub horizontal: u8,
    pub vertical: u8,
    pub unused_04: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyebrows {
    pub eyebrow_type: u8,
    pub color: u8,
    pub size: u8,
    pub stretch: u8,
    pub unused_05: bool,
    pub rotation: u8,
    pub unused_06: bool,
    pub horizontal: u8,
    pub vertical: u8,
    pub unused_07: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nose {
    pub nose_type: u8,
    pub size: u8,
    pub vertical: u8,
    pub unused_08: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mouth {
    pub mouth_type: u8,
    pub color: u8,
    pub size: u8,
    pub stretch: u8,
    pub vertical: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacialHair {
    pub mustache: u8,
    pub unused_09: u8,
    pub beard: u8,
    pub color: u8,
    pub size: u8,
    pub vertical: u8,
    pub unused_10: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glasses {
    pub glasses_type: u8,
    pub color: u8,
    pub size: u8,
    pub vertical: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mole {
    pub enabled: bool,
    pub size: u8,
    pub horizontal: u8,
    pub vertical: u8,
    pub unused_11: bool,
}

pub fn decode_modern(bytes: &[u8]) -> Result<ModernMii, DecodeError> {
    if bytes.len() != RECORD_LEN {
        return Err(DecodeError::WrongLength {
            expected: RECORD_LEN,
            actual: bytes.len(),
        });
    }

    let mut r = BitReader::new(bytes);

    let format_version = r.read_u8()?;
    let copying = r.read_flag(E)?;
    let profanity = r.read_flag(E)?;
    let region_lock = RegionLock::from_raw(r.read_u8_bits(2, E)?);
    let font_region = FontRegion::from_raw(r.read_u8_bits(2, E)?);
    let unused_00 = r.read_u8_bits(2, E)?;
    let position_page = r.read_u8_bits(4, E)?;
    let position_slot = r.read_u8_bits(4, E)?;
    let unknown_0 = r.read_u8_bits(4, E)?;
    let birth_platform = CreationDevice::from_raw(r.read_u8_bits(3, E)?);
    let unused_01 = r.read_flag(E)?;
    r.align_to_byte();

    let console_id = r.read_u64_le()?;
    let mii_id = MiiId::read(&mut r)?;
    let console_mac = r.read_array::<6>()?;
    let unused_02 = r.read_u16_le()?;

    let sex = Sex::from_raw(r.read_u8_bits(1, E)?);
    let birthday_month = BirthMonth::from_raw(r.read_u8_bits(4, E)?);
    let birthday_day = r.read_u8_bits(5, E)?;
    let favorite_color = FavoriteColor::from_raw(r.read_u8_bits(4, E)?);
    let is_favorite = r.read_flag(E)?;
    let unknown_2 = r.read_flag(E)?;
    r.align_to_byte();

    let name = r.read_utf16(NAME_UNITS, E)?;
    let height = r.read_u8()?;
    let build = r.read_u8()?;

    let head = Head::read(&mut r)?;
    let hair = Hair::read(&mut r)?;
    let eyes = Eyes::read(&mut r)?;
    let eyebrows = Eyebrows::read(&mut r)?;
    let nose = Nose::read(&mut r)?;
    let mouth = Mouth::read(&mut r)?;
    let facial_hair = FacialHair::read(&mut r)?;
    let glasses = Glasses::read(&mut r)?;
    let mole = Mole::read(&mut r)?;

    let creator_name = r.read_utf16(NAME_UNITS, E)?;
    let unused_12 = r.read_u16_le()?;
    let checksum = r.read_u16_le()?;

    Ok(ModernMii {
        metadata: ModernMetadata {
            format_version,
            copying,
            profanity,
            region_lock,
            font_region,
            unused_00,
            position_page,
            position_slot,
            unknown_0,
            birth_platform,
            unused_01,
            unused_02,
            unused_12,
            checksum,
        },
        identity: ModernIdentity {
            console_id,
            mii_id,
            console_mac,
            sex,
            birthday_month,
            birthday_day,
            favorite_color,
            is_favorite,
            unknown_2,
            name,
            creator_name,
        },
        appearance: ModernAppearance {
            height,
            build,
            head,
            hair,
            eyes,
            eyebrows,
            nose,
            mouth,
            facial_hair,
            glasses,
            mole,
        },
    })
}

/// CRC-16/CCITT (polynomial 0x1021, initial value 0) over the checksummed
/// prefix of a modern record.
pub fn compute_checksum(bytes: &[u8]) -> Result<u16, DecodeError> {
    if bytes.len() < CHECKSUM_SPAN {
        return Err(DecodeError::WrongLength {
            expected: CHECKSUM_SPAN,
            actual: bytes.len(),
        });
    }

    Ok(crc16_ccitt(&bytes[..CHECKSUM_SPAN]))
}

fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Compares the computed checksum with the one stored in the record.
/// The stored checksum is big-endian on disk.
pub fn verify_checksum(bytes: &[u8]) -> Result<bool, DecodeError> {
    if bytes.len() != RECORD_LEN {
        return Err(DecodeError::WrongLength {
            expected: RECORD_LEN,
            actual: bytes.len(),
        });
    }
    let stored = u16::from_be_bytes([bytes[CHECKSUM_SPAN], bytes[CHECKSUM_SPAN + 1]]);
    Ok(compute_checksum(bytes)? == stored)
}

impl ModernMii {
    pub fn to_bytes(&self) -> Vec<u8> {
        let meta = &self.metadata;
        let id = &self.identity;
        let look = &self.appearance;
        let mut w = BitWriter::with_capacity(RECORD_LEN);

        w.write_u8(meta.format_version);
        w.write_flag(meta.copying, E);
        w.write_flag(meta.profanity, E);
        w.write_bits(meta.region_lock.raw() as u32, 2, E);
        w.write_bits(meta.font_region.raw() as u32, 2, E);
        w.write_bits(meta.unused_00 as u32, 2, E);
        w.write_bits(meta.position_page as u32, 4, E);
        w.write_bits(meta.position_slot as u32, 4, E);
        w.write_bits(meta.unknown_0 as u32, 4, E);
        w.write_bits(meta.birth_platform.raw() as u32, 3, E);
        w.write_flag(meta.unused_01, E);
        w.align_to_byte();

        w.write_u64_le(id.console_id);
        id.mii_id.write(&mut w);
        w.write_bytes(&id.console_mac);
        w.write_u16_le(meta.unused_02);

        w.write_bits(id.sex.raw() as u32, 1, E);
        w.write_bits(id.birthday_month.raw() as u32, 4, E);
        w.write_bits(id.birthday_day as u32, 5, E);
        w.write_bits(id.favorite_color.raw() as u32, 4, E);
        w.write_flag(id.is_favorite, E);
        w.write_flag(id.unknown_2, E);
        w.align_to_byte();

        w.write_utf16(&id.name, NAME_UNITS, E);
        w.write_u8(look.height);
        w.write_u8(look.build);

        look.head.write(&mut w);
        look.hair.write(&mut w);
        look.eyes.write(&mut w);
        look.eyebrows.write(&mut w);
        look.nose.write(&mut w);
        look.mouth.write(&mut w);
        look.facial_hair.write(&mut w);
        look.glasses.write(&mut w);
        look.mole.write(&mut w);

        w.write_utf16(&id.creator_name, NAME_UNITS, E);
        w.write_u16_le(meta.unused_12);
        w.write_u16_le(meta.checksum);
        w.into_bytes()
    }
}

impl MiiId {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            is_normal: r.read_flag(Endian::Big)?,
            is_ds: r.read_flag(Endian::Big)?,
            is_developer: r.read_flag(Endian::Big)?,
            is_valid: r.read_flag(Endian::Big)?,
            creation_time: r.read_bits(28, Endian::Big)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_flag(self.is_normal, Endian::Big);
        w.write_flag(self.is_ds, Endian::Big);
        w.write_flag(self.is_developer, Endian::Big);
        w.write_flag(self.is_valid, Endian::Big);
        w.write_bits(self.creation_time, 28, Endian::Big);
    }
}

impl Head {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            not_sharing: r.read_flag(E)?,
            face_type: r.read_u8_bits(4, E)?,
            skin_tone: r.read_u8_bits(3, E)?,
            wrinkles: r.read_u8_bits(4, E)?,
            makeup: r.read_u8_bits(4, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_flag(self.not_sharing, E);
        w.write_bits(self.face_type as u32, 4, E);
        w.write_bits(self.skin_tone as u32, 3, E);
        w.write_bits(self.wrinkles as u32, 4, E);
        w.write_bits(self.makeup as u32, 4, E);
    }
}

impl Hair {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hair_type: r.read_u8()?,
            color: r.read_u8_bits(3, E)?,
            flip: r.read_flag(E)?,
            unused_03: r.read_u8_bits(4, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_u8(self.hair_type);
        w.write_bits(self.color as u32, 3, E);
        w.write_flag(self.flip, E);
        w.write_bits(self.unused_03 as u32, 4, E);
    }
}

impl Eyes {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            eye_type: r.read_u8_bits(6, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            stretch: r.read_u8_bits(3, E)?,
            rotation: r.read_u8_bits(5, E)?,
            horizontal: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
            unused_04: r.read_u8_bits(2, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.eye_type as u32, 6, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.stretch as u32, 3, E);
        w.write_bits(self.rotation as u32, 5, E);
        w.write_bits(self.horizontal as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_bits(self.unused_04 as u32, 2, E);
    }
}

impl Eyebrows {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            eyebrow_type: r.read_u8_bits(5, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            stretch: r.read_u8_bits(3, E)?,
            unused_05: r.read_flag(E)?,
            rotation: r.read_u8_bits(4, E)?,
            unused_06: r.read_flag(E)?,
            horizontal: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
            unused_07: r.read_u8_bits(2, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.eyebrow_type as u32, 5, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.stretch as u32, 3, E);
        w.write_flag(self.unused_05, E);
        w.write_bits(self.rotation as u32, 4, E);
        w.write_flag(self.unused_06, E);
        w.write_bits(self.horizontal as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_bits(self.unused_07 as u32, 2, E);
    }
}

impl Nose {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            nose_type: r.read_u8_bits(5, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
            unused_08: r.read_u8_bits(2, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.nose_type as u32, 5, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_bits(self.unused_08 as u32, 2, E);
    }
}

impl Mouth {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mouth_type: r.read_u8_bits(6, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            stretch: r.read_u8_bits(3, E)?,
            vertical: r.read_u8_bits(5, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.mouth_type as u32, 6, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.stretch as u32, 3, E);
        w.write_bits(self.vertical as u32, 5, E);
    }
}

impl FacialHair {
    // Starts mid-byte: the mouth group is 21 bits wide.
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mustache: r.read_u8_bits(5, E)?,
            unused_09: r.read_u8_bits(6, E)?,
            beard: r.read_u8_bits(3, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
            unused_10: r.read_flag(E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.mustache as u32, 5, E);
        w.write_bits(self.unused_09 as u32, 6, E);
        w.write_bits(self.beard as u32, 3, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_flag(self.unused_10, E);
    }
}

impl Glasses {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            glasses_type: r.read_u8_bits(4, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.glasses_type as u32, 4, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
    }
}

impl Mole {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            enabled: r.read_flag(E)?,
            size: r.read_u8_bits(4, E)?,
            horizontal: r.read_u8_bits(5, E)?,
            vertical: r.read_u8_bits(5, E)?,
            unused_11: r.read_flag(E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_flag(self.enabled, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.horizontal as u32, 5, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_flag(self.unused_11, E);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc_matches_xmodem_check_value() {
        assert_eq!(crc16_ccitt(b"123456789"), 0x31C3);
    }

    #[test]
    fn short_checksum_input_reports_the_checksummed_span() {
        assert_eq!(
            compute_checksum(&[0u8; 10]),
            Err(DecodeError::WrongLength {
                expected: CHECKSUM_SPAN,
                actual: 10
            })
        );
        assert!(compute_checksum(&[0u8; CHECKSUM_SPAN]).is_ok());
    }
}
