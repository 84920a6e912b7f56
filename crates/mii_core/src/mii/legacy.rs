//! Legacy console record: 74 bytes, bit fields packed most significant bit
//! first, text in UTF-16BE.

use serde::{Deserialize, Serialize};

use crate::bits::{BitReader, BitWriter, DecodeError, Endian};

use super::types::{BirthMonth, FavoriteColor, LegacyMiiType, MiiSource, Sex};

pub const RECORD_LEN: usize = 74;
pub const NAME_UNITS: usize = 10;

const E: Endian = Endian::Big;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMii {
    pub metadata: LegacyMetadata,
    pub identity: LegacyIdentity,
    pub appearance: LegacyAppearance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMetadata {
    pub unused_00: bool,
    pub mii_type: LegacyMiiType,
    /// Padding bit between the appearance groups and the creator name.
    pub trailing_pad: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyIdentity {
    pub sex: Sex,
    pub birthday_month: BirthMonth,
    pub birthday_day: u8,
    pub favorite_color: FavoriteColor,
    pub is_favorite: bool,
    pub name: String,
    pub creation_time: u32,
    pub console_id: [u8; 4],
    pub creator_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAppearance {
    pub height: u8,
    pub build: u8,
    pub head: Head,
    pub hair: Hair,
    pub eyebrows: Eyebrows,
    pub eyes: Eyes,
    pub nose: Nose,
    pub mouth: Mouth,
    pub glasses: Glasses,
    pub facial_hair: FacialHair,
    pub mole: Mole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    pub face_type: u8,
    pub skin_tone: u8,
    pub face_features: u8,
    pub unused_01: u8,
    pub not_mingling: bool,
    pub source: MiiSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hair {
    pub hair_type: u8,
    pub color: u8,
    pub flip: bool,
    pub unused_03: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyebrows {
    pub eyebrow_type: u8,
    pub rotation: u8,
    pub unused_04: u8,
    pub color: u8,
    pub size: u8,
    pub vertical: u8,
    pub horizontal: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyes {
    pub eye_type: u8,
    pub rotation: u8,
    pub vertical: u8,
    pub color: u8,
    pub size: u8,
    pub horizontal: u8,
    pub unused_05: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nose {
    pub nose_type: u8,
    pub size: u8,
    pub vertical: u8,
    pub unused_06: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mouth {
    pub mouth_type: u8,
    pub color: u8,
    pub size: u8,
    pub vertical: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glasses {
    pub glasses_type: u8,
    pub color: u8,
    pub size: u8,
    pub vertical: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacialHair {
    pub mustache: u8,
    pub beard: u8,
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
    pub unused_07: bool,
}

pub fn decode_legacy(bytes: &[u8]) -> Result<LegacyMii, DecodeError> {
    if bytes.len() != RECORD_LEN {
        return Err(DecodeError::WrongLength {
            expected: RECORD_LEN,
            actual: bytes.len(),
        });
    }

    let mut r = BitReader::new(bytes);

    let unused_00 = r.read_flag(E)?;
    let sex = Sex::from_raw(r.read_u8_bits(1, E)?);
    let birthday_month = BirthMonth::from_raw(r.read_u8_bits(4, E)?);
    let birthday_day = r.read_u8_bits(5, E)?;
    let favorite_color = FavoriteColor::from_raw(r.read_u8_bits(4, E)?);
    let is_favorite = r.read_flag(E)?;
    r.align_to_byte();

    let name = r.read_utf16(NAME_UNITS, E)?;
    let height = r.read_u8()?;
    let build = r.read_u8()?;
    let mii_type = LegacyMiiType {
        raw: r.read_u8_bits(4, E)?,
    };
    let creation_time = r.read_bits(28, E)?;
    let console_id = r.read_array::<4>()?;

    let head = Head::read(&mut r)?;
    let hair = Hair::read(&mut r)?;
    let eyebrows = Eyebrows::read(&mut r)?;
    let eyes = Eyes::read(&mut r)?;
    let nose = Nose::read(&mut r)?;
    let mouth = Mouth::read(&mut r)?;
    let glasses = Glasses::read(&mut r)?;
    let facial_hair = FacialHair::read(&mut r)?;
    let mole = Mole::read(&mut r)?;
    // The appearance groups end one bit short of a byte boundary.
    let trailing_pad = r.read_flag(E)?;

    let creator_name = r.read_utf16(NAME_UNITS, E)?;

    Ok(LegacyMii {
        metadata: LegacyMetadata {
            unused_00,
            mii_type,
            trailing_pad,
        },
        identity: LegacyIdentity {
            sex,
            birthday_month,
            birthday_day,
            favorite_color,
            is_favorite,
            name,
            creation_time,
            console_id,
            creator_name,
        },
        appearance: LegacyAppearance {
            height,
            build,
            head,
            hair,
            eyebrows,
            eyes,
            nose,
            mouth,
            glasses,
            facial_hair,
            mole,
        },
    })
}

impl LegacyMii {
    pub fn to_bytes(&self) -> Vec<u8> {
        let id = &self.identity;
        let look = &self.appearance;
        let mut w = BitWriter::with_capacity(RECORD_LEN);

        w.write_flag(self.metadata.unused_00, E);
        w.write_bits(id.sex.raw() as u32, 1, E);
        w.write_bits(id.birthday_month.raw() as u32, 4, E);
        w.write_bits(id.birthday_day as u32, 5, E);
        w.write_bits(id.favorite_color.raw() as u32, 4, E);
        w.write_flag(id.is_favorite, E);
        w.align_to_byte();

        w.write_utf16(&id.name, NAME_UNITS, E);
        w.write_u8(look.height);
        w.write_u8(look.build);
        w.write_bits(self.metadata.mii_type.raw as u32, 4, E);
        w.write_bits(id.creation_time, 28, E);
        w.write_bytes(&id.console_id);

        look.head.write(&mut w);
        look.hair.write(&mut w);
        look.eyebrows.write(&mut w);
        look.eyes.write(&mut w);
        look.nose.write(&mut w);
        look.mouth.write(&mut w);
        look.glasses.write(&mut w);
        look.facial_hair.write(&mut w);
        look.mole.write(&mut w);
        w.write_flag(self.metadata.trailing_pad, E);

        w.write_utf16(&id.creator_name, NAME_UNITS, E);
        w.into_bytes()
    }
}

impl Head {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            face_type: r.read_u8_bits(3, E)?,
            skin_tone: r.read_u8_bits(3, E)?,
            face_features: r.read_u8_bits(4, E)?,
            unused_01: r.read_u8_bits(2, E)?,
            not_mingling: r.read_flag(E)?,
            source: MiiSource::from_raw(r.read_u8_bits(2, E)?),
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.face_type as u32, 3, E);
        w.write_bits(self.skin_tone as u32, 3, E);
        w.write_bits(self.face_features as u32, 4, E);
        w.write_bits(self.unused_01 as u32, 2, E);
        w.write_flag(self.not_mingling, E);
        w.write_bits(self.source.raw() as u32, 2, E);
    }
}

impl Hair {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hair_type: r.read_u8_bits(7, E)?,
            color: r.read_u8_bits(3, E)?,
            flip: r.read_flag(E)?,
            unused_03: r.read_u8_bits(5, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.hair_type as u32, 7, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_flag(self.flip, E);
        w.write_bits(self.unused_03 as u32, 5, E);
    }
}

impl Eyebrows {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            eyebrow_type: r.read_u8_bits(5, E)?,
            rotation: r.read_u8_bits(5, E)?,
            unused_04: r.read_u8_bits(6, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
            horizontal: r.read_u8_bits(4, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.eyebrow_type as u32, 5, E);
        w.write_bits(self.rotation as u32, 5, E);
        w.write_bits(self.unused_04 as u32, 6, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_bits(self.horizontal as u32, 4, E);
    }
}

impl Eyes {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            eye_type: r.read_u8_bits(6, E)?,
            rotation: r.read_u8_bits(5, E)?,
            vertical: r.read_u8_bits(5, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            horizontal: r.read_u8_bits(4, E)?,
            unused_05: r.read_u8_bits(5, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.eye_type as u32, 6, E);
        w.write_bits(self.rotation as u32, 5, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_bits(self.color as u32, 3, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.horizontal as u32, 4, E);
        w.write_bits(self.unused_05 as u32, 5, E);
    }
}

impl Nose {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            nose_type: r.read_u8_bits(4, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
            unused_06: r.read_u8_bits(3, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.nose_type as u32, 4, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_bits(self.unused_06 as u32, 3, E);
    }
}

impl Mouth {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mouth_type: r.read_u8_bits(5, E)?,
            color: r.read_u8_bits(2, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.mouth_type as u32, 5, E);
        w.write_bits(self.color as u32, 2, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.vertical as u32, 5, E);
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

impl FacialHair {
    fn read(r: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mustache: r.read_u8_bits(2, E)?,
            beard: r.read_u8_bits(2, E)?,
            color: r.read_u8_bits(3, E)?,
            size: r.read_u8_bits(4, E)?,
            vertical: r.read_u8_bits(5, E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_bits(self.mustache as u32, 2, E);
        w.write_bits(self.beard as u32, 2, E);
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
            unused_07: r.read_flag(E)?,
        })
    }

    fn write(&self, w: &mut BitWriter) {
        w.write_flag(self.enabled, E);
        w.write_bits(self.size as u32, 4, E);
        w.write_bits(self.horizontal as u32, 5, E);
        w.write_bits(self.vertical as u32, 5, E);
        w.write_flag(self.unused_07, E);
    }
}
