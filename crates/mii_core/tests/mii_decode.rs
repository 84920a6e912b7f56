use mii_core::bits::DecodeError;
use mii_core::mii::{
    self, BirthMonth, CreationDevice, FavoriteColor, FontRegion, MiiFormat, MiiKind, MiiRecord,
    RegionLock, Sex, compute_checksum, decode_legacy, decode_modern, verify_checksum,
};
use proptest::prelude::*;

fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn utf16_le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn legacy_fixture() -> Vec<u8> {
    let mut buf = vec![0u8; 74];
    // unused 0, female, March, day 17, blue, favourite
    buf[0] = 0x4E;
    buf[1] = 0x2B;
    let name = utf16_be("Ann");
    buf[2..2 + name.len()].copy_from_slice(&name);
    buf[22] = 64;
    buf[23] = 32;
    // type 12 (foreign), creation time 0x1234567
    buf[24..28].copy_from_slice(&[0xC1, 0x23, 0x45, 0x67]);
    buf[28..32].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    // face type 5, skin tone 3
    buf[32] = 0b1010_1100;
    let creator = utf16_be("Bob");
    buf[54..54 + creator.len()].copy_from_slice(&creator);
    buf
}

fn modern_fixture() -> Vec<u8> {
    let mut buf = vec![0u8; 96];
    buf[0] = 3;
    // copying, region lock USA, font region CHN
    buf[1] = 0x19;
    // page 2, slot 5
    buf[2] = 0x52;
    // created on Wii U/Switch
    buf[3] = 0x40;
    buf[4..12].copy_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
    // normal + valid, creation time 0x0ABCDEF
    buf[12..16].copy_from_slice(&[0x90, 0xAB, 0xCD, 0xEF]);
    buf[16..22].copy_from_slice(&[0xA0, 0xB1, 0xC2, 0xD3, 0xE4, 0xF5]);
    // female, December, day 25, black, favourite
    buf[24] = 0x39;
    buf[25] = 0x6F;
    let name = utf16_le("Mia");
    buf[26..26 + name.len()].copy_from_slice(&name);
    buf[46] = 100;
    buf[47] = 10;
    let creator = utf16_le("Zed");
    buf[72..72 + creator.len()].copy_from_slice(&creator);
    buf
}

fn seal(buf: &mut [u8]) {
    let crc = compute_checksum(buf).unwrap();
    buf[0x5E..0x60].copy_from_slice(&crc.to_be_bytes());
}

#[test]
fn legacy_header_fields_decode() {
    let mii = decode_legacy(&legacy_fixture()).expect("legacy decode");

    assert!(!mii.metadata.unused_00);
    assert_eq!(mii.identity.sex, Sex::Female);
    assert_eq!(mii.identity.birthday_month, BirthMonth::March);
    assert_eq!(mii.identity.birthday_day, 17);
    assert_eq!(mii.identity.favorite_color, FavoriteColor::Blue);
    assert!(mii.identity.is_favorite);
    assert_eq!(mii.identity.name, "Ann");
    assert_eq!(mii.appearance.height, 64);
    assert_eq!(mii.appearance.build, 32);
    assert_eq!(mii.metadata.mii_type.raw, 12);
    assert_eq!(mii.metadata.mii_type.kind(), MiiKind::Foreign);
    assert_eq!(mii.identity.creation_time, 0x123_4567);
    assert_eq!(mii.identity.console_id, [0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(mii.appearance.head.face_type, 5);
    assert_eq!(mii.appearance.head.skin_tone, 3);
    assert_eq!(mii.identity.creator_name, "Bob");
}

#[test]
fn modern_fields_decode() {
    let mii = decode_modern(&modern_fixture()).expect("modern decode");
    let meta = &mii.metadata;
    let id = &mii.identity;

    assert_eq!(meta.format_version, 3);
    assert!(meta.copying);
    assert!(!meta.profanity);
    assert_eq!(meta.region_lock, RegionLock::Usa);
    assert_eq!(meta.font_region, FontRegion::China);
    assert_eq!(meta.position_page, 2);
    assert_eq!(meta.position_slot, 5);
    assert_eq!(meta.birth_platform, CreationDevice::WiiUSwitch);
    assert_eq!(id.console_id, 0x0102_0304_0506_0708);
    assert!(id.mii_id.is_normal);
    assert!(!id.mii_id.is_ds);
    assert!(!id.mii_id.is_developer);
    assert!(id.mii_id.is_valid);
    assert_eq!(id.mii_id.creation_time, 0x0AB_CDEF);
    assert_eq!(id.console_mac, [0xA0, 0xB1, 0xC2, 0xD3, 0xE4, 0xF5]);
    assert_eq!(id.sex, Sex::Female);
    assert_eq!(id.birthday_month, BirthMonth::December);
    assert_eq!(id.birthday_day, 25);
    assert_eq!(id.favorite_color, FavoriteColor::Black);
    assert!(id.is_favorite);
    assert!(!id.unknown_2);
    assert_eq!(id.name, "Mia");
    assert_eq!(mii.appearance.height, 100);
    assert_eq!(mii.appearance.build, 10);
    assert_eq!(id.creator_name, "Zed");
}

#[test]
fn reserved_codes_survive_as_unknown() {
    let mut buf = legacy_fixture();
    // month 15, colour 15
    buf[0] = 0b0011_1110;
    buf[1] = 0b0011_1110;
    let mii = decode_legacy(&buf).unwrap();
    assert_eq!(mii.identity.birthday_month, BirthMonth::Unknown(15));
    assert_eq!(mii.identity.favorite_color, FavoriteColor::Unknown(15));
    assert_eq!(mii.identity.favorite_color.to_string(), "Unknown (15)");

    let mut buf = modern_fixture();
    // platform 7
    buf[3] = 0x70;
    let mii = decode_modern(&buf).unwrap();
    assert_eq!(mii.metadata.birth_platform, CreationDevice::Unknown(7));
    assert!(!mii.metadata.birth_platform.is_known());
}

#[test]
fn text_stops_at_null_and_drops_lone_surrogates() {
    let mut buf = modern_fixture();
    // 'M', lone high surrogate, 'x', null, 'y'
    let units: [u16; 5] = [0x4D, 0xD800, 0x78, 0, 0x79];
    for (i, unit) in units.iter().enumerate() {
        buf[26 + i * 2..28 + i * 2].copy_from_slice(&unit.to_le_bytes());
    }
    let mii = decode_modern(&buf).unwrap();
    assert_eq!(mii.identity.name, "Mx");
}

#[test]
fn wrong_length_is_rejected() {
    let err = decode_legacy(&[0u8; 73]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::WrongLength {
            expected: 74,
            actual: 73
        }
    );
    assert!(decode_modern(&[0u8; 74]).is_err());
    assert!(mii::decode(MiiFormat::Modern, &legacy_fixture()).is_err());
}

#[test]
fn decode_dispatches_on_caller_format() {
    let record = mii::decode(MiiFormat::Legacy, &legacy_fixture()).unwrap();
    assert_eq!(record.format(), MiiFormat::Legacy);
    assert_eq!(record.name(), "Ann");
    assert_eq!(record.birthday(), (BirthMonth::March, 17));

    let record = mii::decode(MiiFormat::Modern, &modern_fixture()).unwrap();
    assert!(matches!(record, MiiRecord::Modern(_)));
    assert_eq!(record.creator_name(), "Zed");
    assert_eq!(record.sex(), Sex::Female);
}

#[test]
fn format_names_parse() {
    assert_eq!("wii".parse::<MiiFormat>(), Ok(MiiFormat::Legacy));
    assert_eq!("3DS".parse::<MiiFormat>(), Ok(MiiFormat::Modern));
    assert!("gamecube".parse::<MiiFormat>().is_err());
    assert_eq!(MiiFormat::Modern.record_len(), 96);
}

#[test]
fn checksum_is_verified_against_big_endian_trailer() {
    let mut buf = modern_fixture();
    assert!(!verify_checksum(&buf).unwrap());

    seal(&mut buf);
    assert!(verify_checksum(&buf).unwrap());
    let decoded = decode_modern(&buf).unwrap();
    let stored = u16::from_be_bytes([buf[0x5E], buf[0x5F]]);
    assert_eq!(decoded.metadata.checksum, stored.swap_bytes());

    buf[40] ^= 0x01;
    assert!(!verify_checksum(&buf).unwrap());
    assert!(verify_checksum(&buf[..95]).is_err());
}

#[test]
fn hand_built_records_reencode_byte_for_byte() {
    let legacy = legacy_fixture();
    assert_eq!(decode_legacy(&legacy).unwrap().to_bytes(), legacy);

    // Low bit of the last appearance byte is padding.
    let mut padded = legacy_fixture();
    padded[53] |= 0x01;
    let decoded = decode_legacy(&padded).unwrap();
    assert!(decoded.metadata.trailing_pad);
    assert_eq!(decoded.to_bytes(), padded);

    let mut modern = modern_fixture();
    seal(&mut modern);
    assert_eq!(decode_modern(&modern).unwrap().to_bytes(), modern);
}

proptest! {
    #[test]
    fn legacy_reencode_is_stable(bytes in prop::collection::vec(any::<u8>(), 74)) {
        let first = decode_legacy(&bytes).unwrap();
        let encoded = first.to_bytes();
        prop_assert_eq!(encoded.len(), 74);
        prop_assert_eq!(decode_legacy(&encoded).unwrap(), first);
    }

    #[test]
    fn modern_reencode_is_stable(bytes in prop::collection::vec(any::<u8>(), 96)) {
        let first = decode_modern(&bytes).unwrap();
        let encoded = first.to_bytes();
        prop_assert_eq!(encoded.len(), 96);
        prop_assert_eq!(decode_modern(&encoded).unwrap(), first);
    }

    #[test]
    fn legacy_bit_fields_survive_byte_for_byte(mut bytes in prop::collection::vec(any::<u8>(), 74)) {
        bytes[2..22].fill(0);
        bytes[54..74].fill(0);
        let encoded = decode_legacy(&bytes).unwrap().to_bytes();
        prop_assert_eq!(encoded, bytes);
    }

    #[test]
    fn modern_bit_fields_survive_byte_for_byte(mut bytes in prop::collection::vec(any::<u8>(), 96)) {
        // Keep both text fields empty so the only lossy step is excluded.
        bytes[26..46].fill(0);
        bytes[72..92].fill(0);
        let encoded = decode_modern(&bytes).unwrap().to_bytes();
        prop_assert_eq!(encoded, bytes);
    }
}
