use unicode_general_category::{GeneralCategory, get_general_category};

use crate::bits::Endian;

fn code_units(raw: &[u8], endian: Endian) -> impl Iterator<Item = u16> + '_ {
    raw.chunks_exact(2).map(move |pair| match endian {
        Endian::Big => u16::from_be_bytes([pair[0], pair[1]]),
        Endian::Little => u16::from_le_bytes([pair[0], pair[1]]),
    })
}

/// Decodes a fixed-length UTF-16 record field.
///
/// Stops at the first null code unit. Unpaired surrogates are dropped rather
/// than failing the field.
pub fn decode_utf16_field(raw: &[u8], endian: Endian) -> String {
    let units = code_units(raw, endian).take_while(|&u| u != 0);
    char::decode_utf16(units).filter_map(Result::ok).collect()
}

/// Encodes `text` into exactly `units` UTF-16 code units, null padded.
/// Text longer than the field is truncated.
pub fn encode_utf16_field(text: &str, units: usize, endian: Endian) -> Vec<u8> {
    let mut out = Vec::with_capacity(units * 2);
    for unit in text.encode_utf16().chain(std::iter::repeat(0)).take(units) {
        match endian {
            Endian::Big => out.extend_from_slice(&unit.to_be_bytes()),
            Endian::Little => out.extend_from_slice(&unit.to_le_bytes()),
        }
    }
    out
}

/// Whether a character is displayable text.
///
/// Every character in the Other (control, format, surrogate, private-use,
/// unassigned) and Separator classes is non-printable, except the ASCII
/// space.
pub fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_field_truncates_at_null() {
        let raw = encode_utf16_field("Mii", 10, Endian::Little);
        assert_eq!(raw.len(), 20);
        assert_eq!(decode_utf16_field(&raw, Endian::Little), "Mii");
    }

    #[test]
    fn record_field_drops_lone_surrogates() {
        let mut raw = Vec::new();
        for unit in [0x0041u16, 0xD800, 0x0042] {
            raw.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_utf16_field(&raw, Endian::Big), "AB");
    }

    #[test]
    fn printable_rules() {
        assert!(is_printable('a'));
        assert!(is_printable(' '));
        assert!(is_printable('é'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\u{3000}'));
        assert!(!is_printable('\u{E000}'));
        assert!(!is_printable('\u{200B}'));
        assert!(!is_printable('\u{00A0}'));
        assert!(!is_printable('\u{0378}'));
        assert!(!is_printable('\u{0890}'));
        assert!(!is_printable('\u{08E2}'));
        assert!(!is_printable('\u{FDD0}'));
        assert!(!is_printable('\u{2028}'));
        assert!(is_printable('\u{30C6}'));
    }
}
