use serde::{Deserialize, Serialize};

use crate::coded::coded_enum;

coded_enum! {
    pub enum Sex {
        Male = 0 => "Male",
        Female = 1 => "Female",
    }
}

coded_enum! {
    pub enum BirthMonth {
        NoBirthday = 0 => "No birthday",
        January = 1 => "January",
        February = 2 => "February",
        March = 3 => "March",
        April = 4 => "April",
        May = 5 => "May",
        June = 6 => "June",
        July = 7 => "July",
        August = 8 => "August",
        September = 9 => "September",
        October = 10 => "October",
        November = 11 => "November",
        December = 12 => "December",
    }
}

coded_enum! {
    /// Shared by both record formats and the save-file profile byte.
    pub enum FavoriteColor {
        Red = 0 => "Red",
        Orange = 1 => "Orange",
        Yellow = 2 => "Yellow",
        LightGreen = 3 => "Light Green",
        Green = 4 => "Green",
        Blue = 5 => "Blue",
        LightBlue = 6 => "Light Blue",
        Pink = 7 => "Pink",
        Purple = 8 => "Purple",
        Brown = 9 => "Brown",
        White = 10 => "White",
        Black = 11 => "Black",
    }
}

coded_enum! {
    pub enum CreationDevice {
        Wii = 1 => "Wii",
        Ds = 2 => "DS",
        N3ds = 3 => "3DS",
        WiiUSwitch = 4 => "Wii U/Switch",
    }
}

coded_enum! {
    pub enum RegionLock {
        NoLock = 0 => "No lock",
        Japan = 1 => "JPN",
        Usa = 2 => "USA",
        PalAus = 3 => "PAL/AUS",
    }
}

coded_enum! {
    pub enum FontRegion {
        Standard = 0 => "JPN/USA/PAL/AUS",
        China = 1 => "CHN",
        Korea = 2 => "KOR",
        Taiwan = 3 => "TWN",
    }
}

coded_enum! {
    pub enum MiiSource {
        Local = 0 => "Local",
        Downloaded = 1 => "Downloaded",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MiiKind {
    Special,
    Normal,
    Foreign,
}

/// Four-bit legacy type code. The console only distinguishes three kinds
/// but the exact code is kept for re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMiiType {
    pub raw: u8,
}

impl LegacyMiiType {
    pub fn kind(&self) -> MiiKind {
        match self.raw {
            0 | 1 | 4 | 5 => MiiKind::Special,
            12 | 13 => MiiKind::Foreign,
            _ => MiiKind::Normal,
        }
    }
}
