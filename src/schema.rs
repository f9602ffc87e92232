//! Column schema for each database product type.
//!
//! A BIN file's product type (1..24) determines which attributes its rows
//! carry and in which column. Column 1 is always the range start address;
//! data columns are numbered from 2. The matrix below maps every attribute
//! to its column per product type, with 0 meaning the attribute is absent.

/// Row attributes stored in a BIN database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attribute {
    Country,
    Region,
    City,
    Isp,
    Latitude,
    Longitude,
    Domain,
    ZipCode,
    Timezone,
    NetSpeed,
    IddCode,
    AreaCode,
    WeatherStationCode,
    WeatherStationName,
    Mcc,
    Mnc,
    MobileBrand,
    Elevation,
    UsageType,
}

pub(crate) const ATTRIBUTE_COUNT: usize = 19;

/// Highest supported product type.
pub(crate) const MAX_PRODUCT_TYPE: u8 = 24;

/// Column of each attribute, indexed `[attribute][product_type]`.
/// Slot 0 of each row is unused (product types start at 1).
#[rustfmt::skip]
const COLUMN_OF: [[u8; MAX_PRODUCT_TYPE as usize + 1]; ATTRIBUTE_COUNT] = [
    /* Country            */ [0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    /* Region             */ [0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3],
    /* City               */ [0, 0, 0, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4],
    /* Isp                */ [0, 0, 3, 0, 5, 0, 7, 5, 7, 0, 8, 0, 9, 0, 9, 0, 9, 0, 9, 7, 9, 0, 9, 7, 9],
    /* Latitude           */ [0, 0, 0, 0, 0, 5, 5, 0, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    /* Longitude          */ [0, 0, 0, 0, 0, 6, 6, 0, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6],
    /* Domain             */ [0, 0, 0, 0, 0, 0, 0, 6, 8, 0, 9, 0, 10, 0, 10, 0, 10, 0, 10, 8, 10, 0, 10, 8, 10],
    /* ZipCode            */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 7, 7, 7, 0, 7, 7, 7, 0, 7, 0, 7, 7, 7, 0, 7],
    /* Timezone           */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 8, 7, 8, 8, 8, 7, 8, 0, 8, 8, 8, 0, 8],
    /* NetSpeed           */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 11, 0, 11, 8, 11, 0, 11, 0, 11, 0, 11],
    /* IddCode            */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 12, 0, 12, 0, 12, 9, 12, 0, 12],
    /* AreaCode           */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 13, 0, 13, 0, 13, 10, 13, 0, 13],
    /* WeatherStationCode */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 14, 0, 14, 0, 14, 0, 14],
    /* WeatherStationName */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 15, 0, 15, 0, 15, 0, 15],
    /* Mcc                */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 16, 0, 16, 9, 16],
    /* Mnc                */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 17, 0, 17, 10, 17],
    /* MobileBrand        */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11, 18, 0, 18, 11, 18],
    /* Elevation          */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11, 19, 0, 19],
    /* UsageType          */ [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 12, 20],
];

const ATTRIBUTES: [Attribute; ATTRIBUTE_COUNT] = [
    Attribute::Country,
    Attribute::Region,
    Attribute::City,
    Attribute::Isp,
    Attribute::Latitude,
    Attribute::Longitude,
    Attribute::Domain,
    Attribute::ZipCode,
    Attribute::Timezone,
    Attribute::NetSpeed,
    Attribute::IddCode,
    Attribute::AreaCode,
    Attribute::WeatherStationCode,
    Attribute::WeatherStationName,
    Attribute::Mcc,
    Attribute::Mnc,
    Attribute::MobileBrand,
    Attribute::Elevation,
    Attribute::UsageType,
];

impl Attribute {
    /// Column of this attribute for the given product type, or 0 if absent.
    pub(crate) fn column(self, product_type: u8) -> u8 {
        COLUMN_OF[self as usize][usize::from(product_type)]
    }
}

/// Per-attribute row-local byte offsets for one database file.
///
/// The offset is relative to the start of a row's data portion (the bytes
/// after the range start address): column `k` lives at `(k - 2) * 4`.
/// `None` means the product type does not carry the attribute. Columns
/// beyond the header's column count are treated as absent so row-local
/// reads can never run past the row buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    offsets: [Option<u32>; ATTRIBUTE_COUNT],
}

impl Layout {
    pub(crate) fn new(product_type: u8, column_count: u8) -> Self {
        let mut offsets = [None; ATTRIBUTE_COUNT];
        for (slot, attr) in offsets.iter_mut().zip(ATTRIBUTES) {
            let column = attr.column(product_type);
            if column >= 2 && column <= column_count {
                *slot = Some(u32::from(column - 2) * 4);
            }
        }
        Layout { offsets }
    }

    /// Row-local byte offset of `attr`, or `None` when unavailable.
    pub(crate) fn offset(&self, attr: Attribute) -> Option<u32> {
        self.offsets[attr as usize]
    }
}
