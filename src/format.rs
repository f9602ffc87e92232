//! BIN file header parsing.
//!
//! The header occupies the first bytes of the file (positions are
//! 1-indexed, as everywhere in the format):
//!
//! ```text
//! pos  1  u8   product type (1..24)
//! pos  2  u8   column count
//! pos  3  u8   year (mod 100)
//! pos  4  u8   month
//! pos  5  u8   day
//! pos  6  u32  IPv4 row count
//! pos 10  u32  IPv4 section address
//! pos 14  u32  IPv6 row count
//! pos 18  u32  IPv6 section address
//! pos 22  u32  IPv4 index address (0 if absent)
//! pos 26  u32  IPv6 index address (0 if absent)
//! ```
//!
//! Section and index addresses are 1-indexed file offsets. All integers
//! are little-endian.

use crate::decode;
use crate::error::{DatabaseError, Result};
use crate::schema::MAX_PRODUCT_TYPE;
use crate::source::ByteSource;

/// Parsed BIN database header.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    /// Product type, selecting the column schema (1..24).
    pub product_type: u8,
    /// Number of columns per row, including the range start column.
    pub column_count: u8,
    /// Database build year, mod 100.
    pub year: u8,
    /// Database build month.
    pub month: u8,
    /// Database build day.
    pub day: u8,
    /// Number of rows in the IPv4 section.
    pub v4_count: u32,
    /// 1-indexed file offset of the IPv4 section.
    pub v4_addr: u32,
    /// Number of rows in the IPv6 section.
    pub v6_count: u32,
    /// 1-indexed file offset of the IPv6 section.
    pub v6_addr: u32,
    /// 1-indexed file offset of the IPv4 first-octet index, 0 if absent.
    pub v4_index_addr: u32,
    /// 1-indexed file offset of the IPv6 first-octet index, 0 if absent.
    pub v6_index_addr: u32,
}

impl Header {
    /// Read and validate the header from a byte source.
    pub(crate) fn read(src: &dyn ByteSource) -> Result<Header> {
        let header = Header {
            product_type: decode::read_u8(src, 1)?,
            column_count: decode::read_u8(src, 2)?,
            year: decode::read_u8(src, 3)?,
            month: decode::read_u8(src, 4)?,
            day: decode::read_u8(src, 5)?,
            v4_count: decode::read_u32(src, 6)?,
            v4_addr: decode::read_u32(src, 10)?,
            v6_count: decode::read_u32(src, 14)?,
            v6_addr: decode::read_u32(src, 18)?,
            v4_index_addr: decode::read_u32(src, 22)?,
            v6_index_addr: decode::read_u32(src, 26)?,
        };

        // The format carries no magic number; any header with a known
        // product type is accepted.
        if header.product_type == 0 || header.product_type > MAX_PRODUCT_TYPE {
            return Err(DatabaseError::Format(format!(
                "unsupported product type {} (expected 1..={})",
                header.product_type, MAX_PRODUCT_TYPE
            )));
        }

        Ok(header)
    }

    /// Byte width of one IPv4 row: every column is 4 bytes.
    pub(crate) fn v4_stride(&self) -> u32 {
        u32::from(self.column_count) * 4
    }

    /// Byte width of one IPv6 row: the range start column widens to 16
    /// bytes, the rest stay 4. A degenerate zero-column header yields the
    /// bare range start width rather than underflowing.
    pub(crate) fn v6_stride(&self) -> u32 {
        16 + u32::from(self.column_count).saturating_sub(1) * 4
    }
}
