//! Address normalization.
//!
//! Turns a textual IP address into the numeric form the range sections are
//! keyed on. Three IPv6 forms embed an IPv4 address and are rewritten to
//! their embedded number so they resolve against the IPv4 section:
//! IPv4-mapped (`::ffff:0:0/96`), 6to4 (`2002::/16`) and Teredo
//! (`2001::/32`, where the client address is stored bit-inverted).

use crate::format::Header;
use std::net::IpAddr;

const V4_MAPPED_FROM: u128 = 0xffff_0000_0000; // ::ffff:0:0
const V4_MAPPED_TO: u128 = 0xffff_ffff_ffff; // ::ffff:255.255.255.255
const SIX_TO_FOUR_FROM: u128 = 0x2002_0000_0000_0000_0000_0000_0000_0000;
const SIX_TO_FOUR_TO: u128 = 0x2002_ffff_ffff_ffff_ffff_ffff_ffff_ffff;
const TEREDO_FROM: u128 = 0x2001_0000_0000_0000_0000_0000_0000_0000;
const TEREDO_TO: u128 = 0x2001_0000_ffff_ffff_ffff_ffff_ffff_ffff;

const LAST_32_BITS: u128 = 0xffff_ffff;

/// Which range section an address resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IpKind {
    V4,
    V6,
}

/// A normalized query address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IpQuery {
    pub kind: IpKind,
    /// Numeric address; for `V4` only the low 32 bits are meaningful.
    pub num: u128,
    /// 1-indexed file offset of the first-octet index entry for this
    /// address, or 0 when the file has no index for the section.
    pub index_offset: u32,
}

/// Parse and normalize a textual IP address.
///
/// Returns `None` for unparseable input.
pub(crate) fn normalize(ip: &str, header: &Header) -> Option<IpQuery> {
    let (kind, num) = match ip.parse::<IpAddr>().ok()? {
        IpAddr::V4(v4) => (IpKind::V4, u128::from(u32::from(v4))),
        IpAddr::V6(v6) => {
            let num = u128::from(v6);
            if (V4_MAPPED_FROM..=V4_MAPPED_TO).contains(&num) {
                (IpKind::V4, num - V4_MAPPED_FROM)
            } else if (SIX_TO_FOUR_FROM..=SIX_TO_FOUR_TO).contains(&num) {
                (IpKind::V4, (num >> 80) & LAST_32_BITS)
            } else if (TEREDO_FROM..=TEREDO_TO).contains(&num) {
                (IpKind::V4, !num & LAST_32_BITS)
            } else {
                (IpKind::V6, num)
            }
        }
    };

    let index_offset = match kind {
        IpKind::V4 if header.v4_index_addr > 0 => {
            header.v4_index_addr + (((num >> 16) as u32) << 3)
        }
        IpKind::V6 if header.v6_index_addr > 0 => {
            header.v6_index_addr + (((num >> 112) as u32) << 3)
        }
        _ => 0,
    };

    Some(IpQuery {
        kind,
        num,
        index_offset,
    })
}
