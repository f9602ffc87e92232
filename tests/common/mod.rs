//! Synthetic BIN database images for tests and benches.
//!
//! Builds complete files in memory: header, IPv4/IPv6 range sections with
//! trailing sentinel rows, optional first-octet index tables, and a
//! length-prefixed string heap. Layouts match the DB1 (country-only) and
//! DB24 (every attribute, 20 columns) product types.

#![allow(dead_code)]

const HEADER_LEN: u32 = 64;
const INDEX_LEN: u32 = 65536 * 8;

/// One IP range and its column values.
#[derive(Clone)]
pub struct RowSpec {
    pub from: u128,
    pub cc: &'static str,
    pub country: &'static str,
    pub region: &'static str,
    pub city: &'static str,
    /// Value for every remaining string column.
    pub text: &'static str,
    pub lat: f32,
    pub lon: f32,
    pub elevation: &'static str,
    pub usage: &'static str,
}

impl RowSpec {
    pub fn new(from: u128, cc: &'static str, country: &'static str) -> Self {
        RowSpec {
            from,
            cc,
            country,
            region: "-",
            city: "-",
            text: "-",
            lat: 0.0,
            lon: 0.0,
            elevation: "0",
            usage: "-",
        }
    }
}

struct Heap {
    base: u32,
    buf: Vec<u8>,
}

impl Heap {
    fn intern(&mut self, s: &str) -> u32 {
        let ptr = self.base + self.buf.len() as u32;
        self.buf.push(s.len() as u8);
        self.buf.extend_from_slice(s.as_bytes());
        ptr
    }

    /// Short code entry followed by the long name, so the long name is
    /// reachable at the returned pointer + 3.
    fn intern_country(&mut self, cc: &str, country: &str) -> u32 {
        assert_eq!(cc.len(), 2, "country codes are two letters");
        let ptr = self.intern(cc);
        self.intern(country);
        ptr
    }
}

fn slot_value(product_type: u8, col: u8, row: &RowSpec, heap: &mut Heap) -> u32 {
    if product_type == 1 {
        return match col {
            2 => heap.intern_country(row.cc, row.country),
            _ => 0,
        };
    }
    // DB24 column assignments.
    match col {
        2 => heap.intern_country(row.cc, row.country),
        3 => heap.intern(row.region),
        4 => heap.intern(row.city),
        5 => row.lat.to_bits(),
        6 => row.lon.to_bits(),
        19 => heap.intern(row.elevation),
        20 => heap.intern(row.usage),
        _ => heap.intern(row.text),
    }
}

fn build_index(froms: &[u128], shift: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(INDEX_LEN as usize);
    for p in 0..=u16::MAX as u32 {
        let lo_bound = u128::from(p) << shift;
        let hi_bound = if p == u32::from(u16::MAX) {
            u128::MAX
        } else {
            u128::from(p + 1) << shift
        };
        let mut low = u32::MAX;
        let mut high = 0u32;
        for i in 0..froms.len() - 1 {
            if froms[i] < hi_bound && froms[i + 1] > lo_bound {
                low = low.min(i as u32);
                high = high.max(i as u32);
            }
        }
        if low == u32::MAX {
            low = 0;
            high = 0;
        }
        out.extend_from_slice(&low.to_le_bytes());
        out.extend_from_slice(&high.to_le_bytes());
    }
    out
}

/// Assemble a complete BIN image.
pub fn build(
    product_type: u8,
    columns: u8,
    v4: &[RowSpec],
    v6: &[RowSpec],
    indexed: bool,
) -> Vec<u8> {
    let v4_stride = u32::from(columns) * 4;
    let v6_stride = 16 + (u32::from(columns) - 1) * 4;

    let v4_start = HEADER_LEN;
    let v4_len = (v4.len() as u32 + 1) * v4_stride;
    let v6_start = v4_start + v4_len;
    let v6_len = if v6.is_empty() {
        0
    } else {
        (v6.len() as u32 + 1) * v6_stride
    };
    let (v4_index_start, v6_index_start, heap_start) = if indexed {
        let v4_index_start = v6_start + v6_len;
        let v6_index_start = v4_index_start + INDEX_LEN;
        (v4_index_start, v6_index_start, v6_index_start + INDEX_LEN)
    } else {
        (0, 0, v6_start + v6_len)
    };

    let mut heap = Heap {
        base: heap_start,
        buf: Vec::new(),
    };

    let mut v4_section = Vec::new();
    for row in v4 {
        v4_section.extend_from_slice(&(row.from as u32).to_le_bytes());
        for col in 2..=columns {
            v4_section.extend_from_slice(&slot_value(product_type, col, row, &mut heap).to_le_bytes());
        }
    }
    // Sentinel row: its range start terminates the final range.
    v4_section.extend_from_slice(&u32::MAX.to_le_bytes());
    v4_section.resize(v4_len as usize, 0);

    let mut v6_section = Vec::new();
    if !v6.is_empty() {
        for row in v6 {
            v6_section.extend_from_slice(&row.from.to_le_bytes());
            for col in 2..=columns {
                v6_section
                    .extend_from_slice(&slot_value(product_type, col, row, &mut heap).to_le_bytes());
            }
        }
        v6_section.extend_from_slice(&u128::MAX.to_le_bytes());
        v6_section.resize(v6_len as usize, 0);
    }

    let mut header = vec![0u8; HEADER_LEN as usize];
    header[0] = product_type;
    header[1] = columns;
    header[2] = 25;
    header[3] = 6;
    header[4] = 1;
    header[5..9].copy_from_slice(&(v4.len() as u32).to_le_bytes());
    header[9..13].copy_from_slice(&(v4_start + 1).to_le_bytes());
    header[13..17].copy_from_slice(&(v6.len() as u32).to_le_bytes());
    let v6_addr = if v6.is_empty() { 0 } else { v6_start + 1 };
    header[17..21].copy_from_slice(&v6_addr.to_le_bytes());
    if indexed {
        header[21..25].copy_from_slice(&(v4_index_start + 1).to_le_bytes());
        header[25..29].copy_from_slice(&(v6_index_start + 1).to_le_bytes());
    }

    let mut image = header;
    image.extend_from_slice(&v4_section);
    image.extend_from_slice(&v6_section);
    if indexed {
        let mut froms4: Vec<u128> = v4.iter().map(|r| r.from).collect();
        froms4.push(u128::from(u32::MAX));
        image.extend_from_slice(&build_index(&froms4, 16));

        let mut froms6: Vec<u128> = v6.iter().map(|r| r.from).collect();
        froms6.push(u128::MAX);
        image.extend_from_slice(&build_index(&froms6, 112));
    }
    image.extend_from_slice(&heap.buf);
    // Slack so probing the sentinel's neighbour never runs off the file.
    image.extend_from_slice(&[0u8; 16]);
    image
}

pub fn v4_rows() -> Vec<RowSpec> {
    vec![
        RowSpec::new(0, "ZZ", "Reserved"),
        RowSpec::new(0x0100_0000, "AU", "Australia"),
        RowSpec {
            from: 0x0800_0000,
            cc: "US",
            country: "United States of America",
            region: "California",
            city: "Mountain View",
            text: "Google LLC",
            lat: 37.386,
            lon: -122.0838,
            elevation: "32.5",
            usage: "DCH",
        },
        RowSpec::new(0x0900_0000, "XX", "Elsewhere"),
    ]
}

pub fn v6_rows() -> Vec<RowSpec> {
    vec![
        RowSpec::new(0, "ZZ", "Reserved"),
        RowSpec {
            from: 0x2001_4860_0000_0000_0000_0000_0000_0000,
            cc: "US",
            country: "United States of America",
            region: "California",
            city: "Mountain View",
            text: "Google LLC",
            lat: 37.386,
            lon: -122.0838,
            elevation: "32.5",
            usage: "DCH",
        },
        RowSpec::new(0x2001_4861_0000_0000_0000_0000_0000_0000, "XX", "Elsewhere"),
    ]
}

/// Full-attribute database (product type 24, 20 columns).
pub fn db24(indexed: bool) -> Vec<u8> {
    build(24, 20, &v4_rows(), &v6_rows(), indexed)
}

/// Country-only database (product type 1, 2 columns, IPv4 section only).
pub fn db1() -> Vec<u8> {
    build(1, 2, &v4_rows(), &[], false)
}
