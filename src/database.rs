//! Database handle and range lookup engine.
//!
//! A [`Database`] pairs an immutable [`ByteSource`] with the header and
//! column layout parsed at open time. Queries binary-search the sorted
//! `(ip_from, ip_to)` range table for the section matching the normalized
//! address, optionally narrowed by the file's first-octet index, then
//! decode only the requested columns out of the matched row.

use crate::addr::{self, IpKind};
use crate::decode;
use crate::error::Result;
use crate::format::Header;
use crate::record::{Fields, Record, FIELD_UNSUPPORTED, INVALID_ADDRESS};
use crate::schema::{Attribute, Layout};
use crate::source::{ByteSource, MemSource, MmapSource};
use std::path::Path;

/// Parameters of one range section (IPv4 or IPv6).
struct Section {
    base_addr: u32,
    stride: u32,
    row_count: u32,
    max_ip: u128,
    /// Byte width of the range start column (4 for v4, 16 for v6).
    first_col: u32,
}

/// Read-only handle to a BIN geolocation database.
///
/// The handle is immutable after construction; all queries take `&self`
/// and the byte source performs stateless positional reads, so a single
/// handle can serve concurrent lookups from multiple threads.
///
/// # Example
///
/// ```no_run
/// use geobin::{Database, Fields};
///
/// let db = Database::open("IP2LOCATION-LITE-DB11.BIN")?;
/// let rec = db.query("8.8.8.8", Fields::ALL)?;
/// println!("{} / {}", rec.country_short, rec.city);
/// # Ok::<(), geobin::DatabaseError>(())
/// ```
pub struct Database {
    source: Box<dyn ByteSource>,
    header: Header,
    layout: Layout,
}

impl Database {
    /// Open a database file using a memory-mapped byte source.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Database> {
        Self::open_with_source(Box::new(MmapSource::open(path)?))
    }

    /// Open a database file fully buffered in memory.
    pub fn open_in_memory<P: AsRef<Path>>(path: P) -> Result<Database> {
        Self::open_with_source(Box::new(MemSource::load(path)?))
    }

    /// Create a database from raw BIN image bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Database> {
        Self::open_with_source(Box::new(MemSource::new(data)))
    }

    /// Open a database over a pre-built byte source.
    ///
    /// Reads and validates the header once; on failure the source is
    /// closed before the error is returned.
    pub fn open_with_source(source: Box<dyn ByteSource>) -> Result<Database> {
        let header = match Header::read(source.as_ref()) {
            Ok(header) => header,
            Err(err) => {
                source.close();
                return Err(err);
            }
        };
        let layout = Layout::new(header.product_type, header.column_count);
        Ok(Database {
            source,
            header,
            layout,
        })
    }

    /// The parsed file header (product type, build date, row counts).
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Release the byte source. Idempotent; queries made after close fail
    /// with [`DatabaseError::Io`](crate::DatabaseError::Io).
    pub fn close(&self) {
        self.source.close();
    }

    /// Look up `ip` and populate the fields selected by `fields`.
    ///
    /// Invalid addresses and fields the file's product type lacks are not
    /// errors; they surface as placeholder text in the returned record.
    /// Only I/O failures from the byte source propagate as errors.
    pub fn query(&self, ip: &str, fields: Fields) -> Result<Record> {
        let Some(query) = addr::normalize(ip, &self.header) else {
            return Ok(Record::with_message(INVALID_ADDRESS));
        };

        let section = match query.kind {
            IpKind::V4 => Section {
                base_addr: self.header.v4_addr,
                stride: self.header.v4_stride(),
                row_count: self.header.v4_count,
                max_ip: u128::from(u32::MAX),
                first_col: 4,
            },
            IpKind::V6 => Section {
                base_addr: self.header.v6_addr,
                stride: self.header.v6_stride(),
                row_count: self.header.v6_count,
                max_ip: u128::MAX,
                first_col: 16,
            },
        };
        if section.base_addr == 0 {
            return Ok(Record::default());
        }

        let src = self.source.as_ref();
        let mut low = 0u32;
        let mut high = section.row_count;
        if query.index_offset > 0 {
            low = decode::read_u32(src, u64::from(query.index_offset))?;
            high = decode::read_u32(src, u64::from(query.index_offset) + 4)?;
        }

        // Keep the final row reachable: its ip_to is the sentinel value
        // one past the address space.
        let mut num = query.num;
        if num >= section.max_ip {
            num -= 1;
        }

        while low <= high {
            let mid = ((u64::from(low) + u64::from(high)) / 2) as u32;
            let row_pos = u64::from(section.base_addr) + u64::from(mid) * u64::from(section.stride);
            let next_pos = row_pos + u64::from(section.stride);

            let (ip_from, ip_to) = match query.kind {
                IpKind::V4 => (
                    u128::from(decode::read_u32(src, row_pos)?),
                    u128::from(decode::read_u32(src, next_pos)?),
                ),
                IpKind::V6 => (
                    decode::read_u128(src, row_pos)?,
                    decode::read_u128(src, next_pos)?,
                ),
            };

            if ip_from <= num && num < ip_to {
                let mut row = vec![0u8; (section.stride - section.first_col) as usize];
                decode::read_row(src, row_pos + u64::from(section.first_col), &mut row)?;
                return self.assemble(&row, fields);
            }
            if num < ip_from {
                match mid.checked_sub(1) {
                    Some(prev) => high = prev,
                    None => break,
                }
            } else {
                low = mid + 1;
            }
        }

        Ok(Record::default())
    }

    /// Decode the requested columns out of a prefetched row buffer.
    fn assemble(&self, row: &[u8], fields: Fields) -> Result<Record> {
        let mut rec = Record::default();
        let src = self.source.as_ref();

        if fields.intersects(Fields::COUNTRY_SHORT | Fields::COUNTRY_LONG) {
            match self.layout.offset(Attribute::Country) {
                Some(offset) => {
                    // The pointer names the short code; the long name sits
                    // right after it (one length byte plus two code bytes).
                    let ptr = u64::from(decode::read_u32_row(row, offset));
                    if fields.contains(Fields::COUNTRY_SHORT) {
                        rec.country_short = decode::read_str(src, ptr)?;
                    }
                    if fields.contains(Fields::COUNTRY_LONG) {
                        rec.country_long = decode::read_str(src, ptr + 3)?;
                    }
                }
                None => {
                    if fields.contains(Fields::COUNTRY_SHORT) {
                        rec.country_short = FIELD_UNSUPPORTED.to_string();
                    }
                    if fields.contains(Fields::COUNTRY_LONG) {
                        rec.country_long = FIELD_UNSUPPORTED.to_string();
                    }
                }
            }
        }

        let string_fields: [(Fields, Attribute, &mut String); 15] = [
            (Fields::REGION, Attribute::Region, &mut rec.region),
            (Fields::CITY, Attribute::City, &mut rec.city),
            (Fields::ISP, Attribute::Isp, &mut rec.isp),
            (Fields::DOMAIN, Attribute::Domain, &mut rec.domain),
            (Fields::ZIP_CODE, Attribute::ZipCode, &mut rec.zip_code),
            (Fields::TIMEZONE, Attribute::Timezone, &mut rec.timezone),
            (Fields::NET_SPEED, Attribute::NetSpeed, &mut rec.net_speed),
            (Fields::IDD_CODE, Attribute::IddCode, &mut rec.idd_code),
            (Fields::AREA_CODE, Attribute::AreaCode, &mut rec.area_code),
            (
                Fields::WEATHER_STATION_CODE,
                Attribute::WeatherStationCode,
                &mut rec.weather_station_code,
            ),
            (
                Fields::WEATHER_STATION_NAME,
                Attribute::WeatherStationName,
                &mut rec.weather_station_name,
            ),
            (Fields::MCC, Attribute::Mcc, &mut rec.mcc),
            (Fields::MNC, Attribute::Mnc, &mut rec.mnc),
            (
                Fields::MOBILE_BRAND,
                Attribute::MobileBrand,
                &mut rec.mobile_brand,
            ),
            (Fields::USAGE_TYPE, Attribute::UsageType, &mut rec.usage_type),
        ];
        for (bit, attr, slot) in string_fields {
            if !fields.contains(bit) {
                continue;
            }
            match self.layout.offset(attr) {
                Some(offset) => {
                    let ptr = u64::from(decode::read_u32_row(row, offset));
                    *slot = decode::read_str(src, ptr)?;
                }
                None => *slot = FIELD_UNSUPPORTED.to_string(),
            }
        }

        if fields.contains(Fields::LATITUDE) {
            if let Some(offset) = self.layout.offset(Attribute::Latitude) {
                rec.latitude = decode::read_f32_row(row, offset);
            }
        }
        if fields.contains(Fields::LONGITUDE) {
            if let Some(offset) = self.layout.offset(Attribute::Longitude) {
                rec.longitude = decode::read_f32_row(row, offset);
            }
        }
        if fields.contains(Fields::ELEVATION) {
            if let Some(offset) = self.layout.offset(Attribute::Elevation) {
                // Stored as an ASCII decimal string; malformed values
                // decode to 0.
                let ptr = u64::from(decode::read_u32_row(row, offset));
                let text = decode::read_str(src, ptr)?;
                rec.elevation = text.parse().unwrap_or(0.0);
            }
        }

        Ok(rec)
    }
}

macro_rules! field_getters {
    ($(#[$doc:meta] $name:ident => $field:ident),+ $(,)?) => {
        impl Database {
            $(
                #[$doc]
                pub fn $name(&self, ip: &str) -> Result<Record> {
                    self.query(ip, Fields::$field)
                }
            )+
        }
    };
}

impl Database {
    /// Look up `ip` and populate every field.
    pub fn get_all(&self, ip: &str) -> Result<Record> {
        self.query(ip, Fields::ALL)
    }
}

field_getters! {
    /// Look up only the ISO-3166 country code.
    get_country_short => COUNTRY_SHORT,
    /// Look up only the full country name.
    get_country_long => COUNTRY_LONG,
    /// Look up only the region name.
    get_region => REGION,
    /// Look up only the city name.
    get_city => CITY,
    /// Look up only the ISP name.
    get_isp => ISP,
    /// Look up only the latitude.
    get_latitude => LATITUDE,
    /// Look up only the longitude.
    get_longitude => LONGITUDE,
    /// Look up only the domain name.
    get_domain => DOMAIN,
    /// Look up only the postal code.
    get_zip_code => ZIP_CODE,
    /// Look up only the time zone.
    get_timezone => TIMEZONE,
    /// Look up only the connection speed class.
    get_net_speed => NET_SPEED,
    /// Look up only the IDD prefix.
    get_idd_code => IDD_CODE,
    /// Look up only the area code.
    get_area_code => AREA_CODE,
    /// Look up only the weather station code.
    get_weather_station_code => WEATHER_STATION_CODE,
    /// Look up only the weather station name.
    get_weather_station_name => WEATHER_STATION_NAME,
    /// Look up only the mobile country code.
    get_mcc => MCC,
    /// Look up only the mobile network code.
    get_mnc => MNC,
    /// Look up only the mobile carrier brand.
    get_mobile_brand => MOBILE_BRAND,
    /// Look up only the elevation.
    get_elevation => ELEVATION,
    /// Look up only the usage type.
    get_usage_type => USAGE_TYPE,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;

    // Minimal DB1 (country-only) IPv4 image: two ranges splitting the
    // address space at 8.0.0.0, a sentinel row, no v6 section, no index.
    fn tiny_db1() -> Vec<u8> {
        let header_len = 64u32;
        let stride = 8u32; // 2 columns
        let row_count = 2u32;
        let v4_addr = header_len + 1; // 1-indexed
        let heap_start = header_len + (row_count + 1) * stride; // 0-indexed

        let mut buf = vec![0u8; 64];
        buf[0] = 1; // DB1
        buf[1] = 2; // columns
        buf[2] = 25;
        buf[3] = 6;
        buf[4] = 1;
        buf[5..9].copy_from_slice(&row_count.to_le_bytes());
        buf[9..13].copy_from_slice(&v4_addr.to_le_bytes());

        // Rows: [0, 8.0.0.0) -> ZZ, [8.0.0.0, MAX) -> US.
        let zz_ptr = heap_start;
        let us_ptr = heap_start + 3 + 8; // past "ZZ" pair
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&zz_ptr.to_le_bytes());
        buf.extend_from_slice(&0x08000000u32.to_le_bytes());
        buf.extend_from_slice(&us_ptr.to_le_bytes());
        buf.extend_from_slice(&u32::MAX.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());

        // Heap: each country entry is the short code followed by the
        // long name, reachable at ptr + 3.
        buf.extend_from_slice(&[2]);
        buf.extend_from_slice(b"ZZ");
        buf.extend_from_slice(&[7]);
        buf.extend_from_slice(b"Nowhere");
        buf.extend_from_slice(&[2]);
        buf.extend_from_slice(b"US");
        buf.extend_from_slice(&[24]);
        buf.extend_from_slice(b"United States of America");
        buf
    }

    #[test]
    fn query_matches_ranges() {
        let db = Database::from_bytes(tiny_db1()).unwrap();

        let rec = db.query("8.8.8.8", Fields::ALL).unwrap();
        assert_eq!(rec.country_short, "US");
        assert_eq!(rec.country_long, "United States of America");

        let rec = db.query("1.2.3.4", Fields::ALL).unwrap();
        assert_eq!(rec.country_short, "ZZ");
        assert_eq!(rec.country_long, "Nowhere");
    }

    #[test]
    fn boundary_address_is_decremented_into_last_row() {
        let db = Database::from_bytes(tiny_db1()).unwrap();
        let rec = db.query("255.255.255.255", Fields::ALL).unwrap();
        assert_eq!(rec.country_short, "US");
    }

    #[test]
    fn invalid_address_yields_placeholder_record() {
        let db = Database::from_bytes(tiny_db1()).unwrap();
        let rec = db.query("not-an-ip", Fields::ALL).unwrap();
        assert_eq!(rec.country_short, INVALID_ADDRESS);
        assert_eq!(rec.usage_type, INVALID_ADDRESS);
        assert_eq!(rec.latitude, 0.0);
    }

    #[test]
    fn unsupported_fields_yield_placeholder_slots() {
        let db = Database::from_bytes(tiny_db1()).unwrap();
        let rec = db.query("8.8.8.8", Fields::ALL).unwrap();
        assert_eq!(rec.country_short, "US");
        assert_eq!(rec.region, FIELD_UNSUPPORTED);
        assert_eq!(rec.city, FIELD_UNSUPPORTED);
        assert_eq!(rec.usage_type, FIELD_UNSUPPORTED);
        // Float slots stay at their defaults.
        assert_eq!(rec.latitude, 0.0);
        assert_eq!(rec.elevation, 0.0);
    }

    #[test]
    fn unselected_fields_stay_empty() {
        let db = Database::from_bytes(tiny_db1()).unwrap();
        let rec = db.query("8.8.8.8", Fields::COUNTRY_SHORT).unwrap();
        assert_eq!(rec.country_short, "US");
        assert_eq!(rec.country_long, "");
        assert_eq!(rec.region, "");
    }

    #[test]
    fn v6_query_without_v6_section_finds_nothing() {
        let db = Database::from_bytes(tiny_db1()).unwrap();
        let rec = db.query("2001:db8::1", Fields::ALL).unwrap();
        assert_eq!(rec, Record::default());
    }

    #[test]
    fn garbage_bytes_fail_to_open() {
        assert!(Database::from_bytes(vec![0u8; 4]).is_err());
        assert!(Database::from_bytes(vec![0xFFu8; 64]).is_err());
    }

    #[test]
    fn close_fails_later_queries() {
        let db = Database::from_bytes(tiny_db1()).unwrap();
        db.close();
        db.close();
        assert!(matches!(
            db.query("8.8.8.8", Fields::ALL),
            Err(DatabaseError::Io(_))
        ));
    }

    #[test]
    fn handle_is_shareable_across_threads() {
        let db = std::sync::Arc::new(Database::from_bytes(tiny_db1()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let rec = db.query("8.8.8.8", Fields::COUNTRY_SHORT).unwrap();
                        assert_eq!(rec.country_short, "US");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
