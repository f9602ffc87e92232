//! Query field selection and the result record.

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

/// Placeholder stored in string slots when the queried address does not
/// parse as an IPv4 or IPv6 address.
pub const INVALID_ADDRESS: &str = "Invalid IP address.";

/// Placeholder for a database file that could not be read.
///
/// Opening validates the header up front and reports a typed
/// [`DatabaseError`](crate::DatabaseError) instead of handing out a
/// half-initialized reader, so lookups themselves never produce this
/// text. It is kept for callers that surface open failures in-band the
/// way the original implementation did:
///
/// ```
/// use geobin::{Record, MISSING_DATABASE};
///
/// let rec = Record::with_message(MISSING_DATABASE);
/// assert_eq!(rec.country_short, "Invalid database file.");
/// assert_eq!(rec.latitude, 0.0);
/// ```
pub const MISSING_DATABASE: &str = "Invalid database file.";

/// Placeholder stored in a requested string slot the file's product type
/// does not carry.
pub const FIELD_UNSUPPORTED: &str =
    "This parameter is unavailable for selected data file. Please upgrade the data file.";

bitflags! {
    /// Set of record fields to populate in a query.
    ///
    /// Country short and long forms share one database column but are
    /// independently selectable.
    ///
    /// # Example
    ///
    /// ```
    /// use geobin::Fields;
    ///
    /// let mask = Fields::COUNTRY_SHORT | Fields::CITY;
    /// assert!(Fields::ALL.contains(mask));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Fields: u32 {
        /// See [`Record::country_short`].
        const COUNTRY_SHORT        = 1 << 0;
        /// See [`Record::country_long`].
        const COUNTRY_LONG         = 1 << 1;
        /// See [`Record::region`].
        const REGION               = 1 << 2;
        /// See [`Record::city`].
        const CITY                 = 1 << 3;
        /// See [`Record::isp`].
        const ISP                  = 1 << 4;
        /// See [`Record::latitude`].
        const LATITUDE             = 1 << 5;
        /// See [`Record::longitude`].
        const LONGITUDE            = 1 << 6;
        /// See [`Record::domain`].
        const DOMAIN               = 1 << 7;
        /// See [`Record::zip_code`].
        const ZIP_CODE             = 1 << 8;
        /// See [`Record::timezone`].
        const TIMEZONE             = 1 << 9;
        /// See [`Record::net_speed`].
        const NET_SPEED            = 1 << 10;
        /// See [`Record::idd_code`].
        const IDD_CODE             = 1 << 11;
        /// See [`Record::area_code`].
        const AREA_CODE            = 1 << 12;
        /// See [`Record::weather_station_code`].
        const WEATHER_STATION_CODE = 1 << 13;
        /// See [`Record::weather_station_name`].
        const WEATHER_STATION_NAME = 1 << 14;
        /// See [`Record::mcc`].
        const MCC                  = 1 << 15;
        /// See [`Record::mnc`].
        const MNC                  = 1 << 16;
        /// See [`Record::mobile_brand`].
        const MOBILE_BRAND         = 1 << 17;
        /// See [`Record::elevation`].
        const ELEVATION            = 1 << 18;
        /// See [`Record::usage_type`].
        const USAGE_TYPE           = 1 << 19;
    }
}

impl Fields {
    /// Every field.
    pub const ALL: Fields = Fields::all();
}

/// Geolocation data for one IP range.
///
/// Slots not selected by the query mask keep their default value (empty
/// string or 0.0). Selected string slots the file's product type does not
/// carry hold [`FIELD_UNSUPPORTED`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    /// ISO-3166 two-letter country code.
    pub country_short: String,
    /// Full country name.
    pub country_long: String,
    /// Region or state name.
    pub region: String,
    /// City name.
    pub city: String,
    /// Internet service provider name.
    pub isp: String,
    /// Latitude in decimal degrees.
    pub latitude: f32,
    /// Longitude in decimal degrees.
    pub longitude: f32,
    /// Domain name associated with the range.
    pub domain: String,
    /// Postal code.
    pub zip_code: String,
    /// IANA-style UTC offset, e.g. `"-07:00"`.
    pub timezone: String,
    /// Connection speed class.
    pub net_speed: String,
    /// International direct dialing prefix.
    pub idd_code: String,
    /// Telephone area code.
    pub area_code: String,
    /// Nearest weather station code.
    pub weather_station_code: String,
    /// Nearest weather station name.
    pub weather_station_name: String,
    /// Mobile country code.
    pub mcc: String,
    /// Mobile network code.
    pub mnc: String,
    /// Mobile carrier brand.
    pub mobile_brand: String,
    /// Elevation in meters.
    pub elevation: f32,
    /// Usage type classification, e.g. `"DCH"`.
    pub usage_type: String,
}

impl Record {
    /// A record with every string slot set to `message` and float slots
    /// zeroed.
    ///
    /// This is the in-band form invalid input is reported in (see
    /// [`INVALID_ADDRESS`] and [`MISSING_DATABASE`]).
    pub fn with_message(message: &str) -> Record {
        Record {
            country_short: message.to_string(),
            country_long: message.to_string(),
            region: message.to_string(),
            city: message.to_string(),
            isp: message.to_string(),
            domain: message.to_string(),
            zip_code: message.to_string(),
            timezone: message.to_string(),
            net_speed: message.to_string(),
            idd_code: message.to_string(),
            area_code: message.to_string(),
            weather_station_code: message.to_string(),
            weather_station_name: message.to_string(),
            mcc: message.to_string(),
            mnc: message.to_string(),
            mobile_brand: message.to_string(),
            usage_type: message.to_string(),
            ..Record::default()
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "country_short: {}", self.country_short)?;
        writeln!(f, "country_long: {}", self.country_long)?;
        writeln!(f, "region: {}", self.region)?;
        writeln!(f, "city: {}", self.city)?;
        writeln!(f, "isp: {}", self.isp)?;
        writeln!(f, "latitude: {}", self.latitude)?;
        writeln!(f, "longitude: {}", self.longitude)?;
        writeln!(f, "domain: {}", self.domain)?;
        writeln!(f, "zip_code: {}", self.zip_code)?;
        writeln!(f, "timezone: {}", self.timezone)?;
        writeln!(f, "net_speed: {}", self.net_speed)?;
        writeln!(f, "idd_code: {}", self.idd_code)?;
        writeln!(f, "area_code: {}", self.area_code)?;
        writeln!(f, "weather_station_code: {}", self.weather_station_code)?;
        writeln!(f, "weather_station_name: {}", self.weather_station_name)?;
        writeln!(f, "mcc: {}", self.mcc)?;
        writeln!(f, "mnc: {}", self.mnc)?;
        writeln!(f, "mobile_brand: {}", self.mobile_brand)?;
        writeln!(f, "elevation: {}", self.elevation)?;
        write!(f, "usage_type: {}", self.usage_type)
    }
}
