//! # Airport Entity
//!
//! `Airport` is the materialized form of a directory record. Location strings
//! (continent, country, region, municipality) are kept denormalized: the
//! dataset is immutable and small enough that foreign-key tables would only
//! add indirection.
//!
//! The IANA zone named by `time_zone` is resolved once, when the record is
//! decoded, and carried in `location`. Callers that need it for date
//! arithmetic use [`Airport::parse_local_time`], which fails locally when the
//! zone could not be resolved.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};

/// Airport category as published in the OurAirports `type` column.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AirportKind {
    #[default]
    Unknown = 0,
    LargeAirport = 1,
    MediumAirport = 2,
    SmallAirport = 3,
    Heliport = 4,
    SeaplaneBase = 5,
    BalloonPort = 6,
    Closed = 7,
}

impl AirportKind {
    pub const ALL: [AirportKind; 8] = [
        AirportKind::Unknown,
        AirportKind::LargeAirport,
        AirportKind::MediumAirport,
        AirportKind::SmallAirport,
        AirportKind::Heliport,
        AirportKind::SeaplaneBase,
        AirportKind::BalloonPort,
        AirportKind::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AirportKind::Unknown => "",
            AirportKind::LargeAirport => "large_airport",
            AirportKind::MediumAirport => "medium_airport",
            AirportKind::SmallAirport => "small_airport",
            AirportKind::Heliport => "heliport",
            AirportKind::SeaplaneBase => "seaplane_base",
            AirportKind::BalloonPort => "balloonport",
            AirportKind::Closed => "closed",
        }
    }

    /// Maps a dataset spelling to a kind. Unrecognized spellings become `Unknown`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| *kind != AirportKind::Unknown && kind.as_str() == name)
            .unwrap_or_default()
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AirportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Airport {
    /// IATA code, the directory's primary key.
    pub code: String,
    pub ident: String,
    pub name: String,
    pub kind: AirportKind,
    pub continent: String,
    pub country: String,
    pub region: String,
    pub municipality: String,
    pub gps_code: String,
    pub local_code: String,
    pub home: String,
    pub wikipedia: String,
    /// IANA zone name, e.g. `Europe/Budapest`.
    pub time_zone: String,
    pub lat: f64,
    pub lon: f64,
    /// Zone resolved from `time_zone` at decode time. Not serialized.
    pub location: Option<Tz>,
}

impl Airport {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Fills `location` from `time_zone`, the same way decoding does.
    pub fn resolved(mut self) -> Self {
        self.location = resolve_zone(&self.time_zone);
        self
    }

    pub fn location(&self) -> Option<Tz> {
        self.location
    }

    pub fn is_large(&self) -> bool {
        self.kind == AirportKind::LargeAirport
    }

    /// Parses a wall-clock timestamp as local time at this airport.
    ///
    /// Fare APIs report departure and arrival in the airport's local time;
    /// this attaches the airport's zone. Fails if the zone is unresolved, the
    /// text does not match `format`, or the local time falls in a DST gap.
    pub fn parse_local_time(&self, text: &str, format: &str) -> Result<DateTime<Tz>> {
        let tz = self.location.ok_or_else(|| {
            eyre!(
                "airport {:?} has no resolved time zone (zone name {:?})",
                self.code,
                self.time_zone
            )
        })?;

        let naive = NaiveDateTime::parse_from_str(text, format)
            .wrap_err_with(|| format!("failed to parse local time {:?} at {}", text, self.code))?;

        tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
            eyre!(
                "local time {} does not exist in {} ({})",
                naive,
                self.time_zone,
                self.code
            )
        })
    }

    pub(crate) fn fields(&self) -> [&str; crate::config::RECORD_STRING_COUNT] {
        [
            &self.code,
            &self.ident,
            &self.name,
            &self.continent,
            &self.country,
            &self.region,
            &self.municipality,
            &self.gps_code,
            &self.local_code,
            &self.home,
            &self.wikipedia,
            &self.time_zone,
        ]
    }
}

/// Resolves an IANA zone name. Unknown or empty names yield `None`.
pub fn resolve_zone(name: &str) -> Option<Tz> {
    if name.is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::debug!(zone = name, "unknown time zone name");
            None
        }
    }
}
