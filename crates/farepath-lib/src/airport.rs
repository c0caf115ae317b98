use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, Trim};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a code to count as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Three-letter IATA airport identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse a code from user input. Surrounding whitespace is trimmed and
    /// lowercase letters are upcased; anything that is not exactly three
    /// ASCII letters is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.trim().as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(Error::InvalidAirportCode {
                input: input.to_string(),
            });
        }
        let mut code = [0u8; 3];
        for (slot, byte) in code.iter_mut().zip(bytes) {
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self(code))
    }

    /// The code as an uppercase string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).expect("validated ASCII on construction")
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl FromStr for AirportCode {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}

impl Serialize for AirportCode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Geographic position of an airport in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reference record for a single airport with scheduled service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    pub municipality: Option<String>,
    pub country: String,
    pub coordinates: Option<Coordinates>,
}

/// Immutable lookup of airport metadata by IATA code.
///
/// Built once per session and never mutated afterwards, so shared
/// references can serve concurrent route queries.
#[derive(Debug, Clone, Default)]
pub struct AirportRegistry {
    airports: HashMap<AirportCode, Airport>,
}

impl AirportRegistry {
    /// Build a registry from already-validated airport records. Duplicate
    /// codes keep the first record seen.
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Self {
        let mut map = HashMap::new();
        for airport in airports {
            match map.entry(airport.code) {
                Entry::Occupied(_) => {
                    warn!("duplicate airport code {}, keeping the first record", airport.code);
                }
                Entry::Vacant(slot) => {
                    slot.insert(airport);
                }
            }
        }
        Self { airports: map }
    }

    /// Load a registry from an OurAirports-format CSV file, keeping only
    /// rows with a valid IATA code and scheduled commercial service.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a registry from any CSV reader (file or in-memory buffer).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|header| header == name);
        let required = |name: &str| {
            column(name).ok_or_else(|| Error::AirportDataInvalid {
                message: format!("missing required column {name:?}"),
            })
        };

        let iata_idx = required("iata_code")?;
        let name_idx = required("name")?;
        let country_idx = required("iso_country")?;
        let scheduled_idx = required("scheduled_service")?;
        let municipality_idx = column("municipality");
        let latitude_idx = column("latitude_deg");
        let longitude_idx = column("longitude_deg");

        let mut airports = Vec::new();
        for record in csv_reader.records() {
            let record = record?;

            if record.get(scheduled_idx).unwrap_or("") != "yes" {
                continue;
            }
            let raw_code = record.get(iata_idx).unwrap_or("");
            if raw_code.is_empty() {
                continue;
            }
            let Ok(code) = AirportCode::parse(raw_code) else {
                warn!("skipping airport row with malformed IATA code {raw_code:?}");
                continue;
            };

            let parse_degrees = |idx: Option<usize>| {
                idx.and_then(|idx| record.get(idx))
                    .and_then(|value| value.parse::<f64>().ok())
            };
            let coordinates = match (parse_degrees(latitude_idx), parse_degrees(longitude_idx)) {
                (Some(latitude), Some(longitude)) => Some(Coordinates {
                    latitude,
                    longitude,
                }),
                _ => None,
            };

            let municipality = municipality_idx
                .and_then(|idx| record.get(idx))
                .filter(|value| !value.is_empty())
                .map(str::to_string);

            airports.push(Airport {
                code,
                name: record.get(name_idx).unwrap_or("").to_string(),
                municipality,
                country: record.get(country_idx).unwrap_or("").to_string(),
                coordinates,
            });
        }

        Ok(Self::from_airports(airports))
    }

    /// Lookup an airport record by code.
    pub fn lookup(&self, code: AirportCode) -> Option<&Airport> {
        self.airports.get(&code)
    }

    /// Whether a code is present in the registry.
    pub fn contains(&self, code: AirportCode) -> bool {
        self.airports.contains_key(&code)
    }

    /// Parse `input` and require it to name a known airport. Unknown codes
    /// fail with fuzzy suggestions before any graph work happens.
    pub fn resolve(&self, input: &str) -> Result<AirportCode> {
        let code = AirportCode::parse(input)?;
        if !self.contains(code) {
            return Err(Error::UnknownAirport {
                code: code.to_string(),
                suggestions: self.fuzzy_matches(code.as_str(), 3),
            });
        }
        Ok(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Iterate over all known codes, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = AirportCode> + '_ {
        self.airports.keys().copied()
    }

    /// Codes similar to `query`, best match first, for "did you mean"
    /// suggestions on unknown-airport errors.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.trim().to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .keys()
            .map(|code| (strsim::jaro_winkler(&query, code.as_str()), code.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.truncate(limit);
        scored
            .into_iter()
            .map(|(_, code)| code.to_string())
            .collect()
    }
}
