use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::airport::AirportCode;
use crate::error::Result;
use crate::graph::FlightGraph;
use crate::offer::FlightOffer;

/// Source of flight offers for a directed airport pair.
///
/// The route engine is indifferent to whether offers are real or synthetic
/// as long as the record schema holds.
pub trait FlightProvider {
    /// All known offers from `origin` to `destination`. An empty vector
    /// means the pair has no service; an error means the provider itself
    /// failed.
    fn offers_between(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<FlightOffer>>;
}

/// Airlines used by the synthetic generator.
const AIRLINES: &[&str] = &[
    "American Airlines",
    "Delta Air Lines",
    "United Airlines",
    "Southwest Airlines",
    "British Airways",
    "Lufthansa",
    "Air France",
    "KLM",
    "Emirates",
    "Qatar Airways",
    "Singapore Airlines",
    "Cathay Pacific",
    "Japan Airlines",
    "ANA",
    "Turkish Airlines",
];

/// Fraction of directed pairs with any service at all.
const SERVICE_PROBABILITY: f64 = 0.45;

/// How far ahead of today the generated and fetched fares depart.
const BOOKING_HORIZON_DAYS: u64 = 7;

/// Deterministic offer generator for sessions without live fare data.
///
/// Offers for a pair are derived from the base seed and the pair itself,
/// so repeated queries (and concurrent callers) see identical data.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    seed: u64,
    travel_date: NaiveDate,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        let travel_date = Utc::now().date_naive() + Days::new(BOOKING_HORIZON_DAYS);
        Self { seed, travel_date }
    }

    /// Pin the travel date instead of booking a week out.
    pub fn with_travel_date(mut self, travel_date: NaiveDate) -> Self {
        self.travel_date = travel_date;
        self
    }

    fn pair_rng(&self, origin: AirportCode, destination: AirportCode) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        origin.as_str().hash(&mut hasher);
        destination.as_str().hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }
}

impl FlightProvider for SyntheticProvider {
    fn offers_between(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<FlightOffer>> {
        if origin == destination {
            return Ok(Vec::new());
        }

        let mut rng = self.pair_rng(origin, destination);
        if !rng.random_bool(SERVICE_PROBABILITY) {
            return Ok(Vec::new());
        }

        let count = rng.random_range(1..=3);
        let mut offers = Vec::with_capacity(count);
        for _ in 0..count {
            let price = rng.random_range(100..=1500) as f64;
            let airline = AIRLINES[rng.random_range(0..AIRLINES.len())];
            let departure = NaiveTime::from_hms_opt(
                rng.random_range(6..=23),
                15 * rng.random_range(0..4),
                0,
            )
            .expect("generated time in range");
            let duration_minutes = 60 * rng.random_range(1..=15u32) + 15 * rng.random_range(0..4);
            // NaiveTime addition wraps past midnight for overnight arrivals.
            let arrival = departure + chrono::Duration::minutes(i64::from(duration_minutes));

            offers.push(FlightOffer::new(
                origin,
                destination,
                price,
                airline,
                self.travel_date,
                departure,
                arrival,
                duration_minutes,
            )?);
        }

        Ok(offers)
    }
}

const LIVE_API_BASE: &str = "https://fly-scraper.p.rapidapi.com";
const LIVE_API_HOST: &str = "fly-scraper.p.rapidapi.com";
const LIVE_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the fare-search HTTP API.
///
/// One economy single-adult USD search per directed pair, departing a week
/// out. The response schema varies between deployments; extraction
/// tolerates the known variants and skips flights it cannot parse.
#[derive(Debug, Clone)]
pub struct LiveProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LiveProvider {
    /// Build a provider with the given RapidAPI key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(LIVE_API_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: LIVE_API_BASE.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Override the API base URL (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Cheap connectivity check against a well-known route.
    pub fn probe(&self) -> bool {
        let Ok(origin) = AirportCode::parse("JFK") else {
            return false;
        };
        let Ok(destination) = AirportCode::parse("LAX") else {
            return false;
        };
        match self.offers_between(origin, destination) {
            Ok(offers) => !offers.is_empty(),
            Err(error) => {
                warn!(%error, "fare API probe failed");
                false
            }
        }
    }
}

impl FlightProvider for LiveProvider {
    fn offers_between(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<FlightOffer>> {
        let date = Utc::now().date_naive() + Days::new(BOOKING_HORIZON_DAYS);
        let query = [
            ("origin", origin.as_str().to_ascii_lowercase()),
            ("destination", destination.as_str().to_ascii_lowercase()),
            ("date", date.format("%Y-%m-%d").to_string()),
            ("adults", "1".to_string()),
            ("children", "0".to_string()),
            ("infants", "0".to_string()),
            ("cabinClass", "economy".to_string()),
            ("currency", "USD".to_string()),
        ];

        let payload: Value = self
            .client
            .get(format!("{}/flights/search", self.base_url))
            .query(&query)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", LIVE_API_HOST)
            .send()?
            .error_for_status()?
            .json()?;

        let Some(flights) = payload.pointer("/data/flights").and_then(Value::as_array) else {
            debug!(%origin, %destination, "fare API response had no flight list");
            return Ok(Vec::new());
        };

        Ok(flights
            .iter()
            .filter_map(|flight| extract_offer(flight, origin, destination, date))
            .collect())
    }
}

/// Pull one offer out of a flight payload, tolerating the schema variants
/// the API serves. Unparsable flights are logged and skipped so they never
/// reach the graph.
fn extract_offer(
    flight: &Value,
    origin: AirportCode,
    destination: AirportCode,
    default_date: NaiveDate,
) -> Option<FlightOffer> {
    let price = extract_price(flight)?;

    let airline = flight
        .get("airline")
        .and_then(Value::as_str)
        .or_else(|| flight.get("carrier").and_then(Value::as_str))
        .or_else(|| flight.pointer("/airlines/0").and_then(Value::as_str))
        .unwrap_or("Unknown");

    let date = flight
        .pointer("/departure/date")
        .and_then(Value::as_str)
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .unwrap_or(default_date);
    let departure = parse_time(flight.pointer("/departure/time"))?;
    let arrival = parse_time(flight.pointer("/arrival/time"))?;

    let duration_minutes = flight
        .get("duration")
        .and_then(Value::as_u64)
        .or_else(|| flight.get("travelTime").and_then(Value::as_u64))
        .map(|minutes| minutes as u32)
        .unwrap_or_else(|| elapsed_minutes(departure, arrival));

    match FlightOffer::new(
        origin,
        destination,
        price,
        airline,
        date,
        departure,
        arrival,
        duration_minutes,
    ) {
        Ok(offer) => Some(offer),
        Err(error) => {
            warn!(%error, "skipping malformed flight payload");
            None
        }
    }
}

fn extract_price(flight: &Value) -> Option<f64> {
    flight
        .pointer("/price/amount")
        .and_then(Value::as_f64)
        .or_else(|| flight.get("price").and_then(Value::as_f64))
        .or_else(|| flight.get("totalPrice").and_then(Value::as_f64))
        .or_else(|| flight.get("cost").and_then(Value::as_f64))
}

fn parse_time(value: Option<&Value>) -> Option<NaiveTime> {
    value
        .and_then(Value::as_str)
        .and_then(|raw| NaiveTime::parse_from_str(raw, "%H:%M").ok())
}

fn elapsed_minutes(departure: NaiveTime, arrival: NaiveTime) -> u32 {
    let delta = arrival.signed_duration_since(departure).num_minutes();
    // Arrivals past midnight wrap around the day boundary.
    if delta >= 0 {
        delta as u32
    } else {
        (delta + 24 * 60) as u32
    }
}

/// Provider that substitutes schema-identical fallback offers when the
/// primary fails, so a degraded fare API degrades the data rather than the
/// query.
#[derive(Debug, Clone)]
pub struct FallbackProvider<P, F> {
    primary: P,
    fallback: F,
}

impl<P: FlightProvider, F: FlightProvider> FallbackProvider<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: FlightProvider, F: FlightProvider> FlightProvider for FallbackProvider<P, F> {
    fn offers_between(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<FlightOffer>> {
        match self.primary.offers_between(origin, destination) {
            Ok(offers) => Ok(offers),
            Err(error) => {
                warn!(
                    %origin,
                    %destination,
                    %error,
                    "primary fare provider failed, using fallback offers"
                );
                self.fallback.offers_between(origin, destination)
            }
        }
    }
}

/// Fetch offers for every ordered pair of `airports` and insert them into
/// the graph. Offer validation happens at construction inside the
/// providers, so everything inserted here already satisfies the graph
/// invariants. Returns the number of offers inserted.
pub fn populate_graph(
    graph: &mut FlightGraph,
    provider: &dyn FlightProvider,
    airports: &[AirportCode],
) -> Result<usize> {
    let mut inserted = 0;
    for &origin in airports {
        for &destination in airports {
            if origin == destination {
                continue;
            }
            let offers = provider.offers_between(origin, destination)?;
            if !offers.is_empty() {
                debug!(%origin, %destination, count = offers.len(), "fetched offers");
            }
            for offer in offers {
                graph.add_offer(offer);
                inserted += 1;
            }
        }
    }
    Ok(inserted)
}
