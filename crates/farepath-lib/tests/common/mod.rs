//! Shared fixtures for farepath-lib integration tests.

use chrono::{NaiveDate, NaiveTime};
use farepath_lib::{Airport, AirportCode, AirportRegistry, FlightOffer};

#[allow(dead_code)]
pub fn code(input: &str) -> AirportCode {
    AirportCode::parse(input).expect("valid test code")
}

/// Offer with fixed schedule fields; most tests only vary the pair and
/// price.
#[allow(dead_code)]
pub fn offer(origin: &str, destination: &str, price: f64) -> FlightOffer {
    offer_with(origin, destination, price, "Test Air", "08:00")
}

#[allow(dead_code)]
pub fn offer_with(
    origin: &str,
    destination: &str,
    price: f64,
    airline: &str,
    departure: &str,
) -> FlightOffer {
    let departure = NaiveTime::parse_from_str(departure, "%H:%M").expect("valid time");
    FlightOffer::new(
        code(origin),
        code(destination),
        price,
        airline,
        NaiveDate::from_ymd_opt(2025, 11, 4).expect("valid date"),
        departure,
        departure + chrono::Duration::hours(7),
        420,
    )
    .expect("valid offer")
}

#[allow(dead_code)]
pub fn airport(iata: &str) -> Airport {
    Airport {
        code: code(iata),
        name: format!("{iata} International"),
        municipality: None,
        country: "US".to_string(),
        coordinates: None,
    }
}

#[allow(dead_code)]
pub fn registry(codes: &[&str]) -> AirportRegistry {
    AirportRegistry::from_airports(codes.iter().map(|iata| airport(iata)))
}
