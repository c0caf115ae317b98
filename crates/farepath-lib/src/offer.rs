use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::airport::AirportCode;
use crate::error::{Error, Result};

/// A purchasable flight between two airports, used as a graph edge.
///
/// Offers are validated at construction: every value held by a
/// [`crate::graph::FlightGraph`] satisfies the no-self-loop and
/// non-negative-price invariants the search relies on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOffer {
    pub origin: AirportCode,
    pub destination: AirportCode,
    /// Ticket price in USD.
    pub price: f64,
    pub airline: String,
    pub date: NaiveDate,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    pub duration_minutes: u32,
}

impl FlightOffer {
    /// Validate and construct an offer. Self-loops and negative or
    /// non-finite prices are rejected with [`Error::InvalidOffer`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: AirportCode,
        destination: AirportCode,
        price: f64,
        airline: impl Into<String>,
        date: NaiveDate,
        departure: NaiveTime,
        arrival: NaiveTime,
        duration_minutes: u32,
    ) -> Result<Self> {
        if origin == destination {
            return Err(Error::InvalidOffer {
                reason: format!("self-loop {origin} -> {destination}"),
            });
        }
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidOffer {
                reason: format!("price {price} for {origin} -> {destination} is not a non-negative amount"),
            });
        }

        Ok(Self {
            origin,
            destination,
            price,
            airline: airline.into(),
            date,
            departure,
            arrival,
            duration_minutes,
        })
    }
}
