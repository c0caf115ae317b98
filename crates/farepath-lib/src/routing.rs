use serde::Serialize;
use tracing::debug;

use crate::airport::{AirportCode, AirportRegistry};
use crate::error::{Error, Result};
use crate::graph::FlightGraph;
use crate::offer::FlightOffer;
use crate::search::{cheapest_path, PathResult};

/// Price tolerance for preferring a nonstop itinerary: a direct offer wins
/// whenever its price is at most this factor of the cheapest connecting
/// total (inclusive). Comparison is exact, with no currency rounding.
pub const DIRECT_PRICE_TOLERANCE: f64 = 1.30;

/// Chosen itinerary between two airports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub origin: AirportCode,
    pub destination: AirportCode,
    /// Legs in travel order.
    pub legs: Vec<FlightOffer>,
    /// Sum of leg prices.
    pub total_price: f64,
    /// Number of intermediate stops (legs minus one).
    pub stops: usize,
    /// Whether the direct branch of the selector was chosen.
    pub is_direct: bool,
}

impl Itinerary {
    fn from_legs(
        origin: AirportCode,
        destination: AirportCode,
        legs: Vec<FlightOffer>,
        total_price: f64,
        is_direct: bool,
    ) -> Self {
        let stops = legs.len().saturating_sub(1);
        Self {
            origin,
            destination,
            legs,
            total_price,
            stops,
            is_direct,
        }
    }
}

/// Plan the itinerary to present between two airports.
///
/// Endpoints are validated against the registry before any graph work. The
/// cheapest connecting path then competes with the cheapest direct offer:
/// the direct offer wins when its price is within
/// [`DIRECT_PRICE_TOLERANCE`] of the connecting total.
pub fn plan_itinerary(
    registry: &AirportRegistry,
    graph: &FlightGraph,
    origin: &str,
    destination: &str,
) -> Result<Itinerary> {
    let origin = registry.resolve(origin)?;
    let destination = registry.resolve(destination)?;
    if origin == destination {
        return Err(Error::SameAirport { code: origin });
    }

    let connecting = cheapest_path(graph, origin, destination);
    let direct = graph.direct_offer(origin, destination).cloned();

    select_itinerary(origin, destination, direct, connecting)
}

/// Pure decision between the direct and connecting candidates.
fn select_itinerary(
    origin: AirportCode,
    destination: AirportCode,
    direct: Option<FlightOffer>,
    connecting: Option<PathResult>,
) -> Result<Itinerary> {
    match (direct, connecting) {
        (None, None) => Err(Error::NoRouteFound {
            origin,
            destination,
        }),
        (Some(offer), None) => Ok(direct_itinerary(origin, destination, offer)),
        (None, Some(path)) => Ok(connecting_itinerary(origin, destination, path)),
        (Some(offer), Some(path)) => {
            if offer.price <= path.total_price * DIRECT_PRICE_TOLERANCE {
                debug!(
                    direct = offer.price,
                    connecting = path.total_price,
                    "direct offer within tolerance"
                );
                Ok(direct_itinerary(origin, destination, offer))
            } else {
                debug!(
                    direct = offer.price,
                    connecting = path.total_price,
                    "connecting path beats the direct premium"
                );
                Ok(connecting_itinerary(origin, destination, path))
            }
        }
    }
}

fn direct_itinerary(
    origin: AirportCode,
    destination: AirportCode,
    offer: FlightOffer,
) -> Itinerary {
    let total_price = offer.price;
    Itinerary::from_legs(origin, destination, vec![offer], total_price, true)
}

fn connecting_itinerary(
    origin: AirportCode,
    destination: AirportCode,
    path: PathResult,
) -> Itinerary {
    Itinerary::from_legs(origin, destination, path.legs, path.total_price, false)
}
