//! Farepath library entry points.
//!
//! This crate models airports, flight offers, and the route optimization
//! engine that picks the lowest-friction itinerary between two airports:
//! load an [`AirportRegistry`], populate a [`FlightGraph`] through a
//! [`FlightProvider`], then call [`plan_itinerary`]. Higher-level consumers
//! (the CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod airport;
pub mod error;
pub mod graph;
pub mod offer;
pub mod output;
pub mod provider;
pub mod routing;
pub mod search;

pub use airport::{Airport, AirportCode, AirportRegistry, Coordinates};
pub use error::{Error, Result};
pub use graph::FlightGraph;
pub use offer::FlightOffer;
pub use output::{ItinerarySummary, RenderMode};
pub use provider::{
    populate_graph, FallbackProvider, FlightProvider, LiveProvider, SyntheticProvider,
};
pub use routing::{plan_itinerary, Itinerary, DIRECT_PRICE_TOLERANCE};
pub use search::{cheapest_path, PathResult};
