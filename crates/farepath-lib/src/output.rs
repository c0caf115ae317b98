use std::fmt::Write;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::airport::{AirportCode, AirportRegistry};
use crate::error::{Error, Result};
use crate::routing::Itinerary;

/// Presentation style for turning an [`ItinerarySummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    RichText,
}

/// Endpoint of an itinerary with its resolved airport name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EndpointSummary {
    pub code: AirportCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EndpointSummary {
    fn resolve(registry: &AirportRegistry, code: AirportCode) -> Self {
        Self {
            code,
            name: registry.lookup(code).map(|airport| airport.name.clone()),
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// One leg of the rendered itinerary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegSummary {
    pub index: usize,
    pub origin: EndpointSummary,
    pub destination: EndpointSummary,
    pub airline: String,
    pub date: NaiveDate,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    pub duration_minutes: u32,
    pub price: f64,
}

/// Structured representation of a chosen itinerary that higher-level
/// consumers can serialise or render as text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItinerarySummary {
    pub origin: EndpointSummary,
    pub destination: EndpointSummary,
    pub legs: Vec<LegSummary>,
    pub total_price: f64,
    pub stops: usize,
    pub is_direct: bool,
}

impl ItinerarySummary {
    /// Resolve airport names and build a summary from a planned itinerary.
    pub fn from_itinerary(registry: &AirportRegistry, itinerary: &Itinerary) -> Result<Self> {
        if itinerary.legs.is_empty() {
            return Err(Error::EmptyItinerary);
        }

        let legs = itinerary
            .legs
            .iter()
            .enumerate()
            .map(|(index, leg)| LegSummary {
                index: index + 1,
                origin: EndpointSummary::resolve(registry, leg.origin),
                destination: EndpointSummary::resolve(registry, leg.destination),
                airline: leg.airline.clone(),
                date: leg.date,
                departure: leg.departure,
                arrival: leg.arrival,
                duration_minutes: leg.duration_minutes,
                price: leg.price,
            })
            .collect();

        Ok(Self {
            origin: EndpointSummary::resolve(registry, itinerary.origin),
            destination: EndpointSummary::resolve(registry, itinerary.destination),
            legs,
            total_price: itinerary.total_price,
            stops: itinerary.stops,
            is_direct: itinerary.is_direct,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::RichText => self.render_rich(),
        }
    }

    fn kind_label(&self) -> &'static str {
        if self.is_direct {
            "direct"
        } else {
            "connecting"
        }
    }

    fn path_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.legs.len() + 1);
        parts.push(self.origin.code.to_string());
        for leg in &self.legs {
            parts.push(leg.destination.code.to_string());
        }
        parts.join(" -> ")
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({})",
            self.origin.display_name(),
            self.destination.display_name(),
            self.kind_label()
        );
        let _ = writeln!(buffer, "Path: {}", self.path_line());
        let _ = writeln!(
            buffer,
            "Total: ${:.2} with {} stop(s)",
            self.total_price, self.stops
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "  Leg {}: {} -> {} | {} | {} {} - {} | {} min | ${:.2}",
                leg.index,
                leg.origin.code,
                leg.destination.code,
                leg.airline,
                leg.date,
                leg.departure.format("%H:%M"),
                leg.arrival.format("%H:%M"),
                leg.duration_minutes,
                leg.price
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** — _{} → {}_ (${:.2}, {} stop(s), {})",
            self.origin.display_name(),
            self.destination.display_name(),
            self.total_price,
            self.stops,
            self.kind_label()
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{} → {}** on {} (`{}` {}–{}, {} min, ${:.2})",
                leg.index,
                leg.origin.code,
                leg.destination.code,
                leg.airline,
                leg.date,
                leg.departure.format("%H:%M"),
                leg.arrival.format("%H:%M"),
                leg.duration_minutes,
                leg.price
            );
        }
        buffer
    }
}
