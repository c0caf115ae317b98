use thiserror::Error;

use crate::airport::AirportCode;

/// Convenient result alias for the farepath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an airport code is not three ASCII letters.
    #[error("invalid airport code: {input:?}")]
    InvalidAirportCode { input: String },

    /// Raised when a queried airport code is absent from the registry.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when origin and destination name the same airport.
    #[error("origin and destination are the same airport: {code}")]
    SameAirport { code: AirportCode },

    /// Raised when a flight offer fails validation.
    #[error("invalid flight offer: {reason}")]
    InvalidOffer { reason: String },

    /// Raised when no itinerary exists between two airports. An expected
    /// outcome for sparse graphs; callers match on it rather than treating
    /// it as fatal.
    #[error("no route found between {origin} and {destination}")]
    NoRouteFound {
        origin: AirportCode,
        destination: AirportCode,
    },

    /// Raised when the airports dataset is malformed.
    #[error("invalid airport data: {message}")]
    AirportDataInvalid { message: String },

    /// Raised when building a summary from an itinerary with no legs.
    #[error("itinerary has no legs")]
    EmptyItinerary,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
