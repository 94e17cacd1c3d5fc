//! Flight search tools backed by the SerpApi Google Flights engine.

mod one_way;
mod round_trip;

pub use one_way::FlightSearchOneWayTool;
pub use round_trip::FlightSearchRoundTripTool;

/// SerpApi engine identifier shared by both flight tools.
pub(crate) const ENGINE: &str = "google_flights";
