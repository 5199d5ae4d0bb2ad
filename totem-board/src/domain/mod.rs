//! Domain types for the departure board.
//!
//! Lines, stops and departures as the rest of the crate sees them, after
//! conversion from the catalog's wire format.

mod departure;
mod direction;
mod line;
mod network;

pub use departure::{Departure, DepartureBatch, DepartureHeading, DepartureState};
pub use direction::{Direction, InvalidDirection};
pub use line::{Line, Stop};
pub use network::Network;
