//! The departure board session.
//!
//! Ties the selection engine, the favorites store and the pollers
//! together behind the actions the page exposes.

mod error;
mod session;
mod view;

pub use error::BoardError;
pub use session::{Board, CatalogState};
pub use view::{BoardView, CatalogStatus, DepartureItem, DeparturesView, FavoriteView};
