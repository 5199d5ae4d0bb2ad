//! Web layer for the departure board.
//!
//! A server-rendered page plus a JSON view of the same board. Every
//! action is a form post that redirects back to the page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
