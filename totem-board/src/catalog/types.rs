//! Wire types for the catalog API.
//!
//! Field names follow the network's JSON (French, snake_case). Only the
//! fields the board uses are declared; everything else is ignored.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Response of `GET /reseau`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkDto {
    pub lignes: Vec<LineDto>,
}

/// One direction of a line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineDto {
    pub id: String,

    /// Totem code shared by both directions
    pub codetotem: String,

    /// "A" or "R"
    pub senstotem: String,

    pub nom_commercial: String,

    /// Destination label for this direction
    #[serde(default)]
    pub direction: String,

    #[serde(default)]
    pub picto: Option<String>,

    #[serde(default)]
    pub arrets: Vec<StopDto>,
}

/// A stop on a line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopDto {
    pub id: String,
    pub nom: String,
}

/// One entry of `GET /totem`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DepartureDto {
    pub text: String,
    pub date: DateTime<FixedOffset>,
}
