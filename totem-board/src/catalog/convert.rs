//! Conversion from wire types to domain types.

use tracing::warn;

use crate::domain::{Departure, Direction, Line, Network, Stop};

use super::types::{DepartureDto, LineDto, NetworkDto};

/// Convert a network response, skipping lines with an unknown direction.
pub fn convert_network(dto: NetworkDto) -> Network {
    let lines = dto
        .lignes
        .into_iter()
        .filter_map(|line| {
            let id = line.id.clone();
            match convert_line(line) {
                Some(line) => Some(line),
                None => {
                    warn!(line_id = %id, "skipping line with invalid direction");
                    None
                }
            }
        })
        .collect();
    Network::new(lines)
}

fn convert_line(dto: LineDto) -> Option<Line> {
    let direction = Direction::parse(&dto.senstotem).ok()?;
    Some(Line {
        id: dto.id,
        code: dto.codetotem,
        direction,
        name: dto.nom_commercial,
        direction_label: dto.direction,
        picto: dto.picto.filter(|p| !p.is_empty()),
        stops: dto
            .arrets
            .into_iter()
            .map(|s| Stop::new(s.id, s.nom))
            .collect(),
    })
}

/// Convert a departure list, keeping the catalog's order.
pub fn convert_departures(dtos: Vec<DepartureDto>) -> Vec<Departure> {
    dtos.into_iter()
        .map(|d| Departure {
            text: d.text,
            at: d.date,
        })
        .collect()
}
