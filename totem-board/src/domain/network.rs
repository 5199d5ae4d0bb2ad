//! The loaded transit network.

use super::{Direction, Line, Stop};

/// Snapshot of every line the catalog publishes, in catalog order.
///
/// Lookups are linear: a network has a few dozen lines at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    lines: Vec<Line>,
}

impl Network {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by catalog id.
    pub fn get_line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Look up a stop of a line by id.
    pub fn get_stop(&self, line_id: &str, stop_id: &str) -> Option<&Stop> {
        self.get_line(line_id)?.get_stop(stop_id)
    }

    /// Resolve a totem code and direction to the line record serving it.
    pub fn resolve(&self, code: &str, direction: Direction) -> Option<&Line> {
        self.lines
            .iter()
            .find(|l| l.code == code && l.direction == direction)
    }

    /// Resolve a full (code, direction, stop) triple.
    pub fn resolve_stop(
        &self,
        code: &str,
        direction: Direction,
        stop_id: &str,
    ) -> Option<(&Line, &Stop)> {
        let line = self.resolve(code, direction)?;
        let stop = line.get_stop(stop_id)?;
        Some((line, stop))
    }

    /// Totem code of the first line, if any.
    pub fn first_code(&self) -> Option<&str> {
        self.lines.first().map(|l| l.code.as_str())
    }

    /// One line per distinct totem code, keeping the first record seen.
    pub fn distinct_lines(&self) -> Vec<&Line> {
        let mut seen: Vec<&str> = Vec::new();
        let mut out = Vec::new();
        for line in &self.lines {
            if !seen.contains(&line.code.as_str()) {
                seen.push(&line.code);
                out.push(line);
            }
        }
        out
    }
}
