//! Builders for constructing a [`Network`].

use crate::domain::{LineId, StationName};

use super::{Line, Network, NetworkError};

/// Builder for creating a network line by line.
///
/// Provides a fluent API; validation happens in [`NetworkBuilder::build`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    lines: Vec<(LineId, String, Vec<String>)>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line with its stations in travel order.
    ///
    /// Interchange stations are simply listed again on every line that
    /// serves them.
    pub fn line(mut self, id: LineId, name: &str, stations: &[&str]) -> Self {
        self.lines.push((
            id,
            name.to_string(),
            stations.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Validate the lines and build the network.
    pub fn build(self) -> Result<Network, NetworkError> {
        let lines = self
            .lines
            .into_iter()
            .map(|(id, name, stations)| {
                let stations = stations
                    .iter()
                    .map(|s| StationName::parse(s))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Line::new(id, name, stations))
            })
            .collect::<Result<Vec<_>, NetworkError>>()?;
        Network::build(lines)
    }
}

/// Build a network from sequences of `(station name, line id)` pairs.
///
/// Each sequence is one line in travel order; every pair in it must carry
/// the same line id. Lines are named after their id.
///
/// # Examples
///
/// ```
/// use metro_server::domain::LineId;
/// use metro_server::network::build_network;
///
/// let red = LineId::new(1);
/// let blue = LineId::new(2);
/// let network = build_network(&[
///     vec![("Miyapur", red), ("Ameerpet", red), ("LB Nagar", red)],
///     vec![("Nagole", blue), ("Ameerpet", blue), ("Raidurg", blue)],
/// ])
/// .unwrap();
///
/// assert_eq!(network.station_count(), 5);
/// assert!(network.station("Ameerpet").unwrap().is_interchange());
/// ```
pub fn build_network<S: AsRef<str>>(sequences: &[Vec<(S, LineId)>]) -> Result<Network, NetworkError> {
    let mut lines = Vec::with_capacity(sequences.len());

    for sequence in sequences {
        let Some((_, id)) = sequence.first() else {
            return Err(NetworkError::LineTooShort {
                line: LineId::new(0),
                len: 0,
            });
        };

        let mut stations = Vec::with_capacity(sequence.len());
        for (name, line) in sequence {
            if line != id {
                return Err(NetworkError::MixedLineIds {
                    expected: *id,
                    found: *line,
                    station: name.as_ref().to_string(),
                });
            }
            stations.push(StationName::parse(name.as_ref())?);
        }

        lines.push(Line::new(*id, id.to_string(), stations));
    }

    Network::build(lines)
}
