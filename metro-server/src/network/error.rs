//! Network graph error types.

use crate::domain::{DomainError, LineId};

/// Errors raised while building or querying the network graph.
///
/// Construction errors (`EmptyNetwork` through `InvalidStationName`) are
/// fatal at startup. Query errors name the station or edge that was missing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// No lines were supplied
    #[error("network must contain at least one line")]
    EmptyNetwork,

    /// A line needs at least two stations to form an edge
    #[error("{line} has {len} station(s); at least 2 are required")]
    LineTooShort { line: LineId, len: usize },

    /// Two lines were declared with the same id
    #[error("{0} is declared more than once")]
    DuplicateLine(LineId),

    /// A station is listed twice in a row on the same line
    #[error("{station} is repeated consecutively on {line}")]
    RepeatedStation { line: LineId, station: String },

    /// A station sequence mixes line ids
    #[error("{station} is tagged {found} inside a sequence for {expected}")]
    MixedLineIds {
        expected: LineId,
        found: LineId,
        station: String,
    },

    /// A station name failed validation
    #[error("invalid station name: {0}")]
    InvalidStationName(#[from] DomainError),

    /// The station is not part of the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The two stations are not directly connected
    #[error("no edge between {0} and {1}")]
    NoSuchEdge(String, String),
}
