//! Station and line identity types.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::DomainError;

/// A station's display name, which is also its identity.
///
/// Names compare case-sensitively: two stations with the same name are the
/// same station. Blank names are rejected.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationName;
///
/// let ameerpet = StationName::parse("Ameerpet").unwrap();
/// assert_eq!(ameerpet.as_str(), "Ameerpet");
///
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationName(String);

impl StationName {
    /// Parse a station name, rejecting empty or whitespace-only input.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::BlankStationName);
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare two names ignoring ASCII and Unicode case.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a metro line (corridor).
///
/// Ordering is numeric; when an edge lies on several lines the lowest id
/// is the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineId(u16);

impl LineId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.0)
    }
}

/// Classification of a station, derived from its line memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    /// End of a line, served by that line only
    Terminal,
    /// Interchange between two or more lines
    Junction,
    /// Any other stop
    Ordinary,
}

/// A station in the network.
///
/// The kind is never stored: it follows from the set of lines serving the
/// station and whether the station ends one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    name: StationName,
    lines: BTreeSet<LineId>,
    terminus: bool,
}

impl Station {
    /// Create a station served by a single line.
    pub fn new(name: StationName, line: LineId) -> Self {
        Self {
            name,
            lines: BTreeSet::from([line]),
            terminus: false,
        }
    }

    /// Record that another line serves this station.
    ///
    /// Returns `true` if the line was not already known.
    pub(crate) fn add_line(&mut self, line: LineId) -> bool {
        self.lines.insert(line)
    }

    /// Record that this station is the first or last stop of a line.
    pub(crate) fn mark_terminus(&mut self) {
        self.terminus = true;
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    /// Lines serving this station, lowest id first.
    pub fn lines(&self) -> impl Iterator<Item = LineId> + '_ {
        self.lines.iter().copied()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_served_by(&self, line: LineId) -> bool {
        self.lines.contains(&line)
    }

    /// Whether passengers can change lines here.
    pub fn is_interchange(&self) -> bool {
        self.lines.len() >= 2
    }

    pub fn kind(&self) -> StationKind {
        if self.is_interchange() {
            StationKind::Junction
        } else if self.terminus {
            StationKind::Terminal
        } else {
            StationKind::Ordinary
        }
    }
}
