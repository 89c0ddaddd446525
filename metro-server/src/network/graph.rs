//! Station/line graph.
//!
//! The graph is built once from an ordered list of lines and is read-only
//! afterwards, so a single `Network` can be shared between any number of
//! concurrent planners without locking.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{LineId, Station, StationName};

use super::NetworkError;

/// Position of a station in the network's first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct StationIndex(pub usize);

/// One service route: an ordered sequence of stations in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    name: String,
    stations: Vec<StationName>,
}

impl Line {
    /// Create a line from already-validated station names.
    pub fn new(id: LineId, name: impl Into<String>, stations: Vec<StationName>) -> Self {
        Self {
            id,
            name: name.into(),
            stations,
        }
    }

    /// Create a line from raw station names.
    pub fn parse(id: LineId, name: &str, stations: &[&str]) -> Result<Self, NetworkError> {
        let stations = stations
            .iter()
            .map(|s| StationName::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(id, name, stations))
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stations(&self) -> &[StationName] {
        &self.stations
    }
}

/// The immutable metro network.
///
/// Stations are keyed by name. Adjacency is held in an index separate from
/// the stations themselves; each undirected edge is stored once, keyed by
/// its endpoints in ascending index order, together with every line it
/// belongs to.
#[derive(Debug, Clone)]
pub struct Network {
    lines: Vec<Line>,
    stations: Vec<Station>,
    index: HashMap<StationName, StationIndex>,
    /// Neighbours per station, in the order their edges were first declared.
    adjacency: Vec<Vec<StationIndex>>,
    edges: BTreeMap<(StationIndex, StationIndex), BTreeSet<LineId>>,
}

impl Network {
    /// Build the network from lines in declaration order.
    ///
    /// A station name seen on several lines is one station served by all of
    /// them. Station order, and with it neighbour order, follows first
    /// appearance, so the same input always yields the same graph.
    ///
    /// # Errors
    ///
    /// Fails if no lines are given, a line has fewer than 2 stations, a
    /// line id is reused, or a station repeats consecutively on a line.
    pub fn build(lines: Vec<Line>) -> Result<Self, NetworkError> {
        if lines.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }

        let mut network = Network {
            lines: Vec::with_capacity(lines.len()),
            stations: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            edges: BTreeMap::new(),
        };

        let mut seen_lines = BTreeSet::new();
        for line in lines {
            if !seen_lines.insert(line.id) {
                return Err(NetworkError::DuplicateLine(line.id));
            }
            network.add_line(&line)?;
            network.lines.push(line);
        }

        debug!(
            lines = network.lines.len(),
            stations = network.stations.len(),
            edges = network.edges.len(),
            interchanges = network.stations.iter().filter(|s| s.is_interchange()).count(),
            "Built metro network"
        );

        Ok(network)
    }

    fn add_line(&mut self, line: &Line) -> Result<(), NetworkError> {
        let count = line.stations.len();
        if count < 2 {
            return Err(NetworkError::LineTooShort {
                line: line.id,
                len: count,
            });
        }

        let mut previous: Option<StationIndex> = None;
        for (position, name) in line.stations.iter().enumerate() {
            let current = self.insert_station(name, line.id);
            if position == 0 || position == count - 1 {
                self.stations[current.0].mark_terminus();
            }

            if let Some(prev) = previous {
                if prev == current {
                    return Err(NetworkError::RepeatedStation {
                        line: line.id,
                        station: name.to_string(),
                    });
                }
                self.insert_edge(prev, current, line.id);
            }
            previous = Some(current);
        }

        Ok(())
    }

    fn insert_station(&mut self, name: &StationName, line: LineId) -> StationIndex {
        if let Some(&idx) = self.index.get(name) {
            if self.stations[idx.0].add_line(line) && self.stations[idx.0].line_count() == 2 {
                debug!(station = %name, %line, "Station becomes an interchange");
            }
            return idx;
        }

        let idx = StationIndex(self.stations.len());
        self.stations.push(Station::new(name.clone(), line));
        self.index.insert(name.clone(), idx);
        self.adjacency.push(Vec::new());
        idx
    }

    fn insert_edge(&mut self, a: StationIndex, b: StationIndex, line: LineId) {
        match self.edges.entry(edge_key(a, b)) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().insert(line);
            }
            Entry::Vacant(entry) => {
                entry.insert(BTreeSet::from([line]));
                self.adjacency[a.0].push(b);
                self.adjacency[b.0].push(a);
            }
        }
    }

    /// All station names, in first-seen order.
    pub fn station_names(&self) -> impl Iterator<Item = &StationName> {
        self.stations.iter().map(Station::name)
    }

    /// All stations, in first-seen order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a station by exact name.
    pub fn station(&self, name: &str) -> Result<&Station, NetworkError> {
        self.index_of(name)
            .map(|idx| &self.stations[idx.0])
            .ok_or_else(|| NetworkError::UnknownStation(name.to_string()))
    }

    /// Directly adjacent stations, in declaration order.
    ///
    /// An isolated station yields an empty list.
    pub fn neighbors(&self, name: &str) -> Result<Vec<&StationName>, NetworkError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| NetworkError::UnknownStation(name.to_string()))?;
        Ok(self
            .neighbour_indices(idx)
            .iter()
            .map(|n| self.stations[n.0].name())
            .collect())
    }

    /// The canonical line of the edge between two adjacent stations.
    ///
    /// When the stations are adjacent on several lines the lowest line id
    /// is returned, so repeated calls always agree.
    pub fn line_of(&self, a: &str, b: &str) -> Result<LineId, NetworkError> {
        self.lines_of(a, b)?
            .next()
            .ok_or_else(|| NetworkError::NoSuchEdge(a.to_string(), b.to_string()))
    }

    /// Every line the edge between two adjacent stations belongs to,
    /// lowest id first.
    pub fn lines_of(
        &self,
        a: &str,
        b: &str,
    ) -> Result<impl Iterator<Item = LineId> + '_, NetworkError> {
        let no_edge = || NetworkError::NoSuchEdge(a.to_string(), b.to_string());
        let a_idx = self.index_of(a).ok_or_else(no_edge)?;
        let b_idx = self.index_of(b).ok_or_else(no_edge)?;
        self.edges
            .get(&edge_key(a_idx, b_idx))
            .map(|lines| lines.iter().copied())
            .ok_or_else(no_edge)
    }

    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.edges.contains_key(&edge_key(a, b)),
            _ => false,
        }
    }

    /// Lines in declaration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<StationIndex> {
        self.index.get(name).copied()
    }

    pub(crate) fn station_at(&self, idx: StationIndex) -> &Station {
        &self.stations[idx.0]
    }

    pub(crate) fn neighbour_indices(&self, idx: StationIndex) -> &[StationIndex] {
        &self.adjacency[idx.0]
    }
}

/// Order-independent key for an undirected edge.
fn edge_key(a: StationIndex, b: StationIndex) -> (StationIndex, StationIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationKind;

    fn line(id: u16, stations: &[&str]) -> Line {
        Line::parse(LineId::new(id), &format!("Line {id}"), stations).unwrap()
    }

    fn names<'a>(list: impl IntoIterator<Item = &'a StationName>) -> Vec<&'a str> {
        list.into_iter().map(StationName::as_str).collect()
    }

    /// Two lines crossing at X:
    ///
    /// ```text
    /// line 1: A - B - X - C
    /// line 2: D - X - E
    /// ```
    fn crossing() -> Network {
        Network::build(vec![line(1, &["A", "B", "X", "C"]), line(2, &["D", "X", "E"])]).unwrap()
    }

    #[test]
    fn empty_network_rejected() {
        assert_eq!(Network::build(vec![]).unwrap_err(), NetworkError::EmptyNetwork);
    }

    #[test]
    fn short_line_rejected() {
        let err = Network::build(vec![line(1, &["A", "B"]), line(2, &["C"])]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::LineTooShort {
                line: LineId::new(2),
                len: 1
            }
        );

        let err = Network::build(vec![line(1, &[])]).unwrap_err();
        assert!(matches!(err, NetworkError::LineTooShort { len: 0, .. }));
    }

    #[test]
    fn duplicate_line_id_rejected() {
        let err = Network::build(vec![line(1, &["A", "B"]), line(1, &["C", "D"])]).unwrap_err();
        assert_eq!(err, NetworkError::DuplicateLine(LineId::new(1)));
    }

    #[test]
    fn consecutive_repeat_rejected() {
        let err = Network::build(vec![line(1, &["A", "A", "B"])]).unwrap_err();
        assert!(matches!(err, NetworkError::RepeatedStation { .. }));
    }

    #[test]
    fn blank_station_name_rejected() {
        let err = Line::parse(LineId::new(1), "Line 1", &["A", " "]).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidStationName(_)));
    }

    #[test]
    fn shared_station_is_merged() {
        let network = crossing();
        assert_eq!(network.station_count(), 6);
        assert_eq!(
            names(network.station_names()),
            vec!["A", "B", "X", "C", "D", "E"]
        );

        let x = network.station("X").unwrap();
        assert!(x.is_interchange());
        assert_eq!(x.kind(), StationKind::Junction);
        assert_eq!(
            x.lines().collect::<Vec<_>>(),
            vec![LineId::new(1), LineId::new(2)]
        );
    }

    #[test]
    fn kinds_follow_position_and_membership() {
        let network = crossing();
        assert_eq!(network.station("A").unwrap().kind(), StationKind::Terminal);
        assert_eq!(network.station("C").unwrap().kind(), StationKind::Terminal);
        assert_eq!(network.station("B").unwrap().kind(), StationKind::Ordinary);
        assert_eq!(network.station("E").unwrap().kind(), StationKind::Terminal);
    }

    #[test]
    fn neighbors_in_declaration_order() {
        let network = crossing();
        assert_eq!(names(network.neighbors("X").unwrap()), vec!["B", "C", "D", "E"]);
        assert_eq!(names(network.neighbors("A").unwrap()), vec!["B"]);
    }

    #[test]
    fn neighbors_of_unknown_station() {
        let network = crossing();
        assert_eq!(
            network.neighbors("Z").unwrap_err(),
            NetworkError::UnknownStation("Z".into())
        );
    }

    #[test]
    fn adjacency_is_symmetric() {
        let network = crossing();
        for station in network.station_names() {
            for neighbour in network.neighbors(station.as_str()).unwrap() {
                let back = network.neighbors(neighbour.as_str()).unwrap();
                assert!(back.contains(&station), "{neighbour} does not link back to {station}");
            }
        }
    }

    #[test]
    fn line_of_is_order_independent() {
        let network = crossing();
        assert_eq!(network.line_of("B", "X").unwrap(), LineId::new(1));
        assert_eq!(network.line_of("X", "B").unwrap(), LineId::new(1));
        assert_eq!(network.line_of("E", "X").unwrap(), LineId::new(2));
    }

    #[test]
    fn line_of_non_adjacent() {
        let network = crossing();
        assert_eq!(
            network.line_of("A", "C").unwrap_err(),
            NetworkError::NoSuchEdge("A".into(), "C".into())
        );
        assert!(matches!(
            network.line_of("A", "Nowhere"),
            Err(NetworkError::NoSuchEdge(_, _))
        ));
        assert!(!network.are_adjacent("A", "C"));
        assert!(network.are_adjacent("C", "X"));
    }

    #[test]
    fn shared_edge_keeps_every_line_and_picks_lowest() {
        // Lines 5 and 2 both run P - Q.
        let network =
            Network::build(vec![line(5, &["P", "Q", "R"]), line(2, &["S", "P", "Q"])]).unwrap();

        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.line_of("Q", "P").unwrap(), LineId::new(2));
        assert_eq!(
            network.lines_of("P", "Q").unwrap().collect::<Vec<_>>(),
            vec![LineId::new(2), LineId::new(5)]
        );
        // The shared edge is not listed twice.
        assert_eq!(names(network.neighbors("P").unwrap()), vec!["Q", "S"]);
    }

    #[test]
    fn lines_keep_declaration_order() {
        let network = crossing();
        let ids: Vec<_> = network.lines().iter().map(Line::id).collect();
        assert_eq!(ids, vec![LineId::new(1), LineId::new(2)]);
        assert_eq!(network.line(LineId::new(2)).unwrap().name(), "Line 2");
        assert!(network.line(LineId::new(9)).is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a handful of lines over a small station alphabet, so
    /// lines overlap often.
    fn arb_lines() -> impl Strategy<Value = Vec<Line>> {
        prop::collection::vec(prop::collection::vec(0u8..12, 2..8), 1..5).prop_map(|seqs| {
            seqs.into_iter()
                .enumerate()
                .map(|(i, seq)| {
                    let mut stations: Vec<StationName> = Vec::new();
                    for s in seq {
                        let name = StationName::parse(&format!("S{s}")).unwrap();
                        if stations.last() != Some(&name) {
                            stations.push(name);
                        }
                    }
                    // Guarantee two stations after collapsing repeats.
                    if stations.len() < 2 {
                        stations = vec![
                            StationName::parse("S0").unwrap(),
                            StationName::parse("S1").unwrap(),
                        ];
                    }
                    Line::new(LineId::new(i as u16 + 1), format!("L{i}"), stations)
                })
                .collect()
        })
    }

    proptest! {
        /// Every consecutive pair on every line is an edge, in both directions
        #[test]
        fn consecutive_stations_are_adjacent(lines in arb_lines()) {
            let network = Network::build(lines.clone()).unwrap();
            for line in &lines {
                for pair in line.stations().windows(2) {
                    let (a, b) = (pair[0].as_str(), pair[1].as_str());
                    prop_assert!(network.are_adjacent(a, b));
                    prop_assert!(network.are_adjacent(b, a));
                    prop_assert!(network.lines_of(a, b).unwrap().any(|l| l == line.id()));
                }
            }
        }

        /// Each name appears once, and membership covers every line listing it
        #[test]
        fn stations_are_unique_and_complete(lines in arb_lines()) {
            let network = Network::build(lines.clone()).unwrap();
            let all: BTreeSet<_> = network.station_names().collect();
            prop_assert_eq!(all.len(), network.station_count());

            for line in &lines {
                for name in line.stations() {
                    let station = network.station(name.as_str()).unwrap();
                    prop_assert!(station.is_served_by(line.id()));
                }
            }
        }

        /// Rebuilding from the same input gives the same neighbour order
        #[test]
        fn construction_is_deterministic(lines in arb_lines()) {
            let first = Network::build(lines.clone()).unwrap();
            let second = Network::build(lines).unwrap();
            for name in first.station_names() {
                prop_assert_eq!(
                    first.neighbors(name.as_str()).unwrap(),
                    second.neighbors(name.as_str()).unwrap()
                );
            }
        }
    }
}
