//! The Hyderabad Metro reference network.
//!
//! Three corridors meeting at two interchanges:
//!
//! - Red Line (Corridor I): Miyapur ↔ LB Nagar
//! - Blue Line (Corridor II): Nagole ↔ Raidurg, crossing Red at Ameerpet
//! - Green Line (Corridor III): JBS Parade Ground ↔ MGBS, ending on Red at MGBS

use crate::domain::LineId;

use super::{Network, NetworkBuilder, NetworkError};

pub const RED_LINE: LineId = LineId::new(1);
pub const BLUE_LINE: LineId = LineId::new(2);
pub const GREEN_LINE: LineId = LineId::new(3);

const RED_STATIONS: &[&str] = &[
    "Miyapur",
    "JNTU College",
    "KPHB Colony",
    "Kukatpally",
    "Balanagar",
    "Moosapet",
    "Bharat Nagar",
    "Erragadda",
    "ESI Hospital",
    "SR Nagar",
    "Ameerpet",
    "Punjagutta",
    "Irrum Manzil",
    "Khairatabad",
    "Lakdi-ka-pul",
    "Assembly",
    "Nampally",
    "Gandhi Bhavan",
    "Osmania Medical College",
    "MGBS",
    "Malakpet",
    "New Market",
    "Musarambagh",
    "Dilsukhnagar",
    "Chaitanyapuri",
    "Victoria Memorial",
    "LB Nagar",
];

const BLUE_STATIONS: &[&str] = &[
    "Nagole",
    "Uppal",
    "Stadium",
    "NGRI",
    "Habsiguda",
    "Tarnaka",
    "Mettuguda",
    "Secunderabad East",
    "Parade Ground",
    "Paradise",
    "Rasoolpura",
    "Prakash Nagar",
    "Begumpet",
    "Ameerpet",
    "Madhura Nagar",
    "Yusufguda",
    "Road No. 5 Jubilee Hills",
    "Jubilee Hills Check Post",
    "Peddamma Gudi",
    "Madhapur",
    "Durgam Cheruvu",
    "Hitec City",
    "Raidurg",
];

const GREEN_STATIONS: &[&str] = &[
    "JBS Parade Ground",
    "Secunderabad West",
    "Gandhi Hospital",
    "Musheerabad",
    "RTC Cross Roads",
    "Chikkadpally",
    "Narayanaguda",
    "Sultan Bazaar",
    "MGBS",
];

/// Build the Hyderabad Metro network.
pub fn hyderabad() -> Result<Network, NetworkError> {
    NetworkBuilder::new()
        .line(RED_LINE, "Red Line", RED_STATIONS)
        .line(BLUE_LINE, "Blue Line", BLUE_STATIONS)
        .line(GREEN_LINE, "Green Line", GREEN_STATIONS)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationKind;

    #[test]
    fn station_and_edge_counts() {
        let network = hyderabad().unwrap();
        // 27 + 23 + 9 listed, Ameerpet and MGBS listed twice.
        assert_eq!(network.station_count(), 57);
        assert_eq!(network.edge_count(), 26 + 22 + 8);
        assert_eq!(network.lines().len(), 3);
    }

    #[test]
    fn interchanges() {
        let network = hyderabad().unwrap();
        let interchanges: Vec<_> = network
            .stations()
            .iter()
            .filter(|s| s.is_interchange())
            .map(|s| s.name().as_str())
            .collect();
        assert_eq!(interchanges, vec!["Ameerpet", "MGBS"]);

        let ameerpet = network.station("Ameerpet").unwrap();
        assert_eq!(ameerpet.lines().collect::<Vec<_>>(), vec![RED_LINE, BLUE_LINE]);
        let mgbs = network.station("MGBS").unwrap();
        assert_eq!(mgbs.lines().collect::<Vec<_>>(), vec![RED_LINE, GREEN_LINE]);
        assert_eq!(mgbs.kind(), StationKind::Junction);
    }

    #[test]
    fn terminals() {
        let network = hyderabad().unwrap();
        let mut terminals: Vec<_> = network
            .stations()
            .iter()
            .filter(|s| s.kind() == StationKind::Terminal)
            .map(|s| s.name().as_str())
            .collect();
        terminals.sort_unstable();
        assert_eq!(
            terminals,
            vec!["JBS Parade Ground", "LB Nagar", "Miyapur", "Nagole", "Raidurg"]
        );
    }

    #[test]
    fn ameerpet_connects_four_ways() {
        let network = hyderabad().unwrap();
        let neighbours: Vec<_> = network
            .neighbors("Ameerpet")
            .unwrap()
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(
            neighbours,
            vec!["SR Nagar", "Punjagutta", "Begumpet", "Madhura Nagar"]
        );
    }
}
