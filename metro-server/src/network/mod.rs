//! The metro network graph.
//!
//! Owns stations, their line memberships, and the undirected adjacency
//! derived from each line's station sequence. Built once at startup and
//! read-only thereafter.

mod builder;
mod error;
mod graph;
mod hyderabad;

pub use builder::{NetworkBuilder, build_network};
pub use error::NetworkError;
pub use graph::{Line, Network};
pub(crate) use graph::StationIndex;
pub use hyderabad::{BLUE_LINE, GREEN_LINE, RED_LINE, hyderabad};
