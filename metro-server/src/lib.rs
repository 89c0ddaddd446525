//! Metro route planner server.
//!
//! Answers "how do I get from this station to that one?" on a metro
//! network: the route with the fewest stops, the fare, the travel time, and
//! how many times you change line. Around that sit last-mile quotes, carbon
//! savings, platform crowding and a per-user trip history.

pub mod cache;
pub mod carbon;
pub mod config;
pub mod crowd;
pub mod domain;
pub mod history;
pub mod last_mile;
pub mod logging;
pub mod network;
pub mod planner;
pub mod web;
