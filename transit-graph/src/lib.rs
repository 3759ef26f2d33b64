//! Time-expanded transit graph.
//!
//! Turns one day of a transit schedule into a weighted directed graph whose
//! vertices are scheduled stops and whose arc weights are elapsed seconds,
//! so that shortest paths are earliest arrivals. Query origins and
//! destinations are grafted on per query and removed afterwards.

pub mod domain;
pub mod graph;
pub mod network;
pub mod schedule;
pub mod walkable;
