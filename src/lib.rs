//! Production Line Bottleneck Simulation Library
//!
//! A discrete-time model of widgets moving through a line of stations,
//! one of which is slower than the rest.

pub mod presentation;
pub mod simulation;
