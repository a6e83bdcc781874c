//! smartcab sim - the grid world the learning cab drives in
//!
//! Signalled intersections on a wrap-around grid, scripted background
//! traffic, a shortest-path route planner and the [`Simulator`] that runs
//! trials end to end.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod dummy;
pub mod planner;
pub mod simulator;
pub mod traffic;
pub mod world;

pub use planner::{plan, RoutePlanner};
pub use simulator::{Simulator, TrialReport};
pub use traffic::TrafficLight;
pub use world::{Cab, World, PRIMARY};
