//! smartcab core - shared types for the driving agent and its grid world
//!
//! This crate provides the actions, percepts, grid geometry, configuration and
//! error types used across the smartcab crates.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_sign_loss)]

pub mod action;
pub mod config;
pub mod error;
pub mod geometry;
pub mod percept;

pub use action::{Action, Reward, RoutingHint, Waypoint};
pub use config::{
    LearningConfig, LoggingConfig, SimulationConfig, SmartcabConfig, MAX_GRID_SIDE,
};
pub use error::{Result, SmartcabError};
pub use geometry::{Heading, Location};
pub use percept::{Channel, Percept, Reading};
