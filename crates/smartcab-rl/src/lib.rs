//! smartcab RL - tabular Q-learning for the driving agent
//!
//! This crate provides the state encoder, the sparse value table, the
//! epsilon-greedy selector, the temporal-difference learner and the trial
//! statistics, tied together by [`LearningAgent`].

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod env;
pub mod experience;
pub mod learner;
pub mod policy;
pub mod random;
pub mod state;
pub mod stats;
pub mod table;

pub use agent::{LearningAgent, StepOutcome};
pub use env::{Environment, Router};
pub use experience::Transition;
pub use learner::QLearner;
pub use policy::EpsilonGreedy;
pub use random::{RandomSource, StdRandom};
pub use state::StateKey;
pub use stats::{TracingObserver, TrialObserver, TrialStats, TrialSummary};
pub use table::ValueTable;
