//! Retained transition for the one-step-lagged update

use serde::{Deserialize, Serialize};

use smartcab_core::{Action, Reward};

use crate::state::StateKey;

/// The `(s, a, r)` of the step just completed.
///
/// The agent keeps exactly one of these between decision steps and drops it at
/// every trial reset, so no update bootstraps across a trial boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateKey,
    pub action: Action,
    pub reward: Reward,
}

impl Transition {
    pub fn new(state: StateKey, action: Action, reward: Reward) -> Self {
        Self {
            state,
            action,
            reward,
        }
    }
}
