//! Epsilon-greedy action selection

use smartcab_core::Action;

use crate::random::RandomSource;
use crate::state::StateKey;
use crate::table::ValueTable;

/// Epsilon-greedy selector over a [`ValueTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Pick an action for `state`, returning it with its estimated value.
    ///
    /// With probability epsilon a uniformly random action is returned. Otherwise
    /// the actions are scanned in [`Action::ALL`] order; an action that exactly
    /// ties the running maximum takes over the lead on a fair coin flip, one flip
    /// per tie. No exploration draw is made when epsilon is zero.
    pub fn select<R>(&self, table: &ValueTable, state: &StateKey, rng: &mut R) -> (f64, Action)
    where
        R: RandomSource + ?Sized,
    {
        if self.epsilon > 0.0 && rng.next_f64() < self.epsilon {
            let action = Action::ALL[rng.next_index(Action::COUNT)];
            return (table.get(state, action), action);
        }

        let mut max_value = f64::NEG_INFINITY;
        let mut best_action = Action::ALL[0];
        for action in Action::ALL {
            let value = table.get(state, action);
            if value > max_value {
                max_value = value;
                best_action = action;
            } else if value == max_value && rng.next_f64() < 0.5 {
                best_action = action;
            }
        }
        (max_value, best_action)
    }

    /// Highest estimated value over all actions for `state`.
    ///
    /// This is the exploitation-mode maximum and is what the learner bootstraps
    /// from, whether or not the step's action was exploratory.
    pub fn best_value(table: &ValueTable, state: &StateKey) -> f64 {
        Action::ALL
            .into_iter()
            .map(|action| table.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(0.0)
    }
}
