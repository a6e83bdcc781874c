//! Temporal-difference value update

use tracing::trace;

use crate::experience::Transition;
use crate::table::ValueTable;

/// One-step Q-value update with a fixed learning rate and discount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearner {
    alpha: f64,
    gamma: f64,
}

impl QLearner {
    pub fn new(alpha: f64, gamma: f64) -> Self {
        Self { alpha, gamma }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// `(1 - alpha) * q + alpha * (reward + gamma * best_next)`
    pub fn updated_value(&self, q: f64, reward: f64, best_next: f64) -> f64 {
        (1.0 - self.alpha) * q + self.alpha * (reward + self.gamma * best_next)
    }

    /// Fold the retained transition into the table.
    ///
    /// `best_next` must be the exploitation-mode maximum for the state the agent
    /// now stands in. Returns the stored value, or `None` on the first step of a
    /// trial when there is nothing to learn from yet.
    pub fn update(
        &self,
        table: &mut ValueTable,
        previous: Option<&Transition>,
        best_next: f64,
    ) -> Option<f64> {
        let previous = previous?;
        let q = table.get(&previous.state, previous.action);
        let value = self.updated_value(q, previous.reward, best_next);
        table.set(&previous.state, previous.action, value);
        trace!(
            state = %previous.state,
            action = %previous.action,
            from = q,
            to = value,
            "Q-value updated"
        );
        Some(value)
    }
}

impl Default for QLearner {
    fn default() -> Self {
        Self::new(0.9, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateKey;
    use smartcab_core::{Action, Percept, Waypoint};

    const EPSILON: f64 = 1e-12;

    fn create_test_state() -> StateKey {
        StateKey::encode(&Percept::new(), Some(Waypoint::Left))
    }

    #[test]
    fn test_reference_update_value() {
        let learner = QLearner::new(0.9, 0.1);
        let value = learner.updated_value(1.0, 5.0, 2.0);
        assert!((value - 4.78).abs() < EPSILON, "got {value}");
    }

    #[test]
    fn test_update_from_initial_value() {
        let learner = QLearner::new(0.9, 0.1);
        let mut table = ValueTable::new(1.0);
        let state = create_test_state();
        let previous = Transition::new(state.clone(), Action::Left, 5.0);

        let stored = learner.update(&mut table, Some(&previous), 2.0).unwrap();

        assert!((stored - 4.78).abs() < EPSILON);
        assert_eq!(table.get(&state, Action::Left), stored);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_no_previous_transition_leaves_table_alone() {
        let learner = QLearner::default();
        let mut table = ValueTable::new(1.0);

        assert_eq!(learner.update(&mut table, None, 2.0), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_update_uses_stored_value() {
        let learner = QLearner::new(0.5, 0.0);
        let mut table = ValueTable::new(1.0);
        let state = create_test_state();
        table.set(&state, Action::Forward, 4.0);

        let previous = Transition::new(state.clone(), Action::Forward, -2.0);
        let stored = learner.update(&mut table, Some(&previous), 100.0).unwrap();

        // gamma = 0 ignores the bootstrap entirely
        assert!((stored - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_alpha_one_replaces_estimate() {
        let learner = QLearner::new(1.0, 0.5);
        assert!((learner.updated_value(7.0, 2.0, 4.0) - 4.0).abs() < EPSILON);
    }
}
