//! Sparse Q-value table

use std::collections::HashMap;

use smartcab_core::Action;

use crate::state::StateKey;

/// Map from `(state, action)` to an estimated long-term value.
///
/// Pairs that were never written read as the optimistic initial value. Entries
/// are only ever inserted or overwritten.
#[derive(Debug, Clone)]
pub struct ValueTable {
    // One slot per action, indexed by `Action::to_index`; `None` until written.
    values: HashMap<StateKey, [Option<f64>; Action::COUNT]>,
    initial_value: f64,
    entries: usize,
}

impl ValueTable {
    pub fn new(initial_value: f64) -> Self {
        Self {
            values: HashMap::new(),
            initial_value,
            entries: 0,
        }
    }

    /// Stored estimate, or the initial value for an unseen pair
    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        self.values
            .get(state)
            .and_then(|slots| slots[action.to_index()])
            .unwrap_or(self.initial_value)
    }

    pub fn set(&mut self, state: &StateKey, action: Action, value: f64) {
        let slots = self
            .values
            .entry(state.clone())
            .or_insert([None; Action::COUNT]);
        if slots[action.to_index()].replace(value).is_none() {
            self.entries += 1;
        }
    }

    pub fn contains(&self, state: &StateKey, action: Action) -> bool {
        self.values
            .get(state)
            .is_some_and(|slots| slots[action.to_index()].is_some())
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Number of written `(state, action)` entries
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of distinct states with at least one written action
    pub fn state_count(&self) -> usize {
        self.values.len()
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new(1.0)
    }
}
