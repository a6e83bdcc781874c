//! State encoding for the value table

use std::fmt;

use serde::{Deserialize, Serialize};

use smartcab_core::{Channel, Percept, Reading, RoutingHint};

/// Canonical, hashable form of one observation.
///
/// Readings are kept sorted by channel, so two percepts with the same content
/// always produce equal keys no matter how they were assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(Vec<(Channel, Reading)>);

impl StateKey {
    /// Encode a percept together with the router hint.
    ///
    /// The hint overrides any `next_waypoint` reading already in the percept.
    pub fn encode(percept: &Percept, hint: RoutingHint) -> Self {
        let mut pairs: Vec<_> = percept
            .iter()
            .filter(|(channel, _)| *channel != Channel::NextWaypoint)
            .collect();
        pairs.push((Channel::NextWaypoint, hint.into()));
        Self::from_pairs(pairs)
    }

    /// Canonical key for an arbitrary set of readings
    pub fn from_pairs(mut pairs: Vec<(Channel, Reading)>) -> Self {
        pairs.sort_unstable();
        pairs.dedup_by_key(|(channel, _)| *channel);
        Self(pairs)
    }

    pub fn get(&self, channel: Channel) -> Option<Reading> {
        self.0
            .binary_search_by_key(&channel, |(c, _)| *c)
            .ok()
            .map(|i| self.0[i].1)
    }

    pub fn pairs(&self) -> &[(Channel, Reading)] {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (channel, reading)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{channel}={reading}")?;
        }
        write!(f, ")")
    }
}
