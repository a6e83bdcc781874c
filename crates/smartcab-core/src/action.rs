//! Driving actions and routing hints

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmartcabError};

/// Scalar reward returned by the environment for one action
pub type Reward = f64;

/// Action a cab can take at an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Stay put for this tick
    None,
    Forward,
    Left,
    Right,
}

impl Action {
    /// Number of discrete actions
    pub const COUNT: usize = 4;

    /// Every action, in the order the policy scans them
    pub const ALL: [Action; Action::COUNT] = [Action::None, Action::Forward, Action::Left, Action::Right];

    /// Position of the action within [`Action::ALL`]
    pub fn to_index(self) -> usize {
        match self {
            Action::None => 0,
            Action::Forward => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Inverse of [`Action::to_index`]
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            SmartcabError::InvalidArgument(format!(
                "action index {index} outside 0..{}",
                Self::action_space_size()
            ))
        })
    }

    pub const fn action_space_size() -> usize {
        Self::COUNT
    }

    /// The move this action makes, or `None` for staying put
    pub fn as_waypoint(self) -> Option<Waypoint> {
        match self {
            Action::None => None,
            Action::Forward => Some(Waypoint::Forward),
            Action::Left => Some(Waypoint::Left),
            Action::Right => Some(Waypoint::Right),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => write!(f, "none"),
            Action::Forward => write!(f, "forward"),
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Action {
    type Err = SmartcabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Action::None),
            "forward" => Ok(Action::Forward),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            other => Err(SmartcabError::InvalidArgument(format!(
                "unknown action: {other}"
            ))),
        }
    }
}

/// A directional move relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waypoint {
    Forward,
    Left,
    Right,
}

impl Waypoint {
    pub const ALL: [Waypoint; 3] = [Waypoint::Forward, Waypoint::Left, Waypoint::Right];
}

impl From<Waypoint> for Action {
    fn from(waypoint: Waypoint) -> Self {
        match waypoint {
            Waypoint::Forward => Action::Forward,
            Waypoint::Left => Action::Left,
            Waypoint::Right => Action::Right,
        }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Action::from(*self).fmt(f)
    }
}

/// Router suggestion for the next move; `None` once the destination is reached
pub type RoutingHint = Option<Waypoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_roundtrip() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.to_index(), i);
            assert_eq!(Action::from_index(i).unwrap(), *action);
        }
    }

    #[test]
    fn test_action_from_index_out_of_range() {
        let err = Action::from_index(4).unwrap_err();
        assert!(matches!(err, SmartcabError::InvalidArgument(_)));
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("forward".parse::<Action>().unwrap(), Action::Forward);
        assert_eq!("NONE".parse::<Action>().unwrap(), Action::None);
        assert!("reverse".parse::<Action>().is_err());
    }

    #[test]
    fn test_waypoint_as_action() {
        assert_eq!(Action::from(Waypoint::Left), Action::Left);
        assert_eq!(Action::Left.as_waypoint(), Some(Waypoint::Left));
        assert_eq!(Action::None.as_waypoint(), None);
        assert_eq!(Waypoint::Right.to_string(), "right");
    }

    #[test]
    fn test_action_space_size() {
        assert_eq!(Action::action_space_size(), 4);
    }
}
