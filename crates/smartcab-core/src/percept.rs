//! Local perception of an intersection
//!
//! A [`Percept`] maps a fixed set of sensor [`Channel`]s to discrete
//! [`Reading`]s. The environment produces a fresh one every tick; the router's
//! hint is merged in under [`Channel::NextWaypoint`] before state encoding.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::{RoutingHint, Waypoint};
use crate::error::{Result, SmartcabError};

/// Recognised sensor channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Traffic light facing the cab
    Light,
    /// Intended move of traffic coming the other way
    Oncoming,
    /// Intended move of traffic approaching from the left
    Left,
    /// Intended move of traffic approaching from the right
    Right,
    /// Router hint toward the destination
    NextWaypoint,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Light,
        Channel::Oncoming,
        Channel::Left,
        Channel::Right,
        Channel::NextWaypoint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Light => "light",
            Channel::Oncoming => "oncoming",
            Channel::Left => "left",
            Channel::Right => "right",
            Channel::NextWaypoint => "next_waypoint",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = SmartcabError;

    fn from_str(s: &str) -> Result<Self> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SmartcabError::InvalidArgument(format!("unknown percept channel: {s}")))
    }
}

/// Discrete value observed on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reading {
    Red,
    Green,
    /// No traffic, or no hint
    None,
    Forward,
    Left,
    Right,
}

impl From<Option<Waypoint>> for Reading {
    fn from(waypoint: Option<Waypoint>) -> Self {
        match waypoint {
            None => Reading::None,
            Some(Waypoint::Forward) => Reading::Forward,
            Some(Waypoint::Left) => Reading::Left,
            Some(Waypoint::Right) => Reading::Right,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reading::Red => "red",
            Reading::Green => "green",
            Reading::None => "none",
            Reading::Forward => "forward",
            Reading::Left => "left",
            Reading::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Reading {
    type Err = SmartcabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "red" => Ok(Reading::Red),
            "green" => Ok(Reading::Green),
            "none" => Ok(Reading::None),
            "forward" => Ok(Reading::Forward),
            "left" => Ok(Reading::Left),
            "right" => Ok(Reading::Right),
            other => Err(SmartcabError::InvalidArgument(format!(
                "unknown percept reading: {other}"
            ))),
        }
    }
}

/// Snapshot of what the cab senses at its intersection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    readings: HashMap<Channel, Reading>,
}

impl Percept {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percept as produced by the environment's sensors
    pub fn sensed(
        light: Reading,
        oncoming: Option<Waypoint>,
        left: Option<Waypoint>,
        right: Option<Waypoint>,
    ) -> Self {
        let mut percept = Self::new();
        percept.insert(Channel::Light, light);
        percept.insert(Channel::Oncoming, oncoming.into());
        percept.insert(Channel::Left, left.into());
        percept.insert(Channel::Right, right.into());
        percept
    }

    /// Build a percept from raw `(channel, reading)` names.
    ///
    /// Unknown channel or reading names are rejected here so that everything
    /// past this boundary works with the fixed enumerations.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut percept = Self::new();
        for (channel, reading) in pairs {
            percept.insert(channel.parse()?, reading.parse()?);
        }
        Ok(percept)
    }

    pub fn insert(&mut self, channel: Channel, reading: Reading) -> Option<Reading> {
        self.readings.insert(channel, reading)
    }

    pub fn get(&self, channel: Channel) -> Option<Reading> {
        self.readings.get(&channel).copied()
    }

    /// Merge the router hint under [`Channel::NextWaypoint`]
    pub fn with_hint(mut self, hint: RoutingHint) -> Self {
        self.insert(Channel::NextWaypoint, hint.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, Reading)> + '_ {
        self.readings.iter().map(|(c, r)| (*c, *r))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort();
        write!(f, "{{")?;
        for (i, (channel, reading)) in pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{channel}: {reading}")?;
        }
        write!(f, "}}")
    }
}
