//! Grid coordinates and headings
//!
//! Screen coordinates: `x` grows eastward, `y` grows southward.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Waypoint;

/// An intersection on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Location) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const EAST: Heading = Heading { dx: 1, dy: 0 };
    pub const NORTH: Heading = Heading { dx: 0, dy: -1 };
    pub const WEST: Heading = Heading { dx: -1, dy: 0 };
    pub const SOUTH: Heading = Heading { dx: 0, dy: 1 };

    pub const ALL: [Heading; 4] = [Heading::EAST, Heading::NORTH, Heading::WEST, Heading::SOUTH];

    pub fn turn_left(self) -> Self {
        Self {
            dx: self.dy,
            dy: -self.dx,
        }
    }

    pub fn turn_right(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    pub fn reverse(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    /// Heading after making `waypoint` from this heading
    pub fn after(self, waypoint: Waypoint) -> Self {
        match waypoint {
            Waypoint::Forward => self,
            Waypoint::Left => self.turn_left(),
            Waypoint::Right => self.turn_right(),
        }
    }

    /// Travelling north or south
    pub fn is_vertical(self) -> bool {
        self.dy != 0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.dx, self.dy) {
            (1, 0) => "east",
            (0, -1) => "north",
            (-1, 0) => "west",
            (0, 1) => "south",
            _ => return write!(f, "({}, {})", self.dx, self.dy),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_in_screen_coordinates() {
        assert_eq!(Heading::EAST.turn_right(), Heading::SOUTH);
        assert_eq!(Heading::EAST.turn_left(), Heading::NORTH);
        assert_eq!(Heading::SOUTH.turn_left(), Heading::EAST);
        assert_eq!(Heading::NORTH.turn_left().turn_left(), Heading::SOUTH);
    }

    #[test]
    fn test_left_then_right_is_identity() {
        for heading in Heading::ALL {
            assert_eq!(heading.turn_left().turn_right(), heading);
            assert_eq!(heading.reverse().reverse(), heading);
            assert_eq!(heading.turn_left().turn_left(), heading.reverse());
        }
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Location::new(1, 1).manhattan(Location::new(4, 3)), 5);
        assert_eq!(Location::new(2, 2).manhattan(Location::new(2, 2)), 0);
    }
}
