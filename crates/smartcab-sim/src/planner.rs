//! Route planner

use smartcab_core::{Heading, Location, RoutingHint, Waypoint};
use smartcab_rl::Router;

use crate::world::World;

/// Signed shortest offset from `from` to `to` on a ring of `size` cells.
/// An even split goes the positive way.
fn ring_offset(from: i32, to: i32, size: i32) -> i32 {
    let ahead = (to - from).rem_euclid(size);
    if ahead * 2 > size {
        ahead - size
    } else {
        ahead
    }
}

/// Next move from `location`, facing `heading`, toward `destination` on a
/// wrap-around grid of `(width, height)` intersections.
///
/// Closes the east/west gap first, then north/south, each the short way round.
/// Goes forward when already facing the right way, otherwise turns toward it;
/// facing directly away is resolved with a right turn.
pub fn plan(
    location: Location,
    heading: Heading,
    destination: Location,
    (width, height): (i32, i32),
) -> RoutingHint {
    let dx = ring_offset(location.x, destination.x, width);
    let dy = ring_offset(location.y, destination.y, height);

    let wanted = if dx != 0 {
        Heading {
            dx: dx.signum(),
            dy: 0,
        }
    } else if dy != 0 {
        Heading {
            dx: 0,
            dy: dy.signum(),
        }
    } else {
        return None;
    };

    Some(if heading == wanted {
        Waypoint::Forward
    } else if heading.turn_left() == wanted {
        Waypoint::Left
    } else {
        Waypoint::Right
    })
}

/// Plans for the primary cab of a [`World`]
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    destination: Option<Location>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Location> {
        self.destination
    }
}

impl Router for RoutePlanner {
    type Env = World;

    fn route_to(&mut self, destination: Location) {
        self.destination = Some(destination);
    }

    fn next_waypoint(&self, world: &World) -> RoutingHint {
        let destination = self.destination?;
        let cab = world.primary();
        plan(cab.location, cab.heading, destination, world.grid_size())
    }
}
