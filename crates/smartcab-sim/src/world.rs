//! Grid world - intersections, lights, cabs and the rules of the road

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use smartcab_core::{
    Action, Channel, Heading, Location, Percept, Reading, Result, Reward, SimulationConfig,
    SmartcabError, Waypoint,
};
use smartcab_rl::Environment;

use crate::dummy::may_proceed;
use crate::planner::plan;
use crate::traffic::TrafficLight;

/// Index of the learning cab in [`World::cabs`]
pub const PRIMARY: usize = 0;

/// Shortest trip, in blocks, a trial will start with
pub const MIN_TRIP_DISTANCE: i32 = 4;

// Rewards
pub const REWARD_ON_ROUTE: Reward = 2.0;
pub const REWARD_OFF_ROUTE: Reward = -0.5;
pub const REWARD_IDLE: Reward = 0.0;
pub const REWARD_VIOLATION: Reward = -1.0;
pub const REWARD_ARRIVAL: Reward = 10.0;

/// One car on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Cab {
    pub location: Location,
    pub heading: Heading,
    /// Set for the primary cab only
    pub destination: Option<Location>,
    pub deadline: i64,
    /// Intended move of a scripted cab
    pub waypoint: Option<Waypoint>,
}

impl Cab {
    fn parked(location: Location) -> Self {
        Self {
            location,
            heading: Heading::EAST,
            destination: None,
            deadline: 0,
            waypoint: None,
        }
    }
}

/// Toroidal grid of signalled intersections.
///
/// Cab 0 is the learner; the rest are scripted traffic. The world implements
/// [`Environment`] from the learner's point of view.
pub struct World {
    config: SimulationConfig,
    rng: StdRng,
    intersections: Vec<Location>,
    lights: HashMap<Location, TrafficLight>,
    cabs: Vec<Cab>,
    tick: u64,
    done: bool,
    reached: bool,
    status: String,
}

impl World {
    /// Build the grid described by `config`; call [`World::reset`] before stepping
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let cells = config.intersection_count()?;
        let mut intersections = Vec::with_capacity(cells);
        let mut lights = HashMap::with_capacity(cells);
        for x in 1..=config.grid_width {
            for y in 1..=config.grid_height {
                let location = Location::new(x, y);
                intersections.push(location);
                lights.insert(location, TrafficLight::random(&mut rng));
            }
        }

        let cabs = (0..=config.dummy_agents)
            .map(|_| Cab::parked(Location::new(1, 1)))
            .collect();

        Ok(Self {
            config: config.clone(),
            rng,
            intersections,
            lights,
            cabs,
            tick: 0,
            done: false,
            reached: false,
            status: String::new(),
        })
    }

    /// Start a new trial and return the learner's destination
    pub fn reset(&mut self) -> Result<Location> {
        self.tick = 0;
        self.done = false;
        self.reached = false;
        for light in self.lights.values_mut() {
            light.reset();
        }

        let (start, destination) = self.random_trip()?;

        let heading = Self::random_heading(&mut self.rng);
        let deadline =
            i64::from(start.manhattan(destination)).saturating_mul(self.config.deadline_factor);
        self.cabs[PRIMARY] = Cab {
            location: start,
            heading,
            destination: Some(destination),
            deadline,
            waypoint: None,
        };

        for index in 1..self.cabs.len() {
            let location = self
                .intersections
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(start);
            self.cabs[index] = Cab {
                location,
                heading: Self::random_heading(&mut self.rng),
                destination: None,
                deadline: 0,
                waypoint: Some(Self::random_waypoint(&mut self.rng)),
            };
        }

        debug!(%start, %destination, deadline, "Trial reset");
        Ok(destination)
    }

    /// Draw start and destination until they are far enough apart
    fn random_trip(&mut self) -> Result<(Location, Location)> {
        // Corner to corner is the longest trip the grid offers
        let longest = (self.config.grid_width - 1) + (self.config.grid_height - 1);
        if longest < MIN_TRIP_DISTANCE {
            return Err(SmartcabError::Simulation(format!(
                "no trip of at least {MIN_TRIP_DISTANCE} blocks fits a {}x{} grid",
                self.config.grid_width, self.config.grid_height
            )));
        }

        loop {
            let start = self.intersections.choose(&mut self.rng).copied();
            let destination = self.intersections.choose(&mut self.rng).copied();
            match start.zip(destination) {
                Some((start, destination)) if start.manhattan(destination) >= MIN_TRIP_DISTANCE => {
                    return Ok((start, destination));
                }
                Some(_) => continue,
                None => {
                    return Err(SmartcabError::Simulation(
                        "grid has no intersections".to_string(),
                    ))
                }
            }
        }
    }

    /// Update the lights and move scripted traffic; returns the current tick.
    ///
    /// The learner acts between this and [`World::end_step`].
    pub fn begin_step(&mut self) -> u64 {
        let tick = self.tick;
        for light in self.lights.values_mut() {
            light.update(tick);
        }
        for index in 1..self.cabs.len() {
            self.move_dummy(index);
        }
        tick
    }

    /// Advance the clock and spend one tick of the learner's budget
    pub fn end_step(&mut self) {
        self.tick += 1;

        let deadline = self.cabs[PRIMARY].deadline;
        if deadline <= self.config.hard_time_limit {
            debug!(deadline, "Hard time limit reached");
            self.done = true;
        } else if self.config.enforce_deadline && deadline <= 0 {
            self.done = true;
        }
        self.cabs[PRIMARY].deadline = deadline - 1;
    }

    fn move_dummy(&mut self, index: usize) {
        let waypoint = match self.cabs[index].waypoint {
            Some(waypoint) => waypoint,
            None => Self::random_waypoint(&mut self.rng),
        };
        let percept = self.sense_for(index);

        let action = if may_proceed(waypoint, &percept) {
            self.cabs[index].waypoint = Some(Self::random_waypoint(&mut self.rng));
            Action::from(waypoint)
        } else {
            self.cabs[index].waypoint = Some(waypoint);
            Action::None
        };
        self.act_for(index, action);
    }

    /// Where cab `index` means to go next
    pub fn intent(&self, index: usize) -> Option<Waypoint> {
        let cab = &self.cabs[index];
        match cab.destination {
            Some(destination) => {
                plan(cab.location, cab.heading, destination, self.grid_size())
            }
            None => cab.waypoint,
        }
    }

    /// What cab `index` senses at its intersection
    pub fn sense_for(&self, index: usize) -> Percept {
        let me = &self.cabs[index];
        let light = self
            .lights
            .get(&me.location)
            .map_or(Reading::Red, |light| light.facing(me.heading));

        let mut oncoming = None;
        let mut left = None;
        let mut right = None;
        for (other_index, other) in self.cabs.iter().enumerate() {
            if other_index == index || other.location != me.location || other.heading == me.heading
            {
                continue;
            }
            let intent = self.intent(other_index);
            if other.heading == me.heading.reverse() {
                if oncoming != Some(Waypoint::Left) {
                    oncoming = intent;
                }
            } else if other.heading == me.heading.turn_left() {
                if !matches!(right, Some(Waypoint::Forward | Waypoint::Left)) {
                    right = intent;
                }
            } else if left != Some(Waypoint::Forward) {
                left = intent;
            }
        }

        Percept::sensed(light, oncoming, left, right)
    }

    /// Apply the rules of the road to `action` by cab `index`
    pub fn act_for(&mut self, index: usize, action: Action) -> Reward {
        let percept = self.sense_for(index);
        let intent = self.intent(index);

        let green = percept.get(Channel::Light) == Some(Reading::Green);
        let oncoming = percept.get(Channel::Oncoming).unwrap_or(Reading::None);
        let left = percept.get(Channel::Left).unwrap_or(Reading::None);

        let heading = self.cabs[index].heading;
        let (legal, heading) = match action {
            Action::None => (true, heading),
            Action::Forward => (green, heading),
            Action::Left => (
                green && matches!(oncoming, Reading::None | Reading::Left),
                heading.turn_left(),
            ),
            Action::Right => (green || left != Reading::Forward, heading.turn_right()),
        };

        let mut reward = if !legal {
            REWARD_VIOLATION
        } else if action == Action::None {
            REWARD_IDLE
        } else {
            let next = self.wrap(self.cabs[index].location, heading);
            let cab = &mut self.cabs[index];
            cab.location = next;
            cab.heading = heading;
            if action.as_waypoint() == intent {
                REWARD_ON_ROUTE
            } else {
                REWARD_OFF_ROUTE
            }
        };

        let cab = &self.cabs[index];
        if cab.destination == Some(cab.location) {
            if cab.deadline >= 0 {
                reward += REWARD_ARRIVAL;
            }
            self.done = true;
            self.reached = true;
            debug!(tick = self.tick, deadline = cab.deadline, "Destination reached");
        }

        if index == PRIMARY {
            self.status = format!("state: {percept}\naction: {action}\nreward: {reward}");
            trace!(tick = self.tick, legal, reward, "Primary acted");
        }
        reward
    }

    fn wrap(&self, location: Location, heading: Heading) -> Location {
        Location::new(
            (location.x + heading.dx - 1).rem_euclid(self.config.grid_width) + 1,
            (location.y + heading.dy - 1).rem_euclid(self.config.grid_height) + 1,
        )
    }

    fn random_heading(rng: &mut StdRng) -> Heading {
        Heading::ALL.choose(rng).copied().unwrap_or(Heading::EAST)
    }

    fn random_waypoint(rng: &mut StdRng) -> Waypoint {
        Waypoint::ALL.choose(rng).copied().unwrap_or(Waypoint::Forward)
    }

    // ------------------------------------------------------------------
    // Setup used by scenarios and tests
    // ------------------------------------------------------------------

    /// Put cab `index` at `location` facing `heading`
    pub fn place(&mut self, index: usize, location: Location, heading: Heading) -> Result<()> {
        if !self.lights.contains_key(&location) {
            return Err(SmartcabError::InvalidArgument(format!(
                "{location} is not on the grid"
            )));
        }
        let cab = self.cabs.get_mut(index).ok_or_else(|| {
            SmartcabError::InvalidArgument(format!("no cab with index {index}"))
        })?;
        cab.location = location;
        cab.heading = heading;
        Ok(())
    }

    /// Set the intended move of scripted cab `index`
    pub fn set_intent(&mut self, index: usize, waypoint: Waypoint) -> Result<()> {
        if index == PRIMARY {
            return Err(SmartcabError::InvalidArgument(
                "the primary cab follows its planner".to_string(),
            ));
        }
        let cab = self.cabs.get_mut(index).ok_or_else(|| {
            SmartcabError::InvalidArgument(format!("no cab with index {index}"))
        })?;
        cab.waypoint = Some(waypoint);
        Ok(())
    }

    /// Send the learner to `destination` with `deadline` ticks to spare
    pub fn set_trip(&mut self, destination: Location, deadline: i64) {
        let cab = &mut self.cabs[PRIMARY];
        cab.destination = Some(destination);
        cab.deadline = deadline;
    }

    /// Replace the light at `location`
    pub fn set_light(&mut self, location: Location, light: TrafficLight) -> Result<()> {
        match self.lights.get_mut(&location) {
            Some(slot) => {
                *slot = light;
                Ok(())
            }
            None => Err(SmartcabError::InvalidArgument(format!(
                "{location} is not on the grid"
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn primary(&self) -> &Cab {
        &self.cabs[PRIMARY]
    }

    pub fn cabs(&self) -> &[Cab] {
        &self.cabs
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The trial is over
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The learner reached its destination this trial
    pub fn reached_destination(&self) -> bool {
        self.reached
    }

    /// Last percept, action and reward of the learner
    pub fn status(&self) -> &str {
        &self.status
    }

    /// `(width, height)` in intersections
    pub fn grid_size(&self) -> (i32, i32) {
        (self.config.grid_width, self.config.grid_height)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Environment for World {
    fn sense(&self) -> Percept {
        self.sense_for(PRIMARY)
    }

    /// Remaining ticks; without an enforced deadline the budget never runs out
    fn deadline(&self) -> i64 {
        if self.config.enforce_deadline {
            self.cabs[PRIMARY].deadline
        } else {
            i64::MAX
        }
    }

    fn act(&mut self, action: Action) -> Reward {
        self.act_for(PRIMARY, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dummy_agents: usize) -> SimulationConfig {
        SimulationConfig {
            dummy_agents,
            seed: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_reset_picks_distant_destination() {
        let mut world = World::new(&config(3)).unwrap();
        for _ in 0..20 {
            let destination = world.reset().unwrap();
            let cab = world.primary();
            let distance = cab.location.manhattan(destination);
            assert!(distance >= MIN_TRIP_DISTANCE);
            assert_eq!(cab.deadline, i64::from(distance) * 5);
            assert_eq!(world.cabs().len(), 4);
            assert!(world.cabs()[1..].iter().all(|c| c.waypoint.is_some()));
        }
    }

    #[test]
    fn test_reset_fails_on_tiny_grid() {
        let config = SimulationConfig {
            grid_width: 2,
            grid_height: 2,
            dummy_agents: 0,
            ..config(0)
        };
        let mut world = World::new(&config).unwrap();
        assert!(matches!(world.reset(), Err(SmartcabError::Simulation(_))));
    }

    #[test]
    fn test_reset_on_narrow_grid_finds_only_trip() {
        let config = SimulationConfig {
            grid_width: 1,
            grid_height: 5,
            dummy_agents: 0,
            ..config(0)
        };
        let mut world = World::new(&config).unwrap();
        for _ in 0..10 {
            let destination = world.reset().unwrap();
            let start = world.primary().location;
            assert_eq!(start.manhattan(destination), 4);
        }
    }

    #[test]
    fn test_reset_on_large_grid_is_fast() {
        let config = SimulationConfig {
            grid_width: 300,
            grid_height: 300,
            ..config(3)
        };
        let mut world = World::new(&config).unwrap();

        let started = std::time::Instant::now();
        for _ in 0..20 {
            let destination = world.reset().unwrap();
            assert!(world.primary().location.manhattan(destination) >= MIN_TRIP_DISTANCE);
        }
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "20 resets took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn test_wraps_at_edges() {
        let world = World::new(&config(0)).unwrap();
        assert_eq!(world.wrap(Location::new(8, 3), Heading::EAST), Location::new(1, 3));
        assert_eq!(world.wrap(Location::new(1, 3), Heading::WEST), Location::new(8, 3));
        assert_eq!(world.wrap(Location::new(4, 1), Heading::NORTH), Location::new(4, 6));
        assert_eq!(world.wrap(Location::new(4, 6), Heading::SOUTH), Location::new(4, 1));
    }

    #[test]
    fn test_end_step_spends_deadline() {
        let mut world = World::new(&config(0)).unwrap();
        world.reset().unwrap();
        world.set_trip(Location::new(8, 6), 1);

        world.end_step();
        assert!(!world.is_done());
        assert_eq!(world.primary().deadline, 0);
        assert_eq!(world.tick(), 1);

        world.end_step();
        assert!(world.is_done());
    }

    #[test]
    fn test_hard_limit_ends_unenforced_trial() {
        let config = SimulationConfig {
            enforce_deadline: false,
            ..config(0)
        };
        let mut world = World::new(&config).unwrap();
        world.reset().unwrap();
        world.set_trip(Location::new(8, 6), -99);
        assert_eq!(world.deadline(), i64::MAX);

        world.end_step();
        assert!(!world.is_done());
        world.end_step();
        assert!(world.is_done());
    }
}
