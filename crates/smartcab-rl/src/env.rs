//! Collaborator interfaces the agent drives against

use smartcab_core::{Action, Location, Percept, Reward, RoutingHint};

/// The world as seen by the learning cab
pub trait Environment {
    /// What the cab senses at its current intersection
    fn sense(&self) -> Percept;

    /// Ticks remaining in the trial; zero means the time budget is spent
    fn deadline(&self) -> i64;

    /// Carry out `action` and return the reward it earned
    fn act(&mut self, action: Action) -> Reward;
}

/// Route planner proposing the next move toward a destination
pub trait Router {
    /// World the planner reads the cab's position from
    type Env: ?Sized;

    /// Start planning toward `destination`; called on every trial reset
    fn route_to(&mut self, destination: Location);

    /// Suggested next move given where the cab stands in `env`
    fn next_waypoint(&self, env: &Self::Env) -> RoutingHint;
}
