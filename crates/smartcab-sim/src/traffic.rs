//! Traffic lights

use rand::seq::SliceRandom;
use rand::Rng;

use smartcab_core::{Heading, Reading};

/// Light periods, in ticks, a new intersection draws from
pub const LIGHT_PERIODS: [u64; 3] = [3, 4, 5];

/// Two-phase light at one intersection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficLight {
    /// `true` while north/south traffic has green
    north_south_open: bool,
    period: u64,
    last_updated: u64,
}

impl TrafficLight {
    pub fn new(north_south_open: bool, period: u64) -> Self {
        Self {
            north_south_open,
            period,
            last_updated: 0,
        }
    }

    /// Light with a random phase and period
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let period = LIGHT_PERIODS.choose(rng).copied().unwrap_or(LIGHT_PERIODS[0]);
        Self::new(rng.gen(), period)
    }

    pub fn reset(&mut self) {
        self.last_updated = 0;
    }

    /// Flip the phase once a full period has passed since the last flip
    pub fn update(&mut self, tick: u64) {
        if tick.saturating_sub(self.last_updated) >= self.period {
            self.north_south_open = !self.north_south_open;
            self.last_updated = tick;
        }
    }

    pub fn north_south_open(&self) -> bool {
        self.north_south_open
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// Light as seen by traffic travelling along `heading`
    pub fn facing(&self, heading: Heading) -> Reading {
        if self.north_south_open == heading.is_vertical() {
            Reading::Green
        } else {
            Reading::Red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_facing() {
        let light = TrafficLight::new(true, 3);
        assert_eq!(light.facing(Heading::NORTH), Reading::Green);
        assert_eq!(light.facing(Heading::SOUTH), Reading::Green);
        assert_eq!(light.facing(Heading::EAST), Reading::Red);

        let light = TrafficLight::new(false, 3);
        assert_eq!(light.facing(Heading::WEST), Reading::Green);
        assert_eq!(light.facing(Heading::NORTH), Reading::Red);
    }

    #[test]
    fn test_flips_after_period() {
        let mut light = TrafficLight::new(true, 3);
        light.update(1);
        light.update(2);
        assert!(light.north_south_open());
        light.update(3);
        assert!(!light.north_south_open());
        light.update(5);
        assert!(!light.north_south_open());
        light.update(6);
        assert!(light.north_south_open());
    }

    #[test]
    fn test_reset_restarts_period() {
        let mut light = TrafficLight::new(false, 4);
        light.update(4);
        assert!(light.north_south_open());
        light.reset();
        light.update(3);
        assert!(light.north_south_open());
        light.update(4);
        assert!(!light.north_south_open());
    }

    #[test]
    fn test_random_period_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let light = TrafficLight::random(&mut rng);
            assert!(LIGHT_PERIODS.contains(&light.period()));
        }
    }
}
