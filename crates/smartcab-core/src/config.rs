//! Run configuration shared by the agent, the simulator and the CLI

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmartcabError};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartcabConfig {
    pub learning: LearningConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

impl SmartcabConfig {
    pub fn validate(&self) -> Result<()> {
        self.learning.validate()?;
        self.simulation.validate()
    }
}

/// Q-learning constants, fixed for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Exploration rate
    pub epsilon: f64,
    /// Value of any (state, action) pair that has never been written
    pub initial_q: f64,
    /// A step reward at or above this closes the trial as a success
    pub goal_reward: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.9,
            gamma: 0.1,
            epsilon: 0.0,
            initial_q: 1.0,
            goal_reward: 10.0,
        }
    }
}

impl LearningConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SmartcabError::Config(format!(
                    "learning.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if !self.initial_q.is_finite() {
            return Err(SmartcabError::Config(
                "learning.initial_q must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Grid world and trial runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub trials: usize,
    pub grid_width: i32,
    pub grid_height: i32,
    /// Scripted cars sharing the grid with the learner
    pub dummy_agents: usize,
    /// Close a trial once the deadline runs out
    pub enforce_deadline: bool,
    /// Ticks granted per unit of start-to-destination distance
    pub deadline_factor: i64,
    /// Trials are cut off at this deadline even when not enforced
    pub hard_time_limit: i64,
    /// Seed for every random draw of the run; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            grid_width: 8,
            grid_height: 6,
            dummy_agents: 3,
            enforce_deadline: true,
            deadline_factor: 5,
            hard_time_limit: -100,
            seed: None,
        }
    }
}

/// Longest side, in intersections, a simulated grid may have
pub const MAX_GRID_SIDE: i32 = 1024;

impl SimulationConfig {
    /// Number of intersections on the grid
    pub fn intersection_count(&self) -> Result<usize> {
        let side = |value: i32| {
            usize::try_from(value).map_err(|_| {
                SmartcabError::Config(format!("simulation grid side must be positive, got {value}"))
            })
        };
        side(self.grid_width)?
            .checked_mul(side(self.grid_height)?)
            .ok_or_else(|| {
                SmartcabError::Config(format!(
                    "simulation grid {}x{} is too large",
                    self.grid_width, self.grid_height
                ))
            })
    }

    pub fn validate(&self) -> Result<()> {
        let sides = 1..=MAX_GRID_SIDE;
        if !sides.contains(&self.grid_width) || !sides.contains(&self.grid_height) {
            return Err(SmartcabError::Config(format!(
                "simulation grid sides must be within 1..={MAX_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        let intersections = self.intersection_count()?;
        if self.dummy_agents >= intersections {
            return Err(SmartcabError::Config(format!(
                "simulation.dummy_agents ({}) must be below the number of intersections ({intersections})",
                self.dummy_agents
            )));
        }
        if self.deadline_factor < 1 {
            return Err(SmartcabError::Config(
                "simulation.deadline_factor must be positive".to_string(),
            ));
        }
        if self.hard_time_limit > 0 {
            return Err(SmartcabError::Config(
                "simulation.hard_time_limit must not be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
