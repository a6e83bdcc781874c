//! Trial runner

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use smartcab_core::{Reward, SmartcabConfig};
use smartcab_rl::{LearningAgent, RandomSource, StdRandom, TrialObserver, TrialSummary};

use crate::planner::RoutePlanner;
use crate::world::World;

/// How one trial went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    pub trial: usize,
    pub ticks: u64,
    pub reached: bool,
    /// Learner's remaining budget when the trial ended
    pub deadline_left: i64,
    pub net_reward: Reward,
}

/// Runs a learning agent through consecutive trials of one world
pub struct Simulator<R = StdRandom> {
    world: World,
    agent: LearningAgent<RoutePlanner, R>,
    trials_run: usize,
    status: String,
}

impl Simulator<StdRandom> {
    /// Build the world and agent from a full configuration.
    ///
    /// With a seed, the world draws from `seed` and the agent from `seed + 1`
    /// so a run replays exactly.
    pub fn from_config(config: &SmartcabConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let world = World::new(&config.simulation).context("Failed to build world")?;
        let rng = StdRandom::from_seed(config.simulation.seed.map(|s| s.wrapping_add(1)));
        let agent = LearningAgent::new(&config.learning, RoutePlanner::new(), rng)
            .context("Failed to create learning agent")?;

        Ok(Self::new(world, agent))
    }
}

impl<R: RandomSource> Simulator<R> {
    pub fn new(world: World, agent: LearningAgent<RoutePlanner, R>) -> Self {
        Self {
            world,
            agent,
            trials_run: 0,
            status: String::new(),
        }
    }

    /// Replace the observer notified when the agent closes a trial
    pub fn with_observer(mut self, observer: impl TrialObserver + 'static) -> Self {
        self.agent = self.agent.with_observer(observer);
        self
    }

    /// Reset world and agent, then tick until the world reports done
    pub fn run_trial(&mut self) -> Result<TrialReport> {
        let destination = self
            .world
            .reset()
            .with_context(|| format!("Failed to reset trial {}", self.trials_run + 1))?;
        self.agent.reset(destination);

        let mut net_reward = 0.0;
        while !self.world.is_done() {
            let tick = self.world.begin_step();
            net_reward += self.agent.update(&mut self.world, tick).reward;
            self.world.end_step();

            self.status = format!("{}\n{}", self.world.status(), self.agent.status());
            debug!(tick, status = %self.status, "Tick");
        }

        self.trials_run += 1;
        let report = TrialReport {
            trial: self.trials_run,
            ticks: self.world.tick(),
            reached: self.world.reached_destination(),
            deadline_left: self.world.primary().deadline,
            net_reward,
        };

        info!(
            trial = report.trial,
            ticks = report.ticks,
            reached = report.reached,
            net_reward = report.net_reward,
            "Trial finished"
        );
        Ok(report)
    }

    /// Run `n_trials` trials and return the agent's cumulative statistics
    pub fn run(&mut self, n_trials: usize) -> Result<TrialSummary> {
        info!(n_trials, "Starting simulation");

        for _ in 0..n_trials {
            self.run_trial()?;
        }

        let summary = self.agent.stats().summary();
        self.agent.log_progress();
        info!(
            attempts = summary.attempts,
            successes = summary.successes,
            success_rate = summary.success_rate,
            penalty_rate = summary.penalty_rate,
            net_reward = summary.net_reward,
            "Simulation complete"
        );
        Ok(summary)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn agent(&self) -> &LearningAgent<RoutePlanner, R> {
        &self.agent
    }

    /// Last tick as seen by the world, followed by the agent's statistics
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn trials_run(&self) -> usize {
        self.trials_run
    }
}
