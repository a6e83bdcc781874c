//! Learning progress across trials

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use smartcab_core::Reward;

/// Counters spanning every trial of a run; never reset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialStats {
    pub attempts: u64,
    pub successes: u64,
    pub penalties: u64,
    pub moves: u64,
    pub net_reward: Reward,
}

impl TrialStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one decision step
    pub fn record_step(&mut self, reward: Reward) {
        self.moves += 1;
        if reward < 0.0 {
            self.penalties += 1;
        }
        self.net_reward += reward;
    }

    /// Account for a closed trial
    pub fn record_trial_outcome(&mut self, success: bool) {
        self.attempts += 1;
        if success {
            self.successes += 1;
        }
    }

    /// Successes per attempt, two decimals; zero before any attempt
    pub fn success_rate(&self) -> f64 {
        rate(self.successes, self.attempts)
    }

    /// Penalised steps per step, two decimals; zero before any step
    pub fn penalty_rate(&self) -> f64 {
        rate(self.penalties, self.moves)
    }

    pub fn summary(&self) -> TrialSummary {
        TrialSummary {
            successes: self.successes,
            attempts: self.attempts,
            success_rate: self.success_rate(),
            penalties: self.penalties,
            moves: self.moves,
            penalty_rate: self.penalty_rate(),
            net_reward: self.net_reward,
        }
    }
}

fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64 * 100.0).round() / 100.0
}

/// Point-in-time report of [`TrialStats`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub successes: u64,
    pub attempts: u64,
    pub success_rate: f64,
    pub penalties: u64,
    pub moves: u64,
    pub penalty_rate: f64,
    pub net_reward: Reward,
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The success rate is: {}/{} ({})",
            self.successes, self.attempts, self.success_rate
        )?;
        writeln!(
            f,
            "The penalty rate is: {}/{} ({})",
            self.penalties, self.moves, self.penalty_rate
        )?;
        write!(f, "The net reward is: {}", self.net_reward)
    }
}

/// Hook invoked whenever a trial closes
pub trait TrialObserver {
    fn on_trial_closed(&mut self, success: bool, summary: &TrialSummary);
}

impl<F> TrialObserver for F
where
    F: FnMut(bool, &TrialSummary),
{
    fn on_trial_closed(&mut self, success: bool, summary: &TrialSummary) {
        self(success, summary);
    }
}

/// Default observer: one structured log line per closed trial
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TrialObserver for TracingObserver {
    fn on_trial_closed(&mut self, success: bool, summary: &TrialSummary) {
        info!(
            success,
            attempts = summary.attempts,
            success_rate = summary.success_rate,
            penalty_rate = summary.penalty_rate,
            net_reward = summary.net_reward,
            "Trial closed"
        );
    }
}
