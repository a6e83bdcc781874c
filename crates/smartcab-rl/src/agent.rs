//! Learning agent - ties encoding, selection, learning and statistics together

use serde::Serialize;
use tracing::{debug, info};

use smartcab_core::{Action, LearningConfig, Location, Reward, Result};

use crate::env::{Environment, Router};
use crate::experience::Transition;
use crate::learner::QLearner;
use crate::policy::EpsilonGreedy;
use crate::random::{RandomSource, StdRandom};
use crate::state::StateKey;
use crate::stats::{TracingObserver, TrialObserver, TrialStats};
use crate::table::ValueTable;

/// Tabular Q-learning cab.
///
/// The agent owns its router and its value table for the whole run. Call
/// [`LearningAgent::reset`] at the start of every trial and
/// [`LearningAgent::update`] once per simulated tick.
pub struct LearningAgent<P, R = StdRandom> {
    router: P,
    rng: R,
    table: ValueTable,
    policy: EpsilonGreedy,
    learner: QLearner,
    goal_reward: Reward,
    previous: Option<Transition>,
    stats: TrialStats,
    observer: Box<dyn TrialObserver>,
    status: String,
}

/// What happened during one call to [`LearningAgent::update`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub tick: u64,
    pub state: StateKey,
    pub action: Action,
    pub reward: Reward,
    pub deadline: i64,
    /// Value written for the previous transition, if any
    pub updated_value: Option<f64>,
    /// `Some(success)` when this step closed the trial
    pub trial_closed: Option<bool>,
}

impl<P, R> LearningAgent<P, R>
where
    R: RandomSource,
{
    /// Create an agent with the given learning constants
    pub fn new(config: &LearningConfig, router: P, rng: R) -> Result<Self> {
        config.validate()?;

        let stats = TrialStats::new();
        let status = stats.summary().to_string();

        Ok(Self {
            router,
            rng,
            table: ValueTable::new(config.initial_q),
            policy: EpsilonGreedy::new(config.epsilon),
            learner: QLearner::new(config.alpha, config.gamma),
            goal_reward: config.goal_reward,
            previous: None,
            stats,
            observer: Box::new(TracingObserver),
            status,
        })
    }

    /// Replace the observer notified when a trial closes
    pub fn with_observer(mut self, observer: impl TrialObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Prepare for a new trip toward `destination`
    pub fn reset(&mut self, destination: Location)
    where
        P: Router,
    {
        self.router.route_to(destination);
        self.previous = None;
    }

    /// Run one decision step against `env`.
    ///
    /// The action for the current state is chosen and executed first; the
    /// reward it earns is retained and only learned from on the next step,
    /// once the value of the state it led to is known.
    pub fn update<E>(&mut self, env: &mut E, tick: u64) -> StepOutcome
    where
        E: Environment + ?Sized,
        P: Router<Env = E>,
    {
        let hint = self.router.next_waypoint(env);
        let percept = env.sense();
        let deadline = env.deadline();

        let state = StateKey::encode(&percept, hint);
        let (_, action) = self.policy.select(&self.table, &state, &mut self.rng);

        let reward = env.act(action);

        let best_next = EpsilonGreedy::best_value(&self.table, &state);
        let updated_value = self
            .learner
            .update(&mut self.table, self.previous.as_ref(), best_next);

        self.previous = Some(Transition::new(state.clone(), action, reward));

        self.stats.record_step(reward);
        let reached_goal = reward >= self.goal_reward;
        let trial_closed = if deadline == 0 || reached_goal {
            self.stats.record_trial_outcome(reached_goal);
            Some(reached_goal)
        } else {
            None
        };

        let summary = self.stats.summary();
        if let Some(success) = trial_closed {
            self.observer.on_trial_closed(success, &summary);
        }
        self.status = summary.to_string();

        debug!(
            tick,
            deadline,
            percept = %percept,
            action = %action,
            reward,
            "Decision step"
        );

        StepOutcome {
            tick,
            state,
            action,
            reward,
            deadline,
            updated_value,
            trial_closed,
        }
    }
}

impl<P, R> LearningAgent<P, R> {
    /// Human-readable statistics for display
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn stats(&self) -> &TrialStats {
        &self.stats
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn router(&self) -> &P {
        &self.router
    }

    /// Transition retained for the next update
    pub fn previous(&self) -> Option<&Transition> {
        self.previous.as_ref()
    }

    /// Log where the run stands
    pub fn log_progress(&self) {
        let summary = self.stats.summary();
        info!(
            attempts = summary.attempts,
            successes = summary.successes,
            penalty_rate = summary.penalty_rate,
            table_entries = self.table.len(),
            "Learning progress"
        );
    }
}
