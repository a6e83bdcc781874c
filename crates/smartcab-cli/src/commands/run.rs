//! Training run

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use smartcab_core::SmartcabConfig;
use smartcab_sim::Simulator;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Number of trials (overrides simulation.trials)
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Seed for a reproducible run (overrides simulation.seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Exploration rate in [0, 1] (overrides learning.epsilon)
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Keep trials going past the deadline, up to the hard time limit
    #[arg(long)]
    no_deadline: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    /// Apply command-line overrides to the loaded configuration
    fn apply(&self, config: &mut SmartcabConfig) {
        if let Some(trials) = self.trials {
            config.simulation.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(epsilon) = self.epsilon {
            config.learning.epsilon = epsilon;
        }
        if self.no_deadline {
            config.simulation.enforce_deadline = false;
        }
    }
}

pub fn run(args: &RunArgs, mut config: SmartcabConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let trials = config.simulation.trials;
    info!(
        trials,
        seed = ?config.simulation.seed,
        epsilon = config.learning.epsilon,
        "Starting training run"
    );

    let mut simulator = Simulator::from_config(&config)?;
    let summary = simulator.run(trials)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", simulator.agent().status());
        println!(
            "Table entries: {} across {} states",
            simulator.agent().table().len(),
            simulator.agent().table().state_count()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = RunArgs {
            trials: Some(3),
            seed: Some(11),
            epsilon: Some(0.25),
            no_deadline: true,
            json: false,
        };
        let mut config = SmartcabConfig::default();

        args.apply(&mut config);

        assert_eq!(config.simulation.trials, 3);
        assert_eq!(config.simulation.seed, Some(11));
        assert_eq!(config.learning.epsilon, 0.25);
        assert!(!config.simulation.enforce_deadline);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = SmartcabConfig::default();
        config.simulation.trials = 40;

        RunArgs::default().apply(&mut config);

        assert_eq!(config, {
            let mut expected = SmartcabConfig::default();
            expected.simulation.trials = 40;
            expected
        });
    }

    #[test]
    fn test_out_of_range_epsilon_fails() {
        let args = RunArgs {
            epsilon: Some(3.0),
            ..Default::default()
        };
        assert!(run(&args, SmartcabConfig::default()).is_err());
    }

    #[test]
    fn test_short_seeded_run() {
        let args = RunArgs {
            trials: Some(2),
            seed: Some(1),
            ..Default::default()
        };
        assert!(run(&args, SmartcabConfig::default()).is_ok());
    }
}
