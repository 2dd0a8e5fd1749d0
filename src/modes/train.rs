//! Training mode for the A2C agent
//!
//! This module implements the synchronous A2C training loop. Each iteration
//! collects a short trajectory segment from every environment copy in turn,
//! concatenates the segments into one batch, and performs a single gradient
//! update. Progress is logged periodically and checkpoints are saved along
//! the way.
//!
//! # Example
//!
//! ```rust,ignore
//! use ml_cartpole::modes::{TrainMode, TrainConfig};
//! use ml_cartpole::rl::{default_device, A2CConfig, TrainingBackend};
//! use std::path::PathBuf;
//!
//! let train_config = TrainConfig {
//!     env_id: "CartPole-v0".to_string(),
//!     seed: 0,
//!     save_path: PathBuf::from("models/cartpole.mpk"),
//!     checkpoint_frequency: 1000,
//!     log_frequency: 100,
//!     a2c_config: A2CConfig::default(),
//! };
//!
//! let device = default_device();
//! let mut train_mode = TrainMode::<TrainingBackend>::new(train_config, device)?;
//! train_mode.run()?;
//! ```

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use std::path::{Path, PathBuf};

use crate::env::{self, CartPole, Environment};
use crate::metrics::TrainingStats;
use crate::rl::{save_model, A2CAgent, A2CConfig, ActorCriticConfig, EnvRunner};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Environment identifier ("CartPole-v0" or "CartPole-v1")
    pub env_id: String,

    /// Base seed; each environment and action sampler derives its own
    /// stream from it
    pub seed: u64,

    /// Path to save the final trained model
    pub save_path: PathBuf,

    /// Save a checkpoint every N iterations
    pub checkpoint_frequency: usize,

    /// Log training progress every N iterations
    pub log_frequency: usize,

    /// A2C hyperparameters
    pub a2c_config: A2CConfig,
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    ///
    /// # Arguments
    ///
    /// * `env_id` - Environment identifier
    /// * `save_path` - Path to save the final model
    ///
    /// # Example
    ///
    /// ```rust
    /// use ml_cartpole::modes::TrainConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = TrainConfig::new("CartPole-v0", PathBuf::from("models/cartpole.mpk"));
    /// ```
    pub fn new(env_id: &str, save_path: PathBuf) -> Self {
        Self {
            env_id: env_id.to_string(),
            seed: 0,
            save_path,
            checkpoint_frequency: 1000,
            log_frequency: 100,
            a2c_config: A2CConfig::default(),
        }
    }
}

/// Training mode for the A2C agent
///
/// Runs the synchronous training loop: collect from every environment copy,
/// update once, repeat. Periodically logs progress and saves checkpoints.
pub struct TrainMode<B: AutodiffBackend> {
    /// A2C agent being trained
    agent: A2CAgent<B>,

    /// One runner per parallel environment copy
    runners: Vec<EnvRunner<CartPole>>,

    /// Training statistics tracker
    stats: TrainingStats,

    /// Training configuration
    config: TrainConfig,
}

impl<B: AutodiffBackend> TrainMode<B> {
    /// Create a new training mode
    ///
    /// Builds `num_envs` environment copies from the configured identifier,
    /// each with its own derived seed, and initializes the agent from the
    /// first environment's space dimensions.
    ///
    /// # Errors
    ///
    /// Fails if the environment identifier is unknown.
    pub fn new(config: TrainConfig, device: B::Device) -> Result<Self> {
        // One environment and one sampler stream per runner, all derived
        // from the base seed without overlap.
        let mut runners = Vec::with_capacity(config.a2c_config.num_envs);
        for i in 0..config.a2c_config.num_envs {
            let env_seed = config.seed + 2 * i as u64;
            let sampler_seed = config.seed + 2 * i as u64 + 1;
            let env = env::make(&config.env_id, env_seed)
                .with_context(|| format!("Failed to create environment {}", i))?;
            runners.push(EnvRunner::new(env, sampler_seed));
        }

        let probe = env::make(&config.env_id, config.seed)?;
        let observation_dim = probe.observation_dim();
        let num_actions = probe.action_count();

        // Initialize network and agent
        let network_config = ActorCriticConfig {
            hidden_dim: config.a2c_config.hidden_dim,
            ..ActorCriticConfig::new(observation_dim, num_actions)
        };
        let network = network_config.init::<B>(&device);
        let agent = A2CAgent::new(
            network,
            config.a2c_config.clone(),
            observation_dim,
            num_actions,
            device,
        );

        // Stats tracker (100-iteration rolling window)
        let stats = TrainingStats::new(100);

        Ok(Self {
            agent,
            runners,
            stats,
            config,
        })
    }

    /// Run the training loop
    ///
    /// Trains the agent for the configured number of iterations, logging
    /// progress and saving checkpoints periodically.
    ///
    /// # Returns
    ///
    /// `Ok(())` on successful completion
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        let max_iterations = self.config.a2c_config.max_iterations;
        for iteration in 0..max_iterations {
            let report = self.run_iteration()?;

            self.stats.record_update(
                report.policy_loss,
                report.value_loss,
                report.entropy,
                report.mean_advantage,
            );

            // Log progress
            if (iteration + 1) % self.config.log_frequency == 0 {
                self.print_progress(iteration + 1);
            }

            // Save checkpoint
            if (iteration + 1) % self.config.checkpoint_frequency == 0 {
                self.save_checkpoint(iteration + 1)?;
            }
        }

        // Final save
        self.save_model()?;

        println!("\nTraining complete!");
        println!("Final model saved to: {:?}", self.config.save_path);
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run one training iteration
    ///
    /// Collects a trajectory segment from every environment copy in order,
    /// concatenates the segments into one batch, and performs a single A2C
    /// update over it.
    fn run_iteration(&mut self) -> Result<crate::rl::LossReport> {
        let step_budget = self.config.a2c_config.step_budget;
        let gamma = self.config.a2c_config.gamma;

        let mut batch = Vec::with_capacity(self.runners.len() * step_budget);
        {
            // The agent is read-only during collection; only the runners
            // mutate.
            let (agent, runners) = (&self.agent, &mut self.runners);
            for runner in runners.iter_mut() {
                let segment = runner.collect(agent, step_budget, gamma)?;
                batch.extend(segment);
            }
        }

        let collected = batch.len();
        let report = self.agent.learn(&batch);

        // Average of each environment's most recently completed episode.
        let mean_return = self
            .runners
            .iter()
            .map(|r| r.last_episode_return())
            .sum::<f32>()
            / self.runners.len() as f32;
        self.stats.record_iteration(mean_return, collected);

        Ok(report)
    }

    /// Save a checkpoint of the current model
    fn save_checkpoint(&self, iteration: usize) -> Result<()> {
        let checkpoint_path = self
            .config
            .save_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(format!("checkpoint_it{}.mpk", iteration));

        save_model(&self.agent, &checkpoint_path)
            .with_context(|| format!("Failed to save checkpoint to {:?}", checkpoint_path))?;

        println!("  Checkpoint saved: {:?}", checkpoint_path);

        Ok(())
    }

    /// Save the final trained model
    fn save_model(&self) -> Result<()> {
        save_model(&self.agent, &self.config.save_path).with_context(|| {
            format!(
                "Failed to save final model to {:?}",
                self.config.save_path
            )
        })?;

        Ok(())
    }

    /// Print training header information
    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("A2C Training - {}", self.config.env_id);
        println!("{}", "=".repeat(70));
        println!("Iterations: {}", self.config.a2c_config.max_iterations);
        println!("Seed: {}", self.config.seed);
        println!("A2C Config:");
        println!(
            "  Learning rate: {}",
            self.config.a2c_config.learning_rate
        );
        println!("  Gamma: {}", self.config.a2c_config.gamma);
        println!("  Entropy beta: {}", self.config.a2c_config.entropy_beta);
        println!(
            "  Max grad norm: {}",
            self.config.a2c_config.max_grad_norm
        );
        println!("  Environments: {}", self.config.a2c_config.num_envs);
        println!(
            "  Step budget: {} per environment",
            self.config.a2c_config.step_budget
        );
        println!("  Hidden dim: {}", self.config.a2c_config.hidden_dim);
        println!(
            "Checkpoints: Every {} iterations",
            self.config.checkpoint_frequency
        );
        println!("Logging: Every {} iterations", self.config.log_frequency);
        println!("Save path: {:?}", self.config.save_path);
        println!("{}", "=".repeat(70));
        println!();
    }

    /// Print training progress
    fn print_progress(&self, iteration: usize) {
        println!(
            "[Iteration {}/{}] {}",
            iteration,
            self.config.a2c_config.max_iterations,
            self.stats.format_summary()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{default_device, TrainingBackend};
    use tempfile::TempDir;

    #[test]
    fn test_train_config_creation() {
        let config = TrainConfig::new("CartPole-v0", PathBuf::from("test.mpk"));
        assert_eq!(config.env_id, "CartPole-v0");
        assert_eq!(config.save_path, PathBuf::from("test.mpk"));
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_train_mode_creation() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("model.mpk");

        let mut config = TrainConfig::new("CartPole-v0", save_path);
        config.a2c_config.num_envs = 4; // Small for test

        let device = default_device();
        let train_mode = TrainMode::<TrainingBackend>::new(config, device);
        assert!(train_mode.is_ok());
    }

    #[test]
    fn test_unknown_environment_fails() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("model.mpk");

        let config = TrainConfig::new("MountainCar-v0", save_path);
        let device = default_device();

        assert!(TrainMode::<TrainingBackend>::new(config, device).is_err());
    }

    #[test]
    fn test_run_single_iteration() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("model.mpk");

        let mut config = TrainConfig::new("CartPole-v0", save_path);
        config.a2c_config.num_envs = 4;

        let device = default_device();
        let mut train_mode = TrainMode::<TrainingBackend>::new(config, device).unwrap();

        let report = train_mode.run_iteration().unwrap();
        assert!(report.total_loss.is_finite());
        // Default step budget of 1: one transition per environment.
        assert_eq!(train_mode.stats.total_steps(), 4);
    }

    #[test]
    fn test_run_short_training() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("model.mpk");

        let mut config = TrainConfig::new("CartPole-v0", save_path.clone());
        config.a2c_config.num_envs = 2;
        config.a2c_config.max_iterations = 5;
        config.checkpoint_frequency = 1000; // No checkpoints during test
        config.log_frequency = 1000;

        let device = default_device();
        let mut train_mode = TrainMode::<TrainingBackend>::new(config, device).unwrap();

        train_mode.run().unwrap();
        assert!(save_path.with_extension("meta.json").exists());
        assert_eq!(train_mode.agent.training_step(), 5);
    }
}
