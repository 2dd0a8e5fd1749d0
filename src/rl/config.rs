//! A2C algorithm hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the A2C (Advantage Actor-Critic) algorithm
///
/// Contains all hyperparameters used by the training loop. Defaults match
/// the CartPole experiment this crate reproduces.
///
/// # Example
///
/// ```rust
/// use ml_cartpole::rl::A2CConfig;
///
/// // Use default hyperparameters
/// let config = A2CConfig::default();
///
/// // Or customize specific parameters
/// let config = A2CConfig {
///     learning_rate: 1e-3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2CConfig {
    /// Learning rate for the Adam optimizer
    ///
    /// Default: 3e-3
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.95
    pub gamma: f32,

    /// Coefficient for the entropy regularizer in the loss
    ///
    /// Higher values push the policy toward a flatter, more exploratory
    /// action distribution.
    ///
    /// Default: 0.01
    pub entropy_beta: f32,

    /// Maximum gradient norm for gradient clipping
    ///
    /// Default: 0.1
    pub max_grad_norm: f32,

    /// Number of parallel environment copies stepped each iteration
    ///
    /// Default: 40
    pub num_envs: usize,

    /// Environment transitions collected per environment per iteration
    ///
    /// With the default budget of 1 the bootstrap path runs on nearly every
    /// collection call, so advantage estimation is effectively 1-step; raise
    /// the budget for true n-step returns.
    ///
    /// Default: 1
    pub step_budget: usize,

    /// Width of the network's shared hidden layer
    ///
    /// Default: 64
    pub hidden_dim: usize,

    /// Number of training iterations to run
    ///
    /// Default: 100_000
    pub max_iterations: usize,
}

impl A2CConfig {
    /// Create a new configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are in range, `Err(String)` otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ml_cartpole::rl::A2CConfig;
    ///
    /// let mut config = A2CConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.gamma = 1.5;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if self.entropy_beta < 0.0 {
            return Err(format!(
                "entropy_beta must be non-negative, got {}",
                self.entropy_beta
            ));
        }

        if self.max_grad_norm <= 0.0 {
            return Err(format!(
                "max_grad_norm must be positive, got {}",
                self.max_grad_norm
            ));
        }

        if self.num_envs == 0 {
            return Err("num_envs must be at least 1".to_string());
        }

        if self.step_budget == 0 {
            return Err("step_budget must be at least 1".to_string());
        }

        if self.hidden_dim == 0 {
            return Err("hidden_dim must be at least 1".to_string());
        }

        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for A2CConfig {
    fn default() -> Self {
        Self {
            learning_rate: 3e-3,
            gamma: 0.95,
            entropy_beta: 0.01,
            max_grad_norm: 0.1,
            num_envs: 40,
            step_budget: 1,
            hidden_dim: 64,
            max_iterations: 100_000,
        }
    }
}
