//! Simulated environments for reinforcement learning
//!
//! Provides the environment contract used by the training loop (reset/step
//! plus action-space and observation-space queries) and a small registry
//! that constructs environments from string identifiers.

pub mod cartpole;

pub use cartpole::CartPole;

use anyhow::{bail, Result};

/// Result of advancing an environment by one action
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Observation after the transition
    pub observation: Vec<f32>,

    /// Raw reward for the transition
    pub reward: f32,

    /// Whether the episode ended (failure or step-limit truncation)
    pub done: bool,
}

/// Contract every simulated environment implements
///
/// Observations are flat `f32` vectors of a fixed dimension; actions are
/// indices into a discrete action space.
pub trait Environment {
    /// Reset to a fresh initial state and return the initial observation
    fn reset(&mut self) -> Vec<f32>;

    /// Advance by one action
    fn step(&mut self, action: usize) -> StepResult;

    /// Dimension of the observation vector
    fn observation_dim(&self) -> usize;

    /// Number of discrete actions
    fn action_count(&self) -> usize;
}

/// Construct an environment from its identifier
///
/// An unknown identifier is a fatal configuration error.
///
/// # Example
///
/// ```rust
/// use ml_cartpole::env;
///
/// let env = env::make("CartPole-v1", 0).unwrap();
/// assert!(env::make("MountainCar-v0", 0).is_err());
/// ```
pub fn make(id: &str, seed: u64) -> Result<CartPole> {
    match id {
        "CartPole-v0" => Ok(CartPole::new(200, seed)),
        "CartPole-v1" => Ok(CartPole::new(500, seed)),
        _ => bail!("unknown environment identifier: {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_known_ids() {
        assert!(make("CartPole-v0", 0).is_ok());
        assert!(make("CartPole-v1", 0).is_ok());
    }

    #[test]
    fn test_make_unknown_id_fails() {
        let err = make("Pong-v4", 0).unwrap_err();
        assert!(err.to_string().contains("Pong-v4"));
    }

    #[test]
    fn test_version_step_limits() {
        let v0 = make("CartPole-v0", 0).unwrap();
        let v1 = make("CartPole-v1", 0).unwrap();
        assert_eq!(v0.max_steps(), 200);
        assert_eq!(v1.max_steps(), 500);
    }
}
