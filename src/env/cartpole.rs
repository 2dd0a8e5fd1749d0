//! CartPole classic control environment
//!
//! A pole is hinged to a cart on a frictionless track; the agent pushes the
//! cart left or right to keep the pole upright. The episode ends when the
//! pole tips past 12 degrees, the cart leaves the track, or a step limit is
//! reached.
//!
//! Observation: `[cart_position, cart_velocity, pole_angle, pole_angular_velocity]`.
//! Actions: `0` pushes left, `1` pushes right. Every step yields reward 1.0,
//! including the terminating one.

use super::{Environment, StepResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

const GRAVITY: f32 = 9.8;
const MASS_CART: f32 = 1.0;
const MASS_POLE: f32 = 0.1;
const TOTAL_MASS: f32 = MASS_CART + MASS_POLE;
/// Half the pole length
const LENGTH: f32 = 0.5;
const POLE_MASS_LENGTH: f32 = MASS_POLE * LENGTH;
const FORCE_MAG: f32 = 10.0;
/// Integration timestep in seconds
const TAU: f32 = 0.02;
/// Failure angle: 12 degrees
const THETA_THRESHOLD: f32 = 12.0 * 2.0 * PI / 360.0;
const X_THRESHOLD: f32 = 2.4;

/// CartPole environment with seeded resets
///
/// State evolves under Euler integration of the standard cart-pole dynamics.
/// Each instance owns its RNG so parallel copies produce independent,
/// reproducible initial states.
#[derive(Debug)]
pub struct CartPole {
    /// `[x, x_dot, theta, theta_dot]`
    state: [f32; 4],
    steps: u32,
    max_steps: u32,
    rng: StdRng,
}

impl CartPole {
    /// Create a new CartPole with the given episode step limit and RNG seed
    pub fn new(max_steps: u32, seed: u64) -> Self {
        Self {
            state: [0.0; 4],
            steps: 0,
            max_steps,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Episode step limit for this instance
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    fn is_failure(&self) -> bool {
        let x = self.state[0];
        let theta = self.state[2];
        x.abs() > X_THRESHOLD || theta.abs() > THETA_THRESHOLD
    }
}

impl Environment for CartPole {
    fn reset(&mut self) -> Vec<f32> {
        for component in &mut self.state {
            *component = self.rng.gen::<f32>() * 0.1 - 0.05;
        }
        self.steps = 0;
        self.state.to_vec()
    }

    fn step(&mut self, action: usize) -> StepResult {
        debug_assert!(action < 2, "invalid CartPole action: {action}");

        let [x, x_dot, theta, theta_dot] = self.state;
        let force = if action == 1 { FORCE_MAG } else { -FORCE_MAG };

        let cos_theta = theta.cos();
        let sin_theta = theta.sin();

        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin_theta - cos_theta * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos_theta * cos_theta / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos_theta / TOTAL_MASS;

        // Euler integration
        self.state[0] = x + TAU * x_dot;
        self.state[1] = x_dot + TAU * x_acc;
        self.state[2] = theta + TAU * theta_dot;
        self.state[3] = theta_dot + TAU * theta_acc;

        self.steps += 1;

        let terminated = self.is_failure();
        let truncated = self.steps >= self.max_steps;

        StepResult {
            observation: self.state.to_vec(),
            reward: 1.0,
            done: terminated || truncated,
        }
    }

    fn observation_dim(&self) -> usize {
        4
    }

    fn action_count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_range() {
        let mut env = CartPole::new(500, 42);
        let obs = env.reset();

        assert_eq!(obs.len(), 4);
        for component in obs {
            assert!(component.abs() <= 0.05);
        }
    }

    #[test]
    fn test_step_shapes_and_reward() {
        let mut env = CartPole::new(500, 42);
        env.reset();

        let result = env.step(1);
        assert_eq!(result.observation.len(), 4);
        assert_eq!(result.reward, 1.0);
        assert!(!result.done);
    }

    #[test]
    fn test_determinism_with_same_seed() {
        let mut env1 = CartPole::new(500, 7);
        let mut env2 = CartPole::new(500, 7);

        assert_eq!(env1.reset(), env2.reset());
        for _ in 0..20 {
            let r1 = env1.step(1);
            let r2 = env2.step(1);
            assert_eq!(r1.observation, r2.observation);
            assert_eq!(r1.done, r2.done);
        }
    }

    #[test]
    fn test_constant_push_eventually_fails() {
        let mut env = CartPole::new(500, 3);
        env.reset();

        // Always pushing one way tips the pole well before the step limit.
        let mut done = false;
        let mut steps = 0;
        while !done && steps < 500 {
            done = env.step(1).done;
            steps += 1;
        }
        assert!(done);
        assert!(steps < 200);
    }

    #[test]
    fn test_truncation_at_step_limit() {
        let mut env = CartPole::new(3, 42);
        env.reset();

        // Pin the state upright before each step so only the limit can end it.
        env.state = [0.0; 4];
        env.step(0);
        env.state = [0.0; 4];
        env.step(1);
        env.state = [0.0; 4];
        let result = env.step(0);

        assert!(result.done);
        assert_eq!(result.reward, 1.0);
    }

    #[test]
    fn test_space_queries() {
        let env = CartPole::new(500, 0);
        assert_eq!(env.observation_dim(), 4);
        assert_eq!(env.action_count(), 2);
    }

    #[test]
    fn test_reset_after_episode() {
        let mut env = CartPole::new(500, 11);
        env.reset();
        env.state = [3.0, 0.0, 0.0, 0.0]; // off the track

        let result = env.step(0);
        assert!(result.done);

        let obs = env.reset();
        for component in obs {
            assert!(component.abs() <= 0.05);
        }
    }
}
