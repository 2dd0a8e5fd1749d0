//! Per-environment stepping wrapper
//!
//! An [`EnvRunner`] owns one environment copy plus the bookkeeping that
//! spans training iterations: the current observation, the in-progress
//! episode's return, the last completed episode's return, and the bootstrap
//! value carried into return discounting. The training loop holds one
//! runner per parallel environment and steps them sequentially.

use super::memory::{discount, Transition};
use crate::env::Environment;
use anyhow::{Context, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Policy seam between the runner and the model
///
/// Maps an observation to an action-preference vector (unnormalized logits)
/// and a state-value estimate. Implementations must not track gradients;
/// the runner only reads the policy.
pub trait Policy {
    fn evaluate(&self, observation: &[f32]) -> (Vec<f32>, f32);
}

/// One environment copy and its cross-iteration state
///
/// Episodes may span many training iterations (with the default step budget
/// of 1 they always do), so the runner persists its observation and return
/// accumulator between [`collect`](EnvRunner::collect) calls. Action
/// sampling uses the runner's own seeded RNG rather than ambient global
/// random state.
pub struct EnvRunner<E: Environment> {
    env: E,

    /// Observation the next action will be chosen from
    observation: Vec<f32>,

    /// Return accumulated over the in-progress episode
    episode_return: f32,

    /// Total return of the last completed episode; sticky until the next
    /// episode finishes
    last_episode_return: f32,

    /// Critic value carried into discounting when a segment is truncated;
    /// 0.0 after a termination
    bootstrap_value: f32,

    rng: StdRng,
}

impl<E: Environment> EnvRunner<E> {
    /// Create a runner around a fresh environment
    ///
    /// Resets the environment immediately to obtain the initial observation.
    pub fn new(mut env: E, sampler_seed: u64) -> Self {
        let observation = env.reset();
        Self {
            env,
            observation,
            episode_return: 0.0,
            last_episode_return: 0.0,
            bootstrap_value: 0.0,
            rng: StdRng::seed_from_u64(sampler_seed),
        }
    }

    /// Total return of the most recently completed episode
    ///
    /// 0.0 until the first episode finishes.
    pub fn last_episode_return(&self) -> f32 {
        self.last_episode_return
    }

    /// Collect one trajectory segment under the given policy
    ///
    /// Repeats up to `step_budget` times: evaluate the policy, sample an
    /// action from the softmax of the preference vector, advance the
    /// environment, and record the raw transition. Stops early on episode
    /// termination, in which case the environment is reset, the episode's
    /// return is captured into `last_episode_return`, and the bootstrap
    /// carry-over becomes 0. If the budget runs out without termination,
    /// the carry-over becomes the critic's value estimate for the final
    /// observation reached.
    ///
    /// Returns the segment with rewards replaced by bootstrapped discounted
    /// returns. Errors only if the action distribution is degenerate (NaN
    /// probabilities); that is fatal to the run.
    pub fn collect<P: Policy>(
        &mut self,
        policy: &P,
        step_budget: usize,
        gamma: f32,
    ) -> Result<Vec<Transition>> {
        let mut raw = Vec::with_capacity(step_budget);
        let mut terminated = false;

        for _ in 0..step_budget {
            let (preferences, _value) = policy.evaluate(&self.observation);
            let action = sample_action(&preferences, &mut self.rng)?;

            let step = self.env.step(action);
            raw.push(Transition {
                observation: self.observation.clone(),
                action,
                next_observation: step.observation.clone(),
                reward: step.reward,
                done: step.done,
            });
            self.episode_return += step.reward;

            if step.done {
                self.bootstrap_value = 0.0;
                self.last_episode_return = self.episode_return;
                self.episode_return = 0.0;
                self.observation = self.env.reset();
                terminated = true;
                break;
            }
            self.observation = step.observation;
        }

        if !terminated {
            // Plain forward pass; no sampling and no gradient tracking.
            let (_, value) = policy.evaluate(&self.observation);
            self.bootstrap_value = value;
        }

        Ok(discount(&raw, gamma, self.bootstrap_value))
    }
}

/// Sample an action index from the softmax of a preference vector
fn sample_action(preferences: &[f32], rng: &mut StdRng) -> Result<usize> {
    let max = preferences
        .iter()
        .fold(f32::NEG_INFINITY, |acc, &p| acc.max(p));
    let weights: Vec<f32> = preferences.iter().map(|&p| (p - max).exp()).collect();

    let dist = WeightedIndex::new(&weights)
        .with_context(|| format!("degenerate action distribution: {preferences:?}"))?;
    Ok(dist.sample(rng))
}
