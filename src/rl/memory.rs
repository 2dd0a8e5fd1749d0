//! Transition records and discounted-return computation
//!
//! A [`Transition`] is one environment step as observed by the agent. During
//! collection its `reward` field holds the raw environment reward; the
//! [`discount`] pass produces a fresh sequence whose rewards are n-step
//! bootstrapped discounted returns. Records live for one training iteration
//! and are discarded after the gradient step.

/// One environment transition
///
/// Immutable once created. `reward` is the raw reward in freshly collected
/// records and the discounted return in the output of [`discount`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation the action was chosen from
    pub observation: Vec<f32>,

    /// Index of the sampled action
    pub action: usize,

    /// Observation after the transition
    pub next_observation: Vec<f32>,

    /// Raw reward, or discounted return after [`discount`]
    pub reward: f32,

    /// Whether this transition ended the episode
    pub done: bool,
}

/// Replace raw rewards with bootstrapped discounted returns
///
/// Walks the segment in reverse chronological order with a running
/// accumulator seeded by `bootstrap_value` (the critic's estimate of all
/// reward beyond the segment, or 0.0 if the segment ended an episode). A
/// `done` record resets the accumulator to 0 before combining, so no return
/// leaks across an episode boundary even inside one segment. Each input
/// record yields a fresh output record; the inputs are not mutated.
///
/// The output has the same length and chronological order as the input. An
/// empty input yields an empty output.
///
/// # Example
///
/// ```rust
/// use ml_cartpole::rl::memory::{discount, Transition};
///
/// let segment = vec![Transition {
///     observation: vec![0.0; 4],
///     action: 0,
///     next_observation: vec![0.0; 4],
///     reward: 1.0,
///     done: false,
/// }];
///
/// let discounted = discount(&segment, 0.5, 2.0);
/// assert_eq!(discounted[0].reward, 2.0); // 1.0 + 0.5 * 2.0
/// ```
pub fn discount(records: &[Transition], gamma: f32, bootstrap_value: f32) -> Vec<Transition> {
    let mut accumulator = bootstrap_value;
    let mut discounted: Vec<Transition> = records
        .iter()
        .rev()
        .map(|record| {
            if record.done {
                accumulator = 0.0;
            }
            accumulator = accumulator * gamma + record.reward;
            Transition {
                reward: accumulator,
                ..record.clone()
            }
        })
        .collect();
    discounted.reverse();
    discounted
}
