//! Training statistics tracking for A2C
//!
//! This module provides utilities for tracking and monitoring training
//! progress, including episode returns and loss values.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// Tracks iteration-level metrics (mean episode return across environments)
/// and update-level metrics (policy loss, value loss, entropy, advantage)
/// using rolling windows for smoothed statistics.
///
/// # Example
///
/// ```rust
/// use ml_cartpole::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
///
/// // Record one training iteration
/// stats.record_iteration(21.5, 40);
/// stats.record_update(0.02, 0.05, 0.68, -0.1);
///
/// // Get statistics
/// println!("Mean return: {}", stats.mean_episode_return());
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Mean episode returns per iteration (rolling window)
    episode_returns: VecDeque<f32>,

    /// Policy losses (rolling window)
    policy_losses: VecDeque<f32>,

    /// Value losses (rolling window)
    value_losses: VecDeque<f32>,

    /// Entropy values (rolling window)
    entropies: VecDeque<f32>,

    /// Advantage means (rolling window)
    advantages: VecDeque<f32>,

    /// Total number of training iterations completed
    total_iterations: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new training statistics tracker
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent values to keep for rolling averages
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_returns: VecDeque::with_capacity(window_size),
            policy_losses: VecDeque::with_capacity(window_size),
            value_losses: VecDeque::with_capacity(window_size),
            entropies: VecDeque::with_capacity(window_size),
            advantages: VecDeque::with_capacity(window_size),
            total_iterations: 0,
            total_steps: 0,
            window_size,
        }
    }

    /// Record the completion of one training iteration
    ///
    /// # Arguments
    ///
    /// * `mean_episode_return` - Average of the environments' most recently
    ///   completed episode returns
    /// * `steps` - Environment steps collected this iteration
    pub fn record_iteration(&mut self, mean_episode_return: f32, steps: usize) {
        Self::push_deque(
            &mut self.episode_returns,
            mean_episode_return,
            self.window_size,
        );
        self.total_iterations += 1;
        self.total_steps += steps;
    }

    /// Record the losses from one gradient update
    ///
    /// # Arguments
    ///
    /// * `policy_loss` - Policy loss value from the update
    /// * `value_loss` - Value function loss from the update
    /// * `entropy` - Policy entropy from the update
    /// * `mean_advantage` - Mean advantage over the update's batch
    pub fn record_update(
        &mut self,
        policy_loss: f32,
        value_loss: f32,
        entropy: f32,
        mean_advantage: f32,
    ) {
        Self::push_deque(&mut self.policy_losses, policy_loss, self.window_size);
        Self::push_deque(&mut self.value_losses, value_loss, self.window_size);
        Self::push_deque(&mut self.entropies, entropy, self.window_size);
        Self::push_deque(&mut self.advantages, mean_advantage, self.window_size);
    }

    /// Get the mean episode return over the rolling window
    ///
    /// # Returns
    ///
    /// The average return, or 0.0 if no iterations have been recorded
    pub fn mean_episode_return(&self) -> f32 {
        self.mean(&self.episode_returns)
    }

    /// Get the mean policy loss over the rolling window
    pub fn mean_policy_loss(&self) -> f32 {
        self.mean(&self.policy_losses)
    }

    /// Get the mean value loss over the rolling window
    pub fn mean_value_loss(&self) -> f32 {
        self.mean(&self.value_losses)
    }

    /// Get the mean entropy over the rolling window
    pub fn mean_entropy(&self) -> f32 {
        self.mean(&self.entropies)
    }

    /// Get the mean advantage over the rolling window
    pub fn mean_advantage(&self) -> f32 {
        self.mean(&self.advantages)
    }

    /// Get the total number of training iterations completed
    pub fn total_iterations(&self) -> usize {
        self.total_iterations
    }

    /// Get the total number of environment steps taken
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Get the window size for rolling averages
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a summary of the current statistics
    ///
    /// # Example
    ///
    /// ```rust
    /// use ml_cartpole::metrics::TrainingStats;
    ///
    /// let mut stats = TrainingStats::new(100);
    /// stats.record_iteration(21.5, 40);
    /// stats.record_update(0.02, 0.05, 0.68, -0.1);
    ///
    /// println!("{}", stats.format_summary());
    /// // Output: Steps: 40 | Return: 21.50 | P_Loss: 0.0200 | V_Loss: 0.0500 | Entropy: 0.6800 | Adv: -0.1000
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Steps: {} | Return: {:.2} | P_Loss: {:.4} | V_Loss: {:.4} | Entropy: {:.4} | Adv: {:.4}",
            self.total_steps,
            self.mean_episode_return(),
            self.mean_policy_loss(),
            self.mean_value_loss(),
            self.mean_entropy(),
            self.mean_advantage(),
        )
    }

    /// Helper function to compute mean of a VecDeque<f32>
    fn mean(&self, deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(100);
        assert_eq!(stats.window_size(), 100);
        assert_eq!(stats.total_iterations(), 0);
        assert_eq!(stats.total_steps(), 0);
    }

    #[test]
    fn test_record_iteration() {
        let mut stats = TrainingStats::new(100);
        stats.record_iteration(10.0, 40);

        assert_eq!(stats.total_iterations(), 1);
        assert_eq!(stats.total_steps(), 40);
        assert!((stats.mean_episode_return() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_record_update() {
        let mut stats = TrainingStats::new(100);
        stats.record_update(0.02, 0.05, 0.68, -0.3);

        assert!((stats.mean_policy_loss() - 0.02).abs() < 1e-5);
        assert!((stats.mean_value_loss() - 0.05).abs() < 1e-5);
        assert!((stats.mean_entropy() - 0.68).abs() < 1e-5);
        assert!((stats.mean_advantage() + 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = TrainingStats::new(3);

        stats.record_iteration(1.0, 10);
        stats.record_iteration(2.0, 10);
        stats.record_iteration(3.0, 10);

        assert_eq!(stats.total_iterations(), 3);
        assert!((stats.mean_episode_return() - 2.0).abs() < 1e-5);

        // A 4th iteration evicts the first from the window
        stats.record_iteration(4.0, 10);

        assert_eq!(stats.total_iterations(), 4);
        // Mean should now be (2.0 + 3.0 + 4.0) / 3 = 3.0
        assert!((stats.mean_episode_return() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_rolling_window_update() {
        let mut stats = TrainingStats::new(2);

        stats.record_update(0.1, 0.2, 0.9, 0.0);
        stats.record_update(0.2, 0.3, 0.8, 0.0);

        assert!((stats.mean_policy_loss() - 0.15).abs() < 1e-5);

        // A 3rd update evicts the first from the window
        stats.record_update(0.3, 0.4, 0.7, 0.0);

        // Mean should now be (0.2 + 0.3) / 2 = 0.25
        assert!((stats.mean_policy_loss() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_total_steps_accumulate() {
        let mut stats = TrainingStats::new(10);

        stats.record_iteration(1.0, 40);
        stats.record_iteration(2.0, 40);
        stats.record_iteration(3.0, 40);

        assert_eq!(stats.total_steps(), 120);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(100);
        stats.record_iteration(21.5, 40);
        stats.record_update(0.02, 0.05, 0.68, -0.1);

        let summary = stats.format_summary();
        assert!(summary.contains("Steps: 40"));
        assert!(summary.contains("Return: 21.50"));
        assert!(summary.contains("P_Loss: 0.0200"));
        assert!(summary.contains("V_Loss: 0.0500"));
        assert!(summary.contains("Entropy: 0.6800"));
        assert!(summary.contains("Adv: -0.1000"));
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new(100);

        assert_eq!(stats.mean_episode_return(), 0.0);
        assert_eq!(stats.mean_policy_loss(), 0.0);
        assert_eq!(stats.mean_value_loss(), 0.0);
        assert_eq!(stats.mean_entropy(), 0.0);
        assert_eq!(stats.mean_advantage(), 0.0);
    }

    #[test]
    fn test_multiple_iterations_and_updates() {
        let mut stats = TrainingStats::new(10);

        for i in 0..5 {
            stats.record_iteration(i as f32, 40);
            stats.record_update(i as f32 * 0.01, i as f32 * 0.02, 1.0 - i as f32 * 0.1, 0.0);
        }

        assert_eq!(stats.total_iterations(), 5);
        assert_eq!(stats.total_steps(), 200);

        // Mean return: (0 + 1 + 2 + 3 + 4) / 5 = 2.0
        assert!((stats.mean_episode_return() - 2.0).abs() < 1e-5);
    }
}
