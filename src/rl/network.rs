//! Actor-critic neural network for the CartPole agent
//!
//! A small multilayer perceptron with a shared trunk and two heads:
//! - **Actor head**: outputs action logits for the policy
//! - **Critic head**: outputs a scalar state-value estimate
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, observation_dim]
//!   ↓ Linear(observation_dim → hidden_dim) + ReLU
//!   ↓ Split
//!   ├─→ Actor: Linear(hidden_dim → num_actions) → Action logits
//!   └─→ Critic: Linear(hidden_dim → 1) → Value estimate
//! ```
//!
//! No softmax is applied inside the network; callers normalize the logits
//! where sampling or loss semantics require it.

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Tensor},
};

/// Configuration for the actor-critic network
#[derive(Debug, Clone)]
pub struct ActorCriticConfig {
    /// Dimension of the observation vector
    pub observation_dim: usize,

    /// Number of discrete actions the policy can output
    pub num_actions: usize,

    /// Width of the shared hidden layer (default: 64)
    pub hidden_dim: usize,
}

impl ActorCriticConfig {
    /// Create a configuration with the default hidden width
    ///
    /// # Example
    ///
    /// ```rust
    /// use ml_cartpole::rl::ActorCriticConfig;
    ///
    /// let config = ActorCriticConfig::new(4, 2);
    /// assert_eq!(config.hidden_dim, 64);
    /// ```
    pub fn new(observation_dim: usize, num_actions: usize) -> Self {
        Self {
            observation_dim,
            num_actions,
            hidden_dim: 64,
        }
    }

    /// Initialize the network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> ActorCriticNetwork<B> {
        ActorCriticNetwork {
            fc_shared: LinearConfig::new(self.observation_dim, self.hidden_dim).init(device),
            actor_head: LinearConfig::new(self.hidden_dim, self.num_actions).init(device),
            critic_head: LinearConfig::new(self.hidden_dim, 1).init(device),
        }
    }
}

/// Shared-trunk actor-critic network
///
/// Generic over the Burn backend so the same definition serves training
/// (`Autodiff<NdArray>`) and gradient-free evaluation (`NdArray`). The
/// forward pass is a pure function of (parameters, input); parameters are
/// mutated only by the external optimizer.
#[derive(Module, Debug)]
pub struct ActorCriticNetwork<B: Backend> {
    /// Shared hidden layer
    fc_shared: Linear<B>,
    /// Actor head: outputs action logits
    actor_head: Linear<B>,
    /// Critic head: outputs the value estimate
    critic_head: Linear<B>,
}

impl<B: Backend> ActorCriticNetwork<B> {
    /// Forward pass through the network
    ///
    /// # Arguments
    ///
    /// * `observation` - Tensor with shape `[batch, observation_dim]`
    ///
    /// # Returns
    ///
    /// A tuple of:
    /// - `action_logits`: `[batch, num_actions]` unnormalized action scores
    /// - `value`: `[batch, 1]` state-value estimates
    pub fn forward(&self, observation: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let hidden = relu(self.fc_shared.forward(observation));

        let action_logits = self.actor_head.forward(hidden.clone());
        let value = self.critic_head.forward(hidden);

        (action_logits, value)
    }
}
