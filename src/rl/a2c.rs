//! A2C (Advantage Actor-Critic) agent implementation
//!
//! This module implements the synchronous A2C update: one forward pass over
//! a batch of discounted transitions, a three-term loss (policy gradient,
//! value regression, entropy regularizer), and a single clipped-gradient
//! Adam step.

use super::config::A2CConfig;
use super::memory::Transition;
use super::network::ActorCriticNetwork;
use super::runner::Policy;
use burn::{
    grad_clipping::GradientClippingConfig,
    module::AutodiffModule,
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    tensor::{
        activation::{log_softmax, softmax},
        backend::AutodiffBackend,
        ElementConversion, Int, Tensor, TensorData,
    },
};

/// Diagnostic scalars from one training step
///
/// All values are plain `f32` snapshots taken before the optimizer step;
/// they feed the metrics sink and never influence training.
#[derive(Debug, Clone, Copy)]
pub struct LossReport {
    /// Policy-gradient loss term
    pub policy_loss: f32,

    /// Mean squared error between value estimates and discounted returns
    pub value_loss: f32,

    /// Mean policy entropy over the batch (non-negative)
    pub entropy: f32,

    /// The combined scalar that was backpropagated
    pub total_loss: f32,

    /// Mean advantage over the batch
    pub mean_advantage: f32,

    /// Mean sampled action index over the batch
    pub mean_action: f32,
}

/// A2C agent for discrete action spaces
///
/// Owns the shared actor-critic network and its optimizer. The network
/// parameters are mutated only by [`learn`](A2CAgent::learn); the
/// [`Policy`] implementation reads them through gradient-free forward
/// passes.
///
/// # Type Parameters
///
/// * `B` - Autodiff backend for gradient computation
pub struct A2CAgent<B: AutodiffBackend> {
    /// Shared actor-critic network
    network: ActorCriticNetwork<B>,

    /// Adam optimizer with gradient-norm clipping
    optim: OptimizerAdaptor<Adam, ActorCriticNetwork<B>, B>,

    /// A2C hyperparameters
    config: A2CConfig,

    /// Dimension of the observation vector
    observation_dim: usize,

    /// Number of discrete actions
    num_actions: usize,

    /// Training step counter
    training_step: usize,

    /// Device for tensor operations
    device: B::Device,
}

impl<B: AutodiffBackend> A2CAgent<B> {
    /// Create a new A2C agent
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use ml_cartpole::rl::{A2CAgent, A2CConfig, ActorCriticConfig, TrainingBackend, default_device};
    ///
    /// let device = default_device();
    /// let network = ActorCriticConfig::new(4, 2).init::<TrainingBackend>(&device);
    /// let agent = A2CAgent::new(network, A2CConfig::default(), 4, 2, device);
    /// ```
    pub fn new(
        network: ActorCriticNetwork<B>,
        config: A2CConfig,
        observation_dim: usize,
        num_actions: usize,
        device: B::Device,
    ) -> Self {
        config.validate().expect("Invalid A2C configuration");

        let optim = AdamConfig::new()
            .with_grad_clipping(Some(GradientClippingConfig::Norm(config.max_grad_norm)))
            .init();

        Self {
            network,
            optim,
            config,
            observation_dim,
            num_actions,
            training_step: 0,
            device,
        }
    }

    /// Perform one A2C update over a batch of discounted transitions
    ///
    /// The `reward` field of each record must already hold its discounted
    /// return (see [`discount`](super::memory::discount)). The advantage
    /// used by the policy-gradient term detaches the value estimate, so no
    /// policy gradient flows into the critic through the advantage; the
    /// critic is trained only by its own regression term.
    ///
    /// # Panics
    ///
    /// Panics on an empty batch.
    pub fn learn(&mut self, batch: &[Transition]) -> LossReport {
        assert!(!batch.is_empty(), "cannot learn from an empty batch");
        let n = batch.len();

        let mut observations = Vec::with_capacity(n * self.observation_dim);
        for record in batch {
            observations.extend_from_slice(&record.observation);
        }
        let observations: Tensor<B, 2> = Tensor::from_data(
            TensorData::new(observations, [n, self.observation_dim]),
            &self.device,
        );

        let action_indices: Vec<i32> = batch.iter().map(|r| r.action as i32).collect();
        let actions =
            Tensor::<B, 1, Int>::from_ints(action_indices.as_slice(), &self.device);

        let return_values: Vec<f32> = batch.iter().map(|r| r.reward).collect();
        let returns: Tensor<B, 1> = Tensor::from_floats(return_values.as_slice(), &self.device);

        // Forward pass over the whole batch
        let (action_logits, values) = self.network.forward(observations);
        let values: Tensor<B, 1> = values.squeeze(1);

        // Advantage with the value estimate held constant: the critic is
        // trained only through its own regression term below.
        let advantage = returns.clone() - values.clone().detach();

        let log_probs = log_softmax(action_logits.clone(), 1);
        let action_log_probs = log_probs
            .clone()
            .gather(1, actions.clone().unsqueeze_dim(1))
            .squeeze(1);

        // Policy loss: -E[log π(a|s) * A(s, a)]
        let policy_loss = (action_log_probs * advantage.clone()).mean().neg();

        // Value loss: E[(V(s) - R)²]
        let value_loss = (values - returns).powf_scalar(2.0).mean();

        // Σ_a π(a|s) log π(a|s) is negative entropy, so adding it weighted by
        // entropy_beta rewards flatter action distributions.
        let probs = softmax(action_logits, 1);
        let neg_entropy = (probs * log_probs).sum_dim(1).mean();

        let total_loss = policy_loss.clone()
            + value_loss.clone()
            + neg_entropy.clone() * self.config.entropy_beta;

        let report = LossReport {
            policy_loss: policy_loss.into_scalar().elem::<f32>(),
            value_loss: value_loss.into_scalar().elem::<f32>(),
            entropy: -neg_entropy.into_scalar().elem::<f32>(),
            total_loss: total_loss.clone().into_scalar().elem::<f32>(),
            mean_advantage: advantage.mean().into_scalar().elem::<f32>(),
            mean_action: actions.float().mean().into_scalar().elem::<f32>(),
        };

        // Backward pass and one clipped optimizer step
        let grads = total_loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.network);
        self.network = self
            .optim
            .step(self.config.learning_rate, self.network.clone(), grads);

        self.training_step += 1;
        report
    }

    /// Get the current training step
    pub fn training_step(&self) -> usize {
        self.training_step
    }

    /// Get a reference to the neural network
    pub fn network(&self) -> &ActorCriticNetwork<B> {
        &self.network
    }

    /// Get a reference to the A2C configuration
    pub fn config(&self) -> &A2CConfig {
        &self.config
    }

    /// Get the observation dimension
    pub fn observation_dim(&self) -> usize {
        self.observation_dim
    }

    /// Get the number of discrete actions
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }
}

impl<B: AutodiffBackend> Policy for A2CAgent<B> {
    /// Gradient-free forward pass for action selection and bootstrapping
    fn evaluate(&self, observation: &[f32]) -> (Vec<f32>, f32) {
        let network = self.network.clone().valid();
        let observation: Tensor<B::InnerBackend, 2> = Tensor::from_data(
            TensorData::new(observation.to_vec(), [1, self.observation_dim]),
            &self.device,
        );

        let (action_logits, value) = network.forward(observation);

        let preferences: Vec<f32> = action_logits
            .into_data()
            .to_vec()
            .expect("Failed to convert logits to vec");
        let value = value.into_scalar().elem::<f32>();

        (preferences, value)
    }
}
