//! Reinforcement learning core for the CartPole agent
//!
//! Provides:
//! - Transition records and bootstrapped discounted-return calculation
//! - Per-environment stepping wrappers with seeded action sampling
//! - Actor-Critic neural network shared between policy and value heads
//! - A2C algorithm configuration and training
//! - Model persistence via Burn's Record system

pub mod a2c;
pub mod backend;
pub mod config;
pub mod memory;
pub mod network;
pub mod persistence;
pub mod runner;

pub use a2c::{A2CAgent, LossReport};
pub use backend::{default_device, InferenceBackend, TrainingBackend};
pub use config::A2CConfig;
pub use memory::{discount, Transition};
pub use network::{ActorCriticConfig, ActorCriticNetwork};
pub use persistence::{load_network, save_model, ModelMetadata};
pub use runner::{EnvRunner, Policy};
