//! ML CartPole - An A2C reinforcement learning agent for CartPole
//!
//! This library provides:
//! - CartPole physics simulation (env module)
//! - A2C training infrastructure (rl module)
//! - Training statistics tracking (metrics module)
//! - Execution modes (modes module)

pub mod env;
pub mod metrics;
pub mod modes;
pub mod rl;
