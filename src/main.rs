use anyhow::Result;
use clap::{Parser, ValueEnum};
use ml_cartpole::modes::{TrainConfig, TrainMode};
use ml_cartpole::rl::{default_device, A2CConfig, TrainingBackend};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ml_cartpole")]
#[command(version, about = "A2C agent for the CartPole balancing task")]
struct Cli {
    /// Execution mode (currently only 'train' is implemented)
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Environment identifier (CartPole-v0 or CartPole-v1)
    #[arg(long, default_value = "CartPole-v0")]
    env: String,

    /// Number of training iterations
    #[arg(long, default_value = "100000")]
    iterations: usize,

    /// Number of parallel environment copies
    #[arg(long, default_value = "40")]
    num_envs: usize,

    /// Discount factor for future rewards
    #[arg(long, default_value = "0.95")]
    gamma: f32,

    /// Learning rate for the Adam optimizer
    #[arg(long, default_value = "0.003")]
    learning_rate: f64,

    /// Entropy regularizer coefficient
    #[arg(long, default_value = "0.01")]
    entropy_beta: f32,

    /// Maximum gradient norm for clipping
    #[arg(long, default_value = "0.1")]
    grad_clip: f32,

    /// Environment steps collected per environment per iteration
    #[arg(long, default_value = "1")]
    step_budget: usize,

    /// Width of the network's hidden layer
    #[arg(long, default_value = "64")]
    hidden_dim: usize,

    /// Base random seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Path to save the trained model
    #[arg(long, default_value = "models/cartpole.mpk")]
    save_path: PathBuf,

    /// Log training progress every N iterations
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// Save a checkpoint every N iterations
    #[arg(long, default_value = "10000")]
    checkpoint_frequency: usize,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train an A2C agent from scratch
    Train,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let a2c_config = A2CConfig {
        learning_rate: cli.learning_rate,
        gamma: cli.gamma,
        entropy_beta: cli.entropy_beta,
        max_grad_norm: cli.grad_clip,
        num_envs: cli.num_envs,
        step_budget: cli.step_budget,
        hidden_dim: cli.hidden_dim,
        max_iterations: cli.iterations,
    };

    let train_config = TrainConfig {
        env_id: cli.env,
        seed: cli.seed,
        save_path: cli.save_path,
        checkpoint_frequency: cli.checkpoint_frequency,
        log_frequency: cli.log_frequency,
        a2c_config,
    };

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Train => {
            let device = default_device();
            let mut train_mode = TrainMode::<TrainingBackend>::new(train_config, device)?;
            train_mode.run()?;
        }
    }

    Ok(())
}
