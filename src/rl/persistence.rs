//! Model persistence for saving and loading trained agents
//!
//! This module provides functionality to save and load trained A2C agents,
//! including both the network weights and training metadata. It uses Burn's
//! Record system for serialization.

use super::{A2CAgent, A2CConfig, ActorCriticConfig, ActorCriticNetwork};
use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata saved with the model
///
/// Contains configuration and training information needed to properly
/// reconstruct and use the saved model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// A2C configuration used during training
    pub a2c_config: A2CConfig,

    /// Dimension of the observation vector
    pub observation_dim: usize,

    /// Number of discrete actions
    pub num_actions: usize,

    /// Total training steps completed
    pub training_steps: usize,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl ModelMetadata {
    /// Create new metadata
    pub fn new(
        a2c_config: A2CConfig,
        observation_dim: usize,
        num_actions: usize,
        training_steps: usize,
    ) -> Self {
        Self {
            a2c_config,
            observation_dim,
            num_actions,
            training_steps,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Save a trained A2C agent to a file
///
/// Serializes both the neural network weights and training metadata to the
/// specified path. Creates parent directories if they don't exist.
///
/// The model is saved in two files:
/// - `<path>` - Network weights (Burn record format)
/// - `<path>.meta.json` - Metadata as JSON
///
/// # Arguments
///
/// * `agent` - The trained A2C agent to save
/// * `path` - Path where the model should be saved
///
/// # Returns
///
/// `Ok(())` on success, or an error if saving fails
pub fn save_model<B: AutodiffBackend>(agent: &A2CAgent<B>, path: &Path) -> Result<()> {
    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    // Extract network and convert to record
    let network = agent.network();
    let record = network.clone().into_record();

    // Save network weights using Burn's recorder
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(record, path.to_path_buf())
        .context("Failed to save network weights")?;

    // Create metadata
    let metadata = ModelMetadata::new(
        agent.config().clone(),
        agent.observation_dim(),
        agent.num_actions(),
        agent.training_step(),
    );

    // Save metadata as JSON
    let meta_path = path.with_extension("meta.json");
    let meta_json =
        serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    Ok(())
}

/// Load a trained network from a file
///
/// Deserializes a previously saved model, returning both the network and its
/// associated metadata. The network shape (observation dimension, action
/// count, hidden width) is reconstructed from the metadata.
///
/// # Arguments
///
/// * `path` - Path to the saved model file (without .meta.json extension)
/// * `device` - Device to load the model onto
///
/// # Returns
///
/// A tuple containing the loaded network and its metadata
pub fn load_network<B: AutodiffBackend>(
    path: &Path,
    device: &B::Device,
) -> Result<(ActorCriticNetwork<B>, ModelMetadata)> {
    // Load metadata first
    let meta_path = path.with_extension("meta.json");
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: ModelMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    // Reconstruct network from metadata
    let network_config = ActorCriticConfig {
        hidden_dim: metadata.a2c_config.hidden_dim,
        ..ActorCriticConfig::new(metadata.observation_dim, metadata.num_actions)
    };
    let mut network = network_config.init::<B>(device);

    // Load network weights using Burn's recorder
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;

    network = network.load_record(record);

    Ok((network, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{default_device, TrainingBackend};
    use tempfile::TempDir;

    fn create_test_agent() -> A2CAgent<TrainingBackend> {
        let device = default_device();
        let network = ActorCriticConfig::new(4, 2).init::<TrainingBackend>(&device);
        A2CAgent::new(network, A2CConfig::default(), 4, 2, device)
    }

    #[test]
    fn test_metadata_creation() {
        let metadata = ModelMetadata::new(A2CConfig::default(), 4, 2, 1000);

        assert_eq!(metadata.observation_dim, 4);
        assert_eq!(metadata.num_actions, 2);
        assert_eq!(metadata.training_steps, 1000);
        assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = ModelMetadata::new(A2CConfig::default(), 4, 2, 1000);

        // Serialize
        let json = serde_json::to_string(&metadata).unwrap();

        // Deserialize
        let deserialized: ModelMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.observation_dim, 4);
        assert_eq!(deserialized.num_actions, 2);
        assert_eq!(deserialized.training_steps, 1000);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.mpk");

        let agent = create_test_agent();
        save_model(&agent, &path).unwrap();

        let device = default_device();
        let (network, metadata) = load_network::<TrainingBackend>(&path, &device).unwrap();

        assert_eq!(metadata.observation_dim, 4);
        assert_eq!(metadata.num_actions, 2);
        assert_eq!(metadata.training_steps, 0);

        // The restored network reproduces the original's outputs.
        let restored = A2CAgent::new(network, metadata.a2c_config, 4, 2, device);
        let observation = [0.1, -0.2, 0.03, 0.4];
        use crate::rl::Policy;
        let (original_prefs, original_value) = agent.evaluate(&observation);
        let (restored_prefs, restored_value) = restored.evaluate(&observation);
        assert_eq!(original_prefs, restored_prefs);
        assert_eq!(original_value, restored_value);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dirs").join("model.mpk");

        let agent = create_test_agent();
        save_model(&agent, &path).unwrap();

        assert!(path.with_extension("meta.json").exists());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.mpk");
        let device = default_device();

        assert!(load_network::<TrainingBackend>(&path, &device).is_err());
    }
}
