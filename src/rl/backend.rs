//! Backend type aliases and device management
//!
//! Convenient aliases for the Burn backends used in training and
//! evaluation. The NdArray backend is sufficient for CartPole given the
//! four-element observations and small network; a GPU backend (Wgpu) could
//! be swapped in later for larger experiments.

use burn::backend::{
    ndarray::{NdArray, NdArrayDevice},
    Autodiff,
};

/// Backend type for training (with autodiff)
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// Backend type for gradient-free evaluation
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
///
/// # Example
///
/// ```rust
/// use ml_cartpole::rl::default_device;
///
/// let device = default_device();
/// // Use device with Burn tensors and modules
/// ```
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
