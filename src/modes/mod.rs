pub mod train;

pub use train::{TrainConfig, TrainMode};
