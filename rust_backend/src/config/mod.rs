//! Aggregation configuration: rule weights and outlier thresholds.
//!
//! Both are plain value objects passed explicitly into the aggregation
//! functions.

pub mod thresholds;
pub mod weights;

pub use thresholds::ThresholdConfig;
pub use weights::{
    load_weights_configuration, ConfigFormat, LoadedWeights, WeightsConfig, WeightsFallback,
    WeightsSource, DEFAULT_WEIGHT_KEY,
};
