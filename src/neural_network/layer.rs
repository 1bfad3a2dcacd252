/// Parameters held by a layer, as reported by `Layer::param_count`.
///
/// # Variants
///
/// - `NoTrainable` - The layer has no parameters at all (e.g. pooling)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingParameters {
    NoTrainable,
}

/// A macro that generates the `Layer` functions shared by layers without trainable parameters.
///
/// # Generated Functions
///
/// - `fix_weights()`: Does nothing, there is nothing to update
/// - `param_count()`: Returns `TrainingParameters::NoTrainable`
macro_rules! no_trainable_parameters_layer_functions {
    () => {
        fn fix_weights(&mut self) {}

        fn param_count(&self) -> TrainingParameters {
            TrainingParameters::NoTrainable
        }
    };
}

/// Pooling layers
pub mod pooling_layer;

pub use pooling_layer::*;
