pub use ndarray::{array, Array2};
pub use ndarray_rand::rand_distr::Uniform;
pub use ndarray_rand::RandomExt;

pub use crate::error::*;

// Internal re-exports
pub use crate::core::{
    mse, mse_prime, relu, relu_prime, sigmoid, sigmoid_prime, tanh, tanh_prime, Activation,
    Dense, Layer, LossFn, LossGradFn,
};
pub use crate::models::Network;
