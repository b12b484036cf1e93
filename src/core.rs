pub mod activations;
pub mod layers;
pub mod losses;

// Re-export commonly used items
pub use activations::{relu, relu_prime, sigmoid, sigmoid_prime, tanh, tanh_prime};
pub use layers::{Activation, Dense, Layer};
pub use losses::{mse, mse_prime, LossFn, LossGradFn};
