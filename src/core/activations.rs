//! Scalar activation kernels and their derivatives.
//!
//! Each function here is a plain `fn(f64) -> f64` so a pair of them can be
//! handed to an `Activation` layer; the layer applies them elementwise.

pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

pub fn tanh_prime(x: f64) -> f64 {
    1.0 - x.tanh().powi(2)
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

pub fn sigmoid_prime(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

pub fn relu(x: f64) -> f64 {
    if x >= 0.0 {
        x
    } else {
        0.0
    }
}

pub fn relu_prime(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        0.0
    }
}
