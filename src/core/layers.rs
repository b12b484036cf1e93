use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::activations;
use crate::error::{NetworkError, Result};

/// A fully-connected layer: `output = input · weights + bias`.
///
/// `weights` has shape `(input_size, output_size)`; `bias` is a single
/// `(1, output_size)` row broadcast over the input rows.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Dense {
    pub weights: Array2<f64>,
    pub bias: Array2<f64>,
}

impl Dense {
    /// Builds a dense layer with parameters drawn from `thread_rng`.
    pub fn new(input_size: usize, output_size: usize) -> Result<Dense> {
        Dense::new_using(input_size, output_size, &mut rand::thread_rng())
    }

    /// Builds a dense layer with parameters drawn i.i.d. uniform on
    /// `[-0.5, 0.5)` from the supplied generator. Seed the generator for
    /// reproducible initialization.
    pub fn new_using<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Dense> {
        if input_size == 0 || output_size == 0 {
            return Err(NetworkError::InvalidLayerConfiguration(
                "layer dimensions must be greater than 0".to_string(),
            ));
        }
        let init = Uniform::new(-0.5, 0.5);
        Ok(Dense {
            weights: Array2::random_using((input_size, output_size), init, rng),
            bias: Array2::random_using((1, output_size), init, rng),
        })
    }

    pub fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    pub fn forward(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        if input.ncols() != self.input_size() {
            return Err(NetworkError::DimensionMismatch(format!(
                "dense layer takes {} input columns, got {:?}",
                self.input_size(),
                input.dim()
            )));
        }
        Ok(input.dot(&self.weights) + &self.bias)
    }

    /// One gradient-descent step. `input` must be the tensor the matching
    /// `forward` call consumed. Returns the error with respect to that
    /// input, computed against the pre-update weights.
    pub fn backward(
        &mut self,
        input: &Array2<f64>,
        output_error: &Array2<f64>,
        learning_rate: f64,
    ) -> Result<Array2<f64>> {
        if input.dim() != (1, self.input_size()) {
            return Err(NetworkError::DimensionMismatch(format!(
                "dense backward takes a (1, {}) input, got {:?}",
                self.input_size(),
                input.dim()
            )));
        }
        if output_error.dim() != (1, self.output_size()) {
            return Err(NetworkError::DimensionMismatch(format!(
                "dense backward takes a (1, {}) output error, got {:?}",
                self.output_size(),
                output_error.dim()
            )));
        }

        let input_error = output_error.dot(&self.weights.t());
        let weights_grad = input.t().dot(output_error);

        self.weights.scaled_add(-learning_rate, &weights_grad);
        self.bias.scaled_add(-learning_rate, output_error);

        Ok(input_error)
    }
}

/// A pointwise nonlinearity. Holds the activation and its derivative as
/// plain function pointers fixed at construction; no trainable state.
#[derive(Debug, Clone)]
pub struct Activation {
    function: fn(f64) -> f64,
    derivative: fn(f64) -> f64,
}

impl Activation {
    pub fn new(function: fn(f64) -> f64, derivative: fn(f64) -> f64) -> Activation {
        Activation {
            function,
            derivative,
        }
    }

    pub fn tanh() -> Activation {
        Activation::new(activations::tanh, activations::tanh_prime)
    }

    pub fn sigmoid() -> Activation {
        Activation::new(activations::sigmoid, activations::sigmoid_prime)
    }

    pub fn relu() -> Activation {
        Activation::new(activations::relu, activations::relu_prime)
    }

    pub fn forward(&self, input: &Array2<f64>) -> Array2<f64> {
        input.mapv(self.function)
    }

    /// Chain rule: `derivative(input) ⊙ output_error`, where `input` is the
    /// tensor the matching `forward` call consumed.
    pub fn backward(&self, input: &Array2<f64>, output_error: &Array2<f64>) -> Result<Array2<f64>> {
        if input.dim() != output_error.dim() {
            return Err(NetworkError::DimensionMismatch(format!(
                "activation backward takes matching shapes, got {:?} and {:?}",
                input.dim(),
                output_error.dim()
            )));
        }
        Ok(input.mapv(self.derivative) * output_error)
    }
}

/// The unit of computation a network stacks. Closed over the two shapes
/// the engine needs; dispatch is a plain match.
#[derive(Debug, Clone)]
pub enum Layer {
    Dense(Dense),
    Activation(Activation),
}

impl Layer {
    pub fn forward(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        match self {
            Layer::Dense(dense) => dense.forward(input),
            Layer::Activation(activation) => Ok(activation.forward(input)),
        }
    }

    /// Propagates `output_error` back through this layer and, for `Dense`,
    /// applies the gradient step. `input` must be the tensor this layer's
    /// `forward` consumed for the current sample; the network threads it
    /// back during the reverse pass. `Activation` ignores `learning_rate`.
    pub fn backward(
        &mut self,
        input: &Array2<f64>,
        output_error: &Array2<f64>,
        learning_rate: f64,
    ) -> Result<Array2<f64>> {
        match self {
            Layer::Dense(dense) => dense.backward(input, output_error, learning_rate),
            Layer::Activation(activation) => activation.backward(input, output_error),
        }
    }

    pub fn param_count(&self) -> usize {
        match self {
            Layer::Dense(dense) => dense.weights.len() + dense.bias.len(),
            Layer::Activation(_) => 0,
        }
    }

    pub fn typ(&self) -> &'static str {
        match self {
            Layer::Dense(_) => "Dense",
            Layer::Activation(_) => "Activation",
        }
    }
}

impl From<Dense> for Layer {
    fn from(dense: Dense) -> Layer {
        Layer::Dense(dense)
    }
}

impl From<Activation> for Layer {
    fn from(activation: Activation) -> Layer {
        Layer::Activation(activation)
    }
}
