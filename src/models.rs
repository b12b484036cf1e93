use ndarray::Array2;

use crate::core::layers::Layer;
use crate::core::losses::{LossFn, LossGradFn};
use crate::error::{NetworkError, Result};

/// An ordered stack of layers plus a loss pair; owns the training and
/// inference loops.
pub struct Network {
    pub layers: Vec<Layer>,
    loss: LossFn,
    loss_prime: LossGradFn,
}

impl Network {
    pub fn new(loss: LossFn, loss_prime: LossGradFn, layers: Vec<Layer>) -> Result<Network> {
        if layers.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        Ok(Network {
            layers,
            loss,
            loss_prime,
        })
    }

    pub fn summary(&self) {
        let mut total_params = 0;
        let mut res = "\nNetwork\n".to_string();
        res.push_str("-------------------------------------------------\n");
        res.push_str("Layer (type)\t\t Params\n");
        for layer in self.layers.iter() {
            let params = layer.param_count();
            total_params += params;
            res.push_str(&format!("{}\t\t\t {}\n", layer.typ(), params));
        }
        res.push_str("-------------------------------------------------\n");
        res.push_str(&format!("Total params: {}\n", total_params));
        println!("{}", res);
    }

    /// Online (batch-size-1) gradient descent over `x_train`/`y_train` in
    /// the given sample order, every epoch, no shuffling.
    ///
    /// Returns the average loss of each epoch, oldest first; with `verbose`
    /// the same numbers are printed as training proceeds. Arguments are
    /// validated before any propagation, so a failed call leaves every
    /// parameter untouched.
    pub fn train(
        &mut self,
        x_train: &[Array2<f64>],
        y_train: &[Array2<f64>],
        epochs: usize,
        learning_rate: f64,
        verbose: bool,
    ) -> Result<Vec<f64>> {
        if x_train.len() != y_train.len() {
            return Err(NetworkError::InvalidArgument(format!(
                "{} training inputs but {} targets",
                x_train.len(),
                y_train.len()
            )));
        }
        if x_train.is_empty() {
            return Err(NetworkError::InvalidArgument(
                "training set is empty".to_string(),
            ));
        }
        if epochs == 0 {
            return Err(NetworkError::InvalidArgument(
                "epochs must be greater than 0".to_string(),
            ));
        }
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(NetworkError::InvalidArgument(format!(
                "learning rate must be positive and finite, got {}",
                learning_rate
            )));
        }

        let mut epoch_losses = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            let mut total_loss = 0.0;

            for (sample, target) in x_train.iter().zip(y_train.iter()) {
                // forward pass, keeping each layer's input for the reverse pass
                let mut layer_inputs = Vec::with_capacity(self.layers.len());
                let mut output = sample.clone();
                for layer in self.layers.iter() {
                    let next = layer.forward(&output)?;
                    layer_inputs.push(output);
                    output = next;
                }

                total_loss += (self.loss)(target, &output);

                // reverse pass; each layer consumes the input its forward saw
                let mut error = (self.loss_prime)(target, &output);
                for (layer, input) in self.layers.iter_mut().rev().zip(layer_inputs.iter().rev())
                {
                    error = layer.backward(input, &error, learning_rate)?;
                }
            }

            let avg_loss = total_loss / x_train.len() as f64;
            if verbose {
                println!("Epoch {}/{} - loss {:.6}", epoch + 1, epochs, avg_loss);
            }
            epoch_losses.push(avg_loss);
        }

        Ok(epoch_losses)
    }

    /// Forward-only evaluation; parameters are never touched. Outputs come
    /// back in input order.
    pub fn predict(&self, inputs: &[Array2<f64>]) -> Result<Vec<Array2<f64>>> {
        inputs.iter().map(|sample| self.forward(sample)).collect()
    }

    fn forward(&self, sample: &Array2<f64>) -> Result<Array2<f64>> {
        let mut output = sample.clone();
        for layer in self.layers.iter() {
            output = layer.forward(&output)?;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layers::{Activation, Dense};
    use crate::core::losses::{mse, mse_prime};
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn xor_data() -> (Vec<Array2<f64>>, Vec<Array2<f64>>) {
        let x = vec![
            array![[0.0, 0.0]],
            array![[0.0, 1.0]],
            array![[1.0, 0.0]],
            array![[1.0, 1.0]],
        ];
        let y = vec![
            array![[0.0]],
            array![[1.0]],
            array![[1.0]],
            array![[0.0]],
        ];
        (x, y)
    }

    fn xor_network(seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::new(
            mse,
            mse_prime,
            vec![
                Dense::new_using(2, 3, &mut rng).unwrap().into(),
                Activation::tanh().into(),
                Dense::new_using(3, 1, &mut rng).unwrap().into(),
                Activation::tanh().into(),
            ],
        )
        .unwrap()
    }

    fn dense_params(net: &Network, index: usize) -> (Array2<f64>, Array2<f64>) {
        match &net.layers[index] {
            Layer::Dense(d) => (d.weights.clone(), d.bias.clone()),
            Layer::Activation(_) => panic!("layer {} is not dense", index),
        }
    }

    #[test]
    fn new_rejects_empty_layer_list() {
        assert!(matches!(
            Network::new(mse, mse_prime, vec![]),
            Err(NetworkError::EmptyNetwork)
        ));
    }

    #[test]
    fn predict_is_deterministic() {
        let net = xor_network(11);
        let (x, _) = xor_data();
        let first = net.predict(&x).unwrap();
        let second = net.predict(&x).unwrap();
        assert_eq!(first.len(), x.len());
        assert_eq!(first, second);
    }

    #[test]
    fn train_rejects_sample_count_mismatch_without_updating() {
        let mut net = xor_network(5);
        let (x, mut y) = xor_data();
        y.pop();

        let before_0 = dense_params(&net, 0);
        let before_2 = dense_params(&net, 2);

        let err = net.train(&x, &y, 10, 0.1, false).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidArgument(_)));

        assert_eq!(dense_params(&net, 0), before_0);
        assert_eq!(dense_params(&net, 2), before_2);
    }

    #[test]
    fn train_rejects_zero_epochs_and_bad_learning_rates() {
        let mut net = xor_network(5);
        let (x, y) = xor_data();

        for (epochs, lr) in [(0, 0.1), (10, 0.0), (10, -0.5), (10, f64::NAN)] {
            let before = dense_params(&net, 0);
            let err = net.train(&x, &y, epochs, lr, false).unwrap_err();
            assert!(matches!(err, NetworkError::InvalidArgument(_)));
            assert_eq!(dense_params(&net, 0), before);
        }
    }

    #[test]
    fn train_reports_one_loss_per_epoch() {
        let mut net = xor_network(1);
        let (x, y) = xor_data();
        let losses = net.train(&x, &y, 25, 0.1, false).unwrap();
        assert_eq!(losses.len(), 25);
        assert!(losses.iter().all(|l| l.is_finite()));
    }

    #[test]
    fn xor_training_converges() {
        let (x, y) = xor_data();

        // Uniform init can land in the symmetric local minimum, so restart
        // over a handful of seeds; each attempt itself is deterministic.
        let mut trained = None;
        for seed in 0..6 {
            let mut net = xor_network(seed);
            let losses = net.train(&x, &y, 2000, 0.1, false).unwrap();
            if losses.last().copied().unwrap_or(f64::INFINITY) < 0.05 {
                trained = Some(net);
                break;
            }
        }
        let net = trained.expect("no restart drove XOR loss below 0.05");

        let out = net.predict(&x).unwrap();
        // (0,1) and (1,0) land closer to 1; (0,0) and (1,1) closer to 0
        assert!(out[1][[0, 0]] > 0.5);
        assert!(out[2][[0, 0]] > 0.5);
        assert!(out[0][[0, 0]] < 0.5);
        assert!(out[3][[0, 0]] < 0.5);
    }

    #[test]
    fn shape_mismatch_surfaces_from_inside_the_stack() {
        let mut net = xor_network(2);
        let bad = vec![array![[1.0, 2.0, 3.0]]];
        let target = vec![array![[0.0]]];

        let err = net.predict(&bad).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch(_)));

        let err = net.train(&bad, &target, 1, 0.1, false).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch(_)));
    }
}
