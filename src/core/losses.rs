//! Loss kernels. Both take `(y_true, y_pred)` in that order.

use ndarray::Array2;

/// Signature of a scalar loss over a target/prediction pair.
pub type LossFn = fn(&Array2<f64>, &Array2<f64>) -> f64;

/// Signature of a loss gradient; returns a tensor shaped like `y_true`.
pub type LossGradFn = fn(&Array2<f64>, &Array2<f64>) -> Array2<f64>;

/// Mean squared error over all elements.
pub fn mse(y_true: &Array2<f64>, y_pred: &Array2<f64>) -> f64 {
    let n = y_true.len() as f64;
    (y_true - y_pred).mapv(|d| d * d).sum() / n
}

/// Gradient of [`mse`] with respect to the prediction: `2 (y_pred - y_true) / n`.
///
/// The sign is the descent orientation: the backward pass subtracts
/// `learning_rate * gradient` from every parameter, so the gradient must
/// point uphill.
pub fn mse_prime(y_true: &Array2<f64>, y_pred: &Array2<f64>) -> Array2<f64> {
    let n = y_true.len() as f64;
    (y_pred - y_true).mapv(|d| 2.0 * d / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mse_of_identical_tensors_is_zero() {
        let y = array![[0.3, -1.2, 4.0]];
        assert_eq!(mse(&y, &y), 0.0);
    }

    #[test]
    fn mse_prime_of_identical_tensors_is_zero() {
        let y = array![[0.3, -1.2, 4.0]];
        let grad = mse_prime(&y, &y);
        assert_eq!(grad.shape(), y.shape());
        assert!(grad.iter().all(|&g| g == 0.0));
    }

    #[test]
    fn mse_averages_squared_differences() {
        let y_true = array![[0.0, 0.0]];
        let y_pred = array![[1.0, 3.0]];
        // (1 + 9) / 2
        assert!((mse(&y_true, &y_pred) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn mse_prime_points_uphill() {
        let y_true = array![[0.0]];
        let y_pred = array![[2.0]];
        // 2 * (2 - 0) / 1
        assert!((mse_prime(&y_true, &y_pred)[[0, 0]] - 4.0).abs() < 1e-12);
    }
}
