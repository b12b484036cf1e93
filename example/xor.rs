use gradnet::prelude::*;

fn main() -> Result<()> {
    println!("Solving the XOR problem");

    let x_train = vec![
        array![[0.0, 0.0]],
        array![[0.0, 1.0]],
        array![[1.0, 0.0]],
        array![[1.0, 1.0]],
    ];
    let y_train = vec![
        array![[0.0]],
        array![[1.0]],
        array![[1.0]],
        array![[0.0]],
    ];

    let mut net = Network::new(
        mse,
        mse_prime,
        vec![
            Dense::new(2, 3)?.into(),
            Activation::tanh().into(),
            Dense::new(3, 1)?.into(),
            Activation::tanh().into(),
        ],
    )?;

    net.summary();

    let losses = net.train(&x_train, &y_train, 1000, 0.1, false)?;
    println!("final loss: {:.6}", losses.last().copied().unwrap_or(f64::NAN));

    for (input, output) in x_train.iter().zip(net.predict(&x_train)?) {
        println!(
            "[{}, {}] -> {:.4}",
            input[[0, 0]],
            input[[0, 1]],
            output[[0, 0]]
        );
    }

    Ok(())
}
