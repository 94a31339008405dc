use linreg::{Dataset, LinearRegression, ModelParameters, StandardScaler, TrainingMode};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: synthetic_example [MODE] [SEED]
    let mode: TrainingMode = env::args().nth(1).as_deref().unwrap_or("MBGD").parse()?;
    let seed: u64 = env::args().nth(2).map(|s| s.parse::<u64>()).transpose()?.unwrap_or(42);
    let mut rng = StdRng::seed_from_u64(seed);

    // y = w·x + b with no noise
    let truth = ModelParameters::random(5, &mut rng);
    let dataset = Dataset::synthetic(1000, &truth, &mut rng)?;
    let (train, val) = dataset.train_test_split(0.25, &mut rng)?;

    let mut scaler = StandardScaler::new();
    let x_train = scaler.fit_transform(&train.features)?;
    let x_val = scaler.transform(&val.features)?;

    println!("=== {mode} on {} training samples ===\n", train.n_samples());

    let mut model = LinearRegression::new()
        .mode(mode)
        .learning_rate(0.01)
        .epochs(300)
        .batch_size(50);
    let history =
        model.fit_with_validation(&x_train, &train.labels, &x_val, &val.labels, &mut rng)?;

    for report in history.reports() {
        println!("Training loss at epoch {}: {}", report.epoch, report.train_loss);
        if let Some(val_loss) = report.validation_loss {
            println!("Validation loss at epoch {}: {}\n", report.epoch, val_loss);
        }
    }

    if let Some(last) = history.last() {
        println!("Final training loss: {:.6}", last.train_loss);
    }

    // Parameters are learned in the standardized feature space
    println!("Learned weights: {}", model.coefficients().ok_or("model not fitted")?);
    println!("Learned bias: {:.4}", model.intercept().unwrap_or(0.0));
    println!("True weights: {}", truth.weights);
    println!("True bias: {:.4}", truth.bias);
    println!("Validation R²: {:.6}", model.score(&x_val, &val.labels)?);

    Ok(())
}
