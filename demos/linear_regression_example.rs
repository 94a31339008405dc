use linreg::{Dataset, LinearRegression, Matrix, StandardScaler, TrainingConfig, Vector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: linear_regression_example DATA.csv [CONFIG.json]
    let mut args = env::args().skip(1);
    let data_path = args.next().unwrap_or_else(|| "data/housing.csv".to_string());
    let config = match args.next() {
        Some(path) => serde_json::from_str::<TrainingConfig>(&fs::read_to_string(path)?)?,
        None => TrainingConfig::default(),
    };
    let mut rng = StdRng::seed_from_u64(42);

    // Step 1: Load CSV data (example format: feature1,feature2,feature3,target)
    let (features, targets) = load_csv(&data_path)?;

    // Step 2: Create dataset
    let dataset = Dataset::new(features, targets)?;
    println!("Dataset: {} samples, {} features", dataset.n_samples(), dataset.n_features());

    // Step 3: Split into train/validation
    let (train_data, val_data) = dataset.train_test_split(0.25, &mut rng)?;

    // Step 4: Preprocessing - standardize features
    let mut scaler = StandardScaler::new();
    let train_features_scaled = scaler.fit_transform(&train_data.features)?;
    let val_features_scaled = scaler.transform(&val_data.features)?;

    // Step 5: Train linear regression model
    println!("Training with {} ({:?})", config.mode, config);
    let mut model = LinearRegression::with_config(config);
    let history = model.fit_with_validation(
        &train_features_scaled,
        &train_data.labels,
        &val_features_scaled,
        &val_data.labels,
        &mut rng,
    )?;

    for report in history.reports() {
        println!(
            "  epoch {:>5}: train loss {:.6}, validation loss {:.6}",
            report.epoch,
            report.train_loss,
            report.validation_loss.unwrap_or(f64::NAN)
        );
    }

    // Step 6: Evaluate model
    let train_predictions = model.predict(&train_features_scaled)?;
    let val_predictions = model.predict(&val_features_scaled)?;

    let train_mse = linreg::metrics::mean_squared_error(&train_data.labels, &train_predictions)?;
    let val_mse = linreg::metrics::mean_squared_error(&val_data.labels, &val_predictions)?;

    let train_r2 = model.score(&train_features_scaled, &train_data.labels)?;
    let val_r2 = model.score(&val_features_scaled, &val_data.labels)?;

    println!("Results:");
    println!("  Training R² score: {:.4}", train_r2);
    println!("  Validation R² score: {:.4}", val_r2);
    println!("  Training MSE: {:.4}", train_mse);
    println!("  Validation MSE: {:.4}", val_mse);

    // Step 7: Inspect model parameters
    if let Some(params) = &model.parameters {
        println!("  Weights: {}", params.weights);
        println!("  Bias: {:.4}", params.bias);
    }

    Ok(())
}

fn load_csv(filename: &str) -> Result<(Matrix, Vector), Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if i == 0 || line.trim().is_empty() {
            continue; // Skip header
        }

        let values: Result<Vec<f64>, _> = line
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect();

        rows.push(values?);
    }

    let Some(first) = rows.first() else {
        return Err("No data found in CSV".into());
    };
    if first.len() < 2 {
        return Err("CSV needs at least one feature column and a target column".into());
    }

    let n_samples = rows.len();
    let n_features = first.len() - 1; // Last column is target

    let mut features_data = Vec::with_capacity(n_samples * n_features);
    let mut targets_data = Vec::with_capacity(n_samples);

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_features + 1 {
            let expected = n_features + 1;
            let got = row.len();
            return Err(format!("row {} has {got} columns, expected {expected}", i + 1).into());
        }
        features_data.extend_from_slice(&row[..n_features]);
        targets_data.push(row[n_features]);
    }

    let features = Matrix::from_shape_vec((n_samples, n_features), features_data)?;
    let targets = Vector::from(targets_data);

    Ok((features, targets))
}
