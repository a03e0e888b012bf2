//! Performance benchmarks for the lagcast engine

use std::time::Instant;

use lagcast_facade::features::build_lagged;
use lagcast_facade::metrics::{mae, rmse};
use lagcast_facade::ols::fit_ols;
use lagcast_facade::prelude::*;

fn generate_data(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            1.5 + 0.8 * (t * 0.7).sin().abs() + (t * 0.13).cos() * 0.3
        })
        .collect()
}

fn bench<F>(name: &str, iterations: u32, mut f: F)
where
    F: FnMut(),
{
    // Warmup
    for _ in 0..3 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;

    println!(
        "{:30} {:>10.2?} total, {:>10.2?}/iter ({} iters)",
        name, elapsed, per_iter, iterations
    );
}

fn engine_with(values: &[f64], capacity: usize) -> ForecastEngine {
    let mut engine = EngineBuilder::new().with_capacity(capacity).build().unwrap();
    for &v in values {
        engine.append_observation(v).unwrap();
    }
    engine
}

fn main() {
    println!("=== lagcast Performance Benchmarks ===\n");

    let data_20 = generate_data(20);
    let data_1k = generate_data(1_000);

    println!("--- History ---");
    bench("append (cap 20, 10K values)", 100, || {
        let _ = engine_with(&generate_data(10_000), 20);
    });

    println!("\n--- Features and Fit ---");
    bench("build_lagged (1K)", 1000, || {
        let _ = build_lagged(&data_1k, 3);
    });
    let dataset = build_lagged(&data_1k, 3);
    bench("fit_ols (997 rows)", 100, || {
        let _ = fit_ols(&dataset.features, &dataset.labels).unwrap();
    });
    let predicted: Vec<f64> = data_1k.iter().map(|x| x + 0.1).collect();
    bench("mae + rmse (1K)", 1000, || {
        let _ = mae(&data_1k, &predicted);
        let _ = rmse(&data_1k, &predicted);
    });

    println!("\n--- Forecast Requests ---");
    let mut small = engine_with(&data_20, 20);
    bench("request_forecast (20 obs, 10)", 1000, || {
        let _ = small.request_forecast(10).unwrap();
    });
    let mut large = engine_with(&data_1k, 1_000);
    bench("request_forecast (1K obs, 10)", 100, || {
        let _ = large.request_forecast(10).unwrap();
    });
    bench("request_forecast (20 obs, 200)", 100, || {
        let _ = small.request_forecast(200);
    });

    println!("\n=== Benchmark Complete ===");
}
