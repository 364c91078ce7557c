//! Gaussian kernel density estimation for the per-era overlay.

use std::f64::consts::PI;

/// Scott's rule bandwidth, `sigma * n^(-1/5)` with the sample standard
/// deviation. `None` for fewer than two values or no spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sigma = variance.sqrt();
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    Some(sigma * (n as f64).powf(-0.2))
}

/// Evaluates a Gaussian KDE of `values` at each point of `grid`.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let bandwidth = scott_bandwidth(values)?;
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    Some(
        grid.iter()
            .map(|x| {
                norm * values
                    .iter()
                    .map(|v| {
                        let z = (x - v) / bandwidth;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
            })
            .collect(),
    )
}

/// `points` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points).map(|i| start + step * i as f64).collect()
        }
    }
}
