// threshold.rs - Sketch-distance threshold (tau) estimation (S4)

const GRID_POINTS: usize = 500;
const GRID_MIN: f64 = 0.0;
const GRID_MAX: f64 = 0.2;
const MIN_PAIRS: usize = 1000;
const DEFAULT_TAU: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdMethod {
    DefaultInsufficientPairs,
    KdeValley,
    Percentile95,
    DefaultUnimodalHighMean,
    UserSupplied,
}

impl ThresholdMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdMethod::DefaultInsufficientPairs => "Default (Insufficient pairs)",
            ThresholdMethod::KdeValley => "KDE Valley",
            ThresholdMethod::Percentile95 => "95th Percentile",
            ThresholdMethod::DefaultUnimodalHighMean => "Default (Unimodal high-mean)",
            ThresholdMethod::UserSupplied => "User-supplied",
        }
    }
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

fn std_dev(data: &[f64], mean_val: f64) -> f64 {
    let n = data.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let variance = data.iter().map(|x| (x - mean_val).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Linear-interpolation percentile, matching `numpy.percentile`'s default method.
pub(crate) fn percentile(data: &[f64], p: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Evaluate a Gaussian KDE (Scott's-rule bandwidth) over `data` at each point
/// in `grid`.
fn gaussian_kde(data: &[f64], grid: &[f64]) -> Vec<f64> {
    let n = data.len() as f64;
    let sigma = std_dev(data, mean(data));
    // Scott's rule, 1-D: h = n^(-1/5) * sigma.
    let bandwidth = if sigma > 0.0 {
        n.powf(-1.0 / 5.0) * sigma
    } else {
        1e-6
    };

    let norm = 1.0 / (data.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|&x| {
            let sum: f64 = data
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum();
            sum * norm
        })
        .collect()
}

/// Index of the leftmost local minimum of `values`: the first interior point
/// where the sign of the discrete first difference changes from negative to
/// positive.
fn leftmost_valley(values: &[f64]) -> Option<usize> {
    if values.len() < 3 {
        return None;
    }
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let signs: Vec<i32> = diffs.iter().map(|d| d.signum() as i32).collect();
    for i in 1..signs.len() {
        if signs[i - 1] < 0 && signs[i] > 0 {
            // diffs[i - 1] = values[i] - values[i - 1] < 0 (decreasing into i)
            // diffs[i] = values[i + 1] - values[i] > 0 (increasing out of i)
            // so the valley itself sits at index i.
            return Some(i);
        }
    }
    None
}

/// Estimate tau from a list of sketch distances over locus-overlapping pairs.
/// A user-supplied override should be applied by the caller before this
/// function is ever called.
pub fn estimate_distance_threshold(data: &[f64]) -> (f64, ThresholdMethod) {
    if data.len() < MIN_PAIRS {
        return (DEFAULT_TAU, ThresholdMethod::DefaultInsufficientPairs);
    }

    let grid: Vec<f64> = (0..GRID_POINTS)
        .map(|i| GRID_MIN + (GRID_MAX - GRID_MIN) * i as f64 / (GRID_POINTS - 1) as f64)
        .collect();
    let kde_vals = gaussian_kde(data, &grid);

    if let Some(idx) = leftmost_valley(&kde_vals) {
        return (grid[idx], ThresholdMethod::KdeValley);
    }

    let mean_dist = mean(data);
    if mean_dist <= 0.1 {
        (percentile(data, 95.0), ThresholdMethod::Percentile95)
    } else {
        (DEFAULT_TAU, ThresholdMethod::DefaultUnimodalHighMean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_pairs_uses_default() {
        let data = vec![0.01; 500];
        let (tau, method) = estimate_distance_threshold(&data);
        assert_eq!(tau, 0.05);
        assert_eq!(method, ThresholdMethod::DefaultInsufficientPairs);
    }

    #[test]
    fn leftmost_valley_finds_exact_grid_index() {
        // Single dip at index 2: decreasing into it, increasing out of it.
        let values = vec![5.0, 4.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(leftmost_valley(&values), Some(2));
    }

    #[test]
    fn leftmost_valley_picks_leftmost_of_two_dips() {
        let values = vec![5.0, 3.0, 5.0, 1.0, 5.0];
        assert_eq!(leftmost_valley(&values), Some(1));
    }

    #[test]
    fn bimodal_distribution_finds_valley_between_modes() {
        let mut data = vec![0.01; 600];
        data.extend(vec![0.04; 100]);
        data.extend(vec![0.15; 600]);
        let (tau, method) = estimate_distance_threshold(&data);
        assert!(tau > 0.0 && tau < 0.2, "tau={tau}");
        assert_eq!(method, ThresholdMethod::KdeValley);
    }

    #[test]
    fn percentile_matches_linear_interpolation() {
        let data: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        assert!((percentile(&data, 95.0) - 95.0).abs() < 1e-9);
    }
}
