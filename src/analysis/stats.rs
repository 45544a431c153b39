use ndarray::{s, Array1, ArrayView1};
use ndarray_stats::QuantileExt;

/// Collects the present values of an optional series into an array,
/// skipping absent and non-finite entries.
pub fn present_values<I>(values: I) -> Array1<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect()
}

pub fn mean(values: ArrayView1<f64>) -> Option<f64> {
    values.mean()
}

pub fn min(values: ArrayView1<f64>) -> Option<f64> {
    values.min().ok().copied()
}

pub fn max(values: ArrayView1<f64>) -> Option<f64> {
    values.max().ok().copied()
}

/// Sample standard deviation (ddof = 1); undefined below two points.
pub fn sample_std(values: ArrayView1<f64>) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.std(1.0))
}

/// Quantile with linear interpolation between the two nearest order
/// statistics.
pub fn quantile(values: ArrayView1<f64>, q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Min-max scaling onto [0, 1]. A constant (or unorderable) input maps to
/// all zeros.
pub fn normalize(values: ArrayView1<f64>) -> Array1<f64> {
    match (values.min(), values.max()) {
        (Ok(&lo), Ok(&hi)) if hi > lo => values.mapv(|v| (v - lo) / (hi - lo)),
        _ => Array1::zeros(values.len()),
    }
}

/// Trailing sample std over windows of up to `window` rows. Absent entries
/// occupy a slot in the window but contribute no point.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let points = present_values(values[start..=i].iter().copied());
            sample_std(points.view())
        })
        .collect()
}

/// Trailing minimum; undefined until `window` points are available.
pub fn rolling_min(values: ArrayView1<f64>, window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                return None;
            }
            min(values.slice(s![i + 1 - window..=i]))
        })
        .collect()
}

/// Trailing mean over up to `window` points, expanding at the start.
pub fn rolling_mean(values: ArrayView1<f64>, window: usize) -> Array1<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            values.slice(s![start..=i]).mean().unwrap_or(f64::NAN)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_normalize_spans_unit_interval() {
        let normed = normalize(array![2.0, 4.0, 6.0, 3.0, 10.0].view());
        assert_relative_eq!(*normed.min().unwrap(), 0.0);
        assert_relative_eq!(*normed.max().unwrap(), 1.0);
        assert_relative_eq!(normed[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_constant_is_zero() {
        let normed = normalize(array![0.3, 0.3, 0.3, 0.3, 0.3].view());
        assert!(normed.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = array![20.0, 22.0];
        assert_relative_eq!(quantile(values.view(), 0.1).unwrap(), 20.2, epsilon = 1e-12);
        assert_relative_eq!(quantile(values.view(), 0.5).unwrap(), 21.0, epsilon = 1e-12);
        assert_eq!(quantile(Array1::<f64>::zeros(0).view(), 0.1), None);
    }

    #[test]
    fn test_rolling_std_needs_two_points() {
        let prices = [Some(10.0), None, Some(12.0), Some(14.0), None, None, None, None];
        let vol = rolling_std(&prices, 5);
        assert_eq!(vol[0], None);
        assert_eq!(vol[1], None);
        assert_relative_eq!(vol[2].unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(vol[3].unwrap(), 2.0, epsilon = 1e-12);
        // window [12, 14, None, None, None]
        assert_relative_eq!(vol[6].unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
        // window [14, None, None, None, None]
        assert_eq!(vol[7], None);
    }

    #[test]
    fn test_rolling_min_and_mean() {
        let values = array![5.0, 3.0, 4.0, 1.0];
        assert_eq!(rolling_min(values.view(), 3), vec![None, None, Some(3.0), Some(1.0)]);
        let means = rolling_mean(values.view(), 2);
        assert_relative_eq!(means[0], 5.0);
        assert_relative_eq!(means[1], 4.0);
        assert_relative_eq!(means[3], 2.5);
    }
}
