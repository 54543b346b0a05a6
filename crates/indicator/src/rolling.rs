//! Windowed aggregate primitives.
//!
//! Rolling mean and rolling population standard deviation over a flat
//! numeric series with a fixed window length. Output length always equals
//! input length; indices without a full window of history carry `None`.

/// Rolling arithmetic mean over a fixed window.
///
/// The value at index `i` is the mean of `values[i + 1 - window ..= i]`;
/// the first `window - 1` indices are `None`. A window of zero, or one
/// larger than the input, yields all `None` rather than an error.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if window == 0 || window > len {
        return out;
    }

    for i in (window - 1)..len {
        let start = i + 1 - window;
        let sum: f64 = values[start..=i].iter().sum();
        out[i] = Some(sum / window as f64);
    }

    out
}

/// Rolling population standard deviation over a fixed window.
///
/// `means` must be the rolling mean of `values` over the same window (the
/// output of [`rolling_mean`]): the deviation at index `i` is measured
/// against the mean of the identical window, not a running or global mean.
/// Indices where `means[i]` is `None` stay `None`.
///
/// The divisor is `window` (population), not `window - 1` (sample).
pub fn rolling_population_std_dev(
    values: &[f64],
    window: usize,
    means: &[Option<f64>],
) -> Vec<Option<f64>> {
    let len = values.len();
    let mut out = vec![None; len];
    if window == 0 || window > len {
        return out;
    }

    for i in (window - 1)..len {
        let mean = match means.get(i).copied().flatten() {
            Some(mean) => mean,
            None => continue,
        };

        let start = i + 1 - window;
        let sum_sq: f64 = values[start..=i]
            .iter()
            .map(|value| {
                let diff = value - mean;
                diff * diff
            })
            .sum();

        out[i] = Some((sum_sq / window as f64).sqrt());
    }

    out
}
