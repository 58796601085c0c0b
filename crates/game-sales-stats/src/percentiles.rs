/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: for `n` values the
/// `k`-th percentile sits at fractional position `(n - 1) * k / 100`. This is
/// the estimator box plots are conventionally drawn with.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use game_sales_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    let fraction = position - position.floor();
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

/// First quartile, median and third quartile of sorted data.
///
/// # Examples
///
/// ```
/// use game_sales_stats::percentiles::quartiles;
///
/// assert_eq!(quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0]), (2.0, 3.0, 4.0));
/// ```
#[must_use]
pub fn quartiles(sorted_values: &[f64]) -> (f64, f64, f64) {
    (
        compute_percentile(sorted_values, 25.0),
        compute_percentile(sorted_values, 50.0),
        compute_percentile(sorted_values, 75.0),
    )
}
