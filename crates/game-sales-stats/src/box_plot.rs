use crate::percentiles;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary of a distribution as drawn in a box plot.
///
/// The box spans the first to third quartile with the median inside it. The
/// whiskers reach the most extreme data points that lie within
/// [`WHISKER_IQR_FACTOR`] interquartile ranges of the box; every point beyond
/// them is kept in [`outliers`](Self::outliers).
///
/// # Examples
///
/// ```
/// use game_sales_stats::box_plot::BoxPlotStats;
///
/// let stats = BoxPlotStats::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
/// assert_eq!(stats.median, 3.5);
/// assert_eq!(stats.whisker_high, 5.0);
/// assert_eq!(stats.outliers, vec![100.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotStats {
    /// Number of observations summarized.
    pub count: usize,
    /// Lowest value within reach of the lower whisker.
    pub whisker_low: f64,
    /// First quartile (P25).
    pub q1: f64,
    /// Median (P50).
    pub median: f64,
    /// Third quartile (P75).
    pub q3: f64,
    /// Highest value within reach of the upper whisker.
    pub whisker_high: f64,
    /// Values outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxPlotStats {
    /// Summarizes unsorted values, skipping non-finite ones.
    ///
    /// Returns `None` if no finite value remains.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Summarizes pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let (q1, median, q3) = percentiles::quartiles(sorted_values);
        let reach = (q3 - q1) * WHISKER_IQR_FACTOR;
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let within = sorted_values
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        // The quartiles always lie inside the fences, so `within` is non-empty.
        let whisker_low = within.clone().next().unwrap_or(q1);
        let whisker_high = within.last().unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            count: sorted_values.len(),
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            outliers,
        })
    }

    /// Interquartile range (`q3 - q1`).
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert_eq!(BoxPlotStats::new([]), None);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let stats = BoxPlotStats::new([f64::NAN, 1.0, f64::INFINITY, 2.0, 3.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.median, 2.0);
        assert!(stats.outliers.is_empty());
        assert_eq!(BoxPlotStats::new([f64::NAN, f64::NEG_INFINITY]), None);
    }

    #[test]
    fn test_single_value() {
        let stats = BoxPlotStats::new([0.4]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.whisker_low, 0.4);
        assert_eq!(stats.q1, 0.4);
        assert_eq!(stats.median, 0.4);
        assert_eq!(stats.q3, 0.4);
        assert_eq!(stats.whisker_high, 0.4);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_quartiles_without_outliers() {
        let stats = BoxPlotStats::new([5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.iqr(), 2.0);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 5.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_outliers_on_both_sides() {
        let values = [-50.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 60.0];
        let stats = BoxPlotStats::new(values).unwrap();
        assert_eq!(stats.count, values.len());
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 9.0);
        assert_eq!(stats.outliers, vec![-50.0, 60.0]);
    }

    #[test]
    fn test_outliers_are_kept_beyond_display_range() {
        // Sales data is typically clamped to a small display range; the
        // summary itself must still see the large values.
        let stats = BoxPlotStats::new([0.1, 0.2, 0.3, 0.4, 14.6]).unwrap();
        assert_eq!(stats.median, 0.3);
        assert_eq!(stats.outliers, vec![14.6]);
    }
}
