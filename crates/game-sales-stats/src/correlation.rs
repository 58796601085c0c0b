/// Pearson correlation coefficient between two paired samples.
///
/// Only pairs where both values are present take part (pairwise-complete
/// observations), so a missing score does not drop the matching sales value
/// from any other computation.
///
/// Returns `None` when fewer than two complete pairs remain or when either
/// side has zero variance, since the coefficient is undefined there.
///
/// # Examples
///
/// ```
/// use game_sales_stats::correlation::pearson;
///
/// let x = [Some(1.0), Some(2.0), None, Some(3.0)];
/// let y = [Some(2.0), Some(4.0), Some(5.0), Some(6.0)];
/// let r = pearson(x, y).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson<X, Y>(x: X, y: Y) -> Option<f64>
where
    X: IntoIterator<Item = Option<f64>>,
    Y: IntoIterator<Item = Option<f64>>,
{
    let pairs = x
        .into_iter()
        .zip(y)
        .filter_map(|pair| match pair {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((a, b)),
            _ => None,
        })
        .collect::<Vec<_>>();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
