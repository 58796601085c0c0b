//! Statistical utilities for the game sales analysis.
//!
//! This crate provides the small set of numeric tools the charts and reports
//! are built from:
//!
//! - **Percentiles**: Linearly interpolated percentile values for a dataset
//! - **Box plot summaries**: Quartiles, whiskers and outliers of a distribution
//! - **Correlation**: Pearson correlation over pairwise-complete observations
//!
//! # Modules
//!
//! - [`percentiles`]: Interpolated percentiles and quartiles
//! - [`box_plot`]: Five-number summaries with 1.5 IQR whiskers
//! - [`correlation`]: Pearson correlation coefficient with missing-value handling
//!
//! # Examples
//!
//! ## Computing percentiles
//!
//! ```
//! use game_sales_stats::percentiles::compute_percentile;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_percentile(&values, 50.0), 3.0);
//! ```
//!
//! ## Summarizing a distribution for a box plot
//!
//! ```
//! use game_sales_stats::box_plot::BoxPlotStats;
//!
//! let sales = [0.02, 0.1, 0.25, 0.4, 1.2, 7.5];
//! let stats = BoxPlotStats::new(sales).unwrap();
//! assert!(stats.q1 <= stats.median && stats.median <= stats.q3);
//! assert_eq!(stats.outliers, vec![7.5]);
//! ```
//!
//! ## Correlating scores with sales
//!
//! ```
//! use game_sales_stats::correlation::pearson;
//!
//! let critic_score = [Some(60.0), Some(75.0), None, Some(90.0)];
//! let sales = [Some(0.2), Some(0.5), Some(3.0), Some(1.1)];
//! let r = pearson(critic_score, sales).unwrap();
//! assert!(r > 0.0);
//! ```

pub mod box_plot;
pub mod correlation;
pub mod percentiles;
