//! Distribution and trend views of the preprocessed sales table
//!
//! [`SummaryExplorer`] borrows the preprocessed table and keeps a second,
//! owned view of the recent releases (see [`view::recent`]). Each operation
//! reads one of the two views and returns the numbers it computed together
//! with, or as, a [`Figure`] ready for a
//! [`Renderer`](game_sales_plot::renderer::Renderer).
//!
//! | operation | view | chart |
//! |---|---|---|
//! | [`release_by_year`](SummaryExplorer::release_by_year) | full | bars, games per year |
//! | [`global_sales_by_platform`](SummaryExplorer::global_sales_by_platform) | recent | box per platform |
//! | [`global_sales_by_genre`](SummaryExplorer::global_sales_by_genre) | recent | box per genre |
//! | [`sales_dynamics_by_platform`](SummaryExplorer::sales_dynamics_by_platform) | full | line per platform |
//! | [`plot_sales_vs_scores`](SummaryExplorer::plot_sales_vs_scores) | recent | 3x2 scatter grid |
//! | [`sales_by_esrb`](SummaryExplorer::sales_by_esrb) | recent | horizontal bars per region |
//!
//! # Sales versus scores
//!
//! The scatter plots only show games that sold fewer than
//! [`SCATTER_SALES_LIMIT`] million copies, while the reported correlations
//! use every recent game of the platform.

use std::{collections::BTreeMap, fmt, ops::Range};

use game_sales_plot::figure::{
    BarChart, BarSeries, BoxChart, BoxGroup, Chart, Figure, Line, LineChart, Orientation, Panel,
    ScatterChart, SeriesColor,
};
use game_sales_stats::{box_plot::BoxPlotStats, correlation::pearson};
use serde::Serialize;
use tracing::debug;

use crate::{
    columns,
    region::{Region, ScorePlatform},
    table::{SchemaError, Table},
    view,
};

/// Visible sales range of the box plots, in millions.
pub const SALES_DISPLAY_RANGE: Range<f64> = 0.0..2.0;

/// Games at or above this many million copies are left out of the scatter plots.
pub const SCATTER_SALES_LIMIT: f64 = 5.0;

/// Regions of the ESRB breakdown, in series order.
const ESRB_REGIONS: [Region; 3] = [Region::Europe, Region::Japan, Region::NorthAmerica];

const COPIES_SOLD_LABEL: &str = "Number of copies sold, millions";

/// Chart produced by [`SummaryExplorer::figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ReleaseByYear,
    GlobalSalesByPlatform,
    GlobalSalesByGenre,
    SalesDynamicsByPlatform,
    SalesVsScores,
    SalesByEsrb,
}

impl View {
    pub const ALL: [Self; 6] = [
        Self::ReleaseByYear,
        Self::GlobalSalesByPlatform,
        Self::GlobalSalesByGenre,
        Self::SalesDynamicsByPlatform,
        Self::SalesVsScores,
        Self::SalesByEsrb,
    ];
}

/// Pearson correlation of review scores with global sales for one platform.
///
/// `None` where the coefficient is undefined (fewer than two scored games,
/// or no variation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCorrelation {
    pub platform: ScorePlatform,
    /// Recent games of the platform the correlations were computed over.
    pub games: usize,
    pub critic_score: Option<f64>,
    pub user_score: Option<f64>,
}

impl fmt::Display for ScoreCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Coefficient(Option<f64>);
        impl fmt::Display for Coefficient {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(r) => write!(f, "{r}"),
                    None => f.write_str("NaN"),
                }
            }
        }
        writeln!(f, "Platform {}", self.platform)?;
        writeln!(
            f,
            "Correlation of critics scores and sales: {}",
            Coefficient(self.critic_score)
        )?;
        write!(
            f,
            "Correlation of users scores and sales: {}",
            Coefficient(self.user_score)
        )
    }
}

/// Scatter data and correlations for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesVsScores {
    pub platform: ScorePlatform,
    /// `(global_sales, critic_score)` of the plotted games.
    pub critic_points: Vec<(f64, f64)>,
    /// `(global_sales, user_score)` of the plotted games.
    pub user_points: Vec<(f64, f64)>,
    pub correlation: ScoreCorrelation,
}

/// Recent sales per region for one readable ESRB rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EsrbSales {
    pub rating: String,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub na_sales: f64,
}

impl EsrbSales {
    fn sales(&self, region: Region) -> f64 {
        match region {
            Region::Europe => self.eu_sales,
            Region::Japan => self.jp_sales,
            Region::NorthAmerica => self.na_sales,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryExplorer<'a> {
    data: &'a Table,
    recent: Table,
}

impl<'a> SummaryExplorer<'a> {
    pub fn new(data: &'a Table) -> Result<Self, SchemaError> {
        let recent = view::recent(data)?;
        debug!(rows = data.len(), recent = recent.len(), "explorer views ready");
        Ok(Self { data, recent })
    }

    #[must_use]
    pub fn data(&self) -> &Table {
        self.data
    }

    #[must_use]
    pub fn recent(&self) -> &Table {
        &self.recent
    }

    pub fn figure(&self, view: View) -> Result<Figure, SchemaError> {
        match view {
            View::ReleaseByYear => self.release_by_year(),
            View::GlobalSalesByPlatform => self.global_sales_by_platform(),
            View::GlobalSalesByGenre => self.global_sales_by_genre(),
            View::SalesDynamicsByPlatform => self.sales_dynamics_by_platform(),
            View::SalesVsScores => self.plot_sales_vs_scores().map(|(figure, _)| figure),
            View::SalesByEsrb => self.sales_by_esrb(),
        }
    }

    /// Named games per release year, in ascending year order.
    pub fn release_counts(&self) -> Result<Vec<(i64, usize)>, SchemaError> {
        let years = self.data.ints(columns::YEAR_OF_RELEASE)?;
        let names = self.data.text(columns::NAME)?;
        let mut counts = view::group_count(years, names.iter().map(Option::is_some))
            .into_iter()
            .collect::<Vec<_>>();
        counts.sort_unstable_by_key(|(year, _)| *year);
        Ok(counts)
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn release_by_year(&self) -> Result<Figure, SchemaError> {
        let counts = self.release_counts()?;
        let bars = BarChart::from_pairs(
            Orientation::Vertical,
            counts
                .into_iter()
                .map(|(year, count)| (year.to_string(), count as f64)),
        );
        Ok(Figure::new("release_by_year").with_size(1400, 600).with_panel(
            Panel::new(Chart::Bar(bars))
                .with_x_label("Year")
                .with_y_label("Number of games released"),
        ))
    }

    /// Box plot summaries of recent global sales grouped by `column`, ordered by key.
    ///
    /// The summaries cover every value; [`SALES_DISPLAY_RANGE`] only limits the chart.
    pub fn sales_distribution(&self, column: &str) -> Result<Vec<BoxGroup>, SchemaError> {
        let keys = self.recent.text(column)?;
        let sales = self.recent.floats(columns::GLOBAL_SALES)?;
        let mut groups = view::group_values(keys, sales)
            .into_iter()
            .filter_map(|(label, values)| {
                BoxPlotStats::new(values).map(|stats| BoxGroup { label, stats })
            })
            .collect::<Vec<_>>();
        groups.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(groups)
    }

    pub fn global_sales_by_platform(&self) -> Result<Figure, SchemaError> {
        self.sales_box_figure(columns::PLATFORM)
    }

    pub fn global_sales_by_genre(&self) -> Result<Figure, SchemaError> {
        self.sales_box_figure(columns::GENRE)
    }

    fn sales_box_figure(&self, column: &str) -> Result<Figure, SchemaError> {
        let groups = self.sales_distribution(column)?;
        Ok(Figure::new(format!("global_sales_by_{column}"))
            .with_title(format!("Boxplot grouped by {column}"))
            .with_size(1500, 500)
            .with_panel(
                Panel::new(Chart::Box(BoxChart { groups }))
                    .with_title(columns::GLOBAL_SALES)
                    .with_x_label(column)
                    .with_value_range(SALES_DISPLAY_RANGE),
            ))
    }

    /// Global sales per platform and year, platforms in key order and years ascending.
    ///
    /// Rows without a year or platform are left out.
    pub fn sales_dynamics(&self) -> Result<BTreeMap<String, Vec<(i64, f64)>>, SchemaError> {
        let years = self.data.ints(columns::YEAR_OF_RELEASE)?;
        let platforms = self.data.text(columns::PLATFORM)?;
        let sales = self.data.floats(columns::GLOBAL_SALES)?;

        let keys = platforms
            .iter()
            .zip(years)
            .map(|(platform, year)| Some((platform.clone()?, (*year)?)))
            .collect::<Vec<_>>();
        let mut lines = BTreeMap::<String, Vec<(i64, f64)>>::new();
        for ((platform, year), total) in view::group_sum(&keys, sales) {
            lines.entry(platform).or_default().push((year, total));
        }
        for points in lines.values_mut() {
            points.sort_unstable_by_key(|(year, _)| *year);
        }
        Ok(lines)
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn sales_dynamics_by_platform(&self) -> Result<Figure, SchemaError> {
        let lines = self
            .sales_dynamics()?
            .into_iter()
            .map(|(platform, points)| Line {
                label: platform,
                points: points
                    .into_iter()
                    .map(|(year, total)| (year as f64, total))
                    .collect(),
            })
            .collect();
        Ok(Figure::new("sales_dynamics_by_platform")
            .with_size(2000, 1000)
            .with_panel(
                Panel::new(Chart::Line(LineChart { lines }))
                    .with_x_label(columns::YEAR_OF_RELEASE)
                    .with_y_label(columns::GLOBAL_SALES),
            ))
    }

    /// Scatter points and score correlations of one platform's recent games.
    pub fn sales_vs_scores_for(
        &self,
        platform: ScorePlatform,
    ) -> Result<SalesVsScores, SchemaError> {
        let platforms = self.recent.text(columns::PLATFORM)?;
        let sales = self.recent.floats(columns::GLOBAL_SALES)?;
        let critic = self.recent.numbers(columns::CRITIC_SCORE)?;
        let user = self.recent.numbers(columns::USER_SCORE)?;

        let rows = platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.as_deref() == Some(platform.code()))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        let plotted = |scores: &[Option<f64>]| {
            rows.iter()
                .filter_map(|&i| Some((sales[i]?, scores[i]?)))
                .filter(|(total, _)| *total < SCATTER_SALES_LIMIT)
                .collect::<Vec<_>>()
        };
        let correlate = |scores: &[Option<f64>]| {
            pearson(
                rows.iter().map(|&i| scores[i]),
                rows.iter().map(|&i| sales[i]),
            )
        };

        let correlation = ScoreCorrelation {
            platform,
            games: rows.len(),
            critic_score: correlate(&critic),
            user_score: correlate(&user),
        };
        debug!(
            %platform,
            games = correlation.games,
            critic = ?correlation.critic_score,
            user = ?correlation.user_score,
            "score correlations computed"
        );
        Ok(SalesVsScores {
            platform,
            critic_points: plotted(&critic),
            user_points: plotted(&user),
            correlation,
        })
    }

    /// Scatter grid for the score platforms plus their correlations.
    pub fn plot_sales_vs_scores(&self) -> Result<(Figure, Vec<ScoreCorrelation>), SchemaError> {
        let mut figure = Figure::new("sales_vs_scores")
            .with_grid(ScorePlatform::ALL.len(), 2)
            .with_size(1500, 1000);
        let mut correlations = vec![];
        for platform in ScorePlatform::ALL {
            let scores = self.sales_vs_scores_for(platform)?;
            let color = platform_color(platform);
            let name = platform.display_name();
            figure = figure
                .with_panel(
                    Panel::new(Chart::Scatter(ScatterChart {
                        color,
                        points: scores.critic_points,
                    }))
                    .with_title(format!("Impact of critic scores on game sales, {name}"))
                    .with_x_label(COPIES_SOLD_LABEL)
                    .with_y_label("Critic scores, 0 to 100"),
                )
                .with_panel(
                    Panel::new(Chart::Scatter(ScatterChart {
                        color,
                        points: scores.user_points,
                    }))
                    .with_title(format!("Impact of user scores on game sales, {name}"))
                    .with_x_label(COPIES_SOLD_LABEL)
                    .with_y_label("User scores, 0 to 10"),
                );
            correlations.push(scores.correlation);
        }
        Ok((figure, correlations))
    }

    pub fn score_correlations(&self) -> Result<Vec<ScoreCorrelation>, SchemaError> {
        ScorePlatform::ALL
            .into_iter()
            .map(|platform| Ok(self.sales_vs_scores_for(platform)?.correlation))
            .collect()
    }

    /// Recent regional sales per readable rating, ordered by rating.
    pub fn esrb_sales(&self) -> Result<Vec<EsrbSales>, SchemaError> {
        let ratings = self.recent.text(columns::RATING_NEW)?;
        let eu = view::group_sum(ratings, &self.recent.numbers(columns::EU_SALES)?);
        let jp = view::group_sum(ratings, &self.recent.numbers(columns::JP_SALES)?);
        let na = view::group_sum(ratings, &self.recent.numbers(columns::NA_SALES)?);

        let mut rows = eu
            .into_iter()
            .map(|(rating, eu_sales)| EsrbSales {
                jp_sales: jp.get(&rating).copied().unwrap_or(0.0),
                na_sales: na.get(&rating).copied().unwrap_or(0.0),
                rating,
                eu_sales,
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| a.rating.cmp(&b.rating));
        Ok(rows)
    }

    pub fn sales_by_esrb(&self) -> Result<Figure, SchemaError> {
        let rows = self.esrb_sales()?;
        let bars = BarChart {
            orientation: Orientation::Horizontal,
            categories: rows.iter().map(|r| r.rating.clone()).collect(),
            series: ESRB_REGIONS
                .into_iter()
                .map(|region| BarSeries {
                    label: Some(region.title().to_owned()),
                    values: rows.iter().map(|r| r.sales(region)).collect(),
                })
                .collect(),
        };
        Ok(Figure::new("sales_by_esrb").with_panel(
            Panel::new(Chart::Bar(bars))
                .with_x_label("Number of games sold, millions")
                .with_y_label(columns::RATING_NEW),
        ))
    }
}

fn platform_color(platform: ScorePlatform) -> SeriesColor {
    match platform {
        ScorePlatform::XOne => SeriesColor::Red,
        ScorePlatform::Ps4 => SeriesColor::Blue,
        ScorePlatform::Pc => SeriesColor::Green,
    }
}

#[cfg(test)]
mod tests {
    use game_sales_plot::renderer::{RecordingRenderer, Renderer};

    use super::*;
    use crate::preprocessing::Preprocessor;

    const HEADER: &str = "Name,Platform,Year_of_Release,Genre,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Critic_Score,User_Score,Rating";

    fn table(rows: &[&str]) -> Table {
        let csv = format!("{HEADER}\n{}\n", rows.join("\n"));
        Preprocessor::from_reader(csv.as_bytes())
            .unwrap()
            .into_data()
    }

    fn sample() -> Table {
        table(&[
            "A,PS4,2015,Action,1.0,0.5,0,0.1,80,7.5,E",
            "B,PS4,2016,Shooter,2.0,1.0,0.1,0.2,90,8.0,M",
            "C,XOne,2014,Action,0.6,0.2,0,0.05,70,6.0,T",
            "D,PC,2013,Strategy,0.1,0.3,0,0.02,85,8.5,T",
            "E,Wii,,Sports,5.0,3.0,1.0,0.5,,,E",
            "F,PS4,2015,Action,4.0,3.0,0.5,0.6,95,9.0,M",
            "G,PS4,2016,Sports,0.3,0.4,0.01,0.1,60,tbd,",
            ",PC,2014,Misc,0.01,0.01,0,0,,,",
        ])
    }

    #[test]
    fn test_recent_view_excludes_old_and_missing_years() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        assert_eq!(explorer.data().len(), 8);
        assert_eq!(explorer.recent().len(), 6);
        assert!(
            explorer
                .recent()
                .ints(columns::YEAR_OF_RELEASE)
                .unwrap()
                .iter()
                .all(|y| y.is_some_and(|y| y > 2013))
        );
    }

    #[test]
    fn test_release_counts_skip_missing_names_and_years() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        assert_eq!(
            explorer.release_counts().unwrap(),
            vec![(2013, 1), (2014, 1), (2015, 2), (2016, 2)]
        );

        let figure = explorer.release_by_year().unwrap();
        let Chart::Bar(bars) = &figure.panels[0].chart else {
            panic!("expected bars");
        };
        assert_eq!(bars.categories, vec!["2013", "2014", "2015", "2016"]);
        assert_eq!(figure.panels[0].x_label.as_deref(), Some("Year"));
    }

    #[test]
    fn test_box_plots_keep_full_distribution_and_clamp_display() {
        let data = table(&[
            "A,PS4,2015,Action,0.1,0,0,0,,,E",
            "B,PS4,2015,Action,0.2,0,0,0,,,E",
            "C,PS4,2015,Action,0.3,0,0,0,,,E",
            "D,PS4,2015,Action,0.4,0,0,0,,,E",
            "E,PS4,2015,Action,14.6,0,0,0,,,E",
            "F,3DS,2015,Puzzle,0.5,0,0,0,,,E",
        ]);
        let explorer = SummaryExplorer::new(&data).unwrap();
        let groups = explorer.sales_distribution(columns::PLATFORM).unwrap();
        let labels = groups.iter().map(|g| g.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["3DS", "PS4"]);
        assert_eq!(groups[1].stats.count, 5);
        assert_eq!(groups[1].stats.outliers, vec![14.6]);

        let figure = explorer.global_sales_by_platform().unwrap();
        assert_eq!(figure.name, "global_sales_by_platform");
        assert_eq!(figure.panels[0].value_range, Some(0.0..2.0));
        assert!(explorer.global_sales_by_genre().is_ok());
    }

    #[test]
    fn test_sales_dynamics_sums_by_platform_and_year() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        let dynamics = explorer.sales_dynamics().unwrap();
        assert_eq!(
            dynamics.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["PC", "PS4", "XOne"]
        );
        let ps4 = &dynamics["PS4"];
        assert_eq!(ps4.iter().map(|(y, _)| *y).collect::<Vec<_>>(), vec![2015, 2016]);
        // A (1.6) + F (8.1)
        assert!((ps4[0].1 - 9.7).abs() < 1e-9, "got {}", ps4[0].1);
        // Wii row has no year
        assert!(!dynamics.contains_key("Wii"));
    }

    #[test]
    fn test_correlation_uses_unrestricted_subset() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        let ps4 = explorer.sales_vs_scores_for(ScorePlatform::Ps4).unwrap();

        // F sold 8.1 million: used for the correlation, not plotted
        assert_eq!(ps4.correlation.games, 4);
        assert!(ps4.critic_points.iter().all(|(sales, _)| *sales < 5.0));
        assert_eq!(ps4.critic_points.len(), 3);
        // G has no user score
        assert_eq!(ps4.user_points.len(), 2);

        let with_f = pearson(
            [Some(80.0), Some(90.0), Some(95.0), Some(60.0)],
            [Some(1.6), Some(3.3), Some(8.1), Some(0.81)],
        );
        let critic = ps4.correlation.critic_score.unwrap();
        assert!((critic - with_f.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_score_skips_only_that_value() {
        let data = table(&[
            "A,PS4,2015,Action,1.0,0.5,0,0.1,n.a.,7.5,E",
            "B,PS4,2016,Shooter,2.0,1.0,0.1,0.2,90,8.0,M",
            "C,PS4,2015,Action,1.0,0,0,0,70,6.0,T",
            "D,PS4,2016,Sports,0.5,0,0,0,80,9.0,E",
        ]);
        let explorer = SummaryExplorer::new(&data).unwrap();
        let (figure, correlations) = explorer.plot_sales_vs_scores().unwrap();
        assert_eq!(figure.panels.len(), 6);

        let ps4 = explorer.sales_vs_scores_for(ScorePlatform::Ps4).unwrap();
        assert_eq!(ps4.correlation.games, 4);
        assert_eq!(ps4.critic_points.len(), 3);
        assert_eq!(ps4.user_points.len(), 4);

        let expected = pearson(
            [Some(90.0), Some(70.0), Some(80.0)],
            [Some(3.3), Some(1.0), Some(0.5)],
        )
        .unwrap();
        let critic = ps4.correlation.critic_score.unwrap();
        assert!((critic - expected).abs() < 1e-9, "{critic} != {expected}");
        assert!(ps4.correlation.user_score.is_some());
        assert_eq!(correlations[1], ps4.correlation);
    }

    #[test]
    fn test_non_finite_sales_do_not_break_box_plots() {
        let data = table(&[
            "A,PS4,2015,Action,NAN,0,0,0,,,E",
            "B,PS4,2015,Action,0.5,inf,0,0,,,E",
            "C,PS4,2015,Action,0.7,0,0,0,,,E",
        ]);
        let explorer = SummaryExplorer::new(&data).unwrap();
        let groups = explorer.sales_distribution(columns::PLATFORM).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].stats.count, 3);
        assert_eq!(groups[0].stats.q1, 0.25);
        assert!(explorer.global_sales_by_genre().is_ok());
    }

    #[test]
    fn test_undefined_correlation_prints_nan() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        let xone = explorer.sales_vs_scores_for(ScorePlatform::XOne).unwrap();
        assert_eq!(xone.correlation.critic_score, None);
        assert_eq!(
            xone.correlation.to_string(),
            "Platform XOne\n\
             Correlation of critics scores and sales: NaN\n\
             Correlation of users scores and sales: NaN"
        );
    }

    #[test]
    fn test_unsupported_platform_key() {
        let err = "Wii".parse::<ScorePlatform>().unwrap_err();
        assert_eq!(err.kind, "platform");
    }

    #[test]
    fn test_scatter_grid_layout() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        let (figure, correlations) = explorer.plot_sales_vs_scores().unwrap();
        assert_eq!(figure.grid, (3, 2));
        assert_eq!(figure.panels.len(), 6);
        let colors = figure
            .panels
            .iter()
            .map(|p| match &p.chart {
                Chart::Scatter(s) => s.color,
                other => panic!("unexpected chart {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            colors,
            vec![
                SeriesColor::Red,
                SeriesColor::Red,
                SeriesColor::Blue,
                SeriesColor::Blue,
                SeriesColor::Green,
                SeriesColor::Green
            ]
        );
        let platforms = correlations.iter().map(|c| c.platform).collect::<Vec<_>>();
        assert_eq!(platforms, ScorePlatform::ALL.to_vec());
        assert_eq!(correlations, explorer.score_correlations().unwrap());
    }

    #[test]
    fn test_esrb_sales_by_region() {
        let data = sample();
        let explorer = SummaryExplorer::new(&data).unwrap();
        let rows = explorer.esrb_sales().unwrap();
        let ratings = rows.iter().map(|r| r.rating.as_str()).collect::<Vec<_>>();
        assert_eq!(
            ratings,
            vec!["everyone", "mature 17+", "rating pending", "teen 13+"]
        );
        let mature = &rows[1];
        assert!((mature.na_sales - 6.0).abs() < 1e-9);
        assert!((mature.eu_sales - 4.0).abs() < 1e-9);
        assert!((mature.jp_sales - 0.6).abs() < 1e-9);

        let figure = explorer.sales_by_esrb().unwrap();
        let Chart::Bar(bars) = &figure.panels[0].chart else {
            panic!("expected bars");
        };
        assert_eq!(bars.orientation, Orientation::Horizontal);
        let legend = bars
            .series
            .iter()
            .map(|s| s.label.as_deref().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(legend, vec!["Europe", "Japan", "North America"]);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let data = Table::new(vec![crate::table::Column::int(
            columns::YEAR_OF_RELEASE,
            [Some(2015)],
        )])
        .unwrap();
        let explorer = SummaryExplorer::new(&data).unwrap();
        assert_eq!(
            explorer.release_counts().unwrap_err(),
            SchemaError::MissingColumn {
                name: columns::NAME.into()
            }
        );
        assert!(matches!(
            explorer.sales_by_esrb(),
            Err(SchemaError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_every_view_renders_without_touching_the_table() {
        let data = sample();
        let before = data.clone();
        let explorer = SummaryExplorer::new(&data).unwrap();
        let mut renderer = RecordingRenderer::new();
        for view in View::ALL {
            let figure = explorer.figure(view).unwrap();
            renderer.render(&figure).unwrap();
            renderer.render(&figure).unwrap();
        }
        assert_eq!(renderer.figures.len(), View::ALL.len() * 2);
        assert!(renderer.get("sales_by_esrb").is_some());
        assert_eq!(data, before);
    }
}
