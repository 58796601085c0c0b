//! Best-selling genres and platforms per region over the recent releases.
//!
//! Rankings are computed independently for each [`Region`]: recent games are
//! grouped by genre or platform in the order the keys first appear, the
//! region's sales are summed (missing as zero) and the groups are sorted by
//! that sum with a stable sort, so equal sums keep their first-appearance
//! order. The first [`TOP_N`] groups make the ranking.

use std::fmt;

use game_sales_plot::figure::{BarChart, Chart, Figure, Orientation, Panel};
use serde::Serialize;
use tracing::debug;

use crate::{
    columns,
    region::Region,
    table::{SchemaError, Table},
    view,
};

/// Length of each ranking.
pub const TOP_N: usize = 5;

/// Column a ranking groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankedBy {
    Genre,
    Platform,
}

impl RankedBy {
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Genre => columns::GENRE,
            Self::Platform => columns::PLATFORM,
        }
    }

    const fn plural(self) -> &'static str {
        match self {
            Self::Genre => "Genres",
            Self::Platform => "Platforms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub key: String,
    /// Sales in the ranking's region, in millions.
    pub sales: f64,
}

/// Top entries of one region, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub region: Region,
    pub ranked_by: RankedBy,
    pub entries: Vec<RankEntry>,
}

impl Ranking {
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Top {TOP_N} {} in {}",
            self.ranked_by.plural().to_lowercase(),
            self.region
        )?;
        for (rank, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{:>3}. {:<16} {:>8.2}", rank + 1, entry.key, entry.sales)?;
        }
        Ok(())
    }
}

/// Rankings of every region for one grouping column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalRankings {
    pub ranked_by: RankedBy,
    /// One ranking per region, in [`Region::ALL`] order.
    pub rankings: Vec<Ranking>,
}

impl RegionalRankings {
    #[must_use]
    pub fn get(&self, region: Region) -> Option<&Ranking> {
        self.rankings.iter().find(|r| r.region == region)
    }

    /// One bar chart per region, side by side.
    #[must_use]
    pub fn figure(&self) -> Figure {
        let name = format!("top_{}s_by_region", self.ranked_by.column());
        let title = format!("Top {TOP_N} Game {} by Region", self.ranked_by.plural());
        self.rankings.iter().fold(
            Figure::new(name)
                .with_title(title)
                .with_grid(1, self.rankings.len().max(1))
                .with_size(1800, 500),
            |figure, ranking| {
                let bars = BarChart::from_pairs(
                    Orientation::Vertical,
                    ranking.entries.iter().map(|e| (e.key.clone(), e.sales)),
                );
                figure.with_panel(Panel::new(Chart::Bar(bars)).with_title(ranking.region.title()))
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct TopFiveReporter {
    recent: Table,
}

impl TopFiveReporter {
    pub fn new(data: &Table) -> Result<Self, SchemaError> {
        Ok(Self {
            recent: view::recent(data)?,
        })
    }

    pub fn ranking(&self, ranked_by: RankedBy, region: Region) -> Result<Ranking, SchemaError> {
        let keys = self.recent.text(ranked_by.column())?;
        let sales = self.recent.numbers(region.sales_column())?;

        let mut entries = view::group_sum(keys, &sales)
            .into_iter()
            .map(|(key, sales)| RankEntry { key, sales })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| b.sales.total_cmp(&a.sales));
        entries.truncate(TOP_N);

        debug!(?ranked_by, %region, top = ?entries.first().map(|e| &e.key), "ranking computed");
        Ok(Ranking {
            region,
            ranked_by,
            entries,
        })
    }

    pub fn top_genres_in(&self, region: Region) -> Result<Ranking, SchemaError> {
        self.ranking(RankedBy::Genre, region)
    }

    pub fn top_platforms_in(&self, region: Region) -> Result<Ranking, SchemaError> {
        self.ranking(RankedBy::Platform, region)
    }

    pub fn by_region(&self, ranked_by: RankedBy) -> Result<RegionalRankings, SchemaError> {
        let rankings = Region::ALL
            .into_iter()
            .map(|region| self.ranking(ranked_by, region))
            .collect::<Result<_, _>>()?;
        Ok(RegionalRankings {
            ranked_by,
            rankings,
        })
    }

    pub fn top_genres_by_region(&self) -> Result<RegionalRankings, SchemaError> {
        self.by_region(RankedBy::Genre)
    }

    pub fn top_platforms_by_region(&self) -> Result<RegionalRankings, SchemaError> {
        self.by_region(RankedBy::Platform)
    }
}
