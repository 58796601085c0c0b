//! Column names of the preprocessed table.
//!
//! Raw CSV headers match these names case-insensitively; the preprocessor
//! lowercases them before any other pass runs.

pub const NAME: &str = "name";
pub const PLATFORM: &str = "platform";
pub const YEAR_OF_RELEASE: &str = "year_of_release";
pub const GENRE: &str = "genre";
pub const NA_SALES: &str = "na_sales";
pub const EU_SALES: &str = "eu_sales";
pub const JP_SALES: &str = "jp_sales";
pub const OTHER_SALES: &str = "other_sales";
pub const CRITIC_SCORE: &str = "critic_score";
pub const USER_SCORE: &str = "user_score";
pub const RATING: &str = "rating";

/// Derived: readable ESRB label.
pub const RATING_NEW: &str = "rating_new";
/// Derived: sum of the four regional sales columns.
pub const GLOBAL_SALES: &str = "global_sales";

/// Regional sales columns summed into [`GLOBAL_SALES`].
pub const REGIONAL_SALES: [&str; 4] = [NA_SALES, EU_SALES, JP_SALES, OTHER_SALES];

/// Columns read as numbers whatever their cells look like.
pub const NUMERIC: [&str; 6] = [
    NA_SALES,
    EU_SALES,
    JP_SALES,
    OTHER_SALES,
    CRITIC_SCORE,
    USER_SCORE,
];

/// Columns read as text whatever their cells look like.
pub const TEXT: [&str; 4] = [NAME, PLATFORM, GENRE, RATING];
