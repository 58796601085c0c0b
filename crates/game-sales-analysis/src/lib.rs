//! Exploratory analysis of video game sales
//!
//! This crate turns a raw game sales CSV into a clean table and derives the
//! charts and rankings used to explore it.
//!
//! # Overview
//!
//! 1. **Load and clean** ([`preprocessing::Preprocessor`]): read the CSV into a
//!    [`table::Table`], lowercase the column names, make the release year an
//!    integer, add the readable ESRB rating (`rating_new`) and the summed
//!    `global_sales`
//! 2. **Explore** ([`discovery::SummaryExplorer`]): releases per year, sales
//!    distributions per platform and genre, sales over time, review scores
//!    versus sales, and sales per ESRB rating
//! 3. **Rank** ([`top_five::TopFiveReporter`]): the five best-selling genres
//!    and platforms in Japan, North America and Europe
//!
//! Explorer and reporter only read the preprocessed table. Both work on the
//! recent releases (after 2013) where the analysis calls for it; see
//! [`view::recent`].
//!
//! Charts come out as [`game_sales_plot::figure::Figure`] values and are drawn
//! by a [`game_sales_plot::renderer::Renderer`].
//!
//! # Example
//!
//! ```
//! use game_sales_analysis::{
//!     preprocessing::Preprocessor, region::Region, top_five::TopFiveReporter,
//! };
//!
//! let csv = "\
//! Name,Platform,Year_of_Release,Genre,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Critic_Score,User_Score,Rating
//! A,PS4,2015,Action,1.0,0.5,0.2,0.1,80,7.5,M
//! B,3DS,2016,Role-Playing,0.3,0.2,1.5,0.05,,tbd,E
//! C,Wii,2009,Sports,15.0,9.0,3.2,2.9,76,8,E
//! ";
//! let preprocessor = Preprocessor::from_reader(csv.as_bytes()).unwrap();
//! let reporter = TopFiveReporter::new(preprocessor.data()).unwrap();
//!
//! let japan = reporter.top_genres_in(Region::Japan).unwrap();
//! assert_eq!(japan.keys(), vec!["Role-Playing", "Action"]);
//! ```

pub mod columns;
pub mod discovery;
pub mod missing;
pub mod preprocessing;
pub mod rating;
pub mod region;
pub mod table;
pub mod top_five;
pub mod view;
