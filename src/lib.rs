//! Scrape ESPN fantasy baseball league pages into normalized tables.
//!
//! Start with [`League::connect`] on an [`EspnClient`] (or any other
//! [`PageSource`]); the league then serves standings, draft results, active
//! stats and transactions as [`NormalizedTable`]s.

mod client;
mod error;
mod espn_scraper;
mod league;
mod model;

pub use client::{EspnClient, PageSource, DEFAULT_BASE_URL};
pub use error::{EspnError, Result};
pub use espn_scraper::extract::{
    extract_composite, extract_player_dtd, extract_player_keeper, PLAYER_DTD_PATTERN,
    PLAYER_KEEPER_PATTERN,
};
pub use espn_scraper::header::{
    merge_sub_headers, resolve_headers, resolve_sub_headers, HeaderCell, PLACEHOLDER_BASE,
};
pub use espn_scraper::shape::TableShape;
pub use espn_scraper::{read_all_rows, read_data_rows};
pub use league::{League, Team};
pub use model::*;
