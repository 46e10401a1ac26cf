use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::client::PageSource;
use crate::error::{EspnError, Result};
use crate::espn_scraper::extract::extract_player_dtd;
use crate::espn_scraper::header::resolve_headers;
use crate::espn_scraper::shape::TableShape;
use crate::espn_scraper::{self, read_data_rows, LeagueKey, MISSING_PLACEHOLDER};
use crate::model::{ColumnSpec, NormalizedTable, RawTable, TeamDirectory, TeamEntry, Value};

/// Header of the combined name cell on the active stats page.
pub(crate) const PLAYER_COLUMN: &str = "PLAYER, TEAM POS";

/// Identity columns that lead the output: MANAGER, then the extracted player fields.
const IDENTITY_COLUMNS: usize = 4;

#[instrument(skip(source))]
pub(crate) async fn get_active_stats<S: PageSource + ?Sized>(
    source: &S,
    key: &LeagueKey,
    team: &TeamEntry,
    batter: bool,
) -> Result<NormalizedTable> {
    let url = key.active_stats(&team.id, batter);
    let document = espn_scraper::get_document(source, &url).await?;
    let table = parse_active_stats(&document, &team.name)?;
    debug!(rows = table.row_count(), team_id = %team.id, "parsed active stats");
    Ok(table)
}

/// Active stats of every team in directory order, stacked.
#[instrument(skip(source, teams))]
pub(crate) async fn get_league_active_stats<S: PageSource + ?Sized>(
    source: &S,
    key: &LeagueKey,
    teams: &TeamDirectory,
    batter: bool,
) -> Result<NormalizedTable> {
    let mut tables = Vec::with_capacity(teams.len());
    for team in teams.iter() {
        tables.push(get_active_stats(source, key, team, batter).await?);
    }
    Ok(NormalizedTable::concat(tables))
}

pub(crate) fn parse_active_stats(document: &Html, manager: &str) -> Result<NormalizedTable> {
    let table_selector = Selector::parse("table.playerTableTable.tableBody")?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or(EspnError::ElementNotFound {
            context: "active stats table",
        })?;
    let (title, columns) = resolve_headers(table)?;
    let shape = TableShape::ActiveStats {
        columns,
        manager: manager.to_string(),
    };
    Ok(shape.format(&read_data_rows(table))?.with_title(title))
}

pub(crate) fn format_active_stats(
    raw: &RawTable,
    columns: &ColumnSpec,
    manager: &str,
) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::from_raw(raw, columns)?;

    // Last row is the page totals.
    let footer = table.row_count().saturating_sub(1);
    table.retain_rows(|row| row.index() != footer);

    table.coerce_numeric(MISSING_PLACEHOLDER);
    let mut table = extract_player_dtd(table, PLAYER_COLUMN)?;
    table.drop_column(PLAYER_COLUMN);
    table.retain_columns(|name| !ColumnSpec::is_placeholder(name));
    table.set_constant("MANAGER", Value::Text(manager.to_string()))?;
    identity_first(table)
}

/// MANAGER, then the four extracted player columns, then the stat block.
///
/// This is positional: it relies on the extracted columns and MANAGER being
/// the last five columns, so a change in the page layout upstream of
/// extraction goes unnoticed here.
fn identity_first(table: NormalizedTable) -> Result<NormalizedTable> {
    let names = table
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect_vec();
    let n = names.len();
    if n < IDENTITY_COLUMNS + 1 {
        return Ok(table);
    }
    let order = std::iter::once(&names[n - 1])
        .chain(&names[n - 1 - IDENTITY_COLUMNS..n - 1])
        .chain(&names[..n - 1 - IDENTITY_COLUMNS])
        .collect_vec();
    table.select(&order)
}
