use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::client::PageSource;
use crate::error::Result;
use crate::espn_scraper::header::resolve_headers;
use crate::espn_scraper::shape::TableShape;
use crate::espn_scraper::{self, read_data_rows, LeagueKey, MISSING_PLACEHOLDER};
use crate::model::{ColumnSpec, NormalizedTable, RawTable};

#[instrument(skip(source))]
pub(crate) async fn get_standings<S: PageSource + ?Sized>(
    source: &S,
    key: &LeagueKey,
) -> Result<Vec<NormalizedTable>> {
    let document = espn_scraper::get_document(source, &key.standings()).await?;
    let tables = parse_standings(&document)?;
    debug!(count = tables.len(), "parsed standings tables");
    Ok(tables)
}

/// One table per `tableBody` region (rotisserie points, season totals), titled.
pub(crate) fn parse_standings(document: &Html) -> Result<Vec<NormalizedTable>> {
    let table_selector = Selector::parse(r#"table[class="tableBody"]"#)?;
    document
        .select(&table_selector)
        .map(|table| {
            let (title, columns) = resolve_headers(table)?;
            let raw = read_data_rows(table);
            Ok(TableShape::Standings(columns).format(&raw)?.with_title(title))
        })
        .collect()
}

/// Spacer rows (blank first cell) and placeholder columns are dropped.
pub(crate) fn format_standings(raw: &RawTable, columns: &ColumnSpec) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::from_raw(raw, columns)?;
    table.retain_rows(|row| row.values().next().is_some_and(|v| !v.is_missing()));
    table.retain_columns(|name| !ColumnSpec::is_placeholder(name));
    table.coerce_numeric(MISSING_PLACEHOLDER);
    Ok(table)
}
