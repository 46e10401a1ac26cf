use chrono::NaiveDate;
use itertools::Itertools;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::client::PageSource;
use crate::error::{EspnError, Result};
use crate::espn_scraper::header::resolve_headers;
use crate::espn_scraper::shape::TableShape;
use crate::espn_scraper::{self, read_data_rows, LeagueKey};
use crate::model::{
    ColumnSpec, NormalizedTable, RawTable, TransactionKind, TransactionMove, Value,
};

const DATE_CELL: usize = 0;
const DETAIL_CELL: usize = 2;

const DROP_PATTERN: &str = r"(\w+) dropped (.+?), \w+\s[\w/, ]+? to (Waivers|Free Agency)";
const ADD_PATTERN: &str = r"(\w+) added (.+?), \w+\s[\w/, ]+? from (Waivers|Free Agency)";
const TRADE_PATTERN: &str = r"(\w+) traded (.+?), \w+\s[\w/, ]+? to (\w+)";

#[instrument(skip(source))]
pub(crate) async fn get_transactions<S: PageSource + ?Sized>(
    source: &S,
    key: &LeagueKey,
    team_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<NormalizedTable> {
    let url = key.recent_activity(team_id, start, end);
    let document = espn_scraper::get_document(source, &url).await?;
    let table = parse_transactions(&document)?;
    debug!(rows = table.row_count(), team_id, "parsed transactions");
    Ok(table)
}

pub(crate) fn parse_transactions(document: &Html) -> Result<NormalizedTable> {
    let table_selector = Selector::parse(r#"table[class="tableBody"]"#)?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or(EspnError::ElementNotFound {
            context: "transaction table",
        })?;
    let (title, columns) = resolve_headers(table)?;
    Ok(TableShape::Transactions(columns)
        .format(&read_data_rows(table))?
        .with_title(title))
}

/// DATE and DETAIL are re-read from the markup text; TRANSACTION lists the
/// `(FROM, PLAYER, TO)` moves described by DETAIL.
pub(crate) fn format_transactions(raw: &RawTable, columns: &ColumnSpec) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::from_raw(raw, columns)?;
    table.retain_columns(|name| !ColumnSpec::is_placeholder(name));

    let markup = |col| {
        (0..raw.len())
            .map(|row| Value::from_cell(raw.markup_cell(row, col)))
            .collect_vec()
    };
    table.set_column("DATE", markup(DATE_CELL))?;
    table.set_column("DETAIL", markup(DETAIL_CELL))?;

    let patterns = MovePatterns::new()?;
    let moves = table
        .rows()
        .map(|row| {
            let kind = row
                .get("TYPE")
                .and_then(Value::as_str)
                .and_then(TransactionKind::classify);
            let detail = row.get("DETAIL").and_then(Value::as_str);
            Value::Moves(match (kind, detail) {
                (Some(kind), Some(detail)) => patterns.moves(kind, detail),
                _ => vec![],
            })
        })
        .collect_vec();
    table.set_column("TRANSACTION", moves)?;
    Ok(table)
}

pub(crate) struct MovePatterns {
    drop: Regex,
    add: Regex,
    trade: Regex,
}

impl MovePatterns {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            drop: Regex::new(DROP_PATTERN)?,
            add: Regex::new(ADD_PATTERN)?,
            trade: Regex::new(TRADE_PATTERN)?,
        })
    }

    /// Moves described by `detail`, in the order they appear in the text.
    pub(crate) fn moves(&self, kind: TransactionKind, detail: &str) -> Vec<TransactionMove> {
        let drops = || Self::scan(&self.drop, detail, |team, player, to| (team, player, to));
        let adds = || Self::scan(&self.add, detail, |team, player, from| (from, player, team));
        let found = match kind {
            TransactionKind::AddDrop => drops().into_iter().chain(adds()).collect_vec(),
            TransactionKind::Add => adds(),
            TransactionKind::Drop => drops(),
            TransactionKind::Trade => Self::scan(&self.trade, detail, |from, player, to| (from, player, to)),
        };
        found
            .into_iter()
            .sorted_by_key(|(start, _)| *start)
            .map(|(_, mv)| mv)
            .collect()
    }

    fn scan<'t>(
        pattern: &Regex,
        detail: &'t str,
        order: impl Fn(&'t str, &'t str, &'t str) -> (&'t str, &'t str, &'t str),
    ) -> Vec<(usize, TransactionMove)> {
        pattern
            .captures_iter(detail)
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                let (from, player, to) =
                    order(caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str());
                Some((start, TransactionMove::new(from, player, to)))
            })
            .collect()
    }
}
