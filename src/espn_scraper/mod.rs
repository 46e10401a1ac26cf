pub(crate) mod active_stats;
pub(crate) mod draft;
pub(crate) mod extract;
pub(crate) mod header;
pub(crate) mod league;
pub(crate) mod shape;
pub(crate) mod standings;
pub(crate) mod transactions;

#[cfg(test)]
pub(crate) mod fixtures;

use chrono::NaiveDate;
use itertools::Itertools;
use scraper::{CaseSensitivity, ElementRef, Html};
use tracing::debug;

use crate::client::PageSource;
use crate::error::Result;
use crate::model::RawTable;

/// Cell text ESPN prints where a statistic does not apply.
pub(crate) const MISSING_PLACEHOLDER: &str = "--";

/// Fetch a league page and parse it as an HTML document.
pub(crate) async fn get_document<S: PageSource + ?Sized>(source: &S, url: &str) -> Result<Html> {
    debug!(url, "fetching page");
    let body = source.fetch_page(url).await?;
    Ok(Html::parse_document(&body))
}

/// Identifies one league season and knows the URLs of its pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LeagueKey {
    pub base_url: String,
    pub league_id: u32,
    pub season_id: u32,
}

impl LeagueKey {
    fn page(&self, page: &str, prefix: &str) -> String {
        format!(
            "{}/{page}?{prefix}leagueId={}&seasonId={}",
            self.base_url, self.league_id, self.season_id
        )
    }

    pub fn league_office(&self) -> String {
        self.page("leagueoffice", "")
    }

    pub fn settings(&self) -> String {
        self.page("leaguesetup/settings", "")
    }

    pub fn standings(&self) -> String {
        self.page("standings", "view=official&")
    }

    pub fn draft_recap(&self) -> String {
        self.page("tools/draftrecap", "")
    }

    pub fn active_stats(&self, team_id: &str, batter: bool) -> String {
        let url = format!("{}&teamId={team_id}", self.page("activestats", ""));
        if batter {
            url
        } else {
            format!("{url}&filter=2")
        }
    }

    pub fn recent_activity(&self, team_id: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}&teamId={team_id}&activityType=2&startDate={}&endDate={}",
            self.page("recentactivity", ""),
            start.format("%Y%m%d"),
            end.format("%Y%m%d")
        )
    }
}

/// Rows that belong to `table` itself, skipping rows of nested tables.
pub(crate) fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .children()
        .filter_map(ElementRef::wrap)
        .flat_map(|child| match child.value().name() {
            "tr" => vec![child],
            "thead" | "tbody" | "tfoot" => child
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|e| e.value().name() == "tr")
                .collect(),
            _ => vec![],
        })
        .collect()
}

pub(crate) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element
        .value()
        .has_class(class, CaseSensitivity::AsciiCaseInsensitive)
}

fn is_header_row(row: ElementRef<'_>) -> bool {
    has_class(row, "tableHead") || has_class(row, "tableSubHead")
}

fn row_cells(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| matches!(e.value().name(), "td" | "th"))
}

/// Browsers clamp `colspan` to this value.
const MAX_COLSPAN: usize = 1000;

pub(crate) fn colspan(cell: ElementRef<'_>) -> Option<usize> {
    cell.value()
        .attr("colspan")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map(|n| n.min(MAX_COLSPAN))
}

/// Flattened text of an element: text nodes concatenated, then trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text nodes joined by a space with runs of ASCII whitespace collapsed.
/// Non-breaking spaces are kept, they separate fields in player cells.
pub(crate) fn markup_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .join(" ")
        .split(|c: char| c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
        .join(" ")
        .replace(" ,", ",")
}

fn read_rows<'a>(rows: impl IntoIterator<Item = ElementRef<'a>>) -> RawTable {
    let (text, markup): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .map(|row| {
            let mut text = vec![];
            let mut markup = vec![];
            for cell in row_cells(row) {
                let span = colspan(cell).unwrap_or(1);
                text.extend(std::iter::repeat_n(element_text(cell), span));
                markup.extend(std::iter::repeat_n(markup_text(cell), span));
            }
            (text, markup)
        })
        .unzip();
    RawTable::with_markup_text(text, markup)
}

/// Every row of `table`, header rows included. `colspan` cells are repeated.
pub fn read_all_rows(table: ElementRef<'_>) -> RawTable {
    read_rows(own_rows(table))
}

/// Body rows of `table`: rows classed `tableHead`/`tableSubHead` are left out.
pub fn read_data_rows(table: ElementRef<'_>) -> RawTable {
    read_rows(own_rows(table).into_iter().filter(|row| !is_header_row(*row)))
}
