use scraper::{ElementRef, Selector};

use crate::error::{EspnError, Result};
use crate::model::ColumnSpec;
use crate::espn_scraper::{colspan, element_text, has_class, own_rows};

/// First synthetic column name handed out to padding/group-title cells.
pub const PLACEHOLDER_BASE: u32 = 10;

/// One `<td>` of a sub-header row: its non-blank text nodes and `colspan`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCell {
    pub texts: Vec<String>,
    pub colspan: Option<usize>,
}

impl HeaderCell {
    pub fn text(text: &str) -> Self {
        Self {
            texts: vec![text.to_string()],
            colspan: None,
        }
    }

    pub fn padding() -> Self {
        Self::default()
    }

    pub fn group(text: &str, span: usize) -> Self {
        Self {
            texts: vec![text.to_string()],
            colspan: Some(span),
        }
    }

    fn from_element(cell: ElementRef<'_>) -> Self {
        Self {
            texts: cell
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            colspan: colspan(cell),
        }
    }
}

/// Resolve the title and the flat column list of an ESPN `tableBody` table.
///
/// The title comes from the `tableHead` row (or cell); column names come from
/// the one or two `tableSubHead` rows.
pub fn resolve_headers(table: ElementRef<'_>) -> Result<(String, ColumnSpec)> {
    let title_selector = Selector::parse("tr.tableHead, td.tableHead")?;
    let title = table
        .select(&title_selector)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let sub_headers: Vec<Vec<HeaderCell>> = own_rows(table)
        .into_iter()
        .filter(|row| has_class(*row, "tableSubHead"))
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|e| matches!(e.value().name(), "td" | "th"))
                .map(HeaderCell::from_element)
                .collect()
        })
        .collect();

    Ok((title, resolve_sub_headers(&sub_headers)?))
}

/// Turn one or two scanned sub-header rows into a single column list.
pub fn resolve_sub_headers(rows: &[Vec<HeaderCell>]) -> Result<ColumnSpec> {
    let mut counter = PLACEHOLDER_BASE;
    match rows {
        [] => Err(EspnError::MalformedHeader {
            sub_headers: 0,
            reason: "no sub-header row",
        }),
        [single] => Ok(ColumnSpec::new(scan_single_row(single, &mut counter))),
        [first, second] => {
            let first = scan_group_row(first, &mut counter);
            let second = scan_group_row(second, &mut counter);
            merge_sub_headers(first, second)
        }
        _ => Err(EspnError::MalformedHeader {
            sub_headers: rows.len(),
            reason: "more than two sub-header rows",
        }),
    }
}

fn placeholders(counter: &mut u32, n: usize) -> impl Iterator<Item = String> + '_ {
    (0..n).map(move |_| {
        let name = counter.to_string();
        *counter = counter.saturating_add(1);
        name
    })
}

/// Standings-style row: every cell names a column. Extra spanned columns
/// and blank cells get placeholders so the width matches the body.
fn scan_single_row(cells: &[HeaderCell], counter: &mut u32) -> Vec<String> {
    let mut names = vec![];
    for cell in cells {
        let span = cell.colspan.unwrap_or(1);
        if cell.texts.is_empty() {
            names.extend(placeholders(counter, span));
        } else {
            names.push(cell.texts.join(" "));
            names.extend(placeholders(counter, span - 1));
        }
    }
    names
}

/// Stats-style row: blank cells and `colspan` group titles are placeholders.
fn scan_group_row(cells: &[HeaderCell], counter: &mut u32) -> Vec<String> {
    let mut names = vec![];
    for cell in cells {
        match (cell.texts.is_empty(), cell.colspan) {
            (true, span) => names.extend(placeholders(counter, span.unwrap_or(1))),
            (false, Some(span)) => names.extend(placeholders(counter, span)),
            (false, None) => names.push(cell.texts.join(" ")),
        }
    }
    names
}

/// Overlay the per-stat row onto the group-title row: keep the first two and
/// the last `N = len(first) - 2 - len(second)` names of `first`, with all of
/// `second` spliced in between. The result is always as wide as `first`.
pub fn merge_sub_headers(first: Vec<String>, second: Vec<String>) -> Result<ColumnSpec> {
    let tail = first
        .len()
        .checked_sub(2 + second.len())
        .ok_or(EspnError::MalformedHeader {
            sub_headers: 2,
            reason: "second sub-header row does not fit inside the first",
        })?;
    let mut columns = first[..2].to_vec();
    columns.extend(second);
    columns.extend_from_slice(&first[first.len() - tail..]);
    Ok(ColumnSpec::new(columns))
}
