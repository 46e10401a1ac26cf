use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::client::PageSource;
use crate::error::{EspnError, Result};
use crate::espn_scraper::extract::extract_player_keeper;
use crate::espn_scraper::shape::TableShape;
use crate::espn_scraper::{self, read_all_rows, LeagueKey};
use crate::model::{parse_number, Column, DraftType, NormalizedTable, RawTable, TeamDirectory, Value};

pub(crate) const AUCTION_COLUMNS: [&str; 7] =
    ["MANAGER", "PLAYER", "PICK", "TEAM", "POS", "PRICE", "KEEPER"];
pub(crate) const ROUND_COLUMNS: [&str; 7] =
    ["ROUND", "PICK", "MANAGER", "PLAYER", "TEAM", "POS", "KEEPER"];

const SELECTION_COLUMN: &str = "SELECTION";

/// Draft results of the league, optionally only the picks of `team_id`.
#[instrument(skip(source, teams))]
pub(crate) async fn get_draft<S: PageSource + ?Sized>(
    source: &S,
    key: &LeagueKey,
    teams: &TeamDirectory,
    team_id: Option<&str>,
) -> Result<NormalizedTable> {
    let manager = team_id.map(|id| teams.name(id)).transpose()?;

    let document = espn_scraper::get_document(source, &key.draft_recap()).await?;
    let draft_type = parse_draft_type(&document)?;
    let table = parse_draft(&document, draft_type)?;
    debug!(rows = table.row_count(), %draft_type, "parsed draft recap");

    Ok(match manager {
        Some(manager) => filter_manager(table, manager),
        None => table,
    })
}

/// The text right after the bold `Type:` label of the recap block.
pub(crate) fn parse_draft_type(document: &Html) -> Result<DraftType> {
    let label_selector = Selector::parse("div.games-fullcol b")?;
    let label = document
        .select(&label_selector)
        .find(|b| b.text().collect::<String>().trim() == "Type:")
        .ok_or(EspnError::ElementNotFound {
            context: "draft type label",
        })?;
    let draft_type = label
        .next_siblings()
        .find_map(|node| {
            node.value()
                .as_text()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
        .ok_or(EspnError::ElementNotFound {
            context: "draft type value",
        })?;
    DraftType::from_label(&draft_type)
}

/// Every per-team (auction) or per-round block, concatenated in page order.
pub(crate) fn parse_draft(document: &Html, draft_type: DraftType) -> Result<NormalizedTable> {
    let block_selector = Selector::parse(
        r#"div[class="games-fullcol games-fullcol-extramargin"] > table > tbody > tr > td > table"#,
    )?;
    let shape = TableShape::Draft(draft_type);
    let blocks = document
        .select(&block_selector)
        .map(|block| shape.format(&read_all_rows(block)))
        .collect::<Result<Vec<_>>>()?;

    let columns = if draft_type.is_auction() {
        AUCTION_COLUMNS
    } else {
        ROUND_COLUMNS
    };
    if blocks.is_empty() {
        return Ok(NormalizedTable::empty(&columns));
    }
    Ok(NormalizedTable::concat(blocks))
}

pub(crate) fn format_draft(raw: &RawTable, draft_type: DraftType) -> Result<NormalizedTable> {
    match draft_type {
        DraftType::Auction => format_auction_block(raw),
        DraftType::Snake | DraftType::Offline | DraftType::Autopick => format_round_block(raw),
    }
}

/// Keep picks made by `manager`, compared case-insensitively.
pub(crate) fn filter_manager(mut table: NormalizedTable, manager: &str) -> NormalizedTable {
    let manager = normalize_name(manager);
    table.retain_rows(|row| {
        row.get("MANAGER")
            .and_then(Value::as_str)
            .is_some_and(|m| normalize_name(m) == manager)
    });
    table
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.split_whitespace().join(" ").to_uppercase()
}

/// Label of a carrier row: its first non-blank cell.
fn carrier_label(raw: &RawTable) -> Option<&str> {
    raw.rows()
        .first()?
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
}

/// Values of raw column `col` below the carrier row.
fn body_column(raw: &RawTable, name: &str, col: usize, value: impl Fn(&str) -> Value) -> Column {
    Column {
        name: name.to_string(),
        values: (1..raw.len()).map(|row| value(raw.cell(row, col))).collect(),
    }
}

fn number(text: &str) -> Value {
    parse_number(text).map_or(Value::Missing, Value::Number)
}

/// `"$45"` -> 45.
fn price(text: &str) -> Value {
    let mut chars = text.trim().chars();
    chars.next();
    number(chars.as_str())
}

fn format_auction_block(raw: &RawTable) -> Result<NormalizedTable> {
    let Some(manager) = carrier_label(raw) else {
        return Ok(NormalizedTable::empty(&AUCTION_COLUMNS));
    };
    let mut table = NormalizedTable::from_columns(vec![
        body_column(raw, "PICK", 0, number),
        body_column(raw, SELECTION_COLUMN, 1, Value::from_cell),
        body_column(raw, "PRICE", 2, price),
    ])?;
    table.set_constant("MANAGER", Value::Text(manager.to_string()))?;
    extract_player_keeper(table, SELECTION_COLUMN)?.select(&AUCTION_COLUMNS)
}

fn format_round_block(raw: &RawTable) -> Result<NormalizedTable> {
    let Some(label) = carrier_label(raw) else {
        return Ok(NormalizedTable::empty(&ROUND_COLUMNS));
    };
    let round = label
        .strip_prefix("ROUND")
        .and_then(parse_number)
        .map_or_else(|| Value::Text(label.to_string()), Value::Number);
    let mut table = NormalizedTable::from_columns(vec![
        body_column(raw, "PICK", 0, number),
        body_column(raw, SELECTION_COLUMN, 1, Value::from_cell),
        body_column(raw, "MANAGER", 2, Value::from_cell),
    ])?;
    table.set_constant("ROUND", round)?;
    extract_player_keeper(table, SELECTION_COLUMN)?.select(&ROUND_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espn_scraper::fixtures::{self, FakeSource};
    use crate::model::TeamEntry;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn raw(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_auction_block_propagates_manager() {
        let block = raw(&[
            &["", "MANAGER_X", ""],
            &["1", "Mike Trout, LAA\u{a0}OF", "$45"],
            &["14", "Chris Sale, Bos\u{a0}SP\u{a0}\u{a0}K", "$30"],
        ]);
        let table = format_draft(&block, DraftType::Auction).unwrap();

        assert_eq!(table.column_names(), AUCTION_COLUMNS.to_vec());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("MANAGER").unwrap(), [text("MANAGER_X"), text("MANAGER_X")]);
        assert_eq!(table.column("PICK").unwrap(), [Value::Number(1.0), Value::Number(14.0)]);
        assert_eq!(table.column("PRICE").unwrap(), [Value::Number(45.0), Value::Number(30.0)]);
        assert_eq!(table.column("KEEPER").unwrap(), [Value::Bool(false), Value::Bool(true)]);
        assert!(table
            .rows()
            .all(|row| row.get("PLAYER") != Some(&text("MANAGER_X"))));
    }

    #[test]
    fn test_round_block() {
        let block = raw(&[
            &["ROUND 3", "ROUND 3", "ROUND 3"],
            &["25", "Mike Trout, LAA\u{a0}OF", "Aces High"],
        ]);
        let table = format_draft(&block, DraftType::Offline).unwrap();

        assert_eq!(table.column_names(), ROUND_COLUMNS.to_vec());
        assert_eq!(table.row_count(), 1);
        let row = table.row(0).unwrap();
        assert_eq!(row.get("ROUND"), Some(&Value::Number(3.0)));
        assert_eq!(row.get("PICK"), Some(&Value::Number(25.0)));
        assert_eq!(row.get("MANAGER"), Some(&text("Aces High")));
        assert_eq!(row.get("TEAM"), Some(&text("LAA")));
    }

    #[test]
    fn test_empty_block() {
        let table = format_draft(&RawTable::default(), DraftType::Snake).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names(), ROUND_COLUMNS.to_vec());
    }

    #[test]
    fn test_parse_auction_page() {
        let document = Html::parse_document(fixtures::AUCTION_DRAFT);
        let draft_type = parse_draft_type(&document).unwrap();
        assert_eq!(draft_type, DraftType::Auction);

        let table = parse_draft(&document, draft_type).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.column("MANAGER").unwrap(),
            [text("Aces High"), text("Aces High"), text("Bombers")]
        );
        assert_eq!(
            table.column("PLAYER").unwrap(),
            [text("Mike Trout"), text("Chris Sale"), text("Max Scherzer")]
        );
    }

    #[test]
    fn test_unsupported_draft_type() {
        let document = Html::parse_document(
            r#"<div class="games-fullcol"><p><b>Type: </b>Keeper Lottery</p></div>"#,
        );
        let err = parse_draft_type(&document).unwrap_err();
        assert!(matches!(err, EspnError::UnsupportedDraftType(t) if t == "Keeper Lottery"));
    }

    #[test]
    fn test_draft_type_ignores_labels_outside_recap() {
        let document = Html::parse_document(
            r#"<div class="sidebar"><b>Type:</b> Keeper Lottery</div>
            <div class="games-fullcol games-fullcol-extramargin">
                <p><b>Type: </b>Snake Draft<br></p>
            </div>"#,
        );
        assert_eq!(parse_draft_type(&document).unwrap(), DraftType::Snake);

        let outside_only = Html::parse_document("<p><b>Type: </b>Snake Draft</p>");
        assert!(matches!(
            parse_draft_type(&outside_only),
            Err(EspnError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_filter_manager_case_insensitive() {
        let document = Html::parse_document(fixtures::SNAKE_DRAFT);
        let table = parse_draft(&document, DraftType::Snake).unwrap();
        let bombers = filter_manager(table, "BOMBERS");

        assert_eq!(bombers.row_count(), 2);
        assert_eq!(
            bombers.column("ROUND").unwrap(),
            [Value::Number(1.0), Value::Number(2.0)]
        );
    }

    #[tokio::test]
    async fn test_get_draft_for_team() {
        let source = FakeSource::league(fixtures::SNAKE_DRAFT);
        let teams = TeamDirectory::new([TeamEntry {
            id: "2".into(),
            name: "BOMBERS".into(),
        }]);

        let all = get_draft(&source, &fixtures::key(), &teams, None).await.unwrap();
        assert_eq!(all.row_count(), 3);

        let mine = get_draft(&source, &fixtures::key(), &teams, Some("2")).await.unwrap();
        assert_eq!(mine.row_count(), 2);

        let err = get_draft(&source, &fixtures::key(), &teams, Some("7")).await.unwrap_err();
        assert!(matches!(err, EspnError::TeamNotFound(id) if id == "7"));
    }
}
