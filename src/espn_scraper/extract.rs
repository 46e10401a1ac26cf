use regex::Regex;
use tracing::warn;

use crate::error::{EspnError, Result};
use crate::model::{NormalizedTable, Value};

/// `"Name, TEAM\u{a0}POS"` with an optional trailing `"\u{a0}\u{a0}K"` keeper marker.
pub const PLAYER_KEEPER_PATTERN: &str =
    r"^(?P<PLAYER>.+?), (?P<TEAM>\w+)\s(?P<POS>\w+)(?P<KEEPER>\s\sK)?$";

/// Stats-table variant: POS may list several positions, and a trailing
/// `"\u{a0}\u{a0}DTD"` marks a day-to-day player.
pub const PLAYER_DTD_PATTERN: &str =
    r"^(?P<PLAYER>.+?), (?P<TEAM>\w+)\s(?P<POS>.+?)(?:\s\s(?P<DTD>DTD))?$";

/// Split the text of `column` with `pattern`, appending one column per named
/// group in pattern order. Rows that do not match, and groups that did not
/// take part in a match, get [`Value::Missing`].
pub fn extract_composite(
    mut table: NormalizedTable,
    column: &str,
    pattern: &Regex,
) -> Result<NormalizedTable> {
    let source = table
        .column(column)
        .ok_or_else(|| EspnError::ColumnNotFound(column.to_string()))?;
    let groups: Vec<&str> = pattern.capture_names().flatten().collect();

    let mut derived = vec![Vec::with_capacity(source.len()); groups.len()];
    for (row, value) in source.iter().enumerate() {
        let captures = value.as_str().and_then(|text| pattern.captures(text));
        if captures.is_none() && !value.is_missing() {
            warn!(row, column, value = ?value, "composite field did not match");
        }
        for (values, group) in derived.iter_mut().zip(&groups) {
            let text = captures
                .as_ref()
                .and_then(|c| c.name(group))
                .map(|m| m.as_str())
                .unwrap_or_default();
            values.push(Value::from_cell(text));
        }
    }

    for (group, values) in groups.iter().zip(derived) {
        table.set_column(group, values)?;
    }
    Ok(table)
}

/// PLAYER, TEAM, POS and a boolean KEEPER from a draft pick cell.
pub fn extract_player_keeper(table: NormalizedTable, column: &str) -> Result<NormalizedTable> {
    let pattern = Regex::new(PLAYER_KEEPER_PATTERN)?;
    let mut table = extract_composite(table, column, &pattern)?;

    let keeper = table
        .rows()
        .map(|row| match row.get("PLAYER") {
            Some(Value::Missing) | None => Value::Missing,
            Some(_) => Value::Bool(row.get("KEEPER").is_some_and(|k| !k.is_missing())),
        })
        .collect();
    table.set_column("KEEPER", keeper)?;
    Ok(table)
}

/// PLAYER, TEAM, a list-valued POS and the optional DTD flag from a stats row.
pub fn extract_player_dtd(table: NormalizedTable, column: &str) -> Result<NormalizedTable> {
    let pattern = Regex::new(PLAYER_DTD_PATTERN)?;
    let mut table = extract_composite(table, column, &pattern)?;

    let positions = table
        .column("POS")
        .unwrap_or_default()
        .iter()
        .map(|pos| match pos.as_str() {
            Some(text) => Value::List(
                text.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            None => Value::Missing,
        })
        .collect();
    table.set_column("POS", positions)?;
    Ok(table)
}
