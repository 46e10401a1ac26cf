use itertools::Itertools;
use serde::Serialize;

use crate::error::{EspnError, Result};

use super::league::TransactionMove;

/// A single typed cell of a [`NormalizedTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<String>),
    Moves(Vec<TransactionMove>),
    Missing,
}

impl Value {
    /// Wrap raw cell text, mapping empty cells to [`Value::Missing`].
    pub fn from_cell(text: &str) -> Self {
        if text.is_empty() {
            Value::Missing
        } else {
            Value::Text(text.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_moves(&self) -> Option<&[TransactionMove]> {
        match self {
            Value::Moves(m) => Some(m),
            _ => None,
        }
    }
}

/// Parse scraped text as a number. Text without any digit (e.g. `NaN`, `inf`)
/// is never numeric.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Cell text of one `<table>`, rows by columns, as flattened from the markup.
///
/// `markup_text` holds the same cells with their text nodes joined by a
/// single space, which keeps word boundaries that link markup would
/// otherwise glue together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
    markup_text: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            markup_text: rows.clone(),
            rows,
        }
    }

    pub fn with_markup_text(rows: Vec<Vec<String>>, markup_text: Vec<Vec<String>>) -> Self {
        Self { rows, markup_text }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn markup_text(&self) -> &[Vec<String>] {
        &self.markup_text
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the table.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or_default()
    }

    /// Text of a cell, or an empty string when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn markup_cell(&self, row: usize, col: usize) -> &str {
        self.markup_text
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Ordered column names resolved from a table's header rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSpec(Vec<String>);

impl ColumnSpec {
    /// Repeated names are made unique: the second `PTS` becomes `PTS_2`,
    /// the third `PTS_3`, and so on.
    pub fn new(names: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let mut candidate = name.clone();
            let mut n = 2;
            while unique.contains(&candidate) {
                candidate = format!("{name}_{n}");
                n += 1;
            }
            unique.push(candidate);
        }
        Self(unique)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Synthetic names given to padding and group-title header cells are bare counters.
    pub fn is_placeholder(name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
    }
}

/// A named column of typed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Column-oriented output table. Every column holds exactly `row_count` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub title: Option<String>,
    columns: Vec<Column>,
    row_count: usize,
}

/// Borrowed view of one row of a [`NormalizedTable`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a NormalizedTable,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.table.column(column).and_then(|c| c.get(self.index))
    }

    pub fn values(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let index = self.index;
        self.table.columns.iter().map(move |c| &c.values[index])
    }
}

impl NormalizedTable {
    /// An empty table with the given columns.
    pub fn empty<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            title: None,
            columns: names
                .iter()
                .map(|n| Column {
                    name: n.as_ref().to_string(),
                    values: vec![],
                })
                .collect(),
            row_count: 0,
        }
    }

    /// Build a table from columns that must all have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.values.len()).unwrap_or_default();
        if let Some(bad) = columns.iter().find(|c| c.values.len() != row_count) {
            return Err(EspnError::ColumnLengthMismatch {
                column: bad.name.clone(),
                expected: row_count,
                found: bad.values.len(),
            });
        }
        Ok(Self {
            title: None,
            columns,
            row_count,
        })
    }

    /// Assign resolved header names to the raw cells. Short rows are padded with missing values.
    pub fn from_raw(raw: &RawTable, columns: &ColumnSpec) -> Result<Self> {
        let width = raw.width();
        if !raw.is_empty() && width != columns.len() {
            return Err(EspnError::ColumnCountMismatch {
                expected: columns.len(),
                found: width,
            });
        }
        Ok(Self::build(raw, columns.names()))
    }

    /// Name the raw cells by their position (`"0"`, `"1"`, ...), for header-less tables.
    pub fn positional(raw: &RawTable) -> Self {
        let names = (0..raw.width()).map(|i| i.to_string()).collect_vec();
        Self::build(raw, &names)
    }

    fn build(raw: &RawTable, names: &[String]) -> Self {
        let columns = names
            .iter()
            .enumerate()
            .map(|(col, name)| Column {
                name: name.clone(),
                values: (0..raw.len())
                    .map(|row| Value::from_cell(raw.cell(row, col)))
                    .collect(),
            })
            .collect();
        Self {
            title: None,
            columns,
            row_count: raw.len(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.row_count).then_some(Row { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count).map(move |index| Row { table: self, index })
    }

    /// Replace the values of `name`, or append it as a new last column.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if !self.columns.is_empty() && values.len() != self.row_count {
            return Err(EspnError::ColumnLengthMismatch {
                column: name.to_string(),
                expected: self.row_count,
                found: values.len(),
            });
        }
        self.row_count = values.len();
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column {
                name: name.to_string(),
                values,
            }),
        }
        Ok(())
    }

    /// Append a column holding the same value on every row.
    pub fn set_constant(&mut self, name: &str, value: Value) -> Result<()> {
        self.set_column(name, vec![value; self.row_count])
    }

    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(pos))
    }

    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.columns.retain(|c| keep(&c.name));
    }

    pub fn retain_rows(&mut self, mut keep: impl FnMut(Row<'_>) -> bool) {
        let mask = self.rows().map(&mut keep).collect_vec();
        for column in &mut self.columns {
            let mut flags = mask.iter();
            column.values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        self.row_count = mask.iter().filter(|k| **k).count();
    }

    /// Turn each column whose cells are all numeric, missing or `placeholder`
    /// into [`Value::Number`]s, with `placeholder` becoming missing. Columns
    /// holding any other text are left as text.
    pub fn coerce_numeric(&mut self, placeholder: &str) {
        for column in &mut self.columns {
            let numeric = column.values.iter().all(|v| match v {
                Value::Missing | Value::Number(_) => true,
                Value::Text(t) => t == placeholder || parse_number(t).is_some(),
                _ => false,
            });
            if !numeric {
                continue;
            }
            for value in &mut column.values {
                if let Value::Text(t) = value {
                    let parsed = parse_number(t).map_or(Value::Missing, Value::Number);
                    *value = parsed;
                }
            }
        }
    }

    /// Reorder (and subset) the columns to exactly `names`.
    pub fn select<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.columns
                    .iter()
                    .position(|c| c.name == name)
                    .map(|pos| self.columns[pos].clone())
                    .ok_or_else(|| EspnError::ColumnNotFound(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.columns = columns;
        Ok(self)
    }

    /// Stack tables vertically. Columns are the union of all inputs in first-seen
    /// order; rows of a table lacking a column get missing values there.
    pub fn concat(tables: impl IntoIterator<Item = NormalizedTable>) -> Self {
        let tables = tables.into_iter().collect_vec();
        let names = tables
            .iter()
            .flat_map(|t| t.columns.iter().map(|c| c.name.clone()))
            .unique()
            .collect_vec();
        let row_count = tables.iter().map(|t| t.row_count).sum();
        let columns = names
            .into_iter()
            .map(|name| {
                let values = tables
                    .iter()
                    .flat_map(|t| match t.column(&name) {
                        Some(values) => values.to_vec(),
                        None => vec![Value::Missing; t.row_count],
                    })
                    .collect();
                Column { name, values }
            })
            .collect();
        Self {
            title: tables.iter().find_map(|t| t.title.clone()),
            columns,
            row_count,
        }
    }
}
