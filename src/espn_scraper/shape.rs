use crate::error::Result;
use crate::espn_scraper::{active_stats, draft, standings, transactions};
use crate::model::{ColumnSpec, DraftType, NormalizedTable, RawTable};

/// The page layouts this crate knows how to normalize, each with the context
/// its formatter needs.
///
/// Formatting is pure: the same shape applied to the same [`RawTable`]
/// always yields the same table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableShape {
    /// League standings: resolved header columns.
    Standings(ColumnSpec),
    /// One per-team or per-round draft block; the draft type picks the mode.
    Draft(DraftType),
    /// A team's active stats page, tagged with that team's name.
    ActiveStats { columns: ColumnSpec, manager: String },
    /// A team's recent activity page. The raw table must carry markup text.
    Transactions(ColumnSpec),
}

impl TableShape {
    pub fn format(&self, raw: &RawTable) -> Result<NormalizedTable> {
        match self {
            TableShape::Standings(columns) => standings::format_standings(raw, columns),
            TableShape::Draft(draft_type) => draft::format_draft(raw, *draft_type),
            TableShape::ActiveStats { columns, manager } => {
                active_stats::format_active_stats(raw, columns, manager)
            }
            TableShape::Transactions(columns) => transactions::format_transactions(raw, columns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn test_format_is_idempotent() {
        let raw = RawTable::new(vec![
            vec!["".into(), "Aces High".into(), "".into()],
            vec!["1".into(), "Mike Trout, LAA\u{a0}OF".into(), "$45".into()],
        ]);
        let shape = TableShape::Draft(DraftType::Auction);

        let first = shape.format(&raw).unwrap();
        assert_eq!(first, shape.format(&raw).unwrap());
        assert_eq!(first.column("PRICE").unwrap(), [Value::Number(45.0)]);
    }
}
