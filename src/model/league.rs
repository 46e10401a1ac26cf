use serde::Serialize;

use crate::error::{EspnError, Result};

/// A team as listed on the league office page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
    pub id: String,
    pub name: String,
}

/// Team identifiers and display names of a league, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamDirectory {
    teams: Vec<TeamEntry>,
}

impl TeamDirectory {
    /// Later duplicates of an identifier are ignored.
    pub fn new(teams: impl IntoIterator<Item = TeamEntry>) -> Self {
        let mut directory = Self::default();
        for team in teams {
            if directory.get(&team.id).is_none() {
                directory.teams.push(team);
            }
        }
        directory
    }

    pub fn get(&self, team_id: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.name.as_str())
    }

    /// Like [`TeamDirectory::get`], failing with [`EspnError::TeamNotFound`].
    pub fn name(&self, team_id: &str) -> Result<&str> {
        self.get(team_id)
            .ok_or_else(|| EspnError::TeamNotFound(team_id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamEntry> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Draft format announced on the draft recap page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display, strum_macros::EnumString)]
pub enum DraftType {
    #[strum(serialize = "Auction Draft")]
    Auction,
    #[strum(serialize = "Snake Draft")]
    Snake,
    #[strum(serialize = "Offline Draft")]
    Offline,
    #[strum(serialize = "Autopick Draft")]
    Autopick,
}

impl DraftType {
    /// Parse the label text, failing with [`EspnError::UnsupportedDraftType`].
    pub fn from_label(label: &str) -> Result<Self> {
        label
            .trim()
            .parse()
            .map_err(|_| EspnError::UnsupportedDraftType(label.trim().to_string()))
    }

    pub fn is_auction(self) -> bool {
        self == DraftType::Auction
    }
}

/// One player movement of a transaction: `(FROM, PLAYER, TO)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionMove {
    pub from: String,
    pub player: String,
    pub to: String,
}

impl TransactionMove {
    pub fn new(from: &str, player: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            player: player.to_string(),
            to: to.to_string(),
        }
    }
}

/// Transaction families distinguished by the TYPE column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum TransactionKind {
    #[strum(serialize = "Add/Drop")]
    AddDrop,
    Add,
    Drop,
    #[strum(serialize = "Trade Processed")]
    Trade,
}

impl TransactionKind {
    /// Classify a TYPE cell such as `"Transaction\u{a0}\u{a0}Add/Drop"`.
    pub fn classify(type_text: &str) -> Option<Self> {
        let normalized = type_text.split_whitespace().collect::<Vec<_>>().join(" ");
        let kind = normalized.strip_prefix("Transaction")?.trim_start();
        // "Add/Drop" must be tested before its "Add" prefix.
        [Self::AddDrop, Self::Add, Self::Drop, Self::Trade]
            .into_iter()
            .find(|k| kind.starts_with(&k.to_string()))
    }
}
