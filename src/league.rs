use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::client::PageSource;
use crate::error::Result;
use crate::espn_scraper::{self, LeagueKey};
use crate::model::*;

/// One season of an ESPN fantasy baseball league.
///
/// Connecting reads the league office and settings pages once; every other
/// table is fetched on demand.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> espn_tables::Result<()> {
/// use espn_tables::{EspnClient, League};
///
/// let league = League::connect(EspnClient::new(), 12345, 2017).await?;
/// let team = league.team("3")?;
/// let hitters = team.active_stats(true).await?;
/// println!("{} has {} hitters", team.name(), hitters.row_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct League<S> {
    source: S,
    key: LeagueKey,
    teams: TeamDirectory,
    scoring: String,
}

impl<S: PageSource> League<S> {
    /// Load the team directory and scoring setting of a league season.
    #[instrument(skip(source))]
    pub async fn connect(source: S, league_id: u32, season_id: u32) -> Result<Self> {
        let key = LeagueKey {
            base_url: source.base_url().to_string(),
            league_id,
            season_id,
        };
        let teams = espn_scraper::league::get_team_directory(&source, &key).await?;
        let scoring = espn_scraper::league::get_scoring(&source, &key).await?;
        info!(teams = teams.len(), %scoring, "connected to league");
        Ok(Self {
            source,
            key,
            teams,
            scoring,
        })
    }

    pub fn league_id(&self) -> u32 {
        self.key.league_id
    }

    pub fn season_id(&self) -> u32 {
        self.key.season_id
    }

    pub fn teams(&self) -> &TeamDirectory {
        &self.teams
    }

    /// Scoring format, e.g. "Rotisserie" or "Head to Head Each Category".
    pub fn scoring(&self) -> &str {
        &self.scoring
    }

    /// A handle on one team; fails with [`crate::EspnError::TeamNotFound`].
    pub fn team(&self, team_id: &str) -> Result<Team<'_, S>> {
        let name = self.teams.name(team_id)?.to_string();
        Ok(Team {
            league: self,
            id: team_id.to_string(),
            name,
        })
    }

    /// Every standings table of the season, titled by its section.
    #[instrument(skip(self), fields(league_id = self.key.league_id))]
    pub async fn standings(&self) -> Result<Vec<NormalizedTable>> {
        espn_scraper::standings::get_standings(&self.source, &self.key).await
    }

    /// Draft results of the whole league.
    #[instrument(skip(self), fields(league_id = self.key.league_id))]
    pub async fn draft(&self) -> Result<NormalizedTable> {
        espn_scraper::draft::get_draft(&self.source, &self.key, &self.teams, None).await
    }

    /// Active stats of every team, batters or pitchers, stacked in team order.
    #[instrument(skip(self), fields(league_id = self.key.league_id))]
    pub async fn league_active_stats(&self, batter: bool) -> Result<NormalizedTable> {
        espn_scraper::active_stats::get_league_active_stats(&self.source, &self.key, &self.teams, batter)
            .await
    }

    /// Active stats of one team.
    pub async fn active_stats(&self, team_id: &str, batter: bool) -> Result<NormalizedTable> {
        self.team(team_id)?.active_stats(batter).await
    }

    /// Transactions of one team between `start` and `end`, inclusive.
    pub async fn transactions(
        &self,
        team_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<NormalizedTable> {
        self.team(team_id)?.transactions(start, end).await
    }
}

/// A single team of a [`League`].
#[derive(Debug)]
pub struct Team<'a, S> {
    league: &'a League<S>,
    id: String,
    name: String,
}

impl<'a, S: PageSource> Team<'a, S> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, upper-cased as in the team directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn league(&self) -> &'a League<S> {
        self.league
    }

    #[instrument(skip(self), fields(team_id = %self.id))]
    pub async fn active_stats(&self, batter: bool) -> Result<NormalizedTable> {
        let entry = TeamEntry {
            id: self.id.clone(),
            name: self.name.clone(),
        };
        espn_scraper::active_stats::get_active_stats(&self.league.source, &self.league.key, &entry, batter)
            .await
    }

    /// Draft picks made by this team.
    #[instrument(skip(self), fields(team_id = %self.id))]
    pub async fn draft(&self) -> Result<NormalizedTable> {
        espn_scraper::draft::get_draft(
            &self.league.source,
            &self.league.key,
            &self.league.teams,
            Some(self.id.as_str()),
        )
        .await
    }

    #[instrument(skip(self), fields(team_id = %self.id))]
    pub async fn transactions(&self, start: NaiveDate, end: NaiveDate) -> Result<NormalizedTable> {
        espn_scraper::transactions::get_transactions(
            &self.league.source,
            &self.league.key,
            &self.id,
            start,
            end,
        )
        .await
    }
}
