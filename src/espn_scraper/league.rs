use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::client::PageSource;
use crate::error::{EspnError, Result};
use crate::espn_scraper::{self, LeagueKey};
use crate::model::{TeamDirectory, TeamEntry};

#[instrument(skip(source))]
pub(crate) async fn get_team_directory<S: PageSource + ?Sized>(
    source: &S,
    key: &LeagueKey,
) -> Result<TeamDirectory> {
    let document = espn_scraper::get_document(source, &key.league_office()).await?;
    let teams = parse_team_directory(&document)?;
    debug!(count = teams.len(), "parsed team directory");
    Ok(teams)
}

#[instrument(skip(source))]
pub(crate) async fn get_scoring<S: PageSource + ?Sized>(source: &S, key: &LeagueKey) -> Result<String> {
    let document = espn_scraper::get_document(source, &key.settings()).await?;
    parse_scoring(&document)
}

/// Teams from the clubhouse tab strip; links without a `teamId` are skipped.
pub(crate) fn parse_team_directory(document: &Html) -> Result<TeamDirectory> {
    let link_selector = Selector::parse("ul#games-tabs1 li a")?;
    let team_id = Regex::new(r"teamId=(\d+)")?;

    let teams = document.select(&link_selector).filter_map(|a| {
        let href = a.value().attr("href")?;
        let id = team_id.captures(href)?.get(1)?.as_str().to_string();
        let name = a
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        Some(TeamEntry { id, name })
    });
    Ok(TeamDirectory::new(teams))
}

/// Value cell next to the first setting label, e.g. "Rotisserie".
pub(crate) fn parse_scoring(document: &Html) -> Result<String> {
    let label_selector = Selector::parse("td.settingLabel")?;
    document
        .select(&label_selector)
        .next()
        .and_then(|label| {
            label
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "td")
        })
        .and_then(|td| {
            td.text()
                .map(str::trim)
                .find(|t| !t.is_empty())
                .map(str::to_string)
        })
        .ok_or(EspnError::ElementNotFound {
            context: "scoring setting",
        })
}
