//! Saved-page stand-ins for the league pages, served by [`FakeSource`].

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::client::{PageSource, DEFAULT_BASE_URL};
use crate::error::{EspnError, Result};

use super::LeagueKey;

pub(crate) const LEAGUE_ID: u32 = 42;
pub(crate) const SEASON_ID: u32 = 2017;

pub(crate) const LEAGUE_OFFICE: &str = r#"<html><body>
<ul id="games-tabs1">
  <li><a href="/flb/clubhouse?leagueId=42&amp;teamId=1&amp;seasonId=2017">Aces  High </a></li>
  <li><a href="/flb/clubhouse?leagueId=42&amp;teamId=2&amp;seasonId=2017">Bombers</a></li>
  <li><a href="/flb/leagueoffice?leagueId=42">League Office</a></li>
</ul>
</body></html>"#;

pub(crate) const SETTINGS: &str = r#"<html><body>
<table>
  <tr><td class="settingLabel">Scoring Type:</td><td> Rotisserie </td></tr>
  <tr><td class="settingLabel">Roster Size:</td><td>25</td></tr>
</table>
</body></html>"#;

pub(crate) const STANDINGS: &str = r#"<html><body>
<table class="tableBody">
  <tr class="tableHead"><td colspan="4">ROTO</td></tr>
  <tr class="tableSubHead"><td>RK</td><td>TEAM</td><td>R</td><td>HR</td></tr>
  <tr><td>1</td><td><a>Aces High</a></td><td>10</td><td>9</td></tr>
  <tr><td colspan="4"></td></tr>
  <tr><td>2</td><td><a>Bombers</a></td><td>8</td><td>--</td></tr>
</table>
<table class="tableBody">
  <tr class="tableHead"><td colspan="6">SEASON STATS</td></tr>
  <tr class="tableSubHead"><td>RK</td><td>TEAM</td><td></td><td colspan="2">BATTING</td><td>PTS</td></tr>
  <tr class="tableSubHead"><td></td><td>R</td><td>HR</td></tr>
  <tr><td>1</td><td>Aces High</td><td></td><td>500</td><td>120</td><td>18</td></tr>
  <tr><td>2</td><td>Bombers</td><td></td><td>480</td><td>131</td><td>16.5</td></tr>
</table>
</body></html>"#;

pub(crate) const AUCTION_DRAFT: &str = r#"<html><body>
<div class="games-fullcol games-fullcol-extramargin">
<p><b>Type: </b>Auction Draft<br></p>
<table><tr>
  <td><table>
    <tr class="tableHead"><td colspan="3">Aces High</td></tr>
    <tr><td>1</td><td><a>Mike Trout</a>, LAA&nbsp;OF</td><td>$45</td></tr>
    <tr><td>14</td><td><a>Chris Sale</a>, Bos&nbsp;SP&nbsp;&nbsp;K</td><td>$30</td></tr>
  </table></td>
  <td><table>
    <tr class="tableHead"><td colspan="3">Bombers</td></tr>
    <tr><td>2</td><td><a>Max Scherzer</a>, Wsh&nbsp;SP</td><td>$40</td></tr>
  </table></td>
</tr></table>
</div>
</body></html>"#;

pub(crate) const SNAKE_DRAFT: &str = r#"<html><body>
<div class="games-fullcol games-fullcol-extramargin">
<p><b>Type: </b>Snake Draft<br></p>
<table><tr>
  <td><table>
    <tr class="tableHead"><td colspan="3">ROUND 1</td></tr>
    <tr><td>1</td><td><a>Mike Trout</a>, LAA&nbsp;OF</td><td>Aces High</td></tr>
    <tr><td>2</td><td><a>Max Scherzer</a>, Wsh&nbsp;SP</td><td>Bombers</td></tr>
  </table></td>
  <td><table>
    <tr class="tableHead"><td colspan="3">ROUND 2</td></tr>
    <tr><td>3</td><td><a>Chris Sale</a>, Bos&nbsp;SP&nbsp;&nbsp;K</td><td>Bombers</td></tr>
  </table></td>
</tr></table>
</div>
</body></html>"#;

pub(crate) const ACTIVE_STATS: &str = r#"<html><body>
<table class="playerTableTable tableBody">
  <tr class="playerTableBgRowHead tableHead"><td colspan="8">BATTERS</td></tr>
  <tr class="playerTableBgRowSubhead tableSubHead">
    <td>SLOT</td><td><a>PLAYER, TEAM</a> POS</td><td></td><td colspan="3">STATS</td><td></td><td>OWN</td>
  </tr>
  <tr class="playerTableBgRowSubhead tableSubHead">
    <td></td><td>R</td><td>HR</td><td>AVG</td><td></td>
  </tr>
  <tr><td>C</td><td><a>Buster Posey</a>, SF&nbsp;C, 1B</td><td></td><td>40</td><td>12</td><td>.301</td><td></td><td>100.0</td></tr>
  <tr><td>1B</td><td><a>Joey Votto</a>, Cin&nbsp;1B&nbsp;&nbsp;DTD</td><td></td><td>--</td><td>--</td><td>--</td><td></td><td>99.5</td></tr>
  <tr><td>UTIL</td><td>Empty</td><td></td><td>--</td><td>--</td><td>--</td><td></td><td>--</td></tr>
  <tr class="playerTableBgRowTotals"><td>TOTALS</td><td></td><td></td><td>40</td><td>12</td><td>.301</td><td></td><td></td></tr>
</table>
</body></html>"#;

pub(crate) const TRANSACTIONS: &str = r#"<html><body>
<table class="tableBody">
  <tr class="tableHead"><td colspan="4">TRANSACTIONS</td></tr>
  <tr class="tableSubHead"><td>DATE</td><td>TYPE</td><td>DETAIL</td><td></td></tr>
  <tr>
    <td>Mon, Apr 3<br>10:15 PM</td>
    <td>Transaction&nbsp;&nbsp;Add/Drop</td>
    <td><a>Aces</a> dropped <a>Joe Smith</a>, NYY&nbsp;1B to Waivers<br><a>Aces</a> added <a>Tim Jones</a>, Bos&nbsp;SP from Free Agency</td>
    <td>Accepted</td>
  </tr>
  <tr>
    <td>Tue, Apr 4<br>9:00 AM</td>
    <td>Transaction&nbsp;&nbsp;Trade Processed</td>
    <td><a>Aces</a> traded <a>Al Kaline</a>, Det&nbsp;OF to <a>Bombers</a><br><a>Bombers</a> traded <a>Bo Jackson</a>, KC&nbsp;OF to <a>Aces</a></td>
    <td></td>
  </tr>
  <tr>
    <td>Wed, Apr 5<br>8:00 AM</td>
    <td>Transaction&nbsp;&nbsp;Add</td>
    <td><a>Aces</a> added <a>Ty Cobb</a>, Det&nbsp;OF from Waivers</td>
    <td></td>
  </tr>
  <tr>
    <td>Thu, Apr 6</td>
    <td>Lineup Changed</td>
    <td>Moved players</td>
    <td></td>
  </tr>
</table>
</body></html>"#;

pub(crate) fn key() -> LeagueKey {
    LeagueKey {
        base_url: DEFAULT_BASE_URL.to_string(),
        league_id: LEAGUE_ID,
        season_id: SEASON_ID,
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Serves fixed pages by URL; unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    pages: HashMap<String, String>,
}

impl FakeSource {
    /// Every page of a league whose draft recap is `draft_page`.
    pub(crate) fn league(draft_page: &str) -> Self {
        let key = key();
        let mut source = Self::default()
            .with_page(key.league_office(), LEAGUE_OFFICE)
            .with_page(key.settings(), SETTINGS)
            .with_page(key.standings(), STANDINGS)
            .with_page(key.draft_recap(), draft_page)
            .with_page(
                key.recent_activity("1", date(2017, 4, 1), date(2017, 4, 30)),
                TRANSACTIONS,
            );
        for team in ["1", "2"] {
            source = source.with_page(key.active_stats(team, true), ACTIVE_STATS);
        }
        source
    }

    pub(crate) fn with_page(mut self, url: String, body: &str) -> Self {
        self.pages.insert(url, body.to_string());
        self
    }
}

impl PageSource for FakeSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| EspnError::UnexpectedStatus {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}
