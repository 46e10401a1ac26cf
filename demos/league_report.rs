use espn_tables::{EspnClient, League};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let league_id: u32 = args
        .next()
        .ok_or("usage: league_report <league id> [season]")?
        .parse()?;
    let season_id: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(2017);

    let league = League::connect(EspnClient::new(), league_id, season_id).await?;
    println!(
        "League {league_id} ({season_id}): {} teams, {} scoring",
        league.teams().len(),
        league.scoring()
    );

    for table in league.standings().await? {
        println!("{}", serde_json::to_string_pretty(&table)?);
    }

    let draft = league.draft().await?;
    println!("{}", serde_json::to_string_pretty(&draft)?);

    for team in league.teams().iter() {
        let stats = league.active_stats(&team.id, true).await?;
        println!("{}: {} active hitters", team.name, stats.row_count());
    }
    Ok(())
}
