use clap::Parser;

/// NFL confidence pool pick generator and submitter
#[derive(Parser, Debug, Clone)]
#[command(name = "prophet", version, about)]
pub struct Config {
    /// Print the ranked slate without logging in or submitting picks
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Scoreboard feed URL (lines and season records)
    #[arg(
        long,
        env = "SCOREBOARD_URL",
        default_value = "http://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard"
    )]
    pub scoreboard_url: String,

    /// Pool site base URL
    #[arg(long, env = "POOL_URL", default_value = "https://www.runyourpool.com")]
    pub pool_url: String,

    /// Pool sheet id used when fetching the pick review page
    #[arg(long, env = "POOL_SHEET_ID", default_value = "1")]
    pub pool_sheet_id: u32,

    /// Confidence points assigned to the top pick
    #[arg(long, env = "CONFIDENCE_BASE", default_value = "16")]
    pub confidence_base: u32,

    /// Total-points tiebreaker submitted with the picks
    #[arg(long, env = "TIEBREAKER_POINTS", default_value = "42")]
    pub tiebreaker_points: u32,

    /// Pool username (prompted interactively when absent)
    #[arg(long, env = "POOL_USERNAME")]
    pub username: Option<String>,

    /// Pool password (prompted interactively when absent)
    #[arg(long, env = "POOL_PASSWORD")]
    pub password: Option<String>,

    /// Skip opening the pick review page in a browser
    #[arg(long, env = "NO_BROWSER", default_value = "false")]
    pub no_browser: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.confidence_base == 0 {
            anyhow::bail!("confidence_base must be at least 1");
        }
        if self.pool_sheet_id == 0 {
            anyhow::bail!("pool_sheet_id must be at least 1");
        }
        if self.scoreboard_url.is_empty() || self.pool_url.is_empty() {
            anyhow::bail!("scoreboard_url and pool_url must be non-empty");
        }
        Ok(())
    }
}
