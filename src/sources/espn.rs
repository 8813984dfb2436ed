use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::debug;

use super::provider::{LinesSource, RecordsSource};
use crate::error::PickError;
use crate::model::{RawGame, RawRecord};

pub const DEFAULT_SCOREBOARD_URL: &str =
    "http://site.api.espn.com/apis/site/v2/sports/football/nfl/scoreboard";

/// Lines and standings from the ESPN NFL scoreboard feed. One endpoint
/// carries both: every competition lists its odds and each competitor
/// embeds its season record, so this source implements both traits.
pub struct EspnScoreboard {
    http: Client,
    /// Endpoint URL, overridable for tests.
    url: String,
}

impl EspnScoreboard {
    pub fn new(url: Option<&str>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EspnScoreboard {
            http,
            url: url.unwrap_or(DEFAULT_SCOREBOARD_URL).to_string(),
        })
    }

    async fn fetch_raw(&self) -> Result<serde_json::Value> {
        debug!("Fetching scoreboard from {}", self.url);

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Scoreboard request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Scoreboard error: {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to parse scoreboard response")
    }
}

#[async_trait]
impl LinesSource for EspnScoreboard {
    fn name(&self) -> &str {
        "ESPN scoreboard (lines)"
    }

    async fn fetch_lines(&self) -> Result<Vec<RawGame>> {
        let raw = self.fetch_raw().await?;
        Ok(parse_lines(&raw)?)
    }
}

#[async_trait]
impl RecordsSource for EspnScoreboard {
    fn name(&self) -> &str {
        "ESPN scoreboard (records)"
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        let raw = self.fetch_raw().await?;
        Ok(parse_records(&raw)?)
    }
}

fn competitions(raw: &serde_json::Value) -> Vec<&serde_json::Value> {
    let events = match raw["events"].as_array() {
        Some(a) => a,
        None => return vec![],
    };
    events
        .iter()
        .filter_map(|ev| ev["competitions"].as_array())
        .flatten()
        .collect()
}

/// Pull one `RawGame` per competition that has posted odds.
/// Competitions without an odds entry are skipped, matching the pool
/// convention that unlined games are not picked.
pub fn parse_lines(raw: &serde_json::Value) -> Result<Vec<RawGame>, PickError> {
    let mut games = Vec::new();

    for comp in competitions(raw) {
        let odds = match comp["odds"].as_array().and_then(|a| a.first()) {
            Some(o) => o,
            None => continue,
        };

        let home = competitor(comp, "home")?;
        let away = competitor(comp, "away")?;

        let details = odds["details"].as_str().unwrap_or("").trim();
        let (fav_abbr, spread) = parse_odds_details(details)?;

        // No book favorite on a pick'em line; the home side is the
        // nominal favorite so the slate stays complete.
        let home_is_favorite = match fav_abbr {
            Some(abbr) => {
                if abbr == home.abbreviation {
                    true
                } else if abbr == away.abbreviation {
                    false
                } else {
                    return Err(PickError::MalformedInput(format!(
                        "odds favorite {:?} is neither {} nor {}",
                        abbr, home.abbreviation, away.abbreviation
                    )));
                }
            }
            None => true,
        };

        let total_points = value_to_decimal(&odds["overUnder"]).unwrap_or(Decimal::ZERO);

        let (favorite, underdog) = if home_is_favorite {
            (&home, &away)
        } else {
            (&away, &home)
        };

        games.push(RawGame {
            favorite_text: favorite.display_name.clone(),
            underdog_text: underdog.display_name.clone(),
            spread,
            total_points,
            home_is_favorite,
        });
    }

    Ok(games)
}

/// Pull one `RawRecord` per competitor across every competition,
/// including the odds-less ones; a fuller map only helps week
/// derivation.
pub fn parse_records(raw: &serde_json::Value) -> Result<Vec<RawRecord>, PickError> {
    let mut records = Vec::new();

    for comp in competitions(raw) {
        let competitors = match comp["competitors"].as_array() {
            Some(a) => a,
            None => continue,
        };
        for c in competitors {
            let display_name = c["team"]["displayName"]
                .as_str()
                .ok_or_else(|| PickError::MalformedInput("team.displayName".into()))?;
            let summary = total_record_summary(c).ok_or_else(|| {
                PickError::MalformedInput(format!("no total record for {}", display_name))
            })?;
            let (wins, losses, ties) = parse_record_summary(summary)?;
            records.push(RawRecord {
                team_text: display_name.to_string(),
                wins,
                losses,
                ties,
            });
        }
    }

    Ok(records)
}

struct Competitor {
    abbreviation: String,
    display_name: String,
}

fn competitor(comp: &serde_json::Value, side: &str) -> Result<Competitor, PickError> {
    comp["competitors"]
        .as_array()
        .and_then(|cs| cs.iter().find(|c| c["homeAway"].as_str() == Some(side)))
        .and_then(|c| {
            Some(Competitor {
                abbreviation: c["team"]["abbreviation"].as_str()?.to_string(),
                display_name: c["team"]["displayName"].as_str()?.to_string(),
            })
        })
        .ok_or_else(|| PickError::MalformedInput(format!("missing {} competitor", side)))
}

/// Odds `details` is `"KC -3.5"`, or `"EVEN"` / `"OFF"` when the book
/// has no side. Returns the favorite's abbreviation (if any) and the
/// spread normalized to its non-positive form.
fn parse_odds_details(details: &str) -> Result<(Option<String>, Decimal), PickError> {
    if details.is_empty() || details.eq_ignore_ascii_case("even") || details.eq_ignore_ascii_case("off") {
        return Ok((None, Decimal::ZERO));
    }

    let (abbr, number) = details
        .split_once(' ')
        .ok_or_else(|| PickError::MalformedInput(format!("odds details {:?}", details)))?;

    let spread: Decimal = number
        .trim()
        .parse()
        .map_err(|_| PickError::MalformedInput(format!("spread {:?}", number)))?;

    Ok((Some(abbr.to_string()), -spread.abs()))
}

fn total_record_summary(competitor: &serde_json::Value) -> Option<&str> {
    competitor["records"]
        .as_array()?
        .iter()
        .find(|r| r["type"].as_str() == Some("total"))?["summary"]
        .as_str()
}

/// `"5-3"` or `"5-3-1"`; a missing ties figure is zero.
fn parse_record_summary(summary: &str) -> Result<(u32, u32, u32), PickError> {
    let mut parts = summary.split('-');
    let wins = parse_count(parts.next(), summary)?;
    let losses = parse_count(parts.next(), summary)?;
    let ties = match parts.next() {
        Some(t) => parse_count(Some(t), summary)?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(PickError::MalformedInput(format!("record {:?}", summary)));
    }
    Ok((wins, losses, ties))
}

fn parse_count(part: Option<&str>, summary: &str) -> Result<u32, PickError> {
    part.and_then(|p| p.trim().parse::<u32>().ok())
        .ok_or_else(|| PickError::MalformedInput(format!("record {:?}", summary)))
}

/// Exact decimal out of a JSON number or numeric string. Going through
/// the serialized text avoids binary-float round-off on half-point
/// lines.
fn value_to_decimal(v: &serde_json::Value) -> Option<Decimal> {
    match v {
        serde_json::Value::Number(n) => n.to_string().parse().ok(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
