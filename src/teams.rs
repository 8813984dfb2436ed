use std::sync::LazyLock;

use regex::Regex;

use crate::error::PickError;
use crate::model::{Game, RawGame, RawRecord, Record, RecordsMap, TeamId};

/// Recognition table, checked in order. Patterns match anywhere in the
/// stripped display text, case-insensitively, so "At Green Bay",
/// "Green Bay Packers" and "green bay" all land on the same tag. The
/// NY and LA entries take abbreviated forms with dots ("N.Y. Giants",
/// "L.A.") since the wire services use both.
static TEAM_PATTERNS: LazyLock<Vec<(Regex, TeamId)>> = LazyLock::new(|| {
    [
        (r"washington", TeamId::Washington),
        (r"philadel?phia", TeamId::Philadelphia),
        (r"dallas", TeamId::Dallas),
        (r"(n\.?y\.?|new york)\s+giants", TeamId::NyGiants),
        (r"detroit", TeamId::Detroit),
        (r"green bay", TeamId::GreenBay),
        (r"chicago", TeamId::Chicago),
        (r"minnesota", TeamId::Minnesota),
        (r"new orleans", TeamId::NewOrleans),
        (r"tampa bay", TeamId::TampaBay),
        (r"atlanta", TeamId::Atlanta),
        (r"carolina", TeamId::Carolina),
        (r"san francisco", TeamId::SanFrancisco),
        (r"arizona", TeamId::Arizona),
        (r"l\.?a\.|los angeles", TeamId::LosAngeles),
        (r"seattle", TeamId::Seattle),
        (r"new england", TeamId::NewEngland),
        (r"(n\.?y\.?|new york)\s+jets", TeamId::NyJets),
        (r"buffalo", TeamId::Buffalo),
        (r"miami", TeamId::Miami),
        (r"cincinnati", TeamId::Cincinnati),
        (r"baltimore", TeamId::Baltimore),
        (r"cleveland", TeamId::Cleveland),
        (r"pittsburgh", TeamId::Pittsburgh),
        (r"houston", TeamId::Houston),
        (r"jacksonville", TeamId::Jacksonville),
        (r"tennessee", TeamId::Tennessee),
        (r"indianapolis", TeamId::Indianapolis),
        (r"oakland", TeamId::Oakland),
        (r"san diego", TeamId::SanDiego),
        (r"denver", TeamId::Denver),
        (r"kansas city", TeamId::KansasCity),
    ]
    .into_iter()
    .map(|(pat, team)| {
        let re = Regex::new(&format!("(?i){}", pat)).expect("static team pattern");
        (re, team)
    })
    .collect()
});

/// Resolve free-text team copy ("At Dallas", "N.Y. Giants", "Green Bay
/// Packers") to its tag. Fails with `UnknownTeam` when nothing matches.
pub fn resolve(text: &str) -> Result<TeamId, PickError> {
    let stripped = text.trim();
    TEAM_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(stripped))
        .map(|&(_, team)| team)
        .ok_or_else(|| PickError::UnknownTeam(stripped.to_string()))
}

/// The pool site's 1-based team numbering. The order is the site's own
/// (roughly conference/division blocks) and bears no relation to the
/// enum order; the radio buttons on the picksheet carry these values.
pub fn pool_team_id(team: TeamId) -> u32 {
    const POOL_ORDER: [TeamId; 32] = [
        TeamId::Buffalo,
        TeamId::Indianapolis,
        TeamId::Miami,
        TeamId::NewEngland,
        TeamId::NyJets,
        TeamId::Cincinnati,
        TeamId::Cleveland,
        TeamId::Tennessee,
        TeamId::Pittsburgh,
        TeamId::Denver,
        TeamId::KansasCity,
        TeamId::Oakland,
        TeamId::SanDiego,
        TeamId::Seattle,
        TeamId::Dallas,
        TeamId::NyGiants,
        TeamId::Philadelphia,
        TeamId::Arizona,
        TeamId::Washington,
        TeamId::Chicago,
        TeamId::Detroit,
        TeamId::GreenBay,
        TeamId::Minnesota,
        TeamId::TampaBay,
        TeamId::Atlanta,
        TeamId::LosAngeles,
        TeamId::NewOrleans,
        TeamId::SanFrancisco,
        TeamId::Carolina,
        TeamId::Jacksonville,
        TeamId::Baltimore,
        TeamId::Houston,
    ];

    POOL_ORDER
        .iter()
        .position(|&t| t == team)
        .map(|i| i as u32 + 1)
        .unwrap_or(0)
}

/// Resolve both sides of a raw line into a `Game`. The raw display
/// strings ride along for console output.
pub fn resolve_game(raw: &RawGame) -> Result<Game, PickError> {
    let favorite = resolve(&raw.favorite_text)?;
    let underdog = resolve(&raw.underdog_text)?;
    Ok(Game {
        favorite,
        underdog,
        home_team: if raw.home_is_favorite { favorite } else { underdog },
        spread: raw.spread,
        total_points: raw.total_points,
        raw_favorite: raw.favorite_text.clone(),
        raw_underdog: raw.underdog_text.clone(),
    })
}

/// Resolve a standings feed into the records map. Negative counts
/// cannot arrive here (the raw type is unsigned); resolution is the
/// only failure mode.
pub fn resolve_records(rows: &[RawRecord]) -> Result<RecordsMap, PickError> {
    let mut records = RecordsMap::new();
    for row in rows {
        let team = resolve(&row.team_text)?;
        records.insert(team, Record::new(row.wins, row.losses, row.ties));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolve_plain_city() {
        assert_eq!(resolve("Dallas"), Ok(TeamId::Dallas));
        assert_eq!(resolve("  green bay  "), Ok(TeamId::GreenBay));
        assert_eq!(resolve("KANSAS CITY"), Ok(TeamId::KansasCity));
    }

    #[test]
    fn test_resolve_full_names() {
        assert_eq!(resolve("Green Bay Packers"), Ok(TeamId::GreenBay));
        assert_eq!(resolve("New England Patriots"), Ok(TeamId::NewEngland));
        assert_eq!(resolve("Tampa Bay Buccaneers"), Ok(TeamId::TampaBay));
    }

    #[test]
    fn test_resolve_new_york_disambiguation() {
        assert_eq!(resolve("New York Giants"), Ok(TeamId::NyGiants));
        assert_eq!(resolve("New York Jets"), Ok(TeamId::NyJets));
        assert_eq!(resolve("NY Giants"), Ok(TeamId::NyGiants));
        assert_eq!(resolve("N.Y. Jets"), Ok(TeamId::NyJets));
    }

    #[test]
    fn test_resolve_los_angeles() {
        assert_eq!(resolve("Los Angeles"), Ok(TeamId::LosAngeles));
        assert_eq!(resolve("L.A. Rams"), Ok(TeamId::LosAngeles));
        // "Atlanta" contains the letters "la" but must not hit the LA entry
        assert_eq!(resolve("Atlanta"), Ok(TeamId::Atlanta));
    }

    #[test]
    fn test_resolve_venue_prefix() {
        assert_eq!(resolve("At Dallas"), Ok(TeamId::Dallas));
    }

    #[test]
    fn test_resolve_philly_spellings() {
        assert_eq!(resolve("Philadelphia"), Ok(TeamId::Philadelphia));
        assert_eq!(resolve("Philadephia"), Ok(TeamId::Philadelphia));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(
            resolve("London Monarchs"),
            Err(PickError::UnknownTeam("London Monarchs".to_string()))
        );
    }

    #[test]
    fn test_resolve_covers_all_32() {
        let names = [
            "Washington", "Philadelphia", "Dallas", "New York Giants",
            "Detroit", "Green Bay", "Chicago", "Minnesota",
            "New Orleans", "Tampa Bay", "Atlanta", "Carolina",
            "San Francisco", "Arizona", "Los Angeles", "Seattle",
            "New England", "New York Jets", "Buffalo", "Miami",
            "Cincinnati", "Baltimore", "Cleveland", "Pittsburgh",
            "Houston", "Jacksonville", "Tennessee", "Indianapolis",
            "Oakland", "San Diego", "Denver", "Kansas City",
        ];
        let mut resolved: Vec<TeamId> = names
            .iter()
            .map(|n| resolve(n).expect(n))
            .collect();
        resolved.sort_by_key(|&t| pool_team_id(t));
        resolved.dedup();
        assert_eq!(resolved.len(), 32);
    }

    #[test]
    fn test_pool_team_id_spot_checks() {
        assert_eq!(pool_team_id(TeamId::Buffalo), 1);
        assert_eq!(pool_team_id(TeamId::NyJets), 5);
        assert_eq!(pool_team_id(TeamId::Dallas), 15);
        assert_eq!(pool_team_id(TeamId::Houston), 32);
    }

    #[test]
    fn test_resolve_game() {
        let raw = RawGame {
            favorite_text: "Kansas City Chiefs".to_string(),
            underdog_text: "Denver Broncos".to_string(),
            spread: dec!(-7.5),
            total_points: dec!(49.5),
            home_is_favorite: false,
        };
        let game = resolve_game(&raw).unwrap();
        assert_eq!(game.favorite, TeamId::KansasCity);
        assert_eq!(game.underdog, TeamId::Denver);
        assert_eq!(game.home_team, TeamId::Denver);
        assert_eq!(game.raw_favorite, "Kansas City Chiefs");
    }

    #[test]
    fn test_resolve_game_unknown_side() {
        let raw = RawGame {
            favorite_text: "Kansas City Chiefs".to_string(),
            underdog_text: "Birmingham Stallions".to_string(),
            spread: dec!(-7.5),
            total_points: dec!(0),
            home_is_favorite: true,
        };
        assert!(matches!(
            resolve_game(&raw),
            Err(PickError::UnknownTeam(_))
        ));
    }

    #[test]
    fn test_resolve_records() {
        let rows = vec![
            RawRecord {
                team_text: "Seattle Seahawks".to_string(),
                wins: 4,
                losses: 4,
                ties: 0,
            },
            RawRecord {
                team_text: "Arizona Cardinals".to_string(),
                wins: 3,
                losses: 4,
                ties: 1,
            },
        ];
        let records = resolve_records(&rows).unwrap();
        assert_eq!(records[&TeamId::Seattle], Record::new(4, 4, 0));
        assert_eq!(records[&TeamId::Arizona], Record::new(3, 4, 1));
    }

    #[test]
    fn test_pool_team_ids_distinct() {
        let names = [
            TeamId::Washington, TeamId::Philadelphia, TeamId::Dallas,
            TeamId::NyGiants, TeamId::Detroit, TeamId::GreenBay,
            TeamId::Chicago, TeamId::Minnesota, TeamId::NewOrleans,
            TeamId::TampaBay, TeamId::Atlanta, TeamId::Carolina,
            TeamId::SanFrancisco, TeamId::Arizona, TeamId::LosAngeles,
            TeamId::Seattle, TeamId::NewEngland, TeamId::NyJets,
            TeamId::Buffalo, TeamId::Miami, TeamId::Cincinnati,
            TeamId::Baltimore, TeamId::Cleveland, TeamId::Pittsburgh,
            TeamId::Houston, TeamId::Jacksonville, TeamId::Tennessee,
            TeamId::Indianapolis, TeamId::Oakland, TeamId::SanDiego,
            TeamId::Denver, TeamId::KansasCity,
        ];
        let mut ids: Vec<u32> = names.iter().map(|&t| pool_team_id(t)).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<u32>>());
    }
}
