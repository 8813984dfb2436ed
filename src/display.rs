use crate::model::{RankedPick, RecordsMap, TeamId};

/// Standings block, one `Team: W-L-T` line per team.
pub fn format_records(records: &RecordsMap) -> String {
    let mut rows: Vec<(&TeamId, String)> = records
        .iter()
        .map(|(team, record)| (team, format!("{}: {}", team, record)))
        .collect();
    rows.sort_by_key(|(team, _)| format!("{}", team));
    rows.into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Slate block, one line per game, most confident first:
/// `-7.5 Kansas City Chiefs (5-3-0) > Denver Broncos (4-3-1)`.
pub fn format_slate(picks: &[RankedPick], records: &RecordsMap) -> String {
    picks
        .iter()
        .map(|pick| {
            let g = &pick.game;
            format!(
                "{} {} ({}) > {} ({})",
                g.spread, g.raw_favorite, records[&g.favorite], g.raw_underdog, records[&g.underdog]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Confidence listing: `%2d Favorite` per line.
pub fn format_confidence(picks: &[RankedPick]) -> String {
    picks
        .iter()
        .map(|pick| format!("{:2} {}", pick.confidence, pick.game.favorite))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, Record};
    use rust_decimal_macros::dec;

    fn fixture() -> (Vec<RankedPick>, RecordsMap) {
        let mut records = RecordsMap::new();
        records.insert(TeamId::KansasCity, Record::new(5, 3, 0));
        records.insert(TeamId::Denver, Record::new(4, 3, 1));

        let picks = vec![RankedPick {
            game: Game {
                favorite: TeamId::KansasCity,
                underdog: TeamId::Denver,
                home_team: TeamId::KansasCity,
                spread: dec!(-7.5),
                total_points: dec!(49.5),
                raw_favorite: "Kansas City Chiefs".to_string(),
                raw_underdog: "Denver Broncos".to_string(),
            },
            confidence: 16,
        }];
        (picks, records)
    }

    #[test]
    fn test_format_records_sorted() {
        let (_, records) = fixture();
        assert_eq!(
            format_records(&records),
            "Denver: 4-3-1\nKansasCity: 5-3-0"
        );
    }

    #[test]
    fn test_format_slate() {
        let (picks, records) = fixture();
        assert_eq!(
            format_slate(&picks, &records),
            "-7.5 Kansas City Chiefs (5-3-0) > Denver Broncos (4-3-1)"
        );
    }

    #[test]
    fn test_format_confidence_padding() {
        let (mut picks, _) = fixture();
        picks[0].confidence = 9;
        assert_eq!(format_confidence(&picks), " 9 KansasCity");
    }
}
