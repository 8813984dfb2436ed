//! The confidence-ranking core: a pure, synchronous ordering over the
//! week's slate. Everything here is deterministic; the sources and the
//! pool client own all I/O.

use std::cmp::Ordering;

use crate::error::PickError;
use crate::model::{Game, RankedPick, RecordsMap};

/// Order the slate most-confident-first and stamp each game with its
/// pool-scoring weight (`base` for position 0, descending by one).
///
/// The sort is stable, so games the comparator cannot separate keep
/// their input order. Validation happens up front: a structurally bad
/// game or a team missing from `records` fails the whole run.
pub fn rank(
    games: Vec<Game>,
    records: &RecordsMap,
    base: u32,
) -> Result<Vec<RankedPick>, PickError> {
    for game in &games {
        validate(game, records)?;
    }
    if games.len() > base as usize {
        return Err(PickError::TooManyGames {
            games: games.len(),
            base,
        });
    }

    let mut games = games;
    games.sort_by(|p, q| compare(p, q, records));

    Ok(games
        .into_iter()
        .enumerate()
        .map(|(i, game)| RankedPick {
            game,
            confidence: base - i as u32,
        })
        .collect())
}

/// Current week to pick: one past the most games any team has played.
/// Bye weeks skew the per-team totals, so the furthest-along team wins.
pub fn week_number(records: &RecordsMap) -> u32 {
    records
        .values()
        .map(|r| r.games_played())
        .max()
        .unwrap_or(0)
        + 1
}

fn validate(game: &Game, records: &RecordsMap) -> Result<(), PickError> {
    if game.favorite == game.underdog {
        return Err(PickError::InvalidGame(format!(
            "{} is both favorite and underdog",
            game.favorite
        )));
    }
    if game.home_team != game.favorite && game.home_team != game.underdog {
        return Err(PickError::InvalidGame(format!(
            "home team {} is not playing in {} vs {}",
            game.home_team, game.favorite, game.underdog
        )));
    }
    for team in [game.favorite, game.underdog] {
        if !records.contains_key(&team) {
            return Err(PickError::MissingRecord(team));
        }
    }
    Ok(())
}

/// Five-tier comparator, most confident first:
///
/// 1. bigger spread (stored signed, so more negative sorts first)
/// 2. favorite at home, when exactly one side has it
/// 3. larger favorite-minus-underdog standings-point differential
/// 4. stronger favorite outright
/// 5. stable input order
///
/// Callers must have checked records totality already; both lookups
/// are guaranteed to hit.
fn compare(p: &Game, q: &Game, records: &RecordsMap) -> Ordering {
    let spread = p.spread.cmp(&q.spread);
    if spread != Ordering::Equal {
        return spread;
    }

    match (p.favorite_is_home(), q.favorite_is_home()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let p_delta = records[&p.favorite].points() - records[&p.underdog].points();
    let q_delta = records[&q.favorite].points() - records[&q.underdog].points();
    let delta = q_delta.cmp(&p_delta);
    if delta != Ordering::Equal {
        return delta;
    }

    records[&q.favorite]
        .points()
        .cmp(&records[&p.favorite].points())
}
