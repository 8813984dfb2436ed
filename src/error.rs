use thiserror::Error;

use crate::model::TeamId;

/// Everything that can go wrong between raw source data and a ranked,
/// submittable slate. Every variant is fatal to the current run; the
/// fetching layers own retries, this layer never does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    /// Team name resolution failed against the recognition table.
    #[error("unknown team: {0:?}")]
    UnknownTeam(String),

    /// A game references a team with no entry in the records map.
    #[error("no season record for {0:?}")]
    MissingRecord(TeamId),

    /// Structural violation in a game (favorite == underdog, or the
    /// home team is neither side).
    #[error("invalid game: {0}")]
    InvalidGame(String),

    /// More games than the confidence base can cover.
    #[error("{games} games but confidence base is only {base}")]
    TooManyGames { games: usize, base: u32 },

    /// A source field failed to parse (negative counts, bad spread).
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
