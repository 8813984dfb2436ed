use anyhow::Result;
use async_trait::async_trait;

use crate::model::{RawGame, RawRecord};

/// A producer of the week's betting lines.
#[async_trait]
pub trait LinesSource: Send + Sync {
    /// Fetch one snapshot of the current week's games with spreads.
    async fn fetch_lines(&self) -> Result<Vec<RawGame>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// A producer of season standings.
#[async_trait]
pub trait RecordsSource: Send + Sync {
    /// Fetch every team's win-loss-tie counts.
    async fn fetch_records(&self) -> Result<Vec<RawRecord>>;

    fn name(&self) -> &str;
}
