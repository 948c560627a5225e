// The seam between collection runs and whatever produces raw player records.

use async_trait::async_trait;

use coach_core::position::Position;
use coach_core::season::Season;
use coach_core::stats::RawPlayerRecord;

use crate::CollectError;

/// Optional leaderboard filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub club: Option<String>,
    pub nationality: Option<String>,
}

/// One position's worth of players to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRequest {
    pub season: Season,
    pub position: Position,
    pub filters: Filters,
    /// Maximum number of players to collect.
    pub limit: usize,
}

/// Produces raw records for the top players matching a request.
#[async_trait]
pub trait StatSource: Send + Sync {
    async fn collect(&self, request: &CollectRequest) -> Result<Vec<RawPlayerRecord>, CollectError>;
}
