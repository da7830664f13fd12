use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ids::QueueType, player::PlayerQueueRecord};

/// Players of one queue, best score first. `queue_type` is `None` for unplaced accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueGroup {
    pub queue_type: Option<QueueType>,
    pub players: Vec<PlayerQueueRecord>,
}

impl QueueGroup {
    pub fn title(&self) -> &str {
        self.queue_type.as_ref().map_or("Unranked", QueueType::display_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub generated_at: DateTime<Utc>,
    pub groups: Vec<QueueGroup>,
    /// Roster entries that produced no rows because their lookups failed.
    pub skipped: usize,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.players.is_empty())
    }

    /// True when nothing could be fetched at all, as opposed to an empty result.
    pub fn all_failed(&self) -> bool {
        self.is_empty() && self.skipped > 0
    }

    pub fn player_count(&self) -> usize {
        self.groups.iter().map(|group| group.players.len()).sum()
    }

    pub fn group(&self, queue_type: &QueueType) -> Option<&QueueGroup> {
        self.groups
            .iter()
            .find(|group| group.queue_type.as_ref() == Some(queue_type))
    }
}
