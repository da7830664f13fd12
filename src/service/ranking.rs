use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::model::{
    leaderboard::{Leaderboard, QueueGroup},
    player::PlayerQueueRecord,
};

const HOT_STREAK_BONUS: f64 = 50.0;

/// Share of games won in percent, 0 when nothing was played.
pub fn winrate_percent(wins: u32, losses: u32) -> f64 {
    let games = u64::from(wins) + u64::from(losses);
    if games == 0 {
        return 0.0;
    }
    100.0 * f64::from(wins) / games as f64
}

/// Leaderboard score of a row. Unranked rows score their summoner level.
pub fn score(record: &PlayerQueueRecord) -> i64 {
    if !record.tier.is_ranked() {
        return i64::from(record.level);
    }

    let division_points = record.division.map_or(0, |division| division.base_points());
    let raw = f64::from(record.tier.base_points())
        + f64::from(division_points)
        + f64::from(record.league_points)
        + 2.0 * winrate_percent(record.wins, record.losses)
        + if record.hot_streak { HOT_STREAK_BONUS } else { 0.0 }
        + f64::from(record.level) / 10.0;

    // Every term is non-negative, so rounding half away from zero is rounding half up.
    raw.round() as i64
}

pub fn annotate(records: &mut [PlayerQueueRecord]) {
    for record in records.iter_mut() {
        record.score = score(record);
    }
}

/// Stable sort, best score first. Equal scores keep their fetch order.
pub fn sort_players(mut records: Vec<PlayerQueueRecord>) -> Vec<PlayerQueueRecord> {
    records.sort_by_key(|record| Reverse(score(record)));
    records
}

/// Partitions sorted rows by queue. Groups appear in the order their queue first shows up.
pub fn group_by_queue(sorted: &[PlayerQueueRecord]) -> Vec<QueueGroup> {
    sorted
        .iter()
        .map(|record| record.queue_type.clone())
        .unique()
        .map(|queue_type| QueueGroup {
            players: sorted
                .iter()
                .filter(|record| record.queue_type == queue_type)
                .cloned()
                .collect(),
            queue_type,
        })
        .collect()
}

impl Leaderboard {
    /// Scores, sorts and groups a finished batch of rows.
    pub fn from_records(generated_at: DateTime<Utc>, mut records: Vec<PlayerQueueRecord>) -> Self {
        annotate(&mut records);
        let sorted = sort_players(records);
        Self {
            generated_at,
            groups: group_by_queue(&sorted),
            skipped: 0,
        }
    }
}
