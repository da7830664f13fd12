use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{error, info};
use tokio::time::sleep;

use crate::{
    config::{Config, QueueMode, RosterEntry},
    model::{
        leaderboard::Leaderboard,
        player::{PlayerQueueRecord, Snapshot},
        ranked::RankedEntry,
        summoner::{AccountIdentity, ProfileRecord},
    },
};

use super::{
    data_manager::{DataManager, DataRetrievalResult},
    ranking::annotate,
};

/// A roster entry that produced no rows because its identity or profile could not be fetched.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub entry: RosterEntry,
    pub reason: String,
    pub status: Option<u16>,
}

/// Outcome of one pass over the roster.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub fetched_at: DateTime<Utc>,
    pub attempted: usize,
    pub players: Vec<PlayerQueueRecord>,
    pub skipped: Vec<SkippedEntry>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.skipped.len()
    }

    pub fn to_leaderboard(&self) -> Leaderboard {
        Leaderboard {
            skipped: self.skipped.len(),
            ..Leaderboard::from_records(self.fetched_at, self.players.clone())
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            timestamp: self.fetched_at,
            players: self.players,
        }
    }
}

pub struct FetchOrchestrator {
    manager: DataManager,
    roster: Vec<RosterEntry>,
    queue_mode: QueueMode,
    entry_delay: Duration,
}

impl FetchOrchestrator {
    pub fn new(config: &Config, manager: DataManager) -> Self {
        Self {
            manager,
            roster: config.roster.clone(),
            queue_mode: config.queue_mode,
            entry_delay: config.entry_delay,
        }
    }

    pub fn manager(&self) -> &DataManager {
        &self.manager
    }

    /// Walks the whole roster, one entry at a time with a pause in between to stay under the
    /// rate limit. Entries that fail are reported, never propagated.
    pub async fn run(&self) -> FetchReport {
        let mut players = Vec::new();
        let mut skipped = Vec::new();

        for (index, entry) in self.roster.iter().enumerate() {
            if index > 0 && !self.entry_delay.is_zero() {
                sleep(self.entry_delay).await;
            }

            info!("Fetching data for {}...", entry);
            match self.fetch_entry(entry).await {
                Ok(records) => players.extend(records),
                Err(err) => {
                    error!("Error fetching data for {}: {}", entry, err);
                    skipped.push(SkippedEntry {
                        entry: entry.clone(),
                        reason: err.to_string(),
                        status: err.status(),
                    });
                }
            }
        }

        annotate(&mut players);
        info!(
            "Loaded {} rows for {} of {} players",
            players.len(),
            self.roster.len() - skipped.len(),
            self.roster.len()
        );

        FetchReport {
            fetched_at: self.manager.now(),
            attempted: self.roster.len(),
            players,
            skipped,
        }
    }

    /// Identity first, then profile and ranked entries side by side.
    pub async fn fetch_entry(&self, entry: &RosterEntry) -> DataRetrievalResult<Vec<PlayerQueueRecord>> {
        let account = self.manager.resolve_account(entry).await?;
        let (profile, ranked) = tokio::join!(
            self.manager.get_profile(&account.puuid),
            self.manager.get_ranked_entries(&account.puuid)
        );
        let profile = profile?;

        Ok(expand_records(&account, &profile, &ranked, self.queue_mode))
    }
}

pub fn expand_records(
    account: &AccountIdentity,
    profile: &ProfileRecord,
    ranked: &[RankedEntry],
    queue_mode: QueueMode,
) -> Vec<PlayerQueueRecord> {
    match queue_mode {
        QueueMode::MultiQueue => ranked
            .iter()
            .map(|entry| PlayerQueueRecord::ranked(account, profile, entry))
            .collect(),
        QueueMode::SoloQueue => {
            let record = ranked
                .iter()
                .find(|entry| entry.queue_type.is_solo_duo())
                .map_or_else(
                    || PlayerQueueRecord::unranked(account, profile),
                    |entry| PlayerQueueRecord::ranked(account, profile, entry),
                );
            vec![record]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ids::{Puuid, QueueType},
        ranked::Tier,
    };

    fn account() -> (AccountIdentity, ProfileRecord) {
        let puuid = Puuid::from("p-1");
        (
            AccountIdentity {
                puuid: puuid.clone(),
                game_name: "Teserhela".into(),
                tag_line: "EUW".into(),
            },
            ProfileRecord {
                puuid,
                level: 80,
                icon_id: 7,
            },
        )
    }

    fn entry(queue: &str, tier: Tier) -> RankedEntry {
        RankedEntry {
            puuid: Puuid::from("p-1"),
            queue_type: QueueType::from(queue),
            tier,
            division: None,
            league_points: 5,
            wins: 1,
            losses: 1,
            hot_streak: false,
            veteran: false,
            fresh_blood: false,
        }
    }

    #[test]
    fn multi_queue_yields_one_row_per_queue() {
        let (account, profile) = account();
        let ranked = [entry(QueueType::SOLO_DUO, Tier::Gold), entry(QueueType::FLEX, Tier::Silver)];

        let rows = expand_records(&account, &profile, &ranked, QueueMode::MultiQueue);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].queue_type, Some(QueueType::from(QueueType::FLEX)));
        assert_eq!(rows[1].level, 80);
        assert_eq!(rows[1].icon_id, 7);

        assert!(expand_records(&account, &profile, &[], QueueMode::MultiQueue).is_empty());
    }

    #[test]
    fn solo_queue_yields_exactly_one_row() {
        let (account, profile) = account();
        let ranked = [entry(QueueType::FLEX, Tier::Silver), entry(QueueType::SOLO_DUO, Tier::Gold)];

        let rows = expand_records(&account, &profile, &ranked, QueueMode::SoloQueue);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tier, Tier::Gold);

        let flex_only = expand_records(&account, &profile, &ranked[..1], QueueMode::SoloQueue);
        assert_eq!(flex_only.len(), 1);
        assert_eq!(flex_only[0].tier, Tier::Unranked);
        assert_eq!(flex_only[0].queue_type, None);
        assert_eq!(flex_only[0].league_points, 0);
    }
}
