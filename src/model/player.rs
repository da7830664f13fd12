use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ids::{Puuid, QueueType},
    ranked::{Division, RankedEntry, Tier},
    summoner::{AccountIdentity, ProfileRecord},
};

/// Identity, profile and a single queue placement joined into one leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQueueRecord {
    pub name: String,
    #[serde(default)]
    pub tag_line: String,
    pub puuid: Puuid,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub icon_id: u32,
    #[serde(default)]
    pub queue_type: Option<QueueType>,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default, rename = "rank", with = "division_field")]
    pub division: Option<Division>,
    #[serde(default)]
    pub league_points: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub hot_streak: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub score: i64,
}

impl PlayerQueueRecord {
    pub fn ranked(account: &AccountIdentity, profile: &ProfileRecord, entry: &RankedEntry) -> Self {
        Self {
            name: account.game_name.clone(),
            tag_line: account.tag_line.clone(),
            puuid: account.puuid.clone(),
            level: profile.level,
            icon_id: profile.icon_id,
            queue_type: Some(entry.queue_type.clone()),
            tier: entry.tier,
            division: entry.division,
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
            hot_streak: entry.hot_streak,
            veteran: entry.veteran,
            fresh_blood: entry.fresh_blood,
            score: 0,
        }
    }

    /// Queue-less row for an account without any placement.
    pub fn unranked(account: &AccountIdentity, profile: &ProfileRecord) -> Self {
        Self {
            name: account.game_name.clone(),
            tag_line: account.tag_line.clone(),
            puuid: account.puuid.clone(),
            level: profile.level,
            icon_id: profile.icon_id,
            queue_type: None,
            tier: Tier::Unranked,
            division: None,
            league_points: 0,
            wins: 0,
            losses: 0,
            hot_streak: false,
            veteran: false,
            fresh_blood: false,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub players: Vec<PlayerQueueRecord>,
}

mod division_field {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::model::ranked::Division;

    // Divisionless rows are written as "" to stay readable by older snapshot consumers.
    pub fn serialize<S>(division: &Option<Division>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(division.map(Division::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Division>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Division::parse_optional))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_snapshot_rows_with_missing_fields() {
        let raw = r#"{
            "name": "Teserhela",
            "puuid": "p-1",
            "level": 312,
            "iconId": 4568,
            "queueType": "RANKED_FLEX_SR",
            "tier": "SILVER",
            "rank": "III",
            "wins": 12
        }"#;
        let record: PlayerQueueRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.tier, Tier::Silver);
        assert_eq!(record.division, Some(Division::III));
        assert_eq!(record.league_points, 0);
        assert_eq!(record.losses, 0);
        assert!(!record.hot_streak);
        assert_eq!(record.tag_line, "");
        assert_eq!(record.queue_type, Some(QueueType::from("RANKED_FLEX_SR")));
    }

    #[test]
    fn empty_rank_means_no_division() {
        let raw = r#"{"name":"a","puuid":"p","tier":"UNRANKED","rank":""}"#;
        let record: PlayerQueueRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.division, None);
        assert_eq!(record.tier, Tier::Unranked);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["rank"], "");
        assert_eq!(back["tier"], "UNRANKED");
    }
}
