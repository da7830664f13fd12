use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    ids::Puuid,
    ranked::{Division, RankedEntry, Tier},
};

use super::{non_negative, ParsingError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeagueEntryDto {
    queue_type: String,
    #[serde(default)]
    tier: Option<String>,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default)]
    league_points: Option<i64>,
    #[serde(default)]
    wins: Option<i64>,
    #[serde(default)]
    losses: Option<i64>,
    #[serde(default)]
    hot_streak: Option<bool>,
    #[serde(default)]
    veteran: Option<bool>,
    #[serde(default)]
    fresh_blood: Option<bool>,
}

/// Parses the league entries of one account. Omitted fields fall back to unranked / zero / false.
pub fn parse_ranked_entries(json: &Value, puuid: &Puuid) -> Result<Vec<RankedEntry>, ParsingError> {
    let entries = Vec::<LeagueEntryDto>::deserialize(json).map_err(|source| ParsingError::InvalidPayload {
        context: "league entries",
        source,
    })?;

    Ok(entries
        .into_iter()
        .map(|entry| RankedEntry {
            puuid: puuid.clone(),
            queue_type: entry.queue_type.into(),
            tier: entry.tier.as_deref().map_or(Tier::Unranked, Tier::parse),
            division: entry.rank.as_deref().and_then(Division::parse_optional),
            league_points: non_negative(entry.league_points),
            wins: non_negative(entry.wins),
            losses: non_negative(entry.losses),
            hot_streak: entry.hot_streak.unwrap_or(false),
            veteran: entry.veteran.unwrap_or(false),
            fresh_blood: entry.fresh_blood.unwrap_or(false),
        })
        .collect())
}
