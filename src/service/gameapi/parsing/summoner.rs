use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    ids::Puuid,
    summoner::{AccountIdentity, ProfileRecord},
};

use super::{non_negative, ParsingError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDto {
    #[serde(default)]
    puuid: Option<String>,
    #[serde(default)]
    game_name: Option<String>,
    #[serde(default)]
    tag_line: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummonerDto {
    #[serde(default)]
    summoner_level: Option<i64>,
    #[serde(default)]
    profile_icon_id: Option<i64>,
}

/// Parses an account-by-riot-id response. Name and tag fall back to what was asked for.
pub fn parse_account(json: &Value, game_name: &str, tag_line: &str) -> Result<AccountIdentity, ParsingError> {
    let dto = AccountDto::deserialize(json).map_err(|source| ParsingError::InvalidPayload {
        context: "account",
        source,
    })?;

    let puuid = dto
        .puuid
        .filter(|puuid| !puuid.is_empty())
        .ok_or(ParsingError::MissingField("puuid"))?;

    Ok(AccountIdentity {
        puuid: puuid.into(),
        game_name: dto.game_name.unwrap_or_else(|| game_name.to_string()),
        tag_line: dto.tag_line.unwrap_or_else(|| tag_line.to_string()),
    })
}

pub fn parse_profile(json: &Value, puuid: &Puuid) -> Result<ProfileRecord, ParsingError> {
    let dto = SummonerDto::deserialize(json).map_err(|source| ParsingError::InvalidPayload {
        context: "summoner",
        source,
    })?;

    Ok(ProfileRecord {
        puuid: puuid.clone(),
        level: non_negative(dto.summoner_level),
        icon_id: non_negative(dto.profile_icon_id),
    })
}
