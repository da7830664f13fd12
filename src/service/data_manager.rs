use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::{
    config::RosterEntry,
    model::{
        ids::Puuid,
        ranked::RankedEntry,
        summoner::{AccountIdentity, ProfileRecord},
    },
};

use super::{
    cache::{Clock, ResponseCache},
    gameapi::{
        client::{ApiRequest, RequestError, RiotApi},
        parsing::{
            league::parse_ranked_entries,
            summoner::{parse_account, parse_profile},
            ParsingError,
        },
    },
};

/// Parsed response as kept in the cache. The variant always matches the request kind of its key.
#[derive(Debug, Clone)]
pub enum Payload {
    Account(AccountIdentity),
    Profile(ProfileRecord),
    Ranked(Vec<RankedEntry>),
}

/// Cached access to the three remote reads the leaderboard needs.
#[derive(Clone)]
pub struct DataManager {
    api: Arc<dyn RiotApi>,
    cache: ResponseCache<ApiRequest, Payload>,
}

impl DataManager {
    pub fn new(api: Arc<dyn RiotApi>, cache_ttl: Duration) -> Self {
        Self::with_cache(api, ResponseCache::new(cache_ttl))
    }

    pub fn with_clock(api: Arc<dyn RiotApi>, cache_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::with_cache(api, ResponseCache::with_clock(cache_ttl, clock))
    }

    pub fn with_cache(api: Arc<dyn RiotApi>, cache: ResponseCache<ApiRequest, Payload>) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &ResponseCache<ApiRequest, Payload> {
        &self.cache
    }

    /// Current time as seen by the cache clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.cache.now()
    }

    pub async fn resolve_account(&self, entry: &RosterEntry) -> DataRetrievalResult<AccountIdentity> {
        let request = ApiRequest::Account {
            game_name: entry.game_name.clone(),
            tag_line: entry.tag_line.clone(),
        };
        match self.request_cached(request.clone()).await? {
            Payload::Account(account) => Ok(account),
            _ => Err(DataRetrievalError::UnexpectedPayload(request)),
        }
    }

    pub async fn get_profile(&self, puuid: &Puuid) -> DataRetrievalResult<ProfileRecord> {
        let request = ApiRequest::Summoner(puuid.clone());
        match self.request_cached(request.clone()).await? {
            Payload::Profile(profile) => Ok(profile),
            _ => Err(DataRetrievalError::UnexpectedPayload(request)),
        }
    }

    /// Ranked history is optional: any failure degrades to no placements.
    pub async fn get_ranked_entries(&self, puuid: &Puuid) -> Vec<RankedEntry> {
        let request = ApiRequest::LeagueEntries(puuid.clone());
        match self.request_cached(request.clone()).await {
            Ok(Payload::Ranked(entries)) => entries,
            Ok(_) => {
                warn!("Ignoring ranked stats for {}: {}", puuid, DataRetrievalError::UnexpectedPayload(request));
                Vec::new()
            }
            Err(err) => {
                warn!("Ignoring ranked stats for {}: {}", puuid, err);
                Vec::new()
            }
        }
    }

    async fn request_cached(&self, request: ApiRequest) -> DataRetrievalResult<Payload> {
        let api = &self.api;
        let pending = &request;
        self.cache
            .get_or_fetch(request.clone(), move || async move {
                let json = api.request(pending).await?;
                let payload = match pending {
                    ApiRequest::Account { game_name, tag_line } => {
                        Payload::Account(parse_account(&json, game_name, tag_line)?)
                    }
                    ApiRequest::Summoner(puuid) => Payload::Profile(parse_profile(&json, puuid)?),
                    ApiRequest::LeagueEntries(puuid) => Payload::Ranked(parse_ranked_entries(&json, puuid)?),
                };
                Ok::<_, DataRetrievalError>(payload)
            })
            .await
    }
}

pub type DataRetrievalResult<T> = Result<T, DataRetrievalError>;

#[derive(Debug, thiserror::Error)]
pub enum DataRetrievalError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error("cached payload does not match request {0}")]
    UnexpectedPayload(ApiRequest),
}

impl DataRetrievalError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DataRetrievalError::Request(err) => err.status(),
            _ => None,
        }
    }
}
