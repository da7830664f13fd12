use std::sync::Arc;

use log::warn;

use crate::{
    config::{looks_like_api_key, Config, MissingCredentialError},
    model::leaderboard::Leaderboard,
};

use super::{
    data_manager::DataManager,
    gameapi::client::{ClientInitError, RiotApi, RiotApiClient},
    orchestrator::{FetchOrchestrator, FetchReport},
    snapshot::{read_snapshot, SnapshotError},
};

/// Builds the live API client. Fails before any request when no key is configured.
pub fn connect(config: &Config) -> Result<Arc<dyn RiotApi>, PipelineError> {
    let api_key = config.api_key()?;
    if !looks_like_api_key(api_key) {
        warn!("The configured API key does not look like a Riot development key");
    }

    let client = RiotApiClient::new(
        api_key,
        &config.regional_host,
        &config.platform_host,
        config.request_timeout,
    )?;
    Ok(Arc::new(client))
}

/// One live client with its response cache. Refreshing within the TTL is served from the cache.
pub struct LiveSession {
    orchestrator: FetchOrchestrator,
}

impl LiveSession {
    pub fn connect(config: &Config) -> Result<Self, PipelineError> {
        Ok(Self::with_api(config, connect(config)?))
    }

    pub fn with_api(config: &Config, api: Arc<dyn RiotApi>) -> Self {
        Self::with_manager(config, DataManager::new(api, config.cache_ttl))
    }

    pub fn with_manager(config: &Config, manager: DataManager) -> Self {
        Self {
            orchestrator: FetchOrchestrator::new(config, manager),
        }
    }

    pub fn manager(&self) -> &DataManager {
        self.orchestrator.manager()
    }

    pub async fn refresh(&self) -> FetchReport {
        self.orchestrator.run().await
    }
}

pub async fn fetch_live(config: &Config) -> Result<FetchReport, PipelineError> {
    Ok(LiveSession::connect(config)?.refresh().await)
}

/// A single run on a fresh cache.
pub async fn fetch_with(config: &Config, api: Arc<dyn RiotApi>) -> FetchReport {
    LiveSession::with_api(config, api).refresh().await
}

/// Live leaderboard when a key is configured, otherwise the snapshot fallback if one is set.
pub async fn load_leaderboard(config: &Config) -> Result<Leaderboard, PipelineError> {
    if config.api_key().is_ok() {
        return Ok(fetch_live(config).await?.to_leaderboard());
    }

    match &config.snapshot_path {
        Some(path) => {
            warn!("No API key configured, reading snapshot {}", path.display());
            let snapshot = read_snapshot(path)?;
            Ok(Leaderboard::from_records(snapshot.timestamp, snapshot.players))
        }
        None => Err(MissingCredentialError.into()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    MissingCredential(#[from] MissingCredentialError),
    #[error(transparent)]
    Client(#[from] ClientInitError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
