use std::{fmt, time::Duration};

use async_trait::async_trait;
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue},
    Client,
};
use serde_json::Value;

use crate::model::ids::Puuid;

const API_KEY_HEADER: &str = "x-riot-token";

/// One remote read. Doubles as the response cache key, so every kind of request
/// lives in its own key space.
#[derive(Debug, PartialEq, Hash, Eq, Clone)]
pub enum ApiRequest {
    Account { game_name: String, tag_line: String },
    Summoner(Puuid),
    LeagueEntries(Puuid),
}

impl ApiRequest {
    pub fn path(&self) -> String {
        match self {
            ApiRequest::Account { game_name, tag_line } => format!(
                "riot/account/v1/accounts/by-riot-id/{}/{}",
                urlencoding::encode(game_name),
                urlencoding::encode(tag_line)
            ),
            ApiRequest::Summoner(puuid) => {
                format!("lol/summoner/v4/summoners/by-puuid/{}", urlencoding::encode(puuid.as_str()))
            }
            ApiRequest::LeagueEntries(puuid) => {
                format!("lol/league/v4/entries/by-puuid/{}", urlencoding::encode(puuid.as_str()))
            }
        }
    }

    /// Account lookups go to the regional cluster, everything else to the platform host.
    fn is_regional(&self) -> bool {
        matches!(self, ApiRequest::Account { .. })
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiRequest::Account { game_name, tag_line } => write!(f, "account {}#{}", game_name, tag_line),
            ApiRequest::Summoner(puuid) => write!(f, "summoner {}", puuid),
            ApiRequest::LeagueEntries(puuid) => write!(f, "league entries {}", puuid),
        }
    }
}

#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn request(&self, request: &ApiRequest) -> Result<Value, RequestError>;
}

pub struct RiotApiClient {
    client: Client,
    regional_url: String,
    platform_url: String,
}

impl RiotApiClient {
    pub fn new(
        api_key: &str,
        regional_host: &str,
        platform_host: &str,
        timeout: Duration,
    ) -> Result<Self, ClientInitError> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key)?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        let client = Client::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            client,
            regional_url: host_url(regional_host),
            platform_url: host_url(platform_host),
        })
    }

    pub fn url(&self, request: &ApiRequest) -> String {
        let base = if request.is_regional() {
            &self.regional_url
        } else {
            &self.platform_url
        };
        format!("{}/{}", base, request.path())
    }
}

fn host_url(host: &str) -> String {
    format!("https://{}.api.riotgames.com", host.trim().to_lowercase())
}

#[async_trait]
impl RiotApi for RiotApiClient {
    async fn request(&self, request: &ApiRequest) -> Result<Value, RequestError> {
        let url = self.url(request);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(RequestError::RemoteFetch {
                request: request.clone(),
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("failed to create HTTP client: {0}")]
    HttpClientCreation(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream returned {status} for {request}: {message}")]
    RemoteFetch {
        request: ApiRequest,
        status: u16,
        message: String,
    },
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    /// Upstream status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::RemoteFetch { status, .. } => Some(*status),
            RequestError::Network(err) => err.status().map(|status| status.as_u16()),
            RequestError::Decode(_) => None,
        }
    }
}
