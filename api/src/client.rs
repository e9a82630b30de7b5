use crate::store::RemoteStore;
use crate::wire::{
    AuthResponse, BulkSaveRequest, Credentials, ErrorBody, LeaderboardRecord, MatchRecord,
    PointsResponse, PredictionRecord, PredictionUpsert, StandingRecord,
};
use crate::{GroupStanding, LeaderboardEntry, Match, PointsSummary, Prediction, Session};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Scorecast API client backed by the tournament server's REST endpoints.
#[derive(Debug, Clone)]
pub struct ScorecastApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for ScorecastApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    /// 401/403: bad credentials or an expired session token.
    Unauthorized { url: String, message: Option<String> },
    Api { status: u16, url: String, message: Option<String> },
    Parsing(reqwest::Error, String),
    Other(String),
}

/// Coarse error classes surfaced to the user as banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Network,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized { .. } => ErrorKind::Auth,
            _ => ErrorKind::Network,
        }
    }

    /// The server-provided message when the error body carried one,
    /// otherwise `fallback`.
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized { message: Some(m), .. } | ApiError::Api { message: Some(m), .. }
                if !m.trim().is_empty() =>
            {
                m.clone()
            }
            _ => fallback.to_owned(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Unauthorized { url, message } => match message {
                Some(m) => write!(f, "Unauthorized for {url}: {m}"),
                None => write!(f, "Unauthorized for {url}"),
            },
            ApiError::Api { status, url, message } => match message {
                Some(m) => write!(f, "API error {status} for {url}: {m}"),
                None => write!(f, "API error {status} for {url}"),
            },
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl ScorecastApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("scorecast/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn authed_get(&self, session: &Session, url: &str) -> RequestBuilder {
        self.client.get(url).bearer_auth(&session.token)
    }

    async fn authenticate(&self, path: &str, username: &str, password: &str) -> ApiResult<Session> {
        let url = self.url(path);
        let request = self.client.post(&url).json(&Credentials { username, password });
        let raw: AuthResponse = self.json(request, &url).await?;
        Ok(raw.into())
    }

    async fn get_list<W, T>(&self, session: &Session, path: &str) -> ApiResult<Vec<T>>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let url = self.url(path);
        let raw: Vec<W> = self.json(self.authed_get(session, &url), &url).await?;
        Ok(raw.into_iter().map(T::from).collect())
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> ApiResult<T> {
        self.execute(request, url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> ApiResult<Response> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.json::<ErrorBody>().await.ok().and_then(|b| b.message);
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ApiError::Unauthorized { url: url.to_owned(), message })
        } else {
            Err(ApiError::Api { status: status.as_u16(), url: url.to_owned(), message })
        }
    }
}

impl RemoteStore for ScorecastApi {
    async fn register(&self, username: &str, password: &str) -> ApiResult<Session> {
        self.authenticate("/auth/register", username, password).await
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        self.authenticate("/auth/login", username, password).await
    }

    async fn fetch_matches(&self, session: &Session) -> ApiResult<Vec<Match>> {
        self.get_list::<MatchRecord, Match>(session, "/matches").await
    }

    async fn fetch_my_predictions(&self, session: &Session) -> ApiResult<Vec<Prediction>> {
        self.get_list::<PredictionRecord, Prediction>(session, "/predictions/mine").await
    }

    async fn save_predictions(&self, session: &Session, predictions: &[Prediction]) -> ApiResult<()> {
        let url = self.url("/predictions/bulk");
        let body = BulkSaveRequest {
            predictions: predictions.iter().map(PredictionUpsert::from).collect(),
        };
        let request = self.client.post(&url).bearer_auth(&session.token).json(&body);
        // The acknowledgement body carries nothing the client models.
        self.execute(request, &url).await?;
        Ok(())
    }

    async fn fetch_points(&self, session: &Session) -> ApiResult<PointsSummary> {
        let url = self.url("/predictions/points");
        let raw: PointsResponse = self.json(self.authed_get(session, &url), &url).await?;
        Ok(raw.into())
    }

    async fn fetch_leaderboard(&self, session: &Session) -> ApiResult<Vec<LeaderboardEntry>> {
        self.get_list::<LeaderboardRecord, LeaderboardEntry>(session, "/users/leaderboard")
            .await
    }

    async fn fetch_group_standings(&self, session: &Session) -> ApiResult<Vec<GroupStanding>> {
        self.get_list::<StandingRecord, GroupStanding>(session, "/groups/standings")
            .await
    }
}
