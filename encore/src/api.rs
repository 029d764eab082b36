//! Typed access to the recommendation backend.
//!
//! The client builds plain [`ApiRequest`]s and hands them to a [`Transport`],
//! which is `fetch` in the browser and a recording mock in tests.

use crate::error::{Error, Result};
use crate::model::{LoginUrl, RecommendRequest, RecommendedTrack, Track};
use crate::session::Session;
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    /// The backend address is fixed for a build; `ENCORE_API_URL` overrides
    /// it at compile time.
    fn default() -> Self {
        ApiConfig::new(option_env!("ENCORE_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, url: String) -> ApiRequest {
        ApiRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    fn bearer(mut self, session: &Session) -> ApiRequest {
        self.headers.push(("Authorization", session.authorization()));
        self
    }

    fn json(mut self, body: String) -> ApiRequest {
        self.headers.push(("Content-Type", "application/json".to_owned()));
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(body: impl Into<String>) -> ApiResponse {
        ApiResponse {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange. Anything short of a response (network
/// failure, CORS rejection) is an [`Error::Transport`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

pub struct ApiClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> ApiClient<T> {
        ApiClient { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /login`, answering the provider's authorization page.
    pub async fn login_url(&self) -> Result<String> {
        let request = ApiRequest::new(Method::Get, self.config.url("/login"));
        let login: LoginUrl = self.exchange(request).await?;
        Ok(login.auth_url)
    }

    /// `GET /playlist/{id}`
    pub async fn playlist(&self, session: &Session, playlist_id: &str) -> Result<Vec<Track>> {
        let url = self.config.url(&format!("/playlist/{}", playlist_id));
        self.exchange(ApiRequest::new(Method::Get, url).bearer(session))
            .await
    }

    /// `POST /recommend` with the whole playlist.
    pub async fn recommend(
        &self,
        session: &Session,
        playlist_tracks: &[Track],
    ) -> Result<Vec<RecommendedTrack>> {
        let body = serde_json::to_string(&RecommendRequest { playlist_tracks })
            .map_err(|e| Error::Encode(e.to_string()))?;
        let request = ApiRequest::new(Method::Post, self.config.url("/recommend"))
            .bearer(session)
            .json(body);
        self.exchange(request).await
    }

    async fn exchange<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        debug!("{} {}", request.method.as_str(), request.url);
        let resp = self.transport.send(request).await?;
        if !resp.is_success() {
            return Err(Error::Status {
                status: resp.status,
                body: resp.body,
            });
        }
        Ok(serde_json::from_str(&resp.body)?)
    }
}
