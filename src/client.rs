// Typed client for the external Arena API.
//
// Every call except login/register attaches the current bearer token (if
// any); the backend is the authorization boundary, so an absent token just
// means the call goes out unauthenticated. Nothing is retried: a failure is
// terminal for that user action.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::{
    ApiErrorBody, AuthResponse, Jogador, LoginRequest, RegisterRequest, Time, Torneio,
};
use crate::store::TokenVault;

/// Characters that cannot ride raw in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'\\');

/// Percent-encode a value used as one path segment, so a nickname with a
/// slash or hash stays a single segment instead of rewriting the URL.
fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    vault: Arc<TokenVault>,
}

impl ApiClient {
    /// Build a client against `config.api_url` with the configured
    /// per-request timeout. A hung backend fails the call instead of
    /// leaving the caller waiting forever.
    pub fn new(config: &Config, vault: Arc<TokenVault>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            vault,
        })
    }

    /// Build a client directly from a base URL; used by the integration
    /// tests, which point at a stub server on an ephemeral port.
    pub fn with_timeout(
        base_url: &str,
        vault: Arc<TokenVault>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: crate::config::normalize_api_url(base_url),
            vault,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored. A
    /// broken token store is treated like an absent token so a read failure
    /// cannot take down an otherwise-public request.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.vault.load() {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                tracing::warn!("token store unreadable, sending unauthenticated: {e}");
                builder
            }
        }
    }

    /// Send a request, folding transport-level failures into the fixed
    /// connectivity error that names the configured endpoint.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        builder.send().await.map_err(|e| ApiError::Connection {
            url: self.base_url.clone(),
            source: e,
        })
    }

    /// Map a non-2xx response to `Rejected`, preferring the backend's own
    /// `message` field over the per-operation fallback.
    async fn check(resp: Response, fallback: &str) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json().await.map_err(ApiError::Decode)
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// `POST /auth/login`. Never attaches a bearer token.
    pub async fn login(&self, nickname: &str, senha: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            nickname: nickname.to_string(),
            senha: senha.to_string(),
        };
        let resp = self
            .send(self.http.post(self.url("/auth/login")).json(&body))
            .await?;
        let resp = Self::check(resp, "login failed").await?;
        Self::decode(resp).await
    }

    /// `POST /auth/register`. Never attaches a bearer token.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let resp = self
            .send(self.http.post(self.url("/auth/register")).json(req))
            .await?;
        let resp = Self::check(resp, "registration failed").await?;
        Self::decode(resp).await
    }

    /// `GET /auth/validate` with the stored bearer token. Any non-2xx
    /// answer means the token is dead, regardless of the body.
    pub async fn validate(&self) -> Result<Jogador, ApiError> {
        let resp = self
            .send(self.authed(self.http.get(self.url("/auth/validate"))))
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::InvalidToken);
        }
        Self::decode(resp).await
    }

    // ── Jogadores ────────────────────────────────────────────────────

    /// `GET /jogadores/ranking?limit=N`, already ordered by Elo descending.
    /// The ordering is the backend's contract and is not re-sorted here.
    pub async fn ranking(&self, limit: u32) -> Result<Vec<Jogador>, ApiError> {
        let resp = self
            .send(self.authed(
                self.http
                    .get(self.url("/jogadores/ranking"))
                    .query(&[("limit", limit)]),
            ))
            .await?;
        let resp = Self::check(resp, "failed to fetch ranking").await?;
        Self::decode(resp).await
    }

    /// `GET /jogadores/{nickname}`. A 404 becomes the dedicated
    /// not-found variant so the profile view can render its own state.
    pub async fn jogador(&self, nickname: &str) -> Result<Jogador, ApiError> {
        let path = format!("/jogadores/{}", encode_segment(nickname));
        let resp = self.send(self.authed(self.http.get(self.url(&path)))).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::JogadorNotFound(nickname.to_string()));
        }
        let resp = Self::check(resp, "failed to fetch player").await?;
        Self::decode(resp).await
    }

    /// `GET /jogadores`.
    pub async fn jogadores(&self) -> Result<Vec<Jogador>, ApiError> {
        let resp = self
            .send(self.authed(self.http.get(self.url("/jogadores"))))
            .await?;
        let resp = Self::check(resp, "failed to fetch players").await?;
        Self::decode(resp).await
    }

    // ── Times / Torneios ─────────────────────────────────────────────

    /// `GET /times`.
    pub async fn times(&self) -> Result<Vec<Time>, ApiError> {
        let resp = self
            .send(self.authed(self.http.get(self.url("/times"))))
            .await?;
        let resp = Self::check(resp, "failed to fetch teams").await?;
        Self::decode(resp).await
    }

    /// `GET /torneios`.
    pub async fn torneios(&self) -> Result<Vec<Torneio>, ApiError> {
        let resp = self
            .send(self.authed(self.http.get(self.url("/torneios"))))
            .await?;
        let resp = Self::check(resp, "failed to fetch tournaments").await?;
        Self::decode(resp).await
    }

    // ── Matchmaking ──────────────────────────────────────────────────

    /// `GET /matchmaking/fila`: nicknames currently queued.
    pub async fn fila(&self) -> Result<Vec<String>, ApiError> {
        let resp = self
            .send(self.authed(self.http.get(self.url("/matchmaking/fila"))))
            .await?;
        let resp = Self::check(resp, "failed to fetch matchmaking queue").await?;
        Self::decode(resp).await
    }

    /// `POST /matchmaking/entrar?nickname=`.
    pub async fn entrar_fila(&self, nickname: &str) -> Result<(), ApiError> {
        let resp = self
            .send(self.authed(
                self.http
                    .post(self.url("/matchmaking/entrar"))
                    .query(&[("nickname", nickname)]),
            ))
            .await?;
        Self::check(resp, "failed to join the matchmaking queue").await?;
        Ok(())
    }

    /// `POST /matchmaking/sair?nickname=`.
    pub async fn sair_fila(&self, nickname: &str) -> Result<(), ApiError> {
        let resp = self
            .send(self.authed(
                self.http
                    .post(self.url("/matchmaking/sair"))
                    .query(&[("nickname", nickname)]),
            ))
            .await?;
        Self::check(resp, "failed to leave the matchmaking queue").await?;
        Ok(())
    }
}
