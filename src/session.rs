// Session lifecycle: the one active bearer token and the player it belongs
// to. Single logical writer; transitions happen on the event loop and the
// last completed auth exchange wins.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::{Jogador, RegisterRequest};
use crate::store::TokenVault;

/// Session states. The token is never silently rotated: it changes only
/// through login/register and is dropped only by logout or a failed
/// validation.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticated { token: String, jogador: Jogador },
}

/// Owns the session state and keeps the two token stores in step with it.
#[derive(Debug)]
pub struct SessionManager {
    client: ApiClient,
    vault: Arc<TokenVault>,
    state: SessionState,
}

impl SessionManager {
    /// Starts `Anonymous`; call [`restore`](Self::restore) to pick up a
    /// previously stored token.
    pub fn new(client: ApiClient, vault: Arc<TokenVault>) -> Self {
        Self {
            client,
            vault,
            state: SessionState::Anonymous,
        }
    }

    /// Startup revalidation. Looks for a stored token (durable store
    /// first, then the mirror, repairing the durable copy from it), then
    /// validates it against the API. Any failure is silent: the session
    /// resolves to `Anonymous` and both stores are cleared.
    pub async fn restore(&mut self) -> bool {
        let token = match self.vault.load() {
            Ok(Some(token)) => token,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("token store unreadable during startup: {e}");
                return false;
            }
        };

        match self.client.validate().await {
            Ok(jogador) => {
                tracing::info!("session restored for {}", jogador.nickname);
                self.state = SessionState::Authenticated { token, jogador };
                true
            }
            Err(e) => {
                tracing::debug!("stored token rejected, resetting session: {e}");
                self.drop_session();
                false
            }
        }
    }

    /// Log in. On success the token is written through to both stores and
    /// the profile is held in memory. On failure nothing changes: an
    /// existing stored token is left alone.
    pub async fn login(&mut self, nickname: &str, senha: &str) -> Result<&Jogador, ApiError> {
        let auth = self.client.login(nickname, senha).await?;
        self.adopt(auth.token, auth.jogador)
    }

    /// Register a new player. Same success/failure contract as login.
    pub async fn register(&mut self, req: &RegisterRequest) -> Result<&Jogador, ApiError> {
        let auth = self.client.register(req).await?;
        self.adopt(auth.token, auth.jogador)
    }

    /// Explicit logout: clear both stores and forget the profile.
    pub fn logout(&mut self) {
        self.drop_session();
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn jogador(&self) -> Option<&Jogador> {
        match &self.state {
            SessionState::Authenticated { jogador, .. } => Some(jogador),
            SessionState::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn adopt(&mut self, token: String, jogador: Jogador) -> Result<&Jogador, ApiError> {
        self.vault.set(&token)?;
        self.state = SessionState::Authenticated { token, jogador };
        match &self.state {
            SessionState::Authenticated { jogador, .. } => Ok(jogador),
            SessionState::Anonymous => unreachable!("state was just set"),
        }
    }

    fn drop_session(&mut self) {
        if let Err(e) = self.vault.clear() {
            tracing::warn!("failed to clear token stores: {e}");
        }
        self.state = SessionState::Anonymous;
    }
}
