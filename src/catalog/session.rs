//! Explicit authentication state shared by the HTTP clients.

use std::path::PathBuf;

use tokio::sync::Mutex;

use super::ClientError;
use crate::{config::OAuthClient, management::TokenManager};

pub enum AuthState {
    Unauthenticated,
    Authenticated(TokenManager),
    Failed(String),
}

/// Credentials of one client plus its current [`AuthState`].
pub struct Session {
    credentials: PathBuf,
    oauth: OAuthClient,
    state: Mutex<AuthState>,
}

impl Session {
    pub fn new(credentials: PathBuf, oauth: OAuthClient) -> Self {
        Self {
            credentials,
            oauth,
            state: Mutex::new(AuthState::Unauthenticated),
        }
    }

    /// Loads the stored credentials and makes sure they hold a usable access token.
    ///
    /// The outcome is remembered: a failed session stays failed and a successful
    /// one is not re-validated.
    pub async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        let mut state = self.state.lock().await;
        match &*state {
            AuthState::Authenticated(_) => return Ok(()),
            AuthState::Failed(reason) => {
                return Err(ClientError::AuthenticationFailed(reason.clone()));
            }
            AuthState::Unauthenticated => {}
        }

        let result = async {
            let mut manager = TokenManager::load(&self.credentials).await?;
            manager.get_valid_token(&self.oauth).await?;
            Ok::<_, String>(manager)
        }
        .await;

        match result {
            Ok(manager) => {
                *state = AuthState::Authenticated(manager);
                Ok(())
            }
            Err(reason) => {
                *state = AuthState::Failed(reason.clone());
                Err(ClientError::AuthenticationFailed(reason))
            }
        }
    }

    /// Returns a valid access token of an authenticated session.
    pub async fn access_token(&self) -> Result<String, ClientError> {
        let mut state = self.state.lock().await;
        match &mut *state {
            AuthState::Authenticated(manager) => manager
                .get_valid_token(&self.oauth)
                .await
                .map_err(ClientError::AuthenticationFailed),
            AuthState::Failed(reason) => Err(ClientError::AuthenticationFailed(reason.clone())),
            AuthState::Unauthenticated => Err(ClientError::NotAuthenticated),
        }
    }
}
