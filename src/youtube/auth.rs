use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config::YoutubeSettings,
    error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// State shared between the authorization flow and the callback handler.
pub struct AuthServerState {
    pub settings: YoutubeSettings,
    pub pkce: Mutex<Option<PkceToken>>,
}

pub type SharedAuthState = Arc<AuthServerState>;

impl AuthServerState {
    pub fn new(settings: YoutubeSettings) -> SharedAuthState {
        Arc::new(Self {
            settings,
            pkce: Mutex::new(None),
        })
    }
}

/// Builds the URL the user opens to grant access.
///
/// Offline access is requested so the token endpoint hands out a refresh token.
pub fn authorization_url(settings: &YoutubeSettings, code_challenge: &str) -> Result<Url, String> {
    let client_id = settings.oauth.client_id.as_deref().unwrap_or_default();
    Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", settings.scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| e.to_string())
}

/// Runs the OAuth 2.0 PKCE flow against the video platform.
///
/// 1. Generates the code verifier and challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits for the callback handler to exchange the code
/// 5. Persists the token to `credentials`
///
/// Exits the program when no client id is configured, the token cannot be
/// saved or the user does not finish within the timeout.
pub async fn auth(settings: YoutubeSettings, credentials: PathBuf) {
    if settings.oauth.client_id.is_none() {
        error!("YOUTUBE_CLIENT_ID is not set. Add it to the .env file in the data directory.");
    }

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = match authorization_url(&settings, &code_challenge) {
        Ok(url) => url,
        Err(e) => error!("Invalid authorization URL: {}", e),
    };

    let shared_state = AuthServerState::new(settings);

    // store verifier before the browser can hit the callback
    {
        let mut lock = shared_state.pkce.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(&shared_state).await {
        Some(token) => {
            let token_manager = TokenManager::new(credentials, token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state once a second for up to 60 seconds.
async fn wait_for_token(shared_state: &SharedAuthState) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.pkce.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token, proving possession of `verifier`.
pub async fn exchange_code_pkce(
    settings: &YoutubeSettings,
    code: &str,
    verifier: &str,
) -> Result<Token, String> {
    let mut form = vec![
        ("grant_type", "authorization_code".to_string()),
        (
            "client_id",
            settings.oauth.client_id.clone().unwrap_or_default(),
        ),
        ("code", code.to_string()),
        ("code_verifier", verifier.to_string()),
        ("redirect_uri", settings.redirect_uri.clone()),
    ];
    if let Some(secret) = &settings.oauth.client_secret {
        form.push(("client_secret", secret.clone()));
    }

    let client = Client::new();
    let res = client
        .post(&settings.oauth.token_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    let Some(access_token) = json["access_token"].as_str() else {
        return Err("token response carries no access_token".to_string());
    };

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
