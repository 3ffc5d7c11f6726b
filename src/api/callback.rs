use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    warning,
    youtube::auth::{SharedAuthState, exchange_code_pkce},
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedAuthState>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        if let Some(reason) = params.get("error") {
            warning!("Authorization was denied: {}", reason);
        }
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.pkce.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    let verifier = pkce_state.code_verifier.clone();

    match exchange_code_pkce(&shared_state.settings, code, &verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
