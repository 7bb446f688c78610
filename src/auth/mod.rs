//! Session token handling.
//!
//! The bearer token issued by `POST /auth/login` is kept in the `ui_state`
//! table and attached to every GraphQL request.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::db::state::{delete_state, get_state, set_state};
use crate::errors::{AppError, AppResult};

pub const TOKEN_KEY: &str = "jwtToken";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

pub struct TokenStore<'a> {
    conn: &'a Connection,
}

impl<'a> TokenStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self) -> AppResult<Option<String>> {
        Ok(get_state(self.conn, TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn set(&self, token: &str) -> AppResult<()> {
        set_state(self.conn, TOKEN_KEY, token)
    }

    pub fn clear(&self) -> AppResult<bool> {
        delete_state(self.conn, TOKEN_KEY)
    }
}

/// Exchange a username for a session token.
pub fn request_token(auth_url: &str, username: &str, timeout_secs: u64) -> AppResult<String> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build();

    let resp = match agent.post(auth_url).send_json(LoginRequest { username }) {
        Ok(resp) => resp,
        Err(ureq::Error::Status(401 | 403, _)) => return Err(AppError::Unauthorized),
        Err(ureq::Error::Status(status, resp)) => {
            let message = resp.into_string().unwrap_or_default();
            return Err(AppError::Http { status, message });
        }
        Err(ureq::Error::Transport(t)) => return Err(AppError::Network(t.to_string())),
    };

    let body: LoginResponse = resp
        .into_json()
        .map_err(|e| AppError::Network(format!("invalid login response: {}", e)))?;

    body.token
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// Log in and persist the token. Returns the token.
pub fn login(store: &TokenStore<'_>, auth_url: &str, username: &str, timeout_secs: u64) -> AppResult<String> {
    let token = request_token(auth_url, username, timeout_secs)?;
    store.set(&token)?;
    log::info!("logged in as {}", username);
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::open_in_memory;

    #[test]
    fn token_roundtrip_and_logout() {
        let pool = open_in_memory().unwrap();
        let store = TokenStore::new(&pool.conn);
        assert_eq!(store.get().unwrap(), None);

        store.set("abc.def").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("abc.def"));

        assert!(store.clear().unwrap());
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn login_against_unreachable_host_is_a_network_error() {
        let err = request_token("http://127.0.0.1:9/auth/login", "me", 1).unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }
}
