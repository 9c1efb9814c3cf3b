use crate::config::Config;
use crate::error::{google_calendar_error, AppResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Seconds before expiry at which a token is treated as expired
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    token_path: PathBuf,
    client: Client,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>, token_path: PathBuf) -> Self {
        Self {
            config,
            token_path,
            client: Client::new(),
        }
    }

    /// Get OAuth token from disk, refreshing it when it has expired
    pub async fn get_token(&self) -> AppResult<Value> {
        let content = tokio::fs::read_to_string(&self.token_path).await.map_err(|e| {
            google_calendar_error(&format!(
                "No token found at {} ({}). Run get_calendar_token first.",
                self.token_path.display(),
                e
            ))
        })?;

        let token: Value = serde_json::from_str(&content)
            .map_err(|e| google_calendar_error(&format!("Failed to parse token JSON: {}", e)))?;

        match expires_at(&token) {
            Some(expiry) if expiry > Utc::now().timestamp() + EXPIRY_MARGIN_SECS => Ok(token),
            _ => {
                debug!("Stored access token expired, refreshing");
                self.refresh_token(&token).await
            }
        }
    }

    /// Extract the bearer access token
    pub async fn access_token(&self) -> AppResult<String> {
        let token = self.get_token().await?;
        token
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| google_calendar_error("No access token available"))
    }

    /// Refresh an expired token
    async fn refresh_token(&self, token: &Value) -> AppResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| google_calendar_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .cloned()
            .ok_or_else(|| google_calendar_error("Token response missing 'access_token' field"))?;

        // Combine new access token with existing refresh token
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        let token_json = json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "expires_at": Utc::now().timestamp() + expires_in,
        });

        self.set_token(&token_json).await?;
        info!("Refreshed Google access token");

        Ok(token_json)
    }

    /// Write token to disk, creating the parent directory if needed
    pub async fn set_token(&self, token_json: &Value) -> AppResult<()> {
        if let Some(parent) = self.token_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_string_pretty(token_json)?;
        tokio::fs::write(&self.token_path, body).await?;
        Ok(())
    }
}

/// Expiry as unix seconds; accepts our `expires_at` and googleapis' `expiry_date` (millis)
fn expires_at(token: &Value) -> Option<i64> {
    token
        .get("expires_at")
        .and_then(|v| v.as_i64())
        .or_else(|| {
            token
                .get("expiry_date")
                .and_then(|v| v.as_i64())
                .map(|ms| ms / 1000)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(path: PathBuf) -> TokenManager {
        let config = Config {
            google_client_id: "id".to_string(),
            google_client_secret: "secret".to_string(),
            token_path: path.clone(),
            contests_url: String::new(),
        };
        TokenManager::new(Arc::new(RwLock::new(config)), path)
    }

    #[test]
    fn test_expires_at_formats() {
        assert_eq!(expires_at(&json!({ "expires_at": 1700000000 })), Some(1700000000));
        assert_eq!(
            expires_at(&json!({ "expiry_date": 1700000000123_i64 })),
            Some(1700000000)
        );
        assert_eq!(expires_at(&json!({ "access_token": "x" })), None);
    }

    #[tokio::test]
    async fn test_valid_token_is_returned_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials").join("token.json");
        let tokens = manager(path);

        let token = json!({
            "access_token": "live",
            "refresh_token": "r",
            "expires_at": Utc::now().timestamp() + 3600,
        });
        tokens.set_token(&token).await.unwrap();

        assert_eq!(tokens.access_token().await.unwrap(), "live");
    }

    #[tokio::test]
    async fn test_missing_token_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = manager(dir.path().join("missing.json"));

        assert!(tokens.get_token().await.is_err());
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tokens = manager(dir.path().join("token.json"));
        tokens
            .set_token(&json!({ "access_token": "old", "expires_at": 0 }))
            .await
            .unwrap();

        assert!(tokens.get_token().await.is_err());
    }
}
